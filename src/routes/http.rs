//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{State, Query}, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::error::EngineError;
use crate::protocol::*;
use crate::state::AppState;
use crate::logic::*;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state, body))]
pub async fn http_post_session(
  State(state): State<Arc<AppState>>,
  Json(body): Json<SessionIn>,
) -> impl IntoResponse {
  let out = open_session(&state, body).await;
  info!(target: "flowscroll", user_id = %out.user_id, session_id = %out.session_id, "HTTP session opened");
  Json(out)
}

#[instrument(level = "info", skip(state), fields(user_id = %q.user_id))]
pub async fn http_get_profile(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ProfileQuery>,
) -> Result<impl IntoResponse, EngineError> {
  Ok(Json(state.profile(&q.user_id).await?))
}

#[instrument(level = "info", skip(state), fields(user_id = %q.user_id, count = ?q.count))]
pub async fn http_get_tasks(
  State(state): State<Arc<AppState>>,
  Query(q): Query<TasksQuery>,
) -> Result<impl IntoResponse, EngineError> {
  let tasks = next_tasks(&state, &q.user_id, q.count).await?;
  Ok(Json(TasksOut { tasks }))
}

#[instrument(level = "info", skip(state, body), fields(user_id = %body.user_id, task_id = %body.task_id))]
pub async fn http_post_outcome(
  State(state): State<Arc<AppState>>,
  Json(body): Json<OutcomeIn>,
) -> Result<impl IntoResponse, EngineError> {
  Ok(Json(report_outcome(&state, body).await?))
}

#[instrument(level = "info", skip(body))]
pub async fn http_post_sentence(Json(body): Json<SentenceIn>) -> impl IntoResponse {
  Json(SentenceOut { valid: check_sentence(&body) })
}
