//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Opening a session (profile migration or resume)
//!   - Serving the next batch of tasks
//!   - Applying an outcome and shaping the adaptation result
//!   - Sentence validation for the legacy sentence task

use tracing::{info, instrument};

use crate::error::EngineError;
use crate::generators::language::validate_sentence;
use crate::protocol::{OutcomeIn, OutcomeOut, SentenceIn, SessionIn, SessionOut};
use crate::state::{AppState, OutcomeReport};
use crate::domain::TaskRecord;

#[instrument(level = "info", skip(state, body), fields(user_id = ?body.user_id, has_blob = body.persisted.is_some()))]
pub async fn open_session(state: &AppState, body: SessionIn) -> SessionOut {
  let (profile, session) = state.start_session(body.persisted.as_ref(), body.user_id.as_deref()).await;
  SessionOut { user_id: profile.user_id.clone(), session_id: session.session_id, profile }
}

#[instrument(level = "info", skip(state), fields(%user_id))]
pub async fn next_tasks(state: &AppState, user_id: &str, count: Option<usize>) -> Result<Vec<TaskRecord>, EngineError> {
  let tasks = state.issue_tasks(user_id, count.unwrap_or(state.config.lookahead)).await?;
  info!(target: "engine", %user_id, served = tasks.len(), "Tasks served");
  Ok(tasks)
}

#[instrument(level = "info", skip(state, body), fields(user_id = %body.user_id, task_id = %body.task_id))]
pub async fn report_outcome(state: &AppState, body: OutcomeIn) -> Result<OutcomeOut, EngineError> {
  let report = OutcomeReport {
    user_id: body.user_id,
    session_id: body.session_id,
    task_id: body.task_id,
    success: body.success,
    time_spent_ms: body.time_spent_ms,
    was_skipped: body.was_skipped,
    start_time: body.start_time,
  };
  let applied = state.apply_outcome(&report).await?;
  let d = &applied.decision;
  info!(
    target: "engine",
    user_id = %report.user_id,
    task_type = %applied.outcome.task_type,
    outcome = ?applied.outcome.outcome,
    decision = d.label.as_str(),
    previous_level = d.previous_level,
    new_level = d.new_level,
    "Outcome applied"
  );

  Ok(OutcomeOut {
    outcome: applied.outcome.clone(),
    decision: d.label,
    reason: d.reason.clone(),
    trend: d.trend(),
    previous_level: d.previous_level,
    new_level: d.new_level,
    profile: applied.profile,
  })
}

#[instrument(level = "debug", skip(body), fields(sentence_len = body.sentence.len()))]
pub fn check_sentence(body: &SentenceIn) -> bool {
  validate_sentence(&body.word1, &body.word2, &body.sentence)
}
