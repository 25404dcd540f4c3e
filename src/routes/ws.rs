//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::logic::*;
use crate::state::AppState;
use crate::util::trunc_for_log;

#[instrument(level = "info", skip(ws, state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "flowscroll", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "flowscroll", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        let reply = handle_text(&txt, &state).await;
        if let Err(e) = socket.send(Message::Text(reply)).await {
          error!(target: "flowscroll", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "flowscroll", "WebSocket disconnected");
}

/// Parse, dispatch, serialize. Always yields exactly one reply.
pub async fn handle_text(txt: &str, state: &AppState) -> String {
  let reply_msg = match serde_json::from_str::<ClientWsMessage>(txt) {
    Ok(incoming) => {
      debug!(target: "flowscroll", raw = %trunc_for_log(txt, 256), "WS received");
      handle_client_ws(incoming, state).await
    }
    Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
  };

  serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
    serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
  })
}

#[instrument(level = "info", skip(state))]
async fn handle_client_ws(msg: ClientWsMessage, state: &AppState) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::StartSession(body) => {
      let out = open_session(state, body).await;
      info!(target: "flowscroll", user_id = %out.user_id, session_id = %out.session_id, "WS session opened");
      ServerWsMessage::Session(out)
    }

    ClientWsMessage::NextTasks { user_id, count } => match next_tasks(state, &user_id, count).await {
      Ok(tasks) => ServerWsMessage::Tasks { tasks },
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },

    ClientWsMessage::ReportOutcome(body) => match report_outcome(state, body).await {
      Ok(out) => ServerWsMessage::OutcomeResult(out),
      Err(e) => ServerWsMessage::Error { message: e.to_string() },
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::EngineConfig;
  use crate::analytics::RecordingSink;
  use serde_json::{json, Value};

  fn state() -> AppState {
    AppState::with_parts(EngineConfig::default(), Arc::new(RecordingSink::default()))
  }

  async fn send(state: &AppState, msg: Value) -> Value {
    serde_json::from_str(&handle_text(&msg.to_string(), state).await).unwrap()
  }

  #[tokio::test]
  async fn ping_pong_and_bad_json() {
    let st = state();
    assert_eq!(send(&st, json!({ "type": "ping" })).await, json!({ "type": "pong" }));
    let v: Value = serde_json::from_str(&handle_text("{nope", &st).await).unwrap();
    assert_eq!(v["type"], "error");
  }

  #[tokio::test]
  async fn session_tasks_outcome_flow() {
    let st = state();
    let session = send(&st, json!({ "type": "start_session", "userId": "ws-user" })).await;
    assert_eq!(session["type"], "session");
    assert_eq!(session["userId"], "ws-user");
    let session_id = session["sessionId"].as_str().unwrap().to_string();

    let tasks = send(&st, json!({ "type": "next_tasks", "userId": "ws-user", "count": 2 })).await;
    assert_eq!(tasks["type"], "tasks");
    assert_eq!(tasks["tasks"].as_array().unwrap().len(), 2);
    let task_id = tasks["tasks"][0]["id"].as_str().unwrap().to_string();

    let result = send(
      &st,
      json!({
        "type": "report_outcome",
        "userId": "ws-user",
        "sessionId": session_id,
        "taskId": task_id,
        "success": false,
        "timeSpentMs": 4000,
        "wasSkipped": true
      }),
    )
    .await;
    assert_eq!(result["type"], "outcome_result");
    assert_eq!(result["outcome"]["outcome"], "skipped");
    assert_eq!(result["profile"]["history"].as_array().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn unknown_user_yields_error_reply() {
    let st = state();
    let v = send(&st, json!({ "type": "next_tasks", "userId": "ghost" })).await;
    assert_eq!(v["type"], "error");
    assert!(v["message"].as_str().unwrap().contains("ghost"));
  }
}
