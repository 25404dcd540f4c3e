//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::adapter::{DecisionLabel, Trend};
use crate::domain::{OutcomeRecord, TaskRecord, UserProfile};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    StartSession(SessionIn),
    NextTasks {
        #[serde(rename = "userId")]
        user_id: String,
        count: Option<usize>,
    },
    ReportOutcome(OutcomeIn),
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Session(SessionOut),
    Tasks { tasks: Vec<TaskRecord> },
    OutcomeResult(OutcomeOut),
    Error { message: String },
}

#[derive(Debug, Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIn {
    /// Raw stored profile (whatever the client kept under `flowScrollStats`).
    #[serde(default)]
    pub persisted: Option<Value>,
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOut {
    pub user_id: String,
    pub session_id: String,
    pub profile: UserProfile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileQuery {
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksQuery {
    pub user_id: String,
    pub count: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct TasksOut {
    pub tasks: Vec<TaskRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeIn {
    pub user_id: String,
    pub session_id: String,
    pub task_id: String,
    pub success: bool,
    pub time_spent_ms: u64,
    #[serde(default)]
    pub was_skipped: bool,
    #[serde(default)]
    pub start_time: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeOut {
    pub outcome: OutcomeRecord,
    pub decision: DecisionLabel,
    pub reason: String,
    pub trend: Trend,
    pub previous_level: f64,
    pub new_level: f64,
    pub profile: UserProfile,
}

#[derive(Debug, Deserialize)]
pub struct SentenceIn {
    pub word1: String,
    pub word2: String,
    pub sentence: String,
}

#[derive(Debug, Serialize)]
pub struct SentenceOut {
    pub valid: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub error: String,
}
