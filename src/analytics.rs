//! Analytics payload for one finished task, and where it goes.
//!
//! Delivery is fire-and-forget: `AnalyticsSink::record` returns nothing and a
//! sink must swallow its own failures so gameplay state is never affected.

use serde::Serialize;
use tracing::{info, warn};

use crate::adapter::{Decision, Trend};
use crate::domain::{OutcomeKind, OutcomeRecord, TaskType};

/// Flat outcome row plus the adaptation tags. The `algo_*` names are part of the wire format.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsEvent {
  pub user_id: String,
  pub task_id: String,
  #[serde(rename = "type")]
  pub task_type: TaskType,
  pub success: bool,
  pub outcome: OutcomeKind,
  pub time_spent_ms: u64,
  pub difficulty_level: f64,
  pub timestamp: i64,
  pub start_time: i64,
  pub was_skipped: bool,
  pub session_id: String,
  pub session_duration_ms: u64,
  #[serde(rename = "algo_action", skip_serializing_if = "Option::is_none")]
  pub algo_action: Option<String>,
  #[serde(rename = "algo_reason", skip_serializing_if = "Option::is_none")]
  pub algo_reason: Option<String>,
  #[serde(rename = "algo_trend", skip_serializing_if = "Option::is_none")]
  pub algo_trend: Option<Trend>,
}

impl AnalyticsEvent {
  pub fn new(user_id: &str, outcome: &OutcomeRecord, decision: Option<&Decision>) -> Self {
    Self {
      user_id: user_id.to_string(),
      task_id: outcome.task_id.clone(),
      task_type: outcome.task_type,
      success: outcome.success,
      outcome: outcome.outcome,
      time_spent_ms: outcome.time_spent_ms,
      difficulty_level: outcome.difficulty_level,
      timestamp: outcome.timestamp,
      start_time: outcome.start_time,
      was_skipped: outcome.was_skipped,
      session_id: outcome.session_id.clone(),
      session_duration_ms: outcome.session_duration_ms,
      algo_action: decision.map(|d| d.label.as_str().to_string()),
      algo_reason: decision.map(|d| d.reason.clone()),
      algo_trend: decision.map(Decision::trend),
    }
  }
}

pub trait AnalyticsSink: Send + Sync {
  fn record(&self, event: &AnalyticsEvent);
}

/// Default sink: one structured `analytics` event per outcome.
#[derive(Debug, Default)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
  fn record(&self, event: &AnalyticsEvent) {
    match serde_json::to_string(event) {
      Ok(payload) => info!(
        target: "analytics",
        user_id = %event.user_id,
        task_id = %event.task_id,
        task_type = %event.task_type,
        %payload,
        "Task outcome"
      ),
      Err(e) => warn!(target: "analytics", error = %e, "Dropping analytics event"),
    }
  }
}

/// Keeps every event in memory; tests inspect it afterwards.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingSink {
  pub events: std::sync::Mutex<Vec<AnalyticsEvent>>,
}

#[cfg(test)]
impl AnalyticsSink for RecordingSink {
  fn record(&self, event: &AnalyticsEvent) {
    if let Ok(mut events) = self.events.lock() {
      events.push(event.clone());
    }
  }
}
