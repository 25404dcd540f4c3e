//! Turns a presentation report (success, elapsed time, skip) into an OutcomeRecord.

use crate::domain::{OutcomeKind, OutcomeRecord, TaskRecord};

/// Where in the user's session an outcome happened.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionContext {
  pub session_id: String,
  pub session_started_at: i64,
  /// When the task was put on screen; `None` lets the evaluator derive it from the elapsed time.
  pub task_started_at: Option<i64>,
}

pub fn evaluate(
  task: &TaskRecord,
  success: bool,
  time_spent_ms: u64,
  was_skipped: bool,
  ctx: &SessionContext,
  now: i64,
) -> OutcomeRecord {
  let outcome = OutcomeKind::derive(success, was_skipped);
  let start_time = ctx.task_started_at.unwrap_or_else(|| now.saturating_sub(time_spent_ms as i64));

  OutcomeRecord {
    task_id: task.id.clone(),
    task_type: task.task_type,
    success: outcome == OutcomeKind::Success,
    outcome,
    time_spent_ms,
    timestamp: now,
    start_time,
    difficulty_level: task.difficulty_level,
    was_skipped,
    session_id: ctx.session_id.clone(),
    session_duration_ms: now.saturating_sub(ctx.session_started_at).max(0) as u64,
  }
}
