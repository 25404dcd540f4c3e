//! Reconciling a persisted profile blob of unknown vintage with the current schema.
//!
//! Field-by-field and never failing: anything unreadable falls back to its
//! default, unknown keys are dropped. Output re-serializes to a blob that
//! reconciles to itself.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::{default_levels, OutcomeKind, OutcomeRecord, StreakData, TaskType, UserProfile};

/// Key under which the client stores the serialized profile.
pub const STORAGE_KEY: &str = "flowScrollStats";

/// Parse and reconcile a raw stored string. Garbage yields a fresh profile.
pub fn reconcile_blob(raw: &str) -> UserProfile {
  match serde_json::from_str::<Value>(raw) {
    Ok(v) => reconcile(&v),
    Err(e) => {
      warn!(target: "engine", error = %e, "Persisted profile is not valid JSON; starting fresh");
      UserProfile::fresh()
    }
  }
}

pub fn reconcile(raw: &Value) -> UserProfile {
  let Some(obj) = raw.as_object() else {
    debug!(target: "engine", "Persisted profile is not an object; starting fresh");
    return UserProfile::fresh();
  };

  let user_id = match obj.get("userId").and_then(Value::as_str) {
    Some(id) if !id.is_empty() => id.to_string(),
    _ => Uuid::new_v4().to_string(),
  };

  let history: Vec<OutcomeRecord> = obj
    .get("history")
    .and_then(Value::as_array)
    .map(|entries| entries.iter().filter_map(history_entry).collect())
    .unwrap_or_default();

  let total_time_ms = obj
    .get("totalTimeMs")
    .and_then(as_u64)
    .unwrap_or_else(|| history.iter().map(|h| h.time_spent_ms).sum());

  UserProfile {
    user_id,
    levels: levels(obj.get("levels")),
    confidence: typed_map(obj.get("confidence"), |v| {
      v.as_f64().filter(|c| c.is_finite()).map(|c| c.clamp(0.0, 1.0))
    }),
    streaks: typed_map(obj.get("streaks"), |v| {
      let o = v.as_object()?;
      let count = |k: &str| o.get(k).and_then(as_u64).map(|n| n.min(u32::MAX as u64) as u32).unwrap_or(0);
      Some(StreakData { correct: count("correct"), wrong: count("wrong") })
    }),
    history,
    total_time_ms,
  }
}

/// A stored `levels` map replaces the defaults wholesale; types it lacks start at 1.
fn levels(raw: Option<&Value>) -> BTreeMap<TaskType, f64> {
  if !raw.is_some_and(Value::is_object) {
    return default_levels();
  }
  let known = typed_map(raw, |v| v.as_f64().filter(|l| l.is_finite() && *l > 0.0));
  TaskType::ALL.iter().map(|t| (*t, known.get(t).copied().unwrap_or(1.0))).collect()
}

/// Keep entries whose key names a known TaskType and whose value `parse` accepts.
fn typed_map<T>(raw: Option<&Value>, parse: impl Fn(&Value) -> Option<T>) -> BTreeMap<TaskType, T> {
  let Some(obj) = raw.and_then(Value::as_object) else {
    return BTreeMap::new();
  };
  obj
    .iter()
    .filter_map(|(k, v)| Some((TaskType::from_name(k)?, parse(v)?)))
    .collect()
}

fn as_u64(v: &Value) -> Option<u64> {
  v.as_u64().or_else(|| v.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
}

fn as_i64(v: &Value) -> Option<i64> {
  v.as_i64().or_else(|| v.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
}

fn str_field(o: &Map<String, Value>, key: &str) -> Option<String> {
  o.get(key).and_then(Value::as_str).map(str::to_string)
}

/// One history row. Needs at least a task id and a known type.
fn history_entry(v: &Value) -> Option<OutcomeRecord> {
  let o = v.as_object()?;
  let task_id = str_field(o, "taskId")?;
  let task_type = o.get("type").and_then(Value::as_str).and_then(TaskType::from_name)?;

  let stored_outcome = o.get("outcome").and_then(Value::as_str);
  let was_skipped = o
    .get("wasSkipped")
    .and_then(Value::as_bool)
    .unwrap_or(stored_outcome == Some("skipped"));
  let success = o
    .get("success")
    .and_then(Value::as_bool)
    .unwrap_or(stored_outcome == Some("success"));
  let outcome = OutcomeKind::derive(success, was_skipped);

  let time_spent_ms = o.get("timeSpentMs").and_then(as_u64).unwrap_or(0);
  let timestamp = o.get("timestamp").and_then(as_i64).unwrap_or(0);
  let start_time = o
    .get("startTime")
    .and_then(as_i64)
    .unwrap_or_else(|| timestamp.saturating_sub(time_spent_ms as i64));

  Some(OutcomeRecord {
    task_id,
    task_type,
    success: outcome == OutcomeKind::Success,
    outcome,
    time_spent_ms,
    timestamp,
    start_time,
    difficulty_level: o
      .get("difficultyLevel")
      .and_then(Value::as_f64)
      .filter(|l| l.is_finite())
      .unwrap_or(1.0),
    was_skipped,
    session_id: str_field(o, "sessionId").unwrap_or_default(),
    session_duration_ms: o.get("sessionDurationMs").and_then(as_u64).unwrap_or(0),
  })
}
