//! Difficulty adaptation.
//!
//! Two controllers share one entry point, `adapt`:
//!   - flow-zone (arithmetic types): windowed accuracy + average time, integer
//!     steps, clamped to [1, max_level]. Early on the window is short and
//!     increases fire on every qualifying outcome; after calibration the
//!     window widens and increases only happen on stability checkpoints.
//!   - ELO-like (everything else): speed-graded gains scaled by a volatility
//!     that shrinks as per-type confidence grows. Floored at min_level, no ceiling.
//!
//! `adapt` never mutates its input. It returns a new profile plus a Decision
//! describing which branch fired, for logs and analytics.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{EloConfig, EngineConfig, FlowZoneConfig};
use crate::domain::{OutcomeRecord, TaskType, UserProfile};
use crate::util::round2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionLabel {
  IncreaseFast,
  Increase,
  Decrease,
  Maintain,
  IncreaseElo,
  DecreaseElo,
}

impl DecisionLabel {
  pub fn as_str(self) -> &'static str {
    match self {
      DecisionLabel::IncreaseFast => "increase_fast",
      DecisionLabel::Increase => "increase",
      DecisionLabel::Decrease => "decrease",
      DecisionLabel::Maintain => "maintain",
      DecisionLabel::IncreaseElo => "increase_elo",
      DecisionLabel::DecreaseElo => "decrease_elo",
    }
  }
}

/// Direction the level actually moved (a decrease at the floor is `Flat`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
  Up,
  Down,
  Flat,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decision {
  pub label: DecisionLabel,
  pub reason: String,
  pub previous_level: f64,
  pub new_level: f64,
}

impl Decision {
  pub fn trend(&self) -> Trend {
    if self.new_level > self.previous_level {
      Trend::Up
    } else if self.new_level < self.previous_level {
      Trend::Down
    } else {
      Trend::Flat
    }
  }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Adaptation {
  pub profile: UserProfile,
  pub decision: Decision,
}

/// Apply one outcome to a copy of `profile`.
pub fn adapt(profile: &UserProfile, outcome: &OutcomeRecord, config: &EngineConfig) -> Adaptation {
  let mut next = profile.clone();
  next.history.push(outcome.clone());
  next.total_time_ms = next.total_time_ms.saturating_add(outcome.time_spent_ms);

  let task_type = outcome.task_type;
  let decision = if task_type.is_arithmetic() {
    flow_zone(&mut next, task_type, &config.flow)
  } else {
    elo(&mut next, outcome, &config.elo)
  };

  debug!(
    target: "engine",
    %task_type,
    decision = decision.label.as_str(),
    previous_level = decision.previous_level,
    new_level = decision.new_level,
    reason = %decision.reason,
    "Adapted level"
  );

  Adaptation { profile: next, decision }
}

/// Windowed controller. Expects the new outcome to be in `profile.history` already.
fn flow_zone(profile: &mut UserProfile, task_type: TaskType, cfg: &FlowZoneConfig) -> Decision {
  let previous_level = profile.level(task_type);

  let typed: Vec<&OutcomeRecord> = profile.history_for(task_type).collect();
  let solved = typed.len();
  let calibrating = solved < cfg.calibration_tasks;
  let window_size = if calibrating { cfg.early_window } else { cfg.late_window };
  let window = &typed[solved.saturating_sub(window_size)..];

  let window_len = window.len();
  let n = window_len.max(1) as f64;
  let accuracy = window.iter().filter(|h| h.success).count() as f64 / n;
  let avg_ms = window.iter().map(|h| h.time_spent_ms as f64).sum::<f64>() / n;

  let mut level = previous_level;
  let label = if accuracy < cfg.min_accuracy || avg_ms > cfg.flow_max_ms * cfg.slow_factor {
    level -= 1.0;
    DecisionLabel::Decrease
  } else if accuracy >= cfg.boredom_accuracy && avg_ms < cfg.flow_min_ms {
    if calibrating {
      level += 1.0;
      DecisionLabel::IncreaseFast
    } else if cfg.stability_period > 0 && solved % cfg.stability_period == 0 {
      level += 1.0;
      DecisionLabel::Increase
    } else {
      DecisionLabel::Maintain
    }
  } else {
    DecisionLabel::Maintain
  };

  let new_level = level.clamp(1.0, cfg.max_level.max(1.0));
  profile.levels.insert(task_type, new_level);

  Decision {
    label,
    reason: format!("accuracy={accuracy:.2} avg_ms={avg_ms:.0} window={window_len} solved={solved}"),
    previous_level,
    new_level,
  }
}

/// Speed-graded base change before volatility scaling.
pub fn base_change(outcome: &OutcomeRecord) -> f64 {
  let t = outcome.time_spent_ms;
  if outcome.success {
    match t {
      0..=2_999 => 1.0,
      3_000..=4_999 => 0.6,
      5_000..=9_999 => 0.3,
      _ => 0.1,
    }
  } else if outcome.was_skipped {
    // fast skip reads as "too hard", slow skip as boredom
    if t < 1_500 { -0.5 } else { -0.2 }
  } else {
    -0.5
  }
}

fn elo(profile: &mut UserProfile, outcome: &OutcomeRecord, cfg: &EloConfig) -> Decision {
  let task_type = outcome.task_type;
  let previous_level = profile.level(task_type);
  let confidence = profile.confidence_or(task_type, cfg.default_confidence).min(1.0);

  let volatility = 1.0 + (1.0 - confidence) * 2.0;
  let base = base_change(outcome);
  let change = base * volatility;
  let new_level = round2((previous_level + change).max(cfg.min_level));

  let gain = if outcome.was_skipped { cfg.skip_confidence_gain } else { cfg.decisive_confidence_gain };
  profile.levels.insert(task_type, new_level);
  profile.confidence.insert(task_type, (confidence + gain).min(1.0));

  let label = if change > 0.0 {
    DecisionLabel::IncreaseElo
  } else if change < 0.0 {
    DecisionLabel::DecreaseElo
  } else {
    DecisionLabel::Maintain
  };

  Decision {
    label,
    reason: format!("base={base:.2} volatility={volatility:.2} confidence={confidence:.2}"),
    previous_level,
    new_level,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::OutcomeKind;
  use rstest::rstest;

  fn outcome(task_type: TaskType, success: bool, skipped: bool, ms: u64) -> OutcomeRecord {
    OutcomeRecord {
      task_id: "t".into(),
      task_type,
      success: success && !skipped,
      outcome: OutcomeKind::derive(success, skipped),
      time_spent_ms: ms,
      timestamp: 0,
      start_time: 0,
      difficulty_level: 1.0,
      was_skipped: skipped,
      session_id: "s".into(),
      session_duration_ms: 0,
    }
  }

  /// Profile whose ADDITION history holds `prior` outcomes.
  fn with_history(level: f64, prior: Vec<OutcomeRecord>) -> UserProfile {
    let mut p = UserProfile::new("u");
    p.levels.insert(TaskType::MathAddition, level);
    p.history = prior;
    p
  }

  fn fast_wins(n: usize) -> Vec<OutcomeRecord> {
    (0..n).map(|_| outcome(TaskType::MathAddition, true, false, 2_000)).collect()
  }

  #[test]
  fn adapt_leaves_input_untouched_and_books_time() {
    let cfg = EngineConfig::default();
    let p = UserProfile::new("u");
    let o = outcome(TaskType::ReactionColor, true, false, 2_000);
    let before = p.clone();
    let a = adapt(&p, &o, &cfg);
    assert_eq!(p, before);
    assert_eq!(a.profile.history.len(), 1);
    assert_eq!(a.profile.total_time_ms, 2_000);
  }

  #[test]
  fn elo_success_with_low_confidence() {
    let cfg = EngineConfig::default();
    let p = UserProfile::new("u");
    let a = adapt(&p, &outcome(TaskType::ReactionColor, true, false, 2_000), &cfg);
    // volatility = 1 + 0.9 * 2 = 2.8
    assert_eq!(a.profile.level(TaskType::ReactionColor), 3.8);
    assert!((a.profile.confidence[&TaskType::ReactionColor] - 0.15).abs() < 1e-9);
    assert_eq!(a.decision.label, DecisionLabel::IncreaseElo);
    assert_eq!(a.decision.trend(), Trend::Up);
  }

  #[rstest]
  #[case(true, false, 2_999, 1.0)]
  #[case(true, false, 3_000, 0.6)]
  #[case(true, false, 9_999, 0.3)]
  #[case(true, false, 10_000, 0.1)]
  #[case(false, true, 1_499, -0.5)]
  #[case(false, true, 1_500, -0.2)]
  #[case(true, true, 200, -0.5)]
  #[case(false, false, 800, -0.5)]
  fn elo_base_changes(#[case] success: bool, #[case] skipped: bool, #[case] ms: u64, #[case] expected: f64) {
    assert_eq!(base_change(&outcome(TaskType::MusicRhythm, success, skipped, ms)), expected);
  }

  #[test]
  fn elo_floors_at_one_and_skips_gain_less_confidence() {
    let cfg = EngineConfig::default();
    let mut p = UserProfile::new("u");
    p.levels.insert(TaskType::MusicMemory, 1.5);
    p.confidence.insert(TaskType::MusicMemory, 0.5);
    let a = adapt(&p, &outcome(TaskType::MusicMemory, false, true, 500), &cfg);
    // 1.5 - 0.5 * 2.0 = 0.5 -> floored
    assert_eq!(a.profile.level(TaskType::MusicMemory), 1.0);
    assert!((a.profile.confidence[&TaskType::MusicMemory] - 0.51).abs() < 1e-9);
    assert_eq!(a.decision.label, DecisionLabel::DecreaseElo);
  }

  #[test]
  fn elo_has_no_ceiling_and_rounds_to_cents() {
    let cfg = EngineConfig::default();
    let mut p = UserProfile::new("u");
    p.levels.insert(TaskType::MathSequence, 42.0);
    p.confidence.insert(TaskType::MathSequence, 1.0);
    let a = adapt(&p, &outcome(TaskType::MathSequence, true, false, 4_000), &cfg);
    assert_eq!(a.profile.level(TaskType::MathSequence), 42.6);
    assert_eq!(a.profile.confidence[&TaskType::MathSequence], 1.0);

    p.confidence.insert(TaskType::MathSequence, 0.33);
    let a = adapt(&p, &outcome(TaskType::MathSequence, true, false, 6_000), &cfg);
    // 0.3 * 2.34 = 0.702
    assert_eq!(a.profile.level(TaskType::MathSequence), 42.7);
  }

  #[test]
  fn math_sequence_uses_elo_not_flow_zone() {
    let cfg = EngineConfig::default();
    let p = UserProfile::new("u");
    let a = adapt(&p, &outcome(TaskType::MathSequence, true, false, 2_000), &cfg);
    assert_eq!(a.decision.label, DecisionLabel::IncreaseElo);
  }

  #[test]
  fn flow_zone_fast_track_during_calibration() {
    let cfg = EngineConfig::default();
    let p = with_history(2.0, fast_wins(3));
    let a = adapt(&p, &outcome(TaskType::MathAddition, true, false, 2_000), &cfg);
    assert_eq!(a.decision.label, DecisionLabel::IncreaseFast);
    assert_eq!(a.profile.level(TaskType::MathAddition), 3.0);
  }

  #[test]
  fn flow_zone_holds_between_checkpoints_after_calibration() {
    let cfg = EngineConfig::default();
    // 30 prior + new = 31 solved
    let p = with_history(5.0, fast_wins(30));
    let a = adapt(&p, &outcome(TaskType::MathAddition, true, false, 2_000), &cfg);
    assert_eq!(a.decision.label, DecisionLabel::Maintain);
    assert_eq!(a.profile.level(TaskType::MathAddition), 5.0);
    assert_eq!(a.decision.trend(), Trend::Flat);
  }

  #[rstest]
  #[case(44, 5.0, 6.0)]
  #[case(29, 5.0, 6.0)]
  #[case(44, 10.0, 10.0)]
  fn flow_zone_increases_on_checkpoint(#[case] prior: usize, #[case] level: f64, #[case] expected: f64) {
    let cfg = EngineConfig::default();
    let p = with_history(level, fast_wins(prior));
    let a = adapt(&p, &outcome(TaskType::MathAddition, true, false, 2_000), &cfg);
    assert_eq!(a.decision.label, DecisionLabel::Increase);
    assert_eq!(a.profile.level(TaskType::MathAddition), expected);
  }

  /// `filler` old wins, then 7 fails and 7 wins; the new outcome is one more win.
  /// The last 8 entries are all wins, the last 15 hold 7 fails.
  #[rstest]
  #[case(14, DecisionLabel::IncreaseFast, 6.0)]
  #[case(15, DecisionLabel::Decrease, 4.0)]
  fn flow_zone_window_widens_after_calibration(
    #[case] filler: usize,
    #[case] label: DecisionLabel,
    #[case] expected: f64,
  ) {
    let cfg = EngineConfig::default();
    let mut prior = fast_wins(filler);
    prior.extend((0..7).map(|_| outcome(TaskType::MathAddition, false, false, 2_000)));
    prior.extend(fast_wins(7));
    let p = with_history(5.0, prior);
    let a = adapt(&p, &outcome(TaskType::MathAddition, true, false, 2_000), &cfg);
    assert_eq!(a.decision.label, label);
    assert_eq!(a.profile.level(TaskType::MathAddition), expected);
    let solved = filler + 15;
    let window = if solved < 30 { 8 } else { 15 };
    assert!(a.decision.reason.contains(&format!("window={window} solved={solved}")), "{}", a.decision.reason);
  }

  #[test]
  fn flow_zone_decreases_on_low_accuracy_regardless_of_speed() {
    let cfg = EngineConfig::default();
    // window of 8: 3 wins + 5 fails (new outcome is a fail) -> accuracy 0.375
    let mut prior = fast_wins(3);
    prior.extend((0..4).map(|_| outcome(TaskType::MathAddition, false, false, 1_000)));
    let p = with_history(4.0, prior);
    let a = adapt(&p, &outcome(TaskType::MathAddition, false, false, 1_000), &cfg);
    assert_eq!(a.decision.label, DecisionLabel::Decrease);
    assert_eq!(a.profile.level(TaskType::MathAddition), 3.0);
    assert!(a.decision.reason.contains("window=8 solved=8"));
  }

  #[test]
  fn flow_zone_decrease_is_floored_at_one() {
    let cfg = EngineConfig::default();
    let p = with_history(1.0, Vec::new());
    let a = adapt(&p, &outcome(TaskType::MathAddition, false, false, 3_000), &cfg);
    assert_eq!(a.decision.label, DecisionLabel::Decrease);
    assert_eq!(a.profile.level(TaskType::MathAddition), 1.0);
    assert_eq!(a.decision.trend(), Trend::Flat);
  }

  #[test]
  fn flow_zone_decreases_when_too_slow() {
    let cfg = EngineConfig::default();
    let p = with_history(3.0, Vec::new());
    let a = adapt(&p, &outcome(TaskType::MathAddition, true, false, 25_000), &cfg);
    assert_eq!(a.decision.label, DecisionLabel::Decrease);
  }

  #[test]
  fn flow_zone_maintains_inside_the_zone() {
    let cfg = EngineConfig::default();
    let p = with_history(3.0, Vec::new());
    let a = adapt(&p, &outcome(TaskType::MathAddition, true, false, 12_000), &cfg);
    assert_eq!(a.decision.label, DecisionLabel::Maintain);
    assert_eq!(a.profile.level(TaskType::MathAddition), 3.0);
  }

  #[test]
  fn flow_zone_only_reads_its_own_type() {
    let cfg = EngineConfig::default();
    // plenty of failures on another type must not drag ADDITION down
    let prior: Vec<_> = (0..10).map(|_| outcome(TaskType::MathSubtraction, false, false, 30_000)).collect();
    let p = with_history(3.0, prior);
    let a = adapt(&p, &outcome(TaskType::MathAddition, true, false, 2_000), &cfg);
    assert_eq!(a.decision.label, DecisionLabel::IncreaseFast);
  }
}
