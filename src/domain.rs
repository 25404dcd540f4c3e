//! Domain models used by the engine: task taxonomy, generated task records,
//! outcome records and the per-user adaptation profile.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::lexicon::RelationKind;

/// Coarse grouping of task types. Drives both the weighted draw and the
/// choice of adaptation strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskCategory {
  Math,
  Language,
  Reaction,
  Music,
  FreeMind,
}

/// Closed set of task kinds. Some are legacy (never drawn by the selector)
/// but still have to round-trip through persisted profiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
  MathAddition,
  MathSubtraction,
  MathMultiplication,
  MathStream,
  MathSequence,
  LangSynonym,
  LangRhyme,
  LangSentence,
  LangOddOneOut,
  LangConnect,
  ReactionColor,
  ReactionShape,
  ReactionStream,
  ReactionColorSwitch,
  MusicRhythm,
  MusicMemory,
  FreeMindBreathe,
}

impl TaskType {
  pub const ALL: [TaskType; 17] = [
    TaskType::MathAddition,
    TaskType::MathSubtraction,
    TaskType::MathMultiplication,
    TaskType::MathStream,
    TaskType::MathSequence,
    TaskType::LangSynonym,
    TaskType::LangRhyme,
    TaskType::LangSentence,
    TaskType::LangOddOneOut,
    TaskType::LangConnect,
    TaskType::ReactionColor,
    TaskType::ReactionShape,
    TaskType::ReactionStream,
    TaskType::ReactionColorSwitch,
    TaskType::MusicRhythm,
    TaskType::MusicMemory,
    TaskType::FreeMindBreathe,
  ];

  pub fn category(self) -> TaskCategory {
    use TaskType::*;
    match self {
      MathAddition | MathSubtraction | MathMultiplication | MathStream | MathSequence => TaskCategory::Math,
      LangSynonym | LangRhyme | LangSentence | LangOddOneOut | LangConnect => TaskCategory::Language,
      ReactionColor | ReactionShape | ReactionStream | ReactionColorSwitch => TaskCategory::Reaction,
      MusicRhythm | MusicMemory => TaskCategory::Music,
      FreeMindBreathe => TaskCategory::FreeMind,
    }
  }

  /// Types whose level encodes digit capacity and adapt through the flow-zone controller.
  pub fn is_arithmetic(self) -> bool {
    matches!(self, TaskType::MathAddition | TaskType::MathSubtraction | TaskType::MathMultiplication)
  }

  /// Starting level for a brand-new profile.
  pub fn default_level(self) -> f64 {
    if self.is_arithmetic() { 2.0 } else { 1.0 }
  }

  pub fn as_str(self) -> &'static str {
    use TaskType::*;
    match self {
      MathAddition => "MATH_ADDITION",
      MathSubtraction => "MATH_SUBTRACTION",
      MathMultiplication => "MATH_MULTIPLICATION",
      MathStream => "MATH_STREAM",
      MathSequence => "MATH_SEQUENCE",
      LangSynonym => "LANG_SYNONYM",
      LangRhyme => "LANG_RHYME",
      LangSentence => "LANG_SENTENCE",
      LangOddOneOut => "LANG_ODD_ONE_OUT",
      LangConnect => "LANG_CONNECT",
      ReactionColor => "REACTION_COLOR",
      ReactionShape => "REACTION_SHAPE",
      ReactionStream => "REACTION_STREAM",
      ReactionColorSwitch => "REACTION_COLOR_SWITCH",
      MusicRhythm => "MUSIC_RHYTHM",
      MusicMemory => "MUSIC_MEMORY",
      FreeMindBreathe => "FREE_MIND_BREATHE",
    }
  }

  /// Inverse of `as_str`.
  pub fn from_name(name: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|t| t.as_str() == name)
  }
}

impl fmt::Display for TaskType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// -------- Task payloads --------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
  Add,
  Subtract,
  Multiply,
}

impl Operator {
  pub fn symbol(self) -> &'static str {
    match self {
      Operator::Add => "+",
      Operator::Subtract => "-",
      Operator::Multiply => "×",
    }
  }

  pub fn apply(self, a: i64, b: i64) -> i64 {
    match self {
      Operator::Add => a + b,
      Operator::Subtract => a - b,
      Operator::Multiply => a * b,
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequencePattern {
  Linear,
  Progressive,
  Geometric,
  Fibonacci,
  Alternating,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeMode {
  Emoji,
  Rotation,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapePair {
  pub base: String,
  pub odd: String,
}

/// Difficulty bucket shared by the reaction parameter tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
  Easy,
  Medium,
  Hard,
}

impl Tier {
  /// easy below 4, medium 4..8, hard from 8.
  pub fn from_level(level: f64) -> Self {
    if level >= 8.0 {
      Tier::Hard
    } else if level >= 4.0 {
      Tier::Medium
    } else {
      Tier::Easy
    }
  }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSwitchParams {
  pub tier: Tier,
  pub num_trials: u32,
  pub distractor_step_min: u32,
  pub distractor_step_max: u32,
  pub color_change_speed_ms: u32,
  pub target_window_ms: u32,
  pub distractors: Vec<String>,
  pub target_color_class: String,
  pub target_color_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamParams {
  pub tier: Tier,
  pub target_emoji: String,
  pub distractors: Vec<String>,
  pub num_target_events: u32,
  pub distractor_ratio: u32,
  pub min_interval_ms: u32,
  pub max_interval_ms: u32,
  pub display_duration_ms: u32,
  pub emoji_size: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instrument {
  Kick,
  Snare,
  Hihat,
  Tom,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beat {
  pub time_offset_ms: u32,
  pub instrument: Instrument,
}

/// Type-specific task payload. One variant per content shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum TaskContent {
  Arithmetic { a: i64, b: i64, operator: Operator },
  Sequence { sequence: Vec<i64>, options: Vec<i64>, correct_value: i64, pattern: SequencePattern },
  ReactionColor { wait_min_ms: f64, wait_max_ms: f64 },
  ReactionShape { grid_size: u32, odd_index: u32, mode: ShapeMode, items: ShapePair },
  ColorSwitch(ColorSwitchParams),
  ReactionStream(StreamParams),
  Rhythm { pattern: Vec<Beat>, total_duration_ms: u32 },
  Memory { sequence: Vec<u8>, playback_speed_ms: u32, active_pads: u8 },
  OddOneOut { options: Vec<String>, odd_index: usize, hint: String },
  Connect { mode: RelationKind, target: String, options: Vec<String>, correct_index: usize, answer: String },
  // Legacy payloads (static, never level-scaled)
  MathStream { start_value: i64, default_speed_ms: u32, default_ops: Vec<String> },
  Synonym { word: String, synonyms: Vec<String>, hint: String },
  Rhyme { word: String, rhymes: Vec<String>, hint: String },
  Sentence { word1: String, word2: String, example_sentence: String },
  Placeholder,
}

/// Canonical answer. `None` for pure-reaction tasks judged by timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Solution {
  Number(i64),
  Index(usize),
  Beats(Vec<Beat>),
  Pads(Vec<u8>),
  None,
}

/// Output of a content generator before the selector stamps id/time on it.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedContent {
  pub question: String,
  pub content: TaskContent,
  pub solution: Solution,
}

/// One generated task instance. Immutable after creation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
  pub id: String,
  pub category: TaskCategory,
  #[serde(rename = "type")]
  pub task_type: TaskType,
  pub difficulty_level: f64,
  pub question: String,
  pub content: TaskContent,
  pub solution: Solution,
  pub generated_at: i64,
}

// -------- Outcomes --------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
  Success,
  Failed,
  Skipped,
}

impl OutcomeKind {
  /// A skip dominates; otherwise success/failed follow the success flag.
  pub fn derive(success: bool, was_skipped: bool) -> Self {
    if was_skipped {
      OutcomeKind::Skipped
    } else if success {
      OutcomeKind::Success
    } else {
      OutcomeKind::Failed
    }
  }
}

/// Result of one interaction with a task. Appended to history, never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeRecord {
  pub task_id: String,
  #[serde(rename = "type")]
  pub task_type: TaskType,
  pub success: bool,
  pub outcome: OutcomeKind,
  pub time_spent_ms: u64,
  pub timestamp: i64,
  pub start_time: i64,
  pub difficulty_level: f64,
  pub was_skipped: bool,
  pub session_id: String,
  pub session_duration_ms: u64,
}

// -------- Profile --------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakData {
  pub correct: u32,
  pub wrong: u32,
}

/// Durable adaptation state of one user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
  pub user_id: String,
  pub levels: BTreeMap<TaskType, f64>,
  #[serde(default)]
  pub confidence: BTreeMap<TaskType, f64>,
  #[serde(default)]
  pub streaks: BTreeMap<TaskType, StreakData>,
  #[serde(default)]
  pub history: Vec<OutcomeRecord>,
  #[serde(default)]
  pub total_time_ms: u64,
}

impl UserProfile {
  /// First-launch profile with every type at its default level.
  pub fn new(user_id: impl Into<String>) -> Self {
    Self {
      user_id: user_id.into(),
      levels: default_levels(),
      confidence: BTreeMap::new(),
      streaks: BTreeMap::new(),
      history: Vec::new(),
      total_time_ms: 0,
    }
  }

  pub fn fresh() -> Self {
    Self::new(Uuid::new_v4().to_string())
  }

  /// Current level, 1 when missing or unusable.
  pub fn level(&self, task_type: TaskType) -> f64 {
    match self.levels.get(&task_type) {
      Some(l) if l.is_finite() && *l > 0.0 => *l,
      _ => 1.0,
    }
  }

  /// Current confidence, `fallback` when missing or unusable.
  pub fn confidence_or(&self, task_type: TaskType, fallback: f64) -> f64 {
    match self.confidence.get(&task_type) {
      Some(c) if c.is_finite() && *c > 0.0 => *c,
      _ => fallback,
    }
  }

  /// Outcomes of one type, in insertion order.
  pub fn history_for(&self, task_type: TaskType) -> impl Iterator<Item = &OutcomeRecord> + '_ {
    self.history.iter().filter(move |h| h.task_type == task_type)
  }
}

pub fn default_levels() -> BTreeMap<TaskType, f64> {
  TaskType::ALL.iter().map(|t| (*t, t.default_level())).collect()
}
