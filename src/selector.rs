//! Task selection: weighted category draw, uniform type draw, then content generation.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;
use uuid::Uuid;

use crate::config::{CategoryWeight, EngineConfig};
use crate::domain::{TaskCategory, TaskRecord, TaskType, UserProfile};
use crate::generators;
use crate::lexicon::Lexicon;

/// Walk the weight table cumulatively; the first row whose running total exceeds
/// `draw` wins. Falls through to REACTION if the weights sum below `draw`.
pub fn pick_category(weights: &[CategoryWeight], draw: f64) -> TaskCategory {
  let mut cumulative = 0.0;
  for w in weights {
    cumulative += w.weight;
    if draw < cumulative {
      return w.category;
    }
  }
  TaskCategory::Reaction
}

/// Types the selector may draw for a category. Legacy types are never listed.
pub fn types_for(category: TaskCategory) -> &'static [TaskType] {
  use TaskType::*;
  match category {
    TaskCategory::Math => &[MathAddition, MathSubtraction, MathMultiplication, MathSequence],
    TaskCategory::Reaction => &[ReactionColor, ReactionShape, ReactionStream, ReactionColorSwitch],
    TaskCategory::Language => &[LangOddOneOut, LangConnect],
    TaskCategory::Music => &[MusicRhythm, MusicMemory],
    TaskCategory::FreeMind => &[FreeMindBreathe],
  }
}

pub fn pick_type<R: Rng + ?Sized>(category: TaskCategory, rng: &mut R) -> TaskType {
  let types = types_for(category);
  types.choose(rng).copied().unwrap_or(TaskType::ReactionColor)
}

/// Choose the next task for `profile` and generate it at the profile's current level.
pub fn select_and_generate<R: Rng + ?Sized>(
  profile: &UserProfile,
  config: &EngineConfig,
  lexicon: &Lexicon,
  rng: &mut R,
  now_ms: i64,
) -> TaskRecord {
  let category = pick_category(&config.category_weights, rng.gen::<f64>());
  let task_type = pick_type(category, rng);
  let level = profile.level(task_type);

  let generated = generators::generate(task_type, level, lexicon, rng);
  let record = TaskRecord {
    id: Uuid::new_v4().to_string(),
    category,
    task_type,
    difficulty_level: level,
    question: generated.question,
    content: generated.content,
    solution: generated.solution,
    generated_at: now_ms,
  };

  debug!(target: "engine", id = %record.id, %task_type, level, "Generated task");
  record
}
