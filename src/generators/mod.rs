//! Content generators: pure functions of (task type, level) → question, payload, solution.
//!
//! Every generator takes the caller's RNG so tests can seed it. Only the
//! language generators can fail (empty data pool); `generate` catches that and
//! substitutes a static payload so task generation never fails outright.

use rand::Rng;
use thiserror::Error;
use tracing::warn;

use crate::domain::{GeneratedContent, Operator, TaskType};
use crate::lexicon::{Lexicon, RelationKind};

pub mod arithmetic;
pub mod fallback;
pub mod language;
pub mod music;
pub mod reaction;
pub mod sequence;

#[derive(Debug, Error, PartialEq)]
pub enum GenerationError {
  #[error("no word categories available for tier {0}")]
  EmptyCategoryPool(u8),

  #[error("no {0:?} relations available")]
  EmptyRelationPool(RelationKind),

  #[error("relation references unknown word {0}")]
  DanglingWord(String),
}

/// Produce content for `task_type` at `level`.
pub fn generate<R: Rng + ?Sized>(
  task_type: TaskType,
  level: f64,
  lexicon: &Lexicon,
  rng: &mut R,
) -> GeneratedContent {
  use TaskType::*;
  match task_type {
    MathAddition => arithmetic::generate(Operator::Add, level, rng),
    MathSubtraction => arithmetic::generate(Operator::Subtract, level, rng),
    MathMultiplication => arithmetic::generate(Operator::Multiply, level, rng),
    MathSequence => sequence::generate(level, rng),
    MathStream => fallback::math_stream(),

    ReactionColor => reaction::color(level),
    ReactionShape => reaction::shape(level, rng),
    ReactionColorSwitch => reaction::color_switch(level),
    ReactionStream => reaction::stream(level, rng),

    MusicRhythm => music::rhythm(level, rng),
    MusicMemory => music::memory(level, rng),

    LangOddOneOut | LangConnect => {
      let result = if task_type == LangConnect {
        language::connect(level, lexicon, rng)
      } else {
        language::odd_one_out(level, lexicon, rng)
      };
      result.unwrap_or_else(|e| {
        warn!(target: "engine", %task_type, level, error = %e, "Language generation failed; serving static payload");
        fallback::language(task_type)
      })
    }
    LangSynonym => fallback::synonym(),
    LangRhyme => fallback::rhyme(),
    LangSentence => fallback::sentence(),

    FreeMindBreathe => fallback::placeholder(),
  }
}
