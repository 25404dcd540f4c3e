//! Word tasks built from the lexicon: odd-one-out and connect (synonym/antonym).

use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;

use super::GenerationError;
use crate::domain::{GeneratedContent, Solution, TaskContent};
use crate::lexicon::{Lexicon, RelationKind, WordCategory, WordId};

pub fn odd_one_out_tier(level: f64) -> u8 {
  if level > 7.0 {
    3
  } else if level > 3.0 {
    2
  } else {
    1
  }
}

pub fn connect_tier(level: f64) -> u8 {
  if level > 8.0 {
    3
  } else if level > 3.0 {
    2
  } else {
    1
  }
}

/// N-1 words from one category plus one word from a different category.
pub fn odd_one_out<R: Rng + ?Sized>(
  level: f64,
  lexicon: &Lexicon,
  rng: &mut R,
) -> Result<GeneratedContent, GenerationError> {
  let tier = odd_one_out_tier(level);
  let num_options = if level > 2.0 { 4 } else { 3 };

  let base: &WordCategory = lexicon
    .categories()
    .iter()
    .filter(|c| c.tier == tier)
    .choose(rng)
    .ok_or(GenerationError::EmptyCategoryPool(tier))?;

  // Some words sit in two categories (Orange is a fruit and a colour); never
  // let one of those be the odd word.
  let odd_category: &WordCategory = lexicon
    .categories()
    .iter()
    .filter(|c| c.key != base.key && c.words.iter().any(|w| !base.contains(w)))
    .choose(rng)
    .ok_or(GenerationError::EmptyCategoryPool(tier))?;
  let odd_word: &str = odd_category
    .words
    .iter()
    .copied()
    .filter(|w| !base.contains(w))
    .choose(rng)
    .ok_or(GenerationError::EmptyCategoryPool(tier))?;

  let mut options: Vec<String> =
    base.words.choose_multiple(rng, num_options - 1).map(|w| w.to_string()).collect();
  options.push(odd_word.to_string());
  options.shuffle(rng);

  let odd_index = options.iter().position(|w| w == odd_word).unwrap_or_default();

  Ok(GeneratedContent {
    question: "Was passt nicht?".into(),
    content: TaskContent::OddOneOut {
      options,
      odd_index,
      hint: format!("Eines ist {}, die anderen sind {}.", odd_category.key, base.key),
    },
    solution: Solution::Index(odd_index),
  })
}

/// Pick the word related to a target word among same-part-of-speech distractors.
pub fn connect<R: Rng + ?Sized>(
  level: f64,
  lexicon: &Lexicon,
  rng: &mut R,
) -> Result<GeneratedContent, GenerationError> {
  let mode = if level <= 2.0 || rng.gen_bool(0.5) { RelationKind::Antonym } else { RelationKind::Synonym };
  let target_tier = connect_tier(level);

  let near_tier = lexicon
    .relations(mode)
    .filter(|r| {
      lexicon
        .word(r.target)
        .is_some_and(|w| (i16::from(w.tier) - i16::from(target_tier)).abs() <= 1)
    })
    .choose(rng);
  let relation = match near_tier {
    Some(r) => r,
    None => lexicon.relations(mode).choose(rng).ok_or(GenerationError::EmptyRelationPool(mode))?,
  };

  let lookup = |id: WordId| lexicon.word(id).ok_or_else(|| GenerationError::DanglingWord(id.to_string()));
  let target = lookup(relation.target)?;
  let answer = lookup(relation.partner)?;

  // Words that would also be a correct answer are not valid distractors.
  let also_correct: Vec<WordId> = lexicon.partners(target.id, mode).collect();
  let num_options = if level > 4.0 { 4 } else { 3 };

  let mut options: Vec<String> = lexicon
    .words()
    .iter()
    .filter(|w| w.id != target.id && w.id != answer.id && w.pos == answer.pos && !also_correct.contains(&w.id))
    .choose_multiple(rng, num_options - 1)
    .into_iter()
    .map(|w| w.text.to_string())
    .collect();
  options.push(answer.text.to_string());
  options.shuffle(rng);

  let correct_index = options.iter().position(|w| w == answer.text).unwrap_or_default();

  Ok(GeneratedContent {
    question: "Verbinde Wörter".into(),
    content: TaskContent::Connect {
      mode,
      target: target.text.to_string(),
      options,
      correct_index,
      answer: answer.text.to_string(),
    },
    solution: Solution::Index(correct_index),
  })
}

/// Accept a sentence that uses both words (case-insensitive) and is more than 8 characters long.
pub fn validate_sentence(word1: &str, word2: &str, sentence: &str) -> bool {
  let lowered = sentence.to_lowercase();
  lowered.contains(&word1.to_lowercase()) && lowered.contains(&word2.to_lowercase()) && sentence.chars().count() > 8
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use std::collections::HashMap;

  #[test]
  fn odd_one_out_has_exactly_one_outsider() {
    let lex = Lexicon::builtin();
    let mut rng = StdRng::seed_from_u64(31);
    for level in [1.0, 2.0, 3.0, 5.0, 9.0] {
      for _ in 0..200 {
        let out = odd_one_out(level, &lex, &mut rng).unwrap();
        let TaskContent::OddOneOut { options, odd_index, hint } = &out.content else { panic!() };
        assert_eq!(options.len(), if level > 2.0 { 4 } else { 3 });

        let base_key = hint.rsplit("sind ").next().unwrap().trim_end_matches('.');
        let base = lex.categories().iter().find(|c| c.key == base_key).unwrap();
        assert_eq!(base.tier, odd_one_out_tier(level));
        for (i, w) in options.iter().enumerate() {
          assert_eq!(i != *odd_index, base.contains(w), "{w} in {options:?}");
        }
        assert_eq!(out.solution, Solution::Index(*odd_index));
      }
    }
  }

  #[test]
  fn odd_category_is_drawn_uniformly_regardless_of_size() {
    let lex = Lexicon::builtin();
    let mut rng = StdRng::seed_from_u64(33);
    let draws = 14_000;
    let mut counts: HashMap<String, usize> = HashMap::new();
    for _ in 0..draws {
      let out = odd_one_out(1.0, &lex, &mut rng).unwrap();
      let TaskContent::OddOneOut { hint, .. } = &out.content else { panic!() };
      let odd_key = hint.trim_start_matches("Eines ist ").split(',').next().unwrap();
      *counts.entry(odd_key.to_string()).or_default() += 1;
    }
    // Tier-2/3 categories are never the base at level 1: each is one of 14 candidates.
    let expected = 1.0 / (lex.categories().len() - 1) as f64;
    for c in lex.categories().iter().filter(|c| c.tier > 1) {
      let freq = counts.get(c.key).copied().unwrap_or_default() as f64 / draws as f64;
      assert!((freq - expected).abs() < 0.015, "{}: {freq}", c.key);
    }
  }

  #[test]
  fn connect_distractors_share_pos_and_exclude_target_and_answer() {
    let lex = Lexicon::builtin();
    let mut rng = StdRng::seed_from_u64(32);
    for level in [1.0, 3.0, 5.0, 9.0] {
      for _ in 0..300 {
        let out = connect(level, &lex, &mut rng).unwrap();
        let TaskContent::Connect { mode, target, options, correct_index, answer } = &out.content else { panic!() };
        if level <= 2.0 {
          assert_eq!(*mode, RelationKind::Antonym);
        }
        assert_eq!(options.len(), if level > 4.0 { 4 } else { 3 });
        assert_eq!(&options[*correct_index], answer);
        assert!(!options.contains(target));

        let target_id = lex.lookup(target).unwrap().id;
        let answer_pos = lex.lookup(answer).unwrap().pos;
        assert!(lex.partners(target_id, *mode).any(|p| lex.word(p).unwrap().text == answer));
        for (i, w) in options.iter().enumerate().filter(|(i, _)| i != correct_index) {
          assert_ne!(w, answer, "distractor {i}");
          assert_eq!(lex.lookup(w).unwrap().pos, answer_pos);
        }
      }
    }
  }

  #[test]
  fn tier_mappings() {
    assert_eq!((odd_one_out_tier(3.0), odd_one_out_tier(3.5), odd_one_out_tier(7.5)), (1, 2, 3));
    assert_eq!((connect_tier(3.0), connect_tier(8.0), connect_tier(8.5)), (1, 2, 3));
  }

  #[test]
  fn sentence_validation() {
    assert!(validate_sentence("Sun", "Ice", "The sun melted the ice."));
    assert!(validate_sentence("sun", "ICE", "SUN and ice"));
    assert!(!validate_sentence("Sun", "Ice", "The sun is hot."));
    assert!(!validate_sentence("Sun", "Ice", "sun ice"));
  }
}
