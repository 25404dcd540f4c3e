//! Number sequences: five terms from a pattern family, the last one withheld.
//! Harder families unlock at level 4 and level 8.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{GeneratedContent, SequencePattern, Solution, TaskContent};

const TERMS: usize = 5;
const OPTION_COUNT: usize = 4;

pub fn pick_pattern<R: Rng + ?Sized>(level: f64, rng: &mut R) -> SequencePattern {
  if level >= 8.0 {
    let r: f64 = rng.gen();
    if r > 0.6 {
      SequencePattern::Fibonacci
    } else if r > 0.3 {
      SequencePattern::Geometric
    } else {
      SequencePattern::Alternating
    }
  } else if level >= 4.0 {
    if rng.gen::<f64>() > 0.5 {
      SequencePattern::Progressive
    } else {
      SequencePattern::Alternating
    }
  } else {
    SequencePattern::Linear
  }
}

/// Cap on the level-driven part of a linear step.
const MAX_STEP_BONUS: i64 = 100;

/// Build all five terms for `pattern`.
pub fn build_terms<R: Rng + ?Sized>(pattern: SequencePattern, level: f64, rng: &mut R) -> Vec<i64> {
  let mut current: i64 = if level > 5.0 { rng.gen_range(5..=24) } else { rng.gen_range(1..=10) };
  let mut terms = vec![current];

  match pattern {
    SequencePattern::Linear => {
      let step = rng.gen_range(1..=5) + ((level.max(0.0) / 3.0).floor() as i64).min(MAX_STEP_BONUS);
      let descending = rng.gen::<f64>() > 0.8 && current > 20;
      for _ in 1..TERMS {
        current = if descending { current - step } else { current + step };
        terms.push(current);
      }
    }
    SequencePattern::Progressive => {
      let start_step = rng.gen_range(1..=2);
      let increment = rng.gen_range(1..=2);
      for i in 0..(TERMS as i64 - 1) {
        current += start_step + i * increment;
        terms.push(current);
      }
    }
    SequencePattern::Geometric => {
      let factor = if rng.gen::<f64>() > 0.7 { 3 } else { 2 };
      current = rng.gen_range(1..=3);
      terms = vec![current];
      for _ in 1..TERMS {
        current *= factor;
        terms.push(current);
      }
    }
    SequencePattern::Fibonacci => {
      let mut a = rng.gen_range(1..=5);
      let mut b = rng.gen_range(1..=5);
      terms = vec![a, b];
      while terms.len() < TERMS {
        let next = a + b;
        terms.push(next);
        a = b;
        b = next;
      }
    }
    SequencePattern::Alternating => {
      let up = rng.gen_range(2..=4);
      let down = rng.gen_range(1..=2);
      for i in 0..(TERMS - 1) {
        if i % 2 == 0 { current += up } else { current -= down }
        terms.push(current);
      }
    }
  }
  terms
}

/// Three distinct distractors near `solution` plus the solution, shuffled.
pub fn build_options<R: Rng + ?Sized>(solution: i64, rng: &mut R) -> Vec<i64> {
  let mut options = vec![solution];
  while options.len() < OPTION_COUNT {
    let offset = rng.gen_range(1..=5);
    let r: f64 = rng.gen();
    let fake = if r < 0.3 {
      solution + offset
    } else if r < 0.6 {
      solution - offset
    } else if r < 0.8 {
      solution + 10
    } else {
      solution - 10
    };
    if !options.contains(&fake) {
      options.push(fake);
    }
  }
  options.shuffle(rng);
  options
}

pub fn generate<R: Rng + ?Sized>(level: f64, rng: &mut R) -> GeneratedContent {
  let pattern = pick_pattern(level, rng);
  let mut sequence = build_terms(pattern, level, rng);
  let solution = sequence.pop().unwrap_or_default();
  let options = build_options(solution, rng);

  GeneratedContent {
    question: "Setze die Reihe fort".into(),
    content: TaskContent::Sequence { sequence, options, correct_value: solution, pattern },
    solution: Solution::Number(solution),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use std::collections::HashSet;

  /// Check that `full` (shown terms + solution) obeys its family's rule.
  fn continues_pattern(pattern: SequencePattern, full: &[i64]) -> bool {
    let diffs: Vec<i64> = full.windows(2).map(|w| w[1] - w[0]).collect();
    match pattern {
      SequencePattern::Linear => diffs.windows(2).all(|d| d[0] == d[1]),
      SequencePattern::Progressive => {
        let second: Vec<i64> = diffs.windows(2).map(|d| d[1] - d[0]).collect();
        second.windows(2).all(|d| d[0] == d[1]) && second[0] > 0
      }
      SequencePattern::Geometric => {
        let factor = full[1] / full[0];
        (factor == 2 || factor == 3) && full.windows(2).all(|w| w[1] == w[0] * factor)
      }
      SequencePattern::Fibonacci => full.windows(3).all(|w| w[2] == w[0] + w[1]),
      SequencePattern::Alternating => {
        diffs.iter().step_by(2).all(|d| *d == diffs[0] && *d > 0)
          && diffs.iter().skip(1).step_by(2).all(|d| *d == diffs[1] && *d < 0)
      }
    }
  }

  #[test]
  fn options_are_four_distinct_values_including_the_answer() {
    let mut rng = StdRng::seed_from_u64(3);
    for level in 1..=12 {
      for _ in 0..300 {
        let out = generate(level as f64, &mut rng);
        let TaskContent::Sequence { sequence, options, correct_value, .. } = &out.content else {
          panic!("unexpected payload");
        };
        assert_eq!(sequence.len(), TERMS - 1);
        assert_eq!(options.len(), 4);
        let distinct: HashSet<_> = options.iter().collect();
        assert_eq!(distinct.len(), 4);
        assert!(options.contains(correct_value));
        assert_eq!(out.solution, Solution::Number(*correct_value));
      }
    }
  }

  #[test]
  fn solution_continues_the_chosen_family() {
    let mut rng = StdRng::seed_from_u64(4);
    for level in [1.0, 3.0, 4.0, 6.0, 8.0, 10.0] {
      for _ in 0..500 {
        let out = generate(level, &mut rng);
        let TaskContent::Sequence { sequence, correct_value, pattern, .. } = out.content else {
          panic!("unexpected payload");
        };
        let mut full = sequence.clone();
        full.push(correct_value);
        assert!(continues_pattern(pattern, &full), "{pattern:?}: {full:?}");
      }
    }
  }

  #[test]
  fn families_unlock_by_level() {
    let mut rng = StdRng::seed_from_u64(8);
    for _ in 0..200 {
      assert_eq!(pick_pattern(3.0, &mut rng), SequencePattern::Linear);
      let mid = pick_pattern(5.0, &mut rng);
      assert!(matches!(mid, SequencePattern::Progressive | SequencePattern::Alternating));
      let high = pick_pattern(9.0, &mut rng);
      assert!(matches!(
        high,
        SequencePattern::Fibonacci | SequencePattern::Geometric | SequencePattern::Alternating
      ));
    }
  }

  #[test]
  fn linear_step_is_bounded_for_huge_levels() {
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..100 {
      let terms = build_terms(SequencePattern::Linear, 1.0e18, &mut rng);
      let step = (terms[1] - terms[0]).abs();
      assert!((1..=5 + MAX_STEP_BONUS).contains(&step), "{terms:?}");
    }
  }
}
