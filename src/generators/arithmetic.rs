//! Flow arithmetic: the level maps to a total digit capacity shared by both operands.
//!
//! Level 1 = 1+1 digits, level 2 = 2+1, level 3 = 2+2 or 3+1, and so on.

use rand::Rng;

use crate::domain::{GeneratedContent, Operator, Solution, TaskContent};

/// Uniform N-digit number; 0 digits yields 0.
pub fn number_with_digits<R: Rng + ?Sized>(digits: u32, rng: &mut R) -> i64 {
  if digits == 0 {
    return 0;
  }
  let min = 10i64.pow(digits - 1);
  let max = 10i64.pow(digits) - 1;
  rng.gen_range(min..=max)
}

/// Total digits across both operands for `level`.
pub fn digit_capacity(level: f64) -> u32 {
  level.clamp(1.0, 10.0).floor() as u32 + 1
}

pub fn generate<R: Rng + ?Sized>(op: Operator, level: f64, rng: &mut R) -> GeneratedContent {
  let level = level.clamp(1.0, 10.0);
  let total = digit_capacity(level);

  let mut digits_a = (total + 1) / 2;
  let mut digits_b = total / 2;
  if total >= 4 && rng.gen_bool(0.5) {
    std::mem::swap(&mut digits_a, &mut digits_b);
  }

  let (a, b) = match op {
    Operator::Add => (number_with_digits(digits_a, rng), number_with_digits(digits_b, rng)),
    Operator::Subtract => {
      let a = number_with_digits(digits_a, rng);
      let b = number_with_digits(digits_b, rng);
      // no negative results
      if a < b { (b, a) } else { (a, b) }
    }
    Operator::Multiply => {
      // 3x1 is friendlier than 2x2 at capacity 4; beyond that keep b at most 2 digits.
      if total == 4 {
        if rng.gen_bool(0.5) {
          digits_a = 3;
          digits_b = 1;
        } else {
          digits_a = 2;
          digits_b = 2;
        }
      } else if total >= 5 {
        digits_b = digits_b.min(2);
        digits_a = total - digits_b;
      }
      let a = number_with_digits(digits_a, rng);
      let mut b = number_with_digits(digits_b, rng);
      if level > 1.0 && digits_b == 1 {
        b = rng.gen_range(2..=9);
      }
      (a, b)
    }
  };

  GeneratedContent {
    question: format!("{} {} {}", a, op.symbol(), b),
    content: TaskContent::Arithmetic { a, b, operator: op },
    solution: Solution::Number(op.apply(a, b)),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;
  use rstest::rstest;

  fn digits(n: i64) -> u32 {
    if n == 0 { 0 } else { n.abs().to_string().len() as u32 }
  }

  fn unpack(out: &GeneratedContent) -> (i64, i64, Operator, i64) {
    match (&out.content, &out.solution) {
      (TaskContent::Arithmetic { a, b, operator }, Solution::Number(s)) => (*a, *b, *operator, *s),
      other => panic!("unexpected payload {other:?}"),
    }
  }

  #[rstest]
  fn solutions_match_the_expression(
    #[values(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0)] level: f64,
    #[values(Operator::Add, Operator::Subtract, Operator::Multiply)] op: Operator,
  ) {
    let mut rng = StdRng::seed_from_u64(level as u64 * 31 + op as u64);
    for _ in 0..1000 {
      let out = generate(op, level, &mut rng);
      let (a, b, operator, solution) = unpack(&out);
      assert_eq!(operator, op);
      assert_eq!(solution, op.apply(a, b));
      assert_eq!(out.question, format!("{} {} {}", a, op.symbol(), b));
      if op == Operator::Subtract {
        assert!(a >= b, "{a} - {b}");
        assert!(solution >= 0);
      }
    }
  }

  #[rstest]
  fn addition_uses_the_full_digit_capacity(#[values(1.0, 2.0, 3.0, 5.0, 8.0, 10.0)] level: f64) {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..200 {
      let (a, b, _, _) = unpack(&generate(Operator::Add, level, &mut rng));
      assert_eq!(digits(a) + digits(b), digit_capacity(level));
    }
  }

  #[test]
  fn multiplication_avoids_trivial_factors_above_level_one() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..500 {
      let (_, b, _, _) = unpack(&generate(Operator::Multiply, 2.0, &mut rng));
      assert!((2..=9).contains(&b), "b = {b}");
    }
  }

  #[test]
  fn multiplication_caps_the_smaller_operand() {
    let mut rng = StdRng::seed_from_u64(6);
    for _ in 0..500 {
      let (a, b, _, _) = unpack(&generate(Operator::Multiply, 9.0, &mut rng));
      assert!(digits(b) <= 2);
      assert_eq!(digits(a) + digits(b), 10);
    }
  }

  #[test]
  fn level_one_is_single_digit_pairs() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..200 {
      let (a, b, _, _) = unpack(&generate(Operator::Multiply, 1.0, &mut rng));
      assert!((1..=9).contains(&a) && (1..=9).contains(&b));
    }
  }

  #[test]
  fn out_of_range_levels_are_clamped() {
    assert_eq!(digit_capacity(0.0), 2);
    assert_eq!(digit_capacity(42.0), 11);
    assert_eq!(digit_capacity(2.7), 3);
  }
}
