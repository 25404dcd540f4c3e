//! Reaction / attention tasks. Timing windows, grid sizes and distractor sets
//! come from fixed per-tier tables (easy < 4 ≤ medium < 8 ≤ hard).

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{
  ColorSwitchParams, GeneratedContent, ShapeMode, ShapePair, Solution, StreamParams, TaskContent, Tier,
};

const EMOJI_PAIRS: &[(&str, &str)] = &[
  ("😐", "😶"),
  ("😀", "😃"),
  ("⚪", "⚫"),
  ("⬛", "⬜"),
  ("🍎", "🍅"),
  ("🕒", "🕓"),
];

const EMOJI_SETS: &[(&str, [&str; 7])] = &[
  ("🦊", ["🐶", "🐱", "🦁", "🐯", "🐻", "🐨", "🐼"]),
  ("⚽", ["🏀", "🏈", "⚾", "🎾", "🏐", "🏉", "🎱"]),
  ("🍎", ["🍐", "🍊", "🍋", "🍌", "🍉", "🍇", "🍓"]),
  ("🚀", ["✈️", "🚁", "🚂", "🚗", "🚌", "🚲", "🛵"]),
  ("⭐", ["🌟", "✨", "💫", "☀️", "🌙", "⚡", "❄️"]),
];

/// Tap-on-green: the random wait window shrinks by 10% per level, floored.
pub fn color(level: f64) -> GeneratedContent {
  let decay = 0.9f64.powf(level);
  let wait_min_ms = (3500.0 * decay).max(1000.0);
  let wait_max_ms = (5000.0 * decay).max(2000.0);
  GeneratedContent {
    question: "Tippe bei Grün".into(),
    content: TaskContent::ReactionColor { wait_min_ms, wait_max_ms },
    solution: Solution::None,
  }
}

pub fn shape_grid_size(level: f64) -> u32 {
  2u32.saturating_add((level.max(0.0) / 3.0).floor() as u32).min(5)
}

/// Find-the-odd-cell on a square grid.
pub fn shape<R: Rng + ?Sized>(level: f64, rng: &mut R) -> GeneratedContent {
  let grid_size = shape_grid_size(level);
  let odd_index = rng.gen_range(0..grid_size * grid_size);
  let mode = if rng.gen_bool(0.5) { ShapeMode::Emoji } else { ShapeMode::Rotation };

  let items = match mode {
    ShapeMode::Emoji => {
      let (base, odd) = EMOJI_PAIRS.choose(rng).copied().unwrap_or(EMOJI_PAIRS[0]);
      ShapePair { base: base.into(), odd: odd.into() }
    }
    ShapeMode::Rotation => ShapePair { base: "A".into(), odd: "B".into() },
  };

  GeneratedContent {
    question: "Finde den Außenseiter".into(),
    content: TaskContent::ReactionShape { grid_size, odd_index, mode, items },
    solution: Solution::Index(odd_index as usize),
  }
}

fn strings(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| s.to_string()).collect()
}

const EASY_COLORS: &[&str] = &["bg-red-500", "bg-blue-500", "bg-yellow-500", "bg-purple-500", "bg-orange-500"];
const MEDIUM_COLORS: &[&str] =
  &["bg-red-500", "bg-blue-600", "bg-yellow-500", "bg-purple-600", "bg-orange-500", "bg-pink-500"];
// look-alike greens and teals
const HARD_COLORS: &[&str] = &["bg-teal-500", "bg-lime-500", "bg-emerald-700", "bg-cyan-500", "bg-yellow-400"];

pub fn color_switch_params(tier: Tier) -> ColorSwitchParams {
  let (num_trials, step_min, step_max, change_speed, window, distractors) = match tier {
    Tier::Easy => (5, 2, 4, 800, 1200, EASY_COLORS),
    Tier::Medium => (8, 3, 6, 600, 900, MEDIUM_COLORS),
    Tier::Hard => (10, 4, 8, 400, 600, HARD_COLORS),
  };
  ColorSwitchParams {
    tier,
    num_trials,
    distractor_step_min: step_min,
    distractor_step_max: step_max,
    color_change_speed_ms: change_speed,
    target_window_ms: window,
    distractors: strings(distractors),
    target_color_class: "bg-green-500".into(),
    target_color_name: "Grün".into(),
  }
}

/// Tap only when the target colour shows up between distractor colours.
pub fn color_switch(level: f64) -> GeneratedContent {
  let params = color_switch_params(Tier::from_level(level));
  GeneratedContent {
    question: format!("Tippe nur bei {}", params.target_color_name),
    content: TaskContent::ColorSwitch(params),
    solution: Solution::None,
  }
}

/// (target events, distractor ratio, min interval, max interval, display duration, emoji size)
fn stream_table(tier: Tier) -> (u32, u32, u32, u32, u32, &'static str) {
  match tier {
    Tier::Easy => (3, 2, 800, 1400, 800, "text-7xl"),
    Tier::Medium => (4, 3, 600, 1100, 600, "text-6xl"),
    Tier::Hard => (5, 4, 400, 900, 450, "text-5xl"),
  }
}

/// Focus stream: react to one target emoji among a stream of look-alikes.
pub fn stream<R: Rng + ?Sized>(level: f64, rng: &mut R) -> GeneratedContent {
  let tier = Tier::from_level(level);
  let (num_target_events, distractor_ratio, min_interval_ms, max_interval_ms, display_duration_ms, emoji_size) =
    stream_table(tier);
  let (target, distractors) = EMOJI_SETS.choose(rng).copied().unwrap_or(EMOJI_SETS[0]);

  GeneratedContent {
    question: "Ziel Fokus".into(),
    content: TaskContent::ReactionStream(StreamParams {
      tier,
      target_emoji: target.into(),
      distractors: strings(&distractors),
      num_target_events,
      distractor_ratio,
      min_interval_ms,
      max_interval_ms,
      display_duration_ms,
      emoji_size: emoji_size.into(),
    }),
    solution: Solution::None,
  }
}
