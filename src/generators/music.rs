//! Rhythm and tone-memory tasks.

use rand::Rng;

use crate::domain::{Beat, GeneratedContent, Instrument, Solution, TaskContent};

const STEP_MS: u32 = 500;
/// Longest beat and pad sequences a player can still repeat.
const MAX_STEPS: u32 = 16;
const MAX_SEQUENCE: u32 = 16;
const INSTRUMENTS: [Instrument; 4] = [Instrument::Kick, Instrument::Snare, Instrument::Hihat, Instrument::Tom];

fn half_level(level: f64) -> u32 {
  (level.max(0.0) / 2.0).floor() as u32
}

/// Beat pattern to repeat. Longer and denser with level; the first step is always a kick.
pub fn rhythm<R: Rng + ?Sized>(level: f64, rng: &mut R) -> GeneratedContent {
  let steps = 4u32.saturating_add(half_level(level)).min(MAX_STEPS);
  let fill = (0.2 + level * 0.05).min(0.8);

  let mut pattern = Vec::new();
  for i in 0..steps {
    let time_offset_ms = i * STEP_MS;
    if i == 0 {
      pattern.push(Beat { time_offset_ms, instrument: Instrument::Kick });
    } else if rng.gen::<f64>() < fill {
      let instrument = INSTRUMENTS[rng.gen_range(0..INSTRUMENTS.len())];
      pattern.push(Beat { time_offset_ms, instrument });
    }
  }

  GeneratedContent {
    question: "Wiederhole den Beat".into(),
    content: TaskContent::Rhythm { pattern: pattern.clone(), total_duration_ms: steps * STEP_MS },
    solution: Solution::Beats(pattern),
  }
}

/// Pad sequence to play back from memory.
pub fn memory<R: Rng + ?Sized>(level: f64, rng: &mut R) -> GeneratedContent {
  let length = 3u32.saturating_add(half_level(level)).min(MAX_SEQUENCE);
  let playback_speed_ms = (800.0 - level * 50.0).max(300.0) as u32;
  let active_pads = 2u32.saturating_add((level.max(0.0) / 3.0).floor() as u32).min(4) as u8;

  let sequence: Vec<u8> = (0..length).map(|_| rng.gen_range(0..active_pads)).collect();

  GeneratedContent {
    question: "Merke dir den Klang".into(),
    content: TaskContent::Memory { sequence: sequence.clone(), playback_speed_ms, active_pads },
    solution: Solution::Pads(sequence),
  }
}
