//! Loading engine configuration (selection weights + controller tuning) from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields the
//! stock tuning. The reaction/language tier thresholds are deliberately not here.

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::TaskCategory;

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
  pub category_weights: Vec<CategoryWeight>,
  pub flow: FlowZoneConfig,
  pub elo: EloConfig,
  /// Upper bound on tasks generated per request (feed buffer size).
  pub lookahead: usize,
  /// Unanswered tasks and sessions older than this are dropped.
  pub retention_ms: i64,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      category_weights: vec![
        CategoryWeight { category: TaskCategory::Math, weight: 0.40 },
        CategoryWeight { category: TaskCategory::Reaction, weight: 0.30 },
        CategoryWeight { category: TaskCategory::Music, weight: 0.10 },
        CategoryWeight { category: TaskCategory::Language, weight: 0.20 },
      ],
      flow: FlowZoneConfig::default(),
      elo: EloConfig::default(),
      lookahead: 3,
      retention_ms: 6 * 60 * 60 * 1000,
    }
  }
}

/// One row of the cumulative weight table. Order matters: rows are walked top-down.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CategoryWeight {
  pub category: TaskCategory,
  pub weight: f64,
}

/// Tuning of the windowed flow-zone controller (arithmetic only).
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlowZoneConfig {
  pub early_window: usize,
  pub late_window: usize,
  pub calibration_tasks: usize,
  pub stability_period: usize,
  pub min_accuracy: f64,
  pub boredom_accuracy: f64,
  pub flow_min_ms: f64,
  pub flow_max_ms: f64,
  pub slow_factor: f64,
  pub max_level: f64,
}

impl Default for FlowZoneConfig {
  fn default() -> Self {
    Self {
      early_window: 8,
      late_window: 15,
      calibration_tasks: 30,
      stability_period: 15,
      min_accuracy: 0.6,
      boredom_accuracy: 0.9,
      flow_min_ms: 5_000.0,
      flow_max_ms: 20_000.0,
      slow_factor: 1.2,
      max_level: 10.0,
    }
  }
}

/// Tuning of the exponential (ELO-like) controller.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct EloConfig {
  pub default_confidence: f64,
  pub decisive_confidence_gain: f64,
  pub skip_confidence_gain: f64,
  pub min_level: f64,
}

impl Default for EloConfig {
  fn default() -> Self {
    Self {
      default_confidence: 0.1,
      decisive_confidence_gain: 0.05,
      skip_confidence_gain: 0.01,
      min_level: 1.0,
    }
  }
}

/// Attempt to load `EngineConfig` from ENGINE_CONFIG_PATH. On any parsing/IO error, returns defaults.
pub fn load_engine_config_from_env() -> EngineConfig {
  let Ok(path) = std::env::var("ENGINE_CONFIG_PATH") else {
    return EngineConfig::default();
  };
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_engine_config(&s) {
      Ok(cfg) => {
        info!(target: "flowscroll", %path, "Loaded engine config (TOML)");
        cfg
      }
      Err(e) => {
        error!(target: "flowscroll", %path, error = %e, "Failed to parse TOML config; using defaults");
        EngineConfig::default()
      }
    },
    Err(e) => {
      error!(target: "flowscroll", %path, error = %e, "Failed to read TOML config file; using defaults");
      EngineConfig::default()
    }
  }
}

pub fn parse_engine_config(s: &str) -> Result<EngineConfig, toml::de::Error> {
  toml::from_str::<EngineConfig>(s)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_toml_yields_defaults() {
    let cfg = parse_engine_config("").unwrap();
    assert_eq!(cfg, EngineConfig::default());
    let total: f64 = cfg.category_weights.iter().map(|w| w.weight).sum();
    assert!((total - 1.0).abs() < 1e-9);
  }

  #[test]
  fn partial_sections_keep_remaining_defaults() {
    let cfg = parse_engine_config(
      r#"
        lookahead = 5

        [flow]
        late_window = 20
      "#,
    )
    .unwrap();
    assert_eq!(cfg.lookahead, 5);
    assert_eq!(cfg.retention_ms, EngineConfig::default().retention_ms);
    assert_eq!(cfg.flow.late_window, 20);
    assert_eq!(cfg.flow.early_window, 8);
    assert_eq!(cfg.elo, EloConfig::default());
  }

  #[test]
  fn weights_table_can_be_replaced() {
    let cfg = parse_engine_config(
      r#"
        [[category_weights]]
        category = "MUSIC"
        weight = 1.0
      "#,
    )
    .unwrap();
    assert_eq!(cfg.category_weights.len(), 1);
    assert_eq!(cfg.category_weights[0].category, TaskCategory::Music);
  }
}
