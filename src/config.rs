//! Engine-wide defaults, overridable from the process environment.
//!
//! Mirrors the teacher's `*Config::from_env` constructors (see
//! `OuraConfig::from_env`): every `env::var` read is centralized here, and
//! the rest of the engine never touches the environment directly.

use std::env;

const DEFAULT_ROUNDING_INCREMENT: f64 = 5.0;
const DEFAULT_WORK_SET_THRESHOLD: f64 = 80.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
  pub default_rounding_increment: f64,
  pub default_work_set_threshold: f64,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      default_rounding_increment: DEFAULT_ROUNDING_INCREMENT,
      default_work_set_threshold: DEFAULT_WORK_SET_THRESHOLD,
    }
  }
}

impl EngineConfig {
  /// Load overrides from `.env` / the process environment, falling back to
  /// the spec defaults for anything unset or unparsable.
  pub fn from_env() -> Self {
    dotenvy::dotenv().ok();

    let default_rounding_increment = env::var("ENGINE_ROUNDING_INCREMENT")
      .ok()
      .and_then(|s| s.parse().ok())
      .filter(|v| *v > 0.0)
      .unwrap_or(DEFAULT_ROUNDING_INCREMENT);

    let default_work_set_threshold = env::var("ENGINE_WORK_SET_THRESHOLD")
      .ok()
      .and_then(|s| s.parse().ok())
      .filter(|v| (0.0..=100.0).contains(v))
      .unwrap_or(DEFAULT_WORK_SET_THRESHOLD);

    Self {
      default_rounding_increment,
      default_work_set_threshold,
    }
  }
}
