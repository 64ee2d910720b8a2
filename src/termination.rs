//! Termination conditions: pure predicates over a `TerminationContext`
//! deciding when a variable-count set scheme stops emitting sets.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::TerminationContext;

/// A tagged sum of termination predicates. Each variant validates its own
/// parameters on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerminationCondition {
  RpeThreshold { threshold: f64 },
  RepFailure,
  MaxSets { max: u32 },
  TotalReps { target: u32 },
}

impl TerminationCondition {
  pub fn rpe_threshold(threshold: f64) -> Result<Self, ValidationError> {
    let cond = Self::RpeThreshold { threshold };
    cond.validate()?;
    Ok(cond)
  }

  pub fn max_sets(max: u32) -> Result<Self, ValidationError> {
    let cond = Self::MaxSets { max };
    cond.validate()?;
    Ok(cond)
  }

  pub fn total_reps(target: u32) -> Result<Self, ValidationError> {
    let cond = Self::TotalReps { target };
    cond.validate()?;
    Ok(cond)
  }

  /// Validate this condition's own parameters.
  pub fn validate(&self) -> Result<(), ValidationError> {
    match self {
      Self::RpeThreshold { threshold } => {
        if !(1.0..=10.0).contains(threshold) {
          return Err(ValidationError::InvalidTermination(format!(
            "RPE threshold must be in [1,10], got {}",
            threshold
          )));
        }
      }
      Self::RepFailure => {}
      Self::MaxSets { max } => {
        if *max < 1 {
          return Err(ValidationError::InvalidTermination(
            "max sets must be >= 1".to_string(),
          ));
        }
      }
      Self::TotalReps { target } => {
        if *target < 1 {
          return Err(ValidationError::InvalidTermination(
            "total reps target must be >= 1".to_string(),
          ));
        }
      }
    }
    Ok(())
  }

  /// Evaluate this condition against a snapshot of current progress.
  pub fn should_terminate(&self, ctx: &TerminationContext) -> bool {
    match self {
      Self::RpeThreshold { threshold } => ctx.last_rpe.is_some_and(|rpe| rpe >= *threshold),
      Self::RepFailure => ctx.last_reps < ctx.target_reps,
      Self::MaxSets { max } => ctx.total_sets >= *max,
      Self::TotalReps { target } => ctx.total_reps >= *target,
    }
  }
}
