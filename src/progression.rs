//! Progressions: the strategy family that mutates a persisted lift max in
//! response to a trigger event.
//!
//! Every variant is a pure function of `(current_value, ProgressionContext)
//! -> ProgressionResult`; none of them touch storage. The orchestrator is
//! responsible for loading the current value, calling `apply`, and
//! persisting the result inside one transaction per binding.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::TriggerType;
use crate::rounding::round_down;

/// Everything a progression needs to compute its next value. Fields that
/// don't apply to a given variant are simply ignored by it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressionContext {
  pub current_value: f64,
  pub rounding_increment: f64,
  pub is_amrap: bool,
  pub reps_performed: Option<u32>,
  pub max_reps: Option<u32>,
  pub consecutive_failures: u32,
  pub current_stage: i64,
}

impl Default for ProgressionContext {
  fn default() -> Self {
    Self {
      current_value: 0.0,
      rounding_increment: 5.0,
      is_amrap: false,
      reps_performed: None,
      max_reps: None,
      consecutive_failures: 0,
      current_stage: 0,
    }
  }
}

/// The outcome of applying a progression. `applied = false` means the
/// progression's own success criteria were not met; the caller should
/// skip writing a new `LiftMax` row but may still want to log the no-op
/// for audit purposes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressionResult {
  pub new_value: f64,
  pub delta: f64,
  pub new_stage: Option<i64>,
  pub applied: bool,
}

impl ProgressionResult {
  fn unchanged(current: f64) -> Self {
    Self {
      new_value: current,
      delta: 0.0,
      new_stage: None,
      applied: false,
    }
  }
}

/// One step of an AMRAP reward ladder: reps performed at or above
/// `min_reps` earn `increment`. A progression's `thresholds` list is
/// searched from the highest `min_reps` down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmrapThreshold {
  pub min_reps: u32,
  pub increment: f64,
}

/// A closed sum of progression variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Progression {
  Linear {
    increment: f64,
    trigger_type: TriggerType,
  },
  Cycle {
    increment: f64,
  },
  Amrap {
    thresholds: Vec<AmrapThreshold>,
  },
  #[serde(rename = "DOUBLE")]
  DoubleProgression {
    increment: f64,
  },
  DeloadOnFailure {
    failure_threshold: u32,
    deload_percent: f64,
  },
  StageProgression {
    stage_increments: Vec<f64>,
  },
}

impl Progression {
  pub fn type_tag(&self) -> &'static str {
    match self {
      Self::Linear { .. } => "LINEAR",
      Self::Cycle { .. } => "CYCLE",
      Self::Amrap { .. } => "AMRAP",
      Self::DoubleProgression { .. } => "DOUBLE",
      Self::DeloadOnFailure { .. } => "DELOAD_ON_FAILURE",
      Self::StageProgression { .. } => "STAGE",
    }
  }

  /// The trigger type this progression variant naturally responds to. A
  /// binding is only eligible for a given `TriggerEvent` when its decoded
  /// progression's `trigger_type()` matches the event's.
  ///
  /// `Linear`'s trigger type is a declared field, not a fixed cadence: it
  /// may be bound to a session, a week, or a cycle. `Amrap` and
  /// `DoubleProgression` are pinned to `AFTER_SET` by the spec itself —
  /// they only ever make sense in response to one logged set.
  pub fn trigger_type(&self) -> TriggerType {
    match self {
      Self::Linear { trigger_type, .. } => *trigger_type,
      Self::Cycle { .. } => TriggerType::AfterCycle,
      Self::Amrap { .. } => TriggerType::AfterSet,
      Self::DoubleProgression { .. } => TriggerType::AfterSet,
      Self::DeloadOnFailure { .. } => TriggerType::OnFailure,
      Self::StageProgression { .. } => TriggerType::AfterCycle,
    }
  }

  pub fn validate(&self) -> Result<(), ValidationError> {
    let invalid = |msg: String| Err(ValidationError::InvalidParams(msg));

    match self {
      Self::Linear { increment, trigger_type } => {
        if *increment <= 0.0 {
          return invalid("Linear.increment must be > 0".into());
        }
        if !matches!(
          trigger_type,
          TriggerType::AfterSession | TriggerType::AfterWeek | TriggerType::AfterCycle
        ) {
          return invalid("Linear.trigger_type must be AFTER_SESSION, AFTER_WEEK, or AFTER_CYCLE".into());
        }
      }
      Self::Cycle { increment } => {
        if *increment <= 0.0 {
          return invalid("Cycle.increment must be > 0".into());
        }
      }
      Self::Amrap { thresholds } => {
        if thresholds.is_empty() {
          return invalid("Amrap.thresholds must be non-empty".into());
        }
        for t in thresholds {
          if t.increment <= 0.0 {
            return invalid("Amrap threshold increment must be > 0".into());
          }
        }
        for pair in thresholds.windows(2) {
          if pair[0].min_reps >= pair[1].min_reps {
            return invalid("Amrap.thresholds must be sorted strictly ascending by min_reps".into());
          }
        }
      }
      Self::DoubleProgression { increment } => {
        if *increment <= 0.0 {
          return invalid("DoubleProgression.increment must be > 0".into());
        }
      }
      Self::DeloadOnFailure {
        failure_threshold,
        deload_percent,
      } => {
        if *failure_threshold < 1 {
          return invalid("DeloadOnFailure.failure_threshold must be >= 1".into());
        }
        if !(0.0..1.0).contains(deload_percent) {
          return invalid("DeloadOnFailure.deload_percent must be in (0,1)".into());
        }
      }
      Self::StageProgression { stage_increments } => {
        if stage_increments.is_empty() {
          return invalid("StageProgression.stage_increments must be non-empty".into());
        }
      }
    }
    Ok(())
  }

  /// Compute this progression's effect. Pure: no I/O, no randomness.
  pub fn apply(&self, ctx: &ProgressionContext) -> Result<ProgressionResult, ValidationError> {
    self.validate()?;

    let result = match self {
      Self::Linear { increment, .. } => ProgressionResult {
        new_value: ctx.current_value + increment,
        delta: *increment,
        new_stage: None,
        applied: true,
      },

      Self::Cycle { increment } => ProgressionResult {
        new_value: ctx.current_value + increment,
        delta: *increment,
        new_stage: None,
        applied: true,
      },

      Self::Amrap { thresholds } => match (ctx.is_amrap, ctx.reps_performed) {
        (true, Some(reps)) => match thresholds.iter().rev().find(|t| t.min_reps <= reps) {
          Some(matched) => ProgressionResult {
            new_value: ctx.current_value + matched.increment,
            delta: matched.increment,
            new_stage: None,
            applied: true,
          },
          None => ProgressionResult::unchanged(ctx.current_value),
        },
        _ => ProgressionResult::unchanged(ctx.current_value),
      },

      Self::DoubleProgression { increment } => match (ctx.reps_performed, ctx.max_reps) {
        (Some(reps), Some(max_reps)) if reps >= max_reps => ProgressionResult {
          new_value: ctx.current_value + increment,
          delta: *increment,
          new_stage: None,
          applied: true,
        },
        _ => ProgressionResult::unchanged(ctx.current_value),
      },

      Self::DeloadOnFailure {
        failure_threshold,
        deload_percent,
      } => {
        if ctx.consecutive_failures >= *failure_threshold {
          let raw = ctx.current_value * (1.0 - deload_percent);
          let new_value = round_down(raw, ctx.rounding_increment)?;
          ProgressionResult {
            delta: new_value - ctx.current_value,
            new_value,
            new_stage: None,
            applied: true,
          }
        } else {
          ProgressionResult::unchanged(ctx.current_value)
        }
      }

      Self::StageProgression { stage_increments } => {
        let len = stage_increments.len() as i64;
        let idx = ctx.current_stage.rem_euclid(len) as usize;
        let increment = stage_increments[idx];
        let next_stage = (ctx.current_stage + 1).rem_euclid(len);
        ProgressionResult {
          new_value: ctx.current_value + increment,
          delta: increment,
          new_stage: Some(next_stage),
          applied: true,
        }
      }
    };

    Ok(result)
  }

  /// Like `apply`, but a `Cycle` progression's own `increment` is replaced
  /// by `override_increment` when present. Every other variant ignores
  /// `override_increment` and behaves exactly like `apply`.
  pub fn apply_with_override(&self, ctx: &ProgressionContext, override_increment: Option<f64>) -> Result<ProgressionResult, ValidationError> {
    match (self, override_increment) {
      (Self::Cycle { .. }, Some(increment)) => {
        if increment <= 0.0 {
          return Err(ValidationError::InvalidParams("Cycle.override_increment must be > 0".into()));
        }
        Ok(ProgressionResult {
          new_value: ctx.current_value + increment,
          delta: increment,
          new_stage: None,
          applied: true,
        })
      }
      _ => self.apply(ctx),
    }
  }
}
