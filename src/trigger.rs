//! Trigger events: the inputs that invite progression evaluation.
//!
//! Each variant carries exactly the fields its trigger type needs. The
//! orchestrator matches a `TriggerEvent` against every `ProgramProgression`
//! binding whose own trigger type agrees, then builds a `ProgressionContext`
//! from the event for each matching binding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::TriggerType;

fn require_non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
  if value.trim().is_empty() {
    return Err(ValidationError::InvalidTriggerContext(format!("{field} must not be empty")));
  }
  Ok(())
}

fn require_non_zero_timestamp(occurred_at: DateTime<Utc>) -> Result<(), ValidationError> {
  if occurred_at.timestamp() == 0 {
    return Err(ValidationError::InvalidTriggerContext(
      "occurred_at must be a real timestamp".to_string(),
    ));
  }
  Ok(())
}

/// Fires when a training session is marked complete. `lifts_performed`
/// names every lift trained in that session; only bindings scoped to one
/// of those lifts (or program-wide bindings, which a session trigger never
/// honors) are eligible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionTriggerContext {
  pub user_id: String,
  pub session_id: String,
  pub day_slug: String,
  pub week_number: u32,
  pub lifts_performed: Vec<String>,
  pub occurred_at: DateTime<Utc>,
}

/// Fires after a single work set is logged. Carries what a set-level
/// progression (`Amrap`, `DoubleProgression`) needs to judge success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetTriggerContext {
  pub user_id: String,
  pub lift_id: String,
  pub is_amrap: bool,
  pub reps_performed: u32,
  pub max_reps: Option<u32>,
  pub occurred_at: DateTime<Utc>,
}

/// Fires when a training week is marked complete. `lift_id` narrows the
/// trigger to one lift; `None` means every lift enrolled in the program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekTriggerContext {
  pub user_id: String,
  pub program_id: String,
  pub week_number: u32,
  pub lift_id: Option<String>,
  pub occurred_at: DateTime<Utc>,
}

/// Fires when a training cycle (block of weeks) is marked complete.
/// `lift_id` narrows the trigger to one lift; `None` means every lift
/// enrolled in the program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleTriggerContext {
  pub user_id: String,
  pub program_id: String,
  pub cycle_number: u32,
  pub lift_id: Option<String>,
  pub occurred_at: DateTime<Utc>,
}

/// Fires when a lift's consecutive-failure counter is incremented past
/// zero. `consecutive_failures` is the post-increment count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureTriggerContext {
  pub user_id: String,
  pub lift_id: String,
  pub progression_id: String,
  pub consecutive_failures: u32,
  pub occurred_at: DateTime<Utc>,
}

/// A caller-initiated trigger that bypasses the normal matching rules and
/// applies one named progression binding directly.
///
/// `force = true` bypasses the idempotency check entirely (a caller that
/// already knows it wants a second application in the same instant), not
/// merely shifting the timestamp to dodge a collision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManualTriggerContext {
  pub user_id: String,
  pub lift_id: String,
  pub progression_id: String,
  pub logged_as: TriggerType,
  pub force: bool,
  pub occurred_at: DateTime<Utc>,
}

/// A closed sum of trigger events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerEvent {
  Session(SessionTriggerContext),
  Set(SetTriggerContext),
  Week(WeekTriggerContext),
  Cycle(CycleTriggerContext),
  Failure(FailureTriggerContext),
  Manual(ManualTriggerContext),
}

impl TriggerEvent {
  pub fn user_id(&self) -> &str {
    match self {
      Self::Session(ctx) => &ctx.user_id,
      Self::Set(ctx) => &ctx.user_id,
      Self::Week(ctx) => &ctx.user_id,
      Self::Cycle(ctx) => &ctx.user_id,
      Self::Failure(ctx) => &ctx.user_id,
      Self::Manual(ctx) => &ctx.user_id,
    }
  }

  pub fn occurred_at(&self) -> DateTime<Utc> {
    match self {
      Self::Session(ctx) => ctx.occurred_at,
      Self::Set(ctx) => ctx.occurred_at,
      Self::Week(ctx) => ctx.occurred_at,
      Self::Cycle(ctx) => ctx.occurred_at,
      Self::Failure(ctx) => ctx.occurred_at,
      Self::Manual(ctx) => ctx.occurred_at,
    }
  }

  /// The `TriggerType` a progression binding must declare to be eligible
  /// for this event.
  pub fn trigger_type(&self) -> TriggerType {
    match self {
      Self::Session(_) => TriggerType::AfterSession,
      Self::Set(_) => TriggerType::AfterSet,
      Self::Week(_) => TriggerType::AfterWeek,
      Self::Cycle(_) => TriggerType::AfterCycle,
      Self::Failure(_) => TriggerType::OnFailure,
      Self::Manual(ctx) => ctx.logged_as,
    }
  }

  /// The lift(s) this event targets, used to narrow which bindings are
  /// eligible. `None` means "every lift in the program" (week/cycle
  /// triggers with no explicit `lift_id`); `Some(&[])` means no lift
  /// qualifies.
  pub fn lifts_filter(&self) -> Option<Vec<String>> {
    match self {
      Self::Session(ctx) => Some(ctx.lifts_performed.clone()),
      Self::Set(ctx) => Some(vec![ctx.lift_id.clone()]),
      Self::Failure(ctx) => Some(vec![ctx.lift_id.clone()]),
      Self::Manual(ctx) => Some(vec![ctx.lift_id.clone()]),
      Self::Week(ctx) => ctx.lift_id.as_ref().map(|lift| vec![lift.clone()]),
      Self::Cycle(ctx) => ctx.lift_id.as_ref().map(|lift| vec![lift.clone()]),
    }
  }

  pub fn validate(&self) -> Result<(), ValidationError> {
    require_non_empty("user_id", self.user_id())?;
    require_non_zero_timestamp(self.occurred_at())?;

    match self {
      Self::Session(ctx) => {
        require_non_empty("session_id", &ctx.session_id)?;
        require_non_empty("day_slug", &ctx.day_slug)?;
        if ctx.week_number < 1 {
          return Err(ValidationError::InvalidTriggerContext("week_number must be >= 1".into()));
        }
        if ctx.lifts_performed.is_empty() {
          return Err(ValidationError::InvalidTriggerContext(
            "lifts_performed must be non-empty".into(),
          ));
        }
      }
      Self::Set(ctx) => {
        require_non_empty("lift_id", &ctx.lift_id)?;
      }
      Self::Week(ctx) => {
        require_non_empty("program_id", &ctx.program_id)?;
        if ctx.week_number < 1 {
          return Err(ValidationError::InvalidTriggerContext("week_number must be >= 1".into()));
        }
      }
      Self::Cycle(ctx) => {
        require_non_empty("program_id", &ctx.program_id)?;
        if ctx.cycle_number < 1 {
          return Err(ValidationError::InvalidTriggerContext("cycle_number must be >= 1".into()));
        }
      }
      Self::Failure(ctx) => {
        require_non_empty("lift_id", &ctx.lift_id)?;
        require_non_empty("progression_id", &ctx.progression_id)?;
        if ctx.consecutive_failures < 1 {
          return Err(ValidationError::InvalidTriggerContext(
            "consecutive_failures must be >= 1".into(),
          ));
        }
      }
      Self::Manual(ctx) => {
        require_non_empty("lift_id", &ctx.lift_id)?;
        require_non_empty("progression_id", &ctx.progression_id)?;
      }
    }
    Ok(())
  }
}
