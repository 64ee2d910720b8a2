//! Shared data model for the progression engine
//!
//! These are plain value types with no behavior beyond small accessors.
//! Strategies (set schemes, progressions) and services own the behavior
//! that operates on them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A lift's tracked maximum: either a true one-rep-max or a conservative
/// training-max derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaxType {
  OneRm,
  TrainingMax,
}

impl std::fmt::Display for MaxType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::OneRm => write!(f, "ONE_RM"),
      Self::TrainingMax => write!(f, "TRAINING_MAX"),
    }
  }
}

/// The kind of event that can invite progression evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerType {
  AfterSet,
  AfterSession,
  AfterWeek,
  AfterCycle,
  OnFailure,
}

impl std::fmt::Display for TriggerType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      Self::AfterSet => "AFTER_SET",
      Self::AfterSession => "AFTER_SESSION",
      Self::AfterWeek => "AFTER_WEEK",
      Self::AfterCycle => "AFTER_CYCLE",
      Self::OnFailure => "ON_FAILURE",
    };
    write!(f, "{}", s)
  }
}

/// One planned set emitted by a set scheme.
///
/// `is_provisional` marks a set whose existence or weight may still change
/// based on upcoming performance (variable-count schemes only).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSet {
  pub set_number: u32,
  pub weight: f64,
  pub target_reps: u32,
  pub is_work_set: bool,
  pub is_provisional: bool,
}

/// The observed outcome of one performed set, as logged by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LoggedSet {
  pub id: String,
  pub user_id: String,
  pub lift_id: String,
  pub session_id: String,
  pub prescription_id: String,
  pub set_number: i64,
  pub target_reps: i64,
  pub reps_performed: i64,
  pub weight: f64,
  pub rpe: Option<f64>,
  pub created_at: DateTime<Utc>,
}

impl LoggedSet {
  pub fn reps_difference(&self) -> i64 {
    self.reps_performed - self.target_reps
  }
}

/// A snapshot fed to a termination predicate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TerminationContext {
  pub set_number: u32,
  pub last_rpe: Option<f64>,
  pub last_reps: u32,
  pub total_reps: u32,
  pub total_sets: u32,
  pub target_reps: u32,
}

/// A tracked maximum for `(user, lift, max_type)`.
///
/// "Current" for a given key is the row with the lexicographically maximum
/// `effective_date`; rows are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LiftMax {
  pub id: String,
  pub user_id: String,
  pub lift_id: String,
  #[sqlx(rename = "max_type")]
  pub max_type: String,
  pub value: f64,
  pub effective_date: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Binding of a progression to a program, optionally narrowed to one lift.
///
/// When `lift_id` is absent the binding is program-wide and is only
/// honored by triggers that apply to all lifts (week/cycle).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProgramProgression {
  pub id: String,
  pub program_id: String,
  pub progression_id: String,
  pub lift_id: Option<String>,
  pub priority: i64,
  pub enabled: bool,
  pub override_increment: Option<f64>,
}

/// Per-`(user, lift, progression)` consecutive-failure tracker.
///
/// Created lazily on first failure, incremented on every failure, reset to
/// zero on the first success.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct FailureCounter {
  pub consecutive_failures: i64,
}

/// Persisted stage index backing `StageProgression`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProgressionState {
  pub current_stage: i64,
}

/// Append-only audit row for an applied (or skipped) progression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProgressionLog {
  pub id: String,
  pub user_id: String,
  pub progression_id: String,
  pub lift_id: String,
  pub previous_value: f64,
  pub new_value: f64,
  pub delta: f64,
  pub trigger_type: String,
  pub trigger_context: String,
  pub applied_at: String,
}
