//! Error taxonomy for the engine, in the three tiers the spec separates:
//! pure validation failures, non-exceptional orchestration outcomes (which
//! live as data in `orchestrator::TriggerOutcome`, not as errors), and
//! engine-level early exits.

use serde::Serialize;
use thiserror::Error;

/// Tier 1: pure, domain-authored validation failures.
///
/// Returned from constructors and `validate()`. Callers (e.g. an HTTP
/// layer) are expected to surface these as 400-class failures.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum ValidationError {
  #[error("invalid parameters: {0}")]
  InvalidParams(String),

  #[error("invalid termination condition: {0}")]
  InvalidTermination(String),

  #[error("unknown scheme type: {0}")]
  UnknownSchemeType(String),

  #[error("scheme not registered: {0}")]
  SchemeNotRegistered(String),

  #[error("unknown progression type: {0}")]
  UnknownProgressionType(String),

  #[error("progression not registered: {0}")]
  ProgressionNotRegistered(String),

  #[error("invalid trigger context: {0}")]
  InvalidTriggerContext(String),
}

/// Tier 3: engine-level early exits, raised before per-binding processing
/// begins. Distinct from `ValidationError` because these are about missing
/// state (enrollment, bindings, records), not malformed parameters.
#[derive(Debug, Error)]
pub enum EngineError {
  #[error("user {0} is not enrolled in a program")]
  UserNotEnrolled(String),

  #[error("progression {0} not found")]
  ProgressionNotFound(String),

  #[error("lift {0} not found")]
  LiftNotFound(String),

  #[error("no applicable progressions")]
  NoApplicableProgressions,

  #[error("invalid trigger context: {0}")]
  InvalidTriggerContext(String),

  #[error("scheme for prescription {0} is not a variable-count scheme")]
  NotVariableScheme(String),

  #[error("no sets logged for prescription {0} in session {1}")]
  NoSetsLogged(String, String),

  #[error(transparent)]
  Validation(#[from] ValidationError),

  #[error(transparent)]
  Store(#[from] StoreError),
}

/// I/O failures surfaced by an `EngineStore` implementation.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("not found: {0}")]
  NotFound(String),
}
