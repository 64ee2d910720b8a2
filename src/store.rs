//! Storage abstraction.
//!
//! The engine is generic over `EngineStore` so its orchestration logic can
//! be tested against an in-memory fake as well as the real SQLite-backed
//! adapter in `store::sqlite`. Each sub-trait owns one table's worth of
//! reads/writes; `EngineStore` is the union the orchestrator actually
//! depends on.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::StoreError;
use crate::models::{LiftMax, LoggedSet, MaxType, ProgramProgression, ProgressionLog};

pub mod sqlite;

/// Input to `ProgressionLogStore::insert_log`. A plain DTO rather than
/// reusing `ProgressionLog` because the store, not the caller, assigns the
/// row id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProgressionLog {
  pub user_id: String,
  pub progression_id: String,
  pub lift_id: String,
  pub previous_value: f64,
  pub new_value: f64,
  pub delta: f64,
  pub trigger_type: String,
  pub trigger_context: String,
  pub applied_at: DateTime<Utc>,
}

#[async_trait]
pub trait LiftMaxStore {
  /// The row with the lexicographically maximum `effective_date` for
  /// `(user_id, lift_id, max_type)`, or `None` if never recorded.
  async fn get_current_max(&self, user_id: &str, lift_id: &str, max_type: MaxType) -> Result<Option<LiftMax>, StoreError>;

  /// Append a new max row. `effective_date` is stored as RFC3339 text; the
  /// caller is responsible for the force-mode ordering offset (see
  /// `orchestrator`).
  async fn insert_max(
    &self,
    user_id: &str,
    lift_id: &str,
    max_type: MaxType,
    value: f64,
    effective_date: DateTime<Utc>,
  ) -> Result<LiftMax, StoreError>;
}

#[async_trait]
pub trait ProgressionLogStore {
  /// Look up an existing log row by the idempotency key
  /// `(user_id, progression_id, lift_id, trigger_type, applied_at)`.
  async fn find_log(
    &self,
    user_id: &str,
    progression_id: &str,
    lift_id: &str,
    trigger_type: &str,
    applied_at: DateTime<Utc>,
  ) -> Result<Option<ProgressionLog>, StoreError>;

  async fn insert_log(&self, log: NewProgressionLog) -> Result<ProgressionLog, StoreError>;
}

#[async_trait]
pub trait FailureCounterStore {
  /// Current consecutive-failure count for `(user, lift, progression)`.
  /// Zero if no row exists yet.
  async fn get_consecutive_failures(&self, user_id: &str, lift_id: &str, progression_id: &str) -> Result<u32, StoreError>;

  /// Increment and return the new count, creating the row if absent.
  async fn increment_failures(&self, user_id: &str, lift_id: &str, progression_id: &str) -> Result<u32, StoreError>;

  /// Reset the count to zero, creating the row if absent.
  async fn reset_failures(&self, user_id: &str, lift_id: &str, progression_id: &str) -> Result<(), StoreError>;
}

#[async_trait]
pub trait StageStore {
  /// Current stage index for `(user, progression)`. Zero if never set.
  async fn get_stage(&self, user_id: &str, progression_id: &str) -> Result<i64, StoreError>;

  async fn set_stage(&self, user_id: &str, progression_id: &str, stage: i64) -> Result<(), StoreError>;
}

#[async_trait]
pub trait BindingStore {
  /// Every progression bound to `program_id`, ordered by ascending
  /// priority (lower value applies first).
  async fn bindings_for_program(&self, program_id: &str) -> Result<Vec<ProgramProgression>, StoreError>;

  /// The tagged JSON definition for a progression by id.
  async fn progression_definition(&self, progression_id: &str) -> Result<Option<serde_json::Value>, StoreError>;

  /// Every lift enrolled in `program_id`. Used to fan a program-wide
  /// (no `lift_id`) week/cycle binding out across every lift it covers.
  async fn lifts_for_program(&self, program_id: &str) -> Result<Vec<String>, StoreError>;
}

#[async_trait]
pub trait ProgramEnrollmentStore {
  /// The program a user is currently enrolled in, if any.
  async fn program_for_user(&self, user_id: &str) -> Result<Option<String>, StoreError>;
}

/// Read access to a prescription's set scheme and a session's logged
/// history. The prescription/day/week CRUD surface itself is an external
/// collaborator; the engine only needs these two reads to drive
/// `session::next_set`.
#[async_trait]
pub trait SessionStore {
  /// The tagged JSON definition of the set scheme bound to a prescription,
  /// or `None` if the prescription doesn't exist.
  async fn scheme_for_prescription(&self, prescription_id: &str) -> Result<Option<serde_json::Value>, StoreError>;

  /// Every set logged for `(session_id, prescription_id)`, ordered by
  /// `set_number` ascending.
  async fn logged_sets(&self, session_id: &str, prescription_id: &str) -> Result<Vec<LoggedSet>, StoreError>;
}

/// Everything one progression application needs to write in a single
/// unit of work: the audit log row, the new lift max, and (for
/// `StageProgression`) the advanced stage.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyProgressionInput {
  pub user_id: String,
  pub lift_id: String,
  pub progression_id: String,
  pub max_type: MaxType,
  pub previous_value: f64,
  pub new_value: f64,
  pub delta: f64,
  pub trigger_type: String,
  pub trigger_context: String,
  pub applied_at: DateTime<Utc>,
  pub new_stage: Option<i64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplyProgressionOutput {
  pub log: ProgressionLog,
  pub lift_max: LiftMax,
}

/// Applies one progression's effects atomically: one binding, one
/// transaction. Kept separate from the per-table traits above so the
/// SQLite adapter can wrap the three writes (log, max, stage) in a real
/// `sqlx::Transaction`, while a test double can satisfy it with plain
/// sequential calls.
#[async_trait]
pub trait TransactionalStore {
  async fn apply_progression(&self, input: ApplyProgressionInput) -> Result<ApplyProgressionOutput, StoreError>;
}

/// The full storage surface the orchestrator depends on.
pub trait EngineStore:
  LiftMaxStore
  + ProgressionLogStore
  + FailureCounterStore
  + StageStore
  + BindingStore
  + ProgramEnrollmentStore
  + TransactionalStore
  + Send
  + Sync
{
}

impl<T> EngineStore for T where
  T: LiftMaxStore
    + ProgressionLogStore
    + FailureCounterStore
    + StageStore
    + BindingStore
    + ProgramEnrollmentStore
    + TransactionalStore
    + Send
    + Sync
{
}
