//! SQLite-backed `EngineStore` implementation.
//!
//! Mirrors the teacher's `db::AppState`/`db::initialize_db` shape: a thin
//! wrapper around a `SqlitePool`, migrations run once at startup, plain
//! `sqlx::query`/`query_as` calls with bound parameters.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use crate::error::StoreError;
use crate::models::{LiftMax, LoggedSet, MaxType, ProgramProgression, ProgressionLog};
use crate::store::{
  ApplyProgressionInput, ApplyProgressionOutput, BindingStore, FailureCounterStore, LiftMaxStore, NewProgressionLog,
  ProgramEnrollmentStore, ProgressionLogStore, SessionStore, StageStore, TransactionalStore,
};

fn new_id() -> String {
  uuid_like()
}

/// A dependency-free, time-ordered id: good enough for a primary key that
/// is never parsed back apart from equality checks. Callers that need a
/// real UUID can swap this for the `uuid` crate without touching callers.
fn uuid_like() -> String {
  use std::sync::atomic::{AtomicU64, Ordering};
  static COUNTER: AtomicU64 = AtomicU64::new(0);
  let n = COUNTER.fetch_add(1, Ordering::Relaxed);
  format!("id_{n:020x}")
}

fn max_type_str(max_type: MaxType) -> &'static str {
  match max_type {
    MaxType::OneRm => "ONE_RM",
    MaxType::TrainingMax => "TRAINING_MAX",
  }
}

/// Thin wrapper around a `SqlitePool`, implementing every sub-trait of
/// `EngineStore`.
#[derive(Debug, Clone)]
pub struct SqliteEngineStore {
  pool: SqlitePool,
}

impl SqliteEngineStore {
  pub fn new(pool: SqlitePool) -> Self {
    Self { pool }
  }

  /// Open a connection pool at `db_url` and run migrations. `db_url` is a
  /// full sqlx connection string, e.g. `sqlite://trainer.db?mode=rwc` or
  /// `sqlite::memory:` for tests.
  pub async fn connect(db_url: &str) -> Result<Self, StoreError> {
    println!("Initializing engine database at: {db_url}");

    let pool = SqlitePoolOptions::new().max_connections(5).connect(db_url).await?;

    sqlx::migrate!("./migrations")
      .run(&pool)
      .await
      .map_err(|e| StoreError::Database(sqlx::Error::Migrate(Box::new(e))))?;

    println!("Engine database initialized successfully");

    Ok(Self { pool })
  }

  pub fn pool(&self) -> &SqlitePool {
    &self.pool
  }
}

#[async_trait]
impl LiftMaxStore for SqliteEngineStore {
  async fn get_current_max(&self, user_id: &str, lift_id: &str, max_type: MaxType) -> Result<Option<LiftMax>, StoreError> {
    let row = sqlx::query_as::<_, LiftMax>(
      r#"
      SELECT id, user_id, lift_id, max_type, value, effective_date, created_at, updated_at
      FROM lift_maxes
      WHERE user_id = ?1 AND lift_id = ?2 AND max_type = ?3
      ORDER BY effective_date DESC
      LIMIT 1
      "#,
    )
    .bind(user_id)
    .bind(lift_id)
    .bind(max_type_str(max_type))
    .fetch_optional(&self.pool)
    .await?;

    Ok(row)
  }

  async fn insert_max(
    &self,
    user_id: &str,
    lift_id: &str,
    max_type: MaxType,
    value: f64,
    effective_date: DateTime<Utc>,
  ) -> Result<LiftMax, StoreError> {
    let id = new_id();
    let now = Utc::now();

    sqlx::query(
      r#"
      INSERT INTO lift_maxes (id, user_id, lift_id, max_type, value, effective_date, created_at, updated_at)
      VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
      "#,
    )
    .bind(&id)
    .bind(user_id)
    .bind(lift_id)
    .bind(max_type_str(max_type))
    .bind(value)
    .bind(effective_date.to_rfc3339())
    .bind(now.to_rfc3339())
    .execute(&self.pool)
    .await?;

    Ok(LiftMax {
      id,
      user_id: user_id.to_string(),
      lift_id: lift_id.to_string(),
      max_type: max_type_str(max_type).to_string(),
      value,
      effective_date: effective_date.to_rfc3339(),
      created_at: now,
      updated_at: now,
    })
  }
}

#[async_trait]
impl ProgressionLogStore for SqliteEngineStore {
  async fn find_log(
    &self,
    user_id: &str,
    progression_id: &str,
    lift_id: &str,
    trigger_type: &str,
    applied_at: DateTime<Utc>,
  ) -> Result<Option<ProgressionLog>, StoreError> {
    let row = sqlx::query_as::<_, ProgressionLog>(
      r#"
      SELECT id, user_id, progression_id, lift_id, previous_value, new_value, delta,
             trigger_type, trigger_context, applied_at
      FROM progression_logs
      WHERE user_id = ?1 AND progression_id = ?2 AND lift_id = ?3
        AND trigger_type = ?4 AND applied_at = ?5
      "#,
    )
    .bind(user_id)
    .bind(progression_id)
    .bind(lift_id)
    .bind(trigger_type)
    .bind(applied_at.to_rfc3339())
    .fetch_optional(&self.pool)
    .await?;

    Ok(row)
  }

  async fn insert_log(&self, log: NewProgressionLog) -> Result<ProgressionLog, StoreError> {
    let id = new_id();

    sqlx::query(
      r#"
      INSERT INTO progression_logs
        (id, user_id, progression_id, lift_id, previous_value, new_value, delta,
         trigger_type, trigger_context, applied_at)
      VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
      "#,
    )
    .bind(&id)
    .bind(&log.user_id)
    .bind(&log.progression_id)
    .bind(&log.lift_id)
    .bind(log.previous_value)
    .bind(log.new_value)
    .bind(log.delta)
    .bind(&log.trigger_type)
    .bind(&log.trigger_context)
    .bind(log.applied_at.to_rfc3339())
    .execute(&self.pool)
    .await?;

    Ok(ProgressionLog {
      id,
      user_id: log.user_id,
      progression_id: log.progression_id,
      lift_id: log.lift_id,
      previous_value: log.previous_value,
      new_value: log.new_value,
      delta: log.delta,
      trigger_type: log.trigger_type,
      trigger_context: log.trigger_context,
      applied_at: log.applied_at.to_rfc3339(),
    })
  }
}

#[async_trait]
impl FailureCounterStore for SqliteEngineStore {
  async fn get_consecutive_failures(&self, user_id: &str, lift_id: &str, progression_id: &str) -> Result<u32, StoreError> {
    let row = sqlx::query(
      r#"
      SELECT consecutive_failures FROM failure_counters
      WHERE user_id = ?1 AND lift_id = ?2 AND progression_id = ?3
      "#,
    )
    .bind(user_id)
    .bind(lift_id)
    .bind(progression_id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(|r| r.get::<i64, _>("consecutive_failures") as u32).unwrap_or(0))
  }

  async fn increment_failures(&self, user_id: &str, lift_id: &str, progression_id: &str) -> Result<u32, StoreError> {
    sqlx::query(
      r#"
      INSERT INTO failure_counters (user_id, lift_id, progression_id, consecutive_failures)
      VALUES (?1, ?2, ?3, 1)
      ON CONFLICT(user_id, lift_id, progression_id)
      DO UPDATE SET consecutive_failures = consecutive_failures + 1
      "#,
    )
    .bind(user_id)
    .bind(lift_id)
    .bind(progression_id)
    .execute(&self.pool)
    .await?;

    self.get_consecutive_failures(user_id, lift_id, progression_id).await
  }

  async fn reset_failures(&self, user_id: &str, lift_id: &str, progression_id: &str) -> Result<(), StoreError> {
    sqlx::query(
      r#"
      INSERT INTO failure_counters (user_id, lift_id, progression_id, consecutive_failures)
      VALUES (?1, ?2, ?3, 0)
      ON CONFLICT(user_id, lift_id, progression_id)
      DO UPDATE SET consecutive_failures = 0
      "#,
    )
    .bind(user_id)
    .bind(lift_id)
    .bind(progression_id)
    .execute(&self.pool)
    .await?;

    Ok(())
  }
}

#[async_trait]
impl StageStore for SqliteEngineStore {
  async fn get_stage(&self, user_id: &str, progression_id: &str) -> Result<i64, StoreError> {
    let row = sqlx::query(
      r#"
      SELECT current_stage FROM user_progression_states
      WHERE user_id = ?1 AND progression_id = ?2
      "#,
    )
    .bind(user_id)
    .bind(progression_id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(|r| r.get::<i64, _>("current_stage")).unwrap_or(0))
  }

  async fn set_stage(&self, user_id: &str, progression_id: &str, stage: i64) -> Result<(), StoreError> {
    sqlx::query(
      r#"
      INSERT INTO user_progression_states (user_id, progression_id, current_stage)
      VALUES (?1, ?2, ?3)
      ON CONFLICT(user_id, progression_id)
      DO UPDATE SET current_stage = excluded.current_stage
      "#,
    )
    .bind(user_id)
    .bind(progression_id)
    .bind(stage)
    .execute(&self.pool)
    .await?;

    Ok(())
  }
}

#[async_trait]
impl BindingStore for SqliteEngineStore {
  async fn bindings_for_program(&self, program_id: &str) -> Result<Vec<ProgramProgression>, StoreError> {
    let rows = sqlx::query_as::<_, ProgramProgression>(
      r#"
      SELECT id, program_id, progression_id, lift_id, priority, enabled, override_increment
      FROM program_progressions
      WHERE program_id = ?1
      ORDER BY priority ASC
      "#,
    )
    .bind(program_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows)
  }

  async fn progression_definition(&self, progression_id: &str) -> Result<Option<serde_json::Value>, StoreError> {
    let row = sqlx::query(
      r#"
      SELECT progression_definition FROM program_progressions
      WHERE progression_id = ?1
      LIMIT 1
      "#,
    )
    .bind(progression_id)
    .fetch_optional(&self.pool)
    .await?;

    match row {
      Some(row) => {
        let raw: String = row.get("progression_definition");
        Ok(Some(serde_json::from_str(&raw)?))
      }
      None => Ok(None),
    }
  }

  async fn lifts_for_program(&self, program_id: &str) -> Result<Vec<String>, StoreError> {
    let rows = sqlx::query(
      r#"
      SELECT lift_id FROM program_lifts WHERE program_id = ?1
      "#,
    )
    .bind(program_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.get::<String, _>("lift_id")).collect())
  }
}

#[async_trait]
impl ProgramEnrollmentStore for SqliteEngineStore {
  async fn program_for_user(&self, user_id: &str) -> Result<Option<String>, StoreError> {
    let row = sqlx::query(
      r#"
      SELECT program_id FROM program_enrollments WHERE user_id = ?1
      "#,
    )
    .bind(user_id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(row.map(|r| r.get::<String, _>("program_id")))
  }
}

#[async_trait]
impl TransactionalStore for SqliteEngineStore {
  async fn apply_progression(&self, input: ApplyProgressionInput) -> Result<ApplyProgressionOutput, StoreError> {
    let mut tx = self.pool.begin().await?;

    let max_id = new_id();
    let now = Utc::now();

    sqlx::query(
      r#"
      INSERT INTO lift_maxes (id, user_id, lift_id, max_type, value, effective_date, created_at, updated_at)
      VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
      "#,
    )
    .bind(&max_id)
    .bind(&input.user_id)
    .bind(&input.lift_id)
    .bind(max_type_str(input.max_type))
    .bind(input.new_value)
    .bind(input.applied_at.to_rfc3339())
    .bind(now.to_rfc3339())
    .execute(&mut *tx)
    .await?;

    let log_id = new_id();

    sqlx::query(
      r#"
      INSERT INTO progression_logs
        (id, user_id, progression_id, lift_id, previous_value, new_value, delta,
         trigger_type, trigger_context, applied_at)
      VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
      "#,
    )
    .bind(&log_id)
    .bind(&input.user_id)
    .bind(&input.progression_id)
    .bind(&input.lift_id)
    .bind(input.previous_value)
    .bind(input.new_value)
    .bind(input.delta)
    .bind(&input.trigger_type)
    .bind(&input.trigger_context)
    .bind(input.applied_at.to_rfc3339())
    .execute(&mut *tx)
    .await?;

    if let Some(stage) = input.new_stage {
      sqlx::query(
        r#"
        INSERT INTO user_progression_states (user_id, progression_id, current_stage)
        VALUES (?1, ?2, ?3)
        ON CONFLICT(user_id, progression_id)
        DO UPDATE SET current_stage = excluded.current_stage
        "#,
      )
      .bind(&input.user_id)
      .bind(&input.progression_id)
      .bind(stage)
      .execute(&mut *tx)
      .await?;
    }

    tx.commit().await?;

    Ok(ApplyProgressionOutput {
      log: ProgressionLog {
        id: log_id,
        user_id: input.user_id.clone(),
        progression_id: input.progression_id,
        lift_id: input.lift_id.clone(),
        previous_value: input.previous_value,
        new_value: input.new_value,
        delta: input.delta,
        trigger_type: input.trigger_type,
        trigger_context: input.trigger_context,
        applied_at: input.applied_at.to_rfc3339(),
      },
      lift_max: LiftMax {
        id: max_id,
        user_id: input.user_id,
        lift_id: input.lift_id,
        max_type: max_type_str(input.max_type).to_string(),
        value: input.new_value,
        effective_date: input.applied_at.to_rfc3339(),
        created_at: now,
        updated_at: now,
      },
    })
  }
}

#[async_trait]
impl SessionStore for SqliteEngineStore {
  async fn scheme_for_prescription(&self, prescription_id: &str) -> Result<Option<serde_json::Value>, StoreError> {
    let row = sqlx::query(
      r#"
      SELECT scheme_definition FROM prescriptions WHERE id = ?1
      "#,
    )
    .bind(prescription_id)
    .fetch_optional(&self.pool)
    .await?;

    match row {
      Some(row) => {
        let raw: String = row.get("scheme_definition");
        Ok(Some(serde_json::from_str(&raw)?))
      }
      None => Ok(None),
    }
  }

  async fn logged_sets(&self, session_id: &str, prescription_id: &str) -> Result<Vec<LoggedSet>, StoreError> {
    let rows = sqlx::query_as::<_, LoggedSet>(
      r#"
      SELECT id, user_id, lift_id, session_id, prescription_id, set_number,
             target_reps, reps_performed, weight, rpe, created_at
      FROM logged_sets
      WHERE session_id = ?1 AND prescription_id = ?2
      ORDER BY set_number ASC
      "#,
    )
    .bind(session_id)
    .bind(prescription_id)
    .fetch_all(&self.pool)
    .await?;

    Ok(rows)
  }
}
