//! Test infrastructure shared across `#[cfg(test)]` modules.
//!
//! Mirrors the teacher's `test_utils.rs`: an in-memory SQLite pool with
//! migrations applied, plus small seed helpers for the tables that sit
//! outside the `EngineStore` write surface (program/progression bindings
//! and enrollments are authored by an excluded CRUD layer; tests seed
//! them directly).

use sqlx::sqlite::SqlitePool;

/// Create an in-memory SQLite database for testing. Runs all migrations
/// and returns a ready-to-use pool.
///
/// Uses `max_connections(1)` so the whole test shares one connection;
/// otherwise each connection would see its own private in-memory
/// database and inserts made on one would be invisible on another.
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Seed one program/progression binding. `definition_json` is the tagged
/// JSON body a `ProgressionRegistry` would decode.
pub async fn seed_binding(
  pool: &SqlitePool,
  id: &str,
  program_id: &str,
  progression_id: &str,
  definition_json: &str,
  lift_id: Option<&str>,
  priority: i64,
) {
  sqlx::query(
    r#"
    INSERT INTO program_progressions
      (id, program_id, progression_id, progression_definition, lift_id, priority, enabled, override_increment)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, NULL)
    "#,
  )
  .bind(id)
  .bind(program_id)
  .bind(progression_id)
  .bind(definition_json)
  .bind(lift_id)
  .bind(priority)
  .execute(pool)
  .await
  .expect("Failed to seed binding");
}

pub async fn seed_program_lift(pool: &SqlitePool, program_id: &str, lift_id: &str) {
  sqlx::query(
    r#"
    INSERT OR IGNORE INTO program_lifts (program_id, lift_id)
    VALUES (?1, ?2)
    "#,
  )
  .bind(program_id)
  .bind(lift_id)
  .execute(pool)
  .await
  .expect("Failed to seed program lift");
}

pub async fn seed_prescription(pool: &SqlitePool, id: &str, scheme_json: &str) {
  sqlx::query(
    r#"
    INSERT INTO prescriptions (id, scheme_definition)
    VALUES (?1, ?2)
    ON CONFLICT(id) DO UPDATE SET scheme_definition = excluded.scheme_definition
    "#,
  )
  .bind(id)
  .bind(scheme_json)
  .execute(pool)
  .await
  .expect("Failed to seed prescription");
}

#[allow(clippy::too_many_arguments)]
pub async fn seed_logged_set(
  pool: &SqlitePool,
  id: &str,
  user_id: &str,
  lift_id: &str,
  session_id: &str,
  prescription_id: &str,
  set_number: i64,
  target_reps: i64,
  reps_performed: i64,
  weight: f64,
  rpe: Option<f64>,
) {
  sqlx::query(
    r#"
    INSERT INTO logged_sets
      (id, user_id, lift_id, session_id, prescription_id, set_number,
       target_reps, reps_performed, weight, rpe, created_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
    "#,
  )
  .bind(id)
  .bind(user_id)
  .bind(lift_id)
  .bind(session_id)
  .bind(prescription_id)
  .bind(set_number)
  .bind(target_reps)
  .bind(reps_performed)
  .bind(weight)
  .bind(rpe)
  .bind(chrono::Utc::now().to_rfc3339())
  .execute(pool)
  .await
  .expect("Failed to seed logged set");
}

pub async fn seed_enrollment(pool: &SqlitePool, user_id: &str, program_id: &str) {
  sqlx::query(
    r#"
    INSERT INTO program_enrollments (user_id, program_id)
    VALUES (?1, ?2)
    ON CONFLICT(user_id) DO UPDATE SET program_id = excluded.program_id
    "#,
  )
  .bind(user_id)
  .bind(program_id)
  .execute(pool)
  .await
  .expect("Failed to seed enrollment");
}
