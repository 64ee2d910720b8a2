//! `ProgressionService`: matches a `TriggerEvent` against every eligible
//! `ProgramProgression` binding and applies each one in its own
//! transaction.
//!
//! A binding is eligible when it is enabled, its decoded progression's
//! `Progression::trigger_type()` matches the event's `trigger_type()`, and
//! its `lift_id` scope resolves to at least one concrete lift. Each
//! eligible `(binding, lift)` pair is processed independently: one
//! binding failing validation never blocks another from applying.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::Value;

use crate::config::EngineConfig;
use crate::error::{EngineError, StoreError};
use crate::models::{MaxType, TriggerType};
use crate::progression::ProgressionContext;
use crate::progression_factory::ProgressionRegistry;
use crate::store::{ApplyProgressionInput, EngineStore};
use crate::trigger::{
  CycleTriggerContext, FailureTriggerContext, ManualTriggerContext, SessionTriggerContext, SetTriggerContext, TriggerEvent,
  WeekTriggerContext,
};

/// Progressions mutate the training max, not the caller-entered true max.
/// A `LiftMax` row with `max_type = ONE_RM` is only ever written directly
/// by the (out-of-scope) program editor.
const PROGRESSION_MAX_TYPE: MaxType = MaxType::TrainingMax;

#[derive(Debug, Clone, PartialEq)]
pub enum TriggerOutcome {
  Applied {
    lift_id: String,
    progression_id: String,
    previous_value: f64,
    new_value: f64,
    delta: f64,
  },
  Skipped {
    lift_id: String,
    progression_id: String,
    reason: String,
  },
  AlreadyApplied {
    lift_id: String,
    progression_id: String,
  },
}

pub struct ProgressionService<S: EngineStore> {
  store: Arc<S>,
  registry: ProgressionRegistry,
  config: EngineConfig,
}

impl<S: EngineStore> ProgressionService<S> {
  pub fn new(store: Arc<S>, config: EngineConfig) -> Self {
    Self {
      store,
      registry: ProgressionRegistry::default(),
      config,
    }
  }

  pub async fn handle_session_complete(&self, ctx: SessionTriggerContext) -> Result<Vec<TriggerOutcome>, EngineError> {
    self.process_progressions(TriggerEvent::Session(ctx)).await
  }

  pub async fn handle_set_logged(&self, ctx: SetTriggerContext) -> Result<Vec<TriggerOutcome>, EngineError> {
    self.process_progressions(TriggerEvent::Set(ctx)).await
  }

  pub async fn handle_week_advance(&self, ctx: WeekTriggerContext) -> Result<Vec<TriggerOutcome>, EngineError> {
    self.process_progressions(TriggerEvent::Week(ctx)).await
  }

  pub async fn handle_cycle_complete(&self, ctx: CycleTriggerContext) -> Result<Vec<TriggerOutcome>, EngineError> {
    self.process_progressions(TriggerEvent::Cycle(ctx)).await
  }

  pub async fn handle_failure(&self, ctx: FailureTriggerContext) -> Result<Vec<TriggerOutcome>, EngineError> {
    self.process_progressions(TriggerEvent::Failure(ctx)).await
  }

  /// Apply one named binding directly, bypassing the normal trigger-type
  /// match. Used for a caller-initiated "apply this progression now".
  ///
  /// `ctx.force` bypasses the idempotency lookup entirely and stamps
  /// `applied_at`/`effective_date` with a fresh, nanosecond-resolution
  /// `Utc::now()` plus a deliberate +1 second offset: RFC3339 text for the
  /// same wall-clock second as a prior natural write would otherwise tie
  /// under lexicographic ordering, and a forced apply must always read
  /// back as the new current max even when called twice in a row.
  pub async fn apply_progression_manually(&self, ctx: ManualTriggerContext) -> Result<Vec<TriggerOutcome>, EngineError> {
    self.process_progressions(TriggerEvent::Manual(ctx)).await
  }

  pub async fn process_progressions(&self, event: TriggerEvent) -> Result<Vec<TriggerOutcome>, EngineError> {
    event.validate()?;

    let user_id = event.user_id().to_string();
    let program_id = self
      .store
      .program_for_user(&user_id)
      .await?
      .ok_or_else(|| EngineError::UserNotEnrolled(user_id.clone()))?;

    let bindings = self.store.bindings_for_program(&program_id).await?;
    let event_trigger_type = event.trigger_type();
    let lifts_filter = event.lifts_filter();
    let force = matches!(&event, TriggerEvent::Manual(ctx) if ctx.force);

    let mut outcomes = Vec::new();
    let mut matched_any = false;

    for binding in bindings.iter().filter(|b| b.enabled) {
      let Some(definition) = self.store.progression_definition(&binding.progression_id).await? else {
        continue;
      };
      let progression = match self.registry.decode(&definition) {
        Ok(p) => p,
        Err(_) => continue,
      };
      if progression.trigger_type() != event_trigger_type {
        continue;
      }

      let targets = self
        .resolve_targets(&program_id, binding.lift_id.as_deref(), lifts_filter.as_deref())
        .await?;

      for lift_id in targets {
        matched_any = true;

        let applied_at = if force { Utc::now() + Duration::seconds(1) } else { event.occurred_at() };
        let trigger_type_str = event_trigger_type.to_string();

        if !force {
          if self
            .store
            .find_log(&user_id, &binding.progression_id, &lift_id, &trigger_type_str, applied_at)
            .await?
            .is_some()
          {
            outcomes.push(TriggerOutcome::AlreadyApplied {
              lift_id,
              progression_id: binding.progression_id.clone(),
            });
            continue;
          }
        }

        let Some(current_max) = self.store.get_current_max(&user_id, &lift_id, PROGRESSION_MAX_TYPE).await? else {
          outcomes.push(TriggerOutcome::Skipped {
            lift_id,
            progression_id: binding.progression_id.clone(),
            reason: "no recorded training max for this lift".to_string(),
          });
          continue;
        };

        let consecutive_failures = self
          .store
          .get_consecutive_failures(&user_id, &lift_id, &binding.progression_id)
          .await?;
        let current_stage = self.store.get_stage(&user_id, &binding.progression_id).await?;

        let ctx = ProgressionContext {
          current_value: current_max.value,
          rounding_increment: self.config.default_rounding_increment,
          current_stage,
          consecutive_failures,
          ..progression_fields(&event)
        };

        let result = progression.apply_with_override(&ctx, binding.override_increment)?;

        if !result.applied {
          outcomes.push(TriggerOutcome::Skipped {
            lift_id,
            progression_id: binding.progression_id.clone(),
            reason: "progression criteria not met".to_string(),
          });
          continue;
        }

        let trigger_context = build_trigger_context(&event)?;

        let output = self
          .store
          .apply_progression(ApplyProgressionInput {
            user_id: user_id.clone(),
            lift_id: lift_id.clone(),
            progression_id: binding.progression_id.clone(),
            max_type: PROGRESSION_MAX_TYPE,
            previous_value: current_max.value,
            new_value: result.new_value,
            delta: result.delta,
            trigger_type: trigger_type_str,
            trigger_context,
            applied_at,
            new_stage: result.new_stage,
          })
          .await?;

        if event_trigger_type == TriggerType::OnFailure {
          self.store.reset_failures(&user_id, &lift_id, &binding.progression_id).await?;
        }

        outcomes.push(TriggerOutcome::Applied {
          lift_id,
          progression_id: binding.progression_id.clone(),
          previous_value: output.log.previous_value,
          new_value: output.log.new_value,
          delta: output.log.delta,
        });
      }
    }

    if !matched_any {
      return Err(EngineError::NoApplicableProgressions);
    }

    Ok(outcomes)
  }

  /// `binding_lift_id` is the binding's own scope; `filter` is the set of
  /// lifts the event itself targets (`None` means every lift). A
  /// program-wide binding (`binding_lift_id = None`) is only honored when
  /// the event has no filter at all (week/cycle); a filtered event (e.g.
  /// session, which always names specific lifts) leaves it unmatched.
  async fn resolve_targets(&self, program_id: &str, binding_lift_id: Option<&str>, filter: Option<&[String]>) -> Result<Vec<String>, EngineError> {
    let targets = match (binding_lift_id, filter) {
      (Some(binding_lift), Some(allowed)) => {
        if allowed.iter().any(|lift| lift == binding_lift) {
          vec![binding_lift.to_string()]
        } else {
          vec![]
        }
      }
      (Some(binding_lift), None) => vec![binding_lift.to_string()],
      (None, Some(_)) => vec![],
      (None, None) => self.store.lifts_for_program(program_id).await?,
    };
    Ok(targets)
  }
}

/// Fields of `ProgressionContext` that vary by trigger shape. Everything
/// else (current_value, rounding_increment, current_stage,
/// consecutive_failures) is filled in by the caller.
fn progression_fields(event: &TriggerEvent) -> ProgressionContext {
  let mut ctx = ProgressionContext {
    current_value: 0.0,
    rounding_increment: 5.0,
    is_amrap: false,
    reps_performed: None,
    max_reps: None,
    consecutive_failures: 0,
    current_stage: 0,
  };

  if let TriggerEvent::Set(set) = event {
    ctx.is_amrap = set.is_amrap;
    ctx.reps_performed = Some(set.reps_performed);
    ctx.max_reps = set.max_reps;
  }

  ctx
}

/// The audit JSON persisted alongside a `ProgressionLog` row. A manual
/// event gains explicit `manual`/`force` keys on top of its normal
/// serialized shape, so the audit trail always records whether an apply
/// bypassed the ordinary matching and idempotency rules.
fn build_trigger_context(event: &TriggerEvent) -> Result<String, StoreError> {
  let mut value: Value = serde_json::to_value(event)?;
  if let TriggerEvent::Manual(ctx) = event {
    if let Some(object) = value.as_object_mut() {
      object.insert("manual".to_string(), Value::Bool(true));
      object.insert("force".to_string(), Value::Bool(ctx.force));
    }
  }
  Ok(serde_json::to_string(&value)?)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::store::sqlite::SqliteEngineStore;
  use crate::store::{FailureCounterStore, LiftMaxStore};
  use crate::test_support::{seed_binding, seed_enrollment, seed_program_lift, setup_test_db};
  use chrono::{DateTime, TimeZone, Utc};
  use serde_json::json;

  async fn service_with_store() -> (ProgressionService<SqliteEngineStore>, Arc<SqliteEngineStore>) {
    let pool = setup_test_db().await;
    let store = Arc::new(SqliteEngineStore::new(pool));
    let service = ProgressionService::new(store.clone(), EngineConfig::default());
    (service, store)
  }

  fn ts(secs_from_epoch: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs_from_epoch, 0).unwrap()
  }

  #[tokio::test]
  async fn linear_progression_applies_on_week_advance() {
    let (service, store) = service_with_store().await;
    seed_enrollment(store.pool(), "u1", "prog_a").await;
    seed_binding(
      store.pool(),
      "b1",
      "prog_a",
      "linear_squat",
      &json!({"type": "LINEAR", "increment": 5.0, "trigger_type": "AFTER_WEEK"}).to_string(),
      Some("squat"),
      0,
    )
    .await;
    store.insert_max("u1", "squat", MaxType::TrainingMax, 300.0, ts(1000)).await.unwrap();

    let outcomes = service
      .handle_week_advance(WeekTriggerContext {
        user_id: "u1".into(),
        program_id: "prog_a".into(),
        week_number: 2,
        lift_id: None,
        occurred_at: ts(2000),
      })
      .await
      .unwrap();

    assert_eq!(outcomes.len(), 1);
    match &outcomes[0] {
      TriggerOutcome::Applied { new_value, delta, .. } => {
        assert_eq!(*new_value, 305.0);
        assert_eq!(*delta, 5.0);
      }
      other => panic!("expected Applied, got {other:?}"),
    }

    let current = store.get_current_max("u1", "squat", MaxType::TrainingMax).await.unwrap().unwrap();
    assert_eq!(current.value, 305.0);
  }

  #[tokio::test]
  async fn reapplying_same_trigger_instant_is_idempotent() {
    let (service, store) = service_with_store().await;
    seed_enrollment(store.pool(), "u1", "prog_a").await;
    seed_binding(
      store.pool(),
      "b1",
      "prog_a",
      "linear_squat",
      &json!({"type": "LINEAR", "increment": 5.0, "trigger_type": "AFTER_WEEK"}).to_string(),
      Some("squat"),
      0,
    )
    .await;
    store.insert_max("u1", "squat", MaxType::TrainingMax, 300.0, ts(1000)).await.unwrap();

    let event = WeekTriggerContext {
      user_id: "u1".into(),
      program_id: "prog_a".into(),
      week_number: 2,
      lift_id: None,
      occurred_at: ts(2000),
    };

    let first = service.handle_week_advance(event.clone()).await.unwrap();
    assert!(matches!(first[0], TriggerOutcome::Applied { .. }));

    let second = service.handle_week_advance(event).await.unwrap();
    assert!(matches!(second[0], TriggerOutcome::AlreadyApplied { .. }));
  }

  #[tokio::test]
  async fn program_wide_binding_fans_out_across_enrolled_lifts() {
    let (service, store) = service_with_store().await;
    seed_enrollment(store.pool(), "u1", "prog_a").await;
    seed_program_lift(store.pool(), "prog_a", "squat").await;
    seed_program_lift(store.pool(), "prog_a", "bench").await;
    seed_binding(
      store.pool(),
      "b1",
      "prog_a",
      "linear_all",
      &json!({"type": "LINEAR", "increment": 2.5, "trigger_type": "AFTER_WEEK"}).to_string(),
      None,
      0,
    )
    .await;
    store.insert_max("u1", "squat", MaxType::TrainingMax, 300.0, ts(1000)).await.unwrap();
    store.insert_max("u1", "bench", MaxType::TrainingMax, 200.0, ts(1000)).await.unwrap();

    let outcomes = service
      .handle_week_advance(WeekTriggerContext {
        user_id: "u1".into(),
        program_id: "prog_a".into(),
        week_number: 1,
        lift_id: None,
        occurred_at: ts(2000),
      })
      .await
      .unwrap();

    assert_eq!(outcomes.len(), 2);
  }

  #[tokio::test]
  async fn session_trigger_fans_out_over_lifts_performed_in_priority_order() {
    let (service, store) = service_with_store().await;
    seed_enrollment(store.pool(), "u1", "prog_a").await;
    seed_binding(
      store.pool(),
      "b1",
      "prog_a",
      "linear_squat",
      &json!({"type": "LINEAR", "increment": 5.0, "trigger_type": "AFTER_SESSION"}).to_string(),
      Some("squat"),
      0,
    )
    .await;
    seed_binding(
      store.pool(),
      "b2",
      "prog_a",
      "linear_bench",
      &json!({"type": "LINEAR", "increment": 2.5, "trigger_type": "AFTER_SESSION"}).to_string(),
      Some("bench"),
      1,
    )
    .await;
    store.insert_max("u1", "squat", MaxType::TrainingMax, 300.0, ts(1000)).await.unwrap();
    store.insert_max("u1", "bench", MaxType::TrainingMax, 200.0, ts(1000)).await.unwrap();

    let outcomes = service
      .handle_session_complete(SessionTriggerContext {
        user_id: "u1".into(),
        session_id: "s1".into(),
        day_slug: "day-a".into(),
        week_number: 1,
        lifts_performed: vec!["squat".into(), "bench".into()],
        occurred_at: ts(2000),
      })
      .await
      .unwrap();

    assert_eq!(outcomes.len(), 2);
    match &outcomes[0] {
      TriggerOutcome::Applied { lift_id, .. } => assert_eq!(lift_id, "squat"),
      other => panic!("expected Applied, got {other:?}"),
    }
    match &outcomes[1] {
      TriggerOutcome::Applied { lift_id, .. } => assert_eq!(lift_id, "bench"),
      other => panic!("expected Applied, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn session_trigger_never_honors_a_program_wide_binding() {
    let (service, store) = service_with_store().await;
    seed_enrollment(store.pool(), "u1", "prog_a").await;
    seed_program_lift(store.pool(), "prog_a", "squat").await;
    seed_binding(
      store.pool(),
      "b1",
      "prog_a",
      "linear_all",
      &json!({"type": "LINEAR", "increment": 2.5, "trigger_type": "AFTER_SESSION"}).to_string(),
      None,
      0,
    )
    .await;
    store.insert_max("u1", "squat", MaxType::TrainingMax, 300.0, ts(1000)).await.unwrap();

    let result = service
      .handle_session_complete(SessionTriggerContext {
        user_id: "u1".into(),
        session_id: "s1".into(),
        day_slug: "day-a".into(),
        week_number: 1,
        lifts_performed: vec!["squat".into()],
        occurred_at: ts(2000),
      })
      .await;

    assert!(matches!(result, Err(EngineError::NoApplicableProgressions)));
  }

  #[tokio::test]
  async fn forced_manual_apply_bypasses_idempotency_twice_in_a_row() {
    let (service, store) = service_with_store().await;
    seed_enrollment(store.pool(), "u1", "prog_a").await;
    seed_binding(
      store.pool(),
      "b1",
      "prog_a",
      "linear_squat",
      &json!({"type": "LINEAR", "increment": 5.0, "trigger_type": "AFTER_SESSION"}).to_string(),
      Some("squat"),
      0,
    )
    .await;
    store.insert_max("u1", "squat", MaxType::TrainingMax, 300.0, ts(1000)).await.unwrap();

    let ctx = ManualTriggerContext {
      user_id: "u1".into(),
      lift_id: "squat".into(),
      progression_id: "linear_squat".into(),
      logged_as: TriggerType::AfterSession,
      force: true,
      occurred_at: ts(2000),
    };

    let first = service.apply_progression_manually(ctx.clone()).await.unwrap();
    assert!(matches!(first[0], TriggerOutcome::Applied { .. }));

    let second = service.apply_progression_manually(ctx).await.unwrap();
    assert!(matches!(second[0], TriggerOutcome::Applied { .. }));

    let current = store.get_current_max("u1", "squat", MaxType::TrainingMax).await.unwrap().unwrap();
    assert_eq!(current.value, 310.0);
  }

  #[tokio::test]
  async fn unforced_manual_apply_still_honors_idempotency() {
    let (service, store) = service_with_store().await;
    seed_enrollment(store.pool(), "u1", "prog_a").await;
    seed_binding(
      store.pool(),
      "b1",
      "prog_a",
      "linear_squat",
      &json!({"type": "LINEAR", "increment": 5.0, "trigger_type": "AFTER_SESSION"}).to_string(),
      Some("squat"),
      0,
    )
    .await;
    store.insert_max("u1", "squat", MaxType::TrainingMax, 300.0, ts(1000)).await.unwrap();

    let ctx = ManualTriggerContext {
      user_id: "u1".into(),
      lift_id: "squat".into(),
      progression_id: "linear_squat".into(),
      logged_as: TriggerType::AfterSession,
      force: false,
      occurred_at: ts(2000),
    };

    let first = service.apply_progression_manually(ctx.clone()).await.unwrap();
    assert!(matches!(first[0], TriggerOutcome::Applied { .. }));

    let second = service.apply_progression_manually(ctx).await.unwrap();
    assert!(matches!(second[0], TriggerOutcome::AlreadyApplied { .. }));
  }

  #[tokio::test]
  async fn amrap_applies_from_a_set_trigger_using_thresholds() {
    let (service, store) = service_with_store().await;
    seed_enrollment(store.pool(), "u1", "prog_a").await;
    seed_binding(
      store.pool(),
      "b1",
      "prog_a",
      "amrap_squat",
      &json!({
        "type": "AMRAP",
        "thresholds": [
          {"min_reps": 2, "increment": 5.0},
          {"min_reps": 4, "increment": 10.0},
          {"min_reps": 6, "increment": 15.0}
        ]
      })
      .to_string(),
      Some("squat"),
      0,
    )
    .await;
    store.insert_max("u1", "squat", MaxType::TrainingMax, 300.0, ts(1000)).await.unwrap();

    let outcomes = service
      .handle_set_logged(SetTriggerContext {
        user_id: "u1".into(),
        lift_id: "squat".into(),
        is_amrap: true,
        reps_performed: 4,
        max_reps: None,
        occurred_at: ts(2000),
      })
      .await
      .unwrap();

    match &outcomes[0] {
      TriggerOutcome::Applied { delta, new_value, .. } => {
        assert_eq!(*delta, 10.0);
        assert_eq!(*new_value, 310.0);
      }
      other => panic!("expected Applied, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn amrap_skips_when_reps_below_every_threshold() {
    let (service, store) = service_with_store().await;
    seed_enrollment(store.pool(), "u1", "prog_a").await;
    seed_binding(
      store.pool(),
      "b1",
      "prog_a",
      "amrap_squat",
      &json!({
        "type": "AMRAP",
        "thresholds": [
          {"min_reps": 2, "increment": 5.0},
          {"min_reps": 4, "increment": 10.0},
          {"min_reps": 6, "increment": 15.0}
        ]
      })
      .to_string(),
      Some("squat"),
      0,
    )
    .await;
    store.insert_max("u1", "squat", MaxType::TrainingMax, 300.0, ts(1000)).await.unwrap();

    let outcomes = service
      .handle_set_logged(SetTriggerContext {
        user_id: "u1".into(),
        lift_id: "squat".into(),
        is_amrap: true,
        reps_performed: 1,
        max_reps: None,
        occurred_at: ts(2000),
      })
      .await
      .unwrap();

    assert!(matches!(outcomes[0], TriggerOutcome::Skipped { .. }));
  }

  #[tokio::test]
  async fn cycle_binding_override_increment_replaces_the_declared_increment() {
    let (service, store) = service_with_store().await;
    seed_enrollment(store.pool(), "u1", "prog_a").await;
    sqlx::query(
      r#"
      INSERT INTO program_progressions
        (id, program_id, progression_id, progression_definition, lift_id, priority, enabled, override_increment)
      VALUES ('b1', 'prog_a', 'cycle_squat', ?1, 'squat', 0, 1, 2.0)
      "#,
    )
    .bind(json!({"type": "CYCLE", "increment": 7.5}).to_string())
    .execute(store.pool())
    .await
    .unwrap();
    store.insert_max("u1", "squat", MaxType::TrainingMax, 300.0, ts(1000)).await.unwrap();

    let outcomes = service
      .handle_cycle_complete(CycleTriggerContext {
        user_id: "u1".into(),
        program_id: "prog_a".into(),
        cycle_number: 1,
        lift_id: None,
        occurred_at: ts(2000),
      })
      .await
      .unwrap();

    match &outcomes[0] {
      TriggerOutcome::Applied { delta, new_value, .. } => {
        assert_eq!(*delta, 2.0);
        assert_eq!(*new_value, 302.0);
      }
      other => panic!("expected Applied, got {other:?}"),
    }
  }

  #[tokio::test]
  async fn deload_on_failure_resets_counter_after_applying() {
    let (service, store) = service_with_store().await;
    seed_enrollment(store.pool(), "u1", "prog_a").await;
    seed_binding(
      store.pool(),
      "b1",
      "prog_a",
      "deload_squat",
      &json!({"type": "DELOAD_ON_FAILURE", "failure_threshold": 3, "deload_percent": 0.1}).to_string(),
      Some("squat"),
      0,
    )
    .await;
    store.insert_max("u1", "squat", MaxType::TrainingMax, 300.0, ts(1000)).await.unwrap();
    store.increment_failures("u1", "squat", "deload_squat").await.unwrap();
    store.increment_failures("u1", "squat", "deload_squat").await.unwrap();
    store.increment_failures("u1", "squat", "deload_squat").await.unwrap();

    let outcomes = service
      .handle_failure(FailureTriggerContext {
        user_id: "u1".into(),
        lift_id: "squat".into(),
        progression_id: "deload_squat".into(),
        consecutive_failures: 3,
        occurred_at: ts(2000),
      })
      .await
      .unwrap();

    assert!(matches!(outcomes[0], TriggerOutcome::Applied { .. }));
    assert_eq!(store.get_consecutive_failures("u1", "squat", "deload_squat").await.unwrap(), 0);
  }

  #[tokio::test]
  async fn errors_when_user_not_enrolled() {
    let (service, _store) = service_with_store().await;
    let result = service
      .handle_week_advance(WeekTriggerContext {
        user_id: "ghost".into(),
        program_id: "prog_a".into(),
        week_number: 1,
        lift_id: None,
        occurred_at: ts(1000),
      })
      .await;
    assert!(matches!(result, Err(EngineError::UserNotEnrolled(_))));
  }

  #[tokio::test]
  async fn skips_when_no_recorded_max() {
    let (service, store) = service_with_store().await;
    seed_enrollment(store.pool(), "u1", "prog_a").await;
    seed_binding(
      store.pool(),
      "b1",
      "prog_a",
      "linear_squat",
      &json!({"type": "LINEAR", "increment": 5.0, "trigger_type": "AFTER_WEEK"}).to_string(),
      Some("squat"),
      0,
    )
    .await;

    let outcomes = service
      .handle_week_advance(WeekTriggerContext {
        user_id: "u1".into(),
        program_id: "prog_a".into(),
        week_number: 1,
        lift_id: None,
        occurred_at: ts(1000),
      })
      .await
      .unwrap();

    assert!(matches!(outcomes[0], TriggerOutcome::Skipped { .. }));
  }
}
