//! Failure classification (C9) driving the per-binding failure counter
//! (C8).
//!
//! Invoked once per logged set. A set is a failure when fewer reps were
//! performed than prescribed; a failure increments the counter for every
//! enabled binding on that lift, a success resets it. A binding whose
//! progression is itself `ON_FAILURE`-triggered gets its failure handed
//! straight to the orchestrator rather than waiting for a separate poll.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::models::TriggerType;
use crate::orchestrator::{ProgressionService, TriggerOutcome};
use crate::progression_factory::ProgressionRegistry;
use crate::store::EngineStore;
use crate::trigger::FailureTriggerContext;

/// One logged set, as seen by the failure classifier.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedSetOutcome {
  pub user_id: String,
  pub lift_id: String,
  pub target_reps: u32,
  pub reps_performed: u32,
  pub occurred_at: DateTime<Utc>,
}

impl LoggedSetOutcome {
  pub fn is_failure(&self) -> bool {
    self.reps_performed < self.target_reps
  }
}

/// Per-binding result of classifying one logged set.
#[derive(Debug, Clone, PartialEq)]
pub enum FailureClassification {
  /// The binding's counter was reset; no further action.
  Reset { progression_id: String },
  /// The counter was incremented but the bound progression isn't
  /// `ON_FAILURE`-triggered, so nothing downstream fires yet.
  Incremented { progression_id: String, consecutive_failures: u32 },
  /// The counter was incremented and the bound progression is
  /// `ON_FAILURE`-triggered; its outcomes are attached.
  Triggered {
    progression_id: String,
    consecutive_failures: u32,
    outcomes: Vec<TriggerOutcome>,
  },
}

pub struct FailureService<S: EngineStore> {
  store: Arc<S>,
  orchestrator: ProgressionService<S>,
  registry: ProgressionRegistry,
}

impl<S: EngineStore> FailureService<S> {
  pub fn new(store: Arc<S>, config: EngineConfig) -> Self {
    Self {
      orchestrator: ProgressionService::new(store.clone(), config),
      store,
      registry: ProgressionRegistry::default(),
    }
  }

  /// Classify one logged set against every enabled binding for its lift,
  /// within the user's enrolled program.
  pub async fn classify_logged_set(&self, set: LoggedSetOutcome) -> Result<Vec<FailureClassification>, EngineError> {
    let program_id = self
      .store
      .program_for_user(&set.user_id)
      .await?
      .ok_or_else(|| EngineError::UserNotEnrolled(set.user_id.clone()))?;

    let bindings = self.store.bindings_for_program(&program_id).await?;
    let failure = set.is_failure();

    let mut results = Vec::new();

    for binding in bindings.iter().filter(|b| b.enabled) {
      let matches_lift = match &binding.lift_id {
        Some(lift_id) => lift_id == &set.lift_id,
        None => false,
      };
      if !matches_lift {
        continue;
      }

      if !failure {
        self.store.reset_failures(&set.user_id, &set.lift_id, &binding.progression_id).await?;
        results.push(FailureClassification::Reset {
          progression_id: binding.progression_id.clone(),
        });
        continue;
      }

      let consecutive_failures = self
        .store
        .increment_failures(&set.user_id, &set.lift_id, &binding.progression_id)
        .await?;

      let is_failure_triggered = match self.store.progression_definition(&binding.progression_id).await? {
        Some(definition) => self
          .registry
          .decode(&definition)
          .map(|p| p.trigger_type() == TriggerType::OnFailure)
          .unwrap_or(false),
        None => false,
      };

      if !is_failure_triggered {
        results.push(FailureClassification::Incremented {
          progression_id: binding.progression_id.clone(),
          consecutive_failures,
        });
        continue;
      }

      let outcomes = self
        .orchestrator
        .handle_failure(FailureTriggerContext {
          user_id: set.user_id.clone(),
          lift_id: set.lift_id.clone(),
          progression_id: binding.progression_id.clone(),
          consecutive_failures,
          occurred_at: set.occurred_at,
        })
        .await?;

      results.push(FailureClassification::Triggered {
        progression_id: binding.progression_id.clone(),
        consecutive_failures,
        outcomes,
      });
    }

    Ok(results)
  }
}
