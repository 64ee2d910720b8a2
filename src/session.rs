//! Session service: "what set do I do next?" for a variable-count scheme,
//! computed purely from logged history plus the bound set scheme.

use crate::error::EngineError;
use crate::models::{GeneratedSet, TerminationContext};
use crate::scheme::SetScheme;
use crate::scheme_factory::SchemeRegistry;
use crate::store::SessionStore;
use crate::termination::TerminationCondition;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionResult {
  NextSet(GeneratedSet),
  Complete { termination_reason: String },
}

pub struct SessionService<S: SessionStore> {
  store: S,
  registry: SchemeRegistry,
}

impl<S: SessionStore> SessionService<S> {
  pub fn new(store: S) -> Self {
    Self {
      store,
      registry: SchemeRegistry::default(),
    }
  }

  pub async fn next_set(&self, session_id: &str, prescription_id: &str) -> Result<SessionResult, EngineError> {
    let definition = self
      .store
      .scheme_for_prescription(prescription_id)
      .await?
      .ok_or_else(|| EngineError::NotVariableScheme(prescription_id.to_string()))?;

    let scheme = self.registry.decode(&definition)?;
    if !scheme.is_variable_count() {
      return Err(EngineError::NotVariableScheme(prescription_id.to_string()));
    }

    let logged = self.store.logged_sets(session_id, prescription_id).await?;
    if logged.is_empty() {
      return Err(EngineError::NoSetsLogged(prescription_id.to_string(), session_id.to_string()));
    }

    let total_sets = logged.len() as u32;
    let total_reps: u32 = logged.iter().map(|s| s.reps_performed.max(0) as u32).sum();
    let last = logged.last().expect("checked non-empty above");
    let last_reps = last.reps_performed.max(0) as u32;
    let last_rpe = last.rpe;

    let term_ctx = TerminationContext {
      set_number: total_sets + 1,
      last_rpe,
      last_reps,
      total_reps,
      total_sets,
      target_reps: scheme.intrinsic_target_reps().unwrap_or(0),
    };

    let history: Vec<GeneratedSet> = logged
      .iter()
      .map(|logged_set| GeneratedSet {
        set_number: logged_set.set_number.max(0) as u32,
        weight: logged_set.weight,
        target_reps: logged_set.target_reps.max(0) as u32,
        is_work_set: true,
        is_provisional: false,
      })
      .collect();

    let (next, should_continue) = scheme.generate_next_set(&history, &term_ctx);

    if !should_continue {
      return Ok(SessionResult::Complete {
        termination_reason: termination_reason(&scheme, &term_ctx),
      });
    }

    match next {
      Some(set) => Ok(SessionResult::NextSet(set)),
      None => Ok(SessionResult::Complete {
        termination_reason: termination_reason(&scheme, &term_ctx),
      }),
    }
  }
}

/// First matching predicate wins: target-met phrasing, rep-failure
/// phrasing, max-sets phrasing. The only user-facing copy the core owns.
fn termination_reason(scheme: &SetScheme, ctx: &TerminationContext) -> String {
  if let Some(condition) = scheme.termination_condition() {
    if condition.should_terminate(ctx) {
      return match condition {
        TerminationCondition::RpeThreshold { .. } => "stop RPE reached".to_string(),
        TerminationCondition::TotalReps { .. } => "target total reps reached".to_string(),
        TerminationCondition::RepFailure | TerminationCondition::MaxSets { .. } => "termination condition met".to_string(),
      };
    }
  }

  if matches!(scheme, SetScheme::Mrs { .. }) {
    if let Some(min_reps) = scheme.intrinsic_target_reps() {
      if ctx.total_sets > 0 && ctx.last_reps < min_reps {
        return "technical failure: reps below minimum".to_string();
      }
    }
  }

  "maximum sets reached".to_string()
}
