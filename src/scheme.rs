//! Set schemes: the strategy family that turns a base weight into a
//! sequence of planned sets.
//!
//! Fixed-count schemes (`Fixed`, `RepRange`, `Amrap`, `GreySkull`, `Ramp`,
//! `TopBackoff`) emit their whole set list up front from `generate_sets`.
//! Variable-count schemes (`FatigueDrop`, `Mrs`, `TotalReps`) emit a single
//! provisional first set and then drive a step-by-step state machine via
//! `generate_next_set`, consulting a `TerminationCondition` (see
//! `termination`) on every call.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::{GeneratedSet, TerminationContext};
use crate::rounding::round_down;
use crate::termination::TerminationCondition;

/// Context threaded through set generation. Carries only what the spec
/// says it should: the work-set threshold used by `Ramp`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationContext {
  pub work_set_threshold: f64,
}

impl Default for GenerationContext {
  fn default() -> Self {
    Self {
      work_set_threshold: 80.0,
    }
  }
}

/// One step of a `Ramp` scheme: a percentage of the base weight and a rep
/// target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RampStep {
  pub percentage: f64,
  pub reps: u32,
}

/// A closed sum of set-scheme variants. Every variant validates its own
/// parameters; `generate_sets`/`generate_next_set` are pure functions of
/// `(scheme, base_weight, history, context)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SetScheme {
  Fixed {
    sets: u32,
    reps: u32,
  },
  RepRange {
    sets: u32,
    min_reps: u32,
    max_reps: u32,
  },
  Amrap {
    sets: u32,
    min_reps: u32,
  },
  #[serde(rename = "GREYSKULL")]
  GreySkull {
    fixed_sets: u32,
    fixed_reps: u32,
    amrap_sets: u32,
    min_amrap_reps: u32,
  },
  Ramp {
    steps: Vec<RampStep>,
    /// 0 means "use the context default (80)".
    work_set_threshold: f64,
  },
  TopBackoff {
    top_reps: u32,
    backoff_sets: u32,
    backoff_reps: u32,
    backoff_percent: f64,
  },
  FatigueDrop {
    target_reps: u32,
    start_rpe: f64,
    stop_rpe: f64,
    drop_percent: f64,
    max_sets: u32,
  },
  Mrs {
    target_total_reps: u32,
    min_reps_per_set: u32,
    max_sets: u32,
    number_of_mrs: u32,
  },
  TotalReps {
    target_total_reps: u32,
    suggested_reps_per_set: u32,
    max_sets: u32,
  },
}

const FATIGUE_DROP_DEFAULT_MAX_SETS: u32 = 10;
const MRS_DEFAULT_MAX_SETS: u32 = 10;
const TOTAL_REPS_DEFAULT_MAX_SETS: u32 = 20;

impl SetScheme {
  pub fn type_tag(&self) -> &'static str {
    match self {
      Self::Fixed { .. } => "FIXED",
      Self::RepRange { .. } => "REP_RANGE",
      Self::Amrap { .. } => "AMRAP",
      Self::GreySkull { .. } => "GREYSKULL",
      Self::Ramp { .. } => "RAMP",
      Self::TopBackoff { .. } => "TOP_BACKOFF",
      Self::FatigueDrop { .. } => "FATIGUE_DROP",
      Self::Mrs { .. } => "MRS",
      Self::TotalReps { .. } => "TOTAL_REPS",
    }
  }

  pub fn is_variable_count(&self) -> bool {
    matches!(self, Self::FatigueDrop { .. } | Self::Mrs { .. } | Self::TotalReps { .. })
  }

  /// Validate this scheme's own parameters. Constructors and the factory
  /// both call this before the scheme is usable.
  pub fn validate(&self) -> Result<(), ValidationError> {
    let invalid = |msg: String| Err(ValidationError::InvalidParams(msg));

    match self {
      Self::Fixed { sets, reps } => {
        if *sets < 1 {
          return invalid("Fixed.sets must be >= 1".into());
        }
        if *reps < 1 {
          return invalid("Fixed.reps must be >= 1".into());
        }
      }
      Self::RepRange { sets, min_reps, max_reps } => {
        if *sets < 1 {
          return invalid("RepRange.sets must be >= 1".into());
        }
        if *min_reps < 1 {
          return invalid("RepRange.min_reps must be >= 1".into());
        }
        if max_reps < min_reps {
          return invalid("RepRange.max_reps must be >= min_reps".into());
        }
      }
      Self::Amrap { sets, min_reps } => {
        if *sets < 1 {
          return invalid("Amrap.sets must be >= 1".into());
        }
        if *min_reps < 1 {
          return invalid("Amrap.min_reps must be >= 1".into());
        }
      }
      Self::GreySkull {
        fixed_sets,
        fixed_reps,
        amrap_sets,
        min_amrap_reps,
      } => {
        if *amrap_sets < 1 {
          return invalid("GreySkull.amrap_sets must be >= 1".into());
        }
        if *min_amrap_reps < 1 {
          return invalid("GreySkull.min_amrap_reps must be >= 1".into());
        }
        if *fixed_sets > 0 && *fixed_reps == 0 {
          return invalid("GreySkull.fixed_reps must be > 0 when fixed_sets > 0".into());
        }
      }
      Self::Ramp { steps, work_set_threshold } => {
        if steps.is_empty() {
          return invalid("Ramp.steps must be non-empty".into());
        }
        for step in steps {
          if step.percentage <= 0.0 {
            return invalid("Ramp step percentage must be > 0".into());
          }
          if step.reps < 1 {
            return invalid("Ramp step reps must be >= 1".into());
          }
        }
        if !(0.0..=100.0).contains(work_set_threshold) {
          return invalid("Ramp.work_set_threshold must be in [0,100]".into());
        }
      }
      Self::TopBackoff {
        top_reps,
        backoff_reps,
        backoff_percent,
        ..
      } => {
        if *top_reps < 1 {
          return invalid("TopBackoff.top_reps must be >= 1".into());
        }
        if *backoff_reps < 1 {
          return invalid("TopBackoff.backoff_reps must be >= 1".into());
        }
        if !(0.0..=100.0).contains(backoff_percent) || *backoff_percent <= 0.0 {
          return invalid("TopBackoff.backoff_percent must be in (0,100]".into());
        }
      }
      Self::FatigueDrop {
        target_reps,
        start_rpe,
        stop_rpe,
        drop_percent,
        ..
      } => {
        if *target_reps < 1 {
          return invalid("FatigueDrop.target_reps must be >= 1".into());
        }
        if !(1.0..=10.0).contains(start_rpe) {
          return invalid("FatigueDrop.start_rpe must be in [1,10]".into());
        }
        if !(*start_rpe < *stop_rpe && *stop_rpe <= 10.0) {
          return invalid("FatigueDrop.stop_rpe must be in (start_rpe,10]".into());
        }
        if !(0.0..=1.0).contains(drop_percent) {
          return invalid("FatigueDrop.drop_percent must be in [0,1]".into());
        }
      }
      Self::Mrs {
        target_total_reps,
        min_reps_per_set,
        ..
      } => {
        if *min_reps_per_set < 1 {
          return invalid("Mrs.min_reps_per_set must be >= 1".into());
        }
        if target_total_reps < min_reps_per_set {
          return invalid("Mrs.target_total_reps must be >= min_reps_per_set".into());
        }
      }
      Self::TotalReps { target_total_reps, .. } => {
        if *target_total_reps < 1 {
          return invalid("TotalReps.target_total_reps must be >= 1".into());
        }
      }
    }
    Ok(())
  }

  /// Produce the scheme's set list (fixed-count) or its single provisional
  /// first set (variable-count).
  pub fn generate_sets(
    &self,
    base_weight: f64,
    ctx: &GenerationContext,
  ) -> Result<Vec<GeneratedSet>, ValidationError> {
    self.validate()?;

    let sets = match self {
      Self::Fixed { sets, reps } => (1..=*sets)
        .map(|n| GeneratedSet {
          set_number: n,
          weight: base_weight,
          target_reps: *reps,
          is_work_set: true,
          is_provisional: false,
        })
        .collect(),

      Self::RepRange { sets, min_reps, .. } => (1..=*sets)
        .map(|n| GeneratedSet {
          set_number: n,
          weight: base_weight,
          target_reps: *min_reps,
          is_work_set: true,
          is_provisional: false,
        })
        .collect(),

      Self::Amrap { sets, min_reps } => (1..=*sets)
        .map(|n| GeneratedSet {
          set_number: n,
          weight: base_weight,
          target_reps: *min_reps,
          is_work_set: true,
          is_provisional: false,
        })
        .collect(),

      Self::GreySkull {
        fixed_sets,
        fixed_reps,
        amrap_sets,
        min_amrap_reps,
      } => {
        let mut out = Vec::with_capacity((*fixed_sets + *amrap_sets) as usize);
        for n in 1..=*fixed_sets {
          out.push(GeneratedSet {
            set_number: n,
            weight: base_weight,
            target_reps: *fixed_reps,
            is_work_set: true,
            is_provisional: false,
          });
        }
        for i in 1..=*amrap_sets {
          out.push(GeneratedSet {
            set_number: fixed_sets + i,
            weight: base_weight,
            target_reps: *min_amrap_reps,
            is_work_set: true,
            is_provisional: false,
          });
        }
        out
      }

      Self::Ramp { steps, work_set_threshold } => {
        let threshold = if *work_set_threshold == 0.0 {
          ctx.work_set_threshold
        } else {
          *work_set_threshold
        };
        steps
          .iter()
          .enumerate()
          .map(|(i, step)| GeneratedSet {
            set_number: (i + 1) as u32,
            weight: base_weight * step.percentage / 100.0,
            target_reps: step.reps,
            is_work_set: step.percentage >= threshold,
            is_provisional: false,
          })
          .collect()
      }

      Self::TopBackoff {
        top_reps,
        backoff_sets,
        backoff_reps,
        backoff_percent,
      } => {
        let mut out = vec![GeneratedSet {
          set_number: 1,
          weight: base_weight,
          target_reps: *top_reps,
          is_work_set: true,
          is_provisional: false,
        }];
        for i in 1..=*backoff_sets {
          out.push(GeneratedSet {
            set_number: i + 1,
            weight: base_weight * backoff_percent / 100.0,
            target_reps: *backoff_reps,
            is_work_set: false,
            is_provisional: false,
          });
        }
        out
      }

      Self::FatigueDrop { target_reps, .. } => vec![GeneratedSet {
        set_number: 1,
        weight: base_weight,
        target_reps: *target_reps,
        is_work_set: true,
        is_provisional: true,
      }],

      Self::Mrs { min_reps_per_set, .. } => vec![GeneratedSet {
        set_number: 1,
        weight: base_weight,
        target_reps: *min_reps_per_set,
        is_work_set: true,
        is_provisional: true,
      }],

      Self::TotalReps { suggested_reps_per_set, .. } => vec![GeneratedSet {
        set_number: 1,
        weight: base_weight,
        target_reps: effective_suggested_reps(*suggested_reps_per_set),
        is_work_set: true,
        is_provisional: true,
      }],
    };

    Ok(sets)
  }

  /// The termination condition intrinsic to a variable-count scheme, used
  /// by the session service to report *why* a session stopped.
  pub fn termination_condition(&self) -> Option<TerminationCondition> {
    match self {
      Self::FatigueDrop { stop_rpe, .. } => Some(TerminationCondition::RpeThreshold { threshold: *stop_rpe }),
      Self::Mrs { target_total_reps, .. } => Some(TerminationCondition::TotalReps { target: *target_total_reps }),
      Self::TotalReps { target_total_reps, .. } => Some(TerminationCondition::TotalReps { target: *target_total_reps }),
      _ => None,
    }
  }

  /// Intrinsic target-rep count used to seed a `TerminationContext` when
  /// reconstructing history (see `session` module).
  pub fn intrinsic_target_reps(&self) -> Option<u32> {
    match self {
      Self::FatigueDrop { target_reps, .. } => Some(*target_reps),
      Self::Mrs { min_reps_per_set, .. } => Some(*min_reps_per_set),
      Self::TotalReps { suggested_reps_per_set, .. } => Some(effective_suggested_reps(*suggested_reps_per_set)),
      _ => None,
    }
  }

  /// Produce the next set for a variable-count scheme, or signal
  /// termination. `history` is every set generated so far (including the
  /// provisional first one), in order.
  pub fn generate_next_set(
    &self,
    history: &[GeneratedSet],
    term_ctx: &TerminationContext,
  ) -> (Option<GeneratedSet>, bool) {
    match self {
      Self::FatigueDrop {
        target_reps,
        stop_rpe,
        drop_percent,
        max_sets,
        ..
      } => {
        if (TerminationCondition::RpeThreshold { threshold: *stop_rpe }).should_terminate(term_ctx) {
          return (None, false);
        }
        let effective_max = if *max_sets == 0 { FATIGUE_DROP_DEFAULT_MAX_SETS } else { *max_sets };
        if term_ctx.total_sets >= effective_max {
          return (None, false);
        }
        let Some(last) = history.last() else {
          return (None, false);
        };
        let raw = last.weight * (1.0 - drop_percent);
        let rounded = round_down(raw, 5.0).unwrap_or(raw);
        if rounded <= 0.0 {
          return (None, false);
        }
        (
          Some(GeneratedSet {
            set_number: term_ctx.total_sets + 1,
            weight: rounded,
            target_reps: *target_reps,
            is_work_set: true,
            is_provisional: true,
          }),
          true,
        )
      }

      Self::Mrs {
        target_total_reps,
        min_reps_per_set,
        max_sets,
        ..
      } => {
        if (TerminationCondition::TotalReps { target: *target_total_reps }).should_terminate(term_ctx) {
          return (None, false);
        }
        if term_ctx.total_sets > 0 && term_ctx.last_reps < *min_reps_per_set {
          return (None, false);
        }
        let effective_max = if *max_sets == 0 { MRS_DEFAULT_MAX_SETS } else { *max_sets };
        if term_ctx.total_sets >= effective_max {
          return (None, false);
        }
        let Some(first) = history.first() else {
          return (None, false);
        };
        (
          Some(GeneratedSet {
            set_number: term_ctx.total_sets + 1,
            weight: first.weight,
            target_reps: *min_reps_per_set,
            is_work_set: true,
            is_provisional: true,
          }),
          true,
        )
      }

      Self::TotalReps {
        target_total_reps,
        suggested_reps_per_set,
        max_sets,
      } => {
        if (TerminationCondition::TotalReps { target: *target_total_reps }).should_terminate(term_ctx) {
          return (None, false);
        }
        let effective_max = if *max_sets == 0 { TOTAL_REPS_DEFAULT_MAX_SETS } else { *max_sets };
        if term_ctx.total_sets >= effective_max {
          return (None, false);
        }
        let Some(first) = history.first() else {
          return (None, false);
        };
        (
          Some(GeneratedSet {
            set_number: term_ctx.total_sets + 1,
            weight: first.weight,
            target_reps: effective_suggested_reps(*suggested_reps_per_set),
            is_work_set: true,
            is_provisional: true,
          }),
          true,
        )
      }

      _ => (None, false),
    }
  }
}

fn effective_suggested_reps(suggested: u32) -> u32 {
  if suggested == 0 {
    10
  } else {
    suggested
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn gen(scheme: &SetScheme, base: f64) -> Vec<GeneratedSet> {
    scheme.generate_sets(base, &GenerationContext::default()).unwrap()
  }

  #[test]
  fn fixed_emits_sets_with_monotonic_numbers_and_base_weight() {
    let scheme = SetScheme::Fixed { sets: 3, reps: 5 };
    let sets = gen(&scheme, 225.0);
    assert_eq!(sets.len(), 3);
    for (i, s) in sets.iter().enumerate() {
      assert_eq!(s.set_number, (i + 1) as u32);
      assert_eq!(s.weight, 225.0);
      assert!(s.is_work_set);
      assert!(!s.is_provisional);
    }
  }

  #[test]
  fn rep_range_uses_min_reps_as_target() {
    let scheme = SetScheme::RepRange {
      sets: 3,
      min_reps: 8,
      max_reps: 12,
    };
    let sets = gen(&scheme, 135.0);
    assert!(sets.iter().all(|s| s.target_reps == 8));
  }

  #[test]
  fn amrap_mirrors_fixed_shape() {
    let scheme = SetScheme::Amrap { sets: 1, min_reps: 5 };
    let sets = gen(&scheme, 185.0);
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].target_reps, 5);
    assert_eq!(sets[0].weight, 185.0);
  }

  #[test]
  fn greyskull_emits_fixed_then_amrap_sets() {
    let scheme = SetScheme::GreySkull {
      fixed_sets: 2,
      fixed_reps: 5,
      amrap_sets: 1,
      min_amrap_reps: 5,
    };
    let sets = gen(&scheme, 100.0);
    assert_eq!(sets.len(), 3);
    assert_eq!(sets[0].set_number, 1);
    assert_eq!(sets[2].set_number, 3);
    assert!(sets.iter().all(|s| s.weight == 100.0));
  }

  #[test]
  fn greyskull_requires_fixed_reps_when_fixed_sets_present() {
    let scheme = SetScheme::GreySkull {
      fixed_sets: 2,
      fixed_reps: 0,
      amrap_sets: 1,
      min_amrap_reps: 5,
    };
    assert!(scheme.validate().is_err());
  }

  #[test]
  fn ramp_applies_percentages_and_threshold() {
    let scheme = SetScheme::Ramp {
      steps: vec![
        RampStep { percentage: 65.0, reps: 5 },
        RampStep { percentage: 85.0, reps: 3 },
        RampStep { percentage: 105.0, reps: 1 },
      ],
      work_set_threshold: 80.0,
    };
    let sets = gen(&scheme, 300.0);
    assert_eq!(sets[0].weight, 195.0);
    assert!(!sets[0].is_work_set);
    assert!(sets[1].is_work_set);
    assert!(sets[2].is_work_set);
    // overload percentages are allowed
    assert_eq!(sets[2].weight, 315.0);
  }

  #[test]
  fn ramp_zero_threshold_uses_context_default() {
    let scheme = SetScheme::Ramp {
      steps: vec![RampStep { percentage: 80.0, reps: 1 }],
      work_set_threshold: 0.0,
    };
    let ctx = GenerationContext { work_set_threshold: 80.0 };
    let sets = scheme.generate_sets(100.0, &ctx).unwrap();
    assert!(sets[0].is_work_set);
  }

  #[test]
  fn top_backoff_emits_top_set_then_backoffs() {
    let scheme = SetScheme::TopBackoff {
      top_reps: 1,
      backoff_sets: 2,
      backoff_reps: 5,
      backoff_percent: 90.0,
    };
    let sets = gen(&scheme, 300.0);
    assert_eq!(sets.len(), 3);
    assert_eq!(sets[0].weight, 300.0);
    assert!(sets[0].is_work_set);
    assert_eq!(sets[1].weight, 270.0);
    assert!(!sets[1].is_work_set);
  }

  #[test]
  fn variable_schemes_return_single_provisional_first_set() {
    for scheme in [
      SetScheme::FatigueDrop {
        target_reps: 3,
        start_rpe: 8.0,
        stop_rpe: 10.0,
        drop_percent: 0.05,
        max_sets: 10,
      },
      SetScheme::Mrs {
        target_total_reps: 25,
        min_reps_per_set: 3,
        max_sets: 10,
        number_of_mrs: 1,
      },
      SetScheme::TotalReps {
        target_total_reps: 50,
        suggested_reps_per_set: 10,
        max_sets: 20,
      },
    ] {
      assert!(scheme.is_variable_count());
      let sets = gen(&scheme, 225.0);
      assert_eq!(sets.len(), 1);
      assert!(sets[0].is_provisional);
      assert_eq!(sets[0].set_number, 1);
    }
  }

  // --- Scenario S1: FatigueDrop ---------------------------------------

  #[test]
  fn scenario_fatigue_drop_progression_through_rpes() {
    let scheme = SetScheme::FatigueDrop {
      target_reps: 3,
      start_rpe: 8.0,
      stop_rpe: 10.0,
      drop_percent: 0.05,
      max_sets: 10,
    };
    let mut history = gen(&scheme, 315.0);
    assert_eq!(history[0], GeneratedSet {
      set_number: 1,
      weight: 315.0,
      target_reps: 3,
      is_work_set: true,
      is_provisional: true,
    });

    let rpes = [8.0, 8.5, 9.0, 9.5, 10.0];
    let expected_weights = [315.0, 295.0, 280.0, 265.0, 250.0];
    let mut weights_seen = vec![315.0];

    for (i, &rpe) in rpes.iter().enumerate() {
      let total_sets = history.len() as u32;
      let term_ctx = TerminationContext {
        set_number: total_sets + 1,
        last_rpe: Some(rpe),
        last_reps: 3,
        total_reps: total_sets * 3,
        total_sets,
        target_reps: 3,
      };
      let (next, cont) = scheme.generate_next_set(&history, &term_ctx);
      if i == rpes.len() - 1 {
        assert!(!cont, "rpe=10 should terminate");
        assert!(next.is_none());
      } else {
        assert!(cont);
        let set = next.unwrap();
        weights_seen.push(set.weight);
        history.push(set);
      }
    }

    assert_eq!(weights_seen, expected_weights);
  }

  // --- Scenario S2/S3: MRS ----------------------------------------------

  #[test]
  fn scenario_mrs_terminates_on_target_reps_met() {
    let scheme = SetScheme::Mrs {
      target_total_reps: 25,
      min_reps_per_set: 3,
      max_sets: 10,
      number_of_mrs: 1,
    };
    let mut history = gen(&scheme, 225.0);
    let logged_reps = [10, 8, 5, 4];
    let mut total_reps = 0u32;
    let mut last_cont = true;

    for (i, &reps) in logged_reps.iter().enumerate() {
      total_reps += reps;
      let total_sets = (i + 1) as u32;
      let term_ctx = TerminationContext {
        set_number: total_sets + 1,
        last_rpe: None,
        last_reps: reps,
        total_reps,
        total_sets,
        target_reps: 3,
      };
      let (next, cont) = scheme.generate_next_set(&history, &term_ctx);
      last_cont = cont;
      if let Some(set) = next {
        history.push(set);
      }
      if i < logged_reps.len() - 1 {
        assert!(cont, "should continue before cumulative target is met");
      }
    }

    assert!(!last_cont, "4th call should signal termination: target met");
  }

  #[test]
  fn scenario_mrs_terminates_on_technical_failure() {
    let scheme = SetScheme::Mrs {
      target_total_reps: 25,
      min_reps_per_set: 3,
      max_sets: 10,
      number_of_mrs: 1,
    };
    let history = gen(&scheme, 225.0);
    // After 3 logged sets [10, 6, 2]: last_reps=2 < min_reps_per_set=3.
    let term_ctx = TerminationContext {
      set_number: 4,
      last_rpe: None,
      last_reps: 2,
      total_reps: 18,
      total_sets: 3,
      target_reps: 3,
    };
    let (next, cont) = scheme.generate_next_set(&history, &term_ctx);
    assert!(!cont);
    assert!(next.is_none());
  }

  // --- Scenario S4: TotalReps has no rep-failure termination -------------

  #[test]
  fn scenario_total_reps_does_not_terminate_on_zero_reps() {
    let scheme = SetScheme::TotalReps {
      target_total_reps: 50,
      suggested_reps_per_set: 10,
      max_sets: 20,
    };
    let history = gen(&scheme, 0.0);
    let term_ctx = TerminationContext {
      set_number: 2,
      last_rpe: None,
      last_reps: 0,
      total_reps: 0,
      total_sets: 1,
      target_reps: 10,
    };
    let (next, cont) = scheme.generate_next_set(&history, &term_ctx);
    assert!(cont, "TotalReps has no rep-failure termination");
    assert!(next.is_some());
  }

  #[test]
  fn scheme_round_trips_through_json() {
    let schemes = vec![
      SetScheme::Fixed { sets: 3, reps: 5 },
      SetScheme::RepRange { sets: 3, min_reps: 8, max_reps: 12 },
      SetScheme::Amrap { sets: 1, min_reps: 5 },
      SetScheme::GreySkull {
        fixed_sets: 2,
        fixed_reps: 5,
        amrap_sets: 1,
        min_amrap_reps: 5,
      },
      SetScheme::Ramp {
        steps: vec![RampStep { percentage: 65.0, reps: 5 }],
        work_set_threshold: 80.0,
      },
      SetScheme::TopBackoff {
        top_reps: 1,
        backoff_sets: 2,
        backoff_reps: 5,
        backoff_percent: 90.0,
      },
      SetScheme::FatigueDrop {
        target_reps: 3,
        start_rpe: 8.0,
        stop_rpe: 10.0,
        drop_percent: 0.05,
        max_sets: 10,
      },
      SetScheme::Mrs {
        target_total_reps: 25,
        min_reps_per_set: 3,
        max_sets: 10,
        number_of_mrs: 1,
      },
      SetScheme::TotalReps {
        target_total_reps: 50,
        suggested_reps_per_set: 10,
        max_sets: 20,
      },
    ];

    for scheme in schemes {
      let json = serde_json::to_string(&scheme).unwrap();
      let decoded: SetScheme = serde_json::from_str(&json).unwrap();
      assert_eq!(scheme, decoded);
      assert!(json.contains(scheme.type_tag()));
    }
  }
}
