//! Barbell-increment rounding.
//!
//! Conservative by design: weights are always rounded *down* so a computed
//! prescription never asks for more than the base weight implies.

use crate::error::ValidationError;

/// Round `weight` down to the largest multiple of `increment` that is `<=
/// weight`. `increment` must be strictly positive.
pub fn round_down(weight: f64, increment: f64) -> Result<f64, ValidationError> {
  if increment <= 0.0 {
    return Err(ValidationError::InvalidParams(format!(
      "rounding increment must be > 0, got {}",
      increment
    )));
  }
  Ok((weight / increment).floor() * increment)
}
