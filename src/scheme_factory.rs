//! Runtime registry for set schemes.
//!
//! `SetScheme` already round-trips through serde on its own tag; this
//! registry exists for callers that want to validate an incoming tag
//! against a known set before attempting to decode it (e.g. a program
//! editor rejecting an unknown scheme type at save time, not at read
//! time). Re-registering an already-known tag is a no-op, not an error —
//! modules are free to call `register_defaults()` more than once.

use std::collections::HashSet;
use std::sync::RwLock;

use serde_json::Value;

use crate::error::ValidationError;
use crate::scheme::SetScheme;

const KNOWN_TAGS: &[&str] = &[
  "FIXED",
  "REP_RANGE",
  "AMRAP",
  "GREYSKULL",
  "RAMP",
  "TOP_BACKOFF",
  "FATIGUE_DROP",
  "MRS",
  "TOTAL_REPS",
];

/// A registry of set-scheme tags known to this process.
///
/// Registration is idempotent: calling `register` twice with the same tag
/// leaves the registry unchanged rather than erroring, matching the
/// spec's note that a registry-based factory may treat re-registration as
/// a no-op.
pub struct SchemeRegistry {
  tags: RwLock<HashSet<&'static str>>,
}

impl SchemeRegistry {
  pub fn new() -> Self {
    Self {
      tags: RwLock::new(HashSet::new()),
    }
  }

  /// Register every scheme tag this build of the engine understands.
  /// Idempotent.
  pub fn register_defaults(&self) {
    let mut tags = self.tags.write().expect("scheme registry lock poisoned");
    for tag in KNOWN_TAGS {
      tags.insert(tag);
    }
  }

  pub fn is_registered(&self, tag: &str) -> bool {
    self.tags.read().expect("scheme registry lock poisoned").contains(tag)
  }

  /// Decode a tagged JSON value into a `SetScheme`, failing closed if the
  /// tag is not registered or the scheme's own validation rejects it.
  pub fn decode(&self, value: &Value) -> Result<SetScheme, ValidationError> {
    let tag = value
      .get("type")
      .and_then(Value::as_str)
      .ok_or_else(|| ValidationError::UnknownSchemeType("missing \"type\" field".to_string()))?;

    if !self.is_registered(tag) {
      return Err(ValidationError::SchemeNotRegistered(tag.to_string()));
    }

    let scheme: SetScheme = serde_json::from_value(value.clone())
      .map_err(|e| ValidationError::UnknownSchemeType(format!("{tag}: {e}")))?;
    scheme.validate()?;
    Ok(scheme)
  }
}

impl Default for SchemeRegistry {
  fn default() -> Self {
    let registry = Self::new();
    registry.register_defaults();
    registry
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn default_registry_knows_every_tag() {
    let registry = SchemeRegistry::default();
    for tag in KNOWN_TAGS {
      assert!(registry.is_registered(tag));
    }
  }

  #[test]
  fn register_defaults_is_idempotent() {
    let registry = SchemeRegistry::new();
    registry.register_defaults();
    registry.register_defaults();
    assert_eq!(registry.tags.read().unwrap().len(), KNOWN_TAGS.len());
  }

  #[test]
  fn decodes_known_tag() {
    let registry = SchemeRegistry::default();
    let value = json!({"type": "FIXED", "sets": 3, "reps": 5});
    let scheme = registry.decode(&value).unwrap();
    assert_eq!(scheme.type_tag(), "FIXED");
  }

  #[test]
  fn rejects_unregistered_tag() {
    let registry = SchemeRegistry::new();
    let value = json!({"type": "FIXED", "sets": 3, "reps": 5});
    assert!(matches!(
      registry.decode(&value),
      Err(ValidationError::SchemeNotRegistered(_))
    ));
  }

  #[test]
  fn rejects_invalid_scheme_params_even_when_tag_registered() {
    let registry = SchemeRegistry::default();
    let value = json!({"type": "FIXED", "sets": 0, "reps": 5});
    assert!(registry.decode(&value).is_err());
  }

  #[test]
  fn rejects_missing_type_field() {
    let registry = SchemeRegistry::default();
    let value = json!({"sets": 3, "reps": 5});
    assert!(matches!(
      registry.decode(&value),
      Err(ValidationError::UnknownSchemeType(_))
    ));
  }
}
