//! Runtime registry for progression tags, mirroring `scheme_factory`.

use std::collections::HashSet;
use std::sync::RwLock;

use serde_json::Value;

use crate::error::ValidationError;
use crate::progression::Progression;

const KNOWN_TAGS: &[&str] = &["LINEAR", "CYCLE", "AMRAP", "DOUBLE", "DELOAD_ON_FAILURE", "STAGE"];

/// A registry of progression tags known to this process. Registration is
/// idempotent.
pub struct ProgressionRegistry {
  tags: RwLock<HashSet<&'static str>>,
}

impl ProgressionRegistry {
  pub fn new() -> Self {
    Self {
      tags: RwLock::new(HashSet::new()),
    }
  }

  pub fn register_defaults(&self) {
    let mut tags = self.tags.write().expect("progression registry lock poisoned");
    for tag in KNOWN_TAGS {
      tags.insert(tag);
    }
  }

  pub fn is_registered(&self, tag: &str) -> bool {
    self.tags.read().expect("progression registry lock poisoned").contains(tag)
  }

  pub fn decode(&self, value: &Value) -> Result<Progression, ValidationError> {
    let tag = value
      .get("type")
      .and_then(Value::as_str)
      .ok_or_else(|| ValidationError::UnknownProgressionType("missing \"type\" field".to_string()))?;

    if !self.is_registered(tag) {
      return Err(ValidationError::ProgressionNotRegistered(tag.to_string()));
    }

    let progression: Progression = serde_json::from_value(value.clone())
      .map_err(|e| ValidationError::UnknownProgressionType(format!("{tag}: {e}")))?;
    progression.validate()?;
    Ok(progression)
  }
}

impl Default for ProgressionRegistry {
  fn default() -> Self {
    let registry = Self::new();
    registry.register_defaults();
    registry
  }
}
