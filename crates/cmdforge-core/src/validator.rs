//! Validator construction
//!
//! Compiles normalized attribute and body configs into one boolean gate over
//! `(attributes, body)`. The gate is schema-driven: undeclared attributes are
//! never inspected, and the first failing check ends evaluation.

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::options::{Attributes, FieldConfig};

/// A compiled validator. Cloning shares the underlying configs.
#[derive(Debug, Clone)]
pub struct Validator {
    attributes: Arc<BTreeMap<String, FieldConfig>>,
    body: Arc<FieldConfig>,
}

impl Validator {
    pub fn new(attributes: BTreeMap<String, FieldConfig>, body: FieldConfig) -> Self {
        Self {
            attributes: Arc::new(attributes),
            body: Arc::new(body),
        }
    }

    pub fn attributes(&self) -> &BTreeMap<String, FieldConfig> {
        &self.attributes
    }

    pub fn body(&self) -> &FieldConfig {
        &self.body
    }

    /// Check an invocation. `None` and `Some(Value::Null)` both mean no body.
    pub fn validate(&self, attributes: &Attributes, body: Option<&Value>) -> bool {
        for (key, config) in self.attributes.iter() {
            let Some(value) = attributes.get(key) else {
                if config.optional {
                    continue;
                }
                return false;
            };

            if let Some(predicate) = &config.validate {
                if !predicate.check(value) {
                    return false;
                }
            }
        }

        match body {
            None | Some(Value::Null) => self.body.optional,
            Some(value) => self
                .body
                .validate
                .as_ref()
                .map_or(true, |predicate| predicate.check(value)),
        }
    }
}

/// Build a validator from normalized configs
pub fn create_validator(attributes: BTreeMap<String, FieldConfig>, body: FieldConfig) -> Validator {
    Validator::new(attributes, body)
}
