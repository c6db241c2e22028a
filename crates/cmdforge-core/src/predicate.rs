//! Predicate values
//!
//! Custom acceptance checks stored inside attribute and body configs.
//! A predicate is a shared closure over a JSON value, so configs stay
//! `Clone + Send + Sync` and a built validator can be called from any thread.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Shared predicate function type
pub type PredicateFn = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Built-in rules that declarative manifests can refer to by name
pub const RULES: &[&str] = &[
    "string", "number", "integer", "boolean", "array", "object", "non_empty",
];

/// A custom `validate` check attached to an attribute or body.
///
/// Two predicates compare equal only when they share the same closure.
#[derive(Clone)]
pub struct Predicate {
    func: PredicateFn,
    rule: Option<&'static str>,
}

impl Predicate {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
            rule: None,
        }
    }

    /// Look up a built-in rule by name
    pub fn named(rule: &str) -> Option<Self> {
        let name = RULES.iter().copied().find(|r| *r == rule)?;
        let func: fn(&Value) -> bool = match name {
            "string" => Value::is_string,
            "number" => Value::is_number,
            "integer" => is_integer,
            "boolean" => Value::is_boolean,
            "array" => Value::is_array,
            "object" => Value::is_object,
            _ => is_non_empty,
        };
        Some(Self {
            func: Arc::new(func),
            rule: Some(name),
        })
    }

    /// Run the check. A panicking closure propagates to the caller.
    pub fn check(&self, value: &Value) -> bool {
        (self.func)(value)
    }

    /// Name of the built-in rule this predicate came from, if any
    pub fn rule(&self) -> Option<&'static str> {
        self.rule
    }
}

fn is_integer(value: &Value) -> bool {
    value.is_i64() || value.is_u64()
}

fn is_non_empty(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        _ => false,
    }
}

impl PartialEq for Predicate {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.rule {
            Some(rule) => write!(f, "Predicate({})", rule),
            None => f.write_str("Predicate(<fn>)"),
        }
    }
}
