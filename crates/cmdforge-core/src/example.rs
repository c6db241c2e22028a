//! Usage examples
//!
//! Every command carries an illustrative `(attributes, body, description)`
//! triple. An author-supplied example wins; otherwise one is synthesized from
//! defaults and descriptions. Synthesized examples are best-effort and are not
//! checked against the command's own validator.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

use crate::options::{Attributes, NormalizedSchema};

/// An author-supplied example, used verbatim
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExampleInput {
    #[serde(default)]
    pub attributes: Attributes,
    #[serde(default)]
    pub body: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ExampleInput {
    pub fn new(attributes: Attributes, body: Value) -> Self {
        Self {
            attributes,
            body,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The example attached to a finished command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub attributes: Attributes,
    /// `Value::Null` when the example has no body
    pub body: Value,
    pub description: String,
}

fn example_description(name: &str) -> String {
    format!("Example usage of {} command", name)
}

/// First run of word characters in `text`
pub fn word_token(text: &str) -> Option<&str> {
    static WORD: OnceLock<Regex> = OnceLock::new();
    let re = WORD.get_or_init(|| Regex::new(r"[A-Za-z0-9_]+").expect("valid word regex"));
    re.find(text).map(|m| m.as_str())
}

/// Build the example for command `name`
pub fn create_example(name: &str, explicit: Option<&ExampleInput>, schema: &NormalizedSchema) -> Example {
    if let Some(example) = explicit {
        return Example {
            attributes: example.attributes.clone(),
            body: example.body.clone(),
            description: example
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| example_description(name)),
        };
    }

    let attributes = schema
        .attributes
        .iter()
        .map(|(key, config)| {
            let value = match &config.default {
                Some(default) => default.clone(),
                None => {
                    let token = config
                        .description
                        .as_deref()
                        .and_then(word_token)
                        .unwrap_or(key.as_str());
                    Value::String(token.to_string())
                }
            };
            (key.clone(), value)
        })
        .collect();

    let body = match &schema.body.default {
        Some(default) => default.clone(),
        None if schema.body.optional => Value::Null,
        None => {
            let token = schema
                .body
                .description
                .as_deref()
                .and_then(word_token)
                .unwrap_or(name);
            Value::String(token.to_string())
        }
    };

    Example {
        attributes,
        body,
        description: example_description(name),
    }
}
