//! Command assembly
//!
//! `define_command` runs normalization, builds the validator and the example,
//! and bundles them with the caller's execute function into an immutable
//! [`CommandDescriptor`].

use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::example::{create_example, Example};
use crate::options::{normalize_options, Attributes, FieldConfig, OptionsInput};
use crate::validator::{create_validator, Validator};

/// Shared execute function type
pub type ExecuteFn<T> = Arc<dyn Fn(&Attributes, Option<&Value>) -> T + Send + Sync>;

/// A finished command, ready to hand to a dispatcher.
///
/// Callers are expected to run [`CommandDescriptor::validate`] before
/// [`CommandDescriptor::execute`]; nothing here enforces that ordering.
pub struct CommandDescriptor<T = Value> {
    name: String,
    description: String,
    example: Example,
    validator: Validator,
    execute: ExecuteFn<T>,
}

impl<T> CommandDescriptor<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn example(&self) -> &Example {
        &self.example
    }

    /// Normalized attribute configs, keyed by attribute name
    pub fn attributes(&self) -> &BTreeMap<String, FieldConfig> {
        self.validator.attributes()
    }

    pub fn body(&self) -> &FieldConfig {
        self.validator.body()
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn validate(&self, attributes: &Attributes, body: Option<&Value>) -> bool {
        self.validator.validate(attributes, body)
    }

    pub fn execute(&self, attributes: &Attributes, body: Option<&Value>) -> T {
        (self.execute)(attributes, body)
    }

    /// The execute function exactly as it was supplied
    pub fn execute_fn(&self) -> &ExecuteFn<T> {
        &self.execute
    }

    /// One-line signature, e.g. `search [--limit <value>] --query <value> <body>`
    pub fn usage(&self) -> String {
        let mut parts = vec![self.name.clone()];

        for (key, config) in self.attributes() {
            if config.optional {
                parts.push(format!("[--{} <value>]", key));
            } else {
                parts.push(format!("--{} <value>", key));
            }
        }

        let body = self.body();
        if body.is_required() {
            parts.push("<body>".to_string());
        } else if body.description.is_some() || body.validate.is_some() {
            parts.push("[body]".to_string());
        }

        parts.join(" ")
    }
}

impl<T> Clone for CommandDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            example: self.example.clone(),
            validator: self.validator.clone(),
            execute: Arc::clone(&self.execute),
        }
    }
}

impl<T> fmt::Debug for CommandDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("example", &self.example)
            .field("attributes", self.attributes())
            .field("body", self.body())
            .finish_non_exhaustive()
    }
}

/// Define a command from its name, implementation and options
pub fn define_command<T, F>(name: impl Into<String>, execute: F, options: OptionsInput) -> CommandDescriptor<T>
where
    F: Fn(&Attributes, Option<&Value>) -> T + Send + Sync + 'static,
{
    define_command_with(name, Arc::new(execute), options)
}

/// Like [`define_command`], for an execute function that is already shared
pub fn define_command_with<T>(name: impl Into<String>, execute: ExecuteFn<T>, options: OptionsInput) -> CommandDescriptor<T> {
    let name = name.into();
    let schema = normalize_options(&name, options);
    let example = create_example(&name, schema.example.as_ref(), &schema);

    debug!(
        "Defined command '{}' ({} attributes, body {})",
        name,
        schema.attributes.len(),
        if schema.body.optional { "optional" } else { "required" }
    );

    CommandDescriptor {
        name,
        description: schema.description,
        example,
        validator: create_validator(schema.attributes, schema.body),
        execute,
    }
}
