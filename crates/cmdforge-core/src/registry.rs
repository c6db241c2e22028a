//! Command registry
//!
//! A minimal dispatcher: holds descriptors by name and always validates an
//! invocation before executing it.

use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::command::CommandDescriptor;
use crate::error::DispatchError;
use crate::options::Attributes;

/// Registered commands, keyed by name
pub struct CommandRegistry<T = Value> {
    commands: HashMap<String, CommandDescriptor<T>>,
}

impl<T> CommandRegistry<T> {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Add a command. A command with the same name is replaced and returned.
    pub fn register(&mut self, command: CommandDescriptor<T>) -> Option<CommandDescriptor<T>> {
        let name = command.name().to_string();
        let previous = self.commands.insert(name.clone(), command);
        if previous.is_some() {
            warn!("Command '{}' registered twice, keeping the latest definition", name);
        } else {
            debug!("Registered command '{}'", name);
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&CommandDescriptor<T>> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Commands in name order
    pub fn iter(&self) -> impl Iterator<Item = &CommandDescriptor<T>> {
        self.names().into_iter().filter_map(move |name| self.commands.get(name))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Validate, then execute, the named command
    pub fn dispatch(&self, name: &str, attributes: &Attributes, body: Option<&Value>) -> Result<T, DispatchError> {
        let command = self
            .get(name)
            .ok_or_else(|| DispatchError::UnknownCommand(name.to_string()))?;

        if !command.validate(attributes, body) {
            debug!("Rejected input for command '{}'", name);
            return Err(DispatchError::InvalidInput(name.to_string()));
        }

        debug!("Dispatching command '{}'", name);
        Ok(command.execute(attributes, body))
    }
}

impl<T> Default for CommandRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Extend<CommandDescriptor<T>> for CommandRegistry<T> {
    fn extend<I: IntoIterator<Item = CommandDescriptor<T>>>(&mut self, iter: I) {
        for command in iter {
            self.register(command);
        }
    }
}

impl<T> FromIterator<CommandDescriptor<T>> for CommandRegistry<T> {
    fn from_iter<I: IntoIterator<Item = CommandDescriptor<T>>>(iter: I) -> Self {
        let mut registry = Self::new();
        registry.extend(iter);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::define_command;
    use crate::options::OptionsInput;
    use serde_json::json;

    fn echo() -> CommandDescriptor<String> {
        define_command(
            "echo",
            |attrs: &Attributes, body: Option<&Value>| {
                let prefix = attrs.get("prefix").and_then(Value::as_str).unwrap_or("");
                format!("{}{}", prefix, body.and_then(Value::as_str).unwrap_or(""))
            },
            OptionsInput::new().attribute("prefix", false).body(true),
        )
    }

    #[test]
    fn test_dispatch_validates_first() {
        let registry: CommandRegistry<String> = vec![echo()].into_iter().collect();
        let mut attrs = Attributes::new();
        attrs.insert("prefix".into(), json!("Hello "));

        assert_eq!(registry.dispatch("echo", &attrs, Some(&json!("world"))), Ok("Hello world".to_string()));
        assert_eq!(
            registry.dispatch("echo", &attrs, None),
            Err(DispatchError::InvalidInput("echo".to_string()))
        );
        assert_eq!(
            registry.dispatch("shout", &attrs, None),
            Err(DispatchError::UnknownCommand("shout".to_string()))
        );
    }

    #[test]
    fn test_register_replaces_same_name() {
        let mut registry = CommandRegistry::new();
        assert!(registry.register(echo()).is_none());

        let replacement = define_command("echo", |_: &Attributes, _: Option<&Value>| "replaced".to_string(), OptionsInput::new());
        let previous = registry.register(replacement);

        assert!(previous.is_some());
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.dispatch("echo", &Attributes::new(), None), Ok("replaced".to_string()));
    }

    #[test]
    fn test_names_sorted() {
        let mut registry = CommandRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.register(define_command(name, |_: &Attributes, _: Option<&Value>| (), OptionsInput::new()));
        }
        assert_eq!(registry.names(), vec!["alpha", "mid", "zeta"]);
        let ordered: Vec<_> = registry.iter().map(|c| c.name().to_string()).collect();
        assert_eq!(ordered, vec!["alpha", "mid", "zeta"]);
        assert!(registry.contains("mid"));
        assert!(!registry.is_empty());
    }
}
