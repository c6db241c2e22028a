//! Command manifests
//!
//! A manifest declares commands as JSON so they can be defined without code:
//!
//! ```json
//! {
//!   "commands": {
//!     "search": {
//!       "description": "Search items",
//!       "attributes": { "query": "Search query", "limit": { "optional": true, "validate": "integer" } },
//!       "body": false
//!     }
//!   }
//! }
//! ```
//!
//! Custom predicates are referenced by rule name (see [`crate::predicate::RULES`]).

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::command::{define_command_with, CommandDescriptor, ExecuteFn};
use crate::error::ManifestError;
use crate::options::OptionsInput;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub commands: BTreeMap<String, OptionsInput>,
}

impl Manifest {
    pub fn from_json(content: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = Self::from_json(&content)?;
        debug!("Loaded {} command(s) from {}", manifest.commands.len(), path.display());
        Ok(manifest)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Define every declared command, asking `execute_for` for each implementation
    pub fn define_all<T, F>(self, mut execute_for: F) -> Vec<CommandDescriptor<T>>
    where
        F: FnMut(&str) -> ExecuteFn<T>,
    {
        self.commands
            .into_iter()
            .map(|(name, options)| {
                let execute = execute_for(&name);
                define_command_with(name, execute, options)
            })
            .collect()
    }
}
