//! Error types
//!
//! Defining a command never fails. Errors only come from loading manifests
//! and from dispatching through a registry.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading a command manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid manifest: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors from dispatching a command by name
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Invalid input for command '{0}'")]
    InvalidInput(String),
}
