//! Manifest location and loading

use anyhow::{Context, Result};
use cmdforge_core::Manifest;
use std::path::{Path, PathBuf};
use tracing::info;

/// Environment variable that points at a manifest file
pub const MANIFEST_ENV: &str = "CMDFORGE_MANIFEST";

fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("cmdforge")
}

/// Default manifest path (~/.config/cmdforge/commands.json)
pub fn default_manifest_path() -> PathBuf {
    config_dir().join("commands.json")
}

/// Where to look for a manifest, and whether it must exist
pub fn resolve_manifest_path(flag: Option<&Path>) -> (PathBuf, bool) {
    if let Some(path) = flag {
        return (path.to_path_buf(), true);
    }

    if let Ok(path) = std::env::var(MANIFEST_ENV) {
        if !path.is_empty() {
            return (PathBuf::from(path), true);
        }
    }

    (default_manifest_path(), false)
}

/// Load the manifest. A missing default manifest is empty, not an error.
pub fn load_manifest(flag: Option<&Path>) -> Result<Manifest> {
    let (path, explicit) = resolve_manifest_path(flag);

    if !explicit && !path.exists() {
        return Ok(Manifest::default());
    }

    let manifest = Manifest::load(&path)
        .with_context(|| format!("Failed to load command manifest from {}", path.display()))?;
    info!("Loaded {} manifest command(s) from {}", manifest.commands.len(), path.display());
    Ok(manifest)
}
