//! Core implementation of the Convoke CLI composer
//!
//! Convoke builds a single command-line dispatcher out of independently
//! authored command groups. A project manifest lists plugin identifiers; each
//! identifier resolves to a command group that is grafted onto the root
//! dispatcher as a named subcommand, and the composed tree can be rendered as
//! a nested help document.

use std::path::{Path, PathBuf};

use log::debug;

use crate::manifest::{Manifest, ManifestError};
use crate::plugins::registry::PluginRegistry;
use crate::plugins::resolve::{Aggregation, aggregate};

pub mod docs;
pub mod logger;
pub mod manifest;
pub mod plugins;
pub mod theme;

/// Load the manifest from a file (or auto-detect), returning the manifest,
/// its directory, and its path.
///
/// # Errors
///
/// Returns `ManifestError` if no manifest is found or it cannot be parsed.
pub fn load_manifest(
    manifest_file: Option<&str>,
) -> Result<(Manifest, PathBuf, PathBuf), ManifestError> {
    let manifest_path = match manifest_file {
        Some(file) => {
            let manifest_path = PathBuf::from(file);
            if !manifest_path.exists() {
                return Err(ManifestError::NotFound(manifest_path));
            }
            manifest_path
        }
        None => Manifest::find_manifest()?,
    };
    let cwd = manifest_path
        .parent()
        .ok_or_else(|| ManifestError::NotFound(manifest_path.clone()))?
        .to_path_buf();
    debug!(
        "Loading manifest {} (cwd: {})",
        manifest_path.display(),
        cwd.display()
    );
    let manifest = Manifest::from_file(&manifest_path)?;
    Ok((manifest, cwd, manifest_path))
}

/// Compose the root dispatcher described by a manifest.
///
/// Builds a plugin registry over the manifest's search roots (resolved
/// against the manifest's directory) and aggregates every listed plugin.
/// The root's own name and help come from the manifest.
#[must_use]
pub fn compose(manifest: &Manifest, cwd: &Path) -> Aggregation {
    let registry =
        PluginRegistry::with_roots(manifest.plugin_roots.iter().map(|root| cwd.join(root)));
    let mut aggregation = aggregate(&registry, &manifest.plugins);
    aggregation.root.decl.name = manifest.name.clone();
    aggregation.root.decl.help = manifest.help.clone();
    aggregation
}
