//! Identifier resolution and dispatcher aggregation.
//!
//! Resolution turns one dotted identifier into a command group; aggregation
//! runs resolution over an ordered identifier list and grafts every success
//! onto a root dispatcher. Failures are per-identifier: they are logged,
//! recorded, and skipped, so one bad plugin never takes down the rest.

use log::warn;
use thiserror::Error;

use crate::plugins::group::CommandGroup;
use crate::plugins::registry::{Export, LoadError, PluginRegistry};

/// Export name a plugin module must provide its command group under.
pub const GROUP_EXPORT: &str = "app";

/// Why one identifier could not be turned into a command group.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("could not load plugin `{identifier}`: {source}")]
    Import {
        identifier: String,
        source: LoadError,
    },
    #[error("plugin `{identifier}` does not export a command group named `app`")]
    NotACommandGroup { identifier: String },
}

impl ResolveError {
    /// Identifier the failure refers to.
    #[must_use]
    pub fn identifier(&self) -> &str {
        match self {
            ResolveError::Import { identifier, .. }
            | ResolveError::NotACommandGroup { identifier } => identifier,
        }
    }
}

/// A successfully resolved plugin, ready to graft.
#[derive(Debug, Clone)]
pub struct ResolvedPlugin {
    /// Dotted path the plugin was resolved from.
    pub identifier: String,
    /// Subcommand name: the final dotted segment of the identifier.
    pub name: String,
    pub group: CommandGroup,
}

/// Final dot-separated segment of an identifier.
#[must_use]
pub fn subcommand_name(identifier: &str) -> &str {
    match identifier.rfind('.') {
        Some(i) => &identifier[i + 1..],
        None => identifier,
    }
}

/// Resolve one dotted identifier to its command group.
///
/// # Errors
///
/// Returns `ResolveError::Import` when the module cannot be located or
/// loaded, and `ResolveError::NotACommandGroup` when the module loads but
/// has no `app` export or exports something that is not a command group.
pub fn resolve(
    registry: &PluginRegistry,
    identifier: &str,
) -> Result<ResolvedPlugin, ResolveError> {
    let mut module = registry
        .load(identifier)
        .map_err(|source| ResolveError::Import {
            identifier: identifier.to_string(),
            source,
        })?;
    match module.take_export(GROUP_EXPORT) {
        Some(Export::Group(group)) => Ok(ResolvedPlugin {
            identifier: identifier.to_string(),
            name: subcommand_name(identifier).to_string(),
            group,
        }),
        Some(Export::Opaque) | None => Err(ResolveError::NotACommandGroup {
            identifier: identifier.to_string(),
        }),
    }
}

/// Outcome of composing the root dispatcher: the dispatcher itself plus the
/// per-identifier failures that were skipped.
#[derive(Debug, Default)]
pub struct Aggregation {
    pub root: CommandGroup,
    pub failures: Vec<ResolveError>,
}

/// Build the root dispatcher from an ordered identifier list.
///
/// Identifiers are resolved in input order; each success is grafted under
/// its final dotted segment (same-name grafts overwrite, last registration
/// wins), each failure is logged and skipped. An empty or fully failing list
/// yields a root with zero subcommands; whether that is an error is the
/// caller's policy.
#[must_use]
pub fn aggregate(registry: &PluginRegistry, identifiers: &[String]) -> Aggregation {
    let mut aggregation = Aggregation::default();
    for identifier in identifiers {
        match resolve(registry, identifier) {
            Ok(plugin) => {
                aggregation.root.add_group(plugin.name, plugin.group);
            }
            Err(err) => {
                warn!("Skipping plugin: {err}");
                aggregation.failures.push(err);
            }
        }
    }
    aggregation
}
