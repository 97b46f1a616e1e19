//! Plugin module loading.
//!
//! A plugin module is a set of named exports located by a dotted identifier.
//! Modules registered in-process take precedence; otherwise the identifier is
//! mapped to a definition file under each search root in order
//! (`a.b.c` becomes `<root>/a/b/c.json`, `.yaml` or `.yml`) and parsed into
//! exports.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;
use serde::de::IgnoredAny;
use thiserror::Error;

use crate::plugins::group::{Callback, CommandGroup, Decl, Subgroup};

/// Errors that can occur while loading a plugin module.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("invalid plugin identifier `{0}`")]
    InvalidIdentifier(String),
    #[error("no plugin definition found for `{0}`")]
    NotFound(String),
    #[error("unable to read plugin definition {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unable to parse YAML plugin definition {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("unable to parse JSON plugin definition {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// A named value exported by a plugin module.
#[derive(Debug, Clone)]
pub enum Export {
    /// A command group suitable for grafting.
    Group(CommandGroup),
    /// Anything else a module exposes; kept so resolution can tell "wrong
    /// shape" from "missing".
    Opaque,
}

/// A loaded plugin module: a set of named exports.
#[derive(Debug, Clone, Default)]
pub struct PluginModule {
    exports: HashMap<String, Export>,
}

impl PluginModule {
    #[must_use]
    pub fn new() -> Self {
        PluginModule::default()
    }

    /// Module with a single export, the common case.
    #[must_use]
    pub fn with_export(name: impl Into<String>, export: Export) -> Self {
        let mut module = PluginModule::default();
        module.insert(name, export);
        module
    }

    pub fn insert(&mut self, name: impl Into<String>, export: Export) {
        self.exports.insert(name.into(), export);
    }

    #[must_use]
    pub fn export(&self, name: &str) -> Option<&Export> {
        self.exports.get(name)
    }

    /// Remove and return an export, transferring ownership to the caller.
    pub fn take_export(&mut self, name: &str) -> Option<Export> {
        self.exports.remove(name)
    }
}

/// Locates plugin modules by dotted identifier.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    roots: Vec<PathBuf>,
    builtin: HashMap<String, PluginModule>,
}

/// Extensions tried for plugin definition files, in order.
const EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

impl PluginRegistry {
    #[must_use]
    pub fn new() -> Self {
        PluginRegistry::default()
    }

    /// Registry searching the given roots for plugin definition files.
    #[must_use]
    pub fn with_roots(roots: impl IntoIterator<Item = PathBuf>) -> Self {
        PluginRegistry {
            roots: roots.into_iter().collect(),
            builtin: HashMap::new(),
        }
    }

    /// Register an in-process module under a dotted identifier. In-process
    /// modules shadow definition files with the same identifier.
    pub fn register(&mut self, identifier: impl Into<String>, module: PluginModule) {
        self.builtin.insert(identifier.into(), module);
    }

    /// Load the module named by a dotted identifier.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::InvalidIdentifier` for malformed identifiers,
    /// `LoadError::NotFound` if no registration or definition file matches,
    /// and `LoadError::Io`/`Yaml`/`Json` if a definition file cannot be read
    /// or parsed.
    pub fn load(&self, identifier: &str) -> Result<PluginModule, LoadError> {
        let segments = split_identifier(identifier)?;
        if let Some(module) = self.builtin.get(identifier) {
            return Ok(module.clone());
        }
        for root in &self.roots {
            let mut base = root.clone();
            for segment in &segments {
                base.push(segment);
            }
            for ext in EXTENSIONS {
                let path = base.with_extension(ext);
                if path.exists() {
                    debug!("Loading plugin `{identifier}` from {}", path.display());
                    return load_file(&path);
                }
            }
        }
        Err(LoadError::NotFound(identifier.to_string()))
    }
}

/// Split a dotted identifier, rejecting empty or path-like segments.
fn split_identifier(identifier: &str) -> Result<Vec<&str>, LoadError> {
    let segments: Vec<&str> = identifier.split('.').collect();
    let well_formed = !identifier.is_empty()
        && segments.iter().all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        });
    if well_formed {
        Ok(segments)
    } else {
        Err(LoadError::InvalidIdentifier(identifier.to_string()))
    }
}

fn load_file(path: &Path) -> Result<PluginModule, LoadError> {
    let contents = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    let module: ConfigModule = if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&contents).map_err(|e| LoadError::Json {
            path: path.to_path_buf(),
            source: e,
        })?
    } else {
        serde_yaml::from_str(&contents).map_err(|e| LoadError::Yaml {
            path: path.to_path_buf(),
            source: e,
        })?
    };
    Ok(module.into())
}

/// On-disk schema for a plugin module: export name to export value.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct ConfigModule(HashMap<String, ConfigExport>);

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ConfigExport {
    Known(KnownExport),
    Other(IgnoredAny),
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
enum KnownExport {
    Group(ConfigGroup),
}

/// On-disk schema for a command group export.
#[derive(Debug, Deserialize)]
pub struct ConfigGroup {
    pub name: Option<String>,
    pub short_help: Option<String>,
    pub help: Option<String>,
    pub callback: Option<ConfigCallback>,
    #[serde(default)]
    pub hidden: bool,
    pub commands: Option<Vec<ConfigCommand>>,
    pub subgroups: Option<Vec<ConfigSubgroup>>,
}

/// On-disk schema for a leaf command registration.
#[derive(Debug, Deserialize)]
pub struct ConfigCommand {
    pub name: Option<String>,
    pub short_help: Option<String>,
    pub help: Option<String>,
    pub callback: Option<ConfigCallback>,
    #[serde(default)]
    pub hidden: bool,
}

/// On-disk schema for a subgroup registration: the registration-site
/// metadata plus the nested group.
#[derive(Debug, Deserialize)]
pub struct ConfigSubgroup {
    pub name: Option<String>,
    pub short_help: Option<String>,
    pub help: Option<String>,
    pub callback: Option<ConfigCallback>,
    #[serde(default)]
    pub hidden: bool,
    pub group: ConfigGroup,
}

#[derive(Debug, Deserialize)]
pub struct ConfigCallback {
    pub ident: String,
    pub doc: Option<String>,
}

impl From<ConfigModule> for PluginModule {
    fn from(config: ConfigModule) -> Self {
        let mut module = PluginModule::new();
        for (name, export) in config.0 {
            let export = match export {
                ConfigExport::Known(KnownExport::Group(group)) => Export::Group(group.into()),
                ConfigExport::Other(IgnoredAny) => Export::Opaque,
            };
            module.insert(name, export);
        }
        module
    }
}

impl From<ConfigCallback> for Callback {
    fn from(config: ConfigCallback) -> Self {
        Callback {
            ident: config.ident,
            doc: config.doc,
        }
    }
}

impl From<ConfigCommand> for Decl {
    fn from(config: ConfigCommand) -> Self {
        Decl {
            name: config.name,
            short_help: config.short_help,
            help: config.help,
            callback: config.callback.map(Callback::from),
            hidden: config.hidden,
        }
    }
}

impl From<ConfigGroup> for CommandGroup {
    fn from(config: ConfigGroup) -> Self {
        let decl = Decl {
            name: config.name,
            short_help: config.short_help,
            help: config.help,
            callback: config.callback.map(Callback::from),
            hidden: config.hidden,
        };
        let commands = config
            .commands
            .unwrap_or_default()
            .into_iter()
            .map(Decl::from)
            .collect();
        let subgroups = config
            .subgroups
            .unwrap_or_default()
            .into_iter()
            .map(Subgroup::from)
            .collect();
        CommandGroup {
            decl,
            commands,
            subgroups,
        }
    }
}

impl From<ConfigSubgroup> for Subgroup {
    fn from(config: ConfigSubgroup) -> Self {
        Subgroup {
            decl: Decl {
                name: config.name,
                short_help: config.short_help,
                help: config.help,
                callback: config.callback.map(Callback::from),
                hidden: config.hidden,
            },
            group: config.group.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_over(dir: &Path) -> PluginRegistry {
        PluginRegistry::with_roots([dir.to_path_buf()])
    }

    fn write_plugin(dir: &Path, relative: &str, contents: &str) {
        let path = dir.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_load_yaml_module() {
        let dir = tempfile::tempdir().unwrap();
        write_plugin(
            dir.path(),
            "pkg/alpha.yaml",
            "app:\n  kind: group\n  name: alpha\n  help: Alpha tools\n  commands:\n    - name: greet\n      short_help: Print a greeting\n",
        );

        let module = registry_over(dir.path()).load("pkg.alpha").unwrap();
        match module.export("app") {
            Some(Export::Group(group)) => {
                assert_eq!(group.decl.name.as_deref(), Some("alpha"));
                assert_eq!(group.commands.len(), 1);
                assert_eq!(group.commands[0].name.as_deref(), Some("greet"));
            }
            other => panic!("Expected a group export, got: {other:?}"),
        }
    }

    #[test]
    fn test_load_json_module() {
        let dir = tempfile::tempdir().unwrap();
        write_plugin(
            dir.path(),
            "pkg/beta.json",
            r#"{"app": {"kind": "group", "name": "beta"}}"#,
        );

        let module = registry_over(dir.path()).load("pkg.beta").unwrap();
        assert!(matches!(module.export("app"), Some(Export::Group(_))));
    }

    #[test]
    fn test_non_group_export_is_opaque() {
        let dir = tempfile::tempdir().unwrap();
        write_plugin(
            dir.path(),
            "pkg/odd.yaml",
            "app: 42\nextra:\n  something: else\n",
        );

        let module = registry_over(dir.path()).load("pkg.odd").unwrap();
        assert!(matches!(module.export("app"), Some(Export::Opaque)));
        assert!(matches!(module.export("extra"), Some(Export::Opaque)));
    }

    #[test]
    fn test_builtin_shadows_file() {
        let dir = tempfile::tempdir().unwrap();
        write_plugin(
            dir.path(),
            "pkg/alpha.yaml",
            "app:\n  kind: group\n  name: from-file\n",
        );

        let mut registry = registry_over(dir.path());
        let builtin = CommandGroup {
            decl: Decl::named("from-registration"),
            ..CommandGroup::default()
        };
        registry.register("pkg.alpha", PluginModule::with_export("app", Export::Group(builtin)));

        let module = registry.load("pkg.alpha").unwrap();
        match module.export("app") {
            Some(Export::Group(group)) => {
                assert_eq!(group.decl.name.as_deref(), Some("from-registration"));
            }
            other => panic!("Expected a group export, got: {other:?}"),
        }
    }

    #[test]
    fn test_missing_module() {
        let dir = tempfile::tempdir().unwrap();
        let result = registry_over(dir.path()).load("no.such.module");
        match result {
            Err(LoadError::NotFound(identifier)) => assert_eq!(identifier, "no.such.module"),
            other => panic!("Expected NotFound, got: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_identifiers_are_rejected() {
        let registry = PluginRegistry::new();
        for identifier in ["", "a..b", "a/b", "a.b/..c", "trailing."] {
            match registry.load(identifier) {
                Err(LoadError::InvalidIdentifier(id)) => assert_eq!(id, identifier),
                other => panic!("Expected InvalidIdentifier for `{identifier}`, got: {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_error_preserves_path() {
        let dir = tempfile::tempdir().unwrap();
        write_plugin(dir.path(), "pkg/bad.yaml", "app: [unclosed\n");

        match registry_over(dir.path()).load("pkg.bad") {
            Err(LoadError::Yaml { path, .. }) => {
                assert!(path.ends_with("pkg/bad.yaml"));
            }
            other => panic!("Expected a YAML error, got: {other:?}"),
        }
    }
}
