//! Manifest file handling: where the ordered plugin list comes from.

use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading the manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("no manifest found in current directory or its parents: {0}")]
    NotFound(PathBuf),
    #[error("unknown working directory: {0}")]
    UnknownWorkingDirectory(String),
    #[error("unable to parse YAML manifest {path}: {source}")]
    Yaml {
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("unable to parse JSON manifest {path}: {source}")]
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },
    #[error("manifest {0} has no `plugins` list")]
    MissingPlugins(PathBuf),
}

/// Project manifest: the plugin list plus optional root-level metadata.
#[derive(Debug, Clone)]
pub struct Manifest {
    /// Name shown for the root of the composed CLI.
    pub name: Option<String>,
    /// Help text for the root of the composed CLI.
    pub help: Option<String>,
    /// Dotted plugin identifiers, in graft order.
    pub plugins: Vec<String>,
    /// Directories searched for plugin definition files, relative to the
    /// manifest's directory.
    pub plugin_roots: Vec<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ManifestFile {
    name: Option<String>,
    help: Option<String>,
    plugins: Option<Vec<String>>,
    plugin_roots: Option<Vec<PathBuf>>,
}

/// List of supported manifest file names.
const FILENAMES: [&str; 3] = [".convoke.json", ".convoke.yaml", ".convoke.yml"];

impl Manifest {
    /// Loads and parses a manifest file.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::NotFound` if the file cannot be read,
    /// `ManifestError::Yaml`/`ManifestError::Json` if parsing fails, and
    /// `ManifestError::MissingPlugins` if the file has no `plugins` list.
    pub fn from_file(file: &Path) -> Result<Manifest, ManifestError> {
        let contents = std::fs::read_to_string(file)
            .map_err(|_| ManifestError::NotFound(file.to_path_buf()))?;
        let parsed: ManifestFile = if file.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&contents).map_err(|e| ManifestError::Json {
                source: e,
                path: file.to_path_buf(),
            })?
        } else {
            serde_yaml::from_str(&contents).map_err(|e| ManifestError::Yaml {
                source: e,
                path: file.to_path_buf(),
            })?
        };
        let plugins = parsed
            .plugins
            .ok_or_else(|| ManifestError::MissingPlugins(file.to_path_buf()))?;
        Ok(Manifest {
            name: parsed.name,
            help: parsed.help,
            plugins,
            plugin_roots: parsed
                .plugin_roots
                .unwrap_or_else(|| vec![PathBuf::from(".")]),
        })
    }

    /// Searches for a manifest in the current directory and its parents.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError::UnknownWorkingDirectory` if the cwd cannot be
    /// determined, or `ManifestError::NotFound` if no manifest exists.
    pub fn find_manifest() -> Result<PathBuf, ManifestError> {
        let start = std::env::current_dir()
            .map_err(|e| ManifestError::UnknownWorkingDirectory(e.to_string()))?;
        let mut path = start.clone();
        debug!("Searching for manifest in {}", start.display());
        loop {
            for file in &FILENAMES {
                let candidate = path.join(file);
                if candidate.exists() {
                    info!("Found manifest: {}", candidate.display());
                    return Ok(candidate);
                }
            }
            if !path.pop() {
                return Err(ManifestError::NotFound(start));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".convoke.yaml");
        std::fs::write(
            &path,
            "name: demo\nhelp: Demo tools\nplugins:\n  - pkg.alpha\n  - pkg.gamma\n",
        )
        .unwrap();

        let manifest = Manifest::from_file(&path).unwrap();
        assert_eq!(manifest.name.as_deref(), Some("demo"));
        assert_eq!(manifest.plugins, vec!["pkg.alpha", "pkg.gamma"]);
        assert_eq!(manifest.plugin_roots, vec![PathBuf::from(".")]);
    }

    #[test]
    fn test_from_file_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".convoke.json");
        std::fs::write(
            &path,
            r#"{"plugins": ["pkg.alpha"], "plugin_roots": ["plugins"]}"#,
        )
        .unwrap();

        let manifest = Manifest::from_file(&path).unwrap();
        assert_eq!(manifest.plugins, vec!["pkg.alpha"]);
        assert_eq!(manifest.plugin_roots, vec![PathBuf::from("plugins")]);
    }

    #[test]
    fn test_missing_plugins_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".convoke.yaml");
        std::fs::write(&path, "name: demo\n").unwrap();

        match Manifest::from_file(&path) {
            Err(ManifestError::MissingPlugins(p)) => assert_eq!(p, path),
            other => panic!("Expected MissingPlugins, got: {other:?}"),
        }
    }

    #[test]
    fn test_parse_error_preserves_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".convoke.yaml");
        std::fs::write(&path, "plugins: [unclosed\n").unwrap();

        match Manifest::from_file(&path) {
            Err(ManifestError::Yaml { path: p, .. }) => assert_eq!(p, path),
            other => panic!("Expected a YAML error, got: {other:?}"),
        }
    }
}
