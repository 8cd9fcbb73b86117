//! Configuration file discovery and loading.
//!
//! Files are looked up in the project root:
//! 1. Project config (`.rulebook.yml`)
//! 2. Local overrides (`.rulebook.local.yml`)
//!
//! Both are optional. Relative `ext_rules` entries are resolved against the
//! directory of the file that lists them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::debug;

use super::schema::{ConfigOverlay, RulebookConfig};
use crate::error::{Result, RulebookError};

/// Project config file name.
pub const CONFIG_FILE: &str = ".rulebook.yml";

/// Local override file name.
pub const LOCAL_CONFIG_FILE: &str = ".rulebook.local.yml";

/// Paths to configuration files in merge order (later overrides earlier).
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Project config: .rulebook.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .rulebook.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            project: existing(project_root.join(CONFIG_FILE)),
            project_local: existing(project_root.join(LOCAL_CONFIG_FILE)),
        }
    }

    /// Check if any project config exists.
    pub fn has_project_config(&self) -> bool {
        self.project.is_some()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Find the project root by walking up from `start`.
///
/// Looks for:
/// 1. `.rulebook.yml` (primary indicator)
/// 2. `.git` directory (fallback)
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_FILE).is_file() {
            return Some(current);
        }

        if current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<RulebookConfig> {
    let mut config: RulebookConfig = read_yaml(path)?;
    config.ext_rules = resolve_paths(path, config.ext_rules);
    Ok(config)
}

/// Load a local override file.
pub fn load_overlay_file(path: &Path) -> Result<ConfigOverlay> {
    let mut overlay: ConfigOverlay = read_yaml(path)?;
    overlay.ext_rules = resolve_paths(path, overlay.ext_rules);
    Ok(overlay)
}

/// Parse YAML content into a [`RulebookConfig`].
///
/// `source_path` is only used for error reporting.
pub fn parse_config(content: &str, source_path: &Path) -> Result<RulebookConfig> {
    parse_yaml(content, source_path)
}

fn read_yaml<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RulebookError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            RulebookError::Io(e)
        }
    })?;

    debug!("Reading config from {}", path.display());
    parse_yaml(&content, path)
}

fn parse_yaml<T: DeserializeOwned + Default>(content: &str, source_path: &Path) -> Result<T> {
    if content.trim().is_empty() {
        return Ok(T::default());
    }

    serde_yaml::from_str(content).map_err(|e| RulebookError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

fn resolve_paths(config_path: &Path, paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let base = config_path.parent().unwrap_or_else(|| Path::new(""));
    paths
        .into_iter()
        .map(|p| if p.is_relative() { base.join(p) } else { p })
        .collect()
}

/// Load the project config, merged with local overrides.
///
/// Returns the default config when the project has no config file.
pub fn load_merged_config(project_root: &Path) -> Result<RulebookConfig> {
    let paths = ConfigPaths::discover(project_root);

    let mut config = match &paths.project {
        Some(path) => load_config_file(path)?,
        None => {
            debug!("No {} in {}", CONFIG_FILE, project_root.display());
            RulebookConfig::default()
        }
    };

    if let Some(local) = &paths.project_local {
        config = config.merge(load_overlay_file(local)?);
    }

    Ok(config)
}

/// Load config with optional path override.
///
/// If `config_override` is provided, loads only that file without merging.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<RulebookConfig> {
    if let Some(override_path) = config_override {
        load_config_file(override_path)
    } else {
        load_merged_config(project_root)
    }
}
