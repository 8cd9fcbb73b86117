//! Checker loading pipeline.
//!
//! Loading runs in three phases: every external path is expanded into
//! definition files, every file is imported, and then all checkers are merged
//! into one [`RuleRegistry`]. Built-in checkers are merged first. Any failure
//! aborts the whole load.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::registry::RuleRegistry;
use super::{builtin, external, Checker};
use crate::config::RulebookConfig;
use crate::error::Result;

/// Loads built-in and external checkers into a registry.
#[derive(Debug, Clone)]
pub struct CheckerLoader {
    ext_rules: Vec<PathBuf>,
    builtins: bool,
}

impl Default for CheckerLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckerLoader {
    /// A loader for the built-in checkers only.
    pub fn new() -> Self {
        Self {
            ext_rules: Vec::new(),
            builtins: true,
        }
    }

    /// Skip the built-in checkers.
    pub fn without_builtins(mut self) -> Self {
        self.builtins = false;
        self
    }

    /// Add external checker sources, in order.
    pub fn with_ext_rules<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.ext_rules.extend(paths.into_iter().map(Into::into));
        self
    }

    /// A loader for the external sources named in `config`.
    pub fn from_config(config: &RulebookConfig) -> Self {
        Self::new().with_ext_rules(config.ext_rules.iter().cloned())
    }

    /// External sources this loader will read.
    pub fn ext_rules(&self) -> &[PathBuf] {
        &self.ext_rules
    }

    /// Run the pipeline.
    pub fn load_checkers(&self) -> Result<LoadedCheckers> {
        let files = self.expand_all()?;

        let mut checkers = if self.builtins {
            builtin::load_checkers()?
        } else {
            Vec::new()
        };
        for file in &files {
            checkers.extend(external::load_file(file)?);
        }

        let mut registry = RuleRegistry::new();
        for checker in &checkers {
            registry.register_checker(checker)?;
        }

        info!(
            "Loaded {} rule(s) from {} checker(s)",
            registry.len(),
            checkers.len()
        );
        Ok(LoadedCheckers { checkers, registry })
    }

    fn expand_all(&self) -> Result<Vec<PathBuf>> {
        let mut seen = HashSet::new();
        let mut files = Vec::new();

        for path in &self.ext_rules {
            for file in external::expand_path(path)? {
                if seen.insert(identity(&file)) {
                    files.push(file);
                } else {
                    debug!("Skipping {} (already queued)", file.display());
                }
            }
        }

        Ok(files)
    }
}

fn identity(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct LoadedCheckers {
    checkers: Vec<Checker>,
    registry: RuleRegistry,
}

impl LoadedCheckers {
    /// All loaded checkers, built-ins first.
    pub fn checkers(&self) -> &[Checker] {
        &self.checkers
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    pub fn into_registry(self) -> RuleRegistry {
        self.registry
    }

    /// Apply rule selection and overrides from `config`.
    pub fn apply_config(&self, config: &RulebookConfig) -> Result<RuleRegistry> {
        let overrides = config.overrides()?;
        self.registry
            .select(&config.include, &config.exclude)
            .configure(&overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RulebookError;
    use crate::rules::{RuleId, Severity};
    use std::fs;
    use tempfile::TempDir;

    fn write_checker(dir: &Path, file: &str, checker: &str, id: &str, name: &str) -> PathBuf {
        let path = dir.join(file);
        fs::write(
            &path,
            format!(
                "checkers:\n  - name: {checker}\n    rules:\n      \"{id}\": [{name}, \"Something is off\", W]\n"
            ),
        )
        .unwrap();
        path
    }

    #[test]
    fn loads_builtins_by_default() {
        let loaded = CheckerLoader::new().load_checkers().unwrap();
        assert!(loaded.registry().get(&RuleId::new("0508")).is_some());
        assert!(!loaded.checkers().is_empty());
    }

    #[test]
    fn loads_external_after_builtins() {
        let temp = TempDir::new().unwrap();
        let file = write_checker(temp.path(), "smth.yml", "SmthChecker", "1101", "smth");

        let loaded = CheckerLoader::new()
            .with_ext_rules([&file])
            .load_checkers()
            .unwrap();

        let last = loaded.checkers().last().unwrap();
        assert_eq!(last.name(), "SmthChecker");
        assert_eq!(
            loaded.registry().checker_of(&RuleId::new("1101")),
            Some("SmthChecker")
        );
    }

    #[test]
    fn same_file_twice_is_loaded_once() {
        let temp = TempDir::new().unwrap();
        let file = write_checker(temp.path(), "smth.yml", "SmthChecker", "1101", "smth");

        let loaded = CheckerLoader::new()
            .without_builtins()
            .with_ext_rules([file.clone(), temp.path().to_path_buf(), file])
            .load_checkers()
            .unwrap();

        assert_eq!(loaded.checkers().len(), 1);
        assert_eq!(loaded.registry().len(), 1);
    }

    #[test]
    fn missing_path_aborts_before_import() {
        let temp = TempDir::new().unwrap();
        let good = write_checker(temp.path(), "good.yml", "GoodChecker", "1101", "good");
        let missing = temp.path().join("missing.yml");

        let err = CheckerLoader::new()
            .with_ext_rules([good, missing.clone()])
            .load_checkers()
            .unwrap_err();

        match err {
            RulebookError::InvalidExternalChecker { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn clash_with_builtin_name_fails() {
        let temp = TempDir::new().unwrap();
        let file = write_checker(temp.path(), "clash.yml", "MyChecker", "9001", "line-too-long");

        let err = CheckerLoader::new()
            .with_ext_rules([file])
            .load_checkers()
            .unwrap_err();

        assert!(matches!(
            err,
            RulebookError::DuplicatedMessage { ref checker, ref existing_checker, .. }
                if checker == "MyChecker" && existing_checker == "LengthChecker"
        ));
    }

    #[test]
    fn apply_config_selects_then_configures() {
        let config = RulebookConfig {
            configure: vec!["line-too-long:severity:fatal".to_string()],
            exclude: vec!["0509".to_string()],
            ..Default::default()
        };

        let loaded = CheckerLoader::from_config(&config).load_checkers().unwrap();
        let registry = loaded.apply_config(&config).unwrap();

        assert_eq!(
            registry.get(&RuleId::new("0508")).unwrap().severity(),
            Severity::Fatal
        );
        assert!(!registry.get(&RuleId::new("0509")).unwrap().enabled());
        assert!(loaded.registry().get(&RuleId::new("0509")).unwrap().enabled());
    }

    #[test]
    fn apply_config_rejects_malformed_override() {
        let config = RulebookConfig {
            configure: vec!["line-too-long".to_string()],
            ..Default::default()
        };

        let loaded = CheckerLoader::new().load_checkers().unwrap();
        assert!(matches!(
            loaded.apply_config(&config),
            Err(RulebookError::InvalidOverride { .. })
        ));
    }
}
