//! Configuration schema for `.rulebook.yml`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::overrides::RuleOverride;
use crate::error::Result;
use crate::rules::Severity;

/// Root configuration structure for `.rulebook.yml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RulebookConfig {
    /// External checker files or directories.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ext_rules: Vec<PathBuf>,

    /// Overrides in `rule:param:value` form.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub configure: Vec<String>,

    /// Lowest severity that is reported.
    #[serde(default = "default_threshold")]
    pub threshold: Severity,

    /// Rules to enable exclusively, by id or name.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    /// Rules to disable, by id or name.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<String>,
}

impl Default for RulebookConfig {
    fn default() -> Self {
        Self {
            ext_rules: Vec::new(),
            configure: Vec::new(),
            threshold: default_threshold(),
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

fn default_threshold() -> Severity {
    Severity::Info
}

impl RulebookConfig {
    /// Parse every `configure` entry.
    pub fn overrides(&self) -> Result<Vec<RuleOverride>> {
        self.configure.iter().map(|s| s.parse()).collect()
    }

    /// Fold `other` on top of this config.
    ///
    /// List values are appended; the threshold is taken from `other` when it
    /// is set there.
    pub fn merge(mut self, other: ConfigOverlay) -> Self {
        self.ext_rules.extend(other.ext_rules);
        self.configure.extend(other.configure);
        self.include.extend(other.include);
        self.exclude.extend(other.exclude);
        if let Some(threshold) = other.threshold {
            self.threshold = threshold;
        }
        self
    }
}

/// Values that extend a loaded [`RulebookConfig`], such as command-line flags
/// or a local override file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverlay {
    pub ext_rules: Vec<PathBuf>,
    pub configure: Vec<String>,
    pub threshold: Option<Severity>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RulebookError;

    #[test]
    fn empty_document_gives_defaults() {
        let config: RulebookConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, RulebookConfig::default());
        assert_eq!(config.threshold, Severity::Info);
    }

    #[test]
    fn parses_all_fields() {
        let yaml = r#"
ext_rules:
  - rules/custom.yml
  - rules/more
configure:
  - line-too-long:line_length:100
  - 0201:severity:e
threshold: warning
include: [line-too-long]
exclude: ["0509"]
"#;
        let config: RulebookConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.ext_rules.len(), 2);
        assert_eq!(config.threshold, Severity::Warning);
        assert_eq!(config.include, vec!["line-too-long"]);
        assert_eq!(config.exclude, vec!["0509"]);

        let overrides = config.overrides().unwrap();
        assert_eq!(overrides[0], RuleOverride::new("line-too-long", "line_length", "100"));
        assert!(overrides[1].is_severity());
    }

    #[test]
    fn rejects_unknown_keys() {
        let result: std::result::Result<RulebookConfig, _> = serde_yaml::from_str("thresold: E");
        assert!(result.is_err());
    }

    #[test]
    fn rejects_bad_threshold() {
        let result: std::result::Result<RulebookConfig, _> =
            serde_yaml::from_str("threshold: loud");
        assert!(result.is_err());
    }

    #[test]
    fn invalid_override_surfaces_on_demand() {
        let config = RulebookConfig {
            configure: vec!["broken".into()],
            ..Default::default()
        };
        assert!(matches!(
            config.overrides(),
            Err(RulebookError::InvalidOverride { .. })
        ));
    }

    #[test]
    fn merge_appends_and_overrides_threshold() {
        let base = RulebookConfig {
            exclude: vec!["0509".into()],
            ..Default::default()
        };
        let merged = base.merge(ConfigOverlay {
            exclude: vec!["0201".into()],
            threshold: Some(Severity::Error),
            ..Default::default()
        });

        assert_eq!(merged.exclude, vec!["0509", "0201"]);
        assert_eq!(merged.threshold, Severity::Error);
    }

    #[test]
    fn merge_keeps_threshold_when_unset() {
        let base = RulebookConfig {
            threshold: Severity::Warning,
            ..Default::default()
        };
        let merged = base.merge(ConfigOverlay::default());
        assert_eq!(merged.threshold, Severity::Warning);
    }
}
