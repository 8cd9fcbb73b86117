//! Error types for rulebook operations.
//!
//! This module defines [`RulebookError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Rule construction, message instantiation and checker loading each have
//!   dedicated variants so callers can tell the failure modes apart
//! - Use `anyhow::Error` (via `RulebookError::Other`) for unexpected errors
//! - Every variant is fatal to the operation that produced it

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for rulebook operations.
#[derive(Debug, Error)]
pub enum RulebookError {
    /// A rule body does not have the `(name, description, severity, *configurables)` shape.
    #[error("Fatal error: Rule '{rule_id}' has invalid body: {body}\n{reason}")]
    InvalidRuleBody {
        rule_id: String,
        body: String,
        reason: String,
    },

    /// One of the rule's configurable descriptors is not a `(name, help, default)` triple.
    #[error("Fatal error: Rule '{rule_id}' has invalid configurable: {body}")]
    InvalidConfigurable { rule_id: String, body: String },

    /// Severity token could not be parsed.
    #[error(
        "Fatal error: Tried to configure message {rule} with invalid severity: {value}. \
         Expected one of: E, error, W, warning, I, info, F, fatal (case insensitive)"
    )]
    InvalidSeverity { rule: String, value: String },

    /// Description template and message arguments do not match.
    #[error("Fatal error: Rule '{rule_id}' failed to prepare message description: {message}")]
    InvalidRuleUsage { rule_id: String, message: String },

    /// External checker source could not be resolved or imported.
    #[error("Fatal error: Failed to load external rules from file {path}. Verify if the file exists: {message}")]
    InvalidExternalChecker { path: PathBuf, message: String },

    /// A rule declared in an external checker file could not be built.
    #[error("{source}\nDeclared in external rules file {path}")]
    ExternalRule {
        path: PathBuf,
        source: Box<RulebookError>,
    },

    /// Two rules share the same name.
    #[error("Fatal error: Message name '{name}' defined in {checker} was already defined in {existing_checker}")]
    DuplicatedMessage {
        name: String,
        checker: String,
        existing_checker: String,
    },

    /// Two rules share the same id.
    #[error("Fatal error: Message id '{rule_id}' defined in {checker} was already defined in {existing_checker}")]
    DuplicatedRuleId {
        rule_id: String,
        checker: String,
        existing_checker: String,
    },

    /// Configuration referenced a rule that is not loaded.
    #[error("Fatal error: Provided rule '{rule}' does not exist")]
    UnknownRule { rule: String },

    /// Configuration referenced a parameter the rule does not declare.
    #[error("Fatal error: Provided param '{param}' for rule '{rule}' does not exist. Available configurable(s) for this rule: {available}")]
    UnknownConfigurable {
        rule: String,
        param: String,
        available: String,
    },

    /// A `rule:param:value` override could not be parsed.
    #[error("Fatal error: Invalid rule configuration '{value}': {reason}")]
    InvalidOverride { value: String, reason: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for rulebook operations.
pub type Result<T> = std::result::Result<T, RulebookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_rule_body_displays_id_and_body() {
        let err = RulebookError::InvalidRuleBody {
            rule_id: "0101".into(),
            body: r#"["name"]"#.into(),
            reason: "expected at least 3 elements".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("0101"));
        assert!(msg.contains(r#"["name"]"#));
        assert!(msg.contains("at least 3"));
    }

    #[test]
    fn invalid_severity_names_rule_and_value() {
        let err = RulebookError::InvalidSeverity {
            rule: "line-too-long".into(),
            value: "bogus".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line-too-long"));
        assert!(msg.contains("bogus"));
    }

    #[test]
    fn external_checker_displays_path() {
        let err = RulebookError::InvalidExternalChecker {
            path: PathBuf::from("testdata/rule/non_existing.yml"),
            message: "not found".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Fatal error: Failed to load external rules from file"));
        assert!(msg.contains("testdata/rule/non_existing.yml"));
    }

    #[test]
    fn external_rule_keeps_cause_and_names_file() {
        let err = RulebookError::ExternalRule {
            path: PathBuf::from("rules/custom.yml"),
            source: Box::new(RulebookError::InvalidSeverity {
                rule: "smth".into(),
                value: "loud".into(),
            }),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Fatal error: Tried to configure message smth"));
        assert!(msg.ends_with("Declared in external rules file rules/custom.yml"));

        let cause = std::error::Error::source(&err).unwrap();
        assert!(cause.to_string().contains("loud"));
    }

    #[test]
    fn duplicated_message_names_both_checkers() {
        let err = RulebookError::DuplicatedMessage {
            name: "smth".into(),
            checker: "SmthChecker".into(),
            existing_checker: "OtherChecker".into(),
        };
        assert_eq!(
            err.to_string(),
            "Fatal error: Message name 'smth' defined in SmthChecker was already defined in OtherChecker"
        );
    }

    #[test]
    fn duplicated_id_is_distinct_from_duplicated_name() {
        let err = RulebookError::DuplicatedRuleId {
            rule_id: "1101".into(),
            checker: "A".into(),
            existing_checker: "B".into(),
        };
        assert!(matches!(err, RulebookError::DuplicatedRuleId { .. }));
        assert!(err.to_string().contains("Message id '1101'"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: RulebookError = io_err.into();
        assert!(matches!(err, RulebookError::Io(_)));
    }

    #[test]
    fn anyhow_error_converts_to_other() {
        let err: RulebookError = anyhow::anyhow!("unexpected").into();
        assert!(matches!(err, RulebookError::Other(_)));
        assert_eq!(err.to_string(), "unexpected");
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(RulebookError::UnknownRule {
                rule: "missing".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
