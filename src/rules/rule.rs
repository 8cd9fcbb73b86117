//! Rule definitions.
//!
//! This module provides the core types for declaring lint rules:
//!
//! - [`Rule`] - A diagnostic template with severity and configurable parameters
//! - [`RuleId`] - Unique identifier for a rule
//! - [`Configurable`] - A `(name, help, default)` parameter descriptor
//!
//! Rules are declared as a body sequence:
//!
//! ```text
//! (name, description, severity, *configurables)
//! ```
//!
//! and every configurable is itself a `(name, help, default)` triple.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;
use serde_yaml::Value;

use super::message::{Message, SourceNode};
use super::severity::Severity;
use super::template::{DescriptionTemplate, MessageArg};
use crate::error::{Result, RulebookError};

/// Unique identifier for a rule (e.g. `"0501"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RuleId(pub String);

impl RuleId {
    /// Create a new rule ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A configurable rule parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Configurable {
    /// Parameter name used in `rule:param:value` overrides.
    pub name: String,
    /// What the parameter changes.
    pub help: String,
    /// Value used when not configured.
    pub default: Value,
}

impl Configurable {
    pub fn new(name: impl Into<String>, help: impl Into<String>, default: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            default: default.into(),
        }
    }
}

/// A lint rule: the template every message of that kind is prepared from.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    rule_id: RuleId,
    name: String,
    description: DescriptionTemplate,
    severity: Severity,
    enabled: bool,
    configurable: Vec<Configurable>,
    params: BTreeMap<String, Value>,
}

impl Rule {
    /// Build a rule from typed parts.
    pub fn new(
        rule_id: impl Into<String>,
        name: impl Into<String>,
        description: &str,
        severity: Severity,
        configurable: Vec<Configurable>,
    ) -> Result<Self> {
        let rule_id = rule_id.into();
        let description =
            DescriptionTemplate::parse(description).map_err(|e| RulebookError::InvalidRuleBody {
                rule_id: rule_id.clone(),
                body: description.to_string(),
                reason: format!("invalid description: {}", e),
            })?;

        Ok(Self {
            rule_id: RuleId(rule_id),
            name: name.into(),
            description,
            severity,
            enabled: true,
            configurable,
            params: BTreeMap::new(),
        })
    }

    /// Build a rule from its declared body
    /// `[name, description, severity, [param, help, default]...]`.
    pub fn from_body(rule_id: impl Into<String>, body: &Value) -> Result<Self> {
        let rule_id = rule_id.into();
        let invalid_body = |reason: &str| RulebookError::InvalidRuleBody {
            rule_id: rule_id.clone(),
            body: body_text(body),
            reason: reason.to_string(),
        };

        let items = match body {
            Value::Sequence(items) if items.len() >= 3 => items,
            Value::Sequence(_) => {
                return Err(invalid_body(
                    "expected at least 3 elements: name, description, severity",
                ))
            }
            _ => return Err(invalid_body("expected a sequence")),
        };

        let name = items[0]
            .as_str()
            .ok_or_else(|| invalid_body("rule name must be a string"))?;
        let description = items[1]
            .as_str()
            .ok_or_else(|| invalid_body("rule description must be a string"))?;
        let severity = severity_token(&items[2])
            .and_then(|token| token.parse::<Severity>().ok())
            .ok_or_else(|| RulebookError::InvalidSeverity {
                rule: name.to_string(),
                value: scalar_text(&items[2]),
            })?;

        let configurable = items[3..]
            .iter()
            .map(|entry| {
                parse_configurable(entry).ok_or_else(|| RulebookError::InvalidConfigurable {
                    rule_id: rule_id.clone(),
                    body: body_text(body),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let description = DescriptionTemplate::parse(description)
            .map_err(|e| invalid_body(&format!("invalid description: {}", e)))?;

        Ok(Self {
            rule_id: RuleId(rule_id),
            name: name.to_string(),
            description,
            severity,
            enabled: true,
            configurable,
            params: BTreeMap::new(),
        })
    }

    pub fn rule_id(&self) -> &RuleId {
        &self.rule_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The description template as declared.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn template(&self) -> &DescriptionTemplate {
        &self.description
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn configurable(&self) -> &[Configurable] {
        &self.configurable
    }

    /// Change severity from a token (`"e"`, `"ERROR"`, ...).
    ///
    /// On failure the current severity is kept.
    pub fn change_severity(&mut self, value: &str) -> Result<()> {
        let severity = value
            .parse::<Severity>()
            .map_err(|e| RulebookError::InvalidSeverity {
                rule: self.name.clone(),
                value: e.token,
            })?;
        self.severity = severity;
        Ok(())
    }

    /// Find a configurable by parameter name.
    pub fn get_configurable(&self, param: &str) -> Option<&Configurable> {
        self.configurable.iter().find(|c| c.name == param)
    }

    /// Apply a `param=value` setting. `severity` is always accepted.
    pub fn configure(&mut self, param: &str, value: &str) -> Result<()> {
        if param == "severity" {
            return self.change_severity(value);
        }
        if self.get_configurable(param).is_none() {
            return Err(RulebookError::UnknownConfigurable {
                rule: self.name.clone(),
                param: param.to_string(),
                available: self.available_params(),
            });
        }
        let invalid = |reason: &str| RulebookError::InvalidOverride {
            value: format!("{}:{}:{}", self.name, param, value),
            reason: reason.to_string(),
        };
        if value.trim().is_empty() {
            return Err(invalid("value must not be empty"));
        }
        // Values are read as YAML scalars so `120` stays a number
        let parsed = serde_yaml::from_str::<Value>(value)
            .unwrap_or_else(|_| Value::String(value.to_string()));
        match parsed {
            Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                self.params.insert(param.to_string(), parsed);
                Ok(())
            }
            _ => Err(invalid("value must be a single scalar")),
        }
    }

    /// Configured value of a parameter, falling back to its default.
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params
            .get(name)
            .or_else(|| self.get_configurable(name).map(|c| &c.default))
    }

    fn available_params(&self) -> String {
        let mut names: Vec<&str> = vec!["severity"];
        names.extend(self.configurable.iter().map(|c| c.name.as_str()));
        names.join(", ")
    }

    /// `"{severity_letter}{rule_id} ({name})"`, e.g. `W0501 (too-long-keyword)`.
    pub fn get_fullname(&self) -> String {
        format!("{}{} ({})", self.severity.letter(), self.rule_id, self.name)
    }

    /// Prepare a message for this rule at a source location.
    ///
    /// `lineno` wins over the node's line; with neither the line stays unset.
    /// `col` defaults to 0. The rule itself is left untouched.
    pub fn prepare_message(
        &self,
        args: &[MessageArg],
        source: impl Into<PathBuf>,
        node: Option<&dyn SourceNode>,
        lineno: Option<usize>,
        col: Option<usize>,
    ) -> Result<Message> {
        let desc = self
            .description
            .render(args)
            .map_err(|e| RulebookError::InvalidRuleUsage {
                rule_id: self.rule_id.to_string(),
                message: e.to_string(),
            })?;

        let line = lineno.or_else(|| node.map(|n| n.lineno()));

        Ok(Message {
            rule: self.clone(),
            source: source.into(),
            line,
            col: col.unwrap_or(0),
            desc,
        })
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rule - {} [{}]: {}: {} ({})",
            self.rule_id,
            self.severity.letter(),
            self.name,
            self.description,
            if self.enabled { "enabled" } else { "disabled" }
        )
    }
}

impl Serialize for Rule {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct RuleRecord<'a> {
            rule_id: &'a RuleId,
            name: &'a str,
            description: &'a str,
            severity: Severity,
            enabled: bool,
            configurable: &'a [Configurable],
            params: &'a BTreeMap<String, Value>,
        }

        RuleRecord {
            rule_id: &self.rule_id,
            name: &self.name,
            description: self.description.as_str(),
            severity: self.severity,
            enabled: self.enabled,
            configurable: &self.configurable,
            params: &self.params,
        }
        .serialize(serializer)
    }
}

fn severity_token(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}

fn parse_configurable(entry: &Value) -> Option<Configurable> {
    match entry {
        Value::Sequence(items) if items.len() == 3 => Some(Configurable {
            name: items[0].as_str()?.to_string(),
            help: items[1].as_str()?.to_string(),
            default: items[2].clone(),
        }),
        _ => None,
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => body_text(other),
    }
}

/// Compact single-line rendering of a rule body for error messages.
fn body_text(body: &Value) -> String {
    serde_json::to_string(body).unwrap_or_else(|_| format!("{:?}", body))
}
