//! Checker definition documents.
//!
//! Built-in and external checkers share one YAML format. The loader looks for
//! the top-level `checkers:` list; every entry declares a checker name and a
//! table of rule bodies keyed by rule id:
//!
//! ```yaml
//! checkers:
//!   - name: SmthChecker
//!     description: Optional text
//!     rules:
//!       "1101": [smth, "Keyword call after [Return] statement", E]
//!       "1102": [other-smth, "Line is too long (%d/%d)", W, [line_length, Max length, 120]]
//! ```

use serde::Deserialize;
use serde_yaml::{Mapping, Value};

use super::{Checker, CheckerOrigin};
use crate::error::{Result, RulebookError};
use crate::rules::Rule;

/// A whole checker definition document.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckerFile {
    /// Checkers declared by this document.
    pub checkers: Vec<CheckerDef>,
}

/// One checker entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckerDef {
    /// Checker name, reported in duplicate errors.
    pub name: String,

    /// Optional human-readable description.
    #[serde(default)]
    pub description: Option<String>,

    /// Rule bodies keyed by rule id.
    #[serde(default)]
    pub rules: Mapping,
}

impl CheckerFile {
    /// Parse a definition document.
    pub fn parse(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Build every declared checker.
    pub fn into_checkers(self, origin: &CheckerOrigin) -> Result<Vec<Checker>> {
        self.checkers
            .into_iter()
            .map(|def| def.into_checker(origin.clone()))
            .collect()
    }
}

impl CheckerDef {
    /// Build the checker, constructing each rule from its body.
    pub fn into_checker(self, origin: CheckerOrigin) -> Result<Checker> {
        let mut checker = Checker::new(self.name, origin);
        if let Some(description) = self.description {
            checker = checker.with_description(description);
        }

        for (key, body) in &self.rules {
            let rule_id = rule_id_of(key)?;
            checker = checker.with_rule(Rule::from_body(rule_id, body)?);
        }

        Ok(checker)
    }
}

/// Rule ids may be written as strings or integers.
fn rule_id_of(key: &Value) -> Result<String> {
    let invalid = |reason: &str| {
        let text = serde_json::to_string(key).unwrap_or_else(|_| format!("{:?}", key));
        RulebookError::InvalidRuleBody {
            rule_id: text.clone(),
            body: text,
            reason: reason.to_string(),
        }
    };

    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) if n.is_u64() || n.is_i64() => Ok(n.to_string()),
        Value::Number(_) => Err(invalid("numeric rule id must be an integer")),
        _ => Err(invalid("rule id must be a string or a number")),
    }
}
