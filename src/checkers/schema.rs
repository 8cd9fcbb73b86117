//! JSON Schema for checker definition files.
//!
//! Lets editors validate and autocomplete `.yml` files passed as external
//! rules.

use serde_json::{json, Value};

use crate::rules::Severity;

/// Generates the JSON Schema (Draft-07) for checker definition files.
pub struct SchemaGenerator;

impl SchemaGenerator {
    /// Create a new schema generator.
    pub fn new() -> Self {
        Self
    }

    /// Generate the complete schema.
    pub fn generate(&self) -> Value {
        json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "title": "Rulebook Checker Definitions",
            "description": "Checkers and the rules they declare",
            "type": "object",
            "required": ["checkers"],
            "properties": {
                "checkers": {
                    "type": "array",
                    "items": self.checker_schema()
                }
            },
            "additionalProperties": false
        })
    }

    fn checker_schema(&self) -> Value {
        json!({
            "type": "object",
            "required": ["name"],
            "properties": {
                "name": {
                    "type": "string",
                    "description": "Checker name, unique across loaded checkers"
                },
                "description": {
                    "type": "string"
                },
                "rules": {
                    "type": "object",
                    "description": "Rule bodies keyed by rule id",
                    "additionalProperties": self.rule_body_schema()
                }
            },
            "additionalProperties": false
        })
    }

    /// `[name, description, severity, [param, help, default]...]`
    fn rule_body_schema(&self) -> Value {
        json!({
            "type": "array",
            "minItems": 3,
            "items": [
                {
                    "type": "string",
                    "description": "Rule name, unique across loaded checkers"
                },
                {
                    "type": "string",
                    "description": "Message template with %s, %r, %d, %i, %f and %% placeholders"
                },
                self.severity_schema()
            ],
            "additionalItems": self.configurable_schema()
        })
    }

    fn severity_schema(&self) -> Value {
        // JSON Schema patterns are ECMA-262, which has no inline case flag
        let alternatives: Vec<String> = Severity::ALL
            .iter()
            .map(|s| {
                let word = s.to_string();
                let mut chars = word.chars();
                let head = chars.next().map(either_case).unwrap_or_default();
                let tail: String = chars.map(either_case).collect();
                format!("{}({})?", head, tail)
            })
            .collect();

        json!({
            "type": "string",
            "description": "Severity: I, info, W, warning, E, error, F or fatal (case insensitive)",
            "pattern": format!("^({})$", alternatives.join("|"))
        })
    }

    fn configurable_schema(&self) -> Value {
        json!({
            "type": "array",
            "description": "Configurable parameter: [name, help, default]",
            "minItems": 3,
            "maxItems": 3,
            "items": [
                { "type": "string" },
                { "type": "string" },
                {}
            ]
        })
    }
}

fn either_case(c: char) -> String {
    format!("[{}{}]", c.to_ascii_uppercase(), c.to_ascii_lowercase())
}

impl Default for SchemaGenerator {
    fn default() -> Self {
        Self::new()
    }
}
