//! Checkers and rule loading.
//!
//! A checker is a named collection of rules and the unit at which rules are
//! loaded. Checkers come from two kinds of sources:
//!
//! - **Built-in** definitions embedded in the binary ([`builtin`])
//! - **External** definition files or directories supplied by the user ([`external`])
//!
//! [`CheckerLoader`] runs the expand -> import -> merge pipeline over all
//! configured sources and produces a [`RuleRegistry`], rejecting duplicate
//! rule names and ids across every checker.
//!
//! # Example
//!
//! ```
//! use rulebook::checkers::CheckerLoader;
//! use rulebook::rules::RuleId;
//!
//! let loaded = CheckerLoader::new().load_checkers().unwrap();
//! assert!(loaded.registry().get(&RuleId::new("0508")).is_some());
//! ```

pub mod builtin;
pub mod definition;
pub mod external;
pub mod loader;
pub mod registry;
pub mod schema;

use std::path::PathBuf;

use crate::rules::{Rule, RuleId};

pub use loader::{CheckerLoader, LoadedCheckers};
pub use registry::RuleRegistry;
pub use schema::SchemaGenerator;

/// Where a checker was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckerOrigin {
    /// Embedded in the binary.
    Builtin,
    /// Loaded from a user-supplied file.
    External(PathBuf),
}

impl std::fmt::Display for CheckerOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckerOrigin::Builtin => write!(f, "built-in"),
            CheckerOrigin::External(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A named collection of rules.
#[derive(Debug, Clone)]
pub struct Checker {
    name: String,
    description: Option<String>,
    origin: CheckerOrigin,
    rules: Vec<Rule>,
}

impl Checker {
    /// Create an empty checker.
    pub fn new(name: impl Into<String>, origin: CheckerOrigin) -> Self {
        Self {
            name: name.into(),
            description: None,
            origin,
            rules: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a rule in declaration order.
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn origin(&self) -> &CheckerOrigin {
        &self.origin
    }

    /// Declared rules, in declaration order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Find a declared rule by id.
    pub fn rule(&self, id: &RuleId) -> Option<&Rule> {
        self.rules.iter().find(|r| r.rule_id() == id)
    }
}
