//! Rulebook - lint rule model and checker loading.
//!
//! Rulebook defines how a lint rule is declared, how its severity is ranked,
//! how a positioned diagnostic message is prepared from a rule, and how
//! checkers (named collections of rules) are loaded from built-in and
//! user-supplied definition files with duplicate detection across all of them.
//!
//! # Modules
//!
//! - [`checkers`] - Checker loading and the rule registry
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `.rulebook.yml` loading and rule overrides
//! - [`error`] - Error types and result aliases
//! - [`rules`] - Severity, rules, description templates and messages
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use rulebook::checkers::CheckerLoader;
//! use rulebook::config::RuleOverride;
//! use rulebook::rules::Severity;
//!
//! let loaded = CheckerLoader::new().load_checkers().unwrap();
//! let registry = loaded
//!     .registry()
//!     .configure(&["line-too-long:severity:e".parse::<RuleOverride>().unwrap()])
//!     .unwrap();
//!
//! let rule = registry.find("line-too-long").unwrap();
//! assert_eq!(rule.severity(), Severity::Error);
//!
//! let message = rule
//!     .prepare_message(&[130.into(), 120.into()], "suite.robot", None, Some(7), None)
//!     .unwrap();
//! assert_eq!(message.desc, "Line is too long (130/120)");
//! ```

pub mod checkers;
pub mod cli;
pub mod config;
pub mod error;
pub mod rules;
pub mod ui;

pub use error::{Result, RulebookError};
