//! Rule and message model.
//!
//! # Overview
//!
//! - **Severity** - Ordered diagnostic level ([`Severity`])
//! - **Rules** - Diagnostic templates with configurable parameters ([`Rule`])
//! - **Templates** - Parsed descriptions with positional placeholders ([`DescriptionTemplate`])
//! - **Messages** - Rules bound to a source location ([`Message`])
//!
//! # Example
//!
//! ```
//! use rulebook::rules::{Rule, Severity};
//!
//! let body = serde_yaml::from_str(r#"[too-many-calls, "Too many calls (%d/%d)", W]"#).unwrap();
//! let rule = Rule::from_body("0503", &body).unwrap();
//!
//! let message = rule
//!     .prepare_message(&[12.into(), 10.into()], "suite.robot", None, Some(4), None)
//!     .unwrap();
//! assert_eq!(message.desc, "Too many calls (12/10)");
//! assert_eq!(message.severity(), Severity::Warning);
//! ```

pub mod message;
pub mod rule;
pub mod severity;
pub mod template;

pub use message::{Message, SourceNode};
pub use rule::{Configurable, Rule, RuleId};
pub use severity::{ParseSeverityError, Severity};
pub use template::{Conversion, DescriptionTemplate, MessageArg, TemplateError};
