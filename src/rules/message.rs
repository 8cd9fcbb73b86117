//! Prepared diagnostic messages.
//!
//! A [`Message`] is a copy of a [`Rule`] bound to a source location with its
//! description fully formatted. Renderers read the fields exposed here
//! (`source`, `line`, `col`, `severity`, `rule_id`, `rule_name`, `desc`).

use std::path::PathBuf;

use serde::Serialize;

use super::rule::{Rule, RuleId};
use super::severity::Severity;

/// A parsed source node that knows its line.
pub trait SourceNode {
    /// 1-indexed line of the node.
    fn lineno(&self) -> usize;
}

/// A message prepared from a rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// Copy of the rule this message was prepared from.
    pub rule: Rule,
    /// File where the issue was found.
    pub source: PathBuf,
    /// Line of the issue, if known.
    pub line: Option<usize>,
    /// Column of the issue.
    pub col: usize,
    /// Formatted description.
    pub desc: String,
}

impl Message {
    pub fn rule_id(&self) -> &RuleId {
        self.rule.rule_id()
    }

    pub fn rule_name(&self) -> &str {
        self.rule.name()
    }

    pub fn severity(&self) -> Severity {
        self.rule.severity()
    }

    /// Whether this message should be reported under `threshold`.
    pub fn meets(&self, threshold: Severity) -> bool {
        self.severity() >= threshold
    }
}

impl Serialize for Message {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct MessageRecord<'a> {
            source: &'a PathBuf,
            line: Option<usize>,
            col: usize,
            severity: Severity,
            rule_id: &'a RuleId,
            rule_name: &'a str,
            desc: &'a str,
        }

        MessageRecord {
            source: &self.source,
            line: self.line,
            col: self.col,
            severity: self.severity(),
            rule_id: self.rule_id(),
            rule_name: self.rule_name(),
            desc: &self.desc,
        }
        .serialize(serializer)
    }
}
