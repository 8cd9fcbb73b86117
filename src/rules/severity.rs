//! Rule severity.
//!
//! Severities are ranked `Info < Warning < Error < Fatal`. The rank comes from
//! an explicit table, never from the declaration order of the enum, and the
//! same table is used when comparing against a canonical single-letter token.
//!
//! Severity can be reconfigured with `-c/--configure id_or_name:severity:value`
//! where the value is the first letter or the whole name, case insensitive:
//!
//! ```
//! use rulebook::rules::Severity;
//!
//! assert_eq!("e".parse::<Severity>().unwrap(), Severity::Error);
//! assert_eq!("WARNING".parse::<Severity>().unwrap(), Severity::Warning);
//! assert!(Severity::Warning < Severity::Error);
//! assert!(Severity::Fatal > "E");
//! ```

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Severity level of a rule and of the messages it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Informational message.
    Info,
    /// Something that should be addressed.
    Warning,
    /// Something that is wrong.
    Error,
    /// Something that prevents further analysis.
    Fatal,
}

/// Severity token could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid severity '{token}'")]
pub struct ParseSeverityError {
    /// The rejected token.
    pub token: String,
}

impl Severity {
    /// All severities from lowest to highest.
    pub const ALL: [Severity; 4] = [
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Fatal,
    ];

    /// Position in the fixed rank order (0 is lowest).
    pub fn rank(self) -> u8 {
        match self {
            Severity::Info => 0,
            Severity::Warning => 1,
            Severity::Error => 2,
            Severity::Fatal => 3,
        }
    }

    /// Canonical single-letter token.
    pub fn letter(self) -> &'static str {
        match self {
            Severity::Info => "I",
            Severity::Warning => "W",
            Severity::Error => "E",
            Severity::Fatal => "F",
        }
    }

    /// Resolve a canonical single-letter token (`"I"`, `"W"`, `"E"`, `"F"`).
    pub fn from_letter(letter: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.letter() == letter)
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "i" | "info" => Ok(Severity::Info),
            "w" | "warning" => Ok(Severity::Warning),
            "e" | "error" => Ok(Severity::Error),
            "f" | "fatal" => Ok(Severity::Fatal),
            _ => Err(ParseSeverityError {
                token: s.to_string(),
            }),
        }
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq<&str> for Severity {
    fn eq(&self, other: &&str) -> bool {
        self.letter() == *other
    }
}

impl PartialOrd<&str> for Severity {
    /// Tokens other than the canonical letters are incomparable.
    fn partial_cmp(&self, other: &&str) -> Option<Ordering> {
        Severity::from_letter(other).map(|o| self.cmp(&o))
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal"),
        }
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.letter())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        token.parse().map_err(serde::de::Error::custom)
    }
}
