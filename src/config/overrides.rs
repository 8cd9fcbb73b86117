//! Rule overrides in `rule:param:value` form.
//!
//! `rule` is a rule id or name, `param` is `severity` or one of the rule's
//! configurables. The value may itself contain `:`.
//!
//! ```
//! use rulebook::config::RuleOverride;
//!
//! let o: RuleOverride = "line-too-long:severity:e".parse().unwrap();
//! assert_eq!(o.rule, "line-too-long");
//! assert_eq!(o.param, "severity");
//! assert_eq!(o.value, "e");
//! ```

use std::str::FromStr;

use crate::error::RulebookError;

/// A single `rule:param:value` setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOverride {
    /// Rule id or name.
    pub rule: String,
    /// `severity` or a configurable name.
    pub param: String,
    /// Raw value.
    pub value: String,
}

impl RuleOverride {
    pub fn new(rule: impl Into<String>, param: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            param: param.into(),
            value: value.into(),
        }
    }

    /// Whether this override changes severity.
    pub fn is_severity(&self) -> bool {
        self.param == "severity"
    }
}

impl FromStr for RuleOverride {
    type Err = RulebookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| RulebookError::InvalidOverride {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = s.splitn(3, ':').map(str::trim);
        let (Some(rule), Some(param), Some(value)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid("expected rule:param:value"));
        };

        if rule.is_empty() {
            return Err(invalid("rule name is empty"));
        }
        if param.is_empty() {
            return Err(invalid("param name is empty"));
        }

        Ok(Self::new(rule, param, value))
    }
}

impl std::fmt::Display for RuleOverride {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.rule, self.param, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_severity_override() {
        let o: RuleOverride = "0508:severity:ERROR".parse().unwrap();
        assert_eq!(o, RuleOverride::new("0508", "severity", "ERROR"));
        assert!(o.is_severity());
    }

    #[test]
    fn value_may_contain_colons() {
        let o: RuleOverride = "not-allowed-char-in-name:invalid_chars:.?:".parse().unwrap();
        assert_eq!(o.value, ".?:");
        assert!(!o.is_severity());
    }

    #[test]
    fn trims_whitespace() {
        let o: RuleOverride = " line-too-long : line_length : 100 ".parse().unwrap();
        assert_eq!(o, RuleOverride::new("line-too-long", "line_length", "100"));
    }

    #[test]
    fn rejects_missing_parts() {
        for value in ["line-too-long", "line-too-long:severity", ":severity:e", "rule::e"] {
            let err = value.parse::<RuleOverride>().unwrap_err();
            assert!(
                matches!(err, RulebookError::InvalidOverride { .. }),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn display_round_trips() {
        let o = RuleOverride::new("0201", "severity", "i");
        assert_eq!(o.to_string(), "0201:severity:i");
        assert_eq!(o.to_string().parse::<RuleOverride>().unwrap(), o);
    }
}
