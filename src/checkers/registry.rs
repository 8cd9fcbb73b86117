//! Rule registry.
//!
//! The [`RuleRegistry`] is the global `rule_id -> Rule` mapping built from
//! every loaded checker. Registration rejects a rule whose name or id is
//! already taken, whichever checker declared it.
//!
//! Once loading is finished the registry is treated as frozen: overrides and
//! rule selection return a new registry instead of mutating shared rules, so
//! the result can be handed to concurrent analysis as-is.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tracing::{debug, warn};

use super::Checker;
use crate::config::RuleOverride;
use crate::error::{Result, RulebookError};
use crate::rules::{Rule, RuleId, Severity};

#[derive(Debug, Clone)]
struct Entry {
    rule: Arc<Rule>,
    checker: String,
}

/// Registry of all loaded rules.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: BTreeMap<RuleId, Entry>,
    names: HashMap<String, RuleId>,
}

impl RuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule declared by `checker`.
    ///
    /// Fails with `DuplicatedMessage` when the name is taken and with
    /// `DuplicatedRuleId` when the id is taken.
    pub fn register(&mut self, checker: &str, rule: Rule) -> Result<()> {
        if let Some(existing) = self.names.get(rule.name()).and_then(|id| self.rules.get(id)) {
            return Err(RulebookError::DuplicatedMessage {
                name: rule.name().to_string(),
                checker: checker.to_string(),
                existing_checker: existing.checker.clone(),
            });
        }
        if let Some(existing) = self.rules.get(rule.rule_id()) {
            return Err(RulebookError::DuplicatedRuleId {
                rule_id: rule.rule_id().to_string(),
                checker: checker.to_string(),
                existing_checker: existing.checker.clone(),
            });
        }

        self.names
            .insert(rule.name().to_string(), rule.rule_id().clone());
        self.rules.insert(
            rule.rule_id().clone(),
            Entry {
                rule: Arc::new(rule),
                checker: checker.to_string(),
            },
        );
        Ok(())
    }

    /// Register every rule of a checker, in declaration order.
    pub fn register_checker(&mut self, checker: &Checker) -> Result<()> {
        for rule in checker.rules() {
            self.register(checker.name(), rule.clone())?;
        }
        debug!(
            "Registered {} rule(s) from {}",
            checker.rules().len(),
            checker.name()
        );
        Ok(())
    }

    /// Get a rule by ID.
    pub fn get(&self, id: &RuleId) -> Option<&Rule> {
        self.rules.get(id).map(|e| e.rule.as_ref())
    }

    /// Get a shared handle to a rule, for handing to analysis workers.
    pub fn get_shared(&self, id: &RuleId) -> Option<Arc<Rule>> {
        self.rules.get(id).map(|e| Arc::clone(&e.rule))
    }

    /// Look a rule up by id or by name.
    pub fn find(&self, id_or_name: &str) -> Option<&Rule> {
        self.resolve(id_or_name).and_then(|id| self.get(&id))
    }

    /// Name of the checker that declared a rule.
    pub fn checker_of(&self, id: &RuleId) -> Option<&str> {
        self.rules.get(id).map(|e| e.checker.as_str())
    }

    /// Iterate over all rules in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.values().map(|e| e.rule.as_ref())
    }

    /// Enabled rules whose severity is at or above `threshold`.
    pub fn at_least(&self, threshold: Severity) -> impl Iterator<Item = &Rule> {
        self.iter()
            .filter(move |r| r.enabled() && r.severity() >= threshold)
    }

    /// Get the number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn resolve(&self, id_or_name: &str) -> Option<RuleId> {
        let id = RuleId::new(id_or_name);
        if self.rules.contains_key(&id) {
            return Some(id);
        }
        self.names.get(id_or_name).cloned()
    }

    /// Apply overrides to a copy of this registry.
    ///
    /// Only overridden rules are copied; the rest stay shared with `self`.
    /// Nothing is returned unless every override applies.
    pub fn configure(&self, overrides: &[RuleOverride]) -> Result<Self> {
        let mut configured = self.clone();

        for o in overrides {
            let id = configured
                .resolve(&o.rule)
                .ok_or_else(|| RulebookError::UnknownRule {
                    rule: o.rule.clone(),
                })?;
            if let Some(entry) = configured.rules.get_mut(&id) {
                Arc::make_mut(&mut entry.rule).configure(&o.param, &o.value)?;
                debug!("Configured {} with {}={}", id, o.param, o.value);
            }
        }

        Ok(configured)
    }

    /// Enable and disable rules by id or name.
    ///
    /// With a non-empty `include` only the listed rules stay enabled;
    /// `exclude` then disables the listed rules. Unknown entries are logged.
    pub fn select(&self, include: &[String], exclude: &[String]) -> Self {
        let mut selected = self.clone();
        let included: Vec<RuleId> = selected.resolve_all(include);
        let excluded: Vec<RuleId> = selected.resolve_all(exclude);

        for (id, entry) in selected.rules.iter_mut() {
            let enabled = (include.is_empty() || included.contains(id)) && !excluded.contains(id);
            if enabled != entry.rule.enabled() {
                Arc::make_mut(&mut entry.rule).set_enabled(enabled);
            }
        }

        selected
    }

    fn resolve_all(&self, names: &[String]) -> Vec<RuleId> {
        names
            .iter()
            .filter_map(|name| {
                let id = self.resolve(name);
                if id.is_none() {
                    warn!("Ignoring unknown rule '{}'", name);
                }
                id
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkers::CheckerOrigin;

    fn rule(id: &str, name: &str, severity: Severity) -> Rule {
        Rule::new(id, name, "Description of %s", severity, vec![]).unwrap()
    }

    fn sample() -> RuleRegistry {
        let mut registry = RuleRegistry::new();
        registry
            .register("DocChecker", rule("0201", "missing-doc-keyword", Severity::Warning))
            .unwrap();
        registry
            .register("LengthChecker", rule("0508", "line-too-long", Severity::Error))
            .unwrap();
        registry
            .register("LengthChecker", rule("0509", "empty-section", Severity::Info))
            .unwrap();
        registry
    }

    #[test]
    fn registry_new_is_empty() {
        let registry = RuleRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn registry_register_and_get() {
        let registry = sample();

        assert!(!registry.is_empty());
        assert!(registry.get(&RuleId::new("0201")).is_some());
        assert!(registry.get(&RuleId::new("9999")).is_none());
        assert_eq!(registry.checker_of(&RuleId::new("0508")), Some("LengthChecker"));
    }

    #[test]
    fn registry_iteration_in_id_order() {
        let registry = sample();
        let ids: Vec<&str> = registry.iter().map(|r| r.rule_id().as_str()).collect();
        assert_eq!(ids, vec!["0201", "0508", "0509"]);
    }

    #[test]
    fn find_by_id_or_name() {
        let registry = sample();
        assert_eq!(registry.find("0508").map(|r| r.name()), Some("line-too-long"));
        assert_eq!(
            registry.find("line-too-long").map(|r| r.rule_id().as_str()),
            Some("0508")
        );
        assert!(registry.find("unknown").is_none());
    }

    #[test]
    fn duplicate_name_under_other_id_and_checker() {
        let mut registry = sample();
        let err = registry
            .register("OtherChecker", rule("1101", "line-too-long", Severity::Info))
            .unwrap_err();

        match err {
            RulebookError::DuplicatedMessage {
                name,
                checker,
                existing_checker,
            } => {
                assert_eq!(name, "line-too-long");
                assert_eq!(checker, "OtherChecker");
                assert_eq!(existing_checker, "LengthChecker");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(registry.get(&RuleId::new("1101")).is_none());
    }

    #[test]
    fn duplicate_id_is_reported_separately() {
        let mut registry = sample();
        let err = registry
            .register("OtherChecker", rule("0508", "brand-new-name", Severity::Info))
            .unwrap_err();

        assert!(matches!(
            err,
            RulebookError::DuplicatedRuleId { ref rule_id, ref existing_checker, .. }
                if rule_id == "0508" && existing_checker == "LengthChecker"
        ));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn register_checker_adds_all_rules() {
        let checker = Checker::new("SmthChecker", CheckerOrigin::Builtin)
            .with_rule(rule("1101", "smth", Severity::Error))
            .with_rule(rule("1102", "smth-else", Severity::Warning));

        let mut registry = RuleRegistry::new();
        registry.register_checker(&checker).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn threshold_filtering() {
        let registry = sample();

        assert_eq!(registry.at_least(Severity::Info).count(), 3);
        let ids: Vec<&str> = registry
            .at_least(Severity::Warning)
            .map(|r| r.rule_id().as_str())
            .collect();
        assert_eq!(ids, vec!["0201", "0508"]);
        assert_eq!(registry.at_least(Severity::Fatal).count(), 0);
    }

    #[test]
    fn configure_returns_new_registry() {
        let registry = sample();
        let overrides = vec![
            RuleOverride::new("missing-doc-keyword", "severity", "e"),
            RuleOverride::new("0509", "severity", "FATAL"),
        ];

        let configured = registry.configure(&overrides).unwrap();

        assert_eq!(
            configured.get(&RuleId::new("0201")).unwrap().severity(),
            Severity::Error
        );
        assert_eq!(
            configured.get(&RuleId::new("0509")).unwrap().severity(),
            Severity::Fatal
        );
        assert_eq!(
            registry.get(&RuleId::new("0201")).unwrap().severity(),
            Severity::Warning
        );
    }

    #[test]
    fn configure_shares_untouched_rules() {
        let registry = sample();
        let configured = registry
            .configure(&[RuleOverride::new("0201", "severity", "i")])
            .unwrap();

        let before = registry.get_shared(&RuleId::new("0508")).unwrap();
        let after = configured.get_shared(&RuleId::new("0508")).unwrap();
        assert!(Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn configure_unknown_rule_fails() {
        let registry = sample();
        let err = registry
            .configure(&[RuleOverride::new("nope", "severity", "e")])
            .unwrap_err();
        assert!(matches!(err, RulebookError::UnknownRule { ref rule } if rule == "nope"));
    }

    #[test]
    fn configure_bad_severity_fails() {
        let registry = sample();
        let err = registry
            .configure(&[RuleOverride::new("0508", "severity", "bogus")])
            .unwrap_err();
        assert!(matches!(err, RulebookError::InvalidSeverity { .. }));
    }

    #[test]
    fn select_include_and_exclude() {
        let registry = sample();

        let included = registry.select(&["line-too-long".into(), "0509".into()], &[]);
        assert!(!included.get(&RuleId::new("0201")).unwrap().enabled());
        assert!(included.get(&RuleId::new("0508")).unwrap().enabled());

        let excluded = registry.select(&[], &["0509".into(), "unknown".into()]);
        assert!(excluded.get(&RuleId::new("0201")).unwrap().enabled());
        assert!(!excluded.get(&RuleId::new("0509")).unwrap().enabled());
        assert_eq!(excluded.at_least(Severity::Info).count(), 2);

        assert!(registry.get(&RuleId::new("0509")).unwrap().enabled());
    }

    #[test]
    fn registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleRegistry>();
    }
}
