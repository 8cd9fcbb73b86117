//! Integration tests for config module public API.

use rulebook::checkers::CheckerLoader;
use rulebook::config::{find_project_root, load_config, ConfigOverlay, RulebookConfig};
use rulebook::rules::{RuleId, Severity};
use std::fs;
use tempfile::TempDir;

#[test]
fn public_api_is_accessible() {
    let config = RulebookConfig::default();
    assert_eq!(config.threshold, Severity::Info);
    assert!(config.overrides().unwrap().is_empty());
}

#[test]
fn full_config_workflow() {
    let temp = TempDir::new().unwrap();
    let rules_dir = temp.path().join("rules");
    fs::create_dir_all(&rules_dir).unwrap();
    fs::write(
        rules_dir.join("team.yml"),
        r#"
checkers:
  - name: TeamChecker
    rules:
      "2001": [team-rule, "Team rule triggered by %s", I, [limit, "Team limit", 10]]
"#,
    )
    .unwrap();
    fs::write(
        temp.path().join(".rulebook.yml"),
        r#"
ext_rules: [rules]
configure:
  - team-rule:severity:warning
  - team-rule:limit:25
exclude: [empty-section]
"#,
    )
    .unwrap();

    let nested = temp.path().join("suites").join("smoke");
    fs::create_dir_all(&nested).unwrap();
    let root = find_project_root(&nested).unwrap();
    assert_eq!(root, temp.path());

    let config = load_config(&root, None)
        .unwrap()
        .merge(ConfigOverlay {
            threshold: Some(Severity::Warning),
            ..Default::default()
        });

    let loaded = CheckerLoader::from_config(&config).load_checkers().unwrap();
    let registry = loaded.apply_config(&config).unwrap();

    let team = registry.get(&RuleId::new("2001")).unwrap();
    assert_eq!(team.severity(), Severity::Warning);
    assert_eq!(team.param("limit"), Some(&serde_yaml::Value::from(25)));
    assert!(!registry.find("empty-section").unwrap().enabled());

    let listed: Vec<&str> = registry
        .at_least(config.threshold)
        .map(|r| r.name())
        .collect();
    assert!(listed.contains(&"team-rule"));
    assert!(!listed.contains(&"empty-section"));
}

#[test]
fn unknown_rule_in_config_is_rejected() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(".rulebook.yml"),
        "configure: [\"no-such-rule:severity:e\"]\n",
    )
    .unwrap();

    let config = load_config(temp.path(), None).unwrap();
    let loaded = CheckerLoader::from_config(&config).load_checkers().unwrap();
    let err = loaded.apply_config(&config).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Fatal error: Provided rule 'no-such-rule' does not exist"
    );
}
