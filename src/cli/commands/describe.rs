//! Describe command implementation.
//!
//! The `rulebook describe <RULE>` command shows one rule, its checker and its
//! configurable parameters.

use crate::checkers::RuleRegistry;
use crate::cli::args::DescribeArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The describe command implementation.
pub struct DescribeCommand {
    registry: RuleRegistry,
    args: DescribeArgs,
}

impl DescribeCommand {
    /// Create a new describe command.
    pub fn new(registry: RuleRegistry, args: DescribeArgs) -> Self {
        Self { registry, args }
    }
}

impl Command for DescribeCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(rule) = self.registry.find(&self.args.rule) else {
            ui.error(&format!("Unknown rule '{}'", self.args.rule));
            return Ok(CommandResult::failure(2));
        };

        if self.args.json {
            let json = serde_json::to_string_pretty(rule).map_err(anyhow::Error::from)?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        let checker = self.registry.checker_of(rule.rule_id()).unwrap_or("unknown");
        let mut lines = Vec::new();
        {
            let theme = ui.theme();
            let field = |key: &str, value: &str| {
                format!("  {} {}", theme.key.apply_to(format!("{key}:")), value)
            };

            lines.push(field("Rule", &rule.get_fullname()));
            lines.push(field("Checker", checker));
            lines.push(field("Severity", &rule.severity().to_string()));
            lines.push(field("Enabled", if rule.enabled() { "yes" } else { "no" }));
            lines.push(field("Message", rule.description()));

            if !rule.configurable().is_empty() {
                lines.push(format!("  {}", theme.key.apply_to("Parameters:")));
                for c in rule.configurable() {
                    let value = rule.param(&c.name).map(scalar).unwrap_or_default();
                    lines.push(format!(
                        "    {} = {} {}",
                        c.name,
                        value,
                        theme.dim.apply_to(format!("({})", c.help))
                    ));
                }
            }
        }

        ui.show_header(rule.name());
        for line in &lines {
            ui.message(line);
        }

        Ok(CommandResult::success())
    }
}

fn scalar(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}
