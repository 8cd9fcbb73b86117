//! List command implementation.
//!
//! The `rulebook list` command lists the loaded rules at or above a severity
//! threshold.

use crate::checkers::RuleRegistry;
use crate::cli::args::ListArgs;
use crate::config::RulebookConfig;
use crate::error::Result;
use crate::rules::{Rule, Severity};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    registry: RuleRegistry,
    threshold: Severity,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    ///
    /// `--threshold` wins over the config threshold.
    pub fn new(registry: RuleRegistry, config: &RulebookConfig, args: ListArgs) -> Self {
        Self {
            registry,
            threshold: args.threshold.unwrap_or(config.threshold),
            args,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &ListArgs {
        &self.args
    }

    fn selected(&self) -> Vec<&Rule> {
        if self.args.all {
            self.registry
                .iter()
                .filter(|r| r.severity() >= self.threshold)
                .collect()
        } else {
            self.registry.at_least(self.threshold).collect()
        }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let rules = self.selected();

        if self.args.json {
            let json = serde_json::to_string_pretty(&rules).map_err(anyhow::Error::from)?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        ui.show_header(&format!("Rules ({} and above)", self.threshold));

        let lines: Vec<String> = {
            let theme = ui.theme();
            rules
                .iter()
                .map(|rule| {
                    let mut line = format!(
                        "  {} {} {}",
                        theme.highlight.apply_to(rule.rule_id()),
                        theme.format_severity(rule.severity()),
                        rule.name(),
                    );
                    if !rule.enabled() {
                        line.push_str(&format!(" {}", theme.dim.apply_to("(disabled)")));
                    }
                    line
                })
                .collect()
        };
        for line in &lines {
            ui.message(line);
        }

        if rules.is_empty() {
            ui.warning("No rules match the current selection");
        } else {
            ui.success(&format!("{} rule(s) listed", rules.len()));
        }

        Ok(CommandResult::success())
    }
}
