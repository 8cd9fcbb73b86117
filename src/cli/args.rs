//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::ConfigOverlay;
use crate::rules::Severity;

/// Rulebook - Lint rule catalogue and checker loader.
#[derive(Debug, Parser)]
#[command(name = "rulebook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .rulebook.yml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// External checker files or directories (comma-separated)
    #[arg(long, global = true, value_delimiter = ',', value_name = "PATH")]
    pub ext_rules: Vec<PathBuf>,

    /// Configure a rule as rule:param:value (repeatable)
    #[arg(short = 'c', long, global = true, value_name = "RULE:PARAM:VALUE")]
    pub configure: Vec<String>,

    /// Enable only these rules, by id or name (comma-separated)
    #[arg(long, global = true, value_delimiter = ',')]
    pub include: Vec<String>,

    /// Disable these rules, by id or name (comma-separated)
    #[arg(long, global = true, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Flags that extend the loaded config file.
    pub fn overlay(&self) -> ConfigOverlay {
        let threshold = match &self.command {
            Some(Commands::List(args)) => args.threshold,
            _ => None,
        };

        ConfigOverlay {
            ext_rules: self.ext_rules.clone(),
            configure: self.configure.clone(),
            threshold,
            include: self.include.clone(),
            exclude: self.exclude.clone(),
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List loaded rules (default if no command specified)
    List(ListArgs),

    /// Show details for one rule
    Describe(DescribeArgs),

    /// Print the JSON Schema for checker definition files
    Schema,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Only list rules at or above this severity (I, W, E, F)
    #[arg(short, long, value_name = "SEVERITY")]
    pub threshold: Option<Severity>,

    /// Include disabled rules
    #[arg(long)]
    pub all: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `describe` command.
#[derive(Debug, Clone, clap::Args)]
pub struct DescribeArgs {
    /// Rule id or name
    pub rule: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "rulebook",
            "list",
            "--ext-rules",
            "a.yml,rules",
            "-c",
            "0508:line_length:80",
            "-c",
            "line-too-long:severity:e",
            "--exclude",
            "0509",
        ]);

        assert_eq!(cli.ext_rules, vec![PathBuf::from("a.yml"), PathBuf::from("rules")]);
        assert_eq!(cli.configure.len(), 2);
        assert_eq!(cli.exclude, vec!["0509"]);
    }

    #[test]
    fn parses_threshold_tokens() {
        let cli = Cli::parse_from(["rulebook", "list", "--threshold", "warning"]);
        match cli.command {
            Some(Commands::List(args)) => assert_eq!(args.threshold, Some(Severity::Warning)),
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::parse_from(["rulebook", "list", "-t", "E"]);
        assert_eq!(cli.overlay().threshold, Some(Severity::Error));
    }

    #[test]
    fn rejects_bad_threshold() {
        assert!(Cli::try_parse_from(["rulebook", "list", "-t", "loud"]).is_err());
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::parse_from(["rulebook"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.overlay().threshold, None);
    }

    #[test]
    fn describe_takes_rule() {
        let cli = Cli::parse_from(["rulebook", "describe", "line-too-long"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Describe(DescribeArgs { ref rule, .. })) if rule == "line-too-long"
        ));
    }
}
