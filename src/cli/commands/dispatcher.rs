//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::checkers::{CheckerLoader, RuleRegistry};
use crate::cli::args::{Cli, Commands, ListArgs};
use crate::config::{load_config, RulebookConfig};
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Load config, checkers and the configured registry.
    pub fn load(&self, cli: &Cli) -> Result<(RulebookConfig, RuleRegistry)> {
        let config =
            load_config(&self.project_root, cli.config.as_deref())?.merge(cli.overlay());
        debug!("Effective config: {:?}", config);

        let loaded = CheckerLoader::from_config(&config).load_checkers()?;
        let registry = loaded.apply_config(&config)?;
        Ok((config, registry))
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::List(args)) => {
                let (config, registry) = self.load(cli)?;
                super::list::ListCommand::new(registry, &config, args.clone()).execute(ui)
            }
            Some(Commands::Describe(args)) => {
                let (_, registry) = self.load(cli)?;
                super::describe::DescribeCommand::new(registry, args.clone()).execute(ui)
            }
            Some(Commands::Schema) => super::schema::SchemaCommand::new().execute(ui),
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => {
                let (config, registry) = self.load(cli)?;
                super::list::ListCommand::new(registry, &config, ListArgs::default()).execute(ui)
            }
        }
    }
}
