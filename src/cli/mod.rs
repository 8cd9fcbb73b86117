//! Command-line interface for rulebook.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, DescribeArgs, ListArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
