//! Schema command implementation.
//!
//! The `rulebook schema` command prints the JSON Schema for checker
//! definition files.

use crate::checkers::SchemaGenerator;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
#[derive(Default)]
pub struct SchemaCommand {
    generator: SchemaGenerator,
}

impl SchemaCommand {
    /// Create a new schema command.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let schema = self.generator.generate();
        let json = serde_json::to_string_pretty(&schema).map_err(anyhow::Error::from)?;
        ui.message(&json);
        Ok(CommandResult::success())
    }
}
