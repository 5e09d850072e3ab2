//! Schema command implementation.
//!
//! `buildseq schema` prints the JSON schema of `.buildseq/config.yml`,
//! for editor integration.

use crate::config::BuildseqConfig;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
pub struct SchemaCommand;

impl SchemaCommand {
    /// Render the configuration schema as pretty-printed JSON.
    pub fn render() -> Result<String> {
        let schema = schemars::schema_for!(BuildseqConfig);
        serde_json::to_string_pretty(&schema).map_err(|e| anyhow::Error::from(e).into())
    }
}

impl Command for SchemaCommand {
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        println!("{}", Self::render()?);
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_is_valid_json() {
        let rendered = SchemaCommand::render().unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert!(value.is_object());
    }

    #[test]
    fn schema_describes_steps_and_pipelines() {
        let rendered = SchemaCommand::render().unwrap();
        assert!(rendered.contains("\"steps\""));
        assert!(rendered.contains("\"pipelines\""));
        assert!(rendered.contains("BuildseqConfig"));
    }
}
