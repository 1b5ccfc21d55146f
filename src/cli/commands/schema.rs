//! Schema command implementation.
//!
//! The `permis schema` command prints the JSON Schema of the request file
//! accepted by `permis resolve`, for editor validation and integrations.

use crate::error::{PermisError, Result};
use crate::resolver::ResolveRequest;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The schema command implementation.
pub struct SchemaCommand;

/// JSON Schema for [`ResolveRequest`], pretty-printed.
pub fn request_schema() -> Result<String> {
    let schema = schemars::schema_for!(ResolveRequest);
    serde_json::to_string_pretty(&schema).map_err(|e| PermisError::Other(e.into()))
}

impl Command for SchemaCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.data(&request_schema()?);
        Ok(CommandResult::success())
    }
}
