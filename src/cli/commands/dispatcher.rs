//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands
//! - [`RuleSource`] for loading the effective rule table

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::config::{load_config, PermisConfig};
use crate::error::{PermisError, Result};
use crate::ui::{OutputMode, UserInterface};

/// Exit code for a missing input or override file.
pub const EXIT_NOT_FOUND: i32 = 2;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
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

/// Where the rule table comes from: the project root for discovery, or an
/// explicit override file.
#[derive(Debug, Clone)]
pub struct RuleSource {
    pub project_root: PathBuf,
    pub config_override: Option<PathBuf>,
}

impl RuleSource {
    pub fn new(project_root: impl Into<PathBuf>, config_override: Option<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
            config_override,
        }
    }

    /// Load the effective configuration and apply its default output mode
    /// when no verbosity flag was given.
    ///
    /// Configuration problems are reported to the user; the `Err` side
    /// carries the result the command should return.
    pub fn load(&self, ui: &mut dyn UserInterface) -> Result<std::result::Result<PermisConfig, CommandResult>> {
        let config = match load_config(&self.project_root, self.config_override.as_deref()) {
            Ok(config) => config,
            Err(PermisError::ConfigNotFound { path }) => {
                ui.error(&format!("Rule file not found: {}", path.display()));
                return Ok(Err(CommandResult::failure(EXIT_NOT_FOUND)));
            }
            Err(PermisError::ConfigParseError { path, message }) => {
                ui.error(&format!("Parse error in {}: {}", path.display(), message));
                return Ok(Err(CommandResult::failure(1)));
            }
            Err(e) => return Err(e),
        };

        if ui.output_mode() == OutputMode::Normal {
            if let Some(mode) = config.settings.default_output {
                ui.set_output_mode(mode.into());
            }
        }

        Ok(Ok(config))
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    source: RuleSource,
}

impl CommandDispatcher {
    /// Create a new dispatcher.
    pub fn new(project_root: PathBuf, config_override: Option<PathBuf>) -> Self {
        Self {
            source: RuleSource::new(project_root, config_override),
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.source.project_root
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Commands::Resolve(args) => {
                let cmd = super::resolve::ResolveCommand::new(self.source.clone(), args.clone());
                cmd.execute(ui)
            }
            Commands::Categories(args) => {
                let cmd =
                    super::categories::CategoriesCommand::new(self.source.clone(), args.clone());
                cmd.execute(ui)
            }
            Commands::Check(args) => {
                let cmd = super::check::CheckCommand::new(self.source.clone(), args.clone());
                cmd.execute(ui)
            }
            Commands::Schema => super::schema::SchemaCommand.execute(ui),
            Commands::Completions(args) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
        }
    }
}
