//! Command-line interface for permis.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CategoriesArgs, CheckArgs, Cli, Commands, CompletionsArgs, ResolveArgs};
pub use commands::{Command, CommandDispatcher, CommandResult, RuleSource};
