//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`]. Commands that need rules load them through a
//! shared [`RuleSource`], so `--config`, `--project` and the configured
//! default output mode behave the same everywhere.

pub mod categories;
pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod resolve;
pub mod schema;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, RuleSource, EXIT_NOT_FOUND};
