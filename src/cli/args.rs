//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::license::LicenseCategory;
use crate::resolver::ApplicationType;

/// permis - Driving-license prerequisite resolver.
#[derive(Debug, Parser)]
#[command(name = "permis")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a rule override file (replaces .permis/ discovery)
    #[arg(short, long, global = true, env = "PERMIS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

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
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve missing prerequisites for an application
    Resolve(ResolveArgs),

    /// List license categories and their rules
    Categories(CategoriesArgs),

    /// Validate the effective rule table
    Check(CheckArgs),

    /// Print the JSON Schema of the resolve input
    Schema,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `resolve` command.
#[derive(Debug, Clone, clap::Args)]
pub struct ResolveArgs {
    /// Request file (JSON, or YAML by .yml/.yaml extension)
    pub input: PathBuf,

    /// Override the target category
    #[arg(short, long, value_parser = parse_category)]
    pub target: Option<LicenseCategory>,

    /// Override the application type (e.g. new-license, renewal)
    #[arg(short, long, value_parser = parse_application_type)]
    pub application_type: Option<ApplicationType>,

    /// Evaluate expiry dates on this day (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub as_of: Option<NaiveDate>,

    /// Output the resulting verification data as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `categories` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CategoriesArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

fn parse_category(raw: &str) -> Result<LicenseCategory, String> {
    LicenseCategory::new(raw).map_err(|e| e.to_string())
}

fn parse_application_type(raw: &str) -> Result<ApplicationType, String> {
    raw.parse::<ApplicationType>().map_err(|e| {
        let known: Vec<&str> = ApplicationType::ALL.iter().map(|t| t.as_str()).collect();
        format!("{} (expected one of: {})", e, known.join(", "))
    })
}
