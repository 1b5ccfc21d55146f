//! Error types for permis operations.
//!
//! This module defines [`PermisError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `PermisError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `PermisError::Other`) for unexpected errors
//! - Policy refusals (removing an auto-populated row, unknown categories) are
//!   not errors; they are reported through return values

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for permis operations.
#[derive(Debug, Error)]
pub enum PermisError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid rule table or settings.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// A license category code was empty or malformed.
    #[error("Invalid license category: '{value}'")]
    InvalidCategory { value: String },

    /// An application type name was not recognized.
    #[error("Unknown application type: {name}")]
    UnknownApplicationType { name: String },

    /// No external license with the given id is attached.
    #[error("Unknown external license: {id}")]
    UnknownLicense { id: String },

    /// A resolve request file could not be read or parsed.
    #[error("Invalid input at {path}: {message}")]
    InputError { path: PathBuf, message: String },

    /// The system-of-record license lookup failed.
    #[error("License lookup failed: {message}")]
    LicenseFetch { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for permis operations.
pub type Result<T> = std::result::Result<T, PermisError>;
