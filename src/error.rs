//! Error types for netscan.
//!
//! Uses `thiserror` for ergonomic error definitions. Per-target scan
//! outcomes (closed ports, timeouts) are not errors and never appear here.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid user input, detected before any network activity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("invalid CIDR range: {0}")]
    InvalidRange(String),

    #[error("invalid port specification: {0}")]
    InvalidPortSpec(String),
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine the configuration directory")]
    DirectoryNotFound,

    #[error("failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    #[error("invalid settings file: {0}")]
    InvalidFormat(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors surfaced by the command-line front end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for input parsing.
pub type InputResult<T> = Result<T, InputError>;

/// Result type alias for configuration handling.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type alias for the command-line front end.
pub type CliResult<T> = Result<T, CliError>;
