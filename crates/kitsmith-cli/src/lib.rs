//! Command-line interface for kitsmith.
//!
//! Global options select the source root and target service trait;
//! subcommands select the artifact family. Every invocation writes exactly
//! one fixed-name file into the source root.

pub mod commands;
pub mod config;

// CLI-specific error handling
pub mod error {
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum CliError {
        #[error("io error: {0}")]
        Io(#[from] std::io::Error),

        #[error("configuration error: {0}")]
        Config(String),

        #[error("invalid input: {0}")]
        InvalidInput(String),

        #[error(transparent)]
        Core(#[from] kitsmith_core::Error),
    }

    pub type Result<T> = std::result::Result<T, CliError>;
}

pub use error::{CliError, Result};
