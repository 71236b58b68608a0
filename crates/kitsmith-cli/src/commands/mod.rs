//! Command implementations for the kitsmith CLI.

pub mod endpoint;
pub mod logging;
pub mod transport;

pub use endpoint::endpoint_command;
pub use logging::{logging_command, LoggingArgs};
pub use transport::{transport_http_command, TransportHttpArgs};

use std::fs;
use std::path::{Path, PathBuf};

use crate::Result;

/// Source selection shared by every subcommand.
#[derive(Debug, Clone)]
pub struct SourceArgs {
    pub path: PathBuf,
    pub service: String,
}

/// Writes one artifact into the source root. No atomic-replace guarantee;
/// callers needing that must provide it.
pub(crate) fn write_artifact(root: &Path, filename: &str, contents: &str) -> Result<()> {
    let path = root.join(filename);
    fs::write(&path, contents)?;
    tracing::debug!("wrote {}", path.display());
    Ok(())
}
