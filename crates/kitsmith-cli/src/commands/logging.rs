use console::style;
use kitsmith_gen::{Generator, LoggingGenerator, LoggingOptions};
use kitsmith_parse::Extractor;

use crate::commands::{write_artifact, SourceArgs};
use crate::Result;

pub const LOGGING_FILE: &str = "logging.rs";

/// Arguments for the logging command.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingArgs {
    pub stack_trace: bool,
}

/// Execute the logging command: extract the service and write the logging
/// decorator artifact.
pub fn logging_command(source: &SourceArgs, args: &LoggingArgs) -> Result<()> {
    let options = LoggingOptions {
        stack_trace: args.stack_trace,
    };

    let def = Extractor::new().extract(&source.path, &source.service)?;
    let output = LoggingGenerator::new(options).generate(&def)?;
    write_artifact(&source.path, LOGGING_FILE, &output)?;

    println!(
        "{} generated {} for {}",
        style("✓").green(),
        LOGGING_FILE,
        source.service
    );
    Ok(())
}
