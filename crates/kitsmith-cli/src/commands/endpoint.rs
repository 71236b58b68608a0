use console::style;
use kitsmith_gen::{EndpointGenerator, Generator};
use kitsmith_parse::Extractor;

use crate::commands::{write_artifact, SourceArgs};
use crate::Result;

pub const ENDPOINT_FILE: &str = "endpoints.rs";

/// Execute the endpoint command: extract the service and write the endpoint
/// adapters artifact.
pub fn endpoint_command(source: &SourceArgs) -> Result<()> {
    let def = Extractor::new().extract(&source.path, &source.service)?;
    let output = EndpointGenerator::new().generate(&def)?;
    write_artifact(&source.path, ENDPOINT_FILE, &output)?;

    println!(
        "{} generated {} for {}",
        style("✓").green(),
        ENDPOINT_FILE,
        source.service
    );
    Ok(())
}
