use console::style;
use kitsmith_gen::{Generator, HttpGenerator, HttpOptions};
use kitsmith_parse::Extractor;

use crate::commands::{write_artifact, SourceArgs};
use crate::Result;

pub const HTTP_FILE: &str = "http.rs";

/// Arguments for the `transport http` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransportHttpArgs {
    pub zipkin: bool,
    pub logger: bool,
    pub client: bool,
    pub generic_request: bool,
    pub generic_response: bool,
}

/// Execute the `transport http` command: extract the service and write the
/// HTTP binding artifact.
pub fn transport_http_command(source: &SourceArgs, args: &TransportHttpArgs) -> Result<()> {
    let options = HttpOptions {
        tracing_layer: args.zipkin,
        request_logger: args.logger,
        client: args.client,
        generic_request: args.generic_request,
        generic_response: args.generic_response,
    };

    let def = Extractor::new().extract(&source.path, &source.service)?;
    let output = HttpGenerator::new(options).generate(&def)?;
    write_artifact(&source.path, HTTP_FILE, &output)?;

    println!(
        "{} generated {} for {}",
        style("✓").green(),
        HTTP_FILE,
        source.service
    );
    Ok(())
}
