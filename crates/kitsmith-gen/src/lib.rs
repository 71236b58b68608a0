//! Artifact generators.
//!
//! Each generator deterministically renders one artifact family from a
//! [`ServiceDefinition`] and its own options. Generators never communicate
//! with each other; each is a pure function of its inputs.

mod endpoint;
mod http;
mod logging;
mod printer;

pub use endpoint::EndpointGenerator;
pub use http::{HttpGenerator, HttpOptions};
pub use logging::{LoggingGenerator, LoggingOptions};
pub use printer::{render_file, TypePrinter};

use kitsmith_core::{Result, ServiceDefinition};

pub trait Generator {
    /// Renders the artifact as formatted source text.
    fn generate(&self, def: &ServiceDefinition) -> Result<String>;
}
