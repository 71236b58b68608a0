//! Core data model for service scaffolding generation.
//!
//! A [`ServiceDefinition`] is extracted once per invocation from a source
//! trait declaration and then consumed, read-only, by exactly one generator.

pub mod error;
pub mod model;
pub mod naming;

pub use error::{Error, Result};
pub use model::{Field, FieldType, ImportMap, Method, ServiceDefinition};
