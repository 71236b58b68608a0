//! Naming normalization for emitted items.
//!
//! Method names arrive in whatever case the source trait used; every emitted
//! identifier is derived here so all generators agree on spelling.

use heck::{ToSnakeCase, ToUpperCamelCase};

/// Field name of a method's endpoint in the aggregate set.
pub fn endpoint_field(method: &str) -> String {
    format!("{}_endpoint", method.to_snake_case())
}

pub fn request_type(method: &str) -> String {
    format!("{}Request", method.to_upper_camel_case())
}

pub fn response_type(method: &str) -> String {
    format!("{}Response", method.to_upper_camel_case())
}

pub fn factory_fn(method: &str) -> String {
    format!("make_{}_endpoint", method.to_snake_case())
}

pub fn route_path(method: &str) -> String {
    format!("/{}", method.to_snake_case())
}

pub fn decode_request_fn(method: &str) -> String {
    format!("decode_http_{}_request", method.to_snake_case())
}

pub fn encode_response_fn(method: &str) -> String {
    format!("encode_http_{}_response", method.to_snake_case())
}

pub fn encode_request_fn(method: &str) -> String {
    format!("encode_http_{}_request", method.to_snake_case())
}

pub fn decode_response_fn(method: &str) -> String {
    format!("decode_http_{}_response", method.to_snake_case())
}

pub fn method_fn(method: &str) -> String {
    method.to_snake_case()
}

pub fn logging_type(service: &str) -> String {
    format!("Logging{}", service.to_upper_camel_case())
}

/// Span name used by the emitted logging decorator.
pub fn span_name(service: &str) -> String {
    service.to_snake_case()
}
