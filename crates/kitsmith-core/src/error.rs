use std::path::PathBuf;
use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("service interface not found: {0}")]
    NotFound(String),
    #[error("unsupported type for {context}: {detail}")]
    UnsupportedType { context: String, detail: String },
    #[error("import collision on `{ident}`: `{existing}` vs `{conflicting}` (use an explicit alias)")]
    ImportCollision {
        ident: String,
        existing: String,
        conflicting: String,
    },
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("generated source failed to parse: {0}")]
    Format(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Generic(String),
}

pub type Result<T> = result::Result<T, Error>;

impl Error {
    pub fn unsupported_type(context: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::UnsupportedType {
            context: context.into(),
            detail: detail.into(),
        }
    }
}

impl From<eyre::Report> for Error {
    fn from(err: eyre::Report) -> Self {
        Error::Generic(err.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Generic(s)
    }
}
