use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Final type name recognized as the ambient per-call context capability.
pub const CONTEXT_TYPE: &str = "Context";
/// Final type name recognized as the designated error kind.
pub const ERROR_TYPE: &str = "Error";

/// The extracted model of one service trait. Built once per invocation,
/// immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDefinition {
    /// Short package name, e.g. `helloservice`.
    pub package: String,
    /// Root import path of the package, e.g. `crate::helloservice`.
    pub root: String,
    /// Name of the source trait.
    pub service_name: String,
    pub imports: ImportMap,
    pub methods: Vec<Method>,
}

impl ServiceDefinition {
    /// First context-typed parameter type seen across all methods, in
    /// declaration order. Generators use its spelling for shared items.
    pub fn context_type(&self) -> Option<&FieldType> {
        self.methods
            .iter()
            .flat_map(|m| m.params.iter())
            .map(|f| &f.ty)
            .find(|ty| ty.is_context())
    }

    /// First error-typed result type seen across all methods.
    pub fn error_type(&self) -> Option<&FieldType> {
        self.methods
            .iter()
            .flat_map(|m| m.results.iter())
            .map(|f| &f.ty)
            .find(|ty| ty.is_error())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub params: Vec<Field>,
    pub results: Vec<Field>,
}

impl Method {
    /// Parameters that belong to the wire request shape: everything except
    /// the ambient context capability, which the transport supplies.
    pub fn request_fields(&self) -> impl Iterator<Item = &Field> {
        self.params.iter().filter(|f| !f.ty.is_context())
    }

    /// First error-typed result. When a method declares several, the first
    /// wins; this is the documented tie-break, not an error.
    pub fn error_result(&self) -> Option<&Field> {
        self.results.iter().find(|f| f.ty.is_error())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Field {
            name: name.into(),
            ty,
        }
    }
}

/// A resolved parameter/result type expression.
///
/// `package == None` means local to the service's own package. `vec_depth`
/// counts slice-marker nesting (`Vec<Vec<T>>` has depth 2). `optional`
/// records one outermost `Option` wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldType {
    pub package: Option<String>,
    pub name: String,
    pub vec_depth: u8,
    pub optional: bool,
}

impl FieldType {
    pub fn local(name: impl Into<String>) -> Self {
        FieldType {
            package: None,
            name: name.into(),
            vec_depth: 0,
            optional: false,
        }
    }

    pub fn foreign(package: impl Into<String>, name: impl Into<String>) -> Self {
        FieldType {
            package: Some(package.into()),
            name: name.into(),
            vec_depth: 0,
            optional: false,
        }
    }

    pub fn vec(mut self) -> Self {
        self.vec_depth += 1;
        self
    }

    pub fn option(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn is_context(&self) -> bool {
        self.name == CONTEXT_TYPE && self.vec_depth == 0 && !self.optional
    }

    pub fn is_error(&self) -> bool {
        self.name == ERROR_TYPE && self.vec_depth == 0
    }
}

/// Maps short package identifiers to fully qualified import paths.
///
/// Append-only; read-only once extraction completes. Inserting a different
/// path under an existing identifier is a hard error rather than a silent
/// overwrite; `add_as` is the explicit-aliasing escape hatch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportMap {
    entries: BTreeMap<String, String>,
}

impl ImportMap {
    pub fn new() -> Self {
        ImportMap::default()
    }

    /// Derives the short identifier (final `::` segment) and inserts.
    pub fn add(&mut self, path: &str) -> Result<()> {
        let ident = Self::short_ident(path).to_string();
        self.add_as(ident, path)
    }

    /// Inserts under an explicit identifier.
    pub fn add_as(&mut self, ident: impl Into<String>, path: impl Into<String>) -> Result<()> {
        let ident = ident.into();
        let path = path.into();
        match self.entries.get(&ident) {
            Some(existing) if *existing != path => Err(Error::ImportCollision {
                ident,
                existing: existing.clone(),
                conflicting: path,
            }),
            Some(_) => Ok(()),
            None => {
                self.entries.insert(ident, path);
                Ok(())
            }
        }
    }

    pub fn get(&self, ident: &str) -> Option<&str> {
        self.entries.get(ident).map(String::as_str)
    }

    pub fn short_ident(path: &str) -> &str {
        path.rsplit("::").next().unwrap_or(path)
    }
}
