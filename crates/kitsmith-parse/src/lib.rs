//! Source model extraction.
//!
//! Locates a named trait in a package of `.rs` files and converts its method
//! signatures, in declaration order, into a [`ServiceDefinition`]. Read-only
//! over the source tree.

mod imports;
mod package;
mod ty;

pub use package::Package;
pub use ty::resolve_type;

use std::fs;
use std::path::Path;

use itertools::Itertools;
use kitsmith_core::error::Error;
use kitsmith_core::{Field, ImportMap, Method, Result, ServiceDefinition};
use syn::{FnArg, Item, ItemTrait, Pat, ReturnType, TraitItem, TraitItemFn, Type};

#[derive(Debug, Clone, Copy, Default)]
pub struct Extractor {}

impl Extractor {
    pub fn new() -> Self {
        Extractor {}
    }

    /// Extracts the definition of the trait named by `reference`
    /// (`<package>::<TraitName>`) from the package rooted at `base_path`.
    pub fn extract(&self, base_path: &Path, reference: &str) -> Result<ServiceDefinition> {
        let package = Package::load(base_path)?;
        let root = format!("crate::{}", package.name);

        let mut imports = ImportMap::new();
        imports.add_as(package.name.clone(), root.clone())?;

        let mut parsed = Vec::new();
        for path in &package.files {
            tracing::debug!("parsing {}", path.display());
            let source = fs::read_to_string(path)?;
            let file = syn::parse_file(&source).map_err(|err| Error::Parse {
                path: path.clone(),
                message: err.to_string(),
            })?;
            for item in &file.items {
                if let Item::Use(item_use) = item {
                    imports::register_use(&mut imports, item_use)?;
                }
            }
            parsed.push(file);
        }

        let mut service = None;
        for file in &parsed {
            for item in &file.items {
                let Item::Trait(item_trait) = item else {
                    continue;
                };
                if format!("{}::{}", package.name, item_trait.ident) == reference {
                    service = Some(extract_trait(item_trait)?);
                }
            }
        }
        let (service_name, methods) =
            service.ok_or_else(|| Error::NotFound(reference.to_string()))?;

        Ok(ServiceDefinition {
            package: package.name,
            root,
            service_name,
            imports,
            methods,
        })
    }
}

fn extract_trait(item_trait: &ItemTrait) -> Result<(String, Vec<Method>)> {
    let name = item_trait.ident.to_string();
    if !item_trait.generics.params.is_empty() {
        return Err(Error::unsupported_type(
            format!("trait {name}"),
            "generic parameters",
        ));
    }
    let methods = item_trait
        .items
        .iter()
        .filter_map(|item| match item {
            TraitItem::Fn(method) => Some(method),
            _ => None,
        })
        .map(extract_method)
        .try_collect()?;
    Ok((name, methods))
}

fn extract_method(method: &TraitItemFn) -> Result<Method> {
    let name = method.sig.ident.to_string();
    let context = format!("method {name}");
    if !method.sig.generics.params.is_empty() {
        return Err(Error::unsupported_type(&context, "generic parameters"));
    }

    let mut params = Vec::new();
    for arg in &method.sig.inputs {
        // The receiver is not part of the model; generators re-add it.
        let FnArg::Typed(arg) = arg else { continue };
        let field_name = match arg.pat.as_ref() {
            Pat::Ident(pat) => pat.ident.to_string(),
            _ => format!("param{}", params.len() + 1),
        };
        let field_ty = ty::resolve_type(&arg.ty, &context)?;
        params.push(Field::new(field_name, field_ty));
    }

    let results = extract_results(&method.sig.output, &context)?;
    Ok(Method {
        name,
        params,
        results,
    })
}

fn extract_results(output: &ReturnType, context: &str) -> Result<Vec<Field>> {
    let ReturnType::Type(_, ret) = output else {
        return Ok(Vec::new());
    };
    match ret.as_ref() {
        // A top-level tuple is the ordered results list; `()` means none.
        Type::Tuple(tuple) => tuple
            .elems
            .iter()
            .enumerate()
            .map(|(i, elem)| {
                Ok(Field::new(
                    format!("result{}", i + 1),
                    ty::resolve_type(elem, context)?,
                ))
            })
            .try_collect(),
        other => Ok(vec![Field::new(
            "result1",
            ty::resolve_type(other, context)?,
        )]),
    }
}
