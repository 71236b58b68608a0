use std::collections::BTreeSet;

use kitsmith_core::error::Error;
use kitsmith_core::{naming, Field, FieldType, Method, Result, ServiceDefinition};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

/// Parses the assembled token stream as a file and pretty-prints it.
///
/// A stream that fails to parse signals a generator-internal bug, never a
/// user-input problem.
pub fn render_file(tokens: TokenStream) -> Result<String> {
    let file: syn::File = syn::parse2(tokens).map_err(|err| Error::Format(err.to_string()))?;
    Ok(prettyplease::unparse(&file))
}

/// Prints model types relative to one service definition: local names stay
/// bare, foreign names are package-qualified.
pub struct TypePrinter<'a> {
    def: &'a ServiceDefinition,
}

impl<'a> TypePrinter<'a> {
    pub fn new(def: &'a ServiceDefinition) -> Self {
        TypePrinter { def }
    }

    pub fn print_type(&self, ty: &FieldType) -> TokenStream {
        let mut tokens = self.print_base(ty);
        for _ in 0..ty.vec_depth {
            tokens = quote!(Vec<#tokens>);
        }
        if ty.optional {
            tokens = quote!(Option<#tokens>);
        }
        tokens
    }

    /// Package-qualified name without the slice/option wrappers.
    pub fn print_base(&self, ty: &FieldType) -> TokenStream {
        let name = format_ident!("{}", ty.name);
        match &ty.package {
            Some(package) if *package != self.def.package => {
                let package = format_ident!("{}", package);
                quote!(#package::#name)
            }
            _ => quote!(#name),
        }
    }

    /// Spelling of the ambient context in shared emitted items: the first
    /// context-typed parameter in the definition, or the local bare name.
    pub fn context_tokens(&self) -> TokenStream {
        match self.def.context_type() {
            Some(ty) => self.print_base(ty),
            None => quote!(Context),
        }
    }

    /// Spelling of the designated error kind in shared emitted items.
    pub fn error_tokens(&self) -> TokenStream {
        match self.def.error_type() {
            Some(ty) => self.print_base(ty),
            None => quote!(Error),
        }
    }

    /// Request type of a method: its request struct, or `()` for a method
    /// without parameters.
    pub fn request_tokens(&self, method: &Method) -> TokenStream {
        if method.params.is_empty() {
            return quote!(());
        }
        let name = format_ident!("{}", naming::request_type(&method.name));
        quote!(#name)
    }

    /// Response type of a method: its response struct, or `()` for a method
    /// without results (the null response).
    pub fn response_tokens(&self, method: &Method) -> TokenStream {
        if method.results.is_empty() {
            return quote!(());
        }
        let name = format_ident!("{}", naming::response_type(&method.name));
        quote!(#name)
    }

    /// Return-type tokens of a method as the source trait declares it:
    /// nothing, one type, or a tuple.
    pub fn print_return(&self, method: &Method) -> TokenStream {
        match method.results.as_slice() {
            [] => TokenStream::new(),
            [result] => {
                let ty = self.print_type(&result.ty);
                quote!(-> #ty)
            }
            results => {
                let tys = results.iter().map(|f| self.print_type(&f.ty));
                quote!(-> (#(#tys),*))
            }
        }
    }

    /// Distinct resolvable import paths for every foreign package the given
    /// fields reference, ordered by path. Foreign packages absent from the
    /// registry stay qualified in place and get no use-item.
    pub fn foreign_uses<'f>(&self, fields: impl Iterator<Item = &'f Field>) -> Vec<String> {
        let mut paths = BTreeSet::new();
        for field in fields {
            let Some(package) = &field.ty.package else {
                continue;
            };
            if *package == self.def.package {
                continue;
            }
            if let Some(path) = self.def.imports.get(package) {
                paths.insert(path.to_string());
            }
        }
        paths.into_iter().collect()
    }

    pub fn print_uses(&self, paths: &[String]) -> Result<TokenStream> {
        let mut tokens = TokenStream::new();
        for path in paths {
            let path: syn::Path =
                syn::parse_str(path).map_err(|err| Error::Format(err.to_string()))?;
            tokens.extend(quote!(use #path;));
        }
        Ok(tokens)
    }
}
