use itertools::Itertools;
use kitsmith_core::{naming, Method, Result, ServiceDefinition};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::printer::{render_file, TypePrinter};
use crate::Generator;

/// Renders per-method endpoint adapters, request/response shapes, and the
/// aggregate set standing in for the service trait during wiring.
#[derive(Debug, Clone, Copy, Default)]
pub struct EndpointGenerator {}

impl EndpointGenerator {
    pub fn new() -> Self {
        EndpointGenerator {}
    }

    fn print_uses(&self, def: &ServiceDefinition, printer: &TypePrinter) -> Result<TokenStream> {
        let fields = def
            .methods
            .iter()
            .flat_map(|m| m.params.iter().chain(m.results.iter()));
        let foreign = printer.print_uses(&printer.foreign_uses(fields))?;
        Ok(quote! {
            use super::*;
            use serde::{Deserialize, Serialize};
            #foreign
        })
    }

    /// The generic (context, request) -> (response, error) adapter shape.
    fn print_endpoint_alias(&self, printer: &TypePrinter) -> TokenStream {
        let ctx = printer.context_tokens();
        let err = printer.error_tokens();
        quote! {
            pub type Endpoint<Req, Resp> =
                Box<dyn Fn(#ctx, Req) -> Result<Resp, #err> + Send + Sync>;
        }
    }

    /// Lets generic transport error handling detect a failed response
    /// without per-method branching.
    fn print_failer(&self, printer: &TypePrinter) -> TokenStream {
        let err = printer.error_tokens();
        quote! {
            pub trait Failer {
                fn error(&self) -> Option<&#err>;
            }
        }
    }

    fn print_set(&self, def: &ServiceDefinition, printer: &TypePrinter) -> TokenStream {
        let fields = def.methods.iter().map(|m| {
            let name = format_ident!("{}", naming::endpoint_field(&m.name));
            let req = printer.request_tokens(m);
            let resp = printer.response_tokens(m);
            quote!(pub #name: Endpoint<#req, #resp>)
        });
        let doc = format!(
            " Set collects all of the endpoints that compose a {} service.",
            def.service_name
        );
        quote! {
            #[doc = #doc]
            pub struct Set {
                #(#fields,)*
            }
        }
    }

    /// Panic stubs standing in for the trait: intentional scaffolding that
    /// forces explicit wiring of each endpoint.
    fn print_method_stubs(&self, def: &ServiceDefinition, printer: &TypePrinter) -> TokenStream {
        let service = format_ident!("{}", def.service_name);
        let methods = def.methods.iter().map(|m| {
            let fn_name = format_ident!("{}", naming::method_fn(&m.name));
            let params = m.params.iter().map(|f| {
                let name = format_ident!("_{}", f.name);
                let ty = printer.print_type(&f.ty);
                quote!(#name: #ty)
            });
            let ret = printer.print_return(m);
            let msg = format!("endpoint not implemented: {}", naming::method_fn(&m.name));
            quote! {
                fn #fn_name(&self #(, #params)*) #ret {
                    panic!(#msg)
                }
            }
        });
        quote! {
            impl #service for Set {
                #(#methods)*
            }
        }
    }

    /// Adapts the generic endpoint call shape onto the real method: unpack
    /// request fields, substitute the ambient context, invoke, repack.
    fn print_factory(
        &self,
        def: &ServiceDefinition,
        method: &Method,
        printer: &TypePrinter,
    ) -> TokenStream {
        let factory = format_ident!("{}", naming::factory_fn(&method.name));
        let service = format_ident!("{}", def.service_name);
        let method_fn = format_ident!("{}", naming::method_fn(&method.name));
        let req = printer.request_tokens(method);
        let resp = printer.response_tokens(method);

        let ctx_pat = if method.params.iter().any(|f| f.ty.is_context()) {
            quote!(ctx)
        } else {
            quote!(_ctx)
        };
        let req_pat = if method.request_fields().next().is_some() {
            quote!(req)
        } else {
            quote!(_req)
        };
        let args = method.params.iter().map(|f| {
            if f.ty.is_context() {
                quote!(ctx)
            } else {
                let name = format_ident!("{}", f.name);
                quote!(req.#name)
            }
        });

        let body = if method.results.is_empty() {
            quote! {
                svc.#method_fn(#(#args),*);
                Ok(())
            }
        } else {
            let bindings = method
                .results
                .iter()
                .map(|f| format_ident!("{}", f.name))
                .collect_vec();
            let response = format_ident!("{}", naming::response_type(&method.name));
            let pattern = if bindings.len() == 1 {
                let binding = &bindings[0];
                quote!(#binding)
            } else {
                quote!((#(#bindings),*))
            };
            quote! {
                let #pattern = svc.#method_fn(#(#args),*);
                Ok(#response { #(#bindings),* })
            }
        };

        quote! {
            pub fn #factory<S>(svc: S) -> Endpoint<#req, #resp>
            where
                S: #service + Send + Sync + 'static,
            {
                Box::new(move |#ctx_pat, #req_pat| {
                    #body
                })
            }
        }
    }

    /// Request shape (context-typed params excluded) and response shape with
    /// the failure accessor for the first error-typed result.
    fn print_shapes(&self, method: &Method, printer: &TypePrinter) -> TokenStream {
        let mut out = TokenStream::new();

        if !method.params.is_empty() {
            let name = format_ident!("{}", naming::request_type(&method.name));
            let fields = method.request_fields().map(|f| {
                let field = format_ident!("{}", f.name);
                let ty = printer.print_type(&f.ty);
                quote!(pub #field: #ty)
            });
            out.extend(quote! {
                #[derive(Debug, Serialize, Deserialize)]
                pub struct #name {
                    #(#fields,)*
                }
            });
        }

        if !method.results.is_empty() {
            let name = format_ident!("{}", naming::response_type(&method.name));
            let fields = method.results.iter().map(|f| {
                let field = format_ident!("{}", f.name);
                let ty = printer.print_type(&f.ty);
                quote!(pub #field: #ty)
            });
            out.extend(quote! {
                #[derive(Debug, Serialize, Deserialize)]
                pub struct #name {
                    #(#fields,)*
                }
            });

            if let Some(err_field) = method.error_result() {
                let field = format_ident!("{}", err_field.name);
                let err = printer.error_tokens();
                let body = if err_field.ty.optional {
                    quote!(self.#field.as_ref())
                } else {
                    quote!(Some(&self.#field))
                };
                out.extend(quote! {
                    impl Failer for #name {
                        fn error(&self) -> Option<&#err> {
                            #body
                        }
                    }
                });
            }
        }

        out
    }
}

impl Generator for EndpointGenerator {
    fn generate(&self, def: &ServiceDefinition) -> Result<String> {
        let printer = TypePrinter::new(def);
        let uses = self.print_uses(def, &printer)?;
        let alias = self.print_endpoint_alias(&printer);
        let failer = self.print_failer(&printer);
        let set = self.print_set(def, &printer);
        let stubs = self.print_method_stubs(def, &printer);
        let factories: Vec<_> = def
            .methods
            .iter()
            .map(|m| self.print_factory(def, m, &printer))
            .collect();
        let shapes: Vec<_> = def
            .methods
            .iter()
            .map(|m| self.print_shapes(m, &printer))
            .collect();

        render_file(quote! {
            #uses
            #alias
            #failer
            #set
            #stubs
            #(#factories)*
            #(#shapes)*
        })
    }
}

