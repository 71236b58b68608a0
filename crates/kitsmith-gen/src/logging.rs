use itertools::Itertools;
use kitsmith_core::{naming, Method, Result, ServiceDefinition};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::printer::{render_file, TypePrinter};
use crate::Generator;

#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingOptions {
    /// Log a derived stack trace for error-typed results.
    pub stack_trace: bool,
}

/// Renders a logging decorator: a delegate plus a structured logger, with
/// one wrapping method of identical signature per trait method.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingGenerator {
    options: LoggingOptions,
}

impl LoggingGenerator {
    pub fn new(options: LoggingOptions) -> Self {
        LoggingGenerator { options }
    }

    fn print_uses(&self, def: &ServiceDefinition, printer: &TypePrinter) -> Result<TokenStream> {
        let fields = def
            .methods
            .iter()
            .flat_map(|m| m.params.iter().chain(m.results.iter()));
        let foreign = printer.print_uses(&printer.foreign_uses(fields))?;
        Ok(quote! {
            use super::*;
            use tracing::Span;
            #foreign
        })
    }

    fn print_struct(&self, def: &ServiceDefinition) -> TokenStream {
        let logging = format_ident!("{}", naming::logging_type(&def.service_name));
        let service = format_ident!("{}", def.service_name);
        let span = naming::span_name(&def.service_name);
        let doc = format!(" Decorates a {} with per-call structured logging.", def.service_name);
        quote! {
            #[doc = #doc]
            pub struct #logging<S> {
                next: S,
                logger: Span,
            }

            impl<S> #logging<S>
            where
                S: #service,
            {
                pub fn new(next: S) -> Self {
                    Self {
                        next,
                        logger: tracing::info_span!(#span),
                    }
                }
            }
        }
    }

    fn print_methods(&self, def: &ServiceDefinition, printer: &TypePrinter) -> TokenStream {
        let logging = format_ident!("{}", naming::logging_type(&def.service_name));
        let service = format_ident!("{}", def.service_name);
        let methods = def
            .methods
            .iter()
            .map(|m| self.print_method(m, printer))
            .collect::<Vec<_>>();
        quote! {
            impl<S> #service for #logging<S>
            where
                S: #service,
            {
                #(#methods)*
            }
        }
    }

    fn print_method(&self, method: &Method, printer: &TypePrinter) -> TokenStream {
        let method_fn = format_ident!("{}", naming::method_fn(&method.name));
        let method_name = naming::method_fn(&method.name);
        let params = method.params.iter().map(|f| {
            let name = format_ident!("{}", f.name);
            let ty = printer.print_type(&f.ty);
            quote!(#name: #ty)
        });
        let ret = printer.print_return(method);
        let args = method
            .params
            .iter()
            .map(|f| format_ident!("{}", f.name))
            .collect_vec();

        let bindings = method
            .results
            .iter()
            .map(|f| format_ident!("{}", f.name))
            .collect_vec();
        let invoke = match bindings.as_slice() {
            [] => quote!(self.next.#method_fn(#(#args),*);),
            [binding] => quote!(let #binding = self.next.#method_fn(#(#args),*);),
            _ => quote!(let (#(#bindings),*) = self.next.#method_fn(#(#args),*);),
        };
        let ret_value = match bindings.as_slice() {
            [] => TokenStream::new(),
            [binding] => quote!(#binding),
            _ => quote!((#(#bindings),*)),
        };

        // stack trace only for methods that actually carry an error result
        let stack_trace = self.options.stack_trace.then(|| method.error_result()).flatten();
        let trace_field = stack_trace.map(|err_field| {
            let field = format_ident!("{}", err_field.name);
            let value = if err_field.ty.optional {
                quote!(#field.as_ref())
            } else {
                quote!(Some(&#field))
            };
            quote!(stack_trace = %stack_trace(#value),)
        });
        let param_fields = method.params.iter().map(|f| {
            let name = format_ident!("{}", f.name);
            quote!(#name = ?#name,)
        });

        quote! {
            fn #method_fn(&self #(, #params)*) #ret {
                #invoke
                {
                    let _enter = self.logger.enter();
                    tracing::info!(method = #method_name, #trace_field #(#param_fields)*);
                }
                #ret_value
            }
        }
    }

    fn print_stack_trace_fn(&self, printer: &TypePrinter) -> TokenStream {
        let err = printer.error_tokens();
        quote! {
            fn stack_trace(err: Option<&#err>) -> String {
                match err {
                    Some(err) => format!("{:?}", err),
                    None => String::new(),
                }
            }
        }
    }
}

impl Generator for LoggingGenerator {
    fn generate(&self, def: &ServiceDefinition) -> Result<String> {
        let printer = TypePrinter::new(def);
        let uses = self.print_uses(def, &printer)?;
        let decorator = self.print_struct(def);
        let methods = self.print_methods(def, &printer);
        let stack_trace = self
            .options
            .stack_trace
            .then(|| self.print_stack_trace_fn(&printer));

        render_file(quote! {
            #uses
            #decorator
            #methods
            #stack_trace
        })
    }
}

