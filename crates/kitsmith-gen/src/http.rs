use kitsmith_core::{naming, Method, Result, ServiceDefinition};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::printer::{render_file, TypePrinter};
use crate::Generator;

/// Independent toggles reshaping the emitted HTTP binding. All default off.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpOptions {
    /// Emit a tracing layer parameter and attach it to the router.
    pub tracing_layer: bool,
    /// Emit a logger parameter and per-route error logging.
    pub request_logger: bool,
    /// Emit the client constructor alongside the server wiring.
    pub client: bool,
    /// Replace per-method request encoders with one shared implementation.
    pub generic_request: bool,
    /// Replace per-method response encoders with one shared implementation.
    pub generic_response: bool,
}

/// Renders server/client HTTP wiring and per-method codec stubs.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpGenerator {
    options: HttpOptions,
}

impl HttpGenerator {
    pub fn new(options: HttpOptions) -> Self {
        HttpGenerator { options }
    }

    fn print_uses(&self, def: &ServiceDefinition, printer: &TypePrinter) -> Result<TokenStream> {
        let fields = def
            .methods
            .iter()
            .flat_map(|m| m.params.iter().chain(m.results.iter()));
        let foreign = printer.print_uses(&printer.foreign_uses(fields))?;

        let mut uses = quote! {
            use super::*;
            use super::endpoints::*;
            use axum::body::Body;
            use axum::http::{Request, StatusCode};
            use axum::response::{IntoResponse, Json, Response};
            use axum::routing::post;
            use axum::Router;
        };
        if self.options.client || self.options.generic_request {
            uses.extend(quote! {
                use reqwest::blocking::Client;
                use url::Url;
            });
        }
        if self.options.generic_request || self.options.generic_response {
            uses.extend(quote!(use serde::Serialize;));
        }
        if self.options.tracing_layer {
            uses.extend(quote!(use tower_http::trace::{HttpMakeClassifier, TraceLayer};));
        }
        if self.options.request_logger {
            uses.extend(quote!(use tracing::Span;));
        }
        uses.extend(foreign);
        Ok(uses)
    }

    fn print_vars(&self) -> TokenStream {
        quote! {
            #[doc = " Sentinel mapped to a client-error status by encode_http_error."]
            pub const ERR_BAD_REQUEST: &str = "bad request";
        }
    }

    fn print_server_handler(&self, def: &ServiceDefinition, printer: &TypePrinter) -> TokenStream {
        let service = format_ident!("{}", def.service_name);
        let mut params = vec![quote!(svc: S)];
        if self.options.tracing_layer {
            params.push(quote!(tracer: TraceLayer<HttpMakeClassifier>));
        }
        if self.options.request_logger {
            params.push(quote!(logger: Span));
        }

        let routes = def
            .methods
            .iter()
            .map(|m| self.print_route(m, printer))
            .collect::<Vec<_>>();
        let layer = self
            .options
            .tracing_layer
            .then(|| quote!(let router = router.layer(tracer);));

        let doc = format!(
            " Returns an HTTP handler wiring every {} endpoint to a route.",
            def.service_name
        );
        quote! {
            #[doc = #doc]
            pub fn new_http_handler<S>(#(#params),*) -> Router
            where
                S: #service + Clone + Send + Sync + 'static,
            {
                let router = Router::new();
                #(#routes)*
                #layer
                router
            }
        }
    }

    fn print_route(&self, method: &Method, printer: &TypePrinter) -> TokenStream {
        let path = naming::route_path(&method.name);
        let factory = format_ident!("{}", naming::factory_fn(&method.name));
        let decode = format_ident!("{}", naming::decode_request_fn(&method.name));
        let encode = if self.options.generic_response {
            format_ident!("encode_http_generic_response")
        } else {
            format_ident!("{}", naming::encode_response_fn(&method.name))
        };
        let ctx = printer.context_tokens();
        let method_name = naming::method_fn(&method.name);

        let clone_logger = self
            .options
            .request_logger
            .then(|| quote!(let logger = logger.clone();));
        let log_decode_err = self.options.request_logger.then(|| {
            quote!(tracing::error!(parent: &logger, method = #method_name, error = %err);)
        });
        let log_endpoint_err = log_decode_err.clone();

        quote! {
            let router = router.route(
                #path,
                post({
                    let endpoint = #factory(svc.clone());
                    #clone_logger
                    move |http_request: Request<Body>| async move {
                        let ctx = #ctx::default();
                        let request = match #decode(&ctx, http_request) {
                            Ok(request) => request,
                            Err(err) => {
                                #log_decode_err
                                return encode_http_error(&ctx, &err);
                            }
                        };
                        match endpoint(ctx.clone(), request) {
                            Ok(response) => #encode(&ctx, response),
                            Err(err) => {
                                #log_endpoint_err
                                encode_http_error(&ctx, &err)
                            }
                        }
                    }
                }),
            );
        }
    }

    fn print_client(&self, def: &ServiceDefinition, printer: &TypePrinter) -> TokenStream {
        let err = printer.error_tokens();
        let mut params = vec![quote!(instance: &str)];
        if self.options.tracing_layer {
            params.push(quote!(_tracer: TraceLayer<HttpMakeClassifier>));
        }
        if self.options.request_logger {
            params.push(quote!(_logger: Span));
        }

        let endpoints = def
            .methods
            .iter()
            .map(|m| self.print_client_endpoint(m, printer))
            .collect::<Vec<_>>();
        let fields = def
            .methods
            .iter()
            .map(|m| format_ident!("{}", naming::endpoint_field(&m.name)));

        let doc = format!(
            " Returns a {} backed by an HTTP server living at the remote instance.",
            def.service_name
        );
        quote! {
            #[doc = #doc]
            pub fn new_http_client(#(#params),*) -> Result<Set, #err> {
                let instance = if instance.starts_with("http") {
                    instance.to_string()
                } else {
                    format!("http://{}", instance)
                };
                let base = Url::parse(&instance)?;
                let client = Client::new();
                #(#endpoints)*
                Ok(Set { #(#fields),* })
            }
        }
    }

    fn print_client_endpoint(&self, method: &Method, printer: &TypePrinter) -> TokenStream {
        let field = format_ident!("{}", naming::endpoint_field(&method.name));
        let req = printer.request_tokens(method);
        let resp = printer.response_tokens(method);
        let encode = if self.options.generic_request {
            format_ident!("encode_http_generic_request")
        } else {
            format_ident!("{}", naming::encode_request_fn(&method.name))
        };
        let decode = format_ident!("{}", naming::decode_response_fn(&method.name));

        quote! {
            let #field: Endpoint<#req, #resp> = {
                let client = client.clone();
                let base = base.clone();
                Box::new(move |ctx, request| {
                    let http_request = #encode(&ctx, &client, &base, request)?;
                    let http_response = client.execute(http_request)?;
                    #decode(&ctx, http_response)
                })
            };
        }
    }

    /// Per-method codec stubs plus the shared generic codecs. Stub bodies
    /// panic at call time: developer-facing scaffolding, not a runtime
    /// contract to avoid.
    fn print_codecs(&self, def: &ServiceDefinition, printer: &TypePrinter) -> TokenStream {
        let ctx = printer.context_tokens();
        let err = printer.error_tokens();
        let mut out = TokenStream::new();

        for method in &def.methods {
            let req = printer.request_tokens(method);
            let resp = printer.response_tokens(method);

            let decode_request = format_ident!("{}", naming::decode_request_fn(&method.name));
            let msg = decode_request.to_string();
            out.extend(quote! {
                fn #decode_request(_ctx: &#ctx, _http_request: Request<Body>) -> Result<#req, #err> {
                    unimplemented!(#msg)
                }
            });

            if !self.options.generic_response {
                let encode_response = format_ident!("{}", naming::encode_response_fn(&method.name));
                let msg = encode_response.to_string();
                out.extend(quote! {
                    fn #encode_response(_ctx: &#ctx, _response: #resp) -> Response {
                        unimplemented!(#msg)
                    }
                });
            }

            if self.options.client {
                if !self.options.generic_request {
                    let encode_request =
                        format_ident!("{}", naming::encode_request_fn(&method.name));
                    let msg = encode_request.to_string();
                    out.extend(quote! {
                        fn #encode_request(
                            _ctx: &#ctx,
                            _client: &Client,
                            _base: &Url,
                            _request: #req,
                        ) -> Result<reqwest::blocking::Request, #err> {
                            unimplemented!(#msg)
                        }
                    });
                }
                let decode_response = format_ident!("{}", naming::decode_response_fn(&method.name));
                let msg = decode_response.to_string();
                out.extend(quote! {
                    fn #decode_response(
                        _ctx: &#ctx,
                        _http_response: reqwest::blocking::Response,
                    ) -> Result<#resp, #err> {
                        unimplemented!(#msg)
                    }
                });
            }
        }

        if self.options.generic_response {
            out.extend(quote! {
                #[doc = " Encodes any response exposing the failure accessor; a failed"]
                #[doc = " response delegates to the shared error encoder instead of"]
                #[doc = " writing a body."]
                fn encode_http_generic_response<Resp>(ctx: &#ctx, response: Resp) -> Response
                where
                    Resp: Serialize + Failer,
                {
                    if let Some(err) = response.error() {
                        return encode_http_error(ctx, err);
                    }
                    Json(response).into_response()
                }
            });
        }

        if self.options.generic_request {
            out.extend(quote! {
                #[doc = " Serializes any request as the JSON wire payload body."]
                fn encode_http_generic_request<Req>(
                    _ctx: &#ctx,
                    client: &Client,
                    base: &Url,
                    request: Req,
                ) -> Result<reqwest::blocking::Request, #err>
                where
                    Req: Serialize,
                {
                    let body = serde_json::to_vec(&request)?;
                    Ok(client
                        .post(base.clone())
                        .header("Content-Type", "application/json; charset=utf-8")
                        .body(body)
                        .build()?)
                }
            });
        }

        out
    }

    fn print_error_encoder(&self, printer: &TypePrinter) -> TokenStream {
        let ctx = printer.context_tokens();
        let err = printer.error_tokens();
        quote! {
            fn encode_http_error(_ctx: &#ctx, err: &#err) -> Response {
                let status = if err.to_string() == ERR_BAD_REQUEST {
                    StatusCode::BAD_REQUEST
                } else {
                    StatusCode::INTERNAL_SERVER_ERROR
                };
                (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
            }
        }
    }
}

impl Generator for HttpGenerator {
    fn generate(&self, def: &ServiceDefinition) -> Result<String> {
        let printer = TypePrinter::new(def);
        let uses = self.print_uses(def, &printer)?;
        let vars = self.print_vars();
        let server = self.print_server_handler(def, &printer);
        let client = self
            .options
            .client
            .then(|| self.print_client(def, &printer));
        let codecs = self.print_codecs(def, &printer);
        let error_encoder = self.print_error_encoder(&printer);

        render_file(quote! {
            #uses
            #vars
            #server
            #client
            #codecs
            #error_encoder
        })
    }
}
