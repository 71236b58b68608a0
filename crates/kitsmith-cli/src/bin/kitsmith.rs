//! kitsmith CLI binary.
//!
//! Turns a declared service trait into generated scaffolding: endpoint
//! adapters, an HTTP transport binding, and a logging decorator.
//!
//! # Usage
//!
//! ```bash
//! # Generate endpoint adapters into the source root
//! kitsmith -p src/helloservice -s helloservice::HelloService endpoint
//!
//! # Generate HTTP wiring with a client constructor and shared codecs
//! kitsmith -p src/helloservice -s helloservice::HelloService \
//!     transport http --client --generic-request --generic-response
//!
//! # Generate the logging decorator with stack traces
//! kitsmith -p src/helloservice -s helloservice::HelloService \
//!     logging --stack-trace
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use kitsmith_cli::commands::{self, LoggingArgs, SourceArgs, TransportHttpArgs};
use kitsmith_cli::config::{Config, LoaderResolver};
use kitsmith_cli::{CliError, Result};
use tracing::error;

#[derive(Parser)]
#[command(
    name = "kitsmith",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generates endpoint, transport, and logging scaffolding from a service trait"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Source root of the service package
    #[arg(short = 'p', long, global = true)]
    path: Option<PathBuf>,

    /// Qualified service reference, e.g. helloservice::HelloService
    #[arg(short = 's', long, global = true)]
    service: Option<String>,

    /// Configuration file supplying --path/--service
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (use multiple times for increased verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Set log output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate endpoint adapters (endpoints.rs)
    Endpoint,

    /// Generate a transport binding
    #[command(subcommand)]
    Transport(TransportCommands),

    /// Generate the logging decorator (logging.rs)
    Logging {
        /// Log a derived stack trace for error-typed results
        #[arg(long)]
        stack_trace: bool,
    },
}

#[derive(Subcommand)]
enum TransportCommands {
    /// HTTP server/client wiring (http.rs)
    Http {
        /// Emit a tracer parameter and attach the layer to the router
        #[arg(long)]
        zipkin: bool,

        /// Emit a logger parameter and per-route error logging
        #[arg(long)]
        logger: bool,

        /// Emit the HTTP client constructor
        #[arg(long)]
        client: bool,

        /// Use one shared request encoder for all methods
        #[arg(long)]
        generic_request: bool,

        /// Use one shared response encoder for all methods
        #[arg(long)]
        generic_response: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet, cli.log_format);

    let source = resolve_source(&cli)?;
    let result = match &cli.command {
        Commands::Endpoint => commands::endpoint_command(&source),
        Commands::Transport(TransportCommands::Http {
            zipkin,
            logger,
            client,
            generic_request,
            generic_response,
        }) => commands::transport_http_command(
            &source,
            &TransportHttpArgs {
                zipkin: *zipkin,
                logger: *logger,
                client: *client,
                generic_request: *generic_request,
                generic_response: *generic_response,
            },
        ),
        Commands::Logging { stack_trace } => commands::logging_command(
            &source,
            &LoggingArgs {
                stack_trace: *stack_trace,
            },
        ),
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}

/// CLI flags win over config-file values; both fall back to an error when a
/// required value is supplied by neither.
fn resolve_source(cli: &Cli) -> Result<SourceArgs> {
    let config = match &cli.config {
        Some(filename) => LoaderResolver::new().load(filename)?,
        None => Config::default(),
    };

    let path = cli.path.clone().or(config.path).ok_or_else(|| {
        CliError::InvalidInput("missing source root (--path or config file)".into())
    })?;
    let service = cli.service.clone().or(config.service).ok_or_else(|| {
        CliError::InvalidInput("missing service reference (--service or config file)".into())
    })?;

    Ok(SourceArgs { path, service })
}

fn setup_logging(verbose: u8, quiet: bool, log_format: LogFormat) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let formatter = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_level(true);

    match log_format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(formatter)
                .with(filter)
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(formatter.json())
                .with(filter)
                .init();
        }
    }
}
