use std::io::{self, BufWriter};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use doi_core::application::LookupService;
use doi_core::error::LookupError;
use html_adapter::HtmlPageWriter;
use sqlite_adapter::SqliteRecordStore;
use thiserror::Error;
use tracing::{error, info};

/// Looks up stored links for a DOI and renders them as HTML
#[derive(Parser, Debug)]
#[command(name = "doifail")]
#[command(about = "Serves an HTML page of known links for each DOI request path")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server
    Serve(ServeArgs),
    /// Render the page for one request path to stdout
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct StoreArgs {
    /// Path to the SQLite database holding the `doi` table
    #[arg(short = 'd', long = "database", env = "DOI_DATABASE", default_value = "doi.sqlite")]
    database: String,
}

#[derive(Args, Debug)]
struct ServeArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Address to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on [default: 8080]
    #[arg(short = 'p', long, env = "PORT")]
    port: Option<u16>,
}

const DEFAULT_PORT: u16 = 8080;

fn resolve_port(port: Option<u16>) -> u16 {
    port.unwrap_or_else(|| {
        info!("Defaulting to port {DEFAULT_PORT}");
        DEFAULT_PORT
    })
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    store: StoreArgs,

    /// Request path, e.g. /10.1000/xyz123
    path: String,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error("Server error: {0}")]
    Server(#[from] io::Error),
}

fn open_service(store: &StoreArgs) -> Result<Arc<LookupService>, CliError> {
    // Instantiate the concrete record store and inject it into the core service
    let record_store = SqliteRecordStore::open(&store.database)?;
    Ok(Arc::new(LookupService::new(Arc::new(record_store))))
}

async fn serve(args: ServeArgs) -> Result<(), CliError> {
    let service = open_service(&args.store)?;
    let address = SocketAddr::new(args.host, resolve_port(args.port));
    http_adapter::serve(address, service).await?;
    Ok(())
}

fn render(args: RenderArgs) -> Result<(), CliError> {
    let service = open_service(&args.store)?;
    let mut page = HtmlPageWriter::new(BufWriter::new(io::stdout().lock()));
    let outcome = service.render(&args.path, &mut page)?;
    info!(path = %args.path, ?outcome, "rendered page");
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Render(args) => render(args),
    };

    if let Err(e) = result {
        error!("{e}");
        std::process::exit(1);
    }
}
