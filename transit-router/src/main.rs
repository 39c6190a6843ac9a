use std::io;
use std::path::Path;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use transit_router::config::ServerConfig;
use transit_router::network::TransitNetwork;
use transit_router::requests::{
    Document, RequestError, load_document, load_document_file, process_document, write_responses,
};
use transit_router::web::{AppState, create_router};

/// Fatal errors reported before exiting.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("server error: {0}")]
    Server(#[from] io::Error),

    #[error("usage: transit-router [<document.json> | serve <document.json>]")]
    Usage,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries only the JSON responses
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.as_slice() {
        [] => run_batch(load_document(io::stdin().lock())),
        [command, path] if command == "serve" => serve(Path::new(path)).await,
        [path] if path != "serve" => run_batch(load_document_file(path)),
        _ => Err(CliError::Usage),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Answer a whole document and print the responses.
fn run_batch(document: Result<Document, RequestError>) -> Result<(), CliError> {
    let responses = process_document(&document?)?;
    write_responses(io::stdout().lock(), &responses)?;
    Ok(())
}

/// Load the base data once and serve queries over HTTP.
async fn serve(path: &Path) -> Result<(), CliError> {
    let document = load_document_file(path)?;
    if !document.stat_requests.is_empty() {
        info!(
            count = document.stat_requests.len(),
            "ignoring stat requests in server document"
        );
    }

    // Lives for the rest of the process so the shared router can borrow it
    let network: &'static TransitNetwork =
        Box::leak(Box::new(TransitNetwork::from_document(&document)?));
    info!(
        stops = network.system().stops().len(),
        buses = network.system().buses().len(),
        edges = network.graph().graph().edge_count(),
        "network loaded"
    );

    let app = create_router(AppState::new(network));
    let config = ServerConfig::from_env();

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "transit router listening");
    info!("endpoints: GET /health, POST /stats, POST /process");

    axum::serve(listener, app).await?;
    Ok(())
}
