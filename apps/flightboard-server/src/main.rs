use anyhow::{Context, Result};
use axum::{http::HeaderValue, Router};
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs, CorsConfig};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use flight_reports::{api::rest::routes::register_routes, FlightCatalog, ReportStore, Service};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Flightboard Server - flight catalog and report keeping service
#[derive(Parser)]
#[command(name = "flightboard-server")]
#[command(about = "Flightboard Server - flight catalog and report keeping service")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Abort startup when the flight catalog is missing, empty or corrupt
    /// instead of substituting the built-in sample catalog
    #[arg(long)]
    strict_catalog: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI args passed down to config/app
    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        strict_catalog: cli.strict_catalog,
    };

    // Load configuration (normalized data_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;

    // Apply CLI overrides (port / verbosity / catalog policy)
    config.apply_cli_overrides(&args);

    // Initialize logging
    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(
        &logging_config,
        Path::new(&config.storage.data_dir),
    );
    tracing::info!("Flightboard Server starting");

    // Print config and exit if requested
    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    // Execute command
    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config).await,
    }
}

async fn run_server(config: AppConfig) -> Result<()> {
    // Catalog first: in strict mode a bad catalog must abort startup
    // before anything binds.
    let catalog = FlightCatalog::load(
        &config.storage.flights_path(),
        config.storage.strict_catalog,
    )
    .context("Failed to load flight catalog")?;
    tracing::info!("Flight catalog ready with {} flight(s)", catalog.len());

    let store = ReportStore::open(config.storage.reports_path());
    tracing::info!("Report store ready with {} report(s)", store.len());

    let service = Arc::new(Service::new(Arc::new(catalog), store));

    let mut router = register_routes(Router::new(), service);
    router = router.layer(TraceLayer::new_for_http());
    if config.server.timeout_sec > 0 {
        router = router.layer(TimeoutLayer::new(Duration::from_secs(
            config.server.timeout_sec,
        )));
    }
    if let Some(cors) = &config.cors {
        router = router.layer(build_cors_layer(cors)?);
    }

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid listen address '{}:{}'",
                config.server.host, config.server.port
            )
        })?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to listen on {}", addr))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated")?;

    tracing::info!("Flightboard Server stopped");
    Ok(())
}

async fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");

    // Exercise the catalog policy too, so strict mode surfaces a broken
    // catalog here rather than at the next start.
    let catalog = FlightCatalog::load(
        &config.storage.flights_path(),
        config.storage.strict_catalog,
    )
    .context("Failed to load flight catalog")?;

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Flight catalog: {} flight(s)", catalog.len());
    println!("{}", config.to_yaml()?);

    Ok(())
}

/// Allow the configured browser origins to call the API with any headers
/// and methods.
fn build_cors_layer(cors: &CorsConfig) -> Result<CorsLayer> {
    let origins = cors
        .allowed_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin '{}'", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}

/// A future to be passed to [`axum::serve::Serve::with_graceful_shutdown`].
/// When it resolves, the server starts graceful shutdown.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received, stopping server..."),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}
