//! Todo API server entry point.

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use todo_api::api::{create_router, AppState};
use todo_api::config::{Config, VERBOSE_LOG_FILTER};
use todo_api::error::AppError;
use todo_api::metrics;
use todo_api::todo::TodoStore;
use todo_api::utils::shutdown_signal;

/// In-memory todo list REST API.
#[derive(Parser, Debug)]
#[command(name = "todo-api")]
#[command(about = "CRUD HTTP API over an in-memory todo list")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP server port (overrides PORT).
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Run {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Start with an empty todo list.
        #[arg(long)]
        no_seed: bool,
    },

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration first so `.env` values drive the log filter
    let loaded = Config::load();

    // Initialize logging
    let directive = match &loaded {
        Ok(config) => config.log_filter(args.verbose),
        Err(_) if args.verbose => VERBOSE_LOG_FILTER.to_string(),
        Err(_) => "info".to_string(),
    };
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(loaded),
        Some(Command::Run { port, no_seed }) => {
            cmd_run(loaded, port.or(args.port), no_seed).await
        }
        None => cmd_run(loaded, args.port, false).await,
    }
}

/// Validate configuration loaded from the environment.
fn validated(loaded: Result<Config, envy::Error>) -> todo_api::Result<Config> {
    let config = loaded?;
    config.validate().map_err(AppError::InvalidConfig)?;
    Ok(config)
}

/// Check configuration validity.
fn cmd_check_config(loaded: Result<Config, envy::Error>) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("TODO API - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match validated(loaded) {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration check failed"));
        }
    };

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Listen: {}:{}", config.bind_host, config.port);
    println!("  CORS Origins: {}", config.cors_origins.join(", "));
    println!("  Seed Todos: {}", config.seed_todos);
    println!("  Log Level: {}", config.rust_log);
    println!("  Verbose: {}", config.verbose);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_run(
    loaded: Result<Config, envy::Error>,
    port_override: Option<u16>,
    no_seed: bool,
) -> anyhow::Result<()> {
    let mut config = loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        AppError::from(e)
    })?;

    // Override with CLI args if provided
    if let Some(port) = port_override {
        config.port = port;
    }
    if no_seed {
        config.seed_todos = false;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(AppError::InvalidConfig(e).into());
    }

    let store = if config.seed_todos {
        TodoStore::seeded()
    } else {
        TodoStore::new()
    };
    info!("Store initialized with {} todos", store.len());

    let mut app_state = AppState::new(store);
    match metrics::init_metrics() {
        Ok(handle) => app_state = app_state.with_metrics(handle),
        Err(e) => warn!("Metrics disabled: {}", e),
    }

    let addr = config.bind_addr().map_err(AppError::InvalidConfig)?;
    let listener = TcpListener::bind(addr).await.map_err(AppError::Io)?;
    info!("HTTP server listening on {}", addr);
    info!("CORS origins: {}", config.cors_origins.join(", "));

    let router = create_router(app_state, &config);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
