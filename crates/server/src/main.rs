use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shelfmark_core::{
    create_authenticator, load_config, validate_config, Authenticator, BookCatalog, BookStore,
    CombinedCatalogClient, GoogleBooksClient, NytBooksClient, SqliteBookStore,
};

use shelfmark_server::api::create_router;
use shelfmark_server::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("SHELFMARK_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Auth method: {:?}", config.auth.method);
    info!("Database path: {:?}", config.database.path);

    // Create authenticator
    let authenticator: Arc<dyn Authenticator> = Arc::from(
        create_authenticator(&config.auth).context("Failed to create authenticator")?,
    );
    info!("Using authenticator: {}", authenticator.method_name());

    // Create SQLite book store
    let store: Arc<dyn BookStore> = Arc::new(
        SqliteBookStore::new(&config.database.path).context("Failed to create book store")?,
    );
    info!("Book store initialized");

    // Initialize external catalog client if configured
    let catalog: Option<Arc<dyn BookCatalog>> = if let Some(ref catalogs) = config.catalogs {
        let google_client = catalogs
            .google_books
            .as_ref()
            .map(|cfg| {
                info!("Initializing Google Books client");
                GoogleBooksClient::new(cfg.clone())
            })
            .transpose()
            .context("Failed to create Google Books client")?;

        let nyt_client = catalogs
            .nyt
            .as_ref()
            .map(|cfg| {
                info!("Initializing NYT books client");
                NytBooksClient::new(cfg.clone())
            })
            .transpose()
            .context("Failed to create NYT books client")?;

        if google_client.is_some() || nyt_client.is_some() {
            Some(Arc::new(CombinedCatalogClient::new(
                google_client,
                nyt_client,
            )))
        } else {
            None
        }
    } else {
        info!("External catalogs not configured");
        None
    };

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), authenticator, store, catalog));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutting down...");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
