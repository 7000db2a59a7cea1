use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nodeflow_api::config::ServerConfig;
use nodeflow_api::router::build_app_router;
use nodeflow_api::state::AppState;
use nodeflow_db::PgWorkflowStore;
use nodeflow_events::{FunctionManifest, OrchestratorClient, ServeHandler};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nodeflow_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        app_env = ?config.app_env,
        "Loaded server configuration"
    );
    match &config.checkout_success_url {
        Some(url) => tracing::info!(%url, "Checkout success URL configured"),
        None => tracing::warn!("CHECKOUT_SUCCESS_URL is not set; checkout redirects will fail"),
    }

    // --- Database ---
    let pool = nodeflow_db::acquire(&config.database_url, &config.pool_settings())
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    nodeflow_db::run_migrations(pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Orchestrator ---
    let orchestrator = OrchestratorClient::shared(config.orchestrator.clone())
        .expect("Failed to build orchestrator client");
    tracing::info!(
        base_url = %config.orchestrator.base_url,
        api_url = %config.orchestrator.api_url,
        app_id = %config.orchestrator.app_id,
        "Orchestrator client created"
    );
    let serve = ServeHandler::new(Arc::clone(&orchestrator), vec![FunctionManifest::execute()]);

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        workflows: Arc::new(PgWorkflowStore::new(pool.clone())),
        events: orchestrator,
        serve: Arc::new(serve),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
