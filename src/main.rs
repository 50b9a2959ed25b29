//! Wallet Authentication Server
//!
//! Serves the challenge, verify and refresh endpoints of the wallet login
//! flow.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::signal;

use walletauth_server::auth::CredentialManager;
use walletauth_server::config::Config;
use walletauth_server::routes::build_router;
use walletauth_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!(environment = config.environment.as_str(), "Starting wallet auth server");
    if config.uses_default_secret() {
        tracing::warn!("JWT_SECRET not set, using insecure development secret");
    }

    let credentials = Arc::new(CredentialManager::new(config.jwt_secret.as_bytes()));
    let app_state = AppState::new(credentials);

    let app = build_router(app_state, &config);

    let addr = SocketAddr::from((config.host, config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check at http://{}/health", addr);

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(Duration::from_secs(
            config.shutdown_timeout_seconds,
        )))
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
///
/// Once a signal arrives, in-flight requests get `grace` to finish before
/// the process exits anyway.
async fn shutdown_signal(grace: Duration) {
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
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    tokio::spawn(async move {
        tokio::time::sleep(grace).await;
        tracing::error!("Shutdown timeout exceeded, forcing exit");
        std::process::exit(1);
    });
}
