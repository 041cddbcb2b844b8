//! `card-token` — membership card token service entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the telemetry pipeline (JSON logs, optional OTLP).
//! 3. Derive the token keyring from the configured secrets.
//! 4. Load the member directory and spawn its refresh task.
//! 5. Build the Axum router and serve until SIGINT/SIGTERM.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use card_token::config::Config;
use card_token::members::{self, FileDirectory};
use card_token::server::{self, auth::IssuerKey, state::AppState};
use card_token::telemetry;
use card_token::token::{Keyring, TokenCodec};

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(&cfg.otel_exporter_otlp_endpoint, &cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        http_port = cfg.http_port,
        "card-token starting"
    );

    // -----------------------------------------------------------------------
    // 3. Keyring
    // -----------------------------------------------------------------------
    let keyring = Keyring::new(&cfg.card_token_secret, &cfg.retired_secret_list())
        .context("failed to derive card token keys")?;
    info!(retired_keys = keyring.retired_len(), "token keyring ready");
    let codec = TokenCodec::new(keyring);

    // -----------------------------------------------------------------------
    // 4. Member directory
    // -----------------------------------------------------------------------
    let directory = FileDirectory::new();
    let _members_refresh = match cfg.members_path() {
        Some(path) => {
            members::reload(&path, &directory).await?;
            Some(members::refresh_task(
                path,
                cfg.members_refresh_interval_secs,
                directory.clone(),
            ))
        }
        None => {
            warn!("MEMBERS_FILE not set; every valid token will resolve to an unknown member");
            None
        }
    };

    // -----------------------------------------------------------------------
    // 5. HTTP server
    // -----------------------------------------------------------------------
    let state = AppState::new(
        codec,
        Arc::new(directory),
        IssuerKey::new(&cfg.issuer_api_key),
        cfg.validation_base_url.clone(),
    );
    let router = server::router::build(state);

    let addr: std::net::SocketAddr = ([0, 0, 0, 0], cfg.http_port).into();
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("card-token stopped");
    Ok(())
}

/// Resolve on SIGINT or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
