//! Application bootstrap: wires stores, plugins, and services into a router
//! and runs the HTTP server until a shutdown signal arrives.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use smartspace_core::config::AppConfig;
use smartspace_core::error::AppError;
use smartspace_database::Stores;
use smartspace_plugin::builtin::EchoPlugin;
use smartspace_plugin::{ActionPlugin, PluginManager};

use crate::router::build_router;
use crate::state::AppState;

/// Build the shared application state from configuration.
///
/// Connects the configured store backend (running migrations for Postgres
/// when `database.auto_migrate` is set) and registers every enabled
/// built-in plugin.
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    // ── Step 1: Stores ───────────────────────────────────────────
    tracing::info!(
        provider = ?config.database.provider,
        "Initializing stores..."
    );
    let stores = Stores::from_config(&config.database).await?;

    // ── Step 2: Plugin registry ──────────────────────────────────
    let manager = PluginManager::new(config.plugins.clone());
    manager.load_all(builtin_plugins(&stores)).await?;
    let plugins = manager.registry();

    // ── Step 3: Services ─────────────────────────────────────────
    let plugin_count = plugins.count().await;
    tracing::info!(
        smartspace = %config.smartspace.name,
        plugins = plugin_count,
        "Services initialized"
    );
    Ok(AppState::new(config, stores, plugins))
}

/// Every plugin compiled into the server, bound to the action store.
pub fn builtin_plugins(stores: &Stores) -> Vec<Arc<dyn ActionPlugin>> {
    let mut plugins: Vec<Arc<dyn ActionPlugin>> =
        vec![Arc::new(EchoPlugin::new(stores.actions.clone()))];
    plugins.extend(plugin_attendance::attendance_plugins(
        stores.actions.clone(),
    ));
    plugins
}

/// Start the server and block until it has shut down.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Smartspace v{}", env!("CARGO_PKG_VERSION"));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = build_state(config).await?;
    let stores = state.stores.clone();
    let app = build_router(state);

    // ── Step 4: Bind and serve ───────────────────────────────────
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;
    tracing::info!("Smartspace server listening on {}", addr);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, draining connections...");
        let _ = shutdown_tx.send(true);
    });

    // ── Step 5: Graceful shutdown ────────────────────────────────
    let drain_deadline = async move {
        if shutdown_rx.wait_for(|stopping| *stopping).await.is_ok() {
            tokio::time::sleep(grace).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    let result = tokio::select! {
        served = server.into_future() => served.map_err(|e| AppError::internal(format!("Server error: {e}"))),
        _ = drain_deadline => {
            tracing::warn!(
                grace_seconds = grace.as_secs(),
                "Shutdown grace period elapsed with requests still in flight"
            );
            Ok(())
        }
    };

    stores.close().await;
    tracing::info!("Smartspace server stopped");
    result
}

/// Resolve on Ctrl+C, or on SIGTERM where available.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
}
