use anyhow::Result;
use tokio::net::TcpListener;
use tokio::signal;

use db_console_service::config::Settings;
use db_console_service::postgres::DataSource;
use db_console_service::server::{create_app, AppState};
use db_console_service::telemetry::init_telemetry;
use db_console_service::user::seed_sample_users;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let settings = Settings::new()?;

    // Initialize tracing
    let _telemetry = init_telemetry(&settings.otel)?;
    tracing::info!("Configuration loaded");

    // Connect to the database
    let data_source = DataSource::connect(&settings.database).await?;
    tracing::info!(url = %data_source.database_url_masked(), "Database connected");

    // Create application state
    let state = AppState::new(&settings, data_source);

    if settings.database.create_schema {
        state.users.ensure_schema().await?;
    }
    if settings.seed.enabled {
        seed_sample_users(&state.users).await?;
    }

    let data_source = state.data_source.clone();

    // Create Axum app
    let app = create_app(state);

    // Start server
    let addr = settings.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal_handler())
        .await?;

    data_source.close().await;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal_handler() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
