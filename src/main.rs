use dotenvy::dotenv;
use linguadesk::logging::{init_tracing, shutdown_tracer};
use linguadesk::metrics::{init_metrics, metrics_app};
use linguadesk::router::init_router;
use linguadesk::state::AppState;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing()?;

    let metrics_handle = init_metrics();
    let state = AppState::from_env()?;
    let address = state.server_config.bind_address();
    let public_url = state.server_config.public_url.clone();

    let mut app = init_router(state);
    if let Some(handle) = metrics_handle {
        app = app.merge(metrics_app(handle));
    }

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(address = %address, "🚀 Server running on {}", public_url);
    info!("📚 Swagger UI available at {}/swagger-ui", public_url);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tracer().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    info!("Shutdown signal received");
}
