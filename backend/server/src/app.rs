use std::sync::Arc;

use crate::{
    configs::Config,
    error::ConfigurationError,
    http::{router::create_router, state::AppState, store::TransactionReferenceStore},
    logger,
};

/// Sets up logging and serves the notification endpoints until Ctrl-C.
pub async fn start(
    config: Config,
    transaction_references: Arc<dyn TransactionReferenceStore>,
) -> Result<(), ConfigurationError> {
    logger::setup(&config.log)?;
    server_builder(config, transaction_references).await
}

pub async fn server_builder(
    config: Config,
    transaction_references: Arc<dyn TransactionReferenceStore>,
) -> Result<(), ConfigurationError> {
    let listener = config.server.tcp_listener().await?;

    logger::info!(
        environment = %config.common.environment,
        "starting notification server"
    );

    let state = AppState::new(Arc::new(config), transaction_references);
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => logger::info!("Shutdown signal received"),
        Err(error) => {
            logger::warn!(%error, "Failed to listen for the shutdown signal");
            std::future::pending::<()>().await
        }
    }
}
