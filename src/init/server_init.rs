use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::subscriber::kit_client::KitClient;
use crate::routers::main_router::build_router;

use super::{config::ServerConfig, state::ServerState};

pub async fn server_init_proc(
    start: tokio::time::Instant,
    config: ServerConfig,
) -> anyhow::Result<()> {
    let kit_client = KitClient::new(&config.subscriber_api.base_url)?;

    if config.subscriber_api.api_key.is_none() {
        warn!("KIT_API_KEY is not set; signups will fail with a configuration error");
    }

    let state = Arc::new(
        ServerState::builder()
            .app_name_version(crate::APP_NAME_VERSION.to_owned())
            .server_start_time(start)
            .deployment_environment(config.deployment_environment)
            .subscriber_api(Arc::new(kit_client))
            .subscriber_api_key(config.subscriber_api.api_key)
            .signup_source_tag(config.subscriber_api.source_tag)
            .static_assets_dir(config.static_assets_dir)
            .build()?,
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;

    info!(
        addr = %config.bind_addr,
        environment = state.get_deployment_environment().as_str(),
        subscriber_api = %config.subscriber_api.base_url,
        elapsed = ?start.elapsed(),
        "Backend server starting..."
    );

    axum::serve(
        listener,
        build_router(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Backend server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
