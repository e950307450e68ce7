use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_derive::Serialize;
use utoipa::ToSchema;

use crate::init::state::ServerState;

#[derive(Serialize, ToSchema)]
pub struct ServerHealthcheckResponse {
    pub app_name_version: String,
    pub uptime_seconds: u64,
    pub responses_handled: u64,
    pub environment: &'static str,
    pub subscriber_api_configured: bool,
}

#[utoipa::path(
    get,
    path = "/api/healthcheck/server",
    tag = "server",
    responses(
        (status = 200, description = "Server is healthy", body = ServerHealthcheckResponse)
    )
)]
pub async fn healthcheck(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ServerHealthcheckResponse {
            app_name_version: state.get_app_name_version(),
            uptime_seconds: state.get_uptime().as_secs(),
            responses_handled: state.get_responses_handled(),
            environment: state.get_deployment_environment().as_str(),
            subscriber_api_configured: state.get_subscriber_api_key().is_some(),
        }),
    )
}
