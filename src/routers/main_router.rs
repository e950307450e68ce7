use std::sync::Arc;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{any, get},
};
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer, cors::CorsLayer,
    services::ServeDir,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    docs::ApiDoc,
    errors::panic::panic_response,
    handlers::{
        server::{fallback::fallback_handler, healthcheck::healthcheck},
        subscribe::subscribe_handler,
    },
    init::state::ServerState,
};

use super::middleware::logging::log_middleware;

pub fn build_router(state: Arc<ServerState>) -> axum::Router {
    let log_middleware = from_fn_with_state(state.clone(), log_middleware);
    let compression_middleware = CompressionLayer::new().gzip(true);
    let cors_layer = CorsLayer::very_permissive();
    let catch_panic_layer = CatchPanicLayer::custom(panic_response);

    // the method check lives in the handler so that every verb gets the JSON 405 body
    let router = Router::new()
        .route("/subscribe", any(subscribe_handler))
        .route("/api/subscribe", any(subscribe_handler))
        .route("/.netlify/functions/subscribe", any(subscribe_handler))
        .route("/api/healthcheck/server", get(healthcheck))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()));

    // A built landing page can be served from the same origin as the form endpoint.
    let router = match state.get_static_assets_dir() {
        Some(dir) => router.fallback_service(ServeDir::new(dir).append_index_html_on_directories(true)),
        None => router.fallback(fallback_handler),
    };

    router
        .layer(catch_panic_layer)
        .layer(compression_middleware)
        .layer(log_middleware)
        .layer(cors_layer)
        .with_state(state)
}
