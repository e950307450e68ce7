use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderValue, Request, Response},
    middleware::Next,
};
use tokio::time::Instant;
use tracing::Level;

use crate::{
    APP_NAME_VERSION,
    errors::code_error::{
        ERROR_CODE_HEADER, ERROR_DETAIL_HEADER, ERROR_LOG_LEVEL_HEADER, ERROR_MESSAGE_HEADER,
        ERROR_STATUS_CODE_HEADER,
    },
    init::state::ServerState,
};

// by default, debug and below not logged at all
macro_rules! log_at_level {
    ($level:expr, $($fields:tt)+) => {
        match $level {
            Level::ERROR => tracing::error!($($fields)+),
            Level::WARN => tracing::warn!($($fields)+),
            Level::INFO => tracing::info!($($fields)+),
            Level::DEBUG => tracing::debug!($($fields)+),
            Level::TRACE => tracing::trace!($($fields)+),
        }
    };
}

pub async fn log_middleware(
    State(state): State<Arc<ServerState>>,
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let start = Instant::now();

    state.add_responses_handled();

    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let client_ip = client_ip(&request);

    tracing::info!(kind = %"RECV", method = %method, path = %path, client_ip = ?client_ip);

    let mut response = next.run(request).await;
    let duration = start.elapsed();
    let status = response.status();

    if status.is_success() {
        tracing::info!(kind = %"RESP", method = %method, path = %path, client_ip = ?client_ip, duration = ?duration);
    } else {
        let headers = response.headers_mut();

        let log_level = header_value_to_str(headers.get(ERROR_LOG_LEVEL_HEADER)).unwrap_or("INFO");
        let error_code = header_value_to_str(headers.get(ERROR_CODE_HEADER)).unwrap_or("");
        let message = header_value_to_str(headers.get(ERROR_MESSAGE_HEADER)).unwrap_or("");
        let detail = header_value_to_str(headers.get(ERROR_DETAIL_HEADER)).unwrap_or("");

        log_at_level!(
            log_level.parse::<Level>().unwrap_or(Level::ERROR),
            kind = %"ERSP",
            method = %method,
            path = %path,
            client_ip = ?client_ip,
            status_code = %status.as_u16(),
            duration = ?duration,
            error_code = %error_code,
            message = %message,
            detail = %detail
        );

        for name in [
            ERROR_LOG_LEVEL_HEADER,
            ERROR_STATUS_CODE_HEADER,
            ERROR_CODE_HEADER,
            ERROR_MESSAGE_HEADER,
            ERROR_DETAIL_HEADER,
        ] {
            headers.remove(name);
        }
    }

    response
        .headers_mut()
        .insert("x-server-name", HeaderValue::from_static(APP_NAME_VERSION));

    response
}

fn header_value_to_str(value: Option<&HeaderValue>) -> Option<&str> {
    value.and_then(|v| v.to_str().ok())
}

/// First hop of `x-forwarded-for` when present (the service runs behind a
/// proxy in every deployment), otherwise the socket peer.
fn client_ip(request: &Request<Body>) -> Option<IpAddr> {
    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim);

    match forwarded {
        Some(val) => match val.parse() {
            Ok(ip) => Some(ip),
            Err(e) => {
                tracing::error!(error = ?e, client_ip = val, "Could not parse IP address into IpAddr");
                None
            }
        },
        None => request
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip()),
    }
}
