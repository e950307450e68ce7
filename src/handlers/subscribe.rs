use std::sync::Arc;

use axum::{
    Json,
    extract::{Request, State},
    http::{Method, StatusCode},
    response::IntoResponse,
};
use tracing::{error, info};

use crate::{
    domain::subscriber::kit_types::{NewSubscriber, UpstreamOutcome},
    dto::{
        requests::subscribe_request::SubscribeRequest,
        responses::subscribe_response::SubscribeResponse,
    },
    errors::code_error::{CodeError, CodeErrorResp, ErrorBody, HandlerResponse, code_err},
    init::state::ServerState,
};

const MAX_SUBSCRIBE_BODY_SIZE: usize = 1024 * 16; // 16KB

#[utoipa::path(
    post,
    path = "/subscribe",
    tag = "waitlist",
    request_body = SubscribeRequest,
    responses(
        (status = 200, description = "Signup forwarded to the subscriber API", body = SubscribeResponse),
        (status = 400, description = "Missing fields or subscriber API refusal", body = ErrorBody),
        (status = 405, description = "Method other than POST", body = ErrorBody),
        (status = 500, description = "Missing API key or unexpected failure", body = ErrorBody)
    )
)]
pub async fn subscribe_handler(
    State(state): State<Arc<ServerState>>,
    request: Request,
) -> HandlerResponse<impl IntoResponse> {
    // checked before the body is touched
    if request.method() != Method::POST {
        return Err(CodeError::METHOD_NOT_ALLOWED.into());
    }

    let body = axum::body::to_bytes(request.into_body(), MAX_SUBSCRIBE_BODY_SIZE)
        .await
        .map_err(|e| code_err(CodeError::INTERNAL_SERVER_ERROR, e))?;

    let request = SubscribeRequest::from_body(&body)
        .map_err(|e| code_err(CodeError::INTERNAL_SERVER_ERROR, e))?;

    let signup = request
        .into_signup()
        .ok_or(CodeError::MISSING_REQUIRED_FIELDS)?;

    let api_key = state
        .get_subscriber_api_key()
        .ok_or(CodeError::API_KEY_NOT_CONFIGURED)?;

    let new_subscriber = NewSubscriber::from_signup(&signup, state.get_signup_source_tag());

    let outcome = state
        .get_subscriber_api()
        .create_subscriber(api_key, &new_subscriber)
        .await
        .map_err(|e| code_err(CodeError::INTERNAL_SERVER_ERROR, format!("{e:#}")))?;

    match outcome {
        UpstreamOutcome::Accepted { created, raw } => {
            info!(
                subscriber_id = ?created.subscriber_id(),
                payload = %raw,
                "Subscriber API accepted signup"
            );
            Ok((StatusCode::OK, Json(SubscribeResponse::subscribed())))
        }
        UpstreamOutcome::Rejected { status, body, raw } => {
            error!(upstream_status = status, payload = %raw, "Subscriber API rejected signup");
            let reason = body
                .first_error()
                .unwrap_or_else(|| "Unknown error".to_owned());
            Err(CodeErrorResp::from(CodeError::SUBSCRIBE_REJECTED)
                .with_message(format!("Failed to subscribe: {reason}")))
        }
    }
}
