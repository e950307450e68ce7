//! OpenAPI documentation registration for Swagger UI.
//!
//! Utoipa only exposes operations listed in `#[openapi(paths(...))]`.
//! Handler functions still need their own `#[utoipa::path(...)]` attributes.

use utoipa::OpenApi;

use crate::domain::signup::SignupRequest;
use crate::dto::{
    requests::subscribe_request::SubscribeRequest,
    responses::subscribe_response::SubscribeResponse,
};
use crate::errors::code_error::ErrorBody;
use crate::handlers::{server::healthcheck, subscribe};

#[derive(OpenApi)]
#[openapi(
    paths(
        subscribe::subscribe_handler,
        healthcheck::healthcheck,
    ),
    components(schemas(
        SubscribeRequest,
        SubscribeResponse,
        SignupRequest,
        ErrorBody,
        healthcheck::ServerHealthcheckResponse,
    )),
    tags(
        (name = "waitlist", description = "Grade.Coach waitlist signups"),
        (name = "server", description = "Server health"),
    )
)]
pub struct ApiDoc;
