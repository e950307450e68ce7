use std::any::Any;

use axum::response::{IntoResponse, Response};

use super::code_error::{CodeError, code_err};

/// Turns a handler panic into the generic 500 body. The panic payload is only
/// forwarded to the request log.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_owned()
    } else {
        "unknown panic payload".to_owned()
    };

    code_err(CodeError::INTERNAL_SERVER_ERROR, format!("handler panicked: {detail}")).into_response()
}
