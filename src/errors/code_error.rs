use axum::Json;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use serde_derive::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use tracing::Level;
use utoipa::ToSchema;

pub type HandlerResponse<T> = Result<T, CodeErrorResp>;

pub const ERROR_LOG_LEVEL_HEADER: &str = "x-error-log-level";
pub const ERROR_STATUS_CODE_HEADER: &str = "x-error-status-code";
pub const ERROR_CODE_HEADER: &str = "x-error-code";
pub const ERROR_MESSAGE_HEADER: &str = "x-error-message";
pub const ERROR_DETAIL_HEADER: &str = "x-error-detail";

pub struct CodeError {
    pub error_code: u16,
    pub http_status_code: StatusCode,
    pub message: &'static str,
    pub log_level: Level,
}

impl CodeError {
    pub const METHOD_NOT_ALLOWED: CodeError = CodeError {
        error_code: 0,
        http_status_code: StatusCode::METHOD_NOT_ALLOWED,
        message: "Method not allowed",
        log_level: Level::INFO,
    };
    pub const MISSING_REQUIRED_FIELDS: CodeError = CodeError {
        error_code: 1,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Missing required fields",
        log_level: Level::INFO,
    };
    pub const API_KEY_NOT_CONFIGURED: CodeError = CodeError {
        error_code: 2,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "API key not configured",
        log_level: Level::ERROR,
    };
    // message is replaced with the upstream reason at the call site
    pub const SUBSCRIBE_REJECTED: CodeError = CodeError {
        error_code: 3,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Failed to subscribe",
        log_level: Level::WARN,
    };
    pub const INTERNAL_SERVER_ERROR: CodeError = CodeError {
        error_code: 4,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Internal server error",
        log_level: Level::ERROR,
    };
    pub const NOT_FOUND: CodeError = CodeError {
        error_code: 5,
        http_status_code: StatusCode::NOT_FOUND,
        message: "Not found",
        log_level: Level::INFO,
    };
}

/// Attaches an internal cause to a `CodeError`. The cause is logged by the
/// request logging middleware and never serialized into the response body.
pub fn code_err(cerr: CodeError, e: impl fmt::Display) -> CodeErrorResp {
    CodeErrorResp {
        detail: Some(e.to_string()),
        ..CodeErrorResp::from(cerr)
    }
}

/// The only error shape the API ever returns.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub struct CodeErrorResp {
    pub error_code: u16,
    pub http_status_code: StatusCode,
    pub message: String,
    pub detail: Option<String>,
    pub log_level: Level,
}

impl CodeErrorResp {
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl From<CodeError> for CodeErrorResp {
    fn from(cerr: CodeError) -> Self {
        CodeErrorResp {
            error_code: cerr.error_code,
            http_status_code: cerr.http_status_code,
            message: cerr.message.to_owned(),
            detail: None,
            log_level: cerr.log_level,
        }
    }
}

impl fmt::Display for CodeErrorResp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {}", self.message, detail),
            None => write!(f, "{}", self.message),
        }
    }
}

impl Error for CodeErrorResp {}

impl IntoResponse for CodeErrorResp {
    fn into_response(self) -> axum::response::Response {
        let mut headers = HeaderMap::new();
        insert_header(&mut headers, ERROR_LOG_LEVEL_HEADER, self.log_level.as_str());
        insert_header(
            &mut headers,
            ERROR_STATUS_CODE_HEADER,
            self.http_status_code.as_str(),
        );
        insert_header(&mut headers, ERROR_CODE_HEADER, &self.error_code.to_string());
        insert_header(&mut headers, ERROR_MESSAGE_HEADER, &self.message);
        if let Some(detail) = &self.detail {
            insert_header(&mut headers, ERROR_DETAIL_HEADER, detail);
        }

        (
            self.http_status_code,
            headers,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

// header values cannot carry line breaks or non-visible ascii
fn insert_header(headers: &mut HeaderMap, name: &'static str, value: &str) {
    let sanitized: String = value
        .chars()
        .map(|c| if c.is_ascii_graphic() || c == ' ' { c } else { ' ' })
        .collect();
    if let Ok(value) = HeaderValue::from_str(&sanitized) {
        headers.insert(name, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn body_only_carries_the_public_message() {
        let resp = code_err(CodeError::INTERNAL_SERVER_ERROR, "connection refused\nat line 2")
            .into_response();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            resp.headers().get(ERROR_DETAIL_HEADER).unwrap(),
            "connection refused at line 2"
        );
        assert_eq!(resp.headers().get(ERROR_LOG_LEVEL_HEADER).unwrap(), "ERROR");

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            ErrorBody {
                error: "Internal server error".to_owned()
            }
        );
    }

    #[test]
    fn with_message_overrides_the_constant_text() {
        let resp = CodeErrorResp::from(CodeError::SUBSCRIBE_REJECTED)
            .with_message("Failed to subscribe: Already subscribed");
        assert_eq!(resp.http_status_code, StatusCode::BAD_REQUEST);
        assert_eq!(resp.to_string(), "Failed to subscribe: Already subscribed");
    }
}
