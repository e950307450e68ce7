use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::domain::signup::SignupRequest;
use crate::dto::responses::subscribe_response::SubscribeResponse;
use crate::errors::code_error::ErrorBody;

pub const DEFAULT_SUBSCRIBE_URL: &str = "http://localhost:3000/subscribe";

/// Errors raised while delivering a signup to the waitlist endpoint.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The endpoint answered with a non-success status. `message` is the
    /// `error` field of the body when there was one.
    #[error("waitlist endpoint answered {}: {}", .status, .message.as_deref().unwrap_or("no message"))]
    Rejected { status: u16, message: Option<String> },

    /// Network or HTTP client error.
    #[error("waitlist network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The success body did not decode.
    #[error("waitlist response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Sends one signup. Implementations must not retry.
#[async_trait]
pub trait SubscribeTransport: Send + Sync {
    async fn subscribe(&self, request: &SignupRequest) -> Result<SubscribeResponse, TransportError>;
}

pub struct HttpSubscribeTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpSubscribeTransport {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .user_agent(crate::APP_NAME_VERSION)
            .build()?;
        Ok(HttpSubscribeTransport {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SubscribeTransport for HttpSubscribeTransport {
    async fn subscribe(&self, request: &SignupRequest) -> Result<SubscribeResponse, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(serde_json::to_vec(request)?)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .map(|body| body.error)
                .filter(|error| !error.is_empty());
            return Err(TransportError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }
}
