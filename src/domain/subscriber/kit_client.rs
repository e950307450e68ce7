use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use super::api_key::ApiKey;
use super::kit_types::{KitErrorBody, NewSubscriber, SubscriberCreated, UpstreamOutcome};
use super::subscriber_api::SubscriberApi;

pub const KIT_API_BASE_URL: &str = "https://api.convertkit.com";
pub const KIT_API_KEY_HEADER: &str = "X-Kit-Api-Key";
const SUBSCRIBERS_PATH: &str = "/v4/subscribers";

pub struct KitClient {
    client: reqwest::Client,
    base_url: String,
}

impl KitClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(crate::APP_NAME_VERSION)
            .build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        KitClient {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn subscribers_url(&self) -> String {
        format!("{}{SUBSCRIBERS_PATH}", self.base_url)
    }
}

#[async_trait]
impl SubscriberApi for KitClient {
    async fn create_subscriber(
        &self,
        api_key: &ApiKey,
        subscriber: &NewSubscriber,
    ) -> anyhow::Result<UpstreamOutcome> {
        let response = self
            .client
            .post(self.subscribers_url())
            .header(CONTENT_TYPE, "application/json")
            .header(KIT_API_KEY_HEADER, api_key.expose())
            .body(serde_json::to_vec(subscriber)?)
            .send()
            .await
            .context("Could not reach the subscriber API")?;

        let status = response.status();
        let raw = response
            .text()
            .await
            .context("Could not read the subscriber API response")?;

        if status.is_success() {
            let created: SubscriberCreated = serde_json::from_str(&raw)
                .with_context(|| format!("Undecodable subscriber API success body: {raw}"))?;
            Ok(UpstreamOutcome::Accepted { created, raw })
        } else {
            let body = KitErrorBody::from_json(&raw).with_context(|| {
                format!("Undecodable subscriber API error body (status {status}): {raw}")
            })?;
            Ok(UpstreamOutcome::Rejected {
                status: status.as_u16(),
                body,
                raw,
            })
        }
    }
}
