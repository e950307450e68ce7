use async_trait::async_trait;

use super::api_key::ApiKey;
use super::kit_types::{NewSubscriber, UpstreamOutcome};

/// The third-party subscriber store. One call per signup, no retries.
#[async_trait]
pub trait SubscriberApi: Send + Sync {
    /// `Err` means the call could not be completed or its answer could not be
    /// decoded; an explicit refusal is `Ok(UpstreamOutcome::Rejected { .. })`.
    async fn create_subscriber(
        &self,
        api_key: &ApiKey,
        subscriber: &NewSubscriber,
    ) -> anyhow::Result<UpstreamOutcome>;
}
