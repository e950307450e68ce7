use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::subscriber::api_key::ApiKey;
use crate::domain::subscriber::kit_types::{
    KitErrorBody, NewSubscriber, SubscriberCreated, UpstreamOutcome,
};
use crate::domain::subscriber::subscriber_api::SubscriberApi;
use crate::init::state::ServerState;

pub(crate) const TEST_API_KEY: &str = "test-kit-key";

pub(crate) enum FakeBehavior {
    Accept,
    /// Answers with this status and raw error body.
    Reject { status: u16, raw: String },
    Fail(&'static str),
    Panic,
}

/// Stand-in for the subscriber API that records every call it receives.
pub(crate) struct FakeSubscriberApi {
    behavior: FakeBehavior,
    calls: Mutex<Vec<(String, NewSubscriber)>>,
}

impl FakeSubscriberApi {
    pub(crate) fn new(behavior: FakeBehavior) -> Self {
        FakeSubscriberApi {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn accepting() -> Self {
        Self::new(FakeBehavior::Accept)
    }

    pub(crate) fn rejecting(errors: &[&str]) -> Self {
        Self::rejecting_with_body(&serde_json::json!({ "errors": errors }).to_string())
    }

    pub(crate) fn rejecting_with_body(raw: &str) -> Self {
        Self::new(FakeBehavior::Reject {
            status: 422,
            raw: raw.to_owned(),
        })
    }

    pub(crate) fn calls(&self) -> Vec<(String, NewSubscriber)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubscriberApi for FakeSubscriberApi {
    async fn create_subscriber(
        &self,
        api_key: &ApiKey,
        subscriber: &NewSubscriber,
    ) -> anyhow::Result<UpstreamOutcome> {
        self.calls
            .lock()
            .unwrap()
            .push((api_key.expose().to_owned(), subscriber.clone()));

        match &self.behavior {
            FakeBehavior::Accept => Ok(UpstreamOutcome::Accepted {
                created: SubscriberCreated::default(),
                raw: r#"{"subscriber":{"id":1}}"#.to_owned(),
            }),
            FakeBehavior::Reject { status, raw } => Ok(UpstreamOutcome::Rejected {
                status: *status,
                body: KitErrorBody::from_json(raw)?,
                raw: raw.clone(),
            }),
            FakeBehavior::Fail(reason) => Err(anyhow::anyhow!(*reason)),
            FakeBehavior::Panic => panic!("fake subscriber api exploded"),
        }
    }
}

pub(crate) fn test_state(api: Arc<FakeSubscriberApi>, api_key: Option<&str>) -> Arc<ServerState> {
    Arc::new(
        ServerState::builder()
            .app_name_version("gradecoach-waitlist/test".to_owned())
            .server_start_time(tokio::time::Instant::now())
            .subscriber_api(api)
            .subscriber_api_key(api_key.and_then(|k| ApiKey::new(k.to_owned())))
            .build()
            .unwrap(),
    )
}
