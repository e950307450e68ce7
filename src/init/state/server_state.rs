use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::subscriber::api_key::ApiKey;
use crate::domain::subscriber::subscriber_api::SubscriberApi;

use super::builder::ServerStateBuilder;
use super::deployment_environment::DeploymentEnvironment;

/// Everything a request needs, resolved once at startup. Handlers never read
/// the process environment.
pub struct ServerState {
    pub(crate) app_name_version: String,
    pub(crate) server_start_time: tokio::time::Instant,
    pub(crate) responses_handled: AtomicU64,
    pub(crate) deployment_environment: DeploymentEnvironment,
    pub(crate) subscriber_api: Arc<dyn SubscriberApi>,
    pub(crate) subscriber_api_key: Option<ApiKey>, // read-only
    pub(crate) signup_source_tag: String,
    pub(crate) static_assets_dir: Option<PathBuf>,
}

impl ServerState {
    pub fn builder() -> ServerStateBuilder {
        ServerStateBuilder::default()
    }

    pub fn get_app_name_version(&self) -> String {
        self.app_name_version.clone()
    }

    pub fn get_uptime(&self) -> tokio::time::Duration {
        self.server_start_time.elapsed()
    }

    pub fn get_responses_handled(&self) -> u64 {
        self.responses_handled.load(Ordering::SeqCst)
    }

    pub fn add_responses_handled(&self) {
        self.responses_handled.fetch_add(1, Ordering::SeqCst);
    }

    pub fn get_deployment_environment(&self) -> DeploymentEnvironment {
        self.deployment_environment
    }

    pub fn get_subscriber_api(&self) -> &dyn SubscriberApi {
        self.subscriber_api.as_ref()
    }

    pub fn get_subscriber_api_key(&self) -> Option<&ApiKey> {
        self.subscriber_api_key.as_ref()
    }

    pub fn get_signup_source_tag(&self) -> &str {
        &self.signup_source_tag
    }

    pub fn get_static_assets_dir(&self) -> Option<&Path> {
        self.static_assets_dir.as_deref()
    }
}
