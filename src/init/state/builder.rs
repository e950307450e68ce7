use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use crate::domain::subscriber::api_key::ApiKey;
use crate::domain::subscriber::kit_types::DEFAULT_SIGNUP_SOURCE_TAG;
use crate::domain::subscriber::subscriber_api::SubscriberApi;

use super::deployment_environment::DeploymentEnvironment;
use super::server_state::ServerState;

#[derive(Default)]
pub struct ServerStateBuilder {
    app_name_version: Option<String>,
    server_start_time: Option<tokio::time::Instant>,
    deployment_environment: Option<DeploymentEnvironment>,
    subscriber_api: Option<Arc<dyn SubscriberApi>>,
    subscriber_api_key: Option<ApiKey>,
    signup_source_tag: Option<String>,
    static_assets_dir: Option<PathBuf>,
}

impl ServerStateBuilder {
    pub fn app_name_version(mut self, app_name_version: String) -> Self {
        self.app_name_version = Some(app_name_version);
        self
    }

    pub fn server_start_time(mut self, server_start_time: tokio::time::Instant) -> Self {
        self.server_start_time = Some(server_start_time);
        self
    }

    pub fn deployment_environment(mut self, deployment_environment: DeploymentEnvironment) -> Self {
        self.deployment_environment = Some(deployment_environment);
        self
    }

    pub fn subscriber_api(mut self, subscriber_api: Arc<dyn SubscriberApi>) -> Self {
        self.subscriber_api = Some(subscriber_api);
        self
    }

    /// `None` is allowed: the server still starts and answers signups with a
    /// configuration error until a key is provided.
    pub fn subscriber_api_key(mut self, subscriber_api_key: Option<ApiKey>) -> Self {
        self.subscriber_api_key = subscriber_api_key;
        self
    }

    pub fn signup_source_tag(mut self, signup_source_tag: String) -> Self {
        self.signup_source_tag = Some(signup_source_tag);
        self
    }

    pub fn static_assets_dir(mut self, static_assets_dir: Option<PathBuf>) -> Self {
        self.static_assets_dir = static_assets_dir;
        self
    }

    pub fn build(self) -> anyhow::Result<ServerState> {
        Ok(ServerState {
            app_name_version: self
                .app_name_version
                .ok_or_else(|| anyhow::anyhow!("app_name_version is required"))?,
            server_start_time: self
                .server_start_time
                .ok_or_else(|| anyhow::anyhow!("server_start_time is required"))?,
            responses_handled: AtomicU64::new(0u64),
            deployment_environment: self
                .deployment_environment
                .unwrap_or(DeploymentEnvironment::Prod),
            subscriber_api: self
                .subscriber_api
                .ok_or_else(|| anyhow::anyhow!("subscriber_api is required"))?,
            subscriber_api_key: self.subscriber_api_key,
            signup_source_tag: self
                .signup_source_tag
                .unwrap_or_else(|| DEFAULT_SIGNUP_SOURCE_TAG.to_owned()),
            static_assets_dir: self.static_assets_dir,
        })
    }
}
