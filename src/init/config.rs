use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::anyhow;

use crate::domain::subscriber::api_key::ApiKey;
use crate::domain::subscriber::kit_client::KIT_API_BASE_URL;
use crate::domain::subscriber::kit_types::DEFAULT_SIGNUP_SOURCE_TAG;

use super::state::DeploymentEnvironment;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

// the name the original landing-page deployment used
const LEGACY_API_KEY_VAR: &str = "VITE_CONVERTKIT_API_KEY";

pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub deployment_environment: DeploymentEnvironment,
    pub subscriber_api: SubscriberApiConfig,
    pub static_assets_dir: Option<PathBuf>,
}

pub struct SubscriberApiConfig {
    pub base_url: String,
    /// Missing is not a startup error; signups answer 500 until it is set.
    pub api_key: Option<ApiKey>,
    pub source_tag: String,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host: IpAddr = lookup("HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_owned())
            .parse()
            .map_err(|e| anyhow!("Environment variable HOST is not an IP address: {e}"))?;

        let port: u16 = match lookup("PORT") {
            Some(port) => port
                .parse()
                .map_err(|e| anyhow!("Environment variable PORT is not a port number: {e}"))?,
            None => DEFAULT_PORT,
        };

        let api_key = lookup("KIT_API_KEY")
            .and_then(ApiKey::new)
            .or_else(|| lookup(LEGACY_API_KEY_VAR).and_then(ApiKey::new));

        let base_url = lookup("KIT_API_BASE_URL")
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| KIT_API_BASE_URL.to_owned());

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(anyhow!(
                "Environment variable KIT_API_BASE_URL must be an http(s) URL"
            ));
        }

        let source_tag = lookup("SIGNUP_SOURCE_TAG")
            .filter(|tag| !tag.is_empty())
            .unwrap_or_else(|| DEFAULT_SIGNUP_SOURCE_TAG.to_owned());

        Ok(ServerConfig {
            bind_addr: SocketAddr::new(host, port),
            deployment_environment: DeploymentEnvironment::from_env_value(
                lookup("CURR_ENV").as_deref(),
            ),
            subscriber_api: SubscriberApiConfig {
                base_url,
                api_key,
                source_tag,
            },
            static_assets_dir: lookup("STATIC_ASSETS_DIR")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
        })
    }
}
