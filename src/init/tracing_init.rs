use tracing_appender::non_blocking::NonBlocking;
use tracing_subscriber::EnvFilter;

use super::state::DeploymentEnvironment;

/// Human-readable logs locally, JSON lines once deployed. `RUST_LOG`
/// overrides the default `info` filter.
pub fn init_tracing(deployment_environment: DeploymentEnvironment, writer: NonBlocking) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer);

    if deployment_environment.is_deployed() {
        builder.json().init();
    } else {
        builder.init();
    }
}
