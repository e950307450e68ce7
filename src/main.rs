use gradecoach_waitlist::init::{
    config::ServerConfig, server_init::server_init_proc, tracing_init::init_tracing,
};
use tracing::{info, warn};

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

// main function
#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let start = tokio::time::Instant::now();

    // AWS deployments inject the environment directly
    let dotenv_result = if std::env::var("IS_AWS").is_err() {
        Some(dotenvy::dotenv())
    } else {
        None
    };

    let config = ServerConfig::from_env()?;

    let (writer, _log_guard) = tracing_appender::non_blocking(std::io::stdout());
    init_tracing(config.deployment_environment, writer);

    match dotenv_result {
        Some(Ok(path)) => info!(path = %path.display(), "Loaded .env file"),
        Some(Err(e)) => warn!(error = %e, "No .env file loaded"),
        None => (),
    }

    info!("Initializing server...");
    server_init_proc(start, config).await?;

    Ok(())
}
