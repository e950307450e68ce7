//! Submits one waitlist signup through the same form logic as the landing
//! page. Handy for smoke testing a deployment.

use std::process::ExitCode;

use clap::Parser;
use gradecoach_waitlist::client::{
    form_controller::{FormController, Notification, SubmitOutcome},
    role::Role,
    transport::{DEFAULT_SUBSCRIBE_URL, HttpSubscribeTransport},
    validation::SignupForm,
};
use tracing_subscriber::EnvFilter;

/// Join the Grade.Coach waitlist.
#[derive(Parser)]
#[command(name = "join_waitlist", version)]
struct Cli {
    /// Subscribe endpoint of the waitlist server.
    #[arg(long, env = "WAITLIST_ENDPOINT", default_value = DEFAULT_SUBSCRIBE_URL)]
    endpoint: String,

    /// Email address to sign up.
    #[arg(long)]
    email: String,

    /// One of: teacher, administrator, principal, department-head, other.
    #[arg(long)]
    role: Role,

    /// School name.
    #[arg(long)]
    school: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let transport = HttpSubscribeTransport::new(cli.endpoint)?;
    let mut controller = FormController::new(transport);
    *controller.form_mut() = SignupForm {
        email: cli.email,
        role: cli.role.as_str().to_owned(),
        school: cli.school,
    };

    let outcome = controller.submit().await;

    if let SubmitOutcome::Invalid(errors) = &outcome {
        for error in errors.iter() {
            eprintln!("{}: {}", error.field.as_str(), error.message);
        }
    }

    for notification in controller.take_notifications() {
        match notification {
            Notification::Success(message) => println!("{message}"),
            Notification::Error(message) => eprintln!("{message}"),
        }
    }

    Ok(match outcome {
        SubmitOutcome::Subscribed => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}
