use tracing::{error, info};

use super::transport::{SubscribeTransport, TransportError};
use super::validation::{Field, FieldErrors, SignupForm, validate};
use crate::domain::signup::SignupRequest;
use crate::dto::responses::subscribe_response::SubscribeResponse;

pub const SUBSCRIBED_NOTIFICATION: &str = "Successfully joined the waitlist!";
pub const FALLBACK_ERROR_NOTIFICATION: &str = "Something went wrong. Please try again.";

/// Lifecycle of the waitlist form. `Submitted` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    Submitted,
}

/// Toast raised after a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form was not idle; nothing happened.
    Ignored,
    /// Validation failed; nothing was sent.
    Invalid(FieldErrors),
    Subscribed,
    Failed,
}

pub struct FormController<T> {
    transport: T,
    form: SignupForm,
    state: FormState,
    field_errors: FieldErrors,
    notifications: Vec<Notification>,
}

impl<T: SubscribeTransport> FormController<T> {
    pub fn new(transport: T) -> Self {
        FormController {
            transport,
            form: SignupForm::default(),
            state: FormState::Idle,
            field_errors: FieldErrors::default(),
            notifications: Vec::new(),
        }
    }

    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut SignupForm {
        &mut self.form
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    /// The submit button is disabled while a request is in flight and hidden
    /// once the signup went through.
    pub fn is_submit_enabled(&self) -> bool {
        self.state == FormState::Idle
    }

    /// Message to show under `field` from the last validation run.
    pub fn field_error(&self, field: Field) -> Option<&'static str> {
        self.field_errors.get(field)
    }

    /// Drains the notifications raised since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Validates the form and, if it is valid, sends it exactly once.
    pub async fn submit(&mut self) -> SubmitOutcome {
        let request = match self.begin_submit() {
            Ok(request) => request,
            Err(outcome) => return outcome,
        };
        let result = self.transport.subscribe(&request).await;
        self.finish_submit(result)
    }

    /// First half of [`submit`](Self::submit): validates and moves to
    /// `Submitting`, returning the request to send. Use together with
    /// [`finish_submit`](Self::finish_submit) when the form has to stay
    /// readable while the request is in flight.
    pub fn begin_submit(&mut self) -> Result<SignupRequest, SubmitOutcome> {
        if self.state != FormState::Idle {
            return Err(SubmitOutcome::Ignored);
        }

        let request = validate(&self.form).map_err(|errors| {
            self.field_errors = errors.clone();
            SubmitOutcome::Invalid(errors)
        })?;
        self.field_errors = FieldErrors::default();

        self.state = FormState::Submitting;
        Ok(request)
    }

    /// Applies the transport result of a submission started with
    /// [`begin_submit`](Self::begin_submit).
    pub fn finish_submit(
        &mut self,
        result: Result<SubscribeResponse, TransportError>,
    ) -> SubmitOutcome {
        if self.state != FormState::Submitting {
            return SubmitOutcome::Ignored;
        }

        match result {
            Ok(response) => {
                info!(message = %response.message, "Joined the waitlist");
                self.state = FormState::Submitted;
                self.form = SignupForm::default();
                self.notifications
                    .push(Notification::Success(SUBSCRIBED_NOTIFICATION.to_owned()));
                SubmitOutcome::Subscribed
            }
            Err(e) => {
                error!(error = %e, "Subscription error");
                self.state = FormState::Idle;
                self.notifications
                    .push(Notification::Error(error_notification(e)));
                SubmitOutcome::Failed
            }
        }
    }
}

fn error_notification(e: TransportError) -> String {
    match e {
        TransportError::Rejected {
            message: Some(message),
            ..
        } => message,
        _ => FALLBACK_ERROR_NOTIFICATION.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::client::validation::INVALID_EMAIL_MESSAGE;

    enum Reply {
        Ok,
        Rejected(Option<&'static str>),
        Garbled,
    }

    struct FakeTransport {
        reply: Reply,
        sent: Mutex<Vec<SignupRequest>>,
        // when set, replies are held back until notified
        gate: Option<Arc<Notify>>,
    }

    impl FakeTransport {
        fn new(reply: Reply) -> Self {
            FakeTransport {
                reply,
                sent: Mutex::new(Vec::new()),
                gate: None,
            }
        }
    }

    #[async_trait]
    impl SubscribeTransport for FakeTransport {
        async fn subscribe(
            &self,
            request: &SignupRequest,
        ) -> Result<SubscribeResponse, TransportError> {
            self.sent.lock().unwrap().push(request.clone());
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            match self.reply {
                Reply::Ok => Ok(SubscribeResponse::subscribed()),
                Reply::Rejected(message) => Err(TransportError::Rejected {
                    status: 400,
                    message: message.map(str::to_owned),
                }),
                Reply::Garbled => Err(TransportError::Decode(
                    serde_json::from_str::<serde_json::Value>("<html>").unwrap_err(),
                )),
            }
        }
    }

    fn filled(reply: Reply, email: &str) -> FormController<FakeTransport> {
        let mut controller = FormController::new(FakeTransport::new(reply));
        *controller.form_mut() = SignupForm {
            email: email.to_owned(),
            role: "teacher".to_owned(),
            school: "Lincoln High".to_owned(),
        };
        controller
    }

    #[tokio::test]
    async fn invalid_email_never_reaches_the_transport() {
        let mut controller = filled(Reply::Ok, "not-an-email");

        let outcome = controller.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert_eq!(controller.field_error(Field::Email), Some(INVALID_EMAIL_MESSAGE));
        assert_eq!(controller.state(), FormState::Idle);
        assert!(controller.is_submit_enabled());
        assert!(controller.take_notifications().is_empty());
        assert!(controller.transport.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn success_is_terminal_and_resets_the_form() {
        let mut controller = filled(Reply::Ok, "a@b.edu");

        assert_eq!(controller.submit().await, SubmitOutcome::Subscribed);
        assert_eq!(controller.state(), FormState::Submitted);
        assert!(!controller.is_submit_enabled());
        assert_eq!(controller.form(), &SignupForm::default());
        assert_eq!(
            controller.take_notifications(),
            vec![Notification::Success(SUBSCRIBED_NOTIFICATION.to_owned())]
        );

        // a second submit is ignored
        assert_eq!(controller.submit().await, SubmitOutcome::Ignored);
        assert_eq!(controller.transport.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn rejection_returns_to_idle_with_server_message() {
        let mut controller = filled(
            Reply::Rejected(Some("Failed to subscribe: Already subscribed")),
            "a@b.edu",
        );

        assert_eq!(controller.submit().await, SubmitOutcome::Failed);
        assert_eq!(controller.state(), FormState::Idle);
        assert!(controller.is_submit_enabled());
        assert_eq!(
            controller.take_notifications(),
            vec![Notification::Error(
                "Failed to subscribe: Already subscribed".to_owned()
            )]
        );
        // input is kept so the user can resubmit
        assert_eq!(controller.form().email, "a@b.edu");
    }

    #[tokio::test]
    async fn failures_without_a_message_use_the_fallback() {
        for reply in [Reply::Rejected(None), Reply::Garbled] {
            let mut controller = filled(reply, "a@b.edu");

            assert_eq!(controller.submit().await, SubmitOutcome::Failed);
            assert_eq!(
                controller.take_notifications(),
                vec![Notification::Error(FALLBACK_ERROR_NOTIFICATION.to_owned())]
            );
        }
    }

    #[tokio::test]
    async fn manual_resubmit_after_failure_sends_again() {
        let mut controller = filled(Reply::Rejected(None), "a@b.edu");

        controller.submit().await;
        controller.submit().await;

        assert_eq!(controller.transport.sent.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn fixing_the_form_clears_field_errors() {
        let mut controller = filled(Reply::Ok, "not-an-email");
        controller.submit().await;
        assert!(controller.field_error(Field::Email).is_some());

        controller.form_mut().email = "a@b.edu".to_owned();
        assert_eq!(controller.submit().await, SubmitOutcome::Subscribed);
        assert!(controller.field_error(Field::Email).is_none());
    }

    #[tokio::test]
    async fn control_is_disabled_while_the_request_is_in_flight() {
        let gate = Arc::new(Notify::new());
        let mut controller = filled(Reply::Ok, "a@b.edu");
        controller.transport.gate = Some(gate.clone());

        let request = controller.begin_submit().unwrap();
        let result = {
            let mut pending = controller.transport().subscribe(&request);

            let waited = tokio::time::timeout(Duration::from_millis(50), &mut pending).await;
            assert!(waited.is_err(), "transport should still be blocked");
            assert_eq!(controller.state(), FormState::Submitting);
            assert!(!controller.is_submit_enabled());

            gate.notify_one();
            pending.await
        };

        assert_eq!(controller.finish_submit(result), SubmitOutcome::Subscribed);
        assert_eq!(controller.state(), FormState::Submitted);
    }

    #[tokio::test]
    async fn second_submit_while_submitting_is_ignored() {
        let mut controller = filled(Reply::Ok, "a@b.edu");

        let request = controller.begin_submit().unwrap();
        assert_eq!(controller.begin_submit(), Err(SubmitOutcome::Ignored));
        assert_eq!(controller.submit().await, SubmitOutcome::Ignored);
        assert!(controller.transport.sent.lock().unwrap().is_empty());

        let result = controller.transport().subscribe(&request).await;
        assert_eq!(controller.finish_submit(result), SubmitOutcome::Subscribed);
        assert_eq!(controller.transport.sent.lock().unwrap().len(), 1);
    }

    #[test]
    fn finishing_without_a_submission_is_ignored() {
        let mut controller = filled(Reply::Ok, "a@b.edu");

        let outcome = controller.finish_submit(Ok(SubscribeResponse::subscribed()));

        assert_eq!(outcome, SubmitOutcome::Ignored);
        assert_eq!(controller.state(), FormState::Idle);
        assert!(controller.take_notifications().is_empty());
    }
}
