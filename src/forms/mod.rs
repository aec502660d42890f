//! Form controllers.
//!
//! A [`FormController`] owns one form's in-memory record and its submission
//! status. Field edits replace a single field by name; [`FormController::submit`]
//! runs the form's pre-submit check and posts the record as JSON.
//!
//! Status changes are published on a `watch` channel, so a view can follow
//! the loading flag while a submission is awaited.

pub mod transport;

pub use transport::{HttpTransport, SubmitTransport};

use serde::Serialize;
use tokio::sync::watch;

use crate::{
    error::{Result, ValidationErrors},
    models::forms::{DoctorSignupForm, SelectOption},
    schema::Schema,
};

/// A record a form controller can edit and submit.
pub trait FormRecord: Serialize + Default + Send + Sync {
    /// API path the record is posted to.
    const ENDPOINT: &'static str;
    /// Status message after a 2xx response.
    const SUCCESS_MESSAGE: &'static str;
    /// Status message after a non-2xx response, and prefix for transport errors.
    const FAILURE_MESSAGE: &'static str;

    /// Checks applied before anything is sent.
    fn schema() -> Schema;

    /// Replaces the named text field, leaving the others untouched.
    fn set_field(&mut self, name: &str, value: String) -> Result<()>;
}

/// User-visible submission state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormStatus {
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Result of one submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The pre-submit check failed; nothing was sent.
    Blocked(ValidationErrors),
    /// The API answered with a 2xx status.
    Accepted(u16),
    /// The API answered with any other status.
    Rejected(u16),
    /// The request never completed. Holds the user-facing message.
    Failed(String),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}

pub struct FormController<F, T = HttpTransport> {
    record: F,
    status: watch::Sender<FormStatus>,
    transport: T,
}

impl<F, T> FormController<F, T>
where
    F: FormRecord,
    T: SubmitTransport,
{
    /// Creates a controller with an empty record.
    pub fn new(transport: T) -> Self {
        Self::with_record(F::default(), transport)
    }

    pub fn with_record(record: F, transport: T) -> Self {
        Self {
            record,
            status: watch::Sender::new(FormStatus::default()),
            transport,
        }
    }

    pub fn record(&self) -> &F {
        &self.record
    }

    /// Snapshot of the current status.
    pub fn status(&self) -> FormStatus {
        self.status.borrow().clone()
    }

    /// Receiver that sees every status change, including the in-flight
    /// `loading: true` state.
    pub fn subscribe(&self) -> watch::Receiver<FormStatus> {
        self.status.subscribe()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Applies a text input change.
    pub fn update(&mut self, field: &str, value: impl Into<String>) -> Result<()> {
        self.record.set_field(field, value.into())
    }

    /// Submits the current record once.
    ///
    /// The loading flag is set only while the request is in flight. It is
    /// cleared in the same update that publishes the outcome message.
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.status.send_modify(|status| {
            status.error = None;
            status.success = None;
        });

        let payload = match serde_json::to_value(&self.record) {
            Ok(payload) => payload,
            Err(e) => {
                let message = format!("{}: {}", F::FAILURE_MESSAGE, e);
                self.status.send_modify(|status| status.error = Some(message.clone()));
                return SubmitOutcome::Failed(message);
            }
        };

        if let Err(errors) = F::schema().validate(&payload) {
            tracing::debug!(endpoint = F::ENDPOINT, %errors, "Submission blocked");
            self.status.send_modify(|status| status.error = Some(errors.to_string()));
            return SubmitOutcome::Blocked(errors);
        }

        self.status.send_modify(|status| status.loading = true);
        tracing::info!(endpoint = F::ENDPOINT, "Submitting form");

        let (outcome, error, success) = match self.transport.post_json(F::ENDPOINT, &payload).await {
            Ok(status) if (200..300).contains(&status) => {
                tracing::info!(endpoint = F::ENDPOINT, status, "Form accepted");
                (
                    SubmitOutcome::Accepted(status),
                    None,
                    Some(F::SUCCESS_MESSAGE.to_string()),
                )
            }
            Ok(status) => {
                tracing::warn!(endpoint = F::ENDPOINT, status, "Form rejected");
                (
                    SubmitOutcome::Rejected(status),
                    Some(F::FAILURE_MESSAGE.to_string()),
                    None,
                )
            }
            Err(e) => {
                tracing::error!(endpoint = F::ENDPOINT, error = %e, "Form submission failed");
                let message = format!("{}: {}", F::FAILURE_MESSAGE, e);
                (SubmitOutcome::Failed(message.clone()), Some(message), None)
            }
        };

        self.status.send_replace(FormStatus {
            loading: false,
            error,
            success,
        });
        outcome
    }
}

impl<T: SubmitTransport> FormController<DoctorSignupForm, T> {
    pub fn selected_specialties(&self) -> Vec<&'static SelectOption> {
        self.record.selected_specialties()
    }

    /// Multi-select change: the new selection replaces the old one wholesale.
    pub fn set_specialties<'a, I>(&mut self, selection: I)
    where
        I: IntoIterator<Item = &'a SelectOption>,
    {
        self.record.set_specialties(selection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::forms::{PatientSignupForm, specialization};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::sync::Mutex;
    use tokio::sync::oneshot;

    /// Replies with a canned status (or error) and records what it was sent.
    struct FakeTransport {
        reply: std::result::Result<u16, String>,
        sent: Mutex<Vec<(String, Value)>>,
    }

    impl FakeTransport {
        fn status(status: u16) -> Self {
            Self {
                reply: Ok(status),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<(String, Value)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SubmitTransport for FakeTransport {
        async fn post_json(&self, path: &str, body: &Value) -> Result<u16> {
            self.sent.lock().unwrap().push((path.to_string(), body.clone()));
            self.reply.clone().map_err(Error::Internal)
        }
    }

    /// Holds the request open until the test releases it.
    struct GatedTransport {
        release: Mutex<Option<oneshot::Receiver<()>>>,
    }

    #[async_trait]
    impl SubmitTransport for GatedTransport {
        async fn post_json(&self, _path: &str, _body: &Value) -> Result<u16> {
            let release = self.release.lock().unwrap().take();
            if let Some(release) = release {
                let _ = release.await;
            }
            Ok(200)
        }
    }

    fn filled_controller<T: SubmitTransport>(transport: T) -> FormController<DoctorSignupForm, T> {
        let mut controller = FormController::new(transport);
        for (field, value) in [
            ("name", "Dr. Quinn"),
            ("email", "quinn@frontier.org"),
            ("phone", "7000000000"),
            ("experience", "10"),
            ("clinicAddress", "Colorado Springs"),
            ("consultationFee", "50"),
            ("availability", "Mon-Sat"),
            ("qualifications", "MD"),
            ("bio", "Medicine woman"),
            ("password", "secret1"),
        ] {
            controller.update(field, value).unwrap();
        }
        controller
    }

    #[tokio::test]
    async fn test_submit_success() {
        let mut controller = filled_controller(FakeTransport::status(201));

        let outcome = controller.submit().await;

        assert_eq!(outcome, SubmitOutcome::Accepted(201));
        assert_eq!(
            controller.status(),
            FormStatus {
                loading: false,
                error: None,
                success: Some("Doctor signed up successfully".to_string()),
            }
        );

        let sent = controller.transport().sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "/api/doctor/sign-up");
        assert_eq!(sent[0].1["clinicAddress"], "Colorado Springs");
    }

    #[tokio::test]
    async fn test_submit_rejected() {
        let mut controller = filled_controller(FakeTransport::status(500));

        let outcome = controller.submit().await;

        assert_eq!(outcome, SubmitOutcome::Rejected(500));
        assert!(!controller.status().loading);
        assert_eq!(controller.status().error.as_deref(), Some("Failed to sign up"));
        assert_eq!(controller.status().success, None);
    }

    #[tokio::test]
    async fn test_submit_transport_failure_includes_error() {
        let mut controller = filled_controller(FakeTransport::failing("connection refused"));

        let outcome = controller.submit().await;

        let expected = "Failed to sign up: Internal error: connection refused";
        assert_eq!(outcome, SubmitOutcome::Failed(expected.to_string()));
        assert!(!controller.status().loading);
        assert_eq!(controller.status().error.as_deref(), Some(expected));
    }

    #[tokio::test]
    async fn test_loading_visible_while_request_in_flight() {
        let (release_tx, release_rx) = oneshot::channel();
        let mut controller = filled_controller(GatedTransport {
            release: Mutex::new(Some(release_rx)),
        });
        let mut watcher = controller.subscribe();

        let observe = async move {
            let in_flight = (*watcher.wait_for(|status| status.loading).await.unwrap()).clone();
            release_tx.send(()).unwrap();
            in_flight
        };
        let (outcome, in_flight) = tokio::join!(controller.submit(), observe);

        assert_eq!(
            in_flight,
            FormStatus {
                loading: true,
                error: None,
                success: None,
            }
        );
        assert!(outcome.is_accepted());
        assert!(!controller.status().loading);
        assert!(controller.status().success.is_some());
    }

    #[tokio::test]
    async fn test_blocked_submission_never_sets_loading() {
        let mut controller = filled_controller(FakeTransport::status(200));
        controller.update("email", "").unwrap();
        let watcher = controller.subscribe();

        assert!(matches!(controller.submit().await, SubmitOutcome::Blocked(_)));
        assert!(watcher.has_changed().unwrap());
        assert!(!watcher.borrow().loading);
        assert!(watcher.borrow().error.is_some());
    }

    #[tokio::test]
    async fn test_each_required_field_blocks_submission() {
        for field in [
            "name",
            "email",
            "phone",
            "experience",
            "clinicAddress",
            "consultationFee",
            "availability",
            "qualifications",
            "bio",
            "password",
        ] {
            let mut controller = filled_controller(FakeTransport::status(200));
            controller.update(field, "").unwrap();

            let outcome = controller.submit().await;

            let SubmitOutcome::Blocked(errors) = outcome else {
                panic!("empty {} should block submission", field);
            };
            assert!(errors.has_field(field));
            assert!(controller.transport().sent().is_empty());
            assert!(!controller.status().loading);
            assert!(controller.status().error.is_some());
        }
    }

    #[tokio::test]
    async fn test_speciality_is_not_required() {
        let mut controller = filled_controller(FakeTransport::status(200));
        assert!(controller.record().speciality.is_empty());
        assert!(controller.submit().await.is_accepted());
    }

    #[tokio::test]
    async fn test_resubmit_clears_previous_messages() {
        let mut controller = filled_controller(FakeTransport::status(400));
        controller.submit().await;
        assert!(controller.status().error.is_some());

        controller.transport = FakeTransport::status(200);
        controller.submit().await;
        assert_eq!(controller.status().error, None);
        assert!(controller.status().success.is_some());
    }

    #[tokio::test]
    async fn test_specialties_submitted_as_list() {
        let mut controller = filled_controller(FakeTransport::status(200));
        let cardiology = specialization("Cardiology").unwrap();
        let surgery = specialization("Surgery").unwrap();

        controller.set_specialties([cardiology, surgery]);
        controller.set_specialties([surgery]);
        assert_eq!(controller.selected_specialties(), vec![surgery]);

        controller.submit().await;
        let sent = controller.transport().sent();
        assert_eq!(sent[0].1["speciality"], serde_json::json!(["Surgery"]));
    }

    #[tokio::test]
    async fn test_patient_form_uses_its_endpoint() {
        let mut controller: FormController<PatientSignupForm, _> =
            FormController::new(FakeTransport::status(200));
        controller.update("name", "Pat Smith").unwrap();
        controller.update("email", "pat@example.com").unwrap();
        controller.update("phone", "7000000000").unwrap();
        controller.update("address", "1 Main St").unwrap();
        controller.update("password", "secret1").unwrap();

        assert!(controller.submit().await.is_accepted());
        assert_eq!(controller.transport().sent()[0].0, "/api/patient/sign-up");
        assert_eq!(
            controller.status().success.as_deref(),
            Some("Patient signed up successfully")
        );
    }

    #[test]
    fn test_update_unknown_field_leaves_record() {
        let mut controller: FormController<DoctorSignupForm, _> =
            FormController::new(FakeTransport::status(200));
        assert!(controller.update("nickname", "Doc").is_err());
        assert_eq!(controller.record(), &DoctorSignupForm::default());
    }
}
