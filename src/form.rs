//! Contact Form - Submission State Machine
//!
//! All state changes go through `ContactForm::update`. Delivery is the only
//! asynchronous step and is driven by `ContactSubmitter`, which feeds the
//! outcome back in as an event.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use crate::client::NetworkError;
use crate::validation::{ContactInput, Field, FieldErrors, Validator};

#[cfg(feature = "test-hooks")]
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "test-hooks")]
static VALIDATION_CALL_COUNT: AtomicU32 = AtomicU32::new(0);

#[cfg(feature = "test-hooks")]
pub fn get_validation_call_count() -> u32 {
    VALIDATION_CALL_COUNT.load(Ordering::SeqCst)
}

#[cfg(feature = "test-hooks")]
pub fn reset_validation_call_count() {
    VALIDATION_CALL_COUNT.store(0, Ordering::SeqCst);
}

pub const SUBMIT_LABEL: &str = "Send Message";
pub const SUBMITTING_LABEL: &str = "Sending...";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Idle => "idle",
            SubmissionStatus::Submitting => "submitting",
            SubmissionStatus::Success => "success",
            SubmissionStatus::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
}

impl SubmissionReceipt {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
        }
    }
}

impl Default for SubmissionReceipt {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    Edit { field: Field, value: String },
    Submit,
    Delivered(SubmissionReceipt),
    Failed(NetworkError),
}

/// What the caller must do after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Validation failed; status unchanged, errors populated.
    Rejected,
    /// Entered `submitting`; deliver this payload.
    Deliver(ContactInput),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactForm {
    input: ContactInput,
    errors: FieldErrors,
    status: SubmissionStatus,
    #[serde(default)]
    last_receipt: Option<SubmissionReceipt>,
    #[serde(default)]
    last_error: Option<NetworkError>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input(input: ContactInput) -> Self {
        Self {
            input,
            ..Self::default()
        }
    }

    pub fn input(&self) -> &ContactInput {
        &self.input
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn last_receipt(&self) -> Option<&SubmissionReceipt> {
        self.last_receipt.as_ref()
    }

    pub fn last_error(&self) -> Option<&NetworkError> {
        self.last_error.as_ref()
    }

    pub fn submit_enabled(&self) -> bool {
        self.status != SubmissionStatus::Submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submit_enabled() {
            SUBMIT_LABEL
        } else {
            SUBMITTING_LABEL
        }
    }

    pub fn update(&mut self, event: FormEvent) -> Effect {
        match event {
            FormEvent::Edit { field, value } => {
                // Fields are locked while a delivery is in flight.
                if self.status != SubmissionStatus::Submitting {
                    *self.input.value_mut(field) = value;
                }
                Effect::None
            }

            FormEvent::Submit => {
                if self.status == SubmissionStatus::Submitting {
                    return Effect::None;
                }

                #[cfg(feature = "test-hooks")]
                VALIDATION_CALL_COUNT.fetch_add(1, Ordering::SeqCst);

                self.errors = Validator::new().validate(&self.input);
                if !self.errors.is_empty() {
                    return Effect::Rejected;
                }

                self.status = SubmissionStatus::Submitting;
                self.last_error = None;
                Effect::Deliver(self.input.clone())
            }

            FormEvent::Delivered(receipt) => {
                if self.status == SubmissionStatus::Submitting {
                    info!(receipt = %receipt.id, "contact form delivered");
                    self.status = SubmissionStatus::Success;
                    self.input = ContactInput::default();
                    self.errors = FieldErrors::new();
                    self.last_receipt = Some(receipt);
                }
                Effect::None
            }

            FormEvent::Failed(error) => {
                if self.status == SubmissionStatus::Submitting {
                    warn!(%error, "contact form delivery failed");
                    self.status = SubmissionStatus::Error;
                    self.last_error = Some(error);
                }
                Effect::None
            }
        }
    }
}

/// Destination for contact form payloads.
#[async_trait]
pub trait Delivery: Send + Sync {
    async fn deliver(&self, payload: &ContactInput) -> Result<(), NetworkError>;
}

/// Stand-in destination: waits, then accepts.
pub struct SimulatedDelivery {
    pub delay: Duration,
}

impl Default for SimulatedDelivery {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(1000),
        }
    }
}

#[async_trait]
impl Delivery for SimulatedDelivery {
    async fn deliver(&self, _payload: &ContactInput) -> Result<(), NetworkError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// Drives one submission attempt with a bounded timeout.
pub struct ContactSubmitter<D: Delivery> {
    delivery: D,
    timeout: Duration,
}

impl<D: Delivery> ContactSubmitter<D> {
    pub fn new(delivery: D, timeout: Duration) -> Self {
        Self { delivery, timeout }
    }

    pub async fn submit(&self, form: &mut ContactForm) -> SubmissionStatus {
        let payload = match form.update(FormEvent::Submit) {
            Effect::Deliver(payload) => payload,
            Effect::Rejected | Effect::None => return form.status(),
        };

        let outcome = match tokio::time::timeout(self.timeout, self.delivery.deliver(&payload)).await {
            Ok(Ok(())) => FormEvent::Delivered(SubmissionReceipt::new()),
            Ok(Err(error)) => FormEvent::Failed(error),
            Err(_) => FormEvent::Failed(NetworkError::timeout(self.timeout)),
        };

        form.update(outcome);
        form.status()
    }
}
