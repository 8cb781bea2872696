use std::future::Future;

use folio_models::{
    contact::{ContactFormField, ContactFormInput, ContactMessage, ContactValidateError},
    submission::{StatusMessage, SubmissionState},
};
use thiserror::Error;

/// The contact form of a single page view.
///
/// An instance owns the form fields, the submission state and the status
/// message shown to the user. Nothing is persisted.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFormService: Send + Sync + 'static {
    /// Returns the current fields, state and status message.
    fn snapshot(&self) -> ContactFormSnapshot;

    /// Replaces the value of one field.
    ///
    /// Editing a settled form (succeeded or failed) returns it to idle.
    fn edit(&self, field: ContactFormField, value: String);

    /// Validates the current fields without changing any state.
    fn validate(&self) -> Result<ContactMessage, ContactValidateError>;

    /// Validates the current fields and hands them to the mail relay.
    ///
    /// At most one submission is in flight at a time; overlapping calls are
    /// rejected without contacting the relay.
    fn submit(&self) -> impl Future<Output = Result<(), ContactSubmitError>> + Send;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFormSnapshot {
    pub input: ContactFormInput,
    pub state: SubmissionState,
    pub status: Option<StatusMessage>,
}

#[derive(Debug, Error)]
pub enum ContactSubmitError {
    #[error("Please correct your input.")]
    Invalid(#[from] ContactValidateError),
    #[error("A submission is already in progress.")]
    AlreadySubmitting,
    #[error("Failed to send message. Please try again.")]
    Relay,
}

#[cfg(feature = "mock")]
impl MockContactFormService {
    pub fn with_edit(mut self, field: ContactFormField, value: String) -> Self {
        self.expect_edit()
            .once()
            .with(
                mockall::predicate::eq(field),
                mockall::predicate::eq(value),
            )
            .return_const(());
        self
    }

    pub fn with_submit(mut self, result: Result<(), ContactSubmitError>) -> Self {
        self.expect_submit()
            .once()
            .return_once(|| Box::pin(std::future::ready(result)));
        self
    }

    pub fn with_snapshot(mut self, snapshot: ContactFormSnapshot) -> Self {
        self.expect_snapshot().once().return_const(snapshot);
        self
    }
}
