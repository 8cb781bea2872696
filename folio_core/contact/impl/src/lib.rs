use std::{
    sync::{Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use anyhow::anyhow;
use folio_core_contact_contracts::{ContactFormService, ContactFormSnapshot, ContactSubmitError};
use folio_extern_contracts::relay::{
    MailRelayApiService, MailRelayRequest, MailRelayTemplateParams,
};
use folio_models::{
    contact::{ContactFormField, ContactMessage, ContactValidateError},
    submission::{StatusMessage, SubmissionState},
};
use tracing::{debug, error, info, warn};

pub struct ContactFormServiceImpl<MailRelayApi> {
    mail_relay_api: MailRelayApi,
    config: ContactFormServiceConfig,
    form: Mutex<ContactFormSnapshot>,
}

#[derive(Debug, Clone)]
pub struct ContactFormServiceConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub access_token: Option<String>,
    /// Upper bound for a single relay call. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl<MailRelayApi> ContactFormServiceImpl<MailRelayApi> {
    pub fn new(mail_relay_api: MailRelayApi, config: ContactFormServiceConfig) -> Self {
        Self {
            mail_relay_api,
            config,
            form: Mutex::default(),
        }
    }

    fn form(&self) -> MutexGuard<'_, ContactFormSnapshot> {
        // the guarded data stays consistent even if a holder panicked
        self.form.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_submit(&self) -> Result<ContactMessage, ContactSubmitError> {
        let mut form = self.form();

        if form.state == SubmissionState::Submitting {
            warn!("Rejected contact form submission while another one is in flight");
            return Err(ContactSubmitError::AlreadySubmitting);
        }

        form.state = SubmissionState::Idle;
        form.status = None;

        let message = form.input.validate().inspect_err(|err| {
            debug!("Contact form validation failed: {err}");
            form.status = Some(StatusMessage::invalid_input());
        })?;

        form.state = SubmissionState::Submitting;
        Ok(message)
    }

    fn make_request(&self, message: ContactMessage) -> MailRelayRequest {
        MailRelayRequest {
            service_id: self.config.service_id.clone(),
            template_id: self.config.template_id.clone(),
            public_key: self.config.public_key.clone(),
            access_token: self.config.access_token.clone(),
            params: MailRelayTemplateParams {
                name: message.name.into_inner(),
                email: message.email.into_inner(),
                message: message.message.into_inner(),
            },
        }
    }
}

impl<MailRelayApi> ContactFormService for ContactFormServiceImpl<MailRelayApi>
where
    MailRelayApi: MailRelayApiService,
{
    fn snapshot(&self) -> ContactFormSnapshot {
        self.form().clone()
    }

    fn edit(&self, field: ContactFormField, value: String) {
        let mut form = self.form();
        form.input.set(field, value);
        if form.state != SubmissionState::Submitting {
            form.state = SubmissionState::Idle;
            form.status = None;
        }
    }

    fn validate(&self) -> Result<ContactMessage, ContactValidateError> {
        self.form().input.validate()
    }

    async fn submit(&self) -> Result<(), ContactSubmitError> {
        let message = self.begin_submit()?;
        let in_flight = InFlightSubmission::new(&self.form);
        let request = self.make_request(message);

        let send = self.mail_relay_api.send(request);
        let result = match self.config.timeout {
            Some(timeout) => tokio::time::timeout(timeout, send)
                .await
                .unwrap_or_else(|_| Err(anyhow!("Mail relay did not respond within {timeout:?}"))),
            None => send.await,
        };

        in_flight.settle();
        let mut form = self.form();
        match result {
            Ok(()) => {
                info!("Contact message sent");
                form.state = SubmissionState::Succeeded;
                form.status = Some(StatusMessage::sent());
                form.input.clear();
                Ok(())
            }
            Err(err) => {
                error!("Failed to send contact message: {err:#}");
                form.state = SubmissionState::Failed;
                form.status = Some(StatusMessage::send_failed());
                Err(ContactSubmitError::Relay)
            }
        }
    }
}

/// Marks the form as failed if a submission is abandoned while the relay call
/// is still pending, e.g. because the caller dropped the `submit` future.
struct InFlightSubmission<'a> {
    form: &'a Mutex<ContactFormSnapshot>,
    settled: bool,
}

impl<'a> InFlightSubmission<'a> {
    fn new(form: &'a Mutex<ContactFormSnapshot>) -> Self {
        Self {
            form,
            settled: false,
        }
    }

    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for InFlightSubmission<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }

        let mut form = self.form.lock().unwrap_or_else(PoisonError::into_inner);
        if form.state == SubmissionState::Submitting {
            warn!("Contact form submission was abandoned before the mail relay answered");
            form.state = SubmissionState::Failed;
            form.status = Some(StatusMessage::send_failed());
        }
    }
}
