use anyhow::bail;
use clap::Args;
use folio_config::Config;
use folio_core_contact_contracts::{ContactFormService, ContactSubmitError};
use folio_models::{contact::ContactFormField, submission::StatusMessage};

use crate::contact::contact_form;

#[derive(Debug, Args)]
pub struct SendCommand {
    /// Your name
    #[arg(long)]
    pub name: String,
    /// Email address to reply to
    #[arg(long)]
    pub email: String,
    /// The message to send
    #[arg(long)]
    pub message: String,
}

impl SendCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        let form = contact_form(config.relay)?;
        let status = self.send(&form).await?;
        println!("{}", status.text);
        Ok(())
    }

    /// Fills the form, submits it and returns the status message on success.
    pub async fn send(self, form: &impl ContactFormService) -> anyhow::Result<StatusMessage> {
        form.edit(ContactFormField::Name, self.name);
        form.edit(ContactFormField::Email, self.email);
        form.edit(ContactFormField::Message, self.message);

        let result = form.submit().await;
        let status = form.snapshot().status;

        match (result, status) {
            (Ok(()), Some(status)) => Ok(status),
            (Ok(()), None) => bail!("Contact form reported no status"),
            (Err(ContactSubmitError::Invalid(err)), _) => {
                bail!("{}\n{err}", StatusMessage::INVALID_INPUT)
            }
            (Err(err), _) => bail!(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use folio_core_contact_contracts::{ContactFormSnapshot, MockContactFormService};
    use folio_models::{
        contact::{ContactFormInput, ContactValidateError},
        submission::SubmissionState,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    fn command() -> SendCommand {
        SendCommand {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            message: "Hi".into(),
        }
    }

    fn form() -> MockContactFormService {
        MockContactFormService::new()
            .with_edit(ContactFormField::Name, "Ada".into())
            .with_edit(ContactFormField::Email, "ada@example.com".into())
            .with_edit(ContactFormField::Message, "Hi".into())
    }

    #[tokio::test]
    async fn ok() {
        // Arrange
        let form = form().with_submit(Ok(())).with_snapshot(ContactFormSnapshot {
            input: ContactFormInput::default(),
            state: SubmissionState::Succeeded,
            status: Some(StatusMessage::sent()),
        });

        // Act
        let result = command().send(&form).await;

        // Assert
        assert_eq!(result.unwrap(), StatusMessage::sent());
    }

    #[tokio::test]
    async fn invalid() {
        // Arrange
        let form = form()
            .with_submit(Err(ContactSubmitError::Invalid(ContactValidateError {
                fields: vec![ContactFormField::Email],
            })))
            .with_snapshot(ContactFormSnapshot {
                input: ContactFormInput::default(),
                state: SubmissionState::Idle,
                status: Some(StatusMessage::invalid_input()),
            });

        // Act
        let result = command().send(&form).await;

        // Assert
        let err = result.unwrap_err().to_string();
        assert!(err.starts_with(StatusMessage::INVALID_INPUT), "{err}");
        assert!(err.contains("email"), "{err}");
    }

    #[tokio::test]
    async fn relay_error() {
        // Arrange
        let form = form()
            .with_submit(Err(ContactSubmitError::Relay))
            .with_snapshot(ContactFormSnapshot {
                input: ContactFormInput::default(),
                state: SubmissionState::Failed,
                status: Some(StatusMessage::send_failed()),
            });

        // Act
        let result = command().send(&form).await;

        // Assert
        assert_eq!(result.unwrap_err().to_string(), StatusMessage::SEND_FAILED);
    }
}
