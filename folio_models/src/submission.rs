use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    /// Whether the last submission attempt has finished, successfully or not.
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Success,
    Error,
}

/// The message rendered next to the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    pub const INVALID_INPUT: &str = "Please correct your input.";
    pub const SENT: &str = "Message sent successfully!";
    pub const SEND_FAILED: &str = "Failed to send message. Please try again.";

    pub fn invalid_input() -> Self {
        Self::error(Self::INVALID_INPUT)
    }

    pub fn sent() -> Self {
        Self {
            kind: StatusKind::Success,
            text: Self::SENT.into(),
        }
    }

    pub fn send_failed() -> Self {
        Self::error(Self::SEND_FAILED)
    }

    fn error(text: &str) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}
