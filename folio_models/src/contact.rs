use std::{fmt, sync::LazyLock};

use nutype::nutype;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub static CONTACT_EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// The raw contents of the contact form as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFormInput {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactFormField {
    Name,
    Email,
    Message,
}

impl ContactFormInput {
    pub fn get(&self, field: ContactFormField) -> &str {
        match field {
            ContactFormField::Name => &self.name,
            ContactFormField::Email => &self.email,
            ContactFormField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactFormField, value: String) {
        *match field {
            ContactFormField::Name => &mut self.name,
            ContactFormField::Email => &mut self.email,
            ContactFormField::Message => &mut self.message,
        } = value;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Checks all fields at once.
    ///
    /// Only the emptiness checks look at trimmed values, the returned
    /// [`ContactMessage`] keeps every field exactly as entered.
    pub fn validate(&self) -> Result<ContactMessage, ContactValidateError> {
        let name = ContactName::try_new(self.name.clone());
        let email = ContactEmail::try_new(self.email.clone());
        let message = ContactMessageContent::try_new(self.message.clone());

        match (name, email, message) {
            (Ok(name), Ok(email), Ok(message)) => Ok(ContactMessage {
                name,
                email,
                message,
            }),
            (name, email, message) => Err(ContactValidateError {
                fields: [
                    (name.is_err(), ContactFormField::Name),
                    (email.is_err(), ContactFormField::Email),
                    (message.is_err(), ContactFormField::Message),
                ]
                .into_iter()
                .filter_map(|(invalid, field)| invalid.then_some(field))
                .collect(),
            }),
        }
    }
}

impl fmt::Display for ContactFormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        })
    }
}

/// A contact message that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: ContactName,
    pub email: ContactEmail,
    pub message: ContactMessageContent,
}

#[nutype(
    validate(predicate = |name: &str| !name.trim().is_empty()),
    derive(Debug, Clone, PartialEq, Eq, Deref, Serialize, Deserialize)
)]
pub struct ContactName(String);

#[nutype(
    validate(regex = CONTACT_EMAIL_REGEX),
    derive(Debug, Clone, PartialEq, Eq, Deref, Serialize, Deserialize)
)]
pub struct ContactEmail(String);

#[nutype(
    validate(predicate = |message: &str| !message.trim().is_empty()),
    derive(Debug, Clone, PartialEq, Eq, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid contact form fields: {}", fields.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
pub struct ContactValidateError {
    pub fields: Vec<ContactFormField>,
}

#[cfg(test)]
mod tests {
    use folio_utils::assert_matches;
    use pretty_assertions::assert_eq;

    use super::*;

    fn input(name: &str, email: &str, message: &str) -> ContactFormInput {
        ContactFormInput {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    #[test]
    fn valid() {
        let result = input("Ada", "ada@example.com", "Hi").validate().unwrap();
        assert_eq!(*result.name, "Ada");
        assert_eq!(*result.email, "ada@example.com");
        assert_eq!(*result.message, "Hi");
    }

    #[test]
    fn valid_keeps_whitespace() {
        let result = input("  Ada ", "ada@example.com", "\nHi there\n")
            .validate()
            .unwrap();
        assert_eq!(*result.name, "  Ada ");
        assert_eq!(*result.message, "\nHi there\n");
    }

    #[test]
    fn all_invalid() {
        let result = input("", "bad", "").validate();
        assert_eq!(
            result,
            Err(ContactValidateError {
                fields: vec![
                    ContactFormField::Name,
                    ContactFormField::Email,
                    ContactFormField::Message
                ]
            })
        );
    }

    #[test]
    fn blank_name() {
        for name in ["", " ", "\t\n  "] {
            let result = input(name, "ada@example.com", "Hi").validate();
            assert_matches!(result, Err(ContactValidateError { fields }) if *fields == [ContactFormField::Name]);
        }
    }

    #[test]
    fn blank_message() {
        for message in ["", "   ", "\r\n"] {
            let result = input("Ada", "ada@example.com", message).validate();
            assert_matches!(result, Err(ContactValidateError { fields }) if *fields == [ContactFormField::Message]);
        }
    }

    #[test]
    fn email_shape() {
        for (email, valid) in [
            ("ada@example.com", true),
            ("a.b+c@mail.example.org", true),
            ("x@y.z", true),
            ("bad", false),
            ("", false),
            ("ada@example", false),
            ("@example.com", false),
            ("ada@.com", false),
            ("ada@example.", false),
            ("ada@@example.com", false),
            ("ada lovelace@example.com", false),
            (" ada@example.com", false),
        ] {
            let result = input("Ada", email, "Hi").validate();
            assert_eq!(result.is_ok(), valid, "{email:?}");
        }
    }

    #[test]
    fn set_and_clear() {
        let mut form = ContactFormInput::default();
        form.set(ContactFormField::Name, "Ada".into());
        form.set(ContactFormField::Email, "ada@example.com".into());
        form.set(ContactFormField::Message, "Hi".into());
        assert_eq!(form, input("Ada", "ada@example.com", "Hi"));
        assert_eq!(form.get(ContactFormField::Email), "ada@example.com");

        form.clear();
        assert_eq!(form, input("", "", ""));
    }

    #[test]
    fn error_message() {
        let error = input("", "ada@example.com", "").validate().unwrap_err();
        assert_eq!(error.to_string(), "Invalid contact form fields: name, message");
    }

    #[test]
    fn deserialize_input() {
        let result = serde_json::from_str::<ContactFormInput>(
            r#"{"name":"Ada","email":"ada@example.com","message":"Hi"}"#,
        )
        .unwrap();
        assert_eq!(result, input("Ada", "ada@example.com", "Hi"));
    }
}
