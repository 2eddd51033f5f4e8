//! The client record carried alongside an amortization table.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static VALID_EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").expect("email pattern is valid")
});

/// A first name needs more characters than this.
pub const MIN_FIRST_NAME_EXCLUSIVE: usize = 3;

/// Rejections raised while validating client fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("first name must be longer than {min} characters", min = MIN_FIRST_NAME_EXCLUSIVE)]
    FirstNameTooShort,
    #[error("last name must not be empty")]
    EmptyLastName,
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

/// Identity of the client the table is prepared for.
///
/// The engine never reads these fields; they travel with the result so the
/// report can be addressed to someone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl ClientInfo {
    /// Builds the record as-is, without checking any field.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }

    /// Builds the record after trimming and checking each field.
    pub fn validated(first_name: &str, last_name: &str, email: &str) -> Result<Self, ClientError> {
        let first_name = first_name.trim();
        let last_name = last_name.trim();
        let email = email.trim();

        if first_name.chars().count() <= MIN_FIRST_NAME_EXCLUSIVE {
            return Err(ClientError::FirstNameTooShort);
        }
        if last_name.is_empty() {
            return Err(ClientError::EmptyLastName);
        }
        if !Self::is_valid_email(email) {
            return Err(ClientError::InvalidEmail(email.to_string()));
        }

        Ok(Self::new(first_name, last_name, email))
    }

    pub fn is_valid_email(address: &str) -> bool {
        VALID_EMAIL_PATTERN.is_match(address)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("juan.perez@example.com", true)]
    #[case("ana-maria@mail.example.mx", true)]
    #[case("user_1@dominio.org", true)]
    #[case("no-at-sign.example.com", false)]
    #[case("user@domain", false)]
    #[case("user@domain.toolong", false)]
    #[case("user..name@example.com", false)]
    #[case("", false)]
    fn test_email_pattern(#[case] address: &str, #[case] expected: bool) {
        assert_eq!(ClientInfo::is_valid_email(address), expected);
    }

    #[test]
    fn test_validated_trims_fields() {
        let client = ClientInfo::validated("  Juan ", " Pérez", "juan@example.com ").unwrap();
        assert_eq!(client.first_name, "Juan");
        assert_eq!(client.last_name, "Pérez");
        assert_eq!(client.email, "juan@example.com");
        assert_eq!(client.full_name(), "Juan Pérez");
    }

    #[rstest]
    #[case("Ana", "López", "ana@example.com", ClientError::FirstNameTooShort)]
    #[case("Mariana", "  ", "mariana@example.com", ClientError::EmptyLastName)]
    #[case("Mariana", "López", "mariana@", ClientError::InvalidEmail("mariana@".into()))]
    fn test_validated_rejections(
        #[case] first: &str,
        #[case] last: &str,
        #[case] email: &str,
        #[case] expected: ClientError,
    ) {
        assert_eq!(ClientInfo::validated(first, last, email).unwrap_err(), expected);
    }

    #[test]
    fn test_first_name_message_uses_minimum() {
        assert_eq!(
            ClientError::FirstNameTooShort.to_string(),
            format!("first name must be longer than {MIN_FIRST_NAME_EXCLUSIVE} characters")
        );
    }

    #[test]
    fn test_new_does_not_validate() {
        let client = ClientInfo::new("", "", "not an email");
        assert_eq!(client.full_name(), "");
    }
}
