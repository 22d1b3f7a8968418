use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::types::error::AppError;

/// Tagged identifiers. Membership operations take several uuid-shaped
/// arguments at once; wrapping them makes a transposed call a type error
/// instead of a data corruption.
macro_rules! uuid_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

uuid_newtype!(TeamId);
uuid_newtype!(UserId);
uuid_newtype!(InviteId);

impl InviteId {
    /// Invite ids arrive as free text in URLs. A string that doesn't parse as
    /// a uuid can't match any row, so callers treat `None` the same way as
    /// "no invite found" rather than as an error.
    pub fn parse(input: &str) -> Option<Self> {
        Uuid::parse_str(input).ok().map(Self)
    }
}

/// Lowercased, minimally validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(input: &str) -> Result<Self, AppError> {
        let trimmed = input.trim().to_lowercase();
        match trimmed.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => {
                Ok(Self(trimmed))
            }
            _ => Err(AppError::Validation(format!(
                "'{input}' is not a valid email address"
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_parse_normalizes_case_and_whitespace() {
        let email = Email::parse("  Noah@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "noah@example.com");
    }

    #[test]
    fn email_parse_rejects_garbage() {
        assert!(Email::parse("not-an-email").is_err());
        assert!(Email::parse("@example.com").is_err());
        assert!(Email::parse("noah@nodot").is_err());
        assert!(Email::parse("").is_err());
    }

    #[test]
    fn invite_id_parse_rejects_non_uuid_text() {
        assert!(InviteId::parse("definitely-not-a-uuid").is_none());
        let id = InviteId::new();
        assert_eq!(InviteId::parse(&id.to_string()), Some(id));
    }
}
