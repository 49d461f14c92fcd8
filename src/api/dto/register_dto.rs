//! Registration DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::service::Registration;

/// Request body for `POST /register`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterRequest {
    /// Registrant name; must be on the allow-list. Kept as raw JSON so a
    /// missing, `null` or non-string name is rejected as not allowed.
    #[serde(default)]
    #[schema(value_type = String, example = "Omar")]
    pub name: Value,
    /// Contact address. Mandatory only when the service requires email.
    #[serde(default)]
    pub email: Option<String>,
}

impl RegisterRequest {
    /// The name as a string; empty when it is absent or not a string.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str().unwrap_or_default()
    }
}

/// Response body for a successful `POST /register`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RegisterResponse {
    /// Localized confirmation embedding the receiver.
    pub message: String,
    /// The name the registrant gives a gift to.
    pub receiver: String,
}

impl From<Registration> for RegisterResponse {
    fn from(r: Registration) -> Self {
        Self {
            message: r.message,
            receiver: r.receiver,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn email_is_optional() {
        let Ok(req) = serde_json::from_str::<RegisterRequest>(r#"{"name":"Omar"}"#) else {
            panic!("request without email must parse");
        };
        assert_eq!(req.name(), "Omar");
        assert!(req.email.is_none());
    }

    #[test]
    fn missing_name_parses_as_empty() {
        let Ok(req) = serde_json::from_str::<RegisterRequest>(r#"{"email":"a@b.c"}"#) else {
            panic!("request without name must parse");
        };
        assert!(req.name().is_empty());
        assert_eq!(req.email.as_deref(), Some("a@b.c"));
    }

    #[test]
    fn non_string_name_reads_as_empty() {
        for body in [r#"{"name":null}"#, r#"{"name":5}"#, r#"{"name":["Omar"]}"#] {
            let Ok(req) = serde_json::from_str::<RegisterRequest>(body) else {
                panic!("{body} must parse");
            };
            assert!(req.name().is_empty());
        }
    }
}
