//! Session descriptor.
//!
//! The session is established at login, outside this crate, and persisted as
//! a JSON object under a well-known key. It is only ever read here.

use serde::{Deserialize, Serialize};

use crate::error::{BilledError, BilledResult};

/// Role of the connected user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserType {
    /// Submits and lists their own bills.
    Employee,
    /// Reviews every employee's bills.
    Admin,
}

/// The identity descriptor read at every navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Role of the user.
    #[serde(rename = "type")]
    pub user_type: UserType,
    /// Email of the user.
    #[serde(default)]
    pub email: String,
}

impl Session {
    /// Creates an employee session.
    pub fn employee(email: impl Into<String>) -> Self {
        Self {
            user_type: UserType::Employee,
            email: email.into(),
        }
    }

    /// Creates an admin session.
    pub fn admin(email: impl Into<String>) -> Self {
        Self {
            user_type: UserType::Admin,
            email: email.into(),
        }
    }

    /// Parses the persisted JSON form. `key` names the storage slot in errors.
    ///
    /// Extra fields (such as a password or a status flag written at login)
    /// are ignored.
    ///
    /// # Example
    ///
    /// ```
    /// use billed::models::{Session, UserType};
    ///
    /// let session = Session::from_json("user", r#"{"type":"Employee","email":"a@a"}"#).unwrap();
    /// assert_eq!(session.user_type, UserType::Employee);
    /// ```
    pub fn from_json(key: &str, raw: &str) -> BilledResult<Self> {
        serde_json::from_str(raw).map_err(|e| BilledError::SessionParseError {
            key: key.to_string(),
            message: e.to_string(),
        })
    }

    /// Serializes the session to its persisted JSON form.
    pub fn to_json(&self) -> String {
        serde_json::json!({ "type": self.user_type, "email": self.email }).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session_with_extra_fields() {
        let raw = r#"{"type":"Admin","email":"admin@test.tld","password":"admin","status":"connected"}"#;
        let session = Session::from_json("user", raw).unwrap();
        assert_eq!(session, Session::admin("admin@test.tld"));
    }

    #[test]
    fn test_parse_session_without_email() {
        let session = Session::from_json("user", r#"{"type":"Employee"}"#).unwrap();
        assert_eq!(session.user_type, UserType::Employee);
        assert!(session.email.is_empty());
    }

    #[test]
    fn test_parse_session_unknown_role_is_error() {
        let result = Session::from_json("user", r#"{"type":"Guest","email":"g@g"}"#);
        match result {
            Err(BilledError::SessionParseError { key, .. }) => assert_eq!(key, "user"),
            other => panic!("Expected SessionParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_session_json_round_trips() {
        let session = Session::employee("employee@test.tld");
        let parsed = Session::from_json("user", &session.to_json()).unwrap();
        assert_eq!(parsed, session);
    }
}
