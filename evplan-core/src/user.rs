//! Local user accounts.
//!
//! Credentials are stored in plaintext. The auth store is a convenience for
//! a single device, not a security boundary.

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Login state of the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    LoggedOut,
    LoggedIn(User),
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        match self {
            Session::LoggedIn(user) => Some(user),
            Session::LoggedOut => None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::LoggedIn(_))
    }
}

/// The fields of the registration form.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl Registration {
    /// Check the form and produce the user to register.
    pub fn validate(self) -> PlannerResult<User> {
        if [
            &self.username,
            &self.email,
            &self.password,
            &self.confirm_password,
        ]
        .iter()
        .any(|field| field.trim().is_empty())
        {
            return Err(PlannerError::Validation("all fields are required".into()));
        }

        if self.password != self.confirm_password {
            return Err(PlannerError::Validation("passwords do not match".into()));
        }

        Ok(User {
            username: self.username,
            email: self.email,
            password: self.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(password: &str, confirm: &str) -> Registration {
        Registration {
            username: "a".to_string(),
            email: "a@x.com".to_string(),
            password: password.to_string(),
            confirm_password: confirm.to_string(),
        }
    }

    #[test]
    fn test_registration_valid() {
        let user = registration("x", "x").validate().unwrap();
        assert_eq!(user.username, "a");
        assert_eq!(user.password, "x");
    }

    #[test]
    fn test_registration_password_mismatch() {
        assert!(registration("x", "y").validate().is_err());
    }

    #[test]
    fn test_registration_missing_field() {
        assert!(registration("", "").validate().is_err());
    }

    #[test]
    fn test_registration_blank_field() {
        let mut form = registration("x", "x");
        form.username = "   ".to_string();
        assert!(matches!(form.validate(), Err(PlannerError::Validation(_))));

        assert!(registration(" ", " ").validate().is_err());
    }

    #[test]
    fn test_session_user() {
        assert!(Session::LoggedOut.user().is_none());
        let session = Session::LoggedIn(registration("x", "x").validate().unwrap());
        assert!(session.is_logged_in());
        assert_eq!(session.user().unwrap().email, "a@x.com");
    }
}
