//! Mocked authentication gate.
//!
//! There is no credential check: any registered email with a non-empty
//! password signs in. Signup registers the user in the store's directory so
//! they can manage projects and take tasks straight away.

use tracing::info;

use crate::error::{Error, Result};
use crate::store::Store;
use crate::user::{User, UserDraft};
use crate::validation::{validate_login, validate_signup, FieldErrors, SignupForm};

/// Who is signed in, if anyone.
#[derive(Debug, Clone, Default)]
pub struct AuthGate {
    user: Option<User>,
}

impl AuthGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Sign in with an email and password.
    pub fn login(&mut self, store: &Store, email: &str, password: &str) -> Result<User> {
        validate_login(email, password)?;
        let user = store
            .state()
            .user_by_email(email)
            .cloned()
            .ok_or(Error::InvalidCredentials)?;
        info!(user_id = %user.id, "Signed in");
        self.user = Some(user.clone());
        Ok(user)
    }

    /// Register a new user and sign them in.
    pub fn signup(&mut self, store: &mut Store, form: &SignupForm) -> Result<User> {
        validate_signup(form)?;
        let draft = UserDraft {
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
            email: form.email.trim().to_string(),
            avatar: None,
        };
        let user = store.register_user(draft).map_err(|e| {
            let mut errors = FieldErrors::new();
            errors.insert("email", e.to_string());
            Error::Validation(errors)
        })?;
        info!(user_id = %user.id, "Signed up");
        self.user = Some(user.clone());
        Ok(user)
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(user_id = %user.id, "Signed out");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_known_email_any_password() {
        let store = Store::in_memory();
        let mut gate = AuthGate::new();
        let user = gate.login(&store, "Jane@Example.com", "whatever").unwrap();
        assert_eq!(user.first_name, "Jane");
        assert!(gate.is_authenticated());

        gate.logout();
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_login_unknown_email_is_rejected() {
        let store = Store::in_memory();
        let mut gate = AuthGate::new();
        assert!(matches!(
            gate.login(&store, "ghost@example.com", "pw"),
            Err(Error::InvalidCredentials)
        ));
        assert!(!gate.is_authenticated());
    }

    #[test]
    fn test_login_validation_errors_are_per_field() {
        let store = Store::in_memory();
        let mut gate = AuthGate::new();
        match gate.login(&store, "not-an-email", "") {
            Err(Error::Validation(errors)) => {
                assert_eq!(errors.get("email"), Some("Please enter a valid email address"));
                assert_eq!(errors.get("password"), Some("Password is required"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_signup_registers_and_signs_in() {
        let mut store = Store::in_memory();
        let mut gate = AuthGate::new();
        let form = SignupForm {
            first_name: " Ada ".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password: "engines".into(),
            confirm_password: "engines".into(),
        };
        let ada = gate.signup(&mut store, &form).unwrap();
        assert_eq!(ada.first_name, "Ada");
        assert_eq!(gate.user().unwrap().id, ada.id);
        assert!(store.state().user(&ada.id).is_some());

        let mut again = AuthGate::new();
        match again.signup(&mut store, &form) {
            Err(Error::Validation(errors)) => assert!(errors.get("email").unwrap().contains("already")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
