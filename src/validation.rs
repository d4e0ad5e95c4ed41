//! Form validation with per-field messages.
//!
//! Every check records a message against the field it concerns so the
//! dashboard can show it next to the input. An empty [`FieldErrors`] means the
//! form is valid.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

pub const MIN_PASSWORD_LEN: usize = 6;

/// Validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`, keeping the first one if it already has one.
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// Drop the message for a field, as the forms do once the user edits it.
    pub fn clear(&mut self, field: &str) {
        self.errors.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(value)` when no errors were recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, message)| format!("{field}: {message}"))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Record `message` against `field` when `value` is blank.
pub fn require(errors: &mut FieldErrors, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message);
    }
}

/// Check an email address, returning the message to show if it is unusable.
pub fn validate_email(email: &str) -> Option<&'static str> {
    if email.trim().is_empty() {
        Some("Email is required")
    } else if !EMAIL_RE.is_match(email) {
        Some("Please enter a valid email address")
    } else {
        None
    }
}

/// Validate the login form.
pub fn validate_login(email: &str, password: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if let Some(message) = validate_email(email) {
        errors.insert("email", message);
    }
    if password.is_empty() {
        errors.insert("password", "Password is required");
    }
    errors.into_result(())
}

/// Raw values of the signup form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Validate the signup form.
pub fn validate_signup(form: &SignupForm) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    require(&mut errors, "firstName", &form.first_name, "First name is required");
    require(&mut errors, "lastName", &form.last_name, "Last name is required");
    if let Some(message) = validate_email(&form.email) {
        errors.insert("email", message);
    }
    if form.password.is_empty() {
        errors.insert("password", "Password is required");
    } else if form.password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        );
    }
    if form.confirm_password != form.password {
        errors.insert("confirmPassword", "Passwords do not match");
    }
    errors.into_result(())
}

/// Parse a project deadline (`YYYY-MM-DD`).
pub fn parse_deadline_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse a task deadline. Accepts `YYYY-MM-DD HH:MM`, the `T`-separated form,
/// and either with seconds.
pub fn parse_deadline_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Split comma-separated tag input. Order and duplicates are preserved; blank
/// entries are dropped.
pub fn split_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_rules() {
        assert_eq!(validate_email(""), Some("Email is required"));
        assert_eq!(validate_email("   "), Some("Email is required"));
        assert_eq!(validate_email("john"), Some("Please enter a valid email address"));
        assert_eq!(validate_email("john@example"), Some("Please enter a valid email address"));
        assert_eq!(validate_email("john@example.com"), None);
    }

    #[test]
    fn test_login_collects_every_field() {
        let errors = validate_login("", "").unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));
        assert!(validate_login("jane@example.com", "secret").is_ok());
    }

    #[test]
    fn test_signup_password_rules() {
        let mut form = SignupForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password: "abc".into(),
            confirm_password: "abd".into(),
        };
        let errors = validate_signup(&form).unwrap_err();
        assert!(errors.get("password").unwrap().contains("at least 6"));
        assert_eq!(errors.get("confirmPassword"), Some("Passwords do not match"));

        form.password = "analytical".into();
        form.confirm_password = "analytical".into();
        assert!(validate_signup(&form).is_ok());
    }

    #[test]
    fn test_first_message_wins_and_clear() {
        let mut errors = FieldErrors::new();
        errors.insert("name", "first");
        errors.insert("name", "second");
        assert_eq!(errors.get("name"), Some("first"));
        assert_eq!(errors.to_string(), "name: first");
        errors.clear("name");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_deadline_parsing() {
        assert!(parse_deadline_date("2024-12-15").is_some());
        assert!(parse_deadline_date("15/12/2024").is_none());
        let dt = parse_deadline_datetime("2024-02-15T14:30:00").unwrap();
        assert_eq!(dt, parse_deadline_datetime("2024-02-15 14:30").unwrap());
        assert!(parse_deadline_datetime("2024-02-15").is_none());
    }

    #[test]
    fn test_split_tags_keeps_order_and_duplicates() {
        assert_eq!(split_tags("React, Node.js,,React "), vec!["React", "Node.js", "React"]);
        assert!(split_tags(" , ").is_empty());
    }
}
