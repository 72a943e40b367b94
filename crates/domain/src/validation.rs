//! Registration input validation
//!
//! All field problems are collected into a single error rather than
//! failing on the first, so a caller can surface them together.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw registration input, before any checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationRequest {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}

/// One field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// All field problems found in a registration request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid registration: {}", .issues.iter().map(|i| i.field.as_str()).collect::<Vec<_>>().join(", "))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

/// Check every field and collect the failures.
pub fn validate_registration(request: &RegistrationRequest) -> Result<(), ValidationError> {
    let mut issues = Vec::new();

    if request.first_name.trim().len() < 2 {
        issues.push(FieldIssue::new("first_name", "must be at least 2 characters"));
    }
    if request.last_name.trim().len() < 2 {
        issues.push(FieldIssue::new("last_name", "must be at least 2 characters"));
    }
    if !is_plausible_email(request.email.trim()) {
        issues.push(FieldIssue::new("email", "must look like name@domain.tld"));
    }
    let digit_count = request.phone.chars().filter(|c| c.is_ascii_digit()).count();
    if digit_count < 10 {
        issues.push(FieldIssue::new("phone", "must contain at least 10 digits"));
    }
    if request.password.len() < 6 {
        issues.push(FieldIssue::new("password", "must be at least 6 characters"));
    }
    if request.password != request.confirm_password {
        issues.push(FieldIssue::new("confirm_password", "passwords do not match"));
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { issues })
    }
}

/// Shape check only: one `@`, non-empty local part, a dot in the domain
/// with characters on both sides, no whitespace.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> RegistrationRequest {
        RegistrationRequest {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "(555) 123-4567".to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate_registration(&valid_request()).is_ok());
    }

    #[test]
    fn test_short_names_rejected() {
        let mut request = valid_request();
        request.first_name = "J".to_string();
        request.last_name = " D ".to_string();
        let err = validate_registration(&request).unwrap_err();
        let fields: Vec<_> = err.issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["first_name", "last_name"]);
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_plausible_email("a@b.co"));
        assert!(!is_plausible_email("a@b"));
        assert!(!is_plausible_email("@b.co"));
        assert!(!is_plausible_email("a@.co"));
        assert!(!is_plausible_email("a@b."));
        assert!(!is_plausible_email("a b@c.de"));
        assert!(!is_plausible_email("a@b@c.de"));
    }

    #[test]
    fn test_phone_counts_digits_only() {
        let mut request = valid_request();
        request.phone = "555-123-456".to_string();
        assert!(validate_registration(&request).is_err());
        request.phone = "+1 (555) 123-4567".to_string();
        assert!(validate_registration(&request).is_ok());
    }

    #[test]
    fn test_password_rules() {
        let mut request = valid_request();
        request.password = "short".to_string();
        request.confirm_password = "short".to_string();
        assert!(validate_registration(&request).is_err());

        let mut request = valid_request();
        request.confirm_password = "different".to_string();
        let err = validate_registration(&request).unwrap_err();
        assert_eq!(err.issues[0].field, "confirm_password");
    }

    #[test]
    fn test_all_issues_collected() {
        let request = RegistrationRequest {
            first_name: String::new(),
            last_name: String::new(),
            email: "nope".to_string(),
            phone: "123".to_string(),
            password: "abc".to_string(),
            confirm_password: "xyz".to_string(),
        };
        let err = validate_registration(&request).unwrap_err();
        assert_eq!(err.issues.len(), 6);
    }

    #[test]
    fn test_full_name_trims() {
        let mut request = valid_request();
        request.first_name = " Jane ".to_string();
        assert_eq!(request.full_name(), "Jane Doe");
    }
}
