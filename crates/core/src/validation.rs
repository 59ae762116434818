//! Field validation for user-supplied values.
//!
//! Length limits mirror the column budgets of the admin console so that a
//! value accepted here is never truncated on display.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of an email address (RFC 5321 path limit).
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length of a username.
pub const MAX_USERNAME_LENGTH: usize = 150;

/// Maximum length of a user's full name.
pub const MAX_FULL_NAME_LENGTH: usize = 255;

/// Maximum length of a clinician specialty.
pub const MAX_SPECIALTY_LENGTH: usize = 255;

/// Maximum length of an alert type.
pub const MAX_ALERT_TYPE_LENGTH: usize = 50;

/// Maximum length of an alert severity.
pub const MAX_SEVERITY_LENGTH: usize = 20;

/// Maximum length of a comment body.
pub const MAX_COMMENT_BODY_LENGTH: usize = 10_000;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Normalize an email address for storage and lookup: trimmed and lower-cased.
///
/// Logins match on the normalized form, so `Alice@Example.com` and
/// `alice@example.com` are the same account.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate an (already normalized) email address.
///
/// Shallow check: one `@`, a non-empty local part, a dotted domain,
/// no whitespace.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.is_empty() {
        return Err(CoreError::Validation("Email is required".to_string()));
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(CoreError::Validation(format!(
            "Email exceeds maximum length of {MAX_EMAIL_LENGTH} characters"
        )));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(CoreError::Validation(
            "Email must not contain whitespace".to_string(),
        ));
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err(CoreError::Validation(format!("Invalid email '{email}'")));
    };
    let domain_ok = !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.');
    if local.is_empty() || !domain_ok {
        return Err(CoreError::Validation(format!("Invalid email '{email}'")));
    }
    Ok(())
}

/// Validate a username: 1..=150 characters of letters, digits and `@.+-_`.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if username.is_empty() {
        return Err(CoreError::Validation("Username is required".to_string()));
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Username exceeds maximum length of {MAX_USERNAME_LENGTH} characters"
        )));
    }
    if let Some(bad) = username
        .chars()
        .find(|c| !(c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')))
    {
        return Err(CoreError::Validation(format!(
            "Username contains invalid character '{bad}'"
        )));
    }
    Ok(())
}

/// Validate an optional full name. Blank is allowed.
pub fn validate_full_name(full_name: &str) -> Result<(), CoreError> {
    validate_max_length(full_name, MAX_FULL_NAME_LENGTH, "Full name")
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// Validate a clinician specialty. Blank is allowed.
pub fn validate_specialty(specialty: &str) -> Result<(), CoreError> {
    validate_max_length(specialty, MAX_SPECIALTY_LENGTH, "Specialty")
}

// ---------------------------------------------------------------------------
// Alerts & comments
// ---------------------------------------------------------------------------

pub fn validate_alert_type(alert_type: &str) -> Result<(), CoreError> {
    validate_required(alert_type, "Alert type")?;
    validate_max_length(alert_type, MAX_ALERT_TYPE_LENGTH, "Alert type")
}

pub fn validate_severity(severity: &str) -> Result<(), CoreError> {
    validate_required(severity, "Severity")?;
    validate_max_length(severity, MAX_SEVERITY_LENGTH, "Severity")
}

/// Validate a comment body: non-blank and within the length limit.
pub fn validate_comment_body(body: &str) -> Result<(), CoreError> {
    if body.trim().is_empty() {
        return Err(CoreError::Validation(
            "Comment body cannot be empty".to_string(),
        ));
    }
    validate_max_length(body, MAX_COMMENT_BODY_LENGTH, "Comment body")
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_required(value: &str, name: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{name} is required")));
    }
    Ok(())
}

fn validate_max_length(value: &str, max: usize, name: &str) -> Result<(), CoreError> {
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{name} exceeds maximum length of {max} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- email ---------------------------------------------------------------

    #[test]
    fn normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
    }

    #[test]
    fn valid_emails_accepted() {
        assert!(validate_email("patient@demo.com").is_ok());
        assert!(validate_email("a.b+tag@sub.example.org").is_ok());
    }

    #[test]
    fn invalid_emails_rejected() {
        for email in [
            "",
            "no-at-sign",
            "@example.com",
            "user@",
            "user@localhost",
            "user@@example.com",
            "user@.example.com",
            "user name@example.com",
        ] {
            assert!(validate_email(email).is_err(), "{email:?} should be rejected");
        }
    }

    #[test]
    fn overlong_email_rejected() {
        let email = format!("{}@example.com", "a".repeat(250));
        let err = validate_email(&email).unwrap_err();
        assert!(err.to_string().contains("maximum length"));
    }

    // -- username ------------------------------------------------------------

    #[test]
    fn username_accepts_allowed_punctuation() {
        assert!(validate_username("dr.jane_doe+1@ward-3").is_ok());
    }

    #[test]
    fn username_rejects_spaces_and_empty() {
        assert!(validate_username("").is_err());
        let err = validate_username("jane doe").unwrap_err();
        assert!(err.to_string().contains("invalid character ' '"));
    }

    #[test]
    fn username_length_boundary() {
        assert!(validate_username(&"u".repeat(MAX_USERNAME_LENGTH)).is_ok());
        assert!(validate_username(&"u".repeat(MAX_USERNAME_LENGTH + 1)).is_err());
    }

    // -- profiles ------------------------------------------------------------

    #[test]
    fn blank_specialty_allowed() {
        assert!(validate_specialty("").is_ok());
        assert!(validate_specialty("Cardiology").is_ok());
    }

    #[test]
    fn overlong_specialty_rejected() {
        assert!(validate_specialty(&"x".repeat(MAX_SPECIALTY_LENGTH + 1)).is_err());
    }

    // -- alerts --------------------------------------------------------------

    #[test]
    fn alert_type_required_and_bounded() {
        assert!(validate_alert_type("heart_rate_high").is_ok());
        assert!(validate_alert_type("   ").is_err());
        assert!(validate_alert_type(&"t".repeat(MAX_ALERT_TYPE_LENGTH)).is_ok());
        assert!(validate_alert_type(&"t".repeat(MAX_ALERT_TYPE_LENGTH + 1)).is_err());
    }

    #[test]
    fn severity_required_and_bounded() {
        assert!(validate_severity("critical").is_ok());
        assert!(validate_severity("").is_err());
        assert!(validate_severity(&"s".repeat(MAX_SEVERITY_LENGTH + 1)).is_err());
    }

    // -- comments ------------------------------------------------------------

    #[test]
    fn comment_body_must_not_be_blank() {
        let err = validate_comment_body(" \n\t").unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
    }

    #[test]
    fn comment_body_length_limit() {
        assert!(validate_comment_body(&"b".repeat(MAX_COMMENT_BODY_LENGTH)).is_ok());
        assert!(validate_comment_body(&"b".repeat(MAX_COMMENT_BODY_LENGTH + 1)).is_err());
    }
}
