//! Validation shared by roster profiles (members, faculty) and user accounts.

use validator::ValidateEmail;

use crate::error::CoreError;

/// Maximum length of a display name.
pub const MAX_NAME_LENGTH: usize = 120;

/// Maximum entries in a hobbies / specializations list.
pub const MAX_TAGS: usize = 20;

/// Strip surrounding whitespace from a profile field in place, so the stored
/// value is the one that was validated and checked for conflicts.
pub fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Validate a display name: non-blank and at most [`MAX_NAME_LENGTH`] chars.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Name is required".into()));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Name exceeds maximum length of {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate an email address syntactically.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email.trim().validate_email() {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("Invalid email address '{email}'")))
    }
}

/// Validate an identifying code (student or faculty id). `label` names the
/// field in error messages.
pub fn validate_code(label: &str, code: &str) -> Result<(), CoreError> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{label} is required")));
    }
    if trimmed.chars().any(|c| c.is_whitespace() || c == ',') {
        return Err(CoreError::Validation(format!(
            "{label} must not contain spaces or commas"
        )));
    }
    Ok(())
}

/// Validate an optional phone number: digits with optional `+`, spaces or
/// dashes, 7 to 15 digits in total.
pub fn validate_phone(phone: &str) -> Result<(), CoreError> {
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' '));
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if allowed && (7..=15).contains(&digits) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("Invalid phone number '{phone}'")))
    }
}

/// Validate a tag list (hobbies or specializations).
pub fn validate_tags(label: &str, tags: &[String]) -> Result<(), CoreError> {
    if tags.len() > MAX_TAGS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_TAGS} {label} are allowed"
        )));
    }
    if tags.iter().any(|t| t.trim().is_empty()) {
        return Err(CoreError::Validation(format!("{label} must not be blank")));
    }
    Ok(())
}

/// Validate that a picture reference is present. The upload step must have
/// produced this URL before a profile can be created.
pub fn validate_picture_url(url: &str) -> Result<(), CoreError> {
    if url.trim().is_empty() {
        return Err(CoreError::Validation(
            "A picture must be uploaded before the profile is created".into(),
        ));
    }
    Ok(())
}
