//! Review constants and validation functions.

use crate::error::CoreError;

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Maximum length for a review comment.
pub const MAX_COMMENT_LENGTH: usize = 2_000;

/// Validate that a rating is within `MIN_RATING..=MAX_RATING`.
pub fn validate_rating(rating: i32) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )))
    }
}

/// Validate a review comment: non-blank and within the length limit.
pub fn validate_comment(comment: &str) -> Result<(), CoreError> {
    if comment.trim().is_empty() {
        return Err(CoreError::Validation("Comment must not be empty".into()));
    }
    if comment.chars().count() > MAX_COMMENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Comment exceeds maximum length of {MAX_COMMENT_LENGTH} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_comment_rules() {
        assert!(validate_comment("Great fest").is_ok());
        assert!(validate_comment("   ").is_err());
        assert!(validate_comment(&"x".repeat(MAX_COMMENT_LENGTH + 1)).is_err());
    }
}
