//! Field checks shared by request types.

use validator::ValidationError;

/// Builds a [`ValidationError`] with a user facing message.
pub fn validation_error(code: &'static str, message: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.to_owned().into());
    error
}

/// Rejects strings made only of whitespace.
///
/// The products table measures trimmed lengths, so `"   "` passes a plain
/// length check but fails the row constraint.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(validation_error("blank", "must contain non-whitespace characters"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_is_blank() {
        assert!(not_blank("   ").is_err());
        assert!(not_blank("\t\n").is_err());
        assert!(not_blank(" lamp ").is_ok());
    }
}
