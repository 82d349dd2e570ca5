//! Service layer - business logic without the HTTP layer

pub mod book_service;
pub mod section_service;

use crate::domain::DomainError;

/// Require a non-empty string no longer than `max` characters.
pub(crate) fn require_text(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!(
            "{} must not be empty",
            field
        )));
    }
    if value.chars().count() > max {
        return Err(DomainError::Validation(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_text_rejects_empty_and_overlong() {
        assert!(require_text("name", "Fiction", 255).is_ok());
        assert!(require_text("name", "", 255).is_err());
        assert!(require_text("name", "   ", 255).is_err());
        assert!(require_text("name", &"x".repeat(256), 255).is_err());
        assert!(require_text("name", &"x".repeat(255), 255).is_ok());
    }
}
