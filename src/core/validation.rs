//! Reusable field validators
//!
//! Used through `#[validate(custom(function = ...))]` on form drafts

use std::borrow::Cow;
use validator::ValidationError;

/// Validator: text must contain something other than whitespace
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank").with_message(Cow::Borrowed("is required")))
    } else {
        Ok(())
    }
}

/// Validator: number must be finite and strictly positive
pub fn positive_amount(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::new("not_positive")
            .with_message(Cow::Borrowed("must be greater than zero")))
    }
}
