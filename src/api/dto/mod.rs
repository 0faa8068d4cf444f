//! Data Transfer Objects for API requests and responses.
//!
//! Field names are camelCase on the wire. Request DTOs derive
//! [`validator::Validate`]; the [`crate::api::extract::ValidatedJson`] extractor
//! runs validation before handlers see the payload.

pub mod brand;
pub mod car;
pub mod car_command;
pub mod country;
pub mod health;

use validator::ValidationError;

/// Rejects strings that are empty once trimmed.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
