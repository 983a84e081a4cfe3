//! Request body extraction and field validation.
//!
//! Payload fields are `Option<String>` so that a missing field and an empty
//! one both end up as a 400 with a readable message instead of a
//! deserialization failure.

use axum::extract::{FromRequest, rejection::JsonRejection};
use serde::Serialize;

use crate::error::AppError;

/// JSON body extractor whose rejection is a JSON `AppError::BadRequest`.
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

impl<T: Serialize> axum::response::IntoResponse for ApiJson<T> {
    fn into_response(self) -> axum::response::Response {
        axum::Json(self.0).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected request body");
        Self::BadRequest("Pedido inválido".to_string())
    }
}

/// Trim a field, treating blank as absent.
#[must_use]
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A trimmed, non-blank field.
///
/// # Errors
///
/// Returns `AppError::BadRequest` with `message` when the field is missing
/// or blank.
pub fn required(value: Option<String>, message: &str) -> Result<String, AppError> {
    optional(value).ok_or_else(|| AppError::BadRequest(message.to_string()))
}

/// Reject values longer than `max` characters.
///
/// # Errors
///
/// Returns `AppError::BadRequest` naming the field.
pub fn max_chars(value: &str, max: usize, field: &str) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::BadRequest(format!(
            "O campo {field} não pode ter mais de {max} caracteres"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_trims_and_drops_blank() {
        assert_eq!(optional(Some("  x ".into())), Some("x".into()));
        assert_eq!(optional(Some("   ".into())), None);
        assert_eq!(optional(None), None);
    }

    #[test]
    fn test_required() {
        assert_eq!(required(Some(" Ana ".into()), "nome").ok(), Some("Ana".into()));
        assert!(matches!(
            required(Some(String::new()), "O nome é obrigatório"),
            Err(AppError::BadRequest(msg)) if msg == "O nome é obrigatório"
        ));
        assert!(required(None, "x").is_err());
    }

    #[test]
    fn test_max_chars() {
        assert!(max_chars("abc", 3, "nome").is_ok());
        assert!(max_chars("abcd", 3, "nome").is_err());
        assert!(max_chars("ççç", 3, "nome").is_ok());
    }
}
