//! Request body extraction and form field checks for the back office.

use axum::extract::{FromRequest, rejection::JsonRejection};
use rust_decimal::Decimal;

use crate::error::AppError;

/// JSON body extractor whose rejection is a JSON `AppError::BadRequest`.
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Rejected admin request body");
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
/// Returns `AppError::BadRequest` naming the missing field.
pub fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    optional(value).ok_or_else(|| AppError::BadRequest(format!("O campo {field} é obrigatório")))
}

/// Largest price a `NUMERIC(10, 2)` column holds.
const MAX_PRICE_CENTS: i64 = 9_999_999_999;

/// A price in euros: present, not negative, at most two decimal places.
///
/// # Errors
///
/// Returns `AppError::BadRequest` describing the problem.
pub fn price(value: Option<Decimal>) -> Result<Decimal, AppError> {
    let price = value.ok_or_else(|| AppError::BadRequest("O preço é obrigatório".to_string()))?;

    if price.is_sign_negative() && !price.is_zero() {
        return Err(AppError::BadRequest(
            "O preço não pode ser negativo".to_string(),
        ));
    }
    if price.normalize().scale() > 2 {
        return Err(AppError::BadRequest(
            "O preço tem no máximo duas casas decimais".to_string(),
        ));
    }
    if price > Decimal::new(MAX_PRICE_CENTS, 2) {
        return Err(AppError::BadRequest("O preço é demasiado alto".to_string()));
    }

    Ok(price)
}

/// Stock on hand: absent means zero, negative is rejected.
///
/// # Errors
///
/// Returns `AppError::BadRequest` for negative stock.
pub fn stock(value: Option<i32>) -> Result<i32, AppError> {
    match value.unwrap_or(0) {
        n if n < 0 => Err(AppError::BadRequest(
            "O stock não pode ser negativo".to_string(),
        )),
        n => Ok(n),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_required_names_field() {
        let err = required(Some("  ".into()), "SKU").unwrap_err();
        assert_eq!(err.public_message(), "O campo SKU é obrigatório");
        assert_eq!(required(Some(" VAP-1 ".into()), "SKU").ok(), Some("VAP-1".into()));
    }

    #[test]
    fn test_price_rules() {
        assert!(price(None).is_err());
        assert!(price(Some(Decimal::new(-1, 2))).is_err());
        assert!(price(Some(Decimal::new(1999, 3))).is_err());
        assert_eq!(price(Some(Decimal::ZERO)).ok(), Some(Decimal::ZERO));
        assert_eq!(
            price(Some(Decimal::new(49900, 3))).ok(),
            Some(Decimal::new(49900, 3))
        );
        assert!(price(Some(Decimal::new(MAX_PRICE_CENTS + 1, 2))).is_err());
    }

    #[test]
    fn test_stock_rules() {
        assert_eq!(stock(None).ok(), Some(0));
        assert_eq!(stock(Some(12)).ok(), Some(12));
        assert!(stock(Some(-1)).is_err());
    }
}
