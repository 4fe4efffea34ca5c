//! Holding input validation
//!
//! Runs before a holding is written; the portfolio store itself does not
//! re-validate. Rejections carry a human-readable reason and no partial
//! write occurs.

use crate::error::ValidationError;
use crate::symbols::normalize;

/// Validate a prospective holding
pub fn validate_holding(symbol: &str, quantity: f64, buy_price: f64) -> Result<(), ValidationError> {
    if normalize(symbol).is_empty() {
        return Err(ValidationError::EmptySymbol);
    }
    if quantity <= 0.0 {
        return Err(ValidationError::NonPositiveQuantity);
    }
    if buy_price < 0.0 {
        return Err(ValidationError::NegativeBuyPrice);
    }
    Ok(())
}
