//! Money calculation utilities using rust_decimal for precision
//!
//! Monetary amounts are stored and serialized as `f64`. All arithmetic is
//! done with `Decimal` internally and rounded back to 2 decimal places on
//! the way out, so sums over many lines cannot drift the way naive f64
//! accumulation does.

use crate::store::{StoreError, StoreResult};
use rust_decimal::prelude::*;
use shared::models::SaleLine;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert an f64 amount to Decimal
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Convert a Decimal back to f64, rounded to 2 places
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Round an f64 amount to 2 decimal places
pub fn round_money(value: f64) -> f64 {
    to_f64(to_decimal(value))
}

/// a + b with decimal precision
pub fn add(a: f64, b: f64) -> f64 {
    to_f64(to_decimal(a) + to_decimal(b))
}

/// quantity × unit price for one sale line
pub fn line_subtotal(line: &SaleLine) -> Decimal {
    Decimal::from(line.quantity) * to_decimal(line.unit_price)
}

/// Total across sale lines, rounded to 2 places
pub fn lines_total(lines: &[SaleLine]) -> f64 {
    to_f64(lines.iter().map(line_subtotal).sum())
}

/// Validate that an amount is finite (not NaN, not Infinity)
pub fn require_finite(value: f64, field_name: &str) -> StoreResult<()> {
    if !value.is_finite() {
        return Err(StoreError::Validation(format!(
            "{field_name} must be a finite number, got {value}"
        )));
    }
    Ok(())
}

/// Validate that an amount is finite and non-negative
pub fn require_non_negative(value: f64, field_name: &str) -> StoreResult<()> {
    require_finite(value, field_name)?;
    if value < 0.0 {
        return Err(StoreError::Validation(format!(
            "{field_name} must be non-negative, got {value}"
        )));
    }
    Ok(())
}
