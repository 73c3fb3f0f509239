//! Field validation for operator input
//!
//! Keeps the same contract everywhere: `Ok(())` or a static message suitable
//! for printing straight back at the prompt.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Validate a plot name (non-empty after trimming)
pub fn validate_plot_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Plot name must not be empty");
    }
    Ok(())
}

/// Validate a plot area in hectares (strictly positive)
pub fn validate_area_ha(area: Decimal) -> Result<(), &'static str> {
    if area <= Decimal::ZERO {
        return Err("Area must be greater than zero");
    }
    Ok(())
}

/// Validate a harvested weight in tonnes (non-negative)
pub fn validate_weight_t(weight: Decimal) -> Result<(), &'static str> {
    if weight < Decimal::ZERO {
        return Err("Harvested weight cannot be negative");
    }
    Ok(())
}

/// Validate an estimated loss percentage (0-100)
pub fn validate_loss_pct(loss: Decimal) -> Result<(), &'static str> {
    if loss < Decimal::ZERO || loss > Decimal::from(100) {
        return Err("Loss percentage must be between 0 and 100");
    }
    Ok(())
}

/// Parse an operation date in YYYY-MM-DD form
pub fn parse_operation_date(input: &str) -> Result<NaiveDate, &'static str> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| "Date must be in YYYY-MM-DD form")
}
