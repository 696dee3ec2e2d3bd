//! Input validation shared by every boundary that accepts ledger input.
//!
//! The access-code format law and the balance rounding rule live here so
//! the db and api crates cannot drift apart on either.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

/// Access codes are exactly 6 to 10 ASCII digits.
static ACCESS_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6,10}$").expect("access code regex is valid"));

/// Check an access code against the format law (`^\d{6,10}$`, ASCII digits
/// as in the original JavaScript `\d`; the regex crate's `\d` is
/// Unicode-aware, hence the explicit `[0-9]`).
pub fn is_valid_access_code(code: &str) -> bool {
    ACCESS_CODE_RE.is_match(code)
}

/// Validate an access code, returning a [`CoreError::Validation`] with the
/// user-facing message on failure.
pub fn validate_access_code(code: &str) -> Result<(), CoreError> {
    if is_valid_access_code(code) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "Access code must be 6 to 10 digits".to_string(),
        ))
    }
}

/// Validate an hour delta for the balance adjustment operation.
///
/// Zero, NaN, and infinite deltas are rejected; any other signed value is
/// accepted -- there is no business limit on how far a balance may swing.
pub fn validate_delta(delta: f64) -> Result<(), CoreError> {
    if delta == 0.0 || !delta.is_finite() {
        return Err(CoreError::Validation(
            "Delta must be a non-zero number of hours".to_string(),
        ));
    }
    Ok(())
}

/// Round a balance to one decimal place, half-up.
///
/// Half-up means 0.05 rounds away from zero for positive values and toward
/// zero for negative ones (floor of `x * 10 + 0.5`), which is how every
/// stored balance and movement delta in the ledger is normalized.
pub fn round1(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}
