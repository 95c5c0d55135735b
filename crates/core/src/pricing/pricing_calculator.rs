//! Pure pricing functions.
//!
//! Rates are annual percentages (`4.5` means 4.5%). Every monetary result is
//! rounded to cents, half away from zero.

use rust_decimal::{Decimal, RoundingStrategy};

use super::pricing_errors::PricingError;
use super::pricing_model::{SecurityType, Term};
use crate::constants::{ACCRUAL_DAY_COUNT_BASIS, BILL_DAY_COUNT_BASIS, MONEY_SCALE};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Round a monetary amount to cents.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Length of `term` in days.
pub fn term_duration_days(term: &str) -> Result<i64, PricingError> {
    Ok(term.parse::<Term>()?.duration_days())
}

/// Security type for `term`.
pub fn security_type(term: &str) -> Result<SecurityType, PricingError> {
    Ok(term.parse::<Term>()?.security_type())
}

fn ensure_positive(value: Decimal, name: &str) -> Result<(), PricingError> {
    if value <= Decimal::ZERO {
        return Err(PricingError::InvalidInput(format!(
            "{} must be greater than 0, got: {}",
            name, value
        )));
    }
    Ok(())
}

fn ensure_rate(yield_rate: Decimal) -> Result<(), PricingError> {
    if yield_rate < Decimal::ZERO || yield_rate > HUNDRED {
        return Err(PricingError::InvalidInput(format!(
            "yield rate must be between 0 and 100, got: {}",
            yield_rate
        )));
    }
    Ok(())
}

/// Discounted purchase price of a bill on the 360-day basis.
///
/// `price = face_value * (1 - (yield / 100 * days) / 360)`
pub fn bill_price(face_value: Decimal, yield_rate: Decimal, term: &str) -> Result<Decimal, PricingError> {
    let term = term.parse::<Term>()?;
    let kind = term.security_type();
    if kind != SecurityType::Bill {
        return Err(PricingError::InvalidSecurityType(format!(
            "bill pricing only applies to Treasury Bills (1M-1Y); {} is a {}",
            term, kind
        )));
    }
    ensure_positive(face_value, "face value")?;
    ensure_rate(yield_rate)?;

    let days = Decimal::from(term.duration_days());
    let discount_factor = (yield_rate / HUNDRED * days) / Decimal::from(BILL_DAY_COUNT_BASIS);
    Ok(round2(face_value * (Decimal::ONE - discount_factor)))
}

/// Discount captured by buying a bill below face value.
pub fn bill_discount(face_value: Decimal, purchase_price: Decimal) -> Decimal {
    round2(face_value - purchase_price)
}

/// Notes and bonds are bought at par.
pub fn note_bond_price(
    face_value: Decimal,
    yield_rate: Decimal,
    term: &str,
) -> Result<Decimal, PricingError> {
    ensure_positive(face_value, "face value")?;
    ensure_rate(yield_rate)?;

    let term = term.parse::<Term>()?;
    if term.security_type() == SecurityType::Bill {
        return Err(PricingError::InvalidSecurityType(format!(
            "invalid Note/Bond term: {} (must be 2Y, 5Y, 10Y, or 30Y)",
            term
        )));
    }
    Ok(round2(face_value))
}

/// Principal plus simple interest accrued over `days_held` on a 365-day basis.
pub fn maturity_value(
    principal: Decimal,
    yield_rate: Decimal,
    days_held: i64,
) -> Result<Decimal, PricingError> {
    ensure_positive(principal, "principal")?;
    ensure_rate(yield_rate)?;
    if days_held < 0 {
        return Err(PricingError::InvalidInput(format!(
            "days held must be non-negative, got: {}",
            days_held
        )));
    }

    let overflow = || {
        PricingError::InvalidInput(format!(
            "maturity value of {} over {} days is out of range",
            principal, days_held
        ))
    };
    let interest = principal
        .checked_mul(yield_rate / HUNDRED)
        .and_then(|v| v.checked_mul(Decimal::from(days_held)))
        .and_then(|v| v.checked_div(Decimal::from(ACCRUAL_DAY_COUNT_BASIS)))
        .ok_or_else(overflow)?;
    principal.checked_add(interest).map(round2).ok_or_else(overflow)
}

/// Price to pay for `face_value` of `term` at `yield_rate`.
pub fn purchase_price(
    face_value: Decimal,
    yield_rate: Decimal,
    term: Term,
) -> Result<Decimal, PricingError> {
    match term.security_type() {
        SecurityType::Bill => bill_price(face_value, yield_rate, term.as_str()),
        SecurityType::Note | SecurityType::Bond => {
            note_bond_price(face_value, yield_rate, term.as_str())
        }
    }
}
