use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::errors::PaymentError;
use crate::models::payment::MAX_AMOUNT;
use crate::models::PaymentBreakdown;

/// 5% of the post-discount subtotal.
pub const PLATFORM_FEE_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);
/// 8% of the post-discount subtotal.
pub const TAX_RATE: Decimal = Decimal::from_parts(8, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discount {
    Percent(Decimal),
    Flat(Decimal),
}

impl Discount {
    /// Reduction for `base`, never more than `base` itself.
    pub fn amount_off(&self, base: Decimal) -> Decimal {
        match self {
            Discount::Percent(rate) => base * *rate,
            Discount::Flat(amount) => (*amount).min(base),
        }
    }
}

/// Codes are matched after trimming and upper-casing.
pub fn lookup_discount(code: &str) -> Option<Discount> {
    match code.trim().to_ascii_uppercase().as_str() {
        "WEDDING10" => Some(Discount::Percent(Decimal::from_parts(10, 0, 0, false, 2))),
        "WEDDING20" => Some(Discount::Percent(Decimal::from_parts(20, 0, 0, false, 2))),
        "WELCOME" => Some(Discount::Flat(Decimal::from_parts(50, 0, 0, false, 0))),
        _ => None,
    }
}

pub fn calculate(
    base_amount: Decimal,
    discount_code: Option<&str>,
    apply_tax: bool,
) -> Result<PaymentBreakdown, PaymentError> {
    if base_amount <= Decimal::ZERO {
        return Err(PaymentError::InvalidAmount(format!(
            "base amount must be greater than zero, got {base_amount}"
        )));
    }
    if base_amount > MAX_AMOUNT {
        return Err(PaymentError::InvalidAmount(format!(
            "base amount must not exceed {MAX_AMOUNT}, got {base_amount}"
        )));
    }

    let overflow = || PaymentError::InvalidAmount(format!("{base_amount} is out of range"));

    let discount_amount = discount_code
        .and_then(lookup_discount)
        .map(|d| d.amount_off(base_amount))
        .unwrap_or(Decimal::ZERO);

    let subtotal = base_amount.checked_sub(discount_amount).ok_or_else(overflow)?;
    let platform_fee = subtotal.checked_mul(PLATFORM_FEE_RATE).ok_or_else(overflow)?;
    let tax_amount = if apply_tax {
        subtotal.checked_mul(TAX_RATE).ok_or_else(overflow)?
    } else {
        Decimal::ZERO
    };
    let total_amount = subtotal
        .checked_add(platform_fee)
        .and_then(|t| t.checked_add(tax_amount))
        .ok_or_else(overflow)?;

    Ok(PaymentBreakdown {
        base_amount,
        discount_amount,
        subtotal,
        platform_fee,
        tax_amount,
        total_amount,
    })
}

/// Converts a float amount from an untyped caller, rejecting NaN and infinities.
pub fn amount_from_f64(value: f64) -> Result<Decimal, PaymentError> {
    if !value.is_finite() {
        return Err(PaymentError::InvalidAmount(format!("{value} is not a number")));
    }
    Decimal::from_f64(value)
        .ok_or_else(|| PaymentError::InvalidAmount(format!("{value} is out of range")))
}
