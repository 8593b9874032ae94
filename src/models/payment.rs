use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Largest amount accepted for a quote or a booking: one trillion.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Monetary breakdown of a payment. Values are kept at full precision until
/// `rounded` is called for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBreakdown {
    pub base_amount: Decimal,
    pub discount_amount: Decimal,
    pub subtotal: Decimal,
    pub platform_fee: Decimal,
    pub tax_amount: Decimal,
    pub total_amount: Decimal,
}

impl PaymentBreakdown {
    /// Two-place, half-up copy for display.
    pub fn rounded(&self) -> Self {
        Self {
            base_amount: to_cents(self.base_amount),
            discount_amount: to_cents(self.discount_amount),
            subtotal: to_cents(self.subtotal),
            platform_fee: to_cents(self.platform_fee),
            tax_amount: to_cents(self.tax_amount),
            total_amount: to_cents(self.total_amount),
        }
    }
}

fn to_cents(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub base_amount: Decimal,
    #[serde(default)]
    pub discount_code: Option<String>,
    #[serde(default)]
    pub apply_tax: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuoteSource {
    Remote,
    Local,
    LocalFallback,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentQuote {
    #[serde(flatten)]
    pub breakdown: PaymentBreakdown,
    pub source: QuoteSource,
}
