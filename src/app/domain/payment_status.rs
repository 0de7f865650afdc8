use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Billing state of a milestone.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, sqlx::Type,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[sqlx(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Unpaid,
    Partial,
    Paid,
}

impl PaymentStatus {
    /// The amount actually received for a milestone in this state.
    ///
    /// PAID counts the full price whatever `payment_amount` says. PARTIAL counts
    /// `payment_amount` as stored, without capping it at the price.
    pub fn paid_amount(self, price: Option<Decimal>, payment_amount: Option<Decimal>) -> Decimal {
        match self {
            PaymentStatus::Paid => price.unwrap_or(Decimal::ZERO),
            PaymentStatus::Partial => payment_amount.unwrap_or(Decimal::ZERO),
            PaymentStatus::Unpaid => Decimal::ZERO,
        }
    }
}
