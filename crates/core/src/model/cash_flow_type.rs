//! Cash flow event types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a cash flow event.
///
/// Each variant has a stable numeric code used as the storage key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CashFlowType {
    /// Cash deposit or withdrawal.
    Cash,
    /// Clean price of a security, without accrued interest.
    Price,
    /// Accrued coupon interest.
    AccruedInterest,
    /// Bond amortization.
    Amortization,
    /// Bond redemption.
    Redemption,
    /// Coupon payment.
    Coupon,
    /// Dividend payment.
    Dividend,
    /// Derivative variation margin.
    DerivativeProfit,
    /// Derivative contract price.
    DerivativePrice,
    /// Derivative contract quote.
    DerivativeQuote,
    /// Broker or exchange commission.
    Fee,
    /// Tax.
    Tax,
}

impl CashFlowType {
    /// All event types in code order.
    pub const ALL: [Self; 12] = [
        Self::Cash,
        Self::Price,
        Self::AccruedInterest,
        Self::Amortization,
        Self::Redemption,
        Self::Coupon,
        Self::Dividend,
        Self::DerivativeProfit,
        Self::DerivativePrice,
        Self::DerivativeQuote,
        Self::Fee,
        Self::Tax,
    ];

    /// Returns the storage code.
    #[must_use]
    pub const fn id(self) -> i32 {
        match self {
            Self::Cash => 1,
            Self::Price => 2,
            Self::AccruedInterest => 3,
            Self::Amortization => 4,
            Self::Redemption => 5,
            Self::Coupon => 6,
            Self::Dividend => 7,
            Self::DerivativeProfit => 8,
            Self::DerivativePrice => 9,
            Self::DerivativeQuote => 10,
            Self::Fee => 11,
            Self::Tax => 12,
        }
    }

    /// Looks up an event type by storage code.
    #[must_use]
    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    /// Returns the wire name, e.g. `"DIVIDEND"`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "CASH",
            Self::Price => "PRICE",
            Self::AccruedInterest => "ACCRUED_INTEREST",
            Self::Amortization => "AMORTIZATION",
            Self::Redemption => "REDEMPTION",
            Self::Coupon => "COUPON",
            Self::Dividend => "DIVIDEND",
            Self::DerivativeProfit => "DERIVATIVE_PROFIT",
            Self::DerivativePrice => "DERIVATIVE_PRICE",
            Self::DerivativeQuote => "DERIVATIVE_QUOTE",
            Self::Fee => "FEE",
            Self::Tax => "TAX",
        }
    }

    /// Parses an event type from its wire name, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        let upper = s.trim().to_uppercase();
        Self::ALL.into_iter().find(|t| t.as_str() == upper)
    }
}

impl fmt::Display for CashFlowType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_and_round_trip() {
        for (i, event_type) in CashFlowType::ALL.into_iter().enumerate() {
            assert_eq!(usize::try_from(event_type.id()).unwrap(), i + 1);
            assert_eq!(CashFlowType::from_id(event_type.id()), Some(event_type));
        }
        assert_eq!(CashFlowType::from_id(0), None);
        assert_eq!(CashFlowType::from_id(13), None);
    }

    #[test]
    fn test_wire_name_matches_serde() {
        for event_type in CashFlowType::ALL {
            let json = serde_json::to_string(&event_type).unwrap();
            assert_eq!(json, format!("\"{}\"", event_type.as_str()));
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!(CashFlowType::parse("DIVIDEND"), Some(CashFlowType::Dividend));
        assert_eq!(
            CashFlowType::parse("derivative_profit"),
            Some(CashFlowType::DerivativeProfit)
        );
        assert_eq!(CashFlowType::parse(" tax "), Some(CashFlowType::Tax));
        assert_eq!(CashFlowType::parse("bonus"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(CashFlowType::AccruedInterest.to_string(), "ACCRUED_INTEREST");
    }
}
