//! Security event cash flow record.
//!
//! Dividends, coupons, amortization, variation margin, taxes and fees
//! paid or charged for a security held in a portfolio.

use broker_report_shared::types::{CashFlowId, SecurityId};
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::cash_flow_type::CashFlowType;
use super::error::CashFlowError;

/// Currency assumed when a record is built without one.
pub const DEFAULT_CURRENCY: &str = "RUR";

fn default_currency() -> Option<String> {
    Some(DEFAULT_CURRENCY.to_string())
}

/// A cash flow event tied to a security.
///
/// Immutable once built. Use [`SecurityEventCashFlow::to_builder`] to derive a
/// modified copy, e.g. to attach the id assigned by storage.
///
/// Full equality covers every field. Deduplication uses the narrower
/// [`natural key`](SecurityEventCashFlow::natural_key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SecurityEventCashFlow {
    #[serde(default)]
    id: Option<CashFlowId>,
    portfolio: String,
    timestamp: DateTime<Utc>,
    security: SecurityId,
    #[serde(default)]
    count: Option<i32>,
    #[serde(rename = "event-type")]
    event_type: CashFlowType,
    value: Decimal,
    #[serde(default = "default_currency")]
    currency: Option<String>,
}

/// Borrowed natural key of a cash flow.
///
/// Mirrors the storage unique index: `(portfolio, timestamp, event_type, security)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NaturalKey<'a> {
    /// Broker account number.
    pub portfolio: &'a str,
    /// Event instant.
    pub timestamp: DateTime<Utc>,
    /// Event type.
    pub event_type: CashFlowType,
    /// Instrument.
    pub security: SecurityId,
}

impl SecurityEventCashFlow {
    /// Starts a builder with the required fields.
    ///
    /// Currency defaults to [`DEFAULT_CURRENCY`]; id and count default to absent.
    #[must_use]
    pub fn builder(
        portfolio: impl Into<String>,
        timestamp: DateTime<Utc>,
        security: impl Into<SecurityId>,
        event_type: CashFlowType,
        value: Decimal,
    ) -> SecurityEventCashFlowBuilder {
        SecurityEventCashFlowBuilder {
            id: None,
            portfolio: portfolio.into(),
            timestamp,
            security: security.into(),
            count: None,
            event_type,
            value,
            currency: default_currency(),
        }
    }

    /// Returns a builder initialised from this record.
    #[must_use]
    pub fn to_builder(&self) -> SecurityEventCashFlowBuilder {
        SecurityEventCashFlowBuilder {
            id: self.id,
            portfolio: self.portfolio.clone(),
            timestamp: self.timestamp,
            security: self.security,
            count: self.count,
            event_type: self.event_type,
            value: self.value,
            currency: self.currency.clone(),
        }
    }

    /// Internal record id, absent until stored.
    #[must_use]
    pub fn id(&self) -> Option<CashFlowId> {
        self.id
    }

    /// Broker account number, e.g. `"10200I"`.
    #[must_use]
    pub fn portfolio(&self) -> &str {
        &self.portfolio
    }

    /// Event instant.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Instrument id.
    #[must_use]
    pub fn security(&self) -> SecurityId {
        self.security
    }

    /// Number of securities (contracts).
    #[must_use]
    pub fn count(&self) -> Option<i32> {
        self.count
    }

    /// Event type.
    #[must_use]
    pub fn event_type(&self) -> CashFlowType {
        self.event_type
    }

    /// Amount.
    #[must_use]
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Currency code.
    #[must_use]
    pub fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    /// Returns the natural key used for deduplication.
    #[must_use]
    pub fn natural_key(&self) -> NaturalKey<'_> {
        NaturalKey {
            portfolio: &self.portfolio,
            timestamp: self.timestamp,
            event_type: self.event_type,
            security: self.security,
        }
    }

    /// Checks field constraints not enforced by construction.
    pub fn validate(&self) -> Result<(), CashFlowError> {
        if self.portfolio.is_empty() {
            return Err(CashFlowError::EmptyPortfolio(Box::new(self.clone())));
        }
        Ok(())
    }

    /// Returns true if both records violate the storage unique index together,
    /// i.e. they describe the same event.
    ///
    /// Value, count, currency and id are ignored.
    #[must_use]
    pub fn check_equality(first: &Self, second: &Self) -> bool {
        first.natural_key() == second.natural_key()
    }

    /// Merges two records equal by [`check_equality`](Self::check_equality).
    ///
    /// The result is `first` with the values summed. Currency and count must match;
    /// an absent count never matches a present one.
    pub fn merge_duplicates(first: &Self, second: &Self) -> Result<Vec<Self>, CashFlowError> {
        if first.currency != second.currency {
            return Err(CashFlowError::CurrencyMismatch {
                first: Box::new(first.clone()),
                second: Box::new(second.clone()),
            });
        }
        if first.count != second.count {
            return Err(CashFlowError::CountMismatch {
                first: Box::new(first.clone()),
                second: Box::new(second.clone()),
            });
        }
        let Some(value) = first.value.checked_add(second.value) else {
            return Err(CashFlowError::ValueOverflow {
                first: Box::new(first.clone()),
                second: Box::new(second.clone()),
            });
        };

        debug!(
            portfolio = %first.portfolio,
            security = %first.security,
            event_type = %first.event_type,
            %value,
            "Merged duplicate security cash flows"
        );
        Ok(vec![first.to_builder().value(value).build()])
    }
}

impl fmt::Display for SecurityEventCashFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn or_null<T: fmt::Display>(value: Option<T>) -> String {
            value.map_or_else(|| "null".to_string(), |v| v.to_string())
        }

        write!(
            f,
            "SecurityEventCashFlow(id={}, portfolio={}, timestamp={}, security={}, count={}, \
             eventType={}, value={}, currency={})",
            or_null(self.id),
            self.portfolio,
            self.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            self.security,
            or_null(self.count),
            self.event_type,
            self.value,
            or_null(self.currency.as_deref()),
        )
    }
}

/// Builder for [`SecurityEventCashFlow`].
#[derive(Debug, Clone)]
pub struct SecurityEventCashFlowBuilder {
    id: Option<CashFlowId>,
    portfolio: String,
    timestamp: DateTime<Utc>,
    security: SecurityId,
    count: Option<i32>,
    event_type: CashFlowType,
    value: Decimal,
    currency: Option<String>,
}

impl SecurityEventCashFlowBuilder {
    /// Sets or clears the storage id.
    #[must_use]
    pub fn id(mut self, id: impl Into<Option<CashFlowId>>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the portfolio.
    #[must_use]
    pub fn portfolio(mut self, portfolio: impl Into<String>) -> Self {
        self.portfolio = portfolio.into();
        self
    }

    /// Sets the event instant.
    #[must_use]
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Sets the instrument.
    #[must_use]
    pub fn security(mut self, security: impl Into<SecurityId>) -> Self {
        self.security = security.into();
        self
    }

    /// Sets or clears the number of securities.
    #[must_use]
    pub fn count(mut self, count: impl Into<Option<i32>>) -> Self {
        self.count = count.into();
        self
    }

    /// Sets the event type.
    #[must_use]
    pub fn event_type(mut self, event_type: CashFlowType) -> Self {
        self.event_type = event_type;
        self
    }

    /// Sets the amount.
    #[must_use]
    pub fn value(mut self, value: Decimal) -> Self {
        self.value = value;
        self
    }

    /// Sets the currency code.
    #[must_use]
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Clears the currency.
    #[must_use]
    pub fn no_currency(mut self) -> Self {
        self.currency = None;
        self
    }

    /// Builds the record.
    #[must_use]
    pub fn build(self) -> SecurityEventCashFlow {
        SecurityEventCashFlow {
            id: self.id,
            portfolio: self.portfolio,
            timestamp: self.timestamp,
            security: self.security,
            count: self.count,
            event_type: self.event_type,
            value: self.value,
            currency: self.currency,
        }
    }
}
