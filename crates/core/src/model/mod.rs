//! Cash flow records parsed from broker reports.
//!
//! - Cash flow event types
//! - Security event cash flows with natural-key deduplication and merging
//! - Error types for validation and merging

pub mod cash_flow_type;
pub mod error;
pub mod security_event_cash_flow;

#[cfg(test)]
mod security_event_cash_flow_props;

pub use cash_flow_type::CashFlowType;
pub use error::CashFlowError;
pub use security_event_cash_flow::{
    DEFAULT_CURRENCY, NaturalKey, SecurityEventCashFlow, SecurityEventCashFlowBuilder,
};
