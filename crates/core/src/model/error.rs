//! Cash flow record errors.

use broker_report_shared::AppError;
use thiserror::Error;

use super::security_event_cash_flow::SecurityEventCashFlow;

/// Errors raised by cash flow validation and duplicate merging.
#[derive(Debug, Error)]
pub enum CashFlowError {
    /// Duplicates carry different currencies.
    #[error("Cannot merge security cash flows, currencies differ: {first} and {second}")]
    CurrencyMismatch {
        /// First operand of the merge.
        first: Box<SecurityEventCashFlow>,
        /// Second operand of the merge.
        second: Box<SecurityEventCashFlow>,
    },

    /// Duplicates carry different security counts.
    #[error("Cannot merge security cash flows, security counts differ: {first} and {second}")]
    CountMismatch {
        /// First operand of the merge.
        first: Box<SecurityEventCashFlow>,
        /// Second operand of the merge.
        second: Box<SecurityEventCashFlow>,
    },

    /// Summed value does not fit the decimal range.
    #[error("Cannot merge security cash flows, value overflow: {first} and {second}")]
    ValueOverflow {
        /// First operand of the merge.
        first: Box<SecurityEventCashFlow>,
        /// Second operand of the merge.
        second: Box<SecurityEventCashFlow>,
    },

    /// Portfolio is empty.
    #[error("Portfolio must not be empty: {0}")]
    EmptyPortfolio(Box<SecurityEventCashFlow>),
}

impl CashFlowError {
    /// Returns the stable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::CountMismatch { .. } => "COUNT_MISMATCH",
            Self::ValueOverflow { .. } => "VALUE_OVERFLOW",
            Self::EmptyPortfolio(_) => "EMPTY_PORTFOLIO",
        }
    }

    /// Returns true if the error comes from merging two duplicates.
    #[must_use]
    pub fn is_merge_conflict(&self) -> bool {
        matches!(
            self,
            Self::CurrencyMismatch { .. }
                | Self::CountMismatch { .. }
                | Self::ValueOverflow { .. }
        )
    }
}

impl From<CashFlowError> for AppError {
    fn from(err: CashFlowError) -> Self {
        if err.is_merge_conflict() {
            Self::MergeConflict(err.to_string())
        } else {
            Self::Validation(err.to_string())
        }
    }
}
