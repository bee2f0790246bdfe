//! Report tables: rows of one kind extracted from a broker report.

use std::fmt;
use std::sync::Arc;

use super::broker_report::BrokerReport;
use super::table_helper::{DuplicatePolicy, collect_without_duplicates};
use crate::model::{CashFlowError, SecurityEventCashFlow};

/// A table of rows of type `E` extracted from a broker report.
pub trait ReportTable<E>: Send + Sync {
    /// The report this table was extracted from.
    fn report(&self) -> &dyn BrokerReport;

    /// Table rows.
    fn data(&self) -> &[E];

    /// Number of rows.
    fn len(&self) -> usize {
        self.data().len()
    }

    /// Returns true if the table has no rows.
    fn is_empty(&self) -> bool {
        self.data().is_empty()
    }
}

/// A report table whose rows are already parsed and held in memory.
pub struct InMemoryReportTable<R, E> {
    report: Arc<R>,
    rows: Vec<E>,
}

impl<R: BrokerReport, E> InMemoryReportTable<R, E> {
    /// Creates a table from parsed rows, as is.
    #[must_use]
    pub fn new(report: Arc<R>, rows: Vec<E>) -> Self {
        Self { report, rows }
    }

    /// Returns the rows, consuming the table.
    #[must_use]
    pub fn into_rows(self) -> Vec<E> {
        self.rows
    }
}

impl<R: BrokerReport> InMemoryReportTable<R, SecurityEventCashFlow> {
    /// Creates a cash flow table, merging events that appear more than once.
    pub fn security_event_cash_flows(
        report: Arc<R>,
        rows: impl IntoIterator<Item = SecurityEventCashFlow>,
        policy: DuplicatePolicy,
    ) -> Result<Self, CashFlowError> {
        let rows = collect_without_duplicates(
            rows,
            policy,
            SecurityEventCashFlow::check_equality,
            SecurityEventCashFlow::merge_duplicates,
        )?;
        Ok(Self::new(report, rows))
    }
}

impl<R: BrokerReport, E: Send + Sync> ReportTable<E> for InMemoryReportTable<R, E> {
    fn report(&self) -> &dyn BrokerReport {
        self.report.as_ref()
    }

    fn data(&self) -> &[E] {
        &self.rows
    }
}

impl<R: BrokerReport, E> fmt::Debug for InMemoryReportTable<R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryReportTable")
            .field("report", &self.report)
            .field("rows", &self.rows.len())
            .finish()
    }
}
