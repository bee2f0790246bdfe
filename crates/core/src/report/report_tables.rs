//! Report table providers.

use std::sync::Arc;
use tracing::trace;

use super::broker_report::BrokerReport;
use super::empty_table::EmptyReportTable;
use super::report_table::ReportTable;
use crate::model::SecurityEventCashFlow;

/// All tables a broker report provides.
///
/// Implementations usually embed a [`ReportTablesBase`] and serve tables a
/// report format lacks from its cached empty table.
pub trait ReportTables: Send + Sync {
    /// Concrete report type.
    type Report: BrokerReport;

    /// The report the tables are extracted from.
    fn report(&self) -> &Arc<Self::Report>;

    /// Dividends, coupons, amortization, variation margin, taxes and fees.
    fn security_event_cash_flow_table(&self) -> Arc<dyn ReportTable<SecurityEventCashFlow>>;
}

/// Shared state of a report table provider: the report and its empty table.
///
/// The empty table is built once in [`new`](ReportTablesBase::new) and never
/// mutated, so a base is safe to share once constructed.
pub struct ReportTablesBase<R> {
    report: Arc<R>,
    empty_table: EmptyReportTable<R, ()>,
}

impl<R: BrokerReport> ReportTablesBase<R> {
    /// Creates the base for `report`.
    #[must_use]
    pub fn new(report: Arc<R>) -> Self {
        trace!(report = report.name(), "Creating report tables");
        let empty_table = EmptyReportTable::of(Arc::clone(&report));
        Self {
            report,
            empty_table,
        }
    }

    /// The report the tables are extracted from.
    #[must_use]
    pub fn report(&self) -> &Arc<R> {
        &self.report
    }

    /// The cached empty table, typed for rows of `E`.
    #[must_use]
    pub fn empty_table<E>(&self) -> EmptyReportTable<R, E> {
        self.empty_table.cast()
    }
}

impl<R> Clone for ReportTablesBase<R> {
    fn clone(&self) -> Self {
        Self {
            report: Arc::clone(&self.report),
            empty_table: self.empty_table.clone(),
        }
    }
}

impl<R: std::fmt::Debug> std::fmt::Debug for ReportTablesBase<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportTablesBase")
            .field("report", &self.report)
            .finish_non_exhaustive()
    }
}
