//! Empty report table.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use super::broker_report::BrokerReport;
use super::report_table::ReportTable;

/// A table with no rows, bound to a report.
///
/// Holds no rows, so one instance can be re-typed for any row type with
/// [`cast`](EmptyReportTable::cast) at the cost of an `Arc` clone.
pub struct EmptyReportTable<R, E> {
    report: Arc<R>,
    rows: PhantomData<fn() -> E>,
}

impl<R: BrokerReport, E> EmptyReportTable<R, E> {
    /// Creates the empty table of `report`.
    #[must_use]
    pub fn of(report: Arc<R>) -> Self {
        Self {
            report,
            rows: PhantomData,
        }
    }

    /// Returns the same empty table typed for rows of `F`.
    #[must_use]
    pub fn cast<F>(&self) -> EmptyReportTable<R, F> {
        EmptyReportTable {
            report: Arc::clone(&self.report),
            rows: PhantomData,
        }
    }

    /// The report as its concrete type.
    #[must_use]
    pub fn broker_report(&self) -> &Arc<R> {
        &self.report
    }
}

impl<R: BrokerReport, E> ReportTable<E> for EmptyReportTable<R, E> {
    fn report(&self) -> &dyn BrokerReport {
        self.report.as_ref()
    }

    fn data(&self) -> &[E] {
        &[]
    }
}

impl<R, E> Clone for EmptyReportTable<R, E> {
    fn clone(&self) -> Self {
        Self {
            report: Arc::clone(&self.report),
            rows: PhantomData,
        }
    }
}

impl<R: fmt::Debug, E> fmt::Debug for EmptyReportTable<R, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmptyReportTable")
            .field("report", &self.report)
            .finish()
    }
}
