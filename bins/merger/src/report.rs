//! Cash flows exported as a JSON array, served as a broker report.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use broker_report_core::model::SecurityEventCashFlow;
use broker_report_core::report::{
    BrokerReport, DuplicatePolicy, InMemoryReportTable, ReportTable, ReportTables,
    ReportTablesBase,
};
use broker_report_shared::{AppError, AppResult};
use tracing::debug;

/// A JSON file holding an array of security event cash flows.
#[derive(Debug)]
pub struct JsonReport {
    name: String,
    cash_flows: Vec<SecurityEventCashFlow>,
}

impl JsonReport {
    /// Reads and parses a report file.
    pub fn open(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Io(format!("{}: {e}", path.display())))?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self::parse(name, &content)
    }

    /// Parses report content.
    pub fn parse(name: impl Into<String>, json: &str) -> AppResult<Self> {
        let name = name.into();
        let cash_flows: Vec<SecurityEventCashFlow> =
            serde_json::from_str(json).map_err(|e| AppError::Parse(format!("{name}: {e}")))?;
        debug!(report = %name, rows = cash_flows.len(), "Parsed JSON report");
        Ok(Self { name, cash_flows })
    }
}

impl BrokerReport for JsonReport {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Tables of a [`JsonReport`].
pub struct JsonReportTables {
    base: ReportTablesBase<JsonReport>,
    cash_flows: Option<Arc<InMemoryReportTable<JsonReport, SecurityEventCashFlow>>>,
}

impl JsonReportTables {
    /// Builds the tables, merging duplicate cash flows according to `policy`.
    pub fn new(report: JsonReport, policy: DuplicatePolicy) -> AppResult<Self> {
        let base = ReportTablesBase::new(Arc::new(report));
        let report = base.report();
        let cash_flows = if report.cash_flows.is_empty() {
            None
        } else {
            let table = InMemoryReportTable::security_event_cash_flows(
                Arc::clone(report),
                report.cash_flows.iter().cloned(),
                policy,
            )?;
            Some(Arc::new(table))
        };
        Ok(Self { base, cash_flows })
    }
}

impl ReportTables for JsonReportTables {
    type Report = JsonReport;

    fn report(&self) -> &Arc<JsonReport> {
        self.base.report()
    }

    fn security_event_cash_flow_table(&self) -> Arc<dyn ReportTable<SecurityEventCashFlow>> {
        match &self.cash_flows {
            Some(table) => Arc::clone(table) as Arc<dyn ReportTable<SecurityEventCashFlow>>,
            None => Arc::new(self.base.empty_table::<SecurityEventCashFlow>()),
        }
    }
}
