//! Broker report and report table contracts.
//!
//! - `BrokerReport` handle shared by every table of a report
//! - `ReportTable` rows, in-memory and empty implementations
//! - `ReportTables` providers and their shared base
//! - Duplicate folding for table rows

pub mod broker_report;
pub mod empty_table;
pub mod report_table;
pub mod report_tables;
pub mod table_helper;

pub use broker_report::BrokerReport;
pub use empty_table::EmptyReportTable;
pub use report_table::{InMemoryReportTable, ReportTable};
pub use report_tables::{ReportTables, ReportTablesBase};
pub use table_helper::{DuplicatePolicy, add_with_equality_checker, collect_without_duplicates};
