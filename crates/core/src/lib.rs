//! Broker report parser API: cash flow records and report table contracts.
//!
//! This crate contains pure domain logic with ZERO file, database or web dependencies.
//!
//! # Modules
//!
//! - `model` - Security event cash flows, their natural key and duplicate merging
//! - `report` - Broker report, report table and table provider contracts

pub mod model;
pub mod report;
