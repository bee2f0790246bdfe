//! Broker report handle.

use std::fmt;

/// A broker report opened for parsing.
///
/// Tables extracted from a report keep a shared reference to it.
pub trait BrokerReport: fmt::Debug + Send + Sync {
    /// Report name, usually the source file name.
    fn name(&self) -> &str;
}
