//! Shared types, errors, and configuration for the broker report parser.
//!
//! This crate provides common types used across all other crates:
//! - Typed integer ids for records and instruments
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
