//! Core types for the toolkit.
//!
//! - **Names**: validated function names and wildcard patterns
//! - **Errors**: application error types with thiserror derives
//! - **Config**: toolkit and observability configuration

mod config;
mod errors;
mod names;

pub use config::{ObservabilityConfig, ToolkitConfig, LOG_FORMAT_ENV};
pub use errors::{BoxError, Error, Result};
pub use names::{FunctionName, FunctionPattern};
