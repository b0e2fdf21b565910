//! # ucai-toolkit - Unity Catalog functions as LLM tools
//!
//! Exposes Unity Catalog functions as OpenAI/LiteLLM-compatible tool definitions:
//! - Resolution of function names and `catalog.schema.*` patterns via a catalog client
//! - JSON-schema derivation from declared SQL parameter types
//! - Tools bound to a client that execute remotely and return JSON results
//! - Dispatch of model-requested tool calls into next-turn messages
//!
//! ## Architecture
//!
//! ```text
//!   ToolkitConfig ──▶ UcFunctionToolkit ──(per function)──▶ uc_function_to_tool
//!                           │                                      │
//!                           ▼                                      ▼
//!                   FunctionClient::list_functions         Tool { definition, executor }
//!                   FunctionClient::get_function                   │ invoke
//!                                                                  ▼
//!                                                   FunctionClient::execute_function
//! ```

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod client;
pub mod tools;
pub mod types;

// Internal utilities
pub mod observability;

pub use client::{ClientContext, FunctionClient, SharedClient};
pub use tools::{FunctionSource, Tool, ToolArgs, UcFunctionToolkit};
pub use types::{Error, FunctionName, Result, ToolkitConfig};
