//! Catalog client seam — lookup, listing, and remote execution of functions.
//!
//! The toolkit never talks to a catalog directly; everything goes through
//! [`FunctionClient`]. Hosts own the client and thread it through explicitly,
//! optionally via a [`ClientContext`] that carries a default.

pub mod memory;
pub mod types;

pub use memory::InMemoryFunctionClient;
pub use types::{
    FunctionExecutionResult, FunctionInfo, FunctionParameterInfo, FunctionParameterInfos,
    ResultFormat,
};

use crate::types::{Error, FunctionName, Result};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Catalog collaborator. Implementations are blocking and must be shareable
/// across threads; failures are reported as [`Error::Upstream`].
pub trait FunctionClient: Send + Sync {
    /// Fetch one function descriptor.
    fn get_function(&self, name: &FunctionName) -> Result<FunctionInfo>;

    /// List every function registered in `catalog.schema`.
    fn list_functions(&self, catalog: &str, schema: &str) -> Result<Vec<FunctionInfo>>;

    /// Execute a function with JSON-encoded parameters.
    fn execute_function(
        &self,
        name: &FunctionName,
        parameters: Map<String, Value>,
    ) -> Result<FunctionExecutionResult>;
}

/// Shared handle to a catalog client.
pub type SharedClient = Arc<dyn FunctionClient>;

/// Host-owned client scope. Replaces a process-wide default client: whoever
/// builds toolkits decides which default (if any) applies.
#[derive(Clone, Default)]
pub struct ClientContext {
    default_client: Option<SharedClient>,
}

impl ClientContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(client: SharedClient) -> Self {
        Self {
            default_client: Some(client),
        }
    }

    pub fn set_default(&mut self, client: SharedClient) {
        self.default_client = Some(client);
    }

    pub fn default_client(&self) -> Option<&SharedClient> {
        self.default_client.as_ref()
    }

    /// Pick the explicit client if given, else the default.
    pub fn resolve(&self, explicit: Option<SharedClient>) -> Result<SharedClient> {
        explicit
            .or_else(|| self.default_client.clone())
            .ok_or(Error::MissingClient)
    }
}

impl fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientContext")
            .field("has_default_client", &self.default_client.is_some())
            .finish()
    }
}
