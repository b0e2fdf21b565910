//! In-memory catalog client.
//!
//! Holds descriptors in registration order and executes functions through
//! registered Rust handlers. Used by embedding hosts, the CLI (catalog snapshot
//! files), and tests.

use super::{FunctionClient, FunctionExecutionResult, FunctionInfo};
use crate::types::{Error, FunctionName, Result};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Handler backing one function. `Err` becomes the result's `error` field.
pub type FunctionHandler =
    Arc<dyn Fn(&Map<String, Value>) -> std::result::Result<Value, String> + Send + Sync>;

struct Entry {
    info: FunctionInfo,
    handler: Option<FunctionHandler>,
}

#[derive(Default)]
pub struct InMemoryFunctionClient {
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl InMemoryFunctionClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a catalog snapshot: a JSON array of function descriptors.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let infos: Vec<FunctionInfo> = serde_json::from_str(s)?;
        let mut client = Self::new();
        for info in infos {
            client.register(info)?;
        }
        Ok(client)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Register a descriptor without an implementation.
    pub fn register(&mut self, info: FunctionInfo) -> Result<()> {
        self.insert(info, None)
    }

    /// Register a descriptor together with the handler that executes it.
    pub fn register_with_handler<F>(&mut self, info: FunctionInfo, handler: F) -> Result<()>
    where
        F: Fn(&Map<String, Value>) -> std::result::Result<Value, String> + Send + Sync + 'static,
    {
        self.insert(info, Some(Arc::new(handler)))
    }

    fn insert(&mut self, info: FunctionInfo, handler: Option<FunctionHandler>) -> Result<()> {
        let key = info.function_name()?.to_string();
        let entry = Entry { info, handler };
        match self.index.get(&key) {
            Some(&i) => self.entries[i] = entry,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(entry);
            }
        }
        Ok(())
    }

    fn entry(&self, name: &FunctionName) -> Result<&Entry> {
        self.index
            .get(name.as_str())
            .map(|&i| &self.entries[i])
            .ok_or_else(|| Error::upstream(format!("function '{}' does not exist", name)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FunctionClient for InMemoryFunctionClient {
    fn get_function(&self, name: &FunctionName) -> Result<FunctionInfo> {
        Ok(self.entry(name)?.info.clone())
    }

    fn list_functions(&self, catalog: &str, schema: &str) -> Result<Vec<FunctionInfo>> {
        Ok(self
            .entries
            .iter()
            .filter(|e| e.info.catalog_name == catalog && e.info.schema_name == schema)
            .map(|e| e.info.clone())
            .collect())
    }

    fn execute_function(
        &self,
        name: &FunctionName,
        parameters: Map<String, Value>,
    ) -> Result<FunctionExecutionResult> {
        let handler = self.entry(name)?.handler.as_ref().ok_or_else(|| {
            Error::upstream(format!("function '{}' has no registered handler", name))
        })?;

        tracing::debug!("Executing in-memory function {}", name);
        Ok(match handler(&parameters) {
            Ok(Value::String(s)) => FunctionExecutionResult::scalar(s),
            Ok(value) => FunctionExecutionResult::scalar(value.to_string()),
            Err(e) => FunctionExecutionResult::failed(e),
        })
    }
}

impl fmt::Debug for InMemoryFunctionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryFunctionClient")
            .field("functions", &self.index.keys().collect::<Vec<_>>())
            .finish()
    }
}
