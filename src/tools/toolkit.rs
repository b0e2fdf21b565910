//! UC function toolkit — pattern resolution and tool aggregation.
//!
//! A toolkit is built once from a [`ToolkitConfig`]: patterns are validated,
//! the client is resolved, wildcards are expanded through the client, and every
//! resolved function is converted to a [`Tool`]. Any failure aborts the build,
//! so a toolkit value always holds the complete set.

use crate::client::{ClientContext, SharedClient};
use crate::types::{FunctionName, FunctionPattern, Result, ToolkitConfig};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

use super::tool::{FunctionSource, Tool};

/// Resolved tools keyed by fully-qualified function name, in resolution order.
pub struct UcFunctionToolkit {
    function_names: Vec<String>,
    client: SharedClient,
    tools: Vec<Tool>,
    index: HashMap<FunctionName, usize>,
}

impl UcFunctionToolkit {
    /// Build a toolkit with an explicit client.
    pub fn new(config: ToolkitConfig, client: SharedClient) -> Result<Self> {
        Self::build(config, Some(client), &ClientContext::new())
    }

    /// Build a toolkit, falling back to the context's default client.
    pub fn with_context(
        config: ToolkitConfig,
        client: Option<SharedClient>,
        context: &ClientContext,
    ) -> Result<Self> {
        Self::build(config, client, context)
    }

    fn build(
        config: ToolkitConfig,
        client: Option<SharedClient>,
        context: &ClientContext,
    ) -> Result<Self> {
        let patterns = config.validate()?;
        let client = context.resolve(client)?;

        let mut tools = Vec::new();
        let mut index = HashMap::new();

        for pattern in &patterns {
            match pattern {
                FunctionPattern::Exact(requested) => {
                    // Skips the refetch only; the catalog may canonicalize the name.
                    if index.contains_key(requested) {
                        continue;
                    }
                    let tool = Self::uc_function_to_tool(&client, requested.clone().into())?;
                    Self::push_tool(&mut tools, &mut index, tool);
                }
                FunctionPattern::Wildcard { catalog, schema } => {
                    let infos = client.list_functions(catalog, schema)?;
                    tracing::debug!(
                        "Expanded {} to {} function(s)",
                        pattern,
                        infos.len()
                    );
                    for info in infos {
                        if index.contains_key(&info.function_name()?) {
                            continue;
                        }
                        let tool = Self::uc_function_to_tool(&client, info.into())?;
                        Self::push_tool(&mut tools, &mut index, tool);
                    }
                }
            }
        }

        tracing::info!(
            "Toolkit ready: {} tool(s) from {} pattern(s)",
            tools.len(),
            patterns.len()
        );

        Ok(Self {
            function_names: config.function_names,
            client,
            tools,
            index,
        })
    }

    /// Append `tool` unless its resolved function is already present.
    fn push_tool(tools: &mut Vec<Tool>, index: &mut HashMap<FunctionName, usize>, tool: Tool) {
        let resolved = tool.function_name().clone();
        if index.contains_key(&resolved) {
            return;
        }
        if let Some(existing) = tools.iter().find(|t| t.name() == tool.name()) {
            tracing::warn!(
                "Tool name {} shared by {} and {}; lookups by tool name return the first",
                tool.name(),
                existing.function_name(),
                resolved
            );
        }
        index.insert(resolved, tools.len());
        tools.push(tool);
    }

    /// Convert one catalog function into a tool bound to `client`.
    ///
    /// `ByName` fetches the descriptor first; lookup errors propagate unchanged.
    pub fn uc_function_to_tool(client: &SharedClient, source: FunctionSource) -> Result<Tool> {
        let info = match source {
            FunctionSource::ByName(name) => {
                tracing::debug!("Fetching function {}", name);
                client.get_function(&name)?
            }
            FunctionSource::ByInfo(info) => info,
        };
        let tool = Tool::bind(client.clone(), &info)?;
        tracing::debug!("Converted {} to tool {}", tool.function_name(), tool.name());
        Ok(tool)
    }

    /// Tools in resolution order.
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Look up a tool by fully-qualified function name.
    pub fn get(&self, function_name: &FunctionName) -> Option<&Tool> {
        self.index.get(function_name).map(|&i| &self.tools[i])
    }

    /// Look up a tool by the name the model sees.
    ///
    /// Tool names are truncated to their trailing 64 characters, so two long
    /// function names can share one; the first resolved tool wins.
    pub fn find_by_tool_name(&self, tool_name: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.name() == tool_name)
    }

    /// OpenAI tool definitions, ready for a completion request.
    pub fn definitions(&self) -> Vec<Value> {
        self.tools.iter().map(|t| t.definition().clone()).collect()
    }

    /// The patterns this toolkit was built from.
    pub fn function_names(&self) -> &[String] {
        &self.function_names
    }

    pub fn client(&self) -> &SharedClient {
        &self.client
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl fmt::Debug for UcFunctionToolkit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UcFunctionToolkit")
            .field("function_names", &self.function_names)
            .field("tools", &self.tools)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
