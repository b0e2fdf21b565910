//! Tool-call dispatch — execute the tool calls a model requested.
//!
//! Reads an OpenAI/LiteLLM chat-completion response, maps tool names back to
//! catalog function names, executes them through the client, and builds the
//! message list to send on the next turn.

use crate::client::FunctionClient;
use crate::types::{Error, FunctionName, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::naming::original_function_name;
use super::tool::ToolArgs;

const TOOL_CALLS_FINISH_REASON: &str = "tool_calls";

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    /// JSON-encoded argument object, as emitted by the model.
    pub arguments: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub id: String,
    #[serde(rename = "type", default = "default_call_type")]
    pub call_type: String,
    pub function: FunctionCall,
}

fn default_call_type() -> String {
    "function".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub finish_reason: Option<String>,
    pub message: AssistantMessage,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One prior conversation turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub role: String,
    pub content: String,
}

// =============================================================================
// Tool call data
// =============================================================================

/// A requested call, resolved to a catalog function.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallData {
    pub function_name: FunctionName,
    pub arguments: ToolArgs,
    pub tool_use_id: String,
}

impl ToolCallData {
    fn from_tool_call(call: &ToolCall) -> Result<Self> {
        Ok(Self {
            function_name: original_function_name(&call.function.name)?,
            arguments: ToolArgs::from_json_str(&call.function.arguments)?,
            tool_use_id: call.id.clone(),
        })
    }

    pub fn to_value(&self) -> Value {
        json!({
            "function_name": self.function_name.as_str(),
            "arguments": Value::Object(self.arguments.clone().into_map()),
            "tool_use_id": self.tool_use_id,
        })
    }

    /// Execute the call. Returns the result value, or the error text when the
    /// function reported one.
    pub fn execute(&self, client: &dyn FunctionClient) -> Result<String> {
        tracing::debug!("Dispatching tool call {} to {}", self.tool_use_id, self.function_name);
        let result =
            client.execute_function(&self.function_name, self.arguments.clone().into_map())?;
        Ok(result.value.or(result.error).unwrap_or_default())
    }

    pub fn to_tool_result_message(&self, result: &str) -> Value {
        json!({
            "role": "tool",
            "tool_call_id": self.tool_use_id,
            "name": self.function_name.as_str(),
            "content": result,
        })
    }
}

fn choice_tool_calls(choice: &Choice) -> Result<Vec<ToolCallData>> {
    if choice.finish_reason.as_deref() != Some(TOOL_CALLS_FINISH_REASON) {
        return Ok(Vec::new());
    }
    choice
        .message
        .tool_calls
        .iter()
        .flatten()
        .map(ToolCallData::from_tool_call)
        .collect()
}

/// Tool calls per choice. Choices that did not stop for tool calls yield an
/// empty list.
pub fn extract_tool_call_data(response: &ChatCompletionResponse) -> Result<Vec<Vec<ToolCallData>>> {
    response.choices.iter().map(choice_tool_calls).collect()
}

/// Execute the tool calls of one choice and assemble the next-turn messages:
/// validated history, the assistant message, then one tool message per call.
pub fn generate_tool_call_messages(
    response: &ChatCompletionResponse,
    conversation_history: &[Value],
    client: &dyn FunctionClient,
    choice_index: usize,
) -> Result<Vec<Value>> {
    let mut messages = conversation_history
        .iter()
        .map(|message| -> Result<Value> {
            let validated: ConversationMessage = serde_json::from_value(message.clone())
                .map_err(|e| {
                    Error::invalid_argument(format!("Invalid conversation history format: {}", e))
                })?;
            Ok(serde_json::to_value(validated)?)
        })
        .collect::<Result<Vec<Value>>>()?;

    let choice = response.choices.get(choice_index).ok_or_else(|| {
        Error::invalid_argument(format!(
            "choice index {} out of range, response has {} choice(s)",
            choice_index,
            response.choices.len()
        ))
    })?;

    messages.push(serde_json::to_value(&choice.message)?);
    for call in choice_tool_calls(choice)? {
        let result = call.execute(client)?;
        messages.push(call.to_tool_result_message(&result));
    }
    Ok(messages)
}

// =============================================================================
// Tests
// =============================================================================
