//! Tool infrastructure — schema derivation, naming, conversion, toolkit, dispatch.
//!
//! Catalog descriptors come in through the client; OpenAI-compatible tool
//! definitions with bound executors come out.

pub mod dispatch;
pub mod naming;
pub mod schema;
pub mod tool;
pub mod toolkit;

pub use dispatch::{
    extract_tool_call_data, generate_tool_call_messages, ChatCompletionResponse,
    ConversationMessage, ToolCallData,
};
pub use naming::{original_function_name, tool_name};
pub use schema::{ParamType, ParameterSchema};
pub use tool::{FunctionSource, Tool, ToolArgs};
pub use toolkit::UcFunctionToolkit;
