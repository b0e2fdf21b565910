//! Tool — an OpenAI-compatible definition bound to one remote function.

use crate::client::{FunctionInfo, SharedClient};
use crate::types::{Error, FunctionName, Result};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fmt;
use std::sync::Arc;

use super::naming::tool_name;
use super::schema::ParameterSchema;

// =============================================================================
// Conversion input
// =============================================================================

/// What to convert: a name to look up, or a descriptor already in hand.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionSource {
    ByName(FunctionName),
    ByInfo(FunctionInfo),
}

impl FunctionSource {
    /// Build from an optional name/descriptor pair; exactly one must be present.
    pub fn from_parts(
        function_name: Option<FunctionName>,
        function_info: Option<FunctionInfo>,
    ) -> Result<Self> {
        match (function_name, function_info) {
            (Some(name), None) => Ok(FunctionSource::ByName(name)),
            (None, Some(info)) => Ok(FunctionSource::ByInfo(info)),
            (Some(_), Some(_)) => Err(Error::invalid_argument(
                "only one of function_name or function_info should be provided",
            )),
            (None, None) => Err(Error::invalid_argument(
                "either function_name or function_info should be provided",
            )),
        }
    }
}

impl From<FunctionName> for FunctionSource {
    fn from(name: FunctionName) -> Self {
        FunctionSource::ByName(name)
    }
}

impl From<FunctionInfo> for FunctionSource {
    fn from(info: FunctionInfo) -> Self {
        FunctionSource::ByInfo(info)
    }
}

// =============================================================================
// Arguments
// =============================================================================

/// Keyword arguments for a tool invocation, already in JSON form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArgs(Map<String, Value>);

impl ToolArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a JSON-native value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Serialize `value`; failure is reported as an upstream serialization error.
    pub fn insert<T: Serialize + ?Sized>(&mut self, key: impl Into<String>, value: &T) -> Result<()> {
        let key = key.into();
        let value = serde_json::to_value(value).map_err(|e| {
            Error::upstream_with(format!("failed to serialize argument '{}'", key), e)
        })?;
        self.0.insert(key, value);
        Ok(())
    }

    /// Serialize `value`, falling back to its `Display` text when it cannot be
    /// represented as JSON. The fallback is lossy on purpose.
    pub fn insert_lossy<T>(&mut self, key: impl Into<String>, value: &T)
    where
        T: Serialize + fmt::Display + ?Sized,
    {
        let value = serde_json::to_value(value).unwrap_or_else(|_| Value::String(value.to_string()));
        self.0.insert(key.into(), value);
    }

    /// Parse the JSON object string a model emits for a tool call.
    pub fn from_json_str(arguments: &str) -> Result<Self> {
        if arguments.trim().is_empty() {
            return Ok(Self::new());
        }
        match serde_json::from_str::<Value>(arguments)? {
            Value::Object(map) => Ok(Self(map)),
            other => Err(Error::invalid_argument(format!(
                "tool arguments must be a JSON object, got: {}",
                other
            ))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for ToolArgs {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for ToolArgs {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

// =============================================================================
// Tool
// =============================================================================

type Executor = Arc<dyn Fn(Map<String, Value>) -> Result<String> + Send + Sync>;

/// A callable tool. Immutable once built; clones share the bound client.
#[derive(Clone)]
pub struct Tool {
    name: String,
    description: String,
    function_name: FunctionName,
    definition: Value,
    executor: Executor,
}

impl Tool {
    /// Build a tool for `info`, executing through `client`.
    pub(crate) fn bind(client: SharedClient, info: &FunctionInfo) -> Result<Self> {
        let function_name = info.function_name()?;
        let schema = ParameterSchema::from_function_info(info)?;
        let name = tool_name(&function_name);
        let description = info.comment.clone().unwrap_or_default();

        let definition = json!({
            "type": "function",
            "function": {
                "name": name,
                "description": description,
                "parameters": schema.to_value(),
            },
        });

        let bound_name = function_name.clone();
        let executor: Executor = Arc::new(move |parameters: Map<String, Value>| {
            tracing::debug!(
                "Executing function {} with {} argument(s)",
                bound_name,
                parameters.len()
            );
            client.execute_function(&bound_name, parameters)?.to_json()
        });

        Ok(Self {
            name,
            description,
            function_name,
            definition,
            executor,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn function_name(&self) -> &FunctionName {
        &self.function_name
    }

    /// OpenAI tool definition: `{"type": "function", "function": {...}}`.
    pub fn definition(&self) -> &Value {
        &self.definition
    }

    /// JSON schema of the accepted arguments.
    pub fn parameters(&self) -> &Value {
        &self.definition["function"]["parameters"]
    }

    /// Execute the function remotely and return the JSON-encoded result.
    pub fn invoke(&self, args: ToolArgs) -> Result<String> {
        (self.executor)(args.into_map())
    }

    /// Execute with the raw JSON argument string from a model's tool call.
    pub fn invoke_json(&self, arguments: &str) -> Result<String> {
        self.invoke(ToolArgs::from_json_str(arguments)?)
    }
}

impl fmt::Debug for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("function_name", &self.function_name)
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{FunctionParameterInfo, InMemoryFunctionClient};
    use serde::ser::Error as _;
    use serde::Serializer;

    fn add_info() -> FunctionInfo {
        FunctionInfo::new("main", "default", "add")
            .with_comment("adds two numbers")
            .with_parameter(FunctionParameterInfo::new("a", "int"))
            .with_parameter(FunctionParameterInfo::new("b", "int"))
    }

    fn add_client() -> SharedClient {
        let mut client = InMemoryFunctionClient::new();
        client
            .register_with_handler(add_info(), |args| {
                let a = args.get("a").and_then(Value::as_i64).unwrap_or(0);
                let b = args.get("b").and_then(Value::as_i64).unwrap_or(0);
                Ok(Value::from(a + b))
            })
            .unwrap();
        Arc::new(client)
    }

    #[test]
    fn test_from_parts_requires_exactly_one() {
        let name = FunctionName::parse("main.default.add").unwrap();
        assert!(matches!(
            FunctionSource::from_parts(None, None).unwrap_err(),
            Error::InvalidArgument(_)
        ));
        assert!(matches!(
            FunctionSource::from_parts(Some(name.clone()), Some(add_info())).unwrap_err(),
            Error::InvalidArgument(_)
        ));
        assert_eq!(
            FunctionSource::from_parts(Some(name.clone()), None).unwrap(),
            FunctionSource::ByName(name)
        );
    }

    #[test]
    fn test_bind_builds_definition() {
        let tool = Tool::bind(add_client(), &add_info()).unwrap();
        assert_eq!(tool.name(), "main__default__add");
        assert_eq!(tool.description(), "adds two numbers");
        assert_eq!(tool.definition()["type"], "function");
        assert_eq!(tool.definition()["function"]["name"], "main__default__add");
        assert_eq!(tool.parameters()["required"], json!(["a", "b"]));
        assert_eq!(tool.parameters()["properties"]["a"], json!({"type": "integer"}));
    }

    #[test]
    fn test_missing_comment_is_empty_description() {
        let info = FunctionInfo::new("main", "default", "now");
        let tool = Tool::bind(add_client(), &info).unwrap();
        assert_eq!(tool.description(), "");
        assert_eq!(tool.definition()["function"]["description"], "");
    }

    #[test]
    fn test_invoke_returns_result_json() {
        let tool = Tool::bind(add_client(), &add_info()).unwrap();
        let out = tool
            .invoke(ToolArgs::new().with("a", 1).with("b", 2))
            .unwrap();
        assert_eq!(out, r#"{"format":"SCALAR","value":"3"}"#);

        let out = tool.invoke_json(r#"{"a": 4, "b": 5}"#).unwrap();
        let parsed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["value"], "9");
    }

    #[test]
    fn test_invoke_json_rejects_non_object() {
        let tool = Tool::bind(add_client(), &add_info()).unwrap();
        assert!(matches!(
            tool.invoke_json("[1, 2]").unwrap_err(),
            Error::InvalidArgument(_)
        ));
        assert!(matches!(
            tool.invoke_json("{not json").unwrap_err(),
            Error::Serialization(_)
        ));
    }

    /// A value that refuses JSON serialization but has a text form.
    struct Opaque;

    impl Serialize for Opaque {
        fn serialize<S: Serializer>(&self, _serializer: S) -> std::result::Result<S::Ok, S::Error> {
            Err(S::Error::custom("opaque values cannot be serialized"))
        }
    }

    impl fmt::Display for Opaque {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("Opaque<42>")
        }
    }

    #[test]
    fn test_lossy_insert_falls_back_to_display_text() {
        // Intentionally lossy: the function receives the text, not the value.
        let mut args = ToolArgs::new();
        args.insert_lossy("x", &Opaque);
        args.insert_lossy("n", &7);
        assert_eq!(args.get("x"), Some(&json!("Opaque<42>")));
        assert_eq!(args.get("n"), Some(&json!(7)));
    }

    #[test]
    fn test_strict_insert_reports_upstream_error() {
        let mut args = ToolArgs::new();
        let err = args.insert("x", &Opaque).unwrap_err();
        assert!(err.is_upstream());
        assert!(args.is_empty());
    }
}
