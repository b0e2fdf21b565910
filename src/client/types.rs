//! Catalog data types — function descriptors and execution results.
//!
//! Shapes follow the Unity Catalog REST `FunctionInfo` payload so descriptors can
//! be deserialized straight from catalog responses or snapshot files.

use crate::types::{FunctionName, Result};
use serde::{Deserialize, Serialize};

// =============================================================================
// Function descriptor
// =============================================================================

/// A single declared input parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionParameterInfo {
    pub name: String,
    /// Full SQL type text, e.g. `int`, `array<string>`, `decimal(10,2)`.
    pub type_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_json: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    /// SQL literal of the default value, when one is declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_default: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl FunctionParameterInfo {
    pub fn new(name: impl Into<String>, type_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_text: type_text.into(),
            type_name: None,
            type_json: None,
            position: None,
            parameter_default: None,
            comment: None,
        }
    }

    pub fn with_default(mut self, literal: impl Into<String>) -> Self {
        self.parameter_default = Some(literal.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn has_default(&self) -> bool {
        self.parameter_default.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FunctionParameterInfos {
    #[serde(default)]
    pub parameters: Vec<FunctionParameterInfo>,
}

/// Function descriptor as registered in the catalog. Read-only to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub catalog_name: String,
    pub schema_name: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_params: Option<FunctionParameterInfos>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_data_type: Option<String>,
}

impl FunctionInfo {
    pub fn new(
        catalog_name: impl Into<String>,
        schema_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            catalog_name: catalog_name.into(),
            schema_name: schema_name.into(),
            name: name.into(),
            full_name: None,
            comment: None,
            input_params: None,
            data_type: None,
            full_data_type: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn with_parameter(mut self, mut param: FunctionParameterInfo) -> Self {
        let params = self.input_params.get_or_insert_with(Default::default);
        if param.position.is_none() {
            param.position = Some(params.parameters.len() as u32);
        }
        params.parameters.push(param);
        self
    }

    pub fn with_return_type(mut self, data_type: impl Into<String>) -> Self {
        let data_type = data_type.into();
        self.full_data_type = Some(data_type.clone());
        self.data_type = Some(data_type.to_uppercase());
        self
    }

    /// Fully-qualified name, preferring the catalog-supplied `full_name`.
    pub fn function_name(&self) -> Result<FunctionName> {
        match &self.full_name {
            Some(full_name) => FunctionName::parse(full_name),
            None => FunctionName::from_parts(&self.catalog_name, &self.schema_name, &self.name),
        }
    }

    /// Declared parameters in position order.
    pub fn parameters(&self) -> Vec<&FunctionParameterInfo> {
        let mut params: Vec<&FunctionParameterInfo> = self
            .input_params
            .as_ref()
            .map(|p| p.parameters.iter().collect())
            .unwrap_or_default();
        params.sort_by_key(|p| p.position.unwrap_or(u32::MAX));
        params
    }
}

// =============================================================================
// Execution result
// =============================================================================

/// Format of an execution result value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResultFormat {
    Scalar,
    Csv,
}

/// Outcome of a remote function execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionExecutionResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub format: ResultFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncated: Option<bool>,
}

impl FunctionExecutionResult {
    pub fn scalar(value: impl Into<String>) -> Self {
        Self {
            error: None,
            format: ResultFormat::Scalar,
            value: Some(value.into()),
            truncated: None,
        }
    }

    pub fn csv(value: impl Into<String>, truncated: bool) -> Self {
        Self {
            error: None,
            format: ResultFormat::Csv,
            value: Some(value.into()),
            truncated: Some(truncated),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            format: ResultFormat::Scalar,
            value: None,
            truncated: None,
        }
    }

    /// JSON form with absent fields omitted.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
