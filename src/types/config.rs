//! Configuration structures.
//!
//! Configuration is plain data, loaded from JSON and validated once before use.

use super::{Error, FunctionPattern, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Toolkit configuration: which functions to expose as tools.
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct ToolkitConfig {
    /// Function names in `catalog.schema.function` format, or `catalog.schema.*`
    /// to expose every function in a schema.
    #[serde(default)]
    pub function_names: Vec<String>,
}

impl ToolkitConfig {
    pub fn new<I, S>(function_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            function_names: function_names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Check the config and parse every entry into a pattern.
    pub fn validate(&self) -> Result<Vec<FunctionPattern>> {
        if self.function_names.is_empty() {
            return Err(Error::EmptyFunctionList);
        }
        self.function_names
            .iter()
            .map(|name| FunctionPattern::parse(name))
            .collect()
    }

    /// JSON schema describing this config (for editors and validation tooling).
    pub fn json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ToolkitConfig)
    }
}

/// Environment variable overriding the log format (`json` or `compact`).
pub const LOG_FORMAT_ENV: &str = "UCAI_LOG_FORMAT";

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Tracing log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable JSON log formatting.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl ObservabilityConfig {
    /// Apply the `UCAI_LOG_FORMAT` override from the process environment.
    pub fn with_env_overrides(self) -> Self {
        let format = std::env::var(LOG_FORMAT_ENV).ok();
        self.with_log_format(format.as_deref())
    }

    /// `json` enables JSON output, `compact` disables it; other values are ignored.
    pub fn with_log_format(mut self, format: Option<&str>) -> Self {
        match format.map(str::to_ascii_lowercase).as_deref() {
            Some("json") => self.json_logs = true,
            Some("compact") => self.json_logs = false,
            Some(other) => tracing::debug!("Ignoring unknown log format '{}'", other),
            None => {}
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_empty() {
        let err = ToolkitConfig::default().validate().unwrap_err();
        assert!(matches!(err, Error::EmptyFunctionList));
    }

    #[test]
    fn test_validate_parses_patterns() {
        let config = ToolkitConfig::new(["main.default.add", "main.tools.*"]);
        let patterns = config.validate().unwrap();
        assert_eq!(patterns.len(), 2);
        assert!(!patterns[0].is_wildcard());
        assert!(patterns[1].is_wildcard());
    }

    #[test]
    fn test_validate_rejects_malformed() {
        let config = ToolkitConfig::new(["main.default.add", "add"]);
        assert!(matches!(
            config.validate().unwrap_err(),
            Error::InvalidArgument(_)
        ));
    }

    #[test]
    fn test_from_json_str() {
        let config =
            ToolkitConfig::from_json_str(r#"{"function_names": ["main.default.add"]}"#).unwrap();
        assert_eq!(config.function_names, vec!["main.default.add"]);

        let config = ToolkitConfig::from_json_str("{}").unwrap();
        assert!(config.function_names.is_empty());
    }

    #[test]
    fn test_json_schema_lists_function_names() {
        let schema = serde_json::to_value(ToolkitConfig::json_schema()).unwrap();
        assert_eq!(schema["title"], "ToolkitConfig");
        assert_eq!(schema["properties"]["function_names"]["type"], "array");
    }

    #[test]
    fn test_log_format_override() {
        let base = ObservabilityConfig::default();
        assert!(base.clone().with_log_format(Some("JSON")).json_logs);
        assert!(!base.clone().with_log_format(None).json_logs);

        let json = ObservabilityConfig {
            json_logs: true,
            ..ObservabilityConfig::default()
        };
        assert!(!json.clone().with_log_format(Some("compact")).json_logs);
        assert!(json.with_log_format(Some("yaml")).json_logs);
    }
}
