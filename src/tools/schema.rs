//! Parameter schema derivation — SQL type text to JSON schema.
//!
//! Parses the catalog's declared `type_text` (including nested `array<..>`,
//! `map<..>` and `struct<..>` types) into a [`ParamType`], then renders the
//! JSON-schema object an OpenAI-style tool definition expects.

use crate::client::{FunctionInfo, FunctionParameterInfo};
use crate::types::{Error, Result};
use serde_json::{json, Map, Value};
use std::collections::HashSet;

const INTERVAL_QUALIFIERS: [&str; 7] = ["year", "month", "day", "hour", "minute", "second", "to"];

// =============================================================================
// Parameter types
// =============================================================================

/// Declared catalog type, reduced to what JSON schema can express.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    Date,
    Timestamp,
    Interval,
    Binary,
    /// `variant` and other untyped values.
    Any,
    Array(Box<ParamType>),
    /// Map keys are always strings in JSON, so only the value type is kept.
    Map(Box<ParamType>),
    Struct(Vec<StructField>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    pub name: String,
    pub param_type: ParamType,
}

impl ParamType {
    /// Parse SQL type text such as `int`, `decimal(10,2)` or `array<struct<a:int>>`.
    pub fn parse(type_text: &str) -> Result<Self> {
        let mut parser = TypeParser::new(type_text);
        let parsed = parser.parse_type()?;
        parser.skip_whitespace();
        if !parser.at_end() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(parsed)
    }

    /// JSON-schema fragment for this type.
    pub fn json_schema(&self) -> Map<String, Value> {
        let value = match self {
            ParamType::String => json!({"type": "string"}),
            ParamType::Integer => json!({"type": "integer"}),
            ParamType::Number => json!({"type": "number"}),
            ParamType::Boolean => json!({"type": "boolean"}),
            ParamType::Date => json!({"type": "string", "format": "date"}),
            ParamType::Timestamp => json!({"type": "string", "format": "date-time"}),
            ParamType::Interval => json!({"type": "string", "format": "duration"}),
            ParamType::Binary => json!({"type": "string", "format": "binary"}),
            ParamType::Any => json!({}),
            ParamType::Array(items) => json!({"type": "array", "items": items.json_schema()}),
            ParamType::Map(values) => {
                json!({"type": "object", "additionalProperties": values.json_schema()})
            }
            ParamType::Struct(fields) => {
                let properties: Map<String, Value> = fields
                    .iter()
                    .map(|f| (f.name.clone(), Value::Object(f.param_type.json_schema())))
                    .collect();
                let required: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
                json!({"type": "object", "properties": properties, "required": required})
            }
        };
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

// =============================================================================
// Type text parser
// =============================================================================

struct TypeParser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> TypeParser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn error(&self, msg: &str) -> Error {
        Error::invalid_argument(format!(
            "cannot parse type '{}' at offset {}: {}",
            self.src, self.pos, msg
        ))
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    /// Alphabetic run at the cursor, without consuming it.
    fn peek_word(&self) -> &'a str {
        let rest = &self.src[self.pos..];
        let len = rest.find(|c: char| !c.is_alphabetic()).unwrap_or(rest.len());
        &rest[..len]
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        self.skip_whitespace();
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.error(&format!("expected '{}'", expected)))
        }
    }

    fn ident(&mut self) -> Result<&'a str> {
        self.skip_whitespace();
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !(c.is_alphanumeric() || c == '_') {
                break;
            }
            self.pos += c.len_utf8();
        }
        if start == self.pos {
            return Err(self.error("expected identifier"));
        }
        Ok(&self.src[start..self.pos])
    }

    /// Field name: bare identifier or backtick-quoted.
    fn field_name(&mut self) -> Result<String> {
        if self.eat('`') {
            let start = self.pos;
            let end = self.src[start..]
                .find('`')
                .map(|i| start + i)
                .ok_or_else(|| self.error("unterminated quoted field name"))?;
            self.pos = end + 1;
            Ok(self.src[start..end].to_string())
        } else {
            Ok(self.ident()?.to_string())
        }
    }

    /// Optional `(n[, m])` size arguments, ignored.
    fn skip_size_args(&mut self) -> Result<()> {
        if !self.eat('(') {
            return Ok(());
        }
        match self.src[self.pos..].find(')') {
            Some(i) => {
                self.pos += i + 1;
                Ok(())
            }
            None => Err(self.error("unterminated size arguments")),
        }
    }

    /// Optional `'...'` string literal (struct field comments).
    fn skip_string_literal(&mut self) -> Result<()> {
        if !self.eat('\'') {
            return Err(self.error("expected string literal"));
        }
        let mut escaped = false;
        while let Some(c) = self.peek() {
            self.pos += c.len_utf8();
            match c {
                '\\' if !escaped => escaped = true,
                '\'' if !escaped => return Ok(()),
                _ => escaped = false,
            }
        }
        Err(self.error("unterminated string literal"))
    }

    fn parse_type(&mut self) -> Result<ParamType> {
        let name = self.ident()?.to_ascii_lowercase();
        let parsed = match name.as_str() {
            "string" => ParamType::String,
            "char" | "varchar" => {
                self.skip_size_args()?;
                ParamType::String
            }
            "tinyint" | "byte" | "smallint" | "short" | "int" | "integer" | "bigint" | "long" => {
                ParamType::Integer
            }
            "float" | "real" | "double" => ParamType::Number,
            "decimal" | "dec" | "numeric" => {
                self.skip_size_args()?;
                ParamType::Number
            }
            "boolean" | "bool" => ParamType::Boolean,
            "date" => ParamType::Date,
            "timestamp" | "timestamp_ntz" | "timestamp_ltz" => ParamType::Timestamp,
            "interval" => {
                // `interval day to second`, `interval year`, ...
                loop {
                    self.skip_whitespace();
                    let word = self.peek_word().to_ascii_lowercase();
                    if !INTERVAL_QUALIFIERS.contains(&word.as_str()) {
                        break;
                    }
                    self.pos += word.len();
                }
                ParamType::Interval
            }
            "binary" => ParamType::Binary,
            "variant" => ParamType::Any,
            "array" => {
                self.expect('<')?;
                let items = self.parse_type()?;
                self.expect('>')?;
                ParamType::Array(Box::new(items))
            }
            "map" => {
                self.expect('<')?;
                self.parse_type()?;
                self.expect(',')?;
                let values = self.parse_type()?;
                self.expect('>')?;
                ParamType::Map(Box::new(values))
            }
            "struct" => self.parse_struct_fields()?,
            other => return Err(self.error(&format!("unsupported type '{}'", other))),
        };
        Ok(parsed)
    }

    fn parse_struct_fields(&mut self) -> Result<ParamType> {
        self.expect('<')?;
        let mut fields = Vec::new();
        if self.eat('>') {
            return Ok(ParamType::Struct(fields));
        }
        loop {
            let name = self.field_name()?;
            self.eat(':');
            let param_type = self.parse_type()?;
            self.skip_field_modifiers()?;
            fields.push(StructField { name, param_type });
            if self.eat('>') {
                return Ok(ParamType::Struct(fields));
            }
            self.expect(',')?;
        }
    }

    /// `NOT NULL` and `COMMENT '...'` after a struct field type.
    fn skip_field_modifiers(&mut self) -> Result<()> {
        loop {
            self.skip_whitespace();
            let word = self.peek_word().to_ascii_lowercase();
            match word.as_str() {
                "not" => {
                    self.pos += word.len();
                    let null = self.ident()?;
                    if !null.eq_ignore_ascii_case("null") {
                        return Err(self.error("expected NULL after NOT"));
                    }
                }
                "comment" => {
                    self.pos += word.len();
                    self.skip_string_literal()?;
                }
                _ => return Ok(()),
            }
        }
    }
}

// =============================================================================
// Defaults
// =============================================================================

/// Interpret a declared SQL default literal as JSON.
pub fn parse_default_literal(literal: &str) -> Value {
    let trimmed = literal.trim();
    if trimmed.eq_ignore_ascii_case("null") {
        return Value::Null;
    }
    if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(trimmed.eq_ignore_ascii_case("true"));
    }
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return value;
    }
    if trimmed.len() >= 2 && trimmed.starts_with('\'') && trimmed.ends_with('\'') {
        return Value::String(trimmed[1..trimmed.len() - 1].replace("''", "'"));
    }
    Value::String(trimmed.to_string())
}

// =============================================================================
// Parameter schema
// =============================================================================

/// JSON-schema object describing a function's accepted arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSchema {
    pub title: String,
    pub properties: Map<String, Value>,
    pub required: Vec<String>,
}

impl ParameterSchema {
    /// Derive the schema from a descriptor. A function without parameters gets an
    /// empty object schema that still carries its own title.
    pub fn from_function_info(info: &FunctionInfo) -> Result<Self> {
        let function_name = info.function_name()?;
        let title = format!(
            "{}__{}__{}__params",
            function_name.catalog(),
            function_name.schema(),
            function_name.function()
        );

        let mut properties = Map::new();
        let mut required = Vec::new();
        let mut seen = HashSet::new();

        for param in info.parameters() {
            if !seen.insert(param.name.as_str()) {
                return Err(Error::invalid_argument(format!(
                    "function '{}' declares parameter '{}' more than once",
                    function_name, param.name
                )));
            }
            if !param.has_default() {
                required.push(param.name.clone());
            }
            properties.insert(param.name.clone(), Value::Object(property_schema(param)?));
        }

        Ok(Self {
            title,
            properties,
            required,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn to_value(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("title".to_string(), Value::String(self.title.clone()));
        schema.insert("type".to_string(), Value::String("object".to_string()));
        schema.insert("properties".to_string(), Value::Object(self.properties.clone()));
        if !self.required.is_empty() {
            schema.insert("required".to_string(), json!(self.required));
        }
        schema.insert("additionalProperties".to_string(), Value::Bool(false));
        Value::Object(schema)
    }
}

fn property_schema(param: &FunctionParameterInfo) -> Result<Map<String, Value>> {
    let param_type = ParamType::parse(&param.type_text)?;
    let mut schema = param_type.json_schema();

    let default = param.parameter_default.as_deref().map(parse_default_literal);
    if default == Some(Value::Null) {
        let mut nullable = Map::new();
        nullable.insert(
            "anyOf".to_string(),
            json!([Value::Object(schema), {"type": "null"}]),
        );
        schema = nullable;
    }
    if let Some(comment) = &param.comment {
        schema.insert("description".to_string(), Value::String(comment.clone()));
    }
    if let Some(default) = default {
        schema.insert("default".to_string(), default);
    }
    Ok(schema)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_primitives() {
        assert_eq!(ParamType::parse("STRING").unwrap(), ParamType::String);
        assert_eq!(ParamType::parse("bigint").unwrap(), ParamType::Integer);
        assert_eq!(ParamType::parse("decimal(10, 2)").unwrap(), ParamType::Number);
        assert_eq!(ParamType::parse("varchar(32)").unwrap(), ParamType::String);
        assert_eq!(ParamType::parse("timestamp_ntz").unwrap(), ParamType::Timestamp);
        assert_eq!(
            ParamType::parse("interval day to second").unwrap(),
            ParamType::Interval
        );
    }

    #[test]
    fn test_parse_nested() {
        let parsed = ParamType::parse("array<map<string, struct<a: int, `b c`: array<double>>>>")
            .unwrap();
        assert_eq!(
            parsed,
            ParamType::Array(Box::new(ParamType::Map(Box::new(ParamType::Struct(vec![
                StructField {
                    name: "a".to_string(),
                    param_type: ParamType::Integer,
                },
                StructField {
                    name: "b c".to_string(),
                    param_type: ParamType::Array(Box::new(ParamType::Number)),
                },
            ])))))
        );
    }

    #[test]
    fn test_parse_struct_modifiers() {
        let parsed =
            ParamType::parse("struct<id:int NOT NULL COMMENT 'the id', name:string>").unwrap();
        match parsed {
            ParamType::Struct(fields) => {
                assert_eq!(fields.len(), 2);
                assert_eq!(fields[1].name, "name");
            }
            other => panic!("expected struct, got {:?}", other),
        }
    }

    #[test]
    fn test_interval_stops_at_field_modifiers() {
        let parsed =
            ParamType::parse("struct<d: interval day COMMENT 'x', e: interval year to month>")
                .unwrap();
        assert_eq!(
            parsed,
            ParamType::Struct(vec![
                StructField {
                    name: "d".to_string(),
                    param_type: ParamType::Interval,
                },
                StructField {
                    name: "e".to_string(),
                    param_type: ParamType::Interval,
                },
            ])
        );
        assert!(ParamType::parse("interval day bogus").is_err());
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "array<int", "map<string>", "unknown_type", "int int", "struct<a:int"] {
            let err = ParamType::parse(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidArgument(_)), "{bad}: {err}");
        }
    }

    #[test]
    fn test_json_schema_for_struct() {
        let parsed = ParamType::parse("struct<a:int,b:date>").unwrap();
        assert_eq!(
            Value::Object(parsed.json_schema()),
            json!({
                "type": "object",
                "properties": {
                    "a": {"type": "integer"},
                    "b": {"type": "string", "format": "date"},
                },
                "required": ["a", "b"],
            })
        );
    }

    #[test]
    fn test_parse_default_literal() {
        assert_eq!(parse_default_literal("\"123\""), json!("123"));
        assert_eq!(parse_default_literal("'it''s'"), json!("it's"));
        assert_eq!(parse_default_literal("10"), json!(10));
        assert_eq!(parse_default_literal("1.5"), json!(1.5));
        assert_eq!(parse_default_literal("TRUE"), json!(true));
        assert_eq!(parse_default_literal("NULL"), Value::Null);
        assert_eq!(parse_default_literal("current_date()"), json!("current_date()"));
    }

    #[test]
    fn test_schema_required_excludes_defaults() {
        let info = FunctionInfo::new("main", "default", "greet")
            .with_parameter(FunctionParameterInfo::new("name", "string").with_comment("who"))
            .with_parameter(FunctionParameterInfo::new("times", "int").with_default("1"))
            .with_parameter(FunctionParameterInfo::new("suffix", "string").with_default("NULL"));

        let schema = ParameterSchema::from_function_info(&info).unwrap();
        assert_eq!(
            schema.to_value(),
            json!({
                "title": "main__default__greet__params",
                "type": "object",
                "properties": {
                    "name": {"type": "string", "description": "who"},
                    "times": {"type": "integer", "default": 1},
                    "suffix": {
                        "anyOf": [{"type": "string"}, {"type": "null"}],
                        "default": null,
                    },
                },
                "required": ["name"],
                "additionalProperties": false,
            })
        );
    }

    #[test]
    fn test_schema_without_parameters() {
        let info = FunctionInfo::new("main", "default", "now");
        let schema = ParameterSchema::from_function_info(&info).unwrap();

        assert!(schema.is_empty());
        assert_eq!(
            schema.to_value(),
            json!({
                "title": "main__default__now__params",
                "type": "object",
                "properties": {},
                "additionalProperties": false,
            })
        );
    }

    #[test]
    fn test_schema_rejects_duplicate_parameters() {
        let info = FunctionInfo::new("main", "default", "f")
            .with_parameter(FunctionParameterInfo::new("x", "int"))
            .with_parameter(FunctionParameterInfo::new("x", "string"));
        assert!(ParameterSchema::from_function_info(&info).is_err());
    }
}
