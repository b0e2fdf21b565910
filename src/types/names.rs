//! Strongly-typed function names.
//!
//! Names are validated at construction time: a fully-qualified name has exactly
//! three non-empty dot-separated parts (`catalog.schema.function`), and a pattern
//! may additionally use `*` as its function part.

use super::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const WILDCARD: &str = "*";

fn split_parts(s: &str) -> Result<[&str; 3]> {
    let parts: Vec<&str> = s.split('.').collect();
    match parts.as_slice() {
        [catalog, schema, function]
            if !catalog.is_empty() && !schema.is_empty() && !function.is_empty() =>
        {
            Ok([*catalog, *schema, *function])
        }
        _ => Err(Error::invalid_argument(format!(
            "invalid function name '{}', expected format: catalog_name.schema_name.function_name",
            s
        ))),
    }
}

/// Fully-qualified function name (`catalog.schema.function`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FunctionName {
    full_name: String,
    schema_start: usize,
    function_start: usize,
}

impl FunctionName {
    pub fn parse(s: &str) -> Result<Self> {
        let [catalog, schema, function] = split_parts(s)?;
        if [catalog, schema, function].contains(&WILDCARD) {
            return Err(Error::invalid_argument(format!(
                "function name '{}' contains a wildcard, use a pattern instead",
                s
            )));
        }
        Ok(Self::from_parts_unchecked(catalog, schema, function))
    }

    pub fn from_parts(catalog: &str, schema: &str, function: &str) -> Result<Self> {
        Self::parse(&format!("{}.{}.{}", catalog, schema, function))
    }

    fn from_parts_unchecked(catalog: &str, schema: &str, function: &str) -> Self {
        Self {
            full_name: format!("{}.{}.{}", catalog, schema, function),
            schema_start: catalog.len() + 1,
            function_start: catalog.len() + schema.len() + 2,
        }
    }

    pub fn catalog(&self) -> &str {
        &self.full_name[..self.schema_start - 1]
    }

    pub fn schema(&self) -> &str {
        &self.full_name[self.schema_start..self.function_start - 1]
    }

    pub fn function(&self) -> &str {
        &self.full_name[self.function_start..]
    }

    pub fn as_str(&self) -> &str {
        &self.full_name
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name)
    }
}

impl FromStr for FunctionName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FunctionName {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<FunctionName> for String {
    fn from(name: FunctionName) -> Self {
        name.full_name
    }
}

/// A requested function: either one concrete name or every function in a schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FunctionPattern {
    Exact(FunctionName),
    Wildcard { catalog: String, schema: String },
}

impl FunctionPattern {
    pub fn parse(s: &str) -> Result<Self> {
        let [catalog, schema, function] = split_parts(s)?;
        if catalog == WILDCARD || schema == WILDCARD {
            return Err(Error::invalid_argument(format!(
                "invalid function pattern '{}', only the function part may be '*'",
                s
            )));
        }
        if function == WILDCARD {
            Ok(FunctionPattern::Wildcard {
                catalog: catalog.to_string(),
                schema: schema.to_string(),
            })
        } else {
            Ok(FunctionPattern::Exact(FunctionName::from_parts_unchecked(
                catalog, schema, function,
            )))
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, FunctionPattern::Wildcard { .. })
    }
}

impl fmt::Display for FunctionPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionPattern::Exact(name) => write!(f, "{}", name),
            FunctionPattern::Wildcard { catalog, schema } => {
                write!(f, "{}.{}.{}", catalog, schema, WILDCARD)
            }
        }
    }
}

impl FromStr for FunctionPattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
