//! Tool naming — catalog function names to tool-calling identifiers and back.
//!
//! Tool names must match `^[a-zA-Z0-9_-]{1,64}$` in the OpenAI convention, so
//! the `.` separators become `__` and overlong names keep their trailing 64
//! characters (the function part is the most specific).

use crate::types::{FunctionName, Result};

/// Maximum tool name length accepted by the tool-calling convention.
pub const MAX_TOOL_NAME_LEN: usize = 64;

const SEPARATOR: &str = "__";

/// Tool name for a fully-qualified function name.
pub fn tool_name(function_name: &FunctionName) -> String {
    let name = function_name.as_str().replace('.', SEPARATOR);
    let len = name.chars().count();
    if len > MAX_TOOL_NAME_LEN {
        name.chars().skip(len - MAX_TOOL_NAME_LEN).collect()
    } else {
        name
    }
}

/// Recover the function name from a tool name produced by [`tool_name`].
///
/// Only exact for names whose parts contain no `__` and that were not truncated.
pub fn original_function_name(tool_name: &str) -> Result<FunctionName> {
    FunctionName::parse(&tool_name.replace(SEPARATOR, "."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn name(s: &str) -> FunctionName {
        FunctionName::parse(s).unwrap()
    }

    #[test]
    fn test_tool_name_replaces_separators() {
        assert_eq!(tool_name(&name("catalog.schema.add")), "catalog__schema__add");
    }

    #[test]
    fn test_tool_name_keeps_trailing_characters() {
        let long = format!("{}.schema.add", "c".repeat(80));
        let tool = tool_name(&name(&long));
        assert_eq!(tool.len(), MAX_TOOL_NAME_LEN);
        assert!(tool.ends_with("__schema__add"));
    }

    #[test]
    fn test_original_function_name() {
        assert_eq!(
            original_function_name("catalog__schema__add").unwrap(),
            name("catalog.schema.add")
        );
        assert!(original_function_name("get_weather").is_err());
    }

    proptest! {
        #[test]
        fn prop_tool_name_is_deterministic_and_bounded(
            catalog in "[a-z][a-z0-9]{0,40}",
            schema in "[a-z][a-z0-9]{0,40}",
            function in "[a-z][a-z0-9]{0,40}",
        ) {
            let full = name(&format!("{}.{}.{}", catalog, schema, function));
            let first = tool_name(&full);
            prop_assert_eq!(&first, &tool_name(&full));
            prop_assert!(first.chars().count() <= MAX_TOOL_NAME_LEN);
            prop_assert!(first.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
        }

        #[test]
        fn prop_short_names_round_trip(
            catalog in "[a-z][a-z0-9]{0,15}",
            schema in "[a-z][a-z0-9]{0,15}",
            function in "[a-z][a-z0-9]{0,15}",
        ) {
            let full = name(&format!("{}.{}.{}", catalog, schema, function));
            prop_assert_eq!(original_function_name(&tool_name(&full)).unwrap(), full);
        }
    }
}
