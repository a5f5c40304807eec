//! Compile filter inputs to the expression triple

use super::CliError;
use crate::builder::parse_condition_leaf;
use crate::compiler::{Expression, filter};
use crate::from_nested_json_with;
use crate::query_string::query_string_filter;

/// Options for the compile command
#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// The query string, or a nested JSON filter document with `json`
    pub input: String,
    /// Treat the input as a nested JSON filter document
    pub json: bool,
}

/// Execute a condex compile operation
pub fn execute_compile(options: &CompileOptions) -> Result<Expression, CliError> {
    if options.json {
        let document: serde_json::Value =
            serde_json::from_str(options.input.trim()).map_err(CliError::Json)?;
        let nodes =
            from_nested_json_with(&document, &parse_condition_leaf).map_err(CliError::Filter)?;
        Ok(filter(&nodes))
    } else {
        Ok(query_string_filter(options.input.trim()))
    }
}
