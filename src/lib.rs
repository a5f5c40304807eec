pub mod ast;
pub mod bracket;
pub mod builder;
pub mod compiler;
pub mod error;
pub mod query_string;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{
    Comparison, Condition, Operator, Predicate, QueryNode, and, attribute, attribute_exists,
    attribute_not_exists, begins_with, condition, equals, not_equals, or, render_expression,
};
pub use builder::{from_nested_json, from_nested_json_with, parse_condition_leaf};
pub use compiler::{Expression, filter};
pub use error::FilterError;
pub use query_string::query_string_filter;
