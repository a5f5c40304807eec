//! Nested JSON structures → filter AST.
//!
//! Accepts a [`serde_json::Value`] whose own keys are a subset of
//! `{"and", "or"}`, each mapping to an array of further nested structures or
//! of raw leaf values. A "leaf" is any value lacking both keys, including
//! non-objects. Leaves go through a caller-supplied transformer that maps one
//! raw value to the condition payloads it stands for.

use serde_json::{Map, Value};

use crate::ast::{Comparison, Condition, Operator, QueryNode, condition};
use crate::error::FilterError;

const AND_KEY: &str = "and";
const OR_KEY: &str = "or";

/// Whether a value is a leaf of the nested structure (lacks both operator
/// keys).
pub fn is_leaf(tree: &Value) -> bool {
    match tree.as_object() {
        Some(entries) => !entries.contains_key(AND_KEY) && !entries.contains_key(OR_KEY),
        None => true,
    }
}

/// Convert a nested structure into a list of filter trees, keeping each leaf
/// value as-is.
///
/// Callers must always treat the result as a list, even when it holds a
/// single tree.
pub fn from_nested_json(tree: &Value) -> Result<Vec<QueryNode<Value>>, FilterError> {
    from_nested_json_with(tree, &|leaf| Ok(vec![leaf.clone()]))
}

/// Convert a nested structure into a list of filter trees, mapping each leaf
/// through `leaf`.
///
/// Tie-break rules, applied in order:
///
/// 1. A node carrying both `and` and `or` is rewritten to
///    `{and: [{and: <and-list>}, {or: <or-list>}]}` before anything else:
///    co-present operators bind as *(AND-branch) AND (OR-branch)*.
/// 2. Each operator key produces one operator node; its value is coerced to
///    an array first, and every entry's results are flattened into the
///    children.
/// 3. A non-operator key where an operator was expected is folded into a
///    synthetic `{or: [{<key>: <value>}]}` wrapper, giving naked attribute
///    filters a consistent default grouping.
pub fn from_nested_json_with<T, F>(tree: &Value, leaf: &F) -> Result<Vec<QueryNode<T>>, FilterError>
where
    F: Fn(&Value) -> Result<Vec<T>, FilterError>,
{
    if let Some(entries) = tree.as_object() {
        if entries.contains_key(AND_KEY) || entries.contains_key(OR_KEY) {
            return branch(entries, leaf);
        }
    }
    Ok(leaf(tree)?.into_iter().map(condition).collect())
}

fn branch<T, F>(entries: &Map<String, Value>, leaf: &F) -> Result<Vec<QueryNode<T>>, FilterError>
where
    F: Fn(&Value) -> Result<Vec<T>, FilterError>,
{
    if entries.contains_key(AND_KEY) && entries.contains_key(OR_KEY) {
        return from_nested_json_with(&with_extra_and(entries), leaf);
    }

    let mut nodes = Vec::new();
    for (key, item) in entries {
        nodes.push(match key.as_str() {
            AND_KEY => operator_node(Operator::And, item, leaf)?,
            OR_KEY => operator_node(Operator::Or, item, leaf)?,
            _ => naked_key_node(key, item, leaf)?,
        });
    }
    Ok(nodes)
}

fn operator_node<T, F>(
    operator: Operator,
    item: &Value,
    leaf: &F,
) -> Result<QueryNode<T>, FilterError>
where
    F: Fn(&Value) -> Result<Vec<T>, FilterError>,
{
    let mut children = Vec::new();
    for entry in coerce_to_array(item) {
        children.extend(from_nested_json_with(entry, leaf)?);
    }
    Ok(QueryNode::Operator { operator, children })
}

fn naked_key_node<T, F>(key: &str, item: &Value, leaf: &F) -> Result<QueryNode<T>, FilterError>
where
    F: Fn(&Value) -> Result<Vec<T>, FilterError>,
{
    let mut inner = Map::new();
    inner.insert(key.to_string(), item.clone());
    let children = from_nested_json_with(&Value::Object(inner), leaf)?;
    Ok(QueryNode::Operator {
        operator: Operator::Or,
        children,
    })
}

/// A bare value under an operator key counts as a one-element array.
fn coerce_to_array(item: &Value) -> Vec<&Value> {
    match item {
        Value::Array(entries) => entries.iter().collect(),
        other => vec![other],
    }
}

fn with_extra_and(entries: &Map<String, Value>) -> Value {
    let mut and_branch = Map::new();
    and_branch.insert(
        AND_KEY.to_string(),
        entries.get(AND_KEY).cloned().unwrap_or(Value::Null),
    );
    let mut or_branch = Map::new();
    or_branch.insert(
        OR_KEY.to_string(),
        entries.get(OR_KEY).cloned().unwrap_or(Value::Null),
    );
    let mut rewritten = Map::new();
    rewritten.insert(
        AND_KEY.to_string(),
        Value::Array(vec![Value::Object(and_branch), Value::Object(or_branch)]),
    );
    Value::Object(rewritten)
}

/// Strict leaf transformer for `{attribute, comparison, value}`-shaped
/// leaves.
///
/// Raises [`FilterError::UnknownComparison`] for comparison names outside the
/// operator table and [`FilterError::MalformedFilterTree`] for anything not
/// shaped like a condition.
pub fn parse_condition_leaf(leaf: &Value) -> Result<Vec<Condition>, FilterError> {
    let Some(entries) = leaf.as_object() else {
        return Err(FilterError::MalformedFilterTree(format!(
            "expected a condition object, got {}",
            leaf
        )));
    };
    let Some(attribute) = entries.get("attribute").and_then(Value::as_str) else {
        return Err(FilterError::MalformedFilterTree(
            "condition is missing a string 'attribute'".to_string(),
        ));
    };
    let Some(name) = entries.get("comparison").and_then(Value::as_str) else {
        return Err(FilterError::MalformedFilterTree(
            "condition is missing a string 'comparison'".to_string(),
        ));
    };
    let comparison: Comparison = name.parse()?;
    let value = if comparison.takes_value() {
        entries.get("value").cloned()
    } else {
        None
    };
    Ok(vec![Condition {
        attribute: attribute.to_string(),
        comparison,
        value,
    }])
}
