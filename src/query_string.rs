//! Bracket-notation query strings → rendered filter expressions.
//!
//! The full parsing pipeline: raw query string → nested tree
//! ([`crate::bracket`]) → comma-splitting → auto-OR wrapping → lenient leaf
//! fan-out → compiled [`Expression`].
//!
//! This surface is deliberately lenient: it faces arbitrary client-supplied
//! query strings, so keys without a recognized comparison suffix are dropped
//! from the resulting filter rather than raised as errors. A structurally
//! unusable query degrades to the empty (no-op) triple.

use serde_json::{Map, Value};

use crate::ast::{Comparison, Condition, QueryNode, condition};
use crate::bracket;
use crate::builder::{from_nested_json_with, is_leaf};
use crate::compiler::{Expression, filter};

const AND_KEY: &str = "and";
const OR_KEY: &str = "or";

/// Compile a bracket-notation query string into an expression triple.
///
/// # Examples
///
/// ```
/// use condex::query_string::query_string_filter;
///
/// let expression = query_string_filter("source[eq]=Angers&deduplicated[exists]=false");
/// assert_eq!(expression.expression, "#0 = :0 and attribute_not_exists(#1)");
/// ```
pub fn query_string_filter(query: &str) -> Expression {
    let parsed = bracket::parse(query);
    let transformed = split_comma_values(&parsed);
    let tree = if should_wrap_in_or(&transformed) {
        wrap_in_or(transformed)
    } else {
        transformed
    };

    if is_leaf(&tree) {
        let nodes: Vec<QueryNode<Condition>> =
            leaf_conditions(&tree).into_iter().map(condition).collect();
        return filter(&nodes);
    }
    match from_nested_json_with(&tree, &|leaf| Ok(leaf_conditions(leaf))) {
        Ok(nodes) => filter(&nodes),
        // the lenient transformer never fails; any failure means no filter
        Err(_) => Expression::default(),
    }
}

/// Split comma-separated leaf strings into arrays of strings.
///
/// Recursion descends objects only; arrays pass through untouched and fan
/// out later.
fn split_comma_values(tree: &Value) -> Value {
    match tree {
        Value::Array(_) => tree.clone(),
        Value::String(text) if text.contains(',') => Value::Array(
            text.split(',')
                .map(|part| Value::String(part.to_string()))
                .collect(),
        ),
        Value::Object(entries) => Value::Object(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), split_comma_values(value)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// A top level holding a single attribute key with a single comparison wraps
/// as `{or: [<tree>]}` so the simplest filter still goes through the
/// list-returning builder contract.
fn should_wrap_in_or(tree: &Value) -> bool {
    let Some(entries) = tree.as_object() else {
        return false;
    };
    if entries.len() != 1 {
        return false;
    }
    let Some((attribute, comparisons)) = entries.iter().next() else {
        return false;
    };
    if attribute == AND_KEY || attribute == OR_KEY {
        return false;
    }
    comparisons
        .as_object()
        .is_some_and(|comparisons| comparisons.len() == 1)
}

fn wrap_in_or(tree: Value) -> Value {
    let mut wrapper = Map::new();
    wrapper.insert(OR_KEY.to_string(), tree);
    Value::Object(wrapper)
}

/// Lenient leaf transformer: `{attribute: {comparison: operand, ...}, ...}`
/// fans out into conditions, dropping anything unrecognized.
fn leaf_conditions(leaf: &Value) -> Vec<Condition> {
    let Some(attributes) = leaf.as_object() else {
        return Vec::new();
    };
    let mut conditions = Vec::new();
    for (attribute, comparisons) in attributes {
        // a bare value like `cache=false` carries no comparison at all
        let Some(comparisons) = comparisons.as_object() else {
            continue;
        };
        for (name, operand) in comparisons {
            let Ok(comparison) = name.parse::<Comparison>() else {
                continue;
            };
            conditions.extend(fan_out(to_condition(attribute, comparison, operand)));
        }
    }
    conditions
}

/// `exists=true` / `exists=false` rewrite to the dedicated existence
/// conditions; everything else keeps its operand.
fn to_condition(attribute: &str, comparison: Comparison, operand: &Value) -> Condition {
    let comparison = match (comparison, operand.as_str()) {
        (Comparison::Exists, Some("false")) => Comparison::NotExists,
        (comparison, _) => comparison,
    };
    let value = if comparison.takes_value() {
        Some(operand.clone())
    } else {
        None
    };
    Condition {
        attribute: attribute.to_string(),
        comparison,
        value,
    }
}

/// Multiple values under one attribute+comparison are an implicit OR over
/// identical comparisons: arrays fan out one condition per element, and
/// object operands whose sub-keys hold arrays fan out one single-subkey
/// condition per element.
fn fan_out(seed: Condition) -> Vec<Condition> {
    match &seed.value {
        Some(Value::Array(elements)) => elements
            .iter()
            .map(|element| Condition {
                value: Some(element.clone()),
                ..seed.clone()
            })
            .collect(),
        Some(Value::Object(subkeys)) if subkeys.values().any(Value::is_array) => {
            let mut conditions = Vec::new();
            for (subkey, operand) in subkeys {
                match operand {
                    Value::Array(elements) => {
                        for element in elements {
                            conditions.push(Condition {
                                value: Some(single_entry(subkey, element.clone())),
                                ..seed.clone()
                            });
                        }
                    }
                    other => conditions.push(Condition {
                        value: Some(single_entry(subkey, other.clone())),
                        ..seed.clone()
                    }),
                }
            }
            conditions
        }
        _ => vec![seed],
    }
}

fn single_entry(key: &str, value: Value) -> Value {
    let mut entry = Map::new();
    entry.insert(key.to_string(), value);
    Value::Object(entry)
}
