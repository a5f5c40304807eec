//! Filter AST → placeholder-aliased expression triple.
//!
//! Compiles a [`QueryNode<Condition>`] tree, or a top-level list of trees,
//! into the `{names, values, expression}` triple consumed by the storage
//! scan. Attribute names hide behind `#`-prefixed aliases and literals behind
//! `:`-prefixed aliases so raw identifiers never collide with the store's
//! reserved words.
//!
//! Aliases derive from a *path index*: descending into child `i` of an
//! operator node appends `i` to the parent's path, with the root path
//! defaulting to `"0"`. Every leaf's alias is therefore unique across the
//! tree and reproducible from tree shape alone — rendering is a pure
//! function, with no counters carried between calls.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::ast::{Condition, QueryNode};

/// The rendered conditional-expression triple.
///
/// Serializes with the storage wire member names, omitting empty members, so
/// an empty filter serializes to `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Expression {
    /// Alias → attribute name
    #[serde(
        rename = "ExpressionAttributeNames",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub names: BTreeMap<String, String>,

    /// Alias → literal
    #[serde(
        rename = "ExpressionAttributeValues",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub values: BTreeMap<String, Value>,

    /// The aliased filter expression string
    #[serde(rename = "FilterExpression", skip_serializing_if = "String::is_empty")]
    pub expression: String,
}

impl Expression {
    /// Whether this is the no-op filter.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty() && self.values.is_empty() && self.expression.is_empty()
    }
}

/// Compile a list of filter trees into one expression triple.
///
/// Zero nodes yield the explicitly empty triple (no filter, not an error).
/// One node renders directly as the tree root. Multiple nodes are
/// equal-weight children of an implicit top-level AND: child `i` renders at
/// path `i`, and the joined result stays unparenthesized so it can embed
/// directly as a top-level filter string.
///
/// # Examples
///
/// ```
/// use condex::ast::{attribute, equals};
/// use condex::compiler::filter;
///
/// let expression = filter(&[attribute("source", equals("Angers"))]);
/// assert_eq!(expression.expression, "#0 = :0");
/// ```
pub fn filter(nodes: &[QueryNode<Condition>]) -> Expression {
    let mut out = Expression::default();
    out.expression = match nodes {
        [] => String::new(),
        [node] => render_node(node, "0", true, &mut out),
        many => {
            let rendered: Vec<String> = many
                .iter()
                .enumerate()
                .map(|(index, node)| render_node(node, &index.to_string(), false, &mut out))
                .filter(|fragment| !fragment.is_empty())
                .collect();
            rendered.join(" and ")
        }
    };
    out
}

fn render_node(
    node: &QueryNode<Condition>,
    path: &str,
    is_root: bool,
    out: &mut Expression,
) -> String {
    match node {
        QueryNode::Condition(condition) => render_condition(condition, path, out),
        QueryNode::Operator { operator, children } => {
            // Children dropped by a lenient leaf transformer leave empty
            // fragments behind; they must not contribute separators.
            let rendered: Vec<String> = children
                .iter()
                .enumerate()
                .map(|(index, child)| {
                    render_node(child, &format!("{}{}", path, index), false, out)
                })
                .filter(|fragment| !fragment.is_empty())
                .collect();
            let joined = rendered.join(&format!(" {} ", operator.keyword()));
            if is_root || rendered.len() <= 1 {
                joined
            } else {
                format!("({})", joined)
            }
        }
    }
}

fn render_condition(condition: &Condition, path: &str, out: &mut Expression) -> String {
    let name_alias = format!("#{}", path);
    out.names.insert(name_alias.clone(), condition.attribute.clone());

    if !condition.comparison.takes_value() {
        return condition.comparison.fragment(&name_alias, "");
    }

    match &condition.value {
        Some(Value::Object(subkeys)) => {
            let fragments: Vec<String> = subkeys
                .iter()
                .enumerate()
                .map(|(index, (subkey, literal))| {
                    let value_alias = format!(":{}{}", path, index);
                    out.values.insert(value_alias.clone(), literal.clone());
                    condition
                        .comparison
                        .fragment(&format!("{}.{}", name_alias, subkey), &value_alias)
                })
                .collect();
            let joined = fragments.join(" and ");
            if fragments.len() > 1 {
                format!("({})", joined)
            } else {
                joined
            }
        }
        value => {
            let value_alias = format!(":{}", path);
            out.values
                .insert(value_alias.clone(), value.clone().unwrap_or(Value::Null));
            condition.comparison.fragment(&name_alias, &value_alias)
        }
    }
}
