use serde_json::Value;

use crate::ast::comparison::Comparison;
use crate::ast::node::{QueryNode, condition};

/// A single comparison: attribute, comparison kind, optional literal.
///
/// `value` is `None` for the existence checks. An object-shaped value is an
/// object-valued comparison: the renderer fans it out into one fragment per
/// sub-key, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub attribute: String,
    pub comparison: Comparison,
    pub value: Option<Value>,
}

/// A comparison paired with its right-hand literal, ready to attach to an
/// attribute via [`attribute`].
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub comparison: Comparison,
    pub value: Value,
}

/// Equality predicate.
pub fn equals(value: impl Into<Value>) -> Predicate {
    Predicate {
        comparison: Comparison::Eq,
        value: value.into(),
    }
}

/// Negated-equality predicate.
pub fn not_equals(value: impl Into<Value>) -> Predicate {
    Predicate {
        comparison: Comparison::Neq,
        value: value.into(),
    }
}

/// Prefix-match predicate. An object value targets individual sub-keys of a
/// nested attribute.
pub fn begins_with(value: impl Into<Value>) -> Predicate {
    Predicate {
        comparison: Comparison::BeginsWith,
        value: value.into(),
    }
}

/// Leaf node comparing one attribute.
///
/// ```
/// use condex::ast::{attribute, equals};
///
/// let node = attribute("source", equals("Angers"));
/// ```
pub fn attribute(attribute: impl Into<String>, predicate: Predicate) -> QueryNode<Condition> {
    condition(Condition {
        attribute: attribute.into(),
        comparison: predicate.comparison,
        value: Some(predicate.value),
    })
}

/// Leaf node asserting the attribute is present.
pub fn attribute_exists(attribute: impl Into<String>) -> QueryNode<Condition> {
    condition(Condition {
        attribute: attribute.into(),
        comparison: Comparison::Exists,
        value: None,
    })
}

/// Leaf node asserting the attribute is absent.
pub fn attribute_not_exists(attribute: impl Into<String>) -> QueryNode<Condition> {
    condition(Condition {
        attribute: attribute.into(),
        comparison: Comparison::NotExists,
        value: None,
    })
}
