use std::fmt;

/// Logical combinator joining the children of an operator node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
}

impl Operator {
    /// The storage-syntax keyword used when joining child fragments.
    pub fn keyword(self) -> &'static str {
        match self {
            Operator::And => "and",
            Operator::Or => "or",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A node of the filter tree.
///
/// The tree is a closed tagged union over the leaf payload type `T`:
/// a node is an operator node because it was constructed as one, never
/// because of which fields it happens to carry.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryNode<T> {
    /// Leaf wrapping one condition payload
    Condition(T),

    /// AND/OR combinator over ordered children.
    ///
    /// Children order is rendering-significant (it drives alias derivation)
    /// but not logically significant.
    Operator {
        operator: Operator,
        children: Vec<QueryNode<T>>,
    },
}

/// Build a leaf node.
pub fn condition<T>(payload: T) -> QueryNode<T> {
    QueryNode::Condition(payload)
}

/// Build an AND node over the given children.
pub fn and<T>(children: Vec<QueryNode<T>>) -> QueryNode<T> {
    QueryNode::Operator {
        operator: Operator::And,
        children,
    }
}

/// Build an OR node over the given children.
pub fn or<T>(children: Vec<QueryNode<T>>) -> QueryNode<T> {
    QueryNode::Operator {
        operator: Operator::Or,
        children,
    }
}

/// Render a tree into its bare conditional-expression string, without
/// placeholder aliasing.
///
/// Joining rules: a multi-child operator node joins its children with the
/// operator keyword and parenthesizes unless it is the tree root; a
/// single-child node collapses to that child with no keyword and no
/// parentheses of its own.
///
/// # Examples
///
/// ```
/// use condex::ast::{and, condition, or, render_expression};
///
/// let node = or(vec![
///     and(vec![condition("A"), condition("B")]),
///     condition("C"),
/// ]);
/// assert_eq!(render_expression(&node), "(A and B) or C");
/// ```
pub fn render_expression<T: fmt::Display>(node: &QueryNode<T>) -> String {
    render_node(node, true)
}

fn render_node<T: fmt::Display>(node: &QueryNode<T>, is_root: bool) -> String {
    match node {
        QueryNode::Condition(payload) => payload.to_string(),
        QueryNode::Operator { operator, children } => {
            let rendered: Vec<String> = children
                .iter()
                .map(|child| render_node(child, false))
                .collect();
            let joined = rendered.join(&format!(" {} ", operator.keyword()));
            if is_root || children.len() == 1 {
                joined
            } else {
                format!("({})", joined)
            }
        }
    }
}
