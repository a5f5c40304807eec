use condex::ast::{QueryNode, and, condition, or, render_expression};

fn leaf(name: &str) -> QueryNode<String> {
    condition(name.to_string())
}

#[test]
fn test_renders_a_single_condition_without_operator() {
    let ast = and(vec![leaf("A")]);

    assert_eq!(render_expression(&ast), "A");
}

#[test]
fn test_renders_a_bare_condition_leaf() {
    let ast = leaf("A");

    assert_eq!(render_expression(&ast), "A");
}

#[test]
fn test_renders_a_single_and_condition() {
    let ast = and(vec![leaf("A"), leaf("B")]);

    assert_eq!(render_expression(&ast), "A and B");
}

#[test]
fn test_renders_a_single_or_condition() {
    let ast = or(vec![leaf("A"), leaf("B")]);

    assert_eq!(render_expression(&ast), "A or B");
}

#[test]
fn test_renders_multiple_nested_conditions() {
    let ast = or(vec![
        and(vec![leaf("A"), leaf("B")]),
        and(vec![leaf("C"), and(vec![leaf("D"), leaf("E")])]),
    ]);

    assert_eq!(render_expression(&ast), "(A and B) or (C and (D and E))");
}

#[test]
fn test_renders_more_than_two_children_in_a_node() {
    let ast = or(vec![
        and(vec![leaf("A"), leaf("B")]),
        and(vec![leaf("C"), leaf("D"), leaf("E")]),
    ]);

    assert_eq!(render_expression(&ast), "(A and B) or (C and D and E)");
}

#[test]
fn test_single_child_operator_keeps_the_childs_own_grouping() {
    // The root OR collapses, but its multi-child AND child still
    // parenthesizes as a non-root node.
    let ast = or(vec![and(vec![leaf("A"), leaf("B")])]);

    assert_eq!(render_expression(&ast), "(A and B)");
}

#[test]
fn test_rendering_is_referentially_transparent() {
    let ast = or(vec![
        and(vec![leaf("A"), leaf("B")]),
        and(vec![leaf("C"), leaf("D")]),
    ]);

    assert_eq!(render_expression(&ast), render_expression(&ast.clone()));
}
