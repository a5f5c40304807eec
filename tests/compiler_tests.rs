use std::collections::BTreeMap;

use condex::ast::{
    attribute, attribute_exists, attribute_not_exists, begins_with, equals, not_equals, or,
};
use condex::compiler::{Expression, filter};
use serde_json::{Value, json};

fn names(entries: &[(&str, &str)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(alias, name)| (alias.to_string(), name.to_string()))
        .collect()
}

fn values(entries: &[(&str, &str)]) -> BTreeMap<String, Value> {
    entries
        .iter()
        .map(|(alias, literal)| (alias.to_string(), json!(literal)))
        .collect()
}

#[test]
fn test_filters_nothing() {
    let expression = filter(&[]);

    assert_eq!(expression, Expression::default());
    assert!(expression.is_empty());
}

#[test]
fn test_creates_a_filter_for_a_field_equality() {
    let expression = filter(&[attribute("source", equals("Angers"))]);

    assert_eq!(
        expression,
        Expression {
            names: names(&[("#0", "source")]),
            values: values(&[(":0", "Angers")]),
            expression: "#0 = :0".to_string(),
        }
    );
}

#[test]
fn test_creates_a_filter_for_a_negated_equality() {
    let expression = filter(&[attribute("source", not_equals("Angers"))]);

    assert_eq!(expression.expression, "NOT #0 = :0");
}

#[test]
fn test_creates_a_filter_for_a_field_that_does_not_exist() {
    let expression = filter(&[attribute_not_exists("source")]);

    assert_eq!(
        expression,
        Expression {
            names: names(&[("#0", "source")]),
            values: BTreeMap::new(),
            expression: "attribute_not_exists(#0)".to_string(),
        }
    );
}

#[test]
fn test_creates_a_filter_for_a_field_that_exists() {
    let expression = filter(&[attribute_exists("source")]);

    assert_eq!(
        expression,
        Expression {
            names: names(&[("#0", "source")]),
            values: BTreeMap::new(),
            expression: "attribute_exists(#0)".to_string(),
        }
    );
}

#[test]
fn test_creates_a_filter_for_a_field_that_begins_with_a_substring() {
    let expression = filter(&[attribute("adresse", begins_with(json!({"code_insee": "49"})))]);

    assert_eq!(
        expression,
        Expression {
            names: names(&[("#0", "adresse")]),
            values: values(&[(":00", "49")]),
            expression: "begins_with(#0.code_insee, :00)".to_string(),
        }
    );
}

#[test]
fn test_combines_equality_and_begins_with() {
    let expression = filter(&[
        attribute("source", equals("Angers")),
        attribute("adresse", begins_with(json!({"code_insee": "49"}))),
    ]);

    assert_eq!(
        expression,
        Expression {
            names: names(&[("#0", "source"), ("#1", "adresse")]),
            values: values(&[(":0", "Angers"), (":10", "49")]),
            expression: "#0 = :0 and begins_with(#1.code_insee, :10)".to_string(),
        }
    );
}

#[test]
fn test_combines_multiple_begins_with_for_the_same_object() {
    let expression = filter(&[attribute(
        "adresse",
        begins_with(json!({"code_insee": "49", "code_postal": "76"})),
    )]);

    assert_eq!(
        expression,
        Expression {
            names: names(&[("#0", "adresse")]),
            values: values(&[(":00", "49"), (":01", "76")]),
            expression: "(begins_with(#0.code_insee, :00) and begins_with(#0.code_postal, :01))"
                .to_string(),
        }
    );
}

#[test]
fn test_compiles_an_operator_tree_with_path_aliases() {
    let expression = filter(&[or(vec![
        attribute("source", equals("Angers")),
        attribute("source", equals("Hinaura")),
    ])]);

    assert_eq!(
        expression,
        Expression {
            names: names(&[("#00", "source"), ("#01", "source")]),
            values: values(&[(":00", "Angers"), (":01", "Hinaura")]),
            expression: "#00 = :00 or #01 = :01".to_string(),
        }
    );
}

#[test]
fn test_rendering_is_referentially_transparent() {
    let tree = [
        attribute("source", equals("Angers")),
        attribute("adresse", begins_with(json!({"code_insee": "49"}))),
    ];

    let first = serde_json::to_string(&filter(&tree)).unwrap();
    let second = serde_json::to_string(&filter(&tree)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_serializes_with_the_storage_wire_member_names() {
    let expression = filter(&[attribute("source", equals("Angers"))]);

    let json = serde_json::to_string(&expression).unwrap();

    assert_eq!(
        json,
        r##"{"ExpressionAttributeNames":{"#0":"source"},"ExpressionAttributeValues":{":0":"Angers"},"FilterExpression":"#0 = :0"}"##
    );
}

#[test]
fn test_serialization_omits_empty_members() {
    assert_eq!(
        serde_json::to_string(&filter(&[attribute_exists("source")])).unwrap(),
        r##"{"ExpressionAttributeNames":{"#0":"source"},"FilterExpression":"attribute_exists(#0)"}"##
    );
    assert_eq!(serde_json::to_string(&filter(&[])).unwrap(), "{}");
}
