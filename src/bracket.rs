//! Bracket-notation query-string parsing.
//!
//! Turns raw pairs like `or[adresse][beginsWith][0][code_insee]=49` into a
//! nested JSON tree following the usual bracket array/object convention:
//! all-digit (or empty) segments address array entries, duplicate branch keys
//! merge, and duplicate leaf keys collect their values into an array. Keys
//! and values are percent-decoded first, with `+` standing for a space.
//!
//! Parsing is lenient throughout: malformed pairs degrade to whatever prefix
//! scanned cleanly rather than failing, since arbitrary client query strings
//! flow through here.

use serde_json::{Map, Value};

/// Parse a raw query string into a nested key/value tree.
///
/// Always returns an object; an empty or unusable query yields `{}`.
pub fn parse(query: &str) -> Value {
    let mut root = Value::Object(Map::new());
    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (raw_key, raw_value) = match pair.split_once('=') {
            Some((key, value)) => (key, value),
            None => (pair, ""),
        };
        let key = percent_decode(raw_key);
        let value = percent_decode(raw_value);
        let segments = KeyScanner::new(&key).segments();
        if segments.is_empty() {
            continue;
        }
        insert(&mut root, &segments, Value::String(value));
    }
    root
}

struct KeyScanner {
    input: Vec<char>,
    position: usize,
}

impl KeyScanner {
    fn new(input: &str) -> Self {
        KeyScanner {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// Split `head[a][b]` into `["head", "a", "b"]`.
    fn segments(mut self) -> Vec<String> {
        let mut segments = Vec::new();
        let head = self.read_segment();
        if !head.is_empty() {
            segments.push(head);
        }
        while self.current_char() == Some('[') {
            self.advance();
            segments.push(self.read_segment());
            if self.current_char() == Some(']') {
                self.advance();
            }
        }
        segments
    }

    fn read_segment(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch == '[' || ch == ']' {
                break;
            }
            result.push(ch);
            self.advance();
        }
        result
    }
}

fn insert(node: &mut Value, segments: &[String], value: Value) {
    let Some((segment, rest)) = segments.split_first() else {
        return;
    };
    match node {
        Value::Object(entries) => insert_into_object(entries, segment, rest, value),
        Value::Array(elements) => insert_into_array(elements, segment, rest, value),
        // a scalar already claimed this slot; later pairs with a deeper
        // shape are dropped
        _ => {}
    }
}

fn insert_into_object(
    entries: &mut Map<String, Value>,
    segment: &str,
    rest: &[String],
    value: Value,
) {
    if rest.is_empty() {
        merge_leaf(entries, segment, value);
        return;
    }
    let child = entries
        .entry(segment.to_string())
        .or_insert_with(|| empty_container(&rest[0]));
    insert(child, rest, value);
}

fn insert_into_array(elements: &mut Vec<Value>, segment: &str, rest: &[String], value: Value) {
    let Some(index) = parse_index(segment, elements.len()) else {
        return;
    };
    if let Some(element) = elements.get_mut(index) {
        if rest.is_empty() {
            let old = element.take();
            *element = Value::Array(vec![old, value]);
        } else {
            insert(element, rest, value);
        }
        return;
    }
    // out-of-range indices append in order of appearance
    if rest.is_empty() {
        elements.push(value);
    } else {
        let mut child = empty_container(&rest[0]);
        insert(&mut child, rest, value);
        elements.push(child);
    }
}

fn merge_leaf(entries: &mut Map<String, Value>, key: &str, value: Value) {
    match entries.get_mut(key) {
        None => {
            entries.insert(key.to_string(), value);
        }
        Some(Value::Array(elements)) => elements.push(value),
        Some(existing) => {
            let old = existing.take();
            *existing = Value::Array(vec![old, value]);
        }
    }
}

/// An all-digit or empty segment addresses an array entry; empty means
/// append.
fn is_index_segment(segment: &str) -> bool {
    segment.is_empty() || segment.chars().all(|ch| ch.is_ascii_digit())
}

fn parse_index(segment: &str, len: usize) -> Option<usize> {
    if segment.is_empty() {
        Some(len)
    } else {
        segment.parse().ok()
    }
}

fn empty_container(next_segment: &str) -> Value {
    if is_index_segment(next_segment) {
        Value::Array(Vec::new())
    } else {
        Value::Object(Map::new())
    }
}

fn percent_decode(input: &str) -> String {
    let raw = input.as_bytes();
    let mut bytes = Vec::with_capacity(raw.len());
    let mut position = 0;
    while position < raw.len() {
        match raw[position] {
            b'+' => {
                bytes.push(b' ');
                position += 1;
            }
            b'%' => {
                let high = raw.get(position + 1).copied().and_then(hex_value);
                let low = raw.get(position + 2).copied().and_then(hex_value);
                match (high, low) {
                    (Some(high), Some(low)) => {
                        bytes.push(high * 16 + low);
                        position += 3;
                    }
                    // stray '%' stays literal
                    _ => {
                        bytes.push(b'%');
                        position += 1;
                    }
                }
            }
            byte => {
                bytes.push(byte);
                position += 1;
            }
        }
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|digit| digit as u8)
}

#[test]
fn test_simple_pairs() {
    let tree = parse("source[eq]=Angers&deduplicated[exists]=false");
    assert_eq!(tree["source"]["eq"], "Angers");
    assert_eq!(tree["deduplicated"]["exists"], "false");
}

#[test]
fn test_numeric_segments_build_arrays() {
    let tree = parse("or[0][source][eq]=a&or[1][source][eq]=b");
    assert_eq!(tree["or"][0]["source"]["eq"], "a");
    assert_eq!(tree["or"][1]["source"]["eq"], "b");
}

#[test]
fn test_duplicate_leaf_keys_collect() {
    let tree = parse("or[source][eq]=a&or[source][eq]=b&or[source][eq]=c");
    assert_eq!(
        tree["or"]["source"]["eq"],
        serde_json::json!(["a", "b", "c"])
    );
}

#[test]
fn test_percent_decoding() {
    let tree = parse("source[eq]=Francil%2Din&ville[eq]=Le+Mans");
    assert_eq!(tree["source"]["eq"], "Francil-in");
    assert_eq!(tree["ville"]["eq"], "Le Mans");
}
