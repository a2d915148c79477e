//! Normalisation of raw course request bodies.
//!
//! [`clean`] runs before deserialization and validation. It never adds or
//! removes keys, so presence checks downstream see exactly what the client sent.
//!
//! Rules, applied per key:
//! 1. HTML tags are stripped from string values.
//! 2. Strings are trimmed and internal whitespace runs collapse to one space.
//! 3. Strings left empty become `null`.
//! 4. `national_code` and `state_code` are upper-cased.
//! 5. A numeric-string `nominal_hours` becomes an integer.
//! 6. `cluster_id` and `unit_id` always become lists: `null` is `[]`, a scalar
//!    is wrapped, and numeric strings inside become integers.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

const UPPERCASE_FIELDS: [&str; 2] = ["national_code", "state_code"];
const INTEGER_FIELDS: [&str; 1] = ["nominal_hours"];
const ID_LIST_FIELDS: [&str; 2] = ["cluster_id", "unit_id"];

/// Applies every normalisation rule to a raw request body.
pub fn clean(fields: Map<String, Value>) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(key, value)| {
            let value = clean_field(&key, value);
            (key, value)
        })
        .collect()
}

fn clean_field(key: &str, value: Value) -> Value {
    let value = match value {
        Value::String(raw) => clean_text(&raw).map_or(Value::Null, Value::String),
        other => other,
    };

    if UPPERCASE_FIELDS.contains(&key) {
        return match value {
            Value::String(s) => Value::String(s.to_uppercase()),
            other => other,
        };
    }
    if INTEGER_FIELDS.contains(&key) {
        return numeric_string_to_int(value);
    }
    if ID_LIST_FIELDS.contains(&key) {
        return id_list(value);
    }
    value
}

/// Strips tags and squeezes whitespace. `None` when nothing is left.
fn clean_text(raw: &str) -> Option<String> {
    let stripped = HTML_TAG.replace_all(raw, "");
    let squeezed = WHITESPACE.replace_all(stripped.trim(), " ");
    (!squeezed.is_empty()).then(|| squeezed.into_owned())
}

fn numeric_string_to_int(value: Value) -> Value {
    match value {
        Value::String(s) => match s.trim().parse::<i64>() {
            Ok(n) => Value::from(n),
            Err(_) => Value::String(s),
        },
        other => other,
    }
}

fn id_list(value: Value) -> Value {
    match value {
        Value::Null => Value::Array(Vec::new()),
        Value::Array(items) => Value::Array(items.into_iter().map(numeric_string_to_int).collect()),
        scalar => Value::Array(vec![numeric_string_to_int(scalar)]),
    }
}
