//! Multipart form encoding for create/update payloads.
//!
//! Flattens a JSON object into text form fields: arrays are expanded with
//! numeric indices (`tags[0]`, `tags[1]`), nested objects with bracketed
//! paths (`address[city]`). Null fields are skipped.

use reqwest::multipart::Form;
use serde_json::Value;

/// Builds a multipart form from a JSON value.
///
/// The value is expected to be an object; anything else produces an empty
/// form, matching the flattening of a record with no fields.
pub fn form_from_value(value: &Value) -> Form {
    let mut form = Form::new();
    for (name, text) in flatten(value) {
        form = form.text(name, text);
    }
    form
}

/// Flattens a JSON object into `(field name, text value)` pairs.
pub fn flatten(value: &Value) -> Vec<(String, String)> {
    let mut fields = Vec::new();
    if let Value::Object(map) = value {
        for (key, field) in map {
            flatten_into(key.clone(), field, &mut fields);
        }
    }
    fields
}

fn flatten_into(path: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::Bool(b) => out.push((path, b.to_string())),
        Value::Number(n) => out.push((path, n.to_string())),
        Value::String(s) => out.push((path, s.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten_into(format!("{path}[{index}]"), item, out);
            }
        }
        Value::Object(map) => {
            for (key, field) in map {
                flatten_into(format!("{path}[{key}]"), field, out);
            }
        }
    }
}
