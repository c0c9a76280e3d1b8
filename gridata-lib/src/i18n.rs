//! Message catalog lookup.
//!
//! Server error messages are surfaced verbatim and mapped through a
//! translation table keyed by message; unmapped keys fall back to the raw
//! message, so a missing translation never hides an error.

use std::collections::HashMap;

use serde_json::Value;

/// A flat key-to-translation catalog.
///
/// # Example
///
/// ```
/// use gridata_lib::i18n::MessageCatalog;
/// use serde_json::json;
///
/// let catalog = MessageCatalog::from_json(&json!({
///     "form": { "save": "Guardar" },
///     "request": { "error": { "duplicate": "Ya existe" } }
/// }));
///
/// assert_eq!(catalog.lookup("form.save"), "Guardar");
/// assert_eq!(catalog.lookup("form.cancel"), "form.cancel");
/// assert_eq!(catalog.server_error("duplicate"), "Ya existe");
/// assert_eq!(catalog.server_error("ER_LOCK_TIMEOUT"), "ER_LOCK_TIMEOUT");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    /// Creates an empty catalog: every lookup falls back to its key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a catalog from a JSON object, flattening nested objects into
    /// dot-separated keys.
    pub fn from_json(value: &Value) -> Self {
        let mut messages = HashMap::new();
        if let Value::Object(map) = value {
            for (key, entry) in map {
                flatten(key.clone(), entry, &mut messages);
            }
        }
        Self { messages }
    }

    /// Adds or replaces a translation.
    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(key.into(), message.into());
    }

    /// Returns the translation for `key`, falling back to the key itself.
    pub fn lookup<'a>(&'a self, key: &'a str) -> &'a str {
        self.messages.get(key).map(String::as_str).unwrap_or(key)
    }

    /// The catalog key for a server error message.
    pub fn server_error_key(message: &str) -> String {
        format!("request.error.{message}")
    }

    /// Translates a server error message, falling back to the raw message.
    pub fn server_error<'a>(&'a self, message: &'a str) -> &'a str {
        match self.messages.get(&Self::server_error_key(message)) {
            Some(translated) => translated,
            None => message,
        }
    }
}

fn flatten(path: String, value: &Value, out: &mut HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            for (key, entry) in map {
                flatten(format!("{path}.{key}"), entry, out);
            }
        }
        Value::String(message) => {
            out.insert(path, message.clone());
        }
        _ => {}
    }
}
