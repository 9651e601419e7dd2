use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::errors::ServiceError;

/// Field names a record payload may carry.
pub const ACCEPTED_KEYS: [&str; 4] = ["id", "name", "age", "class"];

/// Stored record. `age` keeps the exact JSON number the client sent.
/// Extra fields are refused so a rewrite never drops data silently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Record {
    pub id: String,
    pub name: String,
    pub age: Number,
    pub class: String,
}

/// Update input: `id` selects the record, present fields overwrite it.
/// A field given as `null` is treated as absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RecordPatch {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<Number>,
    #[serde(default)]
    pub class: Option<String>,
}

/// Delete input. Other keys are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RecordId {
    pub id: String,
}

impl Record {
    /// Shallow merge of the patch; `id` is the match key and stays as is.
    pub fn apply(&mut self, patch: RecordPatch) {
        if let Some(name) = patch.name { self.name = name; }
        if let Some(age) = patch.age { self.age = age; }
        if let Some(class) = patch.class { self.class = class; }
    }
}

const INVALID_BODY: &str = "Invalid data format, request body must be a JSON object";

/// Parse a raw request body. Empty or malformed bodies are validation errors.
pub fn parse_body(body: &[u8]) -> Result<Value, ServiceError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ServiceError::validation(INVALID_BODY));
    }
    serde_json::from_slice(body).map_err(|e| ServiceError::validation(format!("{}: {}", INVALID_BODY, e)))
}

fn into_object(payload: Value) -> Result<Map<String, Value>, ServiceError> {
    match payload {
        Value::Object(map) => Ok(map),
        _ => Err(ServiceError::validation(INVALID_BODY)),
    }
}

/// One message per unrecognized key, in payload order.
fn unknown_keys(map: &Map<String, Value>) -> Vec<String> {
    map.keys()
        .filter(|k| !ACCEPTED_KEYS.contains(&k.as_str()))
        .map(|k| format!("Invalid key: {}", k))
        .collect()
}

fn typed<T: serde::de::DeserializeOwned>(map: Map<String, Value>) -> Result<T, ServiceError> {
    serde_json::from_value(Value::Object(map))
        .map_err(|e| ServiceError::validation(format!("Invalid data format: {}", e)))
}

/// Create payload: exactly the accepted keys, with the right JSON types.
pub fn decode_new_record(payload: Value) -> Result<Record, ServiceError> {
    let map = into_object(payload)?;
    if ACCEPTED_KEYS.iter().any(|k| !map.contains_key(*k)) {
        return Err(ServiceError::validation(format!(
            "Invalid data format, all keys should be present: {}",
            ACCEPTED_KEYS.join(", ")
        )));
    }
    let unknown = unknown_keys(&map);
    if !unknown.is_empty() {
        return Err(ServiceError::Validation(unknown));
    }
    typed(map)
}

/// Update payload: only accepted keys, `id` required.
pub fn decode_patch(payload: Value) -> Result<RecordPatch, ServiceError> {
    let map = into_object(payload)?;
    let unknown = unknown_keys(&map);
    if !unknown.is_empty() {
        return Err(ServiceError::Validation(unknown));
    }
    if !map.contains_key("id") {
        return Err(ServiceError::validation(
            "Invalid data format, id must be present to update a record",
        ));
    }
    typed(map)
}

/// Delete payload: `id` required.
pub fn decode_record_id(payload: Value) -> Result<RecordId, ServiceError> {
    let map = into_object(payload)?;
    if !map.contains_key("id") {
        return Err(ServiceError::validation(
            "Invalid data format, id must be present to delete a record",
        ));
    }
    typed(map)
}
