//! JSON export of selected entries for copy and download.

use super::decode_data;
use crate::model::Entry;
use serde_json::{Map, Value};

/// MIME type of downloaded exports.
pub const EXPORT_MIME: &str = "text/json";

/// Pretty-printed JSON array of `entries`.
///
/// Each `msg.data` is replaced by its decoded form and the original string is kept
/// as `msg.data_raw`. `exc_info` strings inside decoded namespaces are split into
/// line arrays.
pub fn encode_entries(entries: &[Entry]) -> Result<String, serde_json::Error> {
    let values = entries
        .iter()
        .map(export_entry)
        .collect::<Result<Vec<_>, _>>()?;
    serde_json::to_string_pretty(&values)
}

fn export_entry(entry: &Entry) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(entry)?;

    if let Some(msg) = value.get_mut("msg").and_then(Value::as_object_mut) {
        let raw = entry.msg.data.clone();
        msg.insert(
            "data".to_owned(),
            raw.as_deref().map_or(Value::Null, export_data),
        );
        msg.insert("data_raw".to_owned(), raw.map_or(Value::Null, Value::String));
    }

    Ok(value)
}

fn export_data(raw: &str) -> Value {
    match decode_data(raw) {
        Value::Object(namespaces) => Value::Object(
            namespaces
                .into_iter()
                .map(|(key, value)| (key, split_exc_info(value)))
                .collect::<Map<_, _>>(),
        ),
        other => other,
    }
}

fn split_exc_info(mut namespace: Value) -> Value {
    if let Some(Value::String(text)) = namespace.get("exc_info") {
        let lines = text.split('\n').map(Value::from).collect();
        namespace["exc_info"] = Value::Array(lines);
    }
    namespace
}

/// File name for a download of `entries`.
pub fn download_file_name(entries: &[Entry]) -> String {
    match entries {
        [entry] => format!("syslogEntry{}.json", entry.id),
        _ => "syslogEntries.json".to_owned(),
    }
}
