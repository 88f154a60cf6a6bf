//! Details panel view model and JSON export.
//!
//! `msg.data` is free text. Loggers following the `hat@1` convention put a JSON
//! object there with a `hat@1` namespace holding the call site (`name`,
//! `funcName`, `lineno`) and an optional formatted exception (`exc_info`).
//! Decoding never fails: anything that is not JSON is shown as text.

pub mod export;

pub use export::{download_file_name, encode_entries, EXPORT_MIME};

use crate::model::{timestamp, Entry};
use serde_json::Value;

/// Structured-data namespace carrying call-site and exception info.
pub const HAT_NAMESPACE: &str = "hat@1";

/// Decode `msg.data`.
///
/// Double-encoded payloads (a JSON string whose content is JSON) are unwrapped
/// once. Text that is not JSON comes back as a string, or as an array of lines
/// when it contains newlines or escaped `\n` sequences.
pub fn decode_data(raw: &str) -> Value {
    let text = match serde_json::from_str::<Value>(raw) {
        Ok(Value::String(inner)) => match serde_json::from_str::<Value>(&inner) {
            Ok(value) if !value.is_string() => return value,
            _ => inner,
        },
        Ok(value) => return value,
        Err(_) => raw.to_owned(),
    };

    text_fallback(&text)
}

fn text_fallback(text: &str) -> Value {
    if text.contains("\\n") {
        Value::Array(text.split("\\n").map(Value::from).collect())
    } else if text.contains('\n') {
        Value::Array(text.lines().map(Value::from).collect())
    } else {
        Value::String(text.to_owned())
    }
}

/// The `hat@1` namespace of decoded data, if present.
pub fn hat_info(data: &Value) -> Option<&Value> {
    data.get(HAT_NAMESPACE).filter(|v| v.is_object())
}

/// Call site as `name.funcName:lineno`.
pub fn hat_location(hat: &Value) -> Option<String> {
    let part = |key: &str| hat.get(key).and_then(scalar_text);
    let (name, func, line) = (part("name"), part("funcName"), part("lineno"));

    if name.is_none() && func.is_none() && line.is_none() {
        return None;
    }

    Some(format!(
        "{}.{}:{}",
        name.unwrap_or_default(),
        func.unwrap_or_default(),
        line.unwrap_or_default()
    ))
}

/// Formatted exception. Line arrays are joined; empty values count as absent.
pub fn hat_exception(hat: &Value) -> Option<String> {
    let text = match hat.get("exc_info")? {
        Value::String(s) => s.clone(),
        Value::Array(lines) => lines
            .iter()
            .filter_map(scalar_text)
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Null => return None,
        other => other.to_string(),
    };

    (!text.trim().is_empty()).then_some(text)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// One block of the details panel.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryDetails {
    /// Block heading.
    pub title: String,
    /// Message text.
    pub message: String,
    /// Formatted exception, when the data carries one.
    pub exception: Option<String>,
    /// Labeled fields in display order. Absent values are omitted.
    pub fields: Vec<(&'static str, String)>,
}

impl EntryDetails {
    /// Build the panel block for `entry`.
    pub fn from_entry(entry: &Entry) -> Self {
        let msg = &entry.msg;
        let data = msg.data.as_deref().map(decode_data);
        let hat = data.as_ref().and_then(hat_info);

        let candidates: [(&'static str, Option<String>); 10] = [
            ("Timestamp", Some(timestamp::to_local_string(entry.timestamp))),
            ("Severity", msg.severity.map(|s| s.to_string())),
            ("Location", hat.and_then(hat_location)),
            ("Msg time", msg.timestamp.map(timestamp::to_local_string)),
            ("Hostname", msg.hostname.clone()),
            ("App name", msg.app_name.clone()),
            ("Proc ID", msg.procid.clone()),
            ("Message ID", msg.msgid.clone()),
            ("Facility", msg.facility.map(|f| f.to_string())),
            ("Version", Some(msg.version.to_string())),
        ];

        Self {
            title: format!("Entry {}", entry.id),
            message: msg.msg.clone().unwrap_or_default(),
            exception: hat.and_then(hat_exception),
            fields: candidates
                .into_iter()
                .filter_map(|(label, value)| value.map(|v| (label, v)))
                .collect(),
        }
    }

    /// Value of a labeled field.
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
    }
}

/// Blocks for every selected entry, in selection order.
pub fn details_for(entries: &[Entry]) -> Vec<EntryDetails> {
    entries.iter().map(EntryDetails::from_entry).collect()
}

#[cfg(test)]
#[path = "details_tests.rs"]
mod tests;
