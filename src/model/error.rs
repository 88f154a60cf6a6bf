//! Error types for syslog-view.
//!
//! The core never lets a failure escape its own boundary: every variant here is
//! either recovered locally or turned into a transient notification by the
//! [`crate::app::App`] shell.
//!
//! # Error Taxonomy
//!
//! - [`ChannelError`] - Remote sync channel failures (send failed, undecodable push)
//! - [`ClipboardError`] - Clipboard permission denial or write failure
//! - [`SaveError`] - Host file-save failure
//! - [`FilterError`] - A filter edit that does not fit the field
//!
//! Malformed `msg.data` payloads are not errors at all: they fall back to raw-string
//! handling in [`crate::details`].

use crate::model::filter::FilterField;
use thiserror::Error;

/// Failures talking to the remote sync channel.
///
/// **Recovery**: notify the user and keep going. The next filter push or server
/// snapshot supersedes whatever was lost.
#[derive(Debug, Error)]
pub enum ChannelError {
    /// The transport refused or dropped an outgoing message.
    #[error("Failed to send {topic} message: {reason}")]
    Send {
        /// Channel topic the message was sent on.
        topic: &'static str,
        /// Transport-specific reason.
        reason: String,
    },

    /// The transport is not connected.
    #[error("Remote channel is disconnected")]
    Disconnected,

    /// A server push could not be decoded into a remote snapshot.
    #[error("Invalid remote snapshot: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Clipboard write failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// The host reported a permission state other than granted/prompt.
    #[error("Clipboard write permission {0}")]
    PermissionDenied(String),

    /// The permission query itself failed.
    #[error("Clipboard permission query failed: {0}")]
    PermissionQuery(String),

    /// The write was attempted and failed.
    #[error("Clipboard write failed: {0}")]
    Write(String),
}

/// Host file-save failures.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Writing the file failed.
    #[error("Failed to save {file_name}: {source}")]
    Io {
        /// Name of the file being saved.
        file_name: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The host does not support file saving.
    #[error("File saving is not supported")]
    Unsupported,
}

/// Rejected filter edits.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// The value kind does not match the field.
    #[error("Filter field {field} does not accept a {value} value")]
    TypeMismatch {
        /// Field being edited.
        field: FilterField,
        /// Kind of the rejected value.
        value: &'static str,
    },

    /// Page size must be positive.
    #[error("Page size must be positive")]
    ZeroPageSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_send_error_names_topic() {
        let err = ChannelError::Send {
            topic: "filter",
            reason: "socket closed".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to send filter message: socket closed");
    }

    #[test]
    fn decode_error_converts_from_serde_json() {
        fn decode() -> Result<(), ChannelError> {
            let _: serde_json::Value = serde_json::from_str("{")?;
            Ok(())
        }
        assert!(matches!(decode(), Err(ChannelError::Decode(_))));
    }

    #[test]
    fn filter_type_mismatch_message_names_field() {
        let err = FilterError::TypeMismatch {
            field: FilterField::Severity,
            value: "text",
        };
        assert_eq!(
            err.to_string(),
            "Filter field severity does not accept a text value"
        );
    }
}
