//! Syslog entries as delivered by the server.
//!
//! Entries are immutable on the client: a new page replaces the old one wholesale.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned entry identifier. Monotonically increasing and unique.
pub type EntryId = u64;

/// Syslog facility (RFC 5424 numbering, serialized by name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Facility {
    /// Kernel messages.
    Kernel,
    /// User-level messages.
    User,
    /// Mail system.
    Mail,
    /// System daemons.
    System,
    /// Security/authorization messages.
    Authorization1,
    /// Messages generated internally by syslogd.
    Internal,
    /// Line printer subsystem.
    Printer,
    /// Network news subsystem.
    Network,
    /// UUCP subsystem.
    Uucp,
    /// Clock daemon.
    Clock1,
    /// Security/authorization messages.
    Authorization2,
    /// FTP daemon.
    Ftp,
    /// NTP subsystem.
    Ntp,
    /// Log audit.
    Audit,
    /// Log alert.
    Alert,
    /// Clock daemon.
    Clock2,
    /// Local use 0.
    Local0,
    /// Local use 1.
    Local1,
    /// Local use 2.
    Local2,
    /// Local use 3.
    Local3,
    /// Local use 4.
    Local4,
    /// Local use 5.
    Local5,
    /// Local use 6.
    Local6,
    /// Local use 7.
    Local7,
}

impl Facility {
    /// All facilities in numeric order.
    pub const ALL: [Facility; 24] = [
        Facility::Kernel,
        Facility::User,
        Facility::Mail,
        Facility::System,
        Facility::Authorization1,
        Facility::Internal,
        Facility::Printer,
        Facility::Network,
        Facility::Uucp,
        Facility::Clock1,
        Facility::Authorization2,
        Facility::Ftp,
        Facility::Ntp,
        Facility::Audit,
        Facility::Alert,
        Facility::Clock2,
        Facility::Local0,
        Facility::Local1,
        Facility::Local2,
        Facility::Local3,
        Facility::Local4,
        Facility::Local5,
        Facility::Local6,
        Facility::Local7,
    ];

    /// Wire name of the facility (e.g. `"LOCAL0"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Facility::Kernel => "KERNEL",
            Facility::User => "USER",
            Facility::Mail => "MAIL",
            Facility::System => "SYSTEM",
            Facility::Authorization1 => "AUTHORIZATION1",
            Facility::Internal => "INTERNAL",
            Facility::Printer => "PRINTER",
            Facility::Network => "NETWORK",
            Facility::Uucp => "UUCP",
            Facility::Clock1 => "CLOCK1",
            Facility::Authorization2 => "AUTHORIZATION2",
            Facility::Ftp => "FTP",
            Facility::Ntp => "NTP",
            Facility::Audit => "AUDIT",
            Facility::Alert => "ALERT",
            Facility::Clock2 => "CLOCK2",
            Facility::Local0 => "LOCAL0",
            Facility::Local1 => "LOCAL1",
            Facility::Local2 => "LOCAL2",
            Facility::Local3 => "LOCAL3",
            Facility::Local4 => "LOCAL4",
            Facility::Local5 => "LOCAL5",
            Facility::Local6 => "LOCAL6",
            Facility::Local7 => "LOCAL7",
        }
    }

    /// Parse a wire name. Returns `None` for unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Syslog severity, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// System is unusable.
    Emergency,
    /// Action must be taken immediately.
    Alert,
    /// Critical conditions.
    Critical,
    /// Error conditions.
    Error,
    /// Warning conditions.
    Warning,
    /// Normal but significant condition.
    Notice,
    /// Informational messages.
    Informational,
    /// Debug-level messages.
    Debug,
}

impl Severity {
    /// All severities in numeric order.
    pub const ALL: [Severity; 8] = [
        Severity::Emergency,
        Severity::Alert,
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Notice,
        Severity::Informational,
        Severity::Debug,
    ];

    /// Wire name, e.g. `ERROR`.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Emergency => "EMERGENCY",
            Severity::Alert => "ALERT",
            Severity::Critical => "CRITICAL",
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Notice => "NOTICE",
            Severity::Informational => "INFORMATIONAL",
            Severity::Debug => "DEBUG",
        }
    }

    /// Parse a wire name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Syslog message payload.
///
/// `data` is opaque text. In practice it is usually a JSON-encoded object of
/// namespaced structured data, but it may also be pre-serialized, double-encoded,
/// or not JSON at all; see [`crate::details::decode_data`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Msg {
    /// Syslog facility.
    pub facility: Option<Facility>,
    /// Syslog severity.
    pub severity: Option<Severity>,
    /// Protocol version.
    pub version: u32,
    /// Origin timestamp (unix seconds) as reported by the sender.
    pub timestamp: Option<f64>,
    /// Originating host.
    pub hostname: Option<String>,
    /// Originating application.
    pub app_name: Option<String>,
    /// Process id.
    pub procid: Option<String>,
    /// Message id.
    pub msgid: Option<String>,
    /// Structured data as sent by the server.
    pub data: Option<String>,
    /// Message text.
    pub msg: Option<String>,
}

/// One syslog record as stored by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Server-assigned id, increasing with arrival.
    pub id: EntryId,
    /// Receipt timestamp (unix seconds).
    pub timestamp: f64,
    /// The syslog message.
    pub msg: Msg,
}

impl Entry {
    /// Whether the entry should be rendered with error styling.
    pub fn is_error(&self) -> bool {
        self.msg.severity == Some(Severity::Error)
    }

    /// Whether the entry should be rendered with warning styling.
    pub fn is_warning(&self) -> bool {
        self.msg.severity == Some(Severity::Warning)
    }
}
