//! Table column descriptors.
//!
//! Column names form a closed set. Only order, visibility and width change at
//! runtime; the array order of `Vec<Column>` is the display order.

use crate::model::entry::Entry;
use crate::model::filter::FilterField;
use crate::model::timestamp;
use std::fmt;

/// Unique, fixed column key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnName {
    /// Entry id.
    Id,
    /// Server receive time.
    Timestamp,
    /// Syslog facility.
    Facility,
    /// Syslog severity.
    Severity,
    /// Syslog protocol version.
    Version,
    /// Timestamp carried in the message.
    MsgTimestamp,
    /// Originating host.
    Hostname,
    /// Originating application.
    AppName,
    /// Process id.
    Procid,
    /// Message id.
    Msgid,
    /// Structured data.
    Data,
    /// Message text.
    Msg,
}

impl ColumnName {
    /// Every column in default display order.
    pub const ALL: [ColumnName; 12] = [
        ColumnName::Id,
        ColumnName::Timestamp,
        ColumnName::Facility,
        ColumnName::Severity,
        ColumnName::Version,
        ColumnName::MsgTimestamp,
        ColumnName::Hostname,
        ColumnName::AppName,
        ColumnName::Procid,
        ColumnName::Msgid,
        ColumnName::Data,
        ColumnName::Msg,
    ];

    /// Name used in config and exports.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnName::Id => "id",
            ColumnName::Timestamp => "timestamp",
            ColumnName::Facility => "facility",
            ColumnName::Severity => "severity",
            ColumnName::Version => "version",
            ColumnName::MsgTimestamp => "msg_timestamp",
            ColumnName::Hostname => "hostname",
            ColumnName::AppName => "app_name",
            ColumnName::Procid => "procid",
            ColumnName::Msgid => "msgid",
            ColumnName::Data => "data",
            ColumnName::Msg => "msg",
        }
    }

    /// Parse a column key, e.g. from a drag payload.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Read this column's value out of an entry.
    pub fn read(self, entry: &Entry) -> CellValue<'_> {
        let msg = &entry.msg;
        match self {
            ColumnName::Id => CellValue::Number(entry.id as f64),
            ColumnName::Timestamp => CellValue::Timestamp(entry.timestamp),
            ColumnName::Facility => CellValue::text(msg.facility.map(|f| f.as_str())),
            ColumnName::Severity => CellValue::text(msg.severity.map(|s| s.as_str())),
            ColumnName::Version => CellValue::Number(f64::from(msg.version)),
            ColumnName::MsgTimestamp => msg.timestamp.map_or(CellValue::Empty, CellValue::Timestamp),
            ColumnName::Hostname => CellValue::text(msg.hostname.as_deref()),
            ColumnName::AppName => CellValue::text(msg.app_name.as_deref()),
            ColumnName::Procid => CellValue::text(msg.procid.as_deref()),
            ColumnName::Msgid => CellValue::text(msg.msgid.as_deref()),
            ColumnName::Data => CellValue::text(msg.data.as_deref()),
            ColumnName::Msg => CellValue::text(msg.msg.as_deref()),
        }
    }
}

impl fmt::Display for ColumnName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a column's values are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Plain text.
    String,
    /// Right-aligned number.
    Number,
    /// Seconds since the epoch, shown as local time.
    Timestamp,
}

/// Value read from an entry for one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue<'a> {
    /// Absent value.
    Empty,
    /// Text value.
    Text(&'a str),
    /// Numeric value.
    Number(f64),
    /// Seconds since the epoch.
    Timestamp(f64),
}

impl<'a> CellValue<'a> {
    fn text(value: Option<&'a str>) -> Self {
        value.map_or(CellValue::Empty, CellValue::Text)
    }

    /// Display string for a cell of the given column type.
    ///
    /// Values that don't match the column type render as empty.
    pub fn display(&self, kind: ColumnType) -> String {
        match (kind, self) {
            (ColumnType::String, CellValue::Text(text)) => (*text).to_string(),
            (ColumnType::Number, CellValue::Number(n)) => format_number(*n),
            (ColumnType::Timestamp, CellValue::Timestamp(t)) => timestamp::to_local_string(*t),
            _ => String::new(),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Column descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Which entry field the column shows.
    pub name: ColumnName,
    /// How cells are formatted.
    pub kind: ColumnType,
    /// Header text.
    pub label: &'static str,
    /// Filter field edited inline from this column's header, if any.
    pub filter: Option<FilterField>,
    /// Whether the column is drawn.
    pub visible: bool,
    /// Relative width in display units.
    pub width: f64,
}

impl Column {
    const fn new(
        name: ColumnName,
        kind: ColumnType,
        label: &'static str,
        filter: Option<FilterField>,
        visible: bool,
        width: f64,
    ) -> Self {
        Self {
            name,
            kind,
            label,
            filter,
            visible,
            width,
        }
    }

    /// Display string for this column's value in `entry`.
    pub fn display(&self, entry: &Entry) -> String {
        self.name.read(entry).display(self.kind)
    }
}

/// Static default layout.
pub fn default_columns() -> Vec<Column> {
    use ColumnName as N;
    use ColumnType as T;

    vec![
        Column::new(N::Id, T::Number, "ID", None, true, 4.0),
        Column::new(N::Timestamp, T::Timestamp, "Timestamp", None, true, 12.0),
        Column::new(N::Facility, T::String, "Facility", Some(FilterField::Facility), false, 5.0),
        Column::new(N::Severity, T::String, "Severity", Some(FilterField::Severity), true, 5.0),
        Column::new(N::Version, T::Number, "Version", None, false, 5.0),
        Column::new(N::MsgTimestamp, T::Timestamp, "Msg timestamp", None, false, 15.0),
        Column::new(N::Hostname, T::String, "Hostname", Some(FilterField::Hostname), false, 10.0),
        Column::new(N::AppName, T::String, "App name", Some(FilterField::AppName), false, 10.0),
        Column::new(N::Procid, T::String, "Proc ID", Some(FilterField::Procid), false, 6.0),
        Column::new(N::Msgid, T::String, "Message ID", Some(FilterField::Msgid), true, 10.0),
        Column::new(N::Data, T::String, "Data", None, false, 15.0),
        Column::new(N::Msg, T::String, "Message", Some(FilterField::Msg), true, 50.0),
    ]
}
