//! Query filter sent to the server.
//!
//! The filter travels over the wire exactly as serialized here: every field is
//! present and `null` means "unset".

use crate::model::entry::{EntryId, Facility, Severity};
use crate::model::error::FilterError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default page size.
pub const DEFAULT_MAX_RESULTS: u32 = 50;

/// Query predicate constraining which entries the server returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Page size. `None` is unbounded.
    pub max_results: Option<u32>,
    /// Pagination cursor. `None` is live; `Some` pins the page to entries at or
    /// before this id.
    pub last_id: Option<EntryId>,
    /// Lower bound on the server receive time.
    pub entry_timestamp_from: Option<f64>,
    /// Upper bound on the server receive time.
    pub entry_timestamp_to: Option<f64>,
    /// Syslog facility.
    pub facility: Option<Facility>,
    /// Syslog severity.
    pub severity: Option<Severity>,
    /// Exact hostname.
    pub hostname: Option<String>,
    /// Exact application name.
    pub app_name: Option<String>,
    /// Exact process id.
    pub procid: Option<String>,
    /// Exact message id.
    pub msgid: Option<String>,
    /// Exact message text.
    pub msg: Option<String>,
}

impl Default for Filter {
    fn default() -> Self {
        Self::with_max_results(Some(DEFAULT_MAX_RESULTS))
    }
}

impl Filter {
    /// Empty filter with the given page size.
    pub fn with_max_results(max_results: Option<u32>) -> Self {
        Self {
            max_results,
            last_id: None,
            entry_timestamp_from: None,
            entry_timestamp_to: None,
            facility: None,
            severity: None,
            hostname: None,
            app_name: None,
            procid: None,
            msgid: None,
            msg: None,
        }
    }

    /// Live filters track the newest entries (no cursor pinned).
    pub fn is_live(&self) -> bool {
        self.last_id.is_none()
    }

    /// Frozen filters are pinned to a historical page.
    pub fn is_frozen(&self) -> bool {
        self.last_id.is_some()
    }

    /// Copy of this filter with every predicate reset.
    ///
    /// `max_results` and `last_id` are kept: page size is a view preference and the
    /// cursor belongs to pagination.
    pub fn cleared(&self) -> Self {
        Self {
            last_id: self.last_id,
            ..Self::with_max_results(self.max_results)
        }
    }

    /// Read a single field.
    pub fn get(&self, field: FilterField) -> FilterValue {
        fn text(value: &Option<String>) -> FilterValue {
            value.clone().map_or(FilterValue::Null, FilterValue::Text)
        }

        match field {
            FilterField::MaxResults => self.max_results.map_or(FilterValue::Null, FilterValue::Count),
            FilterField::LastId => self.last_id.map_or(FilterValue::Null, FilterValue::Id),
            FilterField::EntryTimestampFrom => self
                .entry_timestamp_from
                .map_or(FilterValue::Null, FilterValue::Timestamp),
            FilterField::EntryTimestampTo => self
                .entry_timestamp_to
                .map_or(FilterValue::Null, FilterValue::Timestamp),
            FilterField::Facility => self.facility.map_or(FilterValue::Null, FilterValue::Facility),
            FilterField::Severity => self.severity.map_or(FilterValue::Null, FilterValue::Severity),
            FilterField::Hostname => text(&self.hostname),
            FilterField::AppName => text(&self.app_name),
            FilterField::Procid => text(&self.procid),
            FilterField::Msgid => text(&self.msgid),
            FilterField::Msg => text(&self.msg),
        }
    }

    /// Whether a field currently holds a value.
    pub fn is_set(&self, field: FilterField) -> bool {
        !matches!(self.get(field), FilterValue::Null)
    }

    /// Write a single field.
    ///
    /// `FilterValue::Null` clears any field. Empty text is treated as `Null`, the same
    /// way an emptied input box is.
    ///
    /// # Errors
    ///
    /// Returns `FilterError::TypeMismatch` when the value kind does not fit the field,
    /// and `FilterError::ZeroPageSize` for `max_results = 0`. The filter is left
    /// untouched on error.
    pub fn set(&mut self, field: FilterField, value: FilterValue) -> Result<(), FilterError> {
        let value = match value {
            FilterValue::Text(text) if text.is_empty() => FilterValue::Null,
            other => other,
        };

        match (field, value) {
            (FilterField::MaxResults, FilterValue::Count(0)) => {
                return Err(FilterError::ZeroPageSize);
            }
            (FilterField::MaxResults, FilterValue::Count(n)) => self.max_results = Some(n),
            (FilterField::MaxResults, FilterValue::Null) => self.max_results = None,
            (FilterField::LastId, FilterValue::Id(id)) => self.last_id = Some(id),
            (FilterField::LastId, FilterValue::Null) => self.last_id = None,
            (FilterField::EntryTimestampFrom, FilterValue::Timestamp(t)) => {
                self.entry_timestamp_from = Some(t)
            }
            (FilterField::EntryTimestampFrom, FilterValue::Null) => self.entry_timestamp_from = None,
            (FilterField::EntryTimestampTo, FilterValue::Timestamp(t)) => {
                self.entry_timestamp_to = Some(t)
            }
            (FilterField::EntryTimestampTo, FilterValue::Null) => self.entry_timestamp_to = None,
            (FilterField::Facility, FilterValue::Facility(f)) => self.facility = Some(f),
            (FilterField::Facility, FilterValue::Null) => self.facility = None,
            (FilterField::Severity, FilterValue::Severity(s)) => self.severity = Some(s),
            (FilterField::Severity, FilterValue::Null) => self.severity = None,
            (field, FilterValue::Text(text)) if field.is_text() => {
                *self.text_mut(field) = Some(text);
            }
            (field, FilterValue::Null) if field.is_text() => {
                *self.text_mut(field) = None;
            }
            (field, value) => {
                return Err(FilterError::TypeMismatch {
                    field,
                    value: value.kind(),
                });
            }
        }

        Ok(())
    }

    fn text_mut(&mut self, field: FilterField) -> &mut Option<String> {
        match field {
            FilterField::Hostname => &mut self.hostname,
            FilterField::AppName => &mut self.app_name,
            FilterField::Procid => &mut self.procid,
            FilterField::Msgid => &mut self.msgid,
            _ => &mut self.msg,
        }
    }
}

/// Names of the filter fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    /// Page size.
    MaxResults,
    /// Page cursor.
    LastId,
    /// Lower time bound.
    EntryTimestampFrom,
    /// Upper time bound.
    EntryTimestampTo,
    /// Syslog facility.
    Facility,
    /// Syslog severity.
    Severity,
    /// Originating host.
    Hostname,
    /// Originating application.
    AppName,
    /// Process id.
    Procid,
    /// Message id.
    Msgid,
    /// Message text.
    Msg,
}

impl FilterField {
    /// Every field in wire order.
    pub const ALL: [FilterField; 11] = [
        FilterField::MaxResults,
        FilterField::LastId,
        FilterField::EntryTimestampFrom,
        FilterField::EntryTimestampTo,
        FilterField::Facility,
        FilterField::Severity,
        FilterField::Hostname,
        FilterField::AppName,
        FilterField::Procid,
        FilterField::Msgid,
        FilterField::Msg,
    ];

    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterField::MaxResults => "max_results",
            FilterField::LastId => "last_id",
            FilterField::EntryTimestampFrom => "entry_timestamp_from",
            FilterField::EntryTimestampTo => "entry_timestamp_to",
            FilterField::Facility => "facility",
            FilterField::Severity => "severity",
            FilterField::Hostname => "hostname",
            FilterField::AppName => "app_name",
            FilterField::Procid => "procid",
            FilterField::Msgid => "msgid",
            FilterField::Msg => "msg",
        }
    }

    /// Free-text fields (substring match on the server).
    pub fn is_text(self) -> bool {
        matches!(
            self,
            FilterField::Hostname
                | FilterField::AppName
                | FilterField::Procid
                | FilterField::Msgid
                | FilterField::Msg
        )
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value for a single filter field.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    /// Unset.
    Null,
    /// Page size.
    Count(u32),
    /// Entry id.
    Id(EntryId),
    /// Seconds since the epoch.
    Timestamp(f64),
    /// Syslog facility.
    Facility(Facility),
    /// Syslog severity.
    Severity(Severity),
    /// Text value.
    Text(String),
}

impl FilterValue {
    /// Short name of the value kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FilterValue::Null => "null",
            FilterValue::Count(_) => "count",
            FilterValue::Id(_) => "id",
            FilterValue::Timestamp(_) => "timestamp",
            FilterValue::Facility(_) => "facility",
            FilterValue::Severity(_) => "severity",
            FilterValue::Text(_) => "text",
        }
    }

    /// Optional text, mapping `None` to `Null`.
    pub fn text(value: Option<impl Into<String>>) -> Self {
        value.map_or(FilterValue::Null, |v| FilterValue::Text(v.into()))
    }
}
