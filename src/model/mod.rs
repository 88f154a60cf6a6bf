//! Domain model types (pure).
//!
//! All types in this module are plain data shared by the store, the engines and
//! the view.

pub mod column;
pub mod entry;
pub mod error;
pub mod filter;
pub mod key_action;
pub mod timestamp;

// Re-export for convenience
pub use column::{default_columns, CellValue, Column, ColumnName, ColumnType};
pub use entry::{Entry, EntryId, Facility, Msg, Severity};
pub use error::{ChannelError, ClipboardError, FilterError, SaveError};
pub use filter::{Filter, FilterField, FilterValue, DEFAULT_MAX_RESULTS};
pub use key_action::KeyAction;
