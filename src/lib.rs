//! syslog-view
//!
//! Client-side state core of a live, filterable, paginated syslog viewer.
//!
//! Pure Core / Impure Shell:
//! - [`model`], [`state`] and [`details`] are pure data and transitions;
//! - [`store`] holds the single versioned state tree;
//! - [`app`], [`channel`], [`host`] and [`view`] talk to the server, the host
//!   and the terminal.

pub mod app;
pub mod channel;
pub mod config;
pub mod details;
pub mod host;
pub mod logging;
pub mod model;
pub mod state;
pub mod store;
pub mod view;

pub use app::App;
pub use state::{Effect, State};
pub use store::Store;
