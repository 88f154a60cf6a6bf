//! Configuration module.
//!
//! Precedence, lowest to highest: built-in defaults, the TOML config file, then
//! environment variables.

pub mod keybindings;
pub mod loader;

pub use keybindings::{parse_key, KeyBindings};
pub use loader::{load_config, ConfigError, ConfigFile, ResolvedConfig};
