//! Layered settings for Rust applications. Describe a struct, list your
//! sources, and gather.
//!
//! A gather fills a caller-owned struct from several sources, applied in a
//! fixed order so that later layers overwrite earlier ones field by field:
//!
//! ```ignore
//! #[derive(Default, Serialize, Deserialize)]
//! struct AppSettings {
//!     name: String,
//!     data: Data,
//! }
//! layered_settings::record!(AppSettings { name, data: nested });
//!
//! let mut settings = AppSettings::default();
//! Settings::options()
//!     .base_path("config/base.yaml")
//!     .env_default()
//!     .arg("--data-port", "data.port")
//!     .var("DATA_HOST", "data.host")
//!     .gather(&mut settings)?;
//! ```
//!
//! # Layer precedence
//!
//! ```text
//! Base file              .base_path()               (must exist when set)
//!        ↑ overridden by
//! Defaults table         .defaults() / .default_value()
//!        ↑ overridden by
//! Switch-named files     .args_file_override(["--config-file"])
//!        ↑ overridden by
//! Environment file       .env_override(["APP_ENV"]) + .env_search_paths()
//!        ↑ overridden by
//! Switch table           .arg("--port", "port")
//!        ↑ overridden by
//! Variable table         .var("PORT", "port")
//! ```
//!
//! The first error stops the gather. Layers that already ran are not undone.
//!
//! # Dotted paths
//!
//! Keyed layers (defaults, switches, variables) address fields by dotted path:
//! `data.port` is the `port` field of the nested `data` record. The set of
//! valid paths is the [`PathIndex`], built from the target before any source
//! is read. A keyed entry naming a path outside the index fails with
//! [`SettingsError::FieldDoesNotExist`] and writes nothing.
//!
//! Targets describe their fields through [`Node`], usually via the
//! [`record!`] macro. See the [`record`](mod@record) module.
//!
//! # Files
//!
//! `.yml`/`.yaml` files are read as YAML and `.json` files as JSON. A file
//! is merged over the whole target through serde: keys the file leaves out
//! keep their current values.
//!
//! The environment file is found by reading each trigger variable in turn. A
//! non-empty value names an environment, say `prod`, and each search directory
//! is tried for `prod.yml`, `prod.yaml`, `prod.json` and `prod`. The first file
//! found is loaded and the search ends there.
//!
//! # String values
//!
//! Switch and variable values are text, converted to the declared field type
//! by [`coerce()`]. An empty value never overwrites a field.
//!
//! # Error handling
//!
//! All fallible operations return [`SettingsError`]. Enable the `rich-errors`
//! feature to get [`miette`](https://docs.rs/miette) diagnostics.
//!
//! # Logging
//!
//! The gather emits `tracing` events at `debug` and `trace` level. No
//! subscriber is installed.

pub mod error;
pub mod record;
pub mod types;

mod args;
mod builder;
mod coerce;
mod env;
mod file;
mod index;
mod leaf;
pub(crate) mod merge;
mod overrides;
mod resolve;
mod writer;

#[cfg(test)]
mod fixtures;

pub use builder::{ReadOptions, Settings};
pub use coerce::coerce;
pub use error::{CoerceError, SettingsError};
pub use index::PathIndex;
pub use leaf::{Leaf, Slot};
pub use record::{FieldMut, Node, Target};
pub use resolve::Input;
pub use types::{DefaultsTable, Kind, Layer, LeafType, SearchPath, Value};
