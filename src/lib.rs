//! Versioned key-value configuration store backed by a single JSON file.
//!
//! Values are strings, or any serde type stored as its JSON text. The file is
//! loaded (or created) once, checked against [`CURRENT_VERSION`], and written
//! back in full on `save()`, or after every change with auto-flush on.
//!
//! ```rust,no_run
//! use json_config_store::ConfigStore;
//!
//! let store = ConfigStore::load("settings.json").unwrap();
//! store.set("theme", "dark").unwrap();
//! store.set_typed("window", &(1280, 720)).unwrap();
//! let (w, h): (u32, u32) = store.get_typed("window").unwrap();
//! store.save().unwrap();
//! # let _ = (w, h);
//! ```
//!
//! The file looks like this:
//!
//! ```json
//! {
//!   "ConfigVersion": "1.0",
//!   "Entries": [
//!     { "Key": "theme", "Value": "dark" },
//!     { "Key": "window", "Value": "[1280,720]" }
//!   ]
//! }
//! ```
//!
//! **Single owner only.** There is no locking: two stores (or two processes)
//! on the same file will clobber each other, and writes are not atomic.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod document;
pub mod error;
pub mod flush;
pub mod persist;
pub mod serializer;
pub mod store;

pub use document::{to_document, to_mapping, ConfigDocument, ConfigEntry, CURRENT_VERSION};
pub use error::{Error, Result};
pub use flush::FlushPolicy;
pub use serializer::{JsonOptions, JsonSerializer};
pub use store::{ConfigStore, ConfigStoreBuilder};

/// Default backend: ShardMap.
pub type DefaultBackend = shardmap::ShardMap<String, String>;
