//! Core store type and builder.

use crate::backend::MapBackend;
use crate::document::{to_document, to_mapping, ConfigDocument, CURRENT_VERSION};
use crate::error::{Error, Result};
use crate::flush::FlushPolicy;
use crate::persist::{load_or_create, write_document};
use crate::serializer::{JsonOptions, JsonSerializer};
use crate::DefaultBackend;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Versioned key-value configuration store backed by one JSON file.
///
/// Values are strings; typed values are stored as their JSON text and decoded
/// on the way out. Use [`load`](ConfigStore::load) for the defaults (manual
/// flush, strict version check) or [`builder`](ConfigStore::builder) for
/// full control.
///
/// The store assumes it is the only writer of its file. Two stores on the
/// same path will overwrite each other's changes.
pub struct ConfigStore<M = DefaultBackend> {
    map: M,
    path: PathBuf,
    serializer: JsonSerializer,
    policy: FlushPolicy,
    loaded_version: String,
}

impl ConfigStore<DefaultBackend> {
    /// Load (or create) the config file at `path` with manual flush. Fails
    /// with [`Error::VersionMismatch`] if the file has another version.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        ConfigStoreBuilder::new(path).build()
    }

    /// Async version of [`load`](Self::load).
    #[cfg(feature = "async")]
    pub async fn load_async(path: impl AsRef<Path>) -> Result<Self> {
        ConfigStoreBuilder::new(path).build_async().await
    }

    /// Start configuring a store on the default backend. Call
    /// [`.build()`](ConfigStoreBuilder::build) when ready.
    pub fn builder(path: impl AsRef<Path>) -> ConfigStoreBuilder<DefaultBackend> {
        ConfigStoreBuilder::new(path)
    }
}

impl<M> ConfigStore<M>
where
    M: MapBackend,
{
    // ---- reads ----

    /// Get the raw value for `key`, or `None` if absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        self.map.get(key)
    }

    /// Decode the value for `key` as `T`.
    ///
    /// A missing key is handed to the decoder as "no value", so it fails with
    /// [`Error::Deserialize`] just like text that doesn't fit `T`.
    pub fn get_typed<T>(&self, key: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let text = self.map.get(key);
        self.serializer.decode_value(text.as_deref())
    }

    /// Decode the value for `key`, or store `default` and return it when the
    /// key is missing.
    pub fn get_or_set_typed<T>(&self, key: &str, default: T) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
    {
        if self.map.contains_key(key) {
            return self.get_typed(key);
        }
        self.set_typed(key, &default)?;
        Ok(default)
    }

    /// `true` if the key exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// `true` when the store has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// All keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .map
            .iter_snapshot()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        keys.sort();
        keys
    }

    /// All key-value pairs, sorted by key.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries = self.map.iter_snapshot();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// Path to the backing JSON file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Version string found in the file at load time. Saving always writes
    /// [`CURRENT_VERSION`], whatever this says.
    #[must_use]
    pub fn loaded_version(&self) -> &str {
        &self.loaded_version
    }

    /// Current flush policy.
    #[must_use]
    pub fn flush_policy(&self) -> FlushPolicy {
        self.policy
    }

    /// `true` when every mutation saves straight away.
    #[must_use]
    pub fn auto_flush(&self) -> bool {
        self.policy.is_auto()
    }

    /// Serializer options in use.
    #[must_use]
    pub fn options(&self) -> &JsonOptions {
        self.serializer.options()
    }

    // ---- writes ----

    /// Set `key` to `value`, replacing any previous value.
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        self.map.insert(key.into(), value.into());
        self.notify_mutation()
    }

    /// Store `value` as JSON text under `key`.
    pub fn set_typed<T>(&self, key: impl Into<String>, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let text = self.serializer.encode_value(value)?;
        self.set(key, text)
    }

    /// Decode the value at `key`, run `f` on it and store the result.
    ///
    /// Unlike [`get`](Self::get), a missing key is an error
    /// ([`Error::KeyNotFound`]): there is nothing to mutate.
    pub fn modify_typed<T, F>(&self, key: &str, f: F) -> Result<()>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut T),
    {
        let Some(text) = self.map.get(key) else {
            return Err(Error::KeyNotFound(key.to_owned()));
        };
        let mut value: T = self.serializer.decode_value(Some(&text))?;
        f(&mut value);
        self.set_typed(key, &value)
    }

    /// Remove a key. Returns `false` (and writes nothing) if it wasn't there.
    pub fn remove(&self, key: &str) -> Result<bool> {
        if self.map.remove(key).is_none() {
            return Ok(false);
        }
        self.notify_mutation()?;
        Ok(true)
    }

    /// Drop all entries. Only flushes if there was something to drop.
    pub fn clear(&self) -> Result<()> {
        if self.map.is_empty() {
            return Ok(());
        }
        self.map.clear();
        self.notify_mutation()
    }

    /// Bulk upsert. Triggers one flush at the end, not one per entry.
    pub fn extend<I, K, V>(&self, iter: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut changed = false;
        for (k, v) in iter {
            self.map.insert(k.into(), v.into());
            changed = true;
        }
        if changed {
            self.notify_mutation()?;
        }
        Ok(())
    }

    /// Change the flush policy.
    pub fn set_flush_policy(&mut self, policy: FlushPolicy) {
        self.policy = policy;
    }

    /// Turn auto-flush on or off.
    pub fn set_auto_flush(&mut self, auto_flush: bool) {
        self.policy = FlushPolicy::from(auto_flush);
    }

    // ---- persistence ----

    /// Snapshot the store as a document stamped with [`CURRENT_VERSION`].
    #[must_use]
    pub fn to_document(&self) -> ConfigDocument {
        to_document(self.map.iter_snapshot(), CURRENT_VERSION)
    }

    /// Overwrite the file with the current contents.
    pub fn save(&self) -> Result<()> {
        let doc = self.to_document();
        write_document(&self.path, &doc, &self.serializer)?;
        tracing::debug!(path = %self.path.display(), entries = doc.entries.len(), "saved config");
        Ok(())
    }

    /// Async version of [`save`](Self::save).
    #[cfg(feature = "async")]
    pub async fn save_async(&self) -> Result<()> {
        let doc = self.to_document();
        crate::persist::write_document_async(&self.path, &doc, &self.serializer).await?;
        tracing::debug!(path = %self.path.display(), entries = doc.entries.len(), "saved config");
        Ok(())
    }

    // ---- internal ----

    fn notify_mutation(&self) -> Result<()> {
        match self.policy {
            FlushPolicy::Immediate => self.save(),
            FlushPolicy::Manual => Ok(()),
        }
    }
}

impl<M> std::fmt::Debug for ConfigStore<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .field("loaded_version", &self.loaded_version)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures and loads a [`ConfigStore`].
///
/// ```rust,no_run
/// use json_config_store::ConfigStore;
///
/// let store = ConfigStore::builder("settings.json")
///     .auto_flush(true)
///     .allow_version_mismatch(true)
///     .build()
///     .unwrap();
/// store.set("theme", "dark").unwrap();
/// ```
///
/// Pick another backend by naming it on the builder:
///
/// ```rust,no_run
/// use json_config_store::ConfigStoreBuilder;
/// use parking_lot::RwLock;
/// use std::collections::HashMap;
///
/// let store = ConfigStoreBuilder::<RwLock<HashMap<String, String>>>::new("settings.json")
///     .build()
///     .unwrap();
/// ```
pub struct ConfigStoreBuilder<M = DefaultBackend> {
    path: PathBuf,
    policy: FlushPolicy,
    allow_version_mismatch: bool,
    options: JsonOptions,
    _marker: PhantomData<M>,
}

impl<M> ConfigStoreBuilder<M>
where
    M: MapBackend + Default,
{
    /// Builder for the file at `path`: manual flush, strict version check,
    /// default [`JsonOptions`].
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            policy: FlushPolicy::Manual,
            allow_version_mismatch: false,
            options: JsonOptions::default(),
            _marker: PhantomData,
        }
    }

    /// Set the flush policy (default: [`FlushPolicy::Manual`]).
    pub fn policy(mut self, policy: FlushPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Shorthand for `policy(FlushPolicy::from(yes))`.
    pub fn auto_flush(mut self, yes: bool) -> Self {
        self.policy = FlushPolicy::from(yes);
        self
    }

    /// Load files whose version isn't [`CURRENT_VERSION`] instead of failing.
    pub fn allow_version_mismatch(mut self, yes: bool) -> Self {
        self.allow_version_mismatch = yes;
        self
    }

    /// Replace the serializer options.
    pub fn options(mut self, options: JsonOptions) -> Self {
        self.options = options;
        self
    }

    /// Indent the file on save (default: on).
    pub fn pretty(mut self, yes: bool) -> Self {
        self.options.pretty = yes;
        self
    }

    /// Load (or create) the file and return the store.
    pub fn build(self) -> Result<ConfigStore<M>> {
        let serializer = JsonSerializer::new(self.options);
        let doc = load_or_create(&self.path, &serializer)?;
        self.finish(doc, serializer)
    }

    /// Async version of [`build`](Self::build).
    #[cfg(feature = "async")]
    pub async fn build_async(self) -> Result<ConfigStore<M>> {
        let serializer = JsonSerializer::new(self.options);
        let doc = crate::persist::load_or_create_async(&self.path, &serializer).await?;
        self.finish(doc, serializer)
    }

    fn finish(self, doc: ConfigDocument, serializer: JsonSerializer) -> Result<ConfigStore<M>> {
        doc.check_version(self.allow_version_mismatch)?;
        if !doc.is_current() {
            tracing::warn!(
                path = %self.path.display(),
                expected = CURRENT_VERSION,
                found = %doc.version,
                "loading config with mismatched version"
            );
        }

        let loaded_version = doc.version.clone();
        let map = M::default();
        for (k, v) in to_mapping(doc) {
            map.insert(k, v);
        }
        tracing::debug!(path = %self.path.display(), entries = map.len(), "loaded config");

        Ok(ConfigStore {
            map,
            path: self.path,
            serializer,
            policy: self.policy,
            loaded_version,
        })
    }
}

impl<M> std::fmt::Debug for ConfigStoreBuilder<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStoreBuilder")
            .field("path", &self.path)
            .field("policy", &self.policy)
            .field("allow_version_mismatch", &self.allow_version_mismatch)
            .field("options", &self.options)
            .finish()
    }
}
