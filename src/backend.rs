//! Where a [`ConfigStore`](crate::ConfigStore) keeps its live entries.
//!
//! The store owns one map for its whole life and is the only thing that
//! touches it. Mutation goes through `&self`, so a backend brings its own
//! interior mutability: a lock, or a map that is already shared-mutable.

/// String-to-string map holding a store's entries between loads and saves.
///
/// `len` is required, along with the lookups and updates: the store asks it
/// whether there is anything to clear or flush.
pub trait MapBackend {
    /// Upsert, handing back whatever value `key` held before.
    fn insert(&self, key: String, value: String) -> Option<String>;

    /// Value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Take `key` out, returning its value if it was there.
    fn remove(&self, key: &str) -> Option<String>;

    /// Copy of every entry, in no particular order.
    fn iter_snapshot(&self) -> Vec<(String, String)>;

    /// Number of stored entries.
    fn len(&self) -> usize;

    /// `true` when there are no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Membership test.
    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Remove every entry.
    fn clear(&self) {
        for (key, _) in self.iter_snapshot() {
            self.remove(&key);
        }
    }
}

/// Sharded map from `shardmap`; values come back as `Arc`s and are cloned out.
impl MapBackend for shardmap::ShardMap<String, String> {
    fn insert(&self, key: String, value: String) -> Option<String> {
        let previous = shardmap::ShardMap::insert(self, key, value)?;
        Some(String::clone(&previous))
    }

    fn get(&self, key: &str) -> Option<String> {
        let value = shardmap::ShardMap::get(self, &key.to_owned())?;
        Some(String::clone(&value))
    }

    fn remove(&self, key: &str) -> Option<String> {
        let removed = shardmap::ShardMap::remove(self, &key.to_owned())?;
        Some(String::clone(&removed))
    }

    fn iter_snapshot(&self) -> Vec<(String, String)> {
        shardmap::ShardMap::iter_snapshot(self)
            .into_iter()
            .map(|(key, value)| (key, String::clone(&value)))
            .collect()
    }

    fn len(&self) -> usize {
        shardmap::ShardMap::len(self)
    }
}

/// Plain `HashMap` behind a `parking_lot` lock.
impl MapBackend for parking_lot::RwLock<std::collections::HashMap<String, String>> {
    fn insert(&self, key: String, value: String) -> Option<String> {
        self.write().insert(key, value)
    }

    fn get(&self, key: &str) -> Option<String> {
        self.read().get(key).cloned()
    }

    fn remove(&self, key: &str) -> Option<String> {
        self.write().remove(key)
    }

    fn iter_snapshot(&self) -> Vec<(String, String)> {
        self.read().clone().into_iter().collect()
    }

    fn len(&self) -> usize {
        self.read().len()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.read().contains_key(key)
    }

    fn clear(&self) {
        self.write().clear();
    }
}

#[cfg(feature = "dashmap")]
impl MapBackend for dashmap::DashMap<String, String> {
    fn insert(&self, key: String, value: String) -> Option<String> {
        dashmap::DashMap::insert(self, key, value)
    }

    fn get(&self, key: &str) -> Option<String> {
        dashmap::DashMap::get(self, key).map(|entry| entry.value().clone())
    }

    fn remove(&self, key: &str) -> Option<String> {
        dashmap::DashMap::remove(self, key).map(|(_, value)| value)
    }

    fn iter_snapshot(&self) -> Vec<(String, String)> {
        dashmap::DashMap::iter(self)
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    fn len(&self) -> usize {
        dashmap::DashMap::len(self)
    }

    fn contains_key(&self, key: &str) -> bool {
        dashmap::DashMap::contains_key(self, key)
    }

    fn clear(&self) {
        dashmap::DashMap::clear(self);
    }
}
