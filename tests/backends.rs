use json_config_store::backend::MapBackend;
use json_config_store::{ConfigStore, ConfigStoreBuilder};
use parking_lot::RwLock;
use shardmap::ShardMap;
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("json_config_store_test_{}.json", name))
}

#[test]
fn shardmap_set_get_remove_save_persist() {
    let path = temp_path("sm_persist");
    let _ = std::fs::remove_file(&path);

    {
        let store = ConfigStoreBuilder::<ShardMap<String, String>>::new(&path)
            .build()
            .unwrap();
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a"), Some("1".to_string()));
        store.set("a", "2").unwrap();
        assert_eq!(store.get("a"), Some("2".to_string()));
        assert!(store.remove("a").unwrap());
        assert_eq!(store.get("a"), None);
        store.set("b", "3").unwrap();
        store.save().unwrap();
    }

    let store = ConfigStore::load(&path).unwrap();
    assert_eq!(store.get("a"), None);
    assert_eq!(store.get("b"), Some("3".to_string()));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn len_contains_is_empty() {
    let path = temp_path("len_contains");
    let _ = std::fs::remove_file(&path);
    let store = ConfigStore::load(&path).unwrap();

    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert!(!store.contains("a"));

    store.set("a", "1").unwrap();
    store.set("b", "2").unwrap();
    assert_eq!(store.len(), 2);
    assert!(store.contains("a"));
    assert!(!store.contains("z"));

    store.remove("a").unwrap();
    assert_eq!(store.len(), 1);
    assert!(!store.contains("a"));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn rwlock_hashmap_crud() {
    let path = temp_path("rwlock");
    let _ = std::fs::remove_file(&path);
    let store = ConfigStoreBuilder::<RwLock<HashMap<String, String>>>::new(&path)
        .auto_flush(true)
        .build()
        .unwrap();
    store.set_typed("k", &100).unwrap();
    assert_eq!(store.get_typed::<i32>("k").unwrap(), 100);
    assert!(store.contains("k"));
    assert_eq!(store.len(), 1);

    let reloaded = ConfigStore::load(&path).unwrap();
    assert_eq!(reloaded.get("k"), Some("100".to_string()));

    store.clear().unwrap();
    assert!(store.is_empty());
    let _ = std::fs::remove_file(&path);
}

// ---- custom backend ---------------------------------------------------------

/// Only the required methods; everything else comes from the trait defaults.
#[derive(Default)]
struct SortedMap(Mutex<BTreeMap<String, String>>);

impl MapBackend for SortedMap {
    fn insert(&self, key: String, value: String) -> Option<String> {
        self.0.lock().unwrap().insert(key, value)
    }

    fn get(&self, key: &str) -> Option<String> {
        self.0.lock().unwrap().get(key).cloned()
    }

    fn remove(&self, key: &str) -> Option<String> {
        self.0.lock().unwrap().remove(key)
    }

    fn iter_snapshot(&self) -> Vec<(String, String)> {
        self.0.lock().unwrap().clone().into_iter().collect()
    }

    fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

#[test]
fn custom_backend_len_and_clear() {
    let path = temp_path("custom_clear");
    let _ = std::fs::remove_file(&path);
    let store = ConfigStoreBuilder::<SortedMap>::new(&path)
        .auto_flush(true)
        .build()
        .unwrap();

    store.set("a", "1").unwrap();
    store.set("b", "2").unwrap();
    assert_eq!(store.len(), 2);
    assert!(!store.is_empty());
    assert!(store.contains("a"));

    store.clear().unwrap();
    assert_eq!(store.get("a"), None);
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);

    // clear flushed the now-empty map
    assert!(ConfigStore::load(&path).unwrap().is_empty());
    let _ = std::fs::remove_file(&path);
}

#[test]
fn custom_backend_persists_and_reloads() {
    let path = temp_path("custom_persist");
    let _ = std::fs::remove_file(&path);
    {
        let store = ConfigStoreBuilder::<SortedMap>::new(&path).build().unwrap();
        store.set_typed("n", &7).unwrap();
        assert!(store.remove("missing").is_ok());
        store.save().unwrap();
    }
    let store = ConfigStoreBuilder::<SortedMap>::new(&path).build().unwrap();
    assert_eq!(store.get_typed::<i32>("n").unwrap(), 7);
    assert_eq!(store.keys(), vec!["n"]);
    let _ = std::fs::remove_file(&path);
}

#[cfg(feature = "dashmap")]
mod dashmap_tests {
    use super::temp_path;
    use dashmap::DashMap;
    use json_config_store::{ConfigStore, ConfigStoreBuilder};

    #[test]
    fn dashmap_crud() {
        let path = temp_path("dashmap_crud");
        let _ = std::fs::remove_file(&path);
        let store = ConfigStoreBuilder::<DashMap<String, String>>::new(&path)
            .build()
            .unwrap();
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a"), Some("1".to_string()));
        assert!(store.contains("a"));
        assert_eq!(store.len(), 1);
        assert!(store.remove("a").unwrap());
        assert!(store.is_empty());
        store.save().unwrap();
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn dashmap_persist_and_reload() {
        let path = temp_path("dashmap_persist");
        let _ = std::fs::remove_file(&path);
        {
            let store = ConfigStoreBuilder::<DashMap<String, String>>::new(&path)
                .build()
                .unwrap();
            store.set("key", "val").unwrap();
            store.save().unwrap();
        }
        let store = ConfigStore::load(&path).unwrap();
        assert_eq!(store.get("key"), Some("val".to_string()));
        let _ = std::fs::remove_file(&path);
    }
}
