#![cfg(feature = "async")]

use json_config_store::{ConfigStore, Error};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("json_config_store_test_{}.json", name))
}

#[tokio::test]
async fn load_async_creates_default() {
    let path = temp_path("async_default");
    let _ = std::fs::remove_file(&path);

    let store = ConfigStore::load_async(&path).await.unwrap();
    assert!(store.is_empty());
    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw, serde_json::json!({ "ConfigVersion": "1.0", "Entries": [] }));
    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn save_async_then_reload() {
    let path = temp_path("async_roundtrip");
    let _ = std::fs::remove_file(&path);
    {
        let store = ConfigStore::load_async(&path).await.unwrap();
        store.set("a", "1").unwrap();
        store.set_typed("list", &vec![1, 2, 3]).unwrap();
        store.save_async().await.unwrap();
    }

    let store = ConfigStore::load_async(&path).await.unwrap();
    assert_eq!(store.get("a"), Some("1".to_string()));
    assert_eq!(store.get_typed::<Vec<i32>>("list").unwrap(), vec![1, 2, 3]);
    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn async_and_sync_save_write_the_same_bytes() {
    let sync_path = temp_path("async_vs_sync_a");
    let async_path = temp_path("async_vs_sync_b");
    let _ = std::fs::remove_file(&sync_path);
    let _ = std::fs::remove_file(&async_path);

    let a = ConfigStore::load(&sync_path).unwrap();
    let b = ConfigStore::load_async(&async_path).await.unwrap();
    for store in [&a, &b] {
        store.set("x", "1").unwrap();
        store.set("y", "2").unwrap();
    }
    a.save().unwrap();
    b.save_async().await.unwrap();

    assert_eq!(
        std::fs::read(&sync_path).unwrap(),
        std::fs::read(&async_path).unwrap()
    );
    let _ = std::fs::remove_file(&sync_path);
    let _ = std::fs::remove_file(&async_path);
}

#[tokio::test]
async fn build_async_respects_version_gate() {
    let path = temp_path("async_version");
    std::fs::write(&path, r#"{ "ConfigVersion": "0.9", "Entries": [] }"#).unwrap();

    let err = ConfigStore::load_async(&path).await.unwrap_err();
    assert!(matches!(err, Error::VersionMismatch { .. }));

    let store = ConfigStore::builder(&path)
        .allow_version_mismatch(true)
        .build_async()
        .await
        .unwrap();
    assert_eq!(store.loaded_version(), "0.9");
    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn save_async_creates_parent_directories() {
    let dir = std::env::temp_dir().join("json_config_store_test_dir_async_nested");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("deep").join("settings.json");

    let store = ConfigStore::load_async(&path).await.unwrap();
    std::fs::remove_dir_all(&dir).unwrap();
    store.set("k", "v").unwrap();
    store.save_async().await.unwrap();
    assert!(path.exists());
    let _ = std::fs::remove_dir_all(&dir);
}
