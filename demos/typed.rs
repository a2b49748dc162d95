use json_config_store::ConfigStore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Window {
    width: u32,
    height: u32,
    maximized: bool,
}

fn main() -> Result<(), json_config_store::Error> {
    let path = std::env::temp_dir().join("json_config_store_example_typed.json");
    let store = ConfigStore::builder(&path).auto_flush(true).build()?;

    store.set_typed(
        "window",
        &Window {
            width: 1280,
            height: 720,
            maximized: false,
        },
    )?;
    store.modify_typed::<Window, _>("window", |w| w.maximized = true)?;
    let window: Window = store.get_typed("window")?;
    println!("window = {window:?}");
    println!("stored as {:?}", store.get("window"));

    let launches: u32 = store.get_or_set_typed("launches", 0)?;
    store.modify_typed::<u32, _>("launches", |n| *n += 1)?;
    println!("launches before = {launches}, after = {}", store.get_typed::<u32>("launches")?);

    // a missing key is an error for modify_typed
    if let Err(e) = store.modify_typed::<u32, _>("missing", |n| *n += 1) {
        println!("modify_typed on a missing key: {e}");
    }

    let _ = std::fs::remove_file(&path);
    Ok(())
}
