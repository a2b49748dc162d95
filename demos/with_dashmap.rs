use dashmap::DashMap;
use json_config_store::ConfigStoreBuilder;

fn main() -> Result<(), json_config_store::Error> {
    let path = std::env::temp_dir().join("json_config_store_example_dashmap.json");

    let store = ConfigStoreBuilder::<DashMap<String, String>>::new(&path)
        .auto_flush(true)
        .build()?;

    store.set_typed("counter", &0u64)?;
    for _ in 0..10 {
        store.modify_typed::<u64, _>("counter", |v| *v += 1)?;
    }
    println!("counter = {:?}", store.get("counter"));

    store.extend([("x", "100"), ("y", "200")])?;
    println!("keys = {:?}", store.keys());

    let _ = std::fs::remove_file(&path);
    Ok(())
}
