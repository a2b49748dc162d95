use json_config_store::{ConfigStore, FlushPolicy, JsonOptions};

fn main() -> Result<(), json_config_store::Error> {
    let path = std::env::temp_dir().join("json_config_store_example_builder.json");

    // compact output, deeper nesting, tolerate files from other versions
    let store = ConfigStore::builder(&path)
        .policy(FlushPolicy::Immediate)
        .allow_version_mismatch(true)
        .options(JsonOptions {
            max_depth: 16,
            pretty: false,
            ..JsonOptions::default()
        })
        .build()?;

    store.set("name", "json-config-store")?;
    store.set("status", "awesome")?;

    println!("loaded version = {}", store.loaded_version());
    println!("On-disk JSON: {}", std::fs::read_to_string(store.path())?);
    println!("\nDebug output: {store:?}");

    let _ = std::fs::remove_file(&path);
    Ok(())
}
