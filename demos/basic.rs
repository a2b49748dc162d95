use json_config_store::ConfigStore;

fn main() -> Result<(), json_config_store::Error> {
    let path = std::env::temp_dir().join("json_config_store_example_basic.json");
    let store = ConfigStore::load(&path)?;

    // set / get / remove
    store.set("theme", "dark")?;
    store.set("language", "en")?;
    println!("theme    = {:?}", store.get("theme"));
    println!("language = {:?}", store.get("language"));
    println!("font     = {:?}", store.get("font"));
    println!("removed language? {}", store.remove("language")?);

    // bulk upsert
    store.extend([("editor", "vim"), ("shell", "fish")])?;
    println!("keys = {:?}", store.keys());
    println!("len  = {}", store.len());

    // nothing hits the disk until save() with the default policy
    store.save()?;
    println!("\nOn-disk JSON:\n{}", std::fs::read_to_string(store.path())?);

    let _ = std::fs::remove_file(&path);
    Ok(())
}
