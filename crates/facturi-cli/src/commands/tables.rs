//! Tables command - list the tables in the database.

use facturi_core::ProductStore;

use super::load_config;

pub async fn run(config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let store = ProductStore::open(&config.paths.database)?;

    for name in store.table_names()? {
        println!("{}", name);
    }

    Ok(())
}
