//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `storefront_core` linkage and the configured storage backend.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Usage: `storefront_cli [config.toml]`

use std::error::Error;
use std::process::ExitCode;
use storefront_core::db::open_db;
use storefront_core::{
    init_logging, Catalog, CatalogSummary, MemoryCatalog, RecordStore, ServiceConfig,
    SqliteCatalog, StorageConfig,
};
use storefront_core::{Category, Inventory, Product};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("storefront_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => ServiceConfig::load(path)?,
        None => ServiceConfig::default(),
    };
    init_logging(&config.logging)?;

    println!("storefront_core ping={}", storefront_core::ping());
    println!("storefront_core version={}", storefront_core::core_version());

    let summary = match &config.storage {
        StorageConfig::Memory => {
            println!("storage backend=memory");
            summarize(&MemoryCatalog::in_memory())?
        }
        StorageConfig::Sqlite { path } => {
            println!("storage backend=sqlite path={}", path.display());
            let conn = open_db(path)?;
            summarize(&SqliteCatalog::sqlite(&conn)?)?
        }
    };

    println!(
        "catalog products={} categories={} inventories={}",
        summary.products, summary.categories, summary.inventories
    );
    log::info!("event=cli_probe module=cli status=ok");
    Ok(())
}

fn summarize<P, C, I>(catalog: &Catalog<P, C, I>) -> Result<CatalogSummary, Box<dyn Error>>
where
    P: RecordStore<Product>,
    C: RecordStore<Category>,
    I: RecordStore<Inventory>,
{
    Ok(catalog.summary()?)
}
