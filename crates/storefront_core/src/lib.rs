//! Core domain logic for the storefront catalog.
//! This crate is the single source of truth for catalog invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, LoggingConfig, ServiceConfig, StorageConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::category::{Category, CategoryDraft, CategoryFilter, CategoryPatch};
pub use model::inventory::{Inventory, InventoryDraft, InventoryFilter, InventoryPatch};
pub use model::product::{Product, ProductDraft, ProductFilter, ProductPatch};
pub use model::record::{Patch, Record, RecordId, ResourceKind, ValidationError};
pub use model::timestamp::Timestamp;
pub use repo::memory::MemoryStore;
pub use repo::sqlite::{SqlRecord, SqliteStore};
pub use repo::store::{RecordStore, RepoError, RepoResult};
pub use service::catalog::{Catalog, CatalogSummary, MemoryCatalog, SqliteCatalog};
pub use service::cross_ref::{resolve_category, resolve_inventory};
pub use service::error::{ErrorKind, ServiceError, ServiceResult};
pub use service::resource_service::{DeleteConfirmation, ResourceService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
