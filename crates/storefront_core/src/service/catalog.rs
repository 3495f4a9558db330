//! Catalog facade bundling the three resource services.
//!
//! # Responsibility
//! - Own one store per resource type, injected at construction.
//! - Expose product sub-lookups for linked category and inventory records.
//!
//! # Invariants
//! - Stores are never shared ambient state; each catalog owns its stores.

use crate::model::category::Category;
use crate::model::inventory::Inventory;
use crate::model::product::Product;
use crate::model::record::RecordId;
use crate::repo::memory::MemoryStore;
use crate::repo::sqlite::SqliteStore;
use crate::repo::store::{RecordStore, RepoResult};
use crate::service::cross_ref::{resolve_category, resolve_inventory};
use crate::service::error::ServiceResult;
use crate::service::resource_service::ResourceService;
use rusqlite::Connection;

/// Record counts per resource type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogSummary {
    pub products: usize,
    pub categories: usize,
    pub inventories: usize,
}

/// Product, Category and Inventory services over injected stores.
pub struct Catalog<P, C, I> {
    pub products: ResourceService<Product, P>,
    pub categories: ResourceService<Category, C>,
    pub inventories: ResourceService<Inventory, I>,
}

pub type MemoryCatalog =
    Catalog<MemoryStore<Product>, MemoryStore<Category>, MemoryStore<Inventory>>;

pub type SqliteCatalog<'conn> = Catalog<
    SqliteStore<'conn, Product>,
    SqliteStore<'conn, Category>,
    SqliteStore<'conn, Inventory>,
>;

impl<P, C, I> Catalog<P, C, I>
where
    P: RecordStore<Product>,
    C: RecordStore<Category>,
    I: RecordStore<Inventory>,
{
    pub fn new(products: P, categories: C, inventories: I) -> Self {
        Self {
            products: ResourceService::new(products),
            categories: ResourceService::new(categories),
            inventories: ResourceService::new(inventories),
        }
    }

    /// Category linked from a product.
    ///
    /// # Errors
    /// - `NotFound` when the product does not exist.
    /// - `NoLinkedRecord` / `LinkedRecordMissing` for an absent or dangling
    ///   `category_id`.
    pub fn product_category(&self, product_id: RecordId) -> ServiceResult<Category> {
        let product = self.products.get(product_id)?;
        resolve_category(self.categories.store(), &product)
    }

    /// Inventory linked from a product through `inventory_id`.
    pub fn product_inventory(&self, product_id: RecordId) -> ServiceResult<Inventory> {
        let product = self.products.get(product_id)?;
        resolve_inventory(self.inventories.store(), &product)
    }

    pub fn summary(&self) -> ServiceResult<CatalogSummary> {
        Ok(CatalogSummary {
            products: self.products.list(&Default::default())?.len(),
            categories: self.categories.list(&Default::default())?.len(),
            inventories: self.inventories.list(&Default::default())?.len(),
        })
    }
}

impl MemoryCatalog {
    /// Empty catalog backed by in-process maps.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new(), MemoryStore::new(), MemoryStore::new())
    }
}

impl<'conn> SqliteCatalog<'conn> {
    /// Catalog backed by the tables of a migrated connection.
    pub fn sqlite(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(Self::new(
            SqliteStore::try_new(conn)?,
            SqliteStore::try_new(conn)?,
            SqliteStore::try_new(conn)?,
        ))
    }
}
