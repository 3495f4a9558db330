//! Product foreign-key lookups.
//!
//! # Invariants
//! - A product without the reference yields `NoLinkedRecord`.
//! - A reference that does not resolve yields `LinkedRecordMissing`.
//! - Both map to the same not-found status; the cause is kept for logging.

use crate::model::category::Category;
use crate::model::inventory::Inventory;
use crate::model::product::Product;
use crate::model::record::{Record, RecordId};
use crate::repo::store::{RecordStore, RepoError};
use crate::service::error::{ServiceError, ServiceResult};
use log::warn;

/// Returns the category referenced by `product.category_id`.
pub fn resolve_category<S: RecordStore<Category>>(
    store: &S,
    product: &Product,
) -> ServiceResult<Category> {
    resolve_link(store, product.product_id, product.category_id)
}

/// Returns the inventory referenced by `product.inventory_id`.
pub fn resolve_inventory<S: RecordStore<Inventory>>(
    store: &S,
    product: &Product,
) -> ServiceResult<Inventory> {
    resolve_link(store, product.product_id, product.inventory_id)
}

fn resolve_link<R, S>(store: &S, product_id: RecordId, link: Option<RecordId>) -> ServiceResult<R>
where
    R: Record,
    S: RecordStore<R>,
{
    let Some(target_id) = link else {
        warn!(
            "event=resolve_{} module=service status=rejected product_id={product_id} error_code=no_link",
            R::KIND
        );
        return Err(ServiceError::NoLinkedRecord {
            product_id,
            target: R::KIND,
        });
    };

    match store.select_by_key(target_id) {
        Ok(record) => Ok(record),
        Err(RepoError::NotFound { .. }) => {
            warn!(
                "event=resolve_{} module=service status=rejected product_id={product_id} \
                 target_id={target_id} error_code=dangling_link",
                R::KIND
            );
            Err(ServiceError::LinkedRecordMissing {
                product_id,
                target: R::KIND,
                target_id,
            })
        }
        Err(err) => Err(err.into()),
    }
}
