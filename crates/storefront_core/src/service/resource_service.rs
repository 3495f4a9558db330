//! Generic CRUD use-case service.
//!
//! # Responsibility
//! - Provide create/list/get/update/delete entry points for one resource.
//! - Mint identifiers and audit timestamps on create.
//! - Emit one metadata-only log event per operation.
//!
//! # Invariants
//! - Caller input never chooses the identifier of a new record.
//! - Service APIs never bypass store validation.
//! - Service layer remains storage-agnostic.

use crate::model::record::{Record, RecordId, ResourceKind};
use crate::model::timestamp::now_utc;
use crate::repo::store::{RecordStore, RepoResult};
use crate::service::error::{ErrorKind, ServiceError, ServiceResult};
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use uuid::Uuid;

/// Body returned by successful deletes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub detail: String,
}

impl DeleteConfirmation {
    pub fn for_resource(resource: ResourceKind) -> Self {
        Self {
            detail: format!("{} deleted successfully", resource.label()),
        }
    }
}

/// CRUD service over an injected record store.
pub struct ResourceService<R, S> {
    store: S,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record, S: RecordStore<R>> ResourceService<R, S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self {
            store,
            _record: PhantomData,
        }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates a record with a fresh identifier.
    ///
    /// # Contract
    /// - `created_at` and the update timestamp start equal (Inventory keeps
    ///   a caller-supplied `update_time`).
    pub fn create(&mut self, draft: R::Draft) -> ServiceResult<R> {
        let record = R::from_draft(Uuid::new_v4(), draft, now_utc());
        let id = record.id();
        finish::<R, _>("create", id, self.store.insert(record))
    }

    pub fn list(&self, filter: &R::Filter) -> ServiceResult<Vec<R>> {
        let records = self.store.select_all(filter).map_err(ServiceError::from);
        match &records {
            Ok(found) => debug!(
                "event={}_list module=service status=ok count={}",
                R::KIND,
                found.len()
            ),
            Err(err) => log_failure::<R>("list", None, err),
        }
        records
    }

    pub fn get(&self, id: RecordId) -> ServiceResult<R> {
        let record = self.store.select_by_key(id).map_err(ServiceError::from);
        match &record {
            Ok(_) => debug!("event={}_get module=service status=ok id={id}", R::KIND),
            Err(err) => log_failure::<R>("get", Some(id), err),
        }
        record
    }

    /// Merges the fields present in `patch` into an existing record.
    ///
    /// Returns `EmptyUpdate` for a patch without fields, even when `id` does
    /// not exist.
    pub fn update(&mut self, id: RecordId, patch: &R::Patch) -> ServiceResult<R> {
        finish::<R, _>("update", id, self.store.update_by_key(id, patch))
    }

    /// Deletes a record unconditionally; references to it are left dangling.
    pub fn delete(&mut self, id: RecordId) -> ServiceResult<DeleteConfirmation> {
        finish::<R, _>("delete", id, self.store.delete_by_key(id))
            .map(|()| DeleteConfirmation::for_resource(R::KIND))
    }
}

fn finish<R: Record, T>(op: &'static str, id: RecordId, result: RepoResult<T>) -> ServiceResult<T> {
    match result {
        Ok(value) => {
            info!("event={}_{op} module=service status=ok id={id}", R::KIND);
            Ok(value)
        }
        Err(err) => {
            let err = ServiceError::from(err);
            log_failure::<R>(op, Some(id), &err);
            Err(err)
        }
    }
}

fn log_failure<R: Record>(op: &'static str, id: Option<RecordId>, err: &ServiceError) {
    let id = id.map_or_else(|| "-".to_string(), |id| id.to_string());
    match err.kind() {
        ErrorKind::Internal => error!(
            "event={}_{op} module=service status=error id={id} error_code={} error={err}",
            R::KIND,
            err.code()
        ),
        _ => warn!(
            "event={}_{op} module=service status=rejected id={id} error_code={}",
            R::KIND,
            err.code()
        ),
    }
}
