//! Keyed record storage contract.
//!
//! # Responsibility
//! - Expose insert, filtered select, keyed select, keyed partial update and
//!   keyed delete for exactly one resource type.
//!
//! # Invariants
//! - `update_by_key` rejects an empty patch before looking up the key.
//! - `update_by_key` strictly advances the resource's update timestamp.
//! - `delete_by_key` is unconditional; referencing records are untouched.

use crate::db::DbError;
use crate::model::record::{Record, RecordId, ResourceKind, ValidationError};
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

/// Store-level error shared by all backends.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Db(#[from] DbError),
    #[error("{resource} not found: {id}")]
    NotFound {
        resource: ResourceKind,
        id: RecordId,
    },
    #[error("{resource} already exists: {id}")]
    Conflict {
        resource: ResourceKind,
        id: RecordId,
    },
    #[error("{resource} update carries no fields")]
    EmptyUpdate { resource: ResourceKind },
    #[error("invalid persisted {resource} data: {message}")]
    InvalidData {
        resource: ResourceKind,
        message: String,
    },
    #[error("connection schema version {found} does not match expected {expected}")]
    SchemaNotReady { found: u32, expected: u32 },
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl RepoError {
    pub(crate) fn not_found<R: Record>(id: RecordId) -> Self {
        Self::NotFound {
            resource: R::KIND,
            id,
        }
    }
}

/// Persistence surface for one resource type.
///
/// Reads take `&self`; writes take `&mut self` so a store has a single
/// writer. Callers sharing a store across threads provide their own lock.
pub trait RecordStore<R: Record> {
    /// Stores a new record and returns it unchanged.
    fn insert(&mut self, record: R) -> RepoResult<R>;

    /// Returns every record matching all constraints set in `filter`.
    fn select_all(&self, filter: &R::Filter) -> RepoResult<Vec<R>>;

    fn select_by_key(&self, id: RecordId) -> RepoResult<R>;

    /// Merges `patch` into the stored record and returns the merged result.
    fn update_by_key(&mut self, id: RecordId, patch: &R::Patch) -> RepoResult<R>;

    fn delete_by_key(&mut self, id: RecordId) -> RepoResult<()>;
}
