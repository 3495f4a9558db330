//! Catalog domain model.
//!
//! # Responsibility
//! - Define the Product, Category and Inventory records and their payloads.
//! - Own merge, filter and validation rules shared by every storage backend.
//!
//! # Invariants
//! - Every record is identified by a server-minted `RecordId`.
//! - Deletion is a hard delete; there is no tombstone state.
//! - Foreign keys are stored verbatim and never checked for existence.

pub mod category;
pub mod inventory;
pub mod product;
pub mod record;
pub mod timestamp;

use serde::{Deserialize, Deserializer};

/// Deserializes a present JSON value (including `null`) as `Some(..)`.
///
/// Paired with `#[serde(default)]` on `Option<Option<T>>` patch fields so an
/// absent key stays `None` while an explicit `null` becomes `Some(None)`.
pub(crate) fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
