//! Shared record contract for catalog resources.
//!
//! # Responsibility
//! - Describe what every storage backend needs to know about a resource:
//!   its key, filter matching, patch merging and validation.
//!
//! # Invariants
//! - `apply_patch` only touches fields present in the patch.
//! - `touch` strictly advances the resource's update timestamp.

use crate::model::timestamp::Timestamp;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use thiserror::Error;
use uuid::Uuid;

/// Server-minted identifier shared by all resource types.
pub type RecordId = Uuid;

/// Resource type tag used in errors, log events and confirmations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Product,
    Category,
    Inventory,
}

impl ResourceKind {
    /// Lowercase name used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Category => "category",
            Self::Inventory => "inventory",
        }
    }

    /// Capitalized name used in human-readable details.
    pub fn label(self) -> &'static str {
        match self {
            Self::Product => "Product",
            Self::Category => "Category",
            Self::Inventory => "Inventory",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record invariant violation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{resource} name must not be empty")]
    EmptyName { resource: ResourceKind },
    #[error("product price must be a finite value >= 0, got {0}")]
    InvalidPrice(f64),
    #[error("product rating must be within [0, 5], got {0}")]
    InvalidRating(f64),
    #[error("inventory stock_quantity must be >= 0, got {0}")]
    NegativeStock(i64),
    #[error("{resource} {field} must not be earlier than created_at")]
    TimestampOrder {
        resource: ResourceKind,
        field: &'static str,
    },
    #[error("{resource} {field} must fall within years 0000-9999")]
    TimestampOutOfRange {
        resource: ResourceKind,
        field: &'static str,
    },
}

/// Update payload contract.
pub trait Patch {
    /// True when the payload carries no field at all.
    fn is_empty(&self) -> bool;
}

/// Behavior shared by Product, Category and Inventory.
pub trait Record: Clone + Serialize {
    /// Create payload, without identifier or audit fields.
    type Draft;
    /// Partial update payload.
    type Patch: Patch;
    /// Equality filter used by list operations.
    type Filter: Default;

    const KIND: ResourceKind;

    /// Builds a fresh record from a create payload.
    fn from_draft(id: RecordId, draft: Self::Draft, now: Timestamp) -> Self;

    fn id(&self) -> RecordId;

    /// Returns true when every constraint set in `filter` holds.
    fn matches(&self, filter: &Self::Filter) -> bool;

    /// Merges the fields present in `patch`.
    fn apply_patch(&mut self, patch: &Self::Patch);

    /// Sets the update timestamp field so that it strictly advances.
    fn touch(&mut self, now: Timestamp);

    fn validate(&self) -> Result<(), ValidationError>;
}

/// Filter helper: `None` matches everything.
pub(crate) fn matches_exact<T: PartialEq>(expected: Option<&T>, actual: &T) -> bool {
    expected.map_or(true, |expected| expected == actual)
}

/// Filter helper for nullable fields: a set constraint never matches null.
pub(crate) fn matches_optional<T: PartialEq>(expected: Option<&T>, actual: Option<&T>) -> bool {
    match expected {
        None => true,
        Some(expected) => actual == Some(expected),
    }
}

/// Filter helper for names, compared ASCII case-insensitively.
pub(crate) fn matches_name(expected: Option<&str>, actual: &str) -> bool {
    expected.map_or(true, |expected| expected.eq_ignore_ascii_case(actual))
}

#[cfg(test)]
mod tests {
    use super::{matches_exact, matches_name, matches_optional, ResourceKind};

    #[test]
    fn name_filter_ignores_ascii_case() {
        assert!(matches_name(Some("TOOLS"), "tools"));
        assert!(matches_name(None, "anything"));
        assert!(!matches_name(Some("tool"), "tools"));
    }

    #[test]
    fn optional_filter_never_matches_null() {
        assert!(matches_optional::<u8>(None, None));
        assert!(!matches_optional(Some(&1u8), None));
        assert!(matches_optional(Some(&1u8), Some(&1u8)));
        assert!(matches_exact(Some(&"a"), &"a"));
    }

    #[test]
    fn resource_labels_are_stable() {
        assert_eq!(ResourceKind::Inventory.as_str(), "inventory");
        assert_eq!(ResourceKind::Category.label(), "Category");
    }
}
