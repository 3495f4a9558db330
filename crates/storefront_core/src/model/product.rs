//! Product record and payloads.
//!
//! # Invariants
//! - `name` is non-empty.
//! - `price` is finite and >= 0; `rating`, when set, lies within [0, 5].
//! - `category_id` / `inventory_id` may dangle.

use crate::model::present;
use crate::model::record::{
    matches_name, matches_optional, Patch, Record, RecordId, ResourceKind, ValidationError,
};
use crate::model::timestamp::{advance, Timestamp};
use serde::{Deserialize, Serialize};

pub const MAX_RATING: f64 = 5.0;

/// Sellable item, optionally linked to a category and an inventory record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: RecordId,
    pub name: String,
    pub description: Option<String>,
    /// Price in USD.
    pub price: f64,
    /// Average user rating on a 0-5 scale.
    pub rating: Option<f64>,
    pub category_id: Option<RecordId>,
    pub inventory_id: Option<RecordId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Create payload for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub category_id: Option<RecordId>,
    #[serde(default)]
    pub inventory_id: Option<RecordId>,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
            rating: None,
            category_id: None,
            inventory_id: None,
        }
    }
}

/// Partial update for a product.
///
/// Nullable fields use `Option<Option<_>>`: outer `None` leaves the stored
/// value alone, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "present")]
    pub rating: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    pub category_id: Option<Option<RecordId>>,
    #[serde(default, deserialize_with = "present")]
    pub inventory_id: Option<Option<RecordId>>,
}

impl Patch for ProductPatch {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.rating.is_none()
            && self.category_id.is_none()
            && self.inventory_id.is_none()
    }
}

/// List filter for products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub category_id: Option<RecordId>,
    pub inventory_id: Option<RecordId>,
}

impl Record for Product {
    type Draft = ProductDraft;
    type Patch = ProductPatch;
    type Filter = ProductFilter;

    const KIND: ResourceKind = ResourceKind::Product;

    fn from_draft(id: RecordId, draft: ProductDraft, now: Timestamp) -> Self {
        Self {
            product_id: id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            rating: draft.rating,
            category_id: draft.category_id,
            inventory_id: draft.inventory_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> RecordId {
        self.product_id
    }

    fn matches(&self, filter: &ProductFilter) -> bool {
        matches_name(filter.name.as_deref(), &self.name)
            && matches_optional(filter.category_id.as_ref(), self.category_id.as_ref())
            && matches_optional(filter.inventory_id.as_ref(), self.inventory_id.as_ref())
    }

    fn apply_patch(&mut self, patch: &ProductPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(category_id) = patch.category_id {
            self.category_id = category_id;
        }
        if let Some(inventory_id) = patch.inventory_id {
            self.inventory_id = inventory_id;
        }
    }

    fn touch(&mut self, now: Timestamp) {
        self.updated_at = advance(self.updated_at, now);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName {
                resource: ResourceKind::Product,
            });
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError::InvalidPrice(self.price));
        }
        if let Some(rating) = self.rating {
            if !(0.0..=MAX_RATING).contains(&rating) {
                return Err(ValidationError::InvalidRating(rating));
            }
        }
        if self.updated_at < self.created_at {
            return Err(ValidationError::TimestampOrder {
                resource: ResourceKind::Product,
                field: "updated_at",
            });
        }
        Ok(())
    }
}
