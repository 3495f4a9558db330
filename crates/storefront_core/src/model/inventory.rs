//! Inventory record and payloads.
//!
//! # Invariants
//! - `stock_quantity` is never negative.
//! - `update_time` may be supplied on create but never lies after creation
//!   time; every update resets it to server time, strictly later than the
//!   previous value.
//! - `update_time` has a four-digit year so its text form reads back.
//! - `created_at` is set once at creation.

use crate::model::present;
use crate::model::record::{
    matches_exact, matches_optional, Patch, Record, RecordId, ResourceKind, ValidationError,
};
use crate::model::timestamp::{advance, is_storable, Timestamp};
use chrono::SubsecRound;
use serde::{Deserialize, Serialize};

/// Stock level of one product at one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    pub inventory_id: RecordId,
    pub product_id: RecordId,
    pub stock_quantity: i64,
    pub warehouse_location: Option<String>,
    /// Last stock change.
    pub update_time: Timestamp,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryDraft {
    pub product_id: RecordId,
    pub stock_quantity: i64,
    #[serde(default)]
    pub warehouse_location: Option<String>,
    /// Defaults to creation time when omitted; later values are clamped to it.
    #[serde(default)]
    pub update_time: Option<Timestamp>,
}

impl InventoryDraft {
    pub fn new(product_id: RecordId, stock_quantity: i64) -> Self {
        Self {
            product_id,
            stock_quantity,
            warehouse_location: None,
            update_time: None,
        }
    }
}

/// Partial update for an inventory record.
///
/// Carries no `update_time`: the server always sets it on update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InventoryPatch {
    #[serde(default)]
    pub product_id: Option<RecordId>,
    #[serde(default)]
    pub stock_quantity: Option<i64>,
    #[serde(default, deserialize_with = "present")]
    pub warehouse_location: Option<Option<String>>,
}

impl Patch for InventoryPatch {
    fn is_empty(&self) -> bool {
        self.product_id.is_none()
            && self.stock_quantity.is_none()
            && self.warehouse_location.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InventoryFilter {
    pub product_id: Option<RecordId>,
    /// Exact, case-sensitive match.
    pub warehouse_location: Option<String>,
}

impl Record for Inventory {
    type Draft = InventoryDraft;
    type Patch = InventoryPatch;
    type Filter = InventoryFilter;

    const KIND: ResourceKind = ResourceKind::Inventory;

    fn from_draft(id: RecordId, draft: InventoryDraft, now: Timestamp) -> Self {
        Self {
            inventory_id: id,
            product_id: draft.product_id,
            stock_quantity: draft.stock_quantity,
            warehouse_location: draft.warehouse_location,
            update_time: draft
                .update_time
                .map_or(now, |supplied| supplied.trunc_subsecs(6).min(now)),
            created_at: now,
        }
    }

    fn id(&self) -> RecordId {
        self.inventory_id
    }

    fn matches(&self, filter: &InventoryFilter) -> bool {
        matches_exact(filter.product_id.as_ref(), &self.product_id)
            && matches_optional(
                filter.warehouse_location.as_ref(),
                self.warehouse_location.as_ref(),
            )
    }

    fn apply_patch(&mut self, patch: &InventoryPatch) {
        if let Some(product_id) = patch.product_id {
            self.product_id = product_id;
        }
        if let Some(stock_quantity) = patch.stock_quantity {
            self.stock_quantity = stock_quantity;
        }
        if let Some(location) = &patch.warehouse_location {
            self.warehouse_location = location.clone();
        }
    }

    fn touch(&mut self, now: Timestamp) {
        self.update_time = advance(self.update_time, now);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.stock_quantity < 0 {
            return Err(ValidationError::NegativeStock(self.stock_quantity));
        }
        if !is_storable(&self.update_time) {
            return Err(ValidationError::TimestampOutOfRange {
                resource: ResourceKind::Inventory,
                field: "update_time",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Inventory, InventoryDraft, InventoryFilter, InventoryPatch};
    use crate::model::record::{Patch, Record, ValidationError};
    use crate::model::timestamp::now_utc;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn draft_update_time_defaults_to_creation_time() {
        let now = now_utc();
        let inventory =
            Inventory::from_draft(Uuid::new_v4(), InventoryDraft::new(Uuid::new_v4(), 320), now);
        assert_eq!(inventory.update_time, now);
        assert_eq!(inventory.created_at, now);
    }

    #[test]
    fn draft_update_time_is_kept_when_supplied() {
        let supplied = Utc.with_ymd_and_hms(2025, 1, 16, 12, 0, 0).unwrap();
        let draft = InventoryDraft {
            update_time: Some(supplied),
            ..InventoryDraft::new(Uuid::new_v4(), 10)
        };
        let inventory = Inventory::from_draft(Uuid::new_v4(), draft, now_utc());
        assert_eq!(inventory.update_time, supplied);
    }

    #[test]
    fn future_update_time_is_clamped_to_creation_time() {
        let now = now_utc();
        let draft = InventoryDraft {
            update_time: Some(now + Duration::days(365 * 50)),
            ..InventoryDraft::new(Uuid::new_v4(), 10)
        };
        let mut inventory = Inventory::from_draft(Uuid::new_v4(), draft, now);
        assert_eq!(inventory.update_time, now);

        let later = now + Duration::seconds(3);
        inventory.touch(later);
        assert_eq!(inventory.update_time, later);
    }

    #[test]
    fn validate_rejects_update_time_without_four_digit_year() {
        let draft = InventoryDraft {
            update_time: Some(Utc.with_ymd_and_hms(-1, 6, 1, 0, 0, 0).unwrap()),
            ..InventoryDraft::new(Uuid::new_v4(), 10)
        };
        let inventory = Inventory::from_draft(Uuid::new_v4(), draft, now_utc());
        assert!(matches!(
            inventory.validate(),
            Err(ValidationError::TimestampOutOfRange {
                field: "update_time",
                ..
            })
        ));
    }

    #[test]
    fn patch_payload_ignores_update_time() {
        let patch: InventoryPatch =
            serde_json::from_str(r#"{"update_time": "2025-02-01T09:30:00Z"}"#).unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn validate_rejects_negative_stock() {
        let mut inventory = Inventory::from_draft(
            Uuid::new_v4(),
            InventoryDraft::new(Uuid::new_v4(), 0),
            now_utc(),
        );
        assert!(inventory.validate().is_ok());

        inventory.apply_patch(&InventoryPatch {
            stock_quantity: Some(-1),
            ..InventoryPatch::default()
        });
        assert_eq!(
            inventory.validate(),
            Err(ValidationError::NegativeStock(-1))
        );
    }

    #[test]
    fn location_filter_is_case_sensitive() {
        let mut inventory = Inventory::from_draft(
            Uuid::new_v4(),
            InventoryDraft::new(Uuid::new_v4(), 5),
            now_utc(),
        );
        inventory.warehouse_location = Some("Warehouse A".to_string());

        assert!(inventory.matches(&InventoryFilter {
            warehouse_location: Some("Warehouse A".to_string()),
            ..InventoryFilter::default()
        }));
        assert!(!inventory.matches(&InventoryFilter {
            warehouse_location: Some("warehouse a".to_string()),
            ..InventoryFilter::default()
        }));
    }
}
