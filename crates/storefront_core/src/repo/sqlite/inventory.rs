use super::{id_value, optional_text_value, parse_id, parse_timestamp, timestamp_value, SqlRecord};
use crate::model::inventory::{Inventory, InventoryFilter, InventoryPatch};
use crate::model::record::{Record, ResourceKind};
use crate::repo::store::RepoResult;
use rusqlite::types::Value;
use rusqlite::Row;

const KIND: ResourceKind = ResourceKind::Inventory;

impl SqlRecord for Inventory {
    const TABLE: &'static str = "inventories";
    const COLUMNS: &'static [&'static str] = &[
        "inventory_id",
        "product_id",
        "stock_quantity",
        "warehouse_location",
        "update_time",
        "created_at",
    ];
    const TOUCH_COLUMN: &'static str = "update_time";

    fn to_values(&self) -> Vec<Value> {
        vec![
            id_value(self.id()),
            id_value(self.product_id),
            Value::Integer(self.stock_quantity),
            optional_text_value(self.warehouse_location.as_deref()),
            timestamp_value(&self.update_time),
            timestamp_value(&self.created_at),
        ]
    }

    fn touch_value(&self) -> Value {
        timestamp_value(&self.update_time)
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            inventory_id: parse_id(row, "inventory_id", KIND)?,
            product_id: parse_id(row, "product_id", KIND)?,
            stock_quantity: row.get("stock_quantity")?,
            warehouse_location: row.get("warehouse_location")?,
            update_time: parse_timestamp(row, "update_time", KIND)?,
            created_at: parse_timestamp(row, "created_at", KIND)?,
        })
    }

    fn filter_clauses(filter: &InventoryFilter) -> Vec<(&'static str, Value)> {
        let mut clauses = Vec::new();
        if let Some(product_id) = filter.product_id {
            clauses.push(("product_id = ?", id_value(product_id)));
        }
        if let Some(location) = &filter.warehouse_location {
            clauses.push(("warehouse_location = ?", Value::Text(location.clone())));
        }
        clauses
    }

    fn patch_assignments(patch: &InventoryPatch, merged: &Self) -> Vec<(&'static str, Value)> {
        let mut assignments = Vec::new();
        if patch.product_id.is_some() {
            assignments.push(("product_id", id_value(merged.product_id)));
        }
        if patch.stock_quantity.is_some() {
            assignments.push(("stock_quantity", Value::Integer(merged.stock_quantity)));
        }
        if patch.warehouse_location.is_some() {
            assignments.push((
                "warehouse_location",
                optional_text_value(merged.warehouse_location.as_deref()),
            ));
        }
        assignments
    }
}
