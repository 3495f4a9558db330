use super::{
    id_value, optional_id_value, optional_text_value, parse_id, parse_optional_id,
    parse_timestamp, timestamp_value, SqlRecord,
};
use crate::model::product::{Product, ProductFilter, ProductPatch};
use crate::model::record::{Record, ResourceKind};
use crate::repo::store::RepoResult;
use rusqlite::types::Value;
use rusqlite::Row;

const KIND: ResourceKind = ResourceKind::Product;

impl SqlRecord for Product {
    const TABLE: &'static str = "products";
    const COLUMNS: &'static [&'static str] = &[
        "product_id",
        "name",
        "description",
        "price",
        "rating",
        "category_id",
        "inventory_id",
        "created_at",
        "updated_at",
    ];
    const TOUCH_COLUMN: &'static str = "updated_at";

    fn to_values(&self) -> Vec<Value> {
        vec![
            id_value(self.id()),
            Value::Text(self.name.clone()),
            optional_text_value(self.description.as_deref()),
            Value::Real(self.price),
            self.rating.map_or(Value::Null, Value::Real),
            optional_id_value(self.category_id),
            optional_id_value(self.inventory_id),
            timestamp_value(&self.created_at),
            timestamp_value(&self.updated_at),
        ]
    }

    fn touch_value(&self) -> Value {
        timestamp_value(&self.updated_at)
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            product_id: parse_id(row, "product_id", KIND)?,
            name: row.get("name")?,
            description: row.get("description")?,
            price: row.get("price")?,
            rating: row.get("rating")?,
            category_id: parse_optional_id(row, "category_id", KIND)?,
            inventory_id: parse_optional_id(row, "inventory_id", KIND)?,
            created_at: parse_timestamp(row, "created_at", KIND)?,
            updated_at: parse_timestamp(row, "updated_at", KIND)?,
        })
    }

    fn filter_clauses(filter: &ProductFilter) -> Vec<(&'static str, Value)> {
        let mut clauses = Vec::new();
        if let Some(name) = &filter.name {
            clauses.push(("name = ? COLLATE NOCASE", Value::Text(name.clone())));
        }
        if let Some(category_id) = filter.category_id {
            clauses.push(("category_id = ?", id_value(category_id)));
        }
        if let Some(inventory_id) = filter.inventory_id {
            clauses.push(("inventory_id = ?", id_value(inventory_id)));
        }
        clauses
    }

    fn patch_assignments(patch: &ProductPatch, merged: &Self) -> Vec<(&'static str, Value)> {
        let mut assignments = Vec::new();
        if patch.name.is_some() {
            assignments.push(("name", Value::Text(merged.name.clone())));
        }
        if patch.description.is_some() {
            assignments.push((
                "description",
                optional_text_value(merged.description.as_deref()),
            ));
        }
        if patch.price.is_some() {
            assignments.push(("price", Value::Real(merged.price)));
        }
        if patch.rating.is_some() {
            assignments.push(("rating", merged.rating.map_or(Value::Null, Value::Real)));
        }
        if patch.category_id.is_some() {
            assignments.push(("category_id", optional_id_value(merged.category_id)));
        }
        if patch.inventory_id.is_some() {
            assignments.push(("inventory_id", optional_id_value(merged.inventory_id)));
        }
        assignments
    }
}
