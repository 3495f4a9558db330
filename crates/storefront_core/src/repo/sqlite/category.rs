use super::{id_value, optional_text_value, parse_id, parse_timestamp, timestamp_value, SqlRecord};
use crate::model::category::{Category, CategoryFilter, CategoryPatch};
use crate::model::record::{Record, ResourceKind};
use crate::repo::store::RepoResult;
use rusqlite::types::Value;
use rusqlite::Row;

const KIND: ResourceKind = ResourceKind::Category;

impl SqlRecord for Category {
    const TABLE: &'static str = "categories";
    const COLUMNS: &'static [&'static str] = &[
        "category_id",
        "name",
        "description",
        "created_at",
        "updated_at",
    ];
    const TOUCH_COLUMN: &'static str = "updated_at";

    fn to_values(&self) -> Vec<Value> {
        vec![
            id_value(self.id()),
            Value::Text(self.name.clone()),
            optional_text_value(self.description.as_deref()),
            timestamp_value(&self.created_at),
            timestamp_value(&self.updated_at),
        ]
    }

    fn touch_value(&self) -> Value {
        timestamp_value(&self.updated_at)
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            category_id: parse_id(row, "category_id", KIND)?,
            name: row.get("name")?,
            description: row.get("description")?,
            created_at: parse_timestamp(row, "created_at", KIND)?,
            updated_at: parse_timestamp(row, "updated_at", KIND)?,
        })
    }

    fn filter_clauses(filter: &CategoryFilter) -> Vec<(&'static str, Value)> {
        filter
            .name
            .iter()
            .map(|name| ("name = ? COLLATE NOCASE", Value::Text(name.clone())))
            .collect()
    }

    fn patch_assignments(patch: &CategoryPatch, merged: &Self) -> Vec<(&'static str, Value)> {
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
        assignments
    }
}
