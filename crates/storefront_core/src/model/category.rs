//! Category record and payloads.

use crate::model::present;
use crate::model::record::{matches_name, Patch, Record, RecordId, ResourceKind, ValidationError};
use crate::model::timestamp::{advance, Timestamp};
use serde::{Deserialize, Serialize};

/// Product grouping such as "Computer Accessories".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: RecordId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CategoryPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
}

impl Patch for CategoryPatch {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CategoryFilter {
    /// Matched ASCII case-insensitively.
    pub name: Option<String>,
}

impl Record for Category {
    type Draft = CategoryDraft;
    type Patch = CategoryPatch;
    type Filter = CategoryFilter;

    const KIND: ResourceKind = ResourceKind::Category;

    fn from_draft(id: RecordId, draft: CategoryDraft, now: Timestamp) -> Self {
        Self {
            category_id: id,
            name: draft.name,
            description: draft.description,
            created_at: now,
            updated_at: now,
        }
    }

    fn id(&self) -> RecordId {
        self.category_id
    }

    fn matches(&self, filter: &CategoryFilter) -> bool {
        matches_name(filter.name.as_deref(), &self.name)
    }

    fn apply_patch(&mut self, patch: &CategoryPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
    }

    fn touch(&mut self, now: Timestamp) {
        self.updated_at = advance(self.updated_at, now);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName {
                resource: ResourceKind::Category,
            });
        }
        if self.updated_at < self.created_at {
            return Err(ValidationError::TimestampOrder {
                resource: ResourceKind::Category,
                field: "updated_at",
            });
        }
        Ok(())
    }
}
