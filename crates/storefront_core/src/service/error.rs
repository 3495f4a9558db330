//! Service-level error taxonomy and its transport mapping.

use crate::model::record::{RecordId, ResourceKind, ValidationError};
use crate::repo::store::RepoError;
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Coarse error class a transport maps onto its own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    BadRequest,
    Conflict,
    Unprocessable,
    Internal,
}

/// Errors from catalog use-cases.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Target record does not exist.
    #[error("{resource} not found: {id}")]
    NotFound {
        resource: ResourceKind,
        id: RecordId,
    },
    /// Update payload carries no field.
    #[error("{resource} update carries no fields")]
    EmptyUpdate { resource: ResourceKind },
    /// Key already taken in a backend enforcing uniqueness.
    #[error("{resource} already exists: {id}")]
    Conflict {
        resource: ResourceKind,
        id: RecordId,
    },
    #[error(transparent)]
    Validation(ValidationError),
    /// Product carries no reference to the requested record type.
    #[error("product {product_id} has no linked {target}")]
    NoLinkedRecord {
        product_id: RecordId,
        target: ResourceKind,
    },
    /// Product references a record that does not exist.
    #[error("product {product_id} links {target} {target_id}, which does not exist")]
    LinkedRecordMissing {
        product_id: RecordId,
        target: ResourceKind,
        target_id: RecordId,
    },
    /// Persistence-layer failure.
    #[error(transparent)]
    Repo(RepoError),
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { resource, id } => Self::NotFound { resource, id },
            RepoError::EmptyUpdate { resource } => Self::EmptyUpdate { resource },
            RepoError::Conflict { resource, id } => Self::Conflict { resource, id },
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. }
            | Self::NoLinkedRecord { .. }
            | Self::LinkedRecordMissing { .. } => ErrorKind::NotFound,
            Self::EmptyUpdate { .. } => ErrorKind::BadRequest,
            Self::Conflict { .. } => ErrorKind::Conflict,
            Self::Validation(_) => ErrorKind::Unprocessable,
            Self::Repo(_) => ErrorKind::Internal,
        }
    }

    /// HTTP status a transport should answer with.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::NotFound => 404,
            ErrorKind::BadRequest => 400,
            ErrorKind::Conflict => 409,
            ErrorKind::Unprocessable => 422,
            ErrorKind::Internal => 500,
        }
    }

    /// Client-facing detail string. Storage internals are not exposed.
    pub fn detail(&self) -> String {
        match self {
            Self::NotFound { resource, .. } => format!("{} not found", resource.label()),
            Self::EmptyUpdate { .. } => "No fields to update".to_string(),
            Self::Conflict { resource, .. } => format!("{} already exists", resource.label()),
            Self::Validation(err) => err.to_string(),
            Self::NoLinkedRecord { target, .. } => {
                format!("This product has no linked {target} record")
            }
            Self::LinkedRecordMissing { target, .. } => format!("Linked {target} not found"),
            Self::Repo(_) => "Internal storage error".to_string(),
        }
    }

    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::EmptyUpdate { .. } => "empty_update",
            Self::Conflict { .. } => "conflict",
            Self::Validation(_) => "validation_failed",
            Self::NoLinkedRecord { .. } => "no_link",
            Self::LinkedRecordMissing { .. } => "dangling_link",
            Self::Repo(_) => "storage_failed",
        }
    }
}
