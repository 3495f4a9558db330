//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into create/list/get/update/delete use-cases.
//! - Resolve product references to categories and inventories.
//! - Keep transport layers decoupled from storage details.

pub mod catalog;
pub mod cross_ref;
pub mod error;
pub mod resource_service;
