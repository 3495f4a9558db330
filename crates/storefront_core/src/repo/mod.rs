//! Record store abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the keyed storage contract shared by every resource type.
//! - Provide an in-memory and a SQLite implementation of that contract.
//!
//! # Invariants
//! - Store writes enforce `Record::validate()` before persistence.
//! - Store APIs return semantic errors (`NotFound`, `Conflict`,
//!   `EmptyUpdate`) in addition to DB transport errors.

pub mod memory;
pub mod sqlite;
pub mod store;
