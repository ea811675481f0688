//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! entity or domain models to the business logic layer. All database queries, inserts,
//! updates, and deletes are performed through these repositories.

pub mod carrier;
pub mod mission;
pub mod webhook;

#[cfg(test)]
mod test;

/// Whether a database error is a unique-constraint violation.
///
/// SQLite reports these as a constraint failure naming the index; the mission
/// store relies on this to map a duplicate active mission to a user-facing
/// message instead of an operator alert.
pub fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    err.to_string().to_uppercase().contains("UNIQUE")
}
