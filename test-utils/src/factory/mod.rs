//! Factory methods for creating test entities.
//!
//! Factories create entities with sensible defaults so tests only specify the
//! fields they actually care about. Each factory offers a builder for
//! customization plus a shorthand `create_*` function for the default case.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let carrier = factory::create_carrier(&db).await?;
//! let mission = factory::create_mission(&db, &carrier).await?;
//! let webhook = factory::create_webhook(&db, &carrier.owner_id).await?;
//! ```
//!
//! # Available Factories
//!
//! - `carrier` - Create carrier entities
//! - `mission` - Create mission entities
//! - `webhook` - Create webhook registrations
//! - `helpers` - ID generation shared across factories

pub mod carrier;
pub mod helpers;
pub mod mission;
pub mod webhook;

// Re-export commonly used factory functions for concise usage
pub use carrier::create_carrier;
pub use mission::create_mission;
pub use webhook::create_webhook;
