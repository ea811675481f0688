//! Domain models for the mission lifecycle.
//!
//! Models are plain serializable structs independent of the entity layer;
//! repositories convert between the two at the data boundary.

pub mod carrier;
pub mod commodity;
pub mod mission;
