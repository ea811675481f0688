//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits
//! between the bot command layer and the data (repository) layer. Services
//! implement the mission lifecycle (validation, confirmation, send
//! orchestration, persistence, teardown), the per-channel lock registry, and
//! the collaborator surfaces the lifecycle talks to.

pub mod channel_lock;
pub mod commodity;
pub mod mission;
pub mod surface;
