//! Application state shared across the bot and scheduler.
//!
//! Initialized once during startup and cloned cheaply wherever needed: the
//! database handle is a pool, surfaces and the lock registry are
//! reference-counted, and the attempt router shares one map.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::bot::attempts::AttemptRouter;
use crate::config::Config;
use crate::service::channel_lock::ChannelLockRegistry;
use crate::service::surface::Surfaces;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for persistent storage.
    pub db: DatabaseConnection,

    /// Application configuration.
    pub config: Arc<Config>,

    /// Handles to the external surfaces (chat, forum, webhooks, images,
    /// commodity resolver).
    pub surfaces: Surfaces,

    /// The per-channel mission lock registry.
    pub locks: Arc<ChannelLockRegistry>,

    /// Routes component interactions to in-flight mission attempts.
    pub attempts: AttemptRouter,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        config: Arc<Config>,
        surfaces: Surfaces,
        locks: Arc<ChannelLockRegistry>,
    ) -> Self {
        Self {
            db,
            config,
            surfaces,
            locks,
            attempts: AttemptRouter::new(),
        }
    }
}
