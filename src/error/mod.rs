//! Error types for the application.
//!
//! This module provides the application's error hierarchy. The `AppError` enum
//! serves as the top-level error type that wraps infrastructure errors from the
//! database, Discord, HTTP, and scheduler layers, plus the domain-specific
//! failure conditions of the mission lifecycle.

pub mod config;
pub mod internal;

use thiserror::Error;

use crate::error::{config::ConfigError, internal::InternalError};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application. Most
/// variants use `#[from]` for automatic error conversion. User-input problems
/// are *not* errors; they are reported as notices by the validation pipeline
/// and never surface here.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Internal invariant violation indicating a possible bug.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client request error from reqwest.
    ///
    /// Raised when forum API calls fail at the transport level.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Filesystem error while handling advertisement images.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Serialization error for the mission parameter blob.
    #[error(transparent)]
    SerdeErr(#[from] serde_json::Error),

    /// The per-channel mission lock could not be acquired within the timeout.
    ///
    /// The caller must report a retry instruction to the user and abort
    /// without having touched durable state.
    #[error("could not acquire channel lock for '{channel}' within {seconds} seconds")]
    ChannelLockTimeout { channel: String, seconds: u64 },

    /// Internal error with custom message.
    ///
    /// # Fields
    /// - Detailed error message for operator-side logging
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
