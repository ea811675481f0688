//! Collaborator contracts for the external surfaces the mission lifecycle
//! talks to.
//!
//! The orchestrator and validation pipeline depend only on these traits;
//! production implementations live alongside them (Discord over Serenity,
//! the forum over reqwest, webhooks over Serenity's webhook client, the
//! image service over the filesystem). Tests substitute recording mocks.

pub mod discord;
pub mod forum;
pub mod image;
pub mod webhook;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::AppError;
use crate::model::{carrier::CarrierData, commodity::CommodityData, mission::MissionParams};

/// Severity of a user- or operator-facing notice.
///
/// Surfaces render these however fits them (the Discord implementation maps
/// them to embed colours).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Warning,
    Error,
}

/// A user- or operator-facing feedback message.
///
/// The core emits plain structured text; embed cosmetics belong to the
/// surface implementation.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: Option<String>,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: None,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: None,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            title: None,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: None,
            text: text.into(),
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// The chat/notification surface: dedicated mission channels, alerts, pings,
/// feedback notices, and delayed channel removal.
#[async_trait]
pub trait ChannelSurface: Send + Sync {
    /// Creates the carrier's dedicated mission channel, or reuses it if it
    /// already exists. Grants the carrier owner elevated permissions.
    ///
    /// Callers must hold the channel lock for the carrier's channel name.
    async fn ensure_mission_channel(&self, carrier: &CarrierData) -> Result<u64, AppError>;

    /// Sends a feedback notice to a channel. Returns the message id.
    async fn send_notice(&self, channel_id: u64, notice: Notice) -> Result<u64, AppError>;

    /// Sends a notice to the operator channel.
    async fn send_ops_notice(&self, notice: Notice) -> Result<(), AppError>;

    /// Sends the one-line trade alert to the alerts channel. Returns the
    /// message id.
    async fn send_alert(&self, text: &str) -> Result<u64, AppError>;

    /// Sends and pins the full mission announcement (image + details) in the
    /// dedicated channel, including the secrecy warning when the mission is
    /// flagged EDMC-off. Returns the pinned message id.
    async fn send_mission_post(
        &self,
        channel_id: u64,
        params: &MissionParams,
    ) -> Result<u64, AppError>;

    /// Pings the hauler role in the dedicated channel. Returns the message id.
    async fn notify_haulers(&self, channel_id: u64, text: &str) -> Result<u64, AppError>;

    /// Deletes a message from the alerts channel.
    async fn delete_alert(&self, message_id: u64) -> Result<(), AppError>;

    /// Schedules the channel for deletion after a grace delay. A previously
    /// scheduled deletion for the same name is replaced.
    async fn schedule_delete(&self, channel_id: u64, channel_name: &str, delay: Duration);

    /// Cancels a pending scheduled deletion. Returns whether one was pending.
    async fn cancel_scheduled_delete(&self, channel_name: &str) -> bool;
}

/// A forum post as returned by the forum surface.
#[derive(Debug, Clone)]
pub struct ForumPost {
    pub id: String,
    pub url: String,
}

/// A forum comment as returned by the forum surface.
#[derive(Debug, Clone)]
pub struct ForumComment {
    pub id: String,
    pub url: String,
}

/// The link-aggregator forum surface.
#[async_trait]
pub trait ForumSurface: Send + Sync {
    /// Submits an image post with the active-mission flair.
    async fn submit_image_post(&self, title: &str, image: &Path) -> Result<ForumPost, AppError>;

    /// Replies to a post with a top-level comment.
    async fn reply(&self, post_id: &str, body: &str) -> Result<ForumComment, AppError>;

    /// Swaps the post to the completed flair and comments the closing notice,
    /// editing the original post rather than reposting.
    async fn mark_completed(&self, post_id: &str, notice: &str) -> Result<(), AppError>;
}

/// A webhook delivery as returned by the webhook surface.
#[derive(Debug, Clone)]
pub struct WebhookMessage {
    pub id: u64,
    pub jump_url: String,
}

/// The outbound webhook surface.
#[async_trait]
pub trait WebhookSurface: Send + Sync {
    /// Probes a webhook URL by sending and deleting a verification message.
    /// Used by webhook registration before anything is saved.
    async fn validate(&self, url: &str) -> Result<(), AppError>;

    /// Sends the mission announcement to one webhook URL.
    async fn send(&self, url: &str, params: &MissionParams) -> Result<WebhookMessage, AppError>;

    /// Edits a previously sent webhook message in place with a closing notice.
    async fn edit(&self, url: &str, message_id: u64, notice: &str) -> Result<(), AppError>;
}

/// Advertisement image validation and per-surface rendering.
#[async_trait]
pub trait ImageService: Send + Sync {
    /// Whether the carrier has an advertisement image at the expected path
    /// with the exact required dimensions.
    async fn has_valid_advert(&self, carrier: &CarrierData) -> bool;

    /// Runs the interactive upload sub-flow for a missing or mis-sized
    /// advertisement image. The caller re-checks afterwards.
    async fn request_advert_upload(
        &self,
        origin_channel: u64,
        carrier: &CarrierData,
    ) -> Result<(), AppError>;

    /// Renders the channel-sized announcement image. Returns a temp file the
    /// caller cleans up.
    async fn render_channel_image(&self, params: &MissionParams) -> Result<PathBuf, AppError>;

    /// Renders the forum-sized announcement image. Returns a temp file the
    /// caller cleans up.
    async fn render_forum_image(&self, params: &MissionParams) -> Result<PathBuf, AppError>;
}

/// Commodity lookup collaborator. Owns its own feedback on ambiguous or
/// unknown search terms.
#[async_trait]
pub trait CommodityResolver: Send + Sync {
    /// Resolves a search term to a commodity. `Ok(None)` means the resolver
    /// already delivered feedback and the attempt should stop quietly.
    async fn resolve(
        &self,
        term: &str,
        origin_channel: u64,
    ) -> Result<Option<CommodityData>, AppError>;
}

/// Bundle of all surface handles, cheap to clone and share across tasks.
#[derive(Clone)]
pub struct Surfaces {
    pub channels: Arc<dyn ChannelSurface>,
    pub forum: Arc<dyn ForumSurface>,
    pub webhooks: Arc<dyn WebhookSurface>,
    pub images: Arc<dyn ImageService>,
    pub commodities: Arc<dyn CommodityResolver>,
}
