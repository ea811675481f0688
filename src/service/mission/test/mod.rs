//! Lifecycle tests over recording mock surfaces and in-memory SQLite.
//!
//! The mocks record every call so tests can assert exactly which surfaces
//! were touched, and expose failure toggles for the partial-failure paths.

mod validation;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::AppError;
use crate::model::{
    carrier::CarrierData,
    commodity::CommodityData,
    mission::{MissionParams, MissionType, PadSize},
};
use crate::service::channel_lock::ChannelLockRegistry;
use crate::service::commodity::TableCommodityResolver;
use crate::service::mission::confirm::AttemptEvent;
use crate::service::mission::CommandContext;
use crate::service::surface::{
    ChannelSurface, ForumComment, ForumPost, ForumSurface, ImageService, Notice, Surfaces,
    WebhookMessage, WebhookSurface,
};

/// Recording mock of the chat surface.
pub(super) struct RecordingChannels {
    pub fail_ensure_channel: AtomicBool,
    pub fail_mission_post: AtomicBool,
    next_id: AtomicU64,
    pub created_channels: StdMutex<Vec<String>>,
    pub notices: StdMutex<Vec<(u64, Notice)>>,
    pub ops_notices: StdMutex<Vec<Notice>>,
    pub alerts: StdMutex<Vec<String>>,
    pub mission_posts: StdMutex<Vec<u64>>,
    pub pings: StdMutex<Vec<(u64, String)>>,
    pub deleted_alerts: StdMutex<Vec<u64>>,
    pub scheduled_deletes: StdMutex<Vec<(String, Duration)>>,
    pub cancelled_deletes: StdMutex<Vec<String>>,
}

impl RecordingChannels {
    pub fn new() -> Self {
        Self {
            fail_ensure_channel: AtomicBool::new(false),
            fail_mission_post: AtomicBool::new(false),
            next_id: AtomicU64::new(9000),
            created_channels: StdMutex::new(Vec::new()),
            notices: StdMutex::new(Vec::new()),
            ops_notices: StdMutex::new(Vec::new()),
            alerts: StdMutex::new(Vec::new()),
            mission_posts: StdMutex::new(Vec::new()),
            pings: StdMutex::new(Vec::new()),
            deleted_alerts: StdMutex::new(Vec::new()),
            scheduled_deletes: StdMutex::new(Vec::new()),
            cancelled_deletes: StdMutex::new(Vec::new()),
        }
    }

    fn next(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// All user-facing notice texts, in order.
    pub fn notice_texts(&self) -> Vec<String> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|(_, notice)| notice.text.clone())
            .collect()
    }

    pub fn has_notice_containing(&self, needle: &str) -> bool {
        self.notice_texts().iter().any(|text| text.contains(needle))
    }

    pub fn has_ops_notice_containing(&self, needle: &str) -> bool {
        self.ops_notices
            .lock()
            .unwrap()
            .iter()
            .any(|notice| notice.text.contains(needle))
    }
}

#[async_trait]
impl ChannelSurface for RecordingChannels {
    async fn ensure_mission_channel(&self, carrier: &CarrierData) -> Result<u64, AppError> {
        if self.fail_ensure_channel.load(Ordering::SeqCst) {
            return Err(AppError::InternalError("channel create failed".to_string()));
        }
        self.created_channels
            .lock()
            .unwrap()
            .push(carrier.channel_name.clone());
        Ok(self.next())
    }

    async fn send_notice(&self, channel_id: u64, notice: Notice) -> Result<u64, AppError> {
        self.notices.lock().unwrap().push((channel_id, notice));
        Ok(self.next())
    }

    async fn send_ops_notice(&self, notice: Notice) -> Result<(), AppError> {
        self.ops_notices.lock().unwrap().push(notice);
        Ok(())
    }

    async fn send_alert(&self, text: &str) -> Result<u64, AppError> {
        self.alerts.lock().unwrap().push(text.to_string());
        Ok(self.next())
    }

    async fn send_mission_post(
        &self,
        channel_id: u64,
        _params: &MissionParams,
    ) -> Result<u64, AppError> {
        if self.fail_mission_post.load(Ordering::SeqCst) {
            return Err(AppError::InternalError("mission post failed".to_string()));
        }
        self.mission_posts.lock().unwrap().push(channel_id);
        Ok(self.next())
    }

    async fn notify_haulers(&self, channel_id: u64, text: &str) -> Result<u64, AppError> {
        self.pings
            .lock()
            .unwrap()
            .push((channel_id, text.to_string()));
        Ok(self.next())
    }

    async fn delete_alert(&self, message_id: u64) -> Result<(), AppError> {
        self.deleted_alerts.lock().unwrap().push(message_id);
        Ok(())
    }

    async fn schedule_delete(&self, _channel_id: u64, channel_name: &str, delay: Duration) {
        self.scheduled_deletes
            .lock()
            .unwrap()
            .push((channel_name.to_string(), delay));
    }

    async fn cancel_scheduled_delete(&self, channel_name: &str) -> bool {
        let mut scheduled = self.scheduled_deletes.lock().unwrap();
        let before = scheduled.len();
        scheduled.retain(|(name, _)| name != channel_name);
        let cancelled = scheduled.len() != before;
        if cancelled {
            self.cancelled_deletes
                .lock()
                .unwrap()
                .push(channel_name.to_string());
        }
        cancelled
    }
}

/// Recording mock of the forum surface.
pub(super) struct RecordingForum {
    pub fail: AtomicBool,
    pub posts: StdMutex<Vec<String>>,
    pub replies: StdMutex<Vec<(String, String)>>,
    pub completed: StdMutex<Vec<(String, String)>>,
}

impl RecordingForum {
    pub fn new() -> Self {
        Self {
            fail: AtomicBool::new(false),
            posts: StdMutex::new(Vec::new()),
            replies: StdMutex::new(Vec::new()),
            completed: StdMutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ForumSurface for RecordingForum {
    async fn submit_image_post(&self, title: &str, _image: &Path) -> Result<ForumPost, AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::InternalError("forum is down".to_string()));
        }
        let mut posts = self.posts.lock().unwrap();
        posts.push(title.to_string());
        let id = format!("post-{}", posts.len());
        Ok(ForumPost {
            url: format!("https://forum.example/p/{}", id),
            id,
        })
    }

    async fn reply(&self, post_id: &str, body: &str) -> Result<ForumComment, AppError> {
        let mut replies = self.replies.lock().unwrap();
        replies.push((post_id.to_string(), body.to_string()));
        let id = format!("comment-{}", replies.len());
        Ok(ForumComment {
            url: format!("https://forum.example/c/{}", id),
            id,
        })
    }

    async fn mark_completed(&self, post_id: &str, notice: &str) -> Result<(), AppError> {
        self.completed
            .lock()
            .unwrap()
            .push((post_id.to_string(), notice.to_string()));
        Ok(())
    }
}

/// Recording mock of the webhook surface.
pub(super) struct RecordingWebhooks {
    pub fail_urls: StdMutex<HashSet<String>>,
    next_id: AtomicU64,
    pub sent: StdMutex<Vec<String>>,
    pub edits: StdMutex<Vec<(String, u64)>>,
}

impl RecordingWebhooks {
    pub fn new() -> Self {
        Self {
            fail_urls: StdMutex::new(HashSet::new()),
            next_id: AtomicU64::new(7000),
            sent: StdMutex::new(Vec::new()),
            edits: StdMutex::new(Vec::new()),
        }
    }

    pub fn fail_url(&self, url: &str) {
        self.fail_urls.lock().unwrap().insert(url.to_string());
    }
}

#[async_trait]
impl WebhookSurface for RecordingWebhooks {
    async fn validate(&self, url: &str) -> Result<(), AppError> {
        if self.fail_urls.lock().unwrap().contains(url) {
            return Err(AppError::InternalError("webhook rejected".to_string()));
        }
        Ok(())
    }

    async fn send(&self, url: &str, _params: &MissionParams) -> Result<WebhookMessage, AppError> {
        if self.fail_urls.lock().unwrap().contains(url) {
            return Err(AppError::InternalError("webhook rejected".to_string()));
        }
        self.sent.lock().unwrap().push(url.to_string());
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(WebhookMessage {
            id,
            jump_url: format!("https://chat.example/webhook/{}", id),
        })
    }

    async fn edit(&self, url: &str, message_id: u64, _notice: &str) -> Result<(), AppError> {
        self.edits
            .lock()
            .unwrap()
            .push((url.to_string(), message_id));
        Ok(())
    }
}

/// Mock image service with switchable validity.
pub(super) struct StaticImages {
    pub valid: AtomicBool,
    /// Whether the interactive upload sub-flow "fixes" the image.
    pub valid_after_upload: AtomicBool,
    pub upload_requests: StdMutex<Vec<String>>,
}

impl StaticImages {
    pub fn new() -> Self {
        Self {
            valid: AtomicBool::new(true),
            valid_after_upload: AtomicBool::new(false),
            upload_requests: StdMutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ImageService for StaticImages {
    async fn has_valid_advert(&self, _carrier: &CarrierData) -> bool {
        self.valid.load(Ordering::SeqCst)
    }

    async fn request_advert_upload(
        &self,
        _origin_channel: u64,
        carrier: &CarrierData,
    ) -> Result<(), AppError> {
        self.upload_requests
            .lock()
            .unwrap()
            .push(carrier.long_name.clone());
        if self.valid_after_upload.load(Ordering::SeqCst) {
            self.valid.store(true, Ordering::SeqCst);
        }
        Ok(())
    }

    async fn render_channel_image(&self, _params: &MissionParams) -> Result<PathBuf, AppError> {
        Ok(PathBuf::from("/tmp/missionboard-test-channel.png"))
    }

    async fn render_forum_image(&self, _params: &MissionParams) -> Result<PathBuf, AppError> {
        Ok(PathBuf::from("/tmp/missionboard-test-forum.png"))
    }
}

/// Shared mock bundle for lifecycle tests.
pub(super) struct TestHarness {
    pub channels: Arc<RecordingChannels>,
    pub forum: Arc<RecordingForum>,
    pub webhooks: Arc<RecordingWebhooks>,
    pub images: Arc<StaticImages>,
    pub locks: Arc<ChannelLockRegistry>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            channels: Arc::new(RecordingChannels::new()),
            forum: Arc::new(RecordingForum::new()),
            webhooks: Arc::new(RecordingWebhooks::new()),
            images: Arc::new(StaticImages::new()),
            // short timeout keeps contention tests fast
            locks: Arc::new(ChannelLockRegistry::with_timeout(Duration::from_millis(
                100,
            ))),
        }
    }

    pub fn surfaces(&self) -> Surfaces {
        Surfaces {
            channels: self.channels.clone(),
            forum: self.forum.clone(),
            webhooks: self.webhooks.clone(),
            images: self.images.clone(),
            commodities: Arc::new(TableCommodityResolver::new(self.channels.clone())),
        }
    }
}

/// A command context as the bot layer would build it.
pub(super) fn ctx() -> CommandContext {
    CommandContext {
        user_id: 42,
        origin_channel: 1000,
        invocation_url: "https://chat.example/1000/1".to_string(),
    }
}

/// Raw parameters as they arrive from the command layer, before validation.
pub(super) fn raw_params(
    carrier_term: &str,
    commodity_term: &str,
    profit: &str,
    pads: &str,
    demand: &str,
) -> MissionParams {
    MissionParams::new(
        MissionType::Load,
        carrier_term,
        commodity_term,
        "HIP 57784",
        "Mackenzie Relay",
        profit,
        pads,
        demand,
    )
}

/// Parameters as they look after a successful validation pass for `carrier`.
pub(super) fn validated_params(carrier: &entity::carrier::Model) -> MissionParams {
    let mut params = raw_params(&carrier.long_name, "gold", "12", "l", "20");
    params.profit = Some(12.0);
    params.pads = Some(PadSize::Large);
    params.demand = Some(20.0);
    params.carrier = Some(CarrierData::from(carrier.clone()));
    params.commodity = Some(CommodityData::new("Gold"));
    params
}

/// An event channel for one attempt, sender kept alive by the caller.
pub(super) fn events() -> (mpsc::Sender<AttemptEvent>, mpsc::Receiver<AttemptEvent>) {
    mpsc::channel(8)
}
