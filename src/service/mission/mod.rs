//! The mission lifecycle coordinator.
//!
//! One attempt flows through validation ([`validation`]), user target
//! confirmation ([`confirm`]), send orchestration ([`generation`]),
//! persistence ([`persistence`]) and, later, teardown ([`teardown`]).
//! [`textgen`] holds the pure text generators shared by every surface.

pub mod confirm;
pub mod generation;
pub mod persistence;
pub mod teardown;
pub mod textgen;
pub mod validation;

#[cfg(test)]
mod test;

use std::sync::Arc;
use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::service::channel_lock::ChannelLockRegistry;
use crate::service::surface::{Notice, Surfaces};

/// Minimum profit (thousands of credits per ton) for posting to external
/// surfaces (forum, webhooks).
pub const EXTERNAL_PROFIT_FLOOR: f64 = 10.0;

/// Maximum supply/demand in thousands of tons: the capacity of a Fleet
/// Carrier.
pub const CARRIER_CAPACITY_KTONS: f64 = 25.0;

/// Grace delay before a mission channel is removed after a failed send.
///
/// Long enough for an operator to look inside before it disappears.
pub const CHANNEL_GRACE_SHORT: Duration = Duration::from_secs(120);

/// Grace delay before a mission channel is removed after teardown, so
/// participants can read the closing notice.
pub const CHANNEL_GRACE_LONG: Duration = Duration::from_secs(900);

/// Missions older than this are torn down by the idle sweep.
pub const MISSION_MAX_AGE_HOURS: i64 = 72;

/// Where a command came from: the acting user and the channel to report back
/// into, plus a jump URL for operator reports.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub user_id: u64,
    pub origin_channel: u64,
    pub invocation_url: String,
}

/// Terminal outcome of one mission-generation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionOutcome {
    /// Mandatory send succeeded and the mission was persisted.
    Sent,
    /// Copy-paste export only; nothing sent, nothing persisted.
    ExportOnly,
    /// Rejected before any send (validation or missing mandatory target).
    Rejected,
    /// User cancelled.
    Cancelled,
    /// The channel lock could not be acquired; nothing was touched.
    LockUnavailable,
    /// The mandatory send failed; cleanup ran, nothing was persisted.
    Failed,
}

impl MissionOutcome {
    /// The attempt state this outcome terminates in.
    pub fn final_state(&self) -> crate::model::mission::AttemptState {
        use crate::model::mission::AttemptState;
        match self {
            MissionOutcome::Sent | MissionOutcome::ExportOnly => AttemptState::TerminatedOk,
            MissionOutcome::Rejected
            | MissionOutcome::Cancelled
            | MissionOutcome::LockUnavailable => AttemptState::TerminatedRejected,
            MissionOutcome::Failed => AttemptState::TerminatedFailed,
        }
    }
}

/// Coordinates the full lifecycle of trade missions.
pub struct MissionService<'a> {
    db: &'a DatabaseConnection,
    surfaces: Surfaces,
    locks: Arc<ChannelLockRegistry>,
}

impl<'a> MissionService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        surfaces: Surfaces,
        locks: Arc<ChannelLockRegistry>,
    ) -> Self {
        Self {
            db,
            surfaces,
            locks,
        }
    }

    /// Sends a feedback notice to the command's origin channel.
    ///
    /// Feedback failures are logged but never abort the lifecycle step that
    /// produced them.
    pub(crate) async fn notify(&self, ctx: &CommandContext, notice: Notice) {
        if let Err(e) = self
            .surfaces
            .channels
            .send_notice(ctx.origin_channel, notice)
            .await
        {
            tracing::error!("Failed to send user notice: {}", e);
        }
    }

    /// Sends a notice to the operator channel.
    pub(crate) async fn notify_ops(&self, notice: Notice) {
        if let Err(e) = self.surfaces.channels.send_ops_notice(notice).await {
            tracing::error!("Failed to send operator notice: {}", e);
        }
    }
}
