//! Mission teardown: completion, failure, and idle timeout.
//!
//! Teardown recovers the exact generation-time parameters from the stored
//! blob, posts a closing notice to the dedicated channel, closes out the
//! original external posts in place (forum flair + comment, webhook message
//! edits), deletes the mission row, and schedules the channel for removal
//! after a grace delay long enough for participants to read the notice. A
//! new mission claiming the same channel name cancels the pending removal.

use crate::data::{carrier::CarrierRepository, mission::MissionRepository};
use crate::error::AppError;
use crate::model::mission::MissionParams;
use crate::service::mission::{
    textgen, CommandContext, MissionService, CHANNEL_GRACE_LONG,
};
use crate::service::surface::Notice;
use crate::util::parse::parse_u64_from_string;

/// Why a mission is being torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownOutcome {
    /// The mission ran to completion.
    Complete,
    /// The mission ended without completing (price change, supply exhausted).
    Concluded,
    /// The idle sweep expired the mission.
    TimedOut,
}

impl TeardownOutcome {
    /// Status word used in closing notices.
    pub fn status(&self) -> &'static str {
        match self {
            TeardownOutcome::Complete => "complete",
            TeardownOutcome::Concluded => "concluded",
            TeardownOutcome::TimedOut => "timed out",
        }
    }
}

impl MissionService<'_> {
    /// Tears down an active mission.
    ///
    /// `ctx` is present for user-invoked completion and absent for the idle
    /// sweep. External-surface failures are reported to operators and never
    /// stop the teardown; the row deletion is the last durable step so an
    /// interrupted teardown leaves the mission discoverable.
    pub async fn teardown(
        &self,
        ctx: Option<&CommandContext>,
        mission: entity::mission::Model,
        outcome: TeardownOutcome,
        reason: Option<String>,
    ) -> Result<(), AppError> {
        tracing::info!(
            carrier = %mission.carrier_name,
            status = outcome.status(),
            "Tearing down mission"
        );

        // recover the exact generation-time parameters
        let params: Option<MissionParams> = match serde_json::from_str(&mission.params) {
            Ok(params) => Some(params),
            Err(e) => {
                self.notify_ops(Notice::warning(format!(
                    "Stored parameters for {} could not be deserialized ({}); tearing down from the normalized columns only.",
                    mission.carrier_name, e
                )))
                .await;
                None
            }
        };

        let channel_name = match params
            .as_ref()
            .and_then(|p| p.carrier.as_ref())
            .map(|c| c.channel_name.clone())
        {
            Some(name) => Some(name),
            None => {
                let repo = CarrierRepository::new(self.db);
                repo.find_by_long_name(&mission.carrier_name)
                    .await?
                    .map(|c| c.channel_name)
            }
        };

        // hold the channel lock so a concurrent generation can't race the
        // removal; no channel name means there is no channel to race on
        let lock = match &channel_name {
            Some(name) => Some(self.locks.acquire(name).await?),
            None => None,
        };

        let closing = textgen::completion_text(
            &mission.carrier_name,
            outcome.status(),
            reason.as_deref(),
        );

        let channel_id = parse_u64_from_string(mission.channel_id.clone()).ok();

        // closing notice into the dedicated channel
        if let Some(channel_id) = channel_id {
            let notice = Notice::success(closing.clone()).titled(format!(
                "{} MISSION {}",
                mission.carrier_name,
                outcome.status().to_uppercase()
            ));
            if let Err(e) = self.surfaces.channels.send_notice(channel_id, notice).await {
                self.notify_ops(Notice::error(format!(
                    "Could not post the closing notice for {}: {}",
                    mission.carrier_name, e
                )))
                .await;
            }
        }

        // the trade alert comes down with the mission
        if let Some(alert_id) = mission
            .alert_message_id
            .as_ref()
            .and_then(|id| parse_u64_from_string(id.clone()).ok())
        {
            if let Err(e) = self.surfaces.channels.delete_alert(alert_id).await {
                self.notify_ops(Notice::error(format!(
                    "Could not delete the trade alert for {}: {}",
                    mission.carrier_name, e
                )))
                .await;
            }
        }

        // close out the original external posts in place rather than reposting
        if let Some(post_id) = &mission.forum_post_id {
            if let Err(e) = self.surfaces.forum.mark_completed(post_id, &closing).await {
                self.notify_ops(Notice::error(format!(
                    "Could not mark the forum post complete for {}: {}",
                    mission.carrier_name, e
                )))
                .await;
            }
        }
        if let Some(p) = &params {
            for (url, message_id) in p.webhook_urls.iter().zip(p.webhook_message_ids.iter()) {
                if *message_id == 0 {
                    continue; // this webhook send failed at generation time
                }
                if let Err(e) = self.surfaces.webhooks.edit(url, *message_id, &closing).await {
                    self.notify_ops(Notice::error(format!(
                        "Could not edit webhook message {} for {}: {}",
                        message_id, mission.carrier_name, e
                    )))
                    .await;
                }
            }
        }

        // the row goes last so an interrupted teardown leaves the mission
        // discoverable via /missions
        let repo = MissionRepository::new(self.db);
        repo.delete_by_carrier(&mission.carrier_name).await?;

        if let (Some(channel_id), Some(name)) = (channel_id, &channel_name) {
            self.surfaces
                .channels
                .schedule_delete(channel_id, name, CHANNEL_GRACE_LONG)
                .await;
        }

        if let Some(ctx) = ctx {
            self.notify(
                ctx,
                Notice::success(format!(
                    "Mission for **{}** marked {}. The mission channel will be removed in {} minutes.",
                    mission.carrier_name,
                    outcome.status(),
                    CHANNEL_GRACE_LONG.as_secs() / 60
                )),
            )
            .await;
        }
        self.notify_ops(Notice::info(format!(
            "Mission for {} torn down ({}).",
            mission.carrier_name,
            outcome.status()
        )))
        .await;

        drop(lock);
        Ok(())
    }
}
