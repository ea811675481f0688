//! Mission persistence.
//!
//! Commits the mission row after a successful mandatory send. The channel
//! lock is released whatever the insert does, and every failure after the
//! row exists is reported as an anomaly that tells the user explicitly that
//! the record *does* exist; that decides whether they retry generation or
//! use the completion command.

use crate::data::{carrier::CarrierRepository, is_unique_violation, mission::MissionRepository};
use crate::error::AppError;
use crate::model::mission::{AttemptState, MissionParams};
use crate::service::channel_lock::ChannelLockGuard;
use crate::service::mission::{
    CommandContext, MissionOutcome, MissionService, CHANNEL_GRACE_SHORT,
};
use crate::service::surface::Notice;

impl MissionService<'_> {
    /// Serializes the attempt into the mission store, stamps the carrier's
    /// last-trade timestamp and releases the channel lock.
    pub(crate) async fn commit(
        &self,
        ctx: &CommandContext,
        params: &mut MissionParams,
        lock: ChannelLockGuard,
    ) -> Result<MissionOutcome, AppError> {
        let carrier = params.carrier()?.clone();
        let repo = MissionRepository::new(self.db);
        let insert_result = repo.insert(params).await;

        // the lock is released whatever the insert did
        let channel_name = lock.channel().to_string();
        drop(lock);
        self.notify_ops(Notice::success(format!(
            "🔓 Released lock for `{}`.",
            channel_name
        )))
        .await;

        let mission = match insert_result {
            Ok(mission) => mission,
            Err(e) if is_unique_violation(&e) => {
                // a concurrent flow for this carrier won the window between
                // the validation check and commit
                self.notify(
                    ctx,
                    Notice::error(format!(
                        "❌ **ERROR**: **{}** already has an active mission — another generation finished first. \
                         This attempt was **not** stored; use `/mission complete` on the existing mission if you need to regenerate.",
                        carrier.long_name
                    )),
                )
                .await;
                self.notify_ops(Notice::error(format!(
                    "Duplicate mission insert blocked for {} (attempt by <@{}> at {}).",
                    carrier.long_name, ctx.user_id, ctx.invocation_url
                )))
                .await;
                if let Some(channel_id) = params.mission_channel_id {
                    self.surfaces
                        .channels
                        .schedule_delete(channel_id, &channel_name, CHANNEL_GRACE_SHORT)
                        .await;
                }
                return Ok(MissionOutcome::Rejected);
            }
            Err(e) => {
                self.notify(
                    ctx,
                    Notice::error(format!(
                        "❌ **ERROR**: The mission could not be saved: {}\n\nThe mission record does **not** exist in the store — re-run generation once the problem is fixed.",
                        e
                    )),
                )
                .await;
                self.notify_ops(Notice::error(format!(
                    "Mission insert failed for {} (attempt by <@{}> at {}): {}",
                    carrier.long_name, ctx.user_id, ctx.invocation_url, e
                )))
                .await;
                return Ok(MissionOutcome::Failed);
            }
        };

        // the record exists from here on; failures are anomalies, not aborts
        let carrier_repo = CarrierRepository::new(self.db);
        // an EDMC-off mission keeps the station dark on the external market
        // API; a public mission feeds it
        if let Err(e) = carrier_repo
            .set_market_api(carrier.id, !params.edmc_off)
            .await
        {
            self.notify_ops(Notice::error(format!(
                "Post-commit anomaly for {}: failed to update the market API flag: {}. The mission record exists.",
                carrier.long_name, e
            )))
            .await;
        }
        if let Err(e) = carrier_repo.update_last_trade(carrier.id).await {
            self.notify_ops(Notice::error(format!(
                "Post-commit anomaly for {}: failed to update the last-trade timestamp: {}. The mission record exists.",
                carrier.long_name, e
            )))
            .await;
            self.notify(
                ctx,
                Notice::warning(
                    "Mission stored, but carrier bookkeeping failed — an operator has been notified. \
                     The mission record **does** exist; use `/mission complete` to close it.",
                ),
            )
            .await;
        }

        tracing::info!(
            state = ?AttemptState::Persisted,
            mission_id = mission.id,
            carrier = %carrier.long_name,
            "Mission committed"
        );

        self.notify(
            ctx,
            Notice::success(format!(
                "Mission entered into the missions database. Use `/missions` to list active missions \
                 or `/mission complete` in <#{}> when it is done.",
                params.mission_channel_id.unwrap_or_default()
            ))
            .titled(format!(
                "{}ING {} ({})",
                params.mission_type.as_str().to_uppercase(),
                carrier.long_name,
                carrier.identifier
            )),
        )
        .await;
        self.notify_ops(Notice::info(format!(
            "<@{}> started a mission for {} from {}.",
            ctx.user_id, carrier.long_name, ctx.invocation_url
        )))
        .await;

        Ok(MissionOutcome::Sent)
    }
}
