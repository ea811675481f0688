//! The mission send orchestrator.
//!
//! Given validated parameters and the user's chosen send targets, executes
//! each target as an independent, partially-failable step. The chat-channel
//! send is mandatory and is the step that acquires the channel lock and
//! creates or reuses the dedicated channel; forum, webhooks and the hauler
//! ping are optional and never abort each other. On chat failure the lock is
//! released, any created channel is scheduled for delayed removal, and
//! nothing is persisted.

use chrono::Utc;

use crate::error::AppError;
use crate::model::mission::{AttemptState, MissionParams, SendFlags};
use crate::service::channel_lock::ChannelLockGuard;
use crate::service::mission::{
    textgen, CommandContext, MissionOutcome, MissionService, CHANNEL_GRACE_SHORT,
    EXTERNAL_PROFIT_FLOOR,
};
use crate::service::surface::Notice;

impl MissionService<'_> {
    /// Runs the send orchestration for a validated attempt.
    ///
    /// Policy:
    /// - a cancel flag aborts unconditionally
    /// - copy-text export runs first; export-only is a legitimate end state
    /// - the chat send is mandatory for everything else
    /// - forum/webhooks re-check the external profit floor independently and
    ///   are suppressed by the secrecy flag
    /// - the hauler ping follows any successful chat send, secrecy or not
    pub async fn gen_mission(
        &self,
        ctx: &CommandContext,
        params: &mut MissionParams,
        flags: SendFlags,
    ) -> Result<MissionOutcome, AppError> {
        params.timestamp = Some(Utc::now());
        params.edmc_off = flags.edmc_off;

        // cancel wins over every other flag
        if flags.cancel {
            self.notify(ctx, Notice::error("**Mission creation cancelled.**"))
                .await;
            return Ok(MissionOutcome::Cancelled);
        }

        if flags.copy_text {
            self.send_copy_texts(ctx, params).await?;
            if !flags.discord {
                self.cleanup_temp_images(params);
                return Ok(MissionOutcome::ExportOnly);
            }
        }

        if !flags.discord {
            self.notify(
                ctx,
                Notice::error(
                    "❌ **ERROR**: Sending to the chat channel is required. Please try again.",
                ),
            )
            .await;
            return Ok(MissionOutcome::Rejected);
        }

        let carrier = params.carrier()?.clone();
        tracing::info!(
            state = ?AttemptState::Sending,
            carrier = %carrier.long_name,
            user = ctx.user_id,
            "Starting mission sends"
        );

        // the chat step owns the channel lock from here to persistence
        let lock = match self.locks.acquire(&carrier.channel_name).await {
            Ok(lock) => {
                self.notify_ops(Notice::info(format!(
                    "🔒 Acquired lock for `{}` for mission creation.",
                    carrier.channel_name
                )))
                .await;
                lock
            }
            Err(AppError::ChannelLockTimeout { channel, seconds }) => {
                self.notify(
                    ctx,
                    Notice::error(format!(
                        "❌ **ERROR**: Could not acquire the channel lock for `{}` after {} seconds. \
                         Please try again; if the problem persists, contact an Admin.",
                        channel, seconds
                    )),
                )
                .await;
                self.notify_ops(Notice::error(format!(
                    "Lock acquisition timed out for `{}` (mission generation by <@{}>).",
                    channel, ctx.user_id
                )))
                .await;
                return Ok(MissionOutcome::LockUnavailable);
            }
            Err(e) => return Err(e),
        };

        if let Err(error) = self.send_to_chat(ctx, params).await {
            return Ok(self.cleanup_failed_send(ctx, params, lock, error).await);
        }

        // optional surfaces; per-target failures never abort the siblings
        if flags.forum {
            self.send_to_forum(ctx, params).await;
        }
        if flags.webhooks {
            self.send_to_webhooks(ctx, params).await;
        }
        if flags.notify_haulers {
            self.notify_hauler_role(ctx, params).await;
        }

        if params.edmc_off && flags.any_external() {
            let mut skipped = Vec::new();
            if flags.forum {
                skipped.push("the forum");
            }
            if flags.webhooks {
                skipped.push("webhooks");
            }
            self.notify(
                ctx,
                Notice::warning(format!(
                    "External sends skipped for **{}**: cannot post to {} with the mission flagged **EDMC-OFF**.",
                    carrier.long_name,
                    skipped.join(" or ")
                )),
            )
            .await;
        }

        let outcome = self.commit(ctx, params, lock).await?;
        self.cleanup_temp_images(params);
        Ok(outcome)
    }

    /// The mandatory chat-channel step: claim the channel, alert the trade
    /// channel, post and pin the announcement.
    async fn send_to_chat(
        &self,
        ctx: &CommandContext,
        params: &mut MissionParams,
    ) -> Result<(), AppError> {
        let carrier = params.carrier()?.clone();

        // a new mission claiming the channel supersedes any pending teardown
        if self
            .surfaces
            .channels
            .cancel_scheduled_delete(&carrier.channel_name)
            .await
        {
            self.notify_ops(Notice::info(format!(
                "Cancelled scheduled deletion of `{}` — a new mission claims the channel.",
                carrier.channel_name
            )))
            .await;
        }

        params.channel_image = Some(self.surfaces.images.render_channel_image(params).await?);

        let channel_id = self
            .surfaces
            .channels
            .ensure_mission_channel(&carrier)
            .await?;
        params.mission_channel_id = Some(channel_id);

        // the alert text carries the channel mention, so build it now
        let alert_text = textgen::chat_alert_text(params)?;
        params.alert_text = Some(alert_text.clone());

        let alert_id = self.surfaces.channels.send_alert(&alert_text).await?;
        params.alert_message_id = Some(alert_id);

        let post_id = self
            .surfaces
            .channels
            .send_mission_post(channel_id, params)
            .await?;
        params.channel_message_id = Some(post_id);

        self.notify(
            ctx,
            Notice::success(format!(
                "Chat alerts sent for **{}** — see the trade alerts channel and <#{}>.",
                carrier.long_name, channel_id
            )),
        )
        .await;

        Ok(())
    }

    /// Best-effort cleanup after a failed mandatory send: report to user and
    /// operators, schedule delayed removal of any channel already created,
    /// release the lock. Nothing is persisted.
    async fn cleanup_failed_send(
        &self,
        ctx: &CommandContext,
        params: &MissionParams,
        lock: ChannelLockGuard,
        error: AppError,
    ) -> MissionOutcome {
        let channel_name = lock.channel().to_string();
        tracing::error!(
            state = ?AttemptState::TerminatedFailed,
            channel = %channel_name,
            "Mandatory chat send failed: {}",
            error
        );

        self.notify(
            ctx,
            Notice::error(format!(
                "❌ **ERROR**: {}\n\nThe mission was **not** entered into the database. \
                 Fix the problem and re-run generation.",
                error
            )),
        )
        .await;
        self.notify_ops(Notice::error(format!(
            "Error on mission generation by <@{}> at {}: {}",
            ctx.user_id, ctx.invocation_url, error
        )))
        .await;

        // leave operators a window to inspect before the channel disappears
        if let Some(channel_id) = params.mission_channel_id {
            self.surfaces
                .channels
                .schedule_delete(channel_id, &channel_name, CHANNEL_GRACE_SHORT)
                .await;
        }

        drop(lock);
        self.notify_ops(Notice::success(format!(
            "🔓 Released lock for `{}` after failed mission generation.",
            channel_name
        )))
        .await;

        self.cleanup_temp_images(params);
        MissionOutcome::Failed
    }

    /// Whether the profit clears the floor for public posting; reports the
    /// skip when it does not. Re-checked per surface because the user may
    /// request forum-only or webhook-only sends.
    async fn external_margin_ok(
        &self,
        ctx: &CommandContext,
        params: &MissionParams,
        surface: &str,
    ) -> bool {
        let profit = params.profit.unwrap_or_default();
        if profit < EXTERNAL_PROFIT_FLOOR {
            self.notify(
                ctx,
                Notice::warning(format!(
                    "Skipped the {} send: {}K/ton is below the {}K/ton minimum profit margin for public posting.",
                    surface, profit, EXTERNAL_PROFIT_FLOOR as i64
                )),
            )
            .await;
            return false;
        }
        true
    }

    async fn send_to_forum(&self, ctx: &CommandContext, params: &mut MissionParams) {
        if params.edmc_off {
            return; // reported collectively by the orchestrator
        }
        if !self.external_margin_ok(ctx, params, "forum").await {
            return;
        }

        let carrier_name = params
            .carrier
            .as_ref()
            .map(|c| c.long_name.clone())
            .unwrap_or_default();

        match self.try_send_to_forum(params).await {
            Ok(()) => {
                let url = params.forum_post_url.clone().unwrap_or_default();
                self.notify(
                    ctx,
                    Notice::success(format!(
                        "Forum post created for **{}**: {}",
                        carrier_name, url
                    )),
                )
                .await;
            }
            Err(error) => {
                self.notify(
                    ctx,
                    Notice::error(format!(
                        "❌ **ERROR**: Could not send to the forum: {}. Attempting to continue with other sends.",
                        error
                    )),
                )
                .await;
            }
        }
    }

    async fn try_send_to_forum(&self, params: &mut MissionParams) -> Result<(), AppError> {
        if params.forum_title.is_none() {
            params.forum_title = Some(textgen::forum_title(params)?);
            params.forum_body = Some(textgen::forum_body(params)?);
        }
        if params.forum_image.is_none() {
            params.forum_image = Some(self.surfaces.images.render_forum_image(params).await?);
        }

        let title = params.forum_title.clone().unwrap_or_default();
        let image = params.forum_image.clone().unwrap_or_default();

        let post = self.surfaces.forum.submit_image_post(&title, &image).await?;
        params.forum_post_id = Some(post.id.clone());
        params.forum_post_url = Some(post.url);

        let body = params.forum_body.clone().unwrap_or_default();
        let body = match &params.message {
            Some(message) => format!("> {}\n\n{}", message, body),
            None => body,
        };
        let comment = self.surfaces.forum.reply(&post.id, &body).await?;
        params.forum_comment_id = Some(comment.id);
        params.forum_comment_url = Some(comment.url);

        Ok(())
    }

    /// Sends to every registered webhook. One bad URL is reported and does
    /// not block the rest; a failed slot records a zero id so the outcome
    /// lists stay parallel with the registration lists.
    async fn send_to_webhooks(&self, ctx: &CommandContext, params: &mut MissionParams) {
        if params.edmc_off {
            return; // reported collectively by the orchestrator
        }
        if !self.external_margin_ok(ctx, params, "webhook").await {
            return;
        }
        if params.webhook_urls.is_empty() {
            self.notify(
                ctx,
                Notice::info("No webhooks registered — use `/webhook add` to register one."),
            )
            .await;
            return;
        }

        let targets: Vec<(String, String)> = params
            .webhook_urls
            .iter()
            .cloned()
            .zip(params.webhook_names.iter().cloned())
            .collect();

        for (url, name) in targets {
            match self.surfaces.webhooks.send(&url, params).await {
                Ok(message) => {
                    params.webhook_message_ids.push(message.id);
                    params.webhook_jump_urls.push(message.jump_url.clone());
                    self.notify(
                        ctx,
                        Notice::success(format!(
                            "Webhook trade alert sent to **{}**: {}",
                            name, message.jump_url
                        )),
                    )
                    .await;
                }
                Err(error) => {
                    params.webhook_message_ids.push(0);
                    params.webhook_jump_urls.push(String::new());
                    self.notify(
                        ctx,
                        Notice::error(format!(
                            "❌ **ERROR**: Could not send to webhook **{}**: {}. Attempting to continue with other sends.",
                            name, error
                        )),
                    )
                    .await;
                }
            }
        }
    }

    /// Pings the hauler role in the dedicated channel. Internal notification,
    /// so the secrecy flag does not suppress it.
    async fn notify_hauler_role(&self, ctx: &CommandContext, params: &mut MissionParams) {
        let (Some(channel_id), Some(alert_text)) =
            (params.mission_channel_id, params.alert_text.clone())
        else {
            return;
        };

        match self
            .surfaces
            .channels
            .notify_haulers(channel_id, &alert_text)
            .await
        {
            Ok(message_id) => {
                params.notify_message_id = Some(message_id);
                self.notify(
                    ctx,
                    Notice::success(format!("Hauler notification sent in <#{}>.", channel_id)),
                )
                .await;
            }
            Err(error) => {
                self.notify(
                    ctx,
                    Notice::error(format!(
                        "❌ **ERROR**: Could not ping haulers: {}. Attempting to continue.",
                        error
                    )),
                )
                .await;
            }
        }
    }

    /// The copy-paste text export: chat alert, forum title and body, ready
    /// for manual posting.
    async fn send_copy_texts(
        &self,
        ctx: &CommandContext,
        params: &mut MissionParams,
    ) -> Result<(), AppError> {
        if params.forum_title.is_none() {
            params.forum_title = Some(textgen::forum_title(params)?);
            params.forum_body = Some(textgen::forum_body(params)?);
        }
        let alert_text = textgen::chat_alert_text(params)?;

        self.notify(
            ctx,
            Notice::info(format!("```{}```", alert_text)).titled("Trade Alert (chat)"),
        )
        .await;
        self.notify(
            ctx,
            Notice::info(format!("`{}`", params.forum_title.clone().unwrap_or_default()))
                .titled("Forum Post Title"),
        )
        .await;

        let body = params.forum_body.clone().unwrap_or_default();
        let body = match &params.message {
            Some(message) => format!("> {}\n\n{}", message, body),
            None => body,
        };
        self.notify(
            ctx,
            Notice::info(format!("```{}```", body)).titled("Forum Post Body"),
        )
        .await;

        let carrier_name = params
            .carrier
            .as_ref()
            .map(|c| c.long_name.clone())
            .unwrap_or_default();
        self.notify(
            ctx,
            Notice::success(format!("Text generation complete for **{}**.", carrier_name)),
        )
        .await;

        Ok(())
    }

    /// Removes the temp image files rendered for this attempt.
    pub(crate) fn cleanup_temp_images(&self, params: &MissionParams) {
        for path in [&params.channel_image, &params.forum_image]
            .into_iter()
            .flatten()
        {
            if path.is_file() {
                if let Err(e) = std::fs::remove_file(path) {
                    tracing::warn!("Failed to remove temp image {}: {}", path.display(), e);
                }
            }
        }
    }
}
