//! Discord implementation of the channel/notification surface.
//!
//! Owns the embed cosmetics for every message the core emits: feedback
//! notices, trade alerts, the pinned mission announcement, and hauler pings.
//! Also implements delayed, cancellable channel removal for teardown grace
//! periods.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use async_trait::async_trait;
use serenity::all::{
    ChannelId, ChannelType, CreateAttachment, CreateChannel, CreateEmbed, CreateEmbedFooter,
    CreateMessage, GuildId, MessageId, PermissionOverwrite, PermissionOverwriteType, Permissions,
    UserId,
};
use serenity::http::Http;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::error::AppError;
use crate::model::{carrier::CarrierData, mission::MissionParams, mission::MissionType};
use crate::service::surface::{ChannelSurface, Notice, NoticeKind};
use crate::util::parse::parse_u64_from_string;

const EMBED_COLOUR_INFO: u32 = 0x3498db;
const EMBED_COLOUR_OK: u32 = 0x2ecc71;
const EMBED_COLOUR_WARN: u32 = 0xf39c12;
const EMBED_COLOUR_ERROR: u32 = 0xe74c3c;
const EMBED_COLOUR_LOADING: u32 = 0x1f8b4c;
const EMBED_COLOUR_UNLOADING: u32 = 0xe67e22;

/// Discord-backed channel surface.
pub struct DiscordSurface {
    http: Arc<Http>,
    guild_id: GuildId,
    trade_alerts: ChannelId,
    ops_channel: ChannelId,
    trade_category: ChannelId,
    hauler_role: u64,
    /// Pending delayed channel deletions, keyed by channel name.
    pending_deletes: Arc<StdMutex<HashMap<String, JoinHandle<()>>>>,
}

impl DiscordSurface {
    pub fn new(http: Arc<Http>, config: &Config) -> Self {
        Self {
            http,
            guild_id: GuildId::new(config.guild_id),
            trade_alerts: ChannelId::new(config.trade_alerts_channel),
            ops_channel: ChannelId::new(config.ops_channel),
            trade_category: ChannelId::new(config.trade_category),
            hauler_role: config.hauler_role,
            pending_deletes: Arc::new(StdMutex::new(HashMap::new())),
        }
    }

    fn notice_embed(notice: &Notice) -> CreateEmbed {
        let colour = match notice.kind {
            NoticeKind::Info => EMBED_COLOUR_INFO,
            NoticeKind::Success => EMBED_COLOUR_OK,
            NoticeKind::Warning => EMBED_COLOUR_WARN,
            NoticeKind::Error => EMBED_COLOUR_ERROR,
        };
        let mut embed = CreateEmbed::new()
            .description(notice.text.clone())
            .color(colour);
        if let Some(title) = &notice.title {
            embed = embed.title(title.clone());
        }
        embed
    }
}

/// Builds the embeds for the pinned mission announcement in the carrier
/// channel: buy/sell blocks, additional info, and the help footer.
pub(crate) fn mission_embeds(params: &MissionParams) -> Result<Vec<CreateEmbed>, AppError> {
    let carrier = params.carrier()?;
    let commodity = params.commodity_name()?;
    let pads = match params.pads {
        Some(p) => format!("**{}**", p.letter()),
        None => "**?**".to_string(),
    };
    let profit = params.profit.unwrap_or_default();
    let demand = params.demand.unwrap_or_default();

    let station_block = format!(
        "📌 Station: **{}**\n🛬 Landing Pad: {}\n🌟 System: **{}**\n📦 Commodity: **{}**",
        params.station,
        pads,
        params.system,
        commodity.to_uppercase()
    );
    let carrier_block = format!(
        "🎯 Fleet Carrier: **{}**\n🔢 Carrier ID: **{}**\n💰 Profit: **{}K PER TON**\n📥 Demand: **{}K TONS**",
        carrier.long_name, carrier.identifier, profit, demand
    );

    let (buy_description, sell_description, colour) = match params.mission_type {
        MissionType::Load => (station_block, carrier_block, EMBED_COLOUR_LOADING),
        MissionType::Unload => (carrier_block, station_block, EMBED_COLOUR_UNLOADING),
    };

    let buy_embed = CreateEmbed::new()
        .title("BUY FROM")
        .description(buy_description)
        .color(colour);
    let sell_embed = CreateEmbed::new()
        .title("SELL TO")
        .description(sell_description)
        .color(colour);

    let info_embed = CreateEmbed::new()
        .title("ADDITIONAL INFORMATION")
        .description(format!("💎 Carrier Owner: <@{}>", carrier.owner_id))
        .color(colour);

    let edmc_off_text = if params.edmc_off {
        "\n\n🤫 This mission is flagged **EDMC-OFF**. Please disable/quit all journal reporting apps until it completes."
    } else {
        ""
    };
    let help_embed = CreateEmbed::new()
        .description(format!(
            "✅ Use `/mission complete` in this channel once the mission is done, or unable to be completed.{}",
            edmc_off_text
        ))
        .color(colour);

    let mut embeds = vec![buy_embed, sell_embed, info_embed, help_embed];

    if let Some(message) = &params.message {
        embeds.push(
            CreateEmbed::new()
                .title("MESSAGE FROM THE CARRIER OWNER")
                .description(message.clone())
                .color(EMBED_COLOUR_INFO),
        );
    }

    Ok(embeds)
}

/// Builds the embeds sent to webhooks: buy/sell blocks plus a trimmed info
/// embed without server-internal references.
pub(crate) fn webhook_embeds(params: &MissionParams) -> Result<Vec<CreateEmbed>, AppError> {
    let mut embeds = mission_embeds(params)?;
    // drop the local help embed; webhook audiences can't run our commands
    embeds.truncate(3);
    if let Some(message) = &params.message {
        embeds.push(
            CreateEmbed::new()
                .title("MESSAGE FROM THE CARRIER OWNER")
                .description(message.clone())
                .color(EMBED_COLOUR_INFO),
        );
    }
    Ok(embeds)
}

#[async_trait]
impl ChannelSurface for DiscordSurface {
    async fn ensure_mission_channel(&self, carrier: &CarrierData) -> Result<u64, AppError> {
        let channels = self.guild_id.channels(&self.http).await?;
        let existing = channels.values().find(|channel| {
            channel.name == carrier.channel_name && channel.parent_id == Some(self.trade_category)
        });

        let channel_id = match existing {
            Some(channel) => {
                tracing::info!(channel = %carrier.channel_name, "Reusing existing mission channel");
                channel.id
            }
            None => {
                let builder = CreateChannel::new(&carrier.channel_name)
                    .kind(ChannelType::Text)
                    .category(self.trade_category)
                    .topic(format!("Trade mission channel for {}", carrier.long_name));
                let channel = self.guild_id.create_channel(&self.http, builder).await?;
                tracing::info!(channel = %carrier.channel_name, "Created mission channel");
                channel.id
            }
        };

        // grant the carrier owner elevated permissions in their channel
        let owner = UserId::new(parse_u64_from_string(carrier.owner_id.clone())?);
        let overwrite = PermissionOverwrite {
            allow: Permissions::VIEW_CHANNEL
                | Permissions::SEND_MESSAGES
                | Permissions::MANAGE_MESSAGES
                | Permissions::EMBED_LINKS
                | Permissions::ATTACH_FILES,
            deny: Permissions::empty(),
            kind: PermissionOverwriteType::Member(owner),
        };
        channel_id.create_permission(&self.http, overwrite).await?;

        Ok(channel_id.get())
    }

    async fn send_notice(&self, channel_id: u64, notice: Notice) -> Result<u64, AppError> {
        let message = ChannelId::new(channel_id)
            .send_message(
                &self.http,
                CreateMessage::new().embed(Self::notice_embed(&notice)),
            )
            .await?;
        Ok(message.id.get())
    }

    async fn send_ops_notice(&self, notice: Notice) -> Result<(), AppError> {
        self.ops_channel
            .send_message(
                &self.http,
                CreateMessage::new().embed(Self::notice_embed(&notice)),
            )
            .await?;
        Ok(())
    }

    async fn send_alert(&self, text: &str) -> Result<u64, AppError> {
        let embed = CreateEmbed::new()
            .description(text.to_string())
            .color(EMBED_COLOUR_INFO);
        let message = self
            .trade_alerts
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await?;
        Ok(message.id.get())
    }

    async fn send_mission_post(
        &self,
        channel_id: u64,
        params: &MissionParams,
    ) -> Result<u64, AppError> {
        let channel = ChannelId::new(channel_id);
        let embeds = mission_embeds(params)?;

        let mut builder = CreateMessage::new().embeds(embeds);
        if let Some(path) = &params.channel_image {
            builder = builder.add_file(CreateAttachment::path(path).await?);
        }

        let message = channel.send_message(&self.http, builder).await?;
        message.pin(&self.http).await?;

        if params.edmc_off {
            let warning = CreateEmbed::new()
                .title("PLEASE STOP ALL JOURNAL REPORTING SOFTWARE")
                .description(
                    "Keeping market data at this station a secret maximises hauler profits. \
                     Please disable or exit all journal reporting plugins and programs until \
                     every mission at this location is complete.",
                )
                .footer(CreateEmbedFooter::new("This mission is flagged EDMC-OFF."))
                .color(EMBED_COLOUR_WARN);
            let pin_warning = channel
                .send_message(&self.http, CreateMessage::new().embed(warning))
                .await?;
            pin_warning.pin(&self.http).await?;
        }

        Ok(message.id.get())
    }

    async fn notify_haulers(&self, channel_id: u64, text: &str) -> Result<u64, AppError> {
        let message = ChannelId::new(channel_id)
            .send_message(
                &self.http,
                CreateMessage::new().content(format!("<@&{}>: {}", self.hauler_role, text)),
            )
            .await?;
        Ok(message.id.get())
    }

    async fn delete_alert(&self, message_id: u64) -> Result<(), AppError> {
        self.trade_alerts
            .delete_message(&self.http, MessageId::new(message_id))
            .await?;
        Ok(())
    }

    async fn schedule_delete(&self, channel_id: u64, channel_name: &str, delay: Duration) {
        let http = self.http.clone();
        let pending = self.pending_deletes.clone();
        let name = channel_name.to_string();

        let task_name = name.clone();
        let task_pending = pending.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = ChannelId::new(channel_id).delete(&http).await {
                tracing::error!(channel = %task_name, "Failed to delete mission channel: {}", e);
            } else {
                tracing::info!(channel = %task_name, "Deleted mission channel after grace period");
            }
            task_pending
                .lock()
                .expect("pending delete map poisoned")
                .remove(&task_name);
        });

        let mut map = pending.lock().expect("pending delete map poisoned");
        if let Some(previous) = map.insert(name, handle) {
            previous.abort();
        }
    }

    async fn cancel_scheduled_delete(&self, channel_name: &str) -> bool {
        let handle = self
            .pending_deletes
            .lock()
            .expect("pending delete map poisoned")
            .remove(channel_name);
        match handle {
            Some(handle) => {
                handle.abort();
                tracing::info!(channel = channel_name, "Cancelled scheduled channel deletion");
                true
            }
            None => false,
        }
    }
}
