mod bot;
mod config;
mod data;
mod error;
mod model;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use std::sync::Arc;

use serenity::http::Http;

use crate::config::Config;
use crate::service::channel_lock::ChannelLockRegistry;
use crate::service::commodity::TableCommodityResolver;
use crate::service::surface::discord::DiscordSurface;
use crate::service::surface::forum::ForumClient;
use crate::service::surface::image::AdvertImageService;
use crate::service::surface::webhook::DiscordWebhookSurface;
use crate::service::surface::{ChannelSurface, Surfaces};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), error::AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let db = startup::connect_to_database(&config).await?;

    tracing::info!("Starting missionboard");

    // one HTTP handle shared by every Discord-facing surface
    let http = Arc::new(Http::new(&config.discord_bot_token));

    let channels: Arc<dyn ChannelSurface> =
        Arc::new(DiscordSurface::new(http.clone(), &config));
    let surfaces = Surfaces {
        channels: channels.clone(),
        forum: Arc::new(ForumClient::new(&config)),
        webhooks: Arc::new(DiscordWebhookSurface::new(http.clone())),
        images: Arc::new(AdvertImageService::new(
            config.image_dir.clone(),
            channels.clone(),
        )),
        commodities: Arc::new(TableCommodityResolver::new(channels.clone())),
    };

    let locks = Arc::new(ChannelLockRegistry::new());
    let state = AppState::new(db.clone(), config.clone(), surfaces.clone(), locks.clone());

    // idle-mission sweep runs alongside the bot
    {
        let scheduler_db = db.clone();
        let scheduler_surfaces = surfaces.clone();
        let scheduler_locks = locks.clone();
        tokio::spawn(async move {
            if let Err(e) = scheduler::mission_timeouts::start_scheduler(
                scheduler_db,
                scheduler_surfaces,
                scheduler_locks,
            )
            .await
            {
                tracing::error!("Mission timeout scheduler error: {}", e);
            }
        });
    }

    let client = bot::start::init_bot(&config.discord_bot_token, state).await?;
    bot::start::start_bot(client).await?;

    Ok(())
}
