use std::path::PathBuf;

use crate::error::{config::ConfigError, AppError};

/// Application configuration loaded from the environment.
///
/// Discord IDs are parsed to `u64` at load time so a malformed deployment
/// fails at startup rather than on first use.
pub struct Config {
    pub database_url: String,

    pub discord_bot_token: String,
    pub guild_id: u64,

    /// Channel receiving the public trade alerts.
    pub trade_alerts_channel: u64,
    /// Channel receiving operator notifications (errors, lock events, sweeps).
    pub ops_channel: u64,
    /// Category under which dedicated mission channels are created.
    pub trade_category: u64,
    /// Role pinged for hauler notifications.
    pub hauler_role: u64,

    pub forum_base_url: String,
    pub forum_api_token: String,
    pub forum_board: String,
    pub forum_flair_active: String,
    pub forum_flair_completed: String,

    /// Directory holding carrier advertisement images (`<short_name>.png`).
    pub image_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            database_url: require("DATABASE_URL")?,
            discord_bot_token: require("DISCORD_BOT_TOKEN")?,
            guild_id: require_id("DISCORD_GUILD_ID")?,
            trade_alerts_channel: require_id("TRADE_ALERTS_CHANNEL_ID")?,
            ops_channel: require_id("OPS_CHANNEL_ID")?,
            trade_category: require_id("TRADE_CATEGORY_ID")?,
            hauler_role: require_id("HAULER_ROLE_ID")?,
            forum_base_url: require("FORUM_BASE_URL")?,
            forum_api_token: require("FORUM_API_TOKEN")?,
            forum_board: require("FORUM_BOARD")?,
            forum_flair_active: require("FORUM_FLAIR_ACTIVE")?,
            forum_flair_completed: require("FORUM_FLAIR_COMPLETED")?,
            image_dir: PathBuf::from(require("CARRIER_IMAGE_DIR")?),
        })
    }
}

fn require(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn require_id(name: &str) -> Result<u64, ConfigError> {
    let raw = require(name)?;
    raw.parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(name.to_string(), e.to_string()))
}
