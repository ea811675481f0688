//! Discord bot integration: the command layer over the mission lifecycle.
//!
//! The bot registers the guild slash commands on ready and dispatches
//! interactions into the service layer. Component interactions (the target
//! selection menu, disambiguation choices) are routed to their in-flight
//! mission attempt through [`attempts::AttemptRouter`].
//!
//! The bot is initialized during startup and runs in its own tokio task; its
//! HTTP client is shared with the surfaces so messages and embeds go out over
//! one connection.
//!
//! # Gateway Intents
//!
//! Only `GUILDS` and `GUILD_MESSAGES` are required; command and component
//! interactions arrive regardless.

pub mod attempts;
pub mod commands;
pub mod handler;
pub mod start;
