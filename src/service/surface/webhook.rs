//! Webhook surface over Serenity's webhook client.
//!
//! Each registered webhook URL receives the mission embeds and image. Sends
//! use `wait=true` so Discord returns the full message, giving us the id and
//! jump URL the teardown path needs to edit the post in place later.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{CreateAttachment, EditWebhookMessage, ExecuteWebhook, MessageId, Webhook};
use serenity::http::Http;

use crate::error::AppError;
use crate::model::mission::MissionParams;
use crate::service::surface::discord::webhook_embeds;
use crate::service::surface::{WebhookMessage, WebhookSurface};

pub struct DiscordWebhookSurface {
    http: Arc<Http>,
}

impl DiscordWebhookSurface {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl WebhookSurface for DiscordWebhookSurface {
    async fn validate(&self, url: &str) -> Result<(), AppError> {
        let webhook = Webhook::from_url(&self.http, url).await?;
        let probe = webhook
            .execute(
                &self.http,
                true,
                ExecuteWebhook::new()
                    .username("Missionboard")
                    .content("Verifying webhook…"),
            )
            .await?
            .ok_or_else(|| {
                AppError::InternalError("Webhook probe returned no message".to_string())
            })?;
        webhook.delete_message(&self.http, None, probe.id).await?;
        Ok(())
    }

    async fn send(&self, url: &str, params: &MissionParams) -> Result<WebhookMessage, AppError> {
        let webhook = Webhook::from_url(&self.http, url).await?;

        let mut builder = ExecuteWebhook::new()
            .username("Missionboard")
            .embeds(webhook_embeds(params)?);
        if let Some(path) = &params.channel_image {
            builder = builder.add_file(CreateAttachment::path(path).await?);
        }

        let message = webhook
            .execute(&self.http, true, builder)
            .await?
            .ok_or_else(|| {
                AppError::InternalError("Webhook send returned no message".to_string())
            })?;

        Ok(WebhookMessage {
            id: message.id.get(),
            jump_url: message.link(),
        })
    }

    async fn edit(&self, url: &str, message_id: u64, notice: &str) -> Result<(), AppError> {
        let webhook = Webhook::from_url(&self.http, url).await?;
        webhook
            .edit_message(
                &self.http,
                MessageId::new(message_id),
                EditWebhookMessage::new().content(notice.to_string()),
            )
            .await?;
        Ok(())
    }
}
