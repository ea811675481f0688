use serenity::all::{
    ActionRowComponent, ActivityData, ComponentInteraction, ComponentInteractionDataKind, Context,
    CreateActionRow, CreateInputText, CreateInteractionResponse, CreateModal, EventHandler,
    GuildId, InputTextStyle, Interaction, ModalInteraction, Ready,
};
use serenity::async_trait;

use crate::bot::commands;
use crate::model::mission::SendFlags;
use crate::service::mission::confirm::AttemptEvent;
use crate::state::AppState;

/// Discord bot event handler
pub struct Handler {
    state: AppState,
}

impl Handler {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Translates the target-menu selection values into send flags.
    fn flags_from_values(values: &[String]) -> SendFlags {
        let mut flags = SendFlags::default();
        for value in values {
            match value.as_str() {
                "discord" => flags.discord = true,
                "forum" => flags.forum = true,
                "webhooks" => flags.webhooks = true,
                "notify" => flags.notify_haulers = true,
                "copy_text" => flags.copy_text = true,
                "edmc_off" => flags.edmc_off = true,
                "cancel" => flags.cancel = true,
                _ => {}
            }
        }
        flags
    }

    /// Routes a component interaction to the owning user's live attempt.
    async fn route_component(&self, ctx: &Context, component: &ComponentInteraction) {
        let user_id = component.user.id.get();

        // the message button opens a modal instead of emitting an event
        if component.data.custom_id == "mission_message" {
            let modal = CreateModal::new("mission_message_modal", "Add message to mission")
                .components(vec![CreateActionRow::InputText(
                    CreateInputText::new(
                        InputTextStyle::Paragraph,
                        "Enter your message below.",
                        "message",
                    )
                    .required(true),
                )]);
            if let Err(e) = component
                .create_response(&ctx.http, CreateInteractionResponse::Modal(modal))
                .await
            {
                tracing::error!("Failed to open the message modal: {}", e);
            }
            return;
        }

        let event = match (&component.data.custom_id[..], &component.data.kind) {
            ("mission_targets", ComponentInteractionDataKind::StringSelect { values }) => {
                Some(AttemptEvent::TargetsChosen(Self::flags_from_values(values)))
            }
            ("mission_choice", ComponentInteractionDataKind::StringSelect { values }) => values
                .first()
                .and_then(|value| value.parse::<usize>().ok())
                .map(AttemptEvent::Choice),
            _ => None,
        };

        let Some(event) = event else { return };

        if !self.state.attempts.dispatch(user_id, event).await {
            tracing::debug!(user = user_id, "Component event with no live attempt");
        }

        if let Err(e) = component
            .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
            .await
        {
            tracing::error!("Failed to acknowledge component interaction: {}", e);
        }
    }

    /// Routes a submitted message modal to the owning user's live attempt.
    async fn route_modal(&self, ctx: &Context, modal: &ModalInteraction) {
        if modal.data.custom_id != "mission_message_modal" {
            return;
        }

        let message = modal
            .data
            .components
            .iter()
            .flat_map(|row| row.components.iter())
            .find_map(|component| match component {
                ActionRowComponent::InputText(input) => input.value.clone(),
                _ => None,
            });

        if let Some(message) = message {
            let user_id = modal.user.id.get();
            if !self
                .state
                .attempts
                .dispatch(user_id, AttemptEvent::MessageSet(message))
                .await
            {
                tracing::debug!(user = user_id, "Message modal with no live attempt");
            }
        }

        if let Err(e) = modal
            .create_response(&ctx.http, CreateInteractionResponse::Acknowledge)
            .await
        {
            tracing::error!("Failed to acknowledge modal submission: {}", e);
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!("{} is connected to Discord!", ready.user.name);

        ctx.set_activity(Some(ActivityData::custom("Coordinating trade missions")));

        let guild = GuildId::new(self.state.config.guild_id);
        match guild
            .set_commands(&ctx.http, commands::command_definitions())
            .await
        {
            Ok(registered) => {
                tracing::info!("Registered {} guild commands", registered.len());
            }
            Err(e) => {
                tracing::error!("Failed to register guild commands: {:?}", e);
            }
        }
    }

    /// Called for every slash-command and component interaction
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) => {
                let state = self.state.clone();
                match command.data.name.as_str() {
                    "mission" => commands::mission::handle(state, ctx, command).await,
                    "missions" => commands::mission::handle_list(state, ctx, command).await,
                    "webhook" => commands::webhook::handle(state, ctx, command).await,
                    "carrier" => commands::carrier::handle(state, ctx, command).await,
                    other => {
                        tracing::warn!("Unknown command: {}", other);
                    }
                }
            }
            Interaction::Component(component) => {
                self.route_component(&ctx, &component).await;
            }
            Interaction::Modal(modal) => {
                self.route_modal(&ctx, &modal).await;
            }
            _ => {}
        }
    }
}
