//! The `/webhook` command family: add, view, delete.
//!
//! Registrations are keyed to the calling user and shared between all their
//! carriers. URL and label are checked for duplicates with a specific message
//! before the unique indexes ever fire, and a new webhook is probed with a
//! throwaway message before it is saved.

use serenity::all::{CommandInteraction, Context, CreateEmbed, ResolvedOption, ResolvedValue};

use crate::bot::commands::{respond, str_option};
use crate::data::webhook::WebhookRepository;
use crate::service::surface::Notice;
use crate::state::AppState;

const EMBED_COLOUR_QU: u32 = 0x3498db;
const EMBED_COLOUR_OK: u32 = 0x2ecc71;
const EMBED_COLOUR_ERROR: u32 = 0xe74c3c;

pub async fn handle(state: AppState, ctx: Context, command: CommandInteraction) {
    let options = command.data.options();
    let Some(sub) = options.first() else { return };
    let ResolvedValue::SubCommand(ref sub_options) = sub.value else {
        return;
    };

    match sub.name {
        "add" => handle_add(&state, &ctx, &command, sub_options).await,
        "view" => handle_view(&state, &ctx, &command).await,
        "delete" => handle_delete(&state, &ctx, &command, sub_options).await,
        other => tracing::warn!("Unknown webhook subcommand: {}", other),
    }
}

async fn handle_add(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
    options: &[ResolvedOption<'_>],
) {
    let url = str_option(options, "url").unwrap_or_default();
    let label = str_option(options, "label").unwrap_or_default();
    let owner_id = command.user.id.get().to_string();

    let repo = WebhookRepository::new(&state.db);

    // duplicate checks first, so the user gets a specific message
    let existing = match repo.for_owner(&owner_id).await {
        Ok(existing) => existing,
        Err(e) => return respond_error(ctx, command, e.to_string()).await,
    };
    for webhook in &existing {
        if webhook.url == url {
            return respond_error(
                ctx,
                command,
                format!(
                    "You already have a webhook with that URL called \"{}\".",
                    webhook.name
                ),
            )
            .await;
        }
        if webhook.name == label {
            return respond_error(
                ctx,
                command,
                format!("You already have a webhook called \"{}\": {}", webhook.name, webhook.url),
            )
            .await;
        }
    }

    // probe the webhook before saving anything
    if let Err(e) = state.surfaces.webhooks.validate(url).await {
        let _ = state
            .surfaces
            .channels
            .send_ops_notice(Notice::error(format!(
                "<@{}> failed adding webhook: {}",
                owner_id, e
            )))
            .await;
        return respond_error(
            ctx,
            command,
            format!("Webhook could not be validated: {}", e),
        )
        .await;
    }

    match repo.create(&owner_id, url, label).await {
        Ok(webhook) => {
            let embed = CreateEmbed::new()
                .title("Webhook registered")
                .description("This webhook will be offered on all your future mission sends.")
                .field("Label", webhook.name, false)
                .field("URL", webhook.url, false)
                .color(EMBED_COLOUR_OK);
            respond(ctx, command, embed, true).await;
        }
        Err(e) => {
            let _ = state
                .surfaces
                .channels
                .send_ops_notice(Notice::error(format!(
                    "Error on webhook add by <@{}>: {}",
                    owner_id, e
                )))
                .await;
            respond_error(ctx, command, e.to_string()).await;
        }
    }
}

async fn handle_view(state: &AppState, ctx: &Context, command: &CommandInteraction) {
    let owner_id = command.user.id.get().to_string();
    let repo = WebhookRepository::new(&state.db);

    match repo.for_owner(&owner_id).await {
        Ok(webhooks) if webhooks.is_empty() => {
            respond(
                ctx,
                command,
                CreateEmbed::new()
                    .description("You have no registered webhooks. Use `/webhook add` to register one.")
                    .color(EMBED_COLOUR_QU),
                true,
            )
            .await;
        }
        Ok(webhooks) => {
            let mut embed = CreateEmbed::new()
                .title("Your registered webhooks")
                .color(EMBED_COLOUR_QU);
            for webhook in webhooks {
                embed = embed.field(webhook.name, webhook.url, false);
            }
            respond(ctx, command, embed, true).await;
        }
        Err(e) => respond_error(ctx, command, e.to_string()).await,
    }
}

async fn handle_delete(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
    options: &[ResolvedOption<'_>],
) {
    let label = str_option(options, "label").unwrap_or_default();
    let owner_id = command.user.id.get().to_string();
    let repo = WebhookRepository::new(&state.db);

    let webhook = match repo.find_by_name(&owner_id, label).await {
        Ok(Some(webhook)) => webhook,
        Ok(None) => {
            return respond_error(ctx, command, format!("No webhook found matching \"{}\".", label))
                .await
        }
        Err(e) => return respond_error(ctx, command, e.to_string()).await,
    };

    match repo.delete_by_name(&owner_id, label).await {
        Ok(_) => {
            respond(
                ctx,
                command,
                CreateEmbed::new()
                    .description(format!(
                        "Webhook removed: **{}**\n{}",
                        webhook.name, webhook.url
                    ))
                    .color(EMBED_COLOUR_OK),
                true,
            )
            .await;
        }
        Err(e) => respond_error(ctx, command, e.to_string()).await,
    }
}

async fn respond_error(ctx: &Context, command: &CommandInteraction, text: String) {
    respond(
        ctx,
        command,
        CreateEmbed::new()
            .description(format!("❌ **ERROR**: {}", text))
            .color(EMBED_COLOUR_ERROR),
        true,
    )
    .await;
}
