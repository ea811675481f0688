//! The `/carrier` command family: find and image upload.

use serenity::all::{CommandInteraction, Context, CreateEmbed, ResolvedOption, ResolvedValue};

use crate::bot::commands::{attachment_option, respond, str_option};
use crate::data::carrier::CarrierRepository;
use crate::service::surface::image::ADVERT_DIMENSIONS;
use crate::state::AppState;

const EMBED_COLOUR_QU: u32 = 0x3498db;
const EMBED_COLOUR_OK: u32 = 0x2ecc71;
const EMBED_COLOUR_ERROR: u32 = 0xe74c3c;

/// Most carriers a `/carrier find` listing shows.
const FIND_LIMIT: usize = 10;

pub async fn handle(state: AppState, ctx: Context, command: CommandInteraction) {
    let options = command.data.options();
    let Some(sub) = options.first() else { return };
    let ResolvedValue::SubCommand(ref sub_options) = sub.value else {
        return;
    };

    match sub.name {
        "find" => handle_find(&state, &ctx, &command, sub_options).await,
        "image" => handle_image(&state, &ctx, &command, sub_options).await,
        other => tracing::warn!("Unknown carrier subcommand: {}", other),
    }
}

/// `/carrier find`: the lookup the validation pipeline points users at.
async fn handle_find(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
    options: &[ResolvedOption<'_>],
) {
    let fragment = str_option(options, "name").unwrap_or_default();

    let repo = CarrierRepository::new(&state.db);
    let matches = match repo.find_by_name_fragment(fragment).await {
        Ok(matches) => matches,
        Err(e) => return respond_error(ctx, command, e.to_string()).await,
    };

    if matches.is_empty() {
        return respond_error(
            ctx,
            command,
            format!("No carriers found matching '**{}**'.", fragment),
        )
        .await;
    }

    let mut embed = CreateEmbed::new()
        .title(format!("{} carriers matching '{}'", matches.len(), fragment))
        .color(EMBED_COLOUR_QU);
    for carrier in matches.iter().take(FIND_LIMIT) {
        embed = embed.field(
            format!("{} ({})", carrier.long_name, carrier.identifier),
            format!("Owner: <@{}> • Channel: #{}", carrier.owner_id, carrier.channel_name),
            false,
        );
    }
    if matches.len() > FIND_LIMIT {
        embed = embed.field(
            "…",
            format!("and {} more — narrow your search.", matches.len() - FIND_LIMIT),
            false,
        );
    }

    respond(ctx, command, embed, false).await;
}

/// `/carrier image`: store a carrier's advertisement image, validating the
/// exact dimensions the mission generator requires.
async fn handle_image(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
    options: &[ResolvedOption<'_>],
) {
    let fragment = str_option(options, "carrier").unwrap_or_default();
    let Some(attachment) = attachment_option(options, "file") else {
        return respond_error(ctx, command, "An image attachment is required.".to_string()).await;
    };

    let repo = CarrierRepository::new(&state.db);
    let mut matches = match repo.find_by_name_fragment(fragment).await {
        Ok(matches) => matches,
        Err(e) => return respond_error(ctx, command, e.to_string()).await,
    };
    let carrier = match matches.len() {
        0 => {
            return respond_error(
                ctx,
                command,
                format!("No carrier found for '**{}**'.", fragment),
            )
            .await
        }
        1 => matches.remove(0),
        count => {
            return respond_error(
                ctx,
                command,
                format!(
                    "'**{}**' matches {} carriers. Please narrow your search.",
                    fragment, count
                ),
            )
            .await
        }
    };

    let bytes = match attachment.download().await {
        Ok(bytes) => bytes,
        Err(e) => {
            return respond_error(ctx, command, format!("Could not download the image: {}", e))
                .await
        }
    };

    let path = state
        .config
        .image_dir
        .join(format!("{}.png", carrier.short_name));
    if let Err(e) = tokio::fs::write(&path, &bytes).await {
        return respond_error(ctx, command, format!("Could not store the image: {}", e)).await;
    }

    match image::image_dimensions(&path) {
        Ok(dimensions) if dimensions == ADVERT_DIMENSIONS => {
            respond(
                ctx,
                command,
                CreateEmbed::new()
                    .description(format!(
                        "Advertisement image for **{}** updated.",
                        carrier.long_name
                    ))
                    .color(EMBED_COLOUR_OK),
                false,
            )
            .await;
        }
        Ok(dimensions) => {
            respond_error(
                ctx,
                command,
                format!(
                    "Image stored, but its size is {}×{} — missions require exactly {}×{}. Upload a corrected image before generating.",
                    dimensions.0, dimensions.1, ADVERT_DIMENSIONS.0, ADVERT_DIMENSIONS.1
                ),
            )
            .await;
        }
        Err(e) => {
            respond_error(ctx, command, format!("Stored file is not a readable image: {}", e))
                .await;
        }
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
