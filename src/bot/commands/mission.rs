//! The `/mission` command family (load, unload, complete, edit) plus the
//! `/missions` listing.

use serenity::all::{
    ButtonStyle, CommandInteraction, Context, CreateButton, CreateEmbed, CreateMessage,
    CreateSelectMenu, CreateSelectMenuKind, CreateSelectMenuOption, EditMessage, ResolvedOption,
    ResolvedValue,
};
use tokio::sync::mpsc;

use crate::bot::commands::{bool_option, respond, str_option};
use crate::data::mission::MissionRepository;
use crate::model::mission::{MissionParams, MissionType, PadSize};
use crate::service::mission::confirm::{self, AttemptEvent, ConfirmOutcome, CONFIRM_TIMEOUT};
use crate::service::mission::teardown::TeardownOutcome;
use crate::service::mission::{textgen, CommandContext, MissionService, CARRIER_CAPACITY_KTONS};
use crate::service::surface::Notice;
use crate::state::AppState;
use crate::util::parse::parse_positive_number;

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
        "load" => run_generation(&state, &ctx, &command, MissionType::Load, sub_options).await,
        "unload" => run_generation(&state, &ctx, &command, MissionType::Unload, sub_options).await,
        "complete" => handle_complete(&state, &ctx, &command, sub_options).await,
        "edit" => handle_edit(&state, &ctx, &command, sub_options).await,
        other => tracing::warn!("Unknown mission subcommand: {}", other),
    }
}

fn command_context(command: &CommandInteraction, invocation_url: String) -> CommandContext {
    CommandContext {
        user_id: command.user.id.get(),
        origin_channel: command.channel_id.get(),
        invocation_url,
    }
}

/// Runs one full mission-generation attempt: validate, confirm targets,
/// orchestrate sends.
async fn run_generation(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
    mission_type: MissionType,
    options: &[ResolvedOption<'_>],
) {
    let carrier = str_option(options, "carrier").unwrap_or_default();
    let commodity = str_option(options, "commodity").unwrap_or_default();
    let system = str_option(options, "system").unwrap_or_default();
    let station = str_option(options, "station").unwrap_or_default();
    let profit = str_option(options, "profit").unwrap_or_default();
    let pads = str_option(options, "pads").unwrap_or_default();
    let demand = str_option(options, "demand").unwrap_or_default();

    // echo the command for easy re-runs, as the first response
    let copy_paste = format!(
        "/mission {} carrier:{} commodity:{} system:{} station:{} profit:{} pads:{} demand:{}",
        mission_type, carrier, commodity, system, station, profit, pads, demand
    );
    respond(
        ctx,
        command,
        CreateEmbed::new()
            .title("COPY/PASTE TEXT FOR THIS COMMAND")
            .description(format!("```{}```", copy_paste))
            .color(EMBED_COLOUR_QU),
        false,
    )
    .await;

    let invocation_url = command
        .get_response(&ctx.http)
        .await
        .map(|message| message.link())
        .unwrap_or_default();
    let cmd_ctx = command_context(command, invocation_url);

    let mut params = MissionParams::new(
        mission_type,
        carrier,
        commodity,
        system,
        station,
        profit,
        pads,
        demand,
    );

    // a fresh command replaces any stale attempt the user left hanging
    state
        .attempts
        .dispatch(cmd_ctx.user_id, AttemptEvent::Cancelled)
        .await;

    let (tx, mut rx) = mpsc::channel(8);
    state.attempts.register(cmd_ctx.user_id, tx);

    let service = MissionService::new(&state.db, state.surfaces.clone(), state.locks.clone());

    let valid = match service.validate(&cmd_ctx, &mut params, &mut rx).await {
        Ok(valid) => valid,
        Err(e) => {
            tracing::error!("Validation failed with an infrastructure error: {}", e);
            let _ = state
                .surfaces
                .channels
                .send_notice(
                    cmd_ctx.origin_channel,
                    Notice::error(format!("❌ **ERROR**: {}", e)),
                )
                .await;
            false
        }
    };
    if !valid {
        state.attempts.unregister(cmd_ctx.user_id);
        return;
    }

    // confirmation menu: the user picks send targets
    let carrier_name = params
        .carrier
        .as_ref()
        .map(|c| c.long_name.clone())
        .unwrap_or_default();
    tracing::info!(
        state = ?crate::model::mission::AttemptState::Confirming,
        carrier = %carrier_name,
        "Awaiting target selection"
    );
    let menu_message = send_target_menu(ctx, command, &params, &carrier_name).await;

    let outcome = confirm::await_send_choice(&mut rx, &mut params, CONFIRM_TIMEOUT).await;
    state.attempts.unregister(cmd_ctx.user_id);

    // the menu is one-shot either way
    if let Some(mut message) = menu_message {
        if let Err(e) = message
            .edit(&ctx.http, EditMessage::new().components(Vec::new()))
            .await
        {
            tracing::warn!("Failed to disable the target menu: {}", e);
        }
    }

    match outcome {
        ConfirmOutcome::TimedOut => {
            let _ = state
                .surfaces
                .channels
                .send_notice(
                    cmd_ctx.origin_channel,
                    Notice::error("Mission generation timed out — no targets chosen."),
                )
                .await;
        }
        ConfirmOutcome::Cancelled => {
            let _ = state
                .surfaces
                .channels
                .send_notice(
                    cmd_ctx.origin_channel,
                    Notice::error("**Mission send cancelled by user.**"),
                )
                .await;
        }
        ConfirmOutcome::Proceed(flags) => {
            match service.gen_mission(&cmd_ctx, &mut params, flags).await {
                Ok(outcome) => {
                    tracing::info!(
                        ?outcome,
                        state = ?outcome.final_state(),
                        carrier = %carrier_name,
                        "Mission attempt finished"
                    );
                }
                Err(e) => {
                    // tell the user whether the record exists, since that
                    // decides their next step
                    let repo = MissionRepository::new(&state.db);
                    let exists = repo
                        .find_by_carrier(&carrier_name)
                        .await
                        .ok()
                        .flatten()
                        .is_some();
                    let text = if exists {
                        "The mission **was** entered into the database. Use `/missions` to check it, or `/mission complete` to close it before regenerating."
                    } else {
                        "The mission was **not** entered into the database. It may require manual cleanup of channels."
                    };
                    let _ = state
                        .surfaces
                        .channels
                        .send_notice(
                            cmd_ctx.origin_channel,
                            Notice::error(format!("❌ **ERROR**: {}\n\n{}", e, text)),
                        )
                        .await;
                    let _ = state
                        .surfaces
                        .channels
                        .send_ops_notice(Notice::error(format!(
                            "Error on mission generation by <@{}> at {}: {}\n\n{}",
                            cmd_ctx.user_id, cmd_ctx.invocation_url, e, text
                        )))
                        .await;
                }
            }
        }
    }
}

/// Posts the target selection menu under the mission summary.
async fn send_target_menu(
    ctx: &Context,
    command: &CommandInteraction,
    params: &MissionParams,
    carrier_name: &str,
) -> Option<serenity::all::Message> {
    let summary = CreateEmbed::new()
        .title(format!(
            "{}ING: {}",
            params.mission_type.as_str().to_uppercase(),
            carrier_name
        ))
        .description(format!(
            "Confirm mission details and choose send targets for **{}**.\n\n\
             📦 {} • 🌟 {} • 📌 {} • 💰 {}K/ton • 📥 {}K tons • 🛬 {}-pads",
            carrier_name,
            params.commodity.as_ref().map(|c| c.name.as_str()).unwrap_or("?"),
            params.system,
            params.station,
            params.profit.unwrap_or_default(),
            params.demand.unwrap_or_default(),
            params.pads.map(|p| p.letter()).unwrap_or("?"),
        ))
        .color(EMBED_COLOUR_QU);

    let menu = CreateSelectMenu::new(
        "mission_targets",
        CreateSelectMenuKind::String {
            options: vec![
                CreateSelectMenuOption::new("Discord", "discord")
                    .description("Sending to the Discord channel is required."),
                CreateSelectMenuOption::new("Notify Haulers", "notify")
                    .description("Ping the hauler role in the mission channel."),
                CreateSelectMenuOption::new("Webhooks", "webhooks")
                    .description("Send the mission to your registered webhooks."),
                CreateSelectMenuOption::new("Forum", "forum")
                    .description("Post the mission to the community forum."),
                CreateSelectMenuOption::new("EDMC-OFF", "edmc_off")
                    .description("Flag the mission secret: external sends blocked."),
                CreateSelectMenuOption::new("Copy-Paste Text", "copy_text")
                    .description("Generate texts for manual posting."),
                CreateSelectMenuOption::new("Cancel", "cancel")
                    .description("Abort this mission attempt."),
            ],
        },
    )
    .placeholder("Select your send targets")
    .min_values(1)
    .max_values(7);

    let message_button = CreateButton::new("mission_message")
        .label("Set Message")
        .style(ButtonStyle::Secondary);

    match command
        .channel_id
        .send_message(
            &ctx.http,
            CreateMessage::new()
                .embed(summary)
                .select_menu(menu)
                .button(message_button),
        )
        .await
    {
        Ok(message) => Some(message),
        Err(e) => {
            tracing::error!("Failed to post the target menu: {}", e);
            None
        }
    }
}

/// `/mission complete`: tear an active mission down.
async fn handle_complete(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
    options: &[ResolvedOption<'_>],
) {
    let carrier = str_option(options, "carrier").unwrap_or_default();
    let failed = bool_option(options, "failed").unwrap_or(false);
    let message = str_option(options, "message").map(str::to_string);

    let repo = MissionRepository::new(&state.db);
    let mission = match repo.find_by_carrier(carrier).await {
        Ok(Some(mission)) => mission,
        Ok(None) => {
            respond(
                ctx,
                command,
                CreateEmbed::new()
                    .description(format!(
                        "**ERROR**: no trade missions found for carriers matching \"**{}**\".",
                        carrier
                    ))
                    .color(EMBED_COLOUR_ERROR),
                true,
            )
            .await;
            return;
        }
        Err(e) => {
            respond(
                ctx,
                command,
                CreateEmbed::new()
                    .description(format!("❌ **ERROR**: {}", e))
                    .color(EMBED_COLOUR_ERROR),
                true,
            )
            .await;
            return;
        }
    };

    respond(
        ctx,
        command,
        CreateEmbed::new()
            .description(format!("Closing mission for **{}**...", mission.carrier_name))
            .color(EMBED_COLOUR_QU),
        false,
    )
    .await;

    let invocation_url = command
        .get_response(&ctx.http)
        .await
        .map(|m| m.link())
        .unwrap_or_default();
    let cmd_ctx = command_context(command, invocation_url);

    let outcome = if failed {
        TeardownOutcome::Concluded
    } else {
        TeardownOutcome::Complete
    };

    let carrier_name = mission.carrier_name.clone();
    let service = MissionService::new(&state.db, state.surfaces.clone(), state.locks.clone());
    if let Err(e) = service
        .teardown(Some(&cmd_ctx), mission, outcome, message)
        .await
    {
        // report whether the row survived, since that decides the next step
        let exists = repo
            .find_by_carrier(&carrier_name)
            .await
            .ok()
            .flatten()
            .is_some();
        let text = if exists {
            "The mission record still exists — run `/mission complete` again once the problem is fixed."
        } else {
            "The mission record was removed; only channel cleanup may be left for an operator."
        };
        let _ = state
            .surfaces
            .channels
            .send_notice(
                cmd_ctx.origin_channel,
                Notice::error(format!("❌ **ERROR**: {}\n\n{}", e, text)),
            )
            .await;
        let _ = state
            .surfaces
            .channels
            .send_ops_notice(Notice::error(format!(
                "Error on mission teardown for {} by <@{}> at {}: {}",
                carrier_name, cmd_ctx.user_id, cmd_ctx.invocation_url, e
            )))
            .await;
    }
}

/// `/mission edit`: update an active mission's details and re-announce them
/// in the mission channel.
async fn handle_edit(
    state: &AppState,
    ctx: &Context,
    command: &CommandInteraction,
    options: &[ResolvedOption<'_>],
) {
    let carrier = str_option(options, "carrier").unwrap_or_default();

    let repo = MissionRepository::new(&state.db);
    let mission = match repo.find_by_carrier(carrier).await {
        Ok(Some(mission)) => mission,
        Ok(None) => {
            respond(
                ctx,
                command,
                CreateEmbed::new()
                    .description(format!(
                        "**ERROR**: no trade missions found for carriers matching \"**{}**\".",
                        carrier
                    ))
                    .color(EMBED_COLOUR_ERROR),
                true,
            )
            .await;
            return;
        }
        Err(e) => {
            respond(
                ctx,
                command,
                CreateEmbed::new()
                    .description(format!("❌ **ERROR**: {}", e))
                    .color(EMBED_COLOUR_ERROR),
                true,
            )
            .await;
            return;
        }
    };

    let mut params: MissionParams = match serde_json::from_str(&mission.params) {
        Ok(params) => params,
        Err(e) => {
            respond(
                ctx,
                command,
                CreateEmbed::new()
                    .description(format!(
                        "❌ **ERROR**: stored parameters for **{}** could not be read: {}",
                        mission.carrier_name, e
                    ))
                    .color(EMBED_COLOUR_ERROR),
                true,
            )
            .await;
            return;
        }
    };

    // apply only the provided fields, validating numerics like generation does
    if let Some(raw) = str_option(options, "profit") {
        let Some(profit) = parse_positive_number(raw) else {
            return reject_edit(ctx, command, format!("Profit must be a positive number, not `{}`.", raw)).await;
        };
        params.profit_raw = raw.to_string();
        params.profit = Some(profit);
    }
    if let Some(raw) = str_option(options, "pads") {
        let Some(pads) = PadSize::parse(raw) else {
            return reject_edit(ctx, command, format!("Pads must be `L` or `M`, not `{}`.", raw)).await;
        };
        params.pads_raw = raw.to_string();
        params.pads = Some(pads);
    }
    if let Some(raw) = str_option(options, "demand") {
        let Some(demand) = parse_positive_number(raw) else {
            return reject_edit(ctx, command, format!("Supply/demand must be a positive number, not `{}`.", raw)).await;
        };
        if demand > CARRIER_CAPACITY_KTONS {
            return reject_edit(
                ctx,
                command,
                format!(
                    "Supply/demand cannot exceed the {}K ton capacity of a Fleet Carrier.",
                    CARRIER_CAPACITY_KTONS as i64
                ),
            )
            .await;
        }
        params.demand_raw = raw.to_string();
        params.demand = Some(demand);
    }
    if let Some(system) = str_option(options, "system") {
        params.system = system.to_uppercase();
    }
    if let Some(station) = str_option(options, "station") {
        params.station = station.to_uppercase();
    }
    if let Some(message) = str_option(options, "message") {
        params.message = Some(message.to_string());
    }

    // refresh the generated alert text against the edited values
    match textgen::chat_alert_text(&params) {
        Ok(alert_text) => params.alert_text = Some(alert_text),
        Err(e) => {
            tracing::error!("Failed to regenerate alert text: {}", e);
        }
    }

    if let Err(e) = repo.update_from_params(mission.id, &params).await {
        respond(
            ctx,
            command,
            CreateEmbed::new()
                .description(format!("❌ **ERROR**: could not update the mission: {}", e))
                .color(EMBED_COLOUR_ERROR),
            true,
        )
        .await;
        return;
    }

    // announce the change where the haulers are
    if let Some(channel_id) = params.mission_channel_id {
        let update = Notice::info(params.alert_text.clone().unwrap_or_default())
            .titled(format!("MISSION DETAILS UPDATED: {}", mission.carrier_name));
        if let Err(e) = state.surfaces.channels.send_notice(channel_id, update).await {
            tracing::error!("Failed to announce mission edit: {}", e);
        }
    }

    respond(
        ctx,
        command,
        CreateEmbed::new()
            .description(format!(
                "Mission for **{}** updated. Haulers have been notified in the mission channel.",
                mission.carrier_name
            ))
            .color(EMBED_COLOUR_OK),
        false,
    )
    .await;
}

async fn reject_edit(ctx: &Context, command: &CommandInteraction, text: String) {
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

/// `/missions`: list all active missions.
pub async fn handle_list(state: AppState, ctx: Context, command: CommandInteraction) {
    let repo = MissionRepository::new(&state.db);
    let missions = match repo.get_all().await {
        Ok(missions) => missions,
        Err(e) => {
            respond(
                &ctx,
                &command,
                CreateEmbed::new()
                    .description(format!("❌ **ERROR**: {}", e))
                    .color(EMBED_COLOUR_ERROR),
                true,
            )
            .await;
            return;
        }
    };

    if missions.is_empty() {
        respond(
            &ctx,
            &command,
            CreateEmbed::new()
                .description("No trade missions are currently in progress.")
                .color(EMBED_COLOUR_QU),
            false,
        )
        .await;
        return;
    }

    let mut embed = CreateEmbed::new()
        .title(format!("{} active trade missions", missions.len()))
        .color(EMBED_COLOUR_OK);
    // Discord caps embeds at 25 fields
    for mission in missions.iter().take(25) {
        embed = embed.field(
            format!("{} ({})", mission.carrier_name, mission.carrier_identifier),
            format!(
                "{}ing **{}** at **{}** in **{}** • {}K/ton • {}K tons • <#{}>",
                mission.mission_type,
                mission.commodity,
                mission.station,
                mission.system,
                mission.profit,
                mission.demand,
                mission.channel_id
            ),
            false,
        );
    }

    respond(&ctx, &command, embed, false).await;
}
