//! Slash command definitions and dispatch helpers.

pub mod carrier;
pub mod mission;
pub mod webhook;

use serenity::all::{
    Attachment, CommandInteraction, CommandOptionType, Context, CreateCommand,
    CreateCommandOption, CreateEmbed, CreateInteractionResponse, CreateInteractionResponseMessage,
    ResolvedOption, ResolvedValue,
};

/// All guild commands registered on ready.
pub fn command_definitions() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("mission")
            .description("Manage Fleet Carrier trade missions")
            .add_option(generation_subcommand(
                "load",
                "Generate a Fleet Carrier loading mission",
                "The total demand for the commodity on the Fleet Carrier",
            ))
            .add_option(generation_subcommand(
                "unload",
                "Generate a Fleet Carrier unloading mission",
                "The total supply of the commodity on the Fleet Carrier",
            ))
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "complete",
                    "Mark a carrier's mission as done and tear it down",
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "carrier",
                        "A unique fragment of the Fleet Carrier name",
                    )
                    .required(true),
                )
                .add_sub_option(CreateCommandOption::new(
                    CommandOptionType::Boolean,
                    "failed",
                    "The mission could not be completed (price change, supply exhausted)",
                ))
                .add_sub_option(CreateCommandOption::new(
                    CommandOptionType::String,
                    "message",
                    "Optional closing message shown on every surface",
                )),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "edit",
                    "Edit an active mission's details",
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "carrier",
                        "A unique fragment of the Fleet Carrier name",
                    )
                    .required(true),
                )
                .add_sub_option(CreateCommandOption::new(
                    CommandOptionType::String,
                    "profit",
                    "New profit in thousands of credits per ton",
                ))
                .add_sub_option(CreateCommandOption::new(
                    CommandOptionType::String,
                    "pads",
                    "New largest landing pad (L or M)",
                ))
                .add_sub_option(CreateCommandOption::new(
                    CommandOptionType::String,
                    "demand",
                    "New supply/demand in thousands of tons",
                ))
                .add_sub_option(CreateCommandOption::new(
                    CommandOptionType::String,
                    "system",
                    "New target system",
                ))
                .add_sub_option(CreateCommandOption::new(
                    CommandOptionType::String,
                    "station",
                    "New target station",
                ))
                .add_sub_option(CreateCommandOption::new(
                    CommandOptionType::String,
                    "message",
                    "New owner message",
                )),
            ),
        CreateCommand::new("missions").description("List active trade missions"),
        CreateCommand::new("webhook")
            .description("Manage your registered webhooks")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "add",
                    "Register a webhook for your mission sends",
                )
                .add_sub_option(
                    CreateCommandOption::new(CommandOptionType::String, "url", "The webhook URL")
                        .required(true),
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "label",
                        "A short descriptor to identify this webhook",
                    )
                    .required(true),
                ),
            )
            .add_option(CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "view",
                "List your registered webhooks",
            ))
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "delete",
                    "Remove one of your webhooks",
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "label",
                        "The label of the webhook to remove",
                    )
                    .required(true),
                ),
            ),
        CreateCommand::new("carrier")
            .description("Look up and maintain registered carriers")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "find",
                    "Find carriers by name fragment",
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "name",
                        "Any fragment of the carrier name",
                    )
                    .required(true),
                ),
            )
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::SubCommand,
                    "image",
                    "Upload a carrier's advertisement image",
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "carrier",
                        "A unique fragment of the Fleet Carrier name",
                    )
                    .required(true),
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::Attachment,
                        "file",
                        "The advertisement image (506×285 PNG)",
                    )
                    .required(true),
                ),
            ),
    ]
}

fn generation_subcommand(
    name: &str,
    description: &str,
    demand_description: &str,
) -> CreateCommandOption {
    CreateCommandOption::new(CommandOptionType::SubCommand, name, description)
        .add_sub_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "carrier",
                "A unique fragment of the Fleet Carrier name",
            )
            .required(true),
        )
        .add_sub_option(
            CreateCommandOption::new(CommandOptionType::String, "commodity", "The commodity to move")
                .required(true),
        )
        .add_sub_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "system",
                "The system the mission takes place in",
            )
            .required(true),
        )
        .add_sub_option(
            CreateCommandOption::new(CommandOptionType::String, "station", "The target station")
                .required(true),
        )
        .add_sub_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "profit",
                "Profit in thousands of credits per ton, e.g. '10'",
            )
            .required(true),
        )
        .add_sub_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "pads",
                "The largest landing pad at the station (L or M)",
            )
            .required(true),
        )
        .add_sub_option(
            CreateCommandOption::new(CommandOptionType::String, "demand", demand_description)
                .required(true),
        )
}

/// Finds a string option by name.
pub(crate) fn str_option<'a>(options: &'a [ResolvedOption<'a>], name: &str) -> Option<&'a str> {
    options.iter().find_map(|option| match &option.value {
        ResolvedValue::String(value) if option.name == name => Some(*value),
        _ => None,
    })
}

/// Finds a boolean option by name.
pub(crate) fn bool_option(options: &[ResolvedOption<'_>], name: &str) -> Option<bool> {
    options.iter().find_map(|option| match &option.value {
        ResolvedValue::Boolean(value) if option.name == name => Some(*value),
        _ => None,
    })
}

/// Finds an attachment option by name.
pub(crate) fn attachment_option<'a>(
    options: &'a [ResolvedOption<'a>],
    name: &str,
) -> Option<&'a Attachment> {
    options.iter().find_map(|option| match &option.value {
        ResolvedValue::Attachment(attachment) if option.name == name => Some(*attachment),
        _ => None,
    })
}

/// Responds to a command interaction with a single embed.
pub(crate) async fn respond(
    ctx: &Context,
    command: &CommandInteraction,
    embed: CreateEmbed,
    ephemeral: bool,
) {
    let mut message = CreateInteractionResponseMessage::new().embed(embed);
    if ephemeral {
        message = message.ephemeral(true);
    }
    if let Err(e) = command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await
    {
        tracing::error!("Failed to respond to command: {}", e);
    }
}
