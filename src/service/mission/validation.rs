//! The validation pipeline.
//!
//! A fixed-order, short-circuiting chain of checks. Each check either passes
//! silently or sends exactly one explanatory notice to the user and reports
//! rejection; the chain stops at the first rejection and callers never
//! synthesize a generic failure message. `Ok(false)` always means "already
//! reported"; `Err` is reserved for infrastructure failures.

use tokio::sync::mpsc;

use crate::data::{carrier::CarrierRepository, mission::MissionRepository, webhook::WebhookRepository};
use crate::error::AppError;
use crate::model::{
    carrier::CarrierData,
    commodity::find_common,
    mission::{MissionParams, PadSize},
};
use crate::service::mission::confirm::{self, AttemptEvent, CHOICE_TIMEOUT};
use crate::service::mission::{CommandContext, MissionService, CARRIER_CAPACITY_KTONS};
use crate::service::surface::Notice;
use crate::util::parse::parse_positive_number;

/// Maximum carrier candidates worth disambiguating interactively; more than
/// this rejects outright.
const MAX_DISAMBIGUATION_CANDIDATES: usize = 3;

impl MissionService<'_> {
    /// Runs the full validation chain over an attempt's parameters.
    ///
    /// On success the params carry the parsed numerics, the resolved carrier
    /// and commodity, and the owner's registered webhooks.
    ///
    /// # Returns
    /// - `Ok(true)`: All checks passed
    /// - `Ok(false)`: A check rejected and already told the user why
    /// - `Err(AppError)`: Infrastructure failure
    pub async fn validate(
        &self,
        ctx: &CommandContext,
        params: &mut MissionParams,
        events: &mut mpsc::Receiver<AttemptEvent>,
    ) -> Result<bool, AppError> {
        tracing::info!(
            state = ?crate::model::mission::AttemptState::Validating,
            user = ctx.user_id,
            mission_type = %params.mission_type,
            "Validating mission inputs"
        );

        if !self.check_profit(ctx, params).await? {
            return Ok(false);
        }
        if !self.check_pads(ctx, params).await? {
            return Ok(false);
        }
        if !self.check_demand(ctx, params).await? {
            return Ok(false);
        }
        if !self.check_carrier(ctx, params, events).await? {
            return Ok(false);
        }
        if !self.check_no_open_mission(ctx, params).await? {
            return Ok(false);
        }
        if !self.check_advert_image(ctx, params).await? {
            return Ok(false);
        }
        if !self.check_commodity(ctx, params).await? {
            return Ok(false);
        }

        self.load_webhooks(ctx, params).await?;

        Ok(true)
    }

    async fn check_profit(
        &self,
        ctx: &CommandContext,
        params: &mut MissionParams,
    ) -> Result<bool, AppError> {
        match parse_positive_number(&params.profit_raw) {
            Some(profit) => {
                params.profit = Some(profit);
                Ok(true)
            }
            None => {
                self.notify(
                    ctx,
                    Notice::error(format!(
                        "❌ **ERROR**: Profit must be a number greater than zero, e.g. `10` or `4.5` — not `{}`.",
                        params.profit_raw
                    )),
                )
                .await;
                Ok(false)
            }
        }
    }

    async fn check_pads(
        &self,
        ctx: &CommandContext,
        params: &mut MissionParams,
    ) -> Result<bool, AppError> {
        match PadSize::parse(&params.pads_raw) {
            Some(pads) => {
                params.pads = Some(pads);
                Ok(true)
            }
            None => {
                self.notify(
                    ctx,
                    Notice::error(format!(
                        "❌ **ERROR**: Pads must be `L` or `M` (or `Large`/`Medium`). `{}` is right out.",
                        params.pads_raw
                    )),
                )
                .await;
                Ok(false)
            }
        }
    }

    async fn check_demand(
        &self,
        ctx: &CommandContext,
        params: &mut MissionParams,
    ) -> Result<bool, AppError> {
        let demand = match parse_positive_number(&params.demand_raw) {
            Some(demand) => demand,
            None => {
                self.notify(
                    ctx,
                    Notice::error(format!(
                        "❌ **ERROR**: Supply/demand must be a number greater than zero, e.g. `20` or `16.5` — not `{}`.",
                        params.demand_raw
                    )),
                )
                .await;
                return Ok(false);
            }
        };

        if demand > CARRIER_CAPACITY_KTONS {
            self.notify(
                ctx,
                Notice::error(format!(
                    "❌ **ERROR**: Supply/demand is expressed in thousands of tons, so it cannot exceed the {}K ton capacity of a Fleet Carrier.",
                    CARRIER_CAPACITY_KTONS as i64
                )),
            )
            .await;
            return Ok(false);
        }

        params.demand = Some(demand);
        Ok(true)
    }

    async fn check_carrier(
        &self,
        ctx: &CommandContext,
        params: &mut MissionParams,
        events: &mut mpsc::Receiver<AttemptEvent>,
    ) -> Result<bool, AppError> {
        let repo = CarrierRepository::new(self.db);
        let mut matches = repo
            .find_by_name_fragment(&params.carrier_search_term)
            .await?;

        let resolved = match matches.len() {
            0 => {
                self.notify(
                    ctx,
                    Notice::error(format!(
                        "❌ **ERROR**: No carrier found for '**{}**'. Use `/carrier find` to look up registered carriers; if yours is missing, ask an Admin to add it.",
                        params.carrier_search_term
                    )),
                )
                .await;
                return Ok(false);
            }
            1 => matches.remove(0),
            count if count <= MAX_DISAMBIGUATION_CANDIDATES => {
                let listing = matches
                    .iter()
                    .enumerate()
                    .map(|(index, carrier)| {
                        format!("`{}` — {} ({})", index + 1, carrier.long_name, carrier.identifier)
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                self.notify(
                    ctx,
                    Notice::info(format!(
                        "'**{}**' matches {} carriers — reply with a number within {} seconds:\n{}",
                        params.carrier_search_term,
                        count,
                        CHOICE_TIMEOUT.as_secs(),
                        listing
                    )),
                )
                .await;

                match confirm::await_choice(events, count, CHOICE_TIMEOUT).await {
                    // await_choice only returns replies in 1..=count
                    Some(choice) => matches.remove(choice - 1),
                    // timeout cancels this attempt silently
                    None => return Ok(false),
                }
            }
            count => {
                self.notify(
                    ctx,
                    Notice::error(format!(
                        "❌ **ERROR**: '**{}**' matches {} carriers. Please narrow your search.",
                        params.carrier_search_term, count
                    )),
                )
                .await;
                return Ok(false);
            }
        };

        params.carrier = Some(CarrierData::from(resolved));
        Ok(true)
    }

    async fn check_no_open_mission(
        &self,
        ctx: &CommandContext,
        params: &mut MissionParams,
    ) -> Result<bool, AppError> {
        let carrier = params.carrier()?;
        let repo = MissionRepository::new(self.db);
        if let Some(mission) = repo.find_by_carrier(&carrier.long_name).await? {
            self.notify(
                ctx,
                Notice::error(format!(
                    "**{}** is already on a mission. Use `/mission complete` to mark it complete before starting a new one.",
                    mission.carrier_name
                )),
            )
            .await;
            return Ok(false);
        }
        Ok(true)
    }

    async fn check_advert_image(
        &self,
        ctx: &CommandContext,
        params: &mut MissionParams,
    ) -> Result<bool, AppError> {
        let carrier = params.carrier()?.clone();
        if self.surfaces.images.has_valid_advert(&carrier).await {
            return Ok(true);
        }

        // pause for the interactive upload sub-flow, then re-check once
        self.surfaces
            .images
            .request_advert_upload(ctx.origin_channel, &carrier)
            .await?;

        if self.surfaces.images.has_valid_advert(&carrier).await {
            return Ok(true);
        }

        self.notify(
            ctx,
            Notice::error(
                "❌ **ERROR**: You must have a valid mission image to continue.".to_string(),
            ),
        )
        .await;
        Ok(false)
    }

    async fn check_commodity(
        &self,
        ctx: &CommandContext,
        params: &mut MissionParams,
    ) -> Result<bool, AppError> {
        if let Some(commodity) = find_common(&params.commodity_search_term) {
            params.commodity = Some(commodity);
            return Ok(true);
        }

        // the resolver owns its own feedback on no-match/ambiguity
        match self
            .surfaces
            .commodities
            .resolve(&params.commodity_search_term, ctx.origin_channel)
            .await?
        {
            Some(commodity) => {
                params.commodity = Some(commodity);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Loads the owner's registered webhooks into the params.
    async fn load_webhooks(
        &self,
        ctx: &CommandContext,
        params: &mut MissionParams,
    ) -> Result<(), AppError> {
        let repo = WebhookRepository::new(self.db);
        for webhook in repo.for_owner(&ctx.user_id.to_string()).await? {
            params.webhook_urls.push(webhook.url);
            params.webhook_names.push(webhook.name);
        }
        Ok(())
    }
}
