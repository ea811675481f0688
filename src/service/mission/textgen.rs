//! Pure text generators for every surface.
//!
//! These functions turn a resolved [`MissionParams`] into the literal strings
//! posted to the chat alert channel, the forum, and closing notices. They do
//! no I/O and are shared by the orchestrator, the copy-paste export, and
//! teardown.

use crate::error::AppError;
use crate::model::mission::{MissionParams, MissionType};

/// Formats a quantity without a trailing `.0` for whole numbers.
fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// The one-line trade alert posted to the alerts channel.
pub fn chat_alert_text(params: &MissionParams) -> Result<String, AppError> {
    let carrier = params.carrier()?;
    let commodity = params.commodity_name()?;
    let channel = match params.mission_channel_id {
        Some(id) => format!("<#{}>", id),
        None => format!("#{}", carrier.channel_name),
    };
    let prefix = if params.edmc_off {
        "**★ EDMC-OFF MISSION! ★** : "
    } else {
        ""
    };
    let (verb, direction, flow) = match params.mission_type {
        MissionType::Load => ("loading", "from", "demand"),
        MissionType::Unload => ("unloading", "to", "supply"),
    };
    let pads = params
        .pads
        .map(|p| p.letter())
        .unwrap_or("?");

    Ok(format!(
        "{}{} {} {} {} **{}** station in system **{}** : {}k per unit profit : {}k {} : {}-pads.",
        prefix,
        channel,
        verb,
        commodity,
        direction,
        params.station,
        params.system,
        format_quantity(params.profit.unwrap_or_default()),
        format_quantity(params.demand.unwrap_or_default()),
        flow,
        pads
    ))
}

/// Title for the forum image post.
pub fn forum_title(params: &MissionParams) -> Result<String, AppError> {
    let carrier = params.carrier()?;
    let commodity = params.commodity_name()?;
    Ok(format!(
        "{} {} {}ing {} in {} for {}K/TON PROFIT",
        carrier.long_name,
        carrier.identifier,
        params.mission_type,
        commodity.to_uppercase(),
        params.system,
        format_quantity(params.profit.unwrap_or_default())
    ))
}

/// Body text for the top-level comment under the forum post.
pub fn forum_body(params: &MissionParams) -> Result<String, AppError> {
    let carrier = params.carrier()?;
    let commodity = params.commodity_name()?;
    let pads = params.pads.map(|p| p.letter()).unwrap_or("?");
    let profit = format_quantity(params.profit.unwrap_or_default());
    let demand = format_quantity(params.demand.unwrap_or_default());

    let body = match params.mission_type {
        MissionType::Load => format!(
            "    INCOMING WIDEBAND TRANSMISSION: CARRIER LOADING MISSION IN PROGRESS\n\n\n\
             **BUY FROM**: station **{}** ({}-pads) in system **{}**\n\n\
             **COMMODITY**: {}\n\n\
             **SELL TO**: Fleet Carrier **{} {}**\n\n\
             **PROFIT**: {}k/unit : {}k demand\n\n\n\
             Join us on Discord for mission updates and discussion, channel **#{}**.",
            params.station,
            pads,
            params.system,
            commodity,
            carrier.long_name,
            carrier.identifier,
            profit,
            demand,
            carrier.channel_name
        ),
        MissionType::Unload => format!(
            "    INCOMING WIDEBAND TRANSMISSION: CARRIER UNLOADING MISSION IN PROGRESS\n\n\n\
             **BUY FROM**: Fleet Carrier **{} {}**\n\n\
             **COMMODITY**: {}\n\n\
             **SELL TO**: station **{}** ({}-pads) in system **{}**\n\n\
             **PROFIT**: {}k/unit : {}k supply\n\n\n\
             Join us on Discord for mission updates and discussion, channel **#{}**.",
            carrier.long_name,
            carrier.identifier,
            commodity,
            params.station,
            pads,
            params.system,
            profit,
            demand,
            carrier.channel_name
        ),
    };
    Ok(body)
}

/// Closing notice posted to the dedicated channel and the external surfaces.
///
/// `status` is the outcome word ("complete", "concluded", "timed out").
pub fn completion_text(carrier_name: &str, status: &str, reason: Option<&str>) -> String {
    let reason_block = match reason {
        Some(text) if !text.is_empty() => format!("\n\n{}", text),
        _ => String::new(),
    };
    format!(
        "    INCOMING WIDEBAND TRANSMISSION: CARRIER MISSION UPDATE\n\n\
         **{}** mission {}. o7 CMDRs!{}",
        carrier_name, status, reason_block
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        carrier::CarrierData,
        commodity::CommodityData,
        mission::{MissionParams, MissionType, PadSize},
    };
    use chrono::Utc;

    fn params(mission_type: MissionType) -> MissionParams {
        let mut params = MissionParams::new(
            mission_type,
            "atlas",
            "gold",
            "hip 57784",
            "mackenzie relay",
            "10",
            "l",
            "20",
        );
        params.profit = Some(10.0);
        params.pads = Some(PadSize::Large);
        params.demand = Some(20.0);
        params.carrier = Some(CarrierData {
            id: 1,
            long_name: "ATLAS OF SORROW".to_string(),
            short_name: "atlas".to_string(),
            identifier: "ATL-001".to_string(),
            owner_id: "42".to_string(),
            channel_name: "atlas-trade".to_string(),
            last_trade: Utc::now(),
            market_api_enabled: false,
        });
        params.commodity = Some(CommodityData::new("Gold"));
        params
    }

    #[test]
    fn load_alert_mentions_demand_and_station() {
        let text = chat_alert_text(&params(MissionType::Load)).unwrap();
        assert!(text.contains("loading Gold from **MACKENZIE RELAY**"));
        assert!(text.contains("10k per unit profit"));
        assert!(text.contains("20k demand"));
        assert!(text.contains("L-pads"));
        assert!(text.contains("#atlas-trade"));
        assert!(!text.contains("EDMC-OFF"));
    }

    #[test]
    fn unload_alert_mentions_supply() {
        let text = chat_alert_text(&params(MissionType::Unload)).unwrap();
        assert!(text.contains("unloading Gold to **MACKENZIE RELAY**"));
        assert!(text.contains("20k supply"));
    }

    #[test]
    fn alert_prefers_channel_mention_once_channel_exists() {
        let mut p = params(MissionType::Load);
        p.mission_channel_id = Some(777);
        let text = chat_alert_text(&p).unwrap();
        assert!(text.contains("<#777>"));
        assert!(!text.contains("#atlas-trade"));
    }

    #[test]
    fn edmc_off_alert_carries_banner() {
        let mut p = params(MissionType::Load);
        p.edmc_off = true;
        let text = chat_alert_text(&p).unwrap();
        assert!(text.starts_with("**★ EDMC-OFF MISSION! ★**"));
    }

    #[test]
    fn forum_title_names_carrier_and_profit() {
        let title = forum_title(&params(MissionType::Load)).unwrap();
        assert_eq!(
            title,
            "ATLAS OF SORROW ATL-001 loading GOLD in HIP 57784 for 10K/TON PROFIT"
        );
    }

    #[test]
    fn forum_body_direction_follows_mission_type() {
        let load = forum_body(&params(MissionType::Load)).unwrap();
        assert!(load.contains("**BUY FROM**: station **MACKENZIE RELAY**"));
        assert!(load.contains("**SELL TO**: Fleet Carrier **ATLAS OF SORROW ATL-001**"));

        let unload = forum_body(&params(MissionType::Unload)).unwrap();
        assert!(unload.contains("**BUY FROM**: Fleet Carrier **ATLAS OF SORROW ATL-001**"));
        assert!(unload.contains("**SELL TO**: station **MACKENZIE RELAY**"));
    }

    #[test]
    fn fractional_quantities_keep_their_decimals() {
        let mut p = params(MissionType::Load);
        p.profit = Some(4.5);
        let text = chat_alert_text(&p).unwrap();
        assert!(text.contains("4.5k per unit profit"));
    }

    #[test]
    fn completion_text_carries_optional_reason() {
        let with_reason = completion_text("ATLAS OF SORROW", "complete", Some("Station price change."));
        assert!(with_reason.contains("**ATLAS OF SORROW** mission complete. o7 CMDRs!"));
        assert!(with_reason.contains("Station price change."));

        let without = completion_text("ATLAS OF SORROW", "concluded", None);
        assert!(without.contains("mission concluded"));
        assert!(!without.ends_with('\n'));
    }
}
