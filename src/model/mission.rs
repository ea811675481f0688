use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{carrier::CarrierData, commodity::CommodityData};

/// Whether the mission loads commodity onto the carrier or unloads it.
///
/// Set once at creation and never mutated for the life of the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissionType {
    Load,
    Unload,
}

impl MissionType {
    /// Database/display token (`"load"` / `"unload"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            MissionType::Load => "load",
            MissionType::Unload => "unload",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "load" => Some(MissionType::Load),
            "unload" => Some(MissionType::Unload),
            _ => None,
        }
    }
}

impl fmt::Display for MissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The largest landing pad available at the target station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PadSize {
    Large,
    Medium,
}

impl PadSize {
    /// Parses the pad size case-insensitively from `L`/`M` or the full words.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "L" | "LARGE" => Some(PadSize::Large),
            "M" | "MEDIUM" => Some(PadSize::Medium),
            _ => None,
        }
    }

    /// Normalized single-letter token (`"L"` / `"M"`) used for storage and
    /// display.
    pub fn letter(&self) -> &'static str {
        match self {
            PadSize::Large => "L",
            PadSize::Medium => "M",
        }
    }
}

impl fmt::Display for PadSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// The send targets requested for a mission, parsed from the target letters
/// or assembled by the confirmation menu.
///
/// Letters: `d` chat channel, `r` forum, `w` webhooks, `n` hauler ping,
/// `t` copy-paste text export, `e` secrecy (EDMC-off), `x` cancel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendFlags {
    pub discord: bool,
    pub forum: bool,
    pub webhooks: bool,
    pub notify_haulers: bool,
    pub copy_text: bool,
    pub edmc_off: bool,
    pub cancel: bool,
}

impl SendFlags {
    /// Parses flags from a string of target letters. Unknown letters are
    /// ignored.
    pub fn parse(raw: &str) -> Self {
        let mut flags = SendFlags::default();
        for c in raw.chars() {
            match c.to_ascii_lowercase() {
                'd' => flags.discord = true,
                'r' => flags.forum = true,
                'w' => flags.webhooks = true,
                'n' => flags.notify_haulers = true,
                't' => flags.copy_text = true,
                'e' => flags.edmc_off = true,
                'x' => flags.cancel = true,
                _ => {}
            }
        }
        flags
    }

    /// Whether any external surface (forum or webhooks) was requested.
    pub fn any_external(&self) -> bool {
        self.forum || self.webhooks
    }
}

/// Lifecycle state of one mission-generation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptState {
    Validating,
    Confirming,
    Sending,
    Persisted,
    TerminatedOk,
    TerminatedRejected,
    TerminatedFailed,
}

/// All parameters of one in-flight mission attempt.
///
/// Created from the raw command inputs, populated field by field through
/// validation and orchestration, and serialized in full into the mission row
/// so the exact parameters can be recovered later even if the normalized
/// schema changes. `None` fields and empty lists are omitted from the
/// serialized form.
///
/// `mission_type` and `carrier` are set once and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionParams {
    // identity/search inputs
    pub carrier_search_term: String,
    pub commodity_search_term: String,
    pub system: String,
    pub station: String,

    // numeric inputs, raw text kept for error reporting
    pub profit_raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profit: Option<f64>,
    pub pads_raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pads: Option<PadSize>,
    pub demand_raw: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demand: Option<f64>,

    pub mission_type: MissionType,
    pub edmc_off: bool,

    // resolved records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<CarrierData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commodity: Option<CommodityData>,

    /// Free-text message from the carrier owner, shown on every surface.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    // generated content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forum_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forum_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_image: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forum_image: Option<PathBuf>,

    // per-surface outcomes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mission_channel_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_message_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_message_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_message_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forum_post_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forum_post_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forum_comment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forum_comment_url: Option<String>,

    // one entry per registered webhook, parallel arrays
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub webhook_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub webhook_names: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub webhook_message_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub webhook_jump_urls: Vec<String>,
}

impl MissionParams {
    /// Creates a fresh attempt from the raw command inputs.
    ///
    /// System and station are normalized to uppercase for display.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        mission_type: MissionType,
        carrier_search_term: impl Into<String>,
        commodity_search_term: impl Into<String>,
        system: &str,
        station: &str,
        profit_raw: impl Into<String>,
        pads_raw: impl Into<String>,
        demand_raw: impl Into<String>,
    ) -> Self {
        Self {
            carrier_search_term: carrier_search_term.into(),
            commodity_search_term: commodity_search_term.into(),
            system: system.to_uppercase(),
            station: station.to_uppercase(),
            profit_raw: profit_raw.into(),
            profit: None,
            pads_raw: pads_raw.into(),
            pads: None,
            demand_raw: demand_raw.into(),
            demand: None,
            mission_type,
            edmc_off: false,
            carrier: None,
            commodity: None,
            message: None,
            timestamp: None,
            alert_text: None,
            forum_title: None,
            forum_body: None,
            channel_image: None,
            forum_image: None,
            mission_channel_id: None,
            alert_message_id: None,
            channel_message_id: None,
            notify_message_id: None,
            forum_post_id: None,
            forum_post_url: None,
            forum_comment_id: None,
            forum_comment_url: None,
            webhook_urls: Vec::new(),
            webhook_names: Vec::new(),
            webhook_message_ids: Vec::new(),
            webhook_jump_urls: Vec::new(),
        }
    }

    /// The resolved carrier, after validation has run.
    pub fn carrier(&self) -> Result<&CarrierData, crate::error::AppError> {
        self.carrier.as_ref().ok_or(
            crate::error::internal::InternalError::MissingParam {
                field: "carrier",
                stage: "post-validation",
            }
            .into(),
        )
    }

    /// The resolved commodity name, after validation has run.
    pub fn commodity_name(&self) -> Result<&str, crate::error::AppError> {
        self.commodity.as_ref().map(|c| c.name.as_str()).ok_or(
            crate::error::internal::InternalError::MissingParam {
                field: "commodity",
                stage: "post-validation",
            }
            .into(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_size_parses_case_insensitively() {
        assert_eq!(PadSize::parse("l"), Some(PadSize::Large));
        assert_eq!(PadSize::parse("L"), Some(PadSize::Large));
        assert_eq!(PadSize::parse("medium"), Some(PadSize::Medium));
        assert_eq!(PadSize::parse("M "), Some(PadSize::Medium));
    }

    #[test]
    fn pad_size_rejects_junk() {
        assert_eq!(PadSize::parse("XL"), None);
        assert_eq!(PadSize::parse(""), None);
        assert_eq!(PadSize::parse("small"), None);
    }

    #[test]
    fn send_flags_parse_all_letters() {
        let flags = SendFlags::parse("drwntex");
        assert!(flags.discord);
        assert!(flags.forum);
        assert!(flags.webhooks);
        assert!(flags.notify_haulers);
        assert!(flags.copy_text);
        assert!(flags.edmc_off);
        assert!(flags.cancel);
    }

    #[test]
    fn send_flags_ignore_unknown_letters() {
        let flags = SendFlags::parse("dz9");
        assert!(flags.discord);
        assert!(!flags.forum);
        assert!(!flags.cancel);
    }

    #[test]
    fn new_params_normalize_system_and_station() {
        let params = MissionParams::new(
            MissionType::Load,
            "test",
            "gold",
            "hip 57784",
            "mackenzie relay",
            "10",
            "l",
            "20",
        );
        assert_eq!(params.system, "HIP 57784");
        assert_eq!(params.station, "MACKENZIE RELAY");
    }

    #[test]
    fn serialized_params_omit_unset_fields() {
        let params = MissionParams::new(
            MissionType::Unload,
            "test",
            "gold",
            "sol",
            "abraham lincoln",
            "10",
            "l",
            "20",
        );
        let json = serde_json::to_value(&params).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("carrier"));
        assert!(!object.contains_key("profit"));
        assert!(!object.contains_key("webhook_urls"));
        assert_eq!(object["mission_type"], "unload");
    }

    #[test]
    fn params_round_trip_through_json() {
        let mut params = MissionParams::new(
            MissionType::Load,
            "test",
            "gold",
            "sol",
            "abraham lincoln",
            "10",
            "l",
            "20",
        );
        params.profit = Some(10.0);
        params.pads = Some(PadSize::Large);
        params.mission_channel_id = Some(42);

        let json = serde_json::to_string(&params).unwrap();
        let back: MissionParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back.profit, Some(10.0));
        assert_eq!(back.pads, Some(PadSize::Large));
        assert_eq!(back.mission_channel_id, Some(42));
        assert_eq!(back.mission_type, MissionType::Load);
    }
}
