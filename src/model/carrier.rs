use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Read-only carrier record consumed by the mission lifecycle.
///
/// Resolved once by the validation pipeline and immutable afterwards; it is
/// serialized into the mission parameter blob so the exact record used at
/// generation time can be recovered later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarrierData {
    pub id: i32,
    pub long_name: String,
    pub short_name: String,
    /// Registration in `XXX-XXX` format.
    pub identifier: String,
    pub owner_id: String,
    /// Name of the carrier's dedicated mission channel, also the lock key.
    pub channel_name: String,
    pub last_trade: DateTime<Utc>,
    /// Whether the carrier has been flagged as reachable via the external
    /// market API.
    pub market_api_enabled: bool,
}

impl From<entity::carrier::Model> for CarrierData {
    fn from(model: entity::carrier::Model) -> Self {
        Self {
            id: model.id,
            long_name: model.long_name,
            short_name: model.short_name,
            identifier: model.identifier,
            owner_id: model.owner_id,
            channel_name: model.channel_name,
            last_trade: model.last_trade,
            market_api_enabled: model.market_api_enabled,
        }
    }
}
