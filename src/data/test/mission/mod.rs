use crate::data::mission::MissionRepository;
use crate::model::{
    carrier::CarrierData,
    commodity::CommodityData,
    mission::{MissionParams, MissionType, PadSize},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod delete_by_carrier;
mod find_by_carrier;
mod find_older_than;
mod insert;

/// Builds a parameter set as it looks after validation and a successful
/// Discord send, ready for insertion.
fn resolved_params(carrier: &entity::carrier::Model) -> MissionParams {
    let mut params = MissionParams::new(
        MissionType::Load,
        "test",
        "gold",
        "HIP 57784",
        "Mackenzie Relay",
        "12",
        "L",
        "20",
    );
    params.profit = Some(12.0);
    params.pads = Some(PadSize::Large);
    params.demand = Some(20.0);
    params.carrier = Some(CarrierData::from(carrier.clone()));
    params.commodity = Some(CommodityData::new("Gold"));
    params.mission_channel_id = Some(800_000_000_000_000_001);
    params.alert_message_id = Some(800_000_000_000_000_002);
    params
}
