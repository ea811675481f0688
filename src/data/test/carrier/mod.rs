use crate::data::carrier::CarrierRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod find_by_name_fragment;
mod set_market_api;
mod update_last_trade;
