use crate::data::webhook::WebhookRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete_by_name;
mod for_owner;
