use super::*;
use entity::prelude::*;
use sea_orm::EntityTrait;

/// Tests stamping the last-trade timestamp.
///
/// Expected: the stored timestamp moves forward after the update.
#[tokio::test]
async fn stamps_current_time() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_mission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let carrier = factory::create_carrier(db).await?;
    let before = carrier.last_trade;

    // ensure a measurable difference on fast machines
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let repo = CarrierRepository::new(db);
    repo.update_last_trade(carrier.id).await?;

    let updated = Carrier::find_by_id(carrier.id).one(db).await?.unwrap();
    assert!(updated.last_trade > before);

    Ok(())
}

/// Tests that updating an unknown carrier is a no-op rather than an error.
#[tokio::test]
async fn unknown_carrier_is_noop() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_mission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = CarrierRepository::new(db);
    repo.update_last_trade(424242).await?;

    Ok(())
}
