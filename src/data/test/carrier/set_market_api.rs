use super::*;
use entity::prelude::*;
use sea_orm::EntityTrait;

/// Tests toggling the external market API flag.
///
/// Expected: flag flips on and back off.
#[tokio::test]
async fn toggles_flag() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_mission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let carrier = factory::create_carrier(db).await?;
    assert!(!carrier.market_api_enabled);

    let repo = CarrierRepository::new(db);
    repo.set_market_api(carrier.id, true).await?;

    let updated = Carrier::find_by_id(carrier.id).one(db).await?.unwrap();
    assert!(updated.market_api_enabled);

    repo.set_market_api(carrier.id, false).await?;
    let updated = Carrier::find_by_id(carrier.id).one(db).await?.unwrap();
    assert!(!updated.market_api_enabled);

    Ok(())
}
