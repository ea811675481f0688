use super::*;

/// Tests mission teardown at the store level.
///
/// After deletion, a lookup treats the carrier as missionless and a new
/// mission can be inserted for it.
///
/// Expected: one row deleted, subsequent insert succeeds
#[tokio::test]
async fn removes_row_and_frees_carrier() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_mission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let carrier = factory::create_carrier(db).await?;
    factory::create_mission(db, &carrier).await?;

    let repo = MissionRepository::new(db);
    let deleted = repo.delete_by_carrier(&carrier.long_name).await?;
    assert_eq!(deleted, 1);

    assert!(repo.find_by_carrier(&carrier.long_name).await?.is_none());

    // the carrier is free to start a new mission
    let params = resolved_params(&carrier);
    assert!(repo.insert(&params).await.is_ok());

    Ok(())
}

/// Tests deleting when the carrier holds no mission.
///
/// Expected: zero rows deleted, no error
#[tokio::test]
async fn missing_mission_deletes_nothing() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_mission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = MissionRepository::new(db);
    let deleted = repo.delete_by_carrier("NO SUCH CARRIER").await?;
    assert_eq!(deleted, 0);

    Ok(())
}
