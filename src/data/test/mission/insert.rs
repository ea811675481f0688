use super::*;

/// Tests inserting a mission from a resolved parameter set.
///
/// Verifies the normalized columns and that the full parameter object is
/// recoverable from the serialized blob.
///
/// Expected: Ok with row matching the params
#[tokio::test]
async fn inserts_resolved_params() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_mission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let carrier = factory::create_carrier(db).await?;
    let params = resolved_params(&carrier);

    let repo = MissionRepository::new(db);
    let mission = repo.insert(&params).await?;

    assert_eq!(mission.carrier_name, carrier.long_name);
    assert_eq!(mission.carrier_identifier, carrier.identifier);
    assert_eq!(mission.commodity, "Gold");
    assert_eq!(mission.mission_type, "load");
    assert_eq!(mission.pads, "L");
    assert_eq!(mission.profit, 12.0);
    assert_eq!(mission.demand, 20.0);
    assert_eq!(mission.channel_id, "800000000000000001");

    let stored: MissionParams = serde_json::from_str(&mission.params).unwrap();
    assert_eq!(stored.carrier.unwrap().long_name, carrier.long_name);
    assert_eq!(stored.pads, Some(PadSize::Large));

    Ok(())
}

/// Tests the unique constraint on carrier name.
///
/// Two inserts for the same carrier must not both succeed, closing the
/// window between the validation-time check and commit.
///
/// Expected: second insert fails with a unique violation
#[tokio::test]
async fn rejects_duplicate_active_mission() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_mission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let carrier = factory::create_carrier(db).await?;
    let params = resolved_params(&carrier);

    let repo = MissionRepository::new(db);
    repo.insert(&params).await?;
    let second = repo.insert(&params).await;

    assert!(second.is_err());
    assert!(crate::data::is_unique_violation(&second.unwrap_err()));

    Ok(())
}

/// Tests that inserting without a resolved carrier is refused.
///
/// Expected: Err without touching the table
#[tokio::test]
async fn refuses_unresolved_params() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_mission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let params = MissionParams::new(
        MissionType::Load,
        "test",
        "gold",
        "SOL",
        "ABRAHAM LINCOLN",
        "12",
        "L",
        "20",
    );

    let repo = MissionRepository::new(db);
    assert!(repo.insert(&params).await.is_err());
    assert!(repo.get_all().await?.is_empty());

    Ok(())
}
