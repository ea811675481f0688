use super::*;

/// Tests fragment lookup of the active mission.
///
/// Expected: partial case-insensitive fragment finds the row, unrelated
/// fragment finds nothing.
#[tokio::test]
async fn finds_by_name_fragment() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_mission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let carrier = factory::carrier::CarrierFactory::new(db)
        .long_name("ATLAS OF SORROW")
        .build()
        .await?;
    factory::create_mission(db, &carrier).await?;

    let repo = MissionRepository::new(db);

    let found = repo.find_by_carrier("sorrow").await?;
    assert!(found.is_some());
    assert_eq!(found.unwrap().carrier_name, "ATLAS OF SORROW");

    let missing = repo.find_by_carrier("joy").await?;
    assert!(missing.is_none());

    Ok(())
}
