use super::*;

/// Tests partial, case-insensitive carrier lookup.
///
/// Expected: fragment matches regardless of case, non-matching fragment
/// returns an empty list.
#[tokio::test]
async fn matches_partial_name_case_insensitively() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_mission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::carrier::CarrierFactory::new(db)
        .long_name("INTERSTELLAR FREIGHT ONE")
        .build()
        .await?;

    let repo = CarrierRepository::new(db);

    let matches = repo.find_by_name_fragment("freight").await?;
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].long_name, "INTERSTELLAR FREIGHT ONE");

    let matches = repo.find_by_name_fragment("FREIGHT ONE").await?;
    assert_eq!(matches.len(), 1);

    let matches = repo.find_by_name_fragment("tanker").await?;
    assert!(matches.is_empty());

    Ok(())
}

/// Tests that multiple matching carriers are returned ordered by long name.
///
/// Expected: both carriers returned, alphabetical order.
#[tokio::test]
async fn returns_all_matches_ordered() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_mission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::carrier::CarrierFactory::new(db)
        .long_name("ZEBRA HAULER")
        .build()
        .await?;
    factory::carrier::CarrierFactory::new(db)
        .long_name("ALPHA HAULER")
        .build()
        .await?;

    let repo = CarrierRepository::new(db);
    let matches = repo.find_by_name_fragment("hauler").await?;

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].long_name, "ALPHA HAULER");
    assert_eq!(matches[1].long_name, "ZEBRA HAULER");

    Ok(())
}
