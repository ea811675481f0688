use super::*;

/// Tests removing a registration by name.
///
/// Expected: one row deleted, other owners' webhooks untouched.
#[tokio::test]
async fn deletes_matching_registration() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_mission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = WebhookRepository::new(db);
    repo.create("user1", "https://discord.com/api/webhooks/1/t", "main")
        .await?;
    repo.create("user2", "https://discord.com/api/webhooks/2/u", "main")
        .await?;

    let deleted = repo.delete_by_name("user1", "main").await?;
    assert_eq!(deleted, 1);

    assert!(repo.find_by_name("user1", "main").await?.is_none());
    assert!(repo.find_by_name("user2", "main").await?.is_some());

    Ok(())
}

/// Tests deleting a name that does not exist.
///
/// Expected: zero rows deleted, no error
#[tokio::test]
async fn unknown_name_deletes_nothing() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_mission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = WebhookRepository::new(db);
    let deleted = repo.delete_by_name("user1", "ghost").await?;
    assert_eq!(deleted, 0);

    Ok(())
}
