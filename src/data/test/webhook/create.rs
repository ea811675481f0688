use super::*;

/// Tests creating a webhook registration.
///
/// Expected: Ok with all fields stored
#[tokio::test]
async fn creates_registration() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_mission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = WebhookRepository::new(db);
    let webhook = repo
        .create("user1", "https://discord.com/api/webhooks/1/t", "main")
        .await?;

    assert_eq!(webhook.owner_id, "user1");
    assert_eq!(webhook.name, "main");

    Ok(())
}

/// Tests per-owner URL uniqueness.
///
/// Expected: same URL for the same owner fails, same URL for a different
/// owner succeeds.
#[tokio::test]
async fn url_unique_per_owner() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_mission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = WebhookRepository::new(db);
    repo.create("user1", "https://discord.com/api/webhooks/1/t", "main")
        .await?;

    let duplicate = repo
        .create("user1", "https://discord.com/api/webhooks/1/t", "other")
        .await;
    assert!(duplicate.is_err());

    let other_owner = repo
        .create("user2", "https://discord.com/api/webhooks/1/t", "main")
        .await;
    assert!(other_owner.is_ok());

    Ok(())
}

/// Tests per-owner name uniqueness.
///
/// Expected: same name for the same owner fails
#[tokio::test]
async fn name_unique_per_owner() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_mission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = WebhookRepository::new(db);
    repo.create("user1", "https://discord.com/api/webhooks/1/t", "main")
        .await?;

    let duplicate = repo
        .create("user1", "https://discord.com/api/webhooks/2/u", "main")
        .await;
    assert!(duplicate.is_err());

    Ok(())
}
