use super::*;

/// Tests listing a user's registrations.
///
/// Expected: only the owner's webhooks, in registration order.
#[tokio::test]
async fn lists_only_owners_webhooks() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_mission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let first = factory::create_webhook(db, "user1").await?;
    let second = factory::create_webhook(db, "user1").await?;
    factory::create_webhook(db, "user2").await?;

    let repo = WebhookRepository::new(db);
    let webhooks = repo.for_owner("user1").await?;

    assert_eq!(webhooks.len(), 2);
    assert_eq!(webhooks[0].id, first.id);
    assert_eq!(webhooks[1].id, second.id);

    Ok(())
}

/// Tests listing for a user with no registrations.
///
/// Expected: empty list
#[tokio::test]
async fn empty_for_unknown_owner() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_mission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = WebhookRepository::new(db);
    assert!(repo.for_owner("nobody").await?.is_empty());

    Ok(())
}
