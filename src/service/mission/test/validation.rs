use super::*;
use crate::service::mission::MissionService;
use test_utils::{builder::TestBuilder, factory};

/// Non-numeric profit rejects immediately, citing the raw input, with no
/// further checks executed.
#[tokio::test]
async fn non_numeric_profit_rejects_and_short_circuits() {
    let test = TestBuilder::new().with_mission_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_carrier(db).await.unwrap();

    let harness = TestHarness::new();
    let service = MissionService::new(db, harness.surfaces(), harness.locks.clone());
    let (_tx, mut rx) = events();
    let mut params = raw_params("carrier", "gold", "abc", "l", "20");

    let ok = service.validate(&ctx(), &mut params, &mut rx).await.unwrap();

    assert!(!ok);
    let notices = harness.channels.notice_texts();
    assert_eq!(notices.len(), 1, "later checks must not have run");
    assert!(notices[0].contains("abc"));
}

/// Zero and negative profit are rejected the same way as junk.
#[tokio::test]
async fn non_positive_profit_rejects() {
    let test = TestBuilder::new().with_mission_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let harness = TestHarness::new();
    let service = MissionService::new(db, harness.surfaces(), harness.locks.clone());

    for raw in ["0", "-4"] {
        let (_tx, mut rx) = events();
        let mut params = raw_params("carrier", "gold", raw, "l", "20");
        let ok = service.validate(&ctx(), &mut params, &mut rx).await.unwrap();
        assert!(!ok, "profit {:?} must be rejected", raw);
    }
}

/// Pad tokens other than L/M (case-insensitive) reject, naming the allowed
/// tokens.
#[tokio::test]
async fn junk_pads_reject() {
    let test = TestBuilder::new().with_mission_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let harness = TestHarness::new();
    let service = MissionService::new(db, harness.surfaces(), harness.locks.clone());
    let (_tx, mut rx) = events();
    let mut params = raw_params("carrier", "gold", "10", "XL", "20");

    let ok = service.validate(&ctx(), &mut params, &mut rx).await.unwrap();

    assert!(!ok);
    assert!(harness.channels.has_notice_containing("`L` or `M`"));
    assert!(harness.channels.has_notice_containing("XL"));
}

/// Demand parse failure and ceiling violation are distinct messages.
#[tokio::test]
async fn demand_parse_and_ceiling_errors_are_distinct() {
    let test = TestBuilder::new().with_mission_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let harness = TestHarness::new();
    let service = MissionService::new(db, harness.surfaces(), harness.locks.clone());

    let (_tx, mut rx) = events();
    let mut params = raw_params("carrier", "gold", "10", "l", "loads");
    assert!(!service.validate(&ctx(), &mut params, &mut rx).await.unwrap());
    assert!(harness.channels.has_notice_containing("loads"));

    let (_tx2, mut rx2) = events();
    let mut params = raw_params("carrier", "gold", "10", "l", "30");
    assert!(!service.validate(&ctx(), &mut params, &mut rx2).await.unwrap());
    assert!(harness.channels.has_notice_containing("25K ton capacity"));
}

/// An unknown carrier fragment rejects, naming the search term.
#[tokio::test]
async fn unknown_carrier_rejects_with_term() {
    let test = TestBuilder::new().with_mission_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let harness = TestHarness::new();
    let service = MissionService::new(db, harness.surfaces(), harness.locks.clone());
    let (_tx, mut rx) = events();
    let mut params = raw_params("phantom", "gold", "10", "l", "20");

    let ok = service.validate(&ctx(), &mut params, &mut rx).await.unwrap();

    assert!(!ok);
    assert!(harness.channels.has_notice_containing("phantom"));
    assert!(params.carrier.is_none());
}

/// More than three matches always rejects with a narrow-your-search message
/// and zero side effects.
#[tokio::test]
async fn too_many_matches_reject() {
    let test = TestBuilder::new().with_mission_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    for index in 0..4 {
        factory::carrier::CarrierFactory::new(db)
            .long_name(format!("BULK HAULER {}", index))
            .build()
            .await
            .unwrap();
    }

    let harness = TestHarness::new();
    let service = MissionService::new(db, harness.surfaces(), harness.locks.clone());
    let (_tx, mut rx) = events();
    let mut params = raw_params("bulk hauler", "gold", "10", "l", "20");

    let ok = service.validate(&ctx(), &mut params, &mut rx).await.unwrap();

    assert!(!ok);
    assert!(harness.channels.has_notice_containing("narrow your search"));
    assert!(params.carrier.is_none());
    assert!(harness.images.upload_requests.lock().unwrap().is_empty());
}

/// Two or three matches prompt for a numeric choice and resolve it.
#[tokio::test]
async fn ambiguous_match_resolves_via_numeric_choice() {
    let test = TestBuilder::new().with_mission_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::carrier::CarrierFactory::new(db)
        .long_name("TWIN STAR ALPHA")
        .build()
        .await
        .unwrap();
    factory::carrier::CarrierFactory::new(db)
        .long_name("TWIN STAR BETA")
        .build()
        .await
        .unwrap();

    let harness = TestHarness::new();
    let service = MissionService::new(db, harness.surfaces(), harness.locks.clone());
    let (tx, mut rx) = events();
    tx.send(AttemptEvent::Choice(2)).await.unwrap();

    let mut params = raw_params("twin star", "gold", "10", "l", "20");
    let ok = service.validate(&ctx(), &mut params, &mut rx).await.unwrap();

    assert!(ok);
    assert_eq!(params.carrier.as_ref().unwrap().long_name, "TWIN STAR BETA");
}

/// An unanswered disambiguation prompt cancels the attempt silently: the
/// prompt itself is the only notice.
#[tokio::test]
async fn unanswered_disambiguation_cancels_silently() {
    let test = TestBuilder::new().with_mission_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    factory::carrier::CarrierFactory::new(db)
        .long_name("TWIN STAR ALPHA")
        .build()
        .await
        .unwrap();
    factory::carrier::CarrierFactory::new(db)
        .long_name("TWIN STAR BETA")
        .build()
        .await
        .unwrap();

    let harness = TestHarness::new();
    let service = MissionService::new(db, harness.surfaces(), harness.locks.clone());
    let (tx, mut rx) = events();
    drop(tx); // the user never replies

    let mut params = raw_params("twin star", "gold", "10", "l", "20");
    let ok = service.validate(&ctx(), &mut params, &mut rx).await.unwrap();

    assert!(!ok);
    assert_eq!(harness.channels.notice_texts().len(), 1);
    assert!(params.carrier.is_none());
}

/// A carrier with an open mission rejects before any channel or persistence
/// action.
#[tokio::test]
async fn open_mission_rejects_before_side_effects() {
    let test = TestBuilder::new().with_mission_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let carrier = factory::create_carrier(db).await.unwrap();
    factory::create_mission(db, &carrier).await.unwrap();

    let harness = TestHarness::new();
    let service = MissionService::new(db, harness.surfaces(), harness.locks.clone());
    let (_tx, mut rx) = events();
    let mut params = raw_params(&carrier.long_name, "gold", "10", "l", "20");

    let ok = service.validate(&ctx(), &mut params, &mut rx).await.unwrap();

    assert!(!ok);
    assert!(harness.channels.has_notice_containing("already on a mission"));
    assert!(harness.channels.created_channels.lock().unwrap().is_empty());
    assert!(harness.images.upload_requests.lock().unwrap().is_empty());
}

/// A bad advertisement image pauses for the upload sub-flow and passes once
/// the re-check succeeds.
#[tokio::test]
async fn image_upload_flow_recovers_once() {
    let test = TestBuilder::new().with_mission_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let carrier = factory::create_carrier(db).await.unwrap();

    let harness = TestHarness::new();
    harness
        .images
        .valid
        .store(false, std::sync::atomic::Ordering::SeqCst);
    harness
        .images
        .valid_after_upload
        .store(true, std::sync::atomic::Ordering::SeqCst);

    let service = MissionService::new(db, harness.surfaces(), harness.locks.clone());
    let (_tx, mut rx) = events();
    let mut params = raw_params(&carrier.long_name, "gold", "10", "l", "20");

    let ok = service.validate(&ctx(), &mut params, &mut rx).await.unwrap();

    assert!(ok);
    assert_eq!(harness.images.upload_requests.lock().unwrap().len(), 1);
}

/// A second failed image check rejects hard.
#[tokio::test]
async fn persistent_bad_image_rejects() {
    let test = TestBuilder::new().with_mission_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let carrier = factory::create_carrier(db).await.unwrap();

    let harness = TestHarness::new();
    harness
        .images
        .valid
        .store(false, std::sync::atomic::Ordering::SeqCst);

    let service = MissionService::new(db, harness.surfaces(), harness.locks.clone());
    let (_tx, mut rx) = events();
    let mut params = raw_params(&carrier.long_name, "gold", "10", "l", "20");

    let ok = service.validate(&ctx(), &mut params, &mut rx).await.unwrap();

    assert!(!ok);
    assert!(harness.channels.has_notice_containing("valid mission image"));
}

/// Commodity resolution: common list first, then the resolver with its own
/// feedback on unknown or ambiguous terms.
#[tokio::test]
async fn commodity_resolution_paths() {
    let test = TestBuilder::new().with_mission_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let carrier = factory::create_carrier(db).await.unwrap();

    let harness = TestHarness::new();
    let service = MissionService::new(db, harness.surfaces(), harness.locks.clone());

    // common commodity, case-insensitive
    let (_tx, mut rx) = events();
    let mut params = raw_params(&carrier.long_name, "GOLD", "10", "l", "20");
    assert!(service.validate(&ctx(), &mut params, &mut rx).await.unwrap());
    assert_eq!(params.commodity.as_ref().unwrap().name, "Gold");

    // unambiguous reference-table match
    let (_tx2, mut rx2) = events();
    let mut params = raw_params(&carrier.long_name, "thor", "10", "l", "20");
    assert!(service.validate(&ctx(), &mut params, &mut rx2).await.unwrap());
    assert_eq!(params.commodity.as_ref().unwrap().name, "Thorium");

    // unknown term: the resolver reports, the pipeline stops quietly
    let (_tx3, mut rx3) = events();
    let mut params = raw_params(&carrier.long_name, "unobtanium", "10", "l", "20");
    assert!(!service.validate(&ctx(), &mut params, &mut rx3).await.unwrap());
    assert!(harness.channels.has_notice_containing("unobtanium"));
}

/// A successful validation loads the owner's registered webhooks.
#[tokio::test]
async fn validation_loads_owner_webhooks() {
    let test = TestBuilder::new().with_mission_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let carrier = factory::create_carrier(db).await.unwrap();
    // ctx() acts as user 42
    factory::create_webhook(db, "42").await.unwrap();
    factory::create_webhook(db, "42").await.unwrap();
    factory::create_webhook(db, "somebody-else").await.unwrap();

    let harness = TestHarness::new();
    let service = MissionService::new(db, harness.surfaces(), harness.locks.clone());
    let (_tx, mut rx) = events();
    let mut params = raw_params(&carrier.long_name, "gold", "10", "l", "20");

    assert!(service.validate(&ctx(), &mut params, &mut rx).await.unwrap());
    assert_eq!(params.webhook_urls.len(), 2);
    assert_eq!(params.webhook_names.len(), 2);
}
