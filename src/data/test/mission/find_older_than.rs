use super::*;
use chrono::{Duration, Utc};

/// Tests the stale-mission query used by the idle-timeout sweep.
///
/// Expected: only missions created before the cutoff are returned.
#[tokio::test]
async fn returns_only_stale_missions() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_mission_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let old_carrier = factory::create_carrier(db).await?;
    let fresh_carrier = factory::create_carrier(db).await?;

    factory::mission::MissionFactory::new(db, &old_carrier)
        .created_at(Utc::now() - Duration::hours(100))
        .build()
        .await?;
    factory::create_mission(db, &fresh_carrier).await?;

    let repo = MissionRepository::new(db);
    let stale = repo.find_older_than(Utc::now() - Duration::hours(72)).await?;

    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].carrier_name, old_carrier.long_name);

    Ok(())
}
