use std::sync::Arc;

use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::data::mission::MissionRepository;
use crate::error::AppError;
use crate::service::channel_lock::ChannelLockRegistry;
use crate::service::mission::teardown::TeardownOutcome;
use crate::service::mission::{MissionService, MISSION_MAX_AGE_HOURS};
use crate::service::surface::Surfaces;

/// Starts the idle-mission sweep.
///
/// Runs every ten minutes and tears down missions older than
/// [`MISSION_MAX_AGE_HOURS`], posting the usual closing notices with a
/// timeout reason. Sweep errors are logged and never stop the scheduler.
///
/// # Arguments
/// - `db`: Database connection
/// - `surfaces`: Surface handles for the teardown notices
/// - `locks`: The shared channel-lock registry
pub async fn start_scheduler(
    db: DatabaseConnection,
    surfaces: Surfaces,
    locks: Arc<ChannelLockRegistry>,
) -> Result<(), AppError> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async("0 */10 * * * *", move |_uuid, _lock| {
        let db = db.clone();
        let surfaces = surfaces.clone();
        let locks = locks.clone();

        Box::pin(async move {
            if let Err(e) = sweep_stale_missions(&db, &surfaces, &locks).await {
                tracing::error!("Error sweeping stale missions: {}", e);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!("Mission timeout scheduler started");

    Ok(())
}

/// Tears down every mission past the idle cutoff.
async fn sweep_stale_missions(
    db: &DatabaseConnection,
    surfaces: &Surfaces,
    locks: &Arc<ChannelLockRegistry>,
) -> Result<(), AppError> {
    let cutoff = Utc::now() - chrono::Duration::hours(MISSION_MAX_AGE_HOURS);
    let repo = MissionRepository::new(db);
    let stale = repo.find_older_than(cutoff).await?;

    for mission in stale {
        let carrier_name = mission.carrier_name.clone();
        tracing::info!(carrier = %carrier_name, "Tearing down idle mission");

        let service = MissionService::new(db, surfaces.clone(), locks.clone());
        if let Err(e) = service
            .teardown(
                None,
                mission,
                TeardownOutcome::TimedOut,
                Some(format!(
                    "Mission timed out after {} hours of inactivity.",
                    MISSION_MAX_AGE_HOURS
                )),
            )
            .await
        {
            tracing::error!("Failed to tear down idle mission for {}: {}", carrier_name, e);
        }
    }

    Ok(())
}
