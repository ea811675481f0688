//! Cron jobs for automated mission bookkeeping.

pub mod mission_timeouts;
