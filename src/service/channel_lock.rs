//! Keyed mutual exclusion for carrier mission channels.
//!
//! The channel-name space is the one resource shared between concurrent
//! mission flows: a generation and a teardown (or two generations) racing on
//! the same carrier could create two channels, double-insert rows, or delete a
//! channel mid-creation. [`ChannelLockRegistry`] maps each channel name to a
//! shared async mutex; flows for different carriers never contend.
//!
//! Locks are in-process only and not persisted. A crash while holding one
//! requires operator recovery (restart clears all locks).

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::AppError;

/// How long a flow waits for a channel lock before giving up.
pub const LOCK_TIMEOUT: Duration = Duration::from_secs(20);

/// Registry of per-channel-name locks.
///
/// Injected into both the mission orchestrator and teardown so every path
/// that touches a carrier channel goes through the same handle.
pub struct ChannelLockRegistry {
    locks: StdMutex<HashMap<String, Arc<Mutex<()>>>>,
    timeout: Duration,
}

impl ChannelLockRegistry {
    pub fn new() -> Self {
        Self::with_timeout(LOCK_TIMEOUT)
    }

    /// Registry with a non-default acquisition timeout. Used by tests to keep
    /// contention cases fast.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            locks: StdMutex::new(HashMap::new()),
            timeout,
        }
    }

    /// Returns the shared mutex handle for a channel name, creating it on
    /// first use. Handles are never removed; the registry is bounded by the
    /// number of registered carriers.
    fn handle(&self, channel: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().expect("channel lock registry poisoned");
        locks.entry(channel.to_string()).or_default().clone()
    }

    /// Acquires the lock for a channel name, waiting up to the registry's
    /// timeout ([`LOCK_TIMEOUT`] by default).
    ///
    /// The returned guard releases the lock when dropped, so release happens
    /// on every exit path including errors.
    ///
    /// # Returns
    /// - `Ok(ChannelLockGuard)` - Lock held
    /// - `Err(AppError::ChannelLockTimeout)` - Another flow held the lock for
    ///   the entire wait; no durable state has been touched
    pub async fn acquire(&self, channel: &str) -> Result<ChannelLockGuard, AppError> {
        self.acquire_with_timeout(channel, self.timeout).await
    }

    /// Acquires with an explicit timeout. Exposed for tests.
    pub async fn acquire_with_timeout(
        &self,
        channel: &str,
        timeout: Duration,
    ) -> Result<ChannelLockGuard, AppError> {
        let handle = self.handle(channel);
        match tokio::time::timeout(timeout, handle.lock_owned()).await {
            Ok(guard) => {
                tracing::debug!(channel, "Acquired channel lock");
                Ok(ChannelLockGuard {
                    channel: channel.to_string(),
                    _guard: guard,
                })
            }
            Err(_) => Err(AppError::ChannelLockTimeout {
                channel: channel.to_string(),
                seconds: timeout.as_secs(),
            }),
        }
    }

    /// Whether a channel's lock is currently held by some flow.
    pub fn is_locked(&self, channel: &str) -> bool {
        let locks = self.locks.lock().expect("channel lock registry poisoned");
        locks
            .get(channel)
            .map(|handle| handle.try_lock().is_err())
            .unwrap_or(false)
    }
}

impl Default for ChannelLockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Held lock on one channel name. Dropping the guard releases the lock.
pub struct ChannelLockGuard {
    channel: String,
    _guard: OwnedMutexGuard<()>,
}

impl ChannelLockGuard {
    pub fn channel(&self) -> &str {
        &self.channel
    }
}

impl Drop for ChannelLockGuard {
    fn drop(&mut self) {
        tracing::debug!(channel = %self.channel, "Released channel lock");
    }
}
