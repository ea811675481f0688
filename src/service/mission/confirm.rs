//! Confirmation and disambiguation waits.
//!
//! Each attempt owns an event channel fed by the command layer (target menu
//! selections, numeric disambiguation choices, owner-message submissions,
//! cancellation). The waits here are the attempt's explicit state machine:
//! timeouts are cancellable delayed events over the receiver, not ambient
//! framework callbacks.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::model::mission::{MissionParams, SendFlags};

/// How long the confirmation UI waits for the user to choose send targets.
pub const CONFIRM_TIMEOUT: Duration = Duration::from_secs(300);

/// How long a disambiguation prompt waits for a numeric reply.
pub const CHOICE_TIMEOUT: Duration = Duration::from_secs(30);

/// Events a mission attempt can receive from the command layer.
#[derive(Debug, Clone)]
pub enum AttemptEvent {
    /// The user chose their send targets from the confirmation menu.
    TargetsChosen(SendFlags),
    /// Numeric reply to a disambiguation prompt (1-based).
    Choice(usize),
    /// The user attached a free-text message to the mission.
    MessageSet(String),
    /// The user cancelled the attempt.
    Cancelled,
}

/// Result of the confirmation wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Proceed(SendFlags),
    Cancelled,
    TimedOut,
}

/// Waits for the user to choose send targets, applying any message they set
/// along the way.
///
/// Returns [`ConfirmOutcome::TimedOut`] when the window elapses; no durable
/// state exists yet, so the caller only disables its UI. A closed channel
/// counts as cancellation.
pub async fn await_send_choice(
    events: &mut mpsc::Receiver<AttemptEvent>,
    params: &mut MissionParams,
    timeout: Duration,
) -> ConfirmOutcome {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        match tokio::time::timeout_at(deadline, events.recv()).await {
            Err(_) => return ConfirmOutcome::TimedOut,
            Ok(None) => return ConfirmOutcome::Cancelled,
            Ok(Some(AttemptEvent::Cancelled)) => return ConfirmOutcome::Cancelled,
            Ok(Some(AttemptEvent::TargetsChosen(flags))) => {
                if flags.cancel {
                    return ConfirmOutcome::Cancelled;
                }
                return ConfirmOutcome::Proceed(flags);
            }
            Ok(Some(AttemptEvent::MessageSet(message))) => {
                params.message = Some(message);
            }
            // stray numeric replies are meaningless here
            Ok(Some(AttemptEvent::Choice(_))) => {}
        }
    }
}

/// Waits for a numeric disambiguation reply in `1..=candidates`.
///
/// Out-of-range replies are ignored and the wait continues. Timeout,
/// cancellation, or a closed channel all return `None`; the caller cancels
/// the attempt silently.
pub async fn await_choice(
    events: &mut mpsc::Receiver<AttemptEvent>,
    candidates: usize,
    timeout: Duration,
) -> Option<usize> {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        match tokio::time::timeout_at(deadline, events.recv()).await {
            Err(_) => return None,
            Ok(None) => return None,
            Ok(Some(AttemptEvent::Cancelled)) => return None,
            Ok(Some(AttemptEvent::Choice(choice))) => {
                if (1..=candidates).contains(&choice) {
                    return Some(choice);
                }
            }
            Ok(Some(_)) => {}
        }
    }
}
