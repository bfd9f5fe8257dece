//! Hook for the external reminder service.

use log::info;

use crate::models::WeekUnlocked;

/// Receives week-unlock events after they are committed.
///
/// Delivery, scheduling and retries belong to the implementor. The engine
/// ignores anything that happens inside the callback.
pub trait UnlockNotifier: Send + Sync {
    fn week_unlocked(&self, event: &WeekUnlocked);
}

/// Reports unlock events through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl UnlockNotifier for LogNotifier {
    fn week_unlocked(&self, event: &WeekUnlocked) {
        info!(
            "week {} unlocked for owner '{}': {} (at {})",
            event.week_number, event.owner, event.title, event.unlocked_at
        );
    }
}
