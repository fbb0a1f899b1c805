use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, MutexGuard};

/// Ensures that at most one dispatch tick runs at a time, and that no tick starts once the
/// scheduler is stopping.
#[derive(Debug, Default)]
pub(crate) struct TickGuard {
    lock: Mutex<()>,
    stopped: AtomicBool,
}

impl TickGuard {
    /// Marks the tick as in progress until the returned guard is dropped. Returns `None` if
    /// another tick is still in progress or the guard is stopped.
    pub fn try_begin(&self) -> Option<MutexGuard<'_, ()>> {
        let tick = self.lock.try_lock().ok()?;
        if self.stopped.load(Ordering::SeqCst) {
            return None;
        }

        Some(tick)
    }

    /// Prevents new ticks from starting.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Waits until the tick that is currently in progress (if any) completes.
    pub async fn wait_idle(&self) {
        let _ = self.lock.lock().await;
    }
}
