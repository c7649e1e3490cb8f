//! Trailing-edge debounce on top of tokio timers.
//!
//! Each [`Debouncer::schedule`] call replaces the previous not-yet-fired task, so a
//! burst of calls runs only the last task, one quiet period after the last call.
//! A task that already fired is left to finish.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

#[derive(Default)]
struct Pending {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

/// Cheap to clone; clones share the same pending slot.
#[derive(Clone)]
pub struct Debouncer {
    delay: Duration,
    pending: Arc<Mutex<Pending>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Arc::default(),
        }
    }

    /// Runs `task` after the quiet period unless another call replaces it first.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut pending = lock(&self.pending);
        pending.generation += 1;
        let generation = pending.generation;

        let slot = Arc::clone(&self.pending);
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            {
                let mut pending = lock(&slot);
                if pending.generation != generation {
                    return;
                }
                // Fired: detach so a later schedule cannot abort us mid-task
                pending.handle = None;
            }
            task.await;
        });

        if let Some(previous) = pending.handle.replace(handle) {
            previous.abort();
        }
    }

    /// Drops the pending task, if any. Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        let mut pending = lock(&self.pending);
        pending.generation += 1;
        match pending.handle.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.pending).handle.is_some()
    }
}

fn lock(pending: &Mutex<Pending>) -> MutexGuard<'_, Pending> {
    pending.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter_task(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let counter = Arc::clone(counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_runs_once_after_last_call() {
        let debouncer = Debouncer::new(Duration::from_secs(1));
        let runs = Arc::new(AtomicUsize::new(0));

        debouncer.schedule(counter_task(&runs));
        tokio::time::sleep(Duration::from_millis(500)).await;
        debouncer.schedule(counter_task(&runs));
        assert!(debouncer.is_pending());

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_drops_pending_task() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let runs = Arc::new(AtomicUsize::new(0));

        debouncer.schedule(counter_task(&runs));
        assert!(debouncer.cancel());
        assert!(!debouncer.cancel());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clones_share_the_pending_slot() {
        let debouncer = Debouncer::new(Duration::from_millis(100));
        let other = debouncer.clone();
        let runs = Arc::new(AtomicUsize::new(0));

        debouncer.schedule(counter_task(&runs));
        other.schedule(counter_task(&runs));

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }
}
