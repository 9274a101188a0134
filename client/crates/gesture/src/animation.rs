//! Like Success Feedback
//!
//! Fire-and-forget fixed-duration acknowledgment shown after an accepted
//! like. Single-shot: it auto-completes and signals the caller so the
//! "showing" flag can be cleared, and it can be canceled on teardown
//! without leaking the timer.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::AbortHandle;

/// Default feedback duration
pub const DEFAULT_DURATION: Duration = Duration::from_millis(1_000);

#[derive(Debug, Clone, Copy)]
pub struct AnimationTimer {
    duration: Duration,
}

impl Default for AnimationTimer {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
        }
    }
}

impl AnimationTimer {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Start one run
    pub fn play(&self) -> AnimationHandle {
        let (done_tx, done_rx) = watch::channel(false);
        let duration = self.duration;

        let task = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let _ = done_tx.send(true);
        });

        AnimationHandle {
            done: done_rx,
            timer: task.abort_handle(),
        }
    }
}

/// Handle for one running animation
pub struct AnimationHandle {
    done: watch::Receiver<bool>,
    timer: AbortHandle,
}

impl AnimationHandle {
    pub fn is_done(&self) -> bool {
        *self.done.borrow()
    }

    /// Wait for completion. Returns immediately if canceled.
    pub async fn finished(&mut self) {
        while !*self.done.borrow() {
            if self.done.changed().await.is_err() {
                break;
            }
        }
    }

    /// Stop early; `is_done` stays false and no completion is signaled
    pub fn cancel(&self) {
        self.timer.abort();
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        self.timer.abort();
    }
}
