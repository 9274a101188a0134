//! Gesture Driver
//!
//! Owns the timeout scheduling around [`DoubleTapDetector`]: a first
//! activation arms a timer that expires the window, a pairing activation
//! cancels it. A canceled or superseded timer can never fire into fresh
//! state, because expiry re-checks the deadline against the detector.

use crate::recognizer::{DoubleTapDetector, TapOutcome, TapSource};
use platform::clock::Clock;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::AbortHandle;

pub struct GestureDriver<C>
where
    C: Clock + 'static,
{
    clock: Arc<C>,
    window: Duration,
    detector: Arc<Mutex<DoubleTapDetector>>,
    timeout: Mutex<Option<AbortHandle>>,
}

impl<C> GestureDriver<C>
where
    C: Clock + 'static,
{
    pub fn new(clock: Arc<C>, window: Duration) -> Self {
        Self {
            clock,
            window,
            detector: Arc::new(Mutex::new(DoubleTapDetector::new(window.as_millis() as i64))),
            timeout: Mutex::new(None),
        }
    }

    /// Feed one raw activation from the input layer
    pub fn tap(&self, source: TapSource) -> TapOutcome {
        let now_ms = self.clock.now_ms();
        let outcome = self.detector.lock().unwrap().tap(source, now_ms);

        match outcome {
            TapOutcome::First => self.arm_timeout(),
            TapOutcome::Double => self.disarm_timeout(),
            TapOutcome::SuppressedClick => {}
        }

        outcome
    }

    pub fn is_waiting(&self) -> bool {
        self.detector.lock().unwrap().is_waiting()
    }

    /// Cancel any pending timer and forget gesture state
    pub fn reset(&self) {
        self.disarm_timeout();
        self.detector.lock().unwrap().reset();
    }

    fn arm_timeout(&self) {
        let clock = self.clock.clone();
        let detector = self.detector.clone();
        let window = self.window;

        let task = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let now_ms = clock.now_ms();
            if detector.lock().unwrap().expire(now_ms) {
                tracing::trace!("Double-tap window expired");
            }
        });

        // A new first activation supersedes any previous timer
        let mut slot = self.timeout.lock().unwrap();
        if let Some(stale) = slot.replace(task.abort_handle()) {
            stale.abort();
        }
    }

    fn disarm_timeout(&self) {
        if let Some(task) = self.timeout.lock().unwrap().take() {
            task.abort();
        }
    }
}

impl<C> Drop for GestureDriver<C>
where
    C: Clock + 'static,
{
    fn drop(&mut self) {
        if let Some(task) = self.timeout.lock().unwrap().take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::clock::ManualClock;

    #[tokio::test(start_paused = true)]
    async fn test_window_expires_without_second_tap() {
        let clock = Arc::new(ManualClock::new(0));
        let driver = GestureDriver::new(clock.clone(), Duration::from_millis(300));

        assert_eq!(driver.tap(TapSource::Click), TapOutcome::First);
        assert!(driver.is_waiting());

        clock.advance_ms(301);
        tokio::time::advance(Duration::from_millis(301)).await;
        tokio::task::yield_now().await;

        assert!(!driver.is_waiting());
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_cancels_the_timer() {
        let clock = Arc::new(ManualClock::new(0));
        let driver = GestureDriver::new(clock.clone(), Duration::from_millis(300));

        driver.tap(TapSource::Click);
        clock.advance_ms(100);
        assert_eq!(driver.tap(TapSource::Click), TapOutcome::Double);

        // Long after the canceled deadline the driver is still clean
        clock.advance_ms(10_000);
        tokio::time::advance(Duration::from_secs(10)).await;
        tokio::task::yield_now().await;

        assert!(!driver.is_waiting());
        assert_eq!(driver.tap(TapSource::Click), TapOutcome::First);
    }

    #[tokio::test(start_paused = true)]
    async fn test_superseded_timer_does_not_expire_new_window() {
        let clock = Arc::new(ManualClock::new(0));
        let driver = GestureDriver::new(clock.clone(), Duration::from_millis(300));

        driver.tap(TapSource::Click);

        // Late second tap opens a fresh window with a fresh timer
        clock.advance_ms(400);
        tokio::time::advance(Duration::from_millis(250)).await;
        assert_eq!(driver.tap(TapSource::Click), TapOutcome::First);

        // The old deadline passing must not close the new window
        tokio::time::advance(Duration::from_millis(100)).await;
        clock.advance_ms(100);
        tokio::task::yield_now().await;
        assert!(driver.is_waiting());

        clock.advance_ms(150);
        assert_eq!(driver.tap(TapSource::Click), TapOutcome::Double);
    }
}
