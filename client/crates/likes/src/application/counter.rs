//! Like Counter
//!
//! Owns the displayed like count for one image: initial authoritative
//! fetch, optimistic increment on an accepted submission, and folding of
//! realtime insertion events. The optimistic increment and the realtime
//! echo of the same insertion are not ordered relative to each other, so
//! each accepted own submission arms a pending-echo slot and the event
//! drain consumes at most that many own events without counting them.

use crate::domain::repository::{LikeApi, LikeFeed, LikeSubscription};
use crate::domain::value_objects::{LikeOutcome, LikeReadout, SubmitOutcome};
use kernel::id::{ImageId, VisitorId};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use tokio::sync::watch;
use tokio::task::AbortHandle;

/// Factory for per-image boards
pub struct LikeCounter<A, F>
where
    A: LikeApi + Send + Sync + 'static,
    F: LikeFeed + Send + Sync + 'static,
{
    api: Arc<A>,
    feed: Arc<F>,
}

struct BoardInner {
    image_id: ImageId,
    visitor_id: VisitorId,
    readout: watch::Sender<LikeReadout>,
    pending_echoes: AtomicU32,
    released: AtomicBool,
}

/// Attached per-image count, live until released or dropped
pub struct LikeBoard<A>
where
    A: LikeApi + Send + Sync + 'static,
{
    api: Arc<A>,
    inner: Arc<BoardInner>,
    readout_rx: watch::Receiver<LikeReadout>,
    initial_count: u64,
    drain: Option<AbortHandle>,
}

impl<A, F> LikeCounter<A, F>
where
    A: LikeApi + Send + Sync + 'static,
    F: LikeFeed + Send + Sync + 'static,
{
    pub fn new(api: Arc<A>, feed: Arc<F>) -> Self {
        Self { api, feed }
    }

    /// Fetch the current count and open the filtered insertion stream
    ///
    /// Fetch failure falls back to a count of 0 and is not retried here.
    /// Subscription failure leaves the board functional without live
    /// updates; reconnecting is the transport's responsibility.
    pub async fn attach(&self, image_id: ImageId, visitor_id: VisitorId) -> LikeBoard<A> {
        let initial_count = match self.api.like_count(image_id).await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!(
                    image_id = %image_id,
                    error = %e,
                    "Initial like count fetch failed, showing 0"
                );
                0
            }
        };

        let (readout_tx, readout_rx) = watch::channel(LikeReadout {
            count: initial_count,
            is_loading: false,
        });

        let inner = Arc::new(BoardInner {
            image_id,
            visitor_id,
            readout: readout_tx,
            pending_echoes: AtomicU32::new(0),
            released: AtomicBool::new(false),
        });

        let drain = match self.feed.subscribe(image_id).await {
            Ok(subscription) => {
                let task = tokio::spawn(drain_events(subscription, inner.clone()));
                Some(task.abort_handle())
            }
            Err(e) => {
                tracing::warn!(
                    image_id = %image_id,
                    error = %e,
                    "Realtime subscription failed, live updates disabled"
                );
                None
            }
        };

        tracing::info!(image_id = %image_id, count = initial_count, "Like board attached");

        LikeBoard {
            api: self.api.clone(),
            inner,
            readout_rx,
            initial_count,
            drain,
        }
    }
}

/// Fold inbound insertion events into the cached count
async fn drain_events(mut subscription: LikeSubscription, inner: Arc<BoardInner>) {
    while let Some(event) = subscription.next_event().await {
        // The feed already filters by image id; this guards against a
        // transport that does not.
        if event.image_id != inner.image_id {
            continue;
        }

        if event.visitor_id == inner.visitor_id {
            let consumed = inner
                .pending_echoes
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if consumed {
                // Echo of an own submission already counted optimistically
                tracing::debug!(image_id = %inner.image_id, "Own like echo absorbed");
                continue;
            }
        }

        inner.readout.send_modify(|r| r.count += 1);
    }
}

impl<A> LikeBoard<A>
where
    A: LikeApi + Send + Sync + 'static,
{
    pub fn image_id(&self) -> ImageId {
        self.inner.image_id
    }

    /// Count observed when the board was attached
    pub fn initial_count(&self) -> u64 {
        self.initial_count
    }

    pub fn count(&self) -> u64 {
        self.readout_rx.borrow().count
    }

    /// Current readout snapshot
    pub fn readout(&self) -> LikeReadout {
        *self.readout_rx.borrow()
    }

    /// Receiver that observes every count change
    pub fn watch(&self) -> watch::Receiver<LikeReadout> {
        self.readout_rx.clone()
    }

    /// Submit a like for this board's image as the attached visitor
    ///
    /// On acceptance the cached count is incremented before returning.
    /// Rejection and failure leave the count untouched.
    pub async fn like(&self) -> LikeOutcome {
        match self
            .api
            .submit_like(self.inner.image_id, self.inner.visitor_id)
            .await
        {
            Ok(SubmitOutcome::Accepted) => {
                self.inner.pending_echoes.fetch_add(1, Ordering::SeqCst);
                let mut count = 0;
                self.inner.readout.send_modify(|r| {
                    r.count += 1;
                    count = r.count;
                });
                tracing::info!(image_id = %self.inner.image_id, count, "Like accepted");
                LikeOutcome::Accepted { count }
            }
            Ok(SubmitOutcome::Throttled { remaining_seconds }) => {
                tracing::debug!(
                    image_id = %self.inner.image_id,
                    remaining_seconds,
                    "Like rejected, cooldown active"
                );
                LikeOutcome::CoolingDown { remaining_seconds }
            }
            Err(e) => {
                e.log();
                LikeOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Release the subscription. Idempotent; no events are folded after.
    pub fn release(&self) {
        if self.inner.released.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Some(drain) = &self.drain {
            drain.abort();
        }
        tracing::debug!(image_id = %self.inner.image_id, "Like board released");
    }
}

impl<A> Drop for LikeBoard<A>
where
    A: LikeApi + Send + Sync + 'static,
{
    fn drop(&mut self) {
        self.release();
    }
}
