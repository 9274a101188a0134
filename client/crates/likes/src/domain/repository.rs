//! Collaborator Ports
//!
//! Interfaces to the external managed backend. Implementations are in the
//! infrastructure layer.

use crate::domain::entities::{FeaturedImage, LikeEvent};
use crate::domain::value_objects::SubmitOutcome;
use crate::error::LikeResult;
use kernel::id::{ImageId, VisitorId};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// Authoritative backend operations
#[trait_variant::make(LikeApi: Send)]
pub trait LocalLikeApi {
    /// Atomically check the cooldown and record a like for (image, visitor)
    ///
    /// Exactly one request per call; never retried here, since a retry
    /// could record a duplicate like.
    async fn submit_like(
        &self,
        image_id: ImageId,
        visitor_id: VisitorId,
    ) -> LikeResult<SubmitOutcome>;

    /// Current like count for one image
    async fn like_count(&self, image_id: ImageId) -> LikeResult<u64>;

    /// Like count across all images
    async fn total_likes(&self) -> LikeResult<u64>;

    /// The currently curated item, if any
    async fn featured_image(&self) -> LikeResult<Option<FeaturedImage>>;
}

/// Realtime insertion stream
#[trait_variant::make(LikeFeed: Send)]
pub trait LocalLikeFeed {
    /// Open a push subscription for insertion events on one image
    async fn subscribe(&self, image_id: ImageId) -> LikeResult<LikeSubscription>;
}

/// Handle for one open feed subscription
///
/// Transport-independent: the feed implementation forwards its events into
/// the channel and is torn down through the abort handle.
pub struct LikeSubscription {
    events: mpsc::Receiver<LikeEvent>,
    forwarder: Option<AbortHandle>,
}

impl LikeSubscription {
    pub fn new(events: mpsc::Receiver<LikeEvent>, forwarder: Option<AbortHandle>) -> Self {
        Self { events, forwarder }
    }

    /// Next insertion event; `None` once the subscription is closed
    pub async fn next_event(&mut self) -> Option<LikeEvent> {
        self.events.recv().await
    }

    /// Stop the stream. Idempotent; no buffered events are delivered after.
    pub fn release(&mut self) {
        if let Some(forwarder) = self.forwarder.take() {
            forwarder.abort();
        }
        self.events.close();
    }
}

impl Drop for LikeSubscription {
    fn drop(&mut self) {
        self.release();
    }
}
