//! In-Process Like Feed
//!
//! A broadcast hub standing in for the managed realtime channel. Each
//! subscription gets its own forwarder task that filters by image id, the
//! same filtering the real transport applies server-side.

use crate::domain::entities::LikeEvent;
use crate::domain::repository::{LikeFeed, LikeSubscription};
use crate::error::LikeResult;
use kernel::id::ImageId;
use tokio::sync::{broadcast, mpsc};

const HUB_CAPACITY: usize = 256;
const SUBSCRIPTION_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct ChannelLikeFeed {
    hub: broadcast::Sender<LikeEvent>,
}

impl ChannelLikeFeed {
    pub fn new() -> Self {
        let (hub, _) = broadcast::channel(HUB_CAPACITY);
        Self { hub }
    }

    /// Fan an insertion event out to every open subscription
    pub fn publish(&self, event: LikeEvent) {
        // A send error only means nobody is subscribed right now
        let _ = self.hub.send(event);
    }
}

impl Default for ChannelLikeFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl LikeFeed for ChannelLikeFeed {
    async fn subscribe(&self, image_id: ImageId) -> LikeResult<LikeSubscription> {
        let mut hub_rx = self.hub.subscribe();
        let (tx, rx) = mpsc::channel(SUBSCRIPTION_CAPACITY);

        let forwarder = tokio::spawn(async move {
            loop {
                match hub_rx.recv().await {
                    Ok(event) if event.image_id == image_id => {
                        if tx.send(event).await.is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        tracing::warn!(missed, "Like feed lagged, events dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        Ok(LikeSubscription::new(rx, Some(forwarder.abort_handle())))
    }
}
