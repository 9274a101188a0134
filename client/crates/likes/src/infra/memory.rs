//! In-Memory Authoritative Double
//!
//! Mirrors the backend procedure the client talks to in production:
//! cooldown check and like insert happen under one lock, so two racing
//! submissions from the same visitor can never both be accepted. Used by
//! the test suite and the development mode of the binary. The production
//! rate limiter stays on the managed backend.

use crate::application::config::LikeConfig;
use crate::domain::entities::{FeaturedImage, LikeEvent};
use crate::domain::repository::LikeApi;
use crate::domain::services::{ceil_remaining_seconds, remaining_cooldown_ms};
use crate::domain::value_objects::SubmitOutcome;
use crate::error::LikeResult;
use crate::infra::channel::ChannelLikeFeed;
use kernel::id::{ImageId, VisitorId};
use platform::clock::Clock;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy)]
struct LikeRecord {
    image_id: ImageId,
    #[allow(dead_code)]
    visitor_id: VisitorId,
    #[allow(dead_code)]
    created_at_ms: i64,
}

#[derive(Default)]
struct BackendState {
    likes: Vec<LikeRecord>,
    last_like_ms: HashMap<VisitorId, i64>,
    featured: Option<FeaturedImage>,
}

pub struct MemoryBackend<C>
where
    C: Clock,
{
    clock: Arc<C>,
    cooldown_ms: i64,
    state: Mutex<BackendState>,
    feed: Option<ChannelLikeFeed>,
}

impl<C> MemoryBackend<C>
where
    C: Clock,
{
    pub fn new(clock: Arc<C>, config: &LikeConfig) -> Self {
        Self {
            clock,
            cooldown_ms: config.cooldown_ms(),
            state: Mutex::new(BackendState::default()),
            feed: None,
        }
    }

    /// Publish an insertion event for every accepted like
    pub fn with_feed(mut self, feed: ChannelLikeFeed) -> Self {
        self.feed = Some(feed);
        self
    }

    pub fn set_featured(&self, image: FeaturedImage) {
        self.state.lock().unwrap().featured = Some(image);
    }

    /// Insert `count` synthetic likes from distinct visitors, no events
    pub fn seed_likes(&self, image_id: ImageId, count: u64) {
        let now = self.clock.now_ms();
        let mut state = self.state.lock().unwrap();
        for _ in 0..count {
            state.likes.push(LikeRecord {
                image_id,
                visitor_id: VisitorId::new(),
                created_at_ms: now,
            });
        }
    }
}

impl<C> LikeApi for MemoryBackend<C>
where
    C: Clock + 'static,
{
    async fn submit_like(
        &self,
        image_id: ImageId,
        visitor_id: VisitorId,
    ) -> LikeResult<SubmitOutcome> {
        let now = self.clock.now_ms();

        // Check-and-record is atomic under the state lock
        let event = {
            let mut state = self.state.lock().unwrap();

            if let Some(last) = state.last_like_ms.get(&visitor_id) {
                let remaining = remaining_cooldown_ms(now, *last, self.cooldown_ms);
                if remaining > 0 {
                    return Ok(SubmitOutcome::Throttled {
                        remaining_seconds: ceil_remaining_seconds(remaining),
                    });
                }
            }

            state.last_like_ms.insert(visitor_id, now);
            state.likes.push(LikeRecord {
                image_id,
                visitor_id,
                created_at_ms: now,
            });

            LikeEvent {
                image_id,
                visitor_id,
            }
        };

        if let Some(feed) = &self.feed {
            feed.publish(event);
        }

        Ok(SubmitOutcome::Accepted)
    }

    async fn like_count(&self, image_id: ImageId) -> LikeResult<u64> {
        let state = self.state.lock().unwrap();
        Ok(state
            .likes
            .iter()
            .filter(|r| r.image_id == image_id)
            .count() as u64)
    }

    async fn total_likes(&self) -> LikeResult<u64> {
        Ok(self.state.lock().unwrap().likes.len() as u64)
    }

    async fn featured_image(&self) -> LikeResult<Option<FeaturedImage>> {
        Ok(self.state.lock().unwrap().featured.clone())
    }
}
