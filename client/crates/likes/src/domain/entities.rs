//! Domain Entities

use kernel::id::{ImageId, VisitorId};
use serde::Deserialize;

/// Notification that a like record for an image was persisted
///
/// Pushed by the realtime feed. The visitor id is carried so the counter
/// can tell its own echoes apart from other visitors' likes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeEvent {
    pub image_id: ImageId,
    pub visitor_id: VisitorId,
}

/// The one curated item the home page shows
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FeaturedImage {
    pub id: ImageId,
    pub url: String,
    pub title: Option<String>,
    #[serde(default)]
    pub is_ai_generated: bool,
}

impl FeaturedImage {
    /// Display title, falling back to a generic label for untitled items
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("(untitled)")
    }
}
