//! Application Configuration

use std::time::Duration;

/// Like engine configuration
#[derive(Debug, Clone)]
pub struct LikeConfig {
    /// Cooldown window after a successful like
    pub cooldown: Duration,
    /// Storage key for the persisted visitor id
    pub visitor_key: String,
    /// Storage key for the last successful like timestamp
    pub last_like_key: String,
}

impl Default for LikeConfig {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_secs(10 * 60),
            visitor_key: "coop_visitor_id".to_string(),
            last_like_key: "coop_last_like".to_string(),
        }
    }
}

impl LikeConfig {
    pub fn cooldown_ms(&self) -> i64 {
        self.cooldown.as_millis() as i64
    }
}
