//! Visitor Identity
//!
//! A stable per-profile pseudo-identifier keying the cooldown and the
//! analytics rows. Generated once, persisted, never regenerated while the
//! stored value stays intact.

use crate::application::config::LikeConfig;
use kernel::id::VisitorId;
use platform::storage::KvStore;
use rand::{RngCore, TryRngCore, rngs::OsRng};
use std::sync::Arc;

pub struct VisitorIdentity<K>
where
    K: KvStore,
{
    store: Arc<K>,
    config: Arc<LikeConfig>,
}

impl<K> VisitorIdentity<K>
where
    K: KvStore,
{
    pub fn new(store: Arc<K>, config: Arc<LikeConfig>) -> Self {
        Self { store, config }
    }

    /// Return the persisted visitor id, creating one on first use
    pub fn get_or_create(&self) -> VisitorId {
        if let Some(raw) = self.store.get(&self.config.visitor_key) {
            match raw.parse::<VisitorId>() {
                Ok(id) => return id,
                Err(e) => {
                    tracing::warn!(error = %e, "Stored visitor id is not a UUID, replacing");
                }
            }
        }

        let id = generate_visitor_id();
        self.store.set(&self.config.visitor_key, &id.to_string());
        tracing::info!(visitor_id = %id, "New visitor id created");
        id
    }
}

/// Generate a fresh visitor id
///
/// The OS generator can be unavailable in constrained environments;
/// the thread-local generator then stands in so identity creation can
/// never block the like flow.
fn generate_visitor_id() -> VisitorId {
    let mut bytes = [0u8; 16];
    if OsRng.try_fill_bytes(&mut bytes).is_err() {
        rand::rng().fill_bytes(&mut bytes);
    }
    VisitorId::from_uuid(uuid::Builder::from_random_bytes(bytes).into_uuid())
}
