//! Like Engine - Client Core
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, pure services, collaborator ports
//! - `application/` - Visitor identity, cooldown tracker, like counter
//! - `infra/` - REST adapter, channel feed, in-memory authority
//!
//! ## Consistency Model
//! - The backend is the sole authority for whether a like counts; the local
//!   cooldown tracker is advisory display state only
//! - An accepted submission increments the cached count optimistically; the
//!   realtime echo of that same insertion is absorbed, not double-counted
//! - Submissions are never retried automatically (a retry could record a
//!   duplicate like)

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::config::LikeConfig;
pub use application::cooldown::CooldownTracker;
pub use application::counter::{LikeBoard, LikeCounter};
pub use application::visitor::VisitorIdentity;
pub use domain::entities::{FeaturedImage, LikeEvent};
pub use domain::value_objects::{CooldownStatus, LikeOutcome, LikeReadout, SubmitOutcome};
pub use error::{LikeError, LikeResult};
pub use infra::channel::ChannelLikeFeed;
pub use infra::http::HttpLikeApi;
pub use infra::memory::MemoryBackend;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult, OptionExt, ResultExt},
    kind::ErrorKind,
};
