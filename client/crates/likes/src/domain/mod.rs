//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (LikeEvent, FeaturedImage)
//! - Domain value objects (SubmitOutcome, LikeOutcome, cooldown status)
//! - Domain services (cooldown arithmetic, countdown formatting)
//! - Collaborator ports (backend API, realtime feed)
//! - Character unlock rules

pub mod entities;
pub mod repository;
pub mod services;
pub mod unlock;
pub mod value_objects;
