//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Client-local key-value storage (in-memory and file-backed)
//! - Time sources (system clock, manual clock for deterministic tests)

pub mod clock;
pub mod storage;
