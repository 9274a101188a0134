//! Infrastructure Layer - Port Implementations
//!
//! - `http`: REST adapter for the managed backend
//! - `channel`: in-process realtime feed hub
//! - `memory`: in-memory authoritative double for tests and development

pub mod channel;
pub mod http;
pub mod memory;
