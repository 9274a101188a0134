//! Gesture Crate - Double-Tap Recognition and Like Feedback
//!
//! - `recognizer` - pure double-tap state machine with injected timestamps
//! - `driver` - async wrapper that owns the timeout scheduling
//! - `animation` - fixed-duration, cancelable success feedback timer
//!
//! The recognizer collapses raw touch and click events into one logical
//! double activation per physical gesture. The presentation layer wires the
//! double activation to the like flow and plays the animation on success.

pub mod animation;
pub mod driver;
pub mod recognizer;

// Re-exports for convenience
pub use animation::{AnimationHandle, AnimationTimer};
pub use driver::GestureDriver;
pub use recognizer::{DoubleTapDetector, TapOutcome, TapSource};
