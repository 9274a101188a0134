//! Domain Value Objects
//!
//! Immutable value types for the like domain.

/// Outcome of one authoritative like submission
///
/// Built only by the adapters that parse the raw backend payload; the rest
/// of the engine works with this tag, never with raw JSON fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The like was recorded; the count should increment
    Accepted,
    /// The cooldown window is still active
    Throttled { remaining_seconds: u32 },
}

/// Result of a full `like()` call as seen by the presentation layer
///
/// Every submission resolves to one of these; transport faults are folded
/// into `Failed` so the caller never has to catch anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LikeOutcome {
    /// Recorded and optimistically counted
    Accepted { count: u64 },
    /// Rejected by the authoritative cooldown; count unchanged
    CoolingDown { remaining_seconds: u32 },
    /// Transport or backend fault; count and cooldown state unchanged
    Failed { reason: String },
}

impl LikeOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, LikeOutcome::Accepted { .. })
    }

    /// Remaining cooldown, present only on rejection
    pub fn remaining_seconds(&self) -> Option<u32> {
        match self {
            LikeOutcome::CoolingDown { remaining_seconds } => Some(*remaining_seconds),
            _ => None,
        }
    }
}

/// Like-state readout for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeReadout {
    pub count: u64,
    pub is_loading: bool,
}

/// Advisory cooldown check result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownStatus {
    pub eligible: bool,
    pub remaining_ms: i64,
    /// Absolute time the window closes; `None` when no like was recorded yet
    pub reset_at_ms: Option<i64>,
}
