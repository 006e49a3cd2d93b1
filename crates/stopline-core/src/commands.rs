//! Driver inputs sent from the frontend to a run.

use serde::{Deserialize, Serialize};

/// All possible driver actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DriverCommand {
    PressThrottle,
    ReleaseThrottle,
    /// Commit to braking. One-way: the run never returns to accelerating.
    EngageBrake,
    /// Only honoured in hold-to-brake mode.
    ReleaseBrake,
}

/// Whether a command changed the run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[must_use]
pub enum Transition {
    Applied,
    /// Not valid in the current phase; nothing changed.
    Ignored,
}

impl Transition {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}
