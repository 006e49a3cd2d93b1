//! Run snapshot sent to the renderer every frame.

use serde::{Deserialize, Serialize};

use crate::enums::{DrivingPhase, PedalState, StopSeverity};

/// Running statistics for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub elapsed_secs: f64,
    /// Highest speed before braking.
    pub peak_speed_kmh: f64,
    /// Elapsed time when peak speed was reached.
    pub time_to_peak_secs: f64,
    /// Position where the brake was engaged. `None` until then.
    pub brake_position_m: Option<f64>,
    /// Speed when the brake was engaged.
    pub brake_speed_kmh: Option<f64>,
    pub braking_secs: f64,
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RunOutcome {
    Stopped {
        distance_m: f64,
        severity: StopSeverity,
    },
    /// Braking never brought the vehicle to rest within the safety cap.
    CannotStop { distance_m: f64 },
}

impl RunOutcome {
    pub fn distance_m(&self) -> f64 {
        match *self {
            Self::Stopped { distance_m, .. } | Self::CannotStop { distance_m } => distance_m,
        }
    }

    pub fn severity(&self) -> StopSeverity {
        match *self {
            Self::Stopped { severity, .. } => severity,
            Self::CannotStop { .. } => StopSeverity::CannotStop,
        }
    }
}

/// Complete per-frame view of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSnapshot {
    pub phase: DrivingPhase,
    pub throttle: PedalState,
    pub brake: PedalState,
    pub speed_kmh: f64,
    pub position_m: f64,
    /// Distance covered since the brake was engaged.
    pub braking_distance_m: f64,
    /// Closed-form stopping distance planned at brake engagement.
    /// `None` before braking or when the plan cannot stop.
    pub planned_distance_m: Option<f64>,
    pub stats: RunStats,
    pub outcome: Option<RunOutcome>,
}
