//! Run simulation: the frame-stepped integrator and its state machine.
//!
//! `SimulationState` is the only mutable object in a run. The frontend calls
//! `step(dt)` once per animation frame and the transition methods from its
//! input handlers. Completely headless, so runs are reproducible in tests.

use serde::{Deserialize, Serialize};

use stopline_core::commands::{DriverCommand, Transition};
use stopline_core::constants::{KMH_PER_MPS, MAX_FRAME_DT, SAFETY_CAP_M, STOP_EPSILON_KMH};
use stopline_core::enums::{BrakeMode, DrivingPhase, PedalState, StopSeverity};
use stopline_core::result::BrakingResult;
use stopline_core::state::{RunOutcome, RunSnapshot, RunStats};
use stopline_core::types::BrakingRequest;
use stopline_model::compute_braking_distance;

use crate::kinematics::VehicleDynamics;

/// Configuration for a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// What releasing the brake button does.
    pub brake_mode: BrakeMode,
    /// Longer frames are clamped to this (s).
    pub max_frame_dt: f64,
    /// Speed at which the vehicle counts as stopped (km/h).
    pub stop_epsilon_kmh: f64,
    /// Braking distance after which the run is declared unstoppable (m).
    pub safety_cap_m: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            brake_mode: BrakeMode::default(),
            max_frame_dt: MAX_FRAME_DT,
            stop_epsilon_kmh: STOP_EPSILON_KMH,
            safety_cap_m: SAFETY_CAP_M,
        }
    }
}

/// Mutable state of one run, from standstill (or a rolling start) to the end of braking.
pub struct SimulationState {
    request: BrakingRequest,
    config: SimConfig,
    dynamics: VehicleDynamics,
    phase: DrivingPhase,
    throttle: PedalState,
    brake: PedalState,
    speed_mps: f64,
    position_m: f64,
    /// Estimate computed once at brake engagement. The integrator trusts its
    /// deceleration for the rest of the run.
    plan: Option<BrakingResult>,
    stats: RunStats,
    outcome: Option<RunOutcome>,
}

impl SimulationState {
    /// A new run at standstill.
    pub fn new(request: BrakingRequest, config: SimConfig) -> Self {
        let dynamics = VehicleDynamics::from_request(&request);
        Self {
            request,
            config,
            dynamics,
            phase: DrivingPhase::default(),
            throttle: PedalState::default(),
            brake: PedalState::default(),
            speed_mps: 0.0,
            position_m: 0.0,
            plan: None,
            stats: RunStats::default(),
            outcome: None,
        }
    }

    /// A new run already rolling at `speed_kmh`, throttle released.
    pub fn rolling_start(request: BrakingRequest, config: SimConfig, speed_kmh: f64) -> Self {
        let mut state = Self::new(request, config);
        let speed_kmh = if speed_kmh.is_finite() { speed_kmh.max(0.0) } else { 0.0 };
        state.speed_mps = speed_kmh / KMH_PER_MPS;
        state.stats.peak_speed_kmh = speed_kmh;
        state
    }

    // --- Transitions ---

    /// Apply a driver command.
    pub fn apply(&mut self, command: DriverCommand) -> Transition {
        match command {
            DriverCommand::PressThrottle => self.press_throttle(),
            DriverCommand::ReleaseThrottle => self.release_throttle(),
            DriverCommand::EngageBrake => self.engage_brake(),
            DriverCommand::ReleaseBrake => self.release_brake(),
        }
    }

    pub fn press_throttle(&mut self) -> Transition {
        if self.is_finished() || self.phase == DrivingPhase::Braking || self.throttle == PedalState::Pressed
        {
            return Transition::Ignored;
        }
        self.throttle = PedalState::Pressed;
        Transition::Applied
    }

    pub fn release_throttle(&mut self) -> Transition {
        if self.is_finished() || self.phase == DrivingPhase::Braking || self.throttle == PedalState::Released
        {
            return Transition::Ignored;
        }
        self.throttle = PedalState::Released;
        Transition::Applied
    }

    /// Commit to braking. The first engagement computes and caches the plan
    /// at the current speed; in hold-to-brake mode a later press resumes it.
    pub fn engage_brake(&mut self) -> Transition {
        if self.is_finished() {
            return Transition::Ignored;
        }
        match (self.phase, self.brake) {
            (DrivingPhase::Braking, PedalState::Pressed) => Transition::Ignored,
            (DrivingPhase::Braking, PedalState::Released) => {
                self.brake = PedalState::Pressed;
                Transition::Applied
            }
            (DrivingPhase::Accelerating, _) => {
                let plan = compute_braking_distance(&self.request.with_speed(self.speed_kmh()));
                tracing::debug!(
                    speed_kmh = self.speed_kmh(),
                    position_m = self.position_m,
                    planned_distance_m = plan.distance_m,
                    deceleration = plan.effective_deceleration_mps2,
                    "brake engaged"
                );
                self.plan = Some(plan);
                self.phase = DrivingPhase::Braking;
                self.throttle = PedalState::Released;
                self.brake = PedalState::Pressed;
                self.stats.brake_position_m = Some(self.position_m);
                self.stats.brake_speed_kmh = Some(self.speed_kmh());
                Transition::Applied
            }
        }
    }

    /// Let go of the brake. Only honoured in hold-to-brake mode.
    pub fn release_brake(&mut self) -> Transition {
        if self.is_finished()
            || self.config.brake_mode != BrakeMode::HoldToBrake
            || !matches!((self.phase, self.brake), (DrivingPhase::Braking, PedalState::Pressed))
        {
            return Transition::Ignored;
        }
        self.brake = PedalState::Released;
        Transition::Applied
    }

    // --- Integration ---

    /// Advance the run by one frame of `dt` seconds.
    ///
    /// Non-finite or negative frames are ignored and long frames are clamped,
    /// so a backgrounded tab cannot teleport the vehicle. A finished run is frozen.
    pub fn step(&mut self, dt: f64) {
        if self.is_finished() || dt.is_nan() || dt <= 0.0 {
            return;
        }
        let dt = dt.min(self.config.max_frame_dt);

        self.stats.elapsed_secs += dt;
        match self.phase {
            DrivingPhase::Accelerating => {
                self.drive_step(dt);
                self.record_peak();
            }
            DrivingPhase::Braking => {
                match self.brake {
                    PedalState::Pressed => self.brake_step(dt),
                    PedalState::Released => self.release_step(dt),
                }
                self.stats.braking_secs += dt;
                self.check_termination();
            }
        }

        tracing::trace!(
            speed_kmh = self.speed_kmh(),
            position_m = self.position_m,
            phase = ?self.phase,
            "step"
        );
    }

    /// Step with a fixed `dt` until the run ends or `max_steps` is reached.
    pub fn run_until_finished(&mut self, dt: f64, max_steps: usize) -> Option<RunOutcome> {
        for _ in 0..max_steps {
            if self.is_finished() {
                break;
            }
            self.step(dt);
        }
        self.outcome
    }

    /// Peak speed only counts the driving phase; a runaway is not a peak.
    fn record_peak(&mut self) {
        let speed_kmh = self.speed_kmh();
        if speed_kmh > self.stats.peak_speed_kmh {
            self.stats.peak_speed_kmh = speed_kmh;
            self.stats.time_to_peak_secs = self.stats.elapsed_secs;
        }
    }

    fn drive_step(&mut self, dt: f64) {
        let v = self.speed_mps;
        let next = match self.throttle {
            PedalState::Pressed => {
                let next = v + self.dynamics.throttle_accel(v) * dt;
                next.min(self.dynamics.top_speed_mps.max(v))
            }
            PedalState::Released => v - self.dynamics.coast_decel(v) * dt,
        };
        self.advance(v, next.max(0.0), dt);
    }

    /// Constant deceleration from the cached plan. A frame that would carry
    /// the speed through zero ends exactly at the closed-form stopping point.
    fn brake_step(&mut self, dt: f64) {
        let decel = self.current_brake_decel();
        let v = self.speed_mps;
        if decel > 0.0 && v <= decel * dt {
            self.position_m += v * v / (2.0 * decel);
            self.speed_mps = 0.0;
        } else {
            self.advance(v, v - decel * dt, dt);
        }
    }

    fn release_step(&mut self, dt: f64) {
        let v = self.speed_mps;
        let next = v - self.dynamics.release_decel(v) * dt;
        self.advance(v, next.max(0.0), dt);
    }

    /// Move with a linear speed change over the frame; never backwards.
    fn advance(&mut self, from: f64, to: f64, dt: f64) {
        self.speed_mps = to.max(0.0);
        self.position_m += (0.5 * (from + self.speed_mps) * dt).max(0.0);
    }

    fn check_termination(&mut self) {
        let distance_m = self.braking_distance_m();
        let plan_can_stop = self.plan.as_ref().is_some_and(|plan| plan.can_stop);
        let stopped = self.speed_kmh() <= self.config.stop_epsilon_kmh;

        let outcome = if distance_m > self.config.safety_cap_m {
            tracing::warn!(distance_m, "safety cap reached, vehicle cannot stop");
            Some(RunOutcome::CannotStop { distance_m })
        } else if stopped && (plan_can_stop || self.brake == PedalState::Released) {
            Some(RunOutcome::Stopped {
                distance_m,
                severity: StopSeverity::from_distance(distance_m),
            })
        } else if stopped && self.speed_mps == 0.0 && self.current_brake_decel() == 0.0 {
            // Balanced on the slope: it will never reach the cap.
            Some(RunOutcome::CannotStop { distance_m })
        } else {
            None
        };

        if let Some(outcome) = outcome {
            tracing::info!(
                distance_m = outcome.distance_m(),
                severity = ?outcome.severity(),
                braking_secs = self.stats.braking_secs,
                "run finished"
            );
            self.outcome = Some(outcome);
        }
    }

    fn current_brake_decel(&self) -> f64 {
        self.plan
            .as_ref()
            .map(|plan| plan.effective_deceleration_mps2)
            .unwrap_or(0.0)
    }

    // --- Accessors ---

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            phase: self.phase,
            throttle: self.throttle,
            brake: self.brake,
            speed_kmh: self.speed_kmh(),
            position_m: self.position_m,
            braking_distance_m: self.braking_distance_m(),
            planned_distance_m: self
                .plan
                .as_ref()
                .filter(|plan| plan.can_stop)
                .map(|plan| plan.distance_m),
            stats: self.stats,
            outcome: self.outcome,
        }
    }

    pub fn phase(&self) -> DrivingPhase {
        self.phase
    }

    pub fn throttle(&self) -> PedalState {
        self.throttle
    }

    pub fn brake(&self) -> PedalState {
        self.brake
    }

    pub fn speed_kmh(&self) -> f64 {
        self.speed_mps * KMH_PER_MPS
    }

    pub fn position_m(&self) -> f64 {
        self.position_m
    }

    /// Distance covered since the brake was engaged; zero before that.
    pub fn braking_distance_m(&self) -> f64 {
        self.stats
            .brake_position_m
            .map(|start| self.position_m - start)
            .unwrap_or(0.0)
    }

    /// The cached estimate, once the brake has been engaged.
    pub fn plan(&self) -> Option<&BrakingResult> {
        self.plan.as_ref()
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn request(&self) -> &BrakingRequest {
        &self.request
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}
