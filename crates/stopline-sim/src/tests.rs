//! Tests for the run integrator, driver transitions, scenarios and config loading.

use approx::assert_relative_eq;

use stopline_core::commands::{DriverCommand, Transition};
use stopline_core::constants::MAX_FRAME_DT;
use stopline_core::enums::*;
use stopline_core::state::{RunOutcome, RunSnapshot};
use stopline_core::types::{BrakingRequest, Trailer};
use stopline_model::compute_braking_distance;

use crate::config::{load_sim_config, parse_request, parse_sim_config, ConfigError};
use crate::engine::{SimConfig, SimulationState};
use crate::scenario::{challenge_from_seed, scenario_request};

const FRAME: f64 = 1.0 / 60.0;
const MAX_STEPS: usize = 200_000;

fn rolling(request: BrakingRequest, speed_kmh: f64) -> SimulationState {
    SimulationState::rolling_start(request, SimConfig::default(), speed_kmh)
}

fn hold_mode() -> SimConfig {
    SimConfig {
        brake_mode: BrakeMode::HoldToBrake,
        ..Default::default()
    }
}

// ---- Integrator against the closed form ----

#[test]
fn test_braking_run_matches_closed_form() {
    let request = BrakingRequest::default();
    let mut state = rolling(request.clone(), 100.0);
    assert!(state.engage_brake().is_applied());

    let outcome = state.run_until_finished(FRAME, MAX_STEPS).unwrap();
    let expected = compute_braking_distance(&request).distance_m;
    assert!(matches!(outcome, RunOutcome::Stopped { .. }));
    assert_relative_eq!(outcome.distance_m(), expected, max_relative = 0.01);
    assert_relative_eq!(state.braking_distance_m(), outcome.distance_m());
}

#[test]
fn test_braking_run_matches_closed_form_in_rain() {
    let request = scenario_request(ScenarioId::WornTyresInRain);
    let mut state = rolling(request.clone(), request.speed_kmh);
    let _ = state.engage_brake();

    let outcome = state.run_until_finished(0.1, MAX_STEPS).unwrap();
    let expected = compute_braking_distance(&request).distance_m;
    assert_relative_eq!(outcome.distance_m(), expected, max_relative = 0.01);
    assert_eq!(outcome.severity(), StopSeverity::Normal);
}

#[test]
fn test_accelerate_then_brake_matches_plan() {
    let mut state = SimulationState::new(BrakingRequest::default(), SimConfig::default());
    let _ = state.press_throttle();
    for _ in 0..360 {
        state.step(FRAME);
    }
    let engage_speed = state.speed_kmh();
    assert!(engage_speed > 30.0, "barely moved: {engage_speed}");

    let _ = state.engage_brake();
    let planned = state.plan().unwrap().distance_m;
    let outcome = state.run_until_finished(FRAME, MAX_STEPS).unwrap();
    assert_relative_eq!(outcome.distance_m(), planned, max_relative = 0.01);
    assert!(state.stats().peak_speed_kmh >= engage_speed);
    assert!(state.stats().braking_secs > 0.0);
}

#[test]
fn test_brake_at_standstill_stops_immediately() {
    let mut state = SimulationState::new(BrakingRequest::default(), SimConfig::default());
    let _ = state.engage_brake();
    state.step(FRAME);
    let outcome = state.outcome().unwrap();
    assert_eq!(outcome.distance_m(), 0.0);
    assert_eq!(outcome.severity(), StopSeverity::Normal);
}

#[test]
fn test_icy_descent_hits_safety_cap() {
    let request = scenario_request(ScenarioId::IcyDescent);
    let mut state = rolling(request.clone(), request.speed_kmh);
    let _ = state.engage_brake();
    assert!(!state.plan().unwrap().can_stop);

    let outcome = state.run_until_finished(MAX_FRAME_DT, MAX_STEPS).unwrap();
    assert!(matches!(outcome, RunOutcome::CannotStop { .. }));
    assert!(outcome.distance_m() > SimConfig::default().safety_cap_m);
    assert_eq!(outcome.severity(), StopSeverity::CannotStop);
    assert!(state.snapshot().planned_distance_m.is_none());
}

#[test]
fn test_runaway_faster_with_worse_braking() {
    let icy = scenario_request(ScenarioId::IcyDescent);
    let runaway_speed = |request: BrakingRequest| {
        let mut state = rolling(request, 50.0);
        let _ = state.engage_brake();
        for _ in 0..600 {
            state.step(FRAME);
        }
        state.speed_kmh()
    };

    let solo = runaway_speed(icy.clone());
    let grippier = runaway_speed(BrakingRequest {
        terrain: TerrainCategory::Winter,
        ..icy.clone()
    });
    let unbraked = runaway_speed(BrakingRequest {
        trailer: Trailer::typical(TrailerType::Unbraked),
        ..icy
    });
    assert!(solo > 50.0);
    assert!(grippier < solo, "better grip ran away faster: {grippier} vs {solo}");
    assert!(unbraked > solo, "unbraked trailer ran away slower: {unbraked} vs {solo}");
}

#[test]
fn test_runaway_is_not_a_peak_speed() {
    let request = scenario_request(ScenarioId::IcyDescent);
    let mut state = rolling(request, 50.0);
    let _ = state.engage_brake();
    let _ = state.run_until_finished(MAX_FRAME_DT, MAX_STEPS);
    assert!(state.speed_kmh() > 50.0);
    assert_eq!(state.stats().peak_speed_kmh, 50.0);
    assert_relative_eq!(state.stats().brake_speed_kmh.unwrap(), 50.0, epsilon = 1e-9);
}

// ---- Driving phase ----

#[test]
fn test_throttle_accelerates_and_release_coasts() {
    let mut state = SimulationState::new(BrakingRequest::default(), SimConfig::default());
    state.step(FRAME);
    assert_eq!(state.speed_kmh(), 0.0, "no throttle, no motion");

    let _ = state.press_throttle();
    for _ in 0..120 {
        state.step(FRAME);
    }
    let after_throttle = state.speed_kmh();
    assert!(after_throttle > 0.0);
    assert!(state.position_m() > 0.0);

    let _ = state.release_throttle();
    for _ in 0..60 {
        state.step(FRAME);
    }
    assert!(state.speed_kmh() < after_throttle);
    assert_eq!(state.phase(), DrivingPhase::Accelerating);
}

#[test]
fn test_brake_hardware_does_not_limit_launch() {
    let launch = |request: BrakingRequest| {
        let mut state = SimulationState::new(request, SimConfig::default());
        let _ = state.press_throttle();
        for _ in 0..300 {
            state.step(FRAME);
        }
        state.speed_kmh()
    };
    let fresh = launch(BrakingRequest::default());
    let cooked = launch(BrakingRequest {
        brake_fade: 10.0,
        abs: false,
        ..Default::default()
    });
    assert!(fresh > 50.0);
    assert_eq!(cooked, fresh);
}

#[test]
fn test_speed_never_exceeds_top_speed() {
    let mut state = SimulationState::new(BrakingRequest::default(), SimConfig::default());
    let _ = state.press_throttle();
    for _ in 0..2_000 {
        state.step(MAX_FRAME_DT);
    }
    let top = stopline_core::tables::vehicle_profile(VehicleClass::Sedan).top_speed_kmh;
    assert!(state.speed_kmh() <= top + 1e-9);
    assert!(state.stats().peak_speed_kmh <= top + 1e-9);
}

#[test]
fn test_position_never_decreases() {
    let mut state = rolling(BrakingRequest::default(), 60.0);
    let mut last = state.position_m();
    for i in 0..600 {
        if i == 200 {
            let _ = state.engage_brake();
        }
        state.step(FRAME);
        assert!(state.position_m() >= last);
        assert!(state.speed_kmh() >= 0.0);
        last = state.position_m();
    }
}

// ---- Transitions ----

#[test]
fn test_invalid_transitions_ignored() {
    let mut state = SimulationState::new(BrakingRequest::default(), SimConfig::default());
    assert_eq!(state.release_throttle(), Transition::Ignored);
    assert_eq!(state.release_brake(), Transition::Ignored);
    assert_eq!(state.press_throttle(), Transition::Applied);
    assert_eq!(state.press_throttle(), Transition::Ignored);

    assert_eq!(state.engage_brake(), Transition::Applied);
    assert_eq!(state.throttle(), PedalState::Released);
    assert_eq!(state.brake(), PedalState::Pressed);
    assert_eq!(state.engage_brake(), Transition::Ignored);
    assert_eq!(state.press_throttle(), Transition::Ignored);
    assert_eq!(state.release_throttle(), Transition::Ignored);
    assert_eq!(state.phase(), DrivingPhase::Braking);
}

#[test]
fn test_apply_dispatches_commands() {
    let mut state = rolling(BrakingRequest::default(), 50.0);
    assert!(state.apply(DriverCommand::PressThrottle).is_applied());
    assert!(state.apply(DriverCommand::EngageBrake).is_applied());
    assert!(!state.apply(DriverCommand::ReleaseBrake).is_applied());
    assert!(!state.apply(DriverCommand::PressThrottle).is_applied());
}

#[test]
fn test_commit_mode_ignores_brake_release() {
    let mut state = rolling(BrakingRequest::default(), 80.0);
    let _ = state.engage_brake();
    assert_eq!(state.release_brake(), Transition::Ignored);
    assert_eq!(state.brake(), PedalState::Pressed);
}

#[test]
fn test_finished_run_is_frozen() {
    let mut state = rolling(BrakingRequest::default(), 50.0);
    let _ = state.engage_brake();
    let outcome = state.run_until_finished(FRAME, MAX_STEPS).unwrap();
    let before = state.snapshot();

    state.step(FRAME);
    assert_eq!(state.snapshot(), before);
    assert_eq!(state.outcome(), Some(outcome));
    assert_eq!(state.apply(DriverCommand::PressThrottle), Transition::Ignored);
    assert_eq!(state.apply(DriverCommand::EngageBrake), Transition::Ignored);
}

// ---- Hold-to-brake ----

#[test]
fn test_hold_mode_release_lengthens_stop() {
    let request = BrakingRequest::default();
    let mut state = SimulationState::rolling_start(request.clone(), hold_mode(), 100.0);
    let _ = state.engage_brake();
    for _ in 0..30 {
        state.step(FRAME);
    }
    assert_eq!(state.release_brake(), Transition::Applied);
    assert_eq!(state.brake(), PedalState::Released);
    for _ in 0..60 {
        state.step(FRAME);
    }
    assert_eq!(state.engage_brake(), Transition::Applied);

    let outcome = state.run_until_finished(FRAME, MAX_STEPS).unwrap();
    let closed_form = compute_braking_distance(&request).distance_m;
    assert!(outcome.distance_m() > closed_form);
}

#[test]
fn test_hold_mode_coasts_to_rest_without_brake() {
    let mut state = SimulationState::rolling_start(BrakingRequest::default(), hold_mode(), 20.0);
    let _ = state.engage_brake();
    let _ = state.release_brake();

    let outcome = state.run_until_finished(FRAME, MAX_STEPS).unwrap();
    assert!(matches!(outcome, RunOutcome::Stopped { .. }));
    assert!(outcome.distance_m() > state.plan().unwrap().distance_m);
    assert_eq!(state.brake(), PedalState::Released);
}

// ---- Frame timing ----

#[test]
fn test_degenerate_frames_are_ignored() {
    let mut state = rolling(BrakingRequest::default(), 50.0);
    let before = state.snapshot();
    state.step(0.0);
    state.step(-1.0);
    state.step(f64::NAN);
    assert_eq!(state.snapshot(), before);
}

#[test]
fn test_long_frame_is_clamped() {
    let mut state = rolling(BrakingRequest::default(), 50.0);
    state.step(5.0);
    assert_relative_eq!(state.stats().elapsed_secs, MAX_FRAME_DT);
    state.step(f64::INFINITY);
    assert_relative_eq!(state.stats().elapsed_secs, 2.0 * MAX_FRAME_DT);
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let run = |seed| {
        let request = challenge_from_seed(seed);
        let mut state = SimulationState::new(request, SimConfig::default());
        let _ = state.press_throttle();
        let mut snapshots = Vec::new();
        for i in 0..600 {
            if i == 300 {
                let _ = state.engage_brake();
            }
            state.step(FRAME);
            snapshots.push(serde_json::to_string(&state.snapshot()).unwrap());
        }
        snapshots
    };
    assert_eq!(run(12345), run(12345), "snapshots diverged with same seed");
}

#[test]
fn test_challenge_seeds_differ() {
    assert_eq!(challenge_from_seed(7), challenge_from_seed(7));
    assert_ne!(challenge_from_seed(111), challenge_from_seed(222));
}

#[test]
fn test_challenges_stay_in_range() {
    for seed in 0..200 {
        let request = challenge_from_seed(seed);
        assert!((30.0..130.0).contains(&request.speed_kmh));
        assert!((1.6..8.0).contains(&request.tread_depth_mm));
        assert!((-6.0..6.0).contains(&request.slope_deg));
        let result = compute_braking_distance(&request);
        assert!(!result.effective_friction.is_nan());
        assert!(!result.distance_m.is_nan());
    }
}

// ---- Scenarios ----

#[test]
fn test_baseline_is_default_request() {
    assert_eq!(scenario_request(ScenarioId::BaselineDry), BrakingRequest::default());
}

#[test]
fn test_worn_tyres_in_rain_far_longer_than_dry() {
    let dry = compute_braking_distance(&scenario_request(ScenarioId::BaselineDry));
    let worn = compute_braking_distance(&scenario_request(ScenarioId::WornTyresInRain));
    assert!(worn.distance_m > 3.0 * dry.distance_m);
}

#[test]
fn test_motorway_rain_longer_than_dry() {
    let dry = compute_braking_distance(&scenario_request(ScenarioId::BaselineDry));
    let rain = compute_braking_distance(&scenario_request(ScenarioId::MotorwayRain));
    assert!(rain.can_stop);
    assert!(rain.distance_m > dry.distance_m);
}

#[test]
fn test_icy_descent_cannot_stop() {
    let result = compute_braking_distance(&scenario_request(ScenarioId::IcyDescent));
    assert!(!result.can_stop);
    assert!(result.distance_m.is_infinite());
}

#[test]
fn test_caravan_lengthens_stop() {
    let towing = scenario_request(ScenarioId::CaravanHoliday);
    let solo = BrakingRequest {
        trailer: Trailer::default(),
        ..towing.clone()
    };
    let towing = compute_braking_distance(&towing);
    let solo = compute_braking_distance(&solo);
    assert_eq!(towing.effective_friction, solo.effective_friction);
    assert!(towing.distance_m > solo.distance_m);
}

#[test]
fn test_fade_lengthens_mountain_stop() {
    let faded = scenario_request(ScenarioId::MountainPassFade);
    let fresh = BrakingRequest {
        brake_fade: 0.0,
        ..faded.clone()
    };
    assert!(compute_braking_distance(&faded).distance_m > 2.0 * compute_braking_distance(&fresh).distance_m);
}

#[test]
fn test_every_scenario_resolves_by_key() {
    for &scenario in ScenarioId::ALL {
        assert_eq!(ScenarioId::from_key(scenario.key()), scenario);
        let request = scenario_request(scenario);
        assert!(request.speed_kmh > 0.0);
    }
}

// ---- Config ----

#[test]
fn test_empty_config_is_default() {
    assert_eq!(parse_sim_config("{}").unwrap(), SimConfig::default());
}

#[test]
fn test_config_partial_override() {
    let config = parse_sim_config(r#"{"brake_mode": "hold_to_brake", "safety_cap_m": 2500.0}"#).unwrap();
    assert_eq!(config.brake_mode, BrakeMode::HoldToBrake);
    assert_eq!(config.safety_cap_m, 2500.0);
    assert_eq!(config.max_frame_dt, MAX_FRAME_DT);
}

#[test]
fn test_config_rejects_bad_values() {
    let err = parse_sim_config(r#"{"max_frame_dt": 0.0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::MinViolation { field: "max_frame_dt", .. }));

    let err = parse_sim_config(r#"{"safety_cap_m": -5.0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::MinViolation { field: "safety_cap_m", .. }));

    let err = parse_sim_config(r#"{"stop_epsilon_kmh": -1.0}"#).unwrap_err();
    assert!(matches!(err, ConfigError::RangeViolation { field: "stop_epsilon_kmh", .. }));
    assert!(err.to_string().contains("stop_epsilon_kmh"));
}

#[test]
fn test_config_malformed_json() {
    let err = parse_sim_config("{ brake_mode: ").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_config_missing_file() {
    let err = load_sim_config("/nonexistent/stopline/sim.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("sim.json"));
}

#[test]
fn test_request_unknown_keys_fall_back() {
    let request = parse_request(r#"{"speed_kmh": 80.0, "surface": "lava", "grade": "b"}"#).unwrap();
    assert_eq!(request.speed_kmh, 80.0);
    assert_eq!(request.surface, Surface::Asphalt);
    assert_eq!(request.grade, WetGripGrade::B);
    assert_eq!(request.tread_depth_mm, 8.0);
}

// ---- Snapshot ----

#[test]
fn test_snapshot_serde() {
    let mut state = rolling(BrakingRequest::default(), 70.0);
    let _ = state.engage_brake();
    for _ in 0..10 {
        state.step(FRAME);
    }
    let snapshot = state.snapshot();
    assert_eq!(snapshot.phase, DrivingPhase::Braking);
    assert!(snapshot.planned_distance_m.is_some());
    assert!(snapshot.braking_distance_m > 0.0);

    let json = serde_json::to_string(&snapshot).unwrap();
    assert!(json.contains("\"phase\":\"Braking\""));
    let back: RunSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}
