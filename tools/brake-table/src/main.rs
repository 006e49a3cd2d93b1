//! brake-table: headless braking estimates and scripted runs.
//!
//! Usage:
//!   brake-table table --scenario worn_tyres_in_rain
//!   brake-table table --request conditions.json --json
//!   brake-table run --scenario motorway_rain --brake-at 110 --config sim.json
//!   brake-table scenarios

use std::process;

use tracing_subscriber::EnvFilter;

use stopline_core::enums::{BrakeMode, KeyedEnum, ScenarioId};
use stopline_core::state::RunOutcome;
use stopline_core::types::BrakingRequest;
use stopline_model::{compare_grades, compute_braking_distance};
use stopline_sim::config::{load_request, load_sim_config};
use stopline_sim::scenario::{challenge_from_seed, scenario_request};
use stopline_sim::{SimConfig, SimulationState};

/// Frame length for scripted runs (s).
const RUN_DT: f64 = 1.0 / 60.0;
/// Ten simulated minutes.
const RUN_MAX_STEPS: usize = 36_000;
/// With `--hold`: brake this long, then let go for as long again.
const HOLD_PHASE_SECS: f64 = 1.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "table" => cmd_table(&args[2..]),
        "run" => cmd_run(&args[2..]),
        "scenarios" => cmd_scenarios(),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "brake-table: STOPLINE braking distance tool\n\
         \n\
         Commands:\n\
         \n\
         table      Compare wet grip grades A-E and show the factor breakdown\n\
         \n\
           --scenario <key>   Preset conditions (see `scenarios`)\n\
           --request <path>   JSON braking request (missing fields take the baseline)\n\
           --seed <N>         Random challenge conditions for a seed\n\
           --json             Print the full result as JSON\n\
         \n\
         run        Accelerate from standstill, brake at a speed, report the stop\n\
         \n\
           --scenario, --request, --seed as above\n\
           --brake-at <kmh>   Speed at which to engage the brake (default: request speed)\n\
           --config <path>    JSON run configuration\n\
           --hold             Hold-to-brake mode: brake 1 s, coast 1 s, brake again\n\
         \n\
         scenarios  List preset scenarios\n\
         \n\
         Logging goes to stderr; set RUST_LOG=debug for engagement details.\n"
    );
}

fn parse_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(args[i + 1].as_str());
        }
    }
    None
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Conditions from `--request`, `--seed` or `--scenario`, in that order.
fn resolve_request(args: &[String]) -> BrakingRequest {
    if let Some(path) = parse_value(args, "--request") {
        return match load_request(path) {
            Ok(request) => request,
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        };
    }
    if let Some(seed) = parse_value(args, "--seed") {
        return match seed.parse::<u64>() {
            Ok(seed) => challenge_from_seed(seed),
            Err(_) => {
                eprintln!("Error: --seed expects an unsigned integer, got {seed}");
                process::exit(1);
            }
        };
    }
    let scenario = parse_value(args, "--scenario").map(ScenarioId::from_key).unwrap_or_default();
    scenario_request(scenario)
}

fn format_distance(distance_m: f64) -> String {
    if distance_m.is_finite() {
        format!("{distance_m:8.1} m")
    } else {
        "  cannot stop".to_string()
    }
}

// --- Table command ---

fn cmd_table(args: &[String]) {
    let request = resolve_request(args);
    let result = compute_braking_distance(&request);

    if has_flag(args, "--json") {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
        return;
    }

    println!(
        "{:.0} km/h on {} ({:.1} mm water), slope {:+.1} deg",
        request.speed_kmh,
        request.surface,
        request.water_depth_mm,
        request.slope_deg
    );
    println!();
    println!("Grade  Friction     Distance  Severity");
    for (grade, graded) in compare_grades(&request) {
        let marker = if grade == request.grade { "*" } else { " " };
        println!(
            "{}{}     {:8.3}  {}  {:?}",
            grade.label(),
            marker,
            graded.effective_friction,
            format_distance(graded.distance_m),
            graded.severity()
        );
    }

    println!();
    println!("Factors (grade {}):", request.grade.label());
    println!("  base friction      {:.3}", result.base_friction);
    for (factor, value) in result.factors.iter() {
        println!("  {:<18} {value:.3}", format!("{factor:?}"));
    }
    println!("  effective friction {:.3}", result.effective_friction);
    println!("  snow certification {:?}", result.snow_certification);
}

// --- Run command ---

fn cmd_run(args: &[String]) {
    let request = resolve_request(args);

    let mut config = match parse_value(args, "--config") {
        Some(path) => match load_sim_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        },
        None => SimConfig::default(),
    };
    if has_flag(args, "--hold") {
        config.brake_mode = BrakeMode::HoldToBrake;
    }

    let brake_at = match parse_value(args, "--brake-at") {
        Some(value) => match value.parse::<f64>() {
            Ok(kmh) if kmh.is_finite() && kmh > 0.0 => kmh,
            _ => {
                eprintln!("Error: --brake-at expects a positive speed in km/h, got {value}");
                process::exit(1);
            }
        },
        None => request.speed_kmh,
    };

    let mut state = SimulationState::new(request, config);
    let _ = state.press_throttle();

    let mut steps = 0;
    while state.speed_kmh() < brake_at && steps < RUN_MAX_STEPS {
        let before = state.speed_kmh();
        state.step(RUN_DT);
        steps += 1;
        if state.speed_kmh() <= before && state.speed_kmh() > 0.0 {
            eprintln!("Vehicle topped out at {:.1} km/h, braking there", state.speed_kmh());
            break;
        }
    }
    let brake_secs = state.stats().elapsed_secs;
    let _ = state.engage_brake();

    if config.brake_mode == BrakeMode::HoldToBrake {
        let hold_steps = (HOLD_PHASE_SECS / RUN_DT).round() as usize;
        for _ in 0..hold_steps {
            state.step(RUN_DT);
        }
        if state.release_brake().is_applied() {
            for _ in 0..hold_steps {
                state.step(RUN_DT);
            }
            let _ = state.engage_brake();
            eprintln!("Released the brake for {HOLD_PHASE_SECS:.1} s");
        }
        steps += 2 * hold_steps;
    }

    let outcome = state.run_until_finished(RUN_DT, RUN_MAX_STEPS.saturating_sub(steps));
    let snapshot = state.snapshot();
    let stats = snapshot.stats;

    println!(
        "Brake at {:.1} km/h after {:.1} s and {:.1} m (peak {:.1} km/h)",
        stats.brake_speed_kmh.unwrap_or(0.0),
        brake_secs,
        stats.brake_position_m.unwrap_or(0.0),
        stats.peak_speed_kmh
    );
    match snapshot.planned_distance_m {
        Some(planned) => println!("Planned stopping distance {planned:.1} m"),
        None => println!("Planned stopping distance: cannot stop"),
    }
    match outcome {
        Some(RunOutcome::Stopped {
            distance_m,
            severity,
        }) => println!(
            "Stopped in {distance_m:.1} m over {:.1} s ({severity:?})",
            stats.braking_secs
        ),
        Some(RunOutcome::CannotStop { distance_m }) => {
            println!("Cannot stop: still moving after {distance_m:.0} m")
        }
        None => println!(
            "Still moving at {:.1} km/h after {:.1} m",
            snapshot.speed_kmh, snapshot.braking_distance_m
        ),
    }
}

// --- Scenarios command ---

fn cmd_scenarios() {
    for &scenario in ScenarioId::ALL {
        let request = scenario_request(scenario);
        let result = compute_braking_distance(&request);
        println!(
            "{:<20} {:5.0} km/h  {:<10} grade {}  {}",
            scenario.key(),
            request.speed_kmh,
            request.surface.key(),
            request.grade.label(),
            format_distance(result.distance_m)
        );
    }
}
