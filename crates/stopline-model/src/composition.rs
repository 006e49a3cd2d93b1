//! Composition engine: combines every factor into an effective friction
//! coefficient and a closed-form stopping distance.

use stopline_core::constants::{GRAVITY, KMH_PER_MPS, MAX_SPEED_KMH};
use stopline_core::enums::{Factor, KeyedEnum, WetGripGrade};
use stopline_core::result::{BrakingResult, FactorBreakdown};
use stopline_core::tables::{surface_profile, vehicle_profile};
use stopline_core::types::BrakingRequest;

use crate::corrections::{slope_deceleration, terrain_pattern_factor, trailer_coverage, wind_factor};
use crate::factors::*;

/// Surface friction before any multiplier: peak when dry, wet otherwise.
pub fn base_friction(request: &BrakingRequest) -> f64 {
    let profile = surface_profile(request.surface);
    if request.is_wet() {
        profile.wet_friction
    } else {
        profile.peak_friction
    }
}

/// Multiply a base coefficient by any number of factors. Order does not matter.
pub fn compose_friction(base: f64, factors: impl IntoIterator<Item = f64>) -> f64 {
    factors.into_iter().fold(base, |mu, factor| mu * factor)
}

fn friction_multipliers(request: &BrakingRequest) -> [(Factor, f64); 13] {
    let depth = request.water_depth_mm;
    [
        (Factor::Weather, weather_factor(depth)),
        (Factor::Grade, grade_factor(request.grade, depth)),
        (Factor::Tread, tread_factor(request.tread_depth_mm, depth)),
        (Factor::Age, age_factor(request.tyre_age_years)),
        (Factor::Pressure, pressure_factor(&request.pressure)),
        (Factor::Width, width_factor(request.tyre_width_mm, depth)),
        (Factor::Temperature, temperature_factor(request.ambient_temp_c, request.tyre_type)),
        (Factor::BrakeFade, brake_fade_factor(request.brake_fade)),
        (Factor::Compound, compound_factor(request.compound, depth)),
        (Factor::TyreType, tyre_type_factor(request.tyre_type, request.surface, depth)),
        (Factor::VehicleLoad, vehicle_load_factor(request.vehicle)),
        (Factor::Abs, abs_factor(request.abs, request.surface)),
        (
            Factor::Aquaplaning,
            aquaplaning_factor(request.speed_kmh, request.tread_depth_mm, depth, request.pattern),
        ),
    ]
}

/// Effective friction coefficient for a request.
pub fn effective_friction(request: &BrakingRequest) -> f64 {
    compose_friction(
        base_friction(request),
        friction_multipliers(request).iter().map(|(_, value)| *value),
    )
}

/// Tyre-road grip for driving: the friction multipliers without the braking
/// system terms (fade and ABS), times the terrain/pattern grip.
pub fn traction_friction(request: &BrakingRequest) -> f64 {
    let tyre_road = friction_multipliers(request)
        .into_iter()
        .filter(|(factor, _)| !factor.is_braking_system())
        .map(|(_, value)| value);
    compose_friction(base_friction(request), tyre_road) * terrain_grip(request)
}

fn terrain_grip(request: &BrakingRequest) -> f64 {
    terrain_pattern_factor(request.terrain, request.pattern, request.surface, request.water_depth_mm)
}

/// Every named multiplier and correction behind an estimate.
pub fn compute_factor_breakdown(request: &BrakingRequest) -> FactorBreakdown {
    let mut breakdown = FactorBreakdown::new();
    for (factor, value) in friction_multipliers(request) {
        breakdown.insert(factor, value);
    }

    let terrain = terrain_grip(request);
    let grip = effective_friction(request) * terrain;
    breakdown.insert(Factor::Slope, slope_deceleration(grip, request.slope_deg) / (GRAVITY * grip));
    breakdown.insert(Factor::Wind, wind_factor(request.speed_kmh, &request.wind));
    breakdown.insert(
        Factor::TrailerCoverage,
        trailer_coverage(vehicle_profile(request.vehicle).mass_kg, &request.trailer),
    );
    breakdown.insert(Factor::TerrainPattern, terrain);
    breakdown
}

/// Closed-form stopping distance for a request.
///
/// `a = g(mu T cos + sin)` where `T` is the terrain/pattern grip, then
/// `d = v² / (2a)` multiplied by the wind factor and divided by trailer
/// coverage. Never NaN: a vehicle that cannot stop gets an infinite distance.
pub fn compute_braking_distance(request: &BrakingRequest) -> BrakingResult {
    let factors = compute_factor_breakdown(request);
    let base = base_friction(request);
    let mu = effective_friction(request);
    let terrain = factors.get(Factor::TerrainPattern).unwrap_or(1.0);
    let decel = slope_deceleration(mu * terrain, request.slope_deg);

    let wind = factors.get(Factor::Wind).unwrap_or(1.0);
    let coverage = factors.get(Factor::TrailerCoverage).unwrap_or(1.0);

    let can_stop = decel > 0.0;
    let (distance_m, effective_decel) = if can_stop {
        let speed = input(request.speed_kmh, 0.0, 0.0, MAX_SPEED_KMH) / KMH_PER_MPS;
        (speed * speed / (2.0 * decel) * wind / coverage, decel * coverage / wind)
    } else {
        // Runaway: weak trailer brakes and a tailwind make it worse, never gentler.
        (f64::INFINITY, decel * wind / coverage)
    };

    tracing::trace!(
        mu,
        decel,
        distance_m,
        surface = request.surface.key(),
        "braking estimate"
    );

    BrakingResult {
        base_friction: base,
        effective_friction: mu,
        deceleration_mps2: decel,
        effective_deceleration_mps2: effective_decel,
        distance_m,
        can_stop,
        factors,
        snow_certification: snow_certification(request.tyre_type),
    }
}

/// Estimates for the same conditions across every wet grip grade, A to E.
pub fn compare_grades(request: &BrakingRequest) -> Vec<(WetGripGrade, BrakingResult)> {
    WetGripGrade::ALL
        .iter()
        .map(|&grade| (grade, compute_braking_distance(&request.with_grade(grade))))
        .collect()
}
