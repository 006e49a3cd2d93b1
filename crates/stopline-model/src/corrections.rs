//! Corrections applied after the friction coefficient: terrain grip and
//! slope on the deceleration, then wind and trailer on the distance.

use stopline_core::constants::*;
use stopline_core::enums::{PatternDirection, Surface, TerrainCategory};
use stopline_core::tables::{pattern_profile, surface_condition, terrain_profile, trailer_profile};
use stopline_core::types::{Trailer, Wind};

use crate::factors::input;

/// Deceleration on a slope, `g(mu cos(theta) + sin(theta))`, positive uphill.
///
/// Zero or negative means gravity along the slope beats friction and the
/// vehicle cannot stop.
pub fn slope_deceleration(friction: f64, slope_deg: f64) -> f64 {
    let theta = input(slope_deg, 0.0, -MAX_SLOPE_DEG, MAX_SLOPE_DEG).to_radians();
    GRAVITY * (friction * theta.cos() + theta.sin())
}

/// Share of the combined mass the brakes can decelerate at full rate.
pub fn trailer_coverage(vehicle_mass_kg: f64, trailer: &Trailer) -> f64 {
    let trailer_mass = trailer.hitched_mass_kg();
    if trailer_mass == 0.0 {
        return 1.0;
    }
    let vehicle_mass = input(vehicle_mass_kg, 0.0, 0.0, f64::MAX);
    let braked = trailer_profile(trailer.kind).brake_fraction;
    (vehicle_mass + braked * trailer_mass) / (vehicle_mass + trailer_mass)
}

/// Distance multiplier for wind. Tailwind lengthens, headwind shortens, and
/// the effect grows with speed up to 100 km/h.
pub fn wind_factor(speed_kmh: f64, wind: &Wind) -> f64 {
    let speed = input(speed_kmh, 0.0, 0.0, MAX_SPEED_KMH);
    let wind_speed = input(wind.speed_kmh, 0.0, 0.0, f64::INFINITY);
    let exposure = (speed / WIND_FULL_EFFECT_SPEED_KMH).clamp(0.0, 1.0);
    (1.0 + wind.direction.sign() * wind_speed * WIND_SENSITIVITY_PER_KMH * exposure)
        .clamp(WIND_MIN_FACTOR, WIND_MAX_FACTOR)
}

/// Terrain category modifier times tread pattern grip. Scales the friction
/// term of the slope deceleration.
pub fn terrain_pattern_factor(
    category: TerrainCategory,
    pattern: PatternDirection,
    surface: Surface,
    water_depth_mm: f64,
) -> f64 {
    let wet = water_depth_mm > 0.0;
    let condition = surface_condition(surface, wet);
    let pattern = pattern_profile(pattern);
    let pattern_grip = if wet { pattern.wet_grip } else { pattern.dry_grip };
    terrain_profile(category).modifiers.get(condition) * pattern_grip
}
