//! Friction multipliers.
//!
//! One pure function per physical factor. Each returns a dimensionless
//! multiplier on the friction coefficient, already clamped to its documented
//! range, so any input (including NaN) yields a finite positive value.

use stopline_core::constants::*;
use stopline_core::enums::{PatternDirection, SnowCertification, Surface, TyreCompound, TyreType, VehicleClass, WetGripGrade};
use stopline_core::tables::{
    compound_grip, grade_wet_multiplier, pattern_profile, surface_profile, tyre_type_profile, vehicle_profile,
    AQUAPLANING_GRID, AQUAPLANING_SPEEDS_KMH, AQUAPLANING_TREADS_MM,
};
use stopline_core::types::TyrePressure;

/// Clamp a raw input into `[min, max]`. NaN becomes `fallback`.
pub(crate) fn input(value: f64, fallback: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}

fn water_depth(mm: f64) -> f64 {
    input(mm, 0.0, 0.0, f64::INFINITY)
}

// --- Wet/dry blending ---

/// How far conditions have moved from dry (0) to fully wet (1).
///
/// Linear over the first half millimetre of water, so a damp road sits
/// between the dry and wet behaviour instead of snapping to wet.
pub fn damp_blend_ratio(water_depth_mm: f64) -> f64 {
    (water_depth(water_depth_mm) / DAMP_BLEND_FULL_DEPTH_MM).clamp(0.0, 1.0)
}

pub fn blend(dry: f64, wet: f64, ratio: f64) -> f64 {
    dry + (wet - dry) * ratio
}

/// Evaluate a banded linear decay: each band is (start, value at start, loss per unit).
fn banded(bands: &[(f64, f64, f64)], x: f64) -> f64 {
    let (start, value, slope) = bands
        .iter()
        .rev()
        .find(|(start, _, _)| x >= *start)
        .copied()
        .unwrap_or(bands[0]);
    value - slope * (x - start)
}

// --- Factors ---

/// Water film on the road. Non-increasing in depth, floor 0.05.
pub fn weather_factor(water_depth_mm: f64) -> f64 {
    let depth = water_depth(water_depth_mm);
    for pair in WEATHER_BREAKPOINTS.windows(2) {
        let (d0, f0) = pair[0];
        let (d1, f1) = pair[1];
        if depth <= d1 {
            return f0 + (f1 - f0) * (depth - d0) / (d1 - d0);
        }
    }
    let (last_depth, last_factor) = WEATHER_BREAKPOINTS[WEATHER_BREAKPOINTS.len() - 1];
    (last_factor - WEATHER_TAIL_SLOPE_PER_MM * (depth - last_depth)).max(WEATHER_FLOOR)
}

/// EU wet grip grade. The full spread applies in the wet, 40 % of it when dry.
pub fn grade_factor(grade: WetGripGrade, water_depth_mm: f64) -> f64 {
    let wet = grade_wet_multiplier(grade);
    let dry = 1.0 + (wet - 1.0) * GRADE_DRY_SCALE;
    blend(dry, wet, damp_blend_ratio(water_depth_mm))
}

/// Tread depth, with the wet cliff below 4 mm.
pub fn tread_factor(tread_mm: f64, water_depth_mm: f64) -> f64 {
    let tread = input(tread_mm, TREAD_NEW_MM, 0.0, f64::INFINITY);
    let wet = if tread >= TREAD_NEW_MM {
        1.0
    } else if tread >= TREAD_CLIFF_MM {
        0.64 + 0.045 * tread
    } else {
        0.304 + 0.129 * tread
    };
    let wet = wet.clamp(TREAD_MIN_FACTOR, 1.0);
    let dry = TREAD_DRY_BASE + TREAD_DRY_GAIN_PER_MM * tread.min(TREAD_NEW_MM);
    blend(dry, wet, damp_blend_ratio(water_depth_mm))
}

/// Rubber hardening with age. The yearly loss steepens past five years.
pub fn age_factor(years: f64) -> f64 {
    let years = input(years, 0.0, 0.0, f64::INFINITY);
    banded(&AGE_BANDS, years).max(AGE_FLOOR)
}

pub fn pressure_factor(pressure: &TyrePressure) -> f64 {
    let recommended = input(pressure.recommended_psi, 32.0, 0.0, f64::INFINITY);
    let actual = input(pressure.actual_psi, recommended, 0.0, f64::INFINITY);
    (1.0 - PRESSURE_LOSS_PER_PSI * (actual - recommended).abs()).max(PRESSURE_FLOOR)
}

/// Section width. Wider tyres gain a little dry grip but carry a higher
/// hydroplaning risk index in the wet.
pub fn width_factor(width_mm: f64, water_depth_mm: f64) -> f64 {
    let width = input(width_mm, WIDTH_REFERENCE_MM, 0.0, f64::INFINITY);
    let risk_index = 1.0 + WIDTH_WET_RISK_PER_MM * (width - WIDTH_REFERENCE_MM).max(0.0);
    let wet = (1.0 / risk_index).clamp(WIDTH_MIN_FACTOR, WIDTH_MAX_FACTOR);
    let dry = (1.0 + WIDTH_DRY_GAIN_PER_MM * (width - WIDTH_REFERENCE_MM)).clamp(WIDTH_MIN_FACTOR, WIDTH_MAX_FACTOR);
    blend(dry, wet, damp_blend_ratio(water_depth_mm))
}

/// Compound response to ambient temperature.
///
/// Below the cold threshold every compound except winter hardens, losing grip
/// linearly to its published loss at 0 °C and beyond. Winter compounds gain a
/// little instead, capped. Above the hot threshold every compound overheats.
pub fn temperature_factor(ambient_c: f64, tyre: TyreType) -> f64 {
    let profile = tyre_type_profile(tyre);
    let t = input(ambient_c, 20.0, -273.0, f64::INFINITY);
    let factor = if t < TEMP_COLD_THRESHOLD_C {
        let loss = profile.cold_loss_at_freezing / TEMP_COLD_THRESHOLD_C * (TEMP_COLD_THRESHOLD_C - t);
        (1.0 - loss).min(1.0 + TEMP_COLD_GAIN_CAP)
    } else if t > TEMP_HOT_THRESHOLD_C {
        1.0 - profile.hot_loss_per_c * (t - TEMP_HOT_THRESHOLD_C)
    } else {
        1.0
    };
    factor.clamp(TEMP_MIN_FACTOR, TEMP_MAX_FACTOR)
}

/// Brake fade, level 0 to 10.
pub fn brake_fade_factor(level: f64) -> f64 {
    let level = input(level, 0.0, 0.0, BRAKE_FADE_MAX_LEVEL);
    banded(&BRAKE_FADE_BANDS, level).max(BRAKE_FADE_FLOOR)
}

pub fn compound_factor(compound: TyreCompound, water_depth_mm: f64) -> f64 {
    let (dry, wet) = compound_grip(compound);
    blend(dry, wet, damp_blend_ratio(water_depth_mm))
}

/// Tyre type. On snow and ice the snow traction index decides; elsewhere the
/// type's dry and wet grip relative to a summer tyre.
pub fn tyre_type_factor(tyre: TyreType, surface: Surface, water_depth_mm: f64) -> f64 {
    let profile = tyre_type_profile(tyre);
    if surface.is_winter() {
        profile.snow_index
    } else {
        blend(profile.dry_grip, profile.wet_grip, damp_blend_ratio(water_depth_mm))
    }
}

/// Heavier, taller vehicles brake worse than the sedan reference.
pub fn vehicle_load_factor(class: VehicleClass) -> f64 {
    vehicle_profile(class)
        .handling_factor
        .clamp(VEHICLE_LOAD_MIN_FACTOR, VEHICLE_LOAD_MAX_FACTOR)
}

/// Without ABS the wheels lock and only sliding friction is available.
pub fn abs_factor(abs: bool, surface: Surface) -> f64 {
    if abs {
        1.0
    } else {
        let profile = surface_profile(surface);
        profile.slide_friction / profile.peak_friction
    }
}

/// Position of `x` on a sorted axis: the lower cell index and the fraction
/// across that cell, clamped to the axis ends.
fn axis_position(axis: &[f64], x: f64) -> (usize, f64) {
    let last_cell = axis.len() - 2;
    let i = axis.windows(2).position(|w| x <= w[1]).unwrap_or(last_cell);
    let t = ((x - axis[i]) / (axis[i + 1] - axis[i])).clamp(0.0, 1.0);
    (i, t)
}

/// Wet grip retained at the reference water depth, bilinear over speed and tread.
pub fn aquaplaning_grid(speed_kmh: f64, tread_mm: f64) -> f64 {
    let (r, tr) = axis_position(&AQUAPLANING_SPEEDS_KMH, speed_kmh);
    let (c, tc) = axis_position(&AQUAPLANING_TREADS_MM, tread_mm);
    let g = &AQUAPLANING_GRID;
    let slow = blend(g[r][c], g[r][c + 1], tc);
    let fast = blend(g[r + 1][c], g[r + 1][c + 1], tc);
    blend(slow, fast, tr)
}

/// Speed-dependent loss in standing water.
///
/// Nothing below the onset depth; the grid loss scales up to the reference
/// depth and is divided by the tread pattern's aquaplaning resistance.
pub fn aquaplaning_factor(speed_kmh: f64, tread_mm: f64, water_depth_mm: f64, pattern: PatternDirection) -> f64 {
    let speed = input(speed_kmh, 0.0, 0.0, MAX_SPEED_KMH);
    let tread = input(tread_mm, TREAD_NEW_MM, 0.0, f64::INFINITY);
    let weight = ((water_depth(water_depth_mm) - AQUAPLANING_ONSET_MM) / (AQUAPLANING_REFERENCE_MM - AQUAPLANING_ONSET_MM))
        .clamp(0.0, 1.0);
    if weight == 0.0 {
        return 1.0;
    }
    let loss = weight * (1.0 - aquaplaning_grid(speed, tread)) / pattern_profile(pattern).aquaplaning_resist;
    (1.0 - loss).clamp(AQUAPLANING_MIN_FACTOR, 1.0)
}

/// Winter marking earned by a tyre type's snow traction index.
pub fn snow_certification(tyre: TyreType) -> SnowCertification {
    let index = tyre_type_profile(tyre).snow_index;
    if index >= THREE_PEAK_MIN_SNOW_INDEX {
        SnowCertification::ThreePeakMountainSnowflake
    } else if index >= MUD_AND_SNOW_MIN_SNOW_INDEX {
        SnowCertification::MudAndSnow
    } else {
        SnowCertification::None
    }
}
