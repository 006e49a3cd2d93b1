//! Physical constants and tuning parameters.

/// Standard gravity (m/s²).
pub const GRAVITY: f64 = 9.81;

/// Sea-level air density (kg/m³).
pub const AIR_DENSITY: f64 = 1.225;

/// km/h per m/s.
pub const KMH_PER_MPS: f64 = 3.6;

/// Highest speed the estimator accepts (km/h). Faster inputs are clamped.
pub const MAX_SPEED_KMH: f64 = 500.0;

// --- Wet/dry blending ---

/// Water depth at which wet behaviour fully applies (mm).
pub const DAMP_BLEND_FULL_DEPTH_MM: f64 = 0.5;

// --- Weather ---

/// Piecewise-linear (water depth mm, friction factor) breakpoints.
pub const WEATHER_BREAKPOINTS: [(f64, f64); 5] = [
    (0.0, 1.00),
    (0.2, 0.90),
    (0.5, 0.78),
    (1.0, 0.62),
    (2.0, 0.42),
];

/// Factor lost per mm beyond the last breakpoint.
pub const WEATHER_TAIL_SLOPE_PER_MM: f64 = 0.10;

/// Lowest weather factor, reached in deep standing water.
pub const WEATHER_FLOOR: f64 = 0.05;

// --- Wet grip grade ---

/// Share of the wet grade spread that survives on a dry road.
pub const GRADE_DRY_SCALE: f64 = 0.40;

// --- Tread ---

/// New-tyre tread depth (mm). Full wet grip at or above this.
pub const TREAD_NEW_MM: f64 = 8.0;

/// Below this depth wet grip falls off a cliff (mm).
pub const TREAD_CLIFF_MM: f64 = 4.0;

/// Legal minimum tread depth in most of Europe (mm).
pub const TREAD_LEGAL_MIN_MM: f64 = 1.6;

pub const TREAD_MIN_FACTOR: f64 = 0.20;

/// Dry factor of a bald tyre. Worn tread gives slightly more rubber contact.
pub const TREAD_DRY_BASE: f64 = 0.88;
pub const TREAD_DRY_GAIN_PER_MM: f64 = 0.015;

// --- Age ---

/// (start year, factor at start, loss per year) for each age band.
pub const AGE_BANDS: [(f64, f64, f64); 5] = [
    (0.0, 1.000, 0.010),
    (2.0, 0.980, 0.020),
    (5.0, 0.920, 0.035),
    (8.0, 0.815, 0.050),
    (10.0, 0.715, 0.060),
];

pub const AGE_FLOOR: f64 = 0.35;

// --- Pressure ---

/// Grip lost per psi away from the recommended pressure.
pub const PRESSURE_LOSS_PER_PSI: f64 = 0.015;
pub const PRESSURE_FLOOR: f64 = 0.70;

// --- Width ---

/// Reference section width (mm).
pub const WIDTH_REFERENCE_MM: f64 = 205.0;

/// Hydroplaning risk index growth per mm above the reference width.
pub const WIDTH_WET_RISK_PER_MM: f64 = 0.003;

/// Dry grip gain per mm of width relative to the reference.
pub const WIDTH_DRY_GAIN_PER_MM: f64 = 0.0006;

pub const WIDTH_MIN_FACTOR: f64 = 0.70;
pub const WIDTH_MAX_FACTOR: f64 = 1.15;

// --- Temperature ---

/// Below this, non-winter compounds harden (°C).
pub const TEMP_COLD_THRESHOLD_C: f64 = 7.0;

/// Above this, compounds overheat (°C).
pub const TEMP_HOT_THRESHOLD_C: f64 = 35.0;

/// Most a cold-loving compound can gain below the cold threshold.
pub const TEMP_COLD_GAIN_CAP: f64 = 0.05;

pub const TEMP_MIN_FACTOR: f64 = 0.60;
pub const TEMP_MAX_FACTOR: f64 = 1.10;

// --- Brake fade ---

/// (start level, factor at start, loss per level) for each fade band.
pub const BRAKE_FADE_BANDS: [(f64, f64, f64); 3] = [
    (0.0, 1.00, 0.05),
    (3.0, 0.85, 0.08),
    (6.0, 0.61, 0.10),
];

pub const BRAKE_FADE_MAX_LEVEL: f64 = 10.0;
pub const BRAKE_FADE_FLOOR: f64 = 0.35;

// --- Vehicle ---

pub const VEHICLE_LOAD_MIN_FACTOR: f64 = 0.60;
pub const VEHICLE_LOAD_MAX_FACTOR: f64 = 1.15;

// --- Aquaplaning ---

/// Water depth where speed-dependent aquaplaning loss starts (mm).
pub const AQUAPLANING_ONSET_MM: f64 = 0.5;

/// Water depth the aquaplaning grid was measured at (mm).
pub const AQUAPLANING_REFERENCE_MM: f64 = 2.0;

pub const AQUAPLANING_MIN_FACTOR: f64 = 0.20;

// --- Slope ---

/// Slope magnitude limit (degrees).
pub const MAX_SLOPE_DEG: f64 = 45.0;

// --- Wind ---

/// Distance change per km/h of wind at full effect.
pub const WIND_SENSITIVITY_PER_KMH: f64 = 0.002;

/// Vehicle speed at which wind has its full effect (km/h).
pub const WIND_FULL_EFFECT_SPEED_KMH: f64 = 100.0;

pub const WIND_MIN_FACTOR: f64 = 0.85;
pub const WIND_MAX_FACTOR: f64 = 1.15;

// --- Winter certification ---

/// Snow traction index needed for the three-peak mountain snowflake.
pub const THREE_PEAK_MIN_SNOW_INDEX: f64 = 1.07;

/// Snow traction index needed for the mud and snow marking.
pub const MUD_AND_SNOW_MIN_SNOW_INDEX: f64 = 1.00;

// --- Result severity ---

/// Stops longer than this are flagged extreme (m).
pub const EXTREME_DISTANCE_M: f64 = 500.0;

/// Stops longer than this are flagged critical (m).
pub const CRITICAL_DISTANCE_M: f64 = 1000.0;

// --- Run simulation ---

/// Largest frame step the integrator accepts (s). Longer frames are clamped.
pub const MAX_FRAME_DT: f64 = 0.25;

/// Speed below which the vehicle counts as stopped (km/h).
pub const STOP_EPSILON_KMH: f64 = 0.5;

/// Braking distance after which the run is declared unstoppable (m).
pub const SAFETY_CAP_M: f64 = 10_000.0;

/// Rolling resistance coefficient on asphalt.
pub const BASE_ROLLING_RESISTANCE: f64 = 0.013;

/// Share of vehicle weight on the driven axle.
pub const DRIVEN_LOAD_SHARE: f64 = 0.6;

/// Launch acceleration relative to the 0-100 km/h average.
pub const LAUNCH_PEAK_FACTOR: f64 = 1.35;

/// Engine braking fades out below this speed (m/s).
pub const ENGINE_BRAKE_FADE_SPEED_MPS: f64 = 5.0;
