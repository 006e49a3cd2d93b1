//! Longitudinal vehicle dynamics outside the braking plan.
//!
//! Throttle, coasting and brake-release rates. All rates are in m/s² and
//! positive values speed the vehicle up; the engine scales them by `dt`.

use stopline_core::constants::*;
use stopline_core::tables::{surface_profile, terrain_profile, vehicle_profile};
use stopline_core::types::BrakingRequest;
use stopline_model::composition::traction_friction;

/// Per-run constants derived once from the request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleDynamics {
    pub vehicle_mass_kg: f64,
    /// Vehicle plus trailer.
    pub total_mass_kg: f64,
    /// Drag coefficient times frontal area (m²).
    pub drag_area_m2: f64,
    pub top_speed_mps: f64,
    /// Nominal launch acceleration at standstill.
    pub launch_accel: f64,
    /// Grip-limited drive acceleration on the driven axle. Brake fade and ABS
    /// do not enter it.
    pub traction_limit: f64,
    pub engine_brake: f64,
    /// Rolling resistance deceleration on this surface and slope.
    pub rolling_decel: f64,
    /// Gravity along the slope; positive uphill.
    pub slope_decel: f64,
    /// Wind along the direction of travel (m/s); positive is a tailwind.
    pub wind_along_mps: f64,
}

impl VehicleDynamics {
    pub fn from_request(request: &BrakingRequest) -> Self {
        let vehicle = vehicle_profile(request.vehicle);
        let theta = if request.slope_deg.is_nan() {
            0.0
        } else {
            request.slope_deg.clamp(-MAX_SLOPE_DEG, MAX_SLOPE_DEG).to_radians()
        };
        let total_mass_kg = vehicle.mass_kg + request.trailer.hitched_mass_kg();
        let rolling_coefficient = BASE_ROLLING_RESISTANCE
            * surface_profile(request.surface).rolling_resistance_factor
            * terrain_profile(request.terrain).rolling_resistance;

        Self {
            vehicle_mass_kg: vehicle.mass_kg,
            total_mass_kg,
            drag_area_m2: vehicle.drag_coefficient * vehicle.frontal_area_m2,
            top_speed_mps: vehicle.top_speed_kmh / KMH_PER_MPS,
            launch_accel: LAUNCH_PEAK_FACTOR * (100.0 / KMH_PER_MPS) / vehicle.zero_to_hundred_s,
            traction_limit: traction_friction(request) * GRAVITY * theta.cos() * DRIVEN_LOAD_SHARE,
            engine_brake: vehicle.engine_brake_mps2,
            rolling_decel: rolling_coefficient * GRAVITY * theta.cos(),
            slope_decel: GRAVITY * theta.sin(),
            wind_along_mps: request.wind.along_track_mps(),
        }
    }

    /// Aerodynamic drag deceleration at road speed `v` (m/s). Tailwind
    /// lowers the airspeed and can push the vehicle.
    pub fn aero_decel(&self, v: f64) -> f64 {
        let airspeed = v - self.wind_along_mps;
        0.5 * AIR_DENSITY * self.drag_area_m2 * airspeed * airspeed.abs() / self.total_mass_kg
    }

    /// Acceleration with the throttle held. The lesser of the traction limit
    /// and the class launch curve, which falls to zero at top speed.
    pub fn throttle_accel(&self, v: f64) -> f64 {
        let ratio = (v / self.top_speed_mps).min(1.0);
        let nominal = self.launch_accel * (1.0 - ratio * ratio);
        nominal.min(self.traction_limit) - self.slope_decel
    }

    /// Deceleration with the throttle released, before braking.
    pub fn coast_decel(&self, v: f64) -> f64 {
        let engine = self.engine_brake * (v / ENGINE_BRAKE_FADE_SPEED_MPS).min(1.0) * self.vehicle_mass_kg
            / self.total_mass_kg;
        engine + self.rolling_decel + self.aero_decel(v) + self.slope_decel
    }

    /// Deceleration after letting go of the brake: rolling and drag only.
    pub fn release_decel(&self, v: f64) -> f64 {
        self.rolling_decel + self.aero_decel(v)
    }
}
