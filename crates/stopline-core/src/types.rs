//! Braking request: the full set of inputs for one estimate.

use serde::{Deserialize, Serialize};

use crate::constants::KMH_PER_MPS;
use crate::enums::*;
use crate::tables::trailer_profile;

/// Tyre inflation, actual against the placard value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TyrePressure {
    pub actual_psi: f64,
    pub recommended_psi: f64,
}

impl Default for TyrePressure {
    fn default() -> Self {
        Self {
            actual_psi: 32.0,
            recommended_psi: 32.0,
        }
    }
}

impl TyrePressure {
    pub fn new(actual_psi: f64, recommended_psi: f64) -> Self {
        Self {
            actual_psi,
            recommended_psi,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wind {
    pub speed_kmh: f64,
    pub direction: WindDirection,
}

impl Wind {
    pub fn new(speed_kmh: f64, direction: WindDirection) -> Self {
        Self {
            speed_kmh,
            direction,
        }
    }

    /// Wind component along the direction of travel (m/s). Positive pushes.
    pub fn along_track_mps(&self) -> f64 {
        self.direction.sign() * self.speed_kmh.max(0.0) / KMH_PER_MPS
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Trailer {
    pub kind: TrailerType,
    pub mass_kg: f64,
}

impl Trailer {
    pub fn new(kind: TrailerType, mass_kg: f64) -> Self {
        Self { kind, mass_kg }
    }

    /// A trailer of the given kind at its typical laden mass.
    pub fn typical(kind: TrailerType) -> Self {
        Self::new(kind, trailer_profile(kind).typical_mass_kg)
    }

    /// Mass actually hitched (kg). Zero when nothing is towed.
    pub fn hitched_mass_kg(&self) -> f64 {
        match self.kind {
            TrailerType::None => 0.0,
            _ if self.mass_kg.is_finite() => self.mass_kg.max(0.0),
            _ => 0.0,
        }
    }
}

/// Every input the estimator takes. Built fresh for each query.
///
/// Missing JSON fields take the neutral baseline from `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrakingRequest {
    pub speed_kmh: f64,
    pub grade: WetGripGrade,
    pub tread_depth_mm: f64,
    /// Water film depth on the road (mm). Zero is dry.
    pub water_depth_mm: f64,
    pub tyre_age_years: f64,
    pub tyre_type: TyreType,
    pub pressure: TyrePressure,
    pub tyre_width_mm: f64,
    pub surface: Surface,
    pub vehicle: VehicleClass,
    pub ambient_temp_c: f64,
    pub abs: bool,
    pub wind: Wind,
    pub trailer: Trailer,
    /// Road slope in degrees, positive uphill.
    pub slope_deg: f64,
    /// Brake fade level, 0 (cold) to 10 (cooked).
    pub brake_fade: f64,
    pub compound: TyreCompound,
    pub terrain: TerrainCategory,
    pub pattern: PatternDirection,
}

impl Default for BrakingRequest {
    fn default() -> Self {
        Self {
            speed_kmh: 100.0,
            grade: WetGripGrade::default(),
            tread_depth_mm: 8.0,
            water_depth_mm: 0.0,
            tyre_age_years: 0.0,
            tyre_type: TyreType::default(),
            pressure: TyrePressure::default(),
            tyre_width_mm: 205.0,
            surface: Surface::default(),
            vehicle: VehicleClass::default(),
            ambient_temp_c: 20.0,
            abs: true,
            wind: Wind::default(),
            trailer: Trailer::default(),
            slope_deg: 0.0,
            brake_fade: 0.0,
            compound: TyreCompound::default(),
            terrain: TerrainCategory::default(),
            pattern: PatternDirection::default(),
        }
    }
}

impl BrakingRequest {
    /// Copy of this request at another speed.
    pub fn with_speed(&self, speed_kmh: f64) -> Self {
        Self {
            speed_kmh,
            ..self.clone()
        }
    }

    /// Copy of this request with another wet grip grade.
    pub fn with_grade(&self, grade: WetGripGrade) -> Self {
        Self {
            grade,
            ..self.clone()
        }
    }

    /// Copy of this request under a weather preset.
    pub fn with_weather(&self, weather: WeatherPreset) -> Self {
        Self {
            water_depth_mm: weather.water_depth_mm(),
            ..self.clone()
        }
    }

    pub fn speed_mps(&self) -> f64 {
        self.speed_kmh / KMH_PER_MPS
    }

    /// Any water on the road at all.
    pub fn is_wet(&self) -> bool {
        self.water_depth_mm > 0.0
    }
}
