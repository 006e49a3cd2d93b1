//! Static reference data.
//!
//! Every table is a `match` over an enum, so lookups are total and the
//! compiler flags any variant that is missing a row.

use serde::{Deserialize, Serialize};

use crate::enums::*;

// --- Surfaces ---

/// Friction figures for one road surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceProfile {
    /// Peak (ABS-modulated) friction coefficient, dry.
    pub peak_friction: f64,
    /// Locked-wheel sliding friction coefficient, dry.
    pub slide_friction: f64,
    /// Peak friction coefficient with a water film.
    pub wet_friction: f64,
    /// Rolling resistance relative to asphalt.
    pub rolling_resistance_factor: f64,
}

impl SurfaceProfile {
    const fn new(peak: f64, slide: f64, wet: f64, rolling: f64) -> Self {
        Self {
            peak_friction: peak,
            slide_friction: slide,
            wet_friction: wet,
            rolling_resistance_factor: rolling,
        }
    }
}

pub fn surface_profile(surface: Surface) -> SurfaceProfile {
    match surface {
        Surface::Asphalt => SurfaceProfile::new(0.80, 0.70, 0.55, 1.0),
        Surface::Concrete => SurfaceProfile::new(0.85, 0.75, 0.60, 0.95),
        Surface::Cobblestone => SurfaceProfile::new(0.70, 0.60, 0.45, 1.3),
        Surface::Gravel => SurfaceProfile::new(0.60, 0.50, 0.50, 2.0),
        Surface::Dirt => SurfaceProfile::new(0.65, 0.55, 0.45, 2.5),
        Surface::Sand => SurfaceProfile::new(0.45, 0.40, 0.40, 6.0),
        Surface::Grass => SurfaceProfile::new(0.45, 0.35, 0.30, 3.0),
        Surface::Mud => SurfaceProfile::new(0.35, 0.25, 0.25, 5.0),
        Surface::Snow => SurfaceProfile::new(0.30, 0.20, 0.25, 3.0),
        Surface::Ice => SurfaceProfile::new(0.10, 0.07, 0.08, 0.8),
    }
}

/// Condition family used to look up terrain-category modifiers.
pub fn surface_condition(surface: Surface, wet: bool) -> SurfaceCondition {
    match surface {
        Surface::Asphalt | Surface::Concrete | Surface::Cobblestone => {
            if wet {
                SurfaceCondition::AsphaltWet
            } else {
                SurfaceCondition::AsphaltDry
            }
        }
        Surface::Gravel | Surface::Dirt | Surface::Sand => SurfaceCondition::Gravel,
        Surface::Grass | Surface::Mud => SurfaceCondition::Mud,
        Surface::Snow => SurfaceCondition::Snow,
        Surface::Ice => SurfaceCondition::Ice,
    }
}

// --- Tyre label and construction ---

/// Wet-road multiplier for a wet grip grade.
pub fn grade_wet_multiplier(grade: WetGripGrade) -> f64 {
    match grade {
        WetGripGrade::A => 1.15,
        WetGripGrade::B => 1.06,
        WetGripGrade::C => 1.00,
        WetGripGrade::D => 0.89,
        WetGripGrade::E => 0.80,
    }
}

/// Grip of a tyre type relative to a summer tyre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TyreTypeProfile {
    pub dry_grip: f64,
    pub wet_grip: f64,
    /// Snow traction index relative to the standard reference tyre.
    pub snow_index: f64,
    /// Grip lost between the cold threshold and 0 °C. Negative means gain.
    pub cold_loss_at_freezing: f64,
    /// Grip lost per °C above the hot threshold.
    pub hot_loss_per_c: f64,
}

pub fn tyre_type_profile(tyre: TyreType) -> TyreTypeProfile {
    match tyre {
        TyreType::Summer => TyreTypeProfile {
            dry_grip: 1.00,
            wet_grip: 1.00,
            snow_index: 0.70,
            cold_loss_at_freezing: 0.20,
            hot_loss_per_c: 0.010,
        },
        TyreType::AllSeason => TyreTypeProfile {
            dry_grip: 0.97,
            wet_grip: 0.97,
            snow_index: 1.00,
            cold_loss_at_freezing: 0.08,
            hot_loss_per_c: 0.012,
        },
        TyreType::Winter => TyreTypeProfile {
            dry_grip: 0.90,
            wet_grip: 0.93,
            snow_index: 1.25,
            cold_loss_at_freezing: -0.035,
            hot_loss_per_c: 0.020,
        },
        TyreType::AllTerrain => TyreTypeProfile {
            dry_grip: 0.93,
            wet_grip: 0.90,
            snow_index: 1.05,
            cold_loss_at_freezing: 0.10,
            hot_loss_per_c: 0.012,
        },
        TyreType::MudTerrain => TyreTypeProfile {
            dry_grip: 0.85,
            wet_grip: 0.80,
            snow_index: 0.95,
            cold_loss_at_freezing: 0.12,
            hot_loss_per_c: 0.012,
        },
    }
}

/// Dry and wet multipliers for a compound. Only track compounds differ.
pub fn compound_grip(compound: TyreCompound) -> (f64, f64) {
    match compound {
        TyreCompound::Economy => (0.88, 0.88),
        TyreCompound::Touring => (0.95, 0.95),
        TyreCompound::Standard => (1.00, 1.00),
        TyreCompound::Sport => (1.06, 1.06),
        TyreCompound::Performance => (1.12, 1.12),
        TyreCompound::Track => (1.25, 0.85),
    }
}

// --- Aquaplaning grid ---

/// Speed axis of the aquaplaning grid (km/h).
pub const AQUAPLANING_SPEEDS_KMH: [f64; 7] = [0.0, 40.0, 60.0, 80.0, 100.0, 120.0, 140.0];

/// Tread axis of the aquaplaning grid (mm).
pub const AQUAPLANING_TREADS_MM: [f64; 5] = [1.6, 3.0, 4.0, 6.0, 8.0];

/// Wet grip retained at the reference water depth, by speed row and tread column.
pub const AQUAPLANING_GRID: [[f64; 5]; 7] = [
    [1.00, 1.00, 1.00, 1.00, 1.00],
    [0.80, 0.90, 0.95, 0.98, 1.00],
    [0.70, 0.84, 0.91, 0.96, 0.99],
    [0.58, 0.76, 0.86, 0.93, 0.97],
    [0.45, 0.66, 0.79, 0.89, 0.94],
    [0.33, 0.55, 0.70, 0.83, 0.90],
    [0.22, 0.44, 0.61, 0.76, 0.85],
];

// --- Terrain categories ---

/// Modifier per surface condition. Missing keys default to neutral.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionModifiers {
    pub asphalt_dry: f64,
    pub asphalt_wet: f64,
    pub gravel: f64,
    pub mud: f64,
    pub snow: f64,
    pub ice: f64,
}

impl Default for ConditionModifiers {
    fn default() -> Self {
        Self {
            asphalt_dry: 1.0,
            asphalt_wet: 1.0,
            gravel: 1.0,
            mud: 1.0,
            snow: 1.0,
            ice: 1.0,
        }
    }
}

impl ConditionModifiers {
    const fn new(asphalt_dry: f64, asphalt_wet: f64, gravel: f64, mud: f64, snow: f64, ice: f64) -> Self {
        Self {
            asphalt_dry,
            asphalt_wet,
            gravel,
            mud,
            snow,
            ice,
        }
    }

    pub fn get(&self, condition: SurfaceCondition) -> f64 {
        match condition {
            SurfaceCondition::AsphaltDry => self.asphalt_dry,
            SurfaceCondition::AsphaltWet => self.asphalt_wet,
            SurfaceCondition::Gravel => self.gravel,
            SurfaceCondition::Mud => self.mud,
            SurfaceCondition::Snow => self.snow,
            SurfaceCondition::Ice => self.ice,
        }
    }
}

/// Terrain category data. Rolling resistance and noise are descriptive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerrainProfile {
    pub modifiers: ConditionModifiers,
    /// Rolling resistance relative to a passenger tyre.
    pub rolling_resistance: f64,
    pub noise_level_db: f64,
}

pub fn terrain_profile(category: TerrainCategory) -> TerrainProfile {
    let (modifiers, rolling_resistance, noise_level_db) = match category {
        TerrainCategory::Passenger => (ConditionModifiers::new(1.00, 1.00, 0.90, 0.75, 0.80, 0.85), 1.00, 70.0),
        TerrainCategory::Highway => (ConditionModifiers::new(1.00, 1.00, 0.88, 0.72, 0.82, 0.85), 0.95, 69.0),
        TerrainCategory::AllTerrain => (ConditionModifiers::new(0.95, 0.93, 1.10, 1.15, 1.05, 0.90), 1.10, 72.0),
        TerrainCategory::MudTerrain => (ConditionModifiers::new(0.88, 0.85, 1.15, 1.35, 1.00, 0.80), 1.30, 76.0),
        TerrainCategory::RuggedTerrain => (ConditionModifiers::new(0.92, 0.90, 1.15, 1.25, 1.02, 0.85), 1.20, 74.0),
        TerrainCategory::Winter => (ConditionModifiers::new(0.92, 0.98, 0.95, 0.90, 1.35, 1.30), 1.05, 71.0),
        TerrainCategory::AllSeason => (ConditionModifiers::new(0.98, 0.98, 0.92, 0.80, 1.05, 0.95), 1.00, 70.0),
        TerrainCategory::AllWeather => (ConditionModifiers::new(0.97, 1.00, 0.95, 0.85, 1.20, 1.10), 1.02, 71.0),
        TerrainCategory::HighPerformance => (ConditionModifiers::new(1.08, 1.03, 0.85, 0.70, 0.70, 0.75), 1.05, 72.0),
        TerrainCategory::UltraHighPerformance => {
            (ConditionModifiers::new(1.12, 1.02, 0.80, 0.65, 0.60, 0.70), 1.08, 73.0)
        }
    };
    TerrainProfile {
        modifiers,
        rolling_resistance,
        noise_level_db,
    }
}

// --- Tread patterns ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatternProfile {
    pub dry_grip: f64,
    pub wet_grip: f64,
    /// Divides aquaplaning loss.
    pub aquaplaning_resist: f64,
    pub cornering_stability: f64,
    /// Not published for every pattern.
    pub wear_evenness: Option<f64>,
}

pub fn pattern_profile(pattern: PatternDirection) -> PatternProfile {
    match pattern {
        PatternDirection::Symmetrical => PatternProfile {
            dry_grip: 1.00,
            wet_grip: 1.00,
            aquaplaning_resist: 1.00,
            cornering_stability: 1.00,
            wear_evenness: Some(1.05),
        },
        PatternDirection::Directional => PatternProfile {
            dry_grip: 0.98,
            wet_grip: 1.06,
            aquaplaning_resist: 1.12,
            cornering_stability: 0.97,
            wear_evenness: Some(0.95),
        },
        PatternDirection::Asymmetrical => PatternProfile {
            dry_grip: 1.04,
            wet_grip: 1.03,
            aquaplaning_resist: 1.03,
            cornering_stability: 1.06,
            wear_evenness: Some(1.00),
        },
        PatternDirection::AsymmetricalDirectional => PatternProfile {
            dry_grip: 1.05,
            wet_grip: 1.07,
            aquaplaning_resist: 1.10,
            cornering_stability: 1.05,
            wear_evenness: None,
        },
    }
}

// --- Vehicles ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleProfile {
    pub mass_kg: f64,
    pub drag_coefficient: f64,
    pub frontal_area_m2: f64,
    /// Braking grip relative to a sedan. Distance scales with the inverse.
    pub handling_factor: f64,
    pub zero_to_hundred_s: f64,
    pub top_speed_kmh: f64,
    /// Engine braking deceleration at speed with the throttle closed (m/s²).
    pub engine_brake_mps2: f64,
}

impl VehicleProfile {
    const fn new(
        mass_kg: f64,
        drag_coefficient: f64,
        frontal_area_m2: f64,
        handling_factor: f64,
        zero_to_hundred_s: f64,
        top_speed_kmh: f64,
        engine_brake_mps2: f64,
    ) -> Self {
        Self {
            mass_kg,
            drag_coefficient,
            frontal_area_m2,
            handling_factor,
            zero_to_hundred_s,
            top_speed_kmh,
            engine_brake_mps2,
        }
    }
}

pub fn vehicle_profile(class: VehicleClass) -> VehicleProfile {
    match class {
        VehicleClass::Hatchback => VehicleProfile::new(1150.0, 0.31, 2.1, 1.02, 11.0, 180.0, 0.55),
        VehicleClass::Sedan => VehicleProfile::new(1450.0, 0.28, 2.2, 1.00, 9.0, 210.0, 0.50),
        VehicleClass::Suv => VehicleProfile::new(2000.0, 0.35, 2.7, 0.93, 8.5, 200.0, 0.60),
        VehicleClass::Pickup => VehicleProfile::new(2300.0, 0.42, 3.0, 0.90, 9.5, 180.0, 0.65),
        VehicleClass::Van => VehicleProfile::new(2400.0, 0.38, 3.6, 0.88, 12.5, 160.0, 0.70),
        VehicleClass::SportsCar => VehicleProfile::new(1400.0, 0.30, 2.0, 1.08, 4.5, 280.0, 0.45),
        VehicleClass::Truck => VehicleProfile::new(7500.0, 0.60, 6.5, 0.78, 25.0, 120.0, 0.90),
    }
}

// --- Trailers ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailerProfile {
    /// Fraction of its own mass the trailer brakes can stop.
    pub brake_fraction: f64,
    /// Typical laden mass, used for presets (kg).
    pub typical_mass_kg: f64,
}

pub fn trailer_profile(trailer: TrailerType) -> TrailerProfile {
    let (brake_fraction, typical_mass_kg) = match trailer {
        TrailerType::None => (1.0, 0.0),
        TrailerType::Unbraked => (0.0, 600.0),
        TrailerType::Caravan => (0.55, 1400.0),
        TrailerType::Boat => (0.40, 1200.0),
        TrailerType::Horsebox => (0.70, 2200.0),
        TrailerType::Heavy => (0.95, 3500.0),
    };
    TrailerProfile {
        brake_fraction,
        typical_mass_kg,
    }
}
