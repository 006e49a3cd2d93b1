//! Scenario definitions: hardcoded condition presets and the seeded
//! random challenge.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use stopline_core::enums::*;
use stopline_core::types::{BrakingRequest, Trailer, TyrePressure, Wind};

/// Build the braking request for a given scenario.
pub fn scenario_request(scenario: ScenarioId) -> BrakingRequest {
    match scenario {
        ScenarioId::BaselineDry => BrakingRequest::default(),
        ScenarioId::MotorwayRain => build_motorway_rain(),
        ScenarioId::WornTyresInRain => build_worn_tyres_in_rain(),
        ScenarioId::IcyDescent => build_icy_descent(),
        ScenarioId::CaravanHoliday => build_caravan_holiday(),
        ScenarioId::MountainPassFade => build_mountain_pass_fade(),
    }
}

/// 120 km/h on a wet motorway, decent tyres, a stiff headwind.
fn build_motorway_rain() -> BrakingRequest {
    BrakingRequest {
        speed_kmh: 120.0,
        grade: WetGripGrade::B,
        tread_depth_mm: 6.0,
        tyre_age_years: 2.0,
        terrain: TerrainCategory::Highway,
        wind: Wind::new(30.0, WindDirection::Headwind),
        ambient_temp_c: 12.0,
        ..BrakingRequest::default().with_weather(WeatherPreset::Rain)
    }
}

/// Legal-minimum tread on ten-year-old grade E tyres.
fn build_worn_tyres_in_rain() -> BrakingRequest {
    BrakingRequest {
        grade: WetGripGrade::E,
        tread_depth_mm: 1.6,
        tyre_age_years: 10.0,
        ..BrakingRequest::default().with_weather(WeatherPreset::Rain)
    }
}

/// 10 degrees downhill on ice with summer tyres in a frost. The grade
/// exceeds what the tyres can hold.
fn build_icy_descent() -> BrakingRequest {
    BrakingRequest {
        speed_kmh: 50.0,
        surface: Surface::Ice,
        tyre_type: TyreType::Summer,
        ambient_temp_c: -5.0,
        slope_deg: -10.0,
        ..BrakingRequest::default()
    }
}

/// Loaded SUV towing a caravan on a dry A-road.
fn build_caravan_holiday() -> BrakingRequest {
    BrakingRequest {
        speed_kmh: 90.0,
        vehicle: VehicleClass::Suv,
        trailer: Trailer::typical(TrailerType::Caravan),
        pressure: TyrePressure::new(33.0, 38.0),
        tyre_width_mm: 235.0,
        terrain: TerrainCategory::AllSeason,
        tyre_type: TyreType::AllSeason,
        ambient_temp_c: 24.0,
        ..BrakingRequest::default()
    }
}

/// Van at the bottom of a long alpine descent after riding the brakes.
fn build_mountain_pass_fade() -> BrakingRequest {
    BrakingRequest {
        speed_kmh: 80.0,
        vehicle: VehicleClass::Van,
        slope_deg: -6.0,
        brake_fade: 7.0,
        tyre_width_mm: 215.0,
        compound: TyreCompound::Touring,
        ..BrakingRequest::default()
    }
}

/// Random road and tyre conditions for the challenge mode. The same rng
/// state always yields the same request.
pub fn random_challenge(rng: &mut ChaCha8Rng) -> BrakingRequest {
    let weather = *WeatherPreset::ALL.choose(rng).unwrap_or(&WeatherPreset::Dry);
    let surface = *[Surface::Asphalt, Surface::Concrete, Surface::Cobblestone, Surface::Gravel]
        .choose(rng)
        .unwrap_or(&Surface::Asphalt);

    BrakingRequest {
        speed_kmh: rng.gen_range(30.0..130.0),
        grade: *WetGripGrade::ALL.choose(rng).unwrap_or(&WetGripGrade::C),
        tread_depth_mm: rng.gen_range(1.6..8.0),
        tyre_age_years: rng.gen_range(0.0..12.0),
        tyre_type: *TyreType::ALL.choose(rng).unwrap_or(&TyreType::Summer),
        pressure: TyrePressure::new(rng.gen_range(24.0..36.0), 32.0),
        surface,
        vehicle: *VehicleClass::ALL.choose(rng).unwrap_or(&VehicleClass::Sedan),
        ambient_temp_c: rng.gen_range(-5.0..35.0),
        slope_deg: rng.gen_range(-6.0..6.0),
        brake_fade: rng.gen_range(0.0..4.0),
        ..BrakingRequest::default().with_weather(weather)
    }
}

/// Challenge request for a seed, for sharing a run between players.
pub fn challenge_from_seed(seed: u64) -> BrakingRequest {
    random_challenge(&mut ChaCha8Rng::seed_from_u64(seed))
}
