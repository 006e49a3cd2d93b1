//! Enumeration types used throughout the estimator and the run simulation.
//!
//! Every categorical input has a stable snake_case key. Lookups by key are
//! total: anything unrecognised resolves to the variant's documented default
//! (and logs a warning) instead of failing. Serde goes through the same
//! lookup, so a malformed key in a JSON request degrades the same way.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A categorical input with a stable string key and a neutral fallback.
pub trait KeyedEnum: Sized + Copy + Default + 'static {
    /// Human-readable name of the category, used in diagnostics.
    const KIND: &'static str;
    /// All variants, in presentation order.
    const ALL: &'static [Self];

    /// Stable snake_case key.
    fn key(self) -> &'static str;

    /// Resolve a key, ignoring case, spaces, hyphens and underscores.
    /// Unknown keys resolve to `Self::default()`.
    fn from_key(key: &str) -> Self {
        let wanted = compact(key);
        match Self::ALL.iter().copied().find(|v| compact(v.key()) == wanted) {
            Some(value) => value,
            None => {
                let fallback = Self::default();
                tracing::warn!(
                    kind = Self::KIND,
                    key,
                    fallback = fallback.key(),
                    "unknown key, using fallback"
                );
                fallback
            }
        }
    }
}

fn compact(key: &str) -> String {
    key.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Wires serde and `Display` through the `KeyedEnum` key.
macro_rules! keyed_conversions {
    ($($ty:ty),* $(,)?) => {$(
        impl From<String> for $ty {
            fn from(key: String) -> Self {
                <$ty as KeyedEnum>::from_key(&key)
            }
        }

        impl From<$ty> for &'static str {
            fn from(value: $ty) -> Self {
                value.key()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }
    )*};
}

/// Road surface under the tyres.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Surface {
    #[default]
    Asphalt,
    Concrete,
    Cobblestone,
    Gravel,
    Dirt,
    Sand,
    Grass,
    Mud,
    Snow,
    Ice,
}

impl KeyedEnum for Surface {
    const KIND: &'static str = "surface";
    const ALL: &'static [Self] = &[
        Self::Asphalt,
        Self::Concrete,
        Self::Cobblestone,
        Self::Gravel,
        Self::Dirt,
        Self::Sand,
        Self::Grass,
        Self::Mud,
        Self::Snow,
        Self::Ice,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Asphalt => "asphalt",
            Self::Concrete => "concrete",
            Self::Cobblestone => "cobblestone",
            Self::Gravel => "gravel",
            Self::Dirt => "dirt",
            Self::Sand => "sand",
            Self::Grass => "grass",
            Self::Mud => "mud",
            Self::Snow => "snow",
            Self::Ice => "ice",
        }
    }
}

impl Surface {
    /// Snow and ice are scored by snow traction rather than dry/wet grip.
    pub fn is_winter(self) -> bool {
        matches!(self, Self::Snow | Self::Ice)
    }
}

/// EU tyre-label wet grip grade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum WetGripGrade {
    A,
    B,
    /// Neutral reference grade.
    #[default]
    C,
    D,
    E,
}

impl KeyedEnum for WetGripGrade {
    const KIND: &'static str = "wet grip grade";
    const ALL: &'static [Self] = &[Self::A, Self::B, Self::C, Self::D, Self::E];

    fn key(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
            Self::D => "d",
            Self::E => "e",
        }
    }
}

impl WetGripGrade {
    /// Upper-case label as printed on the tyre label.
    pub fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
        }
    }
}

/// Seasonal / usage tyre type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum TyreType {
    #[default]
    Summer,
    AllSeason,
    Winter,
    AllTerrain,
    MudTerrain,
}

impl KeyedEnum for TyreType {
    const KIND: &'static str = "tyre type";
    const ALL: &'static [Self] = &[
        Self::Summer,
        Self::AllSeason,
        Self::Winter,
        Self::AllTerrain,
        Self::MudTerrain,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Summer => "summer",
            Self::AllSeason => "all_season",
            Self::Winter => "winter",
            Self::AllTerrain => "all_terrain",
            Self::MudTerrain => "mud_terrain",
        }
    }
}

/// Rubber compound family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum TyreCompound {
    Economy,
    Touring,
    #[default]
    Standard,
    Sport,
    Performance,
    /// Semi-slick: strong when dry, poor in standing water.
    Track,
}

impl KeyedEnum for TyreCompound {
    const KIND: &'static str = "tyre compound";
    const ALL: &'static [Self] = &[
        Self::Economy,
        Self::Touring,
        Self::Standard,
        Self::Sport,
        Self::Performance,
        Self::Track,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Economy => "economy",
            Self::Touring => "touring",
            Self::Standard => "standard",
            Self::Sport => "sport",
            Self::Performance => "performance",
            Self::Track => "track",
        }
    }
}

/// Tyre terrain category. Applied as a post-hoc distance correction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum TerrainCategory {
    #[default]
    Passenger,
    Highway,
    AllTerrain,
    MudTerrain,
    RuggedTerrain,
    Winter,
    AllSeason,
    AllWeather,
    HighPerformance,
    UltraHighPerformance,
}

impl KeyedEnum for TerrainCategory {
    const KIND: &'static str = "terrain category";
    const ALL: &'static [Self] = &[
        Self::Passenger,
        Self::Highway,
        Self::AllTerrain,
        Self::MudTerrain,
        Self::RuggedTerrain,
        Self::Winter,
        Self::AllSeason,
        Self::AllWeather,
        Self::HighPerformance,
        Self::UltraHighPerformance,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Passenger => "passenger",
            Self::Highway => "highway",
            Self::AllTerrain => "all_terrain",
            Self::MudTerrain => "mud_terrain",
            Self::RuggedTerrain => "rugged_terrain",
            Self::Winter => "winter",
            Self::AllSeason => "all_season",
            Self::AllWeather => "all_weather",
            Self::HighPerformance => "high_performance",
            Self::UltraHighPerformance => "ultra_high_performance",
        }
    }
}

/// Tread pattern direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum PatternDirection {
    #[default]
    Symmetrical,
    Directional,
    Asymmetrical,
    AsymmetricalDirectional,
}

impl KeyedEnum for PatternDirection {
    const KIND: &'static str = "pattern direction";
    const ALL: &'static [Self] = &[
        Self::Symmetrical,
        Self::Directional,
        Self::Asymmetrical,
        Self::AsymmetricalDirectional,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Symmetrical => "symmetrical",
            Self::Directional => "directional",
            Self::Asymmetrical => "asymmetrical",
            Self::AsymmetricalDirectional => "asymmetrical_directional",
        }
    }
}

/// Vehicle body class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum VehicleClass {
    Hatchback,
    #[default]
    Sedan,
    Suv,
    Pickup,
    Van,
    SportsCar,
    /// Light goods vehicle, 7.5 t.
    Truck,
}

impl KeyedEnum for VehicleClass {
    const KIND: &'static str = "vehicle class";
    const ALL: &'static [Self] = &[
        Self::Hatchback,
        Self::Sedan,
        Self::Suv,
        Self::Pickup,
        Self::Van,
        Self::SportsCar,
        Self::Truck,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Hatchback => "hatchback",
            Self::Sedan => "sedan",
            Self::Suv => "suv",
            Self::Pickup => "pickup",
            Self::Van => "van",
            Self::SportsCar => "sports_car",
            Self::Truck => "truck",
        }
    }
}

/// Towed trailer kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum TrailerType {
    /// Nothing hitched.
    #[default]
    None,
    /// Light trailer without its own brakes.
    Unbraked,
    /// Overrun-braked caravan.
    Caravan,
    /// Boat trailer with surge brakes.
    Boat,
    Horsebox,
    /// Heavy trailer with electric brakes on every axle.
    Heavy,
}

impl KeyedEnum for TrailerType {
    const KIND: &'static str = "trailer type";
    const ALL: &'static [Self] = &[
        Self::None,
        Self::Unbraked,
        Self::Caravan,
        Self::Boat,
        Self::Horsebox,
        Self::Heavy,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Unbraked => "unbraked",
            Self::Caravan => "caravan",
            Self::Boat => "boat",
            Self::Horsebox => "horsebox",
            Self::Heavy => "heavy",
        }
    }
}

/// Wind direction relative to travel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum WindDirection {
    /// Blowing against the vehicle; shortens the stop.
    Headwind,
    #[default]
    Crosswind,
    /// Blowing with the vehicle; lengthens the stop.
    Tailwind,
}

impl KeyedEnum for WindDirection {
    const KIND: &'static str = "wind direction";
    const ALL: &'static [Self] = &[Self::Headwind, Self::Crosswind, Self::Tailwind];

    fn key(self) -> &'static str {
        match self {
            Self::Headwind => "headwind",
            Self::Crosswind => "crosswind",
            Self::Tailwind => "tailwind",
        }
    }
}

impl WindDirection {
    /// -1 headwind, 0 crosswind, +1 tailwind.
    pub fn sign(self) -> f64 {
        match self {
            Self::Headwind => -1.0,
            Self::Crosswind => 0.0,
            Self::Tailwind => 1.0,
        }
    }
}

/// Named weather presets offered by the game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum WeatherPreset {
    #[default]
    Dry,
    Damp,
    Rain,
    HeavyRain,
    StandingWater,
}

impl KeyedEnum for WeatherPreset {
    const KIND: &'static str = "weather preset";
    const ALL: &'static [Self] = &[
        Self::Dry,
        Self::Damp,
        Self::Rain,
        Self::HeavyRain,
        Self::StandingWater,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::Dry => "dry",
            Self::Damp => "damp",
            Self::Rain => "rain",
            Self::HeavyRain => "heavy_rain",
            Self::StandingWater => "standing_water",
        }
    }
}

impl WeatherPreset {
    /// Water film depth the preset stands for (mm).
    pub fn water_depth_mm(self) -> f64 {
        match self {
            Self::Dry => 0.0,
            Self::Damp => 0.2,
            Self::Rain => 0.7,
            Self::HeavyRain => 1.5,
            Self::StandingWater => 3.0,
        }
    }
}

/// Built-in scenarios offered on the game's menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum ScenarioId {
    /// New tyres on a dry road.
    #[default]
    BaselineDry,
    MotorwayRain,
    /// Bald, old, grade E tyres in rain.
    WornTyresInRain,
    /// Steep icy downhill on summer tyres.
    IcyDescent,
    CaravanHoliday,
    /// Long alpine descent with cooked brakes.
    MountainPassFade,
}

impl KeyedEnum for ScenarioId {
    const KIND: &'static str = "scenario";
    const ALL: &'static [Self] = &[
        Self::BaselineDry,
        Self::MotorwayRain,
        Self::WornTyresInRain,
        Self::IcyDescent,
        Self::CaravanHoliday,
        Self::MountainPassFade,
    ];

    fn key(self) -> &'static str {
        match self {
            Self::BaselineDry => "baseline_dry",
            Self::MotorwayRain => "motorway_rain",
            Self::WornTyresInRain => "worn_tyres_in_rain",
            Self::IcyDescent => "icy_descent",
            Self::CaravanHoliday => "caravan_holiday",
            Self::MountainPassFade => "mountain_pass_fade",
        }
    }
}

keyed_conversions!(
    Surface,
    WetGripGrade,
    TyreType,
    TyreCompound,
    TerrainCategory,
    PatternDirection,
    VehicleClass,
    TrailerType,
    WindDirection,
    WeatherPreset,
    ScenarioId,
);

/// Surface condition family used to index terrain-category modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceCondition {
    AsphaltDry,
    AsphaltWet,
    Gravel,
    Mud,
    Snow,
    Ice,
}

/// Winter marking a tyre qualifies for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnowCertification {
    #[default]
    None,
    /// Mud and snow marking.
    MudAndSnow,
    /// Three-peak mountain snowflake.
    ThreePeakMountainSnowflake,
}

/// One entry of a factor breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Factor {
    // --- Friction multipliers ---
    Weather,
    Grade,
    Tread,
    Age,
    Pressure,
    Width,
    Temperature,
    BrakeFade,
    Compound,
    TyreType,
    VehicleLoad,
    Abs,
    Aquaplaning,

    // --- Distance corrections ---
    /// Deceleration per unit of `g * mu` after the slope term.
    Slope,
    /// Multiplies distance.
    Wind,
    /// Divides distance.
    TrailerCoverage,
    /// Divides distance.
    TerrainPattern,
}

impl Factor {
    /// Multipliers that make up the effective friction coefficient.
    pub const FRICTION: [Factor; 13] = [
        Factor::Weather,
        Factor::Grade,
        Factor::Tread,
        Factor::Age,
        Factor::Pressure,
        Factor::Width,
        Factor::Temperature,
        Factor::BrakeFade,
        Factor::Compound,
        Factor::TyreType,
        Factor::VehicleLoad,
        Factor::Abs,
        Factor::Aquaplaning,
    ];

    pub fn is_friction_multiplier(self) -> bool {
        Self::FRICTION.contains(&self)
    }

    /// Brake hardware terms. They limit braking but not drive traction.
    pub fn is_braking_system(self) -> bool {
        matches!(self, Self::BrakeFade | Self::Abs)
    }
}

/// How far the stop ran, for UI colouring.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopSeverity {
    #[default]
    Normal,
    /// Longer than 500 m.
    Extreme,
    /// Longer than 1000 m.
    Critical,
    CannotStop,
}

/// Run phase. Accelerating until the brake is engaged, never back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrivingPhase {
    #[default]
    Accelerating,
    Braking,
}

/// State of a throttle or brake button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PedalState {
    #[default]
    Released,
    Pressed,
}

/// What releasing the brake button does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrakeMode {
    /// One press commits to a full stop; release is ignored.
    #[default]
    CommitOnPress,
    /// Releasing switches to coasting until pressed again.
    HoldToBrake,
}
