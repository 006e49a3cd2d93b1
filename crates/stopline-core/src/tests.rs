#[cfg(test)]
mod tests {
    use crate::commands::DriverCommand;
    use crate::enums::*;
    use crate::result::{BrakingResult, FactorBreakdown};
    use crate::state::{RunOutcome, RunSnapshot, RunStats};
    use crate::tables::*;
    use crate::types::{BrakingRequest, Trailer};

    fn keyed_round_trip<T>()
    where
        T: KeyedEnum + PartialEq + std::fmt::Debug + serde::Serialize + serde::de::DeserializeOwned,
    {
        for &v in T::ALL {
            let json = serde_json::to_string(&v).unwrap();
            assert_eq!(json, format!("\"{}\"", v.key()));
            let back: T = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
            assert_eq!(T::from_key(v.key()), v);
        }
    }

    /// Every keyed enum serialises as its key and reads back.
    #[test]
    fn test_keyed_enums_serde() {
        keyed_round_trip::<Surface>();
        keyed_round_trip::<WetGripGrade>();
        keyed_round_trip::<TyreType>();
        keyed_round_trip::<TyreCompound>();
        keyed_round_trip::<TerrainCategory>();
        keyed_round_trip::<PatternDirection>();
        keyed_round_trip::<VehicleClass>();
        keyed_round_trip::<TrailerType>();
        keyed_round_trip::<WindDirection>();
        keyed_round_trip::<WeatherPreset>();
        keyed_round_trip::<ScenarioId>();
    }

    #[test]
    fn test_from_key_ignores_case_and_separators() {
        assert_eq!(TyreType::from_key("All-Season"), TyreType::AllSeason);
        assert_eq!(TyreType::from_key("allseason"), TyreType::AllSeason);
        assert_eq!(TerrainCategory::from_key("Ultra High Performance"), TerrainCategory::UltraHighPerformance);
        assert_eq!(WetGripGrade::from_key("A"), WetGripGrade::A);
        assert_eq!(Surface::from_key("  ICE"), Surface::Ice);
    }

    #[test]
    fn test_unknown_keys_fall_back_to_default() {
        assert_eq!(Surface::from_key("lava"), Surface::Asphalt);
        assert_eq!(WetGripGrade::from_key("Z"), WetGripGrade::C);
        assert_eq!(TerrainCategory::from_key("hovercraft"), TerrainCategory::Passenger);
        assert_eq!(PatternDirection::from_key(""), PatternDirection::Symmetrical);
        assert_eq!(VehicleClass::from_key("tank"), VehicleClass::Sedan);
        assert_eq!(TrailerType::from_key("?"), TrailerType::None);
    }

    #[test]
    fn test_unknown_keys_in_json_fall_back() {
        let json = r#"{"surface": "moon_dust", "terrain": "spaceship", "pattern": "zigzag"}"#;
        let request: BrakingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.surface, Surface::Asphalt);
        assert_eq!(request.terrain, TerrainCategory::Passenger);
        assert_eq!(request.pattern, PatternDirection::Symmetrical);
    }

    #[test]
    fn test_partial_request_uses_baseline() {
        let request: BrakingRequest = serde_json::from_str(r#"{"speed_kmh": 50.0, "grade": "a"}"#).unwrap();
        let baseline = BrakingRequest::default();
        assert_eq!(request.speed_kmh, 50.0);
        assert_eq!(request.grade, WetGripGrade::A);
        assert_eq!(request.tread_depth_mm, baseline.tread_depth_mm);
        assert_eq!(request.pressure, baseline.pressure);
        assert!(request.abs);
    }

    #[test]
    fn test_request_serde_roundtrip() {
        let request = BrakingRequest {
            surface: Surface::Gravel,
            trailer: Trailer::typical(TrailerType::Caravan),
            wind: crate::types::Wind::new(30.0, WindDirection::Tailwind),
            ..Default::default()
        };
        let json = serde_json::to_string(&request).unwrap();
        let back: BrakingRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request, back);
    }

    #[test]
    fn test_request_builders_copy() {
        let base = BrakingRequest::default();
        let fast = base.with_speed(130.0);
        assert_eq!(fast.speed_kmh, 130.0);
        assert_eq!(base.speed_kmh, 100.0);
        assert_eq!(base.with_grade(WetGripGrade::E).grade, WetGripGrade::E);
        assert_eq!(base.with_weather(WeatherPreset::Rain).water_depth_mm, 0.7);
        assert!(base.with_weather(WeatherPreset::Damp).is_wet());
        assert!(!base.is_wet());
    }

    #[test]
    fn test_unhitched_trailer_has_no_mass() {
        let trailer = Trailer::new(TrailerType::None, 900.0);
        assert_eq!(trailer.hitched_mass_kg(), 0.0);
        assert_eq!(Trailer::new(TrailerType::Boat, -50.0).hitched_mass_kg(), 0.0);
        assert_eq!(Trailer::new(TrailerType::Boat, f64::NAN).hitched_mass_kg(), 0.0);
        assert_eq!(Trailer::typical(TrailerType::Horsebox).hitched_mass_kg(), 2200.0);
    }

    // ---- Tables ----

    #[test]
    fn test_surface_friction_ordering() {
        for &surface in Surface::ALL {
            let p = surface_profile(surface);
            assert!(p.wet_friction <= p.peak_friction, "{surface}: wet above peak");
            assert!(p.slide_friction <= p.peak_friction, "{surface}: slide above peak");
            assert!(p.wet_friction > 0.0 && p.rolling_resistance_factor > 0.0);
        }
    }

    #[test]
    fn test_aquaplaning_grid_monotone() {
        for row in AQUAPLANING_GRID.iter() {
            for pair in row.windows(2) {
                assert!(pair[0] <= pair[1], "grid row not increasing with tread: {row:?}");
            }
        }
        for col in 0..AQUAPLANING_TREADS_MM.len() {
            for r in 1..AQUAPLANING_SPEEDS_KMH.len() {
                assert!(AQUAPLANING_GRID[r][col] <= AQUAPLANING_GRID[r - 1][col]);
            }
        }
        assert!(AQUAPLANING_GRID[0].iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_grade_multipliers_ordered() {
        for pair in WetGripGrade::ALL.windows(2) {
            assert!(grade_wet_multiplier(pair[0]) > grade_wet_multiplier(pair[1]));
        }
        assert_eq!(grade_wet_multiplier(WetGripGrade::C), 1.0);
    }

    #[test]
    fn test_condition_modifiers_missing_keys_neutral() {
        let mods: ConditionModifiers = serde_json::from_str(r#"{"snow": 1.3}"#).unwrap();
        assert_eq!(mods.snow, 1.3);
        assert_eq!(mods.get(SurfaceCondition::AsphaltDry), 1.0);
        assert_eq!(mods.get(SurfaceCondition::Ice), 1.0);
    }

    #[test]
    fn test_surface_condition_mapping() {
        assert_eq!(surface_condition(Surface::Concrete, false), SurfaceCondition::AsphaltDry);
        assert_eq!(surface_condition(Surface::Cobblestone, true), SurfaceCondition::AsphaltWet);
        assert_eq!(surface_condition(Surface::Sand, true), SurfaceCondition::Gravel);
        assert_eq!(surface_condition(Surface::Grass, false), SurfaceCondition::Mud);
        assert_eq!(surface_condition(Surface::Ice, true), SurfaceCondition::Ice);
    }

    #[test]
    fn test_sedan_is_reference_vehicle() {
        assert_eq!(vehicle_profile(VehicleClass::Sedan).handling_factor, 1.0);
        assert!(vehicle_profile(VehicleClass::Suv).handling_factor < 1.0);
        assert!(vehicle_profile(VehicleClass::Truck).handling_factor < vehicle_profile(VehicleClass::Van).handling_factor);
    }

    #[test]
    fn test_braking_system_factors() {
        let brake_terms: Vec<Factor> = Factor::FRICTION.into_iter().filter(|f| f.is_braking_system()).collect();
        assert_eq!(brake_terms, vec![Factor::BrakeFade, Factor::Abs]);
        assert!(!Factor::TerrainPattern.is_braking_system());
    }

    // ---- Results ----

    fn sample_result(distance_m: f64) -> BrakingResult {
        let mut factors = FactorBreakdown::new();
        factors.insert(Factor::Grade, 1.06);
        factors.insert(Factor::Wind, 1.0);
        BrakingResult {
            base_friction: 0.8,
            effective_friction: 0.848,
            deceleration_mps2: 8.32,
            effective_deceleration_mps2: 8.32,
            distance_m,
            can_stop: distance_m.is_finite(),
            factors,
            snow_certification: SnowCertification::None,
        }
    }

    #[test]
    fn test_infinite_distance_serialises_as_null() {
        let result = sample_result(f64::INFINITY);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"distance_m\":null"), "{json}");
        let back: BrakingResult = serde_json::from_str(&json).unwrap();
        assert!(back.distance_m.is_infinite());
        assert!(!back.can_stop);
    }

    #[test]
    fn test_breakdown_serialises_by_name() {
        let result = sample_result(46.4);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"grade\":1.06"), "{json}");
        let back: BrakingResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
        assert_eq!(back.factors.friction_product(), 1.06);
    }

    #[test]
    fn test_severity_thresholds() {
        assert_eq!(StopSeverity::from_distance(46.0), StopSeverity::Normal);
        assert_eq!(StopSeverity::from_distance(500.0), StopSeverity::Normal);
        assert_eq!(StopSeverity::from_distance(500.1), StopSeverity::Extreme);
        assert_eq!(StopSeverity::from_distance(1000.1), StopSeverity::Critical);
        assert_eq!(StopSeverity::from_distance(f64::INFINITY), StopSeverity::CannotStop);
        assert_eq!(StopSeverity::from_distance(f64::NAN), StopSeverity::CannotStop);
        assert!(StopSeverity::Critical > StopSeverity::Extreme);
    }

    // ---- Commands and snapshots ----

    #[test]
    fn test_driver_command_tagged() {
        let json = serde_json::to_string(&DriverCommand::EngageBrake).unwrap();
        assert_eq!(json, r#"{"type":"EngageBrake"}"#);
        let back: DriverCommand = serde_json::from_str(r#"{"type":"ReleaseThrottle"}"#).unwrap();
        assert_eq!(back, DriverCommand::ReleaseThrottle);
    }

    #[test]
    fn test_run_snapshot_serde() {
        let snapshot = RunSnapshot {
            phase: DrivingPhase::Braking,
            throttle: PedalState::Released,
            brake: PedalState::Pressed,
            speed_kmh: 0.0,
            position_m: 180.0,
            braking_distance_m: 46.3,
            planned_distance_m: Some(46.38),
            stats: RunStats {
                elapsed_secs: 12.0,
                peak_speed_kmh: 100.0,
                time_to_peak_secs: 9.0,
                brake_position_m: Some(133.7),
                brake_speed_kmh: Some(100.0),
                braking_secs: 3.3,
            },
            outcome: Some(RunOutcome::Stopped {
                distance_m: 46.3,
                severity: StopSeverity::Normal,
            }),
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: RunSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
        assert_eq!(back.outcome.map(|o| o.distance_m()), Some(46.3));
    }

    #[test]
    fn test_cannot_stop_outcome_severity() {
        let outcome = RunOutcome::CannotStop { distance_m: 10_000.5 };
        assert_eq!(outcome.severity(), StopSeverity::CannotStop);
    }
}
