// End-to-end checks of the public API as the rendering client uses it.

use putt_vision::scaling::{Calibration, CourseFeature, FeatureCategory, ViewAnchor};
use putt_vision::spectators::{SpectatorKind, SpectatorLayout, challenge_config};
use putt_vision::units::convert_default;
use putt_vision::{
    CoordinateScalingEngine, DistanceUnit, GameMode, GameState, PuttInput, ScalingStrategy, Settings,
    calculate_putt_recommendation, generate_spectator_config,
};

#[test]
fn flat_ten_footer() {
    let outcome = calculate_putt_recommendation(&PuttInput {
        distance: 10.0,
        slope_percent: 0.0,
        break_percent: 0.0,
        ..Default::default()
    });
    assert!((outcome.strength_percent - 100.0).abs() < 1e-4);
    assert_eq!(outcome.aim_point.x, 0.0);
    assert_eq!(outcome.aim_point.y, 0.0);
    assert!(outcome.success_probability > 0.0);
}

#[test]
fn uphill_five_percent() {
    let outcome = calculate_putt_recommendation(&PuttInput {
        slope_percent: 5.0,
        ..Default::default()
    });
    assert!((outcome.strength_percent - 107.5).abs() < 1e-4);
}

#[test]
fn breaking_putt_aims_right() {
    let outcome = calculate_putt_recommendation(&PuttInput {
        break_percent: 10.0,
        break_direction_deg: 45.0,
        green_speed_stimp: 10.0,
        distance: 10.0,
        ..Default::default()
    });
    assert!(outcome.aim_point.x > 0.0);
}

#[test]
fn same_putt_in_any_unit() {
    let feet = calculate_putt_recommendation(&PuttInput {
        distance: 12.0,
        ..Default::default()
    });
    let yards = calculate_putt_recommendation(&PuttInput {
        distance: 4.0,
        distance_unit: DistanceUnit::Yards,
        ..Default::default()
    });
    let paces = calculate_putt_recommendation(&PuttInput {
        distance: 4.0,
        distance_unit: DistanceUnit::Paces,
        pace_length_feet: 3.0,
        ..Default::default()
    });
    assert_eq!(feet, yards);
    assert_eq!(feet, paces);
}

#[test]
fn units_per_foot_steps_down_at_band_edges() {
    let engine = CoordinateScalingEngine::banded();
    let mut last = f32::INFINITY;
    for d in [1.0, 10.0, 10.01, 25.0, 25.01, 50.0, 50.01, 100.0, 100.01, 900.0] {
        let scale = engine.world_units_per_foot(d);
        assert!(scale <= last, "scale grew at {d} ft");
        last = scale;
    }
}

#[test]
fn feet_yards_round_trip() {
    for x in [0.0, 3.0, 17.5, 299.9, 900.0] {
        let back = convert_default(convert_default(x, DistanceUnit::Feet, DistanceUnit::Yards), DistanceUnit::Yards, DistanceUnit::Feet);
        assert!((back - x).abs() < 1e-3);
    }
}

#[test]
fn both_strategies_agree_on_builtin_calibrations() {
    for calibration in [Calibration::short_game(), Calibration::long_game()] {
        let averaged = CoordinateScalingEngine::from_calibration(&calibration);
        let banded = CoordinateScalingEngine::banded();
        for point in calibration.points() {
            let a = averaged.world_distance_yards(point.distance_yards);
            let b = banded.world_distance_yards(point.distance_yards);
            assert!(((a - b) / b).abs() <= 0.10, "{} yd: {a} vs {b}", point.distance_yards);
        }
    }
}

#[test]
fn whole_hole_stays_in_view() {
    let engine = CoordinateScalingEngine::banded();
    let anchor = ViewAnchor::default();

    let tee = GameState::new_hole(300.0);
    let far = engine.place_ball_and_hole(&tee, &anchor);
    let green = GameState::putting_green(3.0);
    let near = engine.place_ball_and_hole(&green, &anchor);

    // 300 yd compresses to 225 units, 3 ft stays at 3
    assert!((far.hole.z + 225.0).abs() < 1e-3);
    assert!((near.hole.z + 3.0).abs() < 1e-4);
}

#[test]
fn pin_visible_along_the_whole_hole() {
    let settings = Settings::default();
    let resolver = settings.resolver(ViewAnchor::default());
    let mut state = GameState::new_hole(450.0);
    let pin = CourseFeature::new(FeatureCategory::Pin, 450.0);

    while state.remaining_yards() > 0.0 {
        assert!(resolver.resolve(&pin, &state).visible);
        state = state.advance_ball(state.remaining_yards().min(60.0));
    }
    assert_eq!(state.mode, GameMode::Putt);
    assert_eq!(resolver.resolve(&pin, &state).scale, 1.0);
}

#[test]
fn spectator_layouts() {
    let zones = SpectatorLayout::default().exclusion_zones();
    for seed in 0..100u64 {
        let config = generate_spectator_config(24.0, Some(seed));
        assert_eq!(config, generate_spectator_config(24.0, Some(seed)));
        assert!(config.len() == 1 || config.len() == 2);
        for p in &config.placements {
            assert!(SpectatorKind::ALL.contains(&p.kind));
            assert!(!zones.contains(p.angle_deg));
        }
    }
    assert_eq!(challenge_config(24.0, 5, 3), challenge_config(24.0, 5, 3));
}

#[test]
fn settings_drive_strategy() {
    let settings = Settings::from_json(r#"{"scaling": {"kind": "averagedRatio", "unitsPerYard": 0.75}}"#).unwrap();
    assert_eq!(settings.scaling, ScalingStrategy::AveragedRatio { units_per_yard: 0.75 });
    let engine = settings.engine();
    assert!((engine.world_distance_yards(100.0) - 75.0).abs() < 1e-3);
}
