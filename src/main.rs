//! Putt Vision entry point
//!
//! The web client loads the library directly (see `bridge`). Natively this
//! prints a sample recommendation, view placement and spectator layout.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Putt Vision (native) starting...");

    if let Err(e) = run_demo() {
        log::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is bridge::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn run_demo() -> Result<(), serde_json::Error> {
    use putt_vision::scaling::{CourseFeature, FeatureCategory, ViewAnchor};
    use putt_vision::spectators::challenge_config;
    use putt_vision::{DistanceUnit, GameState, PuttInput, PuttingStyle, Settings};

    let settings = Settings::load();
    log::info!(
        "Trajectory detail {} ({} segments), {} scaling",
        settings.trajectory_detail.as_str(),
        settings.trajectory_samples(),
        settings.scaling.as_str()
    );

    let input = PuttInput {
        distance: 4.0,
        distance_unit: DistanceUnit::Yards,
        slope_percent: 2.0,
        break_percent: 8.0,
        break_direction_deg: 90.0,
        green_speed_stimp: 11.0,
        putting_style: PuttingStyle::SlightArc,
        ..settings.default_putt_input()
    };
    let outcome = settings.recommend(&input);
    println!("Recommendation:\n{}", serde_json::to_string_pretty(&outcome)?);

    let state = GameState::new_hole(420.0).advance_ball(260.0);
    let anchor = ViewAnchor::default();
    let placement = settings.engine().place_ball_and_hole(&state, &anchor);
    println!("View placement:\n{}", serde_json::to_string_pretty(&placement)?);

    let features = [
        CourseFeature::new(FeatureCategory::Pin, state.hole_position_yards),
        CourseFeature::new(FeatureCategory::Bunker, 395.0).with_lateral(-12.0),
        CourseFeature::new(FeatureCategory::Rough, 300.0).with_lateral(25.0),
    ];
    let resolved = settings.resolver(anchor).resolve_all(&features, &state);
    println!("Features:\n{}", serde_json::to_string_pretty(&resolved)?);

    let spectators = challenge_config(outcome.distance_feet, 1, 1);
    println!("Spectators:\n{}", serde_json::to_string_pretty(&spectators)?);

    Ok(())
}
