//! JavaScript bindings for the rendering client
//!
//! Records cross the boundary as JSON strings. Every returned value is a
//! fresh copy; the client never holds a handle into crate state.

use wasm_bindgen::prelude::*;

use crate::putt::PuttInput;
use crate::scaling::{CourseFeature, ViewAnchor};
use crate::settings::Settings;
use crate::spectators;
use crate::state::GameState;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger already initialized: {e}").into());
    }
    log::info!("putt-vision core ready");
}

fn settings_or_default(settings_json: Option<String>) -> Result<Settings, JsError> {
    match settings_json {
        Some(json) => Ok(Settings::from_json(&json)?),
        None => Ok(Settings::default()),
    }
}

/// `PuttInput` JSON in, `PuttOutcome` JSON out
#[wasm_bindgen(js_name = calculatePuttRecommendation)]
pub fn calculate_putt_recommendation(input_json: &str, settings_json: Option<String>) -> Result<String, JsError> {
    let settings = settings_or_default(settings_json)?;
    let input: PuttInput = serde_json::from_str(input_json)?;
    Ok(serde_json::to_string(&settings.recommend(&input))?)
}

#[wasm_bindgen(js_name = getWorldUnitsPerFoot)]
pub fn get_world_units_per_foot(distance_feet: f32) -> f32 {
    crate::scaling::get_world_units_per_foot(distance_feet)
}

#[wasm_bindgen(js_name = computeWorldPosition)]
pub fn compute_world_position(distance_feet: f32, reference_z: f32) -> f32 {
    crate::scaling::compute_world_position(distance_feet, reference_z)
}

/// `GameState` JSON in, `ViewPlacement` JSON out
#[wasm_bindgen(js_name = placeBallAndHole)]
pub fn place_ball_and_hole(state_json: &str, anchor_json: &str, settings_json: Option<String>) -> Result<String, JsError> {
    let settings = settings_or_default(settings_json)?;
    let state: GameState = serde_json::from_str(state_json)?;
    let anchor: ViewAnchor = serde_json::from_str(anchor_json)?;
    Ok(serde_json::to_string(&settings.engine().place_ball_and_hole(&state, &anchor))?)
}

/// `CourseFeature[]` JSON in, `FeaturePosition[]` JSON out (same order)
#[wasm_bindgen(js_name = resolveFeatures)]
pub fn resolve_features(
    features_json: &str,
    state_json: &str,
    anchor_json: &str,
    settings_json: Option<String>,
) -> Result<String, JsError> {
    let settings = settings_or_default(settings_json)?;
    let features: Vec<CourseFeature> = serde_json::from_str(features_json)?;
    let state: GameState = serde_json::from_str(state_json)?;
    let anchor: ViewAnchor = serde_json::from_str(anchor_json)?;
    Ok(serde_json::to_string(&settings.resolver(anchor).resolve_all(&features, &state))?)
}

/// Omit `seed` for a fresh layout every call
#[wasm_bindgen(js_name = generateSpectatorConfig)]
pub fn generate_spectator_config(
    hole_distance_feet: f32,
    seed: Option<f64>,
    settings_json: Option<String>,
) -> Result<String, JsError> {
    let settings = settings_or_default(settings_json)?;
    let seed = seed.filter(|s| s.is_finite()).map(|s| s.abs() as u64);
    Ok(serde_json::to_string(&settings.spectators_for(hole_distance_feet, seed))?)
}

#[wasm_bindgen(js_name = challengeSpectatorConfig)]
pub fn challenge_spectator_config(hole_distance_feet: f32, level: u32, attempt_number: u32) -> Result<String, JsError> {
    Ok(serde_json::to_string(&spectators::challenge_config(hole_distance_feet, level, attempt_number))?)
}

/// Pass `Date.now()` as `timestamp_ms`
#[wasm_bindgen(js_name = practiceSpectatorConfig)]
pub fn practice_spectator_config(hole_distance_feet: f32, timestamp_ms: f64) -> Result<String, JsError> {
    Ok(serde_json::to_string(&spectators::practice_config(hole_distance_feet, timestamp_ms))?)
}
