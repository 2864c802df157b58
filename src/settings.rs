//! Tunable configuration
//!
//! Persisted as JSON in LocalStorage on the web; native builds use defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::putt::{PuttInput, PuttOutcome, calculate_with_samples};
use crate::scaling::{CoordinateScalingEngine, FeatureVisibilityResolver, ScalingStrategy, ViewAnchor};
use crate::spectators::{SpectatorConfig, SpectatorLayout};
use crate::units::{DistanceUnit, sanitize_pace_length};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Trajectory resolution presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TrajectoryDetail {
    Low,
    #[default]
    Medium,
    High,
}

impl TrajectoryDetail {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrajectoryDetail::Low => "Low",
            TrajectoryDetail::Medium => "Medium",
            TrajectoryDetail::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(TrajectoryDetail::Low),
            "medium" | "med" => Some(TrajectoryDetail::Medium),
            "high" => Some(TrajectoryDetail::High),
            _ => None,
        }
    }

    /// Trajectory segments for this preset
    pub fn samples(&self) -> usize {
        match self {
            TrajectoryDetail::Low => 10,
            TrajectoryDetail::Medium => DEFAULT_TRAJECTORY_SAMPLES,
            TrajectoryDetail::High => 40,
        }
    }
}

/// Visualizer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    // === Putting ===
    /// Unit the distance control starts in
    pub default_unit: DistanceUnit,
    /// Player's stride length for paced distances
    pub pace_length_feet: f32,
    /// Ball path resolution
    pub trajectory_detail: TrajectoryDetail,

    // === View ===
    /// Banded or averaged-ratio scaling
    pub scaling: ScalingStrategy,
    /// Non-pin features beyond this fraction of the hole are hidden
    pub feature_visibility_fraction: f32,

    // === Spectators ===
    pub spectators: SpectatorLayout,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_unit: DistanceUnit::Feet,
            pace_length_feet: DEFAULT_PACE_LENGTH_FEET,
            trajectory_detail: TrajectoryDetail::Medium,

            scaling: ScalingStrategy::Banded,
            feature_visibility_fraction: DEFAULT_FEATURE_VISIBILITY_FRACTION,

            spectators: SpectatorLayout::default(),
        }
    }
}

impl Settings {
    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Copy with out-of-range values pulled back to something usable
    pub fn sanitized(&self) -> Self {
        let defaults = SpectatorLayout::default();
        let spectators = SpectatorLayout {
            min_radius: crate::finite_or(self.spectators.min_radius, defaults.min_radius).max(0.0),
            max_radius: crate::finite_or(self.spectators.max_radius, defaults.max_radius).max(0.0),
            exclude_sides: self.spectators.exclude_sides,
            min_separation_deg: crate::finite_or(self.spectators.min_separation_deg, defaults.min_separation_deg)
                .clamp(0.0, 180.0),
            max_attempts: self.spectators.max_attempts.clamp(1, 100),
        };

        let scaling = match self.scaling {
            ScalingStrategy::AveragedRatio { units_per_yard } if !(units_per_yard.is_finite() && units_per_yard > 0.0) => {
                log::warn!("Averaged scaling ratio {} is unusable, falling back to banded", units_per_yard);
                ScalingStrategy::Banded
            }
            other => other,
        };

        Self {
            default_unit: self.default_unit,
            pace_length_feet: sanitize_pace_length(self.pace_length_feet),
            trajectory_detail: self.trajectory_detail,
            scaling,
            feature_visibility_fraction: crate::finite_or(
                self.feature_visibility_fraction,
                DEFAULT_FEATURE_VISIBILITY_FRACTION,
            )
            .clamp(0.0, 1.0),
            spectators,
        }
    }

    pub fn trajectory_samples(&self) -> usize {
        self.trajectory_detail.samples()
    }

    /// Scaling engine for the configured strategy
    pub fn engine(&self) -> CoordinateScalingEngine {
        CoordinateScalingEngine::new(self.scaling)
    }

    /// Feature resolver anchored at `anchor`
    pub fn resolver(&self, anchor: ViewAnchor) -> FeatureVisibilityResolver {
        FeatureVisibilityResolver::new(self.engine(), anchor).with_visibility_fraction(self.feature_visibility_fraction)
    }

    /// Putt recommendation at the configured trajectory resolution
    pub fn recommend(&self, input: &PuttInput) -> PuttOutcome {
        calculate_with_samples(input, self.trajectory_samples())
    }

    /// Blank putt controls in the player's preferred unit and pace length
    pub fn default_putt_input(&self) -> PuttInput {
        PuttInput {
            distance_unit: self.default_unit,
            pace_length_feet: self.pace_length_feet,
            ..PuttInput::default()
        }
    }

    /// Spectator layout with the configured tuning
    pub fn spectators_for(&self, hole_distance_feet: f32, seed: Option<u64>) -> SpectatorConfig {
        self.spectators.generate(hole_distance_feet, seed)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "putt_vision_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!(
                            "Loaded settings from LocalStorage ({} trajectory, {} scaling)",
                            settings.trajectory_detail.as_str(),
                            settings.scaling.as_str()
                        );
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Settings not saved: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
