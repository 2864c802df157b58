//! Course feature visibility
//!
//! Decides whether a pin, bunker, rough patch or terrain piece is drawn for
//! the current game state, how large, and where. Queried once per feature per
//! state change; nothing here depends on time.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::engine::{CoordinateScalingEngine, ViewAnchor};
use crate::consts::DEFAULT_FEATURE_VISIBILITY_FRACTION;
use crate::finite_or;
use crate::state::{GameMode, GameState};
use crate::units::yards_to_feet;

/// Smallest pin scale in swing mode
const MIN_PIN_SCALE: f32 = 0.05;
/// Linear falloff floor for non-pin features (squared afterwards)
const MIN_FEATURE_FALLOFF: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureCategory {
    Pin,
    Bunker,
    Rough,
    Terrain,
}

impl FeatureCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureCategory::Pin => "pin",
            FeatureCategory::Bunker => "bunker",
            FeatureCategory::Rough => "rough",
            FeatureCategory::Terrain => "terrain",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "pin" | "flag" => Some(FeatureCategory::Pin),
            "bunker" | "sand" => Some(FeatureCategory::Bunker),
            "rough" => Some(FeatureCategory::Rough),
            "terrain" => Some(FeatureCategory::Terrain),
            _ => None,
        }
    }
}

/// A feature placed on the hole, measured from the tee
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseFeature {
    pub category: FeatureCategory,
    pub distance_yards: f32,
    /// Offset to the right of the tee-to-hole line
    #[serde(default)]
    pub lateral_yards: f32,
}

impl CourseFeature {
    pub fn new(category: FeatureCategory, distance_yards: f32) -> Self {
        Self {
            category,
            distance_yards,
            lateral_yards: 0.0,
        }
    }

    pub fn with_lateral(mut self, lateral_yards: f32) -> Self {
        self.lateral_yards = lateral_yards;
        self
    }
}

/// Where and how a feature renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturePosition {
    #[serde(with = "crate::wire::vec3")]
    pub world_position: Vec3,
    pub visible: bool,
    /// Mesh scale in [0, 1]
    pub scale: f32,
    /// Why the feature got this result (diagnostics only)
    pub reason: String,
}

/// Resolves feature visibility against one scaling engine and anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVisibilityResolver {
    pub engine: CoordinateScalingEngine,
    pub anchor: ViewAnchor,
    /// Non-pin features beyond this fraction of the hole are hidden
    pub visibility_fraction: f32,
}

impl Default for FeatureVisibilityResolver {
    fn default() -> Self {
        Self::new(CoordinateScalingEngine::default(), ViewAnchor::default())
    }
}

impl FeatureVisibilityResolver {
    pub fn new(engine: CoordinateScalingEngine, anchor: ViewAnchor) -> Self {
        Self {
            engine,
            anchor,
            visibility_fraction: DEFAULT_FEATURE_VISIBILITY_FRACTION,
        }
    }

    pub fn with_visibility_fraction(mut self, fraction: f32) -> Self {
        self.visibility_fraction = finite_or(fraction, DEFAULT_FEATURE_VISIBILITY_FRACTION).clamp(0.0, 1.0);
        self
    }

    /// Resolve a single feature for `state`
    pub fn resolve(&self, feature: &CourseFeature, state: &GameState) -> FeaturePosition {
        let offset_yards = finite_or(feature.distance_yards, 0.0) - state.ball_position_yards;
        let relative_yards = finite_or(offset_yards.abs(), 0.0);
        let world_position = self.engine.world_point(
            &self.anchor,
            yards_to_feet(offset_yards),
            yards_to_feet(feature.lateral_yards),
        );

        let (visible, scale, reason) = match feature.category {
            FeatureCategory::Pin => pin_scale(relative_yards, state),
            _ => self.feature_scale(relative_yards, state),
        };

        log::debug!(
            "{} at {:.0} yd: visible={} scale={:.2} ({})",
            feature.category.as_str(),
            feature.distance_yards,
            visible,
            scale,
            reason
        );

        FeaturePosition {
            world_position,
            visible,
            scale,
            reason,
        }
    }

    /// Resolve a batch of features, preserving order
    pub fn resolve_all(&self, features: &[CourseFeature], state: &GameState) -> Vec<FeaturePosition> {
        features.iter().map(|f| self.resolve(f, state)).collect()
    }

    /// Only the features that end up drawn, paired with their placement
    pub fn visible_features<'a>(
        &self,
        features: &'a [CourseFeature],
        state: &GameState,
    ) -> Vec<(&'a CourseFeature, FeaturePosition)> {
        features
            .iter()
            .map(|f| (f, self.resolve(f, state)))
            .filter(|(_, pos)| pos.visible)
            .collect()
    }

    fn feature_scale(&self, relative_yards: f32, state: &GameState) -> (bool, f32, String) {
        let max_distance = state.total_hole_yards.max(0.0) * self.visibility_fraction;
        if relative_yards > max_distance {
            return (
                false,
                0.0,
                format!(
                    "{:.0} yd away, beyond {:.0}% of the hole",
                    relative_yards,
                    self.visibility_fraction * 100.0
                ),
            );
        }

        let falloff = if max_distance > 0.0 {
            (1.0 - relative_yards / max_distance).clamp(MIN_FEATURE_FALLOFF, 1.0)
        } else {
            1.0
        };
        (true, falloff * falloff, format!("in range at {:.0} yd", relative_yards))
    }
}

fn pin_scale(relative_yards: f32, state: &GameState) -> (bool, f32, String) {
    match state.mode {
        GameMode::Putt => (true, 1.0, "pin always visible (putt view)".to_string()),
        GameMode::Swing => {
            let scale = if state.total_hole_yards > 0.0 {
                (1.0 - relative_yards / state.total_hole_yards).clamp(MIN_PIN_SCALE, 1.0)
            } else {
                1.0
            };
            (true, scale, "pin always visible (swing view)".to_string())
        }
    }
}
