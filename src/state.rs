//! Game state snapshot consumed by the renderer
//!
//! The coordinator owns one `GameState` and replaces it wholesale on every
//! change. Every update method consumes `self` and returns the next snapshot,
//! so readers never observe a half-applied update.

use serde::{Deserialize, Serialize};

use crate::consts::PUTT_MODE_THRESHOLD_YARDS;
use crate::finite_or;
use crate::units::yards_to_feet;

/// Which kind of shot the player is lining up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum GameMode {
    Putt,
    #[default]
    Swing,
}

impl GameMode {
    /// Mode implied by the distance left to the hole
    pub fn for_remaining(remaining_yards: f32) -> Self {
        if remaining_yards <= PUTT_MODE_THRESHOLD_YARDS {
            GameMode::Putt
        } else {
            GameMode::Swing
        }
    }
}

/// Ball and hole positions along the hole, measured in yards from the tee.
///
/// Serialized with the derived `remainingYards` alongside the stored fields;
/// on the way in it is ignored and recomputed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "GameStateRecord", from = "GameStateRecord")]
pub struct GameState {
    pub ball_position_yards: f32,
    pub hole_position_yards: f32,
    pub mode: GameMode,
    pub total_hole_yards: f32,
}

/// Wire form of `GameState`
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GameStateRecord {
    ball_position_yards: f32,
    hole_position_yards: f32,
    #[serde(default, skip_deserializing)]
    remaining_yards: f32,
    mode: GameMode,
    total_hole_yards: f32,
}

impl From<GameState> for GameStateRecord {
    fn from(state: GameState) -> Self {
        Self {
            ball_position_yards: state.ball_position_yards,
            hole_position_yards: state.hole_position_yards,
            remaining_yards: state.remaining_yards(),
            mode: state.mode,
            total_hole_yards: state.total_hole_yards,
        }
    }
}

impl From<GameStateRecord> for GameState {
    fn from(record: GameStateRecord) -> Self {
        Self {
            ball_position_yards: record.ball_position_yards,
            hole_position_yards: record.hole_position_yards,
            mode: record.mode,
            total_hole_yards: record.total_hole_yards,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_hole(400.0)
    }
}

impl GameState {
    /// Fresh hole with the ball on the tee
    pub fn new_hole(total_hole_yards: f32) -> Self {
        let total = finite_or(total_hole_yards, 0.0).max(0.0);
        Self {
            ball_position_yards: 0.0,
            hole_position_yards: total,
            mode: GameMode::for_remaining(total),
            total_hole_yards: total,
        }
    }

    /// Putting practice: ball `distance_feet` from the hole
    pub fn putting_green(distance_feet: f32) -> Self {
        let yards = finite_or(distance_feet, 0.0).max(0.0) / crate::consts::FEET_PER_YARD;
        Self {
            ball_position_yards: 0.0,
            hole_position_yards: yards,
            mode: GameMode::Putt,
            total_hole_yards: yards,
        }
    }

    /// Distance still to play, always non-negative
    pub fn remaining_yards(&self) -> f32 {
        finite_or((self.hole_position_yards - self.ball_position_yards).abs(), 0.0)
    }

    pub fn remaining_feet(&self) -> f32 {
        yards_to_feet(self.remaining_yards())
    }

    /// Next snapshot with the ball moved; mode follows the remaining distance
    pub fn with_ball_position(self, ball_position_yards: f32) -> Self {
        let next = Self {
            ball_position_yards: finite_or(ball_position_yards, self.ball_position_yards),
            ..self
        };
        Self {
            mode: GameMode::for_remaining(next.remaining_yards()),
            ..next
        }
    }

    /// Next snapshot with the ball advanced toward the hole
    pub fn advance_ball(self, carry_yards: f32) -> Self {
        let carry = finite_or(carry_yards, 0.0);
        let direction = if self.hole_position_yards >= self.ball_position_yards {
            1.0
        } else {
            -1.0
        };
        self.with_ball_position(self.ball_position_yards + carry * direction)
    }

    /// Next snapshot with the mode forced
    pub fn with_mode(self, mode: GameMode) -> Self {
        Self { mode, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_hole() {
        let state = GameState::new_hole(350.0);
        assert_eq!(state.ball_position_yards, 0.0);
        assert_eq!(state.remaining_yards(), 350.0);
        assert_eq!(state.mode, GameMode::Swing);
    }

    #[test]
    fn test_remaining_is_absolute() {
        let state = GameState::new_hole(100.0).with_ball_position(110.0);
        assert_eq!(state.remaining_yards(), 10.0);
        assert_eq!(state.remaining_feet(), 30.0);
    }

    #[test]
    fn test_mode_follows_ball() {
        let state = GameState::new_hole(300.0);
        let state = state.advance_ball(250.0);
        assert_eq!(state.mode, GameMode::Swing);
        let state = state.advance_ball(35.0);
        assert_eq!(state.mode, GameMode::Putt);
        assert!((state.remaining_yards() - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_snapshot_carries_remaining_yards() {
        let state = GameState::new_hole(380.0).advance_ball(230.0);
        let v = serde_json::to_value(state).unwrap();
        assert_eq!(v["remainingYards"].as_f64(), Some(150.0));
        assert_eq!(v["ballPositionYards"].as_f64(), Some(230.0));
        assert_eq!(v["mode"], "swing");

        // A stale remainingYards from the client is recomputed
        let json = r#"{"ballPositionYards":10,"holePositionYards":40,"remainingYards":999,"mode":"swing","totalHoleYards":40}"#;
        let back: GameState = serde_json::from_str(json).unwrap();
        assert_eq!(back.remaining_yards(), 30.0);
        assert_eq!(serde_json::from_value::<GameState>(v).unwrap(), state);
    }

    #[test]
    fn test_updates_do_not_touch_original() {
        let original = GameState::new_hole(200.0);
        let moved = original.advance_ball(50.0);
        assert_eq!(original.ball_position_yards, 0.0);
        assert_eq!(moved.ball_position_yards, 50.0);
    }

    #[test]
    fn test_non_finite_ball_position_ignored() {
        let state = GameState::new_hole(200.0).with_ball_position(f32::NAN);
        assert_eq!(state.ball_position_yards, 0.0);
    }

    #[test]
    fn test_putting_green() {
        let state = GameState::putting_green(12.0);
        assert_eq!(state.mode, GameMode::Putt);
        assert!((state.remaining_feet() - 12.0).abs() < 1e-4);
    }

    #[test]
    fn test_serde_wire_format() {
        let json = serde_json::to_string(&GameState::new_hole(150.0)).unwrap();
        assert!(json.contains("\"ballPositionYards\""));
        assert!(json.contains("\"mode\":\"swing\""));
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, GameState::new_hole(150.0));
    }
}
