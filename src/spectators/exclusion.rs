//! Angular exclusion arcs around the ball-to-hole line
//!
//! Bearings are in degrees: 0 points along the ball-to-hole line, 180 points
//! back toward the ball, clockwise positive.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{angular_distance_deg, normalize_degrees};

/// An arc `center_deg ± half_width_deg` that spectators must stay out of
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionArc {
    pub center_deg: f32,
    pub half_width_deg: f32,
}

impl ExclusionArc {
    pub fn new(center_deg: f32, half_width_deg: f32) -> Self {
        Self {
            center_deg: normalize_degrees(center_deg),
            half_width_deg: half_width_deg.clamp(0.0, 180.0),
        }
    }

    /// Strictly inside the arc (the boundary itself is allowed)
    pub fn contains(&self, angle_deg: f32) -> bool {
        angular_distance_deg(angle_deg, self.center_deg) < self.half_width_deg
    }

    /// Start and end bearings, normalized to [0, 360)
    fn bounds(&self) -> (f32, f32) {
        (
            normalize_degrees(self.center_deg - self.half_width_deg),
            normalize_degrees(self.center_deg + self.half_width_deg),
        )
    }

    /// Blocked intervals in [0, 360), split where the arc wraps past 0
    fn blocked_intervals(&self) -> Vec<(f32, f32)> {
        if self.half_width_deg >= 180.0 {
            return vec![(0.0, 360.0)];
        }
        if self.half_width_deg <= 0.0 {
            return Vec::new();
        }
        let (start, end) = self.bounds();
        if start <= end {
            vec![(start, end)]
        } else {
            // Wraparound case (e.g. 340..20)
            vec![(start, 360.0), (0.0, end)]
        }
    }
}

/// The set of arcs kept clear of spectators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExclusionZones {
    arcs: Vec<ExclusionArc>,
}

/// Half-width of the arcs along the putting line, in front and behind
pub const LINE_HALF_WIDTH_DEG: f32 = 20.0;
/// Half-width of the optional side arcs
pub const SIDE_HALF_WIDTH_DEG: f32 = 10.0;

impl ExclusionZones {
    pub fn new(arcs: Vec<ExclusionArc>) -> Self {
        Self { arcs }
    }

    /// Front and back of the putting line, plus narrow left/right arcs when
    /// `exclude_sides` is set
    pub fn putting_line(exclude_sides: bool) -> Self {
        let mut arcs = vec![
            ExclusionArc::new(0.0, LINE_HALF_WIDTH_DEG),
            ExclusionArc::new(180.0, LINE_HALF_WIDTH_DEG),
        ];
        if exclude_sides {
            arcs.push(ExclusionArc::new(90.0, SIDE_HALF_WIDTH_DEG));
            arcs.push(ExclusionArc::new(270.0, SIDE_HALF_WIDTH_DEG));
        }
        Self { arcs }
    }

    pub fn arcs(&self) -> &[ExclusionArc] {
        &self.arcs
    }

    pub fn contains(&self, angle_deg: f32) -> bool {
        self.arcs.iter().any(|arc| arc.contains(angle_deg))
    }

    /// Allowed intervals in [0, 360), sorted and non-overlapping
    pub fn allowed_intervals(&self) -> Vec<(f32, f32)> {
        let mut blocked: Vec<(f32, f32)> = self.arcs.iter().flat_map(|a| a.blocked_intervals()).collect();
        blocked.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut allowed = Vec::new();
        let mut cursor = 0.0f32;
        for (start, end) in blocked {
            if start > cursor {
                allowed.push((cursor, start));
            }
            cursor = cursor.max(end);
        }
        if cursor < 360.0 {
            allowed.push((cursor, 360.0));
        }
        allowed
    }

    /// Total allowed angular measure in degrees
    pub fn allowed_span(&self) -> f32 {
        self.allowed_intervals().iter().map(|(s, e)| e - s).sum()
    }

    /// Uniform bearing over the allowed intervals. Returns `None` when every
    /// bearing is excluded.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<f32> {
        let allowed = self.allowed_intervals();
        let total: f32 = allowed.iter().map(|(s, e)| e - s).sum();
        if total <= 0.0 {
            return None;
        }

        let mut pick = rng.random_range(0.0..total);
        for (start, end) in &allowed {
            let width = end - start;
            if pick < width {
                return Some(self.nudge_out(start + pick));
            }
            pick -= width;
        }
        // Float drift past the final interval
        allowed.last().map(|(start, end)| self.nudge_out((start + end) / 2.0))
    }

    /// Rounding in `normalize_degrees` can leave an edge sample a hair inside
    /// an arc; snap it back to the nearest arc boundary
    fn nudge_out(&self, angle_deg: f32) -> f32 {
        let angle = normalize_degrees(angle_deg);
        match self.arcs.iter().find(|arc| arc.contains(angle)) {
            Some(arc) => {
                let (start, end) = arc.bounds();
                if angular_distance_deg(angle, start) <= angular_distance_deg(angle, end) {
                    start
                } else {
                    end
                }
            }
            None => angle,
        }
    }
}
