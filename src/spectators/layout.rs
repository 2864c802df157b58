//! Spectator selection and placement

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::exclusion::ExclusionZones;
use crate::{angular_distance_deg, finite_or, polar_to_ground};

/// Hole distance at which spectators reach their full radius
const FULL_RADIUS_DISTANCE_FEET: f32 = 30.0;

/// The background entities that can stand around the green
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpectatorKind {
    Female,
    Putting,
    Cooler,
}

impl SpectatorKind {
    pub const ALL: [SpectatorKind; 3] = [SpectatorKind::Female, SpectatorKind::Putting, SpectatorKind::Cooler];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpectatorKind::Female => "female",
            SpectatorKind::Putting => "putting",
            SpectatorKind::Cooler => "cooler",
        }
    }
}

/// One placed spectator. Position is ground-plane (x, z) around the hole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectatorPlacement {
    pub kind: SpectatorKind,
    pub x: f32,
    pub z: f32,
    pub angle_deg: f32,
    pub radius: f32,
}

/// One or two placed spectators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectatorConfig {
    pub placements: Vec<SpectatorPlacement>,
    /// Seed the layout was generated from, if any
    pub seed: Option<u64>,
}

impl SpectatorConfig {
    pub fn kinds(&self) -> Vec<SpectatorKind> {
        self.placements.iter().map(|p| p.kind).collect()
    }

    pub fn contains(&self, kind: SpectatorKind) -> bool {
        self.placements.iter().any(|p| p.kind == kind)
    }

    pub fn get(&self, kind: SpectatorKind) -> Option<&SpectatorPlacement> {
        self.placements.iter().find(|p| p.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// Placement tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpectatorLayout {
    pub min_radius: f32,
    pub max_radius: f32,
    /// Also keep narrow arcs to the left and right of the line clear
    pub exclude_sides: bool,
    /// Desired pairwise angular gap (best-effort)
    pub min_separation_deg: f32,
    /// Candidate angles tried per spectator before accepting the last one
    pub max_attempts: u32,
}

impl Default for SpectatorLayout {
    fn default() -> Self {
        Self {
            min_radius: 2.5,
            max_radius: 5.0,
            exclude_sides: false,
            min_separation_deg: 45.0,
            max_attempts: 20,
        }
    }
}

impl SpectatorLayout {
    pub fn exclusion_zones(&self) -> ExclusionZones {
        ExclusionZones::putting_line(self.exclude_sides)
    }

    /// Radius range after distance scaling; short holes pull spectators in
    pub fn radius_range(&self, hole_distance_feet: f32) -> (f32, f32) {
        let distance = finite_or(hole_distance_feet, 0.0).max(0.0);
        let multiplier = (distance / FULL_RADIUS_DISTANCE_FEET).min(1.0);
        let a = finite_or(self.min_radius, 0.0).max(0.0);
        let b = finite_or(self.max_radius, 0.0).max(0.0);
        (a.min(b) * multiplier, a.max(b) * multiplier)
    }

    /// Generate a layout. `Some(seed)` is reproducible; `None` draws from
    /// platform randomness.
    pub fn generate(&self, hole_distance_feet: f32, seed: Option<u64>) -> SpectatorConfig {
        let mut rng = match seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_rng(&mut rand::rng()),
        };
        let placements = self.generate_with(&mut rng, hole_distance_feet);
        SpectatorConfig { placements, seed }
    }

    /// Generate placements from an existing RNG
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R, hole_distance_feet: f32) -> Vec<SpectatorPlacement> {
        let mut kinds = SpectatorKind::ALL;
        kinds.shuffle(rng);
        let count = rng.random_range(1..=2usize);

        let zones = self.exclusion_zones();
        let (min_r, max_r) = self.radius_range(hole_distance_feet);
        let mut placements: Vec<SpectatorPlacement> = Vec::with_capacity(count);

        for &kind in kinds.iter().take(count) {
            let angle_deg = self.pick_angle(rng, &zones, &placements);
            let radius = rng.random_range(min_r..=max_r);
            let pos = polar_to_ground(radius, angle_deg);
            placements.push(SpectatorPlacement {
                kind,
                x: pos.x,
                z: pos.y,
                angle_deg,
                radius,
            });
        }

        log::debug!(
            "Spectators: {:?}",
            placements.iter().map(|p| (p.kind.as_str(), p.angle_deg)).collect::<Vec<_>>()
        );
        placements
    }

    fn pick_angle<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        zones: &ExclusionZones,
        placed: &[SpectatorPlacement],
    ) -> f32 {
        let attempts = self.max_attempts.max(1);
        let mut candidate = None;
        for _ in 0..attempts {
            let Some(angle) = zones.sample(rng) else {
                break;
            };
            candidate = Some(angle);
            if placed
                .iter()
                .all(|p| angular_distance_deg(p.angle_deg, angle) >= self.min_separation_deg)
            {
                return angle;
            }
        }

        match candidate {
            Some(angle) => {
                log::debug!("Spectator separation not met after {} attempts, keeping {:.1}°", attempts, angle);
                angle
            }
            None => {
                log::warn!("Exclusion zones cover the whole circle; placing spectator at 90°");
                90.0
            }
        }
    }
}

/// Layout with default tuning
pub fn generate_spectator_config(hole_distance_feet: f32, seed: Option<u64>) -> SpectatorConfig {
    SpectatorLayout::default().generate(hole_distance_feet, seed)
}

/// Seed for a challenge level attempt
pub fn challenge_seed(level: u32, attempt_number: u32) -> u64 {
    (level as u64)
        .wrapping_mul(2654435761)
        .wrapping_add((attempt_number as u64).wrapping_mul(40503))
}

/// Reproducible layout for a challenge level attempt
pub fn challenge_config(hole_distance_feet: f32, level: u32, attempt_number: u32) -> SpectatorConfig {
    generate_spectator_config(hole_distance_feet, Some(challenge_seed(level, attempt_number)))
}

/// Practice-mode layout seeded from the caller's clock (ms since epoch)
pub fn practice_config(hole_distance_feet: f32, timestamp_ms: f64) -> SpectatorConfig {
    let seed = if timestamp_ms.is_finite() {
        timestamp_ms.abs() as u64
    } else {
        0
    };
    generate_spectator_config(hole_distance_feet, Some(seed))
}
