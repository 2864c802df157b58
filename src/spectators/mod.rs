//! Background spectator layout
//!
//! Picks one or two of the three spectator kinds and scatters them around the
//! hole, keeping the putting line clear. Output is fully determined by the
//! seed; without one, platform randomness gives a fresh layout every call.
//!
//! Pairwise separation is best-effort: after a bounded number of retries the
//! last candidate angle is kept even if it sits close to a neighbor.

pub mod exclusion;
pub mod layout;

pub use exclusion::{ExclusionArc, ExclusionZones};
pub use layout::{
    SpectatorConfig, SpectatorKind, SpectatorLayout, SpectatorPlacement, challenge_config,
    challenge_seed, generate_spectator_config, practice_config,
};
