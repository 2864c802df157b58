//! Real-world distance to render-space scaling
//!
//! A 3 ft putt and a 300 yd hole have to share one bounded viewport, so no
//! single linear ratio works. The engine maps distances through either a
//! banded step function or an averaged calibration ratio, chosen explicitly by
//! the caller. Positions are always relative to a `ViewAnchor` supplied per
//! query; there is no process-wide "current hole".

pub mod calibration;
pub mod engine;
pub mod visibility;

pub use calibration::{Calibration, CalibrationError, CalibrationPoint};
pub use engine::{
    BandedScale, CoordinateScalingEngine, ScalingStrategy, ViewAnchor, ViewPlacement,
    compute_world_position, get_world_units_per_foot,
};
pub use visibility::{
    CourseFeature, FeatureCategory, FeaturePosition, FeatureVisibilityResolver,
};
