//! Snap rounding: noding with all output vertices exact on a fixed grid.
//!
//! A "hot pixel" is the unit grid square around each input vertex and
//! each full-precision intersection point. Any segment passing within a
//! pixel is snapped to its centre, which guarantees the rounded
//! arrangement contains no near-coincident crossings at the target
//! precision.

mod hot_pixel;
mod snap_rounding_noder;

pub use hot_pixel::HotPixel;
pub use snap_rounding_noder::SnapRoundingNoder;
