use super::{overlay_single, NoderKind, OverlayOp};
use planar_types::{Geometry, PrecisionModel, Result};

/// How many decimal digits a double can robustly carry through overlay
/// arithmetic.
const MAX_ROBUST_PRECISION_DIGITS: i32 = 14;

/// Overlay two geometries with full robustness handling.
///
/// The attempt sequence: floating-point noding; on a topology error,
/// snap rounding at a scale derived from the data extent; then one
/// hundredfold coarser. When every attempt fails the last topology error
/// propagates to the caller.
pub fn overlay(geom_a: &Geometry, geom_b: &Geometry, op: OverlayOp) -> Result<Geometry> {
    overlay_with_precision(geom_a, geom_b, op, &PrecisionModel::Floating)
}

/// Overlay at an explicit precision: a fixed model runs snap rounding at
/// its scale directly, the floating models run the escalation ladder.
pub fn overlay_with_precision(
    geom_a: &Geometry,
    geom_b: &Geometry,
    op: OverlayOp,
    precision_model: &PrecisionModel,
) -> Result<Geometry> {
    if let Some(scale) = precision_model.scale() {
        return overlay_single(geom_a, geom_b, op, NoderKind::SnapRounding { scale });
    }

    let mut last_error = match overlay_single(geom_a, geom_b, op, NoderKind::Floating) {
        Ok(result) => return Ok(result),
        Err(error) if error.is_topology() => error,
        Err(error) => return Err(error),
    };

    let scale = safe_scale(geom_a, geom_b);
    for attempt_scale in [scale, scale / 100.] {
        debug!(
            "overlay escalating to snap rounding at scale {}",
            attempt_scale
        );
        match overlay_single(
            geom_a,
            geom_b,
            op,
            NoderKind::SnapRounding {
                scale: attempt_scale,
            },
        ) {
            Ok(result) => return Ok(result),
            Err(error) if error.is_topology() => last_error = error,
            Err(error) => return Err(error),
        }
    }
    Err(last_error)
}

/// A snap-rounding scale that is safe for the magnitude of the data:
/// fine enough to barely perturb it, coarse enough that grid arithmetic
/// stays exact in doubles.
fn safe_scale(geom_a: &Geometry, geom_b: &Geometry) -> f64 {
    let mut max_magnitude: f64 = 1.;
    for envelope in [geom_a.envelope(), geom_b.envelope()] {
        if envelope.is_null() {
            continue;
        }
        for bound in [
            envelope.min_x().abs(),
            envelope.max_x().abs(),
            envelope.min_y().abs(),
            envelope.max_y().abs(),
        ] {
            max_magnitude = max_magnitude.max(bound);
        }
    }
    let magnitude_digits = max_magnitude.log10().ceil() as i32;
    10f64.powi(MAX_ROBUST_PRECISION_DIGITS - magnitude_digits.max(0))
}
