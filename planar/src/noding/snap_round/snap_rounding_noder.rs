use super::HotPixel;
use crate::index::StrTree;
use crate::interrupt::check_interrupt;
use crate::noding::{IntersectionAdder, McIndexNoder, NodedSegmentString, Noder, SegmentString};
use crate::utils::CoordKey;
use planar_types::{Coord, GeometryError, PrecisionModel, Result};

use std::collections::BTreeMap;

/// A [`Noder`] producing output that is vertex-exact at a fixed precision.
///
/// The algorithm works in *scaled space*, where the grid spacing is 1:
///
/// 1. round every input vertex to the grid;
/// 2. compute all intersections among the rounded segments at full
///    precision, rounding each intersection onto the grid;
/// 3. make a hot pixel for every vertex and every rounded intersection;
/// 4. snap every segment passing through a pixel to the pixel centre,
///    via a spatial index over the pixels' safe envelopes;
/// 5. split, and scale the result back down.
pub struct SnapRoundingNoder {
    scale: f64,
}

impl SnapRoundingNoder {
    /// The precision model must be fixed; snap rounding has no meaning on
    /// a floating grid.
    pub fn new(precision_model: &PrecisionModel) -> Result<Self> {
        match precision_model.scale() {
            Some(scale) => Ok(SnapRoundingNoder { scale }),
            None => Err(GeometryError::invalid_argument(
                "snap rounding requires a fixed precision model",
            )),
        }
    }

    pub fn with_scale(scale: f64) -> Self {
        debug_assert!(scale > 0. && scale.is_finite());
        SnapRoundingNoder { scale }
    }

    fn to_scaled<D: Clone>(&self, input: &[SegmentString<D>]) -> Vec<SegmentString<D>> {
        input
            .iter()
            .filter_map(|string| {
                let mut coords: Vec<Coord> = string
                    .coords()
                    .iter()
                    .map(|c| {
                        let mut scaled = *c;
                        scaled.x = (c.x * self.scale).round();
                        scaled.y = (c.y * self.scale).round();
                        scaled
                    })
                    .collect();
                coords.dedup();
                // a string collapsing to a point vanishes at this precision
                if coords.len() < 2 {
                    return None;
                }
                Some(SegmentString::new(coords, string.data().clone()))
            })
            .collect()
    }

    /// Full-precision intersection points of the scaled arrangement,
    /// rounded onto the grid.
    fn rounded_intersections<D: Clone>(scaled: &[SegmentString<D>]) -> Result<Vec<Coord>> {
        let mut probe: Vec<NodedSegmentString<D>> = scaled
            .iter()
            .cloned()
            .map(NodedSegmentString::new)
            .collect();
        let mut adder = IntersectionAdder::new();
        McIndexNoder::compute_intersections(&mut probe, &mut adder)?;
        Ok(adder
            .intersection_points()
            .iter()
            .map(|point| Coord::new(point.x.round(), point.y.round()))
            .collect())
    }
}

impl<D: Clone> Noder<D> for SnapRoundingNoder {
    fn node(&self, input: &[SegmentString<D>]) -> Result<Vec<SegmentString<D>>> {
        let scaled = self.to_scaled(input);
        let intersections = Self::rounded_intersections(&scaled)?;

        // hot pixels, deduplicated by centre
        let mut pixels: BTreeMap<CoordKey, HotPixel> = BTreeMap::new();
        for string in &scaled {
            for coord in string.coords() {
                pixels
                    .entry(CoordKey(*coord))
                    .or_insert_with(|| HotPixel::new(*coord));
            }
        }
        for coord in intersections {
            pixels
                .entry(CoordKey(coord))
                .or_insert_with(|| HotPixel::new(coord));
        }

        let mut pixel_index = StrTree::new();
        for pixel in pixels.values() {
            pixel_index.insert(pixel.safe_envelope(), *pixel)?;
        }

        // snap every segment to every pixel it passes through
        let mut result = Vec::new();
        for string in &scaled {
            check_interrupt()?;
            let mut noded = NodedSegmentString::new(string.clone());
            for segment_index in 0..string.num_segments() {
                let segment = string.segment(segment_index);
                pixel_index.query(&segment.envelope(), &mut |pixel: &HotPixel| {
                    let centre = pixel.centre();
                    if centre == segment.start || centre == segment.end {
                        return;
                    }
                    if pixel.intersects_segment(segment.start, segment.end) {
                        noded.add_intersection(centre, segment_index);
                    }
                });
            }
            for piece in noded.split() {
                let (mut coords, data) = piece.into_parts();
                for coord in &mut coords {
                    coord.x /= self.scale;
                    coord.y /= self.scale;
                }
                coords.dedup();
                if coords.len() >= 2 {
                    result.push(SegmentString::new(coords, data));
                }
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::noding::validate_noding;

    fn string(points: &[(f64, f64)], data: u32) -> SegmentString<u32> {
        SegmentString::new(
            points.iter().map(|&(x, y)| Coord::new(x, y)).collect(),
            data,
        )
    }

    #[test]
    fn output_is_on_the_grid() {
        let noder = SnapRoundingNoder::with_scale(1.0);
        let input = vec![
            string(&[(0.2, 0.1), (9.8, 10.3)], 1),
            string(&[(10.1, 0.2), (-0.3, 9.9)], 2),
        ];
        let noded = noder.node(&input).unwrap();
        for piece in &noded {
            for coord in piece.coords() {
                assert_eq!(coord.x, coord.x.round());
                assert_eq!(coord.y, coord.y.round());
            }
        }
        assert!(validate_noding(&noded).is_ok());
    }

    #[test]
    fn near_crossing_snaps_to_single_vertex() {
        // two segments passing within half a grid cell of each other
        // must share a snapped vertex at scale 1
        let noder = SnapRoundingNoder::with_scale(1.0);
        let input = vec![
            string(&[(0., 0.), (10., 10.)], 1),
            string(&[(10., 0.), (0., 10.000001)], 2),
        ];
        let noded = noder.node(&input).unwrap();
        assert!(validate_noding(&noded).is_ok());
        // both inputs were split at the shared snapped crossing
        assert_eq!(noded.len(), 4);
        let crossing = Coord::new(5., 5.);
        for piece in &noded {
            assert!(
                *piece.coords().first().unwrap() == crossing
                    || *piece.coords().last().unwrap() == crossing
            );
        }
    }

    #[test]
    fn collapsed_string_is_dropped() {
        let noder = SnapRoundingNoder::with_scale(1.0);
        let input = vec![string(&[(0.1, 0.1), (0.2, 0.2)], 1)];
        let noded = noder.node(&input).unwrap();
        assert!(noded.is_empty());
    }

    #[test]
    fn floating_model_is_rejected() {
        assert!(SnapRoundingNoder::new(&PrecisionModel::Floating).is_err());
        assert!(SnapRoundingNoder::new(&PrecisionModel::fixed(10.)).is_ok());
    }
}
