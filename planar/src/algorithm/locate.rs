use crate::algorithm::coordinate_position::{CoordPos, RayCrossingCounter};
use crate::index::IntervalRTree;
use planar_types::{Coord, Envelope, Geometry, Line, Polygon};

/// Determines the location of a coordinate in the areal components of a
/// geometry in `O(log n)` per query.
///
/// Boundary segments are indexed by their Y-extent in an
/// [`IntervalRTree`], so a query ray only runs against segments whose
/// vertical span brackets the query ordinate. Build once, query many:
/// this is the locator cached by prepared geometries and the overlay's
/// disconnected-edge labelling.
pub struct IndexedPointInAreaLocator {
    index: IntervalRTree<Line>,
    envelope: Envelope,
}

impl IndexedPointInAreaLocator {
    pub fn new(geometry: &Geometry) -> Self {
        let mut segments = Vec::new();
        collect_areal_segments(geometry, &mut segments);
        let envelope = {
            let mut envelope = Envelope::null();
            for line in &segments {
                envelope.expand_to_include(line.start);
                envelope.expand_to_include(line.end);
            }
            envelope
        };
        let index = IntervalRTree::new(
            segments
                .into_iter()
                .map(|line| (line.start.y.min(line.end.y), line.start.y.max(line.end.y), line)),
        );
        IndexedPointInAreaLocator { index, envelope }
    }

    pub fn from_polygon(polygon: &Polygon) -> Self {
        Self::new(&Geometry::Polygon(polygon.clone()))
    }

    pub fn locate(&self, coord: &Coord) -> CoordPos {
        if !self.envelope.intersects_coord(*coord) {
            return CoordPos::Outside;
        }
        let mut counter = RayCrossingCounter::new(*coord);
        self.index.query(coord.y, coord.y, &mut |line| {
            counter.count_segment(line.start, line.end);
        });
        counter.location()
    }
}

fn collect_areal_segments(geometry: &Geometry, segments: &mut Vec<Line>) {
    match geometry {
        Geometry::Polygon(polygon) => {
            for ring in polygon.rings() {
                segments.extend(ring.lines());
            }
        }
        Geometry::MultiPolygon(mp) => {
            for polygon in &mp.0 {
                collect_areal_segments(&Geometry::Polygon(polygon.clone()), segments);
            }
        }
        Geometry::GeometryCollection(gc) => {
            for child in &gc.0 {
                collect_areal_segments(child, segments);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use planar_types::{coord, polygon};

    #[test]
    fn locate_against_holed_polygon() {
        let holed: Geometry = polygon!(
            exterior: [(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)],
            interiors: [[(x: 4., y: 4.), (x: 6., y: 4.), (x: 6., y: 6.), (x: 4., y: 6.)]],
        )
        .into();
        let locator = IndexedPointInAreaLocator::new(&holed);
        assert_eq!(locator.locate(&coord! { x: 2., y: 2. }), CoordPos::Inside);
        assert_eq!(locator.locate(&coord! { x: 5., y: 5. }), CoordPos::Outside);
        assert_eq!(locator.locate(&coord! { x: 0., y: 5. }), CoordPos::OnBoundary);
        assert_eq!(locator.locate(&coord! { x: 4., y: 5. }), CoordPos::OnBoundary);
        assert_eq!(locator.locate(&coord! { x: -1., y: 5. }), CoordPos::Outside);
    }

    #[test]
    fn agrees_with_direct_location() {
        use crate::algorithm::coordinate_position::CoordinatePosition;
        let polygon: Geometry =
            polygon![(x: 0., y: 0.), (x: 7., y: 3.), (x: 9., y: 9.), (x: 2., y: 8.)].into();
        let locator = IndexedPointInAreaLocator::new(&polygon);
        for x in 0..10 {
            for y in 0..10 {
                let coord = coord! { x: x as f64, y: y as f64 };
                assert_eq!(
                    locator.locate(&coord),
                    polygon.coordinate_position(&coord),
                    "at {:?}",
                    coord
                );
            }
        }
    }
}
