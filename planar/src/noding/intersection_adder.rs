use super::NodedSegmentString;
use crate::algorithm::line_intersection::{line_intersection, LineIntersection};
use planar_types::Coord;

/// Computes the intersection of candidate segment pairs and records the
/// split points on both owning strings.
///
/// Also collects every intersection point seen, which snap rounding uses
/// to seed its hot pixels.
pub struct IntersectionAdder {
    has_interior_intersection: bool,
    has_proper_intersection: bool,
    intersection_points: Vec<Coord>,
}

impl Default for IntersectionAdder {
    fn default() -> Self {
        IntersectionAdder::new()
    }
}

impl IntersectionAdder {
    pub fn new() -> Self {
        IntersectionAdder {
            has_interior_intersection: false,
            has_proper_intersection: false,
            intersection_points: Vec::new(),
        }
    }

    pub fn has_proper_intersection(&self) -> bool {
        self.has_proper_intersection
    }

    pub fn has_interior_intersection(&self) -> bool {
        self.has_interior_intersection
    }

    pub fn intersection_points(&self) -> &[Coord] {
        &self.intersection_points
    }

    /// A trivial intersection is the point shared by adjacent segments of
    /// the same string (including a closed string's first and last).
    fn is_trivial<D>(
        string: &NodedSegmentString<D>,
        same_string: bool,
        segment_0: usize,
        segment_1: usize,
        intersection: &LineIntersection,
    ) -> bool {
        if !same_string || matches!(intersection, LineIntersection::Collinear { .. }) {
            return false;
        }
        super::is_adjacent_segments(
            string.coords().len(),
            string.is_closed(),
            segment_0,
            segment_1,
        )
    }

    /// Process one candidate pair. `index_0`/`index_1` locate the strings
    /// in `strings`; they may be equal for a self-intersection test.
    pub fn process_candidate<D>(
        &mut self,
        strings: &mut [NodedSegmentString<D>],
        index_0: usize,
        segment_0: usize,
        index_1: usize,
        segment_1: usize,
    ) {
        let same_string = index_0 == index_1;
        if same_string && segment_0 == segment_1 {
            return;
        }

        let line_0 = strings[index_0].segment(segment_0);
        let line_1 = strings[index_1].segment(segment_1);
        let intersection = match line_intersection(line_0, line_1) {
            Some(intersection) => intersection,
            None => return,
        };

        if Self::is_trivial(
            &strings[index_0],
            same_string,
            segment_0,
            segment_1,
            &intersection,
        ) {
            return;
        }

        match &intersection {
            LineIntersection::SinglePoint {
                intersection: coord,
                is_proper,
            } => {
                self.intersection_points.push(*coord);
                self.has_interior_intersection = true;
                if *is_proper {
                    self.has_proper_intersection = true;
                }
            }
            LineIntersection::Collinear { intersection } => {
                self.intersection_points.push(intersection.start);
                self.intersection_points.push(intersection.end);
                self.has_interior_intersection = true;
            }
        }

        strings[index_0].add_line_intersection(&intersection, segment_0);
        strings[index_1].add_line_intersection(&intersection, segment_1);
    }
}
