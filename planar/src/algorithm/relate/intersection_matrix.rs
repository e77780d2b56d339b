use crate::algorithm::coordinate_position::CoordPos;
use planar_types::{Dimensions, GeometryError, Result};

use std::str::FromStr;

/// A *Dimensionally Extended Nine-Intersection Model (DE-9IM)* matrix.
///
/// The matrix records, for the Interior/Boundary/Exterior of two
/// geometries, the dimension of each pairwise intersection, and is the
/// fundamental characterization of their topological relationship.
///
/// Cells are stored as a flat nine-element row in the conventional
/// order — interior, boundary, exterior of the first geometry, each
/// against interior, boundary, exterior of the second — which is also the
/// order of the usual nine-character rendering over `{F,0,1,2}`, e.g.
/// `"212101212"`.
#[derive(PartialEq, Eq, Clone)]
pub struct IntersectionMatrix {
    cells: [Dimensions; 9],
}

/// Flat cell index of a position pair.
fn cell(position_a: CoordPos, position_b: CoordPos) -> usize {
    fn axis(position: CoordPos) -> usize {
        match position {
            CoordPos::Inside => 0,
            CoordPos::OnBoundary => 1,
            CoordPos::Outside => 2,
        }
    }
    axis(position_a) * 3 + axis(position_b)
}

impl std::fmt::Debug for IntersectionMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "IntersectionMatrix({})", self.matrix_string())
    }
}

impl std::fmt::Display for IntersectionMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.matrix_string())
    }
}

impl IntersectionMatrix {
    pub fn empty() -> Self {
        IntersectionMatrix {
            cells: [Dimensions::Empty; 9],
        }
    }

    /// The nine-character DE-9IM string.
    pub fn matrix_string(&self) -> String {
        self.cells
            .iter()
            .map(|dimensions| match dimensions {
                Dimensions::Empty => 'F',
                Dimensions::ZeroDimensional => '0',
                Dimensions::OneDimensional => '1',
                Dimensions::TwoDimensional => '2',
            })
            .collect()
    }

    pub fn get(&self, position_a: CoordPos, position_b: CoordPos) -> Dimensions {
        self.cells[cell(position_a, position_b)]
    }

    /// `true` when the cell holds any intersection at all.
    fn has(&self, position_a: CoordPos, position_b: CoordPos) -> bool {
        self.get(position_a, position_b) != Dimensions::Empty
    }

    pub(crate) fn set(
        &mut self,
        position_a: CoordPos,
        position_b: CoordPos,
        dimensions: Dimensions,
    ) {
        self.cells[cell(position_a, position_b)] = dimensions;
    }

    /// Raise the cell to at least `minimum_dimensions`.
    pub(crate) fn set_at_least(
        &mut self,
        position_a: CoordPos,
        position_b: CoordPos,
        minimum_dimensions: Dimensions,
    ) {
        let slot = &mut self.cells[cell(position_a, position_b)];
        *slot = (*slot).max(minimum_dimensions);
    }

    /// Raise the cell if both positions are present; a `None` means the
    /// incident was not labelled for that geometry, and nothing happens.
    pub(crate) fn set_at_least_if_in_both(
        &mut self,
        position_a: Option<CoordPos>,
        position_b: Option<CoordPos>,
        minimum_dimensions: Dimensions,
    ) {
        if let (Some(position_a), Some(position_b)) = (position_a, position_b) {
            self.set_at_least(position_a, position_b, minimum_dimensions);
        }
    }

    pub(crate) fn set_at_least_from_string(&mut self, dimensions: &str) -> Result<()> {
        let raised = Self::parse_cells(dimensions)?;
        for (slot, raised_cell) in self.cells.iter_mut().zip(raised) {
            *slot = (*slot).max(raised_cell);
        }
        Ok(())
    }

    fn parse_cells(text: &str) -> Result<[Dimensions; 9]> {
        if text.len() != 9 {
            return Err(GeometryError::invalid_argument(format!(
                "expected DE-9IM string of length 9, found: {}",
                text.len()
            )));
        }
        let mut cells = [Dimensions::Empty; 9];
        for (slot, character) in cells.iter_mut().zip(text.chars()) {
            *slot = match character {
                'F' => Dimensions::Empty,
                '0' => Dimensions::ZeroDimensional,
                '1' => Dimensions::OneDimensional,
                '2' => Dimensions::TwoDimensional,
                other => {
                    return Err(GeometryError::invalid_argument(format!(
                        "expected '0', '1', '2', or 'F', found: {}",
                        other
                    )));
                }
            };
        }
        Ok(cells)
    }

    /// Whether this matrix matches a DE-9IM pattern over
    /// `{T, F, *, 0, 1, 2}`.
    pub fn matches(&self, pattern: &str) -> Result<bool> {
        if pattern.len() != 9 {
            return Err(GeometryError::invalid_argument(format!(
                "expected DE-9IM pattern of length 9, found: {}",
                pattern.len()
            )));
        }
        for (dimensions, character) in self.cells.iter().zip(pattern.chars()) {
            let matched = match character {
                '*' => true,
                'T' => *dimensions != Dimensions::Empty,
                'F' => *dimensions == Dimensions::Empty,
                '0' => *dimensions == Dimensions::ZeroDimensional,
                '1' => *dimensions == Dimensions::OneDimensional,
                '2' => *dimensions == Dimensions::TwoDimensional,
                other => {
                    return Err(GeometryError::invalid_argument(format!(
                        "invalid DE-9IM pattern character: {}",
                        other
                    )));
                }
            };
            if !matched {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// `[FF*FF****]`: no intersection between the interiors and
    /// boundaries.
    pub fn is_disjoint(&self) -> bool {
        use CoordPos::{Inside, OnBoundary};
        !(self.has(Inside, Inside)
            || self.has(Inside, OnBoundary)
            || self.has(OnBoundary, Inside)
            || self.has(OnBoundary, OnBoundary))
    }

    pub fn is_intersects(&self) -> bool {
        !self.is_disjoint()
    }

    /// `[T*F**F***]`: the first geometry is within the second.
    pub fn is_within(&self) -> bool {
        use CoordPos::{Inside, OnBoundary, Outside};
        self.has(Inside, Inside)
            && !self.has(Inside, Outside)
            && !self.has(OnBoundary, Outside)
    }

    /// `[T*****FF*]`: the first geometry contains the second.
    pub fn is_contains(&self) -> bool {
        use CoordPos::{Inside, OnBoundary, Outside};
        self.has(Inside, Inside)
            && !self.has(Outside, Inside)
            && !self.has(Outside, OnBoundary)
    }

    /// Like contains, but admitting boundary-only contact.
    pub fn is_covers(&self) -> bool {
        use CoordPos::{Inside, OnBoundary, Outside};
        let touches_somewhere = self.has(Inside, Inside)
            || self.has(Inside, OnBoundary)
            || self.has(OnBoundary, Inside)
            || self.has(OnBoundary, OnBoundary);
        touches_somewhere && !self.has(Outside, Inside) && !self.has(Outside, OnBoundary)
    }

    pub fn is_covered_by(&self) -> bool {
        use CoordPos::{Inside, OnBoundary, Outside};
        let touches_somewhere = self.has(Inside, Inside)
            || self.has(Inside, OnBoundary)
            || self.has(OnBoundary, Inside)
            || self.has(OnBoundary, OnBoundary);
        touches_somewhere && !self.has(Inside, Outside) && !self.has(OnBoundary, Outside)
    }

    /// Whether the geometries cross, which is dimension-dependent: a
    /// lower-dimensional geometry passing into a higher-dimensional one's
    /// interior and exterior, or two lines meeting at a point.
    pub fn is_crosses(&self, dimension_a: Dimensions, dimension_b: Dimensions) -> bool {
        use CoordPos::{Inside, Outside};
        if dimension_a < dimension_b {
            self.has(Inside, Inside) && self.has(Inside, Outside)
        } else if dimension_a > dimension_b {
            self.has(Inside, Inside) && self.has(Outside, Inside)
        } else if dimension_a == Dimensions::OneDimensional {
            self.get(Inside, Inside) == Dimensions::ZeroDimensional
        } else {
            false
        }
    }

    /// Whether the geometries overlap: same dimension, interiors
    /// intersecting in that dimension, and each interior spilling past
    /// the other.
    pub fn is_overlaps(&self, dimension_a: Dimensions, dimension_b: Dimensions) -> bool {
        use CoordPos::{Inside, Outside};
        if dimension_a != dimension_b {
            return false;
        }
        let spills_both_ways = self.has(Inside, Outside) && self.has(Outside, Inside);
        match dimension_a {
            Dimensions::ZeroDimensional | Dimensions::TwoDimensional => {
                self.has(Inside, Inside) && spills_both_ways
            }
            Dimensions::OneDimensional => {
                self.get(Inside, Inside) == Dimensions::OneDimensional && spills_both_ways
            }
            Dimensions::Empty => false,
        }
    }

    /// Whether the geometries touch: boundaries meet but interiors do
    /// not. Undefined (false) for two points, which have no boundary.
    pub fn is_touches(&self, dimension_a: Dimensions, dimension_b: Dimensions) -> bool {
        use CoordPos::{Inside, OnBoundary};
        if dimension_a == Dimensions::ZeroDimensional && dimension_b == Dimensions::ZeroDimensional
        {
            return false;
        }
        !self.has(Inside, Inside)
            && (self.has(Inside, OnBoundary)
                || self.has(OnBoundary, Inside)
                || self.has(OnBoundary, OnBoundary))
    }

    /// `[T*F**FFF*]` with equal dimensions: the geometries are
    /// topologically equal point-sets.
    pub fn is_equal_topo(&self, dimension_a: Dimensions, dimension_b: Dimensions) -> bool {
        use CoordPos::{Inside, OnBoundary, Outside};
        dimension_a == dimension_b
            && self.has(Inside, Inside)
            && !self.has(Inside, Outside)
            && !self.has(OnBoundary, Outside)
            && !self.has(Outside, Inside)
            && !self.has(Outside, OnBoundary)
    }
}

impl FromStr for IntersectionMatrix {
    type Err = GeometryError;
    fn from_str(string: &str) -> Result<Self> {
        let mut im = IntersectionMatrix::empty();
        im.set_at_least_from_string(string)?;
        Ok(im)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trips_through_string() {
        let im = IntersectionMatrix::from_str("212101212").unwrap();
        assert_eq!(im.matrix_string(), "212101212");
        assert_eq!(im.to_string(), "212101212");
    }

    #[test]
    fn cell_order_is_row_major() {
        let im = IntersectionMatrix::from_str("012FFFFFF").unwrap();
        let order = [CoordPos::Inside, CoordPos::OnBoundary, CoordPos::Outside];
        for (index, position_b) in order.iter().enumerate() {
            assert_eq!(cell(CoordPos::Inside, *position_b), index);
        }
        assert_eq!(im.get(CoordPos::Inside, CoordPos::Inside), Dimensions::ZeroDimensional);
        assert_eq!(
            im.get(CoordPos::Inside, CoordPos::Outside),
            Dimensions::TwoDimensional
        );
    }

    #[test]
    fn predicates_on_known_matrices() {
        let overlapping_areas = IntersectionMatrix::from_str("212101212").unwrap();
        assert!(overlapping_areas.is_intersects());
        assert!(!overlapping_areas.is_contains());
        assert!(overlapping_areas
            .is_overlaps(Dimensions::TwoDimensional, Dimensions::TwoDimensional));

        let contains = IntersectionMatrix::from_str("212FF1FF2").unwrap();
        assert!(contains.is_contains());
        assert!(contains.is_covers());
        assert!(!contains.is_within());

        let disjoint = IntersectionMatrix::from_str("FF2FF1212").unwrap();
        assert!(disjoint.is_disjoint());
        assert!(!disjoint.is_intersects());

        let crossing_lines = IntersectionMatrix::from_str("0F1FF0102").unwrap();
        assert!(crossing_lines
            .is_crosses(Dimensions::OneDimensional, Dimensions::OneDimensional));
    }

    #[test]
    fn pattern_matching() {
        let im = IntersectionMatrix::from_str("212101212").unwrap();
        assert!(im.matches("T*T***T**").unwrap());
        assert!(im.matches("212101212").unwrap());
        assert!(!im.matches("FF*FF****").unwrap());
        assert!(im.matches("*********").unwrap());
        assert!(im.matches("bogus").is_err());
    }
}
