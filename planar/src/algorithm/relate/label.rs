use super::IntersectionMatrix;
use crate::algorithm::coordinate_position::CoordPos;
use planar_types::Dimensions;

use std::fmt;

/// The positions a [`Label`] records for a graph component: on the
/// component itself, and on its two sides. Doubles as the index into a
/// label's position row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    On = 0,
    Left = 1,
    Right = 2,
}

/// Topological annotation of a graph component: for each of the two input
/// geometries, the location of points on the component and — when the
/// component carries area boundary — of the regions on its two sides.
///
/// Positions are a flat 2×3 grid of optional locations; an entirely
/// `None` row means the component has no incidence with that geometry.
/// Side slots of a non-area label stay `None` for its whole life.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Label {
    positions: [[Option<CoordPos>; 3]; 2],
    area: [bool; 2],
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn glyph(position: Option<CoordPos>) -> char {
            match position {
                Some(CoordPos::Inside) => 'i',
                Some(CoordPos::OnBoundary) => 'b',
                Some(CoordPos::Outside) => 'e',
                None => '_',
            }
        }
        for (geom_index, name) in ["A", "B"].iter().enumerate() {
            let row = &self.positions[geom_index];
            if self.area[geom_index] {
                write!(
                    f,
                    "{}:{}{}{} ",
                    name,
                    glyph(row[Direction::Left as usize]),
                    glyph(row[Direction::On as usize]),
                    glyph(row[Direction::Right as usize]),
                )?;
            } else {
                write!(f, "{}:{} ", name, glyph(row[Direction::On as usize]))?;
            }
        }
        Ok(())
    }
}

impl Label {
    /// An empty label for a 1-D line or 0-D point component.
    pub fn empty_line_or_point() -> Label {
        Label {
            positions: [[None; 3]; 2],
            area: [false, false],
        }
    }

    /// An empty label for a component that carries area boundary.
    pub fn empty_area() -> Label {
        Label {
            positions: [[None; 3]; 2],
            area: [true, true],
        }
    }

    /// A line label with the `On` position set for one geometry.
    pub fn line_at(geom_index: usize, on: CoordPos) -> Label {
        let mut label = Label::empty_line_or_point();
        label.positions[geom_index][Direction::On as usize] = Some(on);
        label
    }

    /// An area-boundary label fully set for one geometry, empty for the
    /// other.
    pub fn area_at(geom_index: usize, on: CoordPos, left: CoordPos, right: CoordPos) -> Label {
        let mut label = Label::empty_area();
        label.positions[geom_index] = [Some(on), Some(left), Some(right)];
        label
    }

    pub fn position(&self, geom_index: usize, direction: Direction) -> Option<CoordPos> {
        self.positions[geom_index][direction as usize]
    }

    pub fn on_position(&self, geom_index: usize) -> Option<CoordPos> {
        self.positions[geom_index][Direction::On as usize]
    }

    pub fn set_position(&mut self, geom_index: usize, direction: Direction, position: CoordPos) {
        debug_assert!(
            self.area[geom_index] || matches!(direction, Direction::On),
            "line labels have no sides"
        );
        self.positions[geom_index][direction as usize] = Some(position);
    }

    pub fn set_on_position(&mut self, geom_index: usize, position: CoordPos) {
        self.positions[geom_index][Direction::On as usize] = Some(position);
    }

    /// Set every slot the component's dimensionality has.
    pub fn set_all_positions(&mut self, geom_index: usize, position: CoordPos) {
        for slot in self.slots_mut(geom_index) {
            *slot = Some(position);
        }
    }

    pub fn set_all_positions_if_empty(&mut self, geom_index: usize, position: CoordPos) {
        for slot in self.slots_mut(geom_index) {
            slot.get_or_insert(position);
        }
    }

    fn slots(&self, geom_index: usize) -> &[Option<CoordPos>] {
        let count = if self.area[geom_index] { 3 } else { 1 };
        &self.positions[geom_index][..count]
    }

    fn slots_mut(&mut self, geom_index: usize) -> &mut [Option<CoordPos>] {
        let count = if self.area[geom_index] { 3 } else { 1 };
        &mut self.positions[geom_index][..count]
    }

    /// Swap the left and right sides of both rows, for a component
    /// traversed in the opposite direction.
    pub fn flip(&mut self) {
        for row in &mut self.positions {
            row.swap(Direction::Left as usize, Direction::Right as usize);
        }
    }

    /// Swap the two geometries' rows, for re-using a graph built at one
    /// argument position at the other.
    pub fn swap_geometries(&mut self) {
        self.positions.swap(0, 1);
        self.area.swap(0, 1);
    }

    pub fn is_area(&self) -> bool {
        self.area[0] || self.area[1]
    }

    pub fn is_geom_area(&self, geom_index: usize) -> bool {
        self.area[geom_index]
    }

    pub fn is_line(&self, geom_index: usize) -> bool {
        !self.area[geom_index]
    }

    pub fn is_empty(&self, geom_index: usize) -> bool {
        self.slots(geom_index).iter().all(Option::is_none)
    }

    pub fn is_any_empty(&self, geom_index: usize) -> bool {
        self.slots(geom_index).iter().any(Option::is_none)
    }

    /// The number of geometries this label has any incidence with.
    pub fn geometry_count(&self) -> usize {
        (0..2).filter(|&geom_index| !self.is_empty(geom_index)).count()
    }

    /// Toggle the `On` position under the mod-2 boundary rule: a point
    /// reached by the boundary an even number of times is interior.
    pub fn toggle_boundary(&mut self, geom_index: usize) {
        let new_position = match self.on_position(geom_index) {
            Some(CoordPos::OnBoundary) => CoordPos::Inside,
            _ => CoordPos::OnBoundary,
        };
        self.set_on_position(geom_index, new_position);
    }

    /// Record this label's contribution to an intersection matrix: the
    /// component itself is 1-dimensional, its sides (if any) bound
    /// 2-dimensional regions. Cells are touched only where both
    /// geometries are labelled.
    pub fn update_matrix(&self, intersection_matrix: &mut IntersectionMatrix) {
        intersection_matrix.set_at_least_if_in_both(
            self.on_position(0),
            self.on_position(1),
            Dimensions::OneDimensional,
        );
        if self.is_area() {
            for side in [Direction::Left, Direction::Right] {
                intersection_matrix.set_at_least_if_in_both(
                    self.position(0, side),
                    self.position(1, side),
                    Dimensions::TwoDimensional,
                );
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn line_labels_track_on_only() {
        let mut label = Label::line_at(0, CoordPos::Inside);
        assert_eq!(label.on_position(0), Some(CoordPos::Inside));
        assert!(label.is_empty(1));
        assert!(!label.is_area());

        label.set_all_positions(1, CoordPos::Outside);
        assert!(!label.is_any_empty(1));
        assert_eq!(label.position(1, Direction::On), Some(CoordPos::Outside));
        assert_eq!(label.geometry_count(), 2);
    }

    #[test]
    fn flip_swaps_sides_and_keeps_on() {
        let mut label = Label::area_at(0, CoordPos::OnBoundary, CoordPos::Inside, CoordPos::Outside);
        label.flip();
        assert_eq!(label.position(0, Direction::Left), Some(CoordPos::Outside));
        assert_eq!(label.position(0, Direction::Right), Some(CoordPos::Inside));
        assert_eq!(label.on_position(0), Some(CoordPos::OnBoundary));
    }

    #[test]
    fn toggle_boundary_is_mod_2() {
        let mut label = Label::empty_line_or_point();
        label.toggle_boundary(0);
        assert_eq!(label.on_position(0), Some(CoordPos::OnBoundary));
        label.toggle_boundary(0);
        assert_eq!(label.on_position(0), Some(CoordPos::Inside));
        label.toggle_boundary(0);
        assert_eq!(label.on_position(0), Some(CoordPos::OnBoundary));
    }

    #[test]
    fn swap_geometries_moves_rows() {
        let mut label = Label::area_at(0, CoordPos::OnBoundary, CoordPos::Inside, CoordPos::Outside);
        label.swap_geometries();
        assert!(label.is_empty(0));
        assert_eq!(label.on_position(1), Some(CoordPos::OnBoundary));
    }
}
