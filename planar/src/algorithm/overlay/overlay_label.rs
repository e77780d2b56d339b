use crate::algorithm::coordinate_position::CoordPos;

/// The topology of one noded, merged edge relative to a single overlay
/// input.
///
/// Side locations are stored relative to the edge's canonical coordinate
/// direction; a reversed half-edge reads them swapped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum InputTopo {
    /// The edge is not part of this input's linework. The region
    /// location (the edge lies wholly in one region of the input) is
    /// resolved during labelling.
    NotPart { loc: Option<CoordPos> },

    /// The edge is part of this (1-dimensional) input's linework.
    Line,

    /// The edge is a boundary edge of this areal input.
    Area { left: CoordPos, right: CoordPos },

    /// Two opposite-sided boundary contributions from the same input
    /// merged onto one edge: the boundary pair cancels, leaving 1-D
    /// linework whose region location is resolved during labelling.
    Collapsed { loc: Option<CoordPos> },
}

/// The complete label of an overlay edge: an [`InputTopo`] per input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct OverlayLabel {
    inputs: [InputTopo; 2],
}

impl OverlayLabel {
    pub fn empty() -> Self {
        OverlayLabel {
            inputs: [
                InputTopo::NotPart { loc: None },
                InputTopo::NotPart { loc: None },
            ],
        }
    }

    pub fn for_input(geom_index: usize, topo: InputTopo) -> Self {
        let mut label = Self::empty();
        label.inputs[geom_index] = topo;
        label
    }

    pub fn input(&self, geom_index: usize) -> InputTopo {
        self.inputs[geom_index]
    }

    pub fn set_input(&mut self, geom_index: usize, topo: InputTopo) {
        self.inputs[geom_index] = topo;
    }

    /// Swap left and right sides of any area topology, for merging a
    /// contribution recorded against the opposite coordinate direction.
    pub fn flipped(&self) -> Self {
        let flip = |topo: InputTopo| match topo {
            InputTopo::Area { left, right } => InputTopo::Area {
                left: right,
                right: left,
            },
            other => other,
        };
        OverlayLabel {
            inputs: [flip(self.inputs[0]), flip(self.inputs[1])],
        }
    }

    /// Merge another contribution for the same (canonically oriented)
    /// edge. Commutative and associative over the contributions of a
    /// noded arrangement.
    pub fn merge(&mut self, other: &OverlayLabel) {
        for geom_index in 0..2 {
            self.inputs[geom_index] =
                Self::merge_input(self.inputs[geom_index], other.inputs[geom_index]);
        }
    }

    fn merge_input(a: InputTopo, b: InputTopo) -> InputTopo {
        use InputTopo::*;
        match (a, b) {
            (NotPart { .. }, other) => other,
            (other, NotPart { .. }) => other,
            (Line, Line) => Line,
            (Area { left, right }, Area { left: other_left, right: other_right }) => {
                if left == other_left && right == other_right {
                    // duplicate ring edge from an invalid input; keep it
                    Area { left, right }
                } else {
                    // opposite-sided boundary pair: the area collapses here
                    Collapsed { loc: None }
                }
            }
            (Collapsed { loc }, _) | (_, Collapsed { loc }) => Collapsed { loc },
            // mixed-dimension contributions from one input only occur in
            // collections, which overlay rejects; boundary information wins
            (area @ Area { .. }, Line) | (Line, area @ Area { .. }) => area,
        }
    }

    /// `true` if this edge carries boundary information for the input.
    pub fn is_area_boundary(&self, geom_index: usize) -> bool {
        matches!(self.inputs[geom_index], InputTopo::Area { .. })
    }

    pub fn is_linework(&self, geom_index: usize) -> bool {
        matches!(
            self.inputs[geom_index],
            InputTopo::Line | InputTopo::Collapsed { .. }
        )
    }

    /// The resolved region location for a non-boundary input, if any.
    pub fn resolved_loc(&self, geom_index: usize) -> Option<CoordPos> {
        match self.inputs[geom_index] {
            InputTopo::NotPart { loc } | InputTopo::Collapsed { loc } => loc,
            _ => None,
        }
    }

    pub fn is_unresolved(&self, geom_index: usize) -> bool {
        matches!(
            self.inputs[geom_index],
            InputTopo::NotPart { loc: None } | InputTopo::Collapsed { loc: None }
        )
    }

    pub fn resolve(&mut self, geom_index: usize, resolved: CoordPos) {
        match &mut self.inputs[geom_index] {
            InputTopo::NotPart { loc } | InputTopo::Collapsed { loc } => {
                if loc.is_none() {
                    *loc = Some(resolved);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn merge_is_commutative() {
        let area = InputTopo::Area {
            left: CoordPos::Inside,
            right: CoordPos::Outside,
        };
        let not_part = InputTopo::NotPart { loc: None };

        let mut label_a = OverlayLabel::for_input(0, area);
        label_a.merge(&OverlayLabel::for_input(0, not_part));
        assert_eq!(label_a.input(0), area);

        let mut label_b = OverlayLabel::for_input(0, not_part);
        label_b.merge(&OverlayLabel::for_input(0, area));
        assert_eq!(label_b.input(0), area);
    }

    #[test]
    fn opposite_boundaries_collapse() {
        let mut label = OverlayLabel::for_input(
            0,
            InputTopo::Area {
                left: CoordPos::Inside,
                right: CoordPos::Outside,
            },
        );
        label.merge(&OverlayLabel::for_input(
            0,
            InputTopo::Area {
                left: CoordPos::Outside,
                right: CoordPos::Inside,
            },
        ));
        assert!(matches!(label.input(0), InputTopo::Collapsed { .. }));
    }

    #[test]
    fn flipped_swaps_sides() {
        let label = OverlayLabel::for_input(
            0,
            InputTopo::Area {
                left: CoordPos::Inside,
                right: CoordPos::Outside,
            },
        );
        assert_eq!(
            label.flipped().input(0),
            InputTopo::Area {
                left: CoordPos::Outside,
                right: CoordPos::Inside,
            }
        );
    }
}
