use crate::{Envelope, LinearRing};

use std::sync::OnceLock;

/// A bounded area: one exterior shell and zero or more interior holes.
///
/// # Validity
///
/// - Holes lie strictly inside the shell and are mutually disjoint.
/// - No two rings cross; rings may touch only at isolated points.
/// - The interior is a connected point-set.
///
/// These constraints are enforced by validation, not construction.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    exterior: LinearRing,
    interiors: Vec<LinearRing>,
    #[cfg_attr(feature = "serde", serde(skip))]
    envelope: OnceLock<Envelope>,
}

impl Polygon {
    pub fn new(exterior: LinearRing, interiors: Vec<LinearRing>) -> Self {
        Polygon {
            exterior,
            interiors,
            envelope: OnceLock::new(),
        }
    }

    pub fn empty() -> Self {
        Polygon::new(LinearRing::empty(), vec![])
    }

    #[inline]
    pub fn exterior(&self) -> &LinearRing {
        &self.exterior
    }

    #[inline]
    pub fn interiors(&self) -> &[LinearRing] {
        &self.interiors
    }

    /// The shell followed by the holes.
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.exterior.is_empty()
    }

    pub fn num_points(&self) -> usize {
        self.rings().map(LinearRing::num_points).sum()
    }

    /// The shell's envelope, lazily cached.
    pub fn envelope(&self) -> Envelope {
        *self.envelope.get_or_init(|| self.exterior.envelope())
    }

    pub fn reversed(&self) -> Polygon {
        Polygon::new(
            self.exterior.reversed(),
            self.interiors.iter().map(LinearRing::reversed).collect(),
        )
    }

    pub fn into_rings(self) -> (LinearRing, Vec<LinearRing>) {
        (self.exterior, self.interiors)
    }
}

impl PartialEq for Polygon {
    fn eq(&self, other: &Self) -> bool {
        self.exterior == other.exterior && self.interiors == other.interiors
    }
}
