use crate::{Envelope, Polygon};

/// A collection of [`Polygon`]s.
///
/// Validity additionally requires the member polygons' interiors to be
/// mutually disjoint.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiPolygon(pub Vec<Polygon>);

impl MultiPolygon {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        MultiPolygon(polygons)
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Polygon::is_empty)
    }

    pub fn envelope(&self) -> Envelope {
        let mut env = Envelope::null();
        for polygon in &self.0 {
            env.expand_to_include_envelope(&polygon.envelope());
        }
        env
    }

    pub fn iter(&self) -> impl Iterator<Item = &Polygon> {
        self.0.iter()
    }
}
