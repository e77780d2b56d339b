use crate::{Envelope, Geometry};

/// A heterogeneous collection of geometries.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryCollection(pub Vec<Geometry>);

impl GeometryCollection {
    pub fn new(geometries: Vec<Geometry>) -> Self {
        GeometryCollection(geometries)
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Geometry::is_empty)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn envelope(&self) -> Envelope {
        let mut env = Envelope::null();
        for geometry in &self.0 {
            env.expand_to_include_envelope(&geometry.envelope());
        }
        env
    }

    pub fn iter(&self) -> impl Iterator<Item = &Geometry> {
        self.0.iter()
    }
}

impl IntoIterator for GeometryCollection {
    type Item = Geometry;
    type IntoIter = std::vec::IntoIter<Geometry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
