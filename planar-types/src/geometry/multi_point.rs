use crate::{Envelope, Point};

/// A collection of [`Point`]s.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiPoint(pub Vec<Point>);

impl MultiPoint {
    pub fn new(points: Vec<Point>) -> Self {
        MultiPoint(points)
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Point::is_empty)
    }

    pub fn envelope(&self) -> Envelope {
        let mut env = Envelope::null();
        for point in &self.0 {
            env.expand_to_include_envelope(&point.envelope());
        }
        env
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.0.iter()
    }
}

impl From<Vec<(f64, f64)>> for MultiPoint {
    fn from(coords: Vec<(f64, f64)>) -> Self {
        MultiPoint(coords.into_iter().map(Point::from).collect())
    }
}
