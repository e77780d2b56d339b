use planar_types::{Geometry, LineString, LinearRing, MultiLineString, Polygon};

/// Euclidean length of a geometry's linework.
pub trait Length {
    fn length(&self) -> f64;
}

impl Length for LineString {
    fn length(&self) -> f64 {
        self.lines().map(|line| line.length()).sum()
    }
}

impl Length for LinearRing {
    fn length(&self) -> f64 {
        self.as_line_string().length()
    }
}

impl Length for MultiLineString {
    fn length(&self) -> f64 {
        self.0.iter().map(Length::length).sum()
    }
}

impl Length for Polygon {
    /// The perimeter: shell plus holes.
    fn length(&self) -> f64 {
        self.rings().map(Length::length).sum()
    }
}

impl Length for Geometry {
    fn length(&self) -> f64 {
        match self {
            Geometry::LineString(g) => g.length(),
            Geometry::LinearRing(g) => g.length(),
            Geometry::Polygon(g) => g.length(),
            Geometry::MultiLineString(g) => g.length(),
            Geometry::MultiPolygon(g) => g.0.iter().map(Length::length).sum(),
            Geometry::GeometryCollection(gc) => gc.0.iter().map(Length::length).sum(),
            Geometry::Point(_) | Geometry::MultiPoint(_) => 0.,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use planar_types::{line_string, polygon};

    #[test]
    fn line_length() {
        let ls = line_string![(x: 0., y: 0.), (x: 3., y: 4.), (x: 3., y: 9.)];
        assert_eq!(ls.length(), 10.);
    }

    #[test]
    fn polygon_perimeter() {
        let square = polygon![(x: 0., y: 0.), (x: 4., y: 0.), (x: 4., y: 4.), (x: 0., y: 4.)];
        assert_eq!(square.length(), 16.);
    }
}
