use crate::utils::CoordKey;
use planar_types::{
    Geometry, GeometryCollection, GeometryError, LineString, MultiLineString, MultiPoint, Point,
    Result,
};

use std::collections::BTreeMap;

/// The combinatorial boundary of a geometry, per SFS:
///
/// - points and multipoints have an empty boundary;
/// - the boundary of lines is the set of their endpoints occurring an odd
///   number of times (the mod-2 rule) — a closed line has none;
/// - the boundary of an area is its rings.
///
/// The boundary of a heterogeneous `GeometryCollection` is not defined.
pub fn boundary(geometry: &Geometry) -> Result<Geometry> {
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => {
            Ok(GeometryCollection(vec![]).into())
        }
        Geometry::LineString(ls) => Ok(line_string_boundary(std::slice::from_ref(ls))),
        Geometry::LinearRing(_) => Ok(MultiPoint::new(vec![]).into()),
        Geometry::MultiLineString(mls) => Ok(line_string_boundary(&mls.0)),
        Geometry::Polygon(polygon) => {
            let rings: Vec<LineString> = polygon
                .rings()
                .map(|ring| ring.as_line_string().clone())
                .collect();
            if rings.len() == 1 {
                Ok(rings.into_iter().next().expect("checked length").into())
            } else {
                Ok(MultiLineString(rings).into())
            }
        }
        Geometry::MultiPolygon(mp) => {
            let rings: Vec<LineString> = mp
                .0
                .iter()
                .flat_map(|polygon| polygon.rings().map(|ring| ring.as_line_string().clone()))
                .collect();
            Ok(MultiLineString(rings).into())
        }
        Geometry::GeometryCollection(_) => Err(GeometryError::unsupported(
            "boundary of a heterogeneous GeometryCollection is not defined",
        )),
    }
}

fn line_string_boundary(lines: &[LineString]) -> Geometry {
    let mut endpoint_counts: BTreeMap<CoordKey, usize> = BTreeMap::new();
    for line in lines {
        if line.is_empty() || line.is_closed() {
            continue;
        }
        for coord in [
            *line.coords().first().expect("non-empty"),
            *line.coords().last().expect("non-empty"),
        ] {
            *endpoint_counts.entry(CoordKey(coord)).or_insert(0) += 1;
        }
    }
    let points: Vec<Point> = endpoint_counts
        .into_iter()
        .filter(|(_, count)| count % 2 == 1)
        .map(|(key, _)| Point(Some(key.0)))
        .collect();
    MultiPoint(points).into()
}
