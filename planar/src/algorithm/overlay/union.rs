use super::{overlay, OverlayOp};
use crate::algorithm::coordinate_position::{CoordPos, CoordinatePosition};
use crate::utils::{CoordKey, OrderedFloat};
use planar_types::{
    Coord, Geometry, GeometryCollection, GeometryFactory, Point, Result,
};

use std::collections::BTreeSet;

/// The union of all components of a single geometry.
///
/// Components are grouped by dimension; each group is united by balanced
/// binary merging, envelope-sorted so that spatially adjacent components
/// merge early and intermediate results stay small — the cascaded-union
/// strategy. Lower-dimensional parts covered by higher-dimensional ones
/// are absorbed.
pub fn unary_union(geometry: &Geometry) -> Result<Geometry> {
    let mut areal: Vec<Geometry> = Vec::new();
    let mut lineal: Vec<Geometry> = Vec::new();
    let mut puntal: Vec<Coord> = Vec::new();
    flatten(geometry, &mut areal, &mut lineal, &mut puntal);

    let area_union = cascaded_union(areal)?;
    let line_union = cascaded_union(lineal)?;

    // line work covered by the areal part dissolves into it
    let line_union = match (&area_union, line_union) {
        (Some(area), Some(lines)) => {
            let remainder = overlay(&lines, area, OverlayOp::Difference)?;
            if remainder.is_empty() {
                None
            } else {
                Some(remainder)
            }
        }
        (None, lines) => lines,
        (_, None) => None,
    };

    let mut parts: Vec<Geometry> = Vec::new();
    if let Some(area) = &area_union {
        flatten_into_parts(area, &mut parts);
    }
    if let Some(lines) = &line_union {
        flatten_into_parts(lines, &mut parts);
    }

    // points covered by anything else are absorbed
    let mut seen: BTreeSet<CoordKey> = BTreeSet::new();
    for coord in puntal {
        if !seen.insert(CoordKey(coord)) {
            continue;
        }
        let covered = parts
            .iter()
            .any(|part| part.coordinate_position(&coord) != CoordPos::Outside);
        if !covered {
            parts.push(Point(Some(coord)).into());
        }
    }

    if parts.is_empty() {
        return Ok(GeometryCollection(vec![]).into());
    }
    Ok(GeometryFactory::default_instance().build_geometry(parts))
}

/// Balanced binary union of same-dimension components.
fn cascaded_union(mut components: Vec<Geometry>) -> Result<Option<Geometry>> {
    if components.is_empty() {
        return Ok(None);
    }

    // sort by envelope so merge partners are spatial neighbours
    components.sort_by_key(|component| {
        let envelope = component.envelope();
        (
            OrderedFloat(if envelope.is_null() { 0. } else { envelope.min_x() }),
            OrderedFloat(if envelope.is_null() { 0. } else { envelope.min_y() }),
        )
    });

    while components.len() > 1 {
        let mut merged = Vec::with_capacity(components.len().div_ceil(2));
        let mut iter = components.into_iter();
        while let Some(first) = iter.next() {
            match iter.next() {
                Some(second) => merged.push(union_pair(&first, &second)?),
                None => merged.push(first),
            }
        }
        components = merged;
    }
    Ok(components.pop())
}

/// Union two same-dimension union results, re-flattening any collection
/// shape so the next round's operands stay plain.
fn union_pair(first: &Geometry, second: &Geometry) -> Result<Geometry> {
    overlay(first, second, OverlayOp::Union)
}

fn flatten(
    geometry: &Geometry,
    areal: &mut Vec<Geometry>,
    lineal: &mut Vec<Geometry>,
    puntal: &mut Vec<Coord>,
) {
    match geometry {
        Geometry::Point(p) => {
            if let Some(coord) = p.coord() {
                puntal.push(coord);
            }
        }
        Geometry::MultiPoint(mp) => {
            for p in &mp.0 {
                if let Some(coord) = p.coord() {
                    puntal.push(coord);
                }
            }
        }
        Geometry::LineString(ls) => {
            if !ls.is_empty() {
                lineal.push(ls.clone().into());
            }
        }
        Geometry::LinearRing(ring) => {
            if !ring.is_empty() {
                lineal.push(ring.as_line_string().clone().into());
            }
        }
        Geometry::MultiLineString(mls) => {
            for ls in &mls.0 {
                if !ls.is_empty() {
                    lineal.push(ls.clone().into());
                }
            }
        }
        Geometry::Polygon(polygon) => {
            if !polygon.is_empty() {
                areal.push(polygon.clone().into());
            }
        }
        Geometry::MultiPolygon(mp) => {
            for polygon in &mp.0 {
                if !polygon.is_empty() {
                    areal.push(polygon.clone().into());
                }
            }
        }
        Geometry::GeometryCollection(gc) => {
            for child in &gc.0 {
                flatten(child, areal, lineal, puntal);
            }
        }
    }
}

fn flatten_into_parts(geometry: &Geometry, parts: &mut Vec<Geometry>) {
    match geometry {
        Geometry::MultiPolygon(mp) => {
            parts.extend(mp.0.iter().cloned().map(Geometry::from));
        }
        Geometry::MultiLineString(mls) => {
            parts.extend(mls.0.iter().cloned().map(Geometry::from));
        }
        Geometry::MultiPoint(mp) => {
            parts.extend(mp.0.iter().cloned().map(Geometry::from));
        }
        Geometry::GeometryCollection(gc) => {
            for child in &gc.0 {
                flatten_into_parts(child, parts);
            }
        }
        other => {
            if !other.is_empty() {
                parts.push(other.clone());
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::area::Area;
    use planar_types::{line_string, polygon, MultiPolygon};

    #[test]
    fn union_of_overlapping_squares_dissolves() {
        let mp: Geometry = MultiPolygon(vec![
            polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)],
            polygon![(x: 5., y: 5.), (x: 15., y: 5.), (x: 15., y: 15.), (x: 5., y: 15.)],
        ])
        .into();
        let unioned = unary_union(&mp).unwrap();
        assert!(matches!(unioned, Geometry::Polygon(_)));
        assert_eq!(unioned.unsigned_area(), 175.);
    }

    #[test]
    fn union_of_disjoint_squares_is_multi() {
        let mp: Geometry = MultiPolygon(vec![
            polygon![(x: 0., y: 0.), (x: 1., y: 0.), (x: 1., y: 1.), (x: 0., y: 1.)],
            polygon![(x: 5., y: 5.), (x: 6., y: 5.), (x: 6., y: 6.), (x: 5., y: 6.)],
        ])
        .into();
        let unioned = unary_union(&mp).unwrap();
        assert!(matches!(unioned, Geometry::MultiPolygon(_)));
        assert_eq!(unioned.unsigned_area(), 2.);
    }

    #[test]
    fn mixed_dimensions_absorb_covered_parts() {
        let gc: Geometry = GeometryCollection(vec![
            polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)].into(),
            line_string![(x: 2., y: 2.), (x: 8., y: 8.)].into(),
            Point::new(5., 5.).into(),
            Point::new(50., 50.).into(),
        ])
        .into();
        let unioned = unary_union(&gc).unwrap();
        // the line and the interior point are absorbed by the polygon
        match unioned {
            Geometry::GeometryCollection(parts) => {
                assert_eq!(parts.0.len(), 2);
            }
            other => panic!("expected a collection, got {:?}", other),
        }
    }

    #[test]
    fn union_of_empty_is_empty() {
        let empty: Geometry = GeometryCollection(vec![]).into();
        assert!(unary_union(&empty).unwrap().is_empty());
    }
}
