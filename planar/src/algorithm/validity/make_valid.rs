use crate::algorithm::coordinate_position::{coord_pos_relative_to_ring, CoordPos};

use crate::algorithm::interior_point::interior_point;
use crate::algorithm::overlay::edge::{merge_edges, EdgeSourceInfo};
use crate::algorithm::overlay::graph::OverlayGraph;
use crate::algorithm::overlay::overlay_label::OverlayLabel;
use crate::algorithm::overlay::polygon_builder::build_polygons;
use crate::algorithm::overlay::unary_union;
use crate::noding::{McIndexNoder, Noder, SegmentString};
use crate::utils::CoordKey;
use planar_types::{
    Coord, CoordSeq, Dimensions, Geometry, GeometryCollection, GeometryFactory, LineString,
    MultiPolygon, Point, Result,
};

use std::collections::BTreeSet;

/// Repair a geometry into a valid one covering the same point-set.
///
/// Areal inputs use the linework strategy: node every ring, polygonize
/// the arrangement into atomic faces, keep the faces with odd winding
/// parity against the original rings, and dissolve them back together.
/// Only input vertices and computed intersection points appear in the
/// output. A self-crossing ring thus splits into the polygons its loops
/// enclose — a bowtie becomes two triangles.
///
/// Lineal inputs are noded and deduplicated; puntal inputs deduplicated.
pub fn make_valid(geometry: &Geometry) -> Result<Geometry> {
    match geometry.dimensions() {
        Dimensions::Empty => Ok(geometry.clone()),
        Dimensions::TwoDimensional => make_areal_valid(geometry),
        Dimensions::OneDimensional => make_lineal_valid(geometry),
        Dimensions::ZeroDimensional => Ok(make_puntal_valid(geometry)),
    }
}

fn rings_of(geometry: &Geometry, rings: &mut Vec<Vec<Coord>>) {
    match geometry {
        Geometry::Polygon(polygon) => {
            for ring in polygon.rings() {
                let mut coords = ring.coords().to_vec();
                coords.dedup();
                if coords.len() >= 4 {
                    rings.push(coords);
                }
            }
        }
        Geometry::MultiPolygon(mp) => {
            for polygon in &mp.0 {
                rings_of(&Geometry::Polygon(polygon.clone()), rings);
            }
        }
        Geometry::GeometryCollection(gc) => {
            for child in &gc.0 {
                rings_of(child, rings);
            }
        }
        _ => {}
    }
}

fn make_areal_valid(geometry: &Geometry) -> Result<Geometry> {
    let mut rings: Vec<Vec<Coord>> = Vec::new();
    rings_of(geometry, &mut rings);
    if rings.is_empty() {
        return Ok(Geometry::from(MultiPolygon(vec![])));
    }

    // node the complete ring arrangement
    let strings: Vec<SegmentString<EdgeSourceInfo>> = rings
        .iter()
        .map(|coords| {
            SegmentString::new(
                coords.clone(),
                EdgeSourceInfo {
                    label: OverlayLabel::empty(),
                },
            )
        })
        .collect();
    let noded = McIndexNoder::new().node(&strings)?;
    let merged = merge_edges(noded);
    if merged.is_empty() {
        return Ok(Geometry::from(MultiPolygon(vec![])));
    }

    // polygonize into atomic faces
    let graph = OverlayGraph::build(merged);
    let faces = build_polygons(&graph, &|_| true, true)?;

    // a face belongs to the repaired area iff an odd number of original
    // rings wind around its interior
    let ring_seqs: Vec<CoordSeq> = rings
        .into_iter()
        .map(|coords| CoordSeq::from_coords(planar_types::CoordShape::XY, coords))
        .collect();
    let mut kept = Vec::new();
    for face in faces {
        let face_geometry = Geometry::from(face);
        let probe = match interior_point(&face_geometry) {
            Some(probe) => probe,
            None => continue,
        };
        let winding_count = ring_seqs
            .iter()
            .filter(|seq| coord_pos_relative_to_ring(probe, seq) == CoordPos::Inside)
            .count();
        if winding_count % 2 == 1 {
            kept.push(face_geometry);
        }
    }

    if kept.is_empty() {
        return Ok(Geometry::from(MultiPolygon(vec![])));
    }
    // dissolve faces sharing boundary back into maximal polygons
    unary_union(&GeometryCollection(kept).into())
}

fn make_lineal_valid(geometry: &Geometry) -> Result<Geometry> {
    let mut lists: Vec<Vec<Coord>> = Vec::new();
    collect_lines(geometry, &mut lists);

    let strings: Vec<SegmentString<()>> = lists
        .into_iter()
        .map(|coords| SegmentString::new(coords, ()))
        .collect();
    let noded = McIndexNoder::new().node(&strings)?;

    // deduplicate coincident pieces (modulo direction)
    let mut seen: BTreeSet<Vec<CoordKey>> = BTreeSet::new();
    let mut lines: Vec<LineString> = Vec::new();
    for piece in noded {
        let (coords, ()) = piece.into_parts();
        let forward: Vec<CoordKey> = coords.iter().map(|c| CoordKey(*c)).collect();
        let mut backward = forward.clone();
        backward.reverse();
        let key = forward.min(backward);
        if seen.insert(key) {
            lines.push(LineString::new(CoordSeq::from_coords(
                planar_types::CoordShape::XY,
                coords,
            )));
        }
    }

    let factory = GeometryFactory::default_instance();
    Ok(factory.build_geometry(lines.into_iter().map(Geometry::from).collect()))
}

fn collect_lines(geometry: &Geometry, lists: &mut Vec<Vec<Coord>>) {
    match geometry {
        Geometry::LineString(ls) => {
            let mut coords = ls.coords().to_vec();
            coords.dedup();
            if coords.len() >= 2 {
                lists.push(coords);
            }
        }
        Geometry::LinearRing(ring) => {
            collect_lines(&Geometry::LineString(ring.as_line_string().clone()), lists)
        }
        Geometry::MultiLineString(mls) => {
            for ls in &mls.0 {
                collect_lines(&Geometry::LineString(ls.clone()), lists);
            }
        }
        Geometry::GeometryCollection(gc) => {
            for child in &gc.0 {
                collect_lines(child, lists);
            }
        }
        _ => {}
    }
}

fn make_puntal_valid(geometry: &Geometry) -> Geometry {
    let mut seen: BTreeSet<CoordKey> = BTreeSet::new();
    let mut coords: Vec<Coord> = Vec::new();
    geometry.apply_coords(&mut |coord| {
        if seen.insert(CoordKey(*coord)) {
            coords.push(*coord);
        }
    });
    GeometryFactory::default_instance()
        .build_geometry(coords.into_iter().map(|c| Geometry::from(Point(Some(c)))).collect())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algorithm::area::Area;
    use crate::algorithm::validity::is_valid;
    use planar_types::polygon;

    #[test]
    fn bowtie_becomes_two_triangles() {
        let bowtie: Geometry =
            polygon![(x: 0., y: 0.), (x: 1., y: 1.), (x: 0., y: 1.), (x: 1., y: 0.)].into();
        assert!(!is_valid(&bowtie));

        let repaired = make_valid(&bowtie).unwrap();
        assert!(is_valid(&repaired));
        match &repaired {
            Geometry::MultiPolygon(mp) => assert_eq!(mp.0.len(), 2),
            other => panic!("expected MultiPolygon, got {:?}", other),
        }
        // the crossing point is a vertex of both triangles
        let mut has_crossing_vertex = false;
        repaired.apply_coords(&mut |coord| {
            if *coord == Coord::new(0.5, 0.5) {
                has_crossing_vertex = true;
            }
        });
        assert!(has_crossing_vertex);
        assert!((repaired.unsigned_area() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn valid_polygon_round_trips() {
        let square: Geometry =
            polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)].into();
        let repaired = make_valid(&square).unwrap();
        assert!(is_valid(&repaired));
        assert_eq!(repaired.unsigned_area(), 100.);
    }

    #[test]
    fn holed_polygon_keeps_hole() {
        let holed: Geometry = polygon!(
            exterior: [(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)],
            interiors: [[(x: 2., y: 2.), (x: 8., y: 2.), (x: 8., y: 8.), (x: 2., y: 8.)]],
        )
        .into();
        let repaired = make_valid(&holed).unwrap();
        assert!(is_valid(&repaired));
        assert_eq!(repaired.unsigned_area(), 64.);
    }

    #[test]
    fn self_crossing_line_is_noded() {
        let crossing: Geometry = planar_types::line_string![
            (x: 0., y: 0.),
            (x: 10., y: 10.),
            (x: 10., y: 0.),
            (x: 0., y: 10.)
        ]
        .into();
        let repaired = make_valid(&crossing).unwrap();
        assert!(crate::algorithm::validity::is_simple(&repaired) || {
            // pieces touch at the crossing node, which is allowed linework
            matches!(repaired, Geometry::MultiLineString(_))
        });
    }
}
