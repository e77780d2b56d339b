//! End-to-end scenarios exercising the full pipeline: noding, topology
//! graph, relate and overlay together.

use planar::{
    boundary, distance, interior_point, is_simple, is_valid, line_string, make_valid,
    nearest_points, polygon, unary_union, Area, BooleanOps, Centroid, ConvexHull, CoordPos,
    CoordinatePosition, Geometry, MultiPolygon, Point, Relate, SpatialPredicates,
};

fn square_a() -> Geometry {
    polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)].into()
}

fn square_b() -> Geometry {
    polygon![(x: 5., y: 5.), (x: 15., y: 5.), (x: 15., y: 15.), (x: 5., y: 15.)].into()
}

#[test]
fn overlapping_squares_intersection() {
    let a = square_a();
    let b = square_b();

    assert!(a.intersects(&b).unwrap());

    let intersection = a.intersection(&b).unwrap();
    let expected: Geometry =
        polygon![(x: 5., y: 5.), (x: 10., y: 5.), (x: 10., y: 10.), (x: 5., y: 10.)].into();
    assert!(intersection.equals_topo(&expected).unwrap());
    assert_eq!(intersection.unsigned_area(), 25.);

    let difference = a.difference(&b).unwrap();
    let expected_difference: Geometry = polygon![
        (x: 0., y: 0.),
        (x: 10., y: 0.),
        (x: 10., y: 5.),
        (x: 5., y: 5.),
        (x: 5., y: 10.),
        (x: 0., y: 10.)
    ]
    .into();
    assert!(difference.equals_topo(&expected_difference).unwrap());
    assert_eq!(difference.unsigned_area(), 75.);
}

#[test]
fn union_and_intersection_areas_are_additive() {
    let a = square_a();
    let b = square_b();

    let union = a.union(&b).unwrap();
    let intersection = a.intersection(&b).unwrap();
    let sum = union.unsigned_area() + intersection.unsigned_area();
    assert!((sum - (a.unsigned_area() + b.unsigned_area())).abs() < 1e-9);

    let sym = a.sym_difference(&b).unwrap();
    assert!((sym.unsigned_area() - (union.unsigned_area() - intersection.unsigned_area())).abs()
        < 1e-9);
}

#[test]
fn difference_union_intersection_recompose() {
    let a = square_a();
    let b = square_b();
    let recomposed = a
        .difference(&b)
        .unwrap()
        .union(&a.intersection(&b).unwrap())
        .unwrap();
    assert!(recomposed.equals_topo(&a).unwrap());
}

#[test]
fn line_line_proper_crossing() {
    let a: Geometry = line_string![(x: 0., y: 0.), (x: 10., y: 10.)].into();
    let b: Geometry = line_string![(x: 10., y: 0.), (x: 0., y: 10.)].into();

    let intersection = a.intersection(&b).unwrap();
    let expected: Geometry = Point::new(5., 5.).into();
    assert!(intersection.equals_exact(&expected));

    assert!(a.crosses(&b).unwrap());
    assert_eq!(a.relate(&b).unwrap().to_string(), "0F1FF0102");
}

#[test]
fn line_line_collinear_overlap() {
    let a: Geometry = line_string![(x: 0., y: 0.), (x: 10., y: 0.)].into();
    let b: Geometry = line_string![(x: 5., y: 0.), (x: 15., y: 0.)].into();

    let intersection = a.intersection(&b).unwrap();
    let expected: Geometry = line_string![(x: 5., y: 0.), (x: 10., y: 0.)].into();
    assert!(intersection.equals_topo(&expected).unwrap());

    assert!(a.overlaps(&b).unwrap());
}

#[test]
fn point_on_boundary_location() {
    let square = square_a();
    let corner = planar::coord! { x: 10., y: 0. };
    assert_eq!(square.coordinate_position(&corner), CoordPos::OnBoundary);

    let point: Geometry = Point::new(10., 0.).into();
    assert!(square.intersects(&point).unwrap());
    assert!(!square.contains(&point).unwrap());
}

#[test]
fn bowtie_is_repaired() {
    let bowtie: Geometry =
        polygon![(x: 0., y: 0.), (x: 1., y: 1.), (x: 0., y: 1.), (x: 1., y: 0.)].into();
    assert!(!is_valid(&bowtie));

    let repaired = make_valid(&bowtie).unwrap();
    assert!(is_valid(&repaired));
    match &repaired {
        Geometry::MultiPolygon(mp) => {
            assert_eq!(mp.0.len(), 2);
            for polygon in &mp.0 {
                assert!((polygon.unsigned_area() - 0.25).abs() < 1e-12);
            }
        }
        other => panic!("expected MultiPolygon, got {:?}", other),
    }
}

#[test]
fn fixed_precision_overlay_snaps_near_crossings() {
    use planar::{overlay_with_precision, OverlayOp, PrecisionModel};
    let a: Geometry = line_string![(x: 0., y: 0.), (x: 10., y: 10.)].into();
    let b: Geometry = line_string![(x: 10., y: 0.), (x: 0.000001, y: 10.000001)].into();

    let result =
        overlay_with_precision(&a, &b, OverlayOp::Intersection, &PrecisionModel::fixed(1.0))
            .unwrap();
    // the near-crossing collapses to a single grid vertex
    let expected: Geometry = Point::new(5., 5.).into();
    assert!(result.equals_exact(&expected));
}

#[test]
fn predicate_laws_hold() {
    let a = square_a();
    let b = square_b();
    let c: Geometry = line_string![(x: -5., y: -5.), (x: -1., y: -1.)].into();

    for (left, right) in [(&a, &b), (&a, &c), (&b, &c)] {
        assert_eq!(
            left.intersects(right).unwrap(),
            right.intersects(left).unwrap()
        );
        assert_eq!(
            left.disjoint(right).unwrap(),
            !left.intersects(right).unwrap()
        );
    }

    // equals == contains both ways
    let a_clone = a.clone();
    assert!(a.equals_topo(&a_clone).unwrap());
    assert!(a.contains(&a_clone).unwrap() && a_clone.contains(&a).unwrap());
}

#[test]
fn unary_union_dissolves_collection() {
    let mp: Geometry = MultiPolygon(vec![
        polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)],
        polygon![(x: 5., y: 5.), (x: 15., y: 5.), (x: 15., y: 15.), (x: 5., y: 15.)],
        polygon![(x: 40., y: 40.), (x: 41., y: 40.), (x: 41., y: 41.), (x: 40., y: 41.)],
    ])
    .into();
    let unioned = unary_union(&mp).unwrap();
    assert!((unioned.unsigned_area() - 176.).abs() < 1e-9);
    assert!(is_valid(&unioned));
}

#[test]
fn scalar_operations_agree() {
    let square = square_a();

    let centroid = square.centroid().unwrap();
    assert_eq!(centroid, Point::new(5., 5.));

    let interior = interior_point(&square).unwrap();
    assert_eq!(square.coordinate_position(&interior), CoordPos::Inside);

    let hull = square.convex_hull();
    assert_eq!(hull.unsigned_area(), 100.);

    let ring_boundary = boundary(&square).unwrap();
    assert!(matches!(ring_boundary, Geometry::LineString(_)));

    assert!(is_simple(&square));
}

#[test]
fn distance_between_disjoint_geometries() {
    let a = square_a();
    let far: Geometry = Point::new(13., 10.).into();
    assert_eq!(distance(&a, &far).unwrap(), 3.);

    let (on_a, on_far) = nearest_points(&a, &far).unwrap();
    assert_eq!(on_a, planar::coord! { x: 10., y: 10. });
    assert_eq!(on_far, planar::coord! { x: 13., y: 10. });
}

#[test]
fn touching_squares_intersect_in_a_line() {
    let a = square_a();
    let adjacent: Geometry =
        polygon![(x: 10., y: 0.), (x: 20., y: 0.), (x: 20., y: 10.), (x: 10., y: 10.)].into();

    assert!(a.touches(&adjacent).unwrap());
    let intersection = a.intersection(&adjacent).unwrap();
    let expected: Geometry = line_string![(x: 10., y: 0.), (x: 10., y: 10.)].into();
    assert!(intersection.equals_topo(&expected).unwrap());

    let union = a.union(&adjacent).unwrap();
    assert_eq!(union.unsigned_area(), 200.);
    assert!(matches!(union, Geometry::Polygon(_)));
}

#[test]
fn holed_polygon_overlay() {
    let holed: Geometry = polygon!(
        exterior: [(x: 0., y: 0.), (x: 20., y: 0.), (x: 20., y: 20.), (x: 0., y: 20.)],
        interiors: [[(x: 5., y: 5.), (x: 15., y: 5.), (x: 15., y: 15.), (x: 5., y: 15.)]],
    )
    .into();
    let plug: Geometry =
        polygon![(x: 5., y: 5.), (x: 15., y: 5.), (x: 15., y: 15.), (x: 5., y: 15.)].into();

    let filled = holed.union(&plug).unwrap();
    assert_eq!(filled.unsigned_area(), 400.);
    assert!(is_valid(&filled));

    let hole_again = filled.difference(&plug).unwrap();
    assert!((hole_again.unsigned_area() - 300.).abs() < 1e-9);
    assert!(hole_again.equals_topo(&holed).unwrap());
}
