use crate::algorithm::line_intersection::line_intersection;
use crate::index::chain::{build_chains, MonotoneChain};
use crate::index::StrTree;
use crate::interrupt::check_interrupt;
use planar_types::{Coord, Geometry, Line, Result};

/// Reports whether any segment of a test geometry intersects any segment
/// of a prepared base geometry.
///
/// The base linework is decomposed into monotone chains held in an
/// STR-tree once; each query runs the test geometry's chains against the
/// index and stops at the first intersecting pair.
pub struct FastSegmentSetIntersectionFinder {
    coord_lists: Vec<Vec<Coord>>,
    chains: Vec<MonotoneChain>,
    tree: StrTree<usize>,
}

pub(crate) fn linework_of(geometry: &Geometry) -> Vec<Vec<Coord>> {
    let mut lists = Vec::new();
    collect_linework(geometry, &mut lists);
    lists
}

fn collect_linework(geometry: &Geometry, lists: &mut Vec<Vec<Coord>>) {
    let mut push = |coords: Vec<Coord>| {
        if coords.len() >= 2 {
            lists.push(coords);
        }
    };
    match geometry {
        Geometry::Point(_) | Geometry::MultiPoint(_) => {}
        Geometry::LineString(ls) => push(ls.coords().to_vec()),
        Geometry::LinearRing(ring) => push(ring.coords().to_vec()),
        Geometry::Polygon(polygon) => {
            for ring in polygon.rings() {
                push(ring.coords().to_vec());
            }
        }
        Geometry::MultiLineString(mls) => {
            for ls in &mls.0 {
                push(ls.coords().to_vec());
            }
        }
        Geometry::MultiPolygon(mp) => {
            for polygon in &mp.0 {
                for ring in polygon.rings() {
                    push(ring.coords().to_vec());
                }
            }
        }
        Geometry::GeometryCollection(gc) => {
            for child in &gc.0 {
                collect_linework(child, lists);
            }
        }
    }
}

impl FastSegmentSetIntersectionFinder {
    pub fn new(geometry: &Geometry) -> Result<Self> {
        let coord_lists = linework_of(geometry);
        let mut chains = Vec::new();
        for (list_index, coords) in coord_lists.iter().enumerate() {
            chains.extend(build_chains(coords, list_index));
        }
        let mut tree = StrTree::new();
        for (chain_index, chain) in chains.iter().enumerate() {
            tree.insert(*chain.envelope(), chain_index)?;
        }
        Ok(FastSegmentSetIntersectionFinder {
            coord_lists,
            chains,
            tree,
        })
    }

    /// Whether any segment of `other` intersects any base segment.
    pub fn intersects(&self, other: &Geometry) -> Result<bool> {
        for test_coords in linework_of(other) {
            check_interrupt()?;
            for test_chain in build_chains(&test_coords, 0) {
                let mut found = false;
                for &chain_index in self.tree.query_items(test_chain.envelope()) {
                    if found {
                        break;
                    }
                    let base_chain = &self.chains[chain_index];
                    let base_coords = &self.coord_lists[base_chain.parent];
                    base_chain.compute_overlaps(
                        base_coords,
                        &test_chain,
                        &test_coords,
                        &mut |base_segment, test_segment| {
                            if found {
                                return;
                            }
                            let base = Line::new(
                                base_coords[base_segment],
                                base_coords[base_segment + 1],
                            );
                            let test = Line::new(
                                test_coords[test_segment],
                                test_coords[test_segment + 1],
                            );
                            if line_intersection(base, test).is_some() {
                                found = true;
                            }
                        },
                    );
                }
                if found {
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use planar_types::{line_string, polygon};

    #[test]
    fn detects_boundary_crossing() {
        let square: Geometry =
            polygon![(x: 0., y: 0.), (x: 10., y: 0.), (x: 10., y: 10.), (x: 0., y: 10.)].into();
        let finder = FastSegmentSetIntersectionFinder::new(&square).unwrap();

        let crossing: Geometry = line_string![(x: -5., y: 5.), (x: 5., y: 5.)].into();
        assert!(finder.intersects(&crossing).unwrap());

        let inside: Geometry = line_string![(x: 2., y: 2.), (x: 8., y: 8.)].into();
        assert!(!finder.intersects(&inside).unwrap());

        let outside: Geometry = line_string![(x: 20., y: 20.), (x: 30., y: 30.)].into();
        assert!(!finder.intersects(&outside).unwrap());
    }
}
