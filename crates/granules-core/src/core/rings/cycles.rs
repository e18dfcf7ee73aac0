use super::graph::BondGraph;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Longest ring the search will look for. Bounds the recursion depth.
pub const MAX_RING_SIZE: usize = 32;

/// A simple cycle as the ordered list of atom serials it was found along.
///
/// Two cycles with the same vertex set are the same ring, whatever their
/// starting point or direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    vertices: Vec<usize>,
}

impl Cycle {
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains(&self, serial: usize) -> bool {
        self.vertices.contains(&serial)
    }

    /// Consecutive vertex pairs, closing back to the first vertex.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.vertices
            .iter()
            .zip(self.vertices.iter().cycle().skip(1))
            .map(|(&a, &b)| (a, b))
    }

    /// The sorted vertex set identifying this ring.
    pub fn canonical_key(&self) -> Vec<usize> {
        let mut key = self.vertices.clone();
        key.sort_unstable();
        key
    }
}

/// Collects cycles in discovery order, keeping one per vertex set.
#[derive(Debug, Default)]
pub struct CycleAccumulator {
    seen: HashSet<Vec<usize>>,
    cycles: Vec<Cycle>,
}

impl CycleAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `path` as a cycle unless its vertex set was already seen.
    ///
    /// # Return
    ///
    /// `true` if the cycle was new.
    pub fn record(&mut self, path: &[usize]) -> bool {
        let cycle = Cycle {
            vertices: path.to_vec(),
        };
        if self.seen.insert(cycle.canonical_key()) {
            self.cycles.push(cycle);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    pub fn into_cycles(self) -> Vec<Cycle> {
        self.cycles
    }
}

struct PathSearch<'g> {
    graph: &'g BondGraph,
    start: usize,
    length: usize,
    path: Vec<usize>,
}

impl PathSearch<'_> {
    fn walk(&mut self, vertex: usize, accumulator: &mut CycleAccumulator) {
        self.path.push(vertex);
        if self.path.len() == self.length {
            if self.graph.has_bond(vertex, self.start) {
                accumulator.record(&self.path);
            }
        } else {
            // Serials below the start were exhausted as earlier starts.
            for next in self.graph.neighbors(vertex) {
                if next > self.start && !self.path.contains(&next) {
                    self.walk(next, accumulator);
                }
            }
        }
        self.path.pop();
    }
}

/// Enumerates every simple cycle with exactly `n` atoms.
///
/// Each atom is tried as a start in ascending serial order, and paths of `n`
/// distinct atoms that close back onto the start are recorded. A ring is
/// reported once, in the orientation it was first found.
///
/// # Return
///
/// The distinct cycles in discovery order. Empty when `n < 3`, when the graph
/// has fewer than `n` atoms or when `n` exceeds [`MAX_RING_SIZE`].
pub fn find_cycles(graph: &BondGraph, n: usize) -> Vec<Cycle> {
    if n > MAX_RING_SIZE {
        warn!(
            ring_size = n,
            max = MAX_RING_SIZE,
            "Requested ring size exceeds the search limit."
        );
        return Vec::new();
    }
    if n < 3 || graph.atom_count() < n {
        return Vec::new();
    }

    let mut accumulator = CycleAccumulator::new();
    for start in graph.atoms() {
        let mut search = PathSearch {
            graph,
            start,
            length: n,
            path: Vec::with_capacity(n),
        };
        search.walk(start, &mut accumulator);
    }

    debug!(ring_size = n, cycles = accumulator.len(), "Enumerated cycles.");
    accumulator.into_cycles()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(serials: &[usize]) -> Vec<(usize, usize)> {
        serials
            .iter()
            .zip(serials.iter().cycle().skip(1))
            .map(|(&a, &b)| (a, b))
            .collect()
    }

    fn keys(cycles: &[Cycle]) -> Vec<Vec<usize>> {
        cycles.iter().map(Cycle::canonical_key).collect()
    }

    #[test]
    fn hexagon_has_exactly_one_six_cycle() {
        let graph = BondGraph::from_bonds(ring(&[1, 2, 3, 4, 5, 6]));
        let cycles = find_cycles(&graph, 6);
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].vertices(), &[1, 2, 3, 4, 5, 6]);
        assert!(find_cycles(&graph, 3).is_empty());
        assert!(find_cycles(&graph, 4).is_empty());
    }

    #[test]
    fn fused_triangles_give_two_three_cycles() {
        let graph = BondGraph::from_bonds([(1, 2), (2, 3), (3, 1), (2, 4), (4, 3)]);
        let cycles = find_cycles(&graph, 3);
        assert_eq!(keys(&cycles), vec![vec![1, 2, 3], vec![2, 3, 4]]);
        assert_eq!(keys(&find_cycles(&graph, 4)), vec![vec![1, 2, 3, 4]]);
    }

    #[test]
    fn complete_graph_counts_each_vertex_set_once() {
        let graph = BondGraph::from_bonds([(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)]);
        assert_eq!(find_cycles(&graph, 3).len(), 4);
        // Three distinct Hamiltonian cycles share one vertex set.
        assert_eq!(find_cycles(&graph, 4).len(), 1);
    }

    #[test]
    fn naphthalene_skeleton_has_two_hexagons_and_one_decagon() {
        let mut bonds = ring(&[1, 2, 3, 4, 5, 6]);
        bonds.extend([(5, 7), (7, 8), (8, 9), (9, 10), (10, 6)]);
        let graph = BondGraph::from_bonds(bonds);

        let hexagons = find_cycles(&graph, 6);
        assert_eq!(
            keys(&hexagons),
            vec![vec![1, 2, 3, 4, 5, 6], vec![5, 6, 7, 8, 9, 10]]
        );
        assert_eq!(find_cycles(&graph, 10).len(), 1);
    }

    #[test]
    fn every_reported_cycle_is_closed_by_bonds() {
        let graph = BondGraph::from_bonds([(1, 2), (1, 3), (1, 4), (2, 3), (2, 4), (3, 4)]);
        for cycle in find_cycles(&graph, 4) {
            assert!(cycle.edges().all(|(a, b)| graph.has_bond(a, b)));
        }
    }

    #[test]
    fn degenerate_requests_yield_nothing() {
        let graph = BondGraph::from_bonds(ring(&[1, 2, 3]));
        assert!(find_cycles(&graph, 0).is_empty());
        assert!(find_cycles(&graph, 2).is_empty());
        assert!(find_cycles(&graph, 4).is_empty());
        assert!(find_cycles(&graph, MAX_RING_SIZE + 1).is_empty());
        assert!(find_cycles(&BondGraph::default(), 3).is_empty());
    }

    #[test]
    fn accumulator_ignores_rotations_and_reversals() {
        let mut accumulator = CycleAccumulator::new();
        assert!(accumulator.record(&[1, 2, 3, 4]));
        assert!(!accumulator.record(&[3, 4, 1, 2]));
        assert!(!accumulator.record(&[1, 4, 3, 2]));
        assert!(accumulator.record(&[1, 2, 4, 5]));
        assert_eq!(accumulator.len(), 2);
    }

    #[test]
    fn cycle_edges_wrap_around() {
        let mut accumulator = CycleAccumulator::new();
        accumulator.record(&[7, 8, 9]);
        let cycle = &accumulator.into_cycles()[0];
        assert_eq!(cycle.edges().collect::<Vec<_>>(), vec![(7, 8), (8, 9), (9, 7)]);
    }
}
