use super::LookupError;
use super::cycles::Cycle;
use crate::core::models::atom::AtomRecord;
use nalgebra::{Point3, Vector3};
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// When two polygons count as neighbors in a [`PolygonNetwork`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AdjacencyRule {
    /// At least one atom in common.
    #[default]
    SharedVertex,
    /// At least one bond in common (fused rings).
    SharedEdge,
}

/// A ring with the position of each of its atoms, in cycle order.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<usize>,
    positions: Vec<Point3<f64>>,
}

impl Polygon {
    /// Resolves every vertex of `cycle` to a position through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::MissingAtom`] if `lookup` has no record for a
    /// vertex, or [`LookupError::IncompleteCoordinates`] if the record lacks one
    /// of x, y or z.
    pub fn from_cycle<'a, F>(cycle: &Cycle, lookup: F) -> Result<Self, LookupError>
    where
        F: Fn(usize) -> Option<&'a AtomRecord>,
    {
        let positions = cycle
            .vertices()
            .iter()
            .map(|&serial| {
                lookup(serial)
                    .ok_or(LookupError::MissingAtom { serial })?
                    .position()
                    .ok_or(LookupError::IncompleteCoordinates { serial })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            vertices: cycle.vertices().to_vec(),
            positions,
        })
    }

    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Ring bonds as `(min, max)` serial pairs, in cycle order.
    pub fn edges(&self) -> Vec<(usize, usize)> {
        self.vertices
            .iter()
            .zip(self.vertices.iter().cycle().skip(1))
            .map(|(&a, &b)| (a.min(b), a.max(b)))
            .collect()
    }

    /// Mean position of the ring atoms.
    pub fn centroid(&self) -> Point3<f64> {
        if self.positions.is_empty() {
            return Point3::origin();
        }
        let sum: Vector3<f64> = self.positions.iter().map(|p| p.coords).sum();
        Point3::from(sum / self.positions.len() as f64)
    }

    /// Summed length of the ring bonds.
    pub fn perimeter(&self) -> f64 {
        self.positions
            .iter()
            .zip(self.positions.iter().cycle().skip(1))
            .map(|(a, b)| (b - a).norm())
            .sum()
    }

    pub fn shares_vertex(&self, other: &Polygon) -> bool {
        self.vertices.iter().any(|v| other.vertices.contains(v))
    }

    pub fn shares_edge(&self, other: &Polygon) -> bool {
        let edges: HashSet<(usize, usize)> = self.edges().into_iter().collect();
        other.edges().iter().any(|e| edges.contains(e))
    }

    pub fn is_adjacent_to(&self, other: &Polygon, rule: AdjacencyRule) -> bool {
        match rule {
            AdjacencyRule::SharedVertex => self.shares_vertex(other),
            AdjacencyRule::SharedEdge => self.shares_edge(other),
        }
    }
}

/// Undirected graph with one node per polygon and an edge between every pair
/// of distinct adjacent polygons.
#[derive(Debug, Clone)]
pub struct PolygonNetwork {
    graph: UnGraph<Polygon, ()>,
    rule: AdjacencyRule,
}

impl PolygonNetwork {
    /// Builds the network; node `i` holds `polygons[i]`.
    pub fn build(polygons: Vec<Polygon>, rule: AdjacencyRule) -> Self {
        let mut graph = UnGraph::with_capacity(polygons.len(), 0);
        let nodes: Vec<NodeIndex> = polygons.into_iter().map(|p| graph.add_node(p)).collect();

        for (i, &a) in nodes.iter().enumerate() {
            for &b in &nodes[i + 1..] {
                if graph[a].is_adjacent_to(&graph[b], rule) {
                    graph.add_edge(a, b, ());
                }
            }
        }
        Self { graph, rule }
    }

    pub fn rule(&self) -> AdjacencyRule {
        self.rule
    }

    pub fn polygon_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn connection_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn polygon(&self, index: usize) -> Option<&Polygon> {
        self.graph.node_weight(NodeIndex::new(index))
    }

    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        self.graph.node_indices().map(|index| &self.graph[index])
    }

    /// Adjacent polygon pairs as `(i, j)` indices with `i < j`.
    pub fn connections(&self) -> Vec<(usize, usize)> {
        let mut pairs: Vec<(usize, usize)> = self
            .graph
            .edge_indices()
            .filter_map(|e| self.graph.edge_endpoints(e))
            .map(|(a, b)| (a.index().min(b.index()), a.index().max(b.index())))
            .collect();
        pairs.sort_unstable();
        pairs
    }

    /// Indices of the polygons adjacent to polygon `index`, ascending.
    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        if index >= self.graph.node_count() {
            return Vec::new();
        }
        let mut neighbors: Vec<usize> = self
            .graph
            .neighbors(NodeIndex::new(index))
            .map(|n| n.index())
            .collect();
        neighbors.sort_unstable();
        neighbors
    }

    pub fn graph(&self) -> &UnGraph<Polygon, ()> {
        &self.graph
    }
}
