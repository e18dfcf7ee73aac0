use petgraph::graphmap::UnGraphMap;

/// Undirected atom-bond graph whose nodes are atom serials.
///
/// Built fresh from a bond list each time it is needed. Repeated bonds collapse
/// into one edge and bonds from an atom to itself are ignored.
#[derive(Debug, Clone, Default)]
pub struct BondGraph {
    graph: UnGraphMap<usize, ()>,
}

impl BondGraph {
    pub fn from_bonds<I>(bonds: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = UnGraphMap::new();
        for (a, b) in bonds {
            if a == b {
                graph.add_node(a);
            } else {
                graph.add_edge(a, b, ());
            }
        }
        Self { graph }
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn contains_atom(&self, serial: usize) -> bool {
        self.graph.contains_node(serial)
    }

    pub fn has_bond(&self, a: usize, b: usize) -> bool {
        self.graph.contains_edge(a, b)
    }

    /// Every atom serial in ascending order.
    pub fn atoms(&self) -> Vec<usize> {
        let mut atoms: Vec<usize> = self.graph.nodes().collect();
        atoms.sort_unstable();
        atoms
    }

    /// Bonded neighbors of `serial` in ascending order.
    pub fn neighbors(&self, serial: usize) -> Vec<usize> {
        if !self.graph.contains_node(serial) {
            return Vec::new();
        }
        let mut neighbors: Vec<usize> = self.graph.neighbors(serial).collect();
        neighbors.sort_unstable();
        neighbors
    }

    pub fn inner(&self) -> &UnGraphMap<usize, ()> {
        &self.graph
    }
}
