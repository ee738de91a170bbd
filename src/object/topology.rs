//! Edge table shared by every contouring pass over one mesh.

use hashbrown::HashMap;

/// Unique undirected edges of a triangle mesh.
///
/// Edge `k` of a triangle `[a, b, c]` joins its `k`-th and `(k+1) % 3`-th
/// corner. The table only depends on connectivity, so it is built once per
/// mesh and reused while scalars change between passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeshTopology {
    edges: Vec<[usize; 2]>,
    triangle_edges: Vec<[usize; 3]>,
}

impl MeshTopology {
    pub fn new(triangles: &[[usize; 3]]) -> Self {
        let mut lookup: HashMap<(usize, usize), usize> = HashMap::with_capacity(triangles.len() * 2);
        let mut edges = Vec::new();

        let triangle_edges = triangles
            .iter()
            .map(|tri| {
                let mut ids = [0; 3];
                for (k, id) in ids.iter_mut().enumerate() {
                    let (a, b) = (tri[k], tri[(k + 1) % 3]);
                    let key = (a.min(b), a.max(b));
                    *id = *lookup.entry(key).or_insert_with(|| {
                        edges.push([key.0, key.1]);
                        edges.len() - 1
                    });
                }
                ids
            })
            .collect();

        MeshTopology {
            edges,
            triangle_edges,
        }
    }

    /// Vertex pair of an edge, lower index first.
    pub fn edge(&self, id: usize) -> [usize; 2] {
        self.edges[id]
    }

    pub fn edges(&self) -> &[[usize; 2]] {
        &self.edges
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Edge ids of a triangle, in corner order.
    pub fn triangle_edges(&self, triangle: usize) -> [usize; 3] {
        self.triangle_edges[triangle]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_edge_is_stored_once() {
        let topology = MeshTopology::new(&[[0, 1, 2], [0, 2, 3]]);
        assert_eq!(topology.num_edges(), 5);
        // edge 0-2 is the third edge of the first triangle and the first of the second
        assert_eq!(topology.triangle_edges(0)[2], topology.triangle_edges(1)[0]);
        assert_eq!(topology.edge(topology.triangle_edges(1)[0]), [0, 2]);
    }
}
