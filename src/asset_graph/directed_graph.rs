//! Append only directed graph. Vertices and edges live in two arenas and refer to each other by
//! index only, so cycles in the graph never turn into ownership cycles.

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct VertexId(pub usize);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct EdgeId(pub usize);

#[derive(Debug)]
pub struct Vertex<T> {
    pub id: VertexId,
    pub data: T,
    pub in_edges: Vec<EdgeId>,
    pub out_edges: Vec<EdgeId>,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Edge {
    pub source: VertexId,
    pub dest: VertexId,
}

#[derive(Debug)]
pub struct DirectedGraph<T> {
    vertices: Vec<Vertex<T>>,
    edges: Vec<Edge>,
}

impl<T> Default for DirectedGraph<T> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
        }
    }
}

impl<T> DirectedGraph<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, data: T) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex {
            id,
            data,
            in_edges: Vec::new(),
            out_edges: Vec::new(),
        });
        id
    }

    /// Adds `a -> b`. Parallel edges are not prevented here. Panics when either id is out of range.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge { source: a, dest: b });
        self.vertices[a.0].out_edges.push(id);
        self.vertices[b.0].in_edges.push(id);
        id
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex<T> {
        &self.vertices[id.0]
    }

    pub fn vertex_mut(&mut self, id: VertexId) -> &mut Vertex<T> {
        &mut self.vertices[id.0]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    /// All vertices in ascending id order.
    pub fn vertices(&self) -> &[Vertex<T>] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Targets of `id`'s outgoing edges in insertion order.
    pub fn successors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.vertex(id)
            .out_edges
            .iter()
            .map(|edge| self.edge(*edge).dest)
    }

    /// Sources of `id`'s incoming edges in insertion order.
    pub fn predecessors(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.vertex(id)
            .in_edges
            .iter()
            .map(|edge| self.edge(*edge).source)
    }
}
