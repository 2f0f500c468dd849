//! Everything an asset transitively needs, composed on top of the graph's outgoing edges.

use std::collections::{HashSet, VecDeque};

use itertools::Itertools;

use crate::asset_graph::AssetGraph;
use crate::asset_graph::directed_graph::VertexId;

/// Breadth first walk over outgoing edges. The root is part of the result, cycles are fine.
/// The result is sorted by vertex id.
pub fn dependencies(graph: &AssetGraph, root: VertexId) -> Vec<VertexId> {
    let mut visited = HashSet::from([root]);
    let mut queue = VecDeque::from([root]);

    while let Some(vertex) = queue.pop_front() {
        for dest in graph.successors(vertex) {
            if visited.insert(dest) {
                queue.push_back(dest);
            }
        }
    }

    visited.into_iter().sorted().collect_vec()
}

/// The concrete files out of `available` that the dependencies of `root` resolve to. References
/// that no available file satisfies are dropped, as are files nothing references.
pub fn files<'a>(graph: &'a AssetGraph, root: VertexId, available: &HashSet<&str>) -> Vec<&'a str> {
    dependencies(graph, root)
        .into_iter()
        .flat_map(|vertex| &graph.vertex(vertex).data.names)
        .map(String::as_str)
        .filter(|name| available.contains(name))
        .unique()
        .sorted()
        .collect_vec()
}
