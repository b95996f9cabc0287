// Centrality metrics over the interaction graph.
//
// Four rankings, each answering "who is most central?" differently:
//   - degree: how many distinct characters someone talks with
//   - weighted degree: how many interactions they take part in overall
//   - closeness: how near they are to everyone, where a heavy edge is a
//     short distance (distance = 1 / weight)
//   - betweenness: how often they sit on shortest (hop-count) paths between
//     other characters

use std::cmp::Ordering;
use std::collections::VecDeque;

use indexmap::IndexMap;
use petgraph::algo::dijkstra;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::network::InteractionGraph;

/// Top-N rankings for each metric, best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CentralityReport {
    pub degree: IndexMap<String, f64>,
    pub weighted_degree: IndexMap<String, u64>,
    pub closeness: IndexMap<String, f64>,
    pub betweenness: IndexMap<String, f64>,
}

/// Fraction of other nodes each node is connected to.
///
/// A graph with a single node gives it 1.0.
pub fn degree_centrality(graph: &InteractionGraph) -> Vec<(String, f64)> {
    let n = graph.order();
    graph
        .nodes()
        .map(|node| {
            let value = if n <= 1 {
                1.0
            } else {
                graph.degree(node) as f64 / (n - 1) as f64
            };
            (node.to_string(), value)
        })
        .collect()
}

/// Sum of interaction weights per node.
pub fn weighted_degree(graph: &InteractionGraph) -> Vec<(String, u64)> {
    graph
        .nodes()
        .map(|node| (node.to_string(), graph.weighted_degree(node)))
        .collect()
}

/// Build the distance graph used for closeness: one edge per interaction
/// with length `1 / weight`.
fn distance_graph(graph: &InteractionGraph) -> (UnGraph<(), f64>, Vec<NodeIndex>) {
    let mut g = UnGraph::with_capacity(graph.order(), graph.edge_count());
    let index: Vec<NodeIndex> = graph.nodes().map(|_| g.add_node(())).collect();

    for (u, v, w) in graph.edges() {
        // A zero-weight pair never interacted, so it is no shortcut
        if w == 0 {
            continue;
        }
        if let (Some(i), Some(j)) = (graph.index_of(u), graph.index_of(v)) {
            g.add_edge(index[i], index[j], 1.0 / f64::from(w));
        }
    }
    (g, index)
}

/// Distance-weighted closeness centrality.
///
/// For a node reaching `r` others at total distance `d`, closeness is
/// `(r / d) * (r / (n - 1))`. The second factor scales down nodes in small
/// components, so a disconnected graph doesn't reward its islands.
pub fn closeness_centrality(graph: &InteractionGraph) -> Vec<(String, f64)> {
    let n = graph.order();
    let (g, index) = distance_graph(graph);

    graph
        .nodes()
        .zip(&index)
        .map(|(node, &source)| {
            let lengths = dijkstra(&g, source, None, |e| *e.weight());
            let reachable = lengths.len().saturating_sub(1) as f64;
            let total: f64 = lengths.values().sum();

            let value = if total > 0.0 && n > 1 {
                (reachable / total) * (reachable / (n - 1) as f64)
            } else {
                0.0
            };
            (node.to_string(), value)
        })
        .collect()
}

/// Unweighted betweenness centrality (Brandes).
///
/// Normalized for an undirected graph: the raw all-sources sum counts each
/// pair twice, so dividing by `(n - 1)(n - 2)` yields the fraction of
/// shortest paths through each node. Graphs of two nodes or fewer are left
/// unscaled (every value is zero anyway).
pub fn betweenness_centrality(graph: &InteractionGraph) -> Vec<(String, f64)> {
    let n = graph.order();
    let adj: Vec<Vec<usize>> = graph
        .nodes()
        .map(|node| {
            graph
                .neighbors(node)
                .filter_map(|(nbr, _)| graph.index_of(nbr))
                .collect()
        })
        .collect();

    let mut betweenness = vec![0.0f64; n];

    for source in 0..n {
        // Nodes in order of non-decreasing distance from source
        let mut stack: Vec<usize> = Vec::with_capacity(n);
        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut num_paths = vec![0.0f64; n];
        let mut distance: Vec<i64> = vec![-1; n];
        num_paths[source] = 1.0;
        distance[source] = 0;

        let mut queue = VecDeque::from([source]);
        while let Some(v) = queue.pop_front() {
            stack.push(v);
            for &w in &adj[v] {
                if distance[w] < 0 {
                    distance[w] = distance[v] + 1;
                    queue.push_back(w);
                }
                if distance[w] == distance[v] + 1 {
                    num_paths[w] += num_paths[v];
                    predecessors[w].push(v);
                }
            }
        }

        let mut dependency = vec![0.0f64; n];
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                dependency[v] += num_paths[v] / num_paths[w] * (1.0 + dependency[w]);
            }
            if w != source {
                betweenness[w] += dependency[w];
            }
        }
    }

    if n > 2 {
        let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
        for value in &mut betweenness {
            *value *= scale;
        }
    }

    graph
        .nodes()
        .map(|node| node.to_string())
        .zip(betweenness)
        .collect()
}

/// Sort descending and keep the first `n`. Ties keep their input order.
pub fn top_n<T: PartialOrd>(mut values: Vec<(String, T)>, n: usize) -> IndexMap<String, T> {
    values.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    values.into_iter().take(n).collect()
}

/// Compute all four metrics and keep the top `n` of each.
///
/// An empty graph gives four empty rankings.
pub fn compute_top_centralities(graph: &InteractionGraph, n: usize) -> CentralityReport {
    let report = CentralityReport {
        degree: top_n(degree_centrality(graph), n),
        weighted_degree: top_n(weighted_degree(graph), n),
        closeness: top_n(closeness_centrality(graph), n),
        betweenness: top_n(betweenness_centrality(graph), n),
    };

    info!(
        nodes = graph.order(),
        edges = graph.edge_count(),
        top_n = n,
        "Computed centrality rankings"
    );
    report
}
