// InteractionGraph — an undirected, weighted, insertion-ordered graph.
//
// Nodes and each node's neighbor map keep first-insertion order. The JSON
// files that connect the pipeline steps, and every ranking tie-break, depend
// on that order, so a plain HashMap won't do here.

use indexmap::IndexMap;

/// Adjacency map as written to / read from JSON: node -> neighbor -> weight.
pub type Adjacency = IndexMap<String, IndexMap<String, u32>>;

/// Weighted undirected graph of character interactions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionGraph {
    adj: Adjacency,
}

impl InteractionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `weight` to the edge between `a` and `b`, creating it if needed.
    ///
    /// New nodes are inserted in argument order (`a` before `b`). Self-edges
    /// are ignored.
    pub fn add_weight(&mut self, a: &str, b: &str, weight: u32) {
        if a == b {
            return;
        }
        *self
            .adj
            .entry(a.to_string())
            .or_default()
            .entry(b.to_string())
            .or_insert(0) += weight;
        *self
            .adj
            .entry(b.to_string())
            .or_default()
            .entry(a.to_string())
            .or_insert(0) += weight;
    }

    /// Set the edge weight between `a` and `b`, replacing any previous value.
    pub fn set_weight(&mut self, a: &str, b: &str, weight: u32) {
        if a == b {
            return;
        }
        self.adj
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string(), weight);
        self.adj
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string(), weight);
    }

    /// Number of nodes.
    pub fn order(&self) -> usize {
        self.adj.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adj.values().map(|n| n.len()).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adj.is_empty()
    }

    /// Node names in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.adj.keys().map(|k| k.as_str())
    }

    /// Position of a node in insertion order.
    pub fn index_of(&self, node: &str) -> Option<usize> {
        self.adj.get_index_of(node)
    }

    pub fn contains(&self, node: &str) -> bool {
        self.adj.contains_key(node)
    }

    /// Edge weight between two nodes, if they interact.
    pub fn weight(&self, a: &str, b: &str) -> Option<u32> {
        self.adj.get(a).and_then(|n| n.get(b)).copied()
    }

    /// Neighbors of a node with edge weights, in insertion order.
    pub fn neighbors(&self, node: &str) -> impl Iterator<Item = (&str, u32)> {
        self.adj
            .get(node)
            .into_iter()
            .flat_map(|n| n.iter().map(|(k, w)| (k.as_str(), *w)))
    }

    /// Number of distinct neighbors.
    pub fn degree(&self, node: &str) -> usize {
        self.adj.get(node).map_or(0, |n| n.len())
    }

    /// Sum of incident edge weights.
    pub fn weighted_degree(&self, node: &str) -> u64 {
        self.neighbors(node).map(|(_, w)| u64::from(w)).sum()
    }

    /// Every undirected edge exactly once, as `(u, v, weight)`.
    ///
    /// An edge is reported under whichever endpoint was inserted first, and
    /// edges of one node come out in neighbor insertion order.
    pub fn edges(&self) -> Vec<(&str, &str, u32)> {
        let mut edges = Vec::with_capacity(self.edge_count());
        for (i, (u, neighbors)) in self.adj.iter().enumerate() {
            for (v, w) in neighbors {
                let seen = self.adj.get_index_of(v.as_str()).is_some_and(|j| j < i);
                if !seen {
                    edges.push((u.as_str(), v.as_str(), *w));
                }
            }
        }
        edges
    }

    /// Smallest and largest edge weight, or `None` when there are no edges.
    pub fn weight_range(&self) -> Option<(u32, u32)> {
        let mut weights = self.adj.values().flat_map(|n| n.values().copied());
        let first = weights.next()?;
        Some(weights.fold((first, first), |(lo, hi), w| (lo.min(w), hi.max(w))))
    }

    /// Serialize to the pipeline's adjacency form.
    ///
    /// Every node is a key; each edge appears once, under the endpoint that
    /// was inserted first. Nodes whose edges were all listed earlier map to
    /// an empty object.
    pub fn to_adjacency(&self) -> Adjacency {
        let mut out: Adjacency = self
            .adj
            .keys()
            .map(|k| (k.clone(), IndexMap::new()))
            .collect();
        for (u, v, w) in self.edges() {
            if let Some(n) = out.get_mut(u) {
                n.insert(v.to_string(), w);
            }
        }
        out
    }

    /// Rebuild a graph from an adjacency map.
    ///
    /// Accepts both the once-per-edge form written by `to_adjacency` and a
    /// fully symmetric map. When a pair is listed twice, the later weight
    /// wins. Nodes that only appear as keys with no edges are dropped, since
    /// only edges define the graph.
    pub fn from_adjacency(adjacency: &Adjacency) -> Self {
        let mut graph = Self::new();
        for (a, neighbors) in adjacency {
            for (b, w) in neighbors {
                graph.set_weight(a, b, *w);
            }
        }
        graph
    }
}
