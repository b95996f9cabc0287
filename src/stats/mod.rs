// Network statistics — centrality rankings over the interaction graph.

pub mod centrality;

pub use centrality::{compute_top_centralities, CentralityReport};
