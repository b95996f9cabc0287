// Interaction network: construction, storage, layout and rendering.

pub mod builder;
pub mod graph;
pub mod layout;
pub mod render;

pub use builder::{build_interaction_graph, NetworkConfig};
pub use graph::{Adjacency, InteractionGraph};
