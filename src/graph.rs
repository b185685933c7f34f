pub mod multigraph;
pub mod partition;

pub use multigraph::Multigraph;
pub use partition::SuperVertices;
