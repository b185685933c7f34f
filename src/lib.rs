pub mod error;
pub mod graph;
pub mod mincut;

pub use error::{GraphError, Result};
pub use graph::{Multigraph, SuperVertices};
pub use mincut::{crossing_edges, min_cut, min_cut_parallel, random_edge, CutConfig, CutResult};
