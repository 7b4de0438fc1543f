mod edge;
mod model;
mod node;

pub use edge::{AttachSide, Edge, EdgeShape, EdgeType, arrow_head};
pub use model::{EdgeTuple, Graph, MAX_NODES};
pub use node::{GraphNode, Highlight, NodeId};
