pub mod attraction;
pub mod repulsion;

pub use attraction::{attraction, total_attraction};
pub use repulsion::repulsion;
