pub mod node_type;
pub use node_type::*;

pub mod node;
pub use node::*;

pub mod explain;
pub use explain::*;
