pub mod dom;
pub mod node_path;
pub mod tree;
