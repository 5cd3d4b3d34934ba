pub mod graph;
pub mod ids;
pub mod resource;
