pub mod graph_service;
pub mod pathfinder;

pub use graph_service::GraphService;
pub use pathfinder::Pathfinder;
