pub mod error;
pub mod fetch;
pub mod graph;
pub mod hops;
pub mod model;

pub use error::TopologyError;
pub use fetch::{DEFAULT_SOURCE_URL, Fetcher};
pub use graph::{GraphSnapshot, TopologyGraph};
pub use model::{Node, Route, RouteDocument};
