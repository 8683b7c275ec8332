pub mod analysis;
pub mod config;
pub mod error;
pub mod graph;
pub mod store;
pub mod style;

pub use config::Config;
pub use error::{CasegraphError, Result};
pub use graph::{sanitize_graph, validate_entity, Entity, GraphData, Relationship};
pub use store::{AnalysisStatus, AnalysisStore};
