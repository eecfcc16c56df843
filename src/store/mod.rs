/// Project store module
///
/// Persists the project list to a single JSON file with a rolling backup copy.

pub mod config;
pub mod models;
mod persist;
pub mod project_store;
pub mod searcher;
pub mod transfer;

pub use config::StoreConfig;
pub use models::*;
pub use project_store::ProjectStore;
pub use searcher::{SearchResult, Searcher};
