//! `ChinaExplorer` - self-drive travel discovery around a map
//!
//! This library holds the coordination engine behind the explorer: the
//! location catalog, favorites, the selection and dossier lifecycle,
//! AI-driven discovery and the map viewport, plus the adapters and HTTP API
//! around them.

pub mod ai;
pub mod api;
pub mod catalog;
pub mod config;
pub mod discovery;
pub mod engine;
pub mod error;
pub mod favorites;
pub mod logging;
pub mod models;
pub mod selection;
pub mod state;
pub mod viewport;
pub mod web;

// Re-export core types for public API
pub use ai::{ContentBackend, DiscoveryClient, EnrichmentClient, GeminiBackend, GenerationRequest};
pub use catalog::Catalog;
pub use config::ExplorerConfig;
pub use engine::{Engine, EngineHandle};
pub use error::ExplorerError;
pub use models::{Category, Coordinates, EnrichmentResult, Location, LocationDraft};
pub use state::{AppState, Snapshot};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, ExplorerError>;
