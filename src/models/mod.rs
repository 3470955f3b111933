//! Data models for the explorer
//!
//! - Location: catalog entries, categories and coordinates
//! - Enrichment: the AI dossier shown for the active location
//! - Seed: the static catalog and the reference origin

pub mod enrichment;
pub mod location;
pub mod seed;

pub use enrichment::{Culture, EnrichmentResult, HotelInfo, MAX_RECOMMENDATIONS, Seasonality};
pub use location::{Category, Coordinates, Location, LocationDraft};
pub use seed::{ORIGIN, ORIGIN_NAME, seed_locations};
