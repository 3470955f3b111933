//! Catalog store: the ordered collection of known locations
//!
//! Entries are only ever added, never removed. Identifiers are unique for the
//! lifetime of the catalog; a generated identifier that collides is relabelled.

use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, warn};

use crate::models::{Location, LocationDraft, seed_locations};

/// Where discovered entries came from; becomes the identifier prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdSource {
    /// "Explore more"
    Explore,
    /// Themed search
    Search,
}

impl IdSource {
    #[must_use]
    pub fn tag(&self) -> &'static str {
        match self {
            IdSource::Explore => "ai",
            IdSource::Search => "search",
        }
    }
}

/// Issues `{source}-{unix_millis}-{index}` identifiers
#[derive(Debug, Clone, Default)]
pub struct IdGenerator;

impl IdGenerator {
    #[must_use]
    pub fn generate(&self, source: IdSource, index: usize) -> String {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        format!("{}-{}-{}", source.tag(), millis, index)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    locations: Vec<Location>,
    ids: HashSet<String>,
    generator: IdGenerator,
}

impl Catalog {
    /// Catalog holding the static seed locations
    #[must_use]
    pub fn seeded() -> Self {
        Self::from_locations(seed_locations())
    }

    /// Build a catalog from existing entries; later duplicates are relabelled
    #[must_use]
    pub fn from_locations(locations: Vec<Location>) -> Self {
        let mut catalog = Self::default();
        for location in locations {
            let location = catalog.claim(location);
            catalog.locations.push(location);
        }
        catalog
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|location| location.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// All entries in display order
    #[must_use]
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Display names, used as the exclusion list for discovery
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.locations.iter().map(|l| l.name.clone()).collect()
    }

    /// Add drafts at the end, keeping existing order. Returns the new ids in order.
    pub fn append(&mut self, drafts: Vec<LocationDraft>, source: IdSource) -> Vec<String> {
        let added = self.materialize(drafts, source);
        let ids = added.iter().map(|l| l.id.clone()).collect();
        self.locations.extend(added);
        ids
    }

    /// Add drafts at the front in response order. Returns the new ids in order.
    pub fn prepend(&mut self, drafts: Vec<LocationDraft>, source: IdSource) -> Vec<String> {
        let added = self.materialize(drafts, source);
        let ids = added.iter().map(|l| l.id.clone()).collect();
        self.locations.splice(0..0, added);
        ids
    }

    fn materialize(&mut self, drafts: Vec<LocationDraft>, source: IdSource) -> Vec<Location> {
        drafts
            .into_iter()
            .enumerate()
            .map(|(index, draft)| {
                let id = self.generator.generate(source, index);
                self.claim(draft.into_location(id))
            })
            .collect()
    }

    /// Reserve the location's id, relabelling it with a numeric suffix on collision
    fn claim(&mut self, mut location: Location) -> Location {
        if self.ids.contains(&location.id) {
            let base = location.id.clone();
            let mut suffix = 1;
            while self.ids.contains(&format!("{base}-{suffix}")) {
                suffix += 1;
            }
            location.id = format!("{base}-{suffix}");
            warn!("Identifier '{}' already taken, relabelled to '{}'", base, location.id);
        }
        debug!("Registered location '{}' as {}", location.name, location.id);
        self.ids.insert(location.id.clone());
        location
    }
}
