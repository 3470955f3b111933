//! Favorites store: an insertion-ordered set of location ids
//!
//! Ids are not checked against the catalog. An id with no catalog entry is
//! an orphan and is skipped when favorites are resolved for display.

use tracing::debug;

use crate::catalog::Catalog;
use crate::models::Location;

#[derive(Debug, Clone, Default)]
pub struct Favorites {
    ids: Vec<String>,
}

impl Favorites {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present. Returns whether it is now a favorite.
    pub fn toggle(&mut self, id: &str) -> bool {
        if let Some(position) = self.ids.iter().position(|existing| existing == id) {
            self.ids.remove(position);
            false
        } else {
            self.ids.push(id.to_string());
            true
        }
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Favorited locations in the order they were added, skipping orphans
    #[must_use]
    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Location> {
        self.ids
            .iter()
            .filter_map(|id| {
                let location = catalog.get(id);
                if location.is_none() {
                    debug!("Skipping orphaned favorite '{}'", id);
                }
                location
            })
            .collect()
    }
}
