//! Application state and the snapshot views are rendered from
//!
//! `AppState` owns every store. All mutations go through its operations,
//! which are synchronous and return the [`Effect`]s the caller has to run
//! (network calls, timers). The engine is the only caller in production.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::config::ExplorerConfig;
use crate::discovery::{DiscoveryCoordinator, DiscoveryKind, DiscoveryRequest};
use crate::favorites::Favorites;
use crate::models::{EnrichmentResult, Location, LocationDraft};
use crate::selection::{Completion, EnrichmentTicket, SelectionController};
use crate::viewport::{MapView, RouteOverlay, ViewportSync};
use crate::Result;

/// Side effect requested by a state operation
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch the dossier described by the ticket
    FetchEnrichment(EnrichmentTicket),
    /// Send a discovery request
    Discover(DiscoveryRequest),
    /// Hide the notice with this id after the configured delay
    ExpireNotice(u64),
}

/// Transient user-visible message
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub message: String,
}

/// Everything a view needs, derived from [`AppState`]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub revision: u64,
    pub locations: Vec<Location>,
    pub active_id: Option<String>,
    pub active: Option<Location>,
    pub enrichment: Option<EnrichmentResult>,
    pub enrichment_loading: bool,
    pub favorite_ids: Vec<String>,
    pub favorites: Vec<Location>,
    pub discovering: bool,
    pub notice: Option<Notice>,
    pub initial_view: MapView,
    pub viewport: Option<MapView>,
    pub route: Option<RouteOverlay>,
}

#[derive(Debug, Clone)]
pub struct AppState {
    catalog: Catalog,
    favorites: Favorites,
    selection: SelectionController,
    discovery: DiscoveryCoordinator,
    viewport: ViewportSync,
    notice: Option<Notice>,
    next_notice_id: u64,
    revision: u64,
}

impl AppState {
    /// Seeded state configured from `config`
    #[must_use]
    pub fn new(config: &ExplorerConfig) -> Self {
        Self::with_catalog(Catalog::seeded(), config)
    }

    #[must_use]
    pub fn with_catalog(catalog: Catalog, config: &ExplorerConfig) -> Self {
        Self {
            catalog,
            favorites: Favorites::new(),
            selection: SelectionController::new(),
            discovery: DiscoveryCoordinator::new(
                config.discovery.explore_count as usize,
                config.discovery.search_count as usize,
            ),
            viewport: ViewportSync::new(&config.map),
            notice: None,
            next_notice_id: 0,
            revision: 0,
        }
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    pub fn select(&mut self, id: &str) -> Result<Vec<Effect>> {
        let ticket = self.selection.select(&self.catalog, id)?;
        Ok(match ticket {
            Some(ticket) => {
                self.bump();
                vec![Effect::FetchEnrichment(ticket)]
            }
            None => Vec::new(),
        })
    }

    pub fn clear_selection(&mut self) {
        if self.selection.clear() {
            self.bump();
        }
    }

    /// Returns whether `id` is a favorite afterwards
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        let now_favorite = self.favorites.toggle(id);
        self.bump();
        now_favorite
    }

    pub fn explore_more(&mut self) -> Vec<Effect> {
        let request = self.discovery.plan_explore(&self.catalog);
        self.bump();
        vec![Effect::Discover(request)]
    }

    /// Blank queries are ignored and produce no effect
    pub fn search(&mut self, query: &str) -> Vec<Effect> {
        match self.discovery.plan_search(&self.catalog, query) {
            Some(request) => {
                self.bump();
                vec![Effect::Discover(request)]
            }
            None => {
                debug!("Ignoring blank search");
                Vec::new()
            }
        }
    }

    pub fn finish_enrichment(
        &mut self,
        token: u64,
        outcome: Result<EnrichmentResult>,
    ) -> Completion {
        let completion = self.selection.complete(token, outcome);
        if completion != Completion::Discarded {
            self.bump();
        }
        completion
    }

    pub fn finish_discovery(
        &mut self,
        kind: DiscoveryKind,
        outcome: Result<Vec<LocationDraft>>,
    ) -> Vec<Effect> {
        let merged = self.discovery.apply(&mut self.catalog, kind, outcome);
        self.bump();

        let mut effects = Vec::new();
        if let Some(id) = merged.select {
            match self.select(&id) {
                Ok(selected) => effects.extend(selected),
                Err(err) => debug!("Could not select discovered location: {}", err),
            }
        }
        if let Some(message) = merged.notice {
            self.next_notice_id += 1;
            let id = self.next_notice_id;
            self.notice = Some(Notice { id, message });
            effects.push(Effect::ExpireNotice(id));
        }
        effects
    }

    /// Hide the notice; with `Some(id)` only if that notice is still the one shown
    pub fn dismiss_notice(&mut self, id: Option<u64>) -> bool {
        let matches = match (&self.notice, id) {
            (Some(_), None) => true,
            (Some(notice), Some(id)) => notice.id == id,
            (None, _) => false,
        };
        if matches {
            self.notice = None;
            self.bump();
        }
        matches
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let active = self
            .selection
            .active_id()
            .and_then(|id| self.catalog.get(id));

        Snapshot {
            revision: self.revision,
            locations: self.catalog.locations().to_vec(),
            active_id: self.selection.active_id().map(str::to_string),
            active: active.cloned(),
            enrichment: self.selection.result().cloned(),
            enrichment_loading: self.selection.is_loading(),
            favorite_ids: self.favorites.ids().to_vec(),
            favorites: self
                .favorites
                .resolve(&self.catalog)
                .into_iter()
                .cloned()
                .collect(),
            discovering: self.discovery.is_busy(),
            notice: self.notice.clone(),
            initial_view: self.viewport.initial(),
            viewport: self.viewport.target(active),
            route: self.viewport.route(active),
        }
    }
}
