//! Discovery coordinator: "explore more" and themed search
//!
//! Duplicates are only prevented by sending the current catalog names to the
//! backend as exclusions; the response is not re-checked locally. Overlapping
//! requests are allowed and each successful one is merged when it completes.

use tracing::{info, warn};

use crate::ai::DiscoveryQuery;
use crate::catalog::{Catalog, IdSource};
use crate::models::LocationDraft;
use crate::{ExplorerError, Result};

/// Which flow a discovery request belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryKind {
    /// Bulk "explore more": results are appended
    ExploreMore,
    /// Free-text search: results are prepended and the first one selected
    Search,
}

impl DiscoveryKind {
    fn id_source(self) -> IdSource {
        match self {
            DiscoveryKind::ExploreMore => IdSource::Explore,
            DiscoveryKind::Search => IdSource::Search,
        }
    }
}

/// A discovery request ready to be sent
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveryRequest {
    pub kind: DiscoveryKind,
    pub query: DiscoveryQuery,
}

/// Result of merging a finished request into the catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeOutcome {
    /// Identifiers of the entries that were added, in response order
    pub added: Vec<String>,
    /// Location to select next (first search result)
    pub select: Option<String>,
    /// Transient message for the user
    pub notice: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DiscoveryCoordinator {
    explore_count: usize,
    search_count: usize,
    in_flight: usize,
}

impl Default for DiscoveryCoordinator {
    fn default() -> Self {
        Self::new(4, 3)
    }
}

impl DiscoveryCoordinator {
    #[must_use]
    pub fn new(explore_count: usize, search_count: usize) -> Self {
        Self {
            explore_count,
            search_count,
            in_flight: 0,
        }
    }

    /// Whether any discovery request is still outstanding
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Request for `explore_count` locations not yet in the catalog
    pub fn plan_explore(&mut self, catalog: &Catalog) -> DiscoveryRequest {
        self.in_flight += 1;
        DiscoveryRequest {
            kind: DiscoveryKind::ExploreMore,
            query: DiscoveryQuery {
                count: self.explore_count,
                exclude: catalog.names(),
                theme: None,
            },
        }
    }

    /// Request for `search_count` locations matching `query`; `None` for blank input
    pub fn plan_search(&mut self, catalog: &Catalog, query: &str) -> Option<DiscoveryRequest> {
        let theme = query.trim();
        if theme.is_empty() {
            return None;
        }
        self.in_flight += 1;
        Some(DiscoveryRequest {
            kind: DiscoveryKind::Search,
            query: DiscoveryQuery {
                count: self.search_count,
                exclude: catalog.names(),
                theme: Some(theme.to_string()),
            },
        })
    }

    /// Merge a finished request. Failures leave the catalog untouched.
    pub fn apply(
        &mut self,
        catalog: &mut Catalog,
        kind: DiscoveryKind,
        outcome: Result<Vec<LocationDraft>>,
    ) -> MergeOutcome {
        self.in_flight = self.in_flight.saturating_sub(1);

        let drafts = match outcome {
            Ok(drafts) => drafts,
            Err(err) => return Self::failure(kind, &err),
        };

        match kind {
            DiscoveryKind::ExploreMore => {
                let added = catalog.append(drafts, kind.id_source());
                info!("Explore more added {} locations", added.len());
                MergeOutcome {
                    added,
                    ..MergeOutcome::default()
                }
            }
            DiscoveryKind::Search => {
                let added = catalog.prepend(drafts, kind.id_source());
                info!("Search added {} locations", added.len());
                MergeOutcome {
                    select: added.first().cloned(),
                    added,
                    notice: None,
                }
            }
        }
    }

    fn failure(kind: DiscoveryKind, err: &ExplorerError) -> MergeOutcome {
        warn!("{:?} failed, catalog unchanged: {}", kind, err);
        MergeOutcome {
            notice: (kind == DiscoveryKind::ExploreMore).then(|| err.user_message()),
            ..MergeOutcome::default()
        }
    }
}
