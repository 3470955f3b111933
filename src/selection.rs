//! Selection controller: which location is active, and its dossier
//!
//! Every selection change bumps a monotonic token. A fetch carries the token
//! it was started with and its completion is applied only while that token is
//! still current, so a slow response for an abandoned selection is dropped no
//! matter when it arrives.

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::models::EnrichmentResult;
use crate::{ExplorerError, Result};

/// A dossier fetch the caller must start
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentTicket {
    pub token: u64,
    pub location_id: String,
    pub location_name: String,
}

/// What happened to a finished fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The dossier is now visible
    Applied,
    /// The fetch failed; loading stopped and no dossier is shown
    Failed,
    /// The fetch belonged to an older selection and was ignored
    Discarded,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    active_id: Option<String>,
    token: u64,
    loading: bool,
    result: Option<EnrichmentResult>,
}

impl SelectionController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn result(&self) -> Option<&EnrichmentResult> {
        self.result.as_ref()
    }

    /// Token of the fetch that is allowed to land
    #[must_use]
    pub fn current_token(&self) -> u64 {
        self.token
    }

    /// Make `id` the active location.
    ///
    /// Returns the fetch to start, or `None` when `id` is already active.
    pub fn select(&mut self, catalog: &Catalog, id: &str) -> Result<Option<EnrichmentTicket>> {
        let location = catalog
            .get(id)
            .ok_or_else(|| ExplorerError::validation(format!("unknown location '{id}'")))?;

        if self.active_id.as_deref() == Some(id) {
            debug!("Location '{}' is already active", id);
            return Ok(None);
        }

        self.token += 1;
        self.active_id = Some(id.to_string());
        self.loading = true;
        self.result = None;
        info!(
            "Selected '{}' [{}] at {}, enrichment token {}",
            location.name,
            location.category.label(),
            location.coordinates.format(),
            self.token
        );

        Ok(Some(EnrichmentTicket {
            token: self.token,
            location_id: id.to_string(),
            location_name: location.name.clone(),
        }))
    }

    /// Drop the active selection and any in-flight dossier. Returns whether anything changed.
    pub fn clear(&mut self) -> bool {
        if self.active_id.is_none() && !self.loading && self.result.is_none() {
            return false;
        }
        self.token += 1;
        self.active_id = None;
        self.loading = false;
        self.result = None;
        info!("Selection cleared");
        true
    }

    /// Land a finished fetch if it still belongs to the current selection
    pub fn complete(&mut self, token: u64, outcome: Result<EnrichmentResult>) -> Completion {
        if token != self.token {
            debug!(
                "Discarding stale enrichment (token {}, current {})",
                token, self.token
            );
            return Completion::Discarded;
        }

        self.loading = false;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                Completion::Applied
            }
            Err(err) => {
                warn!("Enrichment failed, showing no dossier: {}", err);
                self.result = None;
                Completion::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dossier(food: &str) -> EnrichmentResult {
        EnrichmentResult {
            food: vec![food.to_string()],
            ..EnrichmentResult::default()
        }
    }

    #[test]
    fn test_select_starts_fetch_and_loading() {
        let catalog = Catalog::seeded();
        let mut selection = SelectionController::new();

        let ticket = selection.select(&catalog, "suzhou").unwrap().unwrap();
        assert_eq!(ticket.location_name, "苏州");
        assert_eq!(selection.active_id(), Some("suzhou"));
        assert!(selection.is_loading());
        assert!(selection.result().is_none());
    }

    #[test]
    fn test_reselecting_active_is_noop() {
        let catalog = Catalog::seeded();
        let mut selection = SelectionController::new();

        let ticket = selection.select(&catalog, "suzhou").unwrap().unwrap();
        assert!(selection.select(&catalog, "suzhou").unwrap().is_none());
        assert_eq!(selection.current_token(), ticket.token);
    }

    #[test]
    fn test_unknown_id_changes_nothing() {
        let catalog = Catalog::seeded();
        let mut selection = SelectionController::new();
        selection.select(&catalog, "kaili").unwrap();

        let err = selection.select(&catalog, "atlantis").unwrap_err();
        assert!(matches!(err, ExplorerError::Validation { .. }));
        assert_eq!(selection.active_id(), Some("kaili"));
    }

    #[test]
    fn test_late_response_for_previous_selection_is_discarded() {
        let catalog = Catalog::seeded();
        let mut selection = SelectionController::new();

        let slow = selection.select(&catalog, "hotan").unwrap().unwrap();
        let fast = selection.select(&catalog, "yixing").unwrap().unwrap();

        assert_eq!(selection.complete(fast.token, Ok(dossier("紫砂"))), Completion::Applied);
        assert_eq!(selection.complete(slow.token, Ok(dossier("烤包子"))), Completion::Discarded);

        assert_eq!(selection.active_id(), Some("yixing"));
        assert_eq!(selection.result().unwrap().food, vec!["紫砂"]);
        assert!(!selection.is_loading());
    }

    #[test]
    fn test_stale_response_does_not_touch_loading() {
        let catalog = Catalog::seeded();
        let mut selection = SelectionController::new();

        let first = selection.select(&catalog, "hotan").unwrap().unwrap();
        selection.select(&catalog, "yixing").unwrap();

        selection.complete(first.token, Ok(dossier("烤包子")));
        assert!(selection.is_loading());
        assert!(selection.result().is_none());
    }

    #[test]
    fn test_a_b_a_only_latest_fetch_lands() {
        let catalog = Catalog::seeded();
        let mut selection = SelectionController::new();

        let first_a = selection.select(&catalog, "suzhou").unwrap().unwrap();
        selection.select(&catalog, "nanjing").unwrap();
        let second_a = selection.select(&catalog, "suzhou").unwrap().unwrap();

        assert_eq!(selection.complete(first_a.token, Ok(dossier("old"))), Completion::Discarded);
        assert_eq!(selection.complete(second_a.token, Ok(dossier("new"))), Completion::Applied);
        assert_eq!(selection.result().unwrap().food, vec!["new"]);
    }

    #[test]
    fn test_clear_discards_in_flight_fetch() {
        let catalog = Catalog::seeded();
        let mut selection = SelectionController::new();

        let ticket = selection.select(&catalog, "guilin").unwrap().unwrap();
        assert!(selection.clear());
        assert_eq!(selection.complete(ticket.token, Ok(dossier("米粉"))), Completion::Discarded);

        assert_eq!(selection.active_id(), None);
        assert!(selection.result().is_none());
        assert!(!selection.is_loading());
        assert!(!selection.clear());
    }

    #[test]
    fn test_failure_stops_loading_without_result() {
        let catalog = Catalog::seeded();
        let mut selection = SelectionController::new();

        let ticket = selection.select(&catalog, "guilin").unwrap().unwrap();
        let outcome = selection.complete(ticket.token, Err(ExplorerError::backend("timeout")));

        assert_eq!(outcome, Completion::Failed);
        assert!(!selection.is_loading());
        assert!(selection.result().is_none());
        assert_eq!(selection.active_id(), Some("guilin"));
    }
}
