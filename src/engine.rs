//! Single-owner engine task
//!
//! One task owns [`AppState`] and processes [`Command`]s strictly in order.
//! Adapter calls and notice timers run as detached tasks and report back
//! through the same queue, so every state change is serialized. Views read
//! the latest [`Snapshot`] from a watch channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, watch};
use tracing::{Instrument, debug, info, info_span, warn};

use crate::ai::{ContentBackend, DiscoveryClient, EnrichmentClient};
use crate::config::ExplorerConfig;
use crate::discovery::{DiscoveryKind, DiscoveryRequest};
use crate::models::{EnrichmentResult, LocationDraft};
use crate::selection::{Completion, EnrichmentTicket};
use crate::state::{AppState, Effect, Snapshot};
use crate::{ExplorerError, Result};

type Reply = oneshot::Sender<Result<Snapshot>>;

/// Everything the engine task reacts to
#[derive(Debug)]
pub enum Command {
    Select { id: String, reply: Reply },
    Clear { reply: Reply },
    ToggleFavorite { id: String, reply: Reply },
    ExploreMore { reply: Reply },
    Search { query: String, reply: Reply },
    /// `id: None` hides whatever notice is shown; timers pass the id they were armed for
    DismissNotice { id: Option<u64>, reply: Option<Reply> },
    EnrichmentFinished {
        token: u64,
        outcome: Result<EnrichmentResult>,
    },
    DiscoveryFinished {
        kind: DiscoveryKind,
        outcome: Result<Vec<LocationDraft>>,
    },
}

pub struct Engine {
    state: AppState,
    commands: mpsc::UnboundedReceiver<Command>,
    // Weak so the loop ends once every handle is dropped
    feedback: mpsc::WeakUnboundedSender<Command>,
    snapshots: watch::Sender<Snapshot>,
    published: u64,
    enrichment: EnrichmentClient,
    discovery: DiscoveryClient,
    notice_ttl: Duration,
}

impl Engine {
    /// Start the engine on the current runtime with a seeded catalog
    pub fn spawn(config: &ExplorerConfig, backend: Arc<dyn ContentBackend>) -> EngineHandle {
        Self::spawn_with_state(AppState::new(config), config, backend)
    }

    pub fn spawn_with_state(
        state: AppState,
        config: &ExplorerConfig,
        backend: Arc<dyn ContentBackend>,
    ) -> EngineHandle {
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();
        let initial = state.snapshot();
        let (snapshots_tx, snapshots_rx) = watch::channel(initial);
        let timeout = config.backend.timeout();

        let engine = Engine {
            published: state.revision(),
            state,
            commands: commands_rx,
            feedback: commands_tx.downgrade(),
            snapshots: snapshots_tx,
            enrichment: EnrichmentClient::new(Arc::clone(&backend), timeout),
            discovery: DiscoveryClient::new(backend, timeout),
            notice_ttl: Duration::from_secs(u64::from(config.discovery.notice_seconds)),
        };
        tokio::spawn(engine.run());

        EngineHandle {
            commands: commands_tx,
            snapshots: snapshots_rx,
        }
    }

    async fn run(mut self) {
        info!(
            "Engine started with {} locations",
            self.state.catalog().len()
        );
        while let Some(command) = self.commands.recv().await {
            self.handle(command);
            self.publish();
        }
        info!("Engine stopped");
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Select { id, reply } => {
                let outcome = self.state.select(&id).map(|effects| self.run_effects(effects));
                self.respond(reply, outcome);
            }
            Command::Clear { reply } => {
                self.state.clear_selection();
                self.respond(reply, Ok(()));
            }
            Command::ToggleFavorite { id, reply } => {
                let now_favorite = self.state.toggle_favorite(&id);
                debug!("Favorite '{}' is now {}", id, now_favorite);
                self.respond(reply, Ok(()));
            }
            Command::ExploreMore { reply } => {
                let effects = self.state.explore_more();
                self.run_effects(effects);
                self.respond(reply, Ok(()));
            }
            Command::Search { query, reply } => {
                let effects = self.state.search(&query);
                self.run_effects(effects);
                self.respond(reply, Ok(()));
            }
            Command::DismissNotice { id, reply } => {
                self.state.dismiss_notice(id);
                if let Some(reply) = reply {
                    self.respond(reply, Ok(()));
                }
            }
            Command::EnrichmentFinished { token, outcome } => {
                if self.state.finish_enrichment(token, outcome) == Completion::Discarded {
                    debug!("Enrichment for token {} arrived after the selection moved on", token);
                }
            }
            Command::DiscoveryFinished { kind, outcome } => {
                let effects = self.state.finish_discovery(kind, outcome);
                self.run_effects(effects);
            }
        }
    }

    /// Publish the snapshot first so the caller sees its own change
    fn respond(&mut self, reply: Reply, outcome: Result<()>) {
        self.publish();
        let response = outcome.map(|()| self.snapshots.borrow().clone());
        if reply.send(response).is_err() {
            debug!("Caller went away before the reply was sent");
        }
    }

    fn publish(&mut self) {
        if self.state.revision() == self.published {
            return;
        }
        self.published = self.state.revision();
        self.snapshots.send_replace(self.state.snapshot());
    }

    fn run_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchEnrichment(ticket) => self.spawn_enrichment(ticket),
                Effect::Discover(request) => self.spawn_discovery(request),
                Effect::ExpireNotice(id) => self.spawn_notice_expiry(id),
            }
        }
    }

    fn spawn_enrichment(&self, ticket: EnrichmentTicket) {
        let Some(feedback) = self.feedback.upgrade() else {
            return;
        };
        let client = self.enrichment.clone();
        let span = info_span!("enrichment", location = %ticket.location_id, token = ticket.token);

        tokio::spawn(
            async move {
                let outcome = client.fetch(&ticket.location_name).await;
                if feedback
                    .send(Command::EnrichmentFinished {
                        token: ticket.token,
                        outcome,
                    })
                    .is_err()
                {
                    debug!("Engine stopped before enrichment {} landed", ticket.token);
                }
            }
            .instrument(span),
        );
    }

    fn spawn_discovery(&self, request: DiscoveryRequest) {
        let Some(feedback) = self.feedback.upgrade() else {
            return;
        };
        let client = self.discovery.clone();
        let span = info_span!("discovery", kind = ?request.kind);

        tokio::spawn(
            async move {
                let outcome = client.discover(&request.query).await;
                if feedback
                    .send(Command::DiscoveryFinished {
                        kind: request.kind,
                        outcome,
                    })
                    .is_err()
                {
                    debug!("Engine stopped before {:?} results landed", request.kind);
                }
            }
            .instrument(span),
        );
    }

    fn spawn_notice_expiry(&self, id: u64) {
        let Some(feedback) = self.feedback.upgrade() else {
            return;
        };
        let ttl = self.notice_ttl;

        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if feedback
                .send(Command::DismissNotice {
                    id: Some(id),
                    reply: None,
                })
                .is_err()
            {
                warn!("Notice {} outlived the engine", id);
            }
        });
    }
}

/// Cheap, cloneable way to talk to a running [`Engine`]
#[derive(Debug, Clone)]
pub struct EngineHandle {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<Snapshot>,
}

impl EngineHandle {
    async fn request(&self, command: impl FnOnce(Reply) -> Command) -> Result<Snapshot> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(command(reply))
            .map_err(|_| ExplorerError::EngineStopped)?;
        response.await.map_err(|_| ExplorerError::EngineStopped)?
    }

    /// Make `id` the active location and start fetching its dossier
    pub async fn select(&self, id: impl Into<String>) -> Result<Snapshot> {
        let id = id.into();
        self.request(|reply| Command::Select { id, reply }).await
    }

    pub async fn clear(&self) -> Result<Snapshot> {
        self.request(|reply| Command::Clear { reply }).await
    }

    pub async fn toggle_favorite(&self, id: impl Into<String>) -> Result<Snapshot> {
        let id = id.into();
        self.request(|reply| Command::ToggleFavorite { id, reply })
            .await
    }

    /// Ask the backend for more locations; they are appended when they arrive
    pub async fn explore_more(&self) -> Result<Snapshot> {
        self.request(|reply| Command::ExploreMore { reply }).await
    }

    /// Themed search; results are prepended and the first one selected when they arrive
    pub async fn search(&self, query: impl Into<String>) -> Result<Snapshot> {
        let query = query.into();
        self.request(|reply| Command::Search { query, reply }).await
    }

    pub async fn dismiss_notice(&self) -> Result<Snapshot> {
        self.request(|reply| Command::DismissNotice {
            id: None,
            reply: Some(reply),
        })
        .await
    }

    /// Latest published snapshot
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }
}
