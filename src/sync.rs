//! Optimistic drop handling against a remote client service.
//!
//! A drop is reconciled locally first, then the moved client's lane and
//! priority are sent to the service, and the returned client list replaces
//! the board.
//!
//! While several drops are in flight only the response of the last one to
//! finish is applied; earlier answers are discarded and a fresh fetch follows
//! once the last one lands. Refreshes never overwrite the board while a drop
//! is in flight, since the server may have answered them before the drop's
//! update reached it.

use crate::{
    config::FailurePolicy,
    domain::{calculate_priority, BoardState, DropDescriptor, LaneOrder},
    error::{BoardError, Result},
    service::{ClientService, ClientUpdate},
    store::CardStore,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "http")]
use crate::{config::SyncConfig, service::http::HttpClientService};

/// Result of handling one drop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The drop was malformed; nothing changed and nothing was sent
    Ignored,
    /// The server's client list was applied at this revision
    Synced { revision: u64 },
    /// The server accepted the update but another drop was still in flight
    /// or the board changed, so its response was discarded
    Superseded,
}

/// Counts a drop as in flight until dropped
struct PendingDrop<'a>(&'a AtomicUsize);

impl<'a> PendingDrop<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for PendingDrop<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Keeps a `CardStore` in step with a remote `ClientService`
pub struct BoardSync<S> {
    store: Arc<CardStore>,
    service: S,
    policy: FailurePolicy,
    pending: AtomicUsize,
    needs_refresh: AtomicBool,
}

impl<S: ClientService> BoardSync<S> {
    /// Creates an adapter over an empty board
    pub fn new(service: S, policy: FailurePolicy) -> Self {
        Self::with_store(Arc::new(CardStore::default()), service, policy)
    }

    pub fn with_store(store: Arc<CardStore>, service: S, policy: FailurePolicy) -> Self {
        Self {
            store,
            service,
            policy,
            pending: AtomicUsize::new(0),
            needs_refresh: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &Arc<CardStore> {
        &self.store
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Number of drops whose update has not been answered yet
    pub fn pending_drops(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Fetches all clients and replaces the board with them.
    ///
    /// Returns `false` if the result was discarded because a drop was in
    /// flight or the board changed during the fetch.
    #[instrument(skip(self))]
    pub async fn load(&self) -> Result<bool> {
        let applied = self.fetch_and_apply().await?;
        if applied {
            info!(revision = self.store.revision(), "Loaded board");
        }
        Ok(applied)
    }

    /// Re-fetches all clients, with the same guards as `load`
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<bool> {
        self.fetch_and_apply().await
    }

    async fn fetch_and_apply(&self) -> Result<bool> {
        let revision = self.store.revision();
        let clients = self.service.list_clients().await?;

        if self.pending_drops() > 0 {
            debug!(revision, "Discarding fetch while drops are in flight");
            return Ok(false);
        }
        let applied = self
            .store
            .replace_if_current(revision, BoardState::from_clients(clients, LaneOrder::Priority));
        if !applied {
            debug!(revision, "Discarding fetch overtaken by a local change");
        }
        Ok(applied)
    }

    /// Applies a drop locally, then persists it.
    ///
    /// On failure the board is handled per the configured `FailurePolicy`
    /// and `BoardError::SyncFailed` is returned.
    #[instrument(skip(self))]
    pub async fn handle_drop(&self, drop: &DropDescriptor) -> Result<SyncOutcome> {
        let outcome = self.persist_drop(drop).await?;

        if matches!(outcome, SyncOutcome::Synced { .. })
            && self.needs_refresh.swap(false, Ordering::SeqCst)
        {
            if let Err(e) = self.fetch_and_apply().await {
                warn!(error = %e, "Failed to refresh after overlapping drops");
                self.needs_refresh.store(true, Ordering::SeqCst);
            }
        }
        Ok(outcome)
    }

    async fn persist_drop(&self, drop: &DropDescriptor) -> Result<SyncOutcome> {
        let _pending = PendingDrop::enter(&self.pending);

        let Some(transition) = self.store.apply_drop(drop) else {
            debug!("Ignoring drop that does not resolve");
            return Ok(SyncOutcome::Ignored);
        };

        let target = transition.outcome.to;
        let update = ClientUpdate {
            status: target,
            priority: calculate_priority(
                transition.previous.state.lane(target),
                drop.sibling.as_ref(),
            ),
        };

        match self.service.update_client(&drop.client_id, &update).await {
            Ok(clients) => {
                let state = BoardState::from_clients(clients, LaneOrder::Priority);
                let revision = self.store.revision();

                if self.pending_drops() > 1 {
                    debug!(revision, "Discarding update response while other drops are in flight");
                    self.needs_refresh.store(true, Ordering::SeqCst);
                    return Ok(SyncOutcome::Superseded);
                }
                if self.store.replace_if_current(revision, state) {
                    Ok(SyncOutcome::Synced {
                        revision: revision + 1,
                    })
                } else {
                    debug!(revision, "Discarding update response overtaken by a local change");
                    self.needs_refresh.store(true, Ordering::SeqCst);
                    Ok(SyncOutcome::Superseded)
                }
            }
            Err(source) => {
                let rolled_back = match self.policy {
                    FailurePolicy::Rollback => self.store.replace_if_current(
                        transition.current.revision,
                        transition.previous.state.clone(),
                    ),
                    FailurePolicy::KeepOptimistic => false,
                };
                warn!(error = %source, rolled_back, "Failed to persist drop");
                Err(BoardError::SyncFailed {
                    client_id: drop.client_id.to_string(),
                    rolled_back,
                    source: Box::new(source),
                })
            }
        }
    }
}

#[cfg(feature = "http")]
impl BoardSync<HttpClientService> {
    /// Creates an adapter talking to the REST API described by `config`
    pub fn from_config(config: SyncConfig) -> Result<Self> {
        let policy = config.failure_policy;
        Ok(Self::new(HttpClientService::new(config)?, policy))
    }
}
