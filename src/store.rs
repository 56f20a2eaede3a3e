//! Holds the current board and swaps it as a whole.
//!
//! Every change replaces the snapshot, so a reader holding an
//! `Arc<BoardSnapshot>` never sees a half-applied drop. Each replacement
//! bumps the revision, which the sync adapter uses to tell whether a server
//! response is still current.

use crate::domain::{apply_drop, BoardState, Client, DropDescriptor, LaneOrder, MoveOutcome};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// An immutable board state tagged with its revision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub revision: u64,
    pub state: BoardState,
}

/// The snapshots on either side of an applied drop
#[derive(Debug, Clone)]
pub struct Transition {
    pub previous: Arc<BoardSnapshot>,
    pub current: Arc<BoardSnapshot>,
    pub outcome: MoveOutcome,
}

/// Owner of the single current board snapshot
#[derive(Debug)]
pub struct CardStore {
    tx: watch::Sender<Arc<BoardSnapshot>>,
}

impl CardStore {
    pub fn new(state: BoardState) -> Self {
        let (tx, _rx) = watch::channel(Arc::new(BoardSnapshot { revision: 0, state }));
        Self { tx }
    }

    /// Builds a store from a flat client list
    pub fn initialize(clients: Vec<Client>, order: LaneOrder) -> Self {
        Self::new(BoardState::from_clients(clients, order))
    }

    pub fn snapshot(&self) -> Arc<BoardSnapshot> {
        self.tx.borrow().clone()
    }

    /// Clone of the current board state
    pub fn state(&self) -> BoardState {
        self.tx.borrow().state.clone()
    }

    pub fn revision(&self) -> u64 {
        self.tx.borrow().revision
    }

    /// Receives every new snapshot, for renderers
    pub fn subscribe(&self) -> watch::Receiver<Arc<BoardSnapshot>> {
        self.tx.subscribe()
    }

    /// Replaces the board and returns the new revision
    pub fn replace(&self, state: BoardState) -> u64 {
        let mut revision = 0;
        self.tx.send_modify(|snapshot| {
            revision = snapshot.revision + 1;
            *snapshot = Arc::new(BoardSnapshot { revision, state });
        });
        revision
    }

    /// Replaces the board only if it is still at `expected` revision
    pub fn replace_if_current(&self, expected: u64, state: BoardState) -> bool {
        self.tx.send_if_modified(|snapshot| {
            if snapshot.revision != expected {
                debug!(
                    expected,
                    actual = snapshot.revision,
                    "Skipping replace of a newer snapshot"
                );
                return false;
            }
            *snapshot = Arc::new(BoardSnapshot {
                revision: expected + 1,
                state,
            });
            true
        })
    }

    /// Reconciles a drop against the current board and swaps in the result.
    ///
    /// Returns `None` and leaves the board untouched when the drop is
    /// malformed.
    pub fn apply_drop(&self, drop: &DropDescriptor) -> Option<Transition> {
        let mut transition = None;
        self.tx.send_if_modified(|snapshot| {
            let Some((state, outcome)) = apply_drop(&snapshot.state, drop) else {
                return false;
            };
            let previous = Arc::clone(snapshot);
            let current = Arc::new(BoardSnapshot {
                revision: previous.revision + 1,
                state,
            });
            *snapshot = Arc::clone(&current);
            transition = Some(Transition {
                previous,
                current,
                outcome,
            });
            true
        });
        transition
    }
}

impl Default for CardStore {
    fn default() -> Self {
        Self::new(BoardState::default())
    }
}
