//! # Clientboard Core
//!
//! Board model and drag-and-drop reconciliation for a three-lane client
//! kanban board (backlog, in progress, complete).
//!
//! A drop reported by the drag layer is turned into a new board snapshot by
//! [`reconcile`]. [`CardStore`] owns the current snapshot and swaps it as a
//! whole, and [`BoardSync`] persists each move to the remote client service,
//! replacing the board with the service's answer unless a newer local move
//! has happened in the meantime. Rendering and gesture capture are left to
//! the host.

pub mod config;
pub mod domain;
pub mod error;
pub mod fixture;
pub mod service;
pub mod store;
pub mod sync;

// Re-export commonly used types
pub use config::{FailurePolicy, SyncConfig};
pub use domain::{
    board::{BoardConfig, BoardState, Lane, LaneOrder, LaneView},
    client::{Client, ClientId, ClientStatus},
    drop::DropDescriptor,
    priority::calculate_priority,
    reconcile::{apply_drop, reconcile, MoveOutcome},
};
pub use error::{BoardError, Result};
#[cfg(feature = "http")]
pub use service::http::HttpClientService;
pub use service::{memory::InMemoryClientService, ClientService, ClientUpdate};
pub use store::{BoardSnapshot, CardStore, Transition};
pub use sync::{BoardSync, SyncOutcome};
