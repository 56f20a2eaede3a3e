pub mod board;
pub mod client;
pub mod drop;
pub mod priority;
pub mod reconcile;
pub mod sorting;

pub use board::{BoardConfig, BoardState, Lane, LaneOrder, LaneView};
pub use client::{Client, ClientId, ClientStatus};
pub use drop::DropDescriptor;
pub use priority::calculate_priority;
pub use reconcile::{apply_drop, reconcile, MoveOutcome};
pub use sorting::sort_by_priority;
