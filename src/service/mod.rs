use crate::{
    domain::{Client, ClientId, ClientStatus},
    error::Result,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[cfg(feature = "http")]
pub mod http;
pub mod memory;

/// Body of a client update sent to the remote service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientUpdate {
    pub status: ClientStatus,
    pub priority: u32,
}

/// Remote service holding the authoritative client list
#[async_trait]
pub trait ClientService: Send + Sync {
    /// Fetches every client
    async fn list_clients(&self) -> Result<Vec<Client>>;

    /// Updates one client's lane and priority.
    /// Returns the full client list after the update.
    async fn update_client(&self, id: &ClientId, update: &ClientUpdate) -> Result<Vec<Client>>;
}
