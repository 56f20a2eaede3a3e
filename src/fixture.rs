use crate::{
    domain::{Client, LaneOrder},
    error::Result,
    store::CardStore,
};
use std::path::Path;
use tokio::fs;

/// Reads a JSON array of clients from a bootstrap fixture file
pub async fn load_fixture(path: impl AsRef<Path>) -> Result<Vec<Client>> {
    let contents = fs::read_to_string(path.as_ref()).await?;
    let clients: Vec<Client> = serde_json::from_str(&contents)?;
    Ok(clients)
}

/// Builds a store from a fixture file, keeping the file's order in each lane
pub async fn load_fixture_store(path: impl AsRef<Path>) -> Result<CardStore> {
    let clients = load_fixture(path).await?;
    Ok(CardStore::initialize(clients, LaneOrder::Preserve))
}
