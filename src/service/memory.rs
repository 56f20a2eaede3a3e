use crate::{
    domain::{Client, ClientId},
    error::{BoardError, Result},
    service::{ClientService, ClientUpdate},
};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// In-process client service with the same contract as the HTTP API
#[derive(Debug, Default)]
pub struct InMemoryClientService {
    clients: Mutex<Vec<Client>>,
}

impl InMemoryClientService {
    pub fn new(clients: Vec<Client>) -> Self {
        Self {
            clients: Mutex::new(clients),
        }
    }
}

#[async_trait]
impl ClientService for InMemoryClientService {
    async fn list_clients(&self) -> Result<Vec<Client>> {
        Ok(self.clients.lock().await.clone())
    }

    async fn update_client(&self, id: &ClientId, update: &ClientUpdate) -> Result<Vec<Client>> {
        let mut clients = self.clients.lock().await;

        let client = clients
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| BoardError::ClientNotFound(id.to_string()))?;
        client.status = update.status;
        client.priority = Some(update.priority);

        Ok(clients.clone())
    }
}
