use crate::domain::client::{Client, ClientId, ClientStatus};
use crate::domain::sorting::sort_by_priority;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Configuration for a board lane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lane {
    pub name: String,
    pub status: ClientStatus,
}

impl Lane {
    pub fn new(name: impl Into<String>, status: ClientStatus) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }
}

/// Board configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    pub name: String,
    pub lanes: Vec<Lane>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            name: "Clients".to_string(),
            lanes: ClientStatus::ALL
                .iter()
                .map(|status| Lane::new(status.to_string(), *status))
                .collect(),
        }
    }
}

impl BoardConfig {
    /// Gets the lane configuration for a status
    pub fn get_lane_for_status(&self, status: &ClientStatus) -> Option<&Lane> {
        self.lanes.iter().find(|lane| &lane.status == status)
    }
}

/// How a flat client list is ordered within each lane on initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneOrder {
    /// Keep input order, as for a static fixture
    Preserve,
    /// Sort by ascending priority first, as for remote data
    Priority,
}

/// Read-only view of one lane for rendering
#[derive(Debug, Clone, Serialize)]
pub struct LaneView<'a> {
    pub name: &'a str,
    pub status: ClientStatus,
    pub clients: &'a [Client],
}

/// The three ordered lanes of the board
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    pub backlog: Vec<Client>,
    pub in_progress: Vec<Client>,
    pub complete: Vec<Client>,
}

impl BoardState {
    /// Partitions a flat client list into lanes by status
    pub fn from_clients(mut clients: Vec<Client>, order: LaneOrder) -> Self {
        if order == LaneOrder::Priority {
            sort_by_priority(&mut clients);
        }

        let mut state = Self::default();
        for client in clients {
            state.lane_mut(client.status).push(client);
        }
        state
    }

    /// Gets the ordered clients of a lane
    pub fn lane(&self, status: ClientStatus) -> &[Client] {
        match status {
            ClientStatus::Backlog => &self.backlog,
            ClientStatus::InProgress => &self.in_progress,
            ClientStatus::Complete => &self.complete,
        }
    }

    pub(crate) fn lane_mut(&mut self, status: ClientStatus) -> &mut Vec<Client> {
        match status {
            ClientStatus::Backlog => &mut self.backlog,
            ClientStatus::InProgress => &mut self.in_progress,
            ClientStatus::Complete => &mut self.complete,
        }
    }

    /// Total number of clients across all lanes
    pub fn len(&self) -> usize {
        self.backlog.len() + self.in_progress.len() + self.complete.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All clients in board order
    pub fn clients(&self) -> impl Iterator<Item = &Client> {
        ClientStatus::ALL
            .into_iter()
            .flat_map(move |status| self.lane(status).iter())
    }

    pub fn ids(&self) -> Vec<ClientId> {
        self.clients().map(|c| c.id).collect()
    }

    /// Finds a client in any lane
    pub fn find(&self, id: &ClientId) -> Option<&Client> {
        self.clients().find(|c| &c.id == id)
    }

    /// Checks that every client sits in the lane matching its status
    /// and that no id appears twice
    pub fn is_consistent(&self) -> bool {
        let mut seen = HashSet::new();
        ClientStatus::ALL.into_iter().all(|status| {
            self.lane(status)
                .iter()
                .all(|c| c.status == status && seen.insert(c.id))
        })
    }

    /// Lanes in configured order, for rendering
    pub fn views<'a>(&'a self, config: &'a BoardConfig) -> Vec<LaneView<'a>> {
        config
            .lanes
            .iter()
            .map(|lane| LaneView {
                name: &lane.name,
                status: lane.status,
                clients: self.lane(lane.status),
            })
            .collect()
    }
}
