use crate::error::BoardError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Unique identifier for a client card, as assigned by the remote service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(u64);

impl ClientId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ClientId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for ClientId {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| BoardError::InvalidClientId(s.to_string()))
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lane a client currently sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClientStatus {
    Backlog,
    InProgress,
    Complete,
}

impl ClientStatus {
    /// All lanes in board order
    pub const ALL: [ClientStatus; 3] = [Self::Backlog, Self::InProgress, Self::Complete];

    /// The lane key used on the wire and by the drag layer
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Backlog => "backlog",
            Self::InProgress => "in-progress",
            Self::Complete => "complete",
        }
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backlog => write!(f, "Backlog"),
            Self::InProgress => write!(f, "In Progress"),
            Self::Complete => write!(f, "Complete"),
        }
    }
}

impl FromStr for ClientStatus {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "backlog" => Ok(Self::Backlog),
            "in-progress" => Ok(Self::InProgress),
            "complete" => Ok(Self::Complete),
            _ => Err(BoardError::InvalidStatus(s.to_string())),
        }
    }
}

/// A client card on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: ClientStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

impl Client {
    /// Creates a new client in the given lane with no description or priority
    pub fn new(id: impl Into<ClientId>, name: impl Into<String>, status: ClientStatus) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            status,
            priority: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = Some(priority);
        self
    }
}
