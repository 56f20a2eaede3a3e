use crate::domain::client::{ClientId, ClientStatus};
use serde::{Deserialize, Serialize};

/// One completed drag gesture, as reported by the drag layer
///
/// Lanes are optional because the drag layer may report a drop outside any
/// lane container. Such drops are ignored by reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropDescriptor {
    pub client_id: ClientId,
    pub source: Option<ClientStatus>,
    pub target: Option<ClientStatus>,
    /// The card immediately after the drop point; `None` means end of lane
    #[serde(default)]
    pub sibling: Option<ClientId>,
}

impl DropDescriptor {
    /// Creates a drop that appends to the end of the target lane
    pub fn new(client_id: impl Into<ClientId>, source: ClientStatus, target: ClientStatus) -> Self {
        Self {
            client_id: client_id.into(),
            source: Some(source),
            target: Some(target),
            sibling: None,
        }
    }

    /// Inserts before the given card instead of at the end
    pub fn before(mut self, sibling: impl Into<ClientId>) -> Self {
        self.sibling = Some(sibling.into());
        self
    }

    /// Builds a descriptor from the raw identifying attributes the drag layer
    /// reads off the card and lane elements.
    ///
    /// Returns `None` when the moved card's id cannot be parsed. Unknown lane
    /// keys are kept as `None` so the drop is ignored downstream, and an
    /// unparsable sibling degrades to an end-of-lane drop.
    pub fn from_attributes(
        client_id: &str,
        source: Option<&str>,
        target: Option<&str>,
        sibling: Option<&str>,
    ) -> Option<Self> {
        Some(Self {
            client_id: client_id.parse().ok()?,
            source: source.and_then(|s| s.parse().ok()),
            target: target.and_then(|s| s.parse().ok()),
            sibling: sibling.and_then(|s| s.parse().ok()),
        })
    }

    /// Whether both lanes were resolved
    pub fn has_lanes(&self) -> bool {
        self.source.is_some() && self.target.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let drop = DropDescriptor::new(1, ClientStatus::Backlog, ClientStatus::Complete).before(4);

        assert_eq!(drop.client_id, ClientId::new(1));
        assert_eq!(drop.target, Some(ClientStatus::Complete));
        assert_eq!(drop.sibling, Some(ClientId::new(4)));
        assert!(drop.has_lanes());
    }

    #[test]
    fn test_from_attributes() {
        let drop = DropDescriptor::from_attributes(
            "3",
            Some("backlog"),
            Some("in-progress"),
            Some("8"),
        )
        .unwrap();

        assert_eq!(drop.client_id, ClientId::new(3));
        assert_eq!(drop.source, Some(ClientStatus::Backlog));
        assert_eq!(drop.target, Some(ClientStatus::InProgress));
        assert_eq!(drop.sibling, Some(ClientId::new(8)));
    }

    #[test]
    fn test_from_attributes_unknown_lane() {
        let drop = DropDescriptor::from_attributes("3", Some("archive"), None, None).unwrap();

        assert!(drop.source.is_none());
        assert!(drop.target.is_none());
        assert!(!drop.has_lanes());
    }

    #[test]
    fn test_from_attributes_bad_ids() {
        let bad_card = DropDescriptor::from_attributes("x", Some("backlog"), Some("backlog"), None);
        assert!(bad_card.is_none());

        let drop =
            DropDescriptor::from_attributes("3", Some("backlog"), Some("complete"), Some("?"));
        let drop = drop.unwrap();
        assert!(drop.sibling.is_none());
    }
}
