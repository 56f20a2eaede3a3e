use crate::domain::client::{Client, ClientId};

/// Computes the 1-based priority sent to the remote service for a drop.
///
/// `target_lane` is the target lane as it stood when the drop arrived. A drop
/// before a sibling takes the sibling's position; a drop without a sibling,
/// or with a sibling no longer in the lane, goes after every card in it.
///
/// The service re-sorts on its own, so this value only needs to express
/// where the card landed relative to its neighbours.
pub fn calculate_priority(target_lane: &[Client], sibling: Option<&ClientId>) -> u32 {
    let index = sibling
        .and_then(|sibling| target_lane.iter().position(|c| &c.id == sibling))
        .unwrap_or(target_lane.len());
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::client::ClientStatus;

    fn lane(n: u64) -> Vec<Client> {
        (1..=n)
            .map(|id| Client::new(id, format!("Client {}", id), ClientStatus::Complete))
            .collect()
    }

    #[test]
    fn test_priority_at_end_of_lane() {
        assert_eq!(calculate_priority(&lane(3), None), 4);
    }

    #[test]
    fn test_priority_before_sibling() {
        // sibling 2 sits at index 1
        assert_eq!(calculate_priority(&lane(3), Some(&ClientId::new(2))), 2);
        assert_eq!(calculate_priority(&lane(3), Some(&ClientId::new(1))), 1);
    }

    #[test]
    fn test_priority_in_empty_lane() {
        assert_eq!(calculate_priority(&[], None), 1);
    }

    #[test]
    fn test_priority_with_stale_sibling() {
        assert_eq!(calculate_priority(&lane(3), Some(&ClientId::new(9))), 4);
    }
}
