use crate::domain::client::Client;
use std::cmp::Ordering;

/// Sorts clients by ascending priority
///
/// The sort is stable, so clients sharing a priority keep their relative
/// order. Clients without a priority always sort after prioritized ones.
///
/// # Examples
/// ```
/// use clientboard_core::domain::sorting::sort_by_priority;
/// use clientboard_core::{Client, ClientStatus};
///
/// let mut clients = vec![
///     Client::new(1, "A", ClientStatus::Backlog).with_priority(3),
///     Client::new(2, "B", ClientStatus::Backlog).with_priority(1),
/// ];
///
/// sort_by_priority(&mut clients);
/// assert_eq!(clients[0].name, "B");
/// ```
pub fn sort_by_priority(clients: &mut [Client]) {
    clients.sort_by(|a, b| compare_option_priority(a.priority, b.priority));
}

/// Compare optional priorities with None always sorting to end
fn compare_option_priority(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
