use crate::domain::board::BoardState;
use crate::domain::client::{ClientId, ClientStatus};
use crate::domain::drop::DropDescriptor;

/// Where a reconciled drop placed the moved client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub client_id: ClientId,
    pub from: ClientStatus,
    pub to: ClientStatus,
    /// Index of the moved client in the resulting target lane
    pub index: usize,
}

/// Applies a drop to the board, producing a new state.
///
/// Returns `None` when the drop cannot be applied: a lane is missing, or the
/// moved client is not in the stated source lane. The input state is never
/// modified.
///
/// A same-lane drop onto the moved client itself leaves the order unchanged.
pub fn apply_drop(
    current: &BoardState,
    drop: &DropDescriptor,
) -> Option<(BoardState, MoveOutcome)> {
    let (source, target) = (drop.source?, drop.target?);
    let from_index = current
        .lane(source)
        .iter()
        .position(|c| c.id == drop.client_id)?;

    if source == target && drop.sibling == Some(drop.client_id) {
        let outcome = MoveOutcome {
            client_id: drop.client_id,
            from: source,
            to: target,
            index: from_index,
        };
        return Some((current.clone(), outcome));
    }

    let mut next = current.clone();
    let mut moved = next.lane_mut(source).remove(from_index);
    moved.status = target;

    // For a same-lane move this searches the lane with the card already removed
    let lane = next.lane_mut(target);
    let index = drop
        .sibling
        .and_then(|sibling| lane.iter().position(|c| c.id == sibling))
        .unwrap_or(lane.len());
    lane.insert(index, moved);

    let outcome = MoveOutcome {
        client_id: drop.client_id,
        from: source,
        to: target,
        index,
    };
    Some((next, outcome))
}

/// Computes the board after a drop. Malformed drops yield an unchanged copy.
pub fn reconcile(current: &BoardState, drop: &DropDescriptor) -> BoardState {
    match apply_drop(current, drop) {
        Some((next, _)) => next,
        None => current.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::LaneOrder;
    use crate::domain::client::Client;

    // backlog: 1, 2, 3   in-progress: 4, 5   complete: (empty)
    fn board() -> BoardState {
        BoardState::from_clients(
            vec![
                Client::new(1, "Acme", ClientStatus::Backlog),
                Client::new(2, "Globex", ClientStatus::Backlog),
                Client::new(3, "Initech", ClientStatus::Backlog),
                Client::new(4, "Umbrella", ClientStatus::InProgress),
                Client::new(5, "Hooli", ClientStatus::InProgress),
            ],
            LaneOrder::Preserve,
        )
    }

    fn ids(state: &BoardState, status: ClientStatus) -> Vec<u64> {
        state.lane(status).iter().map(|c| c.id.get()).collect()
    }

    #[test]
    fn test_cross_lane_rewrites_status() {
        let state = board();
        let drop = DropDescriptor::new(2, ClientStatus::Backlog, ClientStatus::Complete);

        let next = reconcile(&state, &drop);

        assert_eq!(ids(&next, ClientStatus::Backlog), vec![1, 3]);
        assert_eq!(ids(&next, ClientStatus::Complete), vec![2]);
        assert_eq!(next.complete[0].status, ClientStatus::Complete);
        assert!(next.is_consistent());
    }

    #[test]
    fn test_end_of_lane_insertion() {
        let state = board();
        let drop = DropDescriptor::new(1, ClientStatus::Backlog, ClientStatus::InProgress);

        let (next, outcome) = apply_drop(&state, &drop).unwrap();

        assert_eq!(ids(&next, ClientStatus::InProgress), vec![4, 5, 1]);
        assert_eq!(outcome.index, 2);
    }

    #[test]
    fn test_mid_lane_insertion_before_sibling() {
        let state = board();
        let drop =
            DropDescriptor::new(3, ClientStatus::Backlog, ClientStatus::InProgress).before(5);

        let (next, outcome) = apply_drop(&state, &drop).unwrap();

        assert_eq!(ids(&next, ClientStatus::InProgress), vec![4, 3, 5]);
        assert_eq!(outcome.index, 1);
        assert_eq!(outcome.from, ClientStatus::Backlog);
        assert_eq!(outcome.to, ClientStatus::InProgress);
    }

    #[test]
    fn test_drop_into_empty_lane() {
        let state = board();
        let drop = DropDescriptor::new(4, ClientStatus::InProgress, ClientStatus::Complete);

        let (next, outcome) = apply_drop(&state, &drop).unwrap();

        assert_eq!(outcome.index, 0);
        assert_eq!(ids(&next, ClientStatus::Complete), vec![4]);
    }

    #[test]
    fn test_same_lane_move_down() {
        let state = board();
        let drop = DropDescriptor::new(1, ClientStatus::Backlog, ClientStatus::Backlog).before(3);

        let next = reconcile(&state, &drop);

        assert_eq!(ids(&next, ClientStatus::Backlog), vec![2, 1, 3]);
    }

    #[test]
    fn test_same_lane_move_up() {
        let state = board();
        let drop = DropDescriptor::new(3, ClientStatus::Backlog, ClientStatus::Backlog).before(1);

        let next = reconcile(&state, &drop);

        assert_eq!(ids(&next, ClientStatus::Backlog), vec![3, 1, 2]);
    }

    #[test]
    fn test_same_lane_move_to_end() {
        let state = board();
        let drop = DropDescriptor::new(1, ClientStatus::Backlog, ClientStatus::Backlog);

        let next = reconcile(&state, &drop);

        assert_eq!(ids(&next, ClientStatus::Backlog), vec![2, 3, 1]);
        assert!(next.is_consistent());
    }

    #[test]
    fn test_drop_onto_itself_is_noop() {
        let state = board();
        let drop = DropDescriptor::new(2, ClientStatus::Backlog, ClientStatus::Backlog).before(2);

        let (next, outcome) = apply_drop(&state, &drop).unwrap();

        assert_eq!(next, state);
        assert_eq!(outcome.index, 1);
    }

    #[test]
    fn test_stale_sibling_appends() {
        let state = board();
        let drop =
            DropDescriptor::new(1, ClientStatus::Backlog, ClientStatus::InProgress).before(99);

        let next = reconcile(&state, &drop);

        assert_eq!(ids(&next, ClientStatus::InProgress), vec![4, 5, 1]);
    }

    #[test]
    fn test_sibling_in_other_lane_appends() {
        let state = board();
        // 2 is in backlog, not in the target lane
        let drop =
            DropDescriptor::new(4, ClientStatus::InProgress, ClientStatus::Complete).before(2);

        let next = reconcile(&state, &drop);

        assert_eq!(ids(&next, ClientStatus::Complete), vec![4]);
    }

    #[test]
    fn test_unknown_client_is_noop() {
        let state = board();
        let drop = DropDescriptor::new(42, ClientStatus::Backlog, ClientStatus::Complete);

        assert!(apply_drop(&state, &drop).is_none());
        assert_eq!(reconcile(&state, &drop), state);
    }

    #[test]
    fn test_client_in_wrong_source_lane_is_noop() {
        let state = board();
        let drop = DropDescriptor::new(4, ClientStatus::Backlog, ClientStatus::Complete);

        assert_eq!(reconcile(&state, &drop), state);
    }

    #[test]
    fn test_missing_lanes_are_noop() {
        let state = board();

        let mut drop = DropDescriptor::new(1, ClientStatus::Backlog, ClientStatus::Complete);
        drop.target = None;
        assert_eq!(reconcile(&state, &drop), state);

        let mut drop = DropDescriptor::new(1, ClientStatus::Backlog, ClientStatus::Complete);
        drop.source = None;
        assert_eq!(reconcile(&state, &drop), state);
    }

    #[test]
    fn test_previous_state_untouched() {
        let state = board();
        let before = state.clone();
        let drop = DropDescriptor::new(1, ClientStatus::Backlog, ClientStatus::Complete);

        let _next = reconcile(&state, &drop);

        assert_eq!(state, before);
        assert_eq!(state.backlog[0].status, ClientStatus::Backlog);
    }

    #[test]
    fn test_invariants_hold_over_many_drops() {
        let mut state = board();
        let mut initial = state.ids();
        initial.sort();

        let lanes = ClientStatus::ALL;
        for step in 0..200u64 {
            let id = step % 6 + 1; // includes an unknown id
            let source = state
                .find(&ClientId::new(id))
                .map(|c| c.status)
                .unwrap_or(lanes[(step % 3) as usize]);
            let target = lanes[((step * 7) % 3) as usize];
            let mut drop = DropDescriptor::new(id, source, target);
            if step % 4 == 0 {
                drop = drop.before((step * 3) % 6 + 1);
            }

            state = reconcile(&state, &drop);

            assert!(state.is_consistent(), "inconsistent after step {}", step);
            let mut current = state.ids();
            current.sort();
            assert_eq!(current, initial);
        }
    }
}
