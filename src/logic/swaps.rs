//! Pure bucketing and action gating for the swap dashboard.
//!
//! All functions here operate on a swap slice plus the signed-in user's
//! id; nothing mutates and nothing touches the network. The event layer
//! turns a gated action into an API command only after these predicates
//! allow it.

use crate::state::{SwapAction, SwapRecord, SwapStatus, SwapTab};

/// Statuses counted as "in flight" for the Active tab and dispute gating.
const ACTIVE_STATUSES: [SwapStatus; 3] = [
    SwapStatus::InEscrow,
    SwapStatus::PickedUp,
    SwapStatus::Returned,
];

/// Statuses counted as finished for the History tab.
const HISTORY_STATUSES: [SwapStatus; 3] = [
    SwapStatus::Closed,
    SwapStatus::Cancelled,
    SwapStatus::Disputed,
];

/// What: Indices of swaps belonging to a dashboard tab, in input order.
///
/// Inputs:
/// - `swaps`: All swaps involving the current user
/// - `tab`: Dashboard tab to populate
/// - `user_id`: The signed-in user's id
///
/// Output:
/// - Indices into `swaps`; indices rather than clones so selection state
///   can address the original records.
#[must_use]
pub fn tab_indices(swaps: &[SwapRecord], tab: SwapTab, user_id: &str) -> Vec<usize> {
    swaps
        .iter()
        .enumerate()
        .filter(|(_, s)| match tab {
            SwapTab::Incoming => s.to_user.id == user_id && s.status == SwapStatus::Proposed,
            SwapTab::Outgoing => s.from_user.id == user_id && s.status == SwapStatus::Proposed,
            SwapTab::Active => ACTIVE_STATUSES.contains(&s.status),
            SwapTab::History => HISTORY_STATUSES.contains(&s.status),
        })
        .map(|(i, _)| i)
        .collect()
}

/// Count per tab, shown as badges in the dashboard sidebar.
#[must_use]
pub fn tab_counts(swaps: &[SwapRecord], user_id: &str) -> [usize; 4] {
    [
        tab_indices(swaps, SwapTab::Incoming, user_id).len(),
        tab_indices(swaps, SwapTab::Outgoing, user_id).len(),
        tab_indices(swaps, SwapTab::Active, user_id).len(),
        tab_indices(swaps, SwapTab::History, user_id).len(),
    ]
}

/// Whether `user_id` owns the requested item in this swap.
#[must_use]
pub fn is_owner(swap: &SwapRecord, user_id: &str) -> bool {
    swap.to_user.id == user_id
}

/// Whether `user_id` proposed this swap.
#[must_use]
pub fn is_proposer(swap: &SwapRecord, user_id: &str) -> bool {
    swap.from_user.id == user_id
}

/// The swap partner's display name from `user_id`'s perspective.
#[must_use]
pub fn partner_name<'a>(swap: &'a SwapRecord, user_id: &str) -> &'a str {
    if is_owner(swap, user_id) {
        swap.from_user.name.as_str()
    } else {
        swap.to_user.name.as_str()
    }
}

/// The swap partner's id from `user_id`'s perspective.
#[must_use]
pub fn partner_id<'a>(swap: &'a SwapRecord, user_id: &str) -> &'a str {
    if is_owner(swap, user_id) {
        swap.from_user.id.as_str()
    } else {
        swap.to_user.id.as_str()
    }
}

/// Review gating: only the proposer reviews, and only once closed.
#[must_use]
pub fn can_review(swap: &SwapRecord, user_id: &str) -> bool {
    swap.status == SwapStatus::Closed && is_proposer(swap, user_id)
}

/// Dispute gating: any in-flight swap can be disputed by either party.
#[must_use]
pub fn can_dispute(swap: &SwapRecord) -> bool {
    ACTIVE_STATUSES.contains(&swap.status)
}

/// What: Actions the current user may trigger on a swap right now.
///
/// Inputs:
/// - `swap`: The swap under the cursor
/// - `user_id`: The signed-in user's id
///
/// Output:
/// - Allowed transitions, in the order the dashboard offers them.
///
/// Details:
/// - Pending proposals: the owner may accept or decline, the proposer may
///   withdraw (both map to `Cancel` on the wire).
/// - In escrow: only the owner confirms pickup.
/// - Picked up: either party confirms the return.
/// - Returned: either party finalizes.
#[must_use]
pub fn allowed_actions(swap: &SwapRecord, user_id: &str) -> Vec<SwapAction> {
    match swap.status {
        SwapStatus::Proposed => {
            if is_owner(swap, user_id) {
                vec![SwapAction::Accept, SwapAction::Cancel]
            } else if is_proposer(swap, user_id) {
                vec![SwapAction::Cancel]
            } else {
                Vec::new()
            }
        }
        SwapStatus::InEscrow => {
            if is_owner(swap, user_id) {
                vec![SwapAction::ConfirmPickup]
            } else {
                Vec::new()
            }
        }
        SwapStatus::PickedUp => vec![SwapAction::ConfirmReturn],
        SwapStatus::Returned => vec![SwapAction::Finish],
        SwapStatus::Accepted
        | SwapStatus::Closed
        | SwapStatus::Disputed
        | SwapStatus::Cancelled => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{SwapItemSummary, UserSummary};

    fn user(id: &str) -> UserSummary {
        UserSummary {
            id: id.to_string(),
            name: format!("user {id}"),
            email: format!("{id}@swap.example"),
        }
    }

    fn swap(id: &str, from: &str, to: &str, status: SwapStatus) -> SwapRecord {
        SwapRecord {
            id: id.to_string(),
            from_user: user(from),
            to_user: user(to),
            item_requested: SwapItemSummary {
                id: format!("item-{id}"),
                name: "Drill".into(),
                images: Vec::new(),
                estimated_value: 500.0,
            },
            item_offered: None,
            deposit_amount: 100.0,
            start_date: String::new(),
            end_date: String::new(),
            status,
        }
    }

    fn sample() -> Vec<SwapRecord> {
        vec![
            swap("s1", "alice", "me", SwapStatus::Proposed),
            swap("s2", "me", "bob", SwapStatus::Proposed),
            swap("s3", "me", "bob", SwapStatus::InEscrow),
            swap("s4", "carol", "me", SwapStatus::PickedUp),
            swap("s5", "me", "dave", SwapStatus::Returned),
            swap("s6", "me", "bob", SwapStatus::Closed),
            swap("s7", "erin", "me", SwapStatus::Cancelled),
            swap("s8", "me", "bob", SwapStatus::Disputed),
        ]
    }

    #[test]
    /// What: Tab bucketing mirrors the original dashboard filters
    ///
    /// - Input: One swap per interesting status/direction combination
    /// - Output: Incoming/outgoing keyed by direction, active and history
    ///   keyed by status only
    fn bucketing_by_tab() {
        let swaps = sample();
        let by = |t| tab_indices(&swaps, t, "me");
        assert_eq!(by(SwapTab::Incoming), vec![0]);
        assert_eq!(by(SwapTab::Outgoing), vec![1]);
        assert_eq!(by(SwapTab::Active), vec![2, 3, 4]);
        assert_eq!(by(SwapTab::History), vec![5, 6, 7]);
        assert_eq!(tab_counts(&swaps, "me"), [1, 1, 3, 3]);
    }

    #[test]
    /// What: Review gating requires a closed swap and the proposer role
    ///
    /// - Input: Closed swap proposed by me, and by someone else
    /// - Output: Only my proposal is reviewable; disputes only on active
    fn review_and_dispute_gating() {
        let mine = swap("a", "me", "bob", SwapStatus::Closed);
        let theirs = swap("b", "alice", "me", SwapStatus::Closed);
        assert!(can_review(&mine, "me"));
        assert!(!can_review(&theirs, "me"));
        assert!(!can_dispute(&mine));
        assert!(can_dispute(&swap("c", "me", "bob", SwapStatus::InEscrow)));
        assert!(can_dispute(&swap("d", "me", "bob", SwapStatus::Returned)));
    }

    #[test]
    /// What: Allowed actions follow the per-status rules
    ///
    /// - Input: Each lifecycle status from both roles
    /// - Output: Accept/decline for owners of proposals, withdraw for
    ///   proposers, pickup owner-only, return and finish for both
    fn allowed_actions_per_status() {
        let proposed = swap("a", "alice", "me", SwapStatus::Proposed);
        assert_eq!(
            allowed_actions(&proposed, "me"),
            vec![SwapAction::Accept, SwapAction::Cancel]
        );
        assert_eq!(allowed_actions(&proposed, "alice"), vec![SwapAction::Cancel]);

        let escrow = swap("b", "alice", "me", SwapStatus::InEscrow);
        assert_eq!(
            allowed_actions(&escrow, "me"),
            vec![SwapAction::ConfirmPickup]
        );
        assert!(allowed_actions(&escrow, "alice").is_empty());

        let picked = swap("c", "alice", "me", SwapStatus::PickedUp);
        assert_eq!(
            allowed_actions(&picked, "alice"),
            vec![SwapAction::ConfirmReturn]
        );

        let returned = swap("d", "alice", "me", SwapStatus::Returned);
        assert_eq!(allowed_actions(&returned, "me"), vec![SwapAction::Finish]);

        let closed = swap("e", "alice", "me", SwapStatus::Closed);
        assert!(allowed_actions(&closed, "me").is_empty());
    }

    #[test]
    /// What: Partner resolution follows the viewer's role
    ///
    /// - Input: A swap viewed by owner and proposer
    /// - Output: Each sees the other party
    fn partner_resolution() {
        let s = swap("a", "alice", "me", SwapStatus::Proposed);
        assert_eq!(partner_id(&s, "me"), "alice");
        assert_eq!(partner_id(&s, "alice"), "me");
        assert_eq!(partner_name(&s, "me"), "user alice");
    }
}
