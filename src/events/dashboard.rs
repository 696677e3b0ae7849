//! Keyboard handling for the swap dashboard, My Items, and Profile views.

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::logic::swaps::{allowed_actions, can_dispute, can_review, partner_id, partner_name, tab_indices};
use crate::sources::ApiCommand;
use crate::state::{
    AppState, DisputeDraft, ItemDraft, ItemForm, Modal, MyItemsTab, PendingAction, ReviewDraft,
    SwapAction, SwapRecord,
};

/// Dispatch a key press within the swap dashboard.
pub fn handle_swaps_key(
    key: KeyEvent,
    app: &mut AppState,
    cmd_tx: &mpsc::UnboundedSender<ApiCommand>,
) {
    match key.code {
        KeyCode::Tab => {
            app.swap_tab = app.swap_tab.next();
            app.swap_selected = 0;
            return;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            move_swap_selection(app, 1);
            return;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            move_swap_selection(app, -1);
            return;
        }
        KeyCode::Char('r') => {
            app.loading_swaps = true;
            let _ = cmd_tx.send(ApiCommand::FetchSwaps);
            return;
        }
        _ => {}
    }

    let user_id = app.user_id().to_string();
    let indices = tab_indices(&app.swaps, app.swap_tab, &user_id);
    let Some(swap) = indices
        .get(app.swap_selected)
        .and_then(|&i| app.swaps.get(i))
        .cloned()
    else {
        return;
    };

    match key.code {
        KeyCode::Char('a') => request_action(app, &swap, &user_id, SwapAction::Accept),
        KeyCode::Char('x') => request_action(app, &swap, &user_id, SwapAction::Cancel),
        KeyCode::Char('u') => request_action(app, &swap, &user_id, SwapAction::ConfirmPickup),
        KeyCode::Char('t') => request_action(app, &swap, &user_id, SwapAction::ConfirmReturn),
        KeyCode::Char('f') => request_action(app, &swap, &user_id, SwapAction::Finish),
        KeyCode::Char('v') => {
            if can_review(&swap, &user_id) {
                app.modal = Modal::Review(ReviewDraft {
                    swap_id: swap.id.clone(),
                    to_user_id: partner_id(&swap, &user_id).to_string(),
                    ..Default::default()
                });
            } else {
                app.toast("Reviews unlock once a swap you proposed is closed.");
            }
        }
        KeyCode::Char('d') => {
            if can_dispute(&swap) {
                app.modal = Modal::Dispute(DisputeDraft {
                    swap_id: swap.id.clone(),
                    ..Default::default()
                });
            } else {
                app.toast("Only in-flight swaps can be disputed.");
            }
        }
        _ => {}
    }
}

/// Move the highlighted row within the active tab's bucket, wrapping.
fn move_swap_selection(app: &mut AppState, delta: i64) {
    let user_id = app.user_id().to_string();
    let len = tab_indices(&app.swaps, app.swap_tab, &user_id).len() as i64;
    if len == 0 {
        return;
    }
    app.swap_selected = (app.swap_selected as i64 + delta).rem_euclid(len) as usize;
    app.swap_state.select(Some(app.swap_selected));
}

/// Gate a lifecycle transition and stage it behind a confirmation modal.
fn request_action(app: &mut AppState, swap: &SwapRecord, user_id: &str, action: SwapAction) {
    if !allowed_actions(swap, user_id).contains(&action) {
        app.toast(format!(
            "Cannot {} this swap in its current state.",
            action.label()
        ));
        return;
    }
    app.modal = Modal::Confirm {
        message: format!(
            "Really {} the swap for \"{}\" with {}?",
            action.label(),
            swap.item_requested.name,
            partner_name(swap, user_id),
        ),
        action: PendingAction::Swap {
            swap_id: swap.id.clone(),
            action,
        },
    };
}

/// Dispatch a key press within the My Items view.
pub fn handle_my_items_key(
    key: KeyEvent,
    app: &mut AppState,
    cmd_tx: &mpsc::UnboundedSender<ApiCommand>,
) {
    match key.code {
        KeyCode::Tab => {
            app.my_items_tab = match app.my_items_tab {
                MyItemsTab::Inventory => MyItemsTab::Requests,
                MyItemsTab::Requests => MyItemsTab::Inventory,
            };
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if !app.my_items.is_empty() {
                app.my_items_selected = (app.my_items_selected + 1) % app.my_items.len();
                app.my_items_state.select(Some(app.my_items_selected));
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if !app.my_items.is_empty() {
                app.my_items_selected = app
                    .my_items_selected
                    .checked_sub(1)
                    .unwrap_or(app.my_items.len() - 1);
                app.my_items_state.select(Some(app.my_items_selected));
            }
        }
        KeyCode::Char('n') => {
            app.modal = Modal::Item(ItemForm {
                draft: ItemDraft {
                    condition: "used".to_string(),
                    ..Default::default()
                },
                ..Default::default()
            });
        }
        KeyCode::Char('e') => {
            if let Some(item) = app.my_items.get(app.my_items_selected).cloned() {
                app.modal = Modal::Item(ItemForm {
                    editing_id: Some(item.id.clone()),
                    value_input: format!("{}", item.estimated_value.unwrap_or(0.0)),
                    draft: ItemDraft {
                        name: item.name,
                        description: item.description.unwrap_or_default(),
                        category: item.category.unwrap_or_default(),
                        estimated_value: item.estimated_value.unwrap_or(0.0),
                        condition: item.condition.unwrap_or_else(|| "used".to_string()),
                        images: item.images,
                    },
                    ..Default::default()
                });
            }
        }
        KeyCode::Char('d') => {
            if let Some(item) = app.my_items.get(app.my_items_selected) {
                app.modal = Modal::Confirm {
                    message: format!("Delete \"{}\"? This cannot be undone.", item.name),
                    action: PendingAction::DeleteItem {
                        item_id: item.id.clone(),
                    },
                };
            }
        }
        KeyCode::Char('r') => {
            let _ = cmd_tx.send(ApiCommand::FetchMyItems);
            let _ = cmd_tx.send(ApiCommand::FetchSwaps);
        }
        _ => {}
    }
}

/// Dispatch a key press within the Profile view.
pub fn handle_profile_key(
    key: KeyEvent,
    app: &mut AppState,
    cmd_tx: &mpsc::UnboundedSender<ApiCommand>,
) {
    match key.code {
        KeyCode::Char('L') => {
            if app.session.is_some() {
                app.modal = Modal::Confirm {
                    message: "Log out and forget the stored session?".to_string(),
                    action: PendingAction::Logout,
                };
            }
        }
        KeyCode::Char('r') => {
            let _ = cmd_tx.send(ApiCommand::FetchReviews {
                user_id: app.user_id().to_string(),
            });
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Session, SwapItemSummary, SwapStatus, UserSummary};
    use crossterm::event::KeyModifiers;

    fn press(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn user(id: &str) -> UserSummary {
        UserSummary {
            id: id.to_string(),
            name: id.to_string(),
            email: format!("{id}@swap.example"),
        }
    }

    fn app_with_swap(status: SwapStatus, from: &str, to: &str) -> AppState {
        let mut app = AppState::default();
        app.session = Some(Session {
            user: user("me"),
            token: "tok".into(),
        });
        app.swaps = vec![SwapRecord {
            id: "s1".into(),
            from_user: user(from),
            to_user: user(to),
            item_requested: SwapItemSummary {
                id: "i1".into(),
                name: "Drill".into(),
                images: Vec::new(),
                estimated_value: 500.0,
            },
            item_offered: None,
            deposit_amount: 100.0,
            start_date: String::new(),
            end_date: String::new(),
            status,
        }];
        app
    }

    #[test]
    /// What: Accepting an incoming proposal stages a confirmation
    ///
    /// - Input: 'a' on a proposal addressed to me
    /// - Output: Confirm modal carrying the accept transition
    fn accept_stages_confirm() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = app_with_swap(SwapStatus::Proposed, "alice", "me");
        handle_swaps_key(press('a'), &mut app, &tx);
        let Modal::Confirm { action, .. } = &app.modal else {
            panic!("expected confirm modal");
        };
        assert_eq!(
            *action,
            PendingAction::Swap {
                swap_id: "s1".into(),
                action: SwapAction::Accept,
            }
        );
    }

    #[test]
    /// What: Gated actions toast instead of staging
    ///
    /// - Input: 'u' (confirm pickup) as the proposer of an escrow swap
    /// - Output: No modal, toast set
    fn pickup_gated_to_owner() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = app_with_swap(SwapStatus::InEscrow, "me", "bob");
        app.swap_tab = crate::state::SwapTab::Active;
        handle_swaps_key(press('u'), &mut app, &tx);
        assert!(matches!(app.modal, Modal::None));
        assert!(app.toast_message.is_some());
    }

    #[test]
    /// What: Review opens only for the proposer of a closed swap
    ///
    /// - Input: 'v' on my closed proposal, then on one proposed to me
    /// - Output: Review modal targeting the partner; then a toast
    fn review_gating() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = app_with_swap(SwapStatus::Closed, "me", "bob");
        app.swap_tab = crate::state::SwapTab::History;
        handle_swaps_key(press('v'), &mut app, &tx);
        let Modal::Review(draft) = &app.modal else {
            panic!("expected review modal");
        };
        assert_eq!(draft.to_user_id, "bob");
        assert_eq!(draft.rating, 5);

        let mut app = app_with_swap(SwapStatus::Closed, "alice", "me");
        app.swap_tab = crate::state::SwapTab::History;
        handle_swaps_key(press('v'), &mut app, &tx);
        assert!(matches!(app.modal, Modal::None));
    }

    #[test]
    /// What: Editing prefills the item form from the selected listing
    ///
    /// - Input: 'e' with one inventory item selected
    /// - Output: Item modal in edit mode with the listing's fields
    fn edit_prefills_form() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = AppState::default();
        app.my_items = vec![crate::state::Listing {
            id: "m1".into(),
            name: "Lamp".into(),
            description: Some("Desk lamp".into()),
            category: Some("Home".into()),
            estimated_value: Some(350.0),
            condition: Some("like new".into()),
            status: "available".into(),
            images: vec!["img".into()],
            ..Default::default()
        }];
        handle_my_items_key(press('e'), &mut app, &tx);
        let Modal::Item(form) = &app.modal else {
            panic!("expected item modal");
        };
        assert_eq!(form.editing_id.as_deref(), Some("m1"));
        assert_eq!(form.draft.name, "Lamp");
        assert_eq!(form.value_input, "350");
    }
}
