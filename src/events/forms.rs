//! Keyboard handling for modal dialogs and the auth form.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::sources::ApiCommand;
use crate::state::{
    AppState, AuthMode, DisputeDraft, ItemField, ItemForm, Modal, PendingAction, ProposeDraft,
    ProposeField, ReviewDraft, View,
};

/// What: Route a key press into the active modal.
///
/// Details:
/// - The modal is taken out of the state, mutated, and put back unless the
///   key closed or submitted it; this keeps the borrow local.
pub fn handle_modal(key: KeyEvent, app: &mut AppState, cmd_tx: &mpsc::UnboundedSender<ApiCommand>) {
    let modal = std::mem::take(&mut app.modal);
    match modal {
        Modal::None => {}
        Modal::Alert { message } => match key.code {
            KeyCode::Esc | KeyCode::Enter => {}
            _ => app.modal = Modal::Alert { message },
        },
        Modal::Confirm { message, action } => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => dispatch_pending(app, cmd_tx, action),
            KeyCode::Char('n') | KeyCode::Esc => {}
            _ => app.modal = Modal::Confirm { message, action },
        },
        Modal::Propose(draft) => handle_propose(key, app, cmd_tx, draft),
        Modal::Review(draft) => handle_review(key, app, cmd_tx, draft),
        Modal::Dispute(draft) => handle_dispute(key, app, cmd_tx, draft),
        Modal::Item(form) => handle_item_form(key, app, cmd_tx, form),
    }
}

/// Turn a confirmed pending action into its API command.
fn dispatch_pending(
    app: &mut AppState,
    cmd_tx: &mpsc::UnboundedSender<ApiCommand>,
    action: PendingAction,
) {
    match action {
        PendingAction::Swap { swap_id, action } => {
            app.toast(format!("Requesting {}…", action.label()));
            let _ = cmd_tx.send(ApiCommand::SwapAction { swap_id, action });
        }
        PendingAction::DeleteItem { item_id } => {
            let _ = cmd_tx.send(ApiCommand::DeleteItem { id: item_id });
        }
        PendingAction::Logout => {
            let _ = cmd_tx.send(ApiCommand::Logout);
        }
    }
}

/// Propose-swap form input.
fn handle_propose(
    key: KeyEvent,
    app: &mut AppState,
    cmd_tx: &mpsc::UnboundedSender<ApiCommand>,
    mut draft: ProposeDraft,
) {
    match key.code {
        KeyCode::Esc => return,
        KeyCode::Tab => draft.field = draft.field.next(),
        KeyCode::Enter => {
            if let Err(msg) = draft.validate() {
                app.toast(msg);
            } else {
                app.toast("Sending proposal…");
                let _ = cmd_tx.send(ApiCommand::ProposeSwap { draft });
                return;
            }
        }
        _ => match draft.field {
            ProposeField::OfferedItem => match key.code {
                KeyCode::Char('j') | KeyCode::Down => {
                    if !draft.my_items.is_empty() {
                        let next = draft
                            .offered_index
                            .map_or(0, |i| (i + 1) % draft.my_items.len());
                        draft.offered_index = Some(next);
                    }
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    if !draft.my_items.is_empty() {
                        let prev = draft.offered_index.map_or(0, |i| {
                            i.checked_sub(1).unwrap_or(draft.my_items.len() - 1)
                        });
                        draft.offered_index = Some(prev);
                    }
                }
                KeyCode::Char('x') => draft.offered_index = None,
                _ => {}
            },
            ProposeField::Deposit => edit_text(key, &mut draft.deposit_input),
            ProposeField::StartDate => edit_text(key, &mut draft.start_date),
            ProposeField::EndDate => edit_text(key, &mut draft.end_date),
        },
    }
    app.modal = Modal::Propose(draft);
}

/// Review form input: star adjustment plus comment text.
fn handle_review(
    key: KeyEvent,
    app: &mut AppState,
    cmd_tx: &mpsc::UnboundedSender<ApiCommand>,
    mut draft: ReviewDraft,
) {
    match key.code {
        KeyCode::Esc => return,
        KeyCode::Enter => {
            app.toast("Submitting review…");
            let _ = cmd_tx.send(ApiCommand::SubmitReview { draft });
            return;
        }
        KeyCode::Char('+') | KeyCode::Char('=') => draft.rating = (draft.rating + 1).min(5),
        KeyCode::Char('-') => draft.rating = draft.rating.saturating_sub(1).max(1),
        _ => edit_text(key, &mut draft.comment),
    }
    app.modal = Modal::Review(draft);
}

/// Dispute form input: free-text evidence description.
fn handle_dispute(
    key: KeyEvent,
    app: &mut AppState,
    cmd_tx: &mpsc::UnboundedSender<ApiCommand>,
    mut draft: DisputeDraft,
) {
    match key.code {
        KeyCode::Esc => return,
        KeyCode::Enter => {
            if let Err(msg) = draft.validate() {
                app.toast(msg);
            } else {
                app.toast("Filing dispute…");
                let _ = cmd_tx.send(ApiCommand::FileDispute { draft });
                return;
            }
        }
        _ => edit_text(key, &mut draft.description),
    }
    app.modal = Modal::Dispute(draft);
}

/// Item create/edit form input.
fn handle_item_form(
    key: KeyEvent,
    app: &mut AppState,
    cmd_tx: &mpsc::UnboundedSender<ApiCommand>,
    mut form: ItemForm,
) {
    match key.code {
        KeyCode::Esc => return,
        KeyCode::Tab => form.field = form.field.next(),
        KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.draft.estimated_value = form.value_input.trim().parse::<f64>().unwrap_or(0.0);
            if let Err(msg) = form.draft.validate() {
                app.toast(msg);
            } else {
                let cmd = match form.editing_id.clone() {
                    Some(id) => ApiCommand::UpdateItem {
                        id,
                        draft: form.draft,
                    },
                    None => ApiCommand::CreateItem { draft: form.draft },
                };
                app.toast("Saving item…");
                let _ = cmd_tx.send(cmd);
                return;
            }
        }
        KeyCode::Enter => {
            // Enter attaches the pending image reference; on any other
            // field it just advances, like Tab.
            if form.field == ItemField::Image && !form.image_input.trim().is_empty() {
                form.draft.images.push(form.image_input.trim().to_string());
                form.image_input.clear();
            } else {
                form.field = form.field.next();
            }
        }
        _ => match form.field {
            ItemField::Name => edit_text(key, &mut form.draft.name),
            ItemField::Description => edit_text(key, &mut form.draft.description),
            ItemField::Category => edit_text(key, &mut form.draft.category),
            ItemField::Value => edit_text(key, &mut form.value_input),
            ItemField::Condition => edit_text(key, &mut form.draft.condition),
            ItemField::Image => edit_text(key, &mut form.image_input),
        },
    }
    app.modal = Modal::Item(form);
}

/// Auth form input for both login and register modes.
pub fn handle_auth(key: KeyEvent, app: &mut AppState, cmd_tx: &mpsc::UnboundedSender<ApiCommand>) {
    match key.code {
        KeyCode::Esc => {
            app.view = View::Browse;
        }
        KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.auth.mode = match app.auth.mode {
                AuthMode::Login => AuthMode::Register,
                AuthMode::Register => AuthMode::Login,
            };
            app.auth.field = crate::state::AuthField::default();
            app.auth.error = None;
        }
        KeyCode::Tab => app.auth.field = app.auth.field.next(app.auth.mode),
        KeyCode::Enter => submit_auth(app, cmd_tx),
        KeyCode::Backspace => match app.auth.field {
            crate::state::AuthField::Name => {
                app.auth.name.pop();
            }
            crate::state::AuthField::Email => {
                app.auth.email.pop();
            }
            crate::state::AuthField::Password => {
                app.auth.password.pop();
            }
        },
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            match app.auth.field {
                crate::state::AuthField::Name => app.auth.name.push(c),
                crate::state::AuthField::Email => app.auth.email.push(c),
                crate::state::AuthField::Password => app.auth.password.push(c),
            }
        }
        _ => {}
    }
}

/// Validate the auth form and queue the login or register command.
fn submit_auth(app: &mut AppState, cmd_tx: &mpsc::UnboundedSender<ApiCommand>) {
    let email = app.auth.email.trim().to_string();
    let password = app.auth.password.trim().to_string();
    if email.is_empty() || password.is_empty() {
        app.auth.error = Some("Email and password are required.".to_string());
        return;
    }
    match app.auth.mode {
        AuthMode::Login => {
            app.auth.error = None;
            app.toast("Signing in…");
            let _ = cmd_tx.send(ApiCommand::Login { email, password });
        }
        AuthMode::Register => {
            let name = app.auth.name.trim().to_string();
            if name.is_empty() {
                app.auth.error = Some("Name is required to register.".to_string());
                return;
            }
            app.auth.error = None;
            app.toast("Creating account…");
            let _ = cmd_tx.send(ApiCommand::Register {
                name,
                email,
                password,
            });
        }
    }
}

/// Shared single-line text editing: printable characters and backspace.
fn edit_text(key: KeyEvent, buf: &mut String) {
    match key.code {
        KeyCode::Backspace => {
            buf.pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => buf.push(c),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SwapAction;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    /// What: Confirming a staged swap action sends the command
    ///
    /// - Input: Confirm modal with an accept action, press 'y'
    /// - Output: SwapAction command on the channel, modal closed
    fn confirm_dispatches() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = AppState::default();
        app.modal = Modal::Confirm {
            message: "Really accept?".into(),
            action: PendingAction::Swap {
                swap_id: "s1".into(),
                action: SwapAction::Accept,
            },
        };
        handle_modal(press(KeyCode::Char('y')), &mut app, &tx);
        assert!(matches!(app.modal, Modal::None));
        assert!(matches!(
            rx.try_recv(),
            Ok(ApiCommand::SwapAction {
                action: SwapAction::Accept,
                ..
            })
        ));
    }

    #[test]
    /// What: An invalid proposal toasts and keeps the form open
    ///
    /// - Input: Propose modal with no offer and no deposit, press Enter
    /// - Output: Toast set, modal still a propose form, nothing sent
    fn invalid_proposal_kept_open() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = AppState::default();
        app.modal = Modal::Propose(ProposeDraft::default());
        handle_modal(press(KeyCode::Enter), &mut app, &tx);
        assert!(matches!(app.modal, Modal::Propose(_)));
        assert!(app.toast_message.is_some());
        assert!(rx.try_recv().is_err());
    }

    #[test]
    /// What: Review rating clamps to 1..=5 under +/- keys
    ///
    /// - Input: Press '+' at 5 and '-' down past 1
    /// - Output: Rating never leaves the valid range
    fn review_rating_clamped() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = AppState::default();
        app.modal = Modal::Review(ReviewDraft::default());
        handle_modal(press(KeyCode::Char('+')), &mut app, &tx);
        for _ in 0..6 {
            handle_modal(press(KeyCode::Char('-')), &mut app, &tx);
        }
        let Modal::Review(draft) = &app.modal else {
            panic!("expected review modal");
        };
        assert_eq!(draft.rating, 1);
    }

    #[test]
    /// What: Ctrl-S on a complete item form sends create or update
    ///
    /// - Input: Filled form without an editing id, then with one
    /// - Output: CreateItem, then UpdateItem with the parsed value
    fn item_form_saves() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = AppState::default();
        let form = ItemForm {
            editing_id: None,
            value_input: "450".into(),
            draft: crate::state::ItemDraft {
                name: "Drill".into(),
                description: "Cordless".into(),
                category: "Home".into(),
                estimated_value: 0.0,
                condition: "used".into(),
                images: vec!["img".into()],
            },
            ..Default::default()
        };
        app.modal = Modal::Item(form.clone());
        handle_modal(ctrl('s'), &mut app, &tx);
        let Ok(ApiCommand::CreateItem { draft }) = rx.try_recv() else {
            panic!("expected create command");
        };
        assert!((draft.estimated_value - 450.0).abs() < f64::EPSILON);

        let mut edit = form;
        edit.editing_id = Some("m1".into());
        app.modal = Modal::Item(edit);
        handle_modal(ctrl('s'), &mut app, &tx);
        assert!(matches!(rx.try_recv(), Ok(ApiCommand::UpdateItem { .. })));
    }

    #[test]
    /// What: Register requires a name; login does not
    ///
    /// - Input: Submit register without a name, then login
    /// - Output: Inline error first, login command second
    fn auth_validation() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = AppState::default();
        app.view = View::Auth;
        app.auth.mode = AuthMode::Register;
        app.auth.email = "me@swap.example".into();
        app.auth.password.push_str("hunter2");
        handle_auth(press(KeyCode::Enter), &mut app, &tx);
        assert!(app.auth.error.is_some());
        assert!(rx.try_recv().is_err());

        app.auth.mode = AuthMode::Login;
        handle_auth(press(KeyCode::Enter), &mut app, &tx);
        assert!(matches!(rx.try_recv(), Ok(ApiCommand::Login { .. })));
    }
}
