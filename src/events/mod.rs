//! Event handling layer for Swapsea's TUI.
//!
//! Converts raw `crossterm` events into mutations on [`AppState`] and
//! coordinates background requests through the [`ApiCommand`] channel.
//! Dispatch order matters: an open modal owns all input, then the auth
//! form, then the active view. All functions here are synchronous; any
//! network work is delegated to the worker task so input stays responsive.

pub mod browse;
pub mod dashboard;
pub mod forms;

use crossterm::event::{Event as CEvent, KeyCode, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;

use crate::sources::ApiCommand;
use crate::state::{AppState, Focus, Modal, View};

/// What: Dispatch a single input event, mutating [`AppState`] and
/// queueing background work on `cmd_tx`.
///
/// Inputs:
/// - `ev`: A raw `crossterm` event
/// - `app`: Mutable application state
/// - `cmd_tx`: Channel to the API worker
///
/// Output:
/// - `true` when the application should exit, `false` otherwise.
pub fn handle_event(
    ev: &CEvent,
    app: &mut AppState,
    cmd_tx: &mpsc::UnboundedSender<ApiCommand>,
) -> bool {
    let CEvent::Key(key) = ev else {
        return false;
    };
    if key.kind != KeyEventKind::Press {
        return false;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if !matches!(app.modal, Modal::None) {
        forms::handle_modal(*key, app, cmd_tx);
        return false;
    }
    if app.view == View::Auth {
        forms::handle_auth(*key, app, cmd_tx);
        return false;
    }

    // While the search box has focus, every printable key belongs to the
    // query; global shortcuts only apply outside of it.
    let typing = app.view == View::Browse && app.focus == Focus::Search;
    if !typing {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('1') => {
                switch_view(app, cmd_tx, View::Browse);
                return false;
            }
            KeyCode::Char('2') => {
                switch_view(app, cmd_tx, View::Swaps);
                return false;
            }
            KeyCode::Char('3') => {
                switch_view(app, cmd_tx, View::MyItems);
                return false;
            }
            KeyCode::Char('4') => {
                switch_view(app, cmd_tx, View::Profile);
                return false;
            }
            KeyCode::Char('a') if app.session.is_none() => {
                app.view = View::Auth;
                return false;
            }
            _ => {}
        }
    }

    match app.view {
        View::Browse => browse::handle_key(*key, app, cmd_tx),
        View::Swaps => dashboard::handle_swaps_key(*key, app, cmd_tx),
        View::MyItems => dashboard::handle_my_items_key(*key, app, cmd_tx),
        View::Profile => dashboard::handle_profile_key(*key, app, cmd_tx),
        View::Auth => {}
    }
    false
}

/// What: Switch the active view, refreshing its backing data.
///
/// Details:
/// - The dashboard, inventory, and profile views require a session; when
///   signed out a toast points at the auth form instead.
/// - Entering a view queues a refetch of whatever it renders so the
///   screen is never stale after a remote change.
pub fn switch_view(app: &mut AppState, cmd_tx: &mpsc::UnboundedSender<ApiCommand>, view: View) {
    if matches!(view, View::Swaps | View::MyItems | View::Profile) && app.session.is_none() {
        app.toast("Sign in first (press a).");
        return;
    }
    app.view = view;
    match view {
        View::Swaps => {
            app.loading_swaps = true;
            let _ = cmd_tx.send(ApiCommand::FetchSwaps);
        }
        View::MyItems => {
            let _ = cmd_tx.send(ApiCommand::FetchMyItems);
            // The requests tab is derived from the swap set.
            let _ = cmd_tx.send(ApiCommand::FetchSwaps);
        }
        View::Profile => {
            let _ = cmd_tx.send(ApiCommand::FetchReviews {
                user_id: app.user_id().to_string(),
            });
        }
        View::Browse | View::Auth => {}
    }
}
