//! Keyboard handling for the Browse view: search box, filter sidebar,
//! paginated results.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

use crate::logic::{apply_filters_preserve_selection, move_selection};
use crate::sources::ApiCommand;
use crate::state::{AVAILABLE_CATEGORIES, AppState, Focus, Modal, ProposeDraft};
use crate::ui::browse::sidebar_rows;

/// Dispatch a key press within the Browse view.
pub fn handle_key(key: KeyEvent, app: &mut AppState, cmd_tx: &mpsc::UnboundedSender<ApiCommand>) {
    match key.code {
        KeyCode::Tab => {
            app.focus = match app.focus {
                Focus::Search => Focus::Sidebar,
                Focus::Sidebar => Focus::Results,
                Focus::Results => Focus::Search,
            };
            return;
        }
        KeyCode::BackTab => {
            app.focus = match app.focus {
                Focus::Search => Focus::Results,
                Focus::Sidebar => Focus::Search,
                Focus::Results => Focus::Sidebar,
            };
            return;
        }
        _ => {}
    }
    match app.focus {
        Focus::Search => handle_search_key(key, app),
        Focus::Sidebar => handle_sidebar_key(key, app),
        Focus::Results => handle_results_key(key, app, cmd_tx),
    }
}

/// Typing into the free-text query; every edit re-runs the engine.
fn handle_search_key(key: KeyEvent, app: &mut AppState) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => app.focus = Focus::Results,
        KeyCode::Backspace => {
            app.input.pop();
            apply_filters_preserve_selection(app);
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.input.push(c);
            apply_filters_preserve_selection(app);
        }
        _ => {}
    }
}

/// Cursor movement and toggles within the filter sidebar.
fn handle_sidebar_key(key: KeyEvent, app: &mut AppState) {
    let rows = sidebar_rows();
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            app.sidebar_row = (app.sidebar_row + 1) % rows;
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.sidebar_row = app.sidebar_row.checked_sub(1).unwrap_or(rows - 1);
        }
        KeyCode::Char(' ') | KeyCode::Enter => activate_sidebar_row(app),
        KeyCode::Char('s') => cycle_status(app),
        KeyCode::Char('o') => cycle_sort(app),
        KeyCode::Esc => app.focus = Focus::Results,
        _ => {}
    }
}

/// Apply the sidebar row under the cursor: category toggle, status cycle,
/// or sort cycle.
fn activate_sidebar_row(app: &mut AppState) {
    let cats = AVAILABLE_CATEGORIES.len();
    if app.sidebar_row < cats {
        let cat = AVAILABLE_CATEGORIES[app.sidebar_row];
        if let Some(pos) = app
            .category_filters
            .iter()
            .position(|c| c.eq_ignore_ascii_case(cat))
        {
            app.category_filters.remove(pos);
        } else {
            app.category_filters.push(cat.to_string());
        }
        apply_filters_preserve_selection(app);
    } else if app.sidebar_row == cats {
        cycle_status(app);
    } else {
        cycle_sort(app);
    }
}

/// Cycle the status filter: available, swapped, then all.
fn cycle_status(app: &mut AppState) {
    app.status_filter = match app.status_filter.as_str() {
        "available" => "swapped".to_string(),
        "swapped" => String::new(),
        _ => "available".to_string(),
    };
    apply_filters_preserve_selection(app);
}

/// Cycle to the next sort order.
fn cycle_sort(app: &mut AppState) {
    app.sort_key = app.sort_key.next();
    apply_filters_preserve_selection(app);
}

/// Navigation and actions within the results list.
fn handle_results_key(
    key: KeyEvent,
    app: &mut AppState,
    cmd_tx: &mpsc::UnboundedSender<ApiCommand>,
) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            move_selection(app, 1);
            maybe_fetch_details(app, cmd_tx);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            move_selection(app, -1);
            maybe_fetch_details(app, cmd_tx);
        }
        KeyCode::Char('n') | KeyCode::Right => {
            app.pager.next(app.results.len());
            snap_to_page(app);
        }
        KeyCode::Char('p') | KeyCode::Left => {
            app.pager.prev();
            snap_to_page(app);
        }
        KeyCode::Char('g') | KeyCode::Home => {
            if !app.results.is_empty() {
                app.selected = 0;
                app.list_state.select(Some(0));
                app.pager.follow(0, app.results.len());
            }
        }
        KeyCode::Char('G') | KeyCode::End => {
            if !app.results.is_empty() {
                let last = app.results.len() - 1;
                app.selected = last;
                app.list_state.select(Some(last));
                app.pager.follow(last, app.results.len());
            }
        }
        KeyCode::Char('r') => {
            app.loading_listings = true;
            let _ = cmd_tx.send(ApiCommand::FetchListings);
        }
        KeyCode::Char('s') => cycle_status(app),
        KeyCode::Char('o') => cycle_sort(app),
        KeyCode::Enter => open_propose(app, cmd_tx),
        _ => {}
    }
}

/// Keep the highlighted row on the page after a page jump.
fn snap_to_page(app: &mut AppState) {
    let total = app.results.len();
    if total == 0 {
        return;
    }
    let (start, _) = app.pager.bounds(total);
    app.selected = start.min(total - 1);
    app.list_state.select(Some(app.selected));
}

/// Request full details for the highlighted listing on a cache miss.
fn maybe_fetch_details(app: &mut AppState, cmd_tx: &mpsc::UnboundedSender<ApiCommand>) {
    if let Some(l) = app.results.get(app.selected)
        && !app.details_cache.contains(&l.id)
    {
        let _ = cmd_tx.send(ApiCommand::FetchItem { id: l.id.clone() });
    }
}

/// What: Open the propose-swap modal for the highlighted listing.
///
/// Details:
/// - Requires a session, a listing that is not my own, and `available`
///   status; violations toast instead of opening the form.
/// - The offer picker is seeded from the cached inventory, excluding
///   unavailable items, and a background refresh keeps it current.
fn open_propose(app: &mut AppState, cmd_tx: &mpsc::UnboundedSender<ApiCommand>) {
    let Some(session) = &app.session else {
        app.toast("Sign in first (press a).");
        return;
    };
    let Some(listing) = app.results.get(app.selected) else {
        return;
    };
    if listing.owner.as_deref() == Some(session.user.id.as_str()) {
        app.toast("You cannot propose a swap for your own item.");
        return;
    }
    if !listing.status.eq_ignore_ascii_case("available") {
        app.toast("That item is not available right now.");
        return;
    }
    let my_items: Vec<_> = app
        .my_items
        .iter()
        .filter(|i| i.status.eq_ignore_ascii_case("available") && i.id != listing.id)
        .cloned()
        .collect();
    app.modal = Modal::Propose(ProposeDraft {
        item_requested_id: listing.id.clone(),
        item_owner_id: listing.owner.clone().unwrap_or_default(),
        my_items,
        ..Default::default()
    });
    let _ = cmd_tx.send(ApiCommand::FetchMyItems);
}
