//! Recompute the derived catalog view inside [`AppState`].

use crate::logic::catalog::filter_and_sort;
use crate::state::AppState;

/// What: Re-run the catalog engine over `app.all_listings` and refresh
/// `app.results`, keeping the highlighted listing when it survives.
///
/// Inputs:
/// - `app`: Mutable application state carrying the listing set and the
///   current filter/sort selections
///
/// Output:
/// - Updates `app.results`, clamps or restores `app.selected`, and resets
///   the pager to page one (filter changes always restart pagination).
///
/// Details:
/// - Selection is restored by listing id when the previously highlighted
///   listing is still present; otherwise the index is clamped, or cleared
///   when the result set is empty.
pub fn apply_filters_preserve_selection(app: &mut AppState) {
    let prev_id = app.results.get(app.selected).map(|l| l.id.clone());

    app.results = filter_and_sort(
        &app.all_listings,
        &app.input,
        &app.category_filters,
        &app.status_filter,
        app.sort_key,
    );
    app.pager.reset();

    if let Some(id) = prev_id
        && let Some(pos) = app.results.iter().position(|l| l.id == id)
    {
        app.selected = pos;
        app.list_state.select(Some(pos));
        return;
    }
    if app.results.is_empty() {
        app.selected = 0;
        app.list_state.select(None);
    } else {
        app.selected = app.selected.min(app.results.len() - 1);
        app.list_state.select(Some(app.selected));
    }
}

/// What: Move the catalog selection by a signed step, following the pager.
///
/// Inputs:
/// - `app`: Mutable application state
/// - `delta`: Signed row delta (`-1`/`+1` for j/k style movement)
///
/// Details:
/// - Movement wraps within the whole result set, not just the visible
///   page; the pager jumps so the highlighted row stays on screen.
pub fn move_selection(app: &mut AppState, delta: i64) {
    if app.results.is_empty() {
        return;
    }
    let len = app.results.len() as i64;
    let next = (app.selected as i64 + delta).rem_euclid(len) as usize;
    app.selected = next;
    app.list_state.select(Some(next));
    app.pager.follow(next, app.results.len());
}
