//! Swapsea application runtime: terminal lifecycle, the API worker task,
//! and the main event loop.
//!
//! The runtime owns three channels: raw terminal events from a blocking
//! reader thread, [`ApiCommand`]s from the input layer to the worker, and
//! [`ApiEvent`]s back from the worker. The event loop is the only place
//! that mutates [`AppState`].

use std::time::Duration;

use crossterm::{
    event::{self, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::{select, sync::mpsc};

use crate::args::Args;
use crate::logic::apply_filters_preserve_selection;
use crate::sources::{ApiClient, ApiCommand, ApiEvent};
use crate::state::{AppState, AuthForm, AuthMode, Modal, View};
use crate::ui::ui;
use crate::util::config::{self, Settings};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

fn setup_terminal() -> Result<()> {
    enable_raw_mode()?;
    execute!(std::io::stdout(), EnterAlternateScreen)?;
    Ok(())
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(std::io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Build the initial [`AppState`] from settings plus CLI overrides.
fn initial_state(settings: &Settings, args: &Args) -> AppState {
    let mut app = AppState::default();
    app.api_url = args
        .api_url
        .clone()
        .unwrap_or_else(|| settings.api_url.clone());
    app.pager.page_size = args.page_size.unwrap_or(settings.page_size).max(1);
    app.sort_key = settings.sort_key();
    app.status_filter = settings.status_filter.clone();
    app.dry_run = args.dry_run;
    app
}

/// What: Start the Swapsea TUI runtime and run the main event loop.
///
/// Inputs:
/// - `args`: Parsed command-line arguments
///
/// Output:
/// - `Ok(())` on normal shutdown, or an error when terminal setup fails.
///
/// Details:
/// - Spawns a blocking thread for terminal input, a ticker for toast
///   expiry, and one worker task that owns the [`ApiClient`]; the worker
///   resumes a persisted token before serving commands.
pub async fn run(args: Args) -> Result<()> {
    let settings = Settings::load();
    let mut app = initial_state(&settings, &args);

    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<ApiCommand>();
    let (evt_tx, mut evt_rx) = mpsc::unbounded_channel::<ApiEvent>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<CEvent>();

    let stored_token = config::load_token(&app.token_path);
    let client = ApiClient::new(&app.api_url, None);
    tokio::spawn(run_worker(
        client,
        stored_token,
        app.dry_run,
        cmd_rx,
        evt_tx,
    ));

    std::thread::spawn(move || {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(50))
                && let Ok(ev) = event::read()
            {
                let _ = event_tx.send(ev);
            }
        }
    });

    let _ = cmd_tx.send(ApiCommand::FetchListings);

    setup_terminal()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;
    let mut ticker = tokio::time::interval(Duration::from_millis(200));

    loop {
        let _ = terminal.draw(|f| ui(f, &mut app));

        select! {
            Some(ev) = event_rx.recv() => {
                if crate::events::handle_event(&ev, &mut app, &cmd_tx) {
                    break;
                }
            }
            Some(api_ev) = evt_rx.recv() => {
                apply_api_event(&mut app, api_ev, &cmd_tx);
            }
            _ = ticker.tick() => {
                app.expire_toast();
            }
        }
    }

    restore_terminal()?;
    Ok(())
}

/// What: Fold one worker result into the application state.
///
/// Details:
/// - Session changes persist or forget the token file and trigger the
///   refetches the dashboard views depend on.
/// - `ActionDone` refreshes whatever data the mutation touched, so the
///   screen converges on server truth without manual reloads.
fn apply_api_event(
    app: &mut AppState,
    ev: ApiEvent,
    cmd_tx: &mpsc::UnboundedSender<ApiCommand>,
) {
    match ev {
        ApiEvent::Listings(listings) => {
            app.all_listings = listings;
            app.loading_listings = false;
            apply_filters_preserve_selection(app);
        }
        ApiEvent::MyItems(items) => {
            app.my_items = items;
            if app.my_items_selected >= app.my_items.len() {
                app.my_items_selected = app.my_items.len().saturating_sub(1);
            }
        }
        ApiEvent::Swaps(swaps) => {
            app.swaps = swaps;
            app.loading_swaps = false;
        }
        ApiEvent::ItemDetails(listing) => {
            app.details_cache.put(listing.id.clone(), *listing);
        }
        ApiEvent::Reviews(reviews) => {
            app.reviews = reviews;
        }
        ApiEvent::SessionStarted(session) => {
            config::save_token(&app.token_path, &session.token);
            app.toast(format!("Signed in as {}.", session.user.name));
            app.session = Some(session);
            app.auth = AuthForm::default();
            if app.view == View::Auth {
                app.view = View::Browse;
            }
            let _ = cmd_tx.send(ApiCommand::FetchMyItems);
            let _ = cmd_tx.send(ApiCommand::FetchSwaps);
            let _ = cmd_tx.send(ApiCommand::FetchReviews {
                user_id: app.user_id().to_string(),
            });
        }
        ApiEvent::SessionEnded => {
            config::forget_token(&app.token_path);
            app.session = None;
            app.swaps.clear();
            app.my_items.clear();
            app.reviews.clear();
            app.view = View::Browse;
            app.toast("Signed out.");
        }
        ApiEvent::Registered(message) => {
            app.toast(message);
            app.auth.mode = AuthMode::Login;
        }
        ApiEvent::ActionDone {
            message,
            refresh_swaps,
            refresh_items,
        } => {
            app.toast(message);
            if refresh_swaps {
                app.loading_swaps = true;
                let _ = cmd_tx.send(ApiCommand::FetchSwaps);
            }
            if refresh_items {
                let _ = cmd_tx.send(ApiCommand::FetchMyItems);
                let _ = cmd_tx.send(ApiCommand::FetchListings);
            }
        }
        ApiEvent::Failed(message) => {
            app.loading_listings = false;
            app.loading_swaps = false;
            app.modal = Modal::Alert { message };
        }
    }
}

/// Worker task: owns the [`ApiClient`] and serves commands sequentially.
async fn run_worker(
    mut client: ApiClient,
    stored_token: Option<String>,
    dry_run: bool,
    mut cmd_rx: mpsc::UnboundedReceiver<ApiCommand>,
    evt_tx: mpsc::UnboundedSender<ApiEvent>,
) {
    if let Some(token) = stored_token
        && let Some(session) = client.resume(token).await
    {
        let _ = evt_tx.send(ApiEvent::SessionStarted(session));
    }
    while let Some(cmd) = cmd_rx.recv().await {
        if let Some(ev) = handle_command(&mut client, cmd, dry_run).await {
            let _ = evt_tx.send(ev);
        }
    }
}

/// Execute one command against the API, mapping the outcome to an event.
/// Only failed cache warm-ups produce no event at all.
async fn handle_command(
    client: &mut ApiClient,
    cmd: ApiCommand,
    dry_run: bool,
) -> Option<ApiEvent> {
    Some(match cmd {
        ApiCommand::FetchListings => match client.fetch_listings().await {
            Ok(listings) => ApiEvent::Listings(listings),
            Err(e) => failed("Could not load listings", &e),
        },
        ApiCommand::FetchMyItems => match client.fetch_my_items().await {
            Ok(items) => ApiEvent::MyItems(items),
            Err(e) => failed("Could not load your items", &e),
        },
        ApiCommand::FetchSwaps => match client.fetch_my_swaps().await {
            Ok(swaps) => ApiEvent::Swaps(swaps),
            Err(e) => failed("Could not load swaps", &e),
        },
        ApiCommand::FetchItem { id } => match client.fetch_item(&id).await {
            Ok(item) => ApiEvent::ItemDetails(Box::new(item)),
            Err(e) => {
                // Details are a cache warm-up; failures only get logged.
                tracing::debug!(error = %e, id, "item details fetch failed");
                return None;
            }
        },
        ApiCommand::FetchReviews { user_id } => match client.fetch_reviews_for(&user_id).await {
            Ok(reviews) => ApiEvent::Reviews(reviews),
            Err(e) => failed("Could not load reviews", &e),
        },
        ApiCommand::Login { email, password } => match client.login(&email, &password).await {
            Ok(session) => ApiEvent::SessionStarted(session),
            Err(e) => failed("Login failed", &e),
        },
        ApiCommand::Register {
            name,
            email,
            password,
        } => match client.register(&name, &email, &password).await {
            Ok(message) => ApiEvent::Registered(message),
            Err(e) => failed("Registration failed", &e),
        },
        ApiCommand::Logout => {
            client.set_token(None);
            ApiEvent::SessionEnded
        }
        ApiCommand::CreateItem { draft } => {
            if dry_run {
                return Some(skipped("create item"));
            }
            match client.create_item(&draft).await {
                Ok(message) => done(message, false, true),
                Err(e) => failed("Could not create item", &e),
            }
        }
        ApiCommand::UpdateItem { id, draft } => {
            if dry_run {
                return Some(skipped("update item"));
            }
            match client.update_item(&id, &draft).await {
                Ok(message) => done(message, false, true),
                Err(e) => failed("Could not update item", &e),
            }
        }
        ApiCommand::DeleteItem { id } => {
            if dry_run {
                return Some(skipped("delete item"));
            }
            match client.delete_item(&id).await {
                Ok(message) => done(message, false, true),
                Err(e) => failed("Could not delete item", &e),
            }
        }
        ApiCommand::ProposeSwap { draft } => {
            if dry_run {
                return Some(skipped("propose swap"));
            }
            match client.propose_swap(&draft).await {
                Ok(message) => done(message, true, false),
                Err(e) => failed("Could not send proposal", &e),
            }
        }
        ApiCommand::SwapAction { swap_id, action } => {
            if dry_run {
                return Some(skipped(action.label()));
            }
            match client.swap_action(&swap_id, action).await {
                // Transitions can move items in or out of escrow, so the
                // catalog and inventory refresh along with the swaps.
                Ok(message) => done(message, true, true),
                Err(e) => failed("Swap action failed", &e),
            }
        }
        ApiCommand::SubmitReview { draft } => {
            if dry_run {
                return Some(skipped("submit review"));
            }
            match client.submit_review(&draft).await {
                Ok(message) => done(message, false, false),
                Err(e) => failed("Could not submit review", &e),
            }
        }
        ApiCommand::FileDispute { draft } => {
            if dry_run {
                return Some(skipped("file dispute"));
            }
            match client.file_dispute(&draft).await {
                Ok(message) => done(message, true, false),
                Err(e) => failed("Could not file dispute", &e),
            }
        }
    })
}

/// Success event with the refresh flags a mutation implies.
fn done(message: String, refresh_swaps: bool, refresh_items: bool) -> ApiEvent {
    ApiEvent::ActionDone {
        message,
        refresh_swaps,
        refresh_items,
    }
}

/// Dry-run stand-in for a mutation: logged, never sent.
fn skipped(what: &str) -> ApiEvent {
    tracing::info!(what, "dry run: mutation not sent");
    ApiEvent::ActionDone {
        message: format!("dry run: {what} skipped"),
        refresh_swaps: false,
        refresh_items: false,
    }
}

/// Failure event carrying the server's message where available.
fn failed(what: &str, e: &dyn std::fmt::Display) -> ApiEvent {
    tracing::warn!(error = %e, what, "api request failed");
    ApiEvent::Failed(format!("{what}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Session, UserSummary};

    fn session(name: &str) -> Session {
        Session {
            user: UserSummary {
                id: "me".into(),
                name: name.into(),
                email: "me@swap.example".into(),
            },
            token: "tok".into(),
        }
    }

    #[test]
    /// What: CLI overrides beat settings when building initial state
    ///
    /// - Input: Settings with one URL, args with another and a page size
    /// - Output: Args win; page size is floored at 1
    fn initial_state_overrides() {
        let settings = Settings {
            api_url: "https://settings.example/api".into(),
            page_size: 7,
            ..Default::default()
        };
        let args = Args {
            dry_run: true,
            log_level: "info".into(),
            api_url: Some("https://cli.example/api".into()),
            page_size: Some(0),
        };
        let app = initial_state(&settings, &args);
        assert_eq!(app.api_url, "https://cli.example/api");
        assert_eq!(app.pager.page_size, 1);
        assert!(app.dry_run);

        let args = Args {
            dry_run: false,
            log_level: "info".into(),
            api_url: None,
            page_size: None,
        };
        let app = initial_state(&settings, &args);
        assert_eq!(app.api_url, "https://settings.example/api");
        assert_eq!(app.pager.page_size, 7);
    }

    #[test]
    /// What: A started session queues the dashboard refetches
    ///
    /// - Input: SessionStarted while on the auth view
    /// - Output: Session set, view back to Browse, three fetches queued
    fn session_started_refetches() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut app = AppState::default();
        app.token_path = dir.path().join("token");
        app.view = View::Auth;
        apply_api_event(&mut app, ApiEvent::SessionStarted(session("Me")), &tx);
        assert!(app.session.is_some());
        assert_eq!(app.view, View::Browse);
        assert!(matches!(rx.try_recv(), Ok(ApiCommand::FetchMyItems)));
        assert!(matches!(rx.try_recv(), Ok(ApiCommand::FetchSwaps)));
        assert!(matches!(rx.try_recv(), Ok(ApiCommand::FetchReviews { .. })));
        assert_eq!(
            config::load_token(&app.token_path).as_deref(),
            Some("tok")
        );
    }

    #[test]
    /// What: Ending the session clears state and the token file
    ///
    /// - Input: SessionEnded after a sign-in
    /// - Output: Session data gone, token file removed
    fn session_ended_clears() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = AppState::default();
        app.token_path = dir.path().join("token");
        apply_api_event(&mut app, ApiEvent::SessionStarted(session("Me")), &tx);
        app.view = View::Profile;
        apply_api_event(&mut app, ApiEvent::SessionEnded, &tx);
        assert!(app.session.is_none());
        assert_eq!(app.view, View::Browse);
        assert!(config::load_token(&app.token_path).is_none());
    }

    #[test]
    /// What: Failures surface as an alert modal and stop the spinners
    ///
    /// - Input: A Failed event while a listings fetch is marked in flight
    /// - Output: Alert modal with the message; loading flags cleared
    fn failure_alerts() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = AppState::default();
        app.loading_listings = true;
        app.loading_swaps = true;
        apply_api_event(&mut app, ApiEvent::Failed("server returned 500".into()), &tx);
        assert!(!app.loading_listings);
        assert!(!app.loading_swaps);
        assert!(matches!(app.modal, Modal::Alert { .. }));
    }
}
