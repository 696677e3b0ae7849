//! Central `AppState` container shared by the event, networking, and UI layers.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Instant;

use lru::LruCache;
use ratatui::widgets::ListState;
use zeroize::Zeroizing;

use crate::state::modal::Modal;
use crate::state::types::{
    Focus, Listing, Review, Session, SortKey, SwapRecord, SwapTab, View,
};
use crate::logic::pager::Pager;

/// Capacity of the item-details LRU cache.
pub const DETAILS_CAPACITY: usize = 64;

/// Whether the auth form is logging in or registering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Sign in with existing credentials.
    #[default]
    Login,
    /// Create a new account, then sign in.
    Register,
}

/// Which auth form field receives typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthField {
    /// Display name (register only).
    Name,
    /// Account email.
    #[default]
    Email,
    /// Password.
    Password,
}

impl AuthField {
    /// Cycle focus to the next field for the given mode.
    #[must_use]
    pub const fn next(self, mode: AuthMode) -> Self {
        match (self, mode) {
            (Self::Name, _) => Self::Email,
            (Self::Email, _) => Self::Password,
            (Self::Password, AuthMode::Register) => Self::Name,
            (Self::Password, AuthMode::Login) => Self::Email,
        }
    }
}

/// Login/register form state.
///
/// The password buffer is wrapped in [`Zeroizing`] so its memory is wiped
/// when the form is dropped or replaced.
#[derive(Debug, Default)]
pub struct AuthForm {
    /// Current mode (login vs register).
    pub mode: AuthMode,
    /// Display name input (register only).
    pub name: String,
    /// Email input.
    pub email: String,
    /// Password input, zeroized on drop.
    pub password: Zeroizing<String>,
    /// Field currently focused.
    pub field: AuthField,
    /// Inline error from the last submit attempt.
    pub error: Option<String>,
}

/// Tabs of the My Items view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MyItemsTab {
    /// My inventory, with edit/delete.
    #[default]
    Inventory,
    /// Proposals I have sent, with their live status.
    Requests,
}

/// Global application state.
///
/// Mutated by input handlers and background-task results; rendered by the
/// UI every frame. Nothing in here is shared across threads: workers
/// communicate through channels and the event loop owns the only copy.
pub struct AppState {
    /// Active top-level view.
    pub view: View,
    /// Focused pane within the Browse view.
    pub focus: Focus,
    /// Active modal dialog, if any.
    pub modal: Modal,
    /// Authenticated session, when signed in.
    pub session: Option<Session>,

    // Catalog
    /// Free-text search input.
    pub input: String,
    /// Full listing set as last fetched (categories normalized).
    pub all_listings: Vec<Listing>,
    /// Derived view: filtered and sorted listings.
    pub results: Vec<Listing>,
    /// Index into `results` currently highlighted.
    pub selected: usize,
    /// List selection state for the results list.
    pub list_state: ListState,
    /// Active category filters (empty means all pass).
    pub category_filters: Vec<String>,
    /// Active status filter (empty means all pass).
    pub status_filter: String,
    /// Active sort order.
    pub sort_key: SortKey,
    /// Page state applied to `results` before rendering.
    pub pager: Pager,
    /// Cursor row within the sidebar when it has focus.
    pub sidebar_row: usize,
    /// Whether the initial listings fetch is still in flight.
    pub loading_listings: bool,
    /// Recently viewed item details, keyed by item id.
    pub details_cache: LruCache<String, Listing>,

    // Swap dashboard
    /// All swaps involving me, as last fetched.
    pub swaps: Vec<SwapRecord>,
    /// Active dashboard tab.
    pub swap_tab: SwapTab,
    /// Highlighted row within the active tab's bucket.
    pub swap_selected: usize,
    /// List selection state for the swap list.
    pub swap_state: ListState,
    /// Whether a swaps fetch is in flight.
    pub loading_swaps: bool,

    // My items
    /// My inventory as last fetched.
    pub my_items: Vec<Listing>,
    /// Active My Items tab.
    pub my_items_tab: MyItemsTab,
    /// Highlighted row in the inventory list.
    pub my_items_selected: usize,
    /// List selection state for the inventory list.
    pub my_items_state: ListState,

    // Profile
    /// Reviews received by the signed-in user.
    pub reviews: Vec<Review>,

    // Auth
    /// Login/register form.
    pub auth: AuthForm,
    /// Path where the bearer token is persisted.
    pub token_path: PathBuf,

    // Transient UI
    /// Toast message shown in the footer, if any.
    pub toast_message: Option<String>,
    /// Instant after which the toast is cleared.
    pub toast_expires_at: Option<Instant>,
    /// If `true`, remote mutations are logged but not sent.
    pub dry_run: bool,
    /// Remote API base URL in effect.
    pub api_url: String,
}

impl Default for AppState {
    fn default() -> Self {
        let cap = NonZeroUsize::new(DETAILS_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self {
            view: View::default(),
            focus: Focus::default(),
            modal: Modal::default(),
            session: None,
            input: String::new(),
            all_listings: Vec::new(),
            results: Vec::new(),
            selected: 0,
            list_state: ListState::default(),
            category_filters: Vec::new(),
            // The home page opens on available items, like the original.
            status_filter: "available".to_string(),
            sort_key: SortKey::Newest,
            pager: Pager::default(),
            sidebar_row: 0,
            loading_listings: true,
            details_cache: LruCache::new(cap),
            swaps: Vec::new(),
            swap_tab: SwapTab::default(),
            swap_selected: 0,
            swap_state: ListState::default(),
            loading_swaps: false,
            my_items: Vec::new(),
            my_items_tab: MyItemsTab::default(),
            my_items_selected: 0,
            my_items_state: ListState::default(),
            reviews: Vec::new(),
            auth: AuthForm::default(),
            token_path: crate::util::config::token_path(),
            toast_message: None,
            toast_expires_at: None,
            dry_run: false,
            api_url: crate::util::config::DEFAULT_API_URL.to_string(),
        }
    }
}

impl AppState {
    /// Id of the signed-in user, or empty when signed out.
    #[must_use]
    pub fn user_id(&self) -> &str {
        self.session.as_ref().map_or("", |s| s.user.id.as_str())
    }

    /// Show a footer toast for ten seconds.
    pub fn toast(&mut self, message: impl Into<String>) {
        self.toast_message = Some(message.into());
        self.toast_expires_at = Some(Instant::now() + std::time::Duration::from_secs(10));
    }

    /// Clear an expired toast; called from the tick handler.
    pub fn expire_toast(&mut self) {
        if let Some(deadline) = self.toast_expires_at
            && Instant::now() >= deadline
        {
            self.toast_message = None;
            self.toast_expires_at = None;
        }
    }
}
