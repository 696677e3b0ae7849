//! Application state: value types, modal dialogs, and the central
//! [`AppState`] container.

mod app_state;
mod modal;
mod types;

pub use app_state::{AppState, AuthField, AuthForm, AuthMode, DETAILS_CAPACITY, MyItemsTab};
pub use modal::{
    DisputeDraft, ItemField, ItemForm, Modal, ProposeDraft, ProposeField, ReviewDraft,
};
pub use types::{
    AVAILABLE_CATEGORIES, Focus, ItemDraft, Listing, OTHER_CATEGORY, PendingAction, Review,
    Session, SortKey, SwapAction, SwapItemSummary, SwapRecord, SwapStatus, SwapTab, UserSummary,
    View,
};
