//! Core value types used by Swapsea state.

/// A single swappable item record as rendered in the catalog.
///
/// Listings arrive from the remote marketplace API and are read-only to the
/// client; every derived view (filtered, sorted, paginated) is a fresh
/// sequence. Optional fields degrade to documented defaults rather than
/// failing: a missing `estimated_value` counts as 0, a missing or
/// unparsable `date` sorts as epoch 0, and a missing `category` is
/// normalized to [`OTHER_CATEGORY`] by the fetch path before a listing
/// reaches any filtering code.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Listing {
    /// Opaque unique identifier assigned by the server.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name. The only field the text filter searches.
    pub name: String,
    /// Longer free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Category name; `None` until normalized by the fetch path.
    #[serde(default)]
    pub category: Option<String>,
    /// Owner-estimated value in whole currency units.
    #[serde(rename = "estimatedValue", default)]
    pub estimated_value: Option<f64>,
    /// Physical condition (e.g., "used", "like new").
    #[serde(default)]
    pub condition: Option<String>,
    /// Availability status (e.g., "available", "swapped"); matched
    /// case-insensitively.
    #[serde(default)]
    pub status: String,
    /// ISO-like creation timestamp as reported by the server.
    #[serde(default)]
    pub date: Option<String>,
    /// Image references (URLs or encoded payloads), first is the cover.
    #[serde(default)]
    pub images: Vec<String>,
    /// Owning user id, when the server includes it.
    #[serde(default)]
    pub owner: Option<String>,
}

/// Sentinel category assigned to listings the server left uncategorized.
pub const OTHER_CATEGORY: &str = "Other";

/// Categories offered by the sidebar filter checkboxes.
pub const AVAILABLE_CATEGORIES: [&str; 6] = [
    "Electronics",
    "Gadgets",
    "Home",
    "Apparel",
    "Books",
    OTHER_CATEGORY,
];

/// Sort order applied to the catalog after filtering.
///
/// The wire/config representation is an open string; parsing is permissive
/// and unrecognized keys degrade to [`SortKey::Unsorted`], which preserves
/// the filtered sequence's relative order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Descending by listing date (most recent first).
    #[default]
    Newest,
    /// Ascending by listing date.
    Oldest,
    /// Descending by estimated value.
    ValueHigh,
    /// Ascending by estimated value.
    ValueLow,
    /// Ascending case-insensitive name order.
    NameAsc,
    /// Passthrough: keep the filtered order untouched.
    Unsorted,
}

impl SortKey {
    /// Return the string key used in settings files for this sort order.
    #[must_use]
    pub const fn as_config_key(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::ValueHigh => "value_high",
            Self::ValueLow => "value_low",
            Self::NameAsc => "name_asc",
            Self::Unsorted => "unsorted",
        }
    }

    /// Parse a sort key from its settings string (case-insensitive).
    ///
    /// Unknown values map to [`SortKey::Unsorted`] rather than an error;
    /// the engine treats that as "leave the filtered order alone".
    #[must_use]
    pub fn from_config_key(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "newest" => Self::Newest,
            "oldest" => Self::Oldest,
            "value_high" => Self::ValueHigh,
            "value_low" => Self::ValueLow,
            "name_asc" => Self::NameAsc,
            _ => Self::Unsorted,
        }
    }

    /// Cycle to the next key in sidebar order, skipping `Unsorted`.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Newest => Self::Oldest,
            Self::Oldest => Self::ValueHigh,
            Self::ValueHigh => Self::ValueLow,
            Self::ValueLow => Self::NameAsc,
            Self::NameAsc | Self::Unsorted => Self::Newest,
        }
    }

    /// Human label shown in the sidebar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest first",
            Self::Oldest => "Oldest first",
            Self::ValueHigh => "Value: high to low",
            Self::ValueLow => "Value: low to high",
            Self::NameAsc => "Name A-Z",
            Self::Unsorted => "Unsorted",
        }
    }
}

/// Compact user record as embedded in swaps and the session.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct UserSummary {
    /// Server-assigned user id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Account email.
    #[serde(default)]
    pub email: String,
}

/// Authenticated session: the signed-in user plus their bearer token.
#[derive(Clone, Debug)]
pub struct Session {
    /// The signed-in user as reported by `/auth/me`.
    pub user: UserSummary,
    /// Bearer token attached to authenticated requests.
    pub token: String,
}

/// Lifecycle status of a swap, as the server reports it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwapStatus {
    /// Proposal sent, awaiting the owner's decision.
    Proposed,
    /// Owner accepted; deposit not yet secured.
    Accepted,
    /// Deposit or offered item held in escrow.
    InEscrow,
    /// Requested item handed over to the proposer.
    PickedUp,
    /// Item returned to the owner, awaiting finalization.
    Returned,
    /// Completed normally.
    Closed,
    /// Under dispute resolution.
    Disputed,
    /// Declined or withdrawn.
    Cancelled,
}

impl SwapStatus {
    /// Status label with wire underscores replaced for display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Proposed => "proposed",
            Self::Accepted => "accepted",
            Self::InEscrow => "in escrow",
            Self::PickedUp => "picked up",
            Self::Returned => "returned",
            Self::Closed => "closed",
            Self::Disputed => "disputed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Server-side transition a user can request on a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapAction {
    /// Owner accepts an incoming proposal.
    Accept,
    /// Either party declines or withdraws while still pending.
    Cancel,
    /// Owner confirms the item was picked up.
    ConfirmPickup,
    /// Proposer confirms the item was returned.
    ConfirmReturn,
    /// Finalize a returned swap.
    Finish,
}

impl SwapAction {
    /// Path segment of `POST /swaps/{id}/{segment}` for this action.
    ///
    /// The server kept the original camelCase route names.
    #[must_use]
    pub const fn endpoint_segment(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Cancel => "cancel",
            Self::ConfirmPickup => "confirmPickup",
            Self::ConfirmReturn => "confirmReturn",
            Self::Finish => "finish",
        }
    }

    /// Short label for confirmation prompts and buttons.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Accept => "accept",
            Self::Cancel => "cancel",
            Self::ConfirmPickup => "confirm pickup",
            Self::ConfirmReturn => "confirm return",
            Self::Finish => "finalize",
        }
    }
}

/// An action deferred behind a confirmation modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Post a swap transition.
    Swap {
        /// Target swap id.
        swap_id: String,
        /// Transition to request.
        action: SwapAction,
    },
    /// Delete one of my items.
    DeleteItem {
        /// Target item id.
        item_id: String,
    },
    /// Drop the session and forget the stored token.
    Logout,
}

/// Item fields embedded inside a swap record.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct SwapItemSummary {
    /// Item id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Item name.
    #[serde(default)]
    pub name: String,
    /// Cover images.
    #[serde(default)]
    pub images: Vec<String>,
    /// Estimated value at proposal time.
    #[serde(rename = "estimatedValue", default)]
    pub estimated_value: f64,
}

/// One swap negotiation between two users.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SwapRecord {
    /// Swap id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Proposing user.
    #[serde(rename = "fromUserId")]
    pub from_user: UserSummary,
    /// Item owner the proposal targets.
    #[serde(rename = "toUserId")]
    pub to_user: UserSummary,
    /// The item being requested.
    #[serde(rename = "itemRequestedId")]
    pub item_requested: SwapItemSummary,
    /// Item offered in exchange, when the proposer offered one.
    #[serde(rename = "itemOfferedId", default)]
    pub item_offered: Option<SwapItemSummary>,
    /// Cash deposit offered instead of (or alongside) an item.
    #[serde(rename = "depositAmount", default)]
    pub deposit_amount: f64,
    /// Rental window start.
    #[serde(rename = "startDate", default)]
    pub start_date: String,
    /// Rental window end.
    #[serde(rename = "endDate", default)]
    pub end_date: String,
    /// Current lifecycle status.
    pub status: SwapStatus,
}

/// A review left for a swap partner after a closed swap.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Review {
    /// Star rating, 1 to 5.
    pub rating: u8,
    /// Free-form comment.
    #[serde(default)]
    pub comment: String,
}

/// Form payload for creating or editing an item.
#[derive(Clone, Debug, Default)]
pub struct ItemDraft {
    /// Item name (required).
    pub name: String,
    /// Description (required).
    pub description: String,
    /// Category (required).
    pub category: String,
    /// Estimated value; must be positive to submit.
    pub estimated_value: f64,
    /// Condition; the form defaults to "used".
    pub condition: String,
    /// Encoded image payloads; at least one required.
    pub images: Vec<String>,
}

impl ItemDraft {
    /// Validate the draft the way the original submit handler did.
    ///
    /// Output: `Err(message)` naming the first violated rule, `Ok(())`
    /// when the draft is submittable.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty()
            || self.description.trim().is_empty()
            || self.category.trim().is_empty()
        {
            return Err("Name, description and category are required.");
        }
        if self.estimated_value <= 0.0 {
            return Err("Estimated value must be greater than zero.");
        }
        if self.images.is_empty() {
            return Err("Add at least one image.");
        }
        Ok(())
    }
}

/// Which top-level screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Catalog browsing with the filter sidebar.
    #[default]
    Browse,
    /// Swap dashboard (incoming/outgoing/active/history tabs).
    Swaps,
    /// The signed-in user's inventory and outgoing requests.
    MyItems,
    /// Session info and received reviews.
    Profile,
    /// Login / register form.
    Auth,
}

/// Which pane inside the Browse view owns keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The free-text search input.
    #[default]
    Search,
    /// The filter sidebar (categories, status, sort).
    Sidebar,
    /// The listing results list.
    Results,
}

/// Tabs of the swap dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SwapTab {
    /// Proposals addressed to me, still pending.
    #[default]
    Incoming,
    /// Proposals I sent, still pending.
    Outgoing,
    /// Swaps in flight (escrow/picked up/returned).
    Active,
    /// Finished swaps (closed/cancelled/disputed).
    History,
}

impl SwapTab {
    /// Tab label as shown in the dashboard sidebar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Incoming => "Incoming Proposals",
            Self::Outgoing => "Proposals Sent",
            Self::Active => "Active Swaps",
            Self::History => "History",
        }
    }

    /// Cycle to the next tab.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Incoming => Self::Outgoing,
            Self::Outgoing => Self::Active,
            Self::Active => Self::History,
            Self::History => Self::Incoming,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Sort keys round-trip through their config strings
    ///
    /// - Input: Every closed variant, plus junk strings
    /// - Output: Known keys round-trip; junk parses to Unsorted
    fn sort_key_config_round_trip_and_fallback() {
        for key in [
            SortKey::Newest,
            SortKey::Oldest,
            SortKey::ValueHigh,
            SortKey::ValueLow,
            SortKey::NameAsc,
        ] {
            assert_eq!(SortKey::from_config_key(key.as_config_key()), key);
        }
        assert_eq!(SortKey::from_config_key("price_desc"), SortKey::Unsorted);
        assert_eq!(SortKey::from_config_key(""), SortKey::Unsorted);
        assert_eq!(SortKey::from_config_key("  NEWEST "), SortKey::Newest);
    }

    #[test]
    /// What: Swap status deserializes from the server's snake_case strings
    ///
    /// - Input: JSON strings as the API sends them
    /// - Output: Matching enum variants; labels drop underscores
    fn swap_status_wire_names() {
        let s: SwapStatus = serde_json::from_str("\"in_escrow\"").expect("parse");
        assert_eq!(s, SwapStatus::InEscrow);
        assert_eq!(s.label(), "in escrow");
        let s: SwapStatus = serde_json::from_str("\"picked_up\"").expect("parse");
        assert_eq!(s, SwapStatus::PickedUp);
    }

    #[test]
    /// What: Item draft validation mirrors the original form rules
    ///
    /// - Input: Drafts missing one requirement at a time
    /// - Output: First violated rule reported; complete draft passes
    fn item_draft_validation() {
        let mut draft = ItemDraft {
            name: "Drill".into(),
            description: "Cordless".into(),
            category: "Home".into(),
            estimated_value: 500.0,
            condition: "used".into(),
            images: vec!["img".into()],
        };
        assert!(draft.validate().is_ok());
        draft.estimated_value = 0.0;
        assert!(draft.validate().is_err());
        draft.estimated_value = 500.0;
        draft.images.clear();
        assert!(draft.validate().is_err());
    }

    #[test]
    /// What: Listing deserializes from the API's camelCase JSON with defaults
    ///
    /// - Input: Minimal server payload
    /// - Output: Optional fields default; id maps from `_id`
    fn listing_wire_defaults() {
        let json = r#"{"_id":"a1","name":"Drill","status":"available"}"#;
        let l: Listing = serde_json::from_str(json).expect("parse");
        assert_eq!(l.id, "a1");
        assert!(l.category.is_none());
        assert!(l.estimated_value.is_none());
        assert!(l.images.is_empty());
    }
}
