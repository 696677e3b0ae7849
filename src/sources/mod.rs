//! Typed client for the remote marketplace REST API.
//!
//! One [`ApiClient`] instance is shared by the background workers. Every
//! endpoint wrapper returns the module-wide boxed-error `Result`; when the
//! server replies with an error body, the wrapper surfaces the server's
//! `message` field so the UI can show something better than a status code.

pub mod auth;
pub mod disputes;
pub mod listings;
pub mod reviews;
pub mod swaps;

use serde_json::Value;

use crate::state::{
    DisputeDraft, ItemDraft, Listing, ProposeDraft, Review, ReviewDraft, Session, SwapAction,
    SwapRecord,
};

/// Work requested from the API worker task.
///
/// Input handlers stay synchronous by pushing one of these onto a channel;
/// the worker owns the [`ApiClient`] and answers with [`ApiEvent`]s.
#[derive(Debug, Clone)]
pub enum ApiCommand {
    /// Refetch the public catalog.
    FetchListings,
    /// Refetch the signed-in user's inventory.
    FetchMyItems,
    /// Refetch all swaps involving the signed-in user.
    FetchSwaps,
    /// Fetch full details for one listing (details pane cache miss).
    FetchItem {
        /// Listing id.
        id: String,
    },
    /// Refetch reviews received by a user.
    FetchReviews {
        /// User whose reviews to fetch.
        user_id: String,
    },
    /// Exchange credentials for a session.
    Login {
        /// Account email.
        email: String,
        /// Plaintext password (hashed server-side).
        password: String,
    },
    /// Create an account, then prompt for login.
    Register {
        /// Display name.
        name: String,
        /// Account email.
        email: String,
        /// Plaintext password.
        password: String,
    },
    /// Drop the session and forget the token.
    Logout,
    /// Create an item from a validated draft.
    CreateItem {
        /// The draft to submit.
        draft: ItemDraft,
    },
    /// Update an existing item.
    UpdateItem {
        /// Item id.
        id: String,
        /// The draft to submit.
        draft: ItemDraft,
    },
    /// Delete an item (already confirmed by the user).
    DeleteItem {
        /// Item id.
        id: String,
    },
    /// Send a swap proposal.
    ProposeSwap {
        /// The proposal draft.
        draft: ProposeDraft,
    },
    /// Post a swap lifecycle transition.
    SwapAction {
        /// Target swap.
        swap_id: String,
        /// Transition to request.
        action: SwapAction,
    },
    /// Submit a partner review.
    SubmitReview {
        /// The review draft.
        draft: ReviewDraft,
    },
    /// File a dispute.
    FileDispute {
        /// The dispute draft.
        draft: DisputeDraft,
    },
}

/// Results and notifications flowing back from the API worker.
#[derive(Debug, Clone)]
pub enum ApiEvent {
    /// Fresh public catalog (categories normalized).
    Listings(Vec<Listing>),
    /// Fresh inventory for the signed-in user.
    MyItems(Vec<Listing>),
    /// Fresh swap set.
    Swaps(Vec<SwapRecord>),
    /// Full record for one listing, destined for the details cache.
    ItemDetails(Box<Listing>),
    /// Fresh received-review list.
    Reviews(Vec<Review>),
    /// A login or token resume succeeded.
    SessionStarted(Session),
    /// The session ended (logout or rejected token).
    SessionEnded,
    /// Registration succeeded; the user should now log in.
    Registered(String),
    /// A mutation succeeded; message plus which data to refetch.
    ActionDone {
        /// Server confirmation message.
        message: String,
        /// Refetch swaps afterwards.
        refresh_swaps: bool,
        /// Refetch items/inventory afterwards.
        refresh_items: bool,
    },
    /// A request failed; message for the alert modal.
    Failed(String),
}

/// Boxed-error result used across the networking layer.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// HTTP client plus base URL and optional bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Shared reqwest client (connection pooling).
    http: reqwest::Client,
    /// API base URL without a trailing slash.
    base_url: String,
    /// Bearer token attached to authenticated requests.
    token: Option<String>,
}

impl ApiClient {
    /// Build a client for `base_url`, optionally already authenticated.
    #[must_use]
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Replace the bearer token after login, or drop it on logout.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    /// Whether a token is currently attached.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Absolute URL for an API path.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach the bearer token when one is present.
    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(t) => req.bearer_auth(t),
            None => req,
        }
    }

    /// What: Perform a GET and parse the JSON body.
    ///
    /// Output: The parsed body, or an error carrying the server's
    /// `message` when the status is not 2xx.
    pub(crate) async fn get_json(&self, path: &str) -> Result<Value> {
        let resp = self.authorize(self.http.get(self.url(path))).send().await?;
        Self::read_json(resp).await
    }

    /// POST a JSON body and parse the JSON response.
    pub(crate) async fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        let resp = self
            .authorize(self.http.post(self.url(path)))
            .json(body)
            .send()
            .await?;
        Self::read_json(resp).await
    }

    /// POST without a body (swap transition endpoints).
    pub(crate) async fn post_empty(&self, path: &str) -> Result<Value> {
        let resp = self.authorize(self.http.post(self.url(path))).send().await?;
        Self::read_json(resp).await
    }

    /// PUT a JSON body and parse the JSON response.
    pub(crate) async fn put_json(&self, path: &str, body: &Value) -> Result<Value> {
        let resp = self
            .authorize(self.http.put(self.url(path)))
            .json(body)
            .send()
            .await?;
        Self::read_json(resp).await
    }

    /// DELETE and parse the JSON response.
    pub(crate) async fn delete_json(&self, path: &str) -> Result<Value> {
        let resp = self
            .authorize(self.http.delete(self.url(path)))
            .send()
            .await?;
        Self::read_json(resp).await
    }

    /// What: Turn a response into JSON, mapping error statuses to the
    /// server's `message` field when it provides one.
    async fn read_json(resp: reqwest::Response) -> Result<Value> {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        let value: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
        if status.is_success() {
            return Ok(value);
        }
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| format!("server returned {status}"), ToString::to_string);
        Err(message.into())
    }
}

/// Pull the `message` string out of a server response, with a fallback.
pub(crate) fn response_message(value: &Value, fallback: &str) -> String {
    value
        .get("message")
        .and_then(Value::as_str)
        .map_or_else(|| fallback.to_string(), ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: URL joining tolerates stray slashes on either side
    ///
    /// - Input: Base with and without trailing slash; path with and
    ///   without leading slash
    /// - Output: Single slash between base and path
    fn url_joining() {
        let c = ApiClient::new("http://localhost:5000/api/", None);
        assert_eq!(c.url("/items"), "http://localhost:5000/api/items");
        assert_eq!(c.url("items"), "http://localhost:5000/api/items");
    }

    #[test]
    /// What: Response message extraction falls back when absent
    ///
    /// - Input: Body with and without a message field
    /// - Output: The field, or the fallback
    fn message_extraction() {
        let v: Value = serde_json::json!({"message": "Swap accepted"});
        assert_eq!(response_message(&v, "done"), "Swap accepted");
        assert_eq!(response_message(&Value::Null, "done"), "done");
    }
}
