//! Review endpoints: submit after a closed swap, list received reviews.

use serde_json::Value;

use crate::state::{Review, ReviewDraft};

use super::{ApiClient, Result};

impl ApiClient {
    /// What: Submit a partner review for a closed swap.
    ///
    /// Inputs:
    /// - `draft`: Review form contents; the rating is clamped to 1..=5
    ///   before hitting the wire
    pub async fn submit_review(&self, draft: &ReviewDraft) -> Result<String> {
        let body = serde_json::json!({
            "swapId": draft.swap_id,
            "toUserId": draft.to_user_id,
            "rating": draft.rating.clamp(1, 5),
            "comment": draft.comment,
        });
        let v = self.post_json("/review", &body).await?;
        Ok(super::response_message(&v, "Review submitted."))
    }

    /// Fetch reviews received by a user. The server returns a bare array.
    pub async fn fetch_reviews_for(&self, user_id: &str) -> Result<Vec<Review>> {
        let v = self.get_json(&format!("/review/{user_id}")).await?;
        if v.is_null() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_value::<Vec<Review>>(v).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use crate::state::Review;

    #[test]
    /// What: Reviews deserialize from the bare array the server returns
    ///
    /// - Input: JSON array with and without comments
    /// - Output: Ratings carried; missing comments default empty
    fn review_array_shape() {
        let json = serde_json::json!([
            {"rating": 5, "comment": "Great swap partner"},
            {"rating": 3}
        ]);
        let reviews: Vec<Review> = serde_json::from_value(json).expect("parse");
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].rating, 5);
        assert!(reviews[1].comment.is_empty());
    }
}
