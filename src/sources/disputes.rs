//! Dispute filing against an in-flight swap.

use crate::state::DisputeDraft;

use super::{ApiClient, Result};

impl ApiClient {
    /// What: File a dispute with evidence strings.
    ///
    /// Inputs:
    /// - `draft`: Validated dispute form; evidence is the image payload
    ///   and/or description, at least one required
    ///
    /// Output:
    /// - The server's confirmation message.
    pub async fn file_dispute(&self, draft: &DisputeDraft) -> Result<String> {
        draft.validate()?;
        let body = serde_json::json!({ "evidence": draft.evidence() });
        let v = self
            .post_json(&format!("/disputes/{}", draft.swap_id), &body)
            .await?;
        Ok(super::response_message(&v, "Dispute filed."))
    }
}
