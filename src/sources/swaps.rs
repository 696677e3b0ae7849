//! Swap endpoints: fetch, propose, and drive lifecycle transitions.

use serde_json::Value;

use crate::state::{ProposeDraft, SwapAction, SwapRecord};

use super::{ApiClient, Result};

/// Serialize a proposal draft into the server's swap payload.
///
/// Optional pieces follow the original client: `itemOfferedId` only when
/// an item is offered, `proposedAmount` only when positive.
fn proposal_body(draft: &ProposeDraft) -> Value {
    let mut body = serde_json::json!({
        "itemRequestedId": draft.item_requested_id,
        "toUserId": draft.item_owner_id,
        "startDate": draft.start_date,
        "endDate": draft.end_date,
    });
    if let Some(idx) = draft.offered_index
        && let Some(item) = draft.my_items.get(idx)
    {
        body["itemOfferedId"] = Value::String(item.id.clone());
    }
    let amount = draft.deposit_amount();
    if amount > 0.0
        && let Some(n) = serde_json::Number::from_f64(amount)
    {
        body["proposedAmount"] = Value::Number(n);
    }
    body
}

impl ApiClient {
    /// Fetch every swap involving the signed-in user.
    pub async fn fetch_my_swaps(&self) -> Result<Vec<SwapRecord>> {
        let v = self.get_json("/swaps/my-swaps").await?;
        let swaps = v.get("swaps").cloned().unwrap_or(Value::Array(Vec::new()));
        Ok(serde_json::from_value(swaps)?)
    }

    /// Send a validated swap proposal.
    pub async fn propose_swap(&self, draft: &ProposeDraft) -> Result<String> {
        draft.validate()?;
        let v = self.post_json("/swaps", &proposal_body(draft)).await?;
        Ok(super::response_message(&v, "Swap request sent."))
    }

    /// Post a lifecycle transition on a swap.
    pub async fn swap_action(&self, swap_id: &str, action: SwapAction) -> Result<String> {
        let path = format!("/swaps/{swap_id}/{}", action.endpoint_segment());
        let v = self.post_empty(&path).await?;
        Ok(super::response_message(
            &v,
            &format!("Swap {} done.", action.label()),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Listing;

    #[test]
    /// What: Proposal payload includes optional fields only when set
    ///
    /// - Input: Draft with a deposit only; then with an offered item
    /// - Output: `proposedAmount` xor `itemOfferedId` appear accordingly
    fn proposal_body_optional_fields() {
        let mut draft = ProposeDraft {
            item_requested_id: "req1".into(),
            item_owner_id: "owner1".into(),
            deposit_input: "250".into(),
            start_date: "2024-06-01".into(),
            end_date: "2024-06-08".into(),
            ..Default::default()
        };
        let body = proposal_body(&draft);
        assert_eq!(body["proposedAmount"], 250.0);
        assert!(body.get("itemOfferedId").is_none());
        assert_eq!(body["toUserId"], "owner1");

        draft.deposit_input.clear();
        draft.my_items = vec![Listing {
            id: "mine1".into(),
            name: "Ladder".into(),
            ..Default::default()
        }];
        draft.offered_index = Some(0);
        let body = proposal_body(&draft);
        assert_eq!(body["itemOfferedId"], "mine1");
        assert!(body.get("proposedAmount").is_none());
    }

    #[test]
    /// What: Swap records deserialize from the populated server shape
    ///
    /// - Input: A my-swaps entry with embedded users and items
    /// - Output: Nested summaries and snake_case status parse
    fn swap_record_wire_shape() {
        let json = serde_json::json!({
            "_id": "s1",
            "fromUserId": {"_id": "u1", "name": "Alice", "email": "a@x"},
            "toUserId": {"_id": "u2", "name": "Bob", "email": "b@x"},
            "itemRequestedId": {"_id": "i1", "name": "Drill", "images": [], "estimatedValue": 500},
            "itemOfferedId": null,
            "depositAmount": 100,
            "startDate": "2024-06-01",
            "endDate": "2024-06-08",
            "status": "in_escrow"
        });
        let rec: SwapRecord = serde_json::from_value(json).expect("parse");
        assert_eq!(rec.from_user.name, "Alice");
        assert!(rec.item_offered.is_none());
        assert_eq!(rec.status, crate::state::SwapStatus::InEscrow);
    }
}
