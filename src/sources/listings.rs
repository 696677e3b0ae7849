//! Item endpoints: the public catalog and the signed-in user's inventory.

use serde_json::Value;

use crate::state::{ItemDraft, Listing, OTHER_CATEGORY};

use super::{ApiClient, Result};

/// What: Normalize a fetched listing batch before it reaches any filter.
///
/// Inputs:
/// - `listings`: Listings as deserialized from the wire
///
/// Output:
/// - The same listings with every missing category replaced by the
///   `"Other"` sentinel, matching the original fetch path.
#[must_use]
pub fn normalize(mut listings: Vec<Listing>) -> Vec<Listing> {
    for l in &mut listings {
        if l.category.as_deref().is_none_or(str::is_empty) {
            l.category = Some(OTHER_CATEGORY.to_string());
        }
    }
    listings
}

/// Serialize a draft into the item payload the server expects.
fn draft_body(draft: &ItemDraft) -> Value {
    serde_json::json!({
        "name": draft.name,
        "description": draft.description,
        "category": draft.category,
        "estimatedValue": draft.estimated_value,
        "condition": draft.condition,
        "images": draft.images,
    })
}

impl ApiClient {
    /// Fetch the full public catalog, categories normalized.
    pub async fn fetch_listings(&self) -> Result<Vec<Listing>> {
        let v = self.get_json("/items").await?;
        let items = v.get("items").cloned().unwrap_or(Value::Array(Vec::new()));
        let listings: Vec<Listing> = serde_json::from_value(items)?;
        Ok(normalize(listings))
    }

    /// Fetch the signed-in user's inventory.
    pub async fn fetch_my_items(&self) -> Result<Vec<Listing>> {
        let v = self.get_json("/items/my-items").await?;
        let items = v
            .get("myItems")
            .cloned()
            .unwrap_or(Value::Array(Vec::new()));
        let listings: Vec<Listing> = serde_json::from_value(items)?;
        Ok(normalize(listings))
    }

    /// Fetch one item by id.
    pub async fn fetch_item(&self, id: &str) -> Result<Listing> {
        let v = self.get_json(&format!("/items/{id}")).await?;
        let item = v.get("item").cloned().ok_or("item not found")?;
        Ok(serde_json::from_value(item)?)
    }

    /// Create an item from a validated draft.
    pub async fn create_item(&self, draft: &ItemDraft) -> Result<String> {
        draft.validate()?;
        let v = self.post_json("/items", &draft_body(draft)).await?;
        Ok(super::response_message(&v, "Item created."))
    }

    /// Update an existing item from a validated draft.
    pub async fn update_item(&self, id: &str, draft: &ItemDraft) -> Result<String> {
        draft.validate()?;
        let v = self
            .put_json(&format!("/items/{id}"), &draft_body(draft))
            .await?;
        Ok(super::response_message(&v, "Item updated."))
    }

    /// Delete an item. Irreversible, so callers confirm first.
    pub async fn delete_item(&self, id: &str) -> Result<String> {
        let v = self.delete_json(&format!("/items/{id}")).await?;
        Ok(super::response_message(&v, "Item deleted."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Normalization assigns the sentinel category only where missing
    ///
    /// - Input: Listings with absent, empty, and present categories
    /// - Output: Absent and empty become "Other"; present untouched
    fn normalize_fills_other() {
        let items = vec![
            Listing {
                id: "a".into(),
                name: "Anvil".into(),
                ..Default::default()
            },
            Listing {
                id: "b".into(),
                name: "Book".into(),
                category: Some(String::new()),
                ..Default::default()
            },
            Listing {
                id: "c".into(),
                name: "Cable".into(),
                category: Some("Electronics".into()),
                ..Default::default()
            },
        ];
        let out = normalize(items);
        assert_eq!(out[0].category.as_deref(), Some(OTHER_CATEGORY));
        assert_eq!(out[1].category.as_deref(), Some(OTHER_CATEGORY));
        assert_eq!(out[2].category.as_deref(), Some("Electronics"));
    }

    #[test]
    /// What: Draft serialization uses the server's camelCase field names
    ///
    /// - Input: A complete draft
    /// - Output: `estimatedValue` present; values carried through
    fn draft_body_field_names() {
        let draft = ItemDraft {
            name: "Drill".into(),
            description: "Cordless".into(),
            category: "Home".into(),
            estimated_value: 500.0,
            condition: "used".into(),
            images: vec!["img1".into()],
        };
        let body = draft_body(&draft);
        assert_eq!(body["estimatedValue"], 500.0);
        assert_eq!(body["condition"], "used");
        assert_eq!(body["images"].as_array().map(Vec::len), Some(1));
    }
}
