//! Modal dialog state for the UI.

use crate::state::types::{ItemDraft, Listing};

/// Which field of the propose-swap form currently receives typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProposeField {
    /// Selection among my available items to offer.
    #[default]
    OfferedItem,
    /// Cash deposit amount.
    Deposit,
    /// Rental window start date.
    StartDate,
    /// Rental window end date.
    EndDate,
}

impl ProposeField {
    /// Cycle focus to the next field.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::OfferedItem => Self::Deposit,
            Self::Deposit => Self::StartDate,
            Self::StartDate => Self::EndDate,
            Self::EndDate => Self::OfferedItem,
        }
    }
}

/// Draft of a swap proposal being assembled in the propose modal.
///
/// Mirrors the original form: the proposer must either select one of their
/// own items to offer or enter a positive deposit amount; dates are free
/// text handed to the server untouched.
#[derive(Debug, Clone, Default)]
pub struct ProposeDraft {
    /// Id of the listing being requested.
    pub item_requested_id: String,
    /// Owner of the requested listing (proposal target).
    pub item_owner_id: String,
    /// My available items to pick an offer from.
    pub my_items: Vec<Listing>,
    /// Index into `my_items` of the selected offer, if any.
    pub offered_index: Option<usize>,
    /// Deposit amount text as typed.
    pub deposit_input: String,
    /// Start date text as typed.
    pub start_date: String,
    /// End date text as typed.
    pub end_date: String,
    /// Field currently focused.
    pub field: ProposeField,
}

impl ProposeDraft {
    /// Parse the deposit input, treating blank or junk as zero.
    #[must_use]
    pub fn deposit_amount(&self) -> f64 {
        self.deposit_input.trim().parse::<f64>().unwrap_or(0.0)
    }

    /// Check the original submit rule: an offered item or a positive deposit.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.offered_index.is_none() && self.deposit_amount() <= 0.0 {
            return Err("Select an item to offer OR propose a deposit amount.");
        }
        Ok(())
    }
}

/// Draft of a partner review being written in the review modal.
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    /// Swap the review refers to.
    pub swap_id: String,
    /// User being reviewed.
    pub to_user_id: String,
    /// Star rating, clamped to 1..=5.
    pub rating: u8,
    /// Comment text as typed.
    pub comment: String,
}

impl Default for ReviewDraft {
    fn default() -> Self {
        Self {
            swap_id: String::new(),
            to_user_id: String::new(),
            // The original form preselects five stars.
            rating: 5,
            comment: String::new(),
        }
    }
}

/// Draft of a dispute filing.
///
/// Evidence is a list of free strings; the original client pushed an
/// encoded image and/or a description and required at least one of them.
#[derive(Debug, Clone, Default)]
pub struct DisputeDraft {
    /// Swap under dispute.
    pub swap_id: String,
    /// Encoded image payload, when attached.
    pub image: Option<String>,
    /// Free-text description of the problem.
    pub description: String,
}

impl DisputeDraft {
    /// Assemble the evidence array the API expects.
    #[must_use]
    pub fn evidence(&self) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(img) = &self.image
            && !img.is_empty()
        {
            out.push(img.clone());
        }
        if !self.description.trim().is_empty() {
            out.push(self.description.clone());
        }
        out
    }

    /// Require an image, a description, or both.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.evidence().is_empty() {
            return Err("Provide an image, a description, or both as evidence.");
        }
        Ok(())
    }
}

/// Which field of the item form currently receives typed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemField {
    /// Item name.
    #[default]
    Name,
    /// Description.
    Description,
    /// Category.
    Category,
    /// Estimated value.
    Value,
    /// Condition.
    Condition,
    /// Image reference being appended.
    Image,
}

impl ItemField {
    /// Cycle focus to the next field.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Name => Self::Description,
            Self::Description => Self::Category,
            Self::Category => Self::Value,
            Self::Value => Self::Condition,
            Self::Condition => Self::Image,
            Self::Image => Self::Name,
        }
    }
}

/// Item create/edit form state hosted by the item modal.
#[derive(Debug, Clone, Default)]
pub struct ItemForm {
    /// Existing item id when editing, `None` when creating.
    pub editing_id: Option<String>,
    /// The draft being edited.
    pub draft: ItemDraft,
    /// Raw text of the value field (parsed on submit).
    pub value_input: String,
    /// Raw text of the image field (appended on Enter).
    pub image_input: String,
    /// Field currently focused.
    pub field: ItemField,
}

/// Active modal dialog, if any.
#[derive(Debug, Clone, Default)]
pub enum Modal {
    /// No modal; the active view owns input.
    #[default]
    None,
    /// Transient error or notice.
    Alert {
        /// Message shown to the user.
        message: String,
    },
    /// Yes/no confirmation gating a destructive or remote action.
    Confirm {
        /// Question shown to the user.
        message: String,
        /// Command dispatched when the user confirms.
        action: crate::state::PendingAction,
    },
    /// Swap proposal form.
    Propose(ProposeDraft),
    /// Partner review form.
    Review(ReviewDraft),
    /// Dispute evidence form.
    Dispute(DisputeDraft),
    /// Item create/edit form.
    Item(ItemForm),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Propose draft requires an offer or a positive deposit
    ///
    /// - Input: Empty draft; then deposit text "250"; then junk deposit
    /// - Output: Error, then ok, then error again
    fn propose_draft_offer_or_deposit() {
        let mut d = ProposeDraft::default();
        assert!(d.validate().is_err());
        d.deposit_input = "250".into();
        assert!(d.validate().is_ok());
        d.deposit_input = "lots".into();
        assert_eq!(d.deposit_amount(), 0.0);
        assert!(d.validate().is_err());
        d.offered_index = Some(0);
        assert!(d.validate().is_ok());
    }

    #[test]
    /// What: Dispute evidence collects image then description in order
    ///
    /// - Input: Draft with both, one, and neither pieces of evidence
    /// - Output: Evidence array ordering matches the original; empty rejects
    fn dispute_evidence_assembly() {
        let mut d = DisputeDraft {
            swap_id: "s1".into(),
            image: Some("data:image/png;base64,xyz".into()),
            description: "Item came back scratched".into(),
        };
        assert_eq!(d.evidence().len(), 2);
        assert!(d.evidence()[0].starts_with("data:image"));
        d.image = None;
        assert_eq!(d.evidence().len(), 1);
        d.description.clear();
        assert!(d.validate().is_err());
    }
}
