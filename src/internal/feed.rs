use std::collections::HashMap;

use super::gesture::{DragController, DragDirection, DragPolicy};
use super::models::{Deal, VoteKind};

/// The swipeable deal feed: one card shown at a time, a vertical swipe up
/// advances to the next deal and a swipe down retreats, with the index
/// clamped to the loaded list. Holds the client-side mirror of per-deal
/// comment counts.
#[derive(Debug, Clone)]
pub struct DealFeed {
    pub deals: Vec<Deal>,
    pub index: usize,
    pub loading: bool,
    pub error: Option<String>,
    pub comment_counts: HashMap<String, u64>,
    pub controller: DragController,
}

impl DealFeed {
    pub fn new(travel: f32) -> Self {
        Self {
            deals: Vec::new(),
            index: 0,
            loading: true,
            error: None,
            comment_counts: HashMap::new(),
            controller: DragController::new(DragPolicy::vertical_feed(travel)),
        }
    }

    /// Replace the list after a (re)fetch; the index stays where it was when
    /// still valid, so a refresh does not yank the user back to the top.
    pub fn set_deals(&mut self, deals: Vec<Deal>) {
        self.deals = deals;
        self.loading = false;
        self.error = None;
        if self.index >= self.deals.len() {
            self.index = self.deals.len().saturating_sub(1);
        }
    }

    pub fn current(&self) -> Option<&Deal> {
        self.deals.get(self.index)
    }

    /// Whether a commit in `direction` may proceed: swiping up (negative)
    /// advances and needs a next card, swiping down (positive) retreats and
    /// needs a previous one.
    pub fn permits(&self, direction: DragDirection) -> bool {
        match direction {
            DragDirection::Negative => self.index + 1 < self.deals.len(),
            DragDirection::Positive => self.index > 0,
        }
    }

    /// Apply a landed commit: advance or retreat the index. The controller
    /// has already reset its position so the new card starts at rest.
    pub fn apply_commit(&mut self, direction: DragDirection) {
        match direction {
            DragDirection::Negative => {
                if self.index + 1 < self.deals.len() {
                    self.index += 1;
                }
            }
            DragDirection::Positive => {
                self.index = self.index.saturating_sub(1);
            }
        }
    }

    /// Patch the voted deal's temperature after the server acknowledged the
    /// vote. The delta is always ±1, never a server-returned value.
    pub fn apply_vote(&mut self, deal_id: &str, kind: VoteKind) {
        if let Some(deal) = self.deals.iter_mut().find(|deal| deal.id == deal_id) {
            deal.temperature += kind.delta();
        }
    }

    pub fn set_comment_count(&mut self, deal_id: &str, total: u64) {
        self.comment_counts.insert(deal_id.to_string(), total);
    }

    pub fn comment_count(&self, deal_id: &str) -> u64 {
        self.comment_counts.get(deal_id).copied().unwrap_or(0)
    }
}
