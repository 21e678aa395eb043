use crate::messages::{ChannelError, ClientRequest};
use crate::model::HAND_LIMIT;

// Opened when the server refuses to end a turn because the player holds
// more than `HAND_LIMIT` cards.
#[derive(Clone, Debug, PartialEq)]
pub struct DiscardFlow {
    required: usize,
    selected: Vec<String>,
}

impl DiscardFlow {
    // None when the hand is already within the limit
    pub fn new(hand_size: usize) -> Option<DiscardFlow> {
        let required = hand_size.saturating_sub(HAND_LIMIT);
        if required == 0 {
            return None;
        }
        Some(DiscardFlow {
            required,
            selected: Vec::new(),
        })
    }

    pub fn from_rejection(err: &ChannelError) -> Option<DiscardFlow> {
        err.hand_size.filter(|_| err.is_must_discard()).and_then(DiscardFlow::new)
    }

    pub fn required(&self) -> usize {
        self.required
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, card_id: &str) -> bool {
        self.selected.iter().any(|c| c == card_id)
    }

    pub fn remaining(&self) -> usize {
        self.required.saturating_sub(self.selected.len())
    }

    // Returns false when the card can't be added because enough are
    // already selected
    pub fn toggle(&mut self, card_id: &str) -> bool {
        if let Some(idx) = self.selected.iter().position(|c| c == card_id) {
            self.selected.remove(idx);
            return true;
        }
        if self.selected.len() >= self.required {
            return false;
        }
        self.selected.push(card_id.to_string());
        true
    }

    pub fn can_confirm(&self) -> bool {
        self.selected.len() == self.required
    }

    pub fn request(&self) -> Option<ClientRequest> {
        if !self.can_confirm() {
            return None;
        }
        Some(ClientRequest::DiscardCards {
            card_ids: self.selected.clone(),
        })
    }
}
