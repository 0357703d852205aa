//! Review session navigation.

use crate::models::{Deck, VocabItem};
use crate::selection::SelectionPolicy;
use tracing::{debug, warn};

/// Navigation state for one module. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Module the session belongs to.
    pub active_module: String,
    /// Index of the displayed item.
    pub current_index: usize,
    /// Previously displayed indices, most recent last.
    pub history: Vec<usize>,
    /// Whether the answer is shown.
    pub solution_revealed: bool,
}

impl Session {
    /// Start a fresh session on a module.
    pub fn start(module: impl Into<String>, deck: &Deck, policy: &mut dyn SelectionPolicy) -> Self {
        let current_index = policy.pick_index(deck);
        debug!(current_index, "session started");
        Self {
            active_module: module.into(),
            current_index,
            history: Vec::new(),
            solution_revealed: false,
        }
    }

    /// Advance to a freshly selected item.
    pub fn go_next(&mut self, deck: &Deck, policy: &mut dyn SelectionPolicy) {
        self.history.push(self.current_index);
        self.current_index = policy.pick_index(deck);
        self.solution_revealed = false;
        debug!(current_index = self.current_index, depth = self.history.len(), "next item");
    }

    /// Return to the previous item. No-op when there is nothing to go back to.
    pub fn go_back(&mut self) {
        if let Some(previous) = self.history.pop() {
            self.current_index = previous;
            self.solution_revealed = false;
            debug!(current_index = self.current_index, depth = self.history.len(), "back");
        }
    }

    /// Whether `go_back` would do anything.
    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Show the answer for the current item.
    pub fn reveal(&mut self) {
        self.solution_revealed = true;
    }

    /// Clamp a stale index after rows were removed.
    pub fn repair(&mut self, deck: &Deck) {
        if !deck.is_empty() && self.current_index >= deck.len() {
            warn!(
                stale = self.current_index,
                deck_len = deck.len(),
                "current index no longer valid, resetting to first item"
            );
            self.current_index = 0;
        }
    }

    /// The displayed item, repairing the index first. `None` for an empty deck.
    pub fn current_item<'d>(&mut self, deck: &'d Deck) -> Option<&'d VocabItem> {
        self.repair(deck);
        deck.get(self.current_index)
    }
}
