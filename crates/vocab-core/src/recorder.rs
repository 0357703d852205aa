//! Applying self-assessments.

use crate::deck_store::DeckStore;
use crate::error::{CoreError, CoreResult};
use crate::models::{Deck, Status};
use tracing::info;

/// Set an item's status and write the whole deck through immediately.
pub fn record_review(deck: &mut Deck, index: usize, status: Status, store: &DeckStore) -> CoreResult<()> {
    let len = deck.len();
    let item = deck
        .get_mut(index)
        .ok_or(CoreError::IndexOutOfRange { index, len })?;
    item.status = status;
    info!(index, term = %item.term_native, %status, "review recorded");

    store.save(deck)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VocabItem;
    use tempfile::TempDir;

    #[test]
    fn test_review_persists_immediately() {
        let dir = TempDir::new().unwrap();
        let store = DeckStore::new(dir.path().join("deck.csv"));
        let mut deck = Deck::from_items(vec![VocabItem::new("Hund", "سگ"), VocabItem::new("Katze", "گربه")]);
        store.save(&deck).unwrap();

        record_review(&mut deck, 1, Status::Red, &store).unwrap();
        assert_eq!(deck.get(1).unwrap().status, Status::Red);

        let reloaded = store.load().unwrap();
        assert_eq!(reloaded.get(0).unwrap().status, Status::Neutral);
        assert_eq!(reloaded.get(1).unwrap().status, Status::Red);

        record_review(&mut deck, 1, Status::Green, &store).unwrap();
        assert_eq!(store.load().unwrap().get(1).unwrap().status, Status::Green);
    }

    #[test]
    fn test_out_of_range_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let store = DeckStore::new(dir.path().join("deck.csv"));
        let mut deck = Deck::from_items(vec![VocabItem::new("Hund", "")]);

        let result = record_review(&mut deck, 5, Status::Red, &store);
        assert!(matches!(result, Err(CoreError::IndexOutOfRange { index: 5, len: 1 })));
        assert!(!store.path().exists());
    }
}
