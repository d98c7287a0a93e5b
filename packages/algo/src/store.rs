//! Card storage interface
//!
//! Scheduling never touches storage. Callers load a deck's cards through a
//! [`CardStore`], run a session, then commit graded cards back.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::deck::{Deck, DeckError};
use crate::types::{Card, DeckId};

// ============================================================
// 错误类型定义
// ============================================================

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("deck not found: {0}")]
    NotFound(DeckId),

    #[error("deck error: {0}")]
    Deck(#[from] DeckError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

// ============================================================
// CardStore
// ============================================================

pub trait CardStore {
    /// Full candidate pool for one deck
    fn load_cards(&self, deck_id: &DeckId) -> StoreResult<Vec<Card>>;

    /// Persist a graded (or edited) card of an existing deck
    fn save_card(&mut self, deck_id: &DeckId, card: &Card) -> StoreResult<()>;
}

// ============================================================
// MemoryStore
// ============================================================

/// In-memory store with JSON snapshots
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    decks: HashMap<DeckId, Deck>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_deck(&mut self, deck: Deck) -> Option<Deck> {
        self.decks.insert(deck.id, deck)
    }

    pub fn remove_deck(&mut self, deck_id: &DeckId) -> StoreResult<Deck> {
        self.decks
            .remove(deck_id)
            .ok_or(StoreError::NotFound(*deck_id))
    }

    pub fn deck(&self, deck_id: &DeckId) -> Option<&Deck> {
        self.decks.get(deck_id)
    }

    pub fn deck_mut(&mut self, deck_id: &DeckId) -> Option<&mut Deck> {
        self.decks.get_mut(deck_id)
    }

    /// Decks ordered newest first
    pub fn decks(&self) -> Vec<&Deck> {
        let mut decks: Vec<&Deck> = self.decks.values().collect();
        decks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        decks
    }

    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> StoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl CardStore for MemoryStore {
    fn load_cards(&self, deck_id: &DeckId) -> StoreResult<Vec<Card>> {
        self.decks
            .get(deck_id)
            .map(|deck| deck.cards.clone())
            .ok_or(StoreError::NotFound(*deck_id))
    }

    fn save_card(&mut self, deck_id: &DeckId, card: &Card) -> StoreResult<()> {
        let deck = self
            .decks
            .get_mut(deck_id)
            .ok_or(StoreError::NotFound(*deck_id))?;
        deck.replace_card(card.clone())?;
        debug!(deck_id = %deck_id, card_id = %card.id, "card saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MasteryLevel;
    use chrono::{Duration, Utc};

    fn store_with_deck() -> (MemoryStore, DeckId) {
        let now = Utc::now();
        let mut deck = Deck::new("Swift", now).unwrap();
        deck.add_card("let", "Declares a constant", now).unwrap();
        deck.add_card("var", "Declares a variable", now).unwrap();
        let id = deck.id;

        let mut store = MemoryStore::new();
        store.insert_deck(deck);
        (store, id)
    }

    #[test]
    fn test_load_and_save_card() {
        let (mut store, deck_id) = store_with_deck();

        let mut cards = store.load_cards(&deck_id).unwrap();
        assert_eq!(cards.len(), 2);

        cards[0].mastery_level = MasteryLevel::Learning;
        store.save_card(&deck_id, &cards[0]).unwrap();

        let reloaded = store.load_cards(&deck_id).unwrap();
        assert_eq!(reloaded[0].mastery_level, MasteryLevel::Learning);
    }

    #[test]
    fn test_unknown_deck() {
        let (mut store, _) = store_with_deck();
        let missing = DeckId::new();

        assert!(matches!(store.load_cards(&missing), Err(StoreError::NotFound(_))));
        let card = Card::new("x", "y", Utc::now());
        assert!(matches!(
            store.save_card(&missing, &card),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_save_unknown_card() {
        let (mut store, deck_id) = store_with_deck();
        let card = Card::new("x", "y", Utc::now());

        assert!(matches!(
            store.save_card(&deck_id, &card),
            Err(StoreError::Deck(DeckError::CardNotFound(_)))
        ));
    }

    #[test]
    fn test_json_snapshot() {
        let (store, deck_id) = store_with_deck();

        let json = store.to_json().unwrap();
        let restored = MemoryStore::from_json(&json).unwrap();

        assert_eq!(restored.deck(&deck_id), store.deck(&deck_id));
        assert!(matches!(
            MemoryStore::from_json("{"),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_decks_newest_first() {
        let now = Utc::now();
        let mut store = MemoryStore::new();
        let older = Deck::new("older", now - Duration::days(1)).unwrap();
        let newer = Deck::new("newer", now).unwrap();
        store.insert_deck(older);
        store.insert_deck(newer);

        let names: Vec<&str> = store.decks().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["newer", "older"]);
    }
}
