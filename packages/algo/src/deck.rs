//! Decks and card authoring

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{Card, CardId, DeckId};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("deck name must not be empty")]
    EmptyName,
    #[error("term must not be empty")]
    EmptyTerm,
    #[error("definition must not be empty")]
    EmptyDefinition,
    #[error("card not found: {0}")]
    CardNotFound(CardId),
}

pub type DeckResult<T> = Result<T, DeckError>;

/// A named collection of cards
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    pub id: DeckId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> DeckResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DeckError::EmptyName);
        }
        Ok(Self {
            id: DeckId::new(),
            name,
            created_at: now,
            cards: Vec::new(),
        })
    }

    pub fn add_card(
        &mut self,
        term: impl Into<String>,
        definition: impl Into<String>,
        now: DateTime<Utc>,
    ) -> DeckResult<CardId> {
        let (term, definition) = validated(term.into(), definition.into())?;
        let card = Card::new(term, definition, now);
        let id = card.id;
        self.cards.push(card);
        Ok(id)
    }

    /// Add a glossary-seeded card
    pub fn add_default_card(
        &mut self,
        term: impl Into<String>,
        definition: impl Into<String>,
        now: DateTime<Utc>,
    ) -> DeckResult<CardId> {
        let id = self.add_card(term, definition, now)?;
        if let Some(card) = self.card_mut(&id) {
            card.is_default = true;
        }
        Ok(id)
    }

    /// Edit the text of a card. Review state is kept.
    pub fn update_card(
        &mut self,
        id: &CardId,
        term: impl Into<String>,
        definition: impl Into<String>,
    ) -> DeckResult<()> {
        let (term, definition) = validated(term.into(), definition.into())?;
        let card = self.card_mut(id).ok_or(DeckError::CardNotFound(*id))?;
        card.term = term;
        card.definition = definition;
        Ok(())
    }

    pub fn remove_card(&mut self, id: &CardId) -> DeckResult<Card> {
        let index = self
            .cards
            .iter()
            .position(|card| &card.id == id)
            .ok_or(DeckError::CardNotFound(*id))?;
        Ok(self.cards.remove(index))
    }

    /// Write back a graded snapshot of one of this deck's cards
    pub fn replace_card(&mut self, card: Card) -> DeckResult<()> {
        let slot = self.card_mut(&card.id).ok_or(DeckError::CardNotFound(card.id))?;
        *slot = card;
        Ok(())
    }

    pub fn card(&self, id: &CardId) -> Option<&Card> {
        self.cards.iter().find(|card| &card.id == id)
    }

    pub fn card_mut(&mut self, id: &CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|card| &card.id == id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

fn validated(term: String, definition: String) -> DeckResult<(String, String)> {
    if term.trim().is_empty() {
        return Err(DeckError::EmptyTerm);
    }
    if definition.trim().is_empty() {
        return Err(DeckError::EmptyDefinition);
    }
    Ok((term, definition))
}
