use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::VecDeque;
use thiserror::Error;

use super::basic::Card;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeckError {
    #[error("Cannot draw from an empty deck")]
    EmptyDeck,
}

/// An ordered pile of cards, drawn from the front.
///
/// A drawn card is removed and is never handed out again until the deck is
/// rebuilt with [`Deck::reset`].
#[derive(Debug, Clone)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// A full 52-card deck in canonical (suit, rank) order, unshuffled.
    pub fn new() -> Self {
        Self {
            cards: Card::all_cards().into(),
        }
    }

    /// A deck that deals exactly `cards`, front first. Used for prepared deals.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards: cards.into(),
        }
    }

    /// A freshly built deck, shuffled with the thread-local generator.
    pub fn shuffled() -> Self {
        let mut deck = Self::new();
        deck.shuffle();
        deck
    }

    /// Uniformly permutes the remaining cards with the thread-local generator
    /// (seeded from system entropy).
    pub fn shuffle(&mut self) {
        self.shuffle_with(&mut rand::rng());
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.make_contiguous().shuffle(rng);
    }

    pub fn draw(&mut self) -> Result<Card, DeckError> {
        self.cards.pop_front().ok_or(DeckError::EmptyDeck)
    }

    /// Rebuilds the full 52 cards in canonical order.
    pub fn reset(&mut self) {
        self.cards = Card::all_cards().into();
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
