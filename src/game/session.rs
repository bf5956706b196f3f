// A GameSession is one hand of Texas Hold'em at one table. It owns the deck,
// the seated players and the community cards, and only moves forward:
// NotStarted -> Dealt -> Flop -> Turn -> River -> Showdown -> Finished.
//
// There is no betting. The table drives the session through every phase in
// one go and throws it away once the winner is known.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::game::cards::{best_hand, compare, Card, Deck, DeckError, Hand, HandCategory, HandError};

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 10;
pub const HOLE_CARDS: usize = 2;
pub const MAX_COMMUNITY_CARDS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Phase {
    NotStarted,
    Dealt,
    Flop,
    Turn,
    River,
    Showdown,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Phase::NotStarted => "not started",
                Phase::Dealt => "dealt",
                Phase::Flop => "flop",
                Phase::Turn => "turn",
                Phase::River => "river",
                Phase::Showdown => "showdown",
                Phase::Finished => "finished",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Texas Hold'em needs 2 to 10 players, got {0}")]
    InvalidPlayerCount(usize),
    #[error("Player {0} is seated twice")]
    DuplicatePlayer(String),
    #[error("Cannot move to the next phase from {actual} (expected {expected})")]
    InvalidPhaseTransition { expected: Phase, actual: Phase },
    #[error("Showdown produced no evaluated hands")]
    NoShowdownResults,
    #[error("Deck error: {0}")]
    Deck(#[from] DeckError),
    #[error("Hand error: {0}")]
    Hand(#[from] HandError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub hole_cards: Vec<Card>,
    pub best_hand: Option<Hand>,
}

impl Player {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            hole_cards: Vec::with_capacity(HOLE_CARDS),
            best_hand: None,
        }
    }
}

/// The player holding the strongest hand at showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub name: String,
    pub hand: Hand,
}

impl Winner {
    pub fn category(&self) -> HandCategory {
        self.hand.category()
    }
}

#[derive(Debug, Clone)]
pub struct GameSession {
    deck: Deck,
    players: Vec<Player>,
    community_cards: Vec<Card>,
    phase: Phase,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            deck: Deck::new(),
            players: Vec::new(),
            community_cards: Vec::new(),
            phase: Phase::NotStarted,
        }
    }

    /// Seats `player_names` and deals them from a freshly shuffled deck.
    pub fn start(&mut self, player_names: &[String]) -> Result<(), GameError> {
        self.start_with_deck(player_names, Deck::shuffled())
    }

    /// Seats `player_names` and deals from `deck` as given (no shuffle).
    ///
    /// Hole cards go out in two rounds, one card per player per round, in
    /// seating order.
    pub fn start_with_deck(&mut self, player_names: &[String], deck: Deck) -> Result<(), GameError> {
        self.expect_phase(Phase::NotStarted)?;

        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_names.len()) {
            return Err(GameError::InvalidPlayerCount(player_names.len()));
        }

        let mut seen = HashSet::new();
        for name in player_names {
            if !seen.insert(name.as_str()) {
                return Err(GameError::DuplicatePlayer(name.clone()));
            }
        }

        self.deck = deck;
        self.community_cards.clear();
        self.players = player_names.iter().map(|name| Player::new(name)).collect();

        for _round in 0..HOLE_CARDS {
            for player in self.players.iter_mut() {
                player.hole_cards.push(self.deck.draw()?);
            }
        }

        self.phase = Phase::Dealt;
        Ok(())
    }

    pub fn deal_flop(&mut self) -> Result<&[Card], GameError> {
        self.deal_community(Phase::Dealt, 3, Phase::Flop)
    }

    pub fn deal_turn(&mut self) -> Result<&[Card], GameError> {
        self.deal_community(Phase::Flop, 1, Phase::Turn)
    }

    pub fn deal_river(&mut self) -> Result<&[Card], GameError> {
        self.deal_community(Phase::Turn, 1, Phase::River)
    }

    /// Evaluates every player's best five of their seven cards.
    pub fn showdown(&mut self) -> Result<HashMap<String, HandCategory>, GameError> {
        self.expect_phase(Phase::River)?;

        let mut results = HashMap::with_capacity(self.players.len());
        for player in self.players.iter_mut() {
            let mut available = player.hole_cards.clone();
            available.extend_from_slice(&self.community_cards);

            let hand = best_hand(&available)?;
            results.insert(player.name.clone(), hand.category());
            player.best_hand = Some(hand);
        }

        self.phase = Phase::Showdown;
        Ok(results)
    }

    /// Picks the strongest hand. On an exact tie the player seated first keeps
    /// the win; pots are never split.
    pub fn winner(&mut self) -> Result<Winner, GameError> {
        self.expect_phase(Phase::Showdown)?;

        let mut best: Option<(&Player, &Hand)> = None;
        for player in &self.players {
            let Some(hand) = player.best_hand.as_ref() else {
                continue;
            };
            match best {
                Some((_, current)) if compare(hand, current) != Ordering::Greater => {}
                _ => best = Some((player, hand)),
            }
        }

        let winner = best
            .map(|(player, hand)| Winner {
                name: player.name.clone(),
                hand: hand.clone(),
            })
            .ok_or(GameError::NoShowdownResults)?;

        self.phase = Phase::Finished;
        Ok(winner)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn community_cards(&self) -> &[Card] {
        &self.community_cards
    }

    pub fn cards_remaining(&self) -> usize {
        self.deck.remaining()
    }

    fn deal_community(&mut self, from: Phase, count: usize, to: Phase) -> Result<&[Card], GameError> {
        self.expect_phase(from)?;
        debug_assert!(self.community_cards.len() + count <= MAX_COMMUNITY_CARDS);

        for _ in 0..count {
            let card = self.deck.draw()?;
            self.community_cards.push(card);
        }

        self.phase = to;
        Ok(&self.community_cards)
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), GameError> {
        if self.phase != expected {
            return Err(GameError::InvalidPhaseTransition {
                expected,
                actual: self.phase,
            });
        }
        Ok(())
    }
}
