use std::cmp::Ordering;
use std::fmt;
use strum_macros::EnumIter;
use thiserror::Error;

use super::basic::Card;
use super::combinations::Combinations;

pub const HAND_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandError {
    #[error("Invalid hand size: expected 5 cards, got {0}")]
    InvalidHandSize(usize),
    #[error("Need at least 5 cards to pick a hand, got {0}")]
    NotEnoughCards(usize),
}

/// Hand categories from weakest to strongest. The discriminant is the
/// category rank (1-10) used for comparison.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
pub enum HandCategory {
    HighCard = 1,
    Pair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalStraightFlush = 10,
}

impl HandCategory {
    pub fn rank(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                HandCategory::HighCard => "high card",
                HandCategory::Pair => "pair",
                HandCategory::TwoPair => "two pair",
                HandCategory::ThreeOfAKind => "three of a kind",
                HandCategory::Straight => "straight",
                HandCategory::Flush => "flush",
                HandCategory::FullHouse => "full house",
                HandCategory::FourOfAKind => "four of a kind",
                HandCategory::StraightFlush => "straight flush",
                HandCategory::RoyalStraightFlush => "royal straight flush",
            }
        )
    }
}

/// Exactly five cards together with their classification.
///
/// Hands are ordered with [`compare`]: category first, then the tiebreak
/// key (the five rank weights sorted descending) entrywise. Two hands with
/// the same ranks in different suits compare `Equal` without being `==`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Hand {
    cards: [Card; HAND_SIZE],
    category: HandCategory,
    tiebreak: [u8; HAND_SIZE],
}

impl Hand {
    pub fn new(cards: &[Card]) -> Result<Self, HandError> {
        let cards: [Card; HAND_SIZE] = cards
            .try_into()
            .map_err(|_| HandError::InvalidHandSize(cards.len()))?;

        let mut tiebreak = cards.map(|card| card.weight());
        tiebreak.sort_unstable_by(|a, b| b.cmp(a));

        Ok(Self {
            cards,
            category: classify_sorted(&cards, &tiebreak),
            tiebreak,
        })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn category(&self) -> HandCategory {
        self.category
    }

    /// Rank weights sorted descending.
    pub fn tiebreak(&self) -> &[u8; HAND_SIZE] {
        &self.tiebreak
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cards: Vec<String> = self.cards.iter().map(|c| c.to_string()).collect();
        write!(f, "{} ({})", cards.join(" "), self.category)
    }
}

/// Classifies exactly five cards.
pub fn classify(cards: &[Card]) -> Result<HandCategory, HandError> {
    Hand::new(cards).map(|hand| hand.category())
}

/// Orders two hands by category, then by descending rank weights.
pub fn compare(a: &Hand, b: &Hand) -> Ordering {
    a.category
        .cmp(&b.category)
        .then_with(|| a.tiebreak.cmp(&b.tiebreak))
}

/// Picks the strongest 5-card hand out of `cards` (at least five).
///
/// Every 5-card subset is evaluated; among equally strong subsets the first
/// one in enumeration order wins.
pub fn best_hand(cards: &[Card]) -> Result<Hand, HandError> {
    if cards.len() < HAND_SIZE {
        return Err(HandError::NotEnoughCards(cards.len()));
    }

    let mut best: Option<Hand> = None;
    for indices in Combinations::new(cards.len(), HAND_SIZE) {
        let subset: Vec<Card> = indices.iter().map(|&i| cards[i]).collect();
        let hand = Hand::new(&subset)?;
        match &best {
            Some(current) if compare(&hand, current) != Ordering::Greater => {}
            _ => best = Some(hand),
        }
    }

    best.ok_or(HandError::NotEnoughCards(cards.len()))
}

// Checks run strongest first; each one assumes the stronger ones failed.
fn classify_sorted(cards: &[Card; HAND_SIZE], weights_desc: &[u8; HAND_SIZE]) -> HandCategory {
    let flush = is_flush(cards);
    let straight = is_straight(weights_desc);
    let counts = rank_counts(weights_desc);

    if flush && straight {
        if weights_desc[0] == 14 {
            return HandCategory::RoyalStraightFlush;
        }
        return HandCategory::StraightFlush;
    }
    if counts.contains(&4) {
        return HandCategory::FourOfAKind;
    }
    if counts == [3, 2] {
        return HandCategory::FullHouse;
    }
    if flush {
        return HandCategory::Flush;
    }
    if straight {
        return HandCategory::Straight;
    }
    if counts.contains(&3) {
        return HandCategory::ThreeOfAKind;
    }
    match counts.iter().filter(|&&c| c == 2).count() {
        2 => HandCategory::TwoPair,
        1 => HandCategory::Pair,
        _ => HandCategory::HighCard,
    }
}

fn is_flush(cards: &[Card; HAND_SIZE]) -> bool {
    cards.iter().all(|card| card.suit == cards[0].suit)
}

// Strict +1 adjacency on weights: the ace (14) never sits next to the two,
// so A-2-3-4-5 is not a straight.
fn is_straight(weights_desc: &[u8; HAND_SIZE]) -> bool {
    weights_desc.windows(2).all(|w| w[0] == w[1] + 1)
}

/// Multiplicity of each distinct rank, largest first.
fn rank_counts(weights_desc: &[u8; HAND_SIZE]) -> Vec<usize> {
    let mut counts: Vec<usize> = Vec::with_capacity(HAND_SIZE);
    let mut previous = None;
    for &weight in weights_desc {
        if previous == Some(weight) {
            if let Some(count) = counts.last_mut() {
                *count += 1;
            }
        } else {
            counts.push(1);
        }
        previous = Some(weight);
    }
    counts.sort_unstable_by(|a, b| b.cmp(a));
    counts
}
