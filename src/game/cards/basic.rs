use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Suit::Hearts => "h",
                Suit::Diamonds => "d",
                Suit::Clubs => "c",
                Suit::Spades => "s",
            }
        )
    }
}

impl TryFrom<&str> for Suit {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "h" => Ok(Suit::Hearts),
            "d" => Ok(Suit::Diamonds),
            "c" => Ok(Suit::Clubs),
            "s" => Ok(Suit::Spades),
            _ => Err(s.to_string()),
        }
    }
}

/// Card rank. The discriminant is the rank weight (2-14) used for every
/// comparison, so the ace is always high.
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
#[serde(rename_all = "lowercase")]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    pub fn weight(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Rank::Two => "2",
                Rank::Three => "3",
                Rank::Four => "4",
                Rank::Five => "5",
                Rank::Six => "6",
                Rank::Seven => "7",
                Rank::Eight => "8",
                Rank::Nine => "9",
                Rank::Ten => "T",
                Rank::Jack => "J",
                Rank::Queen => "Q",
                Rank::King => "K",
                Rank::Ace => "A",
            }
        )
    }
}

impl TryFrom<&str> for Rank {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "2" => Ok(Rank::Two),
            "3" => Ok(Rank::Three),
            "4" => Ok(Rank::Four),
            "5" => Ok(Rank::Five),
            "6" => Ok(Rank::Six),
            "7" => Ok(Rank::Seven),
            "8" => Ok(Rank::Eight),
            "9" => Ok(Rank::Nine),
            "T" => Ok(Rank::Ten),
            "J" => Ok(Rank::Jack),
            "Q" => Ok(Rank::Queen),
            "K" => Ok(Rank::King),
            "A" => Ok(Rank::Ace),
            _ => Err(s.to_string()),
        }
    }
}

/// An immutable playing card.
///
/// Cards deliberately do not implement `Ord`: only the rank is ordered, so
/// callers compare `card.rank` (or `card.weight()`) directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    pub fn weight(&self) -> u8 {
        self.rank.weight()
    }

    /// Parses the two-character form produced by `Display`, e.g. `"Qh"`.
    pub fn from_string(s: &str) -> Result<Self, String> {
        if s.len() != 2 || !s.is_char_boundary(1) {
            return Err(s.to_string());
        }

        let rank = Rank::try_from(&s[0..1])?;
        let suit = Suit::try_from(&s[1..2])?;

        Ok(Self::new(rank, suit))
    }

    /// All 52 cards in canonical (suit, rank) order.
    pub fn all_cards() -> Vec<Card> {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::iter() {
            for rank in Rank::iter() {
                cards.push(Card::new(rank, suit));
            }
        }
        cards
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_weights() {
        assert_eq!(Rank::Two.weight(), 2);
        assert_eq!(Rank::Ten.weight(), 10);
        assert_eq!(Rank::Jack.weight(), 11);
        assert_eq!(Rank::Ace.weight(), 14);
        assert!(Rank::Ace > Rank::King);
        assert!(Rank::Two < Rank::Three);
    }

    #[test]
    fn test_card_from_string() {
        let king_hearts = Card::from_string("Kh").unwrap();
        assert_eq!(king_hearts.rank, Rank::King);
        assert_eq!(king_hearts.suit, Suit::Hearts);

        let ten_clubs = Card::from_string("Tc").unwrap();
        assert_eq!(ten_clubs.rank, Rank::Ten);
        assert_eq!(ten_clubs.suit, Suit::Clubs);

        assert!(Card::from_string("Zh").is_err()); // Invalid rank
        assert!(Card::from_string("Kx").is_err()); // Invalid suit
        assert!(Card::from_string("K").is_err());
        assert!(Card::from_string("Khs").is_err());
        assert!(Card::from_string("").is_err());
    }

    #[test]
    fn test_card_display_parses_back() {
        for card in Card::all_cards() {
            assert_eq!(Card::from_string(&card.to_string()), Ok(card));
        }
    }

    #[test]
    fn test_all_cards_canonical_order() {
        let cards = Card::all_cards();
        assert_eq!(cards.len(), 52);
        assert_eq!(cards[0], Card::new(Rank::Two, Suit::Hearts));
        assert_eq!(cards[12], Card::new(Rank::Ace, Suit::Hearts));
        assert_eq!(cards[13], Card::new(Rank::Two, Suit::Diamonds));
        assert_eq!(cards[51], Card::new(Rank::Ace, Suit::Spades));

        let unique: std::collections::HashSet<Card> = cards.iter().copied().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn test_card_serializes_lowercase() {
        let json = serde_json::to_string(&Card::new(Rank::Queen, Suit::Spades)).unwrap();
        assert_eq!(json, r#"{"suit":"spades","rank":"queen"}"#);
    }
}
