// Public API
pub use cards::{best_hand, classify, compare, Card, Deck, Hand, HandCategory, Rank, Suit};
pub use session::{GameError, GameSession, Phase, Player, Winner};

pub mod cards;
pub mod session;
