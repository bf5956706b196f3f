pub mod basic;
pub mod combinations;
pub mod deck;
pub mod hands;


pub use basic::{Card, Rank, Suit};
pub use combinations::Combinations;
pub use deck::{Deck, DeckError};
pub use hands::{best_hand, classify, compare, Hand, HandCategory, HandError, HAND_SIZE};
