use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::cards::{DeckError, HandError};
use crate::game::GameError;

/// Failures of table-level commands.
///
/// Everything except `GameFailed` is an expected, user-facing rejection that
/// goes back to the requesting player. `GameFailed` is reported to the whole
/// table by the registry itself when a game aborts mid-deal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("A game is already in progress at table {0}")]
    GameInProgress(String),

    #[error("Table {table_id} is full ({capacity} players)")]
    TableFull { table_id: String, capacity: usize },

    #[error("Only the admin of table {table_id} can do that, not {player}")]
    NotAdmin { table_id: String, player: String },

    #[error("Table {table_id} needs at least 2 players to start, has {count}")]
    InsufficientPlayers { table_id: String, count: usize },

    #[error("Player {0} is not seated at any table")]
    NotAtTable(String),

    #[error("Game at table {table_id} failed: {source}")]
    GameFailed { table_id: String, source: GameError },
}

impl TableError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TableError::TableNotFound(_) => ErrorKind::TableNotFound,
            TableError::GameInProgress(_) => ErrorKind::GameInProgress,
            TableError::TableFull { .. } => ErrorKind::TableFull,
            TableError::NotAdmin { .. } => ErrorKind::NotAdmin,
            TableError::InsufficientPlayers { .. } => ErrorKind::InsufficientPlayers,
            TableError::NotAtTable(_) => ErrorKind::NotAtTable,
            TableError::GameFailed { source, .. } => ErrorKind::from(source),
        }
    }

    /// Whether the registry already published an event for this failure.
    pub fn is_reported(&self) -> bool {
        matches!(self, TableError::GameFailed { .. })
    }
}

/// Transport-neutral error code carried by rejection events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    EmptyDeck,
    InvalidHandSize,
    InvalidPlayerCount,
    InvalidPhaseTransition,
    TableNotFound,
    GameInProgress,
    TableFull,
    NotAdmin,
    InsufficientPlayers,
    NotAtTable,
    GameFailed,
}

impl From<&GameError> for ErrorKind {
    fn from(error: &GameError) -> Self {
        match error {
            GameError::InvalidPlayerCount(_) | GameError::DuplicatePlayer(_) => {
                ErrorKind::InvalidPlayerCount
            }
            GameError::InvalidPhaseTransition { .. } | GameError::NoShowdownResults => {
                ErrorKind::InvalidPhaseTransition
            }
            GameError::Deck(DeckError::EmptyDeck) => ErrorKind::EmptyDeck,
            GameError::Hand(HandError::InvalidHandSize(_) | HandError::NotEnoughCards(_)) => {
                ErrorKind::InvalidHandSize
            }
        }
    }
}
