use serde::{Deserialize, Serialize};
use std::fmt;

use crate::game::{Card, HandCategory, Phase};
use crate::shared::ErrorKind;
use crate::table::TableSummary;

/// Where an event is delivered.
///
/// A transport collaborator maps these onto its own channels (broker topics,
/// websocket groups, ...); the core never sees those names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    /// Everyone connected, regardless of table
    Lobby,
    /// Members of one table
    Table(String),
    /// One player only
    Player(String),
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::Lobby => write!(f, "lobby"),
            Topic::Table(id) => write!(f, "table/{}", id),
            Topic::Player(name) => write!(f, "player/{}", name),
        }
    }
}

/// Commands coming in from players
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableCommand {
    CreateTable { admin: String },
    JoinTable { player: String, table_id: String },
    StartGame { requester: String },
    CloseTable { requester: String, table_id: String },
    ListTables { requester: String },
}

impl TableCommand {
    /// The player who sent the command; rejections are addressed to them.
    pub fn requester(&self) -> &str {
        match self {
            TableCommand::CreateTable { admin } => admin,
            TableCommand::JoinTable { player, .. } => player,
            TableCommand::StartGame { requester } => requester,
            TableCommand::CloseTable { requester, .. } => requester,
            TableCommand::ListTables { requester } => requester,
        }
    }

    pub fn command_type(&self) -> &'static str {
        match self {
            TableCommand::CreateTable { .. } => "create_table",
            TableCommand::JoinTable { .. } => "join_table",
            TableCommand::StartGame { .. } => "start_game",
            TableCommand::CloseTable { .. } => "close_table",
            TableCommand::ListTables { .. } => "list_tables",
        }
    }
}

/// Facts published by the core
///
/// Events describe things that already happened. Each one is emitted on a
/// single [`Topic`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TableEvent {
    // Table lifecycle events
    TableCreated {
        table_id: String,
        admin: String,
    },
    PlayerJoined {
        table_id: String,
        player: String,
    },
    TableClosed {
        table_id: String,
    },
    TableList {
        entries: Vec<TableSummary>,
    },

    // Game lifecycle events
    GameStarted {
        table_id: String,
        players: Vec<String>,
    },
    PrivateCardsDealt {
        player: String,
        cards: Vec<Card>,
    },
    CommunityCardsRevealed {
        table_id: String,
        phase: Phase,
        cards: Vec<Card>,
    },
    ShowdownResult {
        player: String,
        category: HandCategory,
    },
    GameWon {
        table_id: String,
        winner: String,
        category: HandCategory,
    },
    GameEnded {
        table_id: String,
    },

    // Error events
    /// A command was refused; sent to the requesting player
    Rejected {
        player: String,
        kind: ErrorKind,
        reason: String,
    },
    /// A game aborted before a winner was found; sent to the table
    GameFailed {
        table_id: String,
        kind: ErrorKind,
        reason: String,
    },
}

impl TableEvent {
    pub fn event_type(&self) -> &'static str {
        match self {
            TableEvent::TableCreated { .. } => "table_created",
            TableEvent::PlayerJoined { .. } => "player_joined",
            TableEvent::TableClosed { .. } => "table_closed",
            TableEvent::TableList { .. } => "table_list",
            TableEvent::GameStarted { .. } => "game_started",
            TableEvent::PrivateCardsDealt { .. } => "private_cards_dealt",
            TableEvent::CommunityCardsRevealed { .. } => "community_cards_revealed",
            TableEvent::ShowdownResult { .. } => "showdown_result",
            TableEvent::GameWon { .. } => "game_won",
            TableEvent::GameEnded { .. } => "game_ended",
            TableEvent::Rejected { .. } => "rejected",
            TableEvent::GameFailed { .. } => "game_failed",
        }
    }
}
