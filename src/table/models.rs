use serde::{Deserialize, Serialize};

use crate::game::GameSession;

/// In-memory state of one table
#[derive(Debug, Clone)]
pub struct Table {
    pub id: String,                   // Pet name generated ID
    pub admin: String,                // Player allowed to start and close
    pub players: Vec<String>,         // Members in seating order
    pub capacity: usize,              // Seat limit
    pub session: Option<GameSession>, // Present only while a game runs
    pub game_in_progress: bool,
    /// Set once the table is removed; a late lock holder must treat it as gone
    pub closed: bool,
}

impl Table {
    /// Creates a table with the admin as its only member
    pub fn new(id: String, admin: &str, capacity: usize) -> Self {
        Self {
            id,
            admin: admin.to_string(),
            players: vec![admin.to_string()],
            capacity,
            session: None,
            game_in_progress: false,
            closed: false,
        }
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= self.capacity
    }

    pub fn is_admin(&self, player: &str) -> bool {
        self.admin == player
    }

    pub fn has_player(&self, player: &str) -> bool {
        self.players.iter().any(|p| p == player)
    }

    pub fn add_player(&mut self, player: &str) {
        if !self.has_player(player) {
            self.players.push(player.to_string());
        }
    }

    pub fn remove_player(&mut self, player: &str) {
        self.players.retain(|p| p != player);
    }

    pub fn summary(&self) -> TableSummary {
        TableSummary {
            table_id: self.id.clone(),
            member_count: self.players.len(),
            capacity: self.capacity,
            admin: self.admin.clone(),
            in_progress: self.game_in_progress,
        }
    }
}

/// Read-only snapshot of a table, as listed to the lobby
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSummary {
    pub table_id: String,
    pub member_count: usize,
    pub capacity: usize,
    pub admin: String,
    pub in_progress: bool,
}
