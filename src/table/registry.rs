use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard, RwLock};
use tracing::{debug, info, instrument, warn};

use super::dealer::{self, DeckSource, ShuffledDeckSource};
use super::models::{Table, TableSummary};
use crate::config::RegistryConfig;
use crate::event::{EventBus, TableEvent, Topic};
use crate::game::session::MIN_PLAYERS;
use crate::game::{GameSession, Winner};
use crate::shared::{ErrorKind, TableError};

type TableSlot = Arc<Mutex<Table>>;

/// Concurrent registry of tables and of which table each player sits at.
///
/// Each table is serialised by its own mutex, so tables never wait on each
/// other. Locks are always taken in this order: table mutexes (ascending id
/// when two are held), then the player map, then the tables map. The tables
/// map is never held while waiting for a table.
pub struct TableRegistry {
    tables: RwLock<HashMap<String, TableSlot>>,
    player_tables: RwLock<HashMap<String, String>>,
    bus: EventBus,
    config: RegistryConfig,
    deck_source: Arc<dyn DeckSource>,
}

impl Default for TableRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

impl TableRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            player_tables: RwLock::new(HashMap::new()),
            bus: EventBus::new(config.event_channel_capacity),
            config,
            deck_source: Arc::new(ShuffledDeckSource),
        }
    }

    /// Replaces where new games get their decks from
    pub fn with_deck_source(mut self, deck_source: Arc<dyn DeckSource>) -> Self {
        self.deck_source = deck_source;
        self
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Creates a table with `admin` as its only member and returns its id.
    ///
    /// An admin already seated elsewhere leaves that table first.
    #[instrument(skip(self))]
    pub async fn create_table(&self, admin: &str) -> String {
        loop {
            let origin_id = self.table_of(admin).await;
            let origin = match &origin_id {
                Some(id) => self.slot(id).await,
                None => None,
            };
            let mut origin_guard = match &origin {
                Some(slot) => Some(slot.lock().await),
                None => None,
            };

            let mut player_tables = self.player_tables.write().await;
            if player_tables.get(admin) != origin_id.as_ref() {
                debug!(admin = %admin, "Seat changed while creating table, retrying");
                continue;
            }

            let emptied = match (origin_guard.as_deref_mut(), &origin_id) {
                (Some(table), Some(id)) => Self::leave(table, admin).then(|| id.clone()),
                _ => None,
            };

            let table_id = {
                let mut tables = self.tables.write().await;
                let table_id = loop {
                    let candidate = petname::Petnames::default().generate_one(2, "-");
                    if !tables.contains_key(&candidate) {
                        break candidate;
                    }
                };
                let table = Table::new(table_id.clone(), admin, self.config.max_players_per_table);
                tables.insert(table_id.clone(), Arc::new(Mutex::new(table)));
                if let Some(id) = &emptied {
                    tables.remove(id);
                }
                table_id
            };
            player_tables.insert(admin.to_string(), table_id.clone());

            drop(player_tables);
            drop(origin_guard);

            info!(table_id = %table_id, admin = %admin, "Table created");

            if let Some(id) = emptied {
                self.announce_closed(&id, &[]).await;
            }
            self.bus
                .emit_to_player(
                    admin,
                    TableEvent::TableCreated {
                        table_id: table_id.clone(),
                        admin: admin.to_string(),
                    },
                )
                .await;
            self.broadcast_table_list().await;

            return table_id;
        }
    }

    /// Seats `player` at `table_id`.
    ///
    /// A player seated at another table is moved: pruned from the old table
    /// in the same critical section, which is closed if left empty. Joining
    /// the table one already sits at changes nothing.
    #[instrument(skip(self))]
    pub async fn join_table(&self, table_id: &str, player: &str) -> Result<TableSummary, TableError> {
        loop {
            let target = self
                .slot(table_id)
                .await
                .ok_or_else(|| TableError::TableNotFound(table_id.to_string()))?;

            let origin_id = self
                .table_of(player)
                .await
                .filter(|id| id.as_str() != table_id);
            let origin = match &origin_id {
                Some(id) => self.slot(id).await,
                None => None,
            };

            let (mut table, mut origin_guard) =
                Self::lock_pair(table_id, &target, origin_id.as_deref(), origin.as_ref()).await;

            if table.closed {
                return Err(TableError::TableNotFound(table_id.to_string()));
            }
            if table.has_player(player) {
                debug!(table_id = %table_id, player = %player, "Player already seated");
                return Ok(table.summary());
            }
            if table.game_in_progress {
                return Err(TableError::GameInProgress(table_id.to_string()));
            }
            if table.is_full() {
                return Err(TableError::TableFull {
                    table_id: table_id.to_string(),
                    capacity: table.capacity,
                });
            }

            let mut player_tables = self.player_tables.write().await;
            if player_tables.get(player) != origin_id.as_ref() {
                debug!(table_id = %table_id, player = %player, "Seat changed while joining, retrying");
                continue;
            }

            table.add_player(player);
            player_tables.insert(player.to_string(), table_id.to_string());
            drop(player_tables);

            let emptied = match (origin_guard.as_deref_mut(), origin_id) {
                (Some(origin), Some(id)) => Self::leave(origin, player).then_some(id),
                _ => None,
            };
            if let Some(id) = &emptied {
                self.tables.write().await.remove(id);
            }

            let summary = table.summary();
            drop(origin_guard);
            drop(table);

            info!(
                table_id = %table_id,
                player = %player,
                member_count = summary.member_count,
                "Player joined table"
            );

            let joined = TableEvent::PlayerJoined {
                table_id: table_id.to_string(),
                player: player.to_string(),
            };
            self.bus.emit_to_player(player, joined.clone()).await;
            self.bus.emit_to_table(table_id, joined).await;

            if let Some(id) = emptied {
                self.announce_closed(&id, &[]).await;
                self.broadcast_table_list().await;
            }

            return Ok(summary);
        }
    }

    /// Runs one complete game at `table_id` while holding the table.
    ///
    /// The in-progress flag and session are cleared whether the game finishes
    /// or fails; a failure is published to the table as `GameFailed`.
    #[instrument(skip(self))]
    pub async fn start_game(&self, table_id: &str, requester: &str) -> Result<Winner, TableError> {
        let slot = self
            .slot(table_id)
            .await
            .ok_or_else(|| TableError::TableNotFound(table_id.to_string()))?;
        let mut guard = slot.lock().await;
        let table = &mut *guard;

        if table.closed {
            return Err(TableError::TableNotFound(table_id.to_string()));
        }
        if !table.is_admin(requester) {
            return Err(TableError::NotAdmin {
                table_id: table_id.to_string(),
                player: requester.to_string(),
            });
        }
        if table.game_in_progress {
            return Err(TableError::GameInProgress(table_id.to_string()));
        }
        if table.player_count() < MIN_PLAYERS {
            return Err(TableError::InsufficientPlayers {
                table_id: table_id.to_string(),
                count: table.player_count(),
            });
        }

        info!(table_id = %table_id, players = ?table.players, "Game starting");

        table.game_in_progress = true;
        let players = table.players.clone();
        let deck = self.deck_source.deck(&table.summary());
        let session = table.session.insert(GameSession::new());
        let result = dealer::play_hand(table_id, session, &players, deck, &self.bus).await;

        table.session = None;
        table.game_in_progress = false;

        match result {
            Ok(winner) => Ok(winner),
            Err(source) => {
                warn!(table_id = %table_id, error = %source, "Game failed, table reset");
                self.bus
                    .emit_to_table(
                        table_id,
                        TableEvent::GameFailed {
                            table_id: table_id.to_string(),
                            kind: ErrorKind::from(&source),
                            reason: format!("game failed to start: {}", source),
                        },
                    )
                    .await;
                Err(TableError::GameFailed {
                    table_id: table_id.to_string(),
                    source,
                })
            }
        }
    }

    /// Removes `table_id` and unseats all of its members
    #[instrument(skip(self))]
    pub async fn close_table(&self, table_id: &str, requester: &str) -> Result<(), TableError> {
        let slot = self
            .slot(table_id)
            .await
            .ok_or_else(|| TableError::TableNotFound(table_id.to_string()))?;
        let mut table = slot.lock().await;

        if table.closed {
            return Err(TableError::TableNotFound(table_id.to_string()));
        }
        if !table.is_admin(requester) {
            return Err(TableError::NotAdmin {
                table_id: table_id.to_string(),
                player: requester.to_string(),
            });
        }

        table.closed = true;
        let members = std::mem::take(&mut table.players);
        {
            let mut player_tables = self.player_tables.write().await;
            for member in &members {
                if player_tables.get(member).map(String::as_str) == Some(table_id) {
                    player_tables.remove(member);
                }
            }
        }
        self.tables.write().await.remove(table_id);
        drop(table);

        info!(table_id = %table_id, evicted = members.len(), "Table closed");

        self.announce_closed(table_id, &members).await;
        self.broadcast_table_list().await;
        Ok(())
    }

    /// Snapshot of every open table, ordered by id
    pub async fn list_tables(&self) -> Vec<TableSummary> {
        let slots: Vec<TableSlot> = self.tables.read().await.values().cloned().collect();

        let mut summaries = Vec::with_capacity(slots.len());
        for slot in slots {
            let table = slot.lock().await;
            if !table.closed {
                summaries.push(table.summary());
            }
        }
        summaries.sort_by(|a, b| a.table_id.cmp(&b.table_id));

        debug!(table_count = summaries.len(), "Tables listed");
        summaries
    }

    /// The table `player` currently sits at, if any
    pub async fn table_of(&self, player: &str) -> Option<String> {
        self.player_tables.read().await.get(player).cloned()
    }

    pub async fn table(&self, table_id: &str) -> Result<TableSummary, TableError> {
        let slot = self
            .slot(table_id)
            .await
            .ok_or_else(|| TableError::TableNotFound(table_id.to_string()))?;
        let table = slot.lock().await;
        if table.closed {
            return Err(TableError::TableNotFound(table_id.to_string()));
        }
        Ok(table.summary())
    }

    /// Members of `table_id` in seating order
    pub async fn members(&self, table_id: &str) -> Result<Vec<String>, TableError> {
        let slot = self
            .slot(table_id)
            .await
            .ok_or_else(|| TableError::TableNotFound(table_id.to_string()))?;
        let table = slot.lock().await;
        if table.closed {
            return Err(TableError::TableNotFound(table_id.to_string()));
        }
        Ok(table.players.clone())
    }

    async fn slot(&self, table_id: &str) -> Option<TableSlot> {
        self.tables.read().await.get(table_id).cloned()
    }

    /// Locks `target` and, when present, `origin` in ascending id order
    async fn lock_pair<'a>(
        target_id: &str,
        target: &'a TableSlot,
        origin_id: Option<&str>,
        origin: Option<&'a TableSlot>,
    ) -> (MutexGuard<'a, Table>, Option<MutexGuard<'a, Table>>) {
        match (origin_id, origin) {
            (Some(origin_id), Some(origin)) if origin_id < target_id => {
                let origin = origin.lock().await;
                (target.lock().await, Some(origin))
            }
            (_, Some(origin)) => {
                let target = target.lock().await;
                (target, Some(origin.lock().await))
            }
            (_, None) => (target.lock().await, None),
        }
    }

    /// Unseats `player` from `table`; returns true if that emptied and closed it
    fn leave(table: &mut Table, player: &str) -> bool {
        table.remove_player(player);
        debug!(table_id = %table.id, player = %player, "Player left table");
        if table.players.is_empty() {
            table.closed = true;
            info!(table_id = %table.id, "Table closed after its last player left");
            return true;
        }

        // The admin seat passes to the longest-seated remaining member
        if table.is_admin(player) {
            if let Some(new_admin) = table.players.first().cloned() {
                info!(
                    table_id = %table.id,
                    old_admin = %player,
                    new_admin = %new_admin,
                    "Admin left, assigning new admin"
                );
                table.admin = new_admin;
            }
        }
        false
    }

    async fn announce_closed(&self, table_id: &str, members: &[String]) {
        let closed = TableEvent::TableClosed {
            table_id: table_id.to_string(),
        };
        for member in members {
            self.bus.emit_to_player(member, closed.clone()).await;
        }
        let topic = Topic::Table(table_id.to_string());
        self.bus.emit(&topic, closed).await;
        self.bus.close_topic(&topic).await;
    }

    async fn broadcast_table_list(&self) {
        let entries = self.list_tables().await;
        self.bus
            .emit_to_lobby(TableEvent::TableList { entries })
            .await;
    }
}
