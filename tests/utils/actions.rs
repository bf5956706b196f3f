#![allow(dead_code)] // Test utilities may not all be used in every test

use tokio::time::{sleep, Duration};

use holdem_tables::{TableCommand, TableError, Topic, TopicSubscription};

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Send a command and wait for its events to reach the transport
    pub async fn send(&self, command: TableCommand) -> Result<(), TableError> {
        let result = self.service.handle(command).await;
        sleep(Duration::from_millis(10)).await;
        result
    }

    /// Subscribe the mock transport to a table's topic
    pub async fn watch_table(&mut self, table_id: &str) {
        let subscription = TopicSubscription::new(
            Topic::Table(table_id.to_string()),
            self.transport.clone(),
            self.registry.bus().clone(),
        );
        self._subscription_handles.push(subscription.start().await);
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    /// Create a table and return its id
    pub async fn create_table(&self, admin: &str) -> String {
        self.send(TableCommand::CreateTable {
            admin: admin.to_string(),
        })
        .await
        .unwrap();
        self.registry.table_of(admin).await.unwrap()
    }

    pub async fn join_table(&self, player: &str, table_id: &str) -> Result<(), TableError> {
        self.send(TableCommand::JoinTable {
            player: player.to_string(),
            table_id: table_id.to_string(),
        })
        .await
    }

    pub async fn start_game(&self, requester: &str) -> Result<(), TableError> {
        self.send(TableCommand::StartGame {
            requester: requester.to_string(),
        })
        .await
    }

    pub async fn close_table(&self, requester: &str, table_id: &str) -> Result<(), TableError> {
        self.send(TableCommand::CloseTable {
            requester: requester.to_string(),
            table_id: table_id.to_string(),
        })
        .await
    }

    pub async fn list_tables(&self, requester: &str) -> Result<(), TableError> {
        self.send(TableCommand::ListTables {
            requester: requester.to_string(),
        })
        .await
    }

    /// Create a table for the first player, seat everyone else, and watch it
    pub async fn seat_everyone(&mut self) -> String {
        let admin = self.players[0].clone();
        let table_id = self.create_table(&admin).await;
        self.watch_table(&table_id).await;

        for player in self.players[1..].to_vec() {
            self.join_table(&player, &table_id).await.unwrap();
        }
        self.transport.clear_events().await;
        table_id
    }
}
