use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::registry::TableRegistry;
use crate::event::{EventBus, TableCommand, TableEvent};
use crate::shared::TableError;

/// Routes inbound commands to the registry and reports refusals
///
/// User-facing failures go back to the requesting player as a `Rejected`
/// event; a failed game has already been reported to its table.
pub struct TableService {
    registry: Arc<TableRegistry>,
    bus: EventBus,
}

impl TableService {
    pub fn new(registry: Arc<TableRegistry>) -> Self {
        let bus = registry.bus().clone();
        Self { registry, bus }
    }

    pub fn registry(&self) -> &Arc<TableRegistry> {
        &self.registry
    }

    /// Handles one command, publishing its outcome on the bus
    #[instrument(skip(self, command), fields(command = command.command_type(), requester = command.requester()))]
    pub async fn handle(&self, command: TableCommand) -> Result<(), TableError> {
        let requester = command.requester().to_string();

        let result = self.dispatch(command).await;

        if let Err(e) = &result {
            if !e.is_reported() {
                warn!(requester = %requester, error = %e, "Command rejected");
                self.bus
                    .emit_to_player(
                        &requester,
                        TableEvent::Rejected {
                            player: requester.clone(),
                            kind: e.kind(),
                            reason: e.to_string(),
                        },
                    )
                    .await;
            }
        }

        result
    }

    async fn dispatch(&self, command: TableCommand) -> Result<(), TableError> {
        match command {
            TableCommand::CreateTable { admin } => {
                self.registry.create_table(&admin).await;
                Ok(())
            }
            TableCommand::JoinTable { player, table_id } => {
                self.registry.join_table(&table_id, &player).await?;
                Ok(())
            }
            TableCommand::StartGame { requester } => {
                let table_id = self
                    .registry
                    .table_of(&requester)
                    .await
                    .ok_or_else(|| TableError::NotAtTable(requester.clone()))?;
                debug!(table_id = %table_id, requester = %requester, "Resolved requester's table");

                self.registry.start_game(&table_id, &requester).await?;
                Ok(())
            }
            TableCommand::CloseTable {
                requester,
                table_id,
            } => self.registry.close_table(&table_id, &requester).await,
            TableCommand::ListTables { requester } => {
                let entries = self.registry.list_tables().await;
                self.bus
                    .emit_to_player(&requester, TableEvent::TableList { entries })
                    .await;
                Ok(())
            }
        }
    }
}
