use async_trait::async_trait;
use futures::future::join_all;
use holdem_tables::event::EventError;
use holdem_tables::{
    RegistryConfig, TableCommand, TableEvent, TableRegistry, TableService, Topic,
    TopicEventHandler, TopicSubscription,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_DEMO_TABLES: usize = 3;
const SEATS_PER_DEMO_TABLE: usize = 3;

/// Writes every event it sees to the log as JSON
struct LoggingHandler;

#[async_trait]
impl TopicEventHandler for LoggingHandler {
    async fn handle_event(&self, topic: &Topic, event: TableEvent) -> Result<(), EventError> {
        let payload = serde_json::to_string(&event).map_err(|e| EventError::handler(e.to_string()))?;
        info!(topic = %topic, event = %payload, "Event");
        Ok(())
    }

    fn handler_name(&self) -> &'static str {
        "logging"
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "holdem_tables=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RegistryConfig::from_env();
    let demo_tables = std::env::var("HOLDEM_DEMO_TABLES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_DEMO_TABLES);

    info!(?config, demo_tables, "Starting Texas Hold'em tables");

    let registry = Arc::new(TableRegistry::new(config));
    let service = Arc::new(TableService::new(registry.clone()));
    let handler: Arc<dyn TopicEventHandler> = Arc::new(LoggingHandler);

    let mut subscriptions = vec![
        TopicSubscription::new(Topic::Lobby, handler.clone(), registry.bus().clone())
            .start()
            .await,
    ];

    let seats: Vec<Vec<String>> = (0..demo_tables)
        .map(|t| {
            (0..SEATS_PER_DEMO_TABLE)
                .map(|s| format!("player-{}-{}", t, s))
                .collect()
        })
        .collect();

    let mut table_ids = Vec::with_capacity(seats.len());
    for players in &seats {
        let table_id = registry.create_table(&players[0]).await;
        subscriptions.push(
            TopicSubscription::new(
                Topic::Table(table_id.clone()),
                handler.clone(),
                registry.bus().clone(),
            )
            .start()
            .await,
        );
        for player in &players[1..] {
            let command = TableCommand::JoinTable {
                player: player.clone(),
                table_id: table_id.clone(),
            };
            if let Err(e) = service.handle(command).await {
                warn!(table_id = %table_id, player = %player, error = %e, "Join failed");
            }
        }
        table_ids.push(table_id);
    }

    // Every table plays one hand at the same time
    let games = seats.iter().map(|players| {
        service.handle(TableCommand::StartGame {
            requester: players[0].clone(),
        })
    });
    for result in join_all(games).await {
        if let Err(e) = result {
            warn!(error = %e, "Game did not complete");
        }
    }

    for (players, table_id) in seats.iter().zip(&table_ids) {
        let command = TableCommand::CloseTable {
            requester: players[0].clone(),
            table_id: table_id.clone(),
        };
        if let Err(e) = service.handle(command).await {
            warn!(table_id = %table_id, error = %e, "Close failed");
        }
    }

    // Table subscriptions end when their tables close; the lobby never does
    let lobby = subscriptions.remove(0);
    join_all(subscriptions).await;
    lobby.abort();

    info!("All demo tables finished");
}
