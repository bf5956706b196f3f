use std::sync::Arc;
use tokio::task::JoinHandle;

use holdem_tables::{
    DeckSource, RegistryConfig, TableRegistry, TableService, Topic, TopicSubscription,
};

use super::mocks::MockTransport;

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub registry: Arc<TableRegistry>,
    pub service: TableService,
    pub transport: Arc<MockTransport>,
    pub players: Vec<String>,
    pub _subscription_handles: Vec<JoinHandle<()>>,
}

pub struct TestSetupBuilder {
    players: Vec<String>,
    config: RegistryConfig,
    deck_source: Option<Arc<dyn DeckSource>>,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            players: vec![],
            config: RegistryConfig::default(),
            deck_source: None,
        }
    }

    pub fn with_players(mut self, players: Vec<&str>) -> Self {
        self.players = players.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_two_players(self) -> Self {
        self.with_players(vec!["alice", "bob"])
    }

    pub fn with_max_players_per_table(mut self, max_players: usize) -> Self {
        self.config = self.config.with_max_players_per_table(max_players);
        self
    }

    pub fn with_deck_source(mut self, deck_source: impl DeckSource + 'static) -> Self {
        self.deck_source = Some(Arc::new(deck_source));
        self
    }

    /// Builds the registry and subscribes the mock transport to the lobby and
    /// to every player's private topic.
    pub async fn build(self) -> TestSetup {
        let mut registry = TableRegistry::new(self.config);
        if let Some(deck_source) = self.deck_source {
            registry = registry.with_deck_source(deck_source);
        }
        let registry = Arc::new(registry);
        let service = TableService::new(registry.clone());
        let transport = Arc::new(MockTransport::new());

        let mut topics = vec![Topic::Lobby];
        topics.extend(self.players.iter().map(|p| Topic::Player(p.clone())));

        let mut handles = Vec::with_capacity(topics.len());
        for topic in topics {
            let subscription =
                TopicSubscription::new(topic, transport.clone(), registry.bus().clone());
            handles.push(subscription.start().await);
        }

        TestSetup {
            registry,
            service,
            transport,
            players: self.players,
            _subscription_handles: handles,
        }
    }
}
