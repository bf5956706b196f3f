#![allow(dead_code)] // Test utilities may not all be used in every test

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use holdem_tables::{
    event::EventError,
    game::{Card, Deck},
    DeckSource, TableEvent, TableSummary, Topic, TopicEventHandler,
};

// ============================================================================
// Mock Infrastructure
// ============================================================================

/// Stands in for a transport: records every event delivered per topic
#[derive(Clone, Default)]
pub struct MockTransport {
    delivered: Arc<RwLock<HashMap<Topic, Vec<TableEvent>>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn events_for(&self, topic: &Topic) -> Vec<TableEvent> {
        self.delivered
            .read()
            .await
            .get(topic)
            .cloned()
            .unwrap_or_default()
    }

    /// Removes and returns the oldest recorded event on `topic`
    pub async fn consume_event_for(&self, topic: &Topic) -> Option<TableEvent> {
        let mut delivered = self.delivered.write().await;
        let queue = delivered.get_mut(topic)?;
        if queue.is_empty() {
            None
        } else {
            Some(queue.remove(0))
        }
    }

    pub async fn clear_events(&self) {
        self.delivered.write().await.clear();
    }
}

#[async_trait]
impl TopicEventHandler for MockTransport {
    async fn handle_event(&self, topic: &Topic, event: TableEvent) -> Result<(), EventError> {
        // Everything a real transport sends must survive the wire
        serde_json::to_string(&event).map_err(|e| EventError::delivery(e.to_string()))?;

        self.delivered
            .write()
            .await
            .entry(topic.clone())
            .or_default()
            .push(event);
        Ok(())
    }

    fn handler_name(&self) -> &'static str {
        "mock_transport"
    }
}

/// Deals every game from the same prepared card order
pub struct StackedDeck {
    cards: Vec<Card>,
}

impl StackedDeck {
    pub fn new(cards: &str) -> Self {
        Self {
            cards: cards
                .split_whitespace()
                .map(|c| Card::from_string(c).unwrap())
                .collect(),
        }
    }
}

impl DeckSource for StackedDeck {
    fn deck(&self, _table: &TableSummary) -> Deck {
        Deck::from_cards(self.cards.clone())
    }
}
