use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;

use super::events::{TableEvent, Topic};
use crate::config::{DEFAULT_EVENT_CHANNEL_CAPACITY, MAX_EVENT_CHANNEL_CAPACITY};

/// Event bus for distributing events to lobby, table and player topics
#[derive(Debug, Clone)]
pub struct EventBus {
    /// Topic-specific event channels: topic -> sender
    channels: Arc<RwLock<HashMap<Topic, broadcast::Sender<TableEvent>>>>,
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CHANNEL_CAPACITY)
    }
}

impl EventBus {
    /// Creates a new event bus buffering `capacity` events per topic
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: Arc::new(RwLock::new(HashMap::new())),
            capacity: capacity.clamp(1, MAX_EVENT_CHANNEL_CAPACITY),
        }
    }

    /// Emits an event to all subscribers of a topic.
    ///
    /// Events for a topic nobody ever subscribed to are dropped.
    pub async fn emit(&self, topic: &Topic, event: TableEvent) {
        let channels = self.channels.read().await;

        let Some(sender) = channels.get(topic) else {
            debug!(topic = %topic, event_type = event.event_type(), "No subscribers for topic, event dropped");
            return;
        };

        match sender.send(event) {
            Ok(receiver_count) => {
                debug!(topic = %topic, receivers = receiver_count, "Event emitted");
            }
            Err(_) => {
                debug!(topic = %topic, "Event emitted with no receivers");
            }
        }
    }

    pub async fn emit_to_table(&self, table_id: &str, event: TableEvent) {
        self.emit(&Topic::Table(table_id.to_string()), event).await;
    }

    pub async fn emit_to_player(&self, player: &str, event: TableEvent) {
        self.emit(&Topic::Player(player.to_string()), event).await;
    }

    pub async fn emit_to_lobby(&self, event: TableEvent) {
        self.emit(&Topic::Lobby, event).await;
    }

    /// Subscribe to events for a topic, creating its channel on first use
    pub async fn subscribe(&self, topic: Topic) -> broadcast::Receiver<TableEvent> {
        let channels = self.channels.read().await;

        if let Some(sender) = channels.get(&topic) {
            return sender.subscribe();
        }
        drop(channels);

        debug!(topic = %topic, "Creating new channel for subscription");
        let mut channels = self.channels.write().await;
        channels
            .entry(topic)
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    /// Drops a topic's channel; its receivers see the channel close once the
    /// buffered events are drained.
    pub async fn close_topic(&self, topic: &Topic) {
        let mut channels = self.channels.write().await;
        if channels.remove(topic).is_some() {
            debug!(topic = %topic, "Topic channel closed");
        }
    }
}
