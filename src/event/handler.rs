use async_trait::async_trait;
use thiserror::Error;

use super::events::{TableEvent, Topic};

/// Errors that can occur when handling table events
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Handler error: {0}")]
    Handler(String),
}

impl EventError {
    pub fn delivery(msg: impl Into<String>) -> Self {
        EventError::Delivery(msg.into())
    }

    pub fn handler(msg: impl Into<String>) -> Self {
        EventError::Handler(msg.into())
    }
}

/// Trait for components that consume events published on a topic
///
/// This is the seam a transport plugs into: it forwards events to its own
/// connections without the core knowing how they are delivered.
#[async_trait]
pub trait TopicEventHandler: Send + Sync {
    /// Handle one event received on `topic`
    async fn handle_event(&self, topic: &Topic, event: TableEvent) -> Result<(), EventError>;

    /// Get a human-readable name for this handler (for logging/debugging)
    fn handler_name(&self) -> &'static str;
}
