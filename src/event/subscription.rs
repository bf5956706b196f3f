use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{bus::EventBus, events::Topic, handler::TopicEventHandler};

/// Routes the events of one topic to a handler
pub struct TopicSubscription {
    topic: Topic,
    handler: Arc<dyn TopicEventHandler>,
    event_bus: EventBus,
}

impl TopicSubscription {
    pub fn new(topic: Topic, handler: Arc<dyn TopicEventHandler>, event_bus: EventBus) -> Self {
        Self {
            topic,
            handler,
            event_bus,
        }
    }

    /// Start the subscription - spawns a background task that listens to the
    /// topic and routes its events to the handler until the topic is closed.
    pub async fn start(self) -> JoinHandle<()> {
        let topic = self.topic.clone();
        let handler_name = self.handler.handler_name();

        info!(topic = %topic, handler = handler_name, "Starting topic subscription");

        let mut receiver = self.event_bus.subscribe(topic.clone()).await;

        tokio::spawn(async move {
            loop {
                let event = match receiver.recv().await {
                    Ok(event) => event,
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(
                            topic = %topic,
                            handler = handler_name,
                            skipped,
                            "Subscriber lagged, events skipped"
                        );
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };

                debug!(
                    topic = %topic,
                    handler = handler_name,
                    event_type = event.event_type(),
                    "Received topic event"
                );

                if let Err(e) = self.handler.handle_event(&topic, event).await {
                    warn!(
                        topic = %topic,
                        handler = handler_name,
                        error = %e,
                        "Topic event handler failed"
                    );
                }
            }

            info!(topic = %topic, handler = handler_name, "Topic subscription ended");
        })
    }
}
