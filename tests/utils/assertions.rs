//! Test assertion helpers - fluent API for verifying test expectations
#![allow(dead_code)] // Test utilities may not all be used in every test

use holdem_tables::{TableEvent, Topic};

use super::setup::TestSetup;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct EventAssertion<'a> {
    setup: &'a TestSetup,
    topics: Vec<Topic>,
}

impl<'a> EventAssertion<'a> {
    /// Create an assertion for every player's private topic
    pub fn for_all_players(setup: &'a TestSetup) -> Self {
        let topics = setup
            .players
            .iter()
            .map(|p| Topic::Player(p.clone()))
            .collect();
        Self { setup, topics }
    }

    pub fn for_players(setup: &'a TestSetup, players: Vec<&str>) -> Self {
        let topics = players
            .into_iter()
            .map(|p| Topic::Player(p.to_string()))
            .collect();
        Self { setup, topics }
    }

    pub fn for_table(setup: &'a TestSetup, table_id: &str) -> Self {
        Self {
            setup,
            topics: vec![Topic::Table(table_id.to_string())],
        }
    }

    pub fn for_lobby(setup: &'a TestSetup) -> Self {
        Self {
            setup,
            topics: vec![Topic::Lobby],
        }
    }

    /// Assert the next event on each topic has the given type (consumes it)
    pub async fn received_event_type(self, expected_type: &str) -> Vec<TableEvent> {
        let mut events = vec![];

        for topic in &self.topics {
            let event = self.setup.transport.consume_event_for(topic).await;
            let event = match event {
                Some(event) => event,
                None => panic!("{} should have received {}", topic, expected_type),
            };
            assert_eq!(
                event.event_type(),
                expected_type,
                "{} received wrong event type",
                topic
            );
            events.push(event);
        }

        events
    }

    /// Assert nothing is waiting on any of the topics
    pub async fn received_no_events(self) {
        for topic in &self.topics {
            let events = self.setup.transport.events_for(topic).await;
            assert!(events.is_empty(), "{} should have no events, got {:?}", topic, events);
        }
    }

    /// All events still queued on the topics, in delivery order
    pub async fn remaining_events(self) -> Vec<TableEvent> {
        let mut events = vec![];
        for topic in &self.topics {
            events.extend(self.setup.transport.events_for(topic).await);
        }
        events
    }

    /// Count queued events of one type across the topics
    pub async fn count_of(self, event_type: &str) -> usize {
        self.remaining_events()
            .await
            .iter()
            .filter(|e| e.event_type() == event_type)
            .count()
    }
}
