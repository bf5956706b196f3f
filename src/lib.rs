// Library crate for the Texas Hold'em table server
// This file exposes the public API for the binary and integration tests

pub mod config;
pub mod event;
pub mod game;
pub mod shared;
pub mod table;

// Re-export commonly used types for easier access in tests
pub use config::RegistryConfig;
pub use event::{EventBus, TableCommand, TableEvent, Topic, TopicEventHandler, TopicSubscription};
pub use game::{GameSession, HandCategory};
pub use shared::{ErrorKind, TableError};
pub use table::{DeckSource, TableRegistry, TableService, TableSummary};
