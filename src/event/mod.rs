// Event-driven plumbing between the table core and its transports
//
// Commands come in as `TableCommand`s; everything the core decides goes out
// as `TableEvent`s on a `Topic`.

// Public API - what other modules can use
pub use bus::EventBus;
pub use events::{TableCommand, TableEvent, Topic};
pub use handler::{EventError, TopicEventHandler};
pub use subscription::TopicSubscription;

// Internal modules
mod bus;
mod events;
mod handler;
mod subscription;
