// Public API - what other modules can use
pub use dealer::{DeckSource, ShuffledDeckSource};
pub use models::{Table, TableSummary};
pub use registry::TableRegistry;
pub use service::TableService;

// Internal modules
mod dealer;
pub mod models;
mod registry;
mod service;
