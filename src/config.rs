use crate::game::session::{MAX_PLAYERS, MIN_PLAYERS};

pub const DEFAULT_MAX_PLAYERS_PER_TABLE: usize = 6;
pub const DEFAULT_EVENT_CHANNEL_CAPACITY: usize = 100;
/// Upper bound on buffered events per topic; channels allocate every slot up front
pub const MAX_EVENT_CHANNEL_CAPACITY: usize = 65_536;

/// Configuration for the table registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Seats per table; always within what one deck can deal (2..=10)
    pub max_players_per_table: usize,
    /// Buffered events per topic before slow subscribers start lagging
    pub event_channel_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_players_per_table: DEFAULT_MAX_PLAYERS_PER_TABLE,
            event_channel_capacity: DEFAULT_EVENT_CHANNEL_CAPACITY,
        }
    }
}

impl RegistryConfig {
    /// Reads `HOLDEM_MAX_PLAYERS_PER_TABLE` and `HOLDEM_EVENT_CHANNEL_CAPACITY`,
    /// falling back to the defaults for anything missing or unparsable.
    pub fn from_env() -> Self {
        let max_players_per_table = std::env::var("HOLDEM_MAX_PLAYERS_PER_TABLE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_PLAYERS_PER_TABLE);

        let event_channel_capacity = std::env::var("HOLDEM_EVENT_CHANNEL_CAPACITY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_EVENT_CHANNEL_CAPACITY);

        Self::default()
            .with_max_players_per_table(max_players_per_table)
            .with_event_channel_capacity(event_channel_capacity)
    }

    pub fn with_max_players_per_table(mut self, max_players: usize) -> Self {
        self.max_players_per_table = max_players.clamp(MIN_PLAYERS, MAX_PLAYERS);
        self
    }

    pub fn with_event_channel_capacity(mut self, capacity: usize) -> Self {
        // broadcast::channel panics on zero or oversized capacity
        self.event_channel_capacity = capacity.clamp(1, MAX_EVENT_CHANNEL_CAPACITY);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RegistryConfig::default();
        assert_eq!(config.max_players_per_table, 6);
        assert_eq!(config.event_channel_capacity, 100);
    }

    #[test]
    fn test_limits_are_clamped() {
        assert_eq!(
            RegistryConfig::default()
                .with_max_players_per_table(40)
                .max_players_per_table,
            10
        );
        assert_eq!(
            RegistryConfig::default()
                .with_max_players_per_table(0)
                .max_players_per_table,
            2
        );
        assert_eq!(
            RegistryConfig::default()
                .with_event_channel_capacity(0)
                .event_channel_capacity,
            1
        );
        assert_eq!(
            RegistryConfig::default()
                .with_event_channel_capacity(usize::MAX)
                .event_channel_capacity,
            MAX_EVENT_CHANNEL_CAPACITY
        );
    }
}
