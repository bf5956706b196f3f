use tracing::{debug, info};

use super::models::TableSummary;
use crate::event::{EventBus, TableEvent};
use crate::game::{Card, Deck, GameError, GameSession, Phase, Winner};

/// Supplies the deck each new game is dealt from
pub trait DeckSource: Send + Sync {
    /// Called with the table already marked in progress, just before dealing
    fn deck(&self, table: &TableSummary) -> Deck;
}

/// Default source: a freshly shuffled 52-card deck per game
#[derive(Debug, Default, Clone, Copy)]
pub struct ShuffledDeckSource;

impl DeckSource for ShuffledDeckSource {
    fn deck(&self, _table: &TableSummary) -> Deck {
        Deck::shuffled()
    }
}

/// Plays one hand at `table_id` from deal to winner, publishing each step.
///
/// Hole cards go to each player's own topic, showdown results to both the
/// player and the table, everything else to the table. Stops at the first error, leaving `session` wherever it failed.
pub async fn play_hand(
    table_id: &str,
    session: &mut GameSession,
    players: &[String],
    deck: Deck,
    bus: &EventBus,
) -> Result<Winner, GameError> {
    bus.emit_to_table(
        table_id,
        TableEvent::GameStarted {
            table_id: table_id.to_string(),
            players: players.to_vec(),
        },
    )
    .await;

    session.start_with_deck(players, deck)?;
    for player in session.players() {
        bus.emit_to_player(
            &player.name,
            TableEvent::PrivateCardsDealt {
                player: player.name.clone(),
                cards: player.hole_cards.clone(),
            },
        )
        .await;
    }
    debug!(table_id = %table_id, players = players.len(), "Hole cards dealt");

    let flop = session.deal_flop()?.to_vec();
    reveal(bus, table_id, Phase::Flop, flop).await;

    let turn = session.deal_turn()?.to_vec();
    reveal(bus, table_id, Phase::Turn, turn).await;

    let river = session.deal_river()?.to_vec();
    reveal(bus, table_id, Phase::River, river).await;

    let categories = session.showdown()?;
    for player in session.players() {
        if let Some(category) = categories.get(&player.name) {
            let result = TableEvent::ShowdownResult {
                player: player.name.clone(),
                category: *category,
            };
            bus.emit_to_player(&player.name, result.clone()).await;
            bus.emit_to_table(table_id, result).await;
        }
    }

    let winner = session.winner()?;
    info!(
        table_id = %table_id,
        winner = %winner.name,
        hand = %winner.hand,
        "Game won"
    );

    bus.emit_to_table(
        table_id,
        TableEvent::GameWon {
            table_id: table_id.to_string(),
            winner: winner.name.clone(),
            category: winner.category(),
        },
    )
    .await;
    bus.emit_to_table(
        table_id,
        TableEvent::GameEnded {
            table_id: table_id.to_string(),
        },
    )
    .await;

    Ok(winner)
}

async fn reveal(bus: &EventBus, table_id: &str, phase: Phase, cards: Vec<Card>) {
    debug!(table_id = %table_id, phase = %phase, board = cards.len(), "Community cards revealed");
    bus.emit_to_table(
        table_id,
        TableEvent::CommunityCardsRevealed {
            table_id: table_id.to_string(),
            phase,
            cards,
        },
    )
    .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Topic;
    use crate::game::cards::DeckError;
    use crate::game::HandCategory;

    fn stacked_deck(cards: &str) -> Deck {
        Deck::from_cards(
            cards
                .split_whitespace()
                .map(|c| Card::from_string(c).unwrap())
                .collect(),
        )
    }

    fn players() -> Vec<String> {
        vec!["alice".to_string(), "bob".to_string()]
    }

    fn drain(rx: &mut tokio::sync::broadcast::Receiver<TableEvent>) -> Vec<TableEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_play_hand_publishes_in_order() {
        let bus = EventBus::new(32);
        let mut table_rx = bus.subscribe(Topic::Table("t1".to_string())).await;
        let mut alice_rx = bus.subscribe(Topic::Player("alice".to_string())).await;

        // alice: Ah As, bob: 2c 7d; board Ad Kh Qs 9c 4h
        let deck = stacked_deck("Ah 2c As 7d Ad Kh Qs 9c 4h");
        let mut session = GameSession::new();
        let winner = play_hand("t1", &mut session, &players(), deck, &bus)
            .await
            .unwrap();

        assert_eq!(winner.name, "alice");
        assert_eq!(winner.category(), HandCategory::ThreeOfAKind);
        assert!(session.is_finished());

        let private = drain(&mut alice_rx);
        assert_eq!(
            private,
            vec![
                TableEvent::PrivateCardsDealt {
                    player: "alice".to_string(),
                    cards: vec![
                        Card::from_string("Ah").unwrap(),
                        Card::from_string("As").unwrap()
                    ],
                },
                TableEvent::ShowdownResult {
                    player: "alice".to_string(),
                    category: HandCategory::ThreeOfAKind,
                },
            ]
        );

        let types: Vec<&str> = drain(&mut table_rx).iter().map(|e| e.event_type()).collect();
        assert_eq!(
            types,
            vec![
                "game_started",
                "community_cards_revealed",
                "community_cards_revealed",
                "community_cards_revealed",
                "showdown_result",
                "showdown_result",
                "game_won",
                "game_ended",
            ]
        );
    }

    #[tokio::test]
    async fn test_play_hand_stops_on_short_deck() {
        let bus = EventBus::new(32);
        let mut table_rx = bus.subscribe(Topic::Table("t1".to_string())).await;

        let deck = stacked_deck("Ah 2c As 7d Ad");
        let mut session = GameSession::new();
        let result = play_hand("t1", &mut session, &players(), deck, &bus).await;

        assert_eq!(result, Err(GameError::Deck(DeckError::EmptyDeck)));
        let events = drain(&mut table_rx);
        assert!(events
            .iter()
            .all(|e| !matches!(e, TableEvent::GameWon { .. })));
    }
}
