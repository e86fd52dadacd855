//! Turn engine lifecycle tests.
//!
//! These tests drive the engine through its public API only: selection
//! rules, resolution, skip flags, misfires and the end of the game.

use stability_duel::board::Board;
use stability_duel::cards::{CardCatalog, CardId, SPARK_ID};
use stability_duel::core::{EngineConfig, PlayerId, PlayerMap, Position};
use stability_duel::engine::{GamePhase, Resolution, SelectError, Selection, TurnEngine, TurnEvent};

fn deal(ids: &[u32]) -> Vec<stability_duel::cards::Card> {
    let catalog = CardCatalog::standard();
    ids.iter()
        .filter_map(|&id| catalog.get(CardId::new(id)).cloned())
        .collect()
}

fn engine_with(config: EngineConfig, a: &[u32], b: &[u32]) -> TurnEngine {
    let mut hands = PlayerMap::new(|_| Vec::new());
    hands[PlayerId::A] = deal(a);
    hands[PlayerId::B] = deal(b);
    TurnEngine::with_hands(config, hands)
}

fn select(id: u32, x: i32, y: i32) -> Selection {
    Selection::new(CardId::new(id), Position::new(x, y))
}

// =============================================================================
// Basic rounds
// =============================================================================

#[test]
fn test_equal_sparks_cancel() {
    let mut engine = TurnEngine::with_default_decks(EngineConfig::default());
    let spark = Selection::new(SPARK_ID, Position::new(2, 2));

    assert!(engine.select_card(PlayerId::A, spark));
    assert!(engine.select_card(PlayerId::B, spark));
    let resolution = engine.resolve_turn();

    assert!(resolution.is_complete());
    assert_eq!(engine.board().stability(Position::new(2, 2)), Some(0));
    assert_eq!(engine.board().owner_at(Position::new(2, 2)), None);

    let scores = engine.final_scores();
    assert_eq!(scores[PlayerId::A].area, 0);
    assert_eq!(scores[PlayerId::B].area, 0);
}

#[test]
fn test_opposing_area_cards_sum_before_clipping() {
    let board = Board::from_rows(5, &[&[0, 0, 0], &[0, 4, 0]]);
    let mut engine = engine_with(EngineConfig::default(), &[2, 1], &[1, 2]).with_board(board);

    engine.select_card(PlayerId::A, select(2, 1, 1));
    engine.select_card(PlayerId::B, select(1, 1, 1));
    engine.resolve_turn();

    // +4 with +3 and -1 together: 6, clipped once to 5.
    assert_eq!(engine.board().stability(Position::new(1, 1)), Some(5));
}

#[test]
fn test_boost_reads_board_before_area_phase() {
    // B's Cross flips (1,0) this turn, but A's Fortify still sees it as owned.
    let board = Board::from_rows(5, &[&[0, 1, 0], &[0, 1, 0]]);
    let mut engine = engine_with(EngineConfig::default(), &[13, 1], &[3, 1]).with_board(board);

    engine.select_card(PlayerId::A, select(13, 1, 1));
    engine.select_card(PlayerId::B, select(3, 1, 0));
    engine.resolve_turn();

    // (1,0): 1 + 1 (Fortify) - 1 (Cross) = 1.
    assert_eq!(engine.board().stability(Position::new(1, 0)), Some(1));
    // (1,1): 1 + 1 - 1 = 1.
    assert_eq!(engine.board().stability(Position::new(1, 1)), Some(1));
    // (0,0) only hit by the Cross.
    assert_eq!(engine.board().stability(Position::new(0, 0)), Some(-1));
}

#[test]
fn test_turn_counter_and_remaining() {
    let mut engine = TurnEngine::with_default_decks(EngineConfig::default());
    assert_eq!(engine.remaining_turns(), 15);

    engine.select_card(PlayerId::A, select(1, 0, 0));
    engine.select_card(PlayerId::B, select(1, 4, 4));
    engine.resolve_turn();

    assert_eq!(engine.current_turn(), 2);
    assert_eq!(engine.remaining_turns(), 14);
    assert!(engine.pending_selection(PlayerId::A).is_none());
    assert!(engine.pending_selection(PlayerId::B).is_none());
}

// =============================================================================
// Selection rules
// =============================================================================

#[test]
fn test_used_card_rejected() {
    let mut engine = engine_with(EngineConfig::default(), &[1, 2], &[1, 2]);
    engine.select_card(PlayerId::A, select(1, 0, 0));
    engine.select_card(PlayerId::B, select(1, 4, 4));
    engine.resolve_turn();

    assert_eq!(
        engine.try_select_card(PlayerId::A, select(1, 1, 1)),
        Err(SelectError::AlreadyUsed(SPARK_ID))
    );
}

#[test]
fn test_last_card_misfires_on_illegal_target() {
    // Bastion is corner-only; as the last card it is accepted anyway.
    let mut engine = engine_with(EngineConfig::default(), &[11], &[1]);
    assert!(engine.select_card(PlayerId::A, select(11, 2, 2)));
    assert!(engine.is_misfire_pending(PlayerId::A));

    engine.select_card(PlayerId::B, select(1, 4, 4));
    engine.resolve_turn();

    assert!(engine.used_cards(PlayerId::A).contains(&CardId::new(11)));
    assert_eq!(engine.board().owned_cells(PlayerId::A).len(), 0);
}

#[test]
fn test_misfire_is_invisible_to_target_lock() {
    let mut engine = engine_with(EngineConfig::default(), &[26, 1], &[11]);
    engine.select_card(PlayerId::B, select(11, 2, 2));
    engine.select_card(PlayerId::A, select(26, 2, 2));
    engine.resolve_turn();

    // No revealed Area card, neutral cell: A takes a (harmless) miss penalty.
    assert_eq!(engine.board().stability(Position::new(2, 2)), Some(0));
    assert!(engine
        .history()
        .iter()
        .any(|e| matches!(e, TurnEvent::MissPenalty { player, .. } if *player == PlayerId::A)));
}

#[test]
fn test_exhausted_hand_counts_as_ready() {
    let mut engine = engine_with(EngineConfig::default(), &[1], &[1, 2]);
    engine.select_card(PlayerId::A, select(1, 0, 0));
    engine.select_card(PlayerId::B, select(1, 4, 4));
    engine.resolve_turn();

    assert_eq!(engine.hand(PlayerId::A).unused_count(), 0);
    engine.select_card(PlayerId::B, select(2, 3, 3));
    assert!(engine.are_both_players_ready());
    assert!(engine.resolve_turn().is_complete());
    assert_eq!(engine.board().stability(Position::new(3, 3)), Some(-3));
}

// =============================================================================
// Skip flags
// =============================================================================

#[test]
fn test_reset_skip_flag() {
    let mut engine = engine_with(EngineConfig::default(), &[21, 1, 2, 3], &[1, 2, 3, 5]);
    engine.select_card(PlayerId::A, select(21, 0, 0));
    engine.select_card(PlayerId::B, select(1, 4, 4));
    engine.resolve_turn();

    engine.select_card(PlayerId::A, select(1, 0, 0));
    engine.resolve_turn();
    engine.select_card(PlayerId::A, select(2, 1, 1));
    engine.select_card(PlayerId::B, select(2, 4, 3));
    engine.resolve_turn();

    assert!(engine.is_skipping(PlayerId::A));
    assert!(engine.reset_skip_flag(PlayerId::A));
    assert!(!engine.is_skipping(PlayerId::A));
    assert!(engine.select_card(PlayerId::A, select(3, 2, 2)));
}

#[test]
fn test_forced_end_turn_clears_pending() {
    let mut engine = TurnEngine::with_default_decks(EngineConfig::default());
    engine.select_card(PlayerId::A, select(1, 0, 0));
    engine.end_turn();

    assert_eq!(engine.current_turn(), 2);
    assert!(engine.pending_selection(PlayerId::A).is_none());
    // The card was never resolved, so it is still playable.
    assert!(engine.select_card(PlayerId::A, select(1, 0, 0)));
}

// =============================================================================
// End of game
// =============================================================================

#[test]
fn test_game_finishes_after_last_turn() {
    let config = EngineConfig::default().with_total_turns(2);
    let mut engine = engine_with(config, &[2, 3, 1], &[1, 5, 2]);

    engine.select_card(PlayerId::A, select(2, 0, 0));
    engine.select_card(PlayerId::B, select(1, 4, 4));
    assert!(engine.resolve_turn().is_complete());
    assert_eq!(engine.phase(), GamePhase::Selecting);

    engine.select_card(PlayerId::A, select(3, 2, 2));
    engine.select_card(PlayerId::B, select(5, 3, 3));
    let resolution = engine.resolve_turn();
    assert!(resolution.report().is_some_and(|r| r.finished && r.turn == 2));
    assert_eq!(engine.phase(), GamePhase::Finished);

    // Every mutator is now rejected.
    assert_eq!(
        engine.try_select_card(PlayerId::A, select(1, 1, 1)),
        Err(SelectError::WrongPhase(GamePhase::Finished))
    );
    assert!(!engine.clear_selection(PlayerId::A));
    assert!(!engine.cancel_second_selection(PlayerId::A));
    assert!(!engine.reset_skip_flag(PlayerId::B));
    assert_eq!(engine.resolve_turn(), Resolution::NotReady);
    engine.end_turn();
    assert_eq!(engine.current_turn(), 3);

    let result = engine.result().unwrap();
    let scores = engine.final_scores();
    assert_eq!(
        result.is_winner(PlayerId::A),
        scores[PlayerId::A].total > scores[PlayerId::B].total
    );
}

#[test]
fn test_history_records_rounds_in_order() {
    let mut engine = TurnEngine::with_default_decks(EngineConfig::default());
    engine.select_card(PlayerId::A, select(1, 0, 0));
    engine.select_card(PlayerId::B, select(2, 4, 4));
    engine.resolve_turn();

    let kinds: Vec<&str> = engine
        .history()
        .iter()
        .map(|e| match e {
            TurnEvent::Selected { .. } => "selected",
            TurnEvent::Played { .. } => "played",
            TurnEvent::TurnEnded { .. } => "ended",
            _ => "other",
        })
        .collect();
    assert_eq!(kinds, ["selected", "selected", "played", "played", "ended"]);
    assert!(engine.history().iter().all(|e| e.turn() == 1));
}

#[test]
fn test_engine_clone_is_independent() {
    let mut engine = TurnEngine::with_default_decks(EngineConfig::default());
    let snapshot = engine.clone();

    engine.select_card(PlayerId::A, select(1, 0, 0));
    engine.select_card(PlayerId::B, select(1, 4, 4));
    engine.resolve_turn();

    assert_eq!(snapshot.current_turn(), 1);
    assert!(snapshot.used_cards(PlayerId::A).is_empty());
    assert_eq!(snapshot.board().stability(Position::new(0, 0)), Some(0));
}
