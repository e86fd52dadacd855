//! The turn engine: selection intake and read-only queries.
//!
//! Resolution lives in `resolve.rs`; this file owns construction, the
//! selection rules and everything callers may inspect between rounds.

use im::{HashSet as ImHashSet, Vector};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use super::events::TurnEvent;
use super::selection::{PendingSelection, SelectError, Selection};
use super::state::{DelayedEffect, GamePhase, Hand, MultiAction};
use crate::board::Board;
use crate::cards::{Card, CardCatalog, CardId, EffectContext, FamilyKind, PlayedCard};
use crate::core::{EngineConfig, GameRng, PlayerId, PlayerMap};
use crate::scoring::{final_scores, GameResult, ScoreBreakdown};

/// Simultaneous two-player turn engine.
///
/// Holds the board, both hands and all per-round state. `Clone` is cheap
/// enough for move simulation: the board is a small vector and hands use
/// persistent sets.
///
/// ## Example
///
/// ```
/// use stability_duel::cards::CardId;
/// use stability_duel::core::{EngineConfig, PlayerId, Position};
/// use stability_duel::engine::{Resolution, Selection, TurnEngine};
///
/// let mut engine = TurnEngine::with_default_decks(EngineConfig::default());
/// let spark = Selection::new(CardId::new(1), Position::new(2, 2));
///
/// assert!(engine.select_card(PlayerId::A, spark));
/// assert!(engine.select_card(PlayerId::B, spark));
/// assert!(engine.resolve_turn().is_complete());
///
/// // Equal and opposite: the cell stays neutral.
/// assert_eq!(engine.board().stability(Position::new(2, 2)), Some(0));
/// assert_eq!(engine.current_turn(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct TurnEngine {
    pub(super) config: EngineConfig,
    pub(super) board: Board,
    pub(super) hands: PlayerMap<Hand>,
    pub(super) rng: GameRng,
    pub(super) current_turn: u32,
    pub(super) phase: GamePhase,
    pub(super) pending: PlayerMap<Option<PendingSelection>>,
    pub(super) multi: PlayerMap<MultiAction>,
    /// Skipping the current round.
    pub(super) skipping: PlayerMap<bool>,
    /// Will skip the next round.
    pub(super) skip_next: PlayerMap<bool>,
    pub(super) last_area: PlayerMap<Option<PlayedCard>>,
    pub(super) delayed: Vec<DelayedEffect>,
    pub(super) snapshots: FxHashMap<(PlayerId, CardId), Board>,
    pub(super) history: Vector<TurnEvent>,
}

impl TurnEngine {
    /// Create an engine with explicit hands.
    #[must_use]
    pub fn with_hands(config: EngineConfig, hands: PlayerMap<Vec<Card>>) -> Self {
        let config = config.validated();
        let mut engine = Self {
            board: Board::new(config.board_size),
            hands: PlayerMap::default(),
            rng: GameRng::new(config.seed).for_context("resolution"),
            current_turn: 1,
            phase: GamePhase::Setup,
            pending: PlayerMap::default(),
            multi: PlayerMap::default(),
            skipping: PlayerMap::default(),
            skip_next: PlayerMap::default(),
            last_area: PlayerMap::default(),
            delayed: Vec::new(),
            snapshots: FxHashMap::default(),
            history: Vector::new(),
            config,
        };

        let [a, b] = hands.into_array();
        engine.hands[PlayerId::A] = Hand::new(a);
        engine.hands[PlayerId::B] = Hand::new(b);
        engine.phase = GamePhase::Selecting;
        debug!(
            board_size = engine.config.board_size,
            total_turns = engine.config.total_turns,
            hand_a = engine.hands[PlayerId::A].len(),
            hand_b = engine.hands[PlayerId::B].len(),
            "engine ready"
        );
        engine
    }

    /// Both players get the fixed starter deck.
    #[must_use]
    pub fn with_default_decks(config: EngineConfig) -> Self {
        let deck = CardCatalog::standard().default_deck();
        Self::with_hands(config, PlayerMap::with_value(deck))
    }

    /// Each player gets a seeded random deck of `hand_size` cards respecting
    /// `deck_ratio`.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let catalog = CardCatalog::standard();
        let base = GameRng::new(config.seed);
        let hands = PlayerMap::new(|player| {
            let stream = base.for_context(&format!("hand {}", player.index()));
            catalog.random_deck(&stream, config.hand_size, config.deck_ratio)
        });
        Self::with_hands(config, hands)
    }

    /// Replace the board, e.g. to start from a prepared position.
    #[must_use]
    pub fn with_board(mut self, board: Board) -> Self {
        self.config.board_size = board.size();
        self.board = board;
        self
    }

    // === Selection ===

    /// Store `selection` as `player`'s pending choice for this round.
    ///
    /// A selection whose target is illegal is still accepted as a misfire
    /// when the card has no legal target anywhere, or when it is the last
    /// unused card in the hand.
    pub fn try_select_card(&mut self, player: PlayerId, selection: Selection) -> Result<(), SelectError> {
        let result = self.check_selection(player, &selection);
        match result {
            Ok(misfire) => {
                self.pending[player] = Some(PendingSelection { selection, misfire });
                if misfire {
                    debug!(%player, card = %selection.card_id, target = %selection.target, "misfire accepted");
                } else {
                    trace!(%player, card = %selection.card_id, target = %selection.target, "selection accepted");
                }
                self.history.push_back(TurnEvent::Selected {
                    turn: self.current_turn,
                    player,
                    card_id: selection.card_id,
                    target: selection.target,
                    misfire,
                });
                Ok(())
            }
            Err(err) => {
                debug!(%player, card = %selection.card_id, error = %err, "selection rejected");
                Err(err)
            }
        }
    }

    /// [`try_select_card`](Self::try_select_card) flattened to a flag.
    pub fn select_card(&mut self, player: PlayerId, selection: Selection) -> bool {
        self.try_select_card(player, selection).is_ok()
    }

    /// Validate a selection. `Ok(true)` means accepted as a misfire.
    fn check_selection(&self, player: PlayerId, selection: &Selection) -> Result<bool, SelectError> {
        if self.phase != GamePhase::Selecting {
            return Err(SelectError::WrongPhase(self.phase));
        }
        if self.skipping[player] {
            return Err(SelectError::Skipping);
        }
        if self.pending[player].is_some() {
            return Err(SelectError::AlreadySelected);
        }

        let hand = &self.hands[player];
        let card = hand
            .get(selection.card_id)
            .ok_or(SelectError::NotInHand(selection.card_id))?;
        if hand.is_used(card.id) {
            return Err(SelectError::AlreadyUsed(card.id));
        }
        if self.multi[player].active && !card.is_area() {
            return Err(SelectError::NotAreaCard(card.id));
        }

        let ctx = self.effect_context(player, selection);
        if card.can_play(&self.board, selection.target, player, &ctx) {
            return Ok(false);
        }
        if !card.has_legal_target(&self.board, player, &ctx) || hand.unused_count() == 1 {
            return Ok(true);
        }
        Err(SelectError::IllegalTarget {
            card: card.id,
            target: selection.target,
        })
    }

    /// Withdraw a pending selection.
    pub fn clear_selection(&mut self, player: PlayerId) -> bool {
        if self.phase != GamePhase::Selecting || self.pending[player].take().is_none() {
            return false;
        }
        self.history.push_back(TurnEvent::SelectionCleared {
            turn: self.current_turn,
            player,
        });
        true
    }

    /// Withdraw the pending second play of a Double Time.
    pub fn cancel_second_selection(&mut self, player: PlayerId) -> bool {
        if !self.multi[player].awaiting_last() {
            return false;
        }
        self.clear_selection(player)
    }

    /// Clear both the current and the next-round skip flag.
    pub fn reset_skip_flag(&mut self, player: PlayerId) -> bool {
        if self.phase == GamePhase::Finished {
            return false;
        }
        self.skipping[player] = false;
        self.skip_next[player] = false;
        true
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Hand {
        &self.hands[player]
    }

    #[must_use]
    pub fn used_cards(&self, player: PlayerId) -> &ImHashSet<CardId> {
        self.hands[player].used()
    }

    #[must_use]
    pub fn current_turn(&self) -> u32 {
        self.current_turn
    }

    #[must_use]
    pub fn total_turns(&self) -> u32 {
        self.config.total_turns
    }

    /// Turns left including the current one.
    #[must_use]
    pub fn remaining_turns(&self) -> u32 {
        (self.config.total_turns + 1).saturating_sub(self.current_turn)
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == GamePhase::Finished
    }

    #[must_use]
    pub fn pending_selection(&self, player: PlayerId) -> Option<&Selection> {
        self.pending[player].as_ref().map(|p| &p.selection)
    }

    /// Whether the pending selection was accepted as a misfire.
    #[must_use]
    pub fn is_misfire_pending(&self, player: PlayerId) -> bool {
        self.pending[player].is_some_and(|p| p.misfire)
    }

    #[must_use]
    pub fn multi_action(&self, player: PlayerId) -> &MultiAction {
        &self.multi[player]
    }

    #[must_use]
    pub fn is_skipping(&self, player: PlayerId) -> bool {
        self.skipping[player]
    }

    #[must_use]
    pub fn will_skip_next_turn(&self, player: PlayerId) -> bool {
        self.skip_next[player]
    }

    #[must_use]
    pub fn delayed_effects(&self) -> &[DelayedEffect] {
        &self.delayed
    }

    #[must_use]
    pub fn last_area_card(&self, player: PlayerId) -> Option<&PlayedCard> {
        self.last_area[player].as_ref()
    }

    /// Board as it was just before `player`'s Inversion Field `card` fired.
    #[must_use]
    pub fn reversal_snapshot(&self, player: PlayerId, card: CardId) -> Option<&Board> {
        self.snapshots.get(&(player, card))
    }

    #[must_use]
    pub fn history(&self) -> &Vector<TurnEvent> {
        &self.history
    }

    /// A player with no unused cards left counts as decided.
    fn has_decided(&self, player: PlayerId) -> bool {
        self.skipping[player] || self.pending[player].is_some() || self.hands[player].unused_count() == 0
    }

    /// Whether `resolve_turn` would do anything.
    ///
    /// A first Double Time play may resolve on its own; otherwise every
    /// player must be skipping or have a pending selection.
    #[must_use]
    pub fn are_both_players_ready(&self) -> bool {
        let intermediate = PlayerId::BOTH
            .into_iter()
            .any(|p| self.multi[p].awaiting_first() && self.pending[p].is_some());
        intermediate || PlayerId::BOTH.into_iter().all(|p| self.has_decided(p))
    }

    /// Context `player` would see if `selection` resolved now.
    #[must_use]
    pub fn effect_context(&self, player: PlayerId, selection: &Selection) -> EffectContext<'_> {
        self.base_context()
            .with_rotation(selection.rotation())
            .with_direction(selection.direction())
            .with_last_area(self.last_area[player].as_ref())
            .with_area_cards_in_hand(
                self.hands[player].unused_of_kind(FamilyKind::Area, Some(selection.card_id)),
            )
    }

    /// Turn counters only.
    pub(super) fn base_context<'a>(&self) -> EffectContext<'a> {
        EffectContext::new(self.current_turn, self.config.total_turns)
    }

    #[must_use]
    pub fn final_scores(&self) -> PlayerMap<ScoreBreakdown> {
        final_scores(&self.board)
    }

    /// Outcome by current scores, once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.is_finished()
            .then(|| GameResult::from_scores(&self.final_scores()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::SPARK_ID;
    use crate::core::Position;

    fn engine() -> TurnEngine {
        TurnEngine::with_default_decks(EngineConfig::default())
    }

    fn spark_at(x: i32, y: i32) -> Selection {
        Selection::new(SPARK_ID, Position::new(x, y))
    }

    #[test]
    fn test_starts_selecting() {
        let engine = engine();
        assert_eq!(engine.phase(), GamePhase::Selecting);
        assert_eq!(engine.current_turn(), 1);
        assert_eq!(engine.remaining_turns(), 15);
        assert_eq!(engine.hand(PlayerId::A).len(), 15);
        assert!(engine.result().is_none());
    }

    #[test]
    fn test_second_selection_rejected() {
        let mut engine = engine();
        assert!(engine.select_card(PlayerId::A, spark_at(0, 0)));
        assert_eq!(
            engine.try_select_card(PlayerId::A, Selection::new(CardId::new(2), Position::new(1, 1))),
            Err(SelectError::AlreadySelected)
        );
        assert!(engine.clear_selection(PlayerId::A));
        assert!(engine.select_card(PlayerId::A, Selection::new(CardId::new(2), Position::new(1, 1))));
    }

    #[test]
    fn test_unknown_card_rejected() {
        let mut engine = engine();
        assert_eq!(
            engine.try_select_card(PlayerId::A, Selection::new(CardId::new(99), Position::new(0, 0))),
            Err(SelectError::NotInHand(CardId::new(99)))
        );
        assert!(engine.pending_selection(PlayerId::A).is_none());
    }

    #[test]
    fn test_illegal_target_rejected() {
        let mut engine = engine();
        // Bastion is corner-only.
        let err = engine
            .try_select_card(PlayerId::A, Selection::new(CardId::new(11), Position::new(2, 2)))
            .unwrap_err();
        assert!(matches!(err, SelectError::IllegalTarget { .. }));
    }

    #[test]
    fn test_boost_without_owned_cells_misfires() {
        let mut engine = engine();
        // Fortify needs an owned target and A owns nothing yet.
        assert!(engine.select_card(PlayerId::A, Selection::new(CardId::new(13), Position::new(2, 2))));
        assert!(engine.is_misfire_pending(PlayerId::A));
    }

    #[test]
    fn test_ready_needs_both() {
        let mut engine = engine();
        assert!(!engine.are_both_players_ready());
        engine.select_card(PlayerId::A, spark_at(0, 0));
        assert!(!engine.are_both_players_ready());
        engine.select_card(PlayerId::B, spark_at(1, 1));
        assert!(engine.are_both_players_ready());
    }

    #[test]
    fn test_skipping_counts_as_decided() {
        let mut engine = engine();
        engine.skipping[PlayerId::B] = true;
        assert_eq!(engine.try_select_card(PlayerId::B, spark_at(0, 0)), Err(SelectError::Skipping));
        engine.select_card(PlayerId::A, spark_at(0, 0));
        assert!(engine.are_both_players_ready());
    }

    #[test]
    fn test_effect_context_counts_other_area_cards() {
        let engine = engine();
        let ctx = engine.effect_context(PlayerId::A, &Selection::new(CardId::new(21), Position::new(0, 0)));
        assert_eq!(ctx.area_cards_in_hand, 7);
        let ctx = engine.effect_context(PlayerId::A, &spark_at(0, 0));
        assert_eq!(ctx.area_cards_in_hand, 6);
    }

    #[test]
    fn test_random_decks_differ_per_player() {
        let engine = TurnEngine::new(EngineConfig::default().with_seed(11));
        let a: Vec<_> = engine.hand(PlayerId::A).cards().map(|c| c.id).collect();
        let b: Vec<_> = engine.hand(PlayerId::B).cards().map(|c| c.id).collect();
        assert_eq!(a.len(), 15);
        assert_eq!(b.len(), 15);

        let again = TurnEngine::new(EngineConfig::default().with_seed(11));
        let a_again: Vec<_> = again.hand(PlayerId::A).cards().map(|c| c.id).collect();
        assert_eq!(a, a_again);
    }
}
