//! Opponent policies.
//!
//! Policies only use the engine's public query surface: they look at the
//! board, the hand and the effect context, simulate on cloned boards, and
//! return a `Selection` for the caller to submit.

use tracing::trace;

use crate::board::Board;
use crate::cards::Card;
use crate::core::{Direction, GameRng, PlayerId, Position, Rotation};
use crate::engine::{GamePhase, Selection, TurnEngine};
use crate::scoring::score_player;

/// Flat bonus added to every Special candidate so they are not starved by
/// their empty board previews.
pub const SPECIAL_BONUS: f64 = 1.5;

// =============================================================================
// Opponent Policy
// =============================================================================

/// Policy for choosing a player's card each round.
pub trait OpponentPolicy: Send + Sync {
    /// Choose a selection for `player`.
    ///
    /// Returns `None` if the player cannot act this round.
    fn choose(&self, engine: &TurnEngine, player: PlayerId, rng: &mut GameRng) -> Option<Selection>;
}

/// Uniform random opponent policy.
///
/// Picks uniformly among legal selections.
#[derive(Clone, Debug, Default)]
pub struct UniformOpponent;

impl OpponentPolicy for UniformOpponent {
    fn choose(&self, engine: &TurnEngine, player: PlayerId, rng: &mut GameRng) -> Option<Selection> {
        if !can_act(engine, player) {
            return None;
        }
        let selections = legal_selections(engine, player);
        rng.choose(&selections)
            .copied()
            .or_else(|| fallback_misfire(engine, player))
    }
}

/// One-ply greedy opponent.
///
/// Simulates every legal selection on a cloned board, rates the result by
/// score difference, and adds `noise * uniform[0, 1)` before picking the best.
#[derive(Clone, Debug)]
pub struct GreedyOpponent {
    pub noise: f64,
}

impl GreedyOpponent {
    #[must_use]
    pub fn new(noise: f64) -> Self {
        Self { noise }
    }
}

impl Default for GreedyOpponent {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl OpponentPolicy for GreedyOpponent {
    fn choose(&self, engine: &TurnEngine, player: PlayerId, rng: &mut GameRng) -> Option<Selection> {
        if !can_act(engine, player) {
            return None;
        }

        let hand = engine.hand(player);
        let mut best: Option<(f64, Selection)> = None;
        for selection in legal_selections(engine, player) {
            let Some(card) = hand.get(selection.card_id) else {
                continue;
            };
            let mut value = rate(engine, player, card, &selection);
            if card.is_special() {
                value += SPECIAL_BONUS;
            }
            value += self.noise * rng.unit();

            if best.map_or(true, |(v, _)| value > v) {
                best = Some((value, selection));
            }
        }

        if let Some((value, selection)) = best {
            trace!(%player, card = %selection.card_id, target = %selection.target, value, "greedy choice");
            return Some(selection);
        }
        fallback_misfire(engine, player)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Score difference from `player`'s point of view.
#[must_use]
pub fn evaluate(board: &Board, player: PlayerId) -> f64 {
    let own = score_player(board, player).total;
    let other = score_player(board, player.opponent()).total;
    f64::from(own) - f64::from(other)
}

fn rate(engine: &TurnEngine, player: PlayerId, card: &Card, selection: &Selection) -> f64 {
    let ctx = engine.effect_context(player, selection);
    let mut board = engine.board().clone();
    card.apply_effect(&mut board, selection.target, player, &ctx);
    evaluate(&board, player)
}

/// Whether `player` may submit a selection right now.
#[must_use]
pub fn can_act(engine: &TurnEngine, player: PlayerId) -> bool {
    engine.phase() == GamePhase::Selecting
        && !engine.is_skipping(player)
        && engine.pending_selection(player).is_none()
        && playable_cards(engine, player).next().is_some()
}

fn playable_cards(engine: &TurnEngine, player: PlayerId) -> impl Iterator<Item = &Card> {
    let area_only = engine.multi_action(player).active;
    engine
        .hand(player)
        .unused()
        .filter(move |c| !area_only || c.is_area())
}

/// Every selection `player` could legally make now.
///
/// Rotations and directions are only varied for cards that use them.
#[must_use]
pub fn legal_selections(engine: &TurnEngine, player: PlayerId) -> Vec<Selection> {
    let board = engine.board();
    let mut out = Vec::new();

    for card in playable_cards(engine, player) {
        let rotations: Vec<Option<Rotation>> = if card.uses_rotation() {
            Rotation::ALL.into_iter().map(Some).collect()
        } else {
            vec![None]
        };
        let directions: Vec<Option<Direction>> = if card.uses_direction() {
            Direction::ALL.into_iter().map(Some).collect()
        } else {
            vec![None]
        };

        for target in board.positions() {
            for &rotation in &rotations {
                for &direction in &directions {
                    let selection = Selection {
                        card_id: card.id,
                        target,
                        rotation,
                        direction,
                    };
                    let ctx = engine.effect_context(player, &selection);
                    if card.can_play(board, target, player, &ctx) {
                        out.push(selection);
                    }
                }
            }
        }
    }
    out
}

/// A misfire of the first playable card, for when nothing is legal.
fn fallback_misfire(engine: &TurnEngine, player: PlayerId) -> Option<Selection> {
    let card = playable_cards(engine, player).next()?;
    trace!(%player, card = %card.id, "no legal target, misfiring");
    Some(Selection::new(card.id, Position::new(0, 0)))
}
