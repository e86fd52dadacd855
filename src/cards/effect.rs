//! Card behaviour against a board.
//!
//! Area and Boost cards are fully described here. Specials only get their
//! board-only part; see [`SpecialKind`](super::SpecialKind) and the engine.

use super::context::EffectContext;
use super::definition::{Card, CardFamily};
use super::pattern::CellSet;
use crate::board::Board;
use crate::core::{PlayerId, Position};

impl Card {
    /// Whether `owner` may target `target` with this card.
    #[must_use]
    pub fn can_play(&self, board: &Board, target: Position, owner: PlayerId, _ctx: &EffectContext<'_>) -> bool {
        match &self.family {
            CardFamily::Area { pattern, .. } => pattern.can_play(board, target),
            CardFamily::Boost { pattern, .. } => pattern.can_play(board, target, owner),
            CardFamily::Special(_) => board.contains(target),
        }
    }

    /// Cells this card would touch. In-bounds and deduplicated.
    #[must_use]
    pub fn affected_cells(&self, board: &Board, target: Position, owner: PlayerId, ctx: &EffectContext<'_>) -> CellSet {
        match &self.family {
            CardFamily::Area { pattern, .. } => pattern.cells(board, target, ctx.rotation, ctx.direction),
            CardFamily::Boost { pattern, .. } => pattern.cells(board, target, owner),
            CardFamily::Special(kind) => kind.preview_cells(board, target, owner, ctx),
        }
    }

    /// Apply this card to `board` on its own.
    ///
    /// The engine never calls this for the simultaneous Area/Boost phase;
    /// it sums deltas across both players first. This is the path used for
    /// isolated plays (multi-action steps, previews, simulation).
    pub fn apply_effect(&self, board: &mut Board, target: Position, owner: PlayerId, ctx: &EffectContext<'_>) {
        match &self.family {
            CardFamily::Area { .. } | CardFamily::Boost { .. } => {
                let delta = self.signed_delta(owner);
                for pos in self.affected_cells(board, target, owner, ctx) {
                    board.add_clipped(pos, delta);
                }
            }
            CardFamily::Special(kind) => kind.apply_board_effect(board, target, owner, ctx),
        }
    }

    /// Whether any cell on the board is a legal target.
    #[must_use]
    pub fn has_legal_target(&self, board: &Board, owner: PlayerId, ctx: &EffectContext<'_>) -> bool {
        board.positions().any(|p| self.can_play(board, p, owner, ctx))
    }
}
