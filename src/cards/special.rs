//! Special cards.
//!
//! Each special has a board-only part that the card can apply by itself
//! (given the context) and, for most of them, a part that needs engine
//! state: the opponent's revealed card, the RNG, the delayed-effect list or
//! the multi-action slot. This module holds the board-only parts and the
//! shared constants; the engine's special phase does the rest.

use serde::{Deserialize, Serialize};

use super::context::EffectContext;
use super::pattern::CellSet;
use crate::board::Board;
use crate::core::{PlayerId, Position};

/// Power of the single-cell fallback several specials degrade into.
pub const SPARK_POWER: i32 = 1;

/// Turns between planting a time bomb and its detonation.
pub const BOMB_FUSE: u32 = 2;

/// Owner-signed push applied to each cell of a detonation.
pub const BOMB_POWER: i32 = 2;

/// Owner-signed push for a correct target lock.
pub const LOCK_REWARD: i32 = 4;

/// Owned cells nudged by an early Last Stand.
pub const LAST_STAND_EARLY_CELLS: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialKind {
    /// Cancels the opponent's special this round, or misses.
    Jammer,
    /// Copies the opponent's Area card and steals one of its cells, or misses.
    Gamble,
    /// Grants two Area plays in one logical turn, then a forced skip.
    DoubleTime,
    /// Replays the player's most recent Area card.
    Echo,
    /// Detonates two turns after it is planted.
    TimeBomb,
    /// Inverts every cell's owner while the window is open.
    InversionField,
    /// Weak random boost early, region lock-in during the endgame.
    LastStand,
    /// Bets on the opponent's Area-card target.
    TargetLock,
}

impl SpecialKind {
    /// Whether Double Time falls back to a Spark instead of granting plays.
    #[must_use]
    pub fn double_time_degrades(ctx: &EffectContext<'_>) -> bool {
        ctx.area_cards_in_hand <= 1
    }

    /// Cells this special will touch, for preview.
    ///
    /// Random or opponent-dependent effects preview as the cells that are
    /// known up front (often none).
    #[must_use]
    pub fn preview_cells(self, board: &Board, target: Position, owner: PlayerId, ctx: &EffectContext<'_>) -> CellSet {
        if !board.contains(target) {
            return CellSet::new();
        }
        match self {
            SpecialKind::Jammer | SpecialKind::Gamble => CellSet::new(),
            SpecialKind::TargetLock => std::iter::once(target).collect(),
            SpecialKind::DoubleTime => {
                if Self::double_time_degrades(ctx) {
                    std::iter::once(target).collect()
                } else {
                    CellSet::new()
                }
            }
            SpecialKind::Echo => match ctx.last_area {
                Some(last) => last
                    .card
                    .affected_cells(board, last.target, owner, &ctx.replaying(last)),
                None => std::iter::once(target).collect(),
            },
            SpecialKind::TimeBomb => blast_cells(board, target),
            SpecialKind::InversionField => {
                if ctx.reversal_window_open() {
                    board.positions().collect()
                } else {
                    std::iter::once(target).collect()
                }
            }
            SpecialKind::LastStand => {
                if ctx.is_endgame() {
                    board
                        .region_containing(target, owner)
                        .map(|r| r.cells().iter().copied().collect())
                        .unwrap_or_default()
                } else {
                    CellSet::new()
                }
            }
        }
    }

    /// Apply the part of this special that depends only on the board and
    /// context. Engine-coordinated parts are left untouched.
    pub fn apply_board_effect(self, board: &mut Board, target: Position, owner: PlayerId, ctx: &EffectContext<'_>) {
        match self {
            SpecialKind::Echo => match ctx.last_area {
                Some(last) => {
                    let replay_ctx = ctx.replaying(last);
                    let delta = last.card.signed_delta(owner);
                    for pos in last.card.affected_cells(board, last.target, owner, &replay_ctx) {
                        board.add_clipped(pos, delta);
                    }
                }
                None => spark(board, target, owner),
            },
            SpecialKind::DoubleTime => {
                if Self::double_time_degrades(ctx) {
                    spark(board, target, owner);
                }
            }
            SpecialKind::InversionField => {
                if ctx.reversal_window_open() {
                    board.negate_all();
                } else {
                    spark(board, target, owner);
                }
            }
            SpecialKind::LastStand => {
                if ctx.is_endgame() {
                    lock_in_region(board, target, owner);
                }
            }
            SpecialKind::Jammer | SpecialKind::Gamble | SpecialKind::TimeBomb | SpecialKind::TargetLock => {}
        }
    }
}

/// The simplest single-cell effect.
pub fn spark(board: &mut Board, target: Position, owner: PlayerId) {
    board.add_clipped(target, SPARK_POWER * owner.sign());
}

/// On-board 3×3 around `center`.
#[must_use]
pub fn blast_cells(board: &Board, center: Position) -> CellSet {
    (-1..=1)
        .flat_map(|dy| (-1..=1).map(move |dx| center.offset(dx, dy)))
        .filter(|p| board.contains(*p))
        .collect()
}

/// Detonate a time bomb planted by `owner`.
pub fn detonate(board: &mut Board, center: Position, owner: PlayerId) -> CellSet {
    let cells = blast_cells(board, center);
    for &pos in &cells {
        board.add_clipped(pos, BOMB_POWER * owner.sign());
    }
    cells
}

/// Endgame Last Stand: double the region holding `target`, reset the rest.
///
/// Returns `false` and leaves the board alone when `target` is not inside
/// one of `owner`'s regions.
pub fn lock_in_region(board: &mut Board, target: Position, owner: PlayerId) -> bool {
    let Some(region) = board.region_containing(target, owner) else {
        return false;
    };
    for pos in board.owned_cells(owner) {
        if region.contains(pos) {
            let value = board.stability(pos).map_or(0, i32::from);
            board.set_clipped(pos, value * 2);
        } else {
            board.set_clipped(pos, 0);
        }
    }
    true
}
