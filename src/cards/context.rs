//! Turn context handed to every card call.
//!
//! Cards never read hidden module state. The engine builds an
//! `EffectContext` per call with the turn counters, the selection's
//! modifiers and the per-player memory some specials need.

use serde::{Deserialize, Serialize};

use super::definition::Card;
use crate::core::{Direction, Position, Rotation};

/// Turns before the end during which the endgame rules apply.
pub const ENDGAME_TURNS: u32 = 3;

/// An Area card as it was played: the card plus where and how.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedCard {
    pub card: Card,
    pub target: Position,
    pub rotation: Rotation,
    pub direction: Direction,
}

/// Immutable per-call context.
#[derive(Clone, Copy, Debug)]
pub struct EffectContext<'a> {
    /// Current turn, starting at 1.
    pub current_turn: u32,

    /// Total turns in the game.
    pub total_turns: u32,

    /// Rotation chosen with the selection.
    pub rotation: Rotation,

    /// Direction chosen with the selection.
    pub direction: Direction,

    /// The acting player's most recent Area card, if any.
    pub last_area: Option<&'a PlayedCard>,

    /// Unused Area cards left in the acting player's hand, not counting
    /// the card being played.
    pub area_cards_in_hand: usize,
}

impl<'a> EffectContext<'a> {
    #[must_use]
    pub fn new(current_turn: u32, total_turns: u32) -> Self {
        Self {
            current_turn,
            total_turns,
            rotation: Rotation::default(),
            direction: Direction::default(),
            last_area: None,
            area_cards_in_hand: 0,
        }
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn with_last_area(mut self, last_area: Option<&'a PlayedCard>) -> Self {
        self.last_area = last_area;
        self
    }

    #[must_use]
    pub fn with_area_cards_in_hand(mut self, count: usize) -> Self {
        self.area_cards_in_hand = count;
        self
    }

    /// Same turn counters, with the modifiers of an earlier play.
    #[must_use]
    pub fn replaying(self, played: &PlayedCard) -> Self {
        self.with_rotation(played.rotation)
            .with_direction(played.direction)
    }

    /// Turns left including the current one.
    #[must_use]
    pub fn remaining_turns(&self) -> u32 {
        (self.total_turns + 1).saturating_sub(self.current_turn)
    }

    /// Whether the reversal field may still invert the board.
    #[must_use]
    pub fn reversal_window_open(&self) -> bool {
        self.current_turn <= self.total_turns.saturating_sub(ENDGAME_TURNS)
    }

    #[must_use]
    pub fn is_endgame(&self) -> bool {
        self.remaining_turns() <= ENDGAME_TURNS
    }
}
