//! Engine history records and resolution outcomes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::state::DelayedEffect;
use crate::cards::CardId;
use crate::core::{PlayerId, PlayerMap, Position};

/// Something that happened during a game, in order.
///
/// Used for:
/// - Replays and debugging
/// - Tests that check resolution order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// A selection was stored as pending.
    Selected {
        turn: u32,
        player: PlayerId,
        card_id: CardId,
        target: Position,
        misfire: bool,
    },

    /// A pending selection was withdrawn.
    SelectionCleared { turn: u32, player: PlayerId },

    /// A card was consumed and its effect applied (or not, for misfires).
    Played {
        turn: u32,
        player: PlayerId,
        card_id: CardId,
        target: Position,
        misfire: bool,
    },

    /// A Double Time play resolved; `remaining_plays` is the count after it.
    MultiActionStep {
        turn: u32,
        player: PlayerId,
        card_id: CardId,
        remaining_plays: u8,
    },

    /// A special did not fire because the opponent jammed it.
    SpecialSuppressed {
        turn: u32,
        player: PlayerId,
        card_id: CardId,
    },

    /// A player weakened their own cells.
    MissPenalty {
        turn: u32,
        player: PlayerId,
        cells: SmallVec<[Position; 4]>,
    },

    /// A delayed effect was scheduled.
    DelayedInstalled { turn: u32, effect: DelayedEffect },

    /// A delayed effect fired.
    DelayedTriggered { turn: u32, effect: DelayedEffect },

    /// The board was inverted and a snapshot kept.
    BoardInverted {
        turn: u32,
        player: PlayerId,
        card_id: CardId,
    },

    /// The turn counter advanced past `turn`.
    TurnEnded { turn: u32 },
}

impl TurnEvent {
    /// Turn the event belongs to.
    #[must_use]
    pub fn turn(&self) -> u32 {
        match self {
            TurnEvent::Selected { turn, .. }
            | TurnEvent::SelectionCleared { turn, .. }
            | TurnEvent::Played { turn, .. }
            | TurnEvent::MultiActionStep { turn, .. }
            | TurnEvent::SpecialSuppressed { turn, .. }
            | TurnEvent::MissPenalty { turn, .. }
            | TurnEvent::DelayedInstalled { turn, .. }
            | TurnEvent::DelayedTriggered { turn, .. }
            | TurnEvent::BoardInverted { turn, .. }
            | TurnEvent::TurnEnded { turn } => *turn,
        }
    }
}

/// Summary of one concluded round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// The turn that was resolved.
    pub turn: u32,
    /// Card each player consumed in the concluding step, if any.
    pub played: PlayerMap<Option<CardId>>,
    /// Whether each player's special was jammed.
    pub suppressed: PlayerMap<bool>,
    /// Delayed effects that fired this round.
    pub triggered: Vec<DelayedEffect>,
    /// The game ended with this round.
    pub finished: bool,
}

/// Outcome of `TurnEngine::resolve_turn`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    /// Nothing happened: wrong phase or a player still has to choose.
    NotReady,
    /// Only intermediate multi-action plays resolved; the round is still open.
    Partial { advanced: SmallVec<[PlayerId; 2]> },
    /// The round concluded and the turn advanced.
    Complete(TurnReport),
}

impl Resolution {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Resolution::Complete(_))
    }

    #[must_use]
    pub fn report(&self) -> Option<&TurnReport> {
        match self {
            Resolution::Complete(report) => Some(report),
            _ => None,
        }
    }
}
