//! Player selections and why they get rejected.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::GamePhase;
use crate::cards::CardId;
use crate::core::{Direction, Position, Rotation};

/// A card choice for one round: which card, where, and how.
///
/// ## Example
///
/// ```
/// use stability_duel::cards::CardId;
/// use stability_duel::core::{Direction, Position};
/// use stability_duel::engine::Selection;
///
/// let line = Selection::new(CardId::new(6), Position::new(2, 2))
///     .with_direction(Direction::Vertical);
/// assert_eq!(line.direction(), Direction::Vertical);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Selection {
    pub card_id: CardId,
    pub target: Position,
    pub rotation: Option<Rotation>,
    pub direction: Option<Direction>,
}

impl Selection {
    #[must_use]
    pub fn new(card_id: CardId, target: Position) -> Self {
        Self {
            card_id,
            target,
            rotation: None,
            direction: None,
        }
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = Some(rotation);
        self
    }

    #[must_use]
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    /// Chosen rotation, or the default.
    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.rotation.unwrap_or_default()
    }

    /// Chosen direction, or the default.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction.unwrap_or_default()
    }
}

/// A stored selection awaiting resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSelection {
    pub selection: Selection,
    /// Accepted without a legal target; resolves with no effect.
    pub misfire: bool,
}

/// Reasons `try_select_card` refuses a selection.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SelectError {
    #[error("selections are closed during {0:?}")]
    WrongPhase(GamePhase),

    #[error("player is skipping this turn")]
    Skipping,

    #[error("player already has a pending selection")]
    AlreadySelected,

    #[error("{0} is not in the player's hand")]
    NotInHand(CardId),

    #[error("{0} has already been played")]
    AlreadyUsed(CardId),

    #[error("only Area cards may be played during multi-action, got {0}")]
    NotAreaCard(CardId),

    #[error("{card} cannot target {target}")]
    IllegalTarget { card: CardId, target: Position },
}
