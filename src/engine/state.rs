//! Per-player round state held by the engine.
//!
//! ## Hand
//!
//! The dealt cards never change. Playing a card only adds its id to the
//! used set, which is an `im` persistent set so engine clones stay cheap.
//!
//! ## MultiAction
//!
//! Double Time grants two Area plays spread over one logical turn.
//! `remaining_plays` counts down 2 → 1 → 0 and the slot is cleared on the
//! last play.

use im::{HashSet as ImHashSet, Vector};
use serde::{Deserialize, Serialize};

use super::selection::Selection;
use crate::cards::{Card, CardId, FamilyKind};
use crate::core::{PlayerId, Position};

/// Engine phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Dealing; never observed once construction returns.
    #[default]
    Setup,
    /// Waiting for selections.
    Selecting,
    /// Running the resolution pipeline.
    Resolving,
    /// All turns played.
    Finished,
}

/// A player's dealt cards plus the set already played.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    cards: Vector<Card>,
    used: ImHashSet<CardId>,
}

impl Hand {
    /// Create a hand. Duplicate ids keep their first occurrence.
    #[must_use]
    pub fn new(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut seen = ImHashSet::new();
        let cards = cards
            .into_iter()
            .filter(|c| seen.insert(c.id).is_none())
            .collect();
        Self {
            cards,
            used: ImHashSet::new(),
        }
    }

    /// Every dealt card in deal order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn is_used(&self, id: CardId) -> bool {
        self.used.contains(&id)
    }

    /// Mark a card as played. Returns `false` if it was already used or is
    /// not in this hand.
    pub fn mark_used(&mut self, id: CardId) -> bool {
        self.contains(id) && self.used.insert(id).is_none()
    }

    #[must_use]
    pub fn used(&self) -> &ImHashSet<CardId> {
        &self.used
    }

    /// Unplayed cards in deal order.
    pub fn unused(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| !self.used.contains(&c.id))
    }

    #[must_use]
    pub fn unused_count(&self) -> usize {
        self.cards.len() - self.used.len()
    }

    /// Unplayed cards of `kind`, not counting `except`.
    #[must_use]
    pub fn unused_of_kind(&self, kind: FamilyKind, except: Option<CardId>) -> usize {
        self.unused()
            .filter(|c| c.kind() == kind && Some(c.id) != except)
            .count()
    }
}

/// Double Time progress for one player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiAction {
    pub active: bool,
    pub remaining_plays: u8,
    /// The first Area play, once it has resolved.
    pub first_selection: Option<Selection>,
}

impl MultiAction {
    /// Fresh multi-action with two plays to go.
    #[must_use]
    pub fn granted() -> Self {
        Self {
            active: true,
            remaining_plays: 2,
            first_selection: None,
        }
    }

    /// Waiting for the first of the two plays.
    #[must_use]
    pub fn awaiting_first(&self) -> bool {
        self.active && self.remaining_plays > 1
    }

    /// Waiting for the last play.
    #[must_use]
    pub fn awaiting_last(&self) -> bool {
        self.active && self.remaining_plays == 1
    }
}

/// A card effect scheduled for a later turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayedEffect {
    pub card_id: CardId,
    pub position: Position,
    pub owner: PlayerId,
    pub installed_turn: u32,
    pub trigger_turn: u32,
}

impl DelayedEffect {
    /// Turns until detonation, 0 once due.
    #[must_use]
    pub fn turns_remaining(&self, current_turn: u32) -> u32 {
        self.trigger_turn.saturating_sub(current_turn)
    }

    #[must_use]
    pub fn is_due(&self, current_turn: u32) -> bool {
        self.trigger_turn <= current_turn
    }
}
