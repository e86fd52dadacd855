//! Card definitions - immutable card identity plus family data.
//!
//! A `Card` never holds game state. Anything a card needs to remember
//! across rounds (the last Area card played, a reversal snapshot) is kept
//! by the engine and handed back through `EffectContext`.

use serde::{Deserialize, Serialize};

use super::pattern::{AreaPattern, BoostPattern};
use super::special::SpecialKind;

/// Unique identifier for a card definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The three card families, without their payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FamilyKind {
    Area,
    Boost,
    Special,
}

/// Family tag plus the data that family needs.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardFamily {
    /// Paints a fixed pattern around the target regardless of ownership.
    Area { power: i32, pattern: AreaPattern },
    /// Pattern filtered by the player's ownership at resolution time.
    Boost { power: i32, pattern: BoostPattern },
    /// Unique effect, often coordinated by the engine.
    Special(SpecialKind),
}

impl CardFamily {
    #[must_use]
    pub fn kind(&self) -> FamilyKind {
        match self {
            CardFamily::Area { .. } => FamilyKind::Area,
            CardFamily::Boost { .. } => FamilyKind::Boost,
            CardFamily::Special(_) => FamilyKind::Special,
        }
    }
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use stability_duel::cards::{AreaPattern, Card, CardId, FamilyKind};
///
/// let cross = Card::area(CardId::new(3), "Cross", "Plus shape", 1, AreaPattern::Cross);
/// assert_eq!(cross.kind(), FamilyKind::Area);
/// assert_eq!(cross.power(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Display name.
    pub name: String,

    /// Rules text shown to players.
    pub description: String,

    /// Family and family-specific data.
    pub family: CardFamily,
}

impl Card {
    /// Create an Area card.
    #[must_use]
    pub fn area(
        id: CardId,
        name: impl Into<String>,
        description: impl Into<String>,
        power: i32,
        pattern: AreaPattern,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            family: CardFamily::Area { power, pattern },
        }
    }

    /// Create a Boost card.
    #[must_use]
    pub fn boost(
        id: CardId,
        name: impl Into<String>,
        description: impl Into<String>,
        power: i32,
        pattern: BoostPattern,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            family: CardFamily::Boost { power, pattern },
        }
    }

    /// Create a Special card.
    #[must_use]
    pub fn special(
        id: CardId,
        name: impl Into<String>,
        description: impl Into<String>,
        kind: SpecialKind,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
            family: CardFamily::Special(kind),
        }
    }

    #[must_use]
    pub fn kind(&self) -> FamilyKind {
        self.family.kind()
    }

    #[must_use]
    pub fn is_area(&self) -> bool {
        self.kind() == FamilyKind::Area
    }

    #[must_use]
    pub fn is_boost(&self) -> bool {
        self.kind() == FamilyKind::Boost
    }

    #[must_use]
    pub fn is_special(&self) -> bool {
        self.kind() == FamilyKind::Special
    }

    /// The special kind, if this is a Special card.
    #[must_use]
    pub fn special_kind(&self) -> Option<SpecialKind> {
        match self.family {
            CardFamily::Special(kind) => Some(kind),
            _ => None,
        }
    }

    /// Pattern power for Area and Boost cards; 0 for specials.
    #[must_use]
    pub fn power(&self) -> i32 {
        match self.family {
            CardFamily::Area { power, .. } | CardFamily::Boost { power, .. } => power,
            CardFamily::Special(_) => 0,
        }
    }

    /// `power` signed toward `owner`: positive for A, negative for B.
    #[must_use]
    pub fn signed_delta(&self, owner: crate::core::PlayerId) -> i32 {
        self.power() * owner.sign()
    }

    /// Whether the selection's rotation changes this card's pattern.
    #[must_use]
    pub fn uses_rotation(&self) -> bool {
        matches!(
            self.family,
            CardFamily::Area {
                pattern: AreaPattern::Tee | AreaPattern::Hook,
                ..
            }
        )
    }

    /// Whether the selection's direction changes this card's pattern.
    #[must_use]
    pub fn uses_direction(&self) -> bool {
        matches!(
            self.family,
            CardFamily::Area {
                pattern: AreaPattern::Line | AreaPattern::Beam | AreaPattern::Pair,
                ..
            }
        )
    }
}
