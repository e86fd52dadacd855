//! A single grid slot.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Lowest stability a cell can hold (strongest player B cell).
pub const MIN_STABILITY: i8 = -5;

/// Highest stability a cell can hold (strongest player A cell).
pub const MAX_STABILITY: i8 = 5;

/// A grid cell holding a clipped signed stability.
///
/// The sign names the owner and the magnitude is the cell's strength.
/// Every mutation clips into `[MIN_STABILITY, MAX_STABILITY]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    stability: i8,
}

impl Cell {
    /// Create a cell, clipping the initial value.
    #[must_use]
    pub fn new(stability: i32) -> Self {
        Self {
            stability: clip(stability),
        }
    }

    #[must_use]
    pub const fn stability(self) -> i8 {
        self.stability
    }

    /// Absolute strength, `0..=5`.
    #[must_use]
    pub const fn magnitude(self) -> u8 {
        self.stability.unsigned_abs()
    }

    /// `Some(A)` for positive, `Some(B)` for negative, `None` for zero.
    #[must_use]
    pub const fn owner(self) -> Option<PlayerId> {
        if self.stability > 0 {
            Some(PlayerId::A)
        } else if self.stability < 0 {
            Some(PlayerId::B)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_owned_by(self, player: PlayerId) -> bool {
        self.owner() == Some(player)
    }

    #[must_use]
    pub const fn is_neutral(self) -> bool {
        self.stability == 0
    }

    /// Add `delta` and clip.
    pub fn add_clipped(&mut self, delta: i32) {
        self.stability = clip(i32::from(self.stability) + delta);
    }

    /// Replace the value, clipping it.
    pub fn set_clipped(&mut self, value: i32) {
        self.stability = clip(value);
    }

    /// Move one step toward zero. Neutral cells are unchanged.
    pub fn weaken(&mut self) {
        self.stability -= self.stability.signum();
    }
}

fn clip(value: i32) -> i8 {
    // Clamped into the i8 range, so the cast is lossless.
    value.clamp(i32::from(MIN_STABILITY), i32::from(MAX_STABILITY)) as i8
}
