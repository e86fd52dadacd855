//! Grid coordinates and the orientation modifiers a selection may carry.
//!
//! Coordinates are signed so that pattern offsets can step off the board;
//! whether a position is on the board is always a `Board` query.

use serde::{Deserialize, Serialize};

/// A grid coordinate. `x` grows to the right, `y` grows downward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset this position by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The four orthogonal neighbours (up, right, down, left). May be off-board.
    #[must_use]
    pub fn orthogonal(self) -> [Position; 4] {
        [
            self.offset(0, -1),
            self.offset(1, 0),
            self.offset(0, 1),
            self.offset(-1, 0),
        ]
    }

    /// The four diagonal neighbours. May be off-board.
    #[must_use]
    pub fn diagonal(self) -> [Position; 4] {
        [
            self.offset(-1, -1),
            self.offset(1, -1),
            self.offset(1, 1),
            self.offset(-1, 1),
        ]
    }

    /// Row-major sort key, used wherever iteration order must be stable.
    #[must_use]
    pub const fn row_major(self) -> (i32, i32) {
        (self.y, self.x)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Quarter-turn rotation index, always normalised into `0..4`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rotation(u8);

impl Rotation {
    /// All four rotations in order.
    pub const ALL: [Rotation; 4] = [Rotation(0), Rotation(1), Rotation(2), Rotation(3)];

    /// Create a rotation; values wrap modulo 4.
    #[must_use]
    pub const fn new(quarter_turns: u8) -> Self {
        Self(quarter_turns % 4)
    }

    #[must_use]
    pub const fn quarter_turns(self) -> u8 {
        self.0
    }

    /// Rotate an offset clockwise by this many quarter turns.
    #[must_use]
    pub fn apply(self, dx: i32, dy: i32) -> (i32, i32) {
        let mut point = (dx, dy);
        for _ in 0..self.0 {
            point = (-point.1, point.0);
        }
        point
    }
}

/// Line orientation for direction-sensitive patterns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Horizontal,
    Vertical,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Horizontal, Direction::Vertical];

    /// Unit step along this direction.
    #[must_use]
    pub const fn step(self) -> (i32, i32) {
        match self {
            Direction::Horizontal => (1, 0),
            Direction::Vertical => (0, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_neighbours() {
        let p = Position::new(2, 2);
        assert_eq!(p.offset(-1, 3), Position::new(1, 5));
        assert!(p.orthogonal().contains(&Position::new(2, 1)));
        assert!(p.diagonal().contains(&Position::new(3, 3)));
    }

    #[test]
    fn test_rotation_wraps() {
        assert_eq!(Rotation::new(5), Rotation::new(1));
        assert_eq!(Rotation::new(4).quarter_turns(), 0);
    }

    #[test]
    fn test_rotation_apply() {
        assert_eq!(Rotation::new(0).apply(1, 0), (1, 0));
        assert_eq!(Rotation::new(1).apply(1, 0), (0, 1));
        assert_eq!(Rotation::new(2).apply(1, 0), (-1, 0));
        assert_eq!(Rotation::new(3).apply(1, 0), (0, -1));
    }

    #[test]
    fn test_direction_step() {
        assert_eq!(Direction::default(), Direction::Horizontal);
        assert_eq!(Direction::Vertical.step(), (0, 1));
    }
}
