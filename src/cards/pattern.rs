//! Cell patterns for Area and Boost cards.
//!
//! Area patterns are purely geometric. Boost patterns are filtered by who
//! owns each cell on the board they are evaluated against, which is the
//! board at resolution time.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::Board;
use crate::core::{Direction, PlayerId, Position, Rotation};

/// Affected-cell list. Inline for the common pattern sizes.
pub type CellSet = SmallVec<[Position; 9]>;

const TEE: [(i32, i32); 4] = [(-1, 0), (0, 0), (1, 0), (0, 1)];
const HOOK: [(i32, i32); 4] = [(0, -1), (0, 0), (0, 1), (1, 1)];

/// Geometric patterns painted by Area cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaPattern {
    /// The target cell only.
    Single,
    /// Target plus its four orthogonal neighbours.
    Cross,
    /// Target plus its four diagonal neighbours.
    Saltire,
    /// 2×2 square with the target at the top-left.
    Block,
    /// Three cells centred on the target along the direction.
    Line,
    /// The whole row or column through the target.
    Beam,
    /// T-tetromino, rotatable.
    Tee,
    /// L-tetromino, rotatable.
    Hook,
    /// Target and the next cell along the direction.
    Pair,
    /// Corner-only: 2×2 reaching inward from the corner.
    CornerBlock,
    /// Edge-only (not corners): target, both along-edge neighbours, and the
    /// inward neighbour.
    EdgeWall,
}

impl AreaPattern {
    #[must_use]
    pub fn can_play(self, board: &Board, target: Position) -> bool {
        match self {
            AreaPattern::CornerBlock => board.is_corner(target),
            AreaPattern::EdgeWall => board.is_edge(target) && !board.is_corner(target),
            _ => board.contains(target),
        }
    }

    /// On-board cells painted from `target`. Empty if the placement is illegal.
    #[must_use]
    pub fn cells(
        self,
        board: &Board,
        target: Position,
        rotation: Rotation,
        direction: Direction,
    ) -> CellSet {
        if !self.can_play(board, target) {
            return CellSet::new();
        }

        let (sx, sy) = direction.step();
        let mut cells = CellSet::new();
        match self {
            AreaPattern::Single => cells.push(target),
            AreaPattern::Cross => {
                cells.push(target);
                cells.extend(target.orthogonal());
            }
            AreaPattern::Saltire => {
                cells.push(target);
                cells.extend(target.diagonal());
            }
            AreaPattern::Block => {
                cells.extend([(0, 0), (1, 0), (0, 1), (1, 1)].map(|(dx, dy)| target.offset(dx, dy)));
            }
            AreaPattern::Line => {
                cells.extend([target.offset(-sx, -sy), target, target.offset(sx, sy)]);
            }
            AreaPattern::Beam => {
                let size = board.size() as i32;
                cells.extend((0..size).map(|i| match direction {
                    Direction::Horizontal => Position::new(i, target.y),
                    Direction::Vertical => Position::new(target.x, i),
                }));
            }
            AreaPattern::Tee => cells.extend(rotated(target, &TEE, rotation)),
            AreaPattern::Hook => cells.extend(rotated(target, &HOOK, rotation)),
            AreaPattern::Pair => cells.extend([target, target.offset(sx, sy)]),
            AreaPattern::CornerBlock => {
                let (dx, dy) = inward(board, target);
                cells.extend([(0, 0), (dx, 0), (0, dy), (dx, dy)].map(|(x, y)| target.offset(x, y)));
            }
            AreaPattern::EdgeWall => {
                let last = board.size() as i32 - 1;
                let (along, inward_step) = if target.y == 0 {
                    ((1, 0), (0, 1))
                } else if target.y == last {
                    ((1, 0), (0, -1))
                } else if target.x == 0 {
                    ((0, 1), (1, 0))
                } else {
                    ((0, 1), (-1, 0))
                };
                cells.extend([
                    target,
                    target.offset(-along.0, -along.1),
                    target.offset(along.0, along.1),
                    target.offset(inward_step.0, inward_step.1),
                ]);
            }
        }
        on_board(board, cells)
    }
}

/// Ownership-conditioned patterns painted by Boost cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoostPattern {
    /// Target and orthogonal neighbours, owned cells only.
    Fortify,
    /// Owned cells in the 3×3 around the target. Playable anywhere.
    Rally,
    /// The whole owned region containing the target.
    Entrench,
    /// The target alone, if still owned.
    Reinforce,
    /// Cells of the target's region that touch an opponent cell.
    Frontier,
    /// Neutral orthogonal neighbours of the target, while it is still owned.
    Sprawl,
}

impl BoostPattern {
    #[must_use]
    pub fn can_play(self, board: &Board, target: Position, owner: PlayerId) -> bool {
        match self {
            BoostPattern::Rally => board.contains(target),
            _ => board.is_owned_by(target, owner),
        }
    }

    /// Cells to boost, judged against `board` as it is now.
    #[must_use]
    pub fn cells(self, board: &Board, target: Position, owner: PlayerId) -> CellSet {
        let owned = |p: &Position| board.is_owned_by(*p, owner);
        let cells: CellSet = match self {
            BoostPattern::Fortify => std::iter::once(target)
                .chain(target.orthogonal())
                .filter(owned)
                .collect(),
            BoostPattern::Rally => {
                if !board.contains(target) {
                    return CellSet::new();
                }
                (-1..=1)
                    .flat_map(|dy| (-1..=1).map(move |dx| target.offset(dx, dy)))
                    .filter(owned)
                    .collect()
            }
            BoostPattern::Entrench => board
                .region_containing(target, owner)
                .map(|r| r.cells().iter().copied().collect())
                .unwrap_or_default(),
            BoostPattern::Reinforce => std::iter::once(target).filter(owned).collect(),
            BoostPattern::Frontier => board
                .region_containing(target, owner)
                .map(|r| {
                    r.cells()
                        .iter()
                        .copied()
                        .filter(|&p| board.neighbours(p).any(|n| board.is_owned_by(n, owner.opponent())))
                        .collect()
                })
                .unwrap_or_default(),
            BoostPattern::Sprawl => {
                if !owned(&target) {
                    return CellSet::new();
                }
                board
                    .neighbours(target)
                    .filter(|&p| board.owner_at(p).is_none())
                    .collect()
            }
        };
        on_board(board, cells)
    }
}

fn rotated(target: Position, offsets: &[(i32, i32)], rotation: Rotation) -> impl Iterator<Item = Position> + '_ {
    offsets.iter().map(move |&(dx, dy)| {
        let (rx, ry) = rotation.apply(dx, dy);
        target.offset(rx, ry)
    })
}

/// Unit step from a corner toward the board's interior.
fn inward(board: &Board, corner: Position) -> (i32, i32) {
    let last = board.size() as i32 - 1;
    let dx = if corner.x == last { -1 } else { 1 };
    let dy = if corner.y == last { -1 } else { 1 };
    (dx, dy)
}

/// Drop off-board cells and duplicates, keeping first occurrence order.
fn on_board(board: &Board, cells: CellSet) -> CellSet {
    let mut out = CellSet::new();
    for pos in cells {
        if board.contains(pos) && !out.contains(&pos) {
            out.push(pos);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(cells: CellSet) -> Vec<Position> {
        let mut v: Vec<_> = cells.into_iter().collect();
        v.sort_by_key(|p| p.row_major());
        v
    }

    fn pos(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_cross_clips_at_edge() {
        let board = Board::new(5);
        let cells = AreaPattern::Cross.cells(&board, pos(0, 0), Rotation::default(), Direction::default());
        assert_eq!(sorted(cells), vec![pos(0, 0), pos(1, 0), pos(0, 1)]);
    }

    #[test]
    fn test_line_and_beam_follow_direction() {
        let board = Board::new(5);
        let line = AreaPattern::Line.cells(&board, pos(2, 2), Rotation::default(), Direction::Vertical);
        assert_eq!(sorted(line), vec![pos(2, 1), pos(2, 2), pos(2, 3)]);

        let beam = AreaPattern::Beam.cells(&board, pos(1, 3), Rotation::default(), Direction::Horizontal);
        assert_eq!(beam.len(), 5);
        assert!(beam.iter().all(|p| p.y == 3));
    }

    #[test]
    fn test_tee_rotations_differ() {
        let board = Board::new(5);
        let up = AreaPattern::Tee.cells(&board, pos(2, 2), Rotation::new(0), Direction::default());
        let right = AreaPattern::Tee.cells(&board, pos(2, 2), Rotation::new(1), Direction::default());
        assert_eq!(up.len(), 4);
        assert_eq!(right.len(), 4);
        assert!(up.contains(&pos(2, 3)));
        assert!(right.contains(&pos(1, 2)));
        assert_ne!(sorted(up), sorted(right));
    }

    #[test]
    fn test_corner_block_only_on_corners() {
        let board = Board::new(5);
        assert!(AreaPattern::CornerBlock.can_play(&board, pos(4, 4)));
        assert!(!AreaPattern::CornerBlock.can_play(&board, pos(2, 0)));

        let cells = AreaPattern::CornerBlock.cells(&board, pos(4, 4), Rotation::default(), Direction::default());
        assert_eq!(sorted(cells), vec![pos(3, 3), pos(4, 3), pos(3, 4), pos(4, 4)]);

        let none = AreaPattern::CornerBlock.cells(&board, pos(2, 2), Rotation::default(), Direction::default());
        assert!(none.is_empty());
    }

    #[test]
    fn test_edge_wall_points_inward() {
        let board = Board::new(5);
        assert!(!AreaPattern::EdgeWall.can_play(&board, pos(0, 0)));
        assert!(!AreaPattern::EdgeWall.can_play(&board, pos(2, 2)));

        let left = AreaPattern::EdgeWall.cells(&board, pos(0, 2), Rotation::default(), Direction::default());
        assert_eq!(sorted(left), vec![pos(0, 1), pos(0, 2), pos(1, 2), pos(0, 3)]);

        let bottom = AreaPattern::EdgeWall.cells(&board, pos(2, 4), Rotation::default(), Direction::default());
        assert_eq!(sorted(bottom), vec![pos(2, 3), pos(1, 4), pos(2, 4), pos(3, 4)]);
    }

    #[test]
    fn test_fortify_keeps_owned_cells() {
        let board = Board::from_rows(3, &[&[0, 1, 0], &[-1, 2, 1], &[0, 0, 0]]);
        assert!(BoostPattern::Fortify.can_play(&board, pos(1, 1), PlayerId::A));
        assert!(!BoostPattern::Fortify.can_play(&board, pos(0, 1), PlayerId::A));

        let cells = BoostPattern::Fortify.cells(&board, pos(1, 1), PlayerId::A);
        assert_eq!(sorted(cells), vec![pos(1, 0), pos(1, 1), pos(2, 1)]);
    }

    #[test]
    fn test_entrench_uses_current_region() {
        let mut board = Board::from_rows(3, &[&[1, 1, 0], &[0, 1, 0], &[0, 0, 1]]);
        assert_eq!(BoostPattern::Entrench.cells(&board, pos(0, 0), PlayerId::A).len(), 3);

        board.set_clipped(pos(0, 0), -1);
        assert!(BoostPattern::Entrench.cells(&board, pos(0, 0), PlayerId::A).is_empty());
    }

    #[test]
    fn test_frontier_touches_opponent() {
        let board = Board::from_rows(3, &[&[1, 1, -1], &[1, 0, 0], &[0, 0, 0]]);
        let cells = BoostPattern::Frontier.cells(&board, pos(0, 0), PlayerId::A);
        assert_eq!(sorted(cells), vec![pos(1, 0)]);
    }

    #[test]
    fn test_sprawl_needs_owned_target() {
        let board = Board::from_rows(3, &[&[0, 0, 0], &[-1, 1, 0], &[0, 2, 0]]);
        let cells = BoostPattern::Sprawl.cells(&board, pos(1, 1), PlayerId::A);
        assert_eq!(sorted(cells), vec![pos(1, 0), pos(2, 1)]);

        assert!(BoostPattern::Sprawl.cells(&board, pos(0, 1), PlayerId::A).is_empty());
    }

    #[test]
    fn test_rally_any_target() {
        let board = Board::from_rows(3, &[&[1, 0, 0], &[0, 0, 0], &[0, 0, 1]]);
        assert!(BoostPattern::Rally.can_play(&board, pos(1, 1), PlayerId::A));
        assert_eq!(BoostPattern::Rally.cells(&board, pos(1, 1), PlayerId::A).len(), 2);
        assert!(BoostPattern::Rally.cells(&board, pos(1, 1), PlayerId::B).is_empty());
    }
}
