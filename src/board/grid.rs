//! The square grid and connected-region analysis.

use serde::{Deserialize, Serialize};

use super::cell::Cell;
use crate::core::{PlayerId, Position};

/// A maximal set of same-owner cells joined by 4-directional adjacency.
///
/// Cells are kept in row-major order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    owner: PlayerId,
    cells: Vec<Position>,
}

impl Region {
    fn new(owner: PlayerId, mut cells: Vec<Position>) -> Self {
        cells.sort_unstable_by_key(|p| p.row_major());
        Self { owner, cells }
    }

    #[must_use]
    pub fn owner(&self) -> PlayerId {
        self.owner
    }

    #[must_use]
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.cells
            .binary_search_by_key(&pos.row_major(), |p| p.row_major())
            .is_ok()
    }
}

/// Fixed-size `size × size` grid of cells.
///
/// Off-board coordinates are never an error: lookups return `None` and
/// mutations return `false`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create an all-neutral board.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![Cell::default(); size * size],
        }
    }

    /// Build a board from rows of stability values (row 0 first).
    ///
    /// Missing values are neutral; extra values are ignored.
    ///
    /// ```
    /// use stability_duel::board::Board;
    /// use stability_duel::core::{PlayerId, Position};
    ///
    /// let board = Board::from_rows(3, &[&[1, 0, -2], &[0, 9, 0]]);
    /// assert_eq!(board.stability(Position::new(2, 0)), Some(-2));
    /// assert_eq!(board.stability(Position::new(1, 1)), Some(5));
    /// assert_eq!(board.owner_at(Position::new(0, 0)), Some(PlayerId::A));
    /// ```
    #[must_use]
    pub fn from_rows(size: usize, rows: &[&[i32]]) -> Self {
        let mut board = Self::new(size);
        for (y, row) in rows.iter().enumerate().take(size) {
            for (x, &value) in row.iter().enumerate().take(size) {
                board.cells[y * size + x] = Cell::new(value);
            }
        }
        board
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, pos: Position) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.y as usize * self.size + pos.x as usize)
        } else {
            None
        }
    }

    #[must_use]
    pub fn is_valid_position(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }

    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.is_valid_position(pos.x, pos.y)
    }

    #[must_use]
    pub fn get_cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.cell(Position::new(x, y))
    }

    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        let i = self.index(pos)?;
        Some(&mut self.cells[i])
    }

    #[must_use]
    pub fn stability(&self, pos: Position) -> Option<i8> {
        self.cell(pos).map(|c| c.stability())
    }

    #[must_use]
    pub fn owner_at(&self, pos: Position) -> Option<PlayerId> {
        self.cell(pos).and_then(|c| c.owner())
    }

    #[must_use]
    pub fn is_owned_by(&self, pos: Position, player: PlayerId) -> bool {
        self.owner_at(pos) == Some(player)
    }

    /// Add-and-clip at `pos`. Returns `false` off-board.
    pub fn add_clipped(&mut self, pos: Position, delta: i32) -> bool {
        match self.cell_mut(pos) {
            Some(cell) => {
                cell.add_clipped(delta);
                true
            }
            None => false,
        }
    }

    /// Set-and-clip at `pos`. Returns `false` off-board.
    pub fn set_clipped(&mut self, pos: Position, value: i32) -> bool {
        match self.cell_mut(pos) {
            Some(cell) => {
                cell.set_clipped(value);
                true
            }
            None => false,
        }
    }

    /// Move the cell at `pos` one step toward neutral. Returns `false` off-board.
    pub fn weaken(&mut self, pos: Position) -> bool {
        match self.cell_mut(pos) {
            Some(cell) => {
                cell.weaken();
                true
            }
            None => false,
        }
    }

    /// Flip the owner of every cell, keeping magnitudes.
    pub fn negate_all(&mut self) {
        for cell in &mut self.cells {
            let value = i32::from(cell.stability());
            cell.set_clipped(-value);
        }
    }

    /// All positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.size as i32;
        (0..size).flat_map(move |y| (0..size).map(move |x| Position::new(x, y)))
    }

    /// On-board orthogonal neighbours of `pos`.
    pub fn neighbours(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        pos.orthogonal().into_iter().filter(|p| self.contains(*p))
    }

    /// Every cell owned by `player`, row-major.
    #[must_use]
    pub fn owned_cells(&self, player: PlayerId) -> Vec<Position> {
        self.positions()
            .filter(|&p| self.is_owned_by(p, player))
            .collect()
    }

    /// Whether `pos` lies on one of the four corners.
    #[must_use]
    pub fn is_corner(&self, pos: Position) -> bool {
        let last = self.size as i32 - 1;
        self.contains(pos) && (pos.x == 0 || pos.x == last) && (pos.y == 0 || pos.y == last)
    }

    /// Whether `pos` lies on the outer ring, corners included.
    #[must_use]
    pub fn is_edge(&self, pos: Position) -> bool {
        let last = self.size as i32 - 1;
        self.contains(pos) && (pos.x == 0 || pos.x == last || pos.y == 0 || pos.y == last)
    }

    /// Partition `owner`'s cells into 4-connected regions.
    ///
    /// Flood fill starts from each unvisited owned cell in row-major order
    /// and only walks through same-owner neighbours.
    #[must_use]
    pub fn connected_regions(&self, owner: PlayerId) -> Vec<Region> {
        let mut visited = vec![false; self.cells.len()];
        let mut regions = Vec::new();

        for start in self.positions() {
            let Some(start_idx) = self.index(start) else {
                continue;
            };
            if visited[start_idx] || !self.is_owned_by(start, owner) {
                continue;
            }

            let mut members = Vec::new();
            let mut stack = vec![start];
            visited[start_idx] = true;

            while let Some(pos) = stack.pop() {
                members.push(pos);
                for next in self.neighbours(pos) {
                    let Some(idx) = self.index(next) else {
                        continue;
                    };
                    if !visited[idx] && self.is_owned_by(next, owner) {
                        visited[idx] = true;
                        stack.push(next);
                    }
                }
            }

            regions.push(Region::new(owner, members));
        }

        regions
    }

    /// The region of `owner` that contains `pos`, if `pos` is owned by them.
    #[must_use]
    pub fn region_containing(&self, pos: Position, owner: PlayerId) -> Option<Region> {
        if !self.is_owned_by(pos, owner) {
            return None;
        }
        self.connected_regions(owner)
            .into_iter()
            .find(|r| r.contains(pos))
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for y in 0..self.size {
            let row: Vec<String> = (0..self.size)
                .map(|x| format!("{:>3}", self.cells[y * self.size + x].stability()))
                .collect();
            writeln!(f, "{}", row.join(""))?;
        }
        Ok(())
    }
}
