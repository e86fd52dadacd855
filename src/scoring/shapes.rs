//! Fortress shape detection.
//!
//! A fortress is a fixed polyomino fully inside one connected region. Its
//! value depends on the weakest cell it covers. Within a region, shapes are
//! claimed greedily without sharing cells.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Region};
use crate::cards::CellSet;
use crate::core::Position;

/// Fortress value by minimum magnitude of the covered cells.
pub const FORTRESS_BONUS: [u32; 6] = [0, 0, 2, 4, 6, 8];

const BLOCK: [(i32, i32); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];
const CROSS: [(i32, i32); 5] = [(0, 0), (0, -1), (1, 0), (0, 1), (-1, 0)];
const HOOK: [(i32, i32); 4] = [(0, 0), (0, 1), (0, 2), (1, 2)];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FortressShape {
    /// 2×2 square.
    Block,
    /// L-tetromino, any of its 8 orientations.
    Hook,
    /// Plus of 5.
    Cross,
}

impl FortressShape {
    /// Shapes in tie-break order.
    pub const ALL: [FortressShape; 3] = [FortressShape::Block, FortressShape::Hook, FortressShape::Cross];

    /// Every distinct orientation as an offset list.
    #[must_use]
    pub fn orientations(self) -> Vec<Vec<(i32, i32)>> {
        match self {
            FortressShape::Block => vec![BLOCK.to_vec()],
            FortressShape::Cross => vec![CROSS.to_vec()],
            FortressShape::Hook => {
                let mut out = Vec::with_capacity(8);
                for mirror in [false, true] {
                    for quarter in 0..4 {
                        out.push(
                            HOOK.iter()
                                .map(|&(dx, dy)| {
                                    let (mut x, mut y) = if mirror { (-dx, dy) } else { (dx, dy) };
                                    for _ in 0..quarter {
                                        (x, y) = (-y, x);
                                    }
                                    (x, y)
                                })
                                .collect(),
                        );
                    }
                }
                out
            }
        }
    }
}

/// One placement of a fortress shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeMatch {
    pub shape: FortressShape,
    /// First covered cell in row-major order.
    pub anchor: Position,
    /// Covered cells, row-major.
    pub cells: CellSet,
    /// Full value before any stacking reduction.
    pub value: u32,
}

/// Every positive-value placement of every shape inside `region`.
#[must_use]
pub fn candidate_placements(board: &Board, region: &Region) -> Vec<ShapeMatch> {
    let mut out = Vec::new();
    for shape in FortressShape::ALL {
        for offsets in shape.orientations() {
            for &origin in region.cells() {
                let mut cells: CellSet = offsets.iter().map(|&(dx, dy)| origin.offset(dx, dy)).collect();
                if !cells.iter().all(|&p| region.contains(p)) {
                    continue;
                }
                let min_magnitude = cells
                    .iter()
                    .filter_map(|&p| board.cell(p).map(|c| c.magnitude()))
                    .min()
                    .unwrap_or(0);
                let value = FORTRESS_BONUS[usize::from(min_magnitude).min(FORTRESS_BONUS.len() - 1)];
                if value == 0 {
                    continue;
                }
                cells.sort_unstable_by_key(|p| p.row_major());
                out.push(ShapeMatch {
                    shape,
                    anchor: cells[0],
                    cells,
                    value,
                });
            }
        }
    }
    out
}

/// Non-overlapping placements claimed in `region`, highest priority first.
#[must_use]
pub fn select_fortresses(board: &Board, region: &Region) -> Vec<ShapeMatch> {
    let mut candidates = candidate_placements(board, region);
    candidates.sort_by(|a, b| {
        b.value
            .cmp(&a.value)
            .then_with(|| b.cells.len().cmp(&a.cells.len()))
            .then_with(|| a.shape.cmp(&b.shape))
            .then_with(|| a.anchor.row_major().cmp(&b.anchor.row_major()))
    });

    let mut claimed: FxHashSet<Position> = FxHashSet::default();
    let mut chosen = Vec::new();
    for candidate in candidates {
        if candidate.cells.iter().any(|p| claimed.contains(p)) {
            continue;
        }
        claimed.extend(candidate.cells.iter().copied());
        chosen.push(candidate);
    }
    chosen
}

/// Fortress score of one region: the first shape at full value, the rest halved.
#[must_use]
pub fn region_fortress(board: &Board, region: &Region) -> u32 {
    select_fortresses(board, region)
        .iter()
        .enumerate()
        .map(|(i, m)| if i == 0 { m.value } else { m.value / 2 })
        .sum()
}
