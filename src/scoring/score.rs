//! Final scoring and game outcome.

use serde::{Deserialize, Serialize};

use super::shapes::region_fortress;
use crate::board::Board;
use crate::core::{PlayerId, PlayerMap};

/// Strength value by cell magnitude.
pub const STRENGTH_BONUS: [u32; 6] = [0, 0, 0, 1, 2, 3];

/// Score components for one player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Owned cells.
    pub area: u32,
    /// Bonus for high-magnitude cells.
    pub strength: u32,
    /// Bonus for fortress shapes.
    pub fortress: u32,
    pub total: u32,
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Equal totals.
    Draw,
}

impl GameResult {
    /// Compare final totals.
    #[must_use]
    pub fn from_scores(scores: &PlayerMap<ScoreBreakdown>) -> Self {
        let a = scores[PlayerId::A].total;
        let b = scores[PlayerId::B].total;
        match a.cmp(&b) {
            std::cmp::Ordering::Greater => GameResult::Winner(PlayerId::A),
            std::cmp::Ordering::Less => GameResult::Winner(PlayerId::B),
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}

#[must_use]
pub fn score_player(board: &Board, player: PlayerId) -> ScoreBreakdown {
    let owned = board.owned_cells(player);
    let area = owned.len() as u32;
    let strength = owned
        .iter()
        .filter_map(|&p| board.cell(p))
        .map(|c| STRENGTH_BONUS[usize::from(c.magnitude()).min(STRENGTH_BONUS.len() - 1)])
        .sum();
    let fortress = board
        .connected_regions(player)
        .iter()
        .map(|region| region_fortress(board, region))
        .sum();

    ScoreBreakdown {
        area,
        strength,
        fortress,
        total: area + strength + fortress,
    }
}

#[must_use]
pub fn final_scores(board: &Board) -> PlayerMap<ScoreBreakdown> {
    PlayerMap::new(|player| score_player(board, player))
}
