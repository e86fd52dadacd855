//! Engine configuration.
//!
//! `EngineConfig` fixes the board size, game length, hand size, the
//! self-penalty strength and the RNG seed. `DeckRatio` weights the three
//! card families when a deck is assembled.

use serde::{Deserialize, Serialize};

/// Relative weights of the three card families in an assembled deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckRatio {
    pub area: u32,
    pub boost: u32,
    pub special: u32,
}

impl DeckRatio {
    #[must_use]
    pub const fn new(area: u32, boost: u32, special: u32) -> Self {
        Self {
            area,
            boost,
            special,
        }
    }

    /// Split `size` cards into (area, boost, special) counts.
    ///
    /// Counts are floored per family; the remainder goes to Area. An
    /// all-zero ratio yields an all-Area deck.
    #[must_use]
    pub fn split(&self, size: usize) -> (usize, usize, usize) {
        let total = (self.area + self.boost + self.special) as usize;
        if total == 0 {
            return (size, 0, 0);
        }
        let boost = size * self.boost as usize / total;
        let special = size * self.special as usize / total;
        (size - boost - special, boost, special)
    }
}

impl Default for DeckRatio {
    fn default() -> Self {
        Self::new(7, 4, 4)
    }
}

/// Engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Side length of the square board.
    pub board_size: usize,

    /// Number of rounds in a game. Turn numbers run `1..=total_turns`.
    pub total_turns: u32,

    /// Cards dealt to each player at game start.
    pub hand_size: usize,

    /// Upper bound on cells weakened by a miss penalty.
    pub miss_penalty_cells: usize,

    /// Seed for every random decision in the game.
    pub seed: u64,

    /// Family weights for random deck assembly.
    pub deck_ratio: DeckRatio,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_size: 5,
            total_turns: 15,
            hand_size: 15,
            miss_penalty_cells: 2,
            seed: 42,
            deck_ratio: DeckRatio::default(),
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    #[must_use]
    pub fn with_total_turns(mut self, turns: u32) -> Self {
        self.total_turns = turns;
        self
    }

    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    #[must_use]
    pub fn with_miss_penalty_cells(mut self, cells: usize) -> Self {
        self.miss_penalty_cells = cells;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_deck_ratio(mut self, ratio: DeckRatio) -> Self {
        self.deck_ratio = ratio;
        self
    }

    /// Clamp values the engine cannot run with.
    ///
    /// Boards are at least 3 wide (corner and edge cards need distinct
    /// boundary cells) and games last at least one turn.
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.board_size = self.board_size.max(3);
        self.total_turns = self.total_turns.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.board_size, 5);
        assert_eq!(config.total_turns, 15);
        assert_eq!(config.hand_size, 15);
        assert_eq!(config.miss_penalty_cells, 2);
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::default()
            .with_board_size(7)
            .with_total_turns(20)
            .with_seed(9)
            .with_miss_penalty_cells(1);

        assert_eq!(config.board_size, 7);
        assert_eq!(config.total_turns, 20);
        assert_eq!(config.seed, 9);
        assert_eq!(config.miss_penalty_cells, 1);
    }

    #[test]
    fn test_validated_clamps() {
        let config = EngineConfig::default()
            .with_board_size(1)
            .with_total_turns(0)
            .validated();
        assert_eq!(config.board_size, 3);
        assert_eq!(config.total_turns, 1);
    }

    #[test]
    fn test_ratio_split() {
        assert_eq!(DeckRatio::default().split(15), (7, 4, 4));
        assert_eq!(DeckRatio::new(1, 1, 1).split(10), (4, 3, 3));
        assert_eq!(DeckRatio::new(0, 0, 0).split(5), (5, 0, 0));
    }

    #[test]
    fn test_config_serde() {
        let config = EngineConfig::default().with_seed(1234);
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
