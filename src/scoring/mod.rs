//! Scoring: owned area, cell strength and fortress shapes.
//!
//! `total = area + strength + fortress`, computed per player from the final
//! board only.

mod score;
mod shapes;

pub use score::{final_scores, score_player, GameResult, ScoreBreakdown, STRENGTH_BONUS};
pub use shapes::{
    candidate_placements, region_fortress, select_fortresses, FortressShape, ShapeMatch, FORTRESS_BONUS,
};
