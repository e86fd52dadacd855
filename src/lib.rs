//! # stability-duel
//!
//! Turn-resolution engine for a two-player, simultaneous-reveal card game
//! played on a small square grid.
//!
//! ## Rules in brief
//!
//! Every cell holds a signed *stability* in `[-5, 5]`. Positive cells belong
//! to player A, negative cells to player B. Each round both players secretly
//! pick one single-use card; the cards are revealed together and applied by
//! fixed resolution rules. After the last turn, each player scores owned
//! area, strong cells and fortress shapes.
//!
//! ## Design Principles
//!
//! 1. **Stateless Cards**: Cards are descriptors. Everything a card needs
//!    from earlier rounds is handed in through `EffectContext`.
//!
//! 2. **True Simultaneity**: Area and Boost deltas are computed on the same
//!    board, summed per cell and clipped once.
//!
//! 3. **Deterministic**: All randomness flows through a seeded `GameRng`.
//!
//! ## Modules
//!
//! - `core`: Players, coordinates, RNG, configuration
//! - `board`: Cells, the grid, connected regions
//! - `cards`: Card definitions, patterns, specials, catalog
//! - `engine`: The simultaneous turn state machine
//! - `scoring`: Area, strength and fortress scoring
//! - `ai`: Computer opponents

pub mod ai;
pub mod board;
pub mod cards;
pub mod core;
pub mod engine;
pub mod scoring;

// Re-export commonly used types
pub use crate::core::{DeckRatio, Direction, EngineConfig, GameRng, PlayerId, PlayerMap, Position, Rotation};

pub use crate::board::{Board, Cell, Region, MAX_STABILITY, MIN_STABILITY};

pub use crate::cards::{
    AreaPattern, BoostPattern, Card, CardCatalog, CardFamily, CardId, EffectContext, FamilyKind, PlayedCard,
    SpecialKind,
};

pub use crate::engine::{
    DelayedEffect, GamePhase, Hand, MultiAction, Resolution, SelectError, Selection, TurnEngine, TurnEvent,
    TurnReport,
};

pub use crate::scoring::{final_scores, score_player, FortressShape, GameResult, ScoreBreakdown, ShapeMatch};

pub use crate::ai::{GreedyOpponent, OpponentPolicy, UniformOpponent};
