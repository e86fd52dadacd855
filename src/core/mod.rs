//! Core types: players, coordinates, RNG, configuration.
//!
//! These are the leaf building blocks shared by the board, the cards, the
//! engine and the scoring code.

pub mod config;
pub mod player;
pub mod position;
pub mod rng;

pub use config::{DeckRatio, EngineConfig};
pub use player::{PlayerId, PlayerMap};
pub use position::{Direction, Position, Rotation};
pub use rng::GameRng;
