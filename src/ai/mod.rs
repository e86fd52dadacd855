//! Computer opponents.
//!
//! - `OpponentPolicy`: Trait every opponent implements
//! - `GreedyOpponent`: One-ply simulation with controlled noise
//! - `UniformOpponent`: Uniformly random legal play

pub mod policy;

pub use policy::{
    can_act, evaluate, legal_selections, GreedyOpponent, OpponentPolicy, UniformOpponent, SPECIAL_BONUS,
};
