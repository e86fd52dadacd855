//! Simultaneous turn engine.
//!
//! ## Round lifecycle
//!
//! ```text
//! Selecting --(both ready)--> Resolving --> Selecting (next turn)
//!                                  \------> Finished  (after the last turn)
//! ```
//!
//! Each player stores one pending `Selection` per round. `resolve_turn`
//! runs the pipeline documented in `resolve.rs` and reports the outcome as a
//! `Resolution`. Every accepted selection, consumed card and triggered
//! effect is appended to the engine's `TurnEvent` history.

mod events;
mod resolve;
mod selection;
mod state;
mod turn;

pub use events::{Resolution, TurnEvent, TurnReport};
pub use selection::{PendingSelection, SelectError, Selection};
pub use state::{DelayedEffect, GamePhase, Hand, MultiAction};
pub use turn::TurnEngine;
