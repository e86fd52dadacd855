//! Card system: definitions, patterns, specials and the catalog.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for card definitions
//! - `Card`: Static card data; Area, Boost or Special family
//! - `AreaPattern` / `BoostPattern`: Cell geometry per family
//! - `SpecialKind`: The eight engine-coordinated specials
//! - `EffectContext`: Turn counters and per-player memory for a card call
//! - `CardCatalog`: Card lookup and deck assembly
//!
//! ## Statelessness
//!
//! Cards never carry game state. The last Area card a player used and any
//! reversal snapshots live in the engine.

pub mod catalog;
pub mod context;
pub mod definition;
mod effect;
pub mod pattern;
pub mod special;

pub use catalog::{CardCatalog, SPARK_ID};
pub use context::{EffectContext, PlayedCard, ENDGAME_TURNS};
pub use definition::{Card, CardFamily, CardId, FamilyKind};
pub use pattern::{AreaPattern, BoostPattern, CellSet};
pub use special::SpecialKind;
