//! Card catalog and deck assembly.
//!
//! The `CardCatalog` holds every card definition in the game. It provides
//! lookup by `CardId`, family filters, and the two ways of building a hand:
//! the fixed default deck and a seeded random deck that respects a
//! `DeckRatio`.

use rustc_hash::FxHashMap;
use tracing::debug;

use super::definition::{Card, CardId, FamilyKind};
use super::pattern::{AreaPattern, BoostPattern};
use super::special::SpecialKind;
use crate::core::{DeckRatio, GameRng};

/// Ids of the fixed starter deck: 7 Area, 4 Boost, 4 Special.
pub const DEFAULT_DECK: [u32; 15] = [1, 2, 3, 5, 6, 8, 11, 13, 14, 15, 17, 19, 21, 23, 26];

/// Id of Spark, the simplest single-cell card.
pub const SPARK_ID: CardId = CardId::new(1);

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use stability_duel::cards::{CardCatalog, CardId, FamilyKind};
///
/// let catalog = CardCatalog::standard();
/// assert_eq!(catalog.len(), 26);
///
/// let spark = catalog.get(CardId::new(1)).unwrap();
/// assert_eq!(spark.name, "Spark");
/// assert_eq!(catalog.by_family(FamilyKind::Special).count(), 8);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<Card>,
    index: FxHashMap<CardId, usize>,
}

impl CardCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The full 26-card game catalog.
    #[must_use]
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for card in standard_cards() {
            catalog.register(card);
        }
        catalog
    }

    /// Register a card definition. Returns `false` if the id is taken.
    pub fn register(&mut self, card: Card) -> bool {
        if self.index.contains_key(&card.id) {
            return false;
        }
        self.index.insert(card.id, self.cards.len());
        self.cards.push(card);
        true
    }

    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.index.get(&id).map(|&i| &self.cards[i])
    }

    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.index.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All cards in registration order.
    pub fn all(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn by_family(&self, kind: FamilyKind) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(move |c| c.kind() == kind)
    }

    /// The fixed 15-card starter deck. Ids missing from this catalog are skipped.
    #[must_use]
    pub fn default_deck(&self) -> Vec<Card> {
        DEFAULT_DECK
            .iter()
            .filter_map(|&id| self.get(CardId::new(id)).cloned())
            .collect()
    }

    /// Assemble `size` distinct cards with per-family counts from `ratio`.
    ///
    /// Draws from the `"deck"` stream of `rng`, so the result depends only
    /// on the seed. When a family has fewer cards than its quota, the gap is
    /// filled from unused Area cards, then unused Boost cards. The deck is
    /// returned sorted by id and is shorter than `size` only if the catalog
    /// runs out.
    #[must_use]
    pub fn random_deck(&self, rng: &GameRng, size: usize, ratio: DeckRatio) -> Vec<Card> {
        let mut stream = rng.for_context("deck");
        let (area, boost, special) = ratio.split(size);

        let mut pools: Vec<Vec<&Card>> = [FamilyKind::Area, FamilyKind::Boost, FamilyKind::Special]
            .into_iter()
            .map(|kind| {
                let mut pool: Vec<&Card> = self.by_family(kind).collect();
                stream.shuffle(&mut pool);
                pool
            })
            .collect();

        let mut deck: Vec<Card> = Vec::with_capacity(size);
        for (pool, quota) in pools.iter_mut().zip([area, boost, special]) {
            let take = quota.min(pool.len());
            deck.extend(pool.drain(..take).cloned());
        }

        // Back-fill from Area, then Boost.
        for pool in pools.iter_mut().take(2) {
            let missing = size.saturating_sub(deck.len());
            let take = missing.min(pool.len());
            deck.extend(pool.drain(..take).cloned());
        }

        deck.sort_by_key(|c| c.id);
        debug!(size = deck.len(), area, boost, special, "assembled random deck");
        deck
    }
}

fn standard_cards() -> Vec<Card> {
    let id = CardId::new;
    vec![
        Card::area(id(1), "Spark", "+1 on the target cell.", 1, AreaPattern::Single),
        Card::area(id(2), "Focus", "+3 on the target cell.", 3, AreaPattern::Single),
        Card::area(id(3), "Cross", "+1 on the target and its four neighbours.", 1, AreaPattern::Cross),
        Card::area(id(4), "Saltire", "+1 on the target and its four diagonals.", 1, AreaPattern::Saltire),
        Card::area(id(5), "Block", "+1 on a 2×2 square from the target.", 1, AreaPattern::Block),
        Card::area(id(6), "Line", "+1 on three cells in a row or column.", 1, AreaPattern::Line),
        Card::area(id(7), "Beam", "+1 on the whole row or column.", 1, AreaPattern::Beam),
        Card::area(id(8), "Tee", "+1 on a rotatable T shape.", 1, AreaPattern::Tee),
        Card::area(id(9), "Hook", "+1 on a rotatable L shape.", 1, AreaPattern::Hook),
        Card::area(id(10), "Pair", "+2 on the target and the next cell.", 2, AreaPattern::Pair),
        Card::area(id(11), "Bastion", "Corner only. +2 on the corner 2×2.", 2, AreaPattern::CornerBlock),
        Card::area(id(12), "Rampart", "Edge only. +1 on a wall along the edge.", 1, AreaPattern::EdgeWall),
        Card::boost(id(13), "Fortify", "+1 on your cells around an owned target.", 1, BoostPattern::Fortify),
        Card::boost(id(14), "Rally", "+1 on your cells in the 3×3 around the target.", 1, BoostPattern::Rally),
        Card::boost(id(15), "Entrench", "+1 on the whole region of an owned target.", 1, BoostPattern::Entrench),
        Card::boost(id(16), "Reinforce", "+2 on an owned target.", 2, BoostPattern::Reinforce),
        Card::boost(id(17), "Frontier", "+2 on region cells touching the enemy.", 2, BoostPattern::Frontier),
        Card::boost(id(18), "Sprawl", "+1 on neutral cells next to an owned target.", 1, BoostPattern::Sprawl),
        Card::special(id(19), "Jammer", "Cancel the opponent's special this turn.", SpecialKind::Jammer),
        Card::special(id(20), "Gamble", "Copy the opponent's Area card and steal a cell.", SpecialKind::Gamble),
        Card::special(id(21), "Double Time", "Play two Area cards, then skip a turn.", SpecialKind::DoubleTime),
        Card::special(id(22), "Echo", "Replay your last Area card.", SpecialKind::Echo),
        Card::special(id(23), "Time Bomb", "+2 around the target in two turns.", SpecialKind::TimeBomb),
        Card::special(id(24), "Inversion Field", "Flip every cell's owner.", SpecialKind::InversionField),
        Card::special(id(25), "Last Stand", "Endgame: double one region, drop the rest.", SpecialKind::LastStand),
        Card::special(id(26), "Target Lock", "Guess the opponent's Area target for +4.", SpecialKind::TargetLock),
    ]
}
