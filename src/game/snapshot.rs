//! Whole-game snapshots for undo and persistence.

use im::Vector;
use serde_json::Value;

use crate::core::card::Card;
use crate::core::rng::GameRngState;
use crate::core::state::GameState;

/// Everything needed to restore a game: pile contents, counters, RNG
/// position and host storage.
///
/// Piles are `im::Vector`s, so taking a snapshot shares structure with the
/// live table instead of copying every card.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    /// Cards of every pile, indexed by `PileId`.
    pub piles: Vec<Vector<Card>>,
    pub state: GameState,
    pub rng: GameRngState,
    pub storage: Value,
}

impl Snapshot {
    /// Total cards across every pile.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.piles.iter().map(Vector::len).sum()
    }
}
