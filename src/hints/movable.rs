//! Per-refresh memo of "can this run be picked up".

use std::cell::RefCell;

use rustc_hash::FxHashMap;

use crate::piles::{Pile, PileId};

/// Memoized `Pile::can_move_from` results.
///
/// Sequence move rules walk the run on every query, and hint search asks
/// about every index of every pile, so answers are kept until the next
/// `clear`. The owner must clear the cache whenever any pile changes.
#[derive(Debug, Default)]
pub struct MovableCache {
    entries: RefCell<FxHashMap<(PileId, usize), bool>>,
}

impl MovableCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// May the run of `pile` starting at `index` be picked up?
    pub fn check(&self, pile: &Pile, index: usize) -> bool {
        *self
            .entries
            .borrow_mut()
            .entry((pile.id(), index))
            .or_insert_with(|| pile.can_move_from(index))
    }

    /// Forget every cached answer.
    pub fn clear(&mut self) {
        self.entries.get_mut().clear();
    }

    /// Number of cached answers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
