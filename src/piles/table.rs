//! The set of piles making up one game.

use smallvec::SmallVec;

use super::pile::{Pile, PileId, PileType};
use crate::core::card::Card;

/// Pile IDs of one type. Most games have at most eight of any type.
pub type PileIds = SmallVec<[PileId; 8]>;

/// All piles of a game, addressed by `PileId`.
///
/// The pile list is fixed when the game is built; only the cards change.
///
/// ```
/// use solitide_rules::piles::{Pile, PileId, PileType, Table};
/// use solitide_rules::rules::Rule;
///
/// let table = Table::new(vec![
///     Pile::new(PileId::new(0), PileType::Stock, 0, Rule::stock()),
///     Pile::new(PileId::new(1), PileType::Tableau, 0, Rule::klondike_tableau()),
///     Pile::new(PileId::new(2), PileType::Tableau, 1, Rule::klondike_tableau()),
/// ]);
///
/// assert_eq!(table.ids_of(PileType::Tableau).len(), 2);
/// assert_eq!(table.first_of(PileType::Stock), Some(PileId::new(0)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Table {
    piles: Vec<Pile>,
}

impl Table {
    /// Create a table from piles whose IDs match their positions.
    #[must_use]
    pub fn new(piles: Vec<Pile>) -> Self {
        for (i, pile) in piles.iter().enumerate() {
            assert_eq!(pile.id().index(), i, "Pile {} is at position {}", pile.id(), i);
        }
        Self { piles }
    }

    #[must_use]
    pub fn piles(&self) -> &[Pile] {
        &self.piles
    }

    pub fn piles_mut(&mut self) -> impl Iterator<Item = &mut Pile> {
        self.piles.iter_mut()
    }

    /// Get a pile. Panics on an unknown ID.
    #[must_use]
    pub fn pile(&self, id: PileId) -> &Pile {
        &self.piles[id.index()]
    }

    /// Get a mutable pile. Panics on an unknown ID.
    pub fn pile_mut(&mut self, id: PileId) -> &mut Pile {
        &mut self.piles[id.index()]
    }

    /// Get a pile if the ID exists.
    #[must_use]
    pub fn get(&self, id: PileId) -> Option<&Pile> {
        self.piles.get(id.index())
    }

    /// Number of piles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.piles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.piles.is_empty()
    }

    /// Iterate over piles of one type, in index order.
    pub fn of_type(&self, pile_type: PileType) -> impl Iterator<Item = &Pile> + '_ {
        self.piles.iter().filter(move |p| p.pile_type() == pile_type)
    }

    /// IDs of piles of one type, in index order.
    #[must_use]
    pub fn ids_of(&self, pile_type: PileType) -> PileIds {
        self.of_type(pile_type).map(Pile::id).collect()
    }

    /// First pile of a type.
    #[must_use]
    pub fn first_of(&self, pile_type: PileType) -> Option<PileId> {
        self.of_type(pile_type).next().map(Pile::id)
    }

    /// Number of piles of a type.
    #[must_use]
    pub fn count_of(&self, pile_type: PileType) -> usize {
        self.of_type(pile_type).count()
    }

    /// Does the game have any pile of this type?
    #[must_use]
    pub fn has(&self, pile_type: PileType) -> bool {
        self.of_type(pile_type).next().is_some()
    }

    /// Are all piles of this type empty? True when there are none.
    #[must_use]
    pub fn all_empty(&self, pile_type: PileType) -> bool {
        self.of_type(pile_type).all(Pile::is_empty)
    }

    /// Total cards held by piles of a type.
    #[must_use]
    pub fn cards_in(&self, pile_type: PileType) -> usize {
        self.of_type(pile_type).map(Pile::len).sum()
    }

    /// Total cards on the table.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.piles.iter().map(Pile::len).sum()
    }

    /// Iterate over every card with its pile.
    pub fn cards(&self) -> impl Iterator<Item = (PileId, &Card)> + '_ {
        self.piles
            .iter()
            .flat_map(|p| p.cards().iter().map(move |c| (p.id(), c)))
    }

    /// Move cards between two different piles. See `Pile::move_cards`.
    pub fn move_cards(
        &mut self,
        from: PileId,
        to: PileId,
        start: usize,
        count: usize,
        reverse: bool,
    ) {
        let (src, dst) = self.pair_mut(from, to);
        src.move_cards(dst, start, count, reverse);
    }

    /// Empty every pile.
    pub fn clear(&mut self) {
        for pile in &mut self.piles {
            pile.clear();
        }
    }

    pub fn clear_highlights(&mut self) {
        for pile in &mut self.piles {
            pile.clear_highlights();
        }
    }

    fn pair_mut(&mut self, a: PileId, b: PileId) -> (&mut Pile, &mut Pile) {
        let (ai, bi) = (a.index(), b.index());
        assert_ne!(ai, bi, "Cannot move cards from {} onto itself", a);
        if ai < bi {
            let (left, right) = self.piles.split_at_mut(bi);
            (&mut left[ai], &mut right[0])
        } else {
            let (left, right) = self.piles.split_at_mut(ai);
            (&mut right[0], &mut left[bi])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Rank, Suit};
    use crate::rules::Rule;

    fn table() -> Table {
        Table::new(vec![
            Pile::new(PileId::new(0), PileType::Stock, 0, Rule::stock()),
            Pile::new(PileId::new(1), PileType::Waste, 0, Rule::waste()),
            Pile::new(PileId::new(2), PileType::Tableau, 0, Rule::klondike_tableau()),
            Pile::new(PileId::new(3), PileType::Tableau, 1, Rule::klondike_tableau()),
        ])
    }

    #[test]
    fn test_type_queries() {
        let table = table();
        assert_eq!(table.len(), 4);
        assert_eq!(table.count_of(PileType::Tableau), 2);
        assert!(!table.has(PileType::Foundation));
        assert!(table.all_empty(PileType::Foundation));
        assert_eq!(table.ids_of(PileType::Tableau).as_slice(), &[PileId::new(2), PileId::new(3)]);
    }

    #[test]
    fn test_move_between_piles_both_directions() {
        let mut table = table();
        table.pile_mut(PileId::new(3)).push(Card::new(Suit::Hearts, Rank::Two));
        table.pile_mut(PileId::new(3)).push(Card::new(Suit::Hearts, Rank::Three));

        table.move_cards(PileId::new(3), PileId::new(1), 1, 1, false);
        assert_eq!(table.pile(PileId::new(1)).len(), 1);

        table.move_cards(PileId::new(1), PileId::new(2), 0, 1, false);
        assert_eq!(table.pile(PileId::new(2)).top(), Some(&Card::new(Suit::Hearts, Rank::Three)));
        assert_eq!(table.total_cards(), 2);
        assert_eq!(table.cards_in(PileType::Tableau), 2);
    }

    #[test]
    #[should_panic(expected = "onto itself")]
    fn test_move_onto_self_panics() {
        let mut table = table();
        table.move_cards(PileId::new(2), PileId::new(2), 0, 0, false);
    }

    #[test]
    #[should_panic(expected = "is at position")]
    fn test_mismatched_ids_panic() {
        Table::new(vec![Pile::new(PileId::new(1), PileType::Stock, 0, Rule::stock())]);
    }
}
