//! Enumeration of every legal source to destination move.

use super::movable::MovableCache;
use super::Move;
use crate::piles::{Pile, PileType, Table};

/// List every legal move on `table`.
///
/// Sources are all `(pile, index)` runs the move rules allow; destinations
/// are all piles except stock and waste. Each source yields at most one
/// foundation move and at most one free-cell move.
#[must_use]
pub fn available_hints(table: &Table, movable: &MovableCache) -> Vec<Move> {
    let sources: Vec<(&Pile, usize)> = table
        .piles()
        .iter()
        .flat_map(|pile| (0..pile.len()).map(move |index| (pile, index)))
        .filter(|(pile, index)| movable.check(pile, *index))
        .collect();

    let mut hints = Vec::new();
    for (src, src_index) in sources {
        let card = src.cards()[src_index];
        let count = src.len() - src_index;
        let mut found_foundation = false;
        let mut found_freecell = false;

        for dst in table.piles() {
            if dst.id() == src.id() || excluded(src, src_index, dst) {
                continue;
            }

            let to_foundation = dst.pile_type() == PileType::Foundation;
            let to_freecell = dst.pile_type() == PileType::FreeCell;
            if (to_foundation && found_foundation) || (to_freecell && found_freecell) {
                continue;
            }

            let dst_index = dst.top_index();
            if !dst.can_build(dst_index, &card, count) {
                continue;
            }

            found_foundation |= to_foundation;
            found_freecell |= to_freecell;
            hints.push(Move {
                src: src.id(),
                src_index,
                dst: dst.id(),
                dst_index,
                reached_foundation: to_foundation,
                reached_freecell: to_freecell,
            });
        }
    }
    hints
}

/// Pairs never offered as hints even when legal.
fn excluded(src: &Pile, src_index: usize, dst: &Pile) -> bool {
    use PileType::*;

    match (src.pile_type(), dst.pile_type()) {
        (_, Stock | Waste) => true,
        (Foundation, Foundation | FreeCell) => true,
        (FreeCell, FreeCell) => true,
        // Whole column to an empty column changes nothing
        (Tableau, Tableau) if src_index == 0 && dst.is_empty() => true,
        // Nothing to click on
        _ if dst.is_empty() && !dst.has_marker() => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Card, Rank, Suit};
    use crate::piles::PileId;
    use crate::rules::Rule;

    fn table(piles: Vec<(PileType, Rule, Vec<Card>)>) -> Table {
        let piles = piles
            .into_iter()
            .enumerate()
            .map(|(i, (pile_type, rule, cards))| {
                let mut pile = Pile::new(PileId::new(i as u16), pile_type, i, rule);
                for card in cards {
                    pile.push(card);
                }
                pile
            })
            .collect();
        Table::new(piles)
    }

    #[test]
    fn test_single_foundation_per_source() {
        let table = table(vec![
            (PileType::Tableau, Rule::klondike_tableau(), vec![Card::new(Suit::Hearts, Rank::Ace)]),
            (PileType::Foundation, Rule::foundation(), vec![]),
            (PileType::Foundation, Rule::foundation(), vec![]),
        ]);
        let hints = available_hints(&table, &MovableCache::new());

        assert_eq!(hints.len(), 1);
        assert_eq!(hints[0].dst, PileId::new(1));
        assert!(hints[0].reached_foundation);
        assert_eq!(hints[0].dst_index, None);
    }

    #[test]
    fn test_whole_column_not_moved_to_empty_column() {
        let king = Card::new(Suit::Hearts, Rank::King);
        let table = table(vec![
            (PileType::Tableau, Rule::klondike_tableau(), vec![king]),
            (PileType::Tableau, Rule::klondike_tableau(), vec![]),
        ]);
        assert!(available_hints(&table, &MovableCache::new()).is_empty());
    }

    #[test]
    fn test_freecell_rules() {
        let table = table(vec![
            (PileType::FreeCell, Rule::free_cell(), vec![Card::new(Suit::Hearts, Rank::Five)]),
            (PileType::FreeCell, Rule::free_cell(), vec![]),
            (PileType::FreeCell, Rule::free_cell(), vec![]),
            (PileType::Tableau, Rule::klondike_tableau(), vec![Card::new(Suit::Spades, Rank::Six)]),
        ]);
        let hints = available_hints(&table, &MovableCache::new());

        // Tableau six: one free-cell hint only; free-cell five: onto the six
        assert_eq!(hints.len(), 2);
        assert!(hints.iter().any(|h| h.src == PileId::new(0) && h.dst == PileId::new(3)));
        let to_cells: Vec<_> = hints.iter().filter(|h| h.reached_freecell).collect();
        assert_eq!(to_cells.len(), 1);
        assert_eq!(to_cells[0].src, PileId::new(3));
    }

    #[test]
    fn test_markerless_empty_pile_skipped() {
        use crate::core::config::PileConfig;
        use crate::rules::BaseRule;

        let mut rule = Rule::klondike_tableau();
        rule.base = BaseRule::Any;

        let build = |has_marker: bool| {
            let mut config = PileConfig::new(PileType::Tableau, rule.clone());
            config.has_marker = has_marker;
            let mut src = Pile::from_config(PileId::new(0), 0, &config, 13);
            src.push(Card::new(Suit::Hearts, Rank::Nine));
            src.push(Card::new(Suit::Spades, Rank::Four));
            let dst = Pile::from_config(PileId::new(1), 1, &config, 13);
            Table::new(vec![src, dst])
        };

        assert_eq!(available_hints(&build(true), &MovableCache::new()).len(), 1);
        assert!(available_hints(&build(false), &MovableCache::new()).is_empty());
    }

    #[test]
    fn test_stock_and_waste_never_destinations() {
        let table = table(vec![
            (PileType::Tableau, Rule::klondike_tableau(), vec![Card::new(Suit::Hearts, Rank::Two)]),
            (PileType::Waste, Rule::waste(), vec![]),
            (PileType::Stock, Rule::stock(), vec![]),
        ]);
        assert!(available_hints(&table, &MovableCache::new()).is_empty());
    }
}
