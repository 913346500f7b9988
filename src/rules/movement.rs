//! Move predicates: which runs may be picked up.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Rule;
use crate::piles::Pile;

/// Host-supplied move predicate `(pile, index) -> bool`.
pub type MoveFn = Arc<dyn Fn(&Pile, usize) -> bool + Send + Sync>;

/// Which runs of a pile may be picked up.
///
/// Every preset rejects an out-of-range index or a face-down starting card.
#[derive(Clone, Default, Serialize, Deserialize)]
pub enum MoveRule {
    #[default]
    None,
    /// Only the topmost card.
    Top,
    /// The topmost card or the whole pile.
    TopOrPile,
    /// Any run of face-up cards.
    FaceUp,
    /// A run where each card builds on the one below it.
    InSequence,
    /// As `InSequence`, and the whole run shares a suit.
    InSequenceInSuit,
    #[serde(skip)]
    Custom(MoveFn),
}

impl MoveRule {
    /// Wrap a closure as a custom move rule.
    pub fn custom(f: impl Fn(&Pile, usize) -> bool + Send + Sync + 'static) -> Self {
        MoveRule::Custom(Arc::new(f))
    }

    /// Evaluate the rule for the run of `pile` starting at `index`.
    ///
    /// `rule` is the pile's full rule; sequence presets use its build predicate.
    #[must_use]
    pub fn allows(&self, rule: &Rule, pile: &Pile, index: usize) -> bool {
        let cards = pile.cards();
        match cards.get(index) {
            Some(card) if card.is_face_up() => {}
            _ => return false,
        }
        let top = cards.len() - 1;

        match self {
            MoveRule::None => false,
            MoveRule::Top => index == top,
            MoveRule::TopOrPile => index == top || index == 0,
            MoveRule::FaceUp => cards.iter().skip(index).all(|c| c.is_face_up()),
            MoveRule::InSequence => is_run(rule, pile, index, false),
            MoveRule::InSequenceInSuit => is_run(rule, pile, index, true),
            MoveRule::Custom(f) => f(pile, index),
        }
    }
}

fn is_run(rule: &Rule, pile: &Pile, index: usize, in_suit: bool) -> bool {
    let cards = pile.cards();
    let mut lower = match cards.get(index) {
        Some(card) => card,
        None => return false,
    };
    for upper in cards.iter().skip(index + 1) {
        if upper.face_down || !rule.build(lower, upper) {
            return false;
        }
        if in_suit && upper.suit != lower.suit {
            return false;
        }
        lower = upper;
    }
    true
}

impl fmt::Debug for MoveRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveRule::None => f.write_str("None"),
            MoveRule::Top => f.write_str("Top"),
            MoveRule::TopOrPile => f.write_str("TopOrPile"),
            MoveRule::FaceUp => f.write_str("FaceUp"),
            MoveRule::InSequence => f.write_str("InSequence"),
            MoveRule::InSequenceInSuit => f.write_str("InSequenceInSuit"),
            MoveRule::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Card, Rank, Suit};
    use crate::piles::{PileId, PileType};
    use crate::rules::{BaseRule, BuildRule};

    fn tableau(cards: &[Card], movement: MoveRule) -> Pile {
        let rule = Rule::new(BuildRule::DownAlternateColors, movement, BaseRule::King).sequence();
        let mut pile = Pile::new(PileId::new(0), PileType::Tableau, 0, rule);
        for &card in cards {
            pile.push(card);
        }
        pile
    }

    fn run() -> Vec<Card> {
        vec![
            Card::new(Suit::Clubs, Rank::Ten).turned_down(),
            Card::new(Suit::Hearts, Rank::Nine),
            Card::new(Suit::Spades, Rank::Eight),
            Card::new(Suit::Diamonds, Rank::Seven),
        ]
    }

    #[test]
    fn test_top() {
        let pile = tableau(&run(), MoveRule::Top);
        assert!(pile.rule().can_move(&pile, 3));
        assert!(!pile.rule().can_move(&pile, 2));
        assert!(!pile.rule().can_move(&pile, 4));
    }

    #[test]
    fn test_in_sequence() {
        let pile = tableau(&run(), MoveRule::InSequence);
        assert!(pile.rule().can_move(&pile, 1));
        assert!(pile.rule().can_move(&pile, 2));
        assert!(pile.rule().can_move(&pile, 3));
        // Face-down start
        assert!(!pile.rule().can_move(&pile, 0));
    }

    #[test]
    fn test_in_sequence_broken_run() {
        let mut cards = run();
        cards.push(Card::new(Suit::Hearts, Rank::Six)); // same colour as the 7 of diamonds
        let pile = tableau(&cards, MoveRule::InSequence);

        assert!(!pile.rule().can_move(&pile, 1));
        assert!(!pile.rule().can_move(&pile, 3));
        assert!(pile.rule().can_move(&pile, 4));
    }

    #[test]
    fn test_in_sequence_in_suit() {
        let cards = vec![
            Card::new(Suit::Spades, Rank::Nine),
            Card::new(Suit::Spades, Rank::Eight),
            Card::new(Suit::Spades, Rank::Seven),
        ];
        let rule = Rule::new(BuildRule::DownAnySuit, MoveRule::InSequenceInSuit, BaseRule::Any)
            .sequence();
        let mut pile = Pile::new(PileId::new(0), PileType::Tableau, 0, rule);
        for card in cards {
            pile.push(card);
        }
        assert!(pile.rule().can_move(&pile, 0));

        pile.push(Card::new(Suit::Hearts, Rank::Six));
        assert!(!pile.rule().can_move(&pile, 0));
        assert!(pile.rule().can_move(&pile, 3));
    }

    #[test]
    fn test_top_or_pile_and_face_up() {
        let mut cards = run();
        cards[0].flip_up();

        let pile = tableau(&cards, MoveRule::TopOrPile);
        assert!(pile.rule().can_move(&pile, 0));
        assert!(!pile.rule().can_move(&pile, 1));
        assert!(pile.rule().can_move(&pile, 3));

        let pile = tableau(&cards, MoveRule::FaceUp);
        assert!(pile.rule().can_move(&pile, 1));
    }

    #[test]
    fn test_none_and_custom() {
        let pile = tableau(&run(), MoveRule::None);
        assert!(!pile.rule().can_move(&pile, 3));

        let pile = tableau(&run(), MoveRule::custom(|pile, index| pile.len() - index <= 2));
        assert!(pile.rule().can_move(&pile, 2));
        assert!(!pile.rule().can_move(&pile, 1));
    }
}
