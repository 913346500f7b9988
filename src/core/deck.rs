//! Deck construction and the seeded shuffle.
//!
//! `shuffled_deal` is the only place cards enter a game. Given the same
//! seed, deck count and suit/rank subset it always produces the same order,
//! which is what seeded replay and save/resume rely on.

use super::card::{Card, Rank, Suit};
use super::rng::GameRng;

/// Build one deck restricted to the given suits and ranks.
///
/// Cards come out face down in suit-major, rank-minor order following
/// `Suit::ALL` and `Rank::ALL`, regardless of the order of the filters.
#[must_use]
pub fn make_deck(deck_index: u8, suits: &[Suit], ranks: &[Rank]) -> Vec<Card> {
    Suit::ALL
        .iter()
        .filter(|suit| suits.contains(suit))
        .flat_map(|&suit| {
            Rank::ALL
                .iter()
                .filter(|rank| ranks.contains(rank))
                .map(move |&rank| Card::new(suit, rank).from_deck(deck_index).turned_down())
        })
        .collect()
}

/// Concatenate `deck_count` decks (tagged `0..deck_count`) and shuffle them.
pub fn shuffled_deal(
    rng: &mut GameRng,
    deck_count: u8,
    suits: &[Suit],
    ranks: &[Rank],
) -> Vec<Card> {
    let mut cards: Vec<Card> = (0..deck_count)
        .flat_map(|deck| make_deck(deck, suits, ranks))
        .collect();
    rng.shuffle(&mut cards);
    cards
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_deck() {
        let deck = make_deck(0, &Suit::ALL, &Rank::ALL);
        assert_eq!(deck.len(), 52);
        assert!(deck.iter().all(|c| c.face_down));

        // Suit-major order
        assert_eq!(deck[0], Card::new(Suit::Hearts, Rank::Ace));
        assert_eq!(deck[12], Card::new(Suit::Hearts, Rank::King));
        assert_eq!(deck[13], Card::new(Suit::Diamonds, Rank::Ace));
        assert_eq!(deck[51], Card::new(Suit::Spades, Rank::King));
    }

    #[test]
    fn test_restricted_deck() {
        let deck = make_deck(2, &[Suit::Spades, Suit::Hearts], &[Rank::King, Rank::Ace]);
        assert_eq!(deck.len(), 4);
        assert!(deck.iter().all(|c| c.deck == 2));

        // Canonical order ignores filter order
        assert_eq!(deck[0], Card::new(Suit::Hearts, Rank::Ace).from_deck(2));
        assert_eq!(deck[3], Card::new(Suit::Spades, Rank::King).from_deck(2));
    }

    #[test]
    fn test_shuffled_deal_two_decks() {
        let mut rng = GameRng::new(7);
        let cards = shuffled_deal(&mut rng, 2, &Suit::ALL, &Rank::ALL);
        assert_eq!(cards.len(), 104);
        assert_eq!(cards.iter().filter(|c| c.deck == 1).count(), 52);
    }

    #[test]
    fn test_shuffled_deal_determinism() {
        let a = shuffled_deal(&mut GameRng::new(99), 1, &Suit::ALL, &Rank::ALL);
        let b = shuffled_deal(&mut GameRng::new(99), 1, &Suit::ALL, &Rank::ALL);
        let c = shuffled_deal(&mut GameRng::new(100), 1, &Suit::ALL, &Rank::ALL);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
