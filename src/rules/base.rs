//! Base predicates: what an empty pile accepts.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::card::{Card, Rank};

/// Host-supplied base predicate `(first_card, moved_count) -> bool`.
pub type BaseFn = Arc<dyn Fn(&Card, usize) -> bool + Send + Sync>;

/// What an empty pile accepts.
#[derive(Clone, Default, Serialize, Deserialize)]
pub enum BaseRule {
    #[default]
    None,
    Any,
    Ace,
    King,
    Rank(Rank),
    #[serde(skip)]
    Custom(BaseFn),
}

impl BaseRule {
    /// Wrap a closure as a custom base rule.
    pub fn custom(f: impl Fn(&Card, usize) -> bool + Send + Sync + 'static) -> Self {
        BaseRule::Custom(Arc::new(f))
    }

    /// May an empty pile accept `first` leading a run of `count` cards?
    #[must_use]
    pub fn allows(&self, first: &Card, count: usize) -> bool {
        match self {
            BaseRule::None => false,
            BaseRule::Any => true,
            BaseRule::Ace => first.rank == Rank::Ace,
            BaseRule::King => first.rank == Rank::King,
            BaseRule::Rank(rank) => first.rank == *rank,
            BaseRule::Custom(f) => f(first, count),
        }
    }

    /// The single rank this base accepts, if it names one.
    #[must_use]
    pub fn rank(&self) -> Option<Rank> {
        match self {
            BaseRule::Ace => Some(Rank::Ace),
            BaseRule::King => Some(Rank::King),
            BaseRule::Rank(rank) => Some(*rank),
            _ => None,
        }
    }
}

impl fmt::Debug for BaseRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaseRule::None => f.write_str("None"),
            BaseRule::Any => f.write_str("Any"),
            BaseRule::Ace => f.write_str("Ace"),
            BaseRule::King => f.write_str("King"),
            BaseRule::Rank(rank) => write!(f, "Rank({:?})", rank),
            BaseRule::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::Suit;

    #[test]
    fn test_presets() {
        let ace = Card::new(Suit::Hearts, Rank::Ace);
        let king = Card::new(Suit::Spades, Rank::King);
        let five = Card::new(Suit::Clubs, Rank::Five);

        assert!(!BaseRule::None.allows(&ace, 1));
        assert!(BaseRule::Any.allows(&five, 3));
        assert!(BaseRule::Ace.allows(&ace, 1));
        assert!(!BaseRule::Ace.allows(&king, 1));
        assert!(BaseRule::King.allows(&king, 5));
        assert!(BaseRule::Rank(Rank::Five).allows(&five, 1));
    }

    #[test]
    fn test_custom_sees_count() {
        let single = BaseRule::custom(|_, count| count == 1);
        let card = Card::new(Suit::Hearts, Rank::Two);
        assert!(single.allows(&card, 1));
        assert!(!single.allows(&card, 2));
    }

    #[test]
    fn test_rank_label() {
        assert_eq!(BaseRule::Ace.rank(), Some(Rank::Ace));
        assert_eq!(BaseRule::Rank(Rank::Seven).rank(), Some(Rank::Seven));
        assert_eq!(BaseRule::Any.rank(), None);
    }

    #[test]
    fn test_serde_presets() {
        let rule: BaseRule = serde_json::from_str(r#"{"Rank":"Queen"}"#).unwrap();
        assert_eq!(rule.rank(), Some(Rank::Queen));
        let rule: BaseRule = serde_json::from_str(r#""Ace""#).unwrap();
        assert!(matches!(rule, BaseRule::Ace));
    }
}
