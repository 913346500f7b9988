//! Build predicates: which card may be placed on which.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::card::Card;

/// Host-supplied build predicate `(target, moving) -> bool`.
pub type BuildFn = Arc<dyn Fn(&Card, &Card) -> bool + Send + Sync>;

/// How cards build on a non-empty pile.
///
/// "Up" means the moving card ranks one above the target, "Down" one below.
#[derive(Clone, Default, Serialize, Deserialize)]
pub enum BuildRule {
    #[default]
    NoBuilding,
    Any,
    InRank,
    InSuit,
    UpInSuit,
    DownInSuit,
    UpAlternateColors,
    DownAlternateColors,
    UpAnySuit,
    DownAnySuit,
    UpOrDownAnySuit,
    UpOrDownInSuit,
    DownAnyButOwnSuit,
    #[serde(skip)]
    Custom(BuildFn),
}

impl BuildRule {
    /// Wrap a closure as a custom build rule.
    pub fn custom(f: impl Fn(&Card, &Card) -> bool + Send + Sync + 'static) -> Self {
        BuildRule::Custom(Arc::new(f))
    }

    /// Evaluate the rule for `moving` placed on `target`.
    #[must_use]
    pub fn allows(&self, target: &Card, moving: &Card, wrap: bool) -> bool {
        let up = target.rank.next(wrap) == Some(moving.rank);
        let down = target.rank.prev(wrap) == Some(moving.rank);
        let same_suit = target.suit == moving.suit;
        let alt_color = target.color() != moving.color();

        match self {
            BuildRule::NoBuilding => false,
            BuildRule::Any => true,
            BuildRule::InRank => target.rank == moving.rank,
            BuildRule::InSuit => same_suit,
            BuildRule::UpInSuit => up && same_suit,
            BuildRule::DownInSuit => down && same_suit,
            BuildRule::UpAlternateColors => up && alt_color,
            BuildRule::DownAlternateColors => down && alt_color,
            BuildRule::UpAnySuit => up,
            BuildRule::DownAnySuit => down,
            BuildRule::UpOrDownAnySuit => up || down,
            BuildRule::UpOrDownInSuit => (up || down) && same_suit,
            BuildRule::DownAnyButOwnSuit => down && !same_suit,
            BuildRule::Custom(f) => f(target, moving),
        }
    }
}

impl fmt::Debug for BuildRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildRule::NoBuilding => f.write_str("NoBuilding"),
            BuildRule::Any => f.write_str("Any"),
            BuildRule::InRank => f.write_str("InRank"),
            BuildRule::InSuit => f.write_str("InSuit"),
            BuildRule::UpInSuit => f.write_str("UpInSuit"),
            BuildRule::DownInSuit => f.write_str("DownInSuit"),
            BuildRule::UpAlternateColors => f.write_str("UpAlternateColors"),
            BuildRule::DownAlternateColors => f.write_str("DownAlternateColors"),
            BuildRule::UpAnySuit => f.write_str("UpAnySuit"),
            BuildRule::DownAnySuit => f.write_str("DownAnySuit"),
            BuildRule::UpOrDownAnySuit => f.write_str("UpOrDownAnySuit"),
            BuildRule::UpOrDownInSuit => f.write_str("UpOrDownInSuit"),
            BuildRule::DownAnyButOwnSuit => f.write_str("DownAnyButOwnSuit"),
            BuildRule::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
