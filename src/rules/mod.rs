//! Declarative pile rules.
//!
//! Every pile carries a `Rule` supplied by the game configuration. A rule is
//! four independent predicates plus a size limit:
//!
//! - `build`: may `moving` be placed on `target`?
//! - `movement`: may the run starting at `index` be picked up?
//! - `base`: may an empty pile accept `first` (leading a run of `count`)?
//! - `limit`: maximum pile size
//!
//! Predicates are preset enums so that game definitions can be written as
//! JSON. Each enum has a `Custom` variant holding a closure for host-native
//! rules; custom variants are skipped by serde.

mod base;
mod build;
mod movement;

pub use base::BaseRule;
pub use build::BuildRule;
pub use movement::MoveRule;

use serde::{Deserialize, Serialize};

use crate::core::card::{Card, Rank};
use crate::piles::Pile;

/// Raw limit value meaning "no limit".
pub const UNLIMITED: i32 = -1;

/// Raw limit value meaning "one card per accepted rank".
pub const AUTO_LIMIT: i32 = -2;

/// Maximum number of cards a pile may hold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum Limit {
    #[default]
    Unlimited,
    /// Resolved against the game's rank count when the game is built.
    Auto,
    Fixed(usize),
}

impl Limit {
    /// Replace `Auto` with a fixed limit of `rank_count`.
    #[must_use]
    pub fn resolve(self, rank_count: usize) -> Self {
        match self {
            Limit::Auto => Limit::Fixed(rank_count),
            other => other,
        }
    }

    /// Would a pile of `size` cards still be within the limit after `count` more?
    ///
    /// An unresolved `Auto` limit does not restrict anything.
    #[must_use]
    pub fn allows(self, size: usize, count: usize) -> bool {
        match self {
            Limit::Fixed(max) => size + count <= max,
            Limit::Unlimited | Limit::Auto => true,
        }
    }
}

impl From<i32> for Limit {
    fn from(raw: i32) -> Self {
        match raw {
            AUTO_LIMIT => Limit::Auto,
            n if n < 0 => Limit::Unlimited,
            n => Limit::Fixed(n as usize),
        }
    }
}

impl From<Limit> for i32 {
    fn from(limit: Limit) -> Self {
        match limit {
            Limit::Unlimited => UNLIMITED,
            Limit::Auto => AUTO_LIMIT,
            Limit::Fixed(n) => n as i32,
        }
    }
}

/// The complete rule attached to one pile.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Rule {
    pub build: BuildRule,

    /// Rank sequences continue from King to Ace (and back).
    #[serde(default)]
    pub wrap: bool,

    /// Whether the pile accepts more than one card at a time.
    #[serde(default)]
    pub is_sequence: bool,

    #[serde(rename = "move")]
    pub movement: MoveRule,

    pub base: BaseRule,

    #[serde(default)]
    pub limit: Limit,
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            build: BuildRule::NoBuilding,
            wrap: false,
            is_sequence: false,
            movement: MoveRule::None,
            base: BaseRule::None,
            limit: Limit::Unlimited,
        }
    }
}

impl Rule {
    /// Create a rule from its three predicates.
    #[must_use]
    pub fn new(build: BuildRule, movement: MoveRule, base: BaseRule) -> Self {
        Self {
            build,
            movement,
            base,
            ..Self::default()
        }
    }

    /// Accept runs of more than one card.
    #[must_use]
    pub fn sequence(mut self) -> Self {
        self.is_sequence = true;
        self
    }

    /// Let rank sequences wrap around.
    #[must_use]
    pub fn wrapping(mut self) -> Self {
        self.wrap = true;
        self
    }

    /// Set the size limit.
    #[must_use]
    pub fn with_limit(mut self, limit: Limit) -> Self {
        self.limit = limit;
        self
    }

    /// Standard foundation: Ace base, builds up in suit, one card per rank.
    #[must_use]
    pub fn foundation() -> Self {
        Self::new(BuildRule::UpInSuit, MoveRule::Top, BaseRule::Ace).with_limit(Limit::Auto)
    }

    /// Standard Klondike tableau: down in alternate colours, King base.
    #[must_use]
    pub fn klondike_tableau() -> Self {
        Self::new(BuildRule::DownAlternateColors, MoveRule::InSequence, BaseRule::King).sequence()
    }

    /// A free cell: holds any single card.
    #[must_use]
    pub fn free_cell() -> Self {
        Self::new(BuildRule::NoBuilding, MoveRule::Top, BaseRule::Any).with_limit(Limit::Fixed(1))
    }

    /// Stock: nothing may be dropped or picked up.
    #[must_use]
    pub fn stock() -> Self {
        Self::default()
    }

    /// Waste: top card can be played, nothing can be dropped.
    #[must_use]
    pub fn waste() -> Self {
        Self::new(BuildRule::NoBuilding, MoveRule::Top, BaseRule::None)
    }

    /// May `moving` be placed on `target`?
    #[must_use]
    pub fn build(&self, target: &Card, moving: &Card) -> bool {
        self.build.allows(target, moving, self.wrap)
    }

    /// May the run starting at `index` be picked up from `pile`?
    #[must_use]
    pub fn can_move(&self, pile: &Pile, index: usize) -> bool {
        self.movement.allows(self, pile, index)
    }

    /// May an empty pile accept `first` leading a run of `count` cards?
    #[must_use]
    pub fn base(&self, first: &Card, count: usize) -> bool {
        self.base.allows(first, count)
    }

    /// The rank an empty pile is labelled with, when the base is rank-specific.
    #[must_use]
    pub fn base_rank(&self) -> Option<Rank> {
        self.base.rank()
    }
}
