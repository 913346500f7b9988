//! A single pile: its cards, rule and presentation hints.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::card::{Card, Rank};
use crate::core::config::PileConfig;
use crate::rules::{BaseRule, Rule};

/// Pile identifier: the pile's position in the game's pile list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PileId(pub u16);

impl PileId {
    /// Create a new pile ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the position in the pile list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pile({})", self.0)
    }
}

/// Role of a pile in the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PileType {
    Stock,
    Waste,
    Foundation,
    Tableau,
    Reserve,
    FreeCell,
}

impl PileType {
    /// Every pile type, in save-document order.
    pub const ALL: [PileType; 6] = [
        PileType::Stock,
        PileType::Waste,
        PileType::Foundation,
        PileType::Tableau,
        PileType::Reserve,
        PileType::FreeCell,
    ];

    /// Order in which a new game deals into pile types.
    pub const DEAL_ORDER: [PileType; 6] = [
        PileType::Tableau,
        PileType::Foundation,
        PileType::Reserve,
        PileType::FreeCell,
        PileType::Waste,
        PileType::Stock,
    ];

    /// Section key used in save documents.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PileType::Stock => "Stock",
            PileType::Waste => "Waste",
            PileType::Foundation => "Foundation",
            PileType::Tableau => "Tableau",
            PileType::Reserve => "Reserve",
            PileType::FreeCell => "FreeCell",
        }
    }
}

impl std::fmt::Display for PileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How a pile spreads its cards on screen. Not used by the rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Layout {
    #[default]
    Squared,
    Column,
    Row,
    Fan,
}

/// What a highlight is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HighlightSlot {
    /// The empty-pile marker.
    Marker,
    /// The card at this index.
    Card(usize),
}

/// Highlight colours written by the hint display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Highlight {
    HintSource,
    HintTarget,
}

const RANK_MARKERS: [&str; 13] = [
    "ace", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "jack", "queen",
    "king",
];

/// An ordered stack of cards. The last card is the top.
#[derive(Clone, Debug)]
pub struct Pile {
    id: PileId,
    pile_type: PileType,
    /// Position among piles of the same type.
    index: usize,
    rule: Rule,
    layout: Layout,
    has_marker: bool,
    /// Face-up flag for each card dealt here by a new game.
    initial_deal: Vec<bool>,
    cards: Vector<Card>,
    highlights: FxHashMap<HighlightSlot, Highlight>,
}

impl Pile {
    /// Create an empty pile with a marker and no initial deal.
    #[must_use]
    pub fn new(id: PileId, pile_type: PileType, index: usize, rule: Rule) -> Self {
        Self {
            id,
            pile_type,
            index,
            rule,
            layout: Layout::default(),
            has_marker: true,
            initial_deal: Vec::new(),
            cards: Vector::new(),
            highlights: FxHashMap::default(),
        }
    }

    /// Build a pile from its configuration, resolving an `Auto` limit.
    #[must_use]
    pub fn from_config(id: PileId, index: usize, config: &PileConfig, rank_count: usize) -> Self {
        let mut rule = config.rule.clone();
        rule.limit = rule.limit.resolve(rank_count);
        Self {
            layout: config.layout,
            has_marker: config.has_marker,
            initial_deal: config.initial_deal.clone(),
            ..Self::new(id, config.pile_type, index, rule)
        }
    }

    #[must_use]
    pub fn id(&self) -> PileId {
        self.id
    }

    #[must_use]
    pub fn pile_type(&self) -> PileType {
        self.pile_type
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    #[must_use]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    #[must_use]
    pub fn has_marker(&self) -> bool {
        self.has_marker
    }

    #[must_use]
    pub fn initial_deal(&self) -> &[bool] {
        &self.initial_deal
    }

    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The top card, if any.
    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.back()
    }

    /// Index of the top card, if any.
    #[must_use]
    pub fn top_index(&self) -> Option<usize> {
        self.cards.len().checked_sub(1)
    }

    /// Put a card on top.
    pub fn push(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Remove every card and return them bottom first.
    pub fn take_all(&mut self) -> Vector<Card> {
        std::mem::take(&mut self.cards)
    }

    /// Replace the pile contents.
    pub fn set_cards(&mut self, cards: Vector<Card>) {
        self.cards = cards;
    }

    pub fn clear(&mut self) {
        self.cards.clear();
        self.highlights.clear();
    }

    /// Can the top card be interacted with at all?
    #[must_use]
    pub fn is_playable(&self) -> bool {
        self.pile_type != PileType::Stock
            && !matches!(self.rule.movement, crate::rules::MoveRule::None)
            && self.top().is_some_and(Card::is_face_up)
    }

    /// May `count` cards led by `moving` be dropped here?
    ///
    /// `target` is the index of the card being dropped on; `None` means no
    /// card, which only an empty pile accepts.
    #[must_use]
    pub fn can_build(&self, target: Option<usize>, moving: &Card, count: usize) -> bool {
        if count > 1 && !self.rule.is_sequence {
            return false;
        }
        if !self.rule.limit.allows(self.len(), count) {
            return false;
        }
        if self.is_empty() {
            return self.rule.base(moving, count);
        }
        match target.and_then(|i| self.cards.get(i)) {
            Some(card) if card.face_down => false,
            Some(card) => self.rule.build(card, moving),
            None => false,
        }
    }

    /// May the run starting at `index` be picked up? Uncached.
    #[must_use]
    pub fn can_move_from(&self, index: usize) -> bool {
        self.rule.can_move(self, index)
    }

    /// Move `count` cards starting at `start` onto `dst`.
    ///
    /// With `reverse` the cards go underneath `dst`'s existing cards. Unless
    /// this is a stock, the newly exposed top card is turned face up.
    pub fn move_cards(&mut self, dst: &mut Pile, start: usize, count: usize, reverse: bool) {
        let end = (start + count).min(self.cards.len());
        let moved = self.cards.slice(start..end);

        if reverse {
            let mut combined = moved;
            combined.append(std::mem::take(&mut dst.cards));
            dst.cards = combined;
        } else {
            dst.cards.append(moved);
        }

        if self.pile_type != PileType::Stock {
            self.flip_up_top_card();
        }
        self.highlights.clear();
        dst.highlights.clear();
    }

    pub fn flip_up_top_card(&mut self) {
        if let Some(card) = self.cards.back_mut() {
            card.flip_up();
        }
    }

    pub fn flip_down_top_card(&mut self) {
        if let Some(card) = self.cards.back_mut() {
            card.flip_down();
        }
    }

    /// Turn every card face down.
    pub fn flip_down_cards(&mut self) {
        for card in self.cards.iter_mut() {
            card.flip_down();
        }
    }

    /// Name of the marker texture drawn when the pile is empty.
    #[must_use]
    pub fn marker_name(&self) -> &'static str {
        match self.pile_type {
            PileType::Stock => "stock",
            PileType::Waste => "waste",
            PileType::FreeCell => "freecell",
            _ => match &self.rule.base {
                BaseRule::None => "none",
                BaseRule::Any => "any",
                BaseRule::Custom(_) => "custom",
                _ => self.rule.base_rank().map_or("any", rank_marker),
            },
        }
    }

    pub fn set_highlight(&mut self, slot: HighlightSlot, highlight: Highlight) {
        self.highlights.insert(slot, highlight);
    }

    #[must_use]
    pub fn highlight(&self, slot: HighlightSlot) -> Option<Highlight> {
        self.highlights.get(&slot).copied()
    }

    pub fn clear_highlights(&mut self) {
        self.highlights.clear();
    }
}

fn rank_marker(rank: Rank) -> &'static str {
    RANK_MARKERS[(rank.value() - 1) as usize]
}
