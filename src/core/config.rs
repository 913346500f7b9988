//! Game configuration types.
//!
//! Games configure the engine at startup by providing a `GameInfo`:
//! - `PileConfig`: One entry per pile (type, rule, initial deal)
//! - `Objective`: What counts as a win
//! - `Scoring`: Score deltas for card movement
//!
//! The engine never hardcodes a game. Everything it knows about Klondike or
//! FreeCell comes from a `GameInfo`, which can be built in code or loaded
//! from JSON.

use serde::{Deserialize, Serialize};

use super::card::{Rank, Suit};
use crate::piles::{Layout, PileType};
use crate::rules::Rule;

/// Win condition of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Objective {
    /// Every card ends on a foundation.
    #[default]
    AllCardsToFoundation,
    AllButOneCardToFoundation,
    AllButTwoCardsToFoundation,
    AllButFourCardsToFoundation,
    /// Every card ends on the tableau.
    AllCardsToTableau,
    /// The tableau is emptied.
    ClearTableau,
}

impl Objective {
    /// Is the objective met for a game of `total` cards?
    #[must_use]
    pub fn is_met(self, total: usize, foundation: usize, tableau: usize) -> bool {
        match self {
            Objective::AllCardsToFoundation => foundation == total,
            Objective::AllButOneCardToFoundation => foundation + 1 == total,
            Objective::AllButTwoCardsToFoundation => foundation + 2 == total,
            Objective::AllButFourCardsToFoundation => foundation + 4 == total,
            Objective::AllCardsToTableau => tableau == total,
            Objective::ClearTableau => tableau == 0,
        }
    }
}

/// Score deltas applied by `Game::play_cards`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scoring {
    /// Moving a card onto a foundation from any other pile type.
    pub to_foundation: i32,
    /// Moving a card off a foundation onto any other pile type.
    pub from_foundation: i32,
    pub waste_to_tableau: i32,
}

impl Default for Scoring {
    fn default() -> Self {
        Self {
            to_foundation: 10,
            from_foundation: -10,
            waste_to_tableau: 1,
        }
    }
}

/// Configuration for a single pile.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PileConfig {
    pub pile_type: PileType,

    #[serde(default)]
    pub layout: Layout,

    /// Whether the empty pile shows a clickable marker.
    #[serde(default = "default_true")]
    pub has_marker: bool,

    /// Face-up flag for each card a new game deals here, bottom first.
    #[serde(default)]
    pub initial_deal: Vec<bool>,

    pub rule: Rule,
}

fn default_true() -> bool {
    true
}

impl PileConfig {
    /// Create a pile configuration with no initial deal.
    pub fn new(pile_type: PileType, rule: Rule) -> Self {
        Self {
            pile_type,
            layout: Layout::default(),
            has_marker: true,
            initial_deal: Vec::new(),
            rule,
        }
    }

    /// Deal `face_down` hidden cards followed by `face_up` visible ones.
    #[must_use]
    pub fn dealt(mut self, face_down: usize, face_up: usize) -> Self {
        self.initial_deal = std::iter::repeat(false)
            .take(face_down)
            .chain(std::iter::repeat(true).take(face_up))
            .collect();
        self
    }

    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Hide the empty-pile marker.
    #[must_use]
    pub fn without_marker(mut self) -> Self {
        self.has_marker = false;
        self
    }

    /// Number of cards dealt here by a new game.
    #[must_use]
    pub fn deal_count(&self) -> usize {
        self.initial_deal.len()
    }
}

/// Complete game configuration.
///
/// ## Example
///
/// ```
/// use solitide_rules::core::{GameInfo, PileConfig};
/// use solitide_rules::piles::PileType;
/// use solitide_rules::rules::Rule;
///
/// let info = GameInfo::new("Tiny")
///     .with_pile(PileConfig::new(PileType::Stock, Rule::stock()).dealt(48, 0))
///     .with_pile(PileConfig::new(PileType::Tableau, Rule::klondike_tableau()).dealt(3, 1));
///
/// assert_eq!(info.card_count(), 52);
/// assert_eq!(info.deal_count(), 52);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameInfo {
    /// Game name; also the save-document section key.
    pub name: String,

    /// Free-form family tags ("Klondike", "FreeCell", ...).
    #[serde(default)]
    pub family: Vec<String>,

    #[serde(default)]
    pub objective: Objective,

    #[serde(default = "default_deck_count")]
    pub deck_count: u8,

    /// Redeals allowed. Negative means unlimited.
    #[serde(default)]
    pub redeals: i32,

    #[serde(default = "all_suits")]
    pub suits: Vec<Suit>,

    #[serde(default = "all_ranks")]
    pub ranks: Vec<Rank>,

    /// Cards moved from stock to waste per deal by the standard hooks.
    #[serde(default = "default_draw_count")]
    pub draw_count: usize,

    #[serde(default)]
    pub disable_hints: bool,

    #[serde(default)]
    pub disable_autoplay: bool,

    /// Deal once to the waste at the end of a new game.
    #[serde(default)]
    pub initial_waste_deal: bool,

    #[serde(default)]
    pub scoring: Scoring,

    pub piles: Vec<PileConfig>,
}

fn default_deck_count() -> u8 {
    1
}

fn default_draw_count() -> usize {
    1
}

fn all_suits() -> Vec<Suit> {
    Suit::ALL.to_vec()
}

fn all_ranks() -> Vec<Rank> {
    Rank::ALL.to_vec()
}

impl GameInfo {
    /// Create a one-deck, no-redeal game with no piles.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            family: Vec::new(),
            objective: Objective::default(),
            deck_count: 1,
            redeals: 0,
            suits: all_suits(),
            ranks: all_ranks(),
            draw_count: 1,
            disable_hints: false,
            disable_autoplay: false,
            initial_waste_deal: false,
            scoring: Scoring::default(),
            piles: Vec::new(),
        }
    }

    /// Add a pile configuration.
    #[must_use]
    pub fn with_pile(mut self, pile: PileConfig) -> Self {
        self.piles.push(pile);
        self
    }

    /// Add `count` copies of a pile configuration.
    #[must_use]
    pub fn with_piles(mut self, count: usize, pile: PileConfig) -> Self {
        self.piles.extend(std::iter::repeat(pile).take(count));
        self
    }

    #[must_use]
    pub fn with_family(mut self, tag: impl Into<String>) -> Self {
        self.family.push(tag.into());
        self
    }

    #[must_use]
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    #[must_use]
    pub fn with_deck_count(mut self, decks: u8) -> Self {
        assert!(decks > 0, "Must have at least 1 deck");
        self.deck_count = decks;
        self
    }

    /// Set the redeal count; negative means unlimited.
    #[must_use]
    pub fn with_redeals(mut self, redeals: i32) -> Self {
        self.redeals = redeals;
        self
    }

    #[must_use]
    pub fn with_suits(mut self, suits: &[Suit]) -> Self {
        self.suits = suits.to_vec();
        self
    }

    #[must_use]
    pub fn with_ranks(mut self, ranks: &[Rank]) -> Self {
        self.ranks = ranks.to_vec();
        self
    }

    #[must_use]
    pub fn with_draw_count(mut self, count: usize) -> Self {
        self.draw_count = count;
        self
    }

    #[must_use]
    pub fn with_scoring(mut self, scoring: Scoring) -> Self {
        self.scoring = scoring;
        self
    }

    #[must_use]
    pub fn without_hints(mut self) -> Self {
        self.disable_hints = true;
        self
    }

    #[must_use]
    pub fn without_autoplay(mut self) -> Self {
        self.disable_autoplay = true;
        self
    }

    #[must_use]
    pub fn with_initial_waste_deal(mut self) -> Self {
        self.initial_waste_deal = true;
        self
    }

    /// Number of cards in play: decks times accepted suits times accepted ranks.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.deck_count as usize * self.suits.len() * self.ranks.len()
    }

    /// Number of cards the pile configurations deal.
    #[must_use]
    pub fn deal_count(&self) -> usize {
        self.piles.iter().map(PileConfig::deal_count).sum()
    }

    /// Piles of one type.
    pub fn piles_of(&self, pile_type: PileType) -> impl Iterator<Item = &PileConfig> + '_ {
        self.piles.iter().filter(move |p| p.pile_type == pile_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_objective() {
        assert!(Objective::AllCardsToFoundation.is_met(52, 52, 0));
        assert!(!Objective::AllCardsToFoundation.is_met(52, 51, 1));
        assert!(Objective::AllButOneCardToFoundation.is_met(52, 51, 1));
        assert!(Objective::AllButTwoCardsToFoundation.is_met(52, 50, 2));
        assert!(Objective::AllButFourCardsToFoundation.is_met(52, 48, 0));
        assert!(Objective::AllCardsToTableau.is_met(52, 0, 52));
        assert!(Objective::ClearTableau.is_met(52, 10, 0));
        assert!(!Objective::ClearTableau.is_met(52, 10, 1));
    }

    #[test]
    fn test_pile_config_dealt() {
        let pile = PileConfig::new(PileType::Tableau, Rule::klondike_tableau()).dealt(3, 1);
        assert_eq!(pile.initial_deal, vec![false, false, false, true]);
        assert_eq!(pile.deal_count(), 4);
        assert!(pile.has_marker);
        assert!(!pile.clone().without_marker().has_marker);
    }

    #[test]
    fn test_game_info_builder() {
        let info = GameInfo::new("Test")
            .with_family("Klondike")
            .with_deck_count(2)
            .with_redeals(-1)
            .with_suits(&[Suit::Spades])
            .with_piles(4, PileConfig::new(PileType::Foundation, Rule::foundation()));

        assert_eq!(info.card_count(), 26);
        assert_eq!(info.piles_of(PileType::Foundation).count(), 4);
        assert_eq!(info.redeals, -1);
        assert_eq!(info.family, vec!["Klondike".to_string()]);
    }

    #[test]
    #[should_panic(expected = "at least 1 deck")]
    fn test_zero_decks() {
        let _ = GameInfo::new("Bad").with_deck_count(0);
    }

    #[test]
    fn test_game_info_json_defaults() {
        let json = r#"{
            "name": "Json",
            "piles": [
                { "pile_type": "Stock", "initial_deal": [false, false], "rule":
                  { "build": "NoBuilding", "move": "None", "base": "None" } }
            ]
        }"#;
        let info: GameInfo = serde_json::from_str(json).unwrap();

        assert_eq!(info.deck_count, 1);
        assert_eq!(info.suits.len(), 4);
        assert_eq!(info.ranks.len(), 13);
        assert_eq!(info.draw_count, 1);
        assert_eq!(info.scoring, Scoring::default());
        assert!(info.piles[0].has_marker);
        assert_eq!(info.deal_count(), 2);
    }
}
