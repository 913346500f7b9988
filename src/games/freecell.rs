//! FreeCell: every card dealt face up, four cells, no stock.

use crate::core::config::{GameInfo, PileConfig};
use crate::piles::{Layout, PileType};
use crate::rules::{BaseRule, BuildRule, MoveRule, Rule};

/// FreeCell with single-card moves between columns.
#[must_use]
pub fn freecell() -> GameInfo {
    let tableau = Rule::new(BuildRule::DownAlternateColors, MoveRule::Top, BaseRule::Any);

    let mut info = GameInfo::new("FreeCell")
        .with_family("freecell")
        .with_piles(4, PileConfig::new(PileType::FreeCell, Rule::free_cell()))
        .with_piles(4, PileConfig::new(PileType::Foundation, Rule::foundation()));

    for column in 0..8 {
        let depth = if column < 4 { 7 } else { 6 };
        info = info.with_pile(
            PileConfig::new(PileType::Tableau, tableau.clone())
                .dealt(0, depth)
                .with_layout(Layout::Column),
        );
    }
    info
}
