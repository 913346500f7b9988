//! Klondike: seven tableau columns, four foundations, stock and waste.

use crate::core::config::{GameInfo, PileConfig};
use crate::piles::{Layout, PileType};
use crate::rules::Rule;

const TABLEAU_COLUMNS: usize = 7;

/// Klondike turning `draw_count` cards per deal, with unlimited redeals.
///
/// # Panics
///
/// Panics if `draw_count` is zero.
#[must_use]
pub fn klondike(draw_count: usize) -> GameInfo {
    assert!(draw_count > 0, "Must draw at least 1 card");

    let mut info = GameInfo::new("Klondike")
        .with_family("klondike")
        .with_redeals(-1)
        .with_draw_count(draw_count)
        .with_pile(PileConfig::new(PileType::Stock, Rule::stock()).dealt(24, 0))
        .with_pile(PileConfig::new(PileType::Waste, Rule::waste()).with_layout(Layout::Row))
        .with_piles(4, PileConfig::new(PileType::Foundation, Rule::foundation()));

    for column in 0..TABLEAU_COLUMNS {
        info = info.with_pile(
            PileConfig::new(PileType::Tableau, Rule::klondike_tableau())
                .dealt(column, 1)
                .with_layout(Layout::Column),
        );
    }
    info
}
