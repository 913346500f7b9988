//! Host hooks for game-specific behaviour.
//!
//! Games implement `GameHooks` to customize what the declarative
//! configuration cannot express:
//! - Routing cards to fixed slots before the shuffle is dealt
//! - Replacing the default deal entirely
//! - What a deal and a redeal do
//! - Side effects of drops and turn ends
//!
//! Every method has a default, so `StandardHooks` (an empty implementation)
//! plays Klondike-style stock/waste games out of the box.

use serde_json::Value;

use crate::core::card::Card;
use crate::core::config::GameInfo;
use crate::core::state::GameState;
use crate::piles::{PileId, PileType, Table};

/// What a hook may see and change.
pub struct HookContext<'a> {
    pub table: &'a mut Table,
    pub info: &'a GameInfo,
    pub state: &'a mut GameState,
    /// Opaque host data, saved with the game.
    pub storage: &'a mut Value,
}

/// Game-specific behaviour called by the engine.
///
/// ## Implementation Notes
///
/// - `before_setup`: remove cards from `cards` and place them yourself
/// - `on_setup`: return `true` if you dealt `cards` yourself
/// - `do_redeal` / `do_deal`: return `true` only if something moved
/// - Hooks must be deterministic for seeded replay
pub trait GameHooks {
    /// Called with the shuffled supply before the default deal.
    fn before_setup(&mut self, _ctx: &mut HookContext<'_>, _cards: &mut Vec<Card>) {}

    /// Deal the supply. Returning `false` leaves it to the default deal.
    fn on_setup(&mut self, _ctx: &mut HookContext<'_>, _cards: &mut Vec<Card>) -> bool {
        false
    }

    /// Called once every card has been dealt.
    fn after_setup(&mut self, _ctx: &mut HookContext<'_>) {}

    /// Called whenever the game is (re)initialized: start, load, undo.
    fn on_init(&mut self, _ctx: &mut HookContext<'_>) {}

    /// Called after a player move, before the turn ends.
    fn on_drop(&mut self, _ctx: &mut HookContext<'_>, _from: PileId, _to: PileId, _count: usize) {}

    /// Called at the end of every turn.
    fn on_end_turn(&mut self, _ctx: &mut HookContext<'_>) {}

    /// Recycle cards for another pass through the stock.
    fn do_redeal(&mut self, ctx: &mut HookContext<'_>) -> bool {
        standard_redeal(ctx)
    }

    /// Deal from the stock.
    fn do_deal(&mut self, ctx: &mut HookContext<'_>) -> bool {
        standard_deal(ctx)
    }
}

/// Hooks with every default behaviour.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardHooks;

impl GameHooks for StandardHooks {}

/// Turn the waste over onto an empty stock.
///
/// Returns `false` unless there is a stock and a waste, the stock is empty
/// and the waste is not.
pub fn standard_redeal(ctx: &mut HookContext<'_>) -> bool {
    let (Some(stock), Some(waste)) = (
        ctx.table.first_of(PileType::Stock),
        ctx.table.first_of(PileType::Waste),
    ) else {
        return false;
    };
    if !ctx.table.pile(stock).is_empty() || ctx.table.pile(waste).is_empty() {
        return false;
    }

    let mut cards = ctx.table.pile_mut(waste).take_all();
    let stock = ctx.table.pile_mut(stock);
    while let Some(card) = cards.pop_back() {
        stock.push(card);
    }
    stock.flip_down_cards();
    true
}

/// Flip `draw_count` cards from stock to waste, or, without a waste, one
/// card onto each tableau pile.
pub fn standard_deal(ctx: &mut HookContext<'_>) -> bool {
    let Some(stock) = ctx.table.first_of(PileType::Stock) else {
        return false;
    };
    if ctx.table.pile(stock).is_empty() {
        return false;
    }

    let targets: Vec<PileId> = match ctx.table.first_of(PileType::Waste) {
        Some(waste) => vec![waste; ctx.info.draw_count.max(1)],
        None => ctx.table.ids_of(PileType::Tableau).to_vec(),
    };

    let mut dealt = false;
    for target in targets {
        let Some(top) = ctx.table.pile(stock).top_index() else {
            break;
        };
        ctx.table.move_cards(stock, target, top, 1, false);
        ctx.table.pile_mut(target).flip_up_top_card();
        dealt = true;
    }
    dealt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Rank, Suit};
    use crate::piles::Pile;
    use crate::rules::Rule;

    fn stock_waste_table(stock: &[Card], waste: &[Card]) -> Table {
        let mut s = Pile::new(PileId::new(0), PileType::Stock, 0, Rule::stock());
        for &c in stock {
            s.push(c);
        }
        let mut w = Pile::new(PileId::new(1), PileType::Waste, 0, Rule::waste());
        for &c in waste {
            w.push(c);
        }
        Table::new(vec![s, w])
    }

    fn run_hook(
        table: &mut Table,
        info: &GameInfo,
        f: impl FnOnce(&mut HookContext<'_>) -> bool,
    ) -> bool {
        let mut state = GameState::new(0);
        let mut storage = Value::Null;
        let mut ctx = HookContext {
            table,
            info,
            state: &mut state,
            storage: &mut storage,
        };
        f(&mut ctx)
    }

    fn cards(n: u8) -> Vec<Card> {
        (1..=n)
            .map(|v| Card::new(Suit::Clubs, Rank::from_value(v).unwrap()).turned_down())
            .collect()
    }

    #[test]
    fn test_standard_deal_draw_one() {
        let mut table = stock_waste_table(&cards(3), &[]);
        let info = GameInfo::new("T");

        assert!(run_hook(&mut table, &info, standard_deal));
        let waste = table.pile(PileId::new(1));
        assert_eq!(waste.len(), 1);
        assert_eq!(waste.top().unwrap().rank, Rank::Three);
        assert!(waste.top().unwrap().is_face_up());
        assert_eq!(table.pile(PileId::new(0)).len(), 2);
    }

    #[test]
    fn test_standard_deal_draw_three_short_stock() {
        let mut table = stock_waste_table(&cards(2), &[]);
        let info = GameInfo::new("T").with_draw_count(3);

        assert!(run_hook(&mut table, &info, standard_deal));
        assert_eq!(table.pile(PileId::new(1)).len(), 2);
        assert!(table.pile(PileId::new(0)).is_empty());

        // Nothing left to deal
        assert!(!run_hook(&mut table, &info, standard_deal));
    }

    #[test]
    fn test_standard_redeal() {
        let mut waste = cards(3);
        for c in &mut waste {
            c.flip_up();
        }
        let mut table = stock_waste_table(&[], &waste);
        let info = GameInfo::new("T");

        assert!(run_hook(&mut table, &info, standard_redeal));
        let stock = table.pile(PileId::new(0));
        assert_eq!(stock.len(), 3);
        assert!(stock.cards().iter().all(|c| c.face_down));
        // Waste bottom card is dealt first again
        assert_eq!(stock.top().unwrap().rank, Rank::Ace);
        assert!(table.pile(PileId::new(1)).is_empty());

        // Stock not empty: no redeal
        assert!(!run_hook(&mut table, &info, standard_redeal));
    }

    #[test]
    fn test_standard_deal_without_waste() {
        let mut stock = Pile::new(PileId::new(0), PileType::Stock, 0, Rule::stock());
        for c in cards(5) {
            stock.push(c);
        }
        let t1 = Pile::new(PileId::new(1), PileType::Tableau, 0, Rule::klondike_tableau());
        let t2 = Pile::new(PileId::new(2), PileType::Tableau, 1, Rule::klondike_tableau());
        let mut table = Table::new(vec![stock, t1, t2]);
        let info = GameInfo::new("T");

        assert!(run_hook(&mut table, &info, standard_deal));
        assert_eq!(table.pile(PileId::new(0)).len(), 3);
        assert!(table.pile(PileId::new(1)).top().unwrap().is_face_up());
        assert_eq!(table.pile(PileId::new(2)).len(), 1);
    }
}
