//! Pile system for card locations.
//!
//! Piles are **game-configured**, not hardcoded. A game lists its piles via
//! `PileConfig` and the engine builds a `Table` of them.
//!
//! ## Key Types
//!
//! - `PileId`: Position of a pile in the table
//! - `PileType`: Stock, Waste, Foundation, Tableau, Reserve, FreeCell
//! - `Pile`: Ordered cards (top = last) plus the pile's `Rule`
//! - `Table`: All piles of a game, with per-type queries and card movement

mod pile;
mod table;

pub use pile::{Highlight, HighlightSlot, Layout, Pile, PileId, PileType};
pub use table::{PileIds, Table};
