//! # solitide-rules
//!
//! A rules engine for patience (solitaire) card games.
//!
//! ## Design Principles
//!
//! 1. **Game-Agnostic**: No hardcoded layouts. Games list their piles and
//!    each pile's rule in a `GameInfo`; Klondike and FreeCell are just
//!    presets in `games`.
//!
//! 2. **Configuration Over Code**: Build, move and base rules are preset
//!    enums that can be written as JSON. Host closures and `GameHooks` cover
//!    what presets cannot.
//!
//! 3. **Deterministic**: A seed fixes the deal, and the RNG position is
//!    saved, so a game can be replayed or resumed exactly.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Piles are `im::Vector`s, so undo
//!   snapshots share structure with the live table.
//!
//! - **Recompute, Don't Patch**: Hints and status are derived from the
//!   table after every change.
//!
//! ## Modules
//!
//! - `core`: Cards, decks, RNG, configuration, counters, errors
//! - `rules`: Build, move and base predicates plus size limits
//! - `piles`: Piles and the table that holds them
//! - `hints`: Legal move enumeration
//! - `game`: The turn cycle, undo and host hooks
//! - `persist`: JSON save documents
//! - `games`: Built-in layouts

pub mod core;
pub mod game;
pub mod games;
pub mod hints;
pub mod persist;
pub mod piles;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Card, CardCodeError, CardColor, GameInfo, GameRng, GameRngState, GameState, GameStatus,
    LoadError, Objective, PileConfig, Rank, SaveError, Scoring, Suit,
};

pub use crate::game::{Game, GameHooks, HookContext, Snapshot, StandardHooks};

pub use crate::hints::Move;

pub use crate::piles::{Highlight, HighlightSlot, Layout, Pile, PileId, PileType, Table};

pub use crate::rules::{BaseRule, BuildRule, Limit, MoveRule, Rule};
