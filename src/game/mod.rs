//! The game engine: lifecycle, turns, undo and host hooks.
//!
//! ## Key Types
//!
//! - `Game`: Owns the table and runs the turn cycle
//! - `GameHooks`: Game-specific setup and deal behaviour
//! - `HookContext`: The part of a game a hook may touch
//! - `Snapshot`: Restorable state for undo and saves
//!
//! ## Turn Cycle
//!
//! ```text
//! play_cards / deal_cards
//!   -> mutate table
//!   -> on_drop / on_end_turn hooks
//!   -> recompute hints and status
//!   -> push previous snapshot for undo
//! ```

mod autoplay;
mod engine;
mod hooks;
mod snapshot;

pub use engine::Game;
pub use hooks::{standard_deal, standard_redeal, GameHooks, HookContext, StandardHooks};
pub use snapshot::Snapshot;
