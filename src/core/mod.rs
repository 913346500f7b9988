//! Core engine types: cards, decks, RNG, configuration, counters, errors.
//!
//! This module contains the fundamental building blocks that are game-agnostic.
//! Games configure these via `GameInfo` rather than modifying the core.

pub mod card;
pub mod config;
pub mod deck;
pub mod error;
pub mod rng;
pub mod state;

pub use card::{suit_color, Card, CardColor, Rank, Suit};
pub use config::{GameInfo, Objective, PileConfig, Scoring};
pub use deck::{make_deck, shuffled_deal};
pub use error::{CardCodeError, LoadError, SaveError};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, GameStatus};
