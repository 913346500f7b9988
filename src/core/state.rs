//! Per-play-through counters and game status.
//!
//! ## GameState
//!
//! Everything about a play-through that is not card positions:
//! - Redeals remaining, score
//! - Turn, undo and hint counters
//! - Elapsed play time
//!
//! The whole struct is saved under the `State` key of a save document and
//! captured in every undo snapshot.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Built but not started.
    #[default]
    Initial,
    /// Accepting player actions.
    Running,
    /// Objective met. Terminal until the next `start`.
    Success,
    /// No moves left. Terminal until the next `start`.
    Failure,
}

impl GameStatus {
    /// Is this a terminal status?
    #[must_use]
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Success | GameStatus::Failure)
    }
}

/// Mutable per-play-through counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Redeals left. Negative means unlimited.
    pub redeals: i32,

    pub score: i32,

    /// Turn counter (starts at 0, counts completed actions and undos).
    pub turns: u32,

    /// Elapsed play time in milliseconds.
    pub time_ms: u64,

    pub undos: u32,

    /// How many times a hint was shown.
    pub hints: u32,
}

impl GameState {
    /// Create fresh counters for a game allowing `redeals` redeals.
    #[must_use]
    pub fn new(redeals: i32) -> Self {
        Self {
            redeals,
            ..Self::default()
        }
    }

    /// Are there redeals left?
    #[must_use]
    pub fn can_redeal(&self) -> bool {
        self.redeals != 0
    }

    /// Use up one redeal. Unlimited redeals are never used up.
    pub fn use_redeal(&mut self) {
        if self.redeals > 0 {
            self.redeals -= 1;
        }
    }

    /// Add a score delta.
    pub fn add_score(&mut self, delta: i32) {
        self.score += delta;
    }

    /// Advance the turn counter.
    pub fn advance_turn(&mut self) {
        self.turns += 1;
    }

    /// Accumulate elapsed time.
    pub fn add_time(&mut self, delta_ms: u64) {
        self.time_ms = self.time_ms.saturating_add(delta_ms);
    }
}
