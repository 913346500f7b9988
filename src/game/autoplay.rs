//! Automatic moves to the foundations.

use tracing::debug;

use super::engine::Game;
use super::hooks::GameHooks;
use crate::core::state::GameStatus;
use crate::piles::{PileId, PileType};

impl<H: GameHooks> Game<H> {
    /// Send the top card of `pile` to the first foundation that takes it.
    ///
    /// Returns `false` for foundations, when autoplay is disabled, or when no
    /// foundation accepts the card.
    pub fn auto_play_cards(&mut self, pile: PileId) -> bool {
        if self.status() != GameStatus::Running || self.info().disable_autoplay {
            return false;
        }
        let Some(src) = self.table().get(pile) else {
            return false;
        };
        if src.pile_type() == PileType::Foundation {
            return false;
        }
        let Some(top) = src.top_index() else {
            return false;
        };
        if !self.check_movable(pile, top) {
            return false;
        }

        let card = src.cards()[top];
        let target = self
            .table()
            .of_type(PileType::Foundation)
            .find(|f| f.can_build(f.top_index(), &card, 1))
            .map(|f| f.id());

        match target {
            Some(foundation) => self.play_cards(pile, foundation, top, 1),
            None => false,
        }
    }

    /// Auto-play repeatedly until nothing more goes up.
    ///
    /// Returns the number of cards moved.
    pub fn collect_all(&mut self) -> usize {
        let sources: Vec<PileId> = self
            .table()
            .piles()
            .iter()
            .filter(|p| p.pile_type() != PileType::Foundation)
            .map(|p| p.id())
            .collect();

        let mut moved = 0;
        loop {
            let before = moved;
            for &pile in &sources {
                while self.auto_play_cards(pile) {
                    moved += 1;
                }
            }
            if moved == before {
                break;
            }
        }
        debug!(moved, "Collected");
        moved
    }
}
