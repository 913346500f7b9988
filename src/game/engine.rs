//! The `Game` state machine.
//!
//! A game goes `Initial -> Running -> Success | Failure`. Every player
//! action that changes the table ends a turn: counters advance, hints and
//! status are recomputed, and the pre-action snapshot is pushed for undo.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::hooks::{GameHooks, HookContext, StandardHooks};
use super::snapshot::Snapshot;
use crate::core::card::Card;
use crate::core::config::GameInfo;
use crate::core::deck::shuffled_deal;
use crate::core::rng::GameRng;
use crate::core::state::{GameState, GameStatus};
use crate::hints::{available_hints, MovableCache, Move};
use crate::piles::{Highlight, HighlightSlot, Pile, PileId, PileType, Table};

/// A solitaire game: configuration, table, counters and undo history.
///
/// ## Example
///
/// ```
/// use solitide_rules::games::klondike;
/// use solitide_rules::{Game, GameStatus, PileType};
///
/// let mut game = Game::standard(klondike(1));
/// game.start(None, Some(42));
///
/// assert_eq!(game.status(), GameStatus::Running);
/// assert_eq!(game.table().cards_in(PileType::Stock), 24);
/// ```
pub struct Game<H: GameHooks = StandardHooks> {
    info: GameInfo,
    hooks: H,
    table: Table,
    state: GameState,
    rng: GameRng,
    status: GameStatus,
    storage: Value,
    hints: Vec<Move>,
    movable: MovableCache,
    /// Snapshots from before each turn, newest last.
    history: Vec<Snapshot>,
    /// Snapshot of the current turn, pushed to `history` when it ends.
    baseline: Option<Snapshot>,
    next_hint: usize,
    /// Sub-millisecond time not yet added to `time_ms`.
    clock_remainder: Duration,
}

impl Game<StandardHooks> {
    /// Create a game with the default hooks.
    #[must_use]
    pub fn standard(info: GameInfo) -> Self {
        Self::new(info, StandardHooks)
    }
}

impl<H: GameHooks> Game<H> {
    /// Create a game in the `Initial` state with empty piles.
    ///
    /// # Panics
    ///
    /// Panics if the configuration has no suits or no ranks.
    #[must_use]
    pub fn new(info: GameInfo, hooks: H) -> Self {
        assert!(!info.suits.is_empty(), "Game {} has no suits", info.name);
        assert!(!info.ranks.is_empty(), "Game {} has no ranks", info.name);

        let rank_count = info.ranks.len();
        let mut seen = [0usize; PileType::ALL.len()];
        let piles = info
            .piles
            .iter()
            .enumerate()
            .map(|(i, config)| {
                let slot = &mut seen[config.pile_type as usize];
                let index = *slot;
                *slot += 1;
                Pile::from_config(PileId::new(i as u16), index, config, rank_count)
            })
            .collect();

        Self {
            state: GameState::new(info.redeals),
            info,
            hooks,
            table: Table::new(piles),
            rng: GameRng::new(0),
            status: GameStatus::Initial,
            storage: Value::Null,
            hints: Vec::new(),
            movable: MovableCache::new(),
            history: Vec::new(),
            baseline: None,
            next_hint: 0,
            clock_remainder: Duration::ZERO,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn info(&self) -> &GameInfo {
        &self.info
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Every pile, indexed by `PileId`.
    #[must_use]
    pub fn piles(&self) -> &[Pile] {
        self.table.piles()
    }

    /// Shorthand for `table().pile(id)`.
    #[must_use]
    pub fn pile(&self, id: PileId) -> &Pile {
        self.table.pile(id)
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    #[must_use]
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Host data saved alongside the game.
    #[must_use]
    pub fn storage(&self) -> &Value {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut Value {
        &mut self.storage
    }

    /// Legal moves for the current position.
    #[must_use]
    pub fn available_hints(&self) -> &[Move] {
        &self.hints
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.status == GameStatus::Running && !self.history.is_empty()
    }

    /// Number of turns that can be undone.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    // === Lifecycle ===

    /// Start from a saved document, or deal a new game if there is none or
    /// it is rejected.
    ///
    /// `seed` selects the deal of a new game; without it the deal is seeded
    /// from the clock.
    pub fn start(&mut self, saved: Option<&Value>, seed: Option<u64>) {
        self.history.clear();

        if let Some(doc) = saved {
            match self.load(doc) {
                Ok(()) => {
                    info!(game = %self.info.name, turns = self.state.turns, "Resumed saved game");
                    return;
                }
                Err(err) => {
                    warn!(
                        game = %self.info.name,
                        error = %err,
                        "Saved game rejected, dealing new game"
                    );
                }
            }
        }

        self.rng = seed.map_or_else(GameRng::from_time, GameRng::new);
        self.new_game();
        info!(game = %self.info.name, seed = self.rng.seed(), "Dealt new game");
    }

    /// Shuffle and deal a fresh layout using the current RNG.
    ///
    /// Counters and undo history are reset, and the game is left running
    /// with hints and status computed for the new layout.
    ///
    /// # Panics
    ///
    /// Panics if the configured piles do not take exactly the whole supply.
    pub fn new_game(&mut self) {
        self.table.clear();
        self.history.clear();
        self.state = GameState::new(self.info.redeals);
        self.storage = Value::Null;
        self.clock_remainder = Duration::ZERO;

        let info = &self.info;
        let mut cards = shuffled_deal(&mut self.rng, info.deck_count, &info.suits, &info.ranks);
        self.with_hooks(|hooks, ctx| hooks.before_setup(ctx, &mut cards));
        if !self.with_hooks(|hooks, ctx| hooks.on_setup(ctx, &mut cards)) {
            cards = self.deal(cards);
        }
        assert!(
            cards.is_empty(),
            "Game {} left {} cards undealt",
            self.info.name,
            cards.len()
        );

        self.with_hooks(|hooks, ctx| hooks.after_setup(ctx));
        if self.info.initial_waste_deal && self.table.has(PileType::Waste) {
            self.with_hooks(|hooks, ctx| hooks.do_deal(ctx));
        }
        self.init();
    }

    /// Deal `cards` by pile type, then pile order, following each pile's
    /// face-down/face-up pattern. Returns whatever was not dealt.
    fn deal(&mut self, cards: Vec<Card>) -> Vec<Card> {
        let mut supply = cards.into_iter();
        for pile_type in PileType::DEAL_ORDER {
            for id in self.table.ids_of(pile_type) {
                let pile = self.table.pile_mut(id);
                let pattern = pile.initial_deal().to_vec();
                for face_up in pattern {
                    let Some(mut card) = supply.next() else {
                        panic!("Game {} ran out of cards dealing {}", self.info.name, id);
                    };
                    card.face_down = !face_up;
                    pile.push(card);
                }
            }
        }
        supply.collect()
    }

    /// Re-derive everything transient from the table and mark the game
    /// running. Called after a deal, load or undo.
    pub fn init(&mut self) {
        self.status = GameStatus::Running;
        self.with_hooks(|hooks, ctx| hooks.on_init(ctx));
        self.refresh();
        self.baseline = Some(self.snapshot());
    }

    /// Recompute hints and status from the table.
    fn refresh(&mut self) {
        self.movable.clear();
        self.next_hint = 0;
        self.hints = available_hints(&self.table, &self.movable);
        if self.status == GameStatus::Running {
            self.status = self.compute_status();
            if self.status.is_over() {
                info!(
                    game = %self.info.name,
                    status = ?self.status,
                    score = self.state.score,
                    turns = self.state.turns,
                    "Game over"
                );
            }
        }
        debug!(hints = self.hints.len(), status = ?self.status, "Refreshed");
    }

    fn compute_status(&self) -> GameStatus {
        let foundation = self.table.cards_in(PileType::Foundation);
        let tableau = self.table.cards_in(PileType::Tableau);
        if self.info.objective.is_met(self.info.card_count(), foundation, tableau) {
            return GameStatus::Success;
        }

        let stock_exhausted = self.table.all_empty(PileType::Stock)
            && (!self.state.can_redeal() || self.table.all_empty(PileType::Waste));
        if stock_exhausted && self.hints.is_empty() && !self.info.disable_hints {
            return GameStatus::Failure;
        }
        GameStatus::Running
    }

    /// Current status, recomputed from the table.
    ///
    /// Terminal states are sticky: once won or lost this keeps returning
    /// that result.
    #[must_use]
    pub fn get_status(&self) -> GameStatus {
        match self.status {
            GameStatus::Running => self.compute_status(),
            status => status,
        }
    }

    /// Advance the clock. Only a running game accumulates time.
    ///
    /// Fractions of a millisecond carry over to the next call.
    pub fn update(&mut self, delta: Duration) {
        if self.status != GameStatus::Running {
            return;
        }
        let elapsed = self.clock_remainder.saturating_add(delta);
        let millis = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self.state.add_time(millis);
        self.clock_remainder = Duration::from_nanos(u64::from(elapsed.subsec_nanos() % 1_000_000));
    }

    // === Player actions ===

    /// Deal from the stock, redealing first if the stock is spent.
    ///
    /// Returns `false` if nothing could be dealt.
    #[instrument(skip(self), fields(game = %self.info.name))]
    pub fn deal_cards(&mut self) -> bool {
        if self.status != GameStatus::Running {
            return false;
        }

        if self.state.can_redeal() && self.with_hooks(|hooks, ctx| hooks.do_redeal(ctx)) {
            self.state.use_redeal();
            debug!(redeals = self.state.redeals, "Redealt");
            self.end_turn(false);
            return true;
        }

        if self.with_hooks(|hooks, ctx| hooks.do_deal(ctx)) {
            debug!("Dealt");
            self.end_turn(true);
            return true;
        }
        false
    }

    /// May `count` cards led by `card` be dropped on `pile` at `index`?
    #[must_use]
    pub fn can_play(&self, pile: PileId, index: Option<usize>, card: &Card, count: usize) -> bool {
        self.table
            .get(pile)
            .is_some_and(|pile| pile.can_build(index, card, count))
    }

    /// May the run of `pile` starting at `index` be picked up?
    #[must_use]
    pub fn check_movable(&self, pile: PileId, index: usize) -> bool {
        self.table
            .get(pile)
            .is_some_and(|pile| self.movable.check(pile, index))
    }

    /// Move the `count` cards of `from` starting at `start` onto `to`.
    ///
    /// Illegal moves are rejected before anything changes and return
    /// `false`. Only whole top runs can be moved.
    #[instrument(skip(self), fields(game = %self.info.name))]
    pub fn play_cards(&mut self, from: PileId, to: PileId, start: usize, count: usize) -> bool {
        if self.status != GameStatus::Running || from == to || count == 0 {
            return false;
        }
        let (Some(src), Some(dst)) = (self.table.get(from), self.table.get(to)) else {
            return false;
        };
        if start.checked_add(count) != Some(src.len()) || !self.movable.check(src, start) {
            return false;
        }
        let card = src.cards()[start];
        if !dst.can_build(dst.top_index(), &card, count) {
            return false;
        }

        let from_type = src.pile_type();
        let to_type = dst.pile_type();
        let scoring = self.info.scoring;
        let mut delta = 0;
        if to_type == PileType::Foundation && from_type != PileType::Foundation {
            delta += scoring.to_foundation;
        }
        if from_type == PileType::Foundation && to_type != PileType::Foundation {
            delta += scoring.from_foundation;
        }
        if from_type == PileType::Waste && to_type == PileType::Tableau {
            delta += scoring.waste_to_tableau;
        }

        self.table.move_cards(from, to, start, count, false);
        self.state.add_score(delta);
        debug!(%card, count, score = self.state.score, "Played");

        self.with_hooks(|hooks, ctx| hooks.on_drop(ctx, from, to, count));
        self.end_turn(true);
        true
    }

    /// Close the current turn.
    ///
    /// With `deal`, a waste emptied by this turn is refilled from the stock.
    fn end_turn(&mut self, deal: bool) {
        self.state.advance_turn();
        self.with_hooks(|hooks, ctx| hooks.on_end_turn(ctx));
        self.refresh();

        let previous = self.baseline.take();
        let waste_emptied = deal
            && self.table.has(PileType::Waste)
            && self.table.all_empty(PileType::Waste)
            && previous.as_ref().is_some_and(|snapshot| {
                self.table
                    .ids_of(PileType::Waste)
                    .iter()
                    .any(|id| !snapshot.piles[id.index()].is_empty())
            });
        if let Some(previous) = previous {
            self.history.push(previous);
        }
        self.baseline = Some(self.snapshot());

        if waste_emptied {
            self.deal_cards();
        }
    }

    /// Step back one turn.
    ///
    /// Score and redeals return to their earlier values; the turn and undo
    /// counters go forward, and time and hint counts are kept.
    #[instrument(skip(self), fields(game = %self.info.name))]
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        let Some(snapshot) = self.history.pop() else {
            return false;
        };

        let before = self.state.clone();
        self.restore(&snapshot);
        self.init();

        self.state.turns = before.turns + 1;
        self.state.undos = before.undos + 1;
        self.state.time_ms = before.time_ms;
        self.state.hints = before.hints;
        if let Some(baseline) = &mut self.baseline {
            baseline.state = self.state.clone();
        }
        debug!(depth = self.history.len(), "Undone");
        true
    }

    // === Hints and highlights ===

    /// Highlight the next hint in turn and return it.
    ///
    /// Cycles through the hints for the current position. Returns `None` if
    /// hints are disabled, there are none, or the game is over.
    pub fn show_next_hint(&mut self) -> Option<Move> {
        if self.status != GameStatus::Running || self.info.disable_hints || self.hints.is_empty() {
            return None;
        }
        let hint = self.hints[self.next_hint % self.hints.len()];
        self.next_hint += 1;
        self.state.hints += 1;

        self.table.clear_highlights();
        self.table
            .pile_mut(hint.src)
            .set_highlight(HighlightSlot::Card(hint.src_index), Highlight::HintSource);
        let target = hint.dst_index.map_or(HighlightSlot::Marker, HighlightSlot::Card);
        self.table.pile_mut(hint.dst).set_highlight(target, Highlight::HintTarget);
        Some(hint)
    }

    pub fn clear_highlights(&mut self) {
        self.table.clear_highlights();
    }

    // === Snapshots ===

    /// Capture the full restorable state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            piles: self.table.piles().iter().map(|pile| pile.cards().clone()).collect(),
            state: self.state.clone(),
            rng: self.rng.state(),
            storage: self.storage.clone(),
        }
    }

    /// Put the table, counters, RNG and storage back to `snapshot`.
    ///
    /// Does not recompute hints or status; follow with `init`.
    pub(crate) fn restore(&mut self, snapshot: &Snapshot) {
        for (pile, cards) in self.table.piles_mut().zip(&snapshot.piles) {
            pile.set_cards(cards.clone());
            pile.clear_highlights();
        }
        self.state = snapshot.state.clone();
        self.rng = GameRng::from_state(&snapshot.rng);
        self.storage = snapshot.storage.clone();
    }

    /// Clear undo history.
    pub(crate) fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Run `f` with the hooks and a context borrowing the rest of the game.
    fn with_hooks<R>(&mut self, f: impl FnOnce(&mut H, &mut HookContext<'_>) -> R) -> R {
        let mut ctx = HookContext {
            table: &mut self.table,
            info: &self.info,
            state: &mut self.state,
            storage: &mut self.storage,
        };
        f(&mut self.hooks, &mut ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::card::{Rank, Suit};
    use crate::core::config::PileConfig;
    use crate::rules::Rule;

    /// One suit, one foundation, one tableau, stacked King to Ace.
    struct Stacked;

    impl GameHooks for Stacked {
        fn on_setup(&mut self, ctx: &mut HookContext<'_>, cards: &mut Vec<Card>) -> bool {
            cards.sort_by_key(|c| std::cmp::Reverse(c.rank));
            let tableau = ctx.table.first_of(PileType::Tableau).unwrap();
            for mut card in cards.drain(..) {
                card.flip_up();
                ctx.table.pile_mut(tableau).push(card);
            }
            true
        }
    }

    fn stacked_info() -> GameInfo {
        let mut tableau = PileConfig::new(PileType::Tableau, Rule::klondike_tableau());
        tableau.rule.movement = crate::rules::MoveRule::Top;
        GameInfo::new("Stacked")
            .with_suits(&[Suit::Hearts])
            .with_pile(PileConfig::new(PileType::Foundation, Rule::foundation()))
            .with_pile(tableau)
    }

    fn stacked_game() -> Game<Stacked> {
        let mut game = Game::new(stacked_info(), Stacked);
        game.start(None, Some(1));
        game
    }

    #[test]
    fn test_new_game_is_initial() {
        let game = Game::new(stacked_info(), Stacked);
        assert_eq!(game.status(), GameStatus::Initial);
        assert!(game.table().piles().iter().all(Pile::is_empty));
    }

    #[test]
    fn test_play_scores_and_ends_turn() {
        let mut game = stacked_game();
        let tableau = PileId::new(1);
        let foundation = PileId::new(0);

        assert!(game.play_cards(tableau, foundation, 12, 1));
        assert_eq!(game.state().score, 10);
        assert_eq!(game.state().turns, 1);
        assert_eq!(game.pile(foundation).len(), 1);
        assert!(game.can_undo());
    }

    #[test]
    fn test_illegal_play_changes_nothing() {
        let mut game = stacked_game();
        let before = game.snapshot();

        // King is buried
        assert!(!game.play_cards(PileId::new(1), PileId::new(0), 0, 13));
        // Not the whole top run
        assert!(!game.play_cards(PileId::new(1), PileId::new(0), 11, 1));
        // Onto itself
        assert!(!game.play_cards(PileId::new(1), PileId::new(1), 12, 1));

        assert_eq!(game.snapshot(), before);
        assert!(!game.can_undo());
    }

    #[test]
    fn test_out_of_range_run_rejected() {
        let mut game = stacked_game();
        let before = game.snapshot();

        assert!(!game.play_cards(PileId::new(1), PileId::new(0), usize::MAX, 1));
        assert!(!game.play_cards(PileId::new(1), PileId::new(0), 1, usize::MAX));
        assert!(!game.play_cards(PileId::new(1), PileId::new(0), usize::MAX, usize::MAX));

        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_new_game_resets_history_and_hints() {
        let mut game = stacked_game();
        assert!(game.play_cards(PileId::new(1), PileId::new(0), 12, 1));
        assert!(game.can_undo());

        game.new_game();
        assert_eq!(game.status(), GameStatus::Running);
        assert!(!game.can_undo());
        assert!(!game.undo());
        assert_eq!(game.state().turns, 0);
        assert_eq!(game.pile(PileId::new(1)).len(), 13);

        let fresh = available_hints(game.table(), &MovableCache::new());
        assert_eq!(game.available_hints(), fresh.as_slice());
        assert_eq!(game.available_hints()[0].src_index, 12);
        assert!(game.play_cards(PileId::new(1), PileId::new(0), 12, 1));
    }

    #[test]
    fn test_undo_restores_cards_and_bumps_counters() {
        let mut game = stacked_game();
        game.play_cards(PileId::new(1), PileId::new(0), 12, 1);
        game.update(Duration::from_millis(1500));

        assert!(game.undo());
        assert_eq!(game.pile(PileId::new(1)).len(), 13);
        assert_eq!(game.state().score, 0);
        assert_eq!(game.state().turns, 2);
        assert_eq!(game.state().undos, 1);
        assert_eq!(game.state().time_ms, 1500);
        assert!(!game.can_undo());
        assert!(!game.undo());
    }

    #[test]
    fn test_update_carries_fractional_millis() {
        let mut game = stacked_game();
        for _ in 0..60 {
            game.update(Duration::from_micros(16_667));
        }
        for _ in 0..1000 {
            game.update(Duration::from_micros(500));
        }
        assert_eq!(game.state().time_ms, 1500);
    }

    #[test]
    fn test_success_is_terminal() {
        let mut game = stacked_game();
        for start in (0..13).rev() {
            assert!(game.play_cards(PileId::new(1), PileId::new(0), start, 1));
        }
        assert_eq!(game.status(), GameStatus::Success);
        assert_eq!(game.get_status(), GameStatus::Success);

        // Nothing more happens
        assert!(!game.play_cards(PileId::new(0), PileId::new(1), 12, 1));
        assert!(!game.undo());
        game.update(Duration::from_secs(5));
        assert_eq!(game.state().time_ms, 0);
    }

    #[test]
    fn test_hint_cycle_highlights() {
        let mut game = stacked_game();
        let hint = game.show_next_hint().unwrap();

        assert_eq!(hint.src, PileId::new(1));
        assert_eq!(hint.dst, PileId::new(0));
        assert_eq!(
            game.pile(hint.src).highlight(HighlightSlot::Card(12)),
            Some(Highlight::HintSource)
        );
        assert_eq!(
            game.pile(hint.dst).highlight(HighlightSlot::Marker),
            Some(Highlight::HintTarget)
        );
        assert_eq!(game.state().hints, 1);

        game.clear_highlights();
        assert_eq!(game.pile(hint.dst).highlight(HighlightSlot::Marker), None);
    }

    #[test]
    #[should_panic(expected = "undealt")]
    fn test_deal_must_use_every_card() {
        let info = GameInfo::new("Short").with_pile(
            PileConfig::new(PileType::Tableau, Rule::klondike_tableau()).dealt(0, 10),
        );
        Game::standard(info).start(None, Some(3));
    }
}
