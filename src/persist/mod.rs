//! Save documents.
//!
//! A save is a JSON object with one section per game, keyed by game name:
//!
//! ```text
//! {
//!   "Klondike": {
//!     "State":      { "redeals": -1, "score": 15, "turns": 4, ... },
//!     "RNG":        { "seed": 42, "word_pos": 208 },
//!     "Stock":      [[13, 45, ...]],
//!     "Tableau":    [[...], [...], ...],
//!     "Foundation": [[], [], [], []],
//!     "Storage":    { ... }
//!   }
//! }
//! ```
//!
//! Each pile type present in the layout is an array with one array of
//! 16-bit card codes per pile, bottom card first. `Storage` is the host's
//! opaque value and is omitted when null.
//!
//! Loading parses and validates the whole section before anything is
//! applied, so a rejected document leaves the game untouched.

use im::Vector;
use serde_json::{Map, Value};
use tracing::debug;

use crate::core::card::Card;
use crate::core::error::{LoadError, SaveError};
use crate::core::rng::GameRngState;
use crate::core::state::GameState;
use crate::game::{Game, GameHooks, Snapshot};
use crate::piles::PileType;

const STATE: &str = "State";
const RNG: &str = "RNG";
const STORAGE: &str = "Storage";

impl<H: GameHooks> Game<H> {
    /// Write this game's section into `doc`.
    ///
    /// Other games' sections are kept. A non-object `doc` is replaced by an
    /// object.
    ///
    /// # Errors
    ///
    /// Returns a `SaveError` if the state or RNG section cannot be
    /// represented as JSON. `doc` is unchanged on error.
    pub fn save(&self, doc: &mut Value) -> Result<(), SaveError> {
        let section = self.section(&self.snapshot())?;
        if !doc.is_object() {
            *doc = Value::Object(Map::new());
        }
        if let Value::Object(map) = doc {
            map.insert(self.info().name.clone(), section);
        }
        debug!(game = %self.info().name, "Saved");
        Ok(())
    }

    /// Replace the game with the one saved in `doc`.
    ///
    /// Clears undo history and re-derives hints and status.
    ///
    /// # Errors
    ///
    /// Returns a `LoadError` if the section is missing, malformed, holds an
    /// invalid card code, or was saved with a different pile layout. The
    /// game is unchanged on error.
    pub fn load(&mut self, doc: &Value) -> Result<(), LoadError> {
        let snapshot = self.parse(doc)?;
        self.restore(&snapshot);
        self.clear_history();
        self.init();
        debug!(game = %self.info().name, cards = snapshot.card_count(), "Loaded");
        Ok(())
    }

    fn section(&self, snapshot: &Snapshot) -> Result<Value, SaveError> {
        let mut section = Map::new();
        section.insert(STATE.into(), to_json(STATE, &snapshot.state)?);
        section.insert(RNG.into(), to_json(RNG, &snapshot.rng)?);

        for pile_type in PileType::ALL {
            let ids = self.table().ids_of(pile_type);
            if ids.is_empty() {
                continue;
            }
            let piles = ids
                .iter()
                .map(|id| {
                    snapshot.piles[id.index()]
                        .iter()
                        .map(|card| Value::from(card.encode()))
                        .collect()
                })
                .collect();
            section.insert(pile_type.name().into(), Value::Array(piles));
        }

        if !snapshot.storage.is_null() {
            section.insert(STORAGE.into(), snapshot.storage.clone());
        }
        Ok(Value::Object(section))
    }

    fn parse(&self, doc: &Value) -> Result<Snapshot, LoadError> {
        let name = &self.info().name;
        let section = doc
            .get(name)
            .filter(|s| s.is_object())
            .ok_or_else(|| LoadError::MissingSection(name.clone()))?;
        let field = |key: &'static str| {
            section.get(key).ok_or_else(|| LoadError::MissingField {
                section: name.clone(),
                field: key,
            })
        };

        let state: GameState = from_json(STATE, field(STATE)?)?;
        let rng: GameRngState = from_json(RNG, field(RNG)?)?;

        let mut piles = vec![Vector::new(); self.table().len()];
        for pile_type in PileType::ALL {
            let ids = self.table().ids_of(pile_type);
            let saved: Vec<Vec<u16>> = match section.get(pile_type.name()) {
                Some(value) => from_json(pile_type.name(), value)?,
                None => Vec::new(),
            };
            if saved.len() != ids.len() {
                return Err(LoadError::TopologyMismatch {
                    pile_type,
                    expected: ids.len(),
                    found: saved.len(),
                });
            }
            for (id, codes) in ids.iter().zip(saved) {
                piles[id.index()] = codes
                    .into_iter()
                    .map(Card::decode)
                    .collect::<Result<Vector<_>, _>>()?;
            }
        }

        Ok(Snapshot {
            piles,
            state,
            rng,
            storage: section.get(STORAGE).cloned().unwrap_or(Value::Null),
        })
    }
}

fn to_json<T: serde::Serialize>(field: &'static str, value: &T) -> Result<Value, SaveError> {
    serde_json::to_value(value).map_err(|err| SaveError {
        field,
        reason: err.to_string(),
    })
}

fn from_json<T: serde::de::DeserializeOwned>(
    field: &'static str,
    value: &Value,
) -> Result<T, LoadError> {
    T::deserialize(value).map_err(|err| LoadError::Malformed {
        field,
        reason: err.to_string(),
    })
}
