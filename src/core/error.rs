//! Error types.
//!
//! Only recoverable conditions are errors here. Illegal moves are answered
//! with `false` by the legality predicates, and broken host configuration
//! panics during setup.

use derive_more::{Display, Error};

use crate::piles::PileType;

/// A 16-bit card code that does not describe a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("invalid card code {code:#06x}")]
pub struct CardCodeError {
    /// The rejected code.
    pub code: u16,
}

/// Why a save document was rejected by `Game::load`.
///
/// A rejected document never modifies the game.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum LoadError {
    /// The document has no section for this game.
    #[display("no saved section for game {_0:?}")]
    MissingSection(#[error(not(source))] String),

    /// A required field of the game section is absent.
    #[display("section {section:?} is missing field {field:?}")]
    MissingField {
        section: String,
        field: &'static str,
    },

    /// A field is present but has the wrong shape.
    #[display("field {field:?} is malformed: {reason}")]
    Malformed { field: &'static str, reason: String },

    /// The saved pile arrays do not match the configured pile topology.
    #[display("{pile_type} pile count mismatch: expected {expected}, found {found}")]
    TopologyMismatch {
        pile_type: PileType,
        expected: usize,
        found: usize,
    },

    /// A saved card code does not decode.
    #[display("{_0}")]
    BadCard(CardCodeError),
}

/// Why `Game::save` could not write its section.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("cannot serialize {field}: {reason}")]
pub struct SaveError {
    /// The section field that failed.
    pub field: &'static str,
    /// The serializer's message.
    pub reason: String,
}

impl From<CardCodeError> for LoadError {
    fn from(err: CardCodeError) -> Self {
        LoadError::BadCard(err)
    }
}
