//! Move legality and hint search.
//!
//! Hints are recomputed from scratch after every state change: card
//! movement, deal, redeal, undo, load. They are never patched incrementally.
//!
//! ## Key Types
//!
//! - `Move`: One legal source run and destination
//! - `MovableCache`: Memo of move-rule answers, valid for one refresh
//! - `available_hints`: Full enumeration over a `Table`

mod movable;
mod search;

pub use movable::MovableCache;
pub use search::available_hints;

use crate::piles::PileId;

/// A legal move: the run starting at `src_index` of `src` onto `dst`.
///
/// Transient: recomputed after every state change and never saved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub src: PileId,
    pub src_index: usize,
    pub dst: PileId,
    /// Index of the card dropped onto; `None` for an empty destination.
    pub dst_index: Option<usize>,
    pub reached_foundation: bool,
    pub reached_freecell: bool,
}
