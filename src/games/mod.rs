//! Built-in game layouts.
//!
//! Each preset is a plain `GameInfo`; play them with `Game::standard`.
//! They double as worked examples of the configuration surface.

mod freecell;
mod klondike;

pub use freecell::freecell;
pub use klondike::klondike;
