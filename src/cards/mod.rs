//! # Cards Module
//!
//! Drawable effect cards and the deck lifecycle.
//!
//! Cards are immutable value data: a tagged union over event, item, and
//! zombie variants, resolved exhaustively by the game. The deck owns the
//! draw and discard piles with reshuffle-on-exhaustion semantics.

pub mod card;
pub mod deck;

pub use card::*;
pub use deck::*;
