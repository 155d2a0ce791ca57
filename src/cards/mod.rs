//! Card and stack model.
//!
//! - `card`: suits, ranks, colors, and the bottom marker sentinel
//! - `arena`: arena-allocated doubly-linked stacks with splice/take/shuffle

pub mod arena;
pub mod card;

pub use arena::{CardArena, CardId};
pub use card::{Card, CardKind, Color, MarkerKind, Rank, Suit};
