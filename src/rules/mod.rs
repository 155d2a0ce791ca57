//! Declarative rule system: game definitions and matching predicates.

pub mod predicate;
pub mod rule;

pub use predicate::{RankRule, SuitRule};
pub use rule::{Game, GameLibrary, GameRule, MovePolicy, PileKind};
