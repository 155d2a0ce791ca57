//! # solitaire-engine
//!
//! A data-driven solitaire engine: games are rule tables, not code.
//!
//! ## Design Principles
//!
//! 1. **Configuration Over Convention**: A solitaire variant is a `Game`
//!    value listing one `GameRule` per pile. The engine interprets the
//!    rules; Klondike and FreeCell share every line of engine code.
//!
//! 2. **One Arena Per Deal**: Every card of a deal lives in a `CardArena`
//!    and is addressed by a `CardId`. Piles are intrusive doubly-linked
//!    stacks threaded through the arena, so moving a run splices links
//!    instead of copying cards.
//!
//! 3. **Reversible By Construction**: Each accepted action records
//!    self-inverse deltas, so undo and redo replay the same record in
//!    either direction without snapshots.
//!
//! ## Modules
//!
//! - `core`: deterministic deal RNG, score bookkeeping
//! - `cards`: suits, ranks, markers, and the card arena
//! - `rules`: game definitions and the matching predicates they reference
//! - `engine`: dealing, legality, history, and the session surface
//! - `games`: built-in game definitions (Klondike, Yukon, FreeCell, ...)

pub mod cards;
pub mod core;
pub mod engine;
pub mod games;
pub mod rules;

// Re-export commonly used types
pub use crate::cards::{Card, CardArena, CardId, CardKind, Color, MarkerKind, Rank, Suit};

pub use crate::core::{DealRng, NullSink, ScoreSink, SessionSummary};

pub use crate::rules::{Game, GameLibrary, GameRule, MovePolicy, PileKind, RankRule, SuitRule};

pub use crate::engine::{GameSession, MoveError, Pile, PileId};

pub use crate::games::builtin_library;
