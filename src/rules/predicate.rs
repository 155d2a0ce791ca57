//! Suit and rank matching predicates.
//!
//! A rule names two predicates per constraint axis: the *first-card* form
//! (what may land on an empty pile) and the *next-card* form (how a card must
//! relate to the face-up card beneath it). The relative variants (`Same`,
//! `Down`, `DiffColor`, ...) are only meaningful as next-card checks and are
//! always false as first-card checks.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, Suit};

/// Suit constraint of a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuitRule {
    /// Never matches.
    None,
    /// Matches any playing card.
    Any,
    /// Exactly this suit.
    Exact(Suit),
    /// Any red suit.
    Red,
    /// Any black suit.
    Black,
    /// Same suit as the card below.
    Same,
    /// Same color as the card below.
    SameColor,
    /// Different suit than the card below.
    Diff,
    /// Different color than the card below.
    DiffColor,
}

impl SuitRule {
    /// First-card check: does `card` satisfy this constraint on its own?
    #[must_use]
    pub fn matches_first(self, card: &Card) -> bool {
        let Some(suit) = card.suit() else {
            return false;
        };
        match self {
            SuitRule::None => false,
            SuitRule::Any => true,
            SuitRule::Exact(s) => suit == s,
            SuitRule::Red => suit.color() == crate::cards::Color::Red,
            SuitRule::Black => suit.color() == crate::cards::Color::Black,
            // Relative forms need a card below.
            SuitRule::Same | SuitRule::SameColor | SuitRule::Diff | SuitRule::DiffColor => false,
        }
    }

    /// Next-card check: does `card` satisfy this constraint relative to
    /// `below`? Absolute forms match exactly as in the first-card check.
    #[must_use]
    pub fn matches_next(self, card: &Card, below: &Card) -> bool {
        if self.matches_first(card) {
            return true;
        }
        let (Some(suit), Some(below_suit)) = (card.suit(), below.suit()) else {
            return false;
        };
        match self {
            SuitRule::Same => suit == below_suit,
            SuitRule::SameColor => suit.color() == below_suit.color(),
            SuitRule::Diff => suit != below_suit,
            SuitRule::DiffColor => suit.color() != below_suit.color(),
            _ => false,
        }
    }
}

/// Rank constraint of a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RankRule {
    /// Never matches.
    None,
    /// Matches any playing card.
    Any,
    /// Exactly this rank.
    Exact(Rank),
    /// Matches only the bottom marker; as a win rank it means "pile empty".
    Empty,
    /// Same rank as the card below.
    Same,
    /// One lower than the card below.
    Down,
    /// One higher than the card below.
    Up,
    /// One lower or one higher than the card below.
    UpDown,
    /// Strictly lower than the card below.
    Lower,
    /// Strictly higher than the card below.
    Higher,
}

impl RankRule {
    /// First-card check: does `card` satisfy this constraint on its own?
    #[must_use]
    pub fn matches_first(self, card: &Card) -> bool {
        match self {
            RankRule::Any => card.rank().is_some(),
            RankRule::Exact(r) => card.rank() == Some(r),
            RankRule::Empty => card.is_bottom(),
            _ => false,
        }
    }

    /// Next-card check: does `card` satisfy this constraint relative to
    /// `below`? Absolute forms match exactly as in the first-card check.
    #[must_use]
    pub fn matches_next(self, card: &Card, below: &Card) -> bool {
        if self.matches_first(card) {
            return true;
        }
        let (Some(rank), Some(below_rank)) = (card.rank(), below.rank()) else {
            return false;
        };
        let (r, b) = (rank.value() as i16, below_rank.value() as i16);
        match self {
            RankRule::Same => r == b,
            RankRule::Down => r == b - 1,
            RankRule::Up => r == b + 1,
            RankRule::UpDown => r == b - 1 || r == b + 1,
            RankRule::Lower => r < b,
            RankRule::Higher => r > b,
            _ => false,
        }
    }
}
