//! Live piles: a rule bound to a physical stack.

use serde::{Deserialize, Serialize};

use crate::cards::{CardArena, CardId};
use crate::rules::GameRule;

/// Index of a pile within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PileId(pub u16);

impl PileId {
    /// Create a new pile ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw index value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Index into the session's pile list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pile({})", self.0)
    }
}

/// One pile of a running deal: its rule, the bottom marker of its stack, and
/// how many times it has been redealt.
#[derive(Clone, Debug)]
pub struct Pile {
    /// The rule governing this pile. Cloned from the game definition so a
    /// `Game` can be reused across many deals.
    pub rule: GameRule,
    /// Bottom marker of the pile's stack.
    pub bottom: CardId,
    /// Redeals performed so far (stock piles only).
    pub redeals: i16,
}

impl Pile {
    /// Create a pile over an existing bottom marker.
    #[must_use]
    pub fn new(rule: GameRule, bottom: CardId) -> Self {
        Self {
            rule,
            bottom,
            redeals: 0,
        }
    }

    /// Topmost card of the pile (the bottom marker itself when empty).
    #[must_use]
    pub fn top(&self, arena: &CardArena) -> CardId {
        arena.top_of(self.bottom)
    }

    /// Does the pile hold no playing cards?
    #[must_use]
    pub fn is_empty(&self, arena: &CardArena) -> bool {
        arena.next(self.bottom).is_none()
    }

    /// Number of playing cards in the pile.
    #[must_use]
    pub fn len(&self, arena: &CardArena) -> usize {
        arena.stack_len(self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, MarkerKind, Rank, Suit};
    use crate::rules::PileKind;

    #[test]
    fn test_empty_pile() {
        let mut arena = CardArena::new();
        let bottom = arena.alloc(Card::bottom(MarkerKind::Tableau, None));
        let pile = Pile::new(GameRule::new(PileKind::Tableau), bottom);

        assert!(pile.is_empty(&arena));
        assert_eq!(pile.len(&arena), 0);
        assert_eq!(pile.top(&arena), bottom);
    }

    #[test]
    fn test_top_of_filled_pile() {
        let mut arena = CardArena::new();
        let bottom = arena.alloc(Card::bottom(MarkerKind::Foundation, None));
        let ace = arena.alloc(Card::standard(Suit::Hearts, Rank::ACE));
        arena.splice(bottom, ace);
        let two = arena.alloc(Card::standard(Suit::Hearts, Rank(2)));
        arena.splice(bottom, two);

        let pile = Pile::new(GameRule::new(PileKind::Foundation), bottom);
        assert_eq!(pile.top(&arena), two);
        assert_eq!(pile.len(&arena), 2);
        assert!(!pile.is_empty(&arena));
    }
}
