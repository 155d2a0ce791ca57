//! Card primitives: suits, ranks, colors, and the bottom marker.
//!
//! Every physical stack is headed by a synthetic *bottom marker* card. The
//! marker is not playable; it carries the pile's presentation tag so an empty
//! pile needs no special-cased branch anywhere in the rule engine.

use serde::{Deserialize, Serialize};

/// The four French suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Hearts,
    Diamonds,
    Spades,
    Clubs,
}

impl Suit {
    /// All suits in canonical deck order.
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Spades, Suit::Clubs];

    /// The color of this suit.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Suit::Hearts | Suit::Diamonds => Color::Red,
            Suit::Spades | Suit::Clubs => Color::Black,
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Spades => "spades",
            Suit::Clubs => "clubs",
        };
        write!(f, "{}", s)
    }
}

/// Card color, derived from the suit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Black,
}

/// Card rank, 1 (Ace) through 13 (King).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rank(pub u8);

impl Rank {
    pub const ACE: Rank = Rank(1);
    pub const JACK: Rank = Rank(11);
    pub const QUEEN: Rank = Rank(12);
    pub const KING: Rank = Rank(13);

    /// Create a rank, panicking outside 1..=13.
    #[must_use]
    pub fn new(value: u8) -> Self {
        assert!((1..=13).contains(&value), "Rank must be 1-13, got {}", value);
        Self(value)
    }

    /// All thirteen ranks, Ace first.
    pub fn all() -> impl Iterator<Item = Rank> {
        (1..=13).map(Rank)
    }

    /// Get the raw rank value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            1 => write!(f, "A"),
            11 => write!(f, "J"),
            12 => write!(f, "Q"),
            13 => write!(f, "K"),
            n => write!(f, "{}", n),
        }
    }
}

/// Presentation tag for a bottom marker.
///
/// Tableau piles and foundation-style piles (foundation, stock, waste, cell)
/// use different conventions for an empty slot, so the marker remembers which
/// family its pile belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerKind {
    Tableau,
    Foundation,
}

/// What a stack node actually is: the synthetic bottom marker or a real card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Sentinel heading every stack. `tag` is the rank an empty pile
    /// advertises (e.g. "A" on an empty foundation), purely presentational.
    Bottom { marker: MarkerKind, tag: Option<Rank> },
    /// A playable card.
    Standard { suit: Suit, rank: Rank },
}

/// One card in a stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub kind: CardKind,
    pub face_up: bool,
}

impl Card {
    /// Create a face-up playing card.
    #[must_use]
    pub const fn standard(suit: Suit, rank: Rank) -> Self {
        Self {
            kind: CardKind::Standard { suit, rank },
            face_up: true,
        }
    }

    /// Create a bottom marker. Markers are always face-up.
    #[must_use]
    pub const fn bottom(marker: MarkerKind, tag: Option<Rank>) -> Self {
        Self {
            kind: CardKind::Bottom { marker, tag },
            face_up: true,
        }
    }

    /// Is this the synthetic bottom marker?
    #[must_use]
    pub const fn is_bottom(&self) -> bool {
        matches!(self.kind, CardKind::Bottom { .. })
    }

    /// Suit, if this is a playing card.
    #[must_use]
    pub const fn suit(&self) -> Option<Suit> {
        match self.kind {
            CardKind::Standard { suit, .. } => Some(suit),
            CardKind::Bottom { .. } => None,
        }
    }

    /// Rank, if this is a playing card.
    #[must_use]
    pub const fn rank(&self) -> Option<Rank> {
        match self.kind {
            CardKind::Standard { rank, .. } => Some(rank),
            CardKind::Bottom { .. } => None,
        }
    }

    /// Color, if this is a playing card.
    #[must_use]
    pub const fn color(&self) -> Option<Color> {
        match self.suit() {
            Some(suit) => Some(suit.color()),
            None => None,
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            CardKind::Bottom { .. } => write!(f, "[bottom]"),
            CardKind::Standard { suit, rank } => write!(f, "{} of {}", rank, suit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suit_colors() {
        assert_eq!(Suit::Hearts.color(), Color::Red);
        assert_eq!(Suit::Diamonds.color(), Color::Red);
        assert_eq!(Suit::Spades.color(), Color::Black);
        assert_eq!(Suit::Clubs.color(), Color::Black);
    }

    #[test]
    fn test_rank_bounds() {
        assert_eq!(Rank::new(1), Rank::ACE);
        assert_eq!(Rank::new(13), Rank::KING);
        assert_eq!(Rank::all().count(), 13);
    }

    #[test]
    #[should_panic(expected = "Rank must be 1-13")]
    fn test_rank_zero_panics() {
        let _ = Rank::new(0);
    }

    #[test]
    fn test_rank_display() {
        assert_eq!(format!("{}", Rank::ACE), "A");
        assert_eq!(format!("{}", Rank(10)), "10");
        assert_eq!(format!("{}", Rank::QUEEN), "Q");
    }

    #[test]
    fn test_bottom_marker() {
        let marker = Card::bottom(MarkerKind::Foundation, Some(Rank::ACE));
        assert!(marker.is_bottom());
        assert!(marker.face_up);
        assert_eq!(marker.suit(), None);
        assert_eq!(marker.rank(), None);

        let card = Card::standard(Suit::Hearts, Rank(7));
        assert!(!card.is_bottom());
        assert_eq!(card.suit(), Some(Suit::Hearts));
        assert_eq!(card.rank(), Some(Rank(7)));
        assert_eq!(card.color(), Some(Color::Red));
    }

    #[test]
    fn test_serde_round_trip() {
        let card = Card::standard(Suit::Clubs, Rank::JACK);
        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
