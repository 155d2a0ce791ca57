//! Declarative game definitions.
//!
//! A [`Game`] is nothing but data: a deck multiplier and an ordered list of
//! [`GameRule`]s, one per pile. The engine interprets these rules; adding a
//! solitaire variant means writing a new `Game` value, not new code.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{Rank, Suit};
use crate::rules::predicate::{RankRule, SuitRule};

/// The kind of a pile. Defaults for a fresh rule differ by kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PileKind {
    Tableau,
    Stock,
    Foundation,
    Cell,
    Waste,
}

/// Policy for moving more than one card at once onto a pile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovePolicy {
    /// Single cards only, unless enough free cells exist to relay the extra
    /// cards one at a time (and the run is validly ordered for this pile).
    One,
    /// The moved run must already satisfy this pile's next-card predicate.
    Group,
    /// Any run may move regardless of its internal order.
    Any,
    /// Like `Group`, but only a complete 13-card run may arrive.
    All,
}

/// Rule for one pile: placement, dealing, matching, and win condition.
///
/// Construct with [`GameRule::new`], which applies per-kind defaults, then
/// refine with the builder methods.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRule {
    /// Pile kind.
    pub kind: PileKind,
    /// Grid column for the renderer.
    pub x: i16,
    /// Grid row for the renderer.
    pub y: i16,
    /// Cards dealt into this pile at the start of a deal.
    pub deal: i16,
    /// Positive: that many dealt cards start face-down, rest face-up.
    /// Negative: that many cards counted from the top start face-up, rest
    /// face-down.
    pub hide: i16,
    /// Redeals permitted for a stock (-1 = unlimited).
    pub redeals: i16,
    /// Cards moved per stock turn.
    pub turn: i16,
    /// Pile kind that receives stock turns.
    pub to: PileKind,
    /// Suit constraint for a card landing on this pile while empty.
    pub first_suit: SuitRule,
    /// Rank constraint for a card landing on this pile while empty.
    pub first_rank: RankRule,
    /// Suit constraint relative to the current top card.
    pub next_suit: SuitRule,
    /// Rank constraint relative to the current top card.
    pub next_rank: RankRule,
    /// Multi-card move policy.
    pub move_policy: MovePolicy,
    /// If set, only piles of this kind may supply cards.
    pub from: Option<PileKind>,
    /// Rank that must top this pile for victory (`RankRule::None` if the
    /// pile takes no part in the win condition; `Empty` = pile must be empty).
    pub win_rank: RankRule,
    /// Equivalence class of this pile, 0 if unclassed.
    pub class: u16,
    /// Replacement rule applied when the source pile belongs to the same
    /// class as this pile.
    pub same_class: Option<Box<GameRule>>,
}

impl GameRule {
    /// Create a rule with the defaults of the given pile kind.
    #[must_use]
    pub fn new(kind: PileKind) -> Self {
        let mut rule = Self {
            kind,
            x: 0,
            y: 0,
            deal: 0,
            hide: 0,
            redeals: -1,
            turn: 1,
            to: PileKind::Waste,
            first_suit: SuitRule::Any,
            first_rank: RankRule::Any,
            next_suit: SuitRule::Any,
            next_rank: RankRule::Any,
            move_policy: MovePolicy::One,
            from: None,
            win_rank: RankRule::None,
            class: 0,
            same_class: None,
        };
        match kind {
            PileKind::Foundation => {
                rule.first_rank = RankRule::Exact(Rank::ACE);
                rule.next_suit = SuitRule::Same;
                rule.next_rank = RankRule::Up;
            }
            PileKind::Tableau => {
                rule.next_rank = RankRule::Down;
            }
            PileKind::Stock => {
                rule.first_suit = SuitRule::None;
                rule.first_rank = RankRule::None;
                rule.next_suit = SuitRule::None;
                rule.next_rank = RankRule::None;
            }
            PileKind::Waste => {
                rule.from = Some(PileKind::Stock);
            }
            PileKind::Cell => {
                rule.next_suit = SuitRule::None;
                rule.next_rank = RankRule::None;
            }
        }
        rule
    }

    /// Set the grid position.
    #[must_use]
    pub fn at(mut self, x: i16, y: i16) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the number of cards dealt into this pile.
    #[must_use]
    pub fn deal(mut self, count: i16) -> Self {
        self.deal = count;
        self
    }

    /// Set the hide count (see the field docs for the sign convention).
    #[must_use]
    pub fn hide(mut self, count: i16) -> Self {
        self.hide = count;
        self
    }

    /// Set the redeal limit (-1 = unlimited).
    #[must_use]
    pub fn redeals(mut self, count: i16) -> Self {
        self.redeals = count;
        self
    }

    /// Set how many cards one stock turn moves.
    #[must_use]
    pub fn turn(mut self, count: i16) -> Self {
        self.turn = count;
        self
    }

    /// Set which pile kind receives stock turns.
    #[must_use]
    pub fn to(mut self, kind: PileKind) -> Self {
        self.to = kind;
        self
    }

    /// Set the empty-pile constraints.
    #[must_use]
    pub fn first(mut self, suit: SuitRule, rank: RankRule) -> Self {
        self.first_suit = suit;
        self.first_rank = rank;
        self
    }

    /// Set the stacking constraints.
    #[must_use]
    pub fn next(mut self, suit: SuitRule, rank: RankRule) -> Self {
        self.next_suit = suit;
        self.next_rank = rank;
        self
    }

    /// Set the multi-card move policy.
    #[must_use]
    pub fn move_policy(mut self, policy: MovePolicy) -> Self {
        self.move_policy = policy;
        self
    }

    /// Restrict which pile kind may supply cards.
    #[must_use]
    pub fn from(mut self, kind: PileKind) -> Self {
        self.from = Some(kind);
        self
    }

    /// Declare the rank that must top this pile for victory.
    #[must_use]
    pub fn win_rank(mut self, rank: RankRule) -> Self {
        self.win_rank = rank;
        self
    }

    /// Assign an equivalence class.
    #[must_use]
    pub fn class(mut self, class: u16) -> Self {
        self.class = class;
        self
    }

    /// Install the rule used instead when the source pile shares this pile's
    /// class.
    #[must_use]
    pub fn same_class(mut self, rule: GameRule) -> Self {
        self.same_class = Some(Box::new(rule));
        self
    }
}

/// A complete game definition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    /// Registry key.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Number of decks shuffled together.
    pub decks: u8,
    /// Suits present in each deck.
    pub suits: Vec<Suit>,
    /// One rule per pile, in deal order.
    pub rules: Vec<GameRule>,
}

impl Game {
    /// Create an empty definition over one standard 52-card deck.
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            decks: 1,
            suits: Suit::ALL.to_vec(),
            rules: Vec::new(),
        }
    }

    /// Set the deck multiplier.
    #[must_use]
    pub fn decks(mut self, decks: u8) -> Self {
        assert!(decks > 0, "Must have at least 1 deck");
        self.decks = decks;
        self
    }

    /// Set the suit composition of each deck.
    #[must_use]
    pub fn suits(mut self, suits: &[Suit]) -> Self {
        assert!(!suits.is_empty(), "Must have at least 1 suit");
        self.suits = suits.to_vec();
        self
    }

    /// Append a pile rule.
    #[must_use]
    pub fn rule(mut self, rule: GameRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Number of playing cards this game is dealt from.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.decks as usize * self.suits.len() * 13
    }
}

/// Named game definitions, discoverable by string key.
#[derive(Clone, Debug, Default)]
pub struct GameLibrary {
    games: FxHashMap<String, Game>,
}

impl GameLibrary {
    /// Create an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a game under its name, replacing any previous entry.
    pub fn register(&mut self, game: Game) {
        self.games.insert(game.name.clone(), game);
    }

    /// Look up a game by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Game> {
        self.games.get(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.games.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered games.
    #[must_use]
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// Is the library empty?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_defaults() {
        let foundation = GameRule::new(PileKind::Foundation);
        assert_eq!(foundation.first_rank, RankRule::Exact(Rank::ACE));
        assert_eq!(foundation.next_suit, SuitRule::Same);
        assert_eq!(foundation.next_rank, RankRule::Up);

        let tableau = GameRule::new(PileKind::Tableau);
        assert_eq!(tableau.next_suit, SuitRule::Any);
        assert_eq!(tableau.next_rank, RankRule::Down);

        let stock = GameRule::new(PileKind::Stock);
        assert_eq!(stock.first_rank, RankRule::None);
        assert_eq!(stock.next_rank, RankRule::None);
        assert_eq!(stock.to, PileKind::Waste);
        assert_eq!(stock.redeals, -1);

        let waste = GameRule::new(PileKind::Waste);
        assert_eq!(waste.from, Some(PileKind::Stock));

        let cell = GameRule::new(PileKind::Cell);
        assert_eq!(cell.next_rank, RankRule::None);
        assert_eq!(cell.first_rank, RankRule::Any);
    }

    #[test]
    fn test_builder() {
        let rule = GameRule::new(PileKind::Tableau)
            .at(3, 1)
            .deal(7)
            .hide(6)
            .next(SuitRule::DiffColor, RankRule::Down)
            .first(SuitRule::Any, RankRule::Exact(Rank::KING))
            .move_policy(MovePolicy::Group)
            .class(2);
        assert_eq!((rule.x, rule.y), (3, 1));
        assert_eq!(rule.deal, 7);
        assert_eq!(rule.hide, 6);
        assert_eq!(rule.first_rank, RankRule::Exact(Rank::KING));
        assert_eq!(rule.move_policy, MovePolicy::Group);
        assert_eq!(rule.class, 2);
        assert!(rule.same_class.is_none());
    }

    #[test]
    fn test_game_deck_size() {
        let game = Game::new("test", "Test");
        assert_eq!(game.deck_size(), 52);

        let spider_like = Game::new("s", "S").decks(8).suits(&[Suit::Spades]);
        assert_eq!(spider_like.deck_size(), 104);
    }

    #[test]
    #[should_panic(expected = "at least 1 deck")]
    fn test_zero_decks_panics() {
        let _ = Game::new("bad", "Bad").decks(0);
    }

    #[test]
    fn test_library() {
        let mut library = GameLibrary::new();
        assert!(library.is_empty());

        library.register(Game::new("klondike", "Klondike"));
        library.register(Game::new("freecell", "FreeCell"));

        assert_eq!(library.len(), 2);
        assert!(library.get("klondike").is_some());
        assert!(library.get("golf").is_none());
        assert_eq!(library.names(), vec!["freecell", "klondike"]);
    }

    #[test]
    fn test_rule_serde_round_trip() {
        let rule = GameRule::new(PileKind::Foundation)
            .win_rank(RankRule::Exact(Rank::KING))
            .same_class(GameRule::new(PileKind::Foundation));
        let json = serde_json::to_string(&rule).unwrap();
        let back: GameRule = serde_json::from_str(&json).unwrap();
        assert_eq!(rule, back);
    }
}
