//! Dealing and shuffling integration tests.

use proptest::prelude::*;
use solitaire_engine::{
    builtin_library, CardArena, CardId, DealRng, GameSession, PileId, PileKind, Suit,
};

// =============================================================================
// Klondike deal shape
// =============================================================================

#[test]
fn test_klondike_deal_shape() {
    let game = builtin_library().get("klondike").unwrap().clone();
    let session = GameSession::new(game, 42);
    let arena = session.arena();

    // Stock: 24 cards, all face-down.
    let stock = session.piles_of_kind(PileKind::Stock).next().unwrap();
    assert_eq!(session.pile(stock).len(arena), 24);
    assert!(arena
        .iter_from(session.pile(stock).bottom)
        .skip(1)
        .all(|id| !arena.card(id).face_up));

    // Waste and foundations start empty.
    let waste = session.piles_of_kind(PileKind::Waste).next().unwrap();
    assert!(session.pile(waste).is_empty(arena));
    for id in session.piles_of_kind(PileKind::Foundation) {
        assert!(session.pile(id).is_empty(arena));
    }

    // Tableau i holds i+1 cards with exactly the top one face-up.
    let tableaus: Vec<PileId> = session.piles_of_kind(PileKind::Tableau).collect();
    assert_eq!(tableaus.len(), 7);
    for (i, &id) in tableaus.iter().enumerate() {
        let pile = session.pile(id);
        assert_eq!(pile.len(arena), i + 1);
        let face_up: Vec<bool> = arena
            .iter_from(pile.bottom)
            .skip(1)
            .map(|c| arena.card(c).face_up)
            .collect();
        assert_eq!(face_up.iter().filter(|&&up| up).count(), 1);
        assert_eq!(face_up.last(), Some(&true));
    }
}

#[test]
fn test_deal_is_deterministic_per_seed() {
    let game = builtin_library().get("freecell").unwrap().clone();
    let layout = |seed: u64| {
        let session = GameSession::new(game.clone(), seed);
        session
            .piles()
            .map(|(_, p)| {
                session
                    .arena()
                    .iter_from(p.bottom)
                    .map(|id| *session.arena().card(id))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(layout(7), layout(7));
    assert_ne!(layout(7), layout(8));
}

#[test]
fn test_every_builtin_deals_its_whole_deck() {
    let library = builtin_library();
    for name in library.names() {
        let game = library.get(name).unwrap().clone();
        let deck_size = game.deck_size();
        let session = GameSession::new(game, 1);
        let on_table: usize = session
            .piles()
            .map(|(_, p)| p.len(session.arena()))
            .sum();
        assert_eq!(on_table, deck_size, "{}", name);
    }
}

// =============================================================================
// Shuffle quality
// =============================================================================

#[test]
fn test_shuffle_spreads_first_card() {
    // Over many seeds the card ending up on top of the deck should vary
    // widely; a biased shuffle would keep revisiting the same few cards.
    let mut seen = std::collections::HashSet::new();
    for seed in 0..100u64 {
        let mut arena = CardArena::new();
        let deck = arena.new_deck(1, &Suit::ALL);
        let mut rng = DealRng::new(seed);
        arena.shuffle(deck, &mut rng);
        let first = arena.next(deck).unwrap();
        seen.insert(*arena.card(first));
    }
    assert!(seen.len() > 30, "only {} distinct top cards", seen.len());
}

#[test]
fn test_shuffle_position_occupancy_is_uniform() {
    // Four cards, many seeds: each card should land in each position about
    // a quarter of the time.
    const TRIALS: usize = 2400;
    let mut counts = [[0usize; 4]; 4];
    for seed in 0..TRIALS as u64 {
        let mut arena = CardArena::new();
        let deck = arena.new_deck(1, &[Suit::Hearts]);
        // Keep only four cards so the permutation space is small.
        let fifth = arena.iter_from(deck).nth(5).unwrap();
        arena.take_stack(fifth);

        let mut rng = DealRng::new(seed);
        arena.shuffle(deck, &mut rng);
        for (pos, id) in arena.iter_from(deck).skip(1).enumerate() {
            let rank = arena.card(id).rank().unwrap().value() as usize;
            counts[rank - 1][pos] += 1;
        }
    }
    let expected = TRIALS / 4;
    for (rank, row) in counts.iter().enumerate() {
        for (pos, &count) in row.iter().enumerate() {
            let deviation = count.abs_diff(expected);
            assert!(
                deviation < expected / 6,
                "rank {} landed in position {} {} times (expected ~{})",
                rank + 1,
                pos,
                count,
                expected
            );
        }
    }
}

#[test]
fn test_fresh_deal_is_not_won() {
    let library = builtin_library();
    for name in library.names() {
        let session = GameSession::new(library.get(name).unwrap().clone(), 3);
        assert!(!session.is_won(), "{}", name);
    }
}

proptest! {
    #[test]
    fn test_shuffle_preserves_deck(seed in any::<u64>()) {
        let mut arena = CardArena::new();
        let deck = arena.new_deck(1, &Suit::ALL);
        let mut before: Vec<CardId> = arena.iter_from(deck).skip(1).collect();

        let mut rng = DealRng::new(seed);
        arena.shuffle(deck, &mut rng);

        let mut after: Vec<CardId> = arena.iter_from(deck).skip(1).collect();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn test_two_deck_deal_has_duplicates(seed in any::<u64>()) {
        let mut arena = CardArena::new();
        let deck = arena.new_deck(2, &[Suit::Spades]);
        let mut rng = DealRng::new(seed);
        arena.shuffle(deck, &mut rng);

        let cards: Vec<_> = arena
            .iter_from(deck)
            .skip(1)
            .map(|id| *arena.card(id))
            .collect();
        prop_assert_eq!(cards.len(), 26);
        // Every rank appears exactly twice.
        for rank in 1..=13u8 {
            let count = cards
                .iter()
                .filter(|c| c.rank().map(|r| r.value()) == Some(rank))
                .count();
            prop_assert_eq!(count, 2);
        }
    }
}
