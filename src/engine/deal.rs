//! Dealing: deck construction and initial pile distribution.

use log::debug;

use crate::cards::{Card, CardArena, CardId, MarkerKind, Rank};
use crate::core::rng::DealRng;
use crate::engine::pile::Pile;
use crate::rules::{Game, GameRule, PileKind, RankRule};

/// Bottom marker matching a rule: tableau piles get a tableau-tagged marker,
/// every other kind a foundation-style one, tagged with the rule's concrete
/// first rank when it has one (so an empty foundation can advertise "A").
fn marker_for(rule: &GameRule) -> Card {
    let marker = match rule.kind {
        PileKind::Tableau => MarkerKind::Tableau,
        _ => MarkerKind::Foundation,
    };
    let tag: Option<Rank> = match rule.first_rank {
        RankRule::Exact(rank) => Some(rank),
        _ => None,
    };
    Card::bottom(marker, tag)
}

/// Deal one pile's share from the head of the deck, then apply the hide
/// pattern. Positive `hide`: that many dealt cards start face-down, the rest
/// face-up. Negative: that many cards counted from the top start face-up,
/// the rest face-down.
fn deal_pile(arena: &mut CardArena, pile: &Pile, deck: CardId) {
    let rule = &pile.rule;
    if rule.deal <= 0 {
        return;
    }
    for _ in 0..rule.deal {
        let Some(card) = arena.next(deck) else {
            break;
        };
        let card = arena.take_card(card);
        arena.splice(pile.bottom, card);
    }
    if rule.kind == PileKind::Stock {
        // Stock cards always wait face-down, whatever the hide count says.
        let mut cur = arena.next(pile.bottom);
        while let Some(id) = cur {
            arena.card_mut(id).face_up = false;
            cur = arena.next(id);
        }
    } else if rule.hide > 0 {
        let hide = rule.hide as usize;
        let dealt: Vec<_> = match arena.next(pile.bottom) {
            Some(first) => arena.iter_from(first).collect(),
            None => return,
        };
        for (i, id) in dealt.into_iter().enumerate() {
            arena.card_mut(id).face_up = i >= hide;
        }
    } else if rule.hide < 0 {
        let show = (-rule.hide) as usize;
        let mut cur = arena.top_of(pile.bottom);
        let mut i = 0;
        while !arena.card(cur).is_bottom() {
            arena.card_mut(cur).face_up = i < show;
            i += 1;
            cur = arena.prev(cur).expect("linked card below top");
        }
    }
}

/// Build a shuffled deck and distribute it into one pile per rule.
pub fn deal_piles(game: &Game, arena: &mut CardArena, rng: &mut DealRng) -> Vec<Pile> {
    let deck = arena.new_deck(game.decks, &game.suits);
    arena.shuffle(deck, rng);

    let mut piles = Vec::with_capacity(game.rules.len());
    for rule in &game.rules {
        let bottom = arena.alloc(marker_for(rule));
        let pile = Pile::new(rule.clone(), bottom);
        deal_pile(arena, &pile, deck);
        piles.push(pile);
    }
    debug!(
        "dealt {} piles for {} from a {}-card deck (seed {})",
        piles.len(),
        game.name,
        game.deck_size(),
        rng.seed()
    );
    piles
}
