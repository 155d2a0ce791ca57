//! Yukon and its same-suit variant, Russian solitaire.
//!
//! No stock: the whole deck is on the table. Any face-up card moves along
//! with everything stacked on it, regardless of order.

use crate::cards::Rank;
use crate::rules::{Game, GameRule, MovePolicy, PileKind, RankRule, SuitRule};

fn yukon_layout(name: &str, title: &str, next_suit: SuitRule) -> Game {
    let mut game = Game::new(name, title);
    for x in 0..4 {
        game = game.rule(
            GameRule::new(PileKind::Foundation)
                .at(7, x)
                .win_rank(RankRule::Exact(Rank::KING)),
        );
    }
    // First tableau: a single open card. The rest: x face-down, five open.
    game = game.rule(
        GameRule::new(PileKind::Tableau)
            .at(0, 0)
            .deal(1)
            .first(SuitRule::Any, RankRule::Exact(Rank::KING))
            .next(next_suit, RankRule::Down)
            .move_policy(MovePolicy::Any),
    );
    for x in 1..7 {
        game = game.rule(
            GameRule::new(PileKind::Tableau)
                .at(x, 0)
                .deal(x + 5)
                .hide(x)
                .first(SuitRule::Any, RankRule::Exact(Rank::KING))
                .next(next_suit, RankRule::Down)
                .move_policy(MovePolicy::Any),
        );
    }
    game
}

pub fn yukon() -> Game {
    yukon_layout("yukon", "Yukon", SuitRule::DiffColor)
}

pub fn russian() -> Game {
    yukon_layout("russian", "Russian Solitaire", SuitRule::Same)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yukon_accounts_for_every_card() {
        let game = yukon();
        let dealt: i16 = game.rules.iter().map(|r| r.deal).sum();
        assert_eq!(dealt as usize, game.deck_size());
        assert!(game.rules.iter().all(|r| r.kind != PileKind::Stock));
    }

    #[test]
    fn test_russian_differs_only_in_suit_rule() {
        let yukon = yukon();
        let russian = russian();
        let tableau = |g: &Game| {
            g.rules
                .iter()
                .find(|r| r.kind == PileKind::Tableau)
                .unwrap()
                .clone()
        };
        assert_eq!(tableau(&yukon).next_suit, SuitRule::DiffColor);
        assert_eq!(tableau(&russian).next_suit, SuitRule::Same);
        assert_eq!(yukon.rules.len(), russian.rules.len());
    }
}
