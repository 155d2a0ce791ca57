//! Klondike: the classic seven-pile patience.
//!
//! Seven tableaus of growing depth with only the top card exposed, four
//! foundations built Ace to King in suit, and a one-card stock turn with
//! unlimited redeals.

use crate::cards::Rank;
use crate::rules::{Game, GameRule, MovePolicy, PileKind, RankRule, SuitRule};

pub fn klondike() -> Game {
    let mut game = Game::new("klondike", "Klondike")
        .rule(
            GameRule::new(PileKind::Stock)
                .at(0, 0)
                .deal(24)
                .turn(1)
                .redeals(-1),
        )
        .rule(GameRule::new(PileKind::Waste).at(1, 0));
    for x in 0..4 {
        game = game.rule(
            GameRule::new(PileKind::Foundation)
                .at(3 + x, 0)
                .win_rank(RankRule::Exact(Rank::KING)),
        );
    }
    for x in 0..7 {
        game = game.rule(
            GameRule::new(PileKind::Tableau)
                .at(x, 1)
                .deal(x + 1)
                .hide(x)
                .first(SuitRule::Any, RankRule::Exact(Rank::KING))
                .next(SuitRule::DiffColor, RankRule::Down)
                .move_policy(MovePolicy::Group),
        );
    }
    game
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_klondike_accounts_for_every_card() {
        let game = klondike();
        let dealt: i16 = game.rules.iter().map(|r| r.deal).sum();
        assert_eq!(dealt as usize, game.deck_size());
        assert_eq!(game.rules.len(), 2 + 4 + 7);
    }
}
