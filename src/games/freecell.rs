//! FreeCell and Eight Off: open games built around free cells.
//!
//! Every card is dealt face-up; multi-card moves are really single-card
//! moves relayed through empty cells, which the engine checks for.

use crate::cards::Rank;
use crate::rules::{Game, GameRule, MovePolicy, PileKind, RankRule, SuitRule};

pub fn freecell() -> Game {
    let mut game = Game::new("freecell", "FreeCell");
    for x in 0..4 {
        game = game.rule(GameRule::new(PileKind::Cell).at(x, 0));
        game = game.rule(
            GameRule::new(PileKind::Foundation)
                .at(4 + x, 0)
                .win_rank(RankRule::Exact(Rank::KING)),
        );
    }
    for x in 0..8 {
        let deal = if x < 4 { 7 } else { 6 };
        game = game.rule(
            GameRule::new(PileKind::Tableau)
                .at(x, 1)
                .deal(deal)
                .next(SuitRule::DiffColor, RankRule::Down)
                .move_policy(MovePolicy::One),
        );
    }
    game
}

pub fn eight_off() -> Game {
    let mut game = Game::new("eight_off", "Eight Off");
    // Eight cells, the last four dealt one card each.
    for x in 0..8 {
        let mut cell = GameRule::new(PileKind::Cell).at(x, 0);
        if x >= 4 {
            cell = cell.deal(1);
        }
        game = game.rule(cell);
    }
    for x in 0..4 {
        game = game.rule(
            GameRule::new(PileKind::Foundation)
                .at(8, x)
                .win_rank(RankRule::Exact(Rank::KING)),
        );
    }
    for x in 0..8 {
        game = game.rule(
            GameRule::new(PileKind::Tableau)
                .at(x, 1)
                .deal(6)
                .first(SuitRule::Any, RankRule::Exact(Rank::KING))
                .next(SuitRule::Same, RankRule::Down)
                .move_policy(MovePolicy::One),
        );
    }
    game
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freecell_accounts_for_every_card() {
        let game = freecell();
        let dealt: i16 = game.rules.iter().map(|r| r.deal).sum();
        assert_eq!(dealt as usize, game.deck_size());
        let cells = game.rules.iter().filter(|r| r.kind == PileKind::Cell);
        assert_eq!(cells.count(), 4);
    }

    #[test]
    fn test_eight_off_prefills_four_cells() {
        let game = eight_off();
        let dealt: i16 = game.rules.iter().map(|r| r.deal).sum();
        assert_eq!(dealt as usize, game.deck_size());
        let dealt_cells = game
            .rules
            .iter()
            .filter(|r| r.kind == PileKind::Cell && r.deal > 0)
            .count();
        assert_eq!(dealt_cells, 4);
    }

    #[test]
    fn test_open_games_hide_nothing() {
        for game in [freecell(), eight_off()] {
            assert!(game.rules.iter().all(|r| r.hide == 0), "{}", game.name);
        }
    }
}
