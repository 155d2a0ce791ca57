//! A running deal: legality checks, move execution, undo and redo.
//!
//! `GameSession` owns the arena, the piles, the history and the score of one
//! deal. All mutation goes through `apply_move` and `replay_delta`; the
//! public operations are thin wrappers that validate, record history and
//! latch the last rejection message for the renderer.

use std::time::Instant;

use log::{debug, trace};
use smallvec::SmallVec;

use crate::cards::{CardArena, CardId};
use crate::core::rng::DealRng;
use crate::core::score::{delta, ScoreSink, SessionSummary};
use crate::engine::deal::deal_piles;
use crate::engine::history::{History, MoveDelta, MoveRecord};
use crate::engine::moves::MoveError;
use crate::engine::pile::{Pile, PileId};
use crate::rules::{Game, GameRule, MovePolicy, PileKind, RankRule};

/// One deal of one game, from shuffle to win (or abandonment).
pub struct GameSession {
    game: Game,
    arena: CardArena,
    piles: Vec<Pile>,
    history: History,
    score: i32,
    moves: u32,
    last_error: Option<MoveError>,
    seed: u64,
    started: Instant,
}

impl GameSession {
    /// Deal a new session of `game` from `seed`.
    #[must_use]
    pub fn new(game: Game, seed: u64) -> Self {
        let mut arena = CardArena::new();
        let mut rng = DealRng::new(seed);
        let piles = deal_piles(&game, &mut arena, &mut rng);
        Self {
            game,
            arena,
            piles,
            history: History::new(),
            score: 0,
            moves: 0,
            last_error: None,
            seed,
            started: Instant::now(),
        }
    }

    /// Throw the current deal away and deal again from `seed`.
    pub fn new_deal(&mut self, seed: u64) {
        self.arena = CardArena::new();
        let mut rng = DealRng::new(seed);
        self.piles = deal_piles(&self.game, &mut self.arena, &mut rng);
        self.history.clear();
        self.score = 0;
        self.moves = 0;
        self.last_error = None;
        self.seed = seed;
        self.started = Instant::now();
    }

    /// The game definition this session plays.
    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// The arena holding every card of this deal.
    #[must_use]
    pub fn arena(&self) -> &CardArena {
        &self.arena
    }

    /// A pile by id. Panics on an id from another session.
    #[must_use]
    pub fn pile(&self, id: PileId) -> &Pile {
        &self.piles[id.index()]
    }

    /// All piles with their ids, in definition order.
    pub fn piles(&self) -> impl Iterator<Item = (PileId, &Pile)> {
        self.piles
            .iter()
            .enumerate()
            .map(|(i, p)| (PileId(i as u16), p))
    }

    /// Ids of every pile of the given kind.
    pub fn piles_of_kind(&self, kind: PileKind) -> impl Iterator<Item = PileId> + '_ {
        self.piles
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.rule.kind == kind)
            .map(|(i, _)| PileId(i as u16))
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Moves performed so far (net of undos).
    #[must_use]
    pub fn move_count(&self) -> u32 {
        self.moves
    }

    /// Seed this deal was shuffled from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Is there anything to undo?
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.undo_len() > 0
    }

    /// Is there anything to redo?
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.redo_len() > 0
    }

    /// The pile currently holding `card`, if the card sits in any pile.
    #[must_use]
    pub fn find_pile(&self, card: CardId) -> Option<PileId> {
        let bottom = self.arena.bottom_of(card);
        self.piles
            .iter()
            .position(|p| p.bottom == bottom)
            .map(|i| PileId(i as u16))
    }

    /// Take the message of the most recent rejection, clearing it.
    pub fn take_last_error(&mut self) -> Option<String> {
        self.last_error.take().map(|e| e.to_string())
    }

    fn free_cells(&self) -> usize {
        self.piles
            .iter()
            .filter(|p| p.rule.kind == PileKind::Cell && p.is_empty(&self.arena))
            .count()
    }

    /// The rule governing a move into `dest` from `src`: the destination's
    /// own rule, unless the two piles share a class and the destination
    /// carries a same-class override.
    fn effective_rule(&self, dest: PileId, src: PileId) -> GameRule {
        let d = &self.piles[dest.index()].rule;
        let s = &self.piles[src.index()].rule;
        match &d.same_class {
            Some(over) if d.class == s.class => (**over).clone(),
            _ => d.clone(),
        }
    }

    /// Is the run starting at `card` ordered the way `rule` stacks cards?
    fn run_matches(&self, card: CardId, rule: &GameRule) -> bool {
        let mut below = card;
        while let Some(above) = self.arena.next(below) {
            let upper = self.arena.card(above);
            let lower = self.arena.card(below);
            if !upper.face_up
                || !rule.next_suit.matches_next(upper, lower)
                || !rule.next_rank.matches_next(upper, lower)
            {
                return false;
            }
            below = above;
        }
        true
    }

    /// Validate and execute one relocation of the run starting at `card`
    /// onto `dest`. On success the board, score and move counter are updated
    /// and the reversible delta is returned; on rejection nothing changes.
    fn apply_move(&mut self, dest: PileId, card: CardId) -> Result<MoveDelta, MoveError> {
        if self.arena.card(card).is_bottom() {
            return Err(MoveError::SameStack);
        }
        if !self.arena.card(card).face_up {
            return Err(MoveError::FaceDown);
        }
        let src = self
            .find_pile(card)
            .expect("moved card belongs to no pile of this session");
        if src == dest {
            return Err(MoveError::SameStack);
        }

        let rule = self.effective_rule(dest, src);
        if let Some(from) = rule.from {
            if self.piles[src.index()].rule.kind != from {
                return Err(MoveError::SourceForbidden);
            }
        }

        let run_len = self.arena.run_len(card);
        match rule.move_policy {
            MovePolicy::Any => {}
            MovePolicy::One if run_len > 1 => {
                let free = self.free_cells();
                if free < run_len - 1 {
                    return Err(MoveError::NotEnoughFreeCells {
                        needed: run_len,
                        free,
                    });
                }
                if !self.run_matches(card, &rule) {
                    return Err(MoveError::BrokenRun);
                }
            }
            MovePolicy::One => {}
            MovePolicy::Group if run_len > 1 => {
                if !self.run_matches(card, &rule) {
                    return Err(MoveError::BrokenRun);
                }
            }
            MovePolicy::Group => {}
            MovePolicy::All => {
                if !self.run_matches(card, &rule) {
                    return Err(MoveError::BrokenRun);
                }
                if run_len != 13 {
                    return Err(MoveError::IncompleteRun);
                }
            }
        }

        let top = self.piles[dest.index()].top(&self.arena);
        let moving = self.arena.card(card);
        let target = self.arena.card(top);
        if target.is_bottom() {
            if !rule.first_suit.matches_first(moving) || !rule.first_rank.matches_first(moving) {
                return Err(MoveError::EmptyMismatch);
            }
        } else {
            if !target.face_up {
                return Err(MoveError::FaceDown);
            }
            if !rule.next_suit.matches_next(moving, target)
                || !rule.next_rank.matches_next(moving, target)
            {
                return Err(MoveError::Mismatch);
            }
        }

        let after = self
            .arena
            .prev(card)
            .expect("card in a pile has a predecessor");
        let face_up = self.arena.card(card).face_up;
        let run = self.arena.take_stack(card);
        let dest_bottom = self.piles[dest.index()].bottom;
        self.arena.splice(dest_bottom, run);

        if self.piles[dest.index()].rule.kind == PileKind::Foundation {
            self.score += delta::FOUNDATION_IN;
        }
        if self.piles[src.index()].rule.kind == PileKind::Foundation {
            self.score += delta::FOUNDATION_OUT;
        }
        self.moves += 1;
        trace!("moved {} ({} cards) from {} to {}", card, run_len, src, dest);

        Ok(MoveDelta::Relocate {
            card,
            after,
            face_up,
        })
    }

    /// Move the run starting at `card` onto `dest`, if legal.
    pub fn move_card(&mut self, card: CardId, dest: PileId) -> Result<(), MoveError> {
        match self.apply_move(dest, card) {
            Ok(d) => {
                self.history.record(MoveRecord::single(d));
                Ok(())
            }
            Err(e) => {
                self.last_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Move `card` to the first foundation that accepts it.
    pub fn move_to_foundation(&mut self, card: CardId) -> Result<(), MoveError> {
        self.move_to_kind(card, PileKind::Foundation)
    }

    /// Move `card` to the first empty cell that accepts it.
    pub fn move_to_cell(&mut self, card: CardId) -> Result<(), MoveError> {
        self.move_to_kind(card, PileKind::Cell)
    }

    fn move_to_kind(&mut self, card: CardId, kind: PileKind) -> Result<(), MoveError> {
        let dests: Vec<PileId> = self.piles_of_kind(kind).collect();
        let mut last = MoveError::Mismatch;
        for dest in dests {
            match self.apply_move(dest, card) {
                Ok(d) => {
                    self.history.record(MoveRecord::single(d));
                    return Ok(());
                }
                Err(e) => last = e,
            }
        }
        self.last_error = Some(last.clone());
        Err(last)
    }

    /// Turn cards from `stock` onto its destination piles. Moves the rule's
    /// `turn` count (fewer if the stock runs dry mid-turn, as long as at
    /// least one card moved), flipping each arrival face-up, as one atomic
    /// history record. Rejected wholesale if any required card has nowhere
    /// to go or the stock is already empty.
    pub fn turn_from_stock(&mut self, stock: PileId) -> Result<(), MoveError> {
        let rule = self.piles[stock.index()].rule.clone();
        assert_eq!(rule.kind, PileKind::Stock, "turn_from_stock on a non-stock pile");

        if self.piles[stock.index()].is_empty(&self.arena) {
            self.last_error = Some(MoveError::EmptyStock);
            return Err(MoveError::EmptyStock);
        }
        let dests: Vec<PileId> = self.piles_of_kind(rule.to).collect();
        if dests.is_empty() {
            self.last_error = Some(MoveError::Mismatch);
            return Err(MoveError::Mismatch);
        }

        let score_before = self.score;
        let moves_before = self.moves;
        let mut deltas: SmallVec<[MoveDelta; 4]> = SmallVec::new();
        let mut cursor = 0;

        let turn = rule.turn.max(1) as usize;
        for _ in 0..turn {
            let top = self.piles[stock.index()].top(&self.arena);
            if self.arena.card(top).is_bottom() {
                break;
            }
            // Stock cards sit face-down; flip before validating so the
            // destination predicates see the real card.
            self.arena.card_mut(top).face_up = true;
            let mut placed = false;
            let mut last = MoveError::Mismatch;
            for k in 0..dests.len() {
                let dest = dests[(cursor + k) % dests.len()];
                match self.apply_move(dest, top) {
                    Ok(mut d) => {
                        // The card was face-down in the stock; the recorded
                        // prior state must say so, not reflect the flip above.
                        if let MoveDelta::Relocate { face_up, .. } = &mut d {
                            *face_up = false;
                        }
                        deltas.push(d);
                        cursor = (cursor + k + 1) % dests.len();
                        placed = true;
                        break;
                    }
                    Err(e) => last = e,
                }
            }
            if !placed {
                self.arena.card_mut(top).face_up = false;
                for mut d in deltas.into_iter().rev() {
                    self.replay_delta(&mut d, -1);
                }
                self.score = score_before;
                self.moves = moves_before;
                self.last_error = Some(last.clone());
                return Err(last);
            }
        }

        self.history.record(MoveRecord::combined(deltas));
        self.score += delta::STOCK_TURN;
        Ok(())
    }

    /// Gather the waste back onto `stock`, face-down, spending one redeal.
    pub fn redeal(&mut self, stock: PileId) -> Result<(), MoveError> {
        let rule = self.piles[stock.index()].rule.clone();
        assert_eq!(rule.kind, PileKind::Stock, "redeal on a non-stock pile");

        if rule.redeals >= 0 && self.piles[stock.index()].redeals >= rule.redeals {
            self.last_error = Some(MoveError::RedealLimit);
            return Err(MoveError::RedealLimit);
        }
        let Some(waste) = self.piles_of_kind(rule.to).next() else {
            self.last_error = Some(MoveError::RedealLimit);
            return Err(MoveError::RedealLimit);
        };

        self.piles[stock.index()].redeals += 1;
        let stock_bottom = self.piles[stock.index()].bottom;
        let waste_bottom = self.piles[waste.index()].bottom;
        // Top-first transfer reverses the waste back into stock order.
        let mut src = self.arena.top_of(waste_bottom);
        while !self.arena.card(src).is_bottom() {
            let below = self.arena.prev(src).expect("linked card below top");
            self.arena.take_card(src);
            self.arena.splice(stock_bottom, src);
            self.arena.card_mut(src).face_up = false;
            src = below;
        }
        self.moves += 1;
        self.score += delta::REDEAL;
        self.history
            .record(MoveRecord::single(MoveDelta::Redeal { stock, waste }));
        debug!("redeal {} of stock {}", self.piles[stock.index()].redeals, stock);
        Ok(())
    }

    /// Flip a face-down top card face-up. Returns false (and does nothing)
    /// if `card` is not a face-down top card.
    pub fn turn_card(&mut self, card: CardId) -> bool {
        if self.arena.card(card).is_bottom()
            || self.arena.card(card).face_up
            || self.arena.next(card).is_some()
        {
            return false;
        }
        self.arena.card_mut(card).face_up = true;
        self.score += delta::TURN_CARD;
        self.history.record(MoveRecord::single(MoveDelta::Turn {
            card,
            face_up: false,
        }));
        true
    }

    /// Perform one automatic step toward the foundations: flip the first
    /// eligible face-down top card, or move the first card a foundation
    /// accepts. Returns false when no step exists.
    pub fn auto_move_to_foundation(&mut self) -> bool {
        let foundations: Vec<PileId> = self.piles_of_kind(PileKind::Foundation).collect();
        for i in 0..self.piles.len() {
            let kind = self.piles[i].rule.kind;
            if kind == PileKind::Foundation || kind == PileKind::Stock {
                continue;
            }
            let top = self.piles[i].top(&self.arena);
            if self.arena.card(top).is_bottom() {
                continue;
            }
            if !self.arena.card(top).face_up {
                return self.turn_card(top);
            }
            // Start at the deepest face-up card and shrink the run toward
            // the top, so a foundation that takes whole runs gets the
            // longest legal one.
            let mut candidate = top;
            while let Some(below) = self.arena.prev(candidate) {
                if self.arena.card(below).is_bottom() || !self.arena.card(below).face_up {
                    break;
                }
                candidate = below;
            }
            loop {
                for &dest in &foundations {
                    if self.piles[dest.index()].rule.move_policy == MovePolicy::One
                        && candidate != top
                    {
                        continue;
                    }
                    if let Ok(d) = self.apply_move(dest, candidate) {
                        self.history.record(MoveRecord::single(d));
                        return true;
                    }
                }
                match self.arena.next(candidate) {
                    Some(above) => candidate = above,
                    None => break,
                }
            }
        }
        false
    }

    /// Re-apply one delta, swapping its stored prior state with the current
    /// state. `inc` adjusts the move counter (-1 for undo, +1 for redo).
    fn replay_delta(&mut self, delta: &mut MoveDelta, inc: i32) {
        match delta {
            MoveDelta::Turn { card, face_up } => {
                let cur = self.arena.card(*card).face_up;
                self.arena.card_mut(*card).face_up = *face_up;
                *face_up = cur;
            }
            MoveDelta::Relocate {
                card,
                after,
                face_up,
            } => {
                let cur_after = self
                    .arena
                    .prev(*card)
                    .expect("relocated card has a predecessor");
                let cur_face = self.arena.card(*card).face_up;
                self.arena.card_mut(*card).face_up = *face_up;
                let run = self.arena.take_stack(*card);
                self.arena.splice(*after, run);
                *after = cur_after;
                *face_up = cur_face;
                self.moves = self.moves.saturating_add_signed(inc);
            }
            MoveDelta::Redeal { stock, waste } => {
                // `stock` names whichever pile currently holds the redealt
                // cards; when it is a real stock pile this replay is an undo.
                let undoing = self.piles[stock.index()].rule.kind == PileKind::Stock;
                if undoing {
                    self.piles[stock.index()].redeals -= 1;
                } else {
                    self.piles[waste.index()].redeals += 1;
                }
                let from_bottom = self.piles[stock.index()].bottom;
                let to_bottom = self.piles[waste.index()].bottom;
                let mut src = self.arena.top_of(from_bottom);
                while !self.arena.card(src).is_bottom() {
                    let below = self.arena.prev(src).expect("linked card below top");
                    self.arena.take_card(src);
                    self.arena.splice(to_bottom, src);
                    self.arena.card_mut(src).face_up = undoing;
                    src = below;
                }
                std::mem::swap(stock, waste);
                self.moves = self.moves.saturating_add_signed(inc);
            }
        }
    }

    /// Revert the most recent action. Returns false when there is none.
    pub fn undo(&mut self) -> bool {
        let Some(mut record) = self.history.pop_undo() else {
            return false;
        };
        for d in record.deltas.iter_mut().rev() {
            self.replay_delta(d, -1);
        }
        self.history.push_redo(record);
        self.score += delta::UNDO;
        true
    }

    /// Re-apply the most recently undone action. Returns false when there is
    /// none.
    pub fn redo(&mut self) -> bool {
        let Some(mut record) = self.history.pop_redo() else {
            return false;
        };
        for d in record.deltas.iter_mut() {
            self.replay_delta(d, 1);
        }
        self.history.push_undo(record);
        self.score += delta::REDO;
        true
    }

    /// Has the deal been won? Every pile that declares a win rank must have
    /// that rank face-up on top (or be empty, for an `Empty` win rank); a
    /// game whose rules declare no win rank at all is never won.
    #[must_use]
    pub fn is_won(&self) -> bool {
        let mut any = false;
        for pile in &self.piles {
            let win = pile.rule.win_rank;
            if win == RankRule::None {
                continue;
            }
            any = true;
            let top = self.arena.card(pile.top(&self.arena));
            let ok = match win {
                RankRule::Empty => top.is_bottom(),
                _ => top.face_up && win.matches_first(top),
            };
            if !ok {
                return false;
            }
        }
        any
    }

    /// Close the session: build its summary and report it to `sink`.
    pub fn finish(&self, sink: &mut dyn ScoreSink) -> SessionSummary {
        let summary = SessionSummary {
            game_name: self.game.name.clone(),
            victory: self.is_won(),
            score: self.score,
            moves: self.moves,
            duration: self.started.elapsed(),
        };
        sink.record_session(&summary);
        debug!(
            "session of {} finished: victory={} score={} moves={}",
            summary.game_name, summary.victory, summary.score, summary.moves
        );
        summary
    }
}
