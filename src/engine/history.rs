//! Move history: reversible deltas on two LIFO stacks.
//!
//! Each accepted user action produces one [`MoveRecord`] holding one or more
//! [`MoveDelta`]s; multi-step actions (a three-card stock turn) chain their
//! deltas into a single record so they undo and redo atomically.
//!
//! Every delta is *self-inverse under replay*: applying it swaps the stored
//! prior state with the current state, so the same record alternates between
//! the undo and redo stacks without transformation. Recording a new move
//! clears the redo stack; there are no branching timelines.

use smallvec::SmallVec;

use crate::cards::CardId;
use crate::engine::pile::PileId;

/// One reversible state change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveDelta {
    /// A card was turned face-up (or, on replay, back face-down) in place.
    Turn {
        card: CardId,
        /// Face state before the replayed step; swapped on each replay.
        face_up: bool,
    },
    /// A run starting at `card` moved; `after` is the card it sat on before
    /// the step. Swapped with the current predecessor on each replay.
    Relocate {
        card: CardId,
        after: CardId,
        /// Face state of `card` before the step; swapped on each replay.
        face_up: bool,
    },
    /// The waste was redealt onto the stock. The two pile ids swap roles on
    /// each replay; which counter to adjust is inferred from the pile kinds.
    Redeal { stock: PileId, waste: PileId },
}

/// All deltas of one logical user action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveRecord {
    pub deltas: SmallVec<[MoveDelta; 4]>,
}

impl MoveRecord {
    /// Record of a single delta.
    #[must_use]
    pub fn single(delta: MoveDelta) -> Self {
        let mut deltas = SmallVec::new();
        deltas.push(delta);
        Self { deltas }
    }

    /// Record of a chained multi-step action.
    #[must_use]
    pub fn combined(deltas: SmallVec<[MoveDelta; 4]>) -> Self {
        Self { deltas }
    }
}

/// Undo and redo stacks.
#[derive(Clone, Debug, Default)]
pub struct History {
    undo: Vec<MoveRecord>,
    redo: Vec<MoveRecord>,
}

impl History {
    /// Create empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly applied action. Invalidates the redo stack.
    pub fn record(&mut self, record: MoveRecord) {
        self.redo.clear();
        self.undo.push(record);
    }

    /// Pop the most recent undoable record.
    pub fn pop_undo(&mut self) -> Option<MoveRecord> {
        self.undo.pop()
    }

    /// Pop the most recent redoable record.
    pub fn pop_redo(&mut self) -> Option<MoveRecord> {
        self.redo.pop()
    }

    /// Park a replayed record on the redo stack.
    pub fn push_redo(&mut self, record: MoveRecord) {
        self.redo.push(record);
    }

    /// Park a replayed record on the undo stack (without clearing redo).
    pub fn push_undo(&mut self, record: MoveRecord) {
        self.undo.push(record);
    }

    /// Drop both stacks (new deal).
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    /// Number of undoable actions.
    #[must_use]
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Number of redoable actions.
    #[must_use]
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
}
