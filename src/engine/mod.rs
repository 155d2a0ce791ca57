//! The rule interpreter: dealing, piles, move legality, history, sessions.

pub mod deal;
pub mod history;
pub mod moves;
pub mod pile;
pub mod session;

pub use history::{History, MoveDelta, MoveRecord};
pub use moves::MoveError;
pub use pile::{Pile, PileId};
pub use session::GameSession;
