//! Core infrastructure: deterministic RNG and score bookkeeping.

pub mod rng;
pub mod score;

pub use rng::DealRng;
pub use score::{NullSink, ScoreSink, SessionSummary};
