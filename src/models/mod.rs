pub mod order;
pub mod result;

pub use order::{Order, Transaction};
pub use result::{Match, MatchSummary, ScoredTxn, HIGH_CONFIDENCE, MEDIUM_CONFIDENCE};
