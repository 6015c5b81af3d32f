pub mod batch;
pub mod executor;
pub mod fields;
pub mod fuzzy;
pub mod matcher;
pub mod similarity;

pub use batch::{batched_match_orders, merge_batches, BatchScheduler, DEFAULT_BATCH_SIZE};
pub use executor::{BatchExecutor, BatchTask, RayonExecutor, SequentialExecutor};
pub use fields::{FieldWeights, MatchField};
pub use fuzzy::fuzzy_visual_score;
pub use matcher::{match_orders, OrderMatcher};
pub use similarity::char_similarity;
