pub mod config;
pub mod engine;
pub mod error;
pub mod factors;

pub use config::{RankDirection, ScoringConfig};
pub use engine::{incomplete_records, score_dataset, FactorContribution, ScoreBreakdown};
pub use error::ScoreError;
pub use factors::{rank_pct, Factor, FACTORS, WEIGHT_TOTAL_BP};
