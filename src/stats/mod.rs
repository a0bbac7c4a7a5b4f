//! Statistical primitives: distribution summaries, diversity entropy,
//! and the pairwise correlation engine.

pub mod correlation;
pub mod entropy;
pub mod summary;

pub use correlation::{
    correlate, filter_significant, CorrelationMethod, CorrelationRecord, CorrelationSettings,
    NumericColumn,
};
pub use entropy::normalized_entropy;
pub use summary::{summarize, DistributionSummary, STATISTIC_NAMES};
