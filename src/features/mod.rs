//! Feature assembly: tagged score values, per-user aggregation, and the
//! per-population feature table.

pub mod aggregate;
pub mod table;
pub mod value;

pub use aggregate::{aggregate_items, aggregate_score_maps, AggregateOptions, UserFeatureRecord};
pub use table::FeatureTable;
pub use value::{flatten, FlatValue, ScoreMap, ScoreValue};
