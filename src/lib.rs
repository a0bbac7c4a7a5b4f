//! # Psymuse - Message/Music Feature Correlation Pipeline
//!
//! Research data pipeline that derives numeric feature vectors from a
//! population's text messages and music-listening histories, joins the two
//! per-user feature tables, and computes correlation tables between them.
//!
//! ## Pipeline
//!
//! ```text
//! raw items -> per-item scorer -> distributional summarizer
//!           -> per-user feature record -> feature table
//!           -> inner join on user id -> correlation engine
//! ```
//!
//! - **Text scoring** ([`text`]): lexicon/rule sentiment, readability
//!   indices, a second polarity/subjectivity model with per-POS-tag
//!   ratios, profanity probability, and character-surface ratios.
//! - **Music scoring** ([`music`]): per-track audio/metadata properties
//!   merged from two enrichment sources, playlist statistics, and an
//!   artist-diversity entropy score.
//! - **Aggregation** ([`features`]): every numeric per-item field reduces
//!   to q1/median/q3/range/iqr/std_dev/min/max/mean/skewness columns per
//!   user.
//! - **Correlation** ([`stats`]): Pearson, Spearman, Kendall tau-b, and
//!   distance correlation with permutation-test significance.
//!
//! Missing data degrades by omission: unscorable items are skipped,
//! under-sampled statistics are undefined, and degenerate columns are
//! excluded from correlation. Only structurally invalid input (a record
//! with no identifier) is an error.
//!
//! ## Quick Start
//!
//! ```no_run
//! use psymuse::features::AggregateOptions;
//! use psymuse::pipeline::{analyze_message_users, MessageUser};
//!
//! let users = vec![MessageUser {
//!     id: "user-1".into(),
//!     messages: vec!["what a wonderful day!".into()],
//! }];
//! let records = analyze_message_users(&users, &AggregateOptions::default());
//! assert_eq!(records[0].item_count, 1);
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod join;
pub mod music;
pub mod pipeline;
pub mod stats;
pub mod text;

pub use config::Config;
pub use error::PipelineError;
