//! Music-listening feature extraction: per-track scoring from merged
//! enrichment sources and per-user profile aggregation.

pub mod profile;
pub mod scorer;
pub mod types;

pub use profile::build_profile;
pub use scorer::{TrackScorer, TRACK_PROPERTIES};
pub use types::{AudioFeatureRecord, MusicUser, Playlist, RawTrack, TrackMetadata};
