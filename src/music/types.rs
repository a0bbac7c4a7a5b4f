//! Boundary data shapes for the music side of the pipeline.
//!
//! These mirror what the external harvesting collaborators produce: raw
//! playlist tracks plus two per-track enrichment sources (audio features
//! and catalog metadata), each keyed by track id. Enrichment may be
//! partial for any given id; the pipeline tolerates holes.

use serde::Deserialize;

/// A raw track as collected from a user's playlists.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrack {
    /// Track id; local files may have none, in which case the track is
    /// skipped from feature aggregation.
    pub id: Option<String>,
    /// Artist names; only the first artist feeds the diversity score.
    #[serde(default)]
    pub artists: Vec<String>,
}

/// Per-track audio properties from the first enrichment source.
#[derive(Debug, Clone, Deserialize)]
pub struct AudioFeatureRecord {
    pub id: Option<String>,
    pub acousticness: Option<f64>,
    pub danceability: Option<f64>,
    pub energy: Option<f64>,
    pub liveness: Option<f64>,
    pub loudness: Option<f64>,
    pub mode: Option<f64>,
    pub speechiness: Option<f64>,
    pub tempo: Option<f64>,
    pub valence: Option<f64>,
}

/// Per-track catalog metadata from the second enrichment source.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackMetadata {
    pub id: Option<String>,
    pub popularity: Option<f64>,
    pub explicit: Option<bool>,
    pub duration_ms: Option<f64>,
    /// Release date string; the year is its first four characters.
    pub release_date: Option<String>,
}

impl TrackMetadata {
    /// Release year parsed from the date-string prefix.
    pub fn release_year(&self) -> Option<f64> {
        let date = self.release_date.as_deref()?;
        let prefix = date.get(..4)?;
        prefix.parse::<i32>().ok().map(f64::from)
    }
}

/// One playlist of raw tracks.
#[derive(Debug, Clone, Deserialize)]
pub struct Playlist {
    #[serde(default)]
    pub tracks: Vec<RawTrack>,
}

/// One user's collected music data: playlists plus both enrichment sets.
#[derive(Debug, Clone, Deserialize)]
pub struct MusicUser {
    pub id: String,
    /// Whether the user had a linked music profile at all. Users without
    /// one still appear in the population with an indicator of 0.
    #[serde(default)]
    pub has_profile: bool,
    #[serde(default)]
    pub playlists: Vec<Playlist>,
    #[serde(default)]
    pub audio_features: Vec<AudioFeatureRecord>,
    #[serde(default)]
    pub metadata: Vec<TrackMetadata>,
}
