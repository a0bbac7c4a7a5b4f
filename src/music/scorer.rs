//! Track scorer: merges the two enrichment sources per track id and emits
//! one flat score mapping per resolvable track.
//!
//! The merge is by overwrite: fields from the audio-feature source are laid
//! down first, then metadata fields on top, so when both sources provide
//! the same field the second source wins.

use std::collections::HashMap;

use super::types::{AudioFeatureRecord, RawTrack, TrackMetadata};
use crate::features::{ScoreMap, ScoreValue};

/// The fixed set of per-track properties recognized for aggregation.
pub const TRACK_PROPERTIES: &[&str] = &[
    "acousticness",
    "danceability",
    "energy",
    "liveness",
    "loudness",
    "mode",
    "speechiness",
    "tempo",
    "valence",
    "popularity",
    "duration_ms",
    "explicit",
    "release_year",
];

/// Per-track merged feature index, built once per user from both sources.
pub struct TrackScorer {
    merged: HashMap<String, ScoreMap>,
}

impl TrackScorer {
    pub fn new(audio_features: &[AudioFeatureRecord], metadata: &[TrackMetadata]) -> Self {
        let mut merged: HashMap<String, ScoreMap> = HashMap::new();

        for record in audio_features {
            let Some(id) = record.id.as_deref() else {
                continue;
            };
            let entry = merged.entry(id.to_string()).or_default();
            let fields = [
                ("acousticness", record.acousticness),
                ("danceability", record.danceability),
                ("energy", record.energy),
                ("liveness", record.liveness),
                ("loudness", record.loudness),
                ("mode", record.mode),
                ("speechiness", record.speechiness),
                ("tempo", record.tempo),
                ("valence", record.valence),
            ];
            for (name, value) in fields {
                if let Some(v) = value {
                    entry.insert(name.to_string(), ScoreValue::Number(v));
                }
            }
        }

        for record in metadata {
            let Some(id) = record.id.as_deref() else {
                continue;
            };
            let entry = merged.entry(id.to_string()).or_default();
            if let Some(v) = record.popularity {
                entry.insert("popularity".to_string(), ScoreValue::Number(v));
            }
            if let Some(v) = record.explicit {
                // 0/1 so the flag aggregates like any numeric property.
                entry.insert("explicit".to_string(), ScoreValue::Number(f64::from(v as u8)));
            }
            if let Some(v) = record.duration_ms {
                entry.insert("duration_ms".to_string(), ScoreValue::Number(v));
            }
            if let Some(v) = record.release_year() {
                entry.insert("release_year".to_string(), ScoreValue::Number(v));
            }
        }

        TrackScorer { merged }
    }

    /// Score one raw track: its merged feature mapping, or `None` when the
    /// track has no resolvable id or no enrichment at all.
    pub fn score(&self, track: &RawTrack) -> Option<ScoreMap> {
        let id = track.id.as_deref()?;
        let score = self.merged.get(id)?;
        if score.is_empty() {
            return None;
        }
        Some(score.clone())
    }
}
