//! Per-user music profile: track feature aggregation plus the
//! profile-level extras (playlist-length distribution, counts, artist
//! diversity, and the profile indicator).

use super::scorer::TrackScorer;
use super::types::MusicUser;
use crate::features::{aggregate_score_maps, AggregateOptions, ScoreMap, UserFeatureRecord};
use crate::stats::{normalized_entropy, summarize, STATISTIC_NAMES};
use tracing::debug;

/// Build one feature record from a user's collected music data.
///
/// Users without a linked profile still produce a record so the population
/// keeps its non-listener stratum; they carry only the indicator.
pub fn build_profile(user: &MusicUser, options: &AggregateOptions) -> UserFeatureRecord {
    let all_tracks: Vec<_> = user
        .playlists
        .iter()
        .flat_map(|p| p.tracks.iter())
        .collect();
    let playlist_lengths: Vec<f64> = user
        .playlists
        .iter()
        .map(|p| p.tracks.len() as f64)
        .collect();

    let scorer = TrackScorer::new(&user.audio_features, &user.metadata);
    let score_maps: Vec<ScoreMap> = all_tracks
        .iter()
        .filter_map(|track| scorer.score(track))
        .collect();

    debug!(
        user = %user.id,
        tracks = all_tracks.len(),
        scored = score_maps.len(),
        "music profile aggregation"
    );

    let mut record = aggregate_score_maps(&user.id, &score_maps, options);

    if !playlist_lengths.is_empty() {
        if let Some(summary) = summarize(&playlist_lengths) {
            for &stat in STATISTIC_NAMES {
                if let Some(v) = summary.get(stat) {
                    record
                        .features
                        .insert(format!("playlist_length_{stat}"), v);
                }
            }
        }
    }

    // First artist of each track feeds the diversity score.
    let artists: Vec<&str> = all_tracks
        .iter()
        .filter_map(|t| t.artists.first().map(String::as_str))
        .collect();
    if !artists.is_empty() {
        record
            .features
            .insert("artist_entropy".to_string(), normalized_entropy(&artists));
    }

    record
        .features
        .insert("playlists_count".to_string(), user.playlists.len() as f64);
    record
        .features
        .insert("tracks_count".to_string(), all_tracks.len() as f64);
    record.features.insert(
        "has_spotify".to_string(),
        if user.has_profile { 1.0 } else { 0.0 },
    );

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::types::{AudioFeatureRecord, Playlist, RawTrack, TrackMetadata};

    fn track(id: &str, artist: &str) -> RawTrack {
        RawTrack {
            id: Some(id.to_string()),
            artists: vec![artist.to_string()],
        }
    }

    fn audio(id: &str, energy: f64) -> AudioFeatureRecord {
        AudioFeatureRecord {
            id: Some(id.to_string()),
            acousticness: None,
            danceability: None,
            energy: Some(energy),
            liveness: None,
            loudness: None,
            mode: None,
            speechiness: None,
            tempo: None,
            valence: None,
        }
    }

    fn listener(id: &str, playlists: Vec<Playlist>, audio_features: Vec<AudioFeatureRecord>) -> MusicUser {
        MusicUser {
            id: id.to_string(),
            has_profile: true,
            playlists,
            audio_features,
            metadata: Vec::<TrackMetadata>::new(),
        }
    }

    #[test]
    fn test_full_profile() {
        let user = listener(
            "u1",
            vec![
                Playlist {
                    tracks: vec![track("t1", "artist-a"), track("t2", "artist-b")],
                },
                Playlist {
                    tracks: vec![track("t3", "artist-c")],
                },
            ],
            vec![audio("t1", 0.2), audio("t2", 0.4), audio("t3", 0.9)],
        );

        let record = build_profile(&user, &AggregateOptions::default());
        assert_eq!(record.item_count, 3);
        assert_eq!(record.features["tracks_count"], 3.0);
        assert_eq!(record.features["playlists_count"], 2.0);
        assert_eq!(record.features["has_spotify"], 1.0);
        assert!((record.features["artist_entropy"] - 1.0).abs() < 1e-9);
        assert!(record.features.contains_key("energy_mean"));
        assert!(record.features.contains_key("playlist_length_median"));
    }

    #[test]
    fn test_non_listener_record() {
        let user = MusicUser {
            id: "u2".to_string(),
            has_profile: false,
            playlists: Vec::new(),
            audio_features: Vec::new(),
            metadata: Vec::new(),
        };
        let record = build_profile(&user, &AggregateOptions::default());
        assert_eq!(record.item_count, 0);
        assert_eq!(record.features["has_spotify"], 0.0);
        assert_eq!(record.features["tracks_count"], 0.0);
        assert!(!record.features.contains_key("artist_entropy"));
        assert!(!record.features.contains_key("playlist_length_median"));
    }

    #[test]
    fn test_single_artist_has_zero_entropy() {
        let user = listener(
            "u3",
            vec![Playlist {
                tracks: (0..10).map(|i| track(&format!("t{i}"), "the-one-band")).collect(),
            }],
            (0..10).map(|i| audio(&format!("t{i}"), 0.1 * i as f64)).collect(),
        );
        let record = build_profile(&user, &AggregateOptions::default());
        assert_eq!(record.features["artist_entropy"], 0.0);
    }

    #[test]
    fn test_unenriched_tracks_counted_but_not_scored() {
        let user = listener(
            "u4",
            vec![Playlist {
                tracks: vec![track("t1", "a"), track("t2", "b")],
            }],
            vec![audio("t1", 0.5)],
        );
        let record = build_profile(&user, &AggregateOptions::default());
        assert_eq!(record.features["tracks_count"], 2.0);
        assert_eq!(record.item_count, 1, "only the enriched track is scored");
    }
}
