//! End-to-end pipeline steps: message analysis, music analysis, and the
//! join-plus-correlation stage. Each step reads its boundary JSON, runs
//! the core, and writes feature/correlation files under the configured
//! output directory.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rayon::prelude::*;
use serde::Deserialize;
use tracing::info;

use crate::config::Config;
use crate::error::PipelineError;
use crate::features::{aggregate_items, AggregateOptions, FeatureTable, UserFeatureRecord};
use crate::join::inner_join;
use crate::music::{build_profile, MusicUser};
use crate::stats::{correlate, filter_significant, CorrelationMethod};
use crate::text::MessageScorer;

/// One user's collected messages, keyed by an opaque identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageUser {
    pub id: String,
    #[serde(default)]
    pub messages: Vec<String>,
}

/// Score and aggregate every user's messages into feature records.
pub fn analyze_message_users(
    users: &[MessageUser],
    options: &AggregateOptions,
) -> Vec<UserFeatureRecord> {
    let scorer = MessageScorer::new();
    users
        .par_iter()
        .map(|user| {
            aggregate_items(&user.id, &user.messages, |m: &String| scorer.score(m), options)
        })
        .collect()
}

/// Build every user's music profile record.
pub fn analyze_music_users(
    users: &[MusicUser],
    options: &AggregateOptions,
) -> Vec<UserFeatureRecord> {
    users
        .par_iter()
        .map(|user| build_profile(user, options))
        .collect()
}

/// Read the messages input, analyze it, and write the feature records
/// (JSON for the correlate step, CSV for inspection).
pub fn run_message_analysis(config: &Config) -> Result<(), PipelineError> {
    let users: Vec<MessageUser> = read_json(&config.data.messages_path)?;
    info!(users = users.len(), "analyzing message population");

    let options = AggregateOptions {
        min_field_sample: config.analysis.min_field_sample,
    };
    let records = analyze_message_users(&users, &options);
    let table = FeatureTable::from_records(&records, "message_count")?;

    let out = Path::new(&config.data.output_dir);
    write_json(&out.join("messages_features.json"), &records)?;
    table.write_csv(File::create(out.join("messages_features.csv"))?, true)?;
    info!(rows = table.row_count(), "message feature table written");
    Ok(())
}

/// Read the music input, analyze it, and write the feature records.
pub fn run_music_analysis(config: &Config) -> Result<(), PipelineError> {
    let users: Vec<MusicUser> = read_json(&config.data.music_path)?;
    info!(users = users.len(), "analyzing music population");

    let options = AggregateOptions {
        min_field_sample: config.analysis.min_field_sample,
    };
    let records = analyze_music_users(&users, &options);
    let table = FeatureTable::from_records(&records, "scored_tracks")?;

    let out = Path::new(&config.data.output_dir);
    write_json(&out.join("music_features.json"), &records)?;
    table.write_csv(File::create(out.join("music_features.csv"))?, true)?;
    info!(rows = table.row_count(), "music feature table written");
    Ok(())
}

/// Join the two feature tables and write one correlation table (full and
/// significance-filtered) per method, plus the unidentifiable joined CSV.
pub fn run_correlation(config: &Config) -> Result<(), PipelineError> {
    let out = Path::new(&config.data.output_dir);
    let message_records: Vec<UserFeatureRecord> = read_json(out.join("messages_features.json"))?;
    let music_records: Vec<UserFeatureRecord> = read_json(out.join("music_features.json"))?;

    let messages = FeatureTable::from_records(&message_records, "message_count")?;
    let music = FeatureTable::from_records(&music_records, "scored_tracks")?;

    let joined = inner_join(&messages, &music);
    joined.write_csv(File::create(out.join("messages_and_music.csv"))?, false)?;

    let settings = config.correlation_settings();
    let left = joined.left_columns();
    let right = joined.right_columns();

    for method in [
        CorrelationMethod::Pearson,
        CorrelationMethod::Spearman,
        CorrelationMethod::KendallTau,
        CorrelationMethod::Distance,
    ] {
        let records = correlate(&left, &right, method, &settings);
        info!(method = method.name(), pairs = records.len(), "correlations computed");

        write_correlation_csv(
            &out.join(format!("{}_correlations.csv", method.name())),
            &records,
        )?;

        let significant = filter_significant(
            records,
            config.correlation.min_coefficient,
            config.correlation.max_p_value,
        );
        write_correlation_csv(
            &out.join(format!("{}_correlations_significant.csv", method.name())),
            &significant,
        )?;
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, PipelineError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), PipelineError> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}

fn write_correlation_csv(
    path: &Path,
    records: &[crate::stats::CorrelationRecord],
) -> Result<(), PipelineError> {
    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
