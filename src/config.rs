//! Pipeline configuration loaded from `config.toml`.
//!
//! Every threshold the core depends on lives here rather than in code:
//! minimum sample sizes, permutation resamples, the RNG seed, and the
//! significance filter applied to correlation tables.

use serde::Deserialize;

use crate::error::PipelineError;
use crate::stats::CorrelationSettings;

/// Main configuration structure loaded from `config.toml`.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub analysis: AnalysisConfig,
    pub correlation: CorrelationConfig,
}

/// Input and output paths.
#[derive(Debug, Deserialize)]
pub struct DataConfig {
    /// JSON file with per-user message lists.
    pub messages_path: String,
    /// JSON file with per-user music data.
    pub music_path: String,
    /// Directory for feature tables, joined exports, and correlation CSVs.
    pub output_dir: String,
}

/// Aggregation thresholds.
#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    /// Minimum defined values a per-user field needs before its statistics
    /// are reported.
    pub min_field_sample: usize,
}

/// Correlation engine thresholds.
#[derive(Debug, Deserialize)]
pub struct CorrelationConfig {
    /// Minimum paired sample size for any column pair.
    pub min_sample_size: usize,
    /// Resamples for the distance-correlation permutation test.
    pub permutation_resamples: usize,
    /// Base RNG seed for reproducible permutation p-values.
    pub rng_seed: u64,
    /// Significance filter: minimum absolute coefficient.
    pub min_coefficient: f64,
    /// Significance filter: maximum p-value.
    pub max_p_value: f64,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, PipelineError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config =
            toml::from_str(&content).map_err(|e| PipelineError::Config(e.to_string()))?;
        Ok(config)
    }

    pub fn correlation_settings(&self) -> CorrelationSettings {
        CorrelationSettings {
            min_sample_size: self.correlation.min_sample_size,
            permutation_resamples: self.correlation.permutation_resamples,
            rng_seed: self.correlation.rng_seed,
        }
    }
}

impl Default for Config {
    /// Defaults used when no `config.toml` is present.
    fn default() -> Self {
        Config {
            data: DataConfig {
                messages_path: "data/messages.json".to_string(),
                music_path: "data/music.json".to_string(),
                output_dir: "data".to_string(),
            },
            analysis: AnalysisConfig { min_field_sample: 1 },
            correlation: CorrelationConfig {
                min_sample_size: 10,
                permutation_resamples: 1000,
                rng_seed: 42,
                min_coefficient: 0.2,
                max_p_value: 0.05,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[data]
messages_path = "m.json"
music_path = "s.json"
output_dir = "out"

[analysis]
min_field_sample = 2

[correlation]
min_sample_size = 15
permutation_resamples = 500
rng_seed = 7
min_coefficient = 0.3
max_p_value = 0.01
"#
        )
        .unwrap();

        let config = Config::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.analysis.min_field_sample, 2);
        assert_eq!(config.correlation.min_sample_size, 15);
        assert_eq!(config.correlation_settings().rng_seed, 7);
    }

    #[test]
    fn test_malformed_toml_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not toml at all [[[").unwrap();
        let err = Config::load(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, PipelineError::Config(_)));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.correlation.permutation_resamples, 1000);
        assert_eq!(config.correlation.max_p_value, 0.05);
    }
}
