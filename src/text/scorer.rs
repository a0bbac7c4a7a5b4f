//! Message scorer: one raw message in, one nested score mapping out.
//!
//! Holds all analyzer models, each loaded once at construction and reused
//! read-only for the whole run. A message with no text is not scored at
//! all; the caller skips it rather than aggregating zeros.

use super::lexical::LexicalModel;
use super::profanity::ProfanityModel;
use super::readability::ReadabilityModel;
use super::sentiment::PolarityModel;
use super::surface;
use crate::features::{ScoreMap, ScoreValue};

use std::collections::BTreeMap;

pub struct MessageScorer {
    polarity: PolarityModel,
    readability: ReadabilityModel,
    lexical: LexicalModel,
    profanity: ProfanityModel,
}

impl MessageScorer {
    pub fn new() -> Self {
        MessageScorer {
            polarity: PolarityModel::new(),
            readability: ReadabilityModel::new(),
            lexical: LexicalModel::new(),
            profanity: ProfanityModel::new(),
        }
    }

    /// Score one message. Returns `None` for a message with no text.
    pub fn score(&self, message: &str) -> Option<ScoreMap> {
        if message.trim().is_empty() {
            return None;
        }

        let mut map = ScoreMap::new();
        map.insert("polarity".into(), self.polarity_scores(message));
        map.insert("readability".into(), self.readability_scores(message));
        map.insert("lexical".into(), self.lexical_scores(message));
        map.insert(
            "profanity_probability".into(),
            ScoreValue::Number(self.profanity.probability(message)),
        );
        map.insert(
            "uppercase_ratio".into(),
            ScoreValue::Number(surface::uppercase_ratio(message)),
        );
        map.insert(
            "alpha_ratio".into(),
            ScoreValue::Number(surface::alpha_ratio(message)),
        );
        map.insert(
            "ascii_ratio".into(),
            ScoreValue::Number(surface::ascii_ratio(message)),
        );
        Some(map)
    }

    fn polarity_scores(&self, message: &str) -> ScoreValue {
        let s = self.polarity.score(message);
        let mut map = BTreeMap::new();
        map.insert("negative".to_string(), ScoreValue::Number(s.negative));
        map.insert("neutral".to_string(), ScoreValue::Number(s.neutral));
        map.insert("positive".to_string(), ScoreValue::Number(s.positive));
        map.insert("compound".to_string(), ScoreValue::Number(s.compound));
        ScoreValue::Map(map)
    }

    fn readability_scores(&self, message: &str) -> ScoreValue {
        let s = self.readability.score(message);
        let mut map = BTreeMap::new();
        map.insert(
            "flesch_reading_ease".to_string(),
            ScoreValue::Number(s.flesch_reading_ease),
        );
        map.insert(
            "flesch_kincaid_grade".to_string(),
            ScoreValue::Number(s.flesch_kincaid_grade),
        );
        map.insert("smog_index".to_string(), ScoreValue::Number(s.smog_index));
        map.insert(
            "coleman_liau_index".to_string(),
            ScoreValue::Number(s.coleman_liau_index),
        );
        map.insert(
            "automated_readability_index".to_string(),
            ScoreValue::Number(s.automated_readability_index),
        );
        map.insert(
            "dale_chall_readability_score".to_string(),
            ScoreValue::Number(s.dale_chall_readability_score),
        );
        map.insert(
            "difficult_word_ratio".to_string(),
            ScoreValue::Number(s.difficult_word_ratio),
        );
        map.insert(
            "linsear_write_formula".to_string(),
            ScoreValue::Number(s.linsear_write_formula),
        );
        map.insert("gunning_fog".to_string(), ScoreValue::Number(s.gunning_fog));
        ScoreValue::Map(map)
    }

    fn lexical_scores(&self, message: &str) -> ScoreValue {
        let s = self.lexical.score(message);
        let mut map = BTreeMap::new();
        map.insert(
            "word_count".to_string(),
            ScoreValue::Number(s.word_count as f64),
        );
        map.insert(
            "sentence_count".to_string(),
            ScoreValue::Number(s.sentence_count as f64),
        );
        map.insert("polarity".to_string(), ScoreValue::Number(s.polarity));
        map.insert(
            "subjectivity".to_string(),
            ScoreValue::Number(s.subjectivity),
        );
        let ratios: BTreeMap<String, ScoreValue> = s
            .pos_ratios
            .into_iter()
            .map(|(tag, ratio)| (tag, ScoreValue::Number(ratio)))
            .collect();
        map.insert("pos_ratios".to_string(), ScoreValue::Map(ratios));
        ScoreValue::Map(map)
    }
}

impl Default for MessageScorer {
    fn default() -> Self {
        Self::new()
    }
}
