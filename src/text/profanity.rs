//! Profanity probability classifier.
//!
//! A weighted-term linear model squashed through a logistic, returning a
//! single scalar probability in [0, 1]. Strong stems match anywhere inside
//! a token so obfuscated spellings still register; milder terms must match
//! a whole word.

use regex::Regex;

/// Stems matched as substrings of a token, with their weights.
const STRONG_STEMS: &[(&str, f64)] = &[
    ("fuck", 3.0),
    ("fuk", 2.5),
    ("shit", 2.6),
    ("cunt", 3.2),
    ("bitch", 2.6),
    ("asshole", 2.6),
    ("dick", 2.0),
    ("bastard", 2.2),
    ("slut", 2.6),
    ("whore", 2.6),
    ("nigg", 3.5),
    ("fag", 2.8),
];

/// Whole-word terms with their weights.
const MILD_TERMS: &[(&str, f64)] = &[
    ("damn", 1.2),
    ("hell", 0.9),
    ("crap", 1.2),
    ("piss", 1.6),
    ("ass", 1.8),
    ("arse", 1.6),
    ("prick", 1.8),
    ("douche", 1.8),
    ("wanker", 2.0),
    ("bollocks", 1.6),
    ("bugger", 1.2),
    ("moron", 1.2),
    ("idiot", 1.0),
];

/// Bias chosen so a message with no hits scores a small baseline
/// probability instead of exactly 0.
const BIAS: f64 = -3.5;

pub struct ProfanityModel {
    word_regex: Regex,
}

impl ProfanityModel {
    pub fn new() -> Self {
        ProfanityModel {
            word_regex: Regex::new(r"[a-zA-Z]+").expect("static word pattern"),
        }
    }

    /// Probability that the message contains profanity, in [0, 1].
    pub fn probability(&self, message: &str) -> f64 {
        let lower = message.to_lowercase();
        let words: Vec<&str> = self.word_regex.find_iter(&lower).map(|m| m.as_str()).collect();

        let mut activation = BIAS;
        for word in &words {
            for (stem, weight) in STRONG_STEMS {
                if word.contains(stem) {
                    activation += weight;
                    break;
                }
            }
            for (term, weight) in MILD_TERMS {
                if word == term {
                    activation += weight;
                    break;
                }
            }
        }

        logistic(activation)
    }
}

impl Default for ProfanityModel {
    fn default() -> Self {
        Self::new()
    }
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
