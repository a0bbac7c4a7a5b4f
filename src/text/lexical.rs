//! Second, independent sentiment model plus part-of-speech ratios.
//!
//! Polarity and subjectivity are averaged over a weighted adjective/adverb
//! lexicon, deliberately separate from the valence lexicon in
//! [`crate::text::sentiment`]. The POS tagger is a compact closed-class
//! plus suffix tagger; it only has to be stable enough to produce
//! consistent per-tag ratios, not linguistically complete.

use regex::Regex;
use std::collections::{BTreeMap, HashMap};

/// (word, polarity in [-1, 1], subjectivity in [0, 1]).
const SENTIMENT_LEXICON: &[(&str, f64, f64)] = &[
    ("amazing", 0.6, 0.9),
    ("angry", -0.5, 0.9),
    ("annoying", -0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.67),
    ("beautiful", 0.85, 1.0),
    ("best", 1.0, 0.3),
    ("boring", -1.0, 1.0),
    ("bright", 0.7, 0.8),
    ("brilliant", 0.9, 0.9),
    ("broken", -0.4, 0.4),
    ("calm", 0.3, 0.75),
    ("cheap", -0.4, 0.7),
    ("clean", 0.4, 0.65),
    ("clever", 0.6, 0.8),
    ("cold", -0.2, 0.5),
    ("comfortable", 0.5, 0.75),
    ("cool", 0.35, 0.65),
    ("crazy", -0.6, 0.9),
    ("cute", 0.5, 1.0),
    ("dangerous", -0.6, 0.9),
    ("dark", -0.15, 0.4),
    ("dead", -0.2, 0.3),
    ("delicious", 1.0, 1.0),
    ("difficult", -0.5, 1.0),
    ("dirty", -0.6, 0.8),
    ("disappointing", -0.6, 0.7),
    ("dumb", -0.7, 0.9),
    ("easy", 0.43, 0.83),
    ("evil", -1.0, 1.0),
    ("excellent", 1.0, 1.0),
    ("exciting", 0.6, 0.8),
    ("expensive", -0.3, 0.7),
    ("fair", 0.7, 0.9),
    ("fake", -0.5, 0.7),
    ("fantastic", 0.9, 0.9),
    ("fast", 0.2, 0.6),
    ("fine", 0.42, 0.58),
    ("friendly", 0.6, 0.8),
    ("fun", 0.3, 0.2),
    ("funny", 0.5, 1.0),
    ("gentle", 0.4, 0.8),
    ("good", 0.7, 0.6),
    ("gorgeous", 0.9, 1.0),
    ("great", 0.8, 0.75),
    ("happy", 0.8, 1.0),
    ("hard", -0.29, 0.54),
    ("hilarious", 0.8, 1.0),
    ("honest", 0.6, 0.9),
    ("horrible", -1.0, 1.0),
    ("hot", 0.25, 0.85),
    ("important", 0.4, 1.0),
    ("impossible", -0.5, 1.0),
    ("incredible", 0.9, 0.9),
    ("interesting", 0.5, 0.5),
    ("kind", 0.6, 0.9),
    ("lazy", -0.5, 0.8),
    ("lovely", 0.8, 0.9),
    ("lucky", 0.7, 0.9),
    ("mad", -0.6, 0.9),
    ("mean", -0.5, 0.8),
    ("miserable", -1.0, 1.0),
    ("nasty", -0.8, 1.0),
    ("new", 0.14, 0.45),
    ("nice", 0.6, 1.0),
    ("old", 0.1, 0.2),
    ("perfect", 1.0, 1.0),
    ("pleasant", 0.7, 0.9),
    ("poor", -0.4, 0.6),
    ("pretty", 0.5, 1.0),
    ("quick", 0.33, 0.54),
    ("quiet", 0.1, 0.6),
    ("rude", -0.7, 0.9),
    ("sad", -0.5, 1.0),
    ("scary", -0.6, 1.0),
    ("serious", -0.1, 0.6),
    ("sick", -0.7, 0.9),
    ("silly", -0.3, 0.9),
    ("simple", 0.2, 0.4),
    ("slow", -0.3, 0.4),
    ("smart", 0.6, 0.8),
    ("special", 0.4, 0.7),
    ("strange", -0.2, 0.8),
    ("strong", 0.4, 0.6),
    ("stupid", -0.8, 1.0),
    ("sweet", 0.5, 0.8),
    ("terrible", -1.0, 1.0),
    ("tired", -0.3, 0.6),
    ("ugly", -0.7, 1.0),
    ("useful", 0.4, 0.4),
    ("useless", -0.5, 0.6),
    ("warm", 0.5, 0.7),
    ("weak", -0.4, 0.6),
    ("weird", -0.3, 0.9),
    ("wonderful", 1.0, 1.0),
    ("worst", -1.0, 1.0),
    ("wrong", -0.5, 0.7),
];

// Closed-class word lists for the tagger.
const DETERMINERS: &[&str] = &["a", "an", "the", "this", "that", "these", "those", "each", "every"];
const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "them", "us", "myself", "yourself",
];
const POSSESSIVE_PRONOUNS: &[&str] = &["my", "your", "his", "her", "its", "our", "their"];
const PREPOSITIONS: &[&str] = &[
    "in", "on", "at", "by", "for", "with", "about", "from", "into", "over", "under", "of", "to",
    "through", "between", "after", "before", "during",
];
const CONJUNCTIONS: &[&str] = &["and", "but", "or", "nor", "so", "yet"];
const MODALS: &[&str] = &["can", "could", "may", "might", "must", "shall", "should", "will", "would"];
const WH_WORDS: &[&str] = &["who", "what", "where", "when", "why", "how", "which", "whom"];
const BE_VERBS: &[&str] = &["am", "is", "are", "was", "were", "be", "been", "being"];
const COMMON_VERBS: &[&str] = &[
    "have", "has", "had", "do", "does", "did", "go", "went", "get", "got", "make", "made", "know",
    "think", "see", "want", "say", "said", "take", "took", "come", "came", "give", "gave", "feel",
    "felt", "need", "like", "love", "hate", "let", "keep", "run", "play",
];
const INTERJECTIONS: &[&str] = &["oh", "wow", "hey", "ouch", "oops", "yay", "ugh", "hmm", "lol"];

/// Polarity, subjectivity, structural counts, and per-tag ratios for one
/// message. `pos_ratios` is variable-cardinality: a tag appears only when
/// it occurs in the message.
#[derive(Debug, Clone, PartialEq)]
pub struct LexicalScores {
    pub word_count: usize,
    pub sentence_count: usize,
    pub polarity: f64,
    pub subjectivity: f64,
    pub pos_ratios: BTreeMap<String, f64>,
}

pub struct LexicalModel {
    lexicon: HashMap<&'static str, (f64, f64)>,
    word_regex: Regex,
    sentence_regex: Regex,
}

impl LexicalModel {
    pub fn new() -> Self {
        LexicalModel {
            lexicon: SENTIMENT_LEXICON
                .iter()
                .map(|&(w, p, s)| (w, (p, s)))
                .collect(),
            word_regex: Regex::new(r"[a-zA-Z']+").expect("static word pattern"),
            sentence_regex: Regex::new(r"[.!?]+").expect("static sentence pattern"),
        }
    }

    pub fn score(&self, message: &str) -> LexicalScores {
        let words: Vec<String> = self
            .word_regex
            .find_iter(message)
            .map(|m| m.as_str().to_lowercase())
            .collect();
        let word_count = words.len();

        let sentence_count = if message.trim().is_empty() {
            0
        } else {
            self.sentence_regex
                .split(message)
                .filter(|s| !s.trim().is_empty())
                .count()
                .max(1)
        };

        // Averaged lexicon sentiment with negation flipping; a message with
        // no lexicon hits is neutral and fully objective.
        let mut polarity_sum = 0.0;
        let mut subjectivity_sum = 0.0;
        let mut hits = 0usize;
        for (i, word) in words.iter().enumerate() {
            if let Some(&(p, s)) = self.lexicon.get(word.as_str()) {
                let negated = i > 0 && matches!(words[i - 1].as_str(), "not" | "never" | "no");
                polarity_sum += if negated { -0.5 * p } else { p };
                subjectivity_sum += s;
                hits += 1;
            }
        }
        let (polarity, subjectivity) = if hits > 0 {
            (polarity_sum / hits as f64, subjectivity_sum / hits as f64)
        } else {
            (0.0, 0.0)
        };

        let mut tag_counts: BTreeMap<String, usize> = BTreeMap::new();
        for word in &words {
            *tag_counts.entry(tag_word(word).to_string()).or_insert(0) += 1;
        }
        let pos_ratios = if word_count > 0 {
            tag_counts
                .into_iter()
                .map(|(tag, count)| (tag, count as f64 / word_count as f64))
                .collect()
        } else {
            BTreeMap::new()
        };

        LexicalScores {
            word_count,
            sentence_count,
            polarity,
            subjectivity,
            pos_ratios,
        }
    }
}

impl Default for LexicalModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Closed-class lookup first, then suffix heuristics, defaulting to NN.
fn tag_word(word: &str) -> &'static str {
    if DETERMINERS.contains(&word) {
        return "DT";
    }
    if PRONOUNS.contains(&word) {
        return "PRP";
    }
    if POSSESSIVE_PRONOUNS.contains(&word) {
        return "PRP$";
    }
    if CONJUNCTIONS.contains(&word) {
        return "CC";
    }
    if MODALS.contains(&word) {
        return "MD";
    }
    if WH_WORDS.contains(&word) {
        return "WP";
    }
    if BE_VERBS.contains(&word) || COMMON_VERBS.contains(&word) {
        return "VB";
    }
    if PREPOSITIONS.contains(&word) {
        return "IN";
    }
    if INTERJECTIONS.contains(&word) {
        return "UH";
    }
    if word.chars().all(|c| c.is_ascii_digit()) {
        return "CD";
    }
    if word.len() > 3 && word.ends_with("ly") {
        return "RB";
    }
    if word.len() > 4 && word.ends_with("ing") {
        return "VBG";
    }
    if word.len() > 3 && word.ends_with("ed") {
        return "VBD";
    }
    if word.len() > 4
        && (word.ends_with("ous")
            || word.ends_with("ful")
            || word.ends_with("ive")
            || word.ends_with("able")
            || word.ends_with("ible")
            || word.ends_with("less"))
    {
        return "JJ";
    }
    if word.len() > 3 && word.ends_with('s') && !word.ends_with("ss") {
        return "NNS";
    }
    "NN"
}
