//! Readability and lexical-complexity indices.
//!
//! All indices derive from word, sentence, letter, and syllable counts of
//! the raw message; syllables come from a vowel-group heuristic. Every
//! formula guards its denominators so a short or empty message yields 0
//! rather than a division error.

use regex::Regex;
use std::collections::HashSet;

/// Words considered familiar for the vocabulary-difficulty score. A word
/// outside this list with two or more syllables counts as difficult.
const EASY_WORDS: &[&str] = &[
    "a", "able", "about", "after", "again", "against", "ago", "air", "all", "almost", "alone",
    "along", "already", "also", "always", "am", "an", "and", "animal", "another", "answer", "any",
    "are", "around", "as", "ask", "at", "away", "baby", "back", "bad", "ball", "be", "bear",
    "because", "bed", "been", "before", "began", "begin", "behind", "believe", "best", "better",
    "between", "big", "bird", "black", "blue", "boat", "body", "book", "both", "box", "boy",
    "bring", "brother", "brought", "but", "by", "call", "came", "can", "car", "care", "carry",
    "cat", "catch", "change", "children", "city", "clean", "close", "cold", "come", "could",
    "country", "cut", "dark", "day", "did", "do", "does", "dog", "done", "door", "down", "draw",
    "dream", "drink", "each", "early", "eat", "eight", "end", "enough", "even", "ever", "every",
    "eye", "face", "fall", "family", "far", "fast", "father", "feel", "feet", "fell", "few",
    "find", "fine", "fire", "first", "fish", "five", "fly", "follow", "food", "for", "found",
    "four", "friend", "from", "full", "fun", "funny", "game", "gave", "get", "girl", "give", "go",
    "going", "gone", "good", "got", "grand", "great", "green", "grew", "ground", "grow", "had",
    "hand", "happy", "hard", "has", "have", "he", "head", "hear", "heard", "help", "her", "here",
    "high", "him", "his", "hold", "home", "hope", "horse", "hot", "house", "how", "hurt", "i",
    "if", "in", "into", "is", "it", "its", "jump", "just", "keep", "kind", "knew", "know", "land",
    "large", "last", "late", "laugh", "learn", "leave", "left", "let", "letter", "life", "light",
    "like", "line", "listen", "little", "live", "long", "look", "love", "made", "make", "man",
    "many", "may", "me", "mean", "men", "might", "mind", "more", "morning", "most", "mother",
    "move", "much", "must", "my", "name", "near", "need", "never", "new", "next", "night", "no",
    "not", "nothing", "now", "of", "off", "often", "old", "on", "once", "one", "only", "open",
    "or", "other", "our", "out", "over", "own", "paper", "part", "people", "place", "play",
    "please", "pretty", "pull", "put", "ran", "read", "ready", "red", "rest", "ride", "right",
    "river", "road", "room", "round", "run", "said", "same", "sat", "saw", "say", "school", "sea",
    "see", "seem", "seen", "sent", "set", "seven", "she", "ship", "short", "should", "show",
    "side", "since", "sing", "sister", "sit", "six", "sleep", "small", "so", "some", "something",
    "song", "soon", "sound", "still", "stop", "story", "sun", "sure", "take", "talk", "tell",
    "ten", "than", "thank", "that", "the", "their", "them", "then", "there", "these", "they",
    "thing", "think", "this", "those", "thought", "three", "through", "time", "to", "today",
    "together", "told", "too", "took", "top", "toward", "tree", "true", "try", "turn", "two",
    "under", "until", "up", "upon", "us", "use", "very", "walk", "want", "warm", "was", "watch",
    "water", "way", "we", "well", "went", "were", "what", "when", "where", "which", "while",
    "white", "who", "whole", "why", "will", "wind", "wish", "with", "word", "work", "world",
    "would", "write", "year", "yes", "yet", "you", "young", "your",
];

/// The readability indices computed for one message.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadabilityScores {
    pub flesch_reading_ease: f64,
    pub flesch_kincaid_grade: f64,
    pub smog_index: f64,
    pub coleman_liau_index: f64,
    pub automated_readability_index: f64,
    pub dale_chall_readability_score: f64,
    /// Difficult words over all words; 0 when the word count is 0.
    pub difficult_word_ratio: f64,
    pub linsear_write_formula: f64,
    pub gunning_fog: f64,
}

/// Readability model. The word and sentence patterns are compiled once.
pub struct ReadabilityModel {
    word_regex: Regex,
    sentence_regex: Regex,
    easy_words: HashSet<&'static str>,
}

impl ReadabilityModel {
    pub fn new() -> Self {
        ReadabilityModel {
            word_regex: Regex::new(r"[a-zA-Z']+").expect("static word pattern"),
            sentence_regex: Regex::new(r"[.!?]+").expect("static sentence pattern"),
            easy_words: EASY_WORDS.iter().copied().collect(),
        }
    }

    pub fn score(&self, message: &str) -> ReadabilityScores {
        let words: Vec<String> = self
            .word_regex
            .find_iter(message)
            .map(|m| m.as_str().to_lowercase())
            .collect();
        let word_count = words.len();

        if word_count == 0 {
            return ReadabilityScores {
                flesch_reading_ease: 0.0,
                flesch_kincaid_grade: 0.0,
                smog_index: 0.0,
                coleman_liau_index: 0.0,
                automated_readability_index: 0.0,
                dale_chall_readability_score: 0.0,
                difficult_word_ratio: 0.0,
                linsear_write_formula: 0.0,
                gunning_fog: 0.0,
            };
        }

        let sentence_count = self.sentence_count(message);
        let syllables: Vec<usize> = words.iter().map(|w| syllable_count(w)).collect();
        let total_syllables: usize = syllables.iter().sum();
        let letters = message.chars().filter(|c| c.is_alphabetic()).count();
        let alphanumeric = message.chars().filter(|c| c.is_alphanumeric()).count();

        let wc = word_count as f64;
        let sc = sentence_count as f64;
        let words_per_sentence = wc / sc;
        let syllables_per_word = total_syllables as f64 / wc;

        let polysyllables = syllables.iter().filter(|&&s| s >= 3).count();
        let difficult = words
            .iter()
            .zip(&syllables)
            .filter(|(w, &s)| s >= 2 && !self.easy_words.contains(w.as_str()))
            .count();
        let difficult_pct = difficult as f64 / wc * 100.0;

        ReadabilityScores {
            flesch_reading_ease: 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word,
            flesch_kincaid_grade: 0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59,
            smog_index: smog(polysyllables, sentence_count),
            coleman_liau_index: 0.058 * (letters as f64 / wc * 100.0)
                - 0.296 * (sc / wc * 100.0)
                - 15.8,
            automated_readability_index: 4.71 * (alphanumeric as f64 / wc)
                + 0.5 * words_per_sentence
                - 21.43,
            dale_chall_readability_score: dale_chall(difficult_pct, words_per_sentence),
            difficult_word_ratio: difficult as f64 / wc,
            linsear_write_formula: linsear_write(&syllables, sentence_count),
            gunning_fog: 0.4 * (words_per_sentence + 100.0 * polysyllables as f64 / wc),
        }
    }

    fn sentence_count(&self, message: &str) -> usize {
        let count = self
            .sentence_regex
            .split(message)
            .filter(|s| !s.trim().is_empty())
            .count();
        count.max(1)
    }
}

impl Default for ReadabilityModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Vowel-group syllable heuristic with a silent-e adjustment; every word
/// counts at least one syllable.
pub fn syllable_count(word: &str) -> usize {
    let lower = word.to_lowercase();
    let chars: Vec<char> = lower.chars().collect();

    let mut count = 0;
    let mut previous_vowel = false;
    for &c in &chars {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }

    // Trailing silent e, but keep the syllable in words like "table".
    if chars.len() > 2 && chars.last() == Some(&'e') {
        let penultimate = chars[chars.len() - 2];
        if !matches!(penultimate, 'a' | 'e' | 'i' | 'o' | 'u' | 'y' | 'l') && count > 1 {
            count -= 1;
        }
    }

    count.max(1)
}

fn smog(polysyllables: usize, sentence_count: usize) -> f64 {
    // The SMOG formula is unstable on very short texts.
    if sentence_count < 3 {
        return 0.0;
    }
    1.043 * (polysyllables as f64 * 30.0 / sentence_count as f64).sqrt() + 3.1291
}

fn dale_chall(difficult_pct: f64, words_per_sentence: f64) -> f64 {
    let mut score = 0.1579 * difficult_pct + 0.0496 * words_per_sentence;
    if difficult_pct > 5.0 {
        score += 3.6365;
    }
    score
}

/// Sentence-length formula: easy words (under three syllables) score 1,
/// hard words score 3, over the first 100 words.
fn linsear_write(syllables: &[usize], sentence_count: usize) -> f64 {
    let sample = &syllables[..syllables.len().min(100)];
    let points: f64 = sample
        .iter()
        .map(|&s| if s >= 3 { 3.0 } else { 1.0 })
        .sum();
    let mut number = points / sentence_count.max(1) as f64;
    if number <= 20.0 {
        number -= 2.0;
    }
    number / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syllable_heuristic() {
        assert_eq!(syllable_count("cat"), 1);
        assert_eq!(syllable_count("water"), 2);
        assert_eq!(syllable_count("beautiful"), 3);
        assert_eq!(syllable_count("the"), 1);
        // Silent e.
        assert_eq!(syllable_count("make"), 1);
        // -le keeps its syllable.
        assert_eq!(syllable_count("table"), 2);
        // Never zero.
        assert_eq!(syllable_count("b"), 1);
    }

    #[test]
    fn test_empty_message_is_all_zero() {
        let model = ReadabilityModel::new();
        let s = model.score("");
        assert_eq!(s.flesch_reading_ease, 0.0);
        assert_eq!(s.difficult_word_ratio, 0.0);
        assert_eq!(s.gunning_fog, 0.0);
    }

    #[test]
    fn test_simple_text_reads_easier_than_dense_text() {
        let model = ReadabilityModel::new();
        let simple = model.score("The cat sat. The dog ran. We had fun.");
        let dense = model.score(
            "Institutional heterogeneity necessitates comprehensive organizational \
             restructuring initiatives considering multidimensional operational complexity.",
        );
        assert!(simple.flesch_reading_ease > dense.flesch_reading_ease);
        assert!(simple.flesch_kincaid_grade < dense.flesch_kincaid_grade);
        assert!(simple.gunning_fog < dense.gunning_fog);
        assert!(simple.dale_chall_readability_score < dense.dale_chall_readability_score);
    }

    #[test]
    fn test_difficult_word_ratio_bounds() {
        let model = ReadabilityModel::new();
        let easy = model.score("the dog ran to the tree");
        assert_eq!(easy.difficult_word_ratio, 0.0);

        let hard = model.score("quintessential obfuscation permeates verbose terminology");
        assert!(hard.difficult_word_ratio > 0.5);
        assert!(hard.difficult_word_ratio <= 1.0);
    }

    #[test]
    fn test_smog_requires_three_sentences() {
        let model = ReadabilityModel::new();
        let short = model.score("Considerable complexity.");
        assert_eq!(short.smog_index, 0.0);

        let long = model.score(
            "Considerable complexity appears here. Another elaborate sentence follows. \
             Yet another statement concludes everything.",
        );
        assert!(long.smog_index > 0.0);
    }

    #[test]
    fn test_single_word_message() {
        let model = ReadabilityModel::new();
        let s = model.score("hello");
        assert!(s.flesch_reading_ease.is_finite());
        assert!(s.coleman_liau_index.is_finite());
        assert!(s.automated_readability_index.is_finite());
    }
}
