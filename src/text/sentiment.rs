//! Lexicon/rule polarity model.
//!
//! Produces the four polarity fields of a message: negative, neutral and
//! positive proportions in [0, 1] and a compound score in [-1, 1]. The
//! rules follow the usual valence-lexicon approach: booster words scale a
//! following sentiment word, negations flip it, all-caps emphasis and
//! terminal punctuation amplify it, and the compound score is the
//! alpha-normalized valence sum.

use regex::Regex;
use std::collections::HashMap;

/// Valence lexicon, scores in [-4, 4].
const VALENCE_LEXICON: &[(&str, f64)] = &[
    ("abandon", -1.9),
    ("abuse", -3.2),
    ("adore", 2.9),
    ("afraid", -2.0),
    ("aggressive", -1.2),
    ("amazing", 2.8),
    ("angry", -2.3),
    ("annoy", -1.7),
    ("annoying", -1.8),
    ("anxious", -1.9),
    ("appreciate", 2.0),
    ("awesome", 3.1),
    ("awful", -2.9),
    ("bad", -2.5),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("bless", 2.1),
    ("bored", -1.3),
    ("boring", -1.3),
    ("brilliant", 2.8),
    ("broken", -1.6),
    ("calm", 1.3),
    ("care", 2.2),
    ("celebrate", 2.7),
    ("charming", 2.4),
    ("cheerful", 2.5),
    ("comfort", 1.9),
    ("cool", 1.3),
    ("crap", -2.4),
    ("crash", -1.7),
    ("crazy", -1.4),
    ("cruel", -2.8),
    ("cry", -2.1),
    ("cute", 2.0),
    ("damn", -1.7),
    ("dead", -3.3),
    ("death", -2.9),
    ("defeat", -2.0),
    ("depressed", -2.6),
    ("despair", -2.8),
    ("destroy", -2.6),
    ("die", -2.9),
    ("dirty", -1.6),
    ("disappoint", -2.1),
    ("disaster", -3.1),
    ("disgusting", -2.8),
    ("dislike", -1.6),
    ("dumb", -2.3),
    ("eager", 1.7),
    ("easy", 1.9),
    ("elegant", 2.1),
    ("embarrassed", -1.9),
    ("enjoy", 2.2),
    ("evil", -3.4),
    ("excellent", 2.7),
    ("excited", 2.3),
    ("fail", -2.5),
    ("failure", -2.6),
    ("fake", -1.9),
    ("fantastic", 2.6),
    ("favorite", 2.0),
    ("fear", -2.2),
    ("fight", -1.6),
    ("fine", 0.8),
    ("fool", -1.9),
    ("free", 2.3),
    ("fresh", 1.3),
    ("friend", 2.2),
    ("fun", 2.3),
    ("funny", 1.9),
    ("generous", 2.3),
    ("gentle", 1.9),
    ("glad", 2.0),
    ("gloomy", -1.9),
    ("good", 1.9),
    ("gorgeous", 2.7),
    ("grateful", 2.4),
    ("great", 3.1),
    ("grief", -2.6),
    ("gross", -2.1),
    ("happy", 2.7),
    ("hate", -2.7),
    ("hell", -2.6),
    ("help", 1.7),
    ("helpless", -2.1),
    ("honest", 2.3),
    ("hope", 1.9),
    ("horrible", -2.5),
    ("hurt", -2.4),
    ("ignore", -1.5),
    ("ill", -1.8),
    ("inspire", 2.5),
    ("insult", -2.3),
    ("interesting", 1.7),
    ("jealous", -2.0),
    ("joke", 1.2),
    ("joy", 2.8),
    ("kill", -3.6),
    ("kind", 2.4),
    ("laugh", 2.5),
    ("lazy", -1.4),
    ("liar", -2.7),
    ("like", 1.5),
    ("lol", 1.6),
    ("lonely", -2.2),
    ("lose", -1.7),
    ("loser", -2.4),
    ("loss", -1.9),
    ("love", 3.2),
    ("lovely", 2.8),
    ("luck", 1.8),
    ("lucky", 1.8),
    ("mad", -2.2),
    ("mess", -1.5),
    ("miserable", -2.8),
    ("miss", -1.0),
    ("mistake", -1.7),
    ("nasty", -2.6),
    ("nice", 1.8),
    ("pain", -2.5),
    ("panic", -2.4),
    ("peace", 2.5),
    ("perfect", 2.7),
    ("pleasant", 2.3),
    ("please", 1.0),
    ("pretty", 2.2),
    ("proud", 2.2),
    ("regret", -2.0),
    ("relax", 1.9),
    ("rude", -2.0),
    ("sad", -2.1),
    ("safe", 1.9),
    ("scared", -2.2),
    ("shame", -2.1),
    ("shit", -2.6),
    ("sick", -2.0),
    ("smart", 1.7),
    ("smile", 2.0),
    ("sorry", -0.3),
    ("strong", 2.3),
    ("stupid", -2.4),
    ("success", 2.7),
    ("suck", -1.5),
    ("sweet", 2.0),
    ("terrible", -2.7),
    ("terrific", 2.9),
    ("thank", 1.9),
    ("thanks", 1.9),
    ("tired", -1.4),
    ("tragedy", -3.4),
    ("trust", 2.3),
    ("ugly", -2.4),
    ("upset", -2.0),
    ("useless", -1.8),
    ("victory", 2.8),
    ("war", -2.9),
    ("warm", 1.7),
    ("weak", -1.9),
    ("welcome", 2.0),
    ("win", 2.8),
    ("wonderful", 2.7),
    ("worry", -1.9),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wow", 2.8),
    ("wrong", -2.1),
];

/// Degree modifiers: how much the next sentiment word is scaled up or down.
const BOOSTERS: &[(&str, f64)] = &[
    ("absolutely", 0.293),
    ("completely", 0.293),
    ("considerably", 0.293),
    ("deeply", 0.293),
    ("extremely", 0.293),
    ("greatly", 0.293),
    ("highly", 0.293),
    ("incredibly", 0.293),
    ("really", 0.293),
    ("remarkably", 0.293),
    ("so", 0.293),
    ("totally", 0.293),
    ("utterly", 0.293),
    ("very", 0.293),
    ("almost", -0.293),
    ("barely", -0.293),
    ("hardly", -0.293),
    ("kinda", -0.293),
    ("less", -0.293),
    ("little", -0.293),
    ("marginally", -0.293),
    ("occasionally", -0.293),
    ("partly", -0.293),
    ("scarcely", -0.293),
    ("slightly", -0.293),
    ("somewhat", -0.293),
];

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "dont", "hadnt",
    "hasnt", "havent", "isnt", "mightnt", "mustnt", "neither", "never", "no", "nobody", "none",
    "nope", "nor", "not", "nothing", "nowhere", "shouldnt", "wasnt", "werent", "without", "wont",
    "wouldnt",
];

/// Scaling for a sentiment word preceded by a negation.
const NEGATION_FACTOR: f64 = -0.74;
/// Added (sign-aligned) to a sentiment word written in all caps when the
/// message mixes cases.
const CAPS_EMPHASIS: f64 = 0.733;
/// Per-exclamation-mark amplification of the valence sum, capped at 4.
const EXCLAIM_EMPHASIS: f64 = 0.292;
/// Normalization constant for the compound score.
const COMPOUND_ALPHA: f64 = 15.0;

/// Polarity scores for one message.
#[derive(Debug, Clone, PartialEq)]
pub struct PolarityScores {
    pub negative: f64,
    pub neutral: f64,
    pub positive: f64,
    pub compound: f64,
}

/// Lexicon/rule polarity model. Built once at startup and reused read-only.
pub struct PolarityModel {
    lexicon: HashMap<&'static str, f64>,
    boosters: HashMap<&'static str, f64>,
    word_regex: Regex,
}

impl PolarityModel {
    pub fn new() -> Self {
        PolarityModel {
            lexicon: VALENCE_LEXICON.iter().copied().collect(),
            boosters: BOOSTERS.iter().copied().collect(),
            word_regex: Regex::new(r"[a-zA-Z']+").expect("static word pattern"),
        }
    }

    /// Score one message. The empty message scores fully neutral.
    pub fn score(&self, message: &str) -> PolarityScores {
        let tokens: Vec<&str> = self
            .word_regex
            .find_iter(message)
            .map(|m| m.as_str())
            .collect();

        if tokens.is_empty() {
            return PolarityScores {
                negative: 0.0,
                neutral: 0.0,
                positive: 0.0,
                compound: 0.0,
            };
        }

        let lowered: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let mixed_case = has_mixed_case(&tokens);

        // One sentiment slot per token; non-lexicon tokens stay neutral.
        let mut sentiments = vec![0.0; tokens.len()];
        for (i, word) in lowered.iter().enumerate() {
            let clean = word.replace('\'', "");
            let Some(&base) = self.lexicon.get(clean.as_str()) else {
                continue;
            };

            let mut valence = base;
            if mixed_case && is_all_caps(tokens[i]) {
                valence += CAPS_EMPHASIS * valence.signum();
            }

            // Look back up to three words for boosters and negations,
            // damping boosters with distance.
            for (distance, scale) in [(1usize, 1.0), (2, 0.95), (3, 0.9)] {
                if i < distance {
                    break;
                }
                let prior = lowered[i - distance].replace('\'', "");
                if let Some(&boost) = self.boosters.get(prior.as_str()) {
                    valence += boost * scale * valence.signum();
                }
                if NEGATIONS.contains(&prior.as_str()) {
                    valence *= NEGATION_FACTOR;
                }
            }
            sentiments[i] = valence;
        }

        let mut total: f64 = sentiments.iter().sum();
        let punct_emphasis = exclamation_emphasis(message);
        if total > 0.0 {
            total += punct_emphasis;
        } else if total < 0.0 {
            total -= punct_emphasis;
        }

        let compound = (total / (total * total + COMPOUND_ALPHA).sqrt()).clamp(-1.0, 1.0);

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0.0;
        for &s in &sentiments {
            if s > 0.0 {
                pos_sum += s + 1.0;
            } else if s < 0.0 {
                neg_sum += s.abs() + 1.0;
            } else {
                neu_count += 1.0;
            }
        }
        if total > 0.0 {
            pos_sum += punct_emphasis;
        } else if total < 0.0 {
            neg_sum += punct_emphasis;
        }

        let norm = pos_sum + neg_sum + neu_count;
        if norm <= 0.0 {
            return PolarityScores {
                negative: 0.0,
                neutral: 1.0,
                positive: 0.0,
                compound,
            };
        }

        PolarityScores {
            negative: neg_sum / norm,
            neutral: neu_count / norm,
            positive: pos_sum / norm,
            compound,
        }
    }
}

impl Default for PolarityModel {
    fn default() -> Self {
        Self::new()
    }
}

fn is_all_caps(token: &str) -> bool {
    token.len() > 1 && token.chars().all(|c| !c.is_alphabetic() || c.is_uppercase())
}

fn has_mixed_case(tokens: &[&str]) -> bool {
    let caps = tokens.iter().filter(|t| is_all_caps(t)).count();
    caps > 0 && caps < tokens.len()
}

fn exclamation_emphasis(message: &str) -> f64 {
    let count = message.chars().filter(|&c| c == '!').count().min(4);
    count as f64 * EXCLAIM_EMPHASIS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_message() {
        let model = PolarityModel::new();
        let s = model.score("I love this, it is wonderful and great");
        assert!(s.compound > 0.5, "compound was {}", s.compound);
        assert!(s.positive > s.negative);
    }

    #[test]
    fn test_negative_message() {
        let model = PolarityModel::new();
        let s = model.score("I hate this terrible awful mess");
        assert!(s.compound < -0.5, "compound was {}", s.compound);
        assert!(s.negative > s.positive);
    }

    #[test]
    fn test_negation_flips_polarity() {
        let model = PolarityModel::new();
        let plain = model.score("this is good");
        let negated = model.score("this is not good");
        assert!(plain.compound > 0.0);
        assert!(negated.compound < 0.0);
    }

    #[test]
    fn test_booster_increases_intensity() {
        let model = PolarityModel::new();
        let plain = model.score("this is good");
        let boosted = model.score("this is very good");
        assert!(boosted.compound > plain.compound);
    }

    #[test]
    fn test_exclamations_amplify() {
        let model = PolarityModel::new();
        let plain = model.score("this is great");
        let shouted = model.score("this is great!!!");
        assert!(shouted.compound > plain.compound);
    }

    #[test]
    fn test_caps_emphasis() {
        let model = PolarityModel::new();
        let plain = model.score("this is great stuff");
        let caps = model.score("this is GREAT stuff");
        assert!(caps.compound > plain.compound);
    }

    #[test]
    fn test_empty_and_neutral_messages() {
        let model = PolarityModel::new();
        let empty = model.score("");
        assert_eq!(empty.compound, 0.0);

        let neutral = model.score("the chair is next to the table");
        assert_eq!(neutral.compound, 0.0);
        assert!((neutral.neutral - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_proportions_are_bounded() {
        let model = PolarityModel::new();
        let s = model.score("I love winning but I hate losing!");
        for v in [s.negative, s.neutral, s.positive] {
            assert!((0.0..=1.0).contains(&v));
        }
        assert!((-1.0..=1.0).contains(&s.compound));
        assert!((s.negative + s.neutral + s.positive - 1.0).abs() < 1e-9);
    }
}
