//! Text-message scoring: sentiment, readability, lexical structure,
//! profanity, and character-surface ratios.

pub mod lexical;
pub mod profanity;
pub mod readability;
pub mod sentiment;
pub mod scorer;
pub mod surface;

pub use scorer::MessageScorer;
