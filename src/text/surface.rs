//! Character-level surface ratios of a message.
//!
//! All three ratios guard their denominators and return 0 for inputs with
//! nothing to measure, including the empty string.

/// Uppercase letters over all alphabetic letters; 0 when there are none.
pub fn uppercase_ratio(message: &str) -> f64 {
    let letters: Vec<char> = message.chars().filter(|c| c.is_alphabetic()).collect();
    if letters.is_empty() {
        return 0.0;
    }
    let upper = letters.iter().filter(|c| c.is_uppercase()).count();
    upper as f64 / letters.len() as f64
}

/// Alphabetic characters over all characters; 0 for the empty string.
pub fn alpha_ratio(message: &str) -> f64 {
    let total = message.chars().count();
    if total == 0 {
        return 0.0;
    }
    let letters = message.chars().filter(|c| c.is_alphabetic()).count();
    letters as f64 / total as f64
}

/// ASCII characters over all characters; 0 when no ASCII is present.
pub fn ascii_ratio(message: &str) -> f64 {
    let ascii = message.chars().filter(|c| c.is_ascii()).count();
    if ascii == 0 {
        return 0.0;
    }
    ascii as f64 / message.chars().count() as f64
}
