//! Stop-word lists for the importance extractor.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Standard English stop-words.
static STANDARD: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "if", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "as", "is", "am", "was", "are", "were", "been", "be", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "shall", "may", "might", "must",
    "can", "this", "that", "these", "those", "there", "here", "then", "than", "not", "no", "nor",
    "so", "too", "up", "down", "out", "off", "over", "under", "again", "about", "into", "onto",
];

/// Supplementary filler, pronoun, and interrogative words stripped on top of
/// the standard list. Chat input is thick with these and none of them carry
/// retrieval weight.
pub static FILLER_WORDS: &[&str] = &[
    // interrogatives
    "who", "whom", "whose", "what", "when", "where", "why", "how", "which",
    // pronouns
    "i", "me", "my", "mine", "we", "us", "our", "ours", "you", "your", "yours", "he", "him",
    "his", "she", "her", "hers", "it", "its", "they", "them", "their", "theirs", "myself",
    "yourself", "itself",
    // fillers and contractions with the apostrophe stripped
    "well", "just", "really", "actually", "like", "also", "very", "quite", "maybe", "please",
    "yeah", "yes", "ok", "okay", "hey", "hi", "hello", "thanks", "thank", "dont", "cant", "wont",
    "isnt", "arent", "didnt", "doesnt", "im", "ive", "id", "youre", "thats", "whats",
];

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    STANDARD
        .iter()
        .chain(FILLER_WORDS.iter())
        .copied()
        .collect()
});

/// True if `token` is on the standard or supplementary stop list.
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_words_filtered() {
        assert!(is_stop_word("the"));
        assert!(is_stop_word("does"));
        assert!(is_stop_word("this"));
    }

    #[test]
    fn test_filler_words_filtered() {
        assert!(is_stop_word("why"));
        assert!(is_stop_word("how"));
        assert!(is_stop_word("dont"));
    }

    #[test]
    fn test_content_words_pass() {
        assert!(!is_stop_word("break"));
        assert!(!is_stop_word("always"));
        assert!(!is_stop_word("clocks"));
    }
}
