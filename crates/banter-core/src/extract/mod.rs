//! Importance extraction: free-form text to a small set of salient terms.
//!
//! The pipeline is deliberately dumb and deterministic: lowercase, strip
//! punctuation, drop stop-words / numbers / one-letter tokens, then rank what
//! is left by collocation frequency and keep the top few.

mod collocations;
mod stopwords;

pub use stopwords::FILLER_WORDS;

use stopwords::is_stop_word;

/// Reduce `text` to an ordered sequence of salient terms.
///
/// Fewer than two sanitized tokens skip ranking entirely and come back as-is;
/// otherwise tokens are collocation-ranked and capped at a size derived from
/// the sanitized length. Pure function: same input, same output.
pub fn extract(text: &str) -> Vec<String> {
    let sanitized = sanitize(text);
    if sanitized.len() < 2 {
        return sanitized;
    }

    let cap = term_cap(sanitized.len());
    let mut ranked = collocations::rank_tokens(&sanitized);
    ranked.truncate(cap);
    ranked
}

/// Tokenize, lowercase, strip punctuation, and filter out noise tokens.
fn sanitize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|token| {
            token
                .to_lowercase()
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
        })
        .filter(|token| {
            token.len() > 1
                && !token.chars().all(|c| c.is_ascii_digit())
                && !is_stop_word(token)
        })
        .collect()
}

/// How many salient terms to keep for a sanitized length of `n`.
fn term_cap(n: usize) -> usize {
    match n {
        0..=5 => 3,
        6..=10 => 4,
        _ => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_single_token_identity() {
        // One surviving token: returned unchanged, no ranking.
        assert_eq!(extract("the CLOCK!"), vec!["clock".to_string()]);
    }

    #[test]
    fn test_floor_empty() {
        assert!(extract("").is_empty());
        assert!(extract("the a an it").is_empty());
        assert!(extract("??? !!").is_empty());
        assert!(extract("42 7 1000").is_empty());
    }

    #[test]
    fn test_punctuation_stripped() {
        let terms = extract("broken, clocks!");
        assert_eq!(terms.len(), 2);
        assert!(terms.contains(&"broken".to_string()));
        assert!(terms.contains(&"clocks".to_string()));
    }

    #[test]
    fn test_short_and_numeric_tokens_dropped() {
        let terms = extract("x 99 problems b 1 glitch");
        assert_eq!(terms.len(), 2);
        assert!(terms.contains(&"problems".to_string()));
        assert!(terms.contains(&"glitch".to_string()));
    }

    #[test]
    fn test_cap_step_function() {
        assert_eq!(term_cap(2), 3);
        assert_eq!(term_cap(5), 3);
        assert_eq!(term_cap(6), 4);
        assert_eq!(term_cap(10), 4);
        assert_eq!(term_cap(11), 5);
    }

    #[test]
    fn test_cap_never_exceeds_distinct_tokens() {
        // Six tokens sanitized but only two distinct.
        let terms = extract("ping pong ping pong ping pong");
        assert_eq!(terms.len(), 2);
    }

    #[test]
    fn test_first_message_example() {
        // Interrogatives, auxiliaries, and pronouns fall away; the three
        // content words survive and the cap for a short message is three.
        let terms = extract("Why does this always break, how do I fix it");
        assert_eq!(terms.len(), 3);
        assert!(terms.contains(&"always".to_string()));
        assert!(terms.contains(&"break".to_string()));
        assert!(terms.contains(&"fix".to_string()));
    }

    #[test]
    fn test_long_input_capped_at_five() {
        let text = "galaxies quasars nebulae comets asteroids meteors planets \
                    moons orbits telescopes observatories";
        let terms = extract(text);
        assert_eq!(terms.len(), 5);
    }

    #[test]
    fn test_deterministic() {
        let text = "flaky tests keep breaking the nightly build again";
        assert_eq!(extract(text), extract(text));
    }
}
