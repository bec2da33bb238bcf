//! Statistical collocation ranking over sanitized tokens.
//!
//! Tokens are weighted by their own frequency plus the frequency mass of the
//! adjacent bigrams they take part in, so words that keep showing up next to
//! the same neighbours outrank words that merely repeat.

use std::collections::HashMap;

/// Rank `tokens` by combined unigram + bigram frequency.
///
/// Returns the distinct tokens in weight-descending order; ties are broken by
/// first occurrence in the input. The input order is the sanitized message
/// order, so adjacency reflects the original text.
pub fn rank_tokens(tokens: &[String]) -> Vec<String> {
    let mut unigram: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    for (i, token) in tokens.iter().enumerate() {
        *unigram.entry(token).or_insert(0) += 1;
        first_seen.entry(token).or_insert(i);
    }

    let mut bigram: HashMap<(&str, &str), usize> = HashMap::new();
    for pair in tokens.windows(2) {
        *bigram.entry((&pair[0], &pair[1])).or_insert(0) += 1;
    }

    let mut weight: HashMap<&str, usize> = unigram.clone();
    for (&(left, right), &count) in &bigram {
        *weight.entry(left).or_insert(0) += count;
        if left != right {
            *weight.entry(right).or_insert(0) += count;
        }
    }

    let mut ranked: Vec<&str> = first_seen.keys().copied().collect();
    ranked.sort_by_key(|token| (std::cmp::Reverse(weight[token]), first_seen[token]));
    ranked.into_iter().map(str::to_string).collect()
}
