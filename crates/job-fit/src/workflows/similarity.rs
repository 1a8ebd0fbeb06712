//! Token-set similarity between two job descriptions.
//!
//! Both texts are split into lowercase alphanumeric tokens and reduced to sets, so
//! word order and repeated words do not matter. With `sect` the sorted intersection
//! and `diff` each side's sorted leftover tokens, three strings are compared using
//! the normalized Indel ratio (edit distance counting only insertions and
//! deletions): `sect` against `sect diff` for each side, and the two `sect diff`
//! strings against each other. The best comparison wins. A posting re-hosted with
//! extra boilerplate still scores high because the intersection dominates.

use rapidfuzz::distance::indel;
use std::collections::BTreeSet;

/// Scores two texts from 0 (unrelated) to 100 (same token set).
pub trait SimilarityMatcher: Send + Sync {
    fn score(&self, left: &str, right: &str) -> u8;
}

/// Default matcher using [`token_set_ratio`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSetMatcher;

impl SimilarityMatcher for TokenSetMatcher {
    fn score(&self, left: &str, right: &str) -> u8 {
        token_set_ratio(left, right)
    }
}

fn tokens(text: &str) -> BTreeSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn join<'a, I: IntoIterator<Item = &'a String>>(tokens: I) -> String {
    tokens
        .into_iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Token-set ratio, floored to an integer percentage.
pub fn token_set_ratio(left: &str, right: &str) -> u8 {
    let left = tokens(left);
    let right = tokens(right);
    if left.is_empty() || right.is_empty() {
        return 0;
    }

    let intersection: Vec<&String> = left.intersection(&right).collect();
    let only_left: Vec<&String> = left.difference(&right).collect();
    let only_right: Vec<&String> = right.difference(&left).collect();

    if !intersection.is_empty() && (only_left.is_empty() || only_right.is_empty()) {
        return 100;
    }

    let diff_left = join(only_left);
    let diff_right = join(only_right);
    let left_len = diff_left.chars().count();
    let right_len = diff_right.chars().count();
    let sect_len = join(intersection).chars().count();

    // Lengths of "<sect> <diff>" for each side; the separator only exists when the
    // intersection is non-empty.
    let separator = usize::from(sect_len > 0);
    let sect_left_len = sect_len + separator + left_len;
    let sect_right_len = sect_len + separator + right_len;

    // Both "<sect> <diff>" strings share the prefix, so their Indel distance is the
    // distance between the diffs.
    let distance = indel::distance(diff_left.chars(), diff_right.chars());
    let mut best = percent(sect_left_len + sect_right_len, distance);
    if sect_len == 0 {
        return best;
    }

    // "<sect> <diff>" differs from "<sect>" only by the appended suffix.
    best = best.max(percent(sect_len + sect_left_len, separator + left_len));
    best = best.max(percent(sect_len + sect_right_len, separator + right_len));

    best
}

/// Normalized Indel similarity of two strings as a floored percentage.
pub fn indel_ratio(left: &str, right: &str) -> u8 {
    let total = left.chars().count() + right.chars().count();
    percent(total, indel::distance(left.chars(), right.chars()))
}

fn percent(total: usize, distance: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let similar = total.saturating_sub(distance) as u64;
    ((similar * 100) / total as u64) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_and_reordered_texts_score_full() {
        let posting = "Build and operate Azure services for enterprise customers.";
        assert_eq!(token_set_ratio(posting, posting), 100);
        assert_eq!(
            token_set_ratio(
                "customers enterprise for services Azure operate and Build",
                posting
            ),
            100
        );
    }

    #[test]
    fn duplicates_case_and_punctuation_are_ignored() {
        assert_eq!(
            token_set_ratio("Rust, RUST; rust engineer!", "rust engineer"),
            100
        );
    }

    #[test]
    fn subset_with_extra_boilerplate_scores_full() {
        assert_eq!(
            token_set_ratio(
                "QA automation developer selenium",
                "QA automation developer selenium. Apply now, we offer great perks"
            ),
            100
        );
    }

    #[test]
    fn partial_overlap_uses_best_comparison() {
        assert_eq!(token_set_ratio("alpha beta", "alpha gamma"), 66);
        assert_eq!(token_set_ratio("alpha gamma", "alpha beta"), 66);
    }

    #[test]
    fn disjoint_and_empty_texts() {
        assert_eq!(token_set_ratio("abc", "xyz"), 0);
        assert_eq!(token_set_ratio("", "anything"), 0);
        assert_eq!(token_set_ratio("--- ...", "anything"), 0);
    }

    #[test]
    fn indel_ratio_counts_insertions_and_deletions() {
        assert_eq!(indel_ratio("kitten", "sitting"), 61);
        assert_eq!(indel_ratio("", ""), 100);
        assert_eq!(indel_ratio("abc", ""), 0);
    }

    #[test]
    fn diff_comparison_is_normalized_by_full_token_strings() {
        // 43-char shared intersection plus one 50-char token per side differing in
        // its last five characters: Indel distance 10 over 94 + 94 characters.
        let shared = "senior cloud support engineer azure tenants";
        let left = format!("{shared} {}abcde", "x".repeat(45));
        let right = format!("{shared} {}fghij", "x".repeat(45));

        assert_eq!(token_set_ratio(&left, &right), 94);
        assert_eq!(token_set_ratio(&right, &left), 94);
    }

    #[test]
    fn disjoint_diffs_without_intersection_use_diff_lengths() {
        assert_eq!(token_set_ratio("kitten", "sitting"), 61);
    }

    #[test]
    fn matcher_is_deterministic() {
        let matcher = TokenSetMatcher;
        let a = "Support SharePoint Online tenants and Power Automate flows";
        let b = "SharePoint Online admin supporting Power Automate and Teams";
        assert_eq!(matcher.score(a, b), matcher.score(a, b));
    }
}
