//! Word-order-insensitive similarity scoring on a 0-100 scale.

use regex::Regex;
use std::sync::LazyLock;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W").expect("static pattern compiles"));

/// Drop Latin-1 supplement characters (U+0080..=U+00FF), blank out anything
/// that is not a Unicode word character, lowercase and trim. Letters from
/// other scripts are kept.
pub fn full_process(s: &str) -> String {
    let stripped: String = s.chars().filter(|c| !('\u{80}'..='\u{FF}').contains(c)).collect();
    NON_WORD
        .replace_all(&stripped, " ")
        .to_lowercase()
        .trim()
        .to_string()
}

fn sorted_tokens(s: &str) -> String {
    let processed = full_process(s);
    let mut tokens: Vec<&str> = processed.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Similarity of `a` and `b` after sorting their tokens. Strings holding the
/// same words in any order score 100, even when nothing survives processing.
pub fn token_sort_ratio(a: &str, b: &str) -> u8 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

/// Indel-normalized similarity, `2 * LCS / (|a| + |b|)` over characters,
/// rounded half-to-even. Equal strings score 100; otherwise an empty side
/// scores 0.
pub fn ratio(a: &str, b: &str) -> u8 {
    if a == b {
        return 100;
    }
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = (a.len() + b.len()) as f64;
    let similarity = 2.0 * lcs_len(&a, &b) as f64 / total;
    (100.0 * similarity).round_ties_even() as u8
}

fn lcs_len<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_100() {
        assert_eq!(token_sort_ratio("Moby Dick", "Moby Dick"), 100);
    }

    #[test]
    fn word_order_is_ignored() {
        assert_eq!(token_sort_ratio("Dick Moby", "Moby Dick"), 100);
    }

    #[test]
    fn case_and_punctuation_are_ignored() {
        assert_eq!(token_sort_ratio("moby dick", "Moby-Dick!"), 100);
    }

    #[test]
    fn subtitle_lowers_score() {
        // "dick moby" vs "dick moby or the whale": 2 * 9 / 31
        assert_eq!(token_sort_ratio("Moby Dick", "Moby Dick; or, The Whale"), 58);
    }

    #[test]
    fn unrelated_strings_score_low() {
        assert!(token_sort_ratio("Moby Dick", "Quantum Field Theory") < 50);
    }

    #[test]
    fn empty_side_scores_zero() {
        assert_eq!(token_sort_ratio("", "Moby Dick"), 0);
        assert_eq!(token_sort_ratio("Moby Dick", "   "), 0);
    }

    #[test]
    fn both_sides_empty_after_processing_score_100() {
        assert_eq!(token_sort_ratio("!!!", "???"), 100);
        assert_eq!(token_sort_ratio("", ""), 100);
    }

    #[test]
    fn identical_non_latin_titles_score_100() {
        assert_eq!(token_sort_ratio("ספר הזהר", "ספר הזהר"), 100);
        assert_eq!(token_sort_ratio("Война и мир", "Война и мир"), 100);
        assert_eq!(token_sort_ratio("Ὀδύσσεια", "Ὀδύσσεια"), 100);
    }

    #[test]
    fn non_latin_word_order_is_ignored() {
        assert_eq!(token_sort_ratio("הזהר ספר", "ספר הזהר"), 100);
        assert_eq!(token_sort_ratio("мир и Война", "Война и мир"), 100);
    }

    #[test]
    fn non_latin_case_is_folded() {
        assert_eq!(full_process("ВОЙНА и Мир"), "война и мир");
    }

    #[test]
    fn non_latin_partial_overlap_counts_characters() {
        // "הזהר" vs "הזהר ספר": 2 * 4 / (4 + 8) = 66.7
        assert_eq!(token_sort_ratio("הזהר", "ספר הזהר"), 67);
    }

    #[test]
    fn latin1_supplement_characters_are_dropped() {
        assert_eq!(full_process("Café Müller"), "caf mller");
        assert_eq!(token_sort_ratio("Café", "Caf"), 100);
    }

    #[test]
    fn punctuation_between_non_latin_words_is_blanked() {
        assert_eq!(full_process("ספר, הזהר!"), "ספר  הזהר");
    }

    #[test]
    fn underscore_counts_as_word_character() {
        assert_eq!(full_process("snake_case, ok"), "snake_case  ok");
    }

    #[test]
    fn halves_round_to_even() {
        // 2 * 1 / 16 = 12.5 and 2 * 3 / 16 = 37.5
        assert_eq!(ratio("a", "abbbbbbbbbbbbbb"), 12);
        assert_eq!(ratio("abc", "abcdddddddddd"), 38);
    }

    #[test]
    fn score_is_symmetric() {
        let pairs = [("Walden", "Walden; or, Life in the Woods"), ("The Raven", "Raven")];
        for (a, b) in pairs {
            assert_eq!(token_sort_ratio(a, b), token_sort_ratio(b, a));
        }
    }

    #[test]
    fn lcs_of_disjoint_is_zero() {
        assert_eq!(lcs_len(b"abc", b"xyz"), 0);
        assert_eq!(lcs_len(b"abcbdab", b"bdcaba"), 4);
    }
}
